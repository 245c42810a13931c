//! The entry point a child environment calls when a lookup misses.

use crate::base::{DeclId, EnvId, Name};
use crate::env::{ScopeState, SymbolEnvironment, SymbolEnvironmentMut};

use super::{CompletionFilter, ImportCache, Importer};

/// Resolves names missing from a child environment against its parent.
///
/// The broker owns the [`ImportCache`] and nothing else. Both environments
/// stay owned by the caller and are passed in on every call, the parent
/// shared and the child exclusively, so one resolution can never interleave
/// with another on the same child.
#[derive(Clone, Debug)]
pub struct LookupBroker {
    parent_env: EnvId,
    child_env: EnvId,
    cache: ImportCache,
}

impl LookupBroker {
    /// Link `child` to `parent`.
    ///
    /// The two root scopes are recorded in the cache and the child root
    /// becomes lazily backed, so the first miss at top level already reaches
    /// the parent.
    pub fn link<P, C>(parent: &P, child: &mut C) -> Self
    where
        P: SymbolEnvironment,
        C: SymbolEnvironmentMut,
    {
        let child_root = child.root_scope();
        let parent_root = parent.root_scope();

        if let Err(err) = child.set_scope_state(child_root, ScopeState::LazyBacked) {
            tracing::warn!(%err, "child root cannot be marked lazily backed");
        }
        tracing::debug!(parent = ?parent.env_id(), child = ?child.env_id(), "linked environments");

        Self {
            parent_env: parent.env_id(),
            child_env: child.env_id(),
            cache: ImportCache::new(child_root, parent_root),
        }
    }

    /// Cross-environment records made so far.
    pub fn cache(&self) -> &ImportCache {
        &self.cache
    }

    /// Import every parent declaration named `name` that is visible in the
    /// parent scope linked to `scope`.
    ///
    /// Returns `true` if at least one declaration is now a member of `scope`.
    /// `false` is the normal "no such symbol" answer: the name is absent in
    /// the parent, everything found was skipped, or `scope` has no parent
    /// link. In the last case nothing is mutated.
    ///
    /// Calling this on a scope that is not externally backed is a caller bug
    /// and panics in debug builds.
    #[tracing::instrument(level = "debug", skip_all, fields(?scope, ?name))]
    pub fn resolve<P, C>(&mut self, parent: &P, child: &mut C, scope: DeclId, name: Name) -> bool
    where
        P: SymbolEnvironment,
        C: SymbolEnvironmentMut,
    {
        self.check_pair(parent, child);

        let backed = child.is_externally_backed(scope);
        debug_assert!(backed, "resolve called on scope {scope:?} without external backing");
        if !backed {
            tracing::warn!(state = ?child.scope_state(scope), "scope is not externally backed");
            return false;
        }

        let Some(parent_scope) = self.cache.lookup_scope(scope) else {
            tracing::debug!("scope has no parent link");
            return false;
        };

        let Some(parent_name) = self.parent_name(parent, child, name) else {
            return false;
        };

        let found = parent.lookup(parent_scope, parent_name);
        if found.is_empty() {
            tracing::trace!("not found in parent");
            return false;
        }

        let mut importer = Importer::new(parent, child, &mut self.cache);
        let mut visible = 0usize;
        for decl in found {
            if importer.import(decl, scope).is_visible() {
                visible += 1;
            }
        }

        tracing::debug!(visible, "resolved");
        visible > 0
    }

    /// Native lookup with the broker as fallback.
    ///
    /// Asks `child` first; only a local miss in an externally backed scope
    /// reaches the parent, after which the child is asked again.
    pub fn lookup<P, C>(&mut self, parent: &P, child: &mut C, scope: DeclId, name: Name) -> Vec<DeclId>
    where
        P: SymbolEnvironment,
        C: SymbolEnvironmentMut,
    {
        let local = child.lookup(scope, name);
        if !local.is_empty() || !child.is_externally_backed(scope) {
            return local;
        }

        if self.resolve(parent, child, scope, name) {
            child.lookup(scope, name)
        } else {
            Vec::new()
        }
    }

    /// Bulk-import the members of `scope`'s parent whose names start with
    /// `prefix`, then seal `scope`. See [`CompletionFilter::materialize`].
    pub fn materialize<P, C>(&mut self, parent: &P, child: &mut C, scope: DeclId, prefix: &str) -> usize
    where
        P: SymbolEnvironment,
        C: SymbolEnvironmentMut,
    {
        self.check_pair(parent, child);
        CompletionFilter::new(prefix).materialize(parent, &mut self.cache, child, scope)
    }

    /// The parent-facing spelling of `name`: cached, or the same spelling
    /// interned in the parent.
    fn parent_name<P, C>(&self, parent: &P, child: &C, name: Name) -> Option<Name>
    where
        P: SymbolEnvironment,
        C: SymbolEnvironment,
    {
        if let Some(cached) = self.cache.lookup_name(name) {
            return Some(cached);
        }

        let text = child.name_text(name)?;
        if text.is_empty() {
            return None;
        }
        Some(parent.intern_name(&text))
    }

    fn check_pair<P, C>(&self, parent: &P, child: &C)
    where
        P: SymbolEnvironment,
        C: SymbolEnvironment,
    {
        debug_assert_eq!(parent.env_id(), self.parent_env, "wrong parent environment");
        debug_assert_eq!(child.env_id(), self.child_env, "wrong child environment");
    }
}
