//! Bulk import for enumeration and code completion.

use crate::base::DeclId;
use crate::env::{ScopeState, SymbolEnvironment, SymbolEnvironmentMut};

use super::{ImportCache, Importer};

/// Selects which parent members a bulk import brings over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompletionFilter<'p> {
    prefix: &'p str,
}

impl<'p> CompletionFilter<'p> {
    /// Accept identifiers starting with `prefix`. An empty prefix accepts
    /// every identifier.
    pub fn new(prefix: &'p str) -> Self {
        Self { prefix }
    }

    /// The prefix candidates must start with.
    pub fn prefix(&self) -> &'p str {
        self.prefix
    }

    /// Whether a member spelled `name` passes the filter.
    ///
    /// Only plain identifiers qualify; operator-like and anonymous names
    /// never show up in completion.
    pub fn accepts(&self, name: &str) -> bool {
        is_identifier(name) && name.starts_with(self.prefix)
    }

    /// Import every accepted member of the parent scope linked to `scope`,
    /// then mark `scope` fully materialized.
    ///
    /// Does nothing unless `scope` is externally backed and linked. Once
    /// sealed, `scope` never consults the parent again, even if the parent
    /// gains members later. Returns how many declarations became visible.
    #[tracing::instrument(level = "debug", skip_all, fields(?scope, prefix = self.prefix))]
    pub fn materialize<P, C>(
        &self,
        parent: &P,
        cache: &mut ImportCache,
        child: &mut C,
        scope: DeclId,
    ) -> usize
    where
        P: SymbolEnvironment,
        C: SymbolEnvironmentMut,
    {
        if !child.is_externally_backed(scope) {
            tracing::trace!("scope is not externally backed");
            return 0;
        }
        let Some(parent_scope) = cache.lookup_scope(scope) else {
            tracing::debug!("scope has no parent link");
            return 0;
        };

        let mut importer = Importer::new(parent, child, cache);
        let mut visible = 0usize;
        for member in parent.members(parent_scope) {
            let Some(text) = parent
                .declaration(member)
                .and_then(|decl| parent.name_text(decl.name))
            else {
                continue;
            };
            if !self.accepts(&text) {
                continue;
            }
            if importer.import(member, scope).is_visible() {
                visible += 1;
            }
        }

        if let Err(err) = child.set_scope_state(scope, ScopeState::FullyMaterialized) {
            tracing::warn!(%err, "could not seal materialized scope");
        }
        tracing::debug!(visible, "materialized");
        visible
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || unicode_ident::is_xid_start(first))
        && chars.all(unicode_ident::is_xid_continue)
}
