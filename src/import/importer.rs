//! Structural copy of single declarations from parent to child.
//!
//! Copies are minimal: a scope is copied as a bare node and marked
//! [`ScopeState::LazyBacked`], so its members are only pulled in when the
//! child actually asks for them. Nothing recurses into the parent's graph.

use crate::base::{DeclId, Name};
use crate::env::{DeclSpec, Declaration, ScopeState, SymbolEnvironment, SymbolEnvironmentMut};

use super::ImportCache;

/// Why a declaration was not imported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Parameterized callables cannot be copied.
    Template,
    /// The handle does not name a declaration of the parent environment.
    ForeignDeclaration,
    /// The child environment refused the copy.
    Rejected,
}

/// Result of importing one declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportOutcome {
    /// A new node was created in the child.
    Imported(DeclId),
    /// This parent declaration was already copied into the target scope.
    Reused(DeclId),
    /// Nothing was copied; the child sees no declaration.
    Skipped(SkipReason),
}

impl ImportOutcome {
    /// The child-side declaration, if the source is now visible in the child.
    pub fn declaration(self) -> Option<DeclId> {
        match self {
            ImportOutcome::Imported(id) | ImportOutcome::Reused(id) => Some(id),
            ImportOutcome::Skipped(_) => None,
        }
    }

    /// Whether the import left a declaration visible in the child.
    pub fn is_visible(self) -> bool {
        self.declaration().is_some()
    }
}

/// Copies declarations from `parent` into `child`, keeping `cache` current.
///
/// Short-lived: one is created per broker or filter operation.
pub struct Importer<'a, P, C> {
    parent: &'a P,
    child: &'a mut C,
    cache: &'a mut ImportCache,
}

impl<'a, P, C> Importer<'a, P, C>
where
    P: SymbolEnvironment,
    C: SymbolEnvironmentMut,
{
    /// Create an importer copying from `parent` into `child`.
    pub fn new(parent: &'a P, child: &'a mut C, cache: &'a mut ImportCache) -> Self {
        Self {
            parent,
            child,
            cache,
        }
    }

    /// Import `decl` with the dispatch the broker uses: scopes as bare lazy
    /// nodes, everything else as a full copy.
    pub fn import(&mut self, decl: DeclId, target: DeclId) -> ImportOutcome {
        let is_scope = self
            .parent
            .declaration(decl)
            .is_some_and(Declaration::is_scope);
        if is_scope {
            self.import_scope_node(decl, target)
        } else {
            self.import_declaration(decl, target)
        }
    }

    /// Copy `decl` into `target` and record its name mapping.
    ///
    /// Templated callables are skipped and leave no trace in the cache.
    pub fn import_declaration(&mut self, decl: DeclId, target: DeclId) -> ImportOutcome {
        let parent = self.parent;
        let Some(source) = parent.declaration(decl) else {
            tracing::debug!(?decl, "not a parent declaration; skipping");
            return ImportOutcome::Skipped(SkipReason::ForeignDeclaration);
        };

        if source.kind.is_templated_callable() {
            tracing::debug!(
                name = ?parent.name_text(source.name),
                "templated callable cannot be imported; skipping"
            );
            return ImportOutcome::Skipped(SkipReason::Template);
        }

        self.copy_into(source, target)
    }

    /// Copy only the scope node `scope_decl`, leaving its members behind.
    ///
    /// The copy is marked lazily backed and linked to `scope_decl`.
    pub fn import_scope_node(&mut self, scope_decl: DeclId, target: DeclId) -> ImportOutcome {
        let parent = self.parent;
        match parent.declaration(scope_decl) {
            Some(source) if source.is_scope() => self.copy_into(source, target),
            Some(_) => self.import_declaration(scope_decl, target),
            None => {
                tracing::debug!(?scope_decl, "not a parent declaration; skipping");
                ImportOutcome::Skipped(SkipReason::ForeignDeclaration)
            }
        }
    }

    fn copy_into(&mut self, source: &Declaration, target: DeclId) -> ImportOutcome {
        let Some(text) = self.parent.name_text(source.name) else {
            tracing::warn!(decl = ?source.id, "parent declaration has an unknown name");
            return ImportOutcome::Skipped(SkipReason::Rejected);
        };
        let name = self.child.intern_name(&text);

        // Reuse is by source identity only: two distinct parent declarations
        // always get two copies, however alike they look.
        let outcome = match self.cache.lookup_copy(source.id, target) {
            Some(existing) => ImportOutcome::Reused(existing),
            None => {
                let spec = DeclSpec {
                    name,
                    kind: source.kind,
                    detail: source.detail.clone(),
                };
                match self.child.insert_declaration(target, spec) {
                    Ok(created) => ImportOutcome::Imported(created),
                    Err(err) => {
                        tracing::warn!(name = %text, %err, "child rejected imported declaration");
                        return ImportOutcome::Skipped(SkipReason::Rejected);
                    }
                }
            }
        };

        if let Some(copy) = outcome.declaration() {
            tracing::trace!(name = %text, kind = source.kind.display_name(), ?outcome, "imported");
            self.imported(source, target, copy, name);
        }
        outcome
    }

    /// Bookkeeping for every successful copy, scopes included.
    fn imported(&mut self, from: &Declaration, target: DeclId, to: DeclId, name: Name) {
        if from.is_scope() {
            if self.child.scope_state(to) == Some(ScopeState::Unlinked) {
                if let Err(err) = self.child.set_scope_state(to, ScopeState::LazyBacked) {
                    tracing::warn!(%err, "could not mark imported scope as lazily backed");
                }
            }
            self.cache.record_scope(to, from.id);
        }
        self.cache.record_copy(from.id, target, to);
        self.cache.record_name(name, from.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{DeclKind, Environment};

    fn linked() -> (Environment, Environment, ImportCache) {
        let parent = Environment::new();
        let child = Environment::new();
        let cache = ImportCache::new(child.root_scope(), parent.root_scope());
        (parent, child, cache)
    }

    #[test]
    fn test_leaf_copy_keeps_name_kind_and_detail() {
        let (mut parent, mut child, mut cache) = linked();
        let proot = parent.root_scope();
        let croot = child.root_scope();
        let src = parent
            .declare_with_detail(proot, "answer", DeclKind::Variable, "i32")
            .unwrap();

        let outcome = Importer::new(&parent, &mut child, &mut cache).import_declaration(src, croot);

        let ImportOutcome::Imported(copy) = outcome else {
            panic!("expected a fresh copy, got {outcome:?}");
        };
        let decl = child.declaration(copy).unwrap();
        assert_ne!(copy, src);
        assert_eq!(child.name_of(copy).as_deref(), Some("answer"));
        assert_eq!(decl.kind, DeclKind::Variable);
        assert_eq!(decl.detail.as_deref(), Some("i32"));
        assert_eq!(decl.owner, Some(croot));
        assert_eq!(child.lookup_text(croot, "answer"), vec![copy]);
        assert_eq!(
            cache.lookup_name(child.intern_name("answer")),
            Some(parent.intern_name("answer"))
        );
    }

    #[test]
    fn test_templates_are_skipped_without_cache_records() {
        let (mut parent, mut child, mut cache) = linked();
        let proot = parent.root_scope();
        let croot = child.root_scope();
        let tmpl = parent
            .declare(proot, "make", DeclKind::FunctionTemplate)
            .unwrap();

        let outcome = Importer::new(&parent, &mut child, &mut cache).import(tmpl, croot);

        assert_eq!(outcome, ImportOutcome::Skipped(SkipReason::Template));
        assert!(child.members(croot).is_empty());
        assert_eq!(cache.name_count(), 0);
    }

    #[test]
    fn test_scope_node_is_shallow_and_lazy() {
        let (mut parent, mut child, mut cache) = linked();
        let proot = parent.root_scope();
        let croot = child.root_scope();
        let ns = parent.declare(proot, "geo", DeclKind::Namespace).unwrap();
        parent.declare(ns, "Point", DeclKind::Record).unwrap();

        let outcome = Importer::new(&parent, &mut child, &mut cache).import_scope_node(ns, croot);

        let copy = outcome.declaration().unwrap();
        assert!(child.members(copy).is_empty());
        assert_eq!(child.scope_state(copy), Some(ScopeState::LazyBacked));
        assert_eq!(cache.lookup_scope(copy), Some(ns));
        assert_eq!(cache.name_count(), 1);
    }

    #[test]
    fn test_same_source_is_reused() {
        let (mut parent, mut child, mut cache) = linked();
        let proot = parent.root_scope();
        let croot = child.root_scope();
        let src = parent.declare(proot, "x", DeclKind::Variable).unwrap();

        let first = Importer::new(&parent, &mut child, &mut cache).import(src, croot);
        let second = Importer::new(&parent, &mut child, &mut cache).import(src, croot);

        assert!(matches!(first, ImportOutcome::Imported(_)));
        assert_eq!(second, ImportOutcome::Reused(first.declaration().unwrap()));
        assert_eq!(child.members(croot).len(), 1);
        assert_eq!(cache.lookup_copy(src, croot), first.declaration());
    }

    #[test]
    fn test_lookalike_leaves_are_not_merged() {
        let (mut parent, mut child, mut cache) = linked();
        let proot = parent.root_scope();
        let croot = child.root_scope();
        let f1 = parent.declare(proot, "f", DeclKind::Function).unwrap();
        let f2 = parent.declare(proot, "f", DeclKind::Function).unwrap();

        let mut importer = Importer::new(&parent, &mut child, &mut cache);
        let a = importer.import(f1, croot);
        let b = importer.import(f2, croot);

        assert!(matches!(a, ImportOutcome::Imported(_)));
        assert!(matches!(b, ImportOutcome::Imported(_)));
        assert_ne!(a, b);
        assert_eq!(
            child.lookup_text(croot, "f"),
            vec![a.declaration().unwrap(), b.declaration().unwrap()]
        );
    }

    #[test]
    fn test_same_named_scopes_get_separate_copies() {
        let (mut parent, mut child, mut cache) = linked();
        let proot = parent.root_scope();
        let croot = child.root_scope();
        let n1 = parent.declare(proot, "ns", DeclKind::Namespace).unwrap();
        let n2 = parent.declare(proot, "ns", DeclKind::Namespace).unwrap();

        let mut importer = Importer::new(&parent, &mut child, &mut cache);
        let c1 = importer.import(n1, croot).declaration().unwrap();
        let c2 = importer.import(n2, croot).declaration().unwrap();

        assert_ne!(c1, c2);
        assert_eq!(cache.lookup_scope(c1), Some(n1));
        assert_eq!(cache.lookup_scope(c2), Some(n2));
        assert_eq!(child.scope_state(c2), Some(ScopeState::LazyBacked));
    }

    #[test]
    fn test_native_lookalike_scope_is_left_alone() {
        let (mut parent, mut child, mut cache) = linked();
        let proot = parent.root_scope();
        let croot = child.root_scope();
        let pns = parent.declare(proot, "util", DeclKind::Namespace).unwrap();
        let native = child.declare(croot, "util", DeclKind::Namespace).unwrap();

        let outcome = Importer::new(&parent, &mut child, &mut cache).import(pns, croot);

        let copy = outcome.declaration().unwrap();
        assert!(matches!(outcome, ImportOutcome::Imported(_)));
        assert_ne!(copy, native);
        assert_eq!(child.scope_state(native), Some(ScopeState::Unlinked));
        assert_eq!(cache.lookup_scope(native), None);
        assert_eq!(cache.lookup_scope(copy), Some(pns));
    }

    #[test]
    fn test_child_handle_is_foreign() {
        let (parent, mut child, mut cache) = linked();
        let croot = child.root_scope();

        let outcome = Importer::new(&parent, &mut child, &mut cache).import_declaration(croot, croot);

        assert_eq!(outcome, ImportOutcome::Skipped(SkipReason::ForeignDeclaration));
    }

    #[test]
    fn test_rejected_target_is_reported() {
        let (mut parent, mut child, mut cache) = linked();
        let proot = parent.root_scope();
        let croot = child.root_scope();
        let leaf = child.declare(croot, "v", DeclKind::Variable).unwrap();
        let src = parent.declare(proot, "w", DeclKind::Variable).unwrap();

        let outcome = Importer::new(&parent, &mut child, &mut cache).import(src, leaf);

        assert_eq!(outcome, ImportOutcome::Skipped(SkipReason::Rejected));
        assert_eq!(cache.name_count(), 0);
    }
}
