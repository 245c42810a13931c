//! Cross-environment foreign keys.
//!
//! The cache is the only owner of references between the two environments:
//! neither environment stores pointers into the other. All tables only ever
//! grow.

use std::collections::hash_map::Entry;

use indexmap::IndexMap;
use indexmap::map::Entry as IndexEntry;
use rustc_hash::FxHashMap;

use crate::base::{DeclId, Name};

/// Child-to-parent name and scope mappings, plus the copies made so far.
#[derive(Clone, Debug)]
pub struct ImportCache {
    /// Child canonical name -> parent canonical name.
    names: FxHashMap<Name, Name>,
    /// Child scope -> parent scope, in link order. The first entry is always
    /// the root link.
    scopes: IndexMap<DeclId, DeclId>,
    /// (parent declaration, child target scope) -> child copy.
    copies: FxHashMap<(DeclId, DeclId), DeclId>,
}

impl ImportCache {
    /// Create a cache whose only entry links the two root scopes.
    pub fn new(child_root: DeclId, parent_root: DeclId) -> Self {
        let mut scopes = IndexMap::new();
        scopes.insert(child_root, parent_root);
        Self {
            names: FxHashMap::default(),
            scopes,
            copies: FxHashMap::default(),
        }
    }

    /// Parent-side name recorded for the child name `child`, if any.
    pub fn lookup_name(&self, child: Name) -> Option<Name> {
        self.names.get(&child).copied()
    }

    /// Record that `child` denotes `parent` on the other side.
    ///
    /// Returns `false` when a record already existed. A record is never
    /// redirected: the first mapping wins.
    pub fn record_name(&mut self, child: Name, parent: Name) -> bool {
        match self.names.entry(child) {
            Entry::Occupied(existing) => {
                debug_assert_eq!(
                    *existing.get(),
                    parent,
                    "child name {child:?} already maps to another parent name"
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(parent);
                true
            }
        }
    }

    /// Parent scope mirrored by the child scope `child`, if linked.
    pub fn lookup_scope(&self, child: DeclId) -> Option<DeclId> {
        self.scopes.get(&child).copied()
    }

    /// Link a child scope to the parent scope it mirrors.
    ///
    /// Returns `false` when `child` was already linked; the existing link is
    /// kept.
    pub fn record_scope(&mut self, child: DeclId, parent: DeclId) -> bool {
        match self.scopes.entry(child) {
            IndexEntry::Occupied(existing) => {
                if *existing.get() != parent {
                    tracing::debug!(
                        ?child,
                        linked = ?existing.get(),
                        ignored = ?parent,
                        "scope already linked; keeping first link"
                    );
                }
                false
            }
            IndexEntry::Vacant(slot) => {
                slot.insert(parent);
                true
            }
        }
    }

    /// Child copy of the parent declaration `source` made inside `target`.
    pub fn lookup_copy(&self, source: DeclId, target: DeclId) -> Option<DeclId> {
        self.copies.get(&(source, target)).copied()
    }

    /// Remember that `source` was copied into `target` as `copy`.
    ///
    /// A source is copied at most once per target scope; a second record
    /// for the same pair keeps the first copy and returns `false`.
    pub fn record_copy(&mut self, source: DeclId, target: DeclId, copy: DeclId) -> bool {
        match self.copies.entry((source, target)) {
            Entry::Occupied(existing) => {
                debug_assert_eq!(*existing.get(), copy, "{source:?} copied twice into {target:?}");
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(copy);
                true
            }
        }
    }

    /// Number of name records.
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Number of scope links, the root link included.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Number of declarations copied into the child.
    pub fn copy_count(&self) -> usize {
        self.copies.len()
    }

    /// All name records as `(child, parent)` pairs, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = (Name, Name)> + '_ {
        self.names.iter().map(|(&child, &parent)| (child, parent))
    }

    /// All scope links as `(child, parent)` pairs, root link first.
    pub fn scope_links(&self) -> impl Iterator<Item = (DeclId, DeclId)> + '_ {
        self.scopes.iter().map(|(&child, &parent)| (child, parent))
    }
}
