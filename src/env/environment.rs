//! In-memory symbol environment.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{DeclId, EnvId, Interner, LocalDeclId, Name};

use super::{
    DeclKind, DeclSpec, Declaration, EnvError, ScopeState, SymbolEnvironment,
    SymbolEnvironmentMut,
};

/// Member bookkeeping of one scope.
#[derive(Debug, Default)]
struct ScopeData {
    /// Insertion order is the enumeration order.
    members: IndexSet<DeclId>,
    /// Name -> members with that name, in insertion order.
    by_name: FxHashMap<Name, Vec<DeclId>>,
    state: ScopeState,
}

impl ScopeData {
    fn add(&mut self, decl: &Declaration) -> bool {
        if !self.members.insert(decl.id) {
            return false;
        }
        self.by_name.entry(decl.name).or_default().push(decl.id);
        true
    }
}

/// A self-contained universe of declarations and scopes.
///
/// Declarations are stored in a single vector indexed by [`LocalDeclId`];
/// scopes keep their member lists on the side. Nothing is ever removed, so
/// handles stay valid for the lifetime of the environment.
#[derive(Debug)]
pub struct Environment {
    id: EnvId,
    names: Interner,
    decls: Vec<Declaration>,
    scopes: FxHashMap<LocalDeclId, ScopeData>,
}

impl Environment {
    /// Create an environment holding only its root scope.
    pub fn new() -> Self {
        let id = EnvId::new();
        let names = Interner::new();
        let root = Declaration {
            id: DeclId::new(id, LocalDeclId::new(0)),
            name: names.intern(""),
            kind: DeclKind::Root,
            owner: None,
            detail: None,
        };

        let mut scopes = FxHashMap::default();
        scopes.insert(root.id.local, ScopeData::default());

        Self {
            id,
            names,
            decls: vec![root],
            scopes,
        }
    }

    /// Declare `text` of `kind` inside `scope`.
    pub fn declare(
        &mut self,
        scope: DeclId,
        text: &str,
        kind: DeclKind,
    ) -> Result<DeclId, EnvError> {
        let name = self.names.intern(text);
        self.insert_declaration(scope, DeclSpec::new(name, kind))
    }

    /// Declare `text` of `kind` inside `scope`, with type or signature text.
    pub fn declare_with_detail(
        &mut self,
        scope: DeclId,
        text: &str,
        kind: DeclKind,
        detail: &str,
    ) -> Result<DeclId, EnvError> {
        let name = self.names.intern(text);
        self.insert_declaration(scope, DeclSpec::new(name, kind).with_detail(detail))
    }

    /// Local lookup by spelling. Never interns.
    pub fn lookup_text(&self, scope: DeclId, text: &str) -> Vec<DeclId> {
        match self.names.find(text) {
            Some(name) => self.lookup(scope, name),
            None => Vec::new(),
        }
    }

    /// Spelling of a declaration's name.
    pub fn name_of(&self, id: DeclId) -> Option<SmolStr> {
        self.declaration(id).and_then(|decl| self.names.text(decl.name))
    }

    /// Spellings of a scope's members, in enumeration order.
    pub fn member_names(&self, scope: DeclId) -> Vec<SmolStr> {
        self.members(scope)
            .into_iter()
            .filter_map(|id| self.name_of(id))
            .collect()
    }

    /// Number of declarations, the root included.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Always `false`: the root is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of distinct spellings interned so far.
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    fn scope_data(&self, scope: DeclId) -> Option<&ScopeData> {
        if !scope.belongs_to(self.id) {
            return None;
        }
        self.scopes.get(&scope.local)
    }

    fn check_scope(&self, scope: DeclId) -> Result<(), EnvError> {
        if !scope.belongs_to(self.id) {
            return Err(EnvError::ForeignDeclaration {
                decl: scope,
                env: self.id,
            });
        }
        let decl = self
            .declaration(scope)
            .ok_or(EnvError::UnknownDeclaration(scope))?;
        if !decl.is_scope() {
            return Err(EnvError::NotAScope(scope));
        }
        Ok(())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolEnvironment for Environment {
    fn env_id(&self) -> EnvId {
        self.id
    }

    fn intern_name(&self, text: &str) -> Name {
        self.names.intern(text)
    }

    fn name_text(&self, name: Name) -> Option<SmolStr> {
        self.names.text(name)
    }

    fn root_scope(&self) -> DeclId {
        self.decls[0].id
    }

    fn declaration(&self, id: DeclId) -> Option<&Declaration> {
        if !id.belongs_to(self.id) {
            return None;
        }
        self.decls.get(id.local.index() as usize)
    }

    fn scope_state(&self, scope: DeclId) -> Option<ScopeState> {
        self.scope_data(scope).map(|data| data.state)
    }

    fn lookup(&self, scope: DeclId, name: Name) -> Vec<DeclId> {
        self.scope_data(scope)
            .and_then(|data| data.by_name.get(&name))
            .cloned()
            .unwrap_or_default()
    }

    fn members(&self, scope: DeclId) -> Vec<DeclId> {
        self.scope_data(scope)
            .map(|data| data.members.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl SymbolEnvironmentMut for Environment {
    fn insert_declaration(&mut self, scope: DeclId, spec: DeclSpec) -> Result<DeclId, EnvError> {
        self.check_scope(scope)?;
        if self.names.text(spec.name).is_none() {
            return Err(EnvError::UnknownName(spec.name));
        }

        let id = DeclId::new(self.id, LocalDeclId::new(self.decls.len() as u32));
        let decl = Declaration {
            id,
            name: spec.name,
            kind: spec.kind,
            owner: Some(scope),
            detail: spec.detail,
        };

        if decl.is_scope() {
            self.scopes.insert(id.local, ScopeData::default());
        }
        if let Some(data) = self.scopes.get_mut(&scope.local) {
            data.add(&decl);
        }
        self.decls.push(decl);

        Ok(id)
    }

    fn set_scope_state(&mut self, scope: DeclId, state: ScopeState) -> Result<(), EnvError> {
        self.check_scope(scope)?;
        let data = self
            .scopes
            .get_mut(&scope.local)
            .ok_or(EnvError::NotAScope(scope))?;

        if !data.state.can_become(state) {
            return Err(EnvError::ScopeSealed {
                scope,
                requested: state,
            });
        }
        data.state = state;
        Ok(())
    }
}
