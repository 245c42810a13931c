//! Symbol environments: the universes declarations are imported between.
//!
//! The import machinery only talks to environments through two traits:
//!
//! - [`SymbolEnvironment`] - what is read from either side (interning,
//!   per-scope lookup, member enumeration, the root scope)
//! - [`SymbolEnvironmentMut`] - what is written on the child side (new
//!   declarations, scope state transitions)
//!
//! [`Environment`] is the in-memory implementation used by the rest of the
//! crate and its tests.

mod decl;
mod environment;
mod error;

pub use decl::{DeclKind, DeclShape, DeclSpec, Declaration, ScopeState};
pub use environment::Environment;
pub use error::EnvError;

use smol_str::SmolStr;

use crate::base::{DeclId, EnvId, Name};

/// Read access to one environment.
pub trait SymbolEnvironment {
    /// Identity stamped on every handle this environment mints.
    fn env_id(&self) -> EnvId;

    /// Canonical name for `text` in this environment, interning on first use.
    fn intern_name(&self, text: &str) -> Name;

    /// Spelling of `name`, or `None` for a name from another environment.
    fn name_text(&self, name: Name) -> Option<SmolStr>;

    /// The translation-unit scope.
    fn root_scope(&self) -> DeclId;

    /// The declaration behind `id`, if it belongs to this environment.
    fn declaration(&self, id: DeclId) -> Option<&Declaration>;

    /// `None` when `scope` is not a scope of this environment.
    fn scope_state(&self, scope: DeclId) -> Option<ScopeState>;

    /// Members of `scope` named `name`, in insertion order. Local only: no
    /// enclosing scopes, no external source.
    fn lookup(&self, scope: DeclId, name: Name) -> Vec<DeclId>;

    /// Every member of `scope`, in insertion order.
    fn members(&self, scope: DeclId) -> Vec<DeclId>;

    fn is_externally_backed(&self, scope: DeclId) -> bool {
        self.scope_state(scope)
            .is_some_and(ScopeState::is_externally_backed)
    }
}

/// Write access needed on the receiving side of an import.
pub trait SymbolEnvironmentMut: SymbolEnvironment {
    /// Create a declaration from `spec` and make it a visible member of
    /// `scope`. New scopes start out [`ScopeState::Unlinked`].
    fn insert_declaration(&mut self, scope: DeclId, spec: DeclSpec) -> Result<DeclId, EnvError>;

    /// Move `scope` to `state`. Leaving [`ScopeState::FullyMaterialized`] is
    /// refused.
    fn set_scope_state(&mut self, scope: DeclId, state: ScopeState) -> Result<(), EnvError>;
}
