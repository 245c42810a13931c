//! Declaration nodes and scope state.

use smol_str::SmolStr;

use crate::base::{DeclId, Name};

/// Concrete declaration kinds an environment can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// The root scope of an environment. Exactly one per environment.
    Root,
    Namespace,
    Record,
    Enum,
    Variable,
    Function,
    /// A parameterized callable. Never copied between environments.
    FunctionTemplate,
    TypeAlias,
    EnumConstant,
}

/// Whether a kind owns members or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclShape {
    Leaf,
    Scope,
}

impl DeclKind {
    /// Leaf or scope.
    pub fn shape(self) -> DeclShape {
        match self {
            DeclKind::Root | DeclKind::Namespace | DeclKind::Record | DeclKind::Enum => {
                DeclShape::Scope
            }
            DeclKind::Variable
            | DeclKind::Function
            | DeclKind::FunctionTemplate
            | DeclKind::TypeAlias
            | DeclKind::EnumConstant => DeclShape::Leaf,
        }
    }

    /// Whether declarations of this kind own members.
    pub fn is_scope(self) -> bool {
        self.shape() == DeclShape::Scope
    }

    /// Parameterized callables cannot be duplicated by a structural copy.
    pub fn is_templated_callable(self) -> bool {
        matches!(self, DeclKind::FunctionTemplate)
    }

    /// Human-readable kind name, for logs and messages.
    pub fn display_name(self) -> &'static str {
        match self {
            DeclKind::Root => "root",
            DeclKind::Namespace => "namespace",
            DeclKind::Record => "record",
            DeclKind::Enum => "enum",
            DeclKind::Variable => "variable",
            DeclKind::Function => "function",
            DeclKind::FunctionTemplate => "function template",
            DeclKind::TypeAlias => "type alias",
            DeclKind::EnumConstant => "enum constant",
        }
    }
}

/// Lifecycle of a scope with respect to an external source.
///
/// `Unlinked -> LazyBacked -> FullyMaterialized`; the last state is
/// terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScopeState {
    /// Member set is authoritative; nothing external to consult.
    #[default]
    Unlinked,
    /// Member set is incomplete; misses must go through the broker.
    LazyBacked,
    /// Bulk-imported once and sealed. Never consults the source again.
    FullyMaterialized,
}

impl ScopeState {
    /// Whether lookups that miss here must consult the broker.
    pub fn is_externally_backed(self) -> bool {
        self == ScopeState::LazyBacked
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_become(self, next: ScopeState) -> bool {
        self == next || self != ScopeState::FullyMaterialized
    }
}

/// A named node owned by exactly one environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub id: DeclId,
    /// Canonical name, interned in the owning environment.
    pub name: Name,
    pub kind: DeclKind,
    /// Enclosing scope. `None` only for the root.
    pub owner: Option<DeclId>,
    /// Free-form type or signature text, copied verbatim on import.
    pub detail: Option<SmolStr>,
}

impl Declaration {
    /// Whether this declaration owns members.
    pub fn is_scope(&self) -> bool {
        self.kind.is_scope()
    }
}

/// Everything needed to create a declaration, minus its identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclSpec {
    pub name: Name,
    pub kind: DeclKind,
    pub detail: Option<SmolStr>,
}

impl DeclSpec {
    /// A spec without detail text.
    pub fn new(name: Name, kind: DeclKind) -> Self {
        Self { name, kind, detail: None }
    }

    /// Attach type or signature text.
    pub fn with_detail(mut self, detail: impl Into<SmolStr>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_shapes() {
        assert_eq!(DeclKind::Namespace.shape(), DeclShape::Scope);
        assert_eq!(DeclKind::Record.shape(), DeclShape::Scope);
        assert_eq!(DeclKind::Enum.shape(), DeclShape::Scope);
        assert_eq!(DeclKind::Function.shape(), DeclShape::Leaf);
        assert_eq!(DeclKind::FunctionTemplate.shape(), DeclShape::Leaf);
    }

    #[test]
    fn test_only_templates_are_templated_callables() {
        assert!(DeclKind::FunctionTemplate.is_templated_callable());
        assert!(!DeclKind::Function.is_templated_callable());
        assert!(!DeclKind::Namespace.is_templated_callable());
    }

    #[test]
    fn test_materialized_is_terminal() {
        let sealed = ScopeState::FullyMaterialized;

        assert!(sealed.can_become(ScopeState::FullyMaterialized));
        assert!(!sealed.can_become(ScopeState::LazyBacked));
        assert!(!sealed.can_become(ScopeState::Unlinked));
        assert!(ScopeState::Unlinked.can_become(ScopeState::LazyBacked));
        assert!(ScopeState::LazyBacked.can_become(ScopeState::FullyMaterialized));
    }

    #[test]
    fn test_only_lazy_scopes_are_externally_backed() {
        assert!(ScopeState::LazyBacked.is_externally_backed());
        assert!(!ScopeState::Unlinked.is_externally_backed());
        assert!(!ScopeState::FullyMaterialized.is_externally_backed());
    }
}
