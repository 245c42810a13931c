//! Errors reported by an environment when it is handed bad input.

use thiserror::Error;

use crate::base::{DeclId, EnvId, Name};

use super::ScopeState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("declaration {0:?} does not exist")]
    UnknownDeclaration(DeclId),

    #[error("declaration {0:?} is not a scope")]
    NotAScope(DeclId),

    #[error("declaration {decl:?} belongs to another environment than {env}")]
    ForeignDeclaration { decl: DeclId, env: EnvId },

    #[error("name {0:?} was not interned by this environment")]
    UnknownName(Name),

    #[error("scope {scope:?} is fully materialized and cannot become {requested:?}")]
    ScopeSealed { scope: DeclId, requested: ScopeState },
}
