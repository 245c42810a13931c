//! Foundation types shared by every other module.
//!
//! - [`Name`], [`Interner`] - per-environment string interning
//! - [`EnvId`] - identity of one symbol environment
//! - [`DeclId`], [`LocalDeclId`] - declaration handles
//!
//! This module has NO dependencies on other symbridge modules.

mod ids;
mod intern;

pub use ids::{DeclId, EnvId, LocalDeclId};
pub use intern::{Interner, Name};
