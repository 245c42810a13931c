//! # symbridge
//!
//! Lazy, on-demand import of declarations from one symbol environment (the
//! parent) into another, independently built one (the child).
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → completion on top of bulk import
//!   ↓
//! import  → ImportCache, Importer, LookupBroker, CompletionFilter
//!   ↓
//! env     → SymbolEnvironment traits + in-memory Environment
//!   ↓
//! base    → Primitives (Name interning, EnvId, DeclId)
//! ```
//!
//! ## Usage
//!
//! ```
//! use symbridge::env::{DeclKind, Environment, SymbolEnvironment};
//! use symbridge::import::LookupBroker;
//!
//! let mut parent = Environment::new();
//! let root = parent.root_scope();
//! parent.declare(root, "answer", DeclKind::Variable).unwrap();
//!
//! let mut child = Environment::new();
//! let mut broker = LookupBroker::link(&parent, &mut child);
//!
//! let scope = child.root_scope();
//! let name = child.intern_name("answer");
//! let found = broker.lookup(&parent, &mut child, scope, name);
//! assert_eq!(found.len(), 1);
//! ```

/// Foundation types: Name interning, environment and declaration ids
pub mod base;

/// Symbol environments and the traits the import machinery needs
pub mod env;

/// Cross-environment import: cache, importer, broker, bulk filter
pub mod import;

/// IDE features: completion
pub mod ide;

pub use base::{DeclId, EnvId, Interner, Name};
pub use env::{Environment, SymbolEnvironment, SymbolEnvironmentMut};
pub use import::{CompletionFilter, ImportCache, LookupBroker};
