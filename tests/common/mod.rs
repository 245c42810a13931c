//! Shared fixtures for integration tests.

#![allow(dead_code)]

use once_cell::sync::Lazy;
use symbridge::env::{DeclKind, Environment, SymbolEnvironment};
use symbridge::{DeclId, LookupBroker};
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

/// Install a log subscriber once per test binary (`RUST_LOG=symbridge=trace`).
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// A parent with a few top-level declarations and one nested namespace.
///
/// ```text
/// root
/// ├── answer: Variable "i32"
/// ├── print:  Function "fn(&str)"
/// ├── make:   FunctionTemplate
/// └── geo:    Namespace
///     ├── Point:    Record
///     └── distance: Function
/// ```
pub fn sample_parent() -> Environment {
    let mut parent = Environment::new();
    let root = parent.root_scope();
    parent
        .declare_with_detail(root, "answer", DeclKind::Variable, "i32")
        .unwrap();
    parent
        .declare_with_detail(root, "print", DeclKind::Function, "fn(&str)")
        .unwrap();
    parent.declare(root, "make", DeclKind::FunctionTemplate).unwrap();
    let geo = parent.declare(root, "geo", DeclKind::Namespace).unwrap();
    parent.declare(geo, "Point", DeclKind::Record).unwrap();
    parent.declare(geo, "distance", DeclKind::Function).unwrap();
    parent
}

/// A fresh child linked to `parent`.
pub fn linked_child(parent: &Environment) -> (Environment, LookupBroker) {
    init_tracing();
    let mut child = Environment::new();
    let broker = LookupBroker::link(parent, &mut child);
    (child, broker)
}

/// Resolve `text` in `scope` through the broker.
pub fn resolve_text(
    broker: &mut LookupBroker,
    parent: &Environment,
    child: &mut Environment,
    scope: DeclId,
    text: &str,
) -> bool {
    let name = child.intern_name(text);
    broker.resolve(parent, child, scope, name)
}
