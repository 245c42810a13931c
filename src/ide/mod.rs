//! IDE features built on top of lazy import.
//!
//! Pure functions: take the broker and both environments in, return plain
//! data out. No protocol types.

mod completion;

pub use completion::{completions, CompletionItem, CompletionKind};
