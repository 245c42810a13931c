//! On-demand import of declarations from a parent environment.
//!
//! ```text
//! child lookup misses in a LazyBacked scope
//!   -> LookupBroker::resolve
//!        -> ImportCache (child name -> parent name, child scope -> parent scope)
//!        -> parent lookup
//!        -> Importer (copy leaves, copy scopes as bare LazyBacked nodes)
//!   -> child lookup succeeds natively from now on
//! ```
//!
//! [`CompletionFilter`] is the bulk variant: it imports a whole (filtered)
//! parent scope at once and seals the child scope afterwards.
//!
//! Nothing here is ever invalidated. A mapping, once recorded, stays; a
//! sealed scope never sees members the parent gains later.

mod broker;
mod cache;
mod completion;
mod importer;

pub use broker::LookupBroker;
pub use cache::ImportCache;
pub use completion::CompletionFilter;
pub use importer::{ImportOutcome, Importer, SkipReason};
