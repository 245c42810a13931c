//! Completion: members visible in a scope, parent environment included.
//!
//! Completing in an externally backed scope first materializes it for the
//! typed prefix, so the answer covers both the child's own members and
//! everything the parent offers under that prefix.

use smol_str::SmolStr;

use crate::base::DeclId;
use crate::env::{DeclKind, SymbolEnvironment, SymbolEnvironmentMut};
use crate::import::LookupBroker;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Namespace,
    Struct,
    Enum,
    EnumMember,
    Function,
    Variable,
    TypeAlias,
}

impl CompletionKind {
    /// `None` for kinds that are never offered (the root scope).
    pub fn from_decl_kind(kind: DeclKind) -> Option<Self> {
        let kind = match kind {
            DeclKind::Root => return None,
            DeclKind::Namespace => CompletionKind::Namespace,
            DeclKind::Record => CompletionKind::Struct,
            DeclKind::Enum => CompletionKind::Enum,
            DeclKind::EnumConstant => CompletionKind::EnumMember,
            DeclKind::Function | DeclKind::FunctionTemplate => CompletionKind::Function,
            DeclKind::Variable => CompletionKind::Variable,
            DeclKind::TypeAlias => CompletionKind::TypeAlias,
        };
        Some(kind)
    }
}

/// A completion candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: SmolStr,
    pub kind: CompletionKind,
    /// Type or signature text, when the declaration carries one.
    pub detail: Option<SmolStr>,
    /// The child-side declaration this item refers to.
    pub decl: DeclId,
}

/// Completion candidates in `scope` starting with `prefix`, sorted by label.
///
/// Materializing is one-way: after the first completion in a lazily backed
/// scope, later completions (and lookups) there only see what was imported
/// for that first prefix plus the child's own members.
pub fn completions<P, C>(
    broker: &mut LookupBroker,
    parent: &P,
    child: &mut C,
    scope: DeclId,
    prefix: &str,
) -> Vec<CompletionItem>
where
    P: SymbolEnvironment,
    C: SymbolEnvironmentMut,
{
    broker.materialize(parent, child, scope, prefix);

    let mut items: Vec<CompletionItem> = child
        .members(scope)
        .into_iter()
        .filter_map(|id| {
            let decl = child.declaration(id)?;
            let label = child.name_text(decl.name)?;
            if !label.starts_with(prefix) {
                return None;
            }
            Some(CompletionItem {
                label,
                kind: CompletionKind::from_decl_kind(decl.kind)?,
                detail: decl.detail.clone(),
                decl: id,
            })
        })
        .collect();

    items.sort_by(|a, b| a.label.cmp(&b.label));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;

    #[test]
    fn test_completions_merge_child_and_parent() {
        let mut parent = Environment::new();
        let proot = parent.root_scope();
        parent
            .declare_with_detail(proot, "print", DeclKind::Function, "fn(&str)")
            .unwrap();
        parent.declare(proot, "Point", DeclKind::Record).unwrap();
        let mut child = Environment::new();
        let mut broker = LookupBroker::link(&parent, &mut child);
        let croot = child.root_scope();
        child.declare(croot, "pi", DeclKind::Variable).unwrap();

        let items = completions(&mut broker, &parent, &mut child, croot, "p");

        let labels: Vec<_> = items.iter().map(|item| item.label.as_str()).collect();
        assert_eq!(labels, vec!["pi", "print"]);
        assert_eq!(items[1].kind, CompletionKind::Function);
        assert_eq!(items[1].detail.as_deref(), Some("fn(&str)"));
    }

    #[test]
    fn test_completion_kinds() {
        assert_eq!(CompletionKind::from_decl_kind(DeclKind::Root), None);
        assert_eq!(
            CompletionKind::from_decl_kind(DeclKind::Record),
            Some(CompletionKind::Struct)
        );
        assert_eq!(
            CompletionKind::from_decl_kind(DeclKind::FunctionTemplate),
            Some(CompletionKind::Function)
        );
    }
}
