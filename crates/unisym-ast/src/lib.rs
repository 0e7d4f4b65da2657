//! unisym AST - syntax tree types shared by every language profile
//!
//! This crate defines spans and line positions, language profiles,
//! diagnostics, and the concrete syntax tree produced by the C# and
//! script parsers. One tree shape serves all profiles; productions that
//! only one grammar can produce (markup, delegates, using directives)
//! simply never appear in the others.

mod span;
mod profile;
mod diagnostic;
mod types;
mod expr;
mod stmt;
mod decl;
mod markup;

pub use span::*;
pub use profile::*;
pub use diagnostic::*;
pub use types::*;
pub use expr::*;
pub use stmt::*;
pub use decl::*;
pub use markup::*;

use serde::{Deserialize, Serialize};

/// The syntax tree for one file under one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxTree {
    pub profile: Profile,
    pub items: Vec<Item>,
    pub span: Span,
}

impl SyntaxTree {
    pub fn empty(profile: Profile, span: Span) -> Self {
        Self {
            profile,
            items: Vec::new(),
            span,
        }
    }

    /// Top-level items, descending into namespaces
    pub fn declarations(&self) -> Vec<&Item> {
        fn walk<'a>(items: &'a [Item], out: &mut Vec<&'a Item>) {
            for item in items {
                out.push(item);
                if let ItemKind::Namespace(ns) = &item.kind {
                    walk(&ns.items, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.items, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, span: Span) -> Item {
        Item {
            kind: ItemKind::Class(ClassDecl {
                modifiers: vec![],
                name: name.to_string(),
                name_span: span,
                type_params: vec![],
                bases: vec![],
                members: vec![],
                is_record: false,
            }),
            span,
        }
    }

    #[test]
    fn test_declarations_descend_into_namespaces() {
        let tree = SyntaxTree {
            profile: Profile::CSharp,
            items: vec![Item {
                kind: ItemKind::Namespace(NamespaceDecl {
                    modifiers: vec![],
                    name: "Demo".to_string(),
                    items: vec![class("A", Span::new(10, 20)), class("B", Span::new(21, 30))],
                    file_scoped: false,
                }),
                span: Span::new(0, 40),
            }],
            span: Span::new(0, 40),
        };

        let names: Vec<_> = tree.declarations().iter().filter_map(|i| i.name()).collect();
        assert_eq!(names, vec!["Demo", "A", "B"]);
    }

    #[test]
    fn test_tree_serializes() {
        let tree = SyntaxTree::empty(Profile::TypeScript, Span::new(0, 0));
        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.contains("\"typescript\""));
    }
}
