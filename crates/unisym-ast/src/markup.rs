//! Embedded markup nodes (elements, fragments, expression containers)

use crate::{Expr, Span};
use serde::{Deserialize, Serialize};

/// `<name attr="x">children</name>` or `<name />`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupElement {
    /// Tag name as written, including member access (`React.Fragment`)
    pub name: String,
    pub attributes: Vec<MarkupAttribute>,
    pub children: Vec<MarkupChild>,
    pub self_closing: bool,
    pub span: Span,
}

/// `<>children</>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupFragment {
    pub children: Vec<MarkupChild>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupAttribute {
    pub kind: MarkupAttributeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkupAttributeKind {
    /// `name`, `name="v"`, `name={expr}`
    Named {
        name: String,
        value: Option<MarkupAttrValue>,
    },
    /// `{...props}`
    Spread(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkupAttrValue {
    String(String),
    Expression(MarkupExpressionContainer),
    Element(Box<MarkupElement>),
}

/// `{expr}`; the expression is absent for `{}` and comment-only containers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupExpressionContainer {
    pub expr: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkupChild {
    Text(MarkupText),
    Element(MarkupElement),
    Fragment(MarkupFragment),
    Expression(MarkupExpressionContainer),
}

impl MarkupChild {
    pub fn span(&self) -> Span {
        match self {
            MarkupChild::Text(t) => t.span,
            MarkupChild::Element(e) => e.span,
            MarkupChild::Fragment(f) => f.span,
            MarkupChild::Expression(c) => c.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupText {
    pub text: String,
    pub span: Span,
}
