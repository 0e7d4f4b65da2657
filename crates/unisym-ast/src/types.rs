//! Type expressions as written in source

use crate::{Literal, MemberDecl, Param, Span, TypeParam};
use serde::{Deserialize, Serialize};

/// A type expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExprKind {
    /// Named type with optional generic arguments: `List<int>`, `React.FC<Props>`
    Named { path: Vec<String>, args: Vec<TypeExpr> },

    /// Array type: `int[]`, `string[]`
    Array(Box<TypeExpr>),

    /// Nullable type: `int?`
    Nullable(Box<TypeExpr>),

    /// Union type: `string | number`
    Union(Vec<TypeExpr>),

    /// Intersection type: `A & B`
    Intersection(Vec<TypeExpr>),

    /// Tuple type: `[string, number]`, `(int, string)`
    Tuple(Vec<TypeExpr>),

    /// Function type: `(a: number) => void`
    Function {
        type_params: Vec<TypeParam>,
        params: Vec<Param>,
        ret: Box<TypeExpr>,
    },

    /// Literal type: `"on"`, `42`, `true`
    Literal(Literal),

    /// Object type literal: `{ name: string }`
    Object(Vec<MemberDecl>),

    /// Forms kept only as source text (`keyof T`, `T[K]`, conditional and mapped types)
    Opaque,
}

impl TypeExpr {
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        Self {
            kind: TypeExprKind::Named {
                path: vec![name.into()],
                args: vec![],
            },
            span,
        }
    }

    /// Last path segment for named types
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TypeExprKind::Named { path, .. } => path.last().map(|s| s.as_str()),
            _ => None,
        }
    }

    /// Generic arguments for named types
    pub fn args(&self) -> &[TypeExpr] {
        match &self.kind {
            TypeExprKind::Named { args, .. } => args,
            _ => &[],
        }
    }
}
