//! Expression and binding-pattern AST nodes

use crate::{
    Block, ClassDecl, FunctionDecl, MarkupElement, MarkupFragment, Modifier, Param, Span, TypeExpr,
    TypeParam,
};
use serde::{Deserialize, Serialize};

/// An expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    Ident(String),
    This,
    Super,
    Literal(Literal),

    /// Template or interpolated string: `quasis.len() == exprs.len() + 1`
    Template {
        quasis: Vec<String>,
        exprs: Vec<Expr>,
    },

    /// `/pattern/flags`
    Regex(String),

    /// Array literal; `None` marks an elision
    Array(Vec<Option<Expr>>),

    Object(Vec<ObjectProp>),

    /// `function (...) { ... }` in expression position
    Function(Box<FunctionDecl>),

    Arrow(Box<ArrowFunction>),

    Class(Box<ClassDecl>),

    Call {
        callee: Box<Expr>,
        type_args: Vec<TypeExpr>,
        args: Vec<Expr>,
        optional: bool,
    },

    New {
        callee: Box<Expr>,
        type_args: Vec<TypeExpr>,
        args: Vec<Expr>,
    },

    Member {
        object: Box<Expr>,
        property: String,
        optional: bool,
    },

    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        optional: bool,
    },

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Update {
        op: UpdateOp,
        prefix: bool,
        operand: Box<Expr>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },

    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },

    Spread(Box<Expr>),

    Sequence(Vec<Expr>),

    Paren(Box<Expr>),

    Await(Box<Expr>),

    Yield {
        argument: Option<Box<Expr>>,
        delegate: bool,
    },

    /// `x as T`, `x satisfies T`, `<T>x`
    TypeAssertion {
        expr: Box<Expr>,
        ty: TypeExpr,
    },

    /// `x!`
    NonNull(Box<Expr>),

    TaggedTemplate {
        tag: Box<Expr>,
        template: Box<Expr>,
    },

    MarkupElement(Box<MarkupElement>),

    MarkupFragment(Box<MarkupFragment>),

    /// Tokens kept only as a span (C# initializers)
    Opaque,

    /// Placeholder left behind by error recovery
    Error,
}

impl Expr {
    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ExprKind::Ident(name.into()),
            span,
        }
    }

    /// Strip parentheses
    pub fn unparenthesized(&self) -> &Expr {
        match &self.kind {
            ExprKind::Paren(inner) => inner.unparenthesized(),
            _ => self,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Numeric literal text as written
    Number(String),
    /// String contents without quotes (escapes left as written)
    String(String),
    Char(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    BitNot,
    Typeof,
    Void,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    // Comparison
    Eq,
    Ne,
    StrictEq,
    StrictNe,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    InstanceOf,
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
    // Logical
    And,
    Or,
    Coalesce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
    Coalesce,
}

/// Arrow function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowFunction {
    pub modifiers: Vec<Modifier>,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    pub body: ArrowBody,
}

impl ArrowFunction {
    pub fn is_async(&self) -> bool {
        self.modifiers
            .iter()
            .any(|m| m.kind == crate::ModifierKind::Async)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArrowBody {
    Expr(Box<Expr>),
    Block(Block),
}

/// Property key in object literals, patterns and members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropKey {
    Ident(String),
    String(String),
    Number(String),
    Computed(Box<Expr>),
    Private(String),
}

impl PropKey {
    /// Display name; computed keys render as `[computed]`
    pub fn name(&self) -> String {
        match self {
            PropKey::Ident(s) | PropKey::String(s) | PropKey::Number(s) => s.clone(),
            PropKey::Private(s) => format!("#{}", s),
            PropKey::Computed(_) => "[computed]".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectProp {
    pub kind: ObjectPropKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectPropKind {
    KeyValue { key: PropKey, value: Expr },
    Shorthand(String),
    Method { key: PropKey, function: Box<FunctionDecl> },
    Getter { key: PropKey, body: Block },
    Setter { key: PropKey, param: Box<Param>, body: Block },
    Spread(Expr),
}

/// A binding pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatternKind {
    Ident(String),
    Object {
        props: Vec<ObjectPatternProp>,
        rest: Option<Box<Pattern>>,
    },
    Array {
        elements: Vec<Option<ArrayPatternElem>>,
        rest: Option<Box<Pattern>>,
    },
    /// Assignment target that is not a plain binding (`a.b` in `for (a.b of xs)`)
    Expr(Box<Expr>),
}

impl Pattern {
    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Self {
            kind: PatternKind::Ident(name.into()),
            span,
        }
    }

    /// Simple name when the pattern is a single identifier
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            PatternKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Compact rendering: `{ a, b }`, `[x, y]`, `name`
    pub fn display(&self) -> String {
        match &self.kind {
            PatternKind::Ident(name) => name.clone(),
            PatternKind::Object { props, rest } => {
                let mut parts: Vec<String> = props
                    .iter()
                    .map(|p| {
                        let key = p.key.name();
                        match &p.value.kind {
                            PatternKind::Ident(name) if *name == key => key,
                            _ => format!("{}: {}", key, p.value.display()),
                        }
                    })
                    .collect();
                if let Some(rest) = rest {
                    parts.push(format!("...{}", rest.display()));
                }
                format!("{{ {} }}", parts.join(", "))
            }
            PatternKind::Array { elements, rest } => {
                let mut parts: Vec<String> = elements
                    .iter()
                    .map(|e| e.as_ref().map(|e| e.pattern.display()).unwrap_or_default())
                    .collect();
                if let Some(rest) = rest {
                    parts.push(format!("...{}", rest.display()));
                }
                format!("[{}]", parts.join(", "))
            }
            PatternKind::Expr(_) => "<expr>".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPatternProp {
    pub key: PropKey,
    pub value: Pattern,
    pub default: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayPatternElem {
    pub pattern: Pattern,
    pub default: Option<Expr>,
}
