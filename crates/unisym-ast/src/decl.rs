//! Declaration AST nodes (items and type members)

use crate::{Block, Expr, Pattern, Span, Stmt, TypeExpr};
use serde::{Deserialize, Serialize};

/// A declaration at file, namespace or block scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// `namespace A.B { ... }`, `namespace A.B;`, `module M { ... }`
    Namespace(NamespaceDecl),

    /// `using System.Text;`
    Using(UsingDecl),

    /// `import { a } from "./a";`
    Import(ImportDecl),

    /// `export { a };`, `export default a;`, `export * from "./b";`
    Export(ExportDecl),

    Class(ClassDecl),

    /// C# `struct`; same shape as a class
    Struct(StructDecl),

    Interface(InterfaceDecl),

    Enum(EnumDecl),

    Function(FunctionDecl),

    /// `type Name = ...;`
    TypeAlias(TypeAliasDecl),

    /// `const a = 1, b = () => a;`
    Variable(VariableDecl),

    /// C# `delegate void Handler(int x);`
    Delegate(DelegateDecl),

    /// A type member found outside any type body (after an unbalanced brace)
    StrayMember(MemberDecl),

    /// An enum member found after its enum body was closed early
    StrayEnumMember(EnumMemberDecl),

    /// Any other statement at file scope
    Statement(Stmt),
}

impl Item {
    /// Declared name, for items that have one
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Namespace(d) => Some(&d.name),
            ItemKind::Class(d) | ItemKind::Struct(d) => Some(&d.name),
            ItemKind::Interface(d) => Some(&d.name),
            ItemKind::Enum(d) => Some(&d.name),
            ItemKind::Function(d) => Some(&d.name),
            ItemKind::TypeAlias(d) => Some(&d.name),
            ItemKind::Delegate(d) => Some(&d.name),
            ItemKind::StrayMember(m) => m.name(),
            ItemKind::StrayEnumMember(m) => Some(&m.name),
            _ => None,
        }
    }
}

/// A declaration modifier keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Readonly,
    Abstract,
    Override,
    Async,
    Virtual,
    Sealed,
    Const,
    Export,
    Default,
    Declare,
    Partial,
    /// Recognised as a modifier position but not part of the supported set
    Other(String),
}

impl ModifierKind {
    pub fn from_word(word: &str) -> ModifierKind {
        match word {
            "public" => ModifierKind::Public,
            "private" => ModifierKind::Private,
            "protected" => ModifierKind::Protected,
            "internal" => ModifierKind::Internal,
            "static" => ModifierKind::Static,
            "readonly" => ModifierKind::Readonly,
            "abstract" => ModifierKind::Abstract,
            "override" => ModifierKind::Override,
            "async" => ModifierKind::Async,
            "virtual" => ModifierKind::Virtual,
            "sealed" => ModifierKind::Sealed,
            "const" => ModifierKind::Const,
            "export" => ModifierKind::Export,
            "default" => ModifierKind::Default,
            "declare" => ModifierKind::Declare,
            "partial" => ModifierKind::Partial,
            other => ModifierKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ModifierKind::Public => "public",
            ModifierKind::Private => "private",
            ModifierKind::Protected => "protected",
            ModifierKind::Internal => "internal",
            ModifierKind::Static => "static",
            ModifierKind::Readonly => "readonly",
            ModifierKind::Abstract => "abstract",
            ModifierKind::Override => "override",
            ModifierKind::Async => "async",
            ModifierKind::Virtual => "virtual",
            ModifierKind::Sealed => "sealed",
            ModifierKind::Const => "const",
            ModifierKind::Export => "export",
            ModifierKind::Default => "default",
            ModifierKind::Declare => "declare",
            ModifierKind::Partial => "partial",
            ModifierKind::Other(word) => word,
        }
    }
}

/// True if `modifiers` contains `kind`
pub fn has_modifier(modifiers: &[Modifier], kind: &ModifierKind) -> bool {
    modifiers.iter().any(|m| &m.kind == kind)
}

/// Namespace or module block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    pub modifiers: Vec<Modifier>,
    /// Dotted name as written
    pub name: String,
    pub items: Vec<Item>,
    /// `namespace A;` applies to the rest of the file
    pub file_scoped: bool,
}

/// C# using directive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsingDecl {
    pub path: String,
    pub alias: Option<String>,
    pub is_static: bool,
    pub is_global: bool,
}

/// Script import declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    /// Module specifier without quotes
    pub source: String,
    pub default: Option<String>,
    pub namespace: Option<String>,
    pub named: Vec<ImportSpecifier>,
    pub type_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpecifier {
    pub name: String,
    pub alias: Option<String>,
    pub span: Span,
}

/// Script export statement that is not a modifier on a declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExportDecl {
    Named {
        specifiers: Vec<ImportSpecifier>,
        source: Option<String>,
    },
    Default(Expr),
    All {
        alias: Option<String>,
        source: String,
    },
    /// `export = value;`
    Assignment(Expr),
}

/// Generic type parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    pub constraint: Option<TypeExpr>,
    pub default: Option<TypeExpr>,
    pub span: Span,
}

/// How a base type is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseRelation {
    /// `extends`
    Extends,
    /// `implements`
    Implements,
    /// C# base list, where the syntax does not say which
    Inherits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseClause {
    pub ty: TypeExpr,
    pub relation: BaseRelation,
}

/// Class (and record) declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub name_span: Span,
    pub type_params: Vec<TypeParam>,
    /// Source order, primary base first
    pub bases: Vec<BaseClause>,
    pub members: Vec<MemberDecl>,
    pub is_record: bool,
}

/// Struct declaration (C#)
pub type StructDecl = ClassDecl;

/// Interface declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub name_span: Span,
    pub type_params: Vec<TypeParam>,
    pub bases: Vec<BaseClause>,
    pub members: Vec<MemberDecl>,
}

/// Enum declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub name_span: Span,
    /// C# underlying type: `enum E : byte`
    pub underlying: Option<TypeExpr>,
    pub members: Vec<EnumMemberDecl>,
}

/// Enum member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMemberDecl {
    pub name: String,
    pub initializer: Option<Expr>,
    pub span: Span,
}

/// Function declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub name_span: Span,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    /// Absent for overload signatures and `declare function`
    pub body: Option<Block>,
    pub is_generator: bool,
}

/// Function, method or constructor parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// `ref`, `out`, `params`, or parameter-property modifiers like `private`
    pub modifiers: Vec<Modifier>,
    pub pattern: Pattern,
    pub ty: Option<TypeExpr>,
    pub default: Option<Expr>,
    pub optional: bool,
    pub rest: bool,
    pub span: Span,
}

/// Type alias declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasDecl {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub name_span: Span,
    pub type_params: Vec<TypeParam>,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

/// Variable statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub modifiers: Vec<Modifier>,
    pub kind: VarKind,
    pub declarators: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDeclarator {
    pub pattern: Pattern,
    pub ty: Option<TypeExpr>,
    pub init: Option<Expr>,
    pub span: Span,
}

/// C# delegate declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegateDecl {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    pub return_type: TypeExpr,
}

/// A member inside a class, struct or interface body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDecl {
    pub kind: MemberKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MemberKind {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    /// Script `get x()` / `set x(v)`
    Accessor(AccessorDecl),
    /// `[key: string]: T`
    IndexSignature(IndexSignatureDecl),
    /// Type declared inside another type
    NestedType(Box<Item>),
    /// Script `static { ... }`
    StaticBlock(Block),
}

impl MemberDecl {
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            MemberKind::Field(f) => Some(&f.name),
            MemberKind::Property(p) => Some(&p.name),
            MemberKind::Method(m) => Some(&m.name),
            MemberKind::Constructor(_) => Some("constructor"),
            MemberKind::Accessor(a) => a.name.as_deref(),
            MemberKind::NestedType(item) => item.name(),
            MemberKind::IndexSignature(_) | MemberKind::StaticBlock(_) => None,
        }
    }
}

/// Field, or a property signature in a script interface / object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub name_span: Span,
    pub ty: Option<TypeExpr>,
    pub initializer: Option<Expr>,
    pub optional: bool,
    /// C# `event` field
    pub is_event: bool,
}

/// Property with an accessor list or expression body (C#)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub name_span: Span,
    pub ty: Option<TypeExpr>,
    /// Indexer parameters: `this[int i]`
    pub params: Vec<Param>,
    pub accessors: Vec<AccessorDecl>,
    pub expression_body: Option<Expr>,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessorKind {
    Get,
    Set,
    Init,
    Add,
    Remove,
    /// Anything else written in accessor position
    Unknown(String),
}

impl AccessorKind {
    pub fn from_word(word: &str) -> AccessorKind {
        match word {
            "get" => AccessorKind::Get,
            "set" => AccessorKind::Set,
            "init" => AccessorKind::Init,
            "add" => AccessorKind::Add,
            "remove" => AccessorKind::Remove,
            other => AccessorKind::Unknown(other.to_string()),
        }
    }
}

/// Accessor in a C# accessor list (unnamed) or a script class accessor (named)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessorDecl {
    pub modifiers: Vec<Modifier>,
    pub kind: AccessorKind,
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    pub body: Option<Block>,
    pub expression_body: Option<Expr>,
    pub span: Span,
}

impl AccessorDecl {
    /// No body at all, or an empty one
    pub fn is_auto(&self) -> bool {
        self.expression_body.is_none() && self.body.as_ref().map_or(true, |b| b.stmts.is_empty())
    }
}

/// Method declaration or signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub name_span: Span,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    pub body: Option<Block>,
    pub expression_body: Option<Expr>,
    pub optional: bool,
    pub is_generator: bool,
}

/// Constructor declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    pub modifiers: Vec<Modifier>,
    pub params: Vec<Param>,
    pub body: Option<Block>,
}

/// Index signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSignatureDecl {
    pub modifiers: Vec<Modifier>,
    pub params: Vec<Param>,
    pub ty: Option<TypeExpr>,
}
