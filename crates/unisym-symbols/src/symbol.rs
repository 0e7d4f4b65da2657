//! Unified symbol model
//!
//! One vocabulary for every profile. Names are interned `Arc<str>` so a
//! batch of files shares one copy of each identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use unisym_ast::{FileId, Span};

/// Interned identifier or type name
pub type Name = Arc<str>;

/// A declaration in the unified model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "symbol", rename_all = "snake_case")]
pub enum Symbol {
    /// Namespace or module block
    Module(ModuleSymbol),
    /// Class, interface, struct or enum
    Type(TypeSymbol),
    Function(FunctionSymbol),
    TypeAlias(TypeAliasSymbol),
    /// Only emitted when import extraction is enabled
    Import(ImportSymbol),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Module(m) => &m.name,
            Symbol::Type(t) => &t.name,
            Symbol::Function(f) => &f.name,
            Symbol::TypeAlias(a) => &a.name,
            Symbol::Import(i) => &i.source,
        }
    }

    /// The file this symbol was extracted from
    pub fn file(&self) -> FileId {
        match self {
            Symbol::Module(m) => m.file,
            Symbol::Type(t) => t.file,
            Symbol::Function(f) => f.file,
            Symbol::TypeAlias(a) => a.file,
            Symbol::Import(i) => i.file,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Symbol::Module(m) => m.span,
            Symbol::Type(t) => t.span,
            Symbol::Function(f) => f.span,
            Symbol::TypeAlias(a) => a.span,
            Symbol::Import(i) => i.span,
        }
    }

    pub fn as_type(&self) -> Option<&TypeSymbol> {
        match self {
            Symbol::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionSymbol> {
        match self {
            Symbol::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_module(&self) -> Option<&ModuleSymbol> {
        match self {
            Symbol::Module(m) => Some(m),
            _ => None,
        }
    }
}

/// Walk `symbols` depth-first, descending into modules and nested types
pub fn walk_symbols<'a>(symbols: &'a [Symbol], visit: &mut impl FnMut(&'a Symbol)) {
    for symbol in symbols {
        visit(symbol);
        if let Symbol::Module(module) = symbol {
            walk_symbols(&module.children, visit);
        }
    }
}

/// Every type in `symbols`, including types inside modules and nested types
pub fn all_types(symbols: &[Symbol]) -> Vec<&TypeSymbol> {
    fn push_nested<'a>(ty: &'a TypeSymbol, out: &mut Vec<&'a TypeSymbol>) {
        out.push(ty);
        for nested in &ty.nested {
            push_nested(nested, out);
        }
    }

    let mut out = Vec::new();
    walk_symbols(symbols, &mut |symbol| {
        if let Symbol::Type(ty) = symbol {
            push_nested(ty, &mut out);
        }
    });
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSymbol {
    /// Dotted name as written
    pub name: Name,
    pub modifiers: Modifiers,
    pub children: Vec<Symbol>,
    pub file: FileId,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSymbol {
    pub kind: TypeKind,
    pub name: Name,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub type_params: Vec<Name>,
    /// Source order, primary base first
    pub base_types: Vec<TypeRef>,
    pub members: Vec<Member>,
    /// Declaration order; empty unless `kind` is `Enum`
    pub enum_members: Vec<EnumMember>,
    /// Types declared inside this one
    pub nested: Vec<TypeSymbol>,
    pub file: FileId,
    pub span: Span,
}

impl TypeSymbol {
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| &*m.name == name)
    }

    pub fn members_of(&self, kind: MemberKind) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(move |m| m.kind == kind)
    }

    pub fn base_names(&self) -> Vec<&str> {
        self.base_types.iter().map(|b| &*b.name).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Constructor,
}

/// A field, property, method or constructor of a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub kind: MemberKind,
    pub name: Name,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    /// Declared type for fields and properties, return type for methods
    pub type_ref: Option<TypeRef>,
    pub type_params: Vec<Name>,
    pub parameters: Vec<Parameter>,
    pub span: Span,
}

impl Member {
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    pub fn is_readonly(&self) -> bool {
        self.modifiers.is_readonly
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract
    }

    pub fn is_async(&self) -> bool {
        self.modifiers.is_async
    }

    /// `name(a: T): R` for callables, `name: T` otherwise
    pub fn signature(&self) -> String {
        match self.kind {
            MemberKind::Method | MemberKind::Constructor => {
                render_signature(&self.name, &self.parameters, self.type_ref.as_ref())
            }
            MemberKind::Field | MemberKind::Property => match &self.type_ref {
                Some(ty) => format!("{}: {}", self.name, ty),
                None => self.name.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: Name,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub type_params: Vec<Name>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeRef>,
    pub file: FileId,
    pub span: Span,
}

impl FunctionSymbol {
    pub fn signature(&self) -> String {
        render_signature(&self.name, &self.parameters, self.return_type.as_ref())
    }
}

fn render_signature(name: &str, parameters: &[Parameter], ret: Option<&TypeRef>) -> String {
    let params: Vec<String> = parameters.iter().map(Parameter::to_string).collect();
    match ret {
        Some(ret) => format!("{}({}): {}", name, params.join(", "), ret),
        None => format!("{}({})", name, params.join(", ")),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasSymbol {
    pub name: Name,
    pub modifiers: Modifiers,
    pub type_params: Vec<Name>,
    pub target: TypeRef,
    pub file: FileId,
    pub span: Span,
}

/// `import`/`using` with the imported items spelled out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSymbol {
    /// Module specifier or namespace path
    pub source: String,
    /// `name`, `name as alias`, `* as ns`, `default as Name`; `*` when nothing is bound
    pub items: Vec<String>,
    pub file: FileId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: Name,
    /// Present only when the source gives an integer
    pub explicit_value: Option<i64>,
    /// Initializer text when it is not a plain integer
    pub initializer: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Binding name, or a rendered pattern for destructuring
    pub name: String,
    pub type_ref: Option<TypeRef>,
    /// `ref`, `out`, `params`, or parameter-property keywords
    pub modifiers: Vec<String>,
    pub optional: bool,
    pub rest: bool,
    /// Default value text
    pub default_value: Option<String>,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rest {
            f.write_str("...")?;
        }
        f.write_str(&self.name)?;
        if self.optional {
            f.write_str("?")?;
        }
        if let Some(ty) = &self.type_ref {
            write!(f, ": {}", ty)?;
        }
        Ok(())
    }
}

/// A type as written; never resolved
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: Name,
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    pub fn new(name: Name) -> Self {
        Self { name, args: Vec::new() }
    }

    /// Last dotted segment: `React.FC` -> `FC`
    pub fn base_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(TypeRef::to_string).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Internal,
    /// C# `protected internal`
    ProtectedInternal,
    /// C# `private protected`
    PrivateProtected,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Internal => "internal",
            Visibility::ProtectedInternal => "protected internal",
            Visibility::PrivateProtected => "private protected",
        })
    }
}

/// Modifier flags other than visibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_readonly: bool,
    pub is_abstract: bool,
    pub is_async: bool,
    pub is_override: bool,
    pub is_virtual: bool,
    pub is_sealed: bool,
    pub is_const: bool,
    pub is_exported: bool,
    pub is_default_export: bool,
    pub is_declare: bool,
    pub is_partial: bool,
    pub is_optional: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Name {
        Arc::from(s)
    }

    fn param(n: &str, ty: &str) -> Parameter {
        Parameter {
            name: n.to_string(),
            type_ref: Some(TypeRef::new(name(ty))),
            modifiers: vec![],
            optional: false,
            rest: false,
            default_value: None,
        }
    }

    #[test]
    fn test_function_signature() {
        let function = FunctionSymbol {
            name: name("add"),
            visibility: Visibility::Public,
            modifiers: Modifiers::default(),
            type_params: vec![],
            parameters: vec![param("x", "number"), param("y", "number")],
            return_type: Some(TypeRef::new(name("number"))),
            file: FileId(0),
            span: Span::new(0, 10),
        };
        assert_eq!(function.signature(), "add(x: number, y: number): number");
    }

    #[test]
    fn test_type_ref_display() {
        let ty = TypeRef {
            name: name("React.FC"),
            args: vec![TypeRef::new(name("Props"))],
        };
        assert_eq!(ty.to_string(), "React.FC<Props>");
        assert_eq!(ty.base_name(), "FC");
    }

    #[test]
    fn test_member_signature_for_fields() {
        let mut rest = param("items", "string[]");
        rest.rest = true;
        let member = Member {
            kind: MemberKind::Method,
            name: name("log"),
            visibility: Visibility::Public,
            modifiers: Modifiers::default(),
            type_ref: None,
            type_params: vec![],
            parameters: vec![rest],
            span: Span::new(0, 1),
        };
        assert_eq!(member.signature(), "log(...items: string[])");

        let field = Member {
            kind: MemberKind::Field,
            parameters: vec![],
            type_ref: Some(TypeRef::new(name("double"))),
            name: name("PI"),
            ..member
        };
        assert_eq!(field.signature(), "PI: double");
    }

    #[test]
    fn test_symbol_serializes_with_tag() {
        let symbol = Symbol::TypeAlias(TypeAliasSymbol {
            name: name("Id"),
            modifiers: Modifiers::default(),
            type_params: vec![],
            target: TypeRef::new(name("string | number")),
            file: FileId(1),
            span: Span::new(0, 5),
        });
        let json = serde_json::to_value(&symbol).unwrap();
        assert_eq!(json["symbol"], "type_alias");
        assert_eq!(json["target"]["name"], "string | number");
    }
}
