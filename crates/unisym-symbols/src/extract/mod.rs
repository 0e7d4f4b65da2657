//! Syntax tree to symbol model
//!
//! One extractor per grammar family. Both share the [`Context`] that owns
//! the warnings and does the profile-neutral conversions (type references,
//! parameters, modifier flags, enum values).

mod csharp;
mod script;

pub(crate) use csharp::CSharpExtractor;
pub(crate) use script::ScriptExtractor;

use unisym_ast::{
    BaseClause, EnumMemberDecl, Expr, ExprKind, FileId, Literal, Modifier, ModifierKind, Param, Span,
    TypeExpr, TypeExprKind, TypeParam, UnaryOp,
};

use crate::{
    EnumMember, ExtractOptions, ExtractionWarning, Interner, Member, Modifiers, Name, Parameter, Symbol,
    TypeKind, TypeRef, TypeSymbol, Visibility,
};

/// Modifier pairs that cannot apply to the same declaration
const CONFLICTS: &[(ModifierKind, ModifierKind)] = &[
    (ModifierKind::Abstract, ModifierKind::Static),
    (ModifierKind::Abstract, ModifierKind::Sealed),
    (ModifierKind::Virtual, ModifierKind::Static),
    (ModifierKind::Override, ModifierKind::Static),
];

pub(crate) struct Context<'a> {
    source: &'a str,
    file: FileId,
    interner: &'a Interner,
    options: &'a ExtractOptions,
    warnings: Vec<ExtractionWarning>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(source: &'a str, file: FileId, interner: &'a Interner, options: &'a ExtractOptions) -> Self {
        Self {
            source,
            file,
            interner,
            options,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn into_warnings(self) -> Vec<ExtractionWarning> {
        self.warnings
    }

    fn file(&self) -> FileId {
        self.file
    }

    fn options(&self) -> &ExtractOptions {
        self.options
    }

    fn warn(&mut self, warning: ExtractionWarning) {
        self.warnings.push(warning);
    }

    fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// Source text under `span` with whitespace runs collapsed
    fn snippet(&self, span: Span) -> String {
        span.text(self.source).split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn keeps(&self, member: &Member) -> bool {
        self.options.include_private || member.visibility != Visibility::Private
    }

    fn type_ref(&self, ty: &TypeExpr) -> TypeRef {
        match &ty.kind {
            TypeExprKind::Named { path, args } => TypeRef {
                name: self.name(&path.join(".")),
                args: args.iter().map(|arg| self.type_ref(arg)).collect(),
            },
            _ => TypeRef::new(self.name(&self.snippet(ty.span))),
        }
    }

    fn type_refs(&self, bases: &[BaseClause]) -> Vec<TypeRef> {
        bases.iter().map(|base| self.type_ref(&base.ty)).collect()
    }

    fn type_params(&self, params: &[TypeParam]) -> Vec<Name> {
        params.iter().map(|p| self.name(&p.name)).collect()
    }

    fn parameter(&self, param: &Param) -> Parameter {
        Parameter {
            name: param.pattern.display(),
            type_ref: param.ty.as_ref().map(|ty| self.type_ref(ty)),
            modifiers: param.modifiers.iter().map(|m| m.kind.as_str().to_string()).collect(),
            optional: param.optional,
            rest: param.rest,
            default_value: param.default.as_ref().map(|value| self.snippet(value.span)),
        }
    }

    fn parameters(&self, params: &[Param]) -> Vec<Parameter> {
        params.iter().map(|p| self.parameter(p)).collect()
    }

    /// Flags for every supported modifier; anything else is reported
    fn modifiers(&mut self, modifiers: &[Modifier]) -> Modifiers {
        let mut flags = Modifiers::default();
        for modifier in modifiers {
            match &modifier.kind {
                ModifierKind::Static => flags.is_static = true,
                ModifierKind::Readonly => flags.is_readonly = true,
                ModifierKind::Abstract => flags.is_abstract = true,
                ModifierKind::Override => flags.is_override = true,
                ModifierKind::Async => flags.is_async = true,
                ModifierKind::Virtual => flags.is_virtual = true,
                ModifierKind::Sealed => flags.is_sealed = true,
                ModifierKind::Const => flags.is_const = true,
                ModifierKind::Export => flags.is_exported = true,
                ModifierKind::Default => flags.is_default_export = true,
                ModifierKind::Declare => flags.is_declare = true,
                ModifierKind::Partial => flags.is_partial = true,
                ModifierKind::Public | ModifierKind::Private | ModifierKind::Protected | ModifierKind::Internal => {}
                ModifierKind::Other(word) => self.warn(ExtractionWarning::UnsupportedModifier {
                    modifier: word.clone(),
                    span: modifier.span,
                }),
            }
        }

        for (first, second) in CONFLICTS {
            let a = modifiers.iter().find(|m| &m.kind == first);
            let b = modifiers.iter().find(|m| &m.kind == second);
            if let (Some(a), Some(b)) = (a, b) {
                self.warn(ExtractionWarning::ConflictingModifiers {
                    first: a.kind.as_str().to_string(),
                    second: b.kind.as_str().to_string(),
                    span: a.span.merge(b.span),
                });
            }
        }
        flags
    }

    /// Accessibility from the modifier list, or `default` when none is written
    fn visibility(&mut self, modifiers: &[Modifier], default: Visibility) -> Visibility {
        let written: Vec<&Modifier> = modifiers.iter().filter(|m| accessibility(&m.kind).is_some()).collect();
        match written.as_slice() {
            [] => default,
            [only] => accessibility(&only.kind).unwrap_or(default),
            [first, second, rest @ ..] => {
                if rest.is_empty() {
                    if let Some(combined) = combined_accessibility(&first.kind, &second.kind) {
                        return combined;
                    }
                }
                self.warn(ExtractionWarning::ConflictingModifiers {
                    first: first.kind.as_str().to_string(),
                    second: second.kind.as_str().to_string(),
                    span: first.span.merge(second.span),
                });
                accessibility(&first.kind).unwrap_or(default)
            }
        }
    }

    fn enum_member(&self, decl: &EnumMemberDecl) -> EnumMember {
        let explicit_value = decl.initializer.as_ref().and_then(integer_value);
        let initializer = match (&decl.initializer, explicit_value) {
            (Some(expr), None) => Some(self.snippet(expr.span)),
            _ => None,
        };
        EnumMember {
            name: self.name(&decl.name),
            explicit_value,
            initializer,
            span: decl.span,
        }
    }

    /// A type with no members yet
    fn type_shell(
        &self,
        kind: TypeKind,
        name: &str,
        visibility: Visibility,
        modifiers: Modifiers,
        type_params: &[TypeParam],
        bases: &[BaseClause],
        span: Span,
    ) -> TypeSymbol {
        TypeSymbol {
            kind,
            name: self.name(name),
            visibility,
            modifiers,
            type_params: self.type_params(type_params),
            base_types: self.type_refs(bases),
            members: Vec::new(),
            enum_members: Vec::new(),
            nested: Vec::new(),
            file: self.file,
            span,
        }
    }
}

fn accessibility(kind: &ModifierKind) -> Option<Visibility> {
    match kind {
        ModifierKind::Public => Some(Visibility::Public),
        ModifierKind::Private => Some(Visibility::Private),
        ModifierKind::Protected => Some(Visibility::Protected),
        ModifierKind::Internal => Some(Visibility::Internal),
        _ => None,
    }
}

fn combined_accessibility(a: &ModifierKind, b: &ModifierKind) -> Option<Visibility> {
    match (a, b) {
        (ModifierKind::Protected, ModifierKind::Internal) | (ModifierKind::Internal, ModifierKind::Protected) => {
            Some(Visibility::ProtectedInternal)
        }
        (ModifierKind::Private, ModifierKind::Protected) | (ModifierKind::Protected, ModifierKind::Private) => {
            Some(Visibility::PrivateProtected)
        }
        _ => None,
    }
}

/// Integer value of an enum initializer, if it is a plain (possibly negated) integer
fn integer_value(expr: &Expr) -> Option<i64> {
    match &expr.unparenthesized().kind {
        ExprKind::Literal(Literal::Number(text)) => parse_integer(text),
        ExprKind::Unary {
            op: UnaryOp::Neg,
            operand,
        } => integer_value(operand).and_then(i64::checked_neg),
        ExprKind::Unary {
            op: UnaryOp::Plus,
            operand,
        } => integer_value(operand),
        _ => None,
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(|c| *c != '_').collect::<String>().to_ascii_lowercase();
    let digits = digits.trim_end_matches(['u', 'l']);
    if let Some(hex) = digits.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(binary) = digits.strip_prefix("0b") {
        return i64::from_str_radix(binary, 2).ok();
    }
    if let Some(octal) = digits.strip_prefix("0o") {
        return i64::from_str_radix(octal, 8).ok();
    }
    digits.parse().ok()
}

/// Whether a return type wraps a value delivered later (`Task<T>`, `Promise<T>`)
fn wraps_deferred(ty: Option<&TypeRef>, deferred: &[&str]) -> bool {
    ty.is_some_and(|ty| deferred.contains(&ty.base_name()))
}

/// Output for one scope (file, namespace or module body)
///
/// Members stranded after an unbalanced brace are handed back to the most
/// recent type, looking into a namespace that closed right before them.
#[derive(Default)]
struct Scope {
    symbols: Vec<Symbol>,
}

impl Scope {
    fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    fn open_type_mut(&mut self) -> Option<&mut TypeSymbol> {
        last_open_type(&mut self.symbols)
    }

    /// The type a stray member would join
    fn open_type(&mut self) -> Option<(TypeKind, Name)> {
        self.open_type_mut().map(|ty| (ty.kind, ty.name.clone()))
    }

    fn attach(&mut self, members: Vec<Member>) {
        if let Some(ty) = self.open_type_mut() {
            ty.members.extend(members);
        }
    }

    /// Rejoin a stranded enum member with the enum right before it
    fn attach_enum_member(&mut self, member: EnumMember) -> Result<(), EnumMember> {
        match self.open_type_mut() {
            Some(ty) if ty.kind == TypeKind::Enum => {
                ty.enum_members.push(member);
                Ok(())
            }
            _ => Err(member),
        }
    }

    fn finish(self) -> Vec<Symbol> {
        self.symbols
    }
}

/// Imports never interrupt a type; anything else but a namespace does
fn last_open_type(symbols: &mut [Symbol]) -> Option<&mut TypeSymbol> {
    match symbols.iter_mut().rev().find(|s| !matches!(s, Symbol::Import(_)))? {
        Symbol::Type(ty) => Some(ty),
        Symbol::Module(module) => last_open_type(&mut module.children),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_forms() {
        assert_eq!(parse_integer("5"), Some(5));
        assert_eq!(parse_integer("0x1F"), Some(31));
        assert_eq!(parse_integer("0b101"), Some(5));
        assert_eq!(parse_integer("1_000"), Some(1000));
        assert_eq!(parse_integer("10u"), Some(10));
        assert_eq!(parse_integer("1.5"), None);
    }

    #[test]
    fn test_negated_enum_value() {
        let operand = Expr {
            kind: ExprKind::Literal(Literal::Number("3".to_string())),
            span: Span::new(1, 2),
        };
        let expr = Expr {
            kind: ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            },
            span: Span::new(0, 2),
        };
        assert_eq!(integer_value(&expr), Some(-3));
    }

    #[test]
    fn test_visibility_combinations() {
        let interner = Interner::new();
        let options = ExtractOptions::default();
        let mut cx = Context::new("", FileId(0), &interner, &options);
        let modifier = |kind| Modifier {
            kind,
            span: Span::new(0, 1),
        };

        let both = [modifier(ModifierKind::Protected), modifier(ModifierKind::Internal)];
        assert_eq!(cx.visibility(&both, Visibility::Private), Visibility::ProtectedInternal);
        assert_eq!(cx.visibility(&[], Visibility::Private), Visibility::Private);
        assert!(cx.warnings.is_empty());

        let clash = [modifier(ModifierKind::Public), modifier(ModifierKind::Private)];
        assert_eq!(cx.visibility(&clash, Visibility::Private), Visibility::Public);
        assert_eq!(cx.warnings.len(), 1);
        assert_eq!(cx.warnings[0].code(), "W-EXTRACT-002");
    }
}
