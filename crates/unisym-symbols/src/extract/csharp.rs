//! C# extraction
//!
//! Members default to private and top-level types to internal. Interface
//! members are always public. A property is any accessor list made of
//! get/set/init accessors, or an expression body.

use unisym_ast::{
    AccessorKind, ClassDecl, EnumDecl, InterfaceDecl, Item, ItemKind, MemberDecl, MemberKind as AstMember,
    PropertyDecl, SyntaxTree, UsingDecl,
};

use super::{wraps_deferred, Context, Scope};
use crate::{
    ExtractionWarning, FunctionSymbol, ImportSymbol, Member, MemberKind, ModuleSymbol, Name, Symbol, TypeKind,
    TypeSymbol, Visibility,
};

const DEFERRED: &[&str] = &["Task", "ValueTask"];

pub(crate) struct CSharpExtractor<'a> {
    cx: Context<'a>,
}

impl<'a> CSharpExtractor<'a> {
    pub(crate) fn new(cx: Context<'a>) -> Self {
        Self { cx }
    }

    pub(crate) fn extract(mut self, tree: &SyntaxTree) -> (Vec<Symbol>, Vec<ExtractionWarning>) {
        let symbols = self.items(&tree.items);
        (symbols, self.cx.into_warnings())
    }

    fn items(&mut self, items: &[Item]) -> Vec<Symbol> {
        let mut scope = Scope::default();
        for item in items {
            match &item.kind {
                ItemKind::Namespace(ns) => {
                    let modifiers = self.cx.modifiers(&ns.modifiers);
                    let children = self.items(&ns.items);
                    scope.push(Symbol::Module(ModuleSymbol {
                        name: self.cx.name(&ns.name),
                        modifiers,
                        children,
                        file: self.cx.file(),
                        span: item.span,
                    }));
                }
                ItemKind::Using(using) => {
                    if self.cx.options().extract_imports {
                        scope.push(Symbol::Import(self.using(using, item)));
                    }
                }
                ItemKind::StrayMember(member) => match scope.open_type() {
                    Some((kind, name)) => {
                        let members: Vec<Member> = self
                            .member(kind, &name, member)
                            .into_iter()
                            .filter(|m| self.cx.keeps(m))
                            .collect();
                        scope.attach(members);
                    }
                    None => self.cx.warn(ExtractionWarning::OrphanMember {
                        name: member.name().unwrap_or("<anonymous>").to_string(),
                        span: member.span,
                    }),
                },
                ItemKind::StrayEnumMember(decl) => {
                    if let Err(member) = scope.attach_enum_member(self.cx.enum_member(decl)) {
                        self.cx.warn(ExtractionWarning::OrphanMember {
                            name: member.name.to_string(),
                            span: member.span,
                        });
                    }
                }
                ItemKind::Delegate(delegate) => {
                    let visibility = self.cx.visibility(&delegate.modifiers, Visibility::Internal);
                    let modifiers = self.cx.modifiers(&delegate.modifiers);
                    scope.push(Symbol::Function(FunctionSymbol {
                        name: self.cx.name(&delegate.name),
                        visibility,
                        modifiers,
                        type_params: self.cx.type_params(&delegate.type_params),
                        parameters: self.cx.parameters(&delegate.params),
                        return_type: Some(self.cx.type_ref(&delegate.return_type)),
                        file: self.cx.file(),
                        span: item.span,
                    }));
                }
                _ => {
                    if let Some(ty) = self.type_decl(item, Visibility::Internal) {
                        scope.push(Symbol::Type(ty));
                    }
                }
            }
        }
        scope.finish()
    }

    fn using(&self, using: &UsingDecl, item: &Item) -> ImportSymbol {
        let items = match &using.alias {
            Some(alias) => vec![alias.clone()],
            None if using.is_static => vec!["static".to_string()],
            None => vec!["*".to_string()],
        };
        ImportSymbol {
            source: using.path.clone(),
            items,
            file: self.cx.file(),
            span: item.span,
        }
    }

    /// Class, struct, interface or enum; `None` for any other item
    fn type_decl(&mut self, item: &Item, default_visibility: Visibility) -> Option<TypeSymbol> {
        match &item.kind {
            ItemKind::Class(decl) => self.class(TypeKind::Class, decl, default_visibility, item),
            ItemKind::Struct(decl) => self.class(TypeKind::Struct, decl, default_visibility, item),
            ItemKind::Interface(decl) => self.interface(decl, default_visibility, item),
            ItemKind::Enum(decl) => self.enumeration(decl, default_visibility, item),
            _ => None,
        }
    }

    fn class(
        &mut self,
        kind: TypeKind,
        decl: &ClassDecl,
        default_visibility: Visibility,
        item: &Item,
    ) -> Option<TypeSymbol> {
        if decl.name.is_empty() {
            self.cx.warn(ExtractionWarning::MalformedDeclaration {
                what: "type declaration",
                span: item.span,
            });
            return None;
        }
        let visibility = self.cx.visibility(&decl.modifiers, default_visibility);
        let modifiers = self.cx.modifiers(&decl.modifiers);
        let mut ty = self.cx.type_shell(
            kind,
            &decl.name,
            visibility,
            modifiers,
            &decl.type_params,
            &decl.bases,
            item.span,
        );
        self.members(&mut ty, &decl.members);
        Some(ty)
    }

    fn interface(&mut self, decl: &InterfaceDecl, default_visibility: Visibility, item: &Item) -> Option<TypeSymbol> {
        let visibility = self.cx.visibility(&decl.modifiers, default_visibility);
        let modifiers = self.cx.modifiers(&decl.modifiers);
        let mut ty = self.cx.type_shell(
            TypeKind::Interface,
            &decl.name,
            visibility,
            modifiers,
            &decl.type_params,
            &decl.bases,
            item.span,
        );
        self.members(&mut ty, &decl.members);
        Some(ty)
    }

    fn enumeration(&mut self, decl: &EnumDecl, default_visibility: Visibility, item: &Item) -> Option<TypeSymbol> {
        let visibility = self.cx.visibility(&decl.modifiers, default_visibility);
        let modifiers = self.cx.modifiers(&decl.modifiers);
        let mut ty = self
            .cx
            .type_shell(TypeKind::Enum, &decl.name, visibility, modifiers, &[], &[], item.span);
        if let Some(underlying) = &decl.underlying {
            ty.base_types.push(self.cx.type_ref(underlying));
        }
        ty.enum_members = decl.members.iter().map(|m| self.cx.enum_member(m)).collect();
        Some(ty)
    }

    fn members(&mut self, ty: &mut TypeSymbol, decls: &[MemberDecl]) {
        for decl in decls {
            if let AstMember::NestedType(item) = &decl.kind {
                if let Some(nested) = self.type_decl(item, Visibility::Private) {
                    ty.nested.push(nested);
                }
                continue;
            }
            if let Some(member) = self.member(ty.kind, &ty.name, decl) {
                if self.cx.keeps(&member) {
                    ty.members.push(member);
                }
            }
        }
    }

    fn member(&mut self, owner: TypeKind, owner_name: &Name, decl: &MemberDecl) -> Option<Member> {
        let default = match owner {
            TypeKind::Interface | TypeKind::Enum => Visibility::Public,
            TypeKind::Class | TypeKind::Struct => Visibility::Private,
        };
        let modifiers = match &decl.kind {
            AstMember::Field(f) => &f.modifiers,
            AstMember::Property(p) => &p.modifiers,
            AstMember::Method(m) => &m.modifiers,
            AstMember::Constructor(c) => &c.modifiers,
            _ => return None,
        };
        let mut visibility = self.cx.visibility(modifiers, default);
        if owner == TypeKind::Interface {
            visibility = Visibility::Public;
        }
        let mut flags = self.cx.modifiers(modifiers);

        let member = match &decl.kind {
            AstMember::Field(field) => Member {
                kind: MemberKind::Field,
                name: self.cx.name(&field.name),
                visibility,
                modifiers: flags,
                type_ref: field.ty.as_ref().map(|ty| self.cx.type_ref(ty)),
                type_params: Vec::new(),
                parameters: Vec::new(),
                span: decl.span,
            },
            AstMember::Property(property) => {
                let kind = self.property_kind(property, decl);
                if kind == MemberKind::Property {
                    flags.is_readonly |= is_read_only(property);
                }
                Member {
                    kind,
                    name: self.cx.name(&property.name),
                    visibility,
                    modifiers: flags,
                    type_ref: property.ty.as_ref().map(|ty| self.cx.type_ref(ty)),
                    type_params: Vec::new(),
                    parameters: self.cx.parameters(&property.params),
                    span: decl.span,
                }
            }
            AstMember::Method(method) => {
                let return_type = method.return_type.as_ref().map(|ty| self.cx.type_ref(ty));
                flags.is_async |= wraps_deferred(return_type.as_ref(), DEFERRED);
                Member {
                    kind: MemberKind::Method,
                    name: self.cx.name(&method.name),
                    visibility,
                    modifiers: flags,
                    type_ref: return_type,
                    type_params: self.cx.type_params(&method.type_params),
                    parameters: self.cx.parameters(&method.params),
                    span: decl.span,
                }
            }
            AstMember::Constructor(constructor) => Member {
                kind: MemberKind::Constructor,
                name: owner_name.clone(),
                visibility,
                modifiers: flags,
                type_ref: None,
                type_params: Vec::new(),
                parameters: self.cx.parameters(&constructor.params),
                span: decl.span,
            },
            _ => return None,
        };
        Some(member)
    }

    /// Property unless the accessor list holds something other than get/set/init
    fn property_kind(&mut self, property: &PropertyDecl, decl: &MemberDecl) -> MemberKind {
        let recognised = property
            .accessors
            .iter()
            .all(|a| matches!(a.kind, AccessorKind::Get | AccessorKind::Set | AccessorKind::Init));
        if recognised && (property.ty.is_some() || property.expression_body.is_some()) {
            return MemberKind::Property;
        }
        self.cx.warn(ExtractionWarning::AmbiguousAccessor {
            name: property.name.clone(),
            span: decl.span,
        });
        MemberKind::Field
    }
}

/// Expression-bodied, or no `set` accessor
fn is_read_only(property: &PropertyDecl) -> bool {
    property.expression_body.is_some() || !property.accessors.iter().any(|a| a.kind == AccessorKind::Set)
}
