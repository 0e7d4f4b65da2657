//! TypeScript and JavaScript extraction (with or without markup)
//!
//! Class members default to public; `#name` members are private. Getter and
//! setter pairs become one property, constructor parameter properties become
//! fields, and variables initialised with an arrow function or function
//! expression become functions. Markup inside function bodies is not looked at.

use unisym_ast::{
    AccessorDecl, AccessorKind, ArrowFunction, ClassDecl, ConstructorDecl, EnumDecl, ExportDecl, Expr, ExprKind,
    FunctionDecl, ImportDecl, InterfaceDecl, Item, ItemKind, MemberDecl, MemberKind as AstMember, Modifier,
    ModifierKind, Param, Span, SyntaxTree, TypeAliasDecl, VariableDecl,
};

use super::{wraps_deferred, Context, Scope};
use crate::{
    ExtractionWarning, FunctionSymbol, ImportSymbol, Member, MemberKind, Modifiers, ModuleSymbol, Name, Symbol,
    TypeAliasSymbol, TypeKind, TypeSymbol, Visibility,
};

const DEFERRED: &[&str] = &["Promise", "PromiseLike"];

/// A local name listed in an `export { ... }` or `export default name`
struct LocalExport {
    name: String,
    is_default: bool,
}

pub(crate) struct ScriptExtractor<'a> {
    cx: Context<'a>,
}

impl<'a> ScriptExtractor<'a> {
    pub(crate) fn new(cx: Context<'a>) -> Self {
        Self { cx }
    }

    pub(crate) fn extract(mut self, tree: &SyntaxTree) -> (Vec<Symbol>, Vec<ExtractionWarning>) {
        let symbols = self.items(&tree.items);
        (symbols, self.cx.into_warnings())
    }

    fn items(&mut self, items: &[Item]) -> Vec<Symbol> {
        let mut scope = Scope::default();
        let mut exports = Vec::new();
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
                ItemKind::Import(import) => {
                    if self.cx.options().extract_imports {
                        scope.push(Symbol::Import(self.import(import, item.span)));
                    }
                }
                ItemKind::Export(export) => self.export(export, item.span, &mut scope, &mut exports),
                ItemKind::Class(decl) => {
                    if let Some(ty) = self.class(decl, None, item.span) {
                        scope.push(Symbol::Type(ty));
                    }
                }
                ItemKind::Interface(decl) => scope.push(Symbol::Type(self.interface(decl, item.span))),
                ItemKind::Enum(decl) => scope.push(Symbol::Type(self.enumeration(decl, item.span))),
                ItemKind::Function(decl) => {
                    if let Some(function) = self.function(decl, None, item.span) {
                        scope.push(Symbol::Function(function));
                    }
                }
                ItemKind::TypeAlias(decl) => scope.push(Symbol::TypeAlias(self.type_alias(decl, item.span))),
                ItemKind::Variable(decl) => self.variable(decl, &mut scope),
                ItemKind::StrayMember(member) => match scope.open_type() {
                    Some((kind, _)) => {
                        let members = self.members(kind, std::slice::from_ref(member));
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
                ItemKind::Struct(_) | ItemKind::Using(_) | ItemKind::Delegate(_) | ItemKind::Statement(_) => {}
            }
        }

        let mut symbols = scope.finish();
        mark_exports(&mut symbols, &exports);
        symbols
    }

    /// `name`, or `default` for an anonymous default export
    fn symbol_name(&mut self, name: &str, modifiers: &[Modifier], span: Span, what: &'static str) -> Option<Name> {
        if !name.is_empty() {
            return Some(self.cx.name(name));
        }
        if modifiers.iter().any(|m| m.kind == ModifierKind::Default) {
            return Some(self.cx.name("default"));
        }
        self.cx.warn(ExtractionWarning::MalformedDeclaration { what, span });
        None
    }

    fn import(&self, import: &ImportDecl, span: Span) -> ImportSymbol {
        let mut items = Vec::new();
        if let Some(default) = &import.default {
            items.push(format!("default as {}", default));
        }
        if let Some(namespace) = &import.namespace {
            items.push(format!("* as {}", namespace));
        }
        for specifier in &import.named {
            items.push(match &specifier.alias {
                Some(alias) => format!("{} as {}", specifier.name, alias),
                None => specifier.name.clone(),
            });
        }
        if items.is_empty() {
            items.push("*".to_string());
        }
        ImportSymbol {
            source: import.source.clone(),
            items,
            file: self.cx.file(),
            span,
        }
    }

    fn export(&mut self, export: &ExportDecl, span: Span, scope: &mut Scope, exports: &mut Vec<LocalExport>) {
        match export {
            ExportDecl::Named { specifiers, source: None } => {
                exports.extend(specifiers.iter().map(|s| LocalExport {
                    name: s.name.clone(),
                    is_default: s.alias.as_deref() == Some("default"),
                }));
            }
            ExportDecl::Default(expr) => {
                if let ExprKind::Ident(name) = &expr.unparenthesized().kind {
                    exports.push(LocalExport {
                        name: name.clone(),
                        is_default: true,
                    });
                    return;
                }
                let exported = Modifiers {
                    is_exported: true,
                    is_default_export: true,
                    ..Modifiers::default()
                };
                if let Some(symbol) = self.value_symbol("default", expr, exported, span) {
                    scope.push(symbol);
                }
            }
            ExportDecl::Named { .. } | ExportDecl::All { .. } | ExportDecl::Assignment(_) => {}
        }
    }

    /// Symbol for a function, arrow or class expression bound to `name`
    fn value_symbol(&mut self, name: &str, init: &Expr, flags: Modifiers, span: Span) -> Option<Symbol> {
        match &init.unparenthesized().kind {
            ExprKind::Arrow(arrow) => Some(Symbol::Function(self.arrow(name, arrow, flags, span))),
            ExprKind::Function(function) => {
                let mut symbol = self.function(function, Some(name), span)?;
                merge_flags(&mut symbol.modifiers, flags);
                Some(Symbol::Function(symbol))
            }
            ExprKind::Class(class) => {
                let mut ty = self.class(class, Some(name), span)?;
                merge_flags(&mut ty.modifiers, flags);
                Some(Symbol::Type(ty))
            }
            _ => None,
        }
    }

    fn variable(&mut self, decl: &VariableDecl, scope: &mut Scope) {
        let flags = self.cx.modifiers(&decl.modifiers);
        for declarator in &decl.declarators {
            let (Some(name), Some(init)) = (declarator.pattern.as_ident(), &declarator.init) else {
                continue;
            };
            if let Some(symbol) = self.value_symbol(name, init, flags, declarator.span) {
                scope.push(symbol);
            }
        }
    }

    fn arrow(&mut self, name: &str, arrow: &ArrowFunction, flags: Modifiers, span: Span) -> FunctionSymbol {
        let mut modifiers = self.cx.modifiers(&arrow.modifiers);
        merge_flags(&mut modifiers, flags);
        let return_type = arrow.return_type.as_ref().map(|ty| self.cx.type_ref(ty));
        modifiers.is_async |= wraps_deferred(return_type.as_ref(), DEFERRED);
        FunctionSymbol {
            name: self.cx.name(name),
            visibility: Visibility::Public,
            modifiers,
            type_params: self.cx.type_params(&arrow.type_params),
            parameters: self.cx.parameters(&arrow.params),
            return_type,
            file: self.cx.file(),
            span,
        }
    }

    fn function(&mut self, decl: &FunctionDecl, name: Option<&str>, span: Span) -> Option<FunctionSymbol> {
        let name = match name {
            Some(name) => self.cx.name(name),
            None => self.symbol_name(&decl.name, &decl.modifiers, span, "function")?,
        };
        let mut modifiers = self.cx.modifiers(&decl.modifiers);
        let return_type = decl.return_type.as_ref().map(|ty| self.cx.type_ref(ty));
        modifiers.is_async |= wraps_deferred(return_type.as_ref(), DEFERRED);
        Some(FunctionSymbol {
            name,
            visibility: Visibility::Public,
            modifiers,
            type_params: self.cx.type_params(&decl.type_params),
            parameters: self.cx.parameters(&decl.params),
            return_type,
            file: self.cx.file(),
            span,
        })
    }

    fn type_alias(&mut self, decl: &TypeAliasDecl, span: Span) -> TypeAliasSymbol {
        TypeAliasSymbol {
            name: self.cx.name(&decl.name),
            modifiers: self.cx.modifiers(&decl.modifiers),
            type_params: self.cx.type_params(&decl.type_params),
            target: self.cx.type_ref(&decl.ty),
            file: self.cx.file(),
            span,
        }
    }

    fn class(&mut self, decl: &ClassDecl, name: Option<&str>, span: Span) -> Option<TypeSymbol> {
        let name = match name {
            Some(name) => self.cx.name(name),
            None => self.symbol_name(&decl.name, &decl.modifiers, span, "class")?,
        };
        let modifiers = self.cx.modifiers(&decl.modifiers);
        let mut ty = self.cx.type_shell(
            TypeKind::Class,
            &name,
            Visibility::Public,
            modifiers,
            &decl.type_params,
            &decl.bases,
            span,
        );
        ty.members = self.members(TypeKind::Class, &decl.members);
        Some(ty)
    }

    fn interface(&mut self, decl: &InterfaceDecl, span: Span) -> TypeSymbol {
        let modifiers = self.cx.modifiers(&decl.modifiers);
        let mut ty = self.cx.type_shell(
            TypeKind::Interface,
            &decl.name,
            Visibility::Public,
            modifiers,
            &decl.type_params,
            &decl.bases,
            span,
        );
        ty.members = self.members(TypeKind::Interface, &decl.members);
        ty
    }

    fn enumeration(&mut self, decl: &EnumDecl, span: Span) -> TypeSymbol {
        let modifiers = self.cx.modifiers(&decl.modifiers);
        let mut ty = self
            .cx
            .type_shell(TypeKind::Enum, &decl.name, Visibility::Public, modifiers, &[], &[], span);
        ty.enum_members = decl.members.iter().map(|m| self.cx.enum_member(m)).collect();
        ty
    }

    fn members(&mut self, owner: TypeKind, decls: &[MemberDecl]) -> Vec<Member> {
        let mut members = Vec::new();
        for decl in decls {
            match &decl.kind {
                AstMember::Accessor(accessor) => self.accessor(owner, accessor, &mut members),
                AstMember::Constructor(constructor) => {
                    members.push(self.constructor(owner, constructor, decl.span));
                    for param in &constructor.params {
                        if let Some(field) = self.parameter_property(param) {
                            members.push(field);
                        }
                    }
                }
                _ => members.extend(self.member(owner, decl)),
            }
        }
        members.retain(|m| self.cx.keeps(m));
        members
    }

    fn visibility(&mut self, owner: TypeKind, modifiers: &[Modifier], name: &str) -> Visibility {
        let written = self.cx.visibility(modifiers, Visibility::Public);
        if owner == TypeKind::Interface {
            Visibility::Public
        } else if name.starts_with('#') {
            Visibility::Private
        } else {
            written
        }
    }

    fn member(&mut self, owner: TypeKind, decl: &MemberDecl) -> Option<Member> {
        match &decl.kind {
            AstMember::Field(field) => {
                let visibility = self.visibility(owner, &field.modifiers, &field.name);
                let mut modifiers = self.cx.modifiers(&field.modifiers);
                modifiers.is_optional = field.optional;
                Some(Member {
                    kind: MemberKind::Field,
                    name: self.cx.name(&field.name),
                    visibility,
                    modifiers,
                    type_ref: field.ty.as_ref().map(|ty| self.cx.type_ref(ty)),
                    type_params: Vec::new(),
                    parameters: Vec::new(),
                    span: decl.span,
                })
            }
            AstMember::Method(method) => {
                let visibility = self.visibility(owner, &method.modifiers, &method.name);
                let mut modifiers = self.cx.modifiers(&method.modifiers);
                modifiers.is_optional = method.optional;
                let return_type = method.return_type.as_ref().map(|ty| self.cx.type_ref(ty));
                modifiers.is_async |= wraps_deferred(return_type.as_ref(), DEFERRED);
                Some(Member {
                    kind: MemberKind::Method,
                    name: self.cx.name(&method.name),
                    visibility,
                    modifiers,
                    type_ref: return_type,
                    type_params: self.cx.type_params(&method.type_params),
                    parameters: self.cx.parameters(&method.params),
                    span: decl.span,
                })
            }
            _ => None,
        }
    }

    fn constructor(&mut self, owner: TypeKind, decl: &ConstructorDecl, span: Span) -> Member {
        Member {
            kind: MemberKind::Constructor,
            name: self.cx.name("constructor"),
            visibility: self.visibility(owner, &decl.modifiers, "constructor"),
            modifiers: self.cx.modifiers(&decl.modifiers),
            type_ref: None,
            type_params: Vec::new(),
            parameters: self.cx.parameters(&decl.params),
            span,
        }
    }

    /// `constructor(private readonly id: string)` declares a field
    fn parameter_property(&mut self, param: &Param) -> Option<Member> {
        if param.modifiers.is_empty() {
            return None;
        }
        let name = param.pattern.as_ident()?;
        let visibility = self.cx.visibility(&param.modifiers, Visibility::Public);
        let mut modifiers = self.cx.modifiers(&param.modifiers);
        modifiers.is_optional = param.optional;
        Some(Member {
            kind: MemberKind::Field,
            name: self.cx.name(name),
            visibility,
            modifiers,
            type_ref: param.ty.as_ref().map(|ty| self.cx.type_ref(ty)),
            type_params: Vec::new(),
            parameters: Vec::new(),
            span: param.span,
        })
    }

    /// Fold a getter or setter into the property of the same name
    fn accessor(&mut self, owner: TypeKind, accessor: &AccessorDecl, members: &mut Vec<Member>) {
        let Some(name) = accessor.name.as_deref() else {
            self.cx.warn(ExtractionWarning::MalformedDeclaration {
                what: "accessor",
                span: accessor.span,
            });
            return;
        };
        let visibility = self.visibility(owner, &accessor.modifiers, name);
        let mut modifiers = self.cx.modifiers(&accessor.modifiers);
        let type_ref = match &accessor.kind {
            AccessorKind::Get => accessor.return_type.as_ref().map(|ty| self.cx.type_ref(ty)),
            AccessorKind::Set => accessor
                .params
                .first()
                .and_then(|p| p.ty.as_ref())
                .map(|ty| self.cx.type_ref(ty)),
            _ => {
                self.cx.warn(ExtractionWarning::AmbiguousAccessor {
                    name: name.to_string(),
                    span: accessor.span,
                });
                members.push(Member {
                    kind: MemberKind::Field,
                    name: self.cx.name(name),
                    visibility,
                    modifiers,
                    type_ref: None,
                    type_params: Vec::new(),
                    parameters: Vec::new(),
                    span: accessor.span,
                });
                return;
            }
        };
        let is_setter = accessor.kind == AccessorKind::Set;

        let existing = members.iter_mut().find(|m| {
            m.kind == MemberKind::Property && &*m.name == name && m.modifiers.is_static == modifiers.is_static
        });
        if let Some(property) = existing {
            if is_setter {
                property.modifiers.is_readonly = false;
            }
            if property.type_ref.is_none() {
                property.type_ref = type_ref;
            }
            property.span = property.span.merge(accessor.span);
            return;
        }

        modifiers.is_readonly = !is_setter;
        members.push(Member {
            kind: MemberKind::Property,
            name: self.cx.name(name),
            visibility,
            modifiers,
            type_ref,
            type_params: Vec::new(),
            parameters: Vec::new(),
            span: accessor.span,
        });
    }
}

/// Carry declaration-level flags (export, async) onto a symbol built from its initializer
fn merge_flags(target: &mut Modifiers, flags: Modifiers) {
    target.is_exported |= flags.is_exported;
    target.is_default_export |= flags.is_default_export;
    target.is_declare |= flags.is_declare;
    target.is_async |= flags.is_async;
}

fn mark_exports(symbols: &mut [Symbol], exports: &[LocalExport]) {
    for export in exports {
        for symbol in symbols.iter_mut() {
            if symbol.name() != export.name {
                continue;
            }
            let modifiers = match symbol {
                Symbol::Type(ty) => &mut ty.modifiers,
                Symbol::Function(function) => &mut function.modifiers,
                Symbol::TypeAlias(alias) => &mut alias.modifiers,
                Symbol::Module(module) => &mut module.modifiers,
                Symbol::Import(_) => continue,
            };
            modifiers.is_exported = true;
            modifiers.is_default_export |= export.is_default;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{extract, Extraction, ExtractOptions, Interner, MemberKind, Symbol, TypeKind, Visibility};
    use unisym_ast::{FileId, Profile};

    fn extract_script(source: &str, profile: Profile, options: &ExtractOptions) -> Extraction {
        let lexed = unisym_lexer::tokenize(source, profile);
        let parsed = unisym_parser::parse(profile, source, &lexed.tokens);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        extract(&parsed.tree, source, FileId(0), &Interner::new(), options)
    }

    fn extract_ts(source: &str) -> Extraction {
        extract_script(source, Profile::TypeScript, &ExtractOptions::default())
    }

    #[test]
    fn test_class_members_default_public() {
        let source = r#"
class Account extends Base implements Auditable, Serializable {
    id: string;
    private balance = 0;
    protected static readonly limit: number = 10;
    #token: string;
    constructor(private readonly owner: string, public label?: string) { super(); }
    deposit(amount: number): void {}
    async fetch(): Promise<number> { return 1; }
    load(): Promise<void> { return Promise.resolve(); }
    abstract close(): void;
}"#;
        let extraction = extract_ts(source);
        let ty = extraction.find_type("Account").unwrap();
        assert_eq!(ty.base_names(), vec!["Base", "Auditable", "Serializable"]);

        assert_eq!(ty.member("id").unwrap().visibility, Visibility::Public);
        assert_eq!(ty.member("balance").unwrap().visibility, Visibility::Private);
        let limit = ty.member("limit").unwrap();
        assert_eq!(limit.visibility, Visibility::Protected);
        assert!(limit.is_static() && limit.is_readonly());
        assert_eq!(ty.member("#token").unwrap().visibility, Visibility::Private);

        let owner = ty.member("owner").unwrap();
        assert_eq!(owner.kind, MemberKind::Field);
        assert_eq!(owner.visibility, Visibility::Private);
        assert!(owner.is_readonly());
        assert!(ty.member("label").unwrap().modifiers.is_optional);

        let ctor = ty.member("constructor").unwrap();
        assert_eq!(ctor.kind, MemberKind::Constructor);
        assert_eq!(ctor.signature(), "constructor(owner: string, label?: string)");

        assert!(ty.member("fetch").unwrap().is_async());
        assert!(ty.member("load").unwrap().is_async());
        assert!(!ty.member("deposit").unwrap().is_async());
        assert!(ty.member("close").unwrap().is_abstract());
    }

    #[test]
    fn test_accessor_pairs_become_one_property() {
        let source = r#"
class Temperature {
    get celsius(): number { return this.c; }
    set celsius(value: number) { this.c = value; }
    get kelvin() { return this.c + 273; }
}"#;
        let extraction = extract_ts(source);
        let ty = extraction.find_type("Temperature").unwrap();
        let properties: Vec<_> = ty.members_of(MemberKind::Property).collect();
        assert_eq!(properties.len(), 2);
        assert_eq!(&*properties[0].name, "celsius");
        assert!(!properties[0].is_readonly());
        assert_eq!(properties[0].type_ref.as_ref().unwrap().to_string(), "number");
        assert!(properties[1].is_readonly());
    }

    #[test]
    fn test_interface_members_are_public() {
        let source = "interface Shape {\n  readonly sides: number;\n  label?: string;\n  area(): number;\n}";
        let extraction = extract_ts(source);
        let ty = extraction.find_type("Shape").unwrap();
        assert_eq!(ty.kind, TypeKind::Interface);
        assert_eq!(ty.members.len(), 3);
        assert!(ty.members.iter().all(|m| m.visibility == Visibility::Public));
        assert!(ty.member("sides").unwrap().is_readonly());
        assert!(ty.member("label").unwrap().modifiers.is_optional);
        assert_eq!(ty.member("area").unwrap().kind, MemberKind::Method);
    }

    #[test]
    fn test_functions_from_declarations_and_variables() {
        let source = r#"
export function add(x: number, y: number): number { return x + y; }
const multiply = (a: number, b: number): number => a * b;
export const load = async (url: string) => fetch(url);
let handler = function named(e) {};
const Widget = class { render() {} };
const value = 3;
"#;
        let extraction = extract_ts(source);
        let functions = extraction.functions();
        let names: Vec<_> = functions.iter().map(|f| &*f.name).collect();
        assert_eq!(names, vec!["add", "multiply", "load", "handler"]);
        assert!(functions[0].modifiers.is_exported);
        assert_eq!(functions[1].signature(), "multiply(a: number, b: number): number");
        assert!(functions[2].modifiers.is_async && functions[2].modifiers.is_exported);
        assert!(extraction.find_type("Widget").unwrap().member("render").is_some());
    }

    #[test]
    fn test_enum_and_type_alias() {
        let source = "export enum Color { Red, Green, Blue = 5, Mixed = Red | Blue }\ntype Id = string | number;";
        let extraction = extract_ts(source);
        let color = extraction.find_type("Color").unwrap();
        assert!(color.modifiers.is_exported);
        let values: Vec<_> = color.enum_members.iter().map(|m| m.explicit_value).collect();
        assert_eq!(values, vec![None, None, Some(5), None]);
        assert_eq!(color.enum_members[3].initializer.as_deref(), Some("Red | Blue"));

        let alias = extraction
            .symbols
            .iter()
            .find_map(|s| match s {
                Symbol::TypeAlias(alias) => Some(alias),
                _ => None,
            })
            .unwrap();
        assert_eq!(&*alias.name, "Id");
        assert_eq!(&*alias.target.name, "string | number");
    }

    #[test]
    fn test_imports_spelled_like_the_indexer() {
        let source = r#"import React, { useState, useEffect as effect } from "react";
import * as fs from "fs";
import "./polyfill";
"#;
        let options = ExtractOptions {
            extract_imports: true,
            ..ExtractOptions::default()
        };
        let extraction = extract_script(source, Profile::TypeScript, &options);
        let imports: Vec<_> = extraction
            .symbols
            .iter()
            .filter_map(|s| match s {
                Symbol::Import(import) => Some((import.source.clone(), import.items.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].1, vec!["default as React", "useState", "useEffect as effect"]);
        assert_eq!(imports[1].1, vec!["* as fs"]);
        assert_eq!(imports[2], ("./polyfill".to_string(), vec!["*".to_string()]));

        let without = extract_ts(source);
        assert!(without.symbols.is_empty());
    }

    #[test]
    fn test_export_lists_mark_symbols() {
        let source = "function SimpleDiv() {}\nconst App = () => null;\nexport { SimpleDiv };\nexport default App;";
        let extraction = extract_ts(source);
        let functions = extraction.functions();
        assert!(functions[0].modifiers.is_exported);
        assert!(!functions[0].modifiers.is_default_export);
        assert!(functions[1].modifiers.is_default_export);
    }

    #[test]
    fn test_markup_component_is_a_function() {
        let source = "const Card = ({ title }: Props) => <div className=\"card\">{title}</div>;";
        let extraction = extract_script(source, Profile::TypeScriptMarkup, &ExtractOptions::default());
        let card = extraction.functions()[0];
        assert_eq!(&*card.name, "Card");
        assert_eq!(card.parameters[0].name, "{ title }");
    }

    #[test]
    fn test_javascript_private_names() {
        let source = "class Counter {\n  #count = 0;\n  static create() { return new Counter(); }\n  get value() { return this.#count; }\n}";
        let extraction = extract_script(source, Profile::JavaScript, &ExtractOptions::default());
        let ty = extraction.find_type("Counter").unwrap();
        assert_eq!(ty.member("#count").unwrap().visibility, Visibility::Private);
        assert!(ty.member("create").unwrap().is_static());
        assert_eq!(ty.member("value").unwrap().kind, MemberKind::Property);

        let public_only = ExtractOptions {
            include_private: false,
            ..ExtractOptions::default()
        };
        let extraction = extract_script(source, Profile::JavaScript, &public_only);
        assert!(extraction.find_type("Counter").unwrap().member("#count").is_none());
    }

    #[test]
    fn test_namespace_becomes_module() {
        let source = "export namespace Geometry.Shapes {\n  export class Square {}\n}";
        let extraction = extract_ts(source);
        let module = extraction.symbols[0].as_module().unwrap();
        assert_eq!(&*module.name, "Geometry.Shapes");
        assert!(module.modifiers.is_exported);
        assert_eq!(module.children[0].name(), "Square");
    }
}
