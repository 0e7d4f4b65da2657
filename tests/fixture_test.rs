//! Acceptance tests over the sample C#, TypeScript and TSX files

mod common;

use common::*;
use unisym::ast::Profile;
use unisym::symbols::{MemberKind, Symbol, TypeKind, Visibility};

// === C# ===

#[test]
fn test_csharp_fixture_parses_cleanly() {
    let analysis = analyze_fixture("test.cs");
    assert_eq!(analysis.source.profile, Profile::CSharp);
    assert_no_syntax_errors(&analysis);
    assert!(analysis.diagnostics().is_empty(), "{:?}", analysis.diagnostics());

    match &analysis.symbols[..] {
        [Symbol::Module(module)] => {
            assert_eq!(&*module.name, "TestProject");
            assert_eq!(module.children.len(), 5);
        }
        other => panic!("expected one module, got {:?}", other),
    }
}

#[test]
fn test_csharp_fixture_class() {
    let analysis = analyze_fixture("test.cs");
    let class = assert_has_type(&analysis, "ExampleClass");
    assert_eq!(class.kind, TypeKind::Class);
    assert_eq!(class.visibility, Visibility::Public);
    assert_eq!(base_names(class), vec!["BaseClass", "IExample"]);

    let abstract_method = assert_has_member(class, "AbstractMethod");
    assert_eq!(abstract_method.kind, MemberKind::Method);
    assert_eq!(abstract_method.visibility, Visibility::Public);
    assert!(abstract_method.modifiers.is_override);

    for name in ["InterfaceMethod", "GetGreeting"] {
        let method = assert_has_member(class, name);
        assert_eq!(method.kind, MemberKind::Method);
        assert_eq!(method.visibility, Visibility::Public);
    }
    assert_eq!(
        assert_has_member(class, "GetGreeting").signature(),
        "GetGreeting(name: string): string"
    );

    let private_method = assert_has_member(class, "PrivateMethod");
    assert_eq!(private_method.visibility, Visibility::Private);

    let property = assert_has_member(class, "PublicProperty");
    assert_eq!(property.kind, MemberKind::Property);
    assert_eq!(property.visibility, Visibility::Public);

    let field = assert_has_member(class, "_privateField");
    assert_eq!(field.kind, MemberKind::Field);
    assert_eq!(field.visibility, Visibility::Private);

    let pi = assert_has_member(class, "PI");
    assert_eq!(pi.kind, MemberKind::Field);
    assert_eq!(pi.visibility, Visibility::Public);
    assert!(pi.modifiers.is_const);
    assert_eq!(pi.type_ref.as_ref().map(|t| t.to_string()).as_deref(), Some("double"));
}

#[test]
fn test_csharp_fixture_interface_base_struct_enum() {
    let analysis = analyze_fixture("test.cs");

    let interface = assert_has_type(&analysis, "IExample");
    assert_eq!(interface.kind, TypeKind::Interface);
    assert_eq!(assert_has_member(interface, "InterfaceMethod").visibility, Visibility::Public);

    let base = assert_has_type(&analysis, "BaseClass");
    assert!(base.modifiers.is_abstract);
    assert!(assert_has_member(base, "AbstractMethod").modifiers.is_abstract);

    let point = assert_has_type(&analysis, "Point");
    assert_eq!(point.kind, TypeKind::Struct);
    for name in ["X", "Y"] {
        let field = assert_has_member(point, name);
        assert_eq!(field.kind, MemberKind::Field);
        assert_eq!(field.visibility, Visibility::Public);
        assert_eq!(field.type_ref.as_ref().map(|t| t.to_string()).as_deref(), Some("int"));
    }

    let status = assert_has_type(&analysis, "Status");
    assert_eq!(status.kind, TypeKind::Enum);
    let names: Vec<_> = status.enum_members.iter().map(|m| m.name.to_string()).collect();
    assert_eq!(names, vec!["Active", "Inactive", "Pending"]);
    assert!(status.enum_members.iter().all(|m| m.explicit_value.is_none()));
}

// === TypeScript ===

#[test]
fn test_typescript_fixture_class() {
    let analysis = analyze_fixture("test.ts");
    assert_eq!(analysis.source.profile, Profile::TypeScript);
    assert_no_syntax_errors(&analysis);

    let class = assert_has_type(&analysis, "SampleClass");
    assert_eq!(class.kind, TypeKind::Class);
    assert_eq!(base_names(class), vec!["AnotherClass", "Person"]);

    let names: Vec<_> = class.members.iter().map(|m| m.name.to_string()).collect();
    assert_eq!(
        names,
        vec![
            "name",
            "age",
            "secret",
            "status",
            "constructor",
            "greet",
            "revealSecret",
            "createDefault",
            "loadData"
        ]
    );

    let name = assert_has_member(class, "name");
    assert_eq!((name.kind, name.visibility), (MemberKind::Field, Visibility::Public));
    assert!(assert_has_member(class, "age").modifiers.is_readonly);
    assert_eq!(assert_has_member(class, "secret").visibility, Visibility::Private);
    assert_eq!(assert_has_member(class, "status").visibility, Visibility::Protected);

    let constructor = assert_has_member(class, "constructor");
    assert_eq!(constructor.kind, MemberKind::Constructor);
    assert!(constructor.type_ref.is_none());
    assert_eq!(constructor.parameters.len(), 2);

    let greet = assert_has_member(class, "greet");
    assert_eq!((greet.kind, greet.visibility), (MemberKind::Method, Visibility::Public));
    assert_eq!(assert_has_member(class, "revealSecret").visibility, Visibility::Private);
    assert!(assert_has_member(class, "createDefault").modifiers.is_static);

    let load = assert_has_member(class, "loadData");
    assert!(load.modifiers.is_async);
    assert_eq!(load.signature(), "loadData(path: string): Promise<string>");
}

#[test]
fn test_typescript_fixture_other_declarations() {
    let analysis = analyze_fixture("test.ts");

    let color = assert_has_type(&analysis, "Color");
    assert_eq!(color.kind, TypeKind::Enum);
    assert!(color.modifiers.is_exported);
    let values: Vec<_> = color
        .enum_members
        .iter()
        .map(|m| (m.name.to_string(), m.explicit_value))
        .collect();
    assert_eq!(
        values,
        vec![("Red".to_string(), None), ("Green".to_string(), None), ("Blue".to_string(), Some(5))]
    );

    let person = assert_has_type(&analysis, "Person");
    assert_eq!(person.kind, TypeKind::Interface);
    assert!(person.members.iter().all(|m| m.visibility == Visibility::Public));
    assert!(assert_has_member(person, "greet").modifiers.is_optional);

    let functions: Vec<_> = analysis
        .symbols
        .iter()
        .filter_map(|s| match s {
            Symbol::Function(f) => Some(f.signature()),
            _ => None,
        })
        .collect();
    assert_eq!(
        functions,
        vec!["add(x: number, y: number): number", "multiply(a: number, b: number): number"]
    );

    let alias = analysis
        .symbols
        .iter()
        .find_map(|s| match s {
            Symbol::TypeAlias(alias) => Some(alias),
            _ => None,
        })
        .expect("type alias");
    assert_eq!(&*alias.name, "StringOrNumber");
    assert_eq!(alias.target.to_string(), "string | number");
}

// === TSX ===

#[test]
fn test_markup_fixture_parses_without_errors() {
    let analysis = analyze_fixture("test.tsx");
    assert_eq!(analysis.source.profile, Profile::TypeScriptMarkup);
    assert_no_syntax_errors(&analysis);
    assert!(!analysis.source.has_errors(), "{:?}", analysis.diagnostics());
}

#[test]
fn test_markup_fixture_components_are_functions() {
    let analysis = analyze_fixture("test.tsx");

    let functions: Vec<_> = analysis
        .symbols
        .iter()
        .filter_map(|s| match s {
            Symbol::Function(f) => Some(f),
            _ => None,
        })
        .collect();
    let names: Vec<_> = functions.iter().map(|f| f.name.to_string()).collect();
    assert_eq!(names, vec!["MyComponent", "SimpleDiv"]);
    assert!(functions[0].modifiers.is_default_export);
    assert!(functions[1].modifiers.is_exported);

    let props = assert_has_type(&analysis, "MyComponentProps");
    assert_eq!(props.kind, TypeKind::Interface);
    assert!(!assert_has_member(props, "title").modifiers.is_optional);
    assert!(assert_has_member(props, "initialCount").modifiers.is_optional);
}
