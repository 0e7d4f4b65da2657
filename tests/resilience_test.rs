//! Whole-pipeline properties: recovery, visibility defaults, determinism and
//! lossless lexing

mod common;

use common::*;
use unisym::ast::Stage;
use unisym::lexer::tokenize;
use unisym::symbols::{MemberKind, Symbol, Visibility};

/// Insert an unmatched `}` on its own line right before `marker`
fn with_stray_brace(source: &str, marker: &str) -> String {
    let at = source
        .find(marker)
        .unwrap_or_else(|| panic!("marker {:?} not in fixture", marker));
    format!("{}}}\n{}", &source[..at], &source[at..])
}

fn function_names(analysis: &unisym::FileAnalysis) -> Vec<String> {
    analysis
        .symbols
        .iter()
        .filter_map(|s| match s {
            Symbol::Function(f) => Some(f.name.to_string()),
            _ => None,
        })
        .collect()
}

// === Error resilience ===

#[test]
fn test_csharp_stray_brace_closes_namespace_early() {
    let source = with_stray_brace(&load_fixture("test.cs"), "    public struct Point");
    let analysis = analyze_text("test.cs", &source);

    assert!(analysis.diagnostics().iter().any(|d| d.code == "E-PARSE-003"));
    for name in ["IExample", "BaseClass", "ExampleClass", "Point", "Status"] {
        assert_has_type(&analysis, name);
    }
    assert_eq!(assert_has_type(&analysis, "ExampleClass").members.len(), 7);
}

#[test]
fn test_csharp_stray_brace_inside_class_keeps_members() {
    let source = with_stray_brace(&load_fixture("test.cs"), "        public const double PI");
    let analysis = analyze_text("test.cs", &source);

    assert!(!analysis.diagnostics().is_empty());
    let class = assert_has_type(&analysis, "ExampleClass");
    for name in ["_privateField", "PublicProperty", "PI", "AbstractMethod", "GetGreeting", "PrivateMethod"] {
        assert_has_member(class, name);
    }
    assert_eq!(assert_has_member(class, "PrivateMethod").visibility, Visibility::Private);
    assert_has_type(&analysis, "Point");
    assert_has_type(&analysis, "Status");
}

#[test]
fn test_typescript_stray_brace_inside_class_keeps_members() {
    let source = with_stray_brace(&load_fixture("test.ts"), "  constructor(name");
    let analysis = analyze_text("test.ts", &source);

    assert!(analysis.source.has_errors());
    let class = assert_has_type(&analysis, "SampleClass");
    for name in ["name", "status", "constructor", "greet", "revealSecret", "createDefault", "loadData"] {
        assert_has_member(class, name);
    }
    assert_eq!(assert_has_member(class, "constructor").kind, MemberKind::Constructor);
    assert_has_type(&analysis, "Color");
    assert_has_type(&analysis, "Person");
    assert_eq!(function_names(&analysis), vec!["add", "multiply"]);
}

#[test]
fn test_csharp_stray_brace_inside_enum_keeps_members() {
    let source = with_stray_brace(&load_fixture("test.cs"), "        Inactive,");
    let analysis = analyze_text("test.cs", &source);

    let errors: Vec<_> = analysis.source.errors().map(|d| d.code.as_str()).collect();
    assert!(errors.contains(&"E-PARSE-008"), "{:?}", errors);
    let status = assert_has_type(&analysis, "Status");
    let names: Vec<_> = status.enum_members.iter().map(|m| m.name.to_string()).collect();
    assert_eq!(names, vec!["Active", "Inactive", "Pending"]);
    for name in ["IExample", "BaseClass", "ExampleClass", "Point"] {
        assert_has_type(&analysis, name);
    }
}

#[test]
fn test_typescript_stray_brace_inside_enum_keeps_members() {
    let source = with_stray_brace(&load_fixture("test.ts"), "  Blue = 5");
    let analysis = analyze_text("test.ts", &source);

    let errors: Vec<_> = analysis.source.errors().map(|d| d.code.as_str()).collect();
    assert_eq!(errors, vec!["E-PARSE-008", "E-PARSE-003"]);
    let color = assert_has_type(&analysis, "Color");
    let values: Vec<_> = color
        .enum_members
        .iter()
        .map(|m| (m.name.to_string(), m.explicit_value))
        .collect();
    assert_eq!(
        values,
        vec![("Red".to_string(), None), ("Green".to_string(), None), ("Blue".to_string(), Some(5))]
    );
    assert_eq!(assert_has_type(&analysis, "SampleClass").members.len(), 9);
    assert_eq!(function_names(&analysis), vec!["add", "multiply"]);
}

#[test]
fn test_csharp_stray_brace_inside_method_keeps_members() {
    let source = with_stray_brace(
        &load_fixture("test.cs"),
        "            Console.WriteLine(\"Implemented interface method\")",
    );
    let analysis = analyze_text("test.cs", &source);

    assert!(analysis.source.has_errors());
    let class = assert_has_type(&analysis, "ExampleClass");
    for name in [
        "_privateField",
        "PublicProperty",
        "PI",
        "AbstractMethod",
        "InterfaceMethod",
        "GetGreeting",
        "PrivateMethod",
    ] {
        assert_has_member(class, name);
    }
    assert_eq!(assert_has_member(class, "GetGreeting").visibility, Visibility::Public);
    assert_has_type(&analysis, "Point");
    assert_has_type(&analysis, "Status");
}

#[test]
fn test_typescript_stray_brace_inside_method_keeps_members() {
    let source = with_stray_brace(&load_fixture("test.ts"), "    return this.secret;");
    let analysis = analyze_text("test.ts", &source);

    assert!(analysis.source.has_errors());
    let class = assert_has_type(&analysis, "SampleClass");
    for name in ["constructor", "greet", "revealSecret", "createDefault", "loadData"] {
        assert_has_member(class, name);
    }
    assert!(assert_has_member(class, "createDefault").modifiers.is_static);
    assert!(assert_has_member(class, "loadData").modifiers.is_async);
    assert_has_type(&analysis, "Person");
    assert_eq!(function_names(&analysis), vec!["add", "multiply"]);
}

#[test]
fn test_markup_stray_brace_between_declarations() {
    let source = with_stray_brace(&load_fixture("test.tsx"), "// Functional component");
    let analysis = analyze_text("test.tsx", &source);

    let errors: Vec<_> = analysis.source.errors().map(|d| d.code.as_str()).collect();
    assert_eq!(errors, vec!["E-PARSE-003"]);
    assert_has_type(&analysis, "MyComponentProps");
    assert_eq!(function_names(&analysis), vec!["MyComponent", "SimpleDiv"]);
}

#[test]
fn test_unknown_characters_are_diagnosed_not_fatal() {
    let analysis = analyze_text("odd.cs", "class A { int x; }\n§\nclass B { }");
    assert!(analysis.diagnostics().iter().any(|d| d.stage == Stage::Lex));
    assert_has_type(&analysis, "A");
    assert_has_type(&analysis, "B");
}

// === Visibility defaulting ===

#[test]
fn test_class_members_default_by_profile() {
    let csharp = analyze_text("a.cs", "class A { int x; void M() { } A() { } }");
    let class = assert_has_type(&csharp, "A");
    assert!(class.members.iter().all(|m| m.visibility == Visibility::Private));

    let script = analyze_text("a.ts", "class A { x = 1; m() { } constructor() { } }");
    let class = assert_has_type(&script, "A");
    assert!(class.members.iter().all(|m| m.visibility == Visibility::Public));
}

#[test]
fn test_interface_members_are_always_public() {
    let csharp = analyze_text("i.cs", "interface IShape { double Area(); string Name { get; } }");
    let script = analyze_text("i.ts", "interface Shape { area(): number; readonly name: string; }");
    for analysis in [&csharp, &script] {
        let ty = analysis.types()[0];
        assert_eq!(ty.members.len(), 2);
        assert!(ty.members.iter().all(|m| m.visibility == Visibility::Public));
    }
}

// === Determinism ===

#[test]
fn test_analysis_is_deterministic() {
    for name in ["test.cs", "test.ts", "test.tsx"] {
        let first = analyze_fixture(name);
        let second = analyze_fixture(name);
        assert_eq!(first.source.tree, second.source.tree, "{}", name);
        assert_eq!(first.source.tokens, second.source.tokens, "{}", name);
        assert_eq!(first.diagnostics(), second.diagnostics(), "{}", name);
        assert_eq!(
            serde_json::to_string(&first.symbols).unwrap(),
            serde_json::to_string(&second.symbols).unwrap(),
            "{}",
            name
        );
    }
}

// === Lossless lexing ===

#[test]
fn test_tokens_reconstruct_fixtures() {
    for name in ["test.cs", "test.ts", "test.tsx"] {
        let source = load_fixture(name);
        let analysis = analyze_fixture(name);
        let rebuilt: String = tokenize(&source, analysis.source.profile)
            .tokens
            .iter()
            .map(|t| t.text(&source))
            .collect();
        assert_eq!(rebuilt, source, "{}", name);
    }
}

#[test]
fn test_tokens_reconstruct_broken_input() {
    let source = "const s = `open ${ a + \n<div>{x</div>\n/* never closed";
    let analysis = analyze_text("broken.tsx", source);
    let rebuilt: String = analysis.source.tokens.iter().map(|t| t.text(source)).collect();
    assert_eq!(rebuilt, source);
    assert!(analysis.diagnostics().iter().any(|d| d.stage == Stage::Lex));
}
