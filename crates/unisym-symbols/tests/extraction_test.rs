//! Integration tests for symbol extraction across profiles

use unisym_ast::{FileId, Profile};
use unisym_symbols::{extract, ExtractOptions, Extraction, Interner, MemberKind, Symbol, TypeKind, Visibility};

fn extract_source(source: &str, profile: Profile) -> Extraction {
    let lexed = unisym_lexer::tokenize(source, profile);
    let parsed = unisym_parser::parse(profile, source, &lexed.tokens);
    extract(&parsed.tree, source, FileId(0), &Interner::new(), &ExtractOptions::default())
}

fn member_names(extraction: &Extraction, ty: &str) -> Vec<String> {
    extraction
        .find_type(ty)
        .expect("type")
        .members
        .iter()
        .map(|m| m.name.to_string())
        .collect()
}

// === Unified model ===

#[test]
fn test_same_shape_across_languages() {
    let csharp = extract_source("public class Point { public int X; public int Y; }", Profile::CSharp);
    let script = extract_source("export class Point { X: number; Y: number; }", Profile::TypeScript);

    for extraction in [&csharp, &script] {
        let point = extraction.find_type("Point").expect("Point");
        assert_eq!(point.kind, TypeKind::Class);
        assert_eq!(member_names(extraction, "Point"), vec!["X", "Y"]);
        for member in &point.members {
            assert_eq!(member.kind, MemberKind::Field);
            assert_eq!(member.visibility, Visibility::Public);
        }
    }
}

#[test]
fn test_markup_profiles_share_the_script_extractor() {
    let source = "export function App() { return <div className=\"app\">{1 > 0 && <p>hi</p>}</div>; }";
    for profile in [Profile::TypeScriptMarkup, Profile::JavaScriptMarkup] {
        let extraction = extract_source(source, profile);
        let functions = extraction.functions();
        assert_eq!(functions.len(), 1, "{:?}", profile);
        assert_eq!(&*functions[0].name, "App");
        assert!(functions[0].modifiers.is_exported);
    }
}

// === Recovery ===

#[test]
fn test_stray_member_rejoins_its_class() {
    let source = "class A {\n  x: number;\n}\n  greet(): void {}\n}\nfunction f() {}";
    let extraction = extract_source(source, Profile::TypeScript);
    assert_eq!(member_names(&extraction, "A"), vec!["x", "greet"]);
    assert_eq!(extraction.functions().len(), 1);
    assert!(extraction.warnings.is_empty(), "{:?}", extraction.warnings);
}

#[test]
fn test_later_declarations_survive_a_stray_brace() {
    let source = "namespace App {\n  class First { }\n  }\n}\nclass Second { void Run() { } }";
    let extraction = extract_source(source, Profile::CSharp);
    let names: Vec<_> = extraction.types().iter().map(|ty| ty.name.to_string()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(member_names(&extraction, "Second"), vec!["Run"]);
}

// === Determinism ===

#[test]
fn test_extraction_is_deterministic() {
    let source = "namespace N { public interface IShape { double Area(); } public enum Kind { A, B = 4 } }";
    let first = extract_source(source, Profile::CSharp);
    let second = extract_source(source, Profile::CSharp);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.symbols).expect("serialize"),
        serde_json::to_string(&second.symbols).expect("serialize")
    );
    assert!(matches!(first.symbols[0], Symbol::Module(_)));
}
