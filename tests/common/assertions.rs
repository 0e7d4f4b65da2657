use unisym::ast::Stage;
use unisym::engine::FileAnalysis;
use unisym::symbols::{Member, TypeSymbol};

/// Assert the file produced no lex or parse errors
pub fn assert_no_syntax_errors(analysis: &FileAnalysis) {
    let errors: Vec<_> = analysis
        .diagnostics()
        .iter()
        .filter(|d| d.is_error() && matches!(d.stage, Stage::Lex | Stage::Parse))
        .map(|d| d.to_string())
        .collect();
    assert!(
        errors.is_empty(),
        "Expected {} to parse cleanly, got:\n{}",
        analysis.source.path.display(),
        errors.join("\n")
    );
}

/// Assert a type with the given name was extracted
pub fn assert_has_type<'a>(analysis: &'a FileAnalysis, name: &str) -> &'a TypeSymbol {
    analysis
        .find_type(name)
        .unwrap_or_else(|| panic!("Expected type: {}", name))
}

/// Assert a type has a member with the given name
pub fn assert_has_member<'a>(ty: &'a TypeSymbol, name: &str) -> &'a Member {
    ty.member(name)
        .unwrap_or_else(|| panic!("Expected member {} on {}", name, ty.name))
}

/// Names of a type's base types in source order
pub fn base_names(ty: &TypeSymbol) -> Vec<String> {
    ty.base_types.iter().map(|b| b.to_string()).collect()
}
