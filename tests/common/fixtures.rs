use std::fs;
use std::path::{Path, PathBuf};

use unisym::engine::{Analyzer, FileAnalysis, SourceInput};

/// Path to a file under tests/fixtures/
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a test fixture from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Analyze a fixture with a default analyzer, profile chosen by extension
pub fn analyze_fixture(name: &str) -> FileAnalysis {
    analyze_text(name, &load_fixture(name))
}

/// Analyze in-memory text as if it were a file called `name`
pub fn analyze_text(name: &str, text: &str) -> FileAnalysis {
    let analyzer = Analyzer::default();
    let analysis = analyzer
        .analyze_file(SourceInput::new(name, text))
        .unwrap_or_else(|| panic!("No profile for {}", name));
    (*analysis).clone()
}
