//! Inputs and per-file results

use std::path::{Path, PathBuf};

use unisym_ast::{Diagnostic, FileId, Profile, Severity, SyntaxTree};
use unisym_lexer::Token;
use unisym_symbols::{Symbol, TypeSymbol};

/// Text handed to the analyzer by whoever read the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub path: PathBuf,
    pub text: String,
    /// Overrides extension and content detection
    pub profile: Option<Profile>,
}

impl SourceInput {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }
}

/// One analysed file. Never mutated once built.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: FileId,
    pub path: PathBuf,
    pub profile: Profile,
    pub text: String,
    /// Full token stream, trivia included, ending with `Eof`
    pub tokens: Vec<Token>,
    pub tree: SyntaxTree,
    /// Sorted by span start
    pub diagnostics: Vec<Diagnostic>,
}

impl SourceFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// A file together with its symbols
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub source: SourceFile,
    pub symbols: Vec<Symbol>,
    /// Diagnostics dropped by `max_diagnostics_per_file`
    pub suppressed_diagnostics: usize,
}

impl FileAnalysis {
    pub fn id(&self) -> FileId {
        self.source.id
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.source.diagnostics
    }

    /// Every type, nested ones included
    pub fn types(&self) -> Vec<&TypeSymbol> {
        unisym_symbols::all_types(&self.symbols)
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeSymbol> {
        self.types().into_iter().find(|ty| &*ty.name == name)
    }
}
