//! unisym-symbols: the unified symbol model and its extractors
//!
//! This crate turns a parsed [`SyntaxTree`] into language-neutral symbols:
//! - Modules for namespaces, types for classes/interfaces/structs/enums,
//!   functions, type aliases and (optionally) imports
//! - Profile-specific defaults (C# members are private, script members
//!   public, interface members always public)
//! - Warnings W-EXTRACT-001..005 for declarations it could only partly model
//!
//! # Example
//!
//! ```ignore
//! use unisym_ast::{FileId, Profile};
//! use unisym_symbols::{extract, ExtractOptions, Interner};
//!
//! let source = "class Point { x: number; y: number; }";
//! let lexed = unisym_lexer::tokenize(source, Profile::TypeScript);
//! let parsed = unisym_parser::parse(Profile::TypeScript, source, &lexed.tokens);
//! let extraction = extract(&parsed.tree, source, FileId(0), &Interner::new(), &ExtractOptions::default());
//! assert_eq!(extraction.find_type("Point").unwrap().members.len(), 2);
//! ```

mod error;
mod extract;
mod interner;
mod symbol;

pub use error::ExtractionWarning;
pub use interner::Interner;
pub use symbol::*;

use serde::{Deserialize, Serialize};
use tracing::debug;
use unisym_ast::{FileId, Profile, SyntaxTree};

use extract::{CSharpExtractor, Context, ScriptExtractor};

/// Knobs for what the extractors emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Keep private members in the model
    pub include_private: bool,
    /// Emit `Symbol::Import` for `import` and `using` declarations
    pub extract_imports: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_private: true,
            extract_imports: false,
        }
    }
}

/// Symbols and warnings for one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub symbols: Vec<Symbol>,
    pub warnings: Vec<ExtractionWarning>,
}

impl Extraction {
    /// Every type, including those inside modules and nested types
    pub fn types(&self) -> Vec<&TypeSymbol> {
        all_types(&self.symbols)
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeSymbol> {
        self.types().into_iter().find(|ty| &*ty.name == name)
    }

    /// Functions at any module depth, in source order
    pub fn functions(&self) -> Vec<&FunctionSymbol> {
        let mut out = Vec::new();
        walk_symbols(&self.symbols, &mut |symbol| {
            if let Symbol::Function(function) = symbol {
                out.push(function);
            }
        });
        out
    }

    /// Number of symbols including module children
    pub fn symbol_count(&self) -> usize {
        let mut count = 0;
        walk_symbols(&self.symbols, &mut |_| count += 1);
        count
    }
}

/// Build the symbol model for one parsed file
///
/// Never fails: declarations that cannot be modelled are skipped with a
/// warning, and everything else in the file is still extracted.
pub fn extract(
    tree: &SyntaxTree,
    source: &str,
    file: FileId,
    interner: &Interner,
    options: &ExtractOptions,
) -> Extraction {
    let cx = Context::new(source, file, interner, options);
    let (symbols, warnings) = match tree.profile {
        Profile::CSharp => CSharpExtractor::new(cx).extract(tree),
        Profile::TypeScript | Profile::TypeScriptMarkup | Profile::JavaScript | Profile::JavaScriptMarkup => {
            ScriptExtractor::new(cx).extract(tree)
        }
    };
    let extraction = Extraction { symbols, warnings };
    debug!(
        file = file.0,
        profile = tree.profile.name(),
        symbols = extraction.symbol_count(),
        warnings = extraction.warnings.len(),
        "extracted"
    );
    extraction
}
