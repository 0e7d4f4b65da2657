//! unisym - one symbol model for C#, TypeScript and JavaScript sources
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use unisym_ast as ast;
pub use unisym_engine as engine;
pub use unisym_lexer as lexer;
pub use unisym_parser as parser;
pub use unisym_symbols as symbols;

pub use unisym_engine::{Analyzer, AnalyzerConfig, FileAnalysis, SourceInput};
