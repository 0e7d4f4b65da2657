//! unisym-engine: per-file pipelines and parallel batch analysis
//!
//! Ties the lexer, parser and symbol extractor together:
//! - [`LanguageFrontend`] implementations, one per profile
//! - [`Analyzer`] for single files and rayon-parallel batches, sharing one
//!   name [`Interner`](unisym_symbols::Interner) and one results map
//! - [`AnalyzerConfig`] loaded from TOML
//! - [`render_diagnostics`] for ariadne reports and [`logging::init_logging`]
//!
//! # Example
//!
//! ```ignore
//! use unisym_engine::{Analyzer, SourceInput};
//!
//! let analyzer = Analyzer::default();
//! let report = analyzer.analyze_batch(vec![
//!     SourceInput::new("Point.cs", "public struct Point { public int X; public int Y; }"),
//!     SourceInput::new("shape.ts", "export interface Shape { area(): number; }"),
//! ]);
//! assert_eq!(report.files.len(), 2);
//! ```

mod analyzer;
mod config;
mod frontend;
pub mod logging;
mod render;
mod source;

pub use analyzer::{Analyzer, BatchReport, CancelHandle, TRUNCATION_CODE};
pub use config::{AnalyzerConfig, ConfigError};
pub use frontend::{frontend_for, CSharpFrontend, LanguageFrontend, ScriptFrontend};
pub use render::render_diagnostics;
pub use source::{FileAnalysis, SourceFile, SourceInput};
