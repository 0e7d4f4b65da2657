//! Recoverable problem records and the per-file collector

use crate::{LineIndex, Position, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one input file within an analysis session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct FileId(pub u32);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

/// Severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// Which pipeline stage produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Lex,
    Parse,
    Extract,
    Engine,
}

/// Anything that can be recorded as a diagnostic
pub trait Reportable: fmt::Display {
    fn severity(&self) -> Severity;
    fn stage(&self) -> Stage;
    /// Stable machine-readable code (e.g. "E-PARSE-001")
    fn code(&self) -> &'static str;
    fn span(&self) -> Span;
}

/// A recoverable problem with a source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub stage: Stage,
    pub code: String,
    pub message: String,
    pub file: FileId,
    pub span: Span,
    /// Resolved when the collector is finished
    pub position: Position,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{}[{}] {}:{}: {}",
            level, self.code, self.position.line, self.position.column, self.message
        )
    }
}

/// Append-only diagnostics for a single file
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    file: FileId,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(file: FileId) -> Self {
        Self {
            file,
            entries: Vec::new(),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn push(&mut self, problem: &impl Reportable) {
        self.entries.push(Diagnostic {
            severity: problem.severity(),
            stage: problem.stage(),
            code: problem.code().to_string(),
            message: problem.to_string(),
            file: self.file,
            span: problem.span(),
            position: Position::default(),
        });
    }

    pub fn extend<'a, R: Reportable + 'a>(&mut self, problems: impl IntoIterator<Item = &'a R>) {
        for problem in problems {
            self.push(problem);
        }
    }

    /// Record an engine-level note that does not come from a typed error
    pub fn note(&mut self, severity: Severity, code: &'static str, message: impl Into<String>, span: Span) {
        self.entries.push(Diagnostic {
            severity,
            stage: Stage::Engine,
            code: code.to_string(),
            message: message.into(),
            file: self.file,
            span,
            position: Position::default(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Sort by span start (stable, so insertion order breaks ties) and resolve positions
    pub fn finish(self, source: &str, index: &LineIndex) -> Vec<Diagnostic> {
        let mut entries = self.entries;
        entries.sort_by_key(|d| d.span.start);
        for entry in &mut entries {
            entry.position = index.position(source, entry.span.start);
        }
        entries
    }
}
