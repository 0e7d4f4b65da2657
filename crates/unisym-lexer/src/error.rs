//! Lexical errors

use thiserror::Error;
use unisym_ast::{Reportable, Severity, Span, Stage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unterminated template literal")]
    UnterminatedTemplate { span: Span },

    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },

    #[error("unterminated character literal")]
    UnterminatedChar { span: Span },

    #[error("invalid escape sequence '{sequence}'")]
    InvalidEscape { sequence: String, span: Span },

    #[error("unexpected character '{ch}'")]
    UnexpectedChar { ch: char, span: Span },

    #[error("markup element is never closed")]
    UnclosedMarkup { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::UnterminatedTemplate { span }
            | LexError::UnterminatedComment { span }
            | LexError::UnterminatedChar { span }
            | LexError::InvalidEscape { span, .. }
            | LexError::UnexpectedChar { span, .. }
            | LexError::UnclosedMarkup { span } => *span,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            LexError::UnterminatedString { .. } => "E-LEX-001",
            LexError::UnterminatedTemplate { .. } => "E-LEX-002",
            LexError::UnterminatedComment { .. } => "E-LEX-003",
            LexError::UnterminatedChar { .. } => "E-LEX-004",
            LexError::InvalidEscape { .. } => "E-LEX-005",
            LexError::UnexpectedChar { .. } => "E-LEX-006",
            LexError::UnclosedMarkup { .. } => "E-LEX-007",
        }
    }
}

impl Reportable for LexError {
    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn stage(&self) -> Stage {
        Stage::Lex
    }

    fn code(&self) -> &'static str {
        LexError::code(self)
    }

    fn span(&self) -> Span {
        LexError::span(self)
    }
}
