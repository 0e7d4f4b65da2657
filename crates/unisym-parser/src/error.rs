//! Parser error types

use thiserror::Error;
use unisym_ast::{Reportable, Severity, Span, Stage};
use unisym_lexer::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    #[error("unbalanced '{delimiter}'")]
    UnbalancedDelimiter { delimiter: char, span: Span },

    #[error("expected declaration")]
    ExpectedDeclaration { span: Span },

    #[error("invalid expression")]
    InvalidExpression { span: Span },

    #[error("invalid type")]
    InvalidType { span: Span },

    #[error("invalid binding pattern")]
    InvalidPattern { span: Span },

    #[error("member '{name}' appears outside any type body")]
    StrayMember { name: String, span: Span },

    #[error("closing tag '{found}' does not match '{expected}'")]
    MismatchedTag {
        expected: String,
        found: String,
        span: Span,
    },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span, .. } => *span,
            ParseError::UnbalancedDelimiter { span, .. } => *span,
            ParseError::ExpectedDeclaration { span } => *span,
            ParseError::InvalidExpression { span } => *span,
            ParseError::InvalidType { span } => *span,
            ParseError::InvalidPattern { span } => *span,
            ParseError::StrayMember { span, .. } => *span,
            ParseError::MismatchedTag { span, .. } => *span,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } => "E-PARSE-001",
            ParseError::UnexpectedEof { .. } => "E-PARSE-002",
            ParseError::UnbalancedDelimiter { .. } => "E-PARSE-003",
            ParseError::ExpectedDeclaration { .. } => "E-PARSE-004",
            ParseError::InvalidExpression { .. } => "E-PARSE-005",
            ParseError::InvalidType { .. } => "E-PARSE-006",
            ParseError::InvalidPattern { .. } => "E-PARSE-007",
            ParseError::StrayMember { .. } => "E-PARSE-008",
            ParseError::MismatchedTag { .. } => "E-PARSE-009",
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        if found == TokenKind::Eof {
            return ParseError::UnexpectedEof {
                expected: expected.into(),
                span,
            };
        }
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.describe().to_string(),
            span,
        }
    }
}

impl Reportable for ParseError {
    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn stage(&self) -> Stage {
        Stage::Parse
    }

    fn code(&self) -> &'static str {
        ParseError::code(self)
    }

    fn span(&self) -> Span {
        ParseError::span(self)
    }
}
