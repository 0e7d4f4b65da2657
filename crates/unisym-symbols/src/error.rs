//! Warnings raised while building the symbol model

use thiserror::Error;
use unisym_ast::{Reportable, Severity, Span, Stage};

/// A declaration the extractor understood only partly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionWarning {
    /// W-EXTRACT-001: Modifier outside the supported set
    #[error("unsupported modifier `{modifier}`")]
    UnsupportedModifier { modifier: String, span: Span },

    /// W-EXTRACT-002: Two modifiers that cannot apply together
    #[error("modifiers `{first}` and `{second}` cannot be combined")]
    ConflictingModifiers {
        first: String,
        second: String,
        span: Span,
    },

    /// W-EXTRACT-003: Accessor list that is not a recognisable property
    #[error("accessors of `{name}` do not form a property; treating it as a field")]
    AmbiguousAccessor { name: String, span: Span },

    /// W-EXTRACT-004: Stray member with no type before it
    #[error("member `{name}` is outside any type and was dropped")]
    OrphanMember { name: String, span: Span },

    /// W-EXTRACT-005: Declaration too broken to become a symbol
    #[error("skipped malformed {what}")]
    MalformedDeclaration { what: &'static str, span: Span },
}

impl ExtractionWarning {
    pub fn span(&self) -> Span {
        match self {
            ExtractionWarning::UnsupportedModifier { span, .. } => *span,
            ExtractionWarning::ConflictingModifiers { span, .. } => *span,
            ExtractionWarning::AmbiguousAccessor { span, .. } => *span,
            ExtractionWarning::OrphanMember { span, .. } => *span,
            ExtractionWarning::MalformedDeclaration { span, .. } => *span,
        }
    }

    /// Warning code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ExtractionWarning::UnsupportedModifier { .. } => "W-EXTRACT-001",
            ExtractionWarning::ConflictingModifiers { .. } => "W-EXTRACT-002",
            ExtractionWarning::AmbiguousAccessor { .. } => "W-EXTRACT-003",
            ExtractionWarning::OrphanMember { .. } => "W-EXTRACT-004",
            ExtractionWarning::MalformedDeclaration { .. } => "W-EXTRACT-005",
        }
    }
}

impl Reportable for ExtractionWarning {
    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn stage(&self) -> Stage {
        Stage::Extract
    }

    fn code(&self) -> &'static str {
        ExtractionWarning::code(self)
    }

    fn span(&self) -> Span {
        ExtractionWarning::span(self)
    }
}
