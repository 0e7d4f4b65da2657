//! unisym Parser - recursive descent parsers for every language profile
//!
//! Produces one [`SyntaxTree`] shape for C#, TypeScript, TSX, JavaScript
//! and JSX. Parsing never stops at the first problem:
//! - Errors are collected on the cursor and parsing resynchronizes at the
//!   next plausible item, member or statement
//! - A `}` that closes nothing is reported and skipped
//! - Members found outside any type body are kept as stray members, and so
//!   are enum members left behind when an enum body closes early

mod csharp;
mod cursor;
mod error;
mod markup;
mod typescript;

pub use csharp::CSharpParser;
pub use cursor::{Checkpoint, TokenCursor};
pub use error::*;
pub use markup::MarkupParser;
pub use typescript::TypeScriptParser;

use tracing::debug;
use unisym_ast::{Item, ItemKind, Profile, SyntaxTree};
use unisym_lexer::Token;

/// A tree plus every error recovered from while building it
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub tree: SyntaxTree,
    pub errors: Vec<ParseError>,
}

/// Parse a lexed file under `profile`
pub fn parse(profile: Profile, source: &str, tokens: &[Token]) -> ParseOutput {
    let (tree, errors) = match profile {
        Profile::CSharp => CSharpParser::new(source, tokens).parse_file(),
        _ => TypeScriptParser::new(source, tokens, profile).parse_file(),
    };
    debug!(
        profile = profile.name(),
        items = tree.items.len(),
        errors = errors.len(),
        "parsed"
    );
    ParseOutput { tree, errors }
}

/// Whether the last item is an enum, or a member stranded after one
pub(crate) fn follows_enum(items: &[Item]) -> bool {
    matches!(
        items.last().map(|item| &item.kind),
        Some(ItemKind::Enum(_) | ItemKind::StrayEnumMember(_))
    )
}
