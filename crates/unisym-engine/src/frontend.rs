//! Per-profile language front ends
//!
//! A front end is the "tokenize → parse → extract" capability for one
//! profile. The C# front end and the four script front ends share nothing
//! but this trait; the analyzer picks one with [`frontend_for`].

use unisym_ast::{FileId, Profile, SyntaxTree};
use unisym_lexer::LexOutput;
use unisym_parser::ParseOutput;
use unisym_symbols::{ExtractOptions, Extraction, Interner};

pub trait LanguageFrontend: Send + Sync {
    fn profile(&self) -> Profile;

    fn tokenize(&self, source: &str) -> LexOutput {
        unisym_lexer::tokenize(source, self.profile())
    }

    fn parse(&self, source: &str, lexed: &LexOutput) -> ParseOutput {
        unisym_parser::parse(self.profile(), source, &lexed.tokens)
    }

    fn extract(
        &self,
        tree: &SyntaxTree,
        source: &str,
        file: FileId,
        interner: &Interner,
        options: &ExtractOptions,
    ) -> Extraction {
        unisym_symbols::extract(tree, source, file, interner, options)
    }
}

/// C# (`.cs`)
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpFrontend;

impl LanguageFrontend for CSharpFrontend {
    fn profile(&self) -> Profile {
        Profile::CSharp
    }
}

/// TypeScript, JavaScript and their markup variants
#[derive(Debug, Clone, Copy)]
pub struct ScriptFrontend {
    profile: Profile,
}

impl ScriptFrontend {
    pub const TYPESCRIPT: ScriptFrontend = ScriptFrontend {
        profile: Profile::TypeScript,
    };
    pub const TYPESCRIPT_MARKUP: ScriptFrontend = ScriptFrontend {
        profile: Profile::TypeScriptMarkup,
    };
    pub const JAVASCRIPT: ScriptFrontend = ScriptFrontend {
        profile: Profile::JavaScript,
    };
    pub const JAVASCRIPT_MARKUP: ScriptFrontend = ScriptFrontend {
        profile: Profile::JavaScriptMarkup,
    };
}

impl LanguageFrontend for ScriptFrontend {
    fn profile(&self) -> Profile {
        self.profile
    }
}

static CSHARP: CSharpFrontend = CSharpFrontend;
static TYPESCRIPT: ScriptFrontend = ScriptFrontend::TYPESCRIPT;
static TYPESCRIPT_MARKUP: ScriptFrontend = ScriptFrontend::TYPESCRIPT_MARKUP;
static JAVASCRIPT: ScriptFrontend = ScriptFrontend::JAVASCRIPT;
static JAVASCRIPT_MARKUP: ScriptFrontend = ScriptFrontend::JAVASCRIPT_MARKUP;

/// The front end registered for `profile`
pub fn frontend_for(profile: Profile) -> &'static dyn LanguageFrontend {
    match profile {
        Profile::CSharp => &CSHARP,
        Profile::TypeScript => &TYPESCRIPT,
        Profile::TypeScriptMarkup => &TYPESCRIPT_MARKUP,
        Profile::JavaScript => &JAVASCRIPT,
        Profile::JavaScriptMarkup => &JAVASCRIPT_MARKUP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_profile_has_a_frontend() {
        for profile in Profile::ALL {
            assert_eq!(frontend_for(profile).profile(), profile);
        }
    }

    #[test]
    fn test_frontend_pipeline() {
        let source = "export interface Shape { area(): number; }";
        let frontend = frontend_for(Profile::TypeScript);
        let lexed = frontend.tokenize(source);
        let parsed = frontend.parse(source, &lexed);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);

        let extraction = frontend.extract(
            &parsed.tree,
            source,
            FileId(3),
            &Interner::new(),
            &ExtractOptions::default(),
        );
        let shape = extraction.find_type("Shape").unwrap();
        assert_eq!(shape.file, FileId(3));
        assert_eq!(shape.members.len(), 1);
    }
}
