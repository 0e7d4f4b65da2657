//! TypeScript and JavaScript parser
//!
//! One recursive-descent grammar serves all four script profiles. Type
//! annotations are optional everywhere, so plain JavaScript is the same
//! grammar with the annotations absent. The markup profiles reach the
//! element productions from primary-expression position through
//! [`crate::markup::MarkupParser`].

mod decl;
mod expr;
mod stmt;
mod types;

use std::ops::{Deref, DerefMut};

use unisym_ast::*;
use unisym_lexer::{Keyword, Token, TokenKind};

use crate::cursor::TokenCursor;
use crate::{follows_enum, ParseError};

pub struct TypeScriptParser<'a> {
    cursor: TokenCursor<'a>,
    profile: Profile,
    /// `in` is not a binary operator (for-loop heads)
    no_in: bool,
}

impl<'a> Deref for TypeScriptParser<'a> {
    type Target = TokenCursor<'a>;

    fn deref(&self) -> &Self::Target {
        &self.cursor
    }
}

impl<'a> DerefMut for TypeScriptParser<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cursor
    }
}

/// Tokens where statement-level recovery may resume
fn is_statement_start(cursor: &TokenCursor<'_>) -> bool {
    match cursor.peek() {
        TokenKind::Keyword(kw) => matches!(
            kw,
            Keyword::Class
                | Keyword::Function
                | Keyword::Const
                | Keyword::Let
                | Keyword::Var
                | Keyword::Enum
                | Keyword::Interface
                | Keyword::Import
                | Keyword::Export
                | Keyword::If
                | Keyword::For
                | Keyword::While
                | Keyword::Do
                | Keyword::Return
                | Keyword::Try
                | Keyword::Switch
                | Keyword::Throw
        ),
        TokenKind::At => true,
        TokenKind::Ident => {
            matches!(cursor.current_text(), "type" | "namespace" | "declare" | "abstract")
                && cursor.peek_ahead(1) == TokenKind::Ident
        }
        _ => false,
    }
}

/// Tokens where class-member recovery may resume
fn is_member_start(cursor: &TokenCursor<'_>) -> bool {
    match cursor.peek() {
        TokenKind::Keyword(Keyword::Public | Keyword::Private | Keyword::Protected | Keyword::Static) => true,
        TokenKind::At => true,
        TokenKind::Ident => matches!(
            cursor.current_text(),
            "readonly" | "abstract" | "async" | "get" | "set" | "constructor" | "override"
        ),
        _ => false,
    }
}

/// Text of a string literal without its quotes
fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

impl<'a> TypeScriptParser<'a> {
    pub fn new(source: &'a str, tokens: &[Token], profile: Profile) -> Self {
        Self {
            cursor: TokenCursor::new(source, tokens),
            profile,
            no_in: false,
        }
    }

    pub fn parse_file(mut self) -> (SyntaxTree, Vec<ParseError>) {
        let items = self.parse_module_items(false);
        let tree = SyntaxTree {
            profile: self.profile,
            items,
            span: Span::new(0, self.source().len()),
        };
        (tree, self.cursor.into_errors())
    }

    /// Items of a file, or of a `namespace`/`module` body when `nested`
    fn parse_module_items(&mut self, nested: bool) -> Vec<Item> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                TokenKind::Eof => break,
                TokenKind::RBrace if nested => break,
                TokenKind::RBrace => {
                    let token = self.advance();
                    self.report(ParseError::UnbalancedDelimiter {
                        delimiter: '}',
                        span: token.span,
                    });
                    continue;
                }
                _ => {}
            }
            if follows_enum(&items) {
                if let Some(item) = self.parse_stray_enum_member() {
                    items.push(item);
                    continue;
                }
            }
            match self.parse_module_item() {
                Ok(Some(item)) => items.push(item),
                Ok(None) => {}
                Err(error) => {
                    self.report(error);
                    self.recover(is_statement_start);
                }
            }
        }
        items
    }

    /// A statement at module scope. Input that is not a statement but reads
    /// cleanly as a class member becomes a stray member.
    fn parse_module_item(&mut self) -> Result<Option<Item>, ParseError> {
        let checkpoint = self.checkpoint();
        let error = match self.parse_statement() {
            Ok(stmt) => return Ok(statement_item(stmt)),
            Err(error) => error,
        };

        self.rewind(checkpoint);
        if let Ok(Some(member)) = self.parse_class_member() {
            if self.errors_since(checkpoint) == 0 {
                self.report(ParseError::StrayMember {
                    name: member.name().unwrap_or("<anonymous>").to_string(),
                    span: member.span,
                });
                return Ok(Some(Item {
                    span: member.span,
                    kind: ItemKind::StrayMember(member),
                }));
            }
        }

        self.rewind(checkpoint);
        self.parse_statement()?;
        Err(error)
    }

    // === Shared helpers ===

    /// Statement terminator with automatic semicolon insertion
    fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenKind::Semicolon)
            || self.at_any(&[TokenKind::RBrace, TokenKind::Eof])
            || self.newline_before()
        {
            return Ok(());
        }
        Err(ParseError::unexpected("';'", self.peek(), self.span()))
    }

    /// Identifier or reserved word where any name is allowed (`a.default`)
    fn at_name(&self) -> bool {
        matches!(self.peek(), TokenKind::Ident | TokenKind::Keyword(_))
    }

    fn consume_name(&mut self) -> Result<(String, Span), ParseError> {
        if !self.at_name() {
            return Err(ParseError::unexpected("name", self.peek(), self.span()));
        }
        let token = self.advance();
        Ok((self.text(token).to_string(), token.span))
    }

    fn parse_property_key(&mut self) -> Result<(PropKey, Span), ParseError> {
        let token = self.current();
        let key = match token.kind {
            TokenKind::Ident | TokenKind::Keyword(_) => {
                self.advance();
                PropKey::Ident(self.text(token).to_string())
            }
            TokenKind::String => {
                self.advance();
                PropKey::String(unquote(self.text(token)))
            }
            TokenKind::Number => {
                self.advance();
                PropKey::Number(self.text(token).to_string())
            }
            TokenKind::PrivateName => {
                self.advance();
                PropKey::Private(self.text(token).trim_start_matches('#').to_string())
            }
            TokenKind::LBracket => {
                self.advance();
                let expr = self.with_in(|p| p.parse_assignment())?;
                self.consume(TokenKind::RBracket)?;
                PropKey::Computed(Box::new(expr))
            }
            found => return Err(ParseError::unexpected("property name", found, token.span)),
        };
        Ok((key, self.finish(token.span)))
    }

    /// Run `f` with `in` restored as a binary operator
    fn with_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.no_in, false);
        let result = f(self);
        self.no_in = saved;
        result
    }

    fn skip_decorators(&mut self) -> Result<(), ParseError> {
        while self.eat(TokenKind::At) {
            self.consume_name()?;
            while self.eat(TokenKind::Dot) {
                self.consume_name()?;
            }
            if self.at(TokenKind::LParen) {
                self.skip_balanced()?;
            }
        }
        Ok(())
    }

    fn is_markup_profile(&self) -> bool {
        self.profile.supports_markup()
    }
}

fn is_property_key_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::Keyword(_)
            | TokenKind::String
            | TokenKind::Number
            | TokenKind::PrivateName
            | TokenKind::LBracket
    )
}

/// Module-scope view of a statement
fn statement_item(stmt: Stmt) -> Option<Item> {
    match stmt.kind {
        StmtKind::Item(item) => Some(*item),
        StmtKind::Var(decl) => Some(Item {
            kind: ItemKind::Variable(decl),
            span: stmt.span,
        }),
        StmtKind::Empty => None,
        _ => Some(Item {
            span: stmt.span,
            kind: ItemKind::Statement(stmt),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unisym_lexer::tokenize;

    pub(super) fn parse(source: &str, profile: Profile) -> (SyntaxTree, Vec<ParseError>) {
        let output = tokenize(source, profile);
        TypeScriptParser::new(source, &output.tokens, profile).parse_file()
    }

    #[test]
    fn test_asi_separates_statements() {
        let (tree, errors) = parse("let a = 1\nlet b = a\nb++\n", Profile::TypeScript);
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(tree.items.len(), 3);
    }

    #[test]
    fn test_stray_brace_reports_and_continues() {
        let (tree, errors) = parse("function a() {}\n}\nfunction b() {}", Profile::TypeScript);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), "E-PARSE-003");
        let names: Vec<_> = tree.items.iter().filter_map(|i| i.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_member_after_stray_brace_becomes_stray_member() {
        let source = "class A {\n  x = 1;\n}\n}\n  private helper(): void {}\nfunction after() {}";
        let (tree, errors) = parse(source, Profile::TypeScript);
        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec!["E-PARSE-003", "E-PARSE-008"]);
        assert!(matches!(tree.items[1].kind, ItemKind::StrayMember(_)));
        assert_eq!(tree.items[1].name(), Some("helper"));
        assert_eq!(tree.items[2].name(), Some("after"));
    }

    #[test]
    fn test_enum_members_after_early_close_are_stray() {
        let source = "enum E {\n  A,\n}\n  B = 2\n}\nx = 1;";
        let (tree, errors) = parse(source, Profile::TypeScript);
        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec!["E-PARSE-008", "E-PARSE-003"]);
        assert!(matches!(tree.items[1].kind, ItemKind::StrayEnumMember(_)));
        assert_eq!(tree.items[1].name(), Some("B"));
        assert!(matches!(tree.items[2].kind, ItemKind::Statement(_)));
    }

    #[test]
    fn test_garbage_recovers_at_next_declaration() {
        let source = "const = ;\nclass Kept {}";
        let (tree, errors) = parse(source, Profile::TypeScript);
        assert!(!errors.is_empty());
        assert_eq!(tree.items.last().and_then(|i| i.name()), Some("Kept"));
    }

    #[test]
    fn test_javascript_profile_uses_same_grammar() {
        let source = "export default function App() { return 1; }\nconst f = async (x) => { await x; };";
        let (tree, errors) = parse(source, Profile::JavaScript);
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(tree.profile, Profile::JavaScript);
        assert_eq!(tree.items.len(), 2);
    }
}
