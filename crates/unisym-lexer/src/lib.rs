//! unisym Lexer - mode-aware tokenization on top of logos
//!
//! One driver serves every profile. Context-free tokens come from the logos
//! table in `raw`; strings, templates, comments, regex literals and markup
//! are scanned by hand because their meaning depends on the mode stack.
//!
//! The output is lossless: every byte of the input belongs to exactly one
//! token, trivia included. Input that matches nothing becomes an `Unknown`
//! token plus a `LexError`, and lexing carries on.

mod error;
mod mode;
mod raw;
mod token;

pub use error::LexError;
pub use mode::{InterpolationKind, Mode, ModeStack};
pub use token::*;

use logos::Logos;
use raw::RawToken;
use unisym_ast::{Profile, Span};

/// Tokens (ending with `Eof`) plus the problems found on the way
#[derive(Debug, Clone)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    /// Tokens that are not trivia, `Eof` included
    pub fn significant(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| !t.kind.is_trivia())
    }
}

/// Tokenize `source` under the lexical rules of `profile`
pub fn tokenize(source: &str, profile: Profile) -> LexOutput {
    Lexer::new(source, profile).run()
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_valid_csharp_escape(c: char) -> bool {
    matches!(
        c,
        '\'' | '"' | '\\' | '0' | 'a' | 'b' | 'e' | 'f' | 'n' | 'r' | 't' | 'v' | 'u' | 'U' | 'x'
    )
}

struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    profile: Profile,
    pos: usize,
    modes: ModeStack,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
    /// Last non-trivia token kind
    last: Option<TokenKind>,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str, profile: Profile) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            profile,
            pos: 0,
            modes: ModeStack::new(),
            tokens: Vec::new(),
            errors: Vec::new(),
            last: None,
        }
    }

    fn run(mut self) -> LexOutput {
        self.lex_all();

        let end = self.bytes.len();
        let eof = Span::new(end, end);
        if self.modes.in_markup() {
            self.errors.push(LexError::UnclosedMarkup { span: eof });
        } else if self.modes.in_interpolation() {
            self.errors.push(LexError::UnterminatedTemplate { span: eof });
        }

        self.tokens.push(Token::new(TokenKind::Eof, eof));
        LexOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn lex_all(&mut self) {
        while self.pos < self.bytes.len() {
            match self.modes.current() {
                Mode::Default { .. } | Mode::MarkupExpressionContainer { .. } => self.lex_code(),
                Mode::StringInterpolation { kind } => self.lex_string_resume(kind),
                Mode::MarkupTag { closing } => self.lex_tag(closing),
                Mode::MarkupText => self.lex_markup_text(),
            }
        }
    }

    // ===== Helpers =====

    fn byte(&self, at: usize) -> Option<u8> {
        self.bytes.get(at).copied()
    }

    fn char_at(&self, at: usize) -> Option<char> {
        self.source.get(at..).and_then(|s| s.chars().next())
    }

    fn char_len_at(&self, at: usize) -> usize {
        self.char_at(at).map_or(1, char::len_utf8)
    }

    fn emit(&mut self, kind: TokenKind, start: usize) {
        self.pos = self.pos.min(self.bytes.len());
        self.tokens.push(Token::new(kind, Span::new(start, self.pos)));
        if !kind.is_trivia() {
            self.last = Some(kind);
        }
    }

    fn emit_single(&mut self, kind: TokenKind, start: usize) {
        self.pos = start + 1;
        self.emit(kind, start);
    }

    fn expects_operand(&self) -> bool {
        self.last.map_or(true, |kind| kind.expects_operand())
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.char_at(self.pos) {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn line_end(&self, from: usize) -> usize {
        self.bytes[from..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.bytes.len(), |i| from + i)
    }

    fn at_line_start(&self, at: usize) -> bool {
        self.bytes[..at]
            .iter()
            .rev()
            .find(|&&b| b != b' ' && b != b'\t')
            .map_or(true, |&b| b == b'\n')
    }

    // ===== Code mode =====

    fn lex_code(&mut self) {
        let start = self.pos;
        let Some(c) = self.char_at(start) else {
            self.pos = self.bytes.len();
            return;
        };
        let next = self.byte(start + 1);
        let script = self.profile.is_script();

        match c {
            '/' if next == Some(b'/') => self.lex_line_comment(start),
            '/' if next == Some(b'*') => self.lex_block_comment(start),
            '/' if script && self.expects_operand() => self.lex_regex(start),
            '#' if script && start == 0 && next == Some(b'!') => self.lex_line_comment(start),
            '#' if script && self.char_at(start + 1).is_some_and(is_ident_start) => {
                self.pos = start + 1;
                self.eat_while(is_ident_continue);
                self.emit(TokenKind::PrivateName, start);
            }
            '#' if !script && self.at_line_start(start) => {
                self.pos = self.line_end(start);
                self.emit(TokenKind::Directive, start);
            }
            '"' | '\'' if script => self.lex_script_string(start, c as u8),
            '`' if script => {
                self.pos = start + 1;
                self.lex_string_body(InterpolationKind::Template, start, true);
            }
            '"' if !script => self.lex_csharp_string(start),
            '\'' if !script => self.lex_csharp_char(start),
            '@' | '$' if !script && self.lex_csharp_prefixed(start) => {}
            '{' => self.open_brace(start),
            '}' => self.close_brace(start),
            '<' if self.profile.supports_markup() && self.markup_starts_here(start) => {
                self.emit_single(TokenKind::TagOpen, start);
                self.modes.push(Mode::MarkupTag { closing: false });
            }
            _ => self.lex_raw(start),
        }
    }

    fn lex_raw(&mut self, start: usize) {
        let source = self.source;
        let mut lexer = RawToken::lexer(&source[start..]);
        match lexer.next() {
            Some(Ok(raw)) => {
                self.pos = start + lexer.span().end;
                let mut kind = TokenKind::from_raw(raw);
                if kind == TokenKind::Ident {
                    if let Some(kw) = Keyword::lookup(&self.source[start..self.pos], self.profile) {
                        kind = TokenKind::Keyword(kw);
                    }
                }
                self.emit(kind, start);
            }
            _ => self.unexpected_char(start),
        }
    }

    fn unexpected_char(&mut self, start: usize) {
        let ch = self.char_at(start).unwrap_or('\u{FFFD}');
        self.pos = start + ch.len_utf8();
        self.emit(TokenKind::Unknown, start);
        self.errors.push(LexError::UnexpectedChar {
            ch,
            span: Span::new(start, self.pos),
        });
    }

    fn open_brace(&mut self, start: usize) {
        match self.modes.current() {
            Mode::Default { braces } => self.modes.replace(Mode::Default { braces: braces + 1 }),
            Mode::MarkupExpressionContainer { braces } => {
                self.modes
                    .replace(Mode::MarkupExpressionContainer { braces: braces + 1 })
            }
            _ => {}
        }
        self.emit_single(TokenKind::LBrace, start);
    }

    fn close_brace(&mut self, start: usize) {
        match self.modes.current() {
            Mode::Default { braces } if braces > 0 => {
                self.modes.replace(Mode::Default { braces: braces - 1 });
            }
            Mode::Default { .. } if self.modes.depth() > 1 => {
                // Closes an interpolation hole; the string scanner takes the `}`
                self.modes.pop();
                if matches!(self.modes.current(), Mode::StringInterpolation { .. }) {
                    return;
                }
            }
            Mode::MarkupExpressionContainer { braces } if braces > 0 => {
                self.modes
                    .replace(Mode::MarkupExpressionContainer { braces: braces - 1 });
            }
            Mode::MarkupExpressionContainer { .. } => {
                self.modes.pop();
            }
            _ => {}
        }
        self.emit_single(TokenKind::RBrace, start);
    }

    fn lex_line_comment(&mut self, start: usize) {
        self.pos = self.line_end(start);
        self.emit(TokenKind::LineComment, start);
    }

    fn lex_block_comment(&mut self, start: usize) {
        match self.source[start + 2..].find("*/") {
            Some(offset) => {
                self.pos = start + 2 + offset + 2;
                self.emit(TokenKind::BlockComment, start);
            }
            None => {
                self.pos = self.bytes.len();
                self.emit(TokenKind::Unknown, start);
                self.errors.push(LexError::UnterminatedComment {
                    span: Span::new(start, self.pos),
                });
            }
        }
    }

    /// `/.../flags` in operand position; falls back to `/` if the line ends first
    fn lex_regex(&mut self, start: usize) {
        let mut i = start + 1;
        let mut in_class = false;
        loop {
            match self.byte(i) {
                None | Some(b'\n') => return self.lex_raw(start),
                Some(b'\\') => i += 1 + self.char_len_at(i + 1),
                Some(b'[') => {
                    in_class = true;
                    i += 1;
                }
                Some(b']') => {
                    in_class = false;
                    i += 1;
                }
                Some(b'/') if !in_class => {
                    i += 1;
                    break;
                }
                Some(_) => i += self.char_len_at(i),
            }
        }
        self.pos = i;
        self.eat_while(is_ident_continue);
        self.emit(TokenKind::Regex, start);
    }

    fn lex_script_string(&mut self, start: usize, quote: u8) {
        let mut i = start + 1;
        loop {
            match self.byte(i) {
                None | Some(b'\n') => {
                    self.pos = i;
                    return self.unterminated(start, |span| LexError::UnterminatedString { span });
                }
                Some(b'\\') => i += 1 + self.char_len_at(i + 1),
                Some(b) if b == quote => {
                    i += 1;
                    break;
                }
                Some(_) => i += self.char_len_at(i),
            }
        }
        self.pos = i;
        self.emit(TokenKind::String, start);
    }

    /// Emit an `Unknown` token up to `self.pos` and record the error over it
    fn unterminated(&mut self, start: usize, error: impl FnOnce(Span) -> LexError) {
        self.emit(TokenKind::Unknown, start);
        self.errors.push(error(Span::new(start, self.pos)));
    }

    // ===== Strings with holes =====

    /// Continue a string after the `}` that closed a hole
    fn lex_string_resume(&mut self, kind: InterpolationKind) {
        let start = self.pos;
        self.pos = start + 1;
        self.lex_string_body(kind, start, false);
    }

    /// Scan string text from `self.pos` up to the closing delimiter or the
    /// next hole. `head` is true for the first segment of the string.
    fn lex_string_body(&mut self, kind: InterpolationKind, start: usize, head: bool) {
        let mut i = self.pos;
        loop {
            let Some(b) = self.byte(i) else {
                return self.unterminated_string_body(kind, start, i, head);
            };
            match kind {
                InterpolationKind::Template => match b {
                    b'\\' => i += 1 + self.char_len_at(i + 1),
                    b'`' => return self.end_string_body(start, i + 1, head),
                    b'$' if self.byte(i + 1) == Some(b'{') => {
                        return self.open_hole(kind, start, i + 2, head)
                    }
                    _ => i += self.char_len_at(i),
                },
                InterpolationKind::CSharp { verbatim } => match b {
                    b'\\' if !verbatim => i += 1 + self.char_len_at(i + 1),
                    b'"' if verbatim && self.byte(i + 1) == Some(b'"') => i += 2,
                    b'"' => return self.end_string_body(start, i + 1, head),
                    b'{' if self.byte(i + 1) == Some(b'{') => i += 2,
                    b'}' if self.byte(i + 1) == Some(b'}') => i += 2,
                    b'{' => return self.open_hole(kind, start, i + 1, head),
                    b'\n' if !verbatim => {
                        return self.unterminated_string_body(kind, start, i, head)
                    }
                    _ => i += self.char_len_at(i),
                },
            }
        }
    }

    fn end_string_body(&mut self, start: usize, end: usize, head: bool) {
        self.pos = end;
        if head {
            self.emit(TokenKind::Template, start);
        } else {
            self.modes.pop();
            self.emit(TokenKind::TemplateTail, start);
        }
    }

    fn open_hole(&mut self, kind: InterpolationKind, start: usize, end: usize, head: bool) {
        self.pos = end;
        if head {
            self.emit(TokenKind::TemplateHead, start);
            self.modes.push(Mode::StringInterpolation { kind });
        } else {
            self.emit(TokenKind::TemplateMiddle, start);
        }
        self.modes.push(Mode::Default { braces: 0 });
    }

    fn unterminated_string_body(&mut self, kind: InterpolationKind, start: usize, end: usize, head: bool) {
        self.pos = end;
        if !head {
            self.modes.pop();
        }
        match kind {
            InterpolationKind::Template => {
                self.unterminated(start, |span| LexError::UnterminatedTemplate { span })
            }
            InterpolationKind::CSharp { .. } => {
                self.unterminated(start, |span| LexError::UnterminatedString { span })
            }
        }
    }

    // ===== C# literals =====

    fn lex_csharp_string(&mut self, start: usize) {
        if self.count_quotes(start) >= 3 {
            return self.lex_raw_string(start, start);
        }
        let mut i = start + 1;
        loop {
            match self.byte(i) {
                None | Some(b'\n') => {
                    self.pos = i;
                    return self.unterminated(start, |span| LexError::UnterminatedString { span });
                }
                Some(b'\\') if matches!(self.byte(i + 1), None | Some(b'\n')) => i += 1,
                Some(b'\\') => {
                    let escaped = self.char_at(i + 1).unwrap_or('\\');
                    let end = i + 1 + escaped.len_utf8();
                    if !is_valid_csharp_escape(escaped) {
                        self.errors.push(LexError::InvalidEscape {
                            sequence: format!("\\{}", escaped),
                            span: Span::new(i, end),
                        });
                    }
                    i = end;
                }
                Some(b'"') => {
                    i += 1;
                    break;
                }
                Some(_) => i += self.char_len_at(i),
            }
        }
        self.pos = i;
        self.emit(TokenKind::String, start);
    }

    fn count_quotes(&self, from: usize) -> usize {
        self.bytes[from..].iter().take_while(|&&b| b == b'"').count()
    }

    /// `"""..."""` with any number of quotes (three or more)
    fn lex_raw_string(&mut self, start: usize, quotes_at: usize) {
        let quotes = self.count_quotes(quotes_at);
        let body = quotes_at + quotes;
        let closer = "\"".repeat(quotes);
        match self.source[body..].find(&closer) {
            Some(offset) => {
                self.pos = body + offset + quotes;
                self.emit(TokenKind::String, start);
            }
            None => {
                self.pos = self.bytes.len();
                self.unterminated(start, |span| LexError::UnterminatedString { span });
            }
        }
    }

    fn lex_verbatim_string(&mut self, start: usize, body: usize) {
        let mut i = body;
        loop {
            match self.byte(i) {
                None => {
                    self.pos = i;
                    return self.unterminated(start, |span| LexError::UnterminatedString { span });
                }
                Some(b'"') if self.byte(i + 1) == Some(b'"') => i += 2,
                Some(b'"') => {
                    i += 1;
                    break;
                }
                Some(_) => i += self.char_len_at(i),
            }
        }
        self.pos = i;
        self.emit(TokenKind::String, start);
    }

    fn lex_csharp_char(&mut self, start: usize) {
        let mut i = start + 1;
        loop {
            match self.byte(i) {
                None | Some(b'\n') => {
                    self.pos = i;
                    return self.unterminated(start, |span| LexError::UnterminatedChar { span });
                }
                Some(b'\\') if matches!(self.byte(i + 1), None | Some(b'\n')) => i += 1,
                Some(b'\\') => i += 1 + self.char_len_at(i + 1),
                Some(b'\'') => {
                    i += 1;
                    break;
                }
                Some(_) => i += self.char_len_at(i),
            }
        }
        self.pos = i;
        self.emit(TokenKind::Char, start);
    }

    /// `@"..."`, `$"..."`, `$@"..."`, `@$"..."`, `$"""..."""` and `@ident`.
    /// Returns false when `@`/`$` start none of these.
    fn lex_csharp_prefixed(&mut self, start: usize) -> bool {
        match (self.byte(start), self.byte(start + 1), self.byte(start + 2)) {
            (Some(b'@'), Some(b'"'), _) => self.lex_verbatim_string(start, start + 2),
            (Some(b'$'), Some(b'@'), Some(b'"')) | (Some(b'@'), Some(b'$'), Some(b'"')) => {
                self.pos = start + 3;
                self.lex_string_body(InterpolationKind::CSharp { verbatim: true }, start, true);
            }
            (Some(b'$'), _, _) => {
                let dollars = self.bytes[start..].iter().take_while(|&&b| b == b'$').count();
                let quotes_at = start + dollars;
                if self.count_quotes(quotes_at) >= 3 {
                    self.lex_raw_string(start, quotes_at);
                } else if dollars == 1 && self.byte(quotes_at) == Some(b'"') {
                    self.pos = quotes_at + 1;
                    self.lex_string_body(InterpolationKind::CSharp { verbatim: false }, start, true);
                } else {
                    return false;
                }
            }
            (Some(b'@'), _, _) if self.char_at(start + 1).is_some_and(is_ident_start) => {
                self.pos = start + 1;
                self.eat_while(is_ident_continue);
                self.emit(TokenKind::Ident, start);
            }
            _ => return false,
        }
        true
    }

    // ===== Markup =====

    /// `<` opens markup in operand position when followed by a tag name or
    /// `>`. `<T,` and `<T extends` open type parameters instead.
    fn markup_starts_here(&self, start: usize) -> bool {
        if !self.expects_operand() {
            return false;
        }
        match self.char_at(start + 1) {
            Some('>') => true,
            Some(c) if is_ident_start(c) => {
                let mut i = start + 1;
                while let Some(c) = self.char_at(i).filter(|&c| is_ident_continue(c)) {
                    i += c.len_utf8();
                }
                while let Some(c) = self.char_at(i).filter(|c| c.is_whitespace()) {
                    i += c.len_utf8();
                }
                self.byte(i) != Some(b',') && !self.source[i..].starts_with("extends ")
            }
            _ => false,
        }
    }

    fn lex_tag(&mut self, closing: bool) {
        let start = self.pos;
        let Some(c) = self.char_at(start) else {
            self.pos = self.bytes.len();
            return;
        };
        let next = self.byte(start + 1);

        match c {
            c if c.is_whitespace() => {
                self.eat_while(char::is_whitespace);
                self.emit(TokenKind::Whitespace, start);
            }
            '/' if next == Some(b'/') => self.lex_line_comment(start),
            '/' if next == Some(b'*') => self.lex_block_comment(start),
            '/' if next == Some(b'>') && self.last != Some(TokenKind::TagOpen) => {
                self.emit_single(TokenKind::Slash, start);
                self.emit_single(TokenKind::Gt, start + 1);
                self.modes.pop();
            }
            '/' => {
                self.emit_single(TokenKind::Slash, start);
                self.modes.replace(Mode::MarkupTag { closing: true });
            }
            '>' => {
                self.emit_single(TokenKind::Gt, start);
                if closing {
                    self.modes.pop();
                    if self.modes.current() == Mode::MarkupText {
                        self.modes.pop();
                    }
                } else {
                    self.modes.replace(Mode::MarkupText);
                }
            }
            '{' => {
                self.emit_single(TokenKind::LBrace, start);
                self.modes.push(Mode::MarkupExpressionContainer { braces: 0 });
            }
            '"' | '\'' => {
                let quote = c as u8;
                match self.bytes[start + 1..].iter().position(|&b| b == quote) {
                    Some(offset) => {
                        self.pos = start + 1 + offset + 1;
                        self.emit(TokenKind::String, start);
                    }
                    None => {
                        self.pos = self.bytes.len();
                        self.unterminated(start, |span| LexError::UnterminatedString { span });
                    }
                }
            }
            '=' => self.emit_single(TokenKind::Eq, start),
            '.' => self.emit_single(TokenKind::Dot, start),
            ':' => self.emit_single(TokenKind::Colon, start),
            c if is_ident_start(c) => {
                self.eat_while(|c| is_ident_continue(c) || c == '-');
                self.emit(TokenKind::Ident, start);
            }
            _ => self.unexpected_char(start),
        }
    }

    fn lex_markup_text(&mut self) {
        let start = self.pos;
        match self.byte(start) {
            Some(b'<') => {
                self.emit_single(TokenKind::TagOpen, start);
                self.modes.push(Mode::MarkupTag { closing: false });
            }
            Some(b'{') => {
                self.emit_single(TokenKind::LBrace, start);
                self.modes.push(Mode::MarkupExpressionContainer { braces: 0 });
            }
            _ => {
                let len = self.bytes[start..]
                    .iter()
                    .position(|&b| b == b'<' || b == b'{')
                    .unwrap_or(self.bytes.len() - start);
                self.pos = start + len;
                self.emit(TokenKind::MarkupText, start);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str, profile: Profile) -> Vec<TokenKind> {
        tokenize(source, profile).significant().map(|t| t.kind).collect()
    }

    fn assert_lossless(source: &str, profile: Profile) {
        let output = tokenize(source, profile);
        let rebuilt: String = output.tokens.iter().map(|t| t.text(source)).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_csharp_keywords_and_identifiers() {
        let kinds = kinds("public class A : B { int x; }", Profile::CSharp);
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Public),
                TokenKind::Keyword(Keyword::Class),
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::LBrace,
                TokenKind::Keyword(Keyword::Int),
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_contextual_words_stay_identifiers() {
        let kinds = kinds("type get async namespace", Profile::TypeScript);
        assert!(kinds[..4].iter().all(|k| *k == TokenKind::Ident));
    }

    #[test]
    fn test_template_holes_nest_braces() {
        let kinds = kinds("`a ${b} c ${ {x:1}.x } d`", Profile::TypeScript);
        assert_eq!(
            kinds,
            vec![
                TokenKind::TemplateHead,
                TokenKind::Ident,
                TokenKind::TemplateMiddle,
                TokenKind::LBrace,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Number,
                TokenKind::RBrace,
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::TemplateTail,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_csharp_interpolated_string() {
        let source = "return $\"Hello, {name}\";";
        let output = tokenize(source, Profile::CSharp);
        let texts: Vec<_> = output.significant().map(|t| t.text(source)).collect();
        assert_eq!(texts, vec!["return", "$\"Hello, {", "name", "}\"", ";", ""]);
        assert!(output.errors.is_empty());
    }

    #[test]
    fn test_regex_versus_division() {
        let kinds = kinds("let r = /ab+c/gi; let d = a / b;", Profile::TypeScript);
        assert_eq!(kinds[3], TokenKind::Regex);
        assert!(kinds.contains(&TokenKind::Slash));
    }

    #[test]
    fn test_csharp_string_forms() {
        let output = tokenize(r#"var a = @"C:\path"; var b = "x\q";"#, Profile::CSharp);
        let strings = output
            .significant()
            .filter(|t| t.kind == TokenKind::String)
            .count();
        assert_eq!(strings, 2);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].code(), "E-LEX-005");
    }

    #[test]
    fn test_unterminated_string_recovers_on_next_line() {
        let source = "let a = \"oops\nlet b = 1;";
        let output = tokenize(source, Profile::TypeScript);
        assert!(matches!(output.errors[0], LexError::UnterminatedString { .. }));
        let kinds: Vec<_> = output.significant().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::Unknown));
        assert_eq!(kinds[kinds.len() - 2], TokenKind::Semicolon);
        assert_lossless(source, Profile::TypeScript);
    }

    #[test]
    fn test_unterminated_comment() {
        let output = tokenize("a /* never closed", Profile::CSharp);
        assert_eq!(output.errors[0].code(), "E-LEX-003");
    }

    #[test]
    fn test_markup_modes() {
        let source = "const a = <div className=\"x\">{n > 1 && <b>hi</b>}</div>;";
        let output = tokenize(source, Profile::TypeScriptMarkup);
        assert!(output.errors.is_empty());
        let kinds: Vec<_> = output.significant().map(|t| t.kind).collect();
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::TagOpen).count(), 4);
        assert!(kinds.contains(&TokenKind::MarkupText));
        assert_eq!(kinds[kinds.len() - 2], TokenKind::Semicolon);
        assert_lossless(source, Profile::TypeScriptMarkup);
    }

    #[test]
    fn test_fragment_and_self_closing() {
        let source = "x = <><hr /><p>t</p></>;";
        let output = tokenize(source, Profile::TypeScriptMarkup);
        assert!(output.errors.is_empty());
        let kinds: Vec<_> = output.significant().map(|t| t.kind).collect();
        assert_eq!(kinds[kinds.len() - 2], TokenKind::Semicolon);
    }

    #[test]
    fn test_markup_closers_return_to_code_mode() {
        for source in ["x = <></>", "x = <a></a>", "x = <a/>", "x = <><a/><b></b></>"] {
            let mut lexer = Lexer::new(source, Profile::TypeScriptMarkup);
            lexer.lex_all();
            assert_eq!(lexer.modes.depth(), 1, "{}", source);
            assert_eq!(lexer.modes.current(), Mode::Default { braces: 0 }, "{}", source);
            assert!(lexer.errors.is_empty(), "{}", source);
        }
    }

    #[test]
    fn test_empty_fragment_close_is_not_self_closing() {
        let kinds = kinds("x = <></>; y = 1;", Profile::TypeScriptMarkup);
        assert_eq!(
            &kinds[2..8],
            &[
                TokenKind::TagOpen,
                TokenKind::Gt,
                TokenKind::TagOpen,
                TokenKind::Slash,
                TokenKind::Gt,
                TokenKind::Semicolon
            ]
        );
        assert!(!kinds.contains(&TokenKind::MarkupText));
    }

    #[test]
    fn test_generics_are_not_markup() {
        let kinds = kinds("useState<number>(0); const f = <T,>(x: T) => x;", Profile::TypeScriptMarkup);
        assert!(!kinds.contains(&TokenKind::TagOpen));
        assert!(kinds.contains(&TokenKind::Lt));
    }

    #[test]
    fn test_markup_disabled_without_markup_profile() {
        let kinds = kinds("x = <div/>", Profile::TypeScript);
        assert!(!kinds.contains(&TokenKind::TagOpen));
    }

    #[test]
    fn test_unclosed_markup_is_reported() {
        let output = tokenize("let a = <div>", Profile::TypeScriptMarkup);
        assert!(matches!(output.errors[0], LexError::UnclosedMarkup { .. }));
    }

    #[test]
    fn test_directives_are_trivia() {
        let source = "#region Demo\nclass A { }\n  #endregion\n";
        let output = tokenize(source, Profile::CSharp);
        let directives = output
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Directive)
            .count();
        assert_eq!(directives, 2);
        assert_lossless(source, Profile::CSharp);
    }

    #[test]
    fn test_stray_closing_brace_is_a_token() {
        let kinds = kinds("} }", Profile::TypeScript);
        assert_eq!(kinds, vec![TokenKind::RBrace, TokenKind::RBrace, TokenKind::Eof]);
    }

    #[test]
    fn test_unknown_character() {
        let output = tokenize("a ¤ b", Profile::TypeScript);
        assert_eq!(output.errors.len(), 1);
        assert_lossless("a ¤ b", Profile::TypeScript);
    }

    #[test]
    fn test_lossless_across_profiles() {
        let samples = [
            ("using System;\nclass A { string S => $@\"{x}\"\"q\"\"\"; char c = '\\n'; }", Profile::CSharp),
            ("const s = `x ${`y ${z}`}`; // done\n/* c */ a?.b ?? c;", Profile::TypeScript),
            ("const v = <A b={{ c: 1 }} {...rest}>text {/* note */}</A>;", Profile::TypeScriptMarkup),
            ("class P { #secret = 1; }", Profile::JavaScript),
        ];
        for (source, profile) in samples {
            assert_lossless(source, profile);
        }
    }
}
