//! Token cursor shared by the profile parsers
//!
//! Trivia is dropped up front; the cursor walks significant tokens only and
//! keeps the errors reported at recovery points.

use tracing::trace;
use unisym_ast::Span;
use unisym_lexer::{Keyword, Token, TokenKind};

use crate::ParseError;

/// Saved cursor state for speculative parsing
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    pos: usize,
    errors: usize,
}

pub struct TokenCursor<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
}

impl<'a> TokenCursor<'a> {
    pub fn new(source: &'a str, tokens: &[Token]) -> Self {
        let mut significant: Vec<Token> = tokens
            .iter()
            .copied()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        if significant.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let end = source.len();
            significant.push(Token::new(TokenKind::Eof, Span::new(end, end)));
        }
        Self {
            source,
            tokens: significant,
            pos: 0,
            errors: Vec::new(),
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    // === Utilities ===

    pub fn current(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn peek(&self) -> TokenKind {
        self.current().kind
    }

    pub fn token_ahead(&self, n: usize) -> Token {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + n).min(last)]
    }

    pub fn peek_ahead(&self, n: usize) -> TokenKind {
        self.token_ahead(n).kind
    }

    /// Step past the current token and return it; `Eof` is never passed
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    pub fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek())
    }

    pub fn at_eof(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn consume(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(kind.describe(), self.peek(), self.span()))
        }
    }

    pub fn at_keyword(&self, keyword: Keyword) -> bool {
        self.peek() == TokenKind::Keyword(keyword)
    }

    pub fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.eat(TokenKind::Keyword(keyword))
    }

    /// Identifier token with exactly this text (contextual keywords)
    pub fn at_word(&self, word: &str) -> bool {
        self.word_ahead(0, word)
    }

    pub fn word_ahead(&self, n: usize, word: &str) -> bool {
        let token = self.token_ahead(n);
        token.kind == TokenKind::Ident && self.text(token) == word
    }

    pub fn eat_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn consume_ident(&mut self) -> Result<(String, Span), ParseError> {
        let token = self.consume(TokenKind::Ident)?;
        Ok((self.text(token).to_string(), token.span))
    }

    pub fn text(&self, token: Token) -> &'a str {
        token.text(self.source)
    }

    pub fn current_text(&self) -> &'a str {
        self.text(self.current())
    }

    pub fn span(&self) -> Span {
        self.current().span
    }

    /// End offset of the last consumed token
    pub fn prev_end(&self) -> usize {
        if self.pos == 0 {
            self.current().span.start
        } else {
            self.tokens[self.pos - 1].span.end
        }
    }

    /// Span from `start` to the end of the last consumed token
    pub fn finish(&self, start: Span) -> Span {
        Span::new(start.start, self.prev_end().max(start.start))
    }

    /// Whether a line break separates the current token from the previous one
    pub fn newline_before(&self) -> bool {
        if self.pos == 0 {
            return false;
        }
        let prev = self.tokens[self.pos - 1].span.end;
        let cur = self.current().span.start;
        self.source
            .get(prev..cur)
            .map_or(false, |gap| gap.contains('\n'))
    }

    /// Whether the token `n` ahead starts exactly where the one before it ends
    pub fn adjacent(&self, n: usize) -> bool {
        n > 0 && self.token_ahead(n - 1).span.end == self.token_ahead(n).span.start
    }

    // === Errors and speculation ===

    pub fn report(&mut self, error: ParseError) {
        trace!(code = error.code(), at = error.span().start, "parse error");
        self.errors.push(error);
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            errors: self.errors.len(),
        }
    }

    /// Return to a checkpoint, dropping errors reported since
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.errors.truncate(checkpoint.errors);
    }

    pub fn errors_since(&self, checkpoint: Checkpoint) -> usize {
        self.errors.len() - checkpoint.errors.min(self.errors.len())
    }

    // === Skipping ===

    /// Skip a bracketed group starting at the current opener
    pub fn skip_balanced(&mut self) -> Result<Span, ParseError> {
        let open = self.current();
        let mut depth = 0usize;
        loop {
            match self.peek() {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return Ok(self.finish(open.span));
                    }
                }
                TokenKind::Eof => {
                    return Err(ParseError::UnbalancedDelimiter {
                        delimiter: self.text(open).chars().next().unwrap_or('('),
                        span: open.span,
                    })
                }
                _ => {}
            }
            self.advance();
            if depth == 0 {
                return Ok(self.finish(open.span));
            }
        }
    }

    /// Skip tokens until one of `terminators` at nesting depth zero, an
    /// unmatched closer, or end of file. Nothing is consumed at the stop.
    /// With `generics`, `<...>` runs that read as type arguments are skipped
    /// as a unit so their commas do not terminate.
    pub fn skip_until(&mut self, terminators: &[TokenKind], generics: bool) -> Span {
        let start = self.span();
        let begin = self.pos;
        let mut depth = 0usize;
        loop {
            let kind = self.peek();
            if kind == TokenKind::Eof || (depth == 0 && terminators.contains(&kind)) {
                break;
            }
            match kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenKind::Lt if generics && self.pos > begin => {
                    if let Some(end) = self.type_args_end(self.pos) {
                        if is_type_args_follower(self.tokens[end].kind) {
                            self.pos = end;
                            continue;
                        }
                    }
                }
                _ => {}
            }
            self.advance();
        }
        if self.pos == begin {
            Span::new(start.start, start.start)
        } else {
            self.finish(start)
        }
    }

    /// Bounded lookahead from a `<` at `from`: index just past the matching
    /// `>` if everything in between can belong to a type argument list
    pub fn type_args_end(&self, from: usize) -> Option<usize> {
        if self.tokens.get(from)?.kind != TokenKind::Lt {
            return None;
        }
        let mut angle = 0usize;
        let mut nested = 0usize;
        for (offset, token) in self.tokens[from..].iter().enumerate().take(256) {
            match token.kind {
                TokenKind::Lt => angle += 1,
                TokenKind::Gt => {
                    angle -= 1;
                    if angle == 0 {
                        return Some(from + offset + 1);
                    }
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => nested += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if nested == 0 {
                        return None;
                    }
                    nested -= 1;
                }
                TokenKind::Semicolon | TokenKind::Colon if nested > 0 => {}
                TokenKind::Ident
                | TokenKind::Keyword(_)
                | TokenKind::Dot
                | TokenKind::Comma
                | TokenKind::Question
                | TokenKind::ColonColon
                | TokenKind::Pipe
                | TokenKind::Amp
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::Star
                | TokenKind::FatArrow
                | TokenKind::Ellipsis
                | TokenKind::Minus => {}
                _ => return None,
            }
        }
        None
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn kind_at(&self, index: usize) -> TokenKind {
        self.tokens
            .get(index)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Skip to a synchronization point at nesting depth zero: a `;` (consumed),
    /// a block closed during the skip (consumed), a `}` closing the enclosing
    /// scope (left in place), or a token accepted by `is_sync` after at least
    /// one token of progress
    pub fn recover(&mut self, is_sync: impl Fn(&TokenCursor<'a>) -> bool) {
        let begin = self.pos;
        let mut depth = 0usize;
        loop {
            match self.peek() {
                TokenKind::Eof => break,
                TokenKind::RBrace if depth == 0 => break,
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    break;
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        break;
                    }
                }
                TokenKind::RParen | TokenKind::RBracket => depth = depth.saturating_sub(1),
                _ if depth == 0 && self.pos != begin && is_sync(self) => break,
                _ => {}
            }
            self.advance();
        }
        trace!(skipped = self.pos - begin, at = self.span().start, "resynchronized");
    }
}

/// Tokens that may follow a type argument list in expression position
pub fn is_type_args_follower(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LParen
            | TokenKind::LBrace
            | TokenKind::Semicolon
            | TokenKind::Comma
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::Dot
            | TokenKind::Eof
    )
}
