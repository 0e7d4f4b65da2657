//! Statements and blocks

use unisym_ast::*;
use unisym_lexer::{Keyword, TokenKind};

use super::expr::expr_to_pattern;
use super::{is_statement_start, TypeScriptParser};
use crate::ParseError;

impl<'a> TypeScriptParser<'a> {
    pub(super) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.span();
        if self.at(TokenKind::At) {
            self.skip_decorators()?;
        }
        if let Some(stmt) = self.parse_declaration(start, Vec::new())? {
            return Ok(stmt);
        }

        match self.peek() {
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                Ok(Stmt {
                    kind: StmtKind::Block(block),
                    span: self.finish(start),
                })
            }
            TokenKind::Semicolon => {
                self.advance();
                Ok(self.stmt(start, StmtKind::Empty))
            }
            TokenKind::Keyword(Keyword::Import)
                if !matches!(self.peek_ahead(1), TokenKind::LParen | TokenKind::Dot) =>
            {
                self.parse_import(start)
            }
            TokenKind::Keyword(Keyword::Export) => self.parse_export(start),
            TokenKind::Keyword(Keyword::If) => self.parse_if(start),
            TokenKind::Keyword(Keyword::For) => self.parse_for(start),
            TokenKind::Keyword(Keyword::While) => {
                self.advance();
                let cond = self.parse_condition()?;
                let body = Box::new(self.parse_statement()?);
                Ok(self.stmt(start, StmtKind::While { cond, body }))
            }
            TokenKind::Keyword(Keyword::Do) => {
                self.advance();
                let body = Box::new(self.parse_statement()?);
                self.consume(TokenKind::Keyword(Keyword::While))?;
                let cond = self.parse_condition()?;
                self.eat(TokenKind::Semicolon);
                Ok(self.stmt(start, StmtKind::DoWhile { body, cond }))
            }
            TokenKind::Keyword(Keyword::Return) => {
                self.advance();
                let argument = if self.at_statement_end() {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.consume_semicolon()?;
                Ok(self.stmt(start, StmtKind::Return(argument)))
            }
            TokenKind::Keyword(Keyword::Throw) => {
                self.advance();
                let argument = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(self.stmt(start, StmtKind::Throw(argument)))
            }
            TokenKind::Keyword(Keyword::Try) => self.parse_try(start),
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch(start),
            TokenKind::Keyword(Keyword::Break) => {
                self.advance();
                let label = self.parse_jump_label()?;
                Ok(self.stmt(start, StmtKind::Break(label)))
            }
            TokenKind::Keyword(Keyword::Continue) => {
                self.advance();
                let label = self.parse_jump_label()?;
                Ok(self.stmt(start, StmtKind::Continue(label)))
            }
            TokenKind::Keyword(Keyword::Debugger) => {
                self.advance();
                self.consume_semicolon()?;
                Ok(self.stmt(start, StmtKind::Empty))
            }
            TokenKind::Ident if self.peek_ahead(1) == TokenKind::Colon => {
                let (label, _) = self.consume_ident()?;
                self.advance();
                let body = Box::new(self.parse_statement()?);
                Ok(self.stmt(start, StmtKind::Labeled { label, body }))
            }
            _ => {
                let expr = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(self.stmt(start, StmtKind::Expr(expr)))
            }
        }
    }

    fn stmt(&self, start: Span, kind: StmtKind) -> Stmt {
        Stmt {
            kind,
            span: self.finish(start),
        }
    }

    /// `{ ... }`; an unclosed block is reported and returned as far as it goes
    pub(super) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.consume(TokenKind::LBrace)?;
        let stmts = self.parse_statement_list(false);
        if !self.eat(TokenKind::RBrace) {
            self.report(ParseError::UnbalancedDelimiter {
                delimiter: '{',
                span: open.span,
            });
        }
        Ok(Block {
            stmts,
            span: self.finish(open.span),
        })
    }

    /// Statements up to a closing `}` (or the next `case` inside a switch)
    fn parse_statement_list(&mut self, in_switch: bool) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        loop {
            if self.at_any(&[TokenKind::RBrace, TokenKind::Eof]) {
                break;
            }
            if in_switch && (self.at_keyword(Keyword::Case) || self.at_keyword(Keyword::Default)) {
                break;
            }
            let start = self.span();
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(error) => {
                    self.report(error);
                    self.recover(is_statement_start);
                    stmts.push(self.stmt(start, StmtKind::Error));
                }
            }
        }
        stmts
    }

    fn at_statement_end(&self) -> bool {
        self.at_any(&[TokenKind::Semicolon, TokenKind::RBrace, TokenKind::Eof]) || self.newline_before()
    }

    fn parse_jump_label(&mut self) -> Result<Option<String>, ParseError> {
        let label = if self.at(TokenKind::Ident) && !self.newline_before() {
            Some(self.consume_ident()?.0)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(label)
    }

    /// Parenthesized condition of `if`, `while` and `do`
    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.consume(TokenKind::LParen)?;
        let cond = self.with_in(|p| p.parse_expression())?;
        self.consume(TokenKind::RParen)?;
        Ok(cond)
    }

    fn parse_if(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.advance();
        let cond = self.parse_condition()?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(self.stmt(
            start,
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
        ))
    }

    /// Run `f` with `in` suspended as a binary operator
    fn without_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.no_in, true);
        let result = f(self);
        self.no_in = saved;
        result
    }

    fn parse_for(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.advance();
        let is_await = self.eat_word("await");
        self.consume(TokenKind::LParen)?;

        let init = if self.at(TokenKind::Semicolon) {
            None
        } else if self.at_any(&[
            TokenKind::Keyword(Keyword::Var),
            TokenKind::Keyword(Keyword::Let),
            TokenKind::Keyword(Keyword::Const),
        ]) {
            let decl_start = self.span();
            let decl = self.without_in(|p| p.parse_var_decl(Vec::new()))?;
            if self.at_for_each() {
                return self.parse_for_each(start, ForBinding::Decl(decl), is_await);
            }
            Some(Box::new(self.stmt(decl_start, StmtKind::Var(decl))))
        } else {
            let expr_start = self.span();
            let expr = self.without_in(|p| p.parse_expression())?;
            if self.at_for_each() {
                return self.parse_for_each(start, ForBinding::Pattern(expr_to_pattern(expr)), is_await);
            }
            Some(Box::new(self.stmt(expr_start, StmtKind::Expr(expr))))
        };

        self.consume(TokenKind::Semicolon)?;
        let test = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.with_in(|p| p.parse_expression())?)
        };
        self.consume(TokenKind::Semicolon)?;
        let update = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(self.with_in(|p| p.parse_expression())?)
        };
        self.consume(TokenKind::RParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(self.stmt(
            start,
            StmtKind::For {
                init,
                test,
                update,
                body,
            },
        ))
    }

    fn at_for_each(&self) -> bool {
        self.at_keyword(Keyword::In) || self.at_word("of")
    }

    fn parse_for_each(&mut self, start: Span, binding: ForBinding, is_await: bool) -> Result<Stmt, ParseError> {
        let is_of = self.at_word("of");
        self.advance();
        let iterable = if is_of {
            self.with_in(|p| p.parse_assignment())?
        } else {
            self.with_in(|p| p.parse_expression())?
        };
        self.consume(TokenKind::RParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(self.stmt(
            start,
            StmtKind::ForEach {
                binding,
                iterable,
                is_of,
                is_await,
                body,
            },
        ))
    }

    fn parse_try(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.advance();
        let block = self.parse_block()?;
        let handler = if self.at_keyword(Keyword::Catch) {
            let catch_start = self.span();
            self.advance();
            let param = if self.eat(TokenKind::LParen) {
                let pattern = self.parse_binding_pattern()?;
                if self.eat(TokenKind::Colon) {
                    self.parse_type()?;
                }
                self.consume(TokenKind::RParen)?;
                Some(pattern)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause {
                param,
                body,
                span: self.finish(catch_start),
            })
        } else {
            None
        };
        let finalizer = if self.eat_keyword(Keyword::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(ParseError::unexpected("'catch' or 'finally'", self.peek(), self.span()));
        }
        Ok(self.stmt(
            start,
            StmtKind::Try {
                block,
                handler,
                finalizer,
            },
        ))
    }

    fn parse_switch(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.advance();
        let discriminant = self.parse_condition()?;
        let open = self.consume(TokenKind::LBrace)?;
        let mut cases = Vec::new();
        while !self.at_any(&[TokenKind::RBrace, TokenKind::Eof]) {
            let case_start = self.span();
            let test = if self.eat_keyword(Keyword::Case) {
                Some(self.with_in(|p| p.parse_expression())?)
            } else {
                self.consume(TokenKind::Keyword(Keyword::Default))?;
                None
            };
            self.consume(TokenKind::Colon)?;
            let body = self.parse_statement_list(true);
            cases.push(SwitchCase {
                test,
                body,
                span: self.finish(case_start),
            });
        }
        if !self.eat(TokenKind::RBrace) {
            self.report(ParseError::UnbalancedDelimiter {
                delimiter: '{',
                span: open.span,
            });
        }
        Ok(self.stmt(start, StmtKind::Switch { discriminant, cases }))
    }
}
