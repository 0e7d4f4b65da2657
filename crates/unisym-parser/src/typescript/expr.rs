//! Expressions and binding patterns

use unisym_ast::*;
use unisym_lexer::{Keyword, TokenKind};

use super::TypeScriptParser;
use crate::markup::MarkupParser;
use crate::ParseError;

/// Precedence of the relational level, where `as` and `satisfies` bind
const RELATIONAL: u8 = 8;

/// Tokens after which `await`/`yield` cannot take an operand
fn ends_operand(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace
            | TokenKind::Semicolon
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::Question
            | TokenKind::Eq
            | TokenKind::Dot
            | TokenKind::FatArrow
            | TokenKind::Eof
    )
}

/// Literal text of a template piece without backticks or hole delimiters
fn template_text(raw: &str) -> String {
    let body = raw
        .strip_prefix('`')
        .or_else(|| raw.strip_prefix('}'))
        .unwrap_or(raw);
    let body = body
        .strip_suffix("${")
        .or_else(|| body.strip_suffix('`'))
        .unwrap_or(body);
    body.to_string()
}

impl<'a> TypeScriptParser<'a> {
    /// Comma-separated expression
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let first = self.parse_assignment()?;
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }
        let mut exprs = vec![first];
        while self.eat(TokenKind::Comma) {
            exprs.push(self.parse_assignment()?);
        }
        Ok(Expr {
            kind: ExprKind::Sequence(exprs),
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        if let Some(arrow) = self.try_parse_arrow()? {
            return Ok(arrow);
        }
        if self.at_keyword(Keyword::Yield) {
            return self.parse_yield();
        }

        let start = self.span();
        let target = self.parse_conditional()?;
        let Some((op, width)) = self.assign_op() else {
            return Ok(target);
        };
        for _ in 0..width {
            self.advance();
        }
        let value = self.parse_assignment()?;
        Ok(Expr {
            kind: ExprKind::Assign {
                op,
                target: Box::new(target),
                value: Box::new(value),
            },
            span: self.finish(start),
        })
    }

    fn assign_op(&self) -> Option<(AssignOp, usize)> {
        let op = match self.peek() {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::Add,
            TokenKind::MinusEq => AssignOp::Sub,
            TokenKind::StarEq => AssignOp::Mul,
            TokenKind::SlashEq => AssignOp::Div,
            TokenKind::PercentEq => AssignOp::Mod,
            TokenKind::StarStarEq => AssignOp::Exp,
            TokenKind::ShlEq => AssignOp::Shl,
            TokenKind::AmpEq => AssignOp::BitAnd,
            TokenKind::PipeEq => AssignOp::BitOr,
            TokenKind::CaretEq => AssignOp::BitXor,
            TokenKind::AndAndEq => AssignOp::And,
            TokenKind::OrOrEq => AssignOp::Or,
            TokenKind::QuestionQuestionEq => AssignOp::Coalesce,
            // `>>=` and `>>>=` arrive as split `>` tokens
            TokenKind::Gt if self.adjacent(1) => {
                return match (self.peek_ahead(1), self.peek_ahead(2)) {
                    (TokenKind::Ge, _) => Some((AssignOp::Shr, 2)),
                    (TokenKind::Gt, TokenKind::Ge) if self.adjacent(2) => Some((AssignOp::UShr, 3)),
                    _ => None,
                };
            }
            _ => return None,
        };
        Some((op, 1))
    }

    fn parse_yield(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        self.advance();
        let delegate = self.eat(TokenKind::Star);
        let argument = if ends_operand(self.peek()) || self.newline_before() {
            None
        } else {
            Some(Box::new(self.parse_assignment()?))
        };
        Ok(Expr {
            kind: ExprKind::Yield { argument, delegate },
            span: self.finish(start),
        })
    }

    // === Arrow functions ===

    /// Arrow function at the cursor, or `None` with the cursor untouched
    fn try_parse_arrow(&mut self) -> Result<Option<Expr>, ParseError> {
        let start = self.span();
        let checkpoint = self.checkpoint();

        let mut modifiers = Vec::new();
        if self.at_word("async")
            && matches!(self.peek_ahead(1), TokenKind::Ident | TokenKind::LParen | TokenKind::Lt)
            && !self.newline_after_current()
        {
            let token = self.advance();
            modifiers.push(Modifier {
                kind: ModifierKind::Async,
                span: token.span,
            });
        }

        match self.peek() {
            TokenKind::Ident if self.peek_ahead(1) == TokenKind::FatArrow => {
                let (name, span) = self.consume_ident()?;
                let param = Param {
                    modifiers: vec![],
                    pattern: Pattern::ident(name, span),
                    ty: None,
                    default: None,
                    optional: false,
                    rest: false,
                    span,
                };
                self.advance();
                let body = self.parse_arrow_body()?;
                Ok(Some(self.arrow(start, modifiers, vec![], vec![param], None, body)))
            }
            TokenKind::LParen | TokenKind::Lt => {
                let head = self.parse_arrow_head();
                match head {
                    Ok((type_params, params, return_type))
                        if self.at(TokenKind::FatArrow) && !self.newline_before() =>
                    {
                        self.advance();
                        let body = self.parse_arrow_body()?;
                        Ok(Some(self.arrow(start, modifiers, type_params, params, return_type, body)))
                    }
                    _ => {
                        self.rewind(checkpoint);
                        Ok(None)
                    }
                }
            }
            _ => {
                self.rewind(checkpoint);
                Ok(None)
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn parse_arrow_head(&mut self) -> Result<(Vec<TypeParam>, Vec<Param>, Option<TypeExpr>), ParseError> {
        let type_params = self.parse_type_params_opt()?;
        let params = self.parse_params()?;
        let return_type = if self.eat(TokenKind::Colon) {
            Some(self.parse_return_type()?)
        } else {
            None
        };
        Ok((type_params, params, return_type))
    }

    fn parse_arrow_body(&mut self) -> Result<ArrowBody, ParseError> {
        if self.at(TokenKind::LBrace) {
            Ok(ArrowBody::Block(self.parse_block()?))
        } else {
            Ok(ArrowBody::Expr(Box::new(self.parse_assignment()?)))
        }
    }

    fn arrow(
        &self,
        start: Span,
        modifiers: Vec<Modifier>,
        type_params: Vec<TypeParam>,
        params: Vec<Param>,
        return_type: Option<TypeExpr>,
        body: ArrowBody,
    ) -> Expr {
        Expr {
            kind: ExprKind::Arrow(Box::new(ArrowFunction {
                modifiers,
                type_params,
                params,
                return_type,
                body,
            })),
            span: self.finish(start),
        }
    }

    pub(super) fn newline_after_current(&self) -> bool {
        let here = self.current().span.end;
        let next = self.token_ahead(1).span.start;
        self.source()
            .get(here..next)
            .map_or(false, |gap| gap.contains('\n'))
    }

    // === Operators ===

    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let test = self.parse_binary(1)?;
        if !self.at(TokenKind::Question) {
            return Ok(test);
        }
        self.advance();
        let consequent = self.with_in(|p| p.parse_assignment())?;
        self.consume(TokenKind::Colon)?;
        let alternate = self.parse_assignment()?;
        Ok(Expr {
            kind: ExprKind::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
            span: self.finish(start),
        })
    }

    /// Operator at the cursor with its precedence and token width
    fn binary_op(&self) -> Option<(BinaryOp, u8, usize)> {
        let (op, prec) = match self.peek() {
            TokenKind::QuestionQuestion => (BinaryOp::Coalesce, 1),
            TokenKind::OrOr => (BinaryOp::Or, 2),
            TokenKind::AndAnd => (BinaryOp::And, 3),
            TokenKind::Pipe => (BinaryOp::BitOr, 4),
            TokenKind::Caret => (BinaryOp::BitXor, 5),
            TokenKind::Amp => (BinaryOp::BitAnd, 6),
            TokenKind::EqEq => (BinaryOp::Eq, 7),
            TokenKind::Ne => (BinaryOp::Ne, 7),
            TokenKind::EqEqEq => (BinaryOp::StrictEq, 7),
            TokenKind::NeEq => (BinaryOp::StrictNe, 7),
            TokenKind::Lt => (BinaryOp::Lt, RELATIONAL),
            TokenKind::Le => (BinaryOp::Le, RELATIONAL),
            TokenKind::Ge => (BinaryOp::Ge, RELATIONAL),
            TokenKind::Keyword(Keyword::Instanceof) => (BinaryOp::InstanceOf, RELATIONAL),
            TokenKind::Keyword(Keyword::In) if !self.no_in => (BinaryOp::In, RELATIONAL),
            TokenKind::Gt => {
                // `>>`, `>>>` and their assignments arrive as adjacent `>` tokens
                if self.peek_ahead(1) == TokenKind::Gt && self.adjacent(1) {
                    return match self.peek_ahead(2) {
                        TokenKind::Gt if self.adjacent(2) => Some((BinaryOp::UShr, 9, 3)),
                        TokenKind::Ge if self.adjacent(2) => None,
                        _ => Some((BinaryOp::Shr, 9, 2)),
                    };
                }
                if self.peek_ahead(1) == TokenKind::Ge && self.adjacent(1) {
                    return None;
                }
                (BinaryOp::Gt, RELATIONAL)
            }
            TokenKind::Shl => (BinaryOp::Shl, 9),
            TokenKind::Plus => (BinaryOp::Add, 10),
            TokenKind::Minus => (BinaryOp::Sub, 10),
            TokenKind::Star => (BinaryOp::Mul, 11),
            TokenKind::Slash => (BinaryOp::Div, 11),
            TokenKind::Percent => (BinaryOp::Mod, 11),
            TokenKind::StarStar => (BinaryOp::Exp, 12),
            _ => return None,
        };
        Some((op, prec, 1))
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let start = self.span();
        let mut left = self.parse_unary()?;
        loop {
            if (self.at_word("as") || self.at_word("satisfies"))
                && RELATIONAL >= min_prec
                && !self.newline_before()
            {
                self.advance();
                let ty = if self.at_keyword(Keyword::Const) {
                    let token = self.advance();
                    TypeExpr::named("const", token.span)
                } else {
                    self.parse_type()?
                };
                left = Expr {
                    kind: ExprKind::TypeAssertion {
                        expr: Box::new(left),
                        ty,
                    },
                    span: self.finish(start),
                };
                continue;
            }

            let Some((op, prec, width)) = self.binary_op() else {
                break;
            };
            if prec < min_prec {
                break;
            }
            for _ in 0..width {
                self.advance();
            }
            // `**` is right-associative
            let next = if op == BinaryOp::Exp { prec } else { prec + 1 };
            let right = self.parse_binary(next)?;
            left = Expr {
                kind: ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span: self.finish(start),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let op = match self.peek() {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Keyword(Keyword::Typeof) => Some(UnaryOp::Typeof),
            TokenKind::Keyword(Keyword::Void) => Some(UnaryOp::Void),
            TokenKind::Keyword(Keyword::Delete) => Some(UnaryOp::Delete),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr {
                kind: ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span: self.finish(start),
            });
        }

        if let Some(op) = self.update_op() {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr {
                kind: ExprKind::Update {
                    op,
                    prefix: true,
                    operand: Box::new(operand),
                },
                span: self.finish(start),
            });
        }

        if self.at_word("await") && !ends_operand(self.peek_ahead(1)) {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr {
                kind: ExprKind::Await(Box::new(operand)),
                span: self.finish(start),
            });
        }

        if self.at(TokenKind::Lt) && !self.is_markup_profile() {
            // `<T>value`
            self.advance();
            let ty = self.parse_type()?;
            self.consume(TokenKind::Gt)?;
            let operand = self.parse_unary()?;
            return Ok(Expr {
                kind: ExprKind::TypeAssertion {
                    expr: Box::new(operand),
                    ty,
                },
                span: self.finish(start),
            });
        }

        let expr = self.parse_call_member()?;
        if !self.newline_before() {
            if let Some(op) = self.update_op() {
                self.advance();
                return Ok(Expr {
                    kind: ExprKind::Update {
                        op,
                        prefix: false,
                        operand: Box::new(expr),
                    },
                    span: self.finish(start),
                });
            }
        }
        Ok(expr)
    }

    fn update_op(&self) -> Option<UpdateOp> {
        match self.peek() {
            TokenKind::PlusPlus => Some(UpdateOp::Increment),
            TokenKind::MinusMinus => Some(UpdateOp::Decrement),
            _ => None,
        }
    }

    // === Calls and member access ===

    fn parse_call_member(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let mut expr = if self.at_keyword(Keyword::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };

        loop {
            let kind = match self.peek() {
                TokenKind::Dot => {
                    self.advance();
                    ExprKind::Member {
                        object: Box::new(expr),
                        property: self.parse_member_property()?,
                        optional: false,
                    }
                }
                TokenKind::QuestionDot => {
                    self.advance();
                    match self.peek() {
                        TokenKind::LParen => ExprKind::Call {
                            callee: Box::new(expr),
                            type_args: vec![],
                            args: self.parse_arguments()?,
                            optional: true,
                        },
                        TokenKind::LBracket => {
                            self.advance();
                            let index = self.with_in(|p| p.parse_expression())?;
                            self.consume(TokenKind::RBracket)?;
                            ExprKind::Index {
                                object: Box::new(expr),
                                index: Box::new(index),
                                optional: true,
                            }
                        }
                        _ => ExprKind::Member {
                            object: Box::new(expr),
                            property: self.parse_member_property()?,
                            optional: true,
                        },
                    }
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.with_in(|p| p.parse_expression())?;
                    self.consume(TokenKind::RBracket)?;
                    ExprKind::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                        optional: false,
                    }
                }
                TokenKind::LParen => ExprKind::Call {
                    callee: Box::new(expr),
                    type_args: vec![],
                    args: self.parse_arguments()?,
                    optional: false,
                },
                TokenKind::Template | TokenKind::TemplateHead => ExprKind::TaggedTemplate {
                    tag: Box::new(expr),
                    template: Box::new(self.parse_template()?),
                },
                TokenKind::Bang if !self.newline_before() => {
                    self.advance();
                    ExprKind::NonNull(Box::new(expr))
                }
                TokenKind::Lt if self.at_call_type_args() => {
                    let type_args = self.parse_type_args()?;
                    if self.at_any(&[TokenKind::Template, TokenKind::TemplateHead]) {
                        ExprKind::TaggedTemplate {
                            tag: Box::new(expr),
                            template: Box::new(self.parse_template()?),
                        }
                    } else {
                        ExprKind::Call {
                            callee: Box::new(expr),
                            type_args,
                            args: self.parse_arguments()?,
                            optional: false,
                        }
                    }
                }
                _ => break,
            };
            expr = Expr {
                kind,
                span: self.finish(start),
            };
        }
        Ok(expr)
    }

    /// `<...>` at the cursor is a type argument list followed by call syntax
    fn at_call_type_args(&self) -> bool {
        self.type_args_end(self.position()).map_or(false, |end| {
            matches!(
                self.kind_at(end),
                TokenKind::LParen | TokenKind::Template | TokenKind::TemplateHead
            )
        })
    }

    fn parse_member_property(&mut self) -> Result<String, ParseError> {
        let token = self.current();
        match token.kind {
            TokenKind::Ident | TokenKind::Keyword(_) | TokenKind::PrivateName => {
                self.advance();
                Ok(self.text(token).to_string())
            }
            found => Err(ParseError::unexpected("property name", found, token.span)),
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.consume(TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at_eof() {
            let start = self.span();
            let arg = if self.eat(TokenKind::Ellipsis) {
                let inner = self.with_in(|p| p.parse_assignment())?;
                Expr {
                    kind: ExprKind::Spread(Box::new(inner)),
                    span: self.finish(start),
                }
            } else {
                self.with_in(|p| p.parse_assignment())?
            };
            args.push(arg);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_new(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let new = self.consume(TokenKind::Keyword(Keyword::New))?;

        if self.eat(TokenKind::Dot) {
            // `new.target`
            let property = self.parse_member_property()?;
            return Ok(Expr {
                kind: ExprKind::Member {
                    object: Box::new(Expr::ident("new", new.span)),
                    property,
                    optional: false,
                },
                span: self.finish(start),
            });
        }

        let callee_start = self.span();
        let mut callee = if self.at_keyword(Keyword::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            let kind = match self.peek() {
                TokenKind::Dot => {
                    self.advance();
                    ExprKind::Member {
                        object: Box::new(callee),
                        property: self.parse_member_property()?,
                        optional: false,
                    }
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.with_in(|p| p.parse_expression())?;
                    self.consume(TokenKind::RBracket)?;
                    ExprKind::Index {
                        object: Box::new(callee),
                        index: Box::new(index),
                        optional: false,
                    }
                }
                _ => break,
            };
            callee = Expr {
                kind,
                span: self.finish(callee_start),
            };
        }

        let type_args = if self.at(TokenKind::Lt) && self.type_args_end(self.position()).is_some() {
            self.parse_type_args()?
        } else {
            vec![]
        };
        let args = if self.at(TokenKind::LParen) {
            self.parse_arguments()?
        } else {
            vec![]
        };
        Ok(Expr {
            kind: ExprKind::New {
                callee: Box::new(callee),
                type_args,
                args,
            },
            span: self.finish(start),
        })
    }

    // === Primary expressions ===

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current();
        let literal = |lit: Literal| Expr {
            kind: ExprKind::Literal(lit),
            span: token.span,
        };
        match token.kind {
            TokenKind::Ident => {
                if self.at_word("async")
                    && self.peek_ahead(1) == TokenKind::Keyword(Keyword::Function)
                    && !self.newline_after_current()
                {
                    return self.parse_function_expr();
                }
                self.advance();
                Ok(Expr::ident(self.text(token), token.span))
            }
            TokenKind::PrivateName => {
                self.advance();
                Ok(Expr::ident(self.text(token), token.span))
            }
            TokenKind::Keyword(Keyword::This) => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::This,
                    span: token.span,
                })
            }
            TokenKind::Keyword(Keyword::Super) => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Super,
                    span: token.span,
                })
            }
            TokenKind::Keyword(Keyword::Import) => {
                // `import(...)` and `import.meta`
                self.advance();
                Ok(Expr::ident("import", token.span))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(literal(Literal::Null))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(literal(Literal::Bool(true)))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(literal(Literal::Bool(false)))
            }
            TokenKind::Number => {
                self.advance();
                Ok(literal(Literal::Number(self.text(token).to_string())))
            }
            TokenKind::String => {
                self.advance();
                Ok(literal(Literal::String(super::unquote(self.text(token)))))
            }
            TokenKind::Regex => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Regex(self.text(token).to_string()),
                    span: token.span,
                })
            }
            TokenKind::Template | TokenKind::TemplateHead => self.parse_template(),
            TokenKind::LParen => {
                self.advance();
                let inner = self.with_in(|p| p.parse_expression())?;
                self.consume(TokenKind::RParen)?;
                Ok(Expr {
                    kind: ExprKind::Paren(Box::new(inner)),
                    span: self.finish(token.span),
                })
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Keyword(Keyword::Function) => self.parse_function_expr(),
            TokenKind::Keyword(Keyword::Class) => {
                let class = self.parse_class(Vec::new(), false)?;
                Ok(Expr {
                    kind: ExprKind::Class(Box::new(class)),
                    span: self.finish(token.span),
                })
            }
            TokenKind::TagOpen => MarkupParser::new(self).parse(),
            found => Err(ParseError::unexpected("expression", found, token.span)),
        }
    }

    pub(crate) fn parse_template(&mut self) -> Result<Expr, ParseError> {
        let head = self.advance();
        let mut quasis = vec![template_text(self.text(head))];
        let mut exprs = Vec::new();
        if head.kind == TokenKind::TemplateHead {
            loop {
                exprs.push(self.with_in(|p| p.parse_expression())?);
                let part = self.current();
                match part.kind {
                    TokenKind::TemplateMiddle => {
                        self.advance();
                        quasis.push(template_text(self.text(part)));
                    }
                    TokenKind::TemplateTail => {
                        self.advance();
                        quasis.push(template_text(self.text(part)));
                        break;
                    }
                    found => return Err(ParseError::unexpected("'}'", found, part.span)),
                }
            }
        }
        Ok(Expr {
            kind: ExprKind::Template { quasis, exprs },
            span: self.finish(head.span),
        })
    }

    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let open = self.consume(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        while !self.at(TokenKind::RBracket) && !self.at_eof() {
            if self.eat(TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            let start = self.span();
            let element = if self.eat(TokenKind::Ellipsis) {
                let inner = self.with_in(|p| p.parse_assignment())?;
                Expr {
                    kind: ExprKind::Spread(Box::new(inner)),
                    span: self.finish(start),
                }
            } else {
                self.with_in(|p| p.parse_assignment())?
            };
            elements.push(Some(element));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RBracket)?;
        Ok(Expr {
            kind: ExprKind::Array(elements),
            span: self.finish(open.span),
        })
    }

    fn parse_object_literal(&mut self) -> Result<Expr, ParseError> {
        let open = self.consume(TokenKind::LBrace)?;
        let mut props = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            props.push(self.parse_object_prop()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RBrace)?;
        Ok(Expr {
            kind: ExprKind::Object(props),
            span: self.finish(open.span),
        })
    }

    fn parse_object_prop(&mut self) -> Result<ObjectProp, ParseError> {
        let start = self.span();

        if self.eat(TokenKind::Ellipsis) {
            let value = self.with_in(|p| p.parse_assignment())?;
            return Ok(ObjectProp {
                kind: ObjectPropKind::Spread(value),
                span: self.finish(start),
            });
        }

        let accessor_ahead = super::is_property_key_start(self.peek_ahead(1));
        if (self.at_word("get") || self.at_word("set")) && accessor_ahead {
            let is_getter = self.at_word("get");
            self.advance();
            let (key, _) = self.parse_property_key()?;
            let mut params = self.parse_params()?;
            if self.eat(TokenKind::Colon) {
                self.parse_type()?;
            }
            let body = self.parse_block()?;
            let kind = if is_getter {
                ObjectPropKind::Getter { key, body }
            } else {
                let param = params
                    .pop()
                    .ok_or(ParseError::InvalidPattern { span: start })?;
                ObjectPropKind::Setter {
                    key,
                    param: Box::new(param),
                    body,
                }
            };
            return Ok(ObjectProp {
                kind,
                span: self.finish(start),
            });
        }

        let mut modifiers = Vec::new();
        if self.at_word("async") && accessor_ahead && !self.newline_after_current() {
            let token = self.advance();
            modifiers.push(Modifier {
                kind: ModifierKind::Async,
                span: token.span,
            });
        }
        let is_generator = self.eat(TokenKind::Star);

        let (key, key_span) = self.parse_property_key()?;
        if self.at_any(&[TokenKind::LParen, TokenKind::Lt]) || is_generator || !modifiers.is_empty() {
            let function = self.parse_function_rest(modifiers, key.name(), key_span, is_generator)?;
            return Ok(ObjectProp {
                kind: ObjectPropKind::Method {
                    key,
                    function: Box::new(function),
                },
                span: self.finish(start),
            });
        }

        if self.eat(TokenKind::Colon) {
            let value = self.with_in(|p| p.parse_assignment())?;
            return Ok(ObjectProp {
                kind: ObjectPropKind::KeyValue { key, value },
                span: self.finish(start),
            });
        }

        match key {
            PropKey::Ident(name) => {
                if self.eat(TokenKind::Eq) {
                    // `{ a = 1 } = obj` cover grammar; the default is dropped
                    self.with_in(|p| p.parse_assignment())?;
                }
                Ok(ObjectProp {
                    kind: ObjectPropKind::Shorthand(name),
                    span: self.finish(start),
                })
            }
            _ => Err(ParseError::unexpected("':'", self.peek(), self.span())),
        }
    }

    fn parse_function_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let mut modifiers = Vec::new();
        if self.at_word("async") {
            let token = self.advance();
            modifiers.push(Modifier {
                kind: ModifierKind::Async,
                span: token.span,
            });
        }
        let function = self.parse_function(modifiers, false)?;
        Ok(Expr {
            kind: ExprKind::Function(Box::new(function)),
            span: self.finish(start),
        })
    }

    // === Binding patterns ===

    pub(super) fn parse_binding_pattern(&mut self) -> Result<Pattern, ParseError> {
        let token = self.current();
        match token.kind {
            TokenKind::Ident => {
                self.advance();
                Ok(Pattern::ident(self.text(token), token.span))
            }
            TokenKind::Keyword(Keyword::This) => {
                self.advance();
                Ok(Pattern::ident("this", token.span))
            }
            TokenKind::LBrace => self.parse_object_pattern(),
            TokenKind::LBracket => self.parse_array_pattern(),
            found => Err(ParseError::unexpected("binding pattern", found, token.span)),
        }
    }

    fn parse_object_pattern(&mut self) -> Result<Pattern, ParseError> {
        let open = self.consume(TokenKind::LBrace)?;
        let mut props = Vec::new();
        let mut rest = None;
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            if self.eat(TokenKind::Ellipsis) {
                rest = Some(Box::new(self.parse_binding_pattern()?));
                break;
            }
            let start = self.span();
            let (key, key_span) = self.parse_property_key()?;
            let value = if self.eat(TokenKind::Colon) {
                self.parse_binding_pattern()?
            } else {
                match &key {
                    PropKey::Ident(name) => Pattern::ident(name.clone(), key_span),
                    _ => return Err(ParseError::InvalidPattern { span: key_span }),
                }
            };
            let default = if self.eat(TokenKind::Eq) {
                Some(self.with_in(|p| p.parse_assignment())?)
            } else {
                None
            };
            props.push(ObjectPatternProp {
                key,
                value,
                default,
                span: self.finish(start),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RBrace)?;
        Ok(Pattern {
            kind: PatternKind::Object { props, rest },
            span: self.finish(open.span),
        })
    }

    fn parse_array_pattern(&mut self) -> Result<Pattern, ParseError> {
        let open = self.consume(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        let mut rest = None;
        while !self.at(TokenKind::RBracket) && !self.at_eof() {
            if self.eat(TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            if self.eat(TokenKind::Ellipsis) {
                rest = Some(Box::new(self.parse_binding_pattern()?));
                break;
            }
            let pattern = self.parse_binding_pattern()?;
            let default = if self.eat(TokenKind::Eq) {
                Some(self.with_in(|p| p.parse_assignment())?)
            } else {
                None
            };
            elements.push(Some(ArrayPatternElem { pattern, default }));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RBracket)?;
        Ok(Pattern {
            kind: PatternKind::Array { elements, rest },
            span: self.finish(open.span),
        })
    }
}

/// Assignment target on the left of a for-in/of loop
pub(super) fn expr_to_pattern(expr: Expr) -> Pattern {
    match expr.kind {
        ExprKind::Ident(name) => Pattern::ident(name, expr.span),
        _ => Pattern {
            span: expr.span,
            kind: PatternKind::Expr(Box::new(expr)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::parse;
    use super::*;

    /// Initializer of the first variable declared in `source`
    fn init(source: &str) -> Expr {
        let (tree, errors) = parse(source, Profile::TypeScript);
        assert!(errors.is_empty(), "{:?}", errors);
        match &tree.items[0].kind {
            ItemKind::Variable(decl) => decl.declarators[0].init.clone().expect("no initializer"),
            other => panic!("expected variable, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_and_associativity() {
        match init("const x = a + b * c ** d ** e;").kind {
            ExprKind::Binary { op: BinaryOp::Add, right, .. } => match right.kind {
                ExprKind::Binary { op: BinaryOp::Mul, right, .. } => {
                    assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::Exp, .. }));
                }
                other => panic!("expected multiplication, got {:?}", other),
            },
            other => panic!("expected addition, got {:?}", other),
        }
    }

    #[test]
    fn test_split_shift_operators() {
        assert!(matches!(
            init("const x = a >> 2;").kind,
            ExprKind::Binary { op: BinaryOp::Shr, .. }
        ));
        assert!(matches!(
            init("const x = a >>> 2;").kind,
            ExprKind::Binary { op: BinaryOp::UShr, .. }
        ));
        assert!(matches!(
            init("const x = a > b;").kind,
            ExprKind::Binary { op: BinaryOp::Gt, .. }
        ));
    }

    #[test]
    fn test_arrow_forms() {
        assert!(matches!(init("const f = x => x + 1;").kind, ExprKind::Arrow(_)));
        assert!(matches!(init("const f = (a: number, b = 2): number => a * b;").kind, ExprKind::Arrow(_)));
        assert!(matches!(init("const f = <T,>(x: T) => x;").kind, ExprKind::Arrow(_)));
        match init("const f = async ({ a, b: [c] }) => { await a; };").kind {
            ExprKind::Arrow(arrow) => {
                assert!(arrow.is_async());
                assert_eq!(arrow.params[0].pattern.display(), "{ a, b: [c] }");
            }
            other => panic!("expected arrow, got {:?}", other),
        }
        assert!(matches!(init("const f = (a, b);").kind, ExprKind::Paren(_)));
    }

    #[test]
    fn test_generic_call_versus_comparison() {
        match init("const x = make<Map<string, number>>(1);").kind {
            ExprKind::Call { type_args, .. } => assert_eq!(type_args.len(), 1),
            other => panic!("expected call, got {:?}", other),
        }
        assert!(matches!(
            init("const x = a < b && c > d;").kind,
            ExprKind::Binary { op: BinaryOp::And, .. }
        ));
    }

    #[test]
    fn test_template_pieces() {
        match init("const s = `a ${b} c ${d}`;").kind {
            ExprKind::Template { quasis, exprs } => {
                assert_eq!(quasis, vec!["a ", " c ", ""]);
                assert_eq!(exprs.len(), 2);
            }
            other => panic!("expected template, got {:?}", other),
        }
    }

    #[test]
    fn test_object_literal_members() {
        match init("const o = { a, b: 1, ...c, [k]: 2, m() { return 1; }, get g() { return 2; } };").kind {
            ExprKind::Object(props) => assert_eq!(props.len(), 6),
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_casts_and_optional_chains() {
        assert!(matches!(
            init("const x = value as unknown as string;").kind,
            ExprKind::TypeAssertion { .. }
        ));
        assert!(matches!(init("const x = a?.b?.(c)!;").kind, ExprKind::NonNull(_)));
        assert!(matches!(init("const x = new Foo<T>(1).bar;").kind, ExprKind::Member { .. }));
    }
}
