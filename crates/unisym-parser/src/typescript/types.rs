//! Type annotations
//!
//! Named, array, union, intersection, tuple, function, literal and object
//! types are kept structurally. Conditional, mapped, indexed-access and
//! operator types (`keyof T`) are kept only as spans.

use unisym_ast::*;
use unisym_lexer::{Keyword, TokenKind};

use super::TypeScriptParser;
use crate::ParseError;

/// Tokens that cannot begin the operand of a prefix type operator
fn ends_type(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Comma
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace
            | TokenKind::Gt
            | TokenKind::Semicolon
            | TokenKind::Eq
            | TokenKind::Pipe
            | TokenKind::Amp
            | TokenKind::Colon
            | TokenKind::Question
            | TokenKind::Eof
    )
}

impl<'a> TypeScriptParser<'a> {
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span();
        if let Some(function) = self.try_parse_function_type()? {
            return Ok(function);
        }
        let ty = self.parse_union_type()?;
        if self.at_keyword(Keyword::Extends) && !self.newline_before() {
            // `A extends B ? C : D`
            self.advance();
            self.parse_union_type()?;
            self.consume(TokenKind::Question)?;
            self.parse_type()?;
            self.consume(TokenKind::Colon)?;
            self.parse_type()?;
            return Ok(TypeExpr {
                kind: TypeExprKind::Opaque,
                span: self.finish(start),
            });
        }
        Ok(ty)
    }

    /// `(a: T) => R`, `<T>(x: T) => T` or `new (...) => R`
    fn try_parse_function_type(&mut self) -> Result<Option<TypeExpr>, ParseError> {
        let is_new = self.at_keyword(Keyword::New)
            || (self.at_word("abstract") && self.peek_ahead(1) == TokenKind::Keyword(Keyword::New));
        if !is_new && !self.at_any(&[TokenKind::LParen, TokenKind::Lt]) {
            return Ok(None);
        }

        let start = self.span();
        let checkpoint = self.checkpoint();
        self.eat_word("abstract");
        self.eat_keyword(Keyword::New);

        let head = self
            .parse_type_params_opt()
            .and_then(|type_params| Ok((type_params, self.parse_params()?)));
        match head {
            Ok((type_params, params)) if self.at(TokenKind::FatArrow) => {
                self.advance();
                let ret = self.parse_return_type()?;
                Ok(Some(TypeExpr {
                    kind: TypeExprKind::Function {
                        type_params,
                        params,
                        ret: Box::new(ret),
                    },
                    span: self.finish(start),
                }))
            }
            _ => {
                self.rewind(checkpoint);
                Ok(None)
            }
        }
    }

    fn parse_union_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span();
        self.eat(TokenKind::Pipe);
        let first = self.parse_intersection_type()?;
        if !self.at(TokenKind::Pipe) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat(TokenKind::Pipe) {
            types.push(self.parse_intersection_type()?);
        }
        Ok(TypeExpr {
            kind: TypeExprKind::Union(types),
            span: self.finish(start),
        })
    }

    fn parse_intersection_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span();
        self.eat(TokenKind::Amp);
        let first = self.parse_type_operator()?;
        if !self.at(TokenKind::Amp) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat(TokenKind::Amp) {
            types.push(self.parse_type_operator()?);
        }
        Ok(TypeExpr {
            kind: TypeExprKind::Intersection(types),
            span: self.finish(start),
        })
    }

    fn parse_type_operator(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span();
        let operand_follows = !ends_type(self.peek_ahead(1));
        if operand_follows && (self.at_word("keyof") || self.at_word("unique") || self.at_word("infer")) {
            self.advance();
            self.parse_type_operator()?;
            return Ok(TypeExpr {
                kind: TypeExprKind::Opaque,
                span: self.finish(start),
            });
        }
        if operand_follows && self.at_word("readonly") {
            // `readonly T[]` reads as the array type
            self.advance();
            return self.parse_type_operator();
        }
        self.parse_postfix_type()
    }

    fn parse_postfix_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span();
        let mut ty = self.parse_primary_type()?;
        while self.at(TokenKind::LBracket) && !self.newline_before() {
            self.advance();
            let kind = if self.eat(TokenKind::RBracket) {
                TypeExprKind::Array(Box::new(ty))
            } else {
                // `T[K]`
                self.parse_type()?;
                self.consume(TokenKind::RBracket)?;
                TypeExprKind::Opaque
            };
            ty = TypeExpr {
                kind,
                span: self.finish(start),
            };
        }
        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> Result<TypeExpr, ParseError> {
        let token = self.current();
        let literal = |lit: Literal| TypeExpr {
            kind: TypeExprKind::Literal(lit),
            span: token.span,
        };
        match token.kind {
            TokenKind::Ident => self.parse_named_type(),
            TokenKind::Keyword(Keyword::Void | Keyword::Null | Keyword::This) => {
                self.advance();
                Ok(TypeExpr::named(self.text(token), token.span))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(literal(Literal::Bool(true)))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(literal(Literal::Bool(false)))
            }
            TokenKind::String => {
                self.advance();
                Ok(literal(Literal::String(super::unquote(self.text(token)))))
            }
            TokenKind::Number => {
                self.advance();
                Ok(literal(Literal::Number(self.text(token).to_string())))
            }
            TokenKind::Minus if self.peek_ahead(1) == TokenKind::Number => {
                self.advance();
                let number = self.advance();
                Ok(TypeExpr {
                    kind: TypeExprKind::Literal(Literal::Number(format!("-{}", self.text(number)))),
                    span: self.finish(token.span),
                })
            }
            TokenKind::Keyword(Keyword::Typeof) => {
                // `typeof value`, `typeof import("x")`
                self.advance();
                if self.at_keyword(Keyword::Import) {
                    self.advance();
                    self.skip_balanced()?;
                } else {
                    self.consume_name()?;
                }
                while self.eat(TokenKind::Dot) {
                    self.consume_name()?;
                }
                if self.at(TokenKind::Lt) && !self.newline_before() {
                    self.parse_type_args()?;
                }
                Ok(TypeExpr {
                    kind: TypeExprKind::Opaque,
                    span: self.finish(token.span),
                })
            }
            TokenKind::Keyword(Keyword::Import) => {
                // `import("./mod").Name`
                self.advance();
                self.skip_balanced()?;
                while self.eat(TokenKind::Dot) {
                    self.consume_name()?;
                }
                if self.at(TokenKind::Lt) {
                    self.parse_type_args()?;
                }
                Ok(TypeExpr {
                    kind: TypeExprKind::Opaque,
                    span: self.finish(token.span),
                })
            }
            TokenKind::Template => {
                self.advance();
                Ok(TypeExpr {
                    kind: TypeExprKind::Opaque,
                    span: token.span,
                })
            }
            TokenKind::TemplateHead => {
                self.advance();
                loop {
                    self.parse_type()?;
                    let part = self.advance();
                    match part.kind {
                        TokenKind::TemplateMiddle => {}
                        TokenKind::TemplateTail => break,
                        found => return Err(ParseError::unexpected("'}'", found, part.span)),
                    }
                }
                Ok(TypeExpr {
                    kind: TypeExprKind::Opaque,
                    span: self.finish(token.span),
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_type()?;
                self.consume(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_tuple_type(),
            TokenKind::LBrace if self.at_mapped_type() => {
                let span = self.skip_balanced()?;
                Ok(TypeExpr {
                    kind: TypeExprKind::Opaque,
                    span,
                })
            }
            TokenKind::LBrace => {
                let members = self.parse_type_members(false)?;
                Ok(TypeExpr {
                    kind: TypeExprKind::Object(members),
                    span: self.finish(token.span),
                })
            }
            TokenKind::Star | TokenKind::Question => {
                self.advance();
                Ok(TypeExpr {
                    kind: TypeExprKind::Opaque,
                    span: token.span,
                })
            }
            found => Err(ParseError::unexpected("type", found, token.span)),
        }
    }

    fn parse_named_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span();
        let (first, _) = self.consume_ident()?;
        let mut path = vec![first];
        while self.at(TokenKind::Dot) && self.at_name_after_dot() {
            self.advance();
            path.push(self.consume_name()?.0);
        }
        let args = if self.at(TokenKind::Lt) && !self.newline_before() {
            self.parse_type_args()?
        } else {
            vec![]
        };
        Ok(TypeExpr {
            kind: TypeExprKind::Named { path, args },
            span: self.finish(start),
        })
    }

    fn at_name_after_dot(&self) -> bool {
        matches!(self.peek_ahead(1), TokenKind::Ident | TokenKind::Keyword(_))
    }

    /// `{ [K in T]: ... }`, optionally with `readonly`, `+readonly` or `-readonly`
    fn at_mapped_type(&self) -> bool {
        let mut offset = 1;
        if matches!(self.peek_ahead(offset), TokenKind::Plus | TokenKind::Minus) {
            offset += 1;
        }
        if self.word_ahead(offset, "readonly") {
            offset += 1;
        }
        self.peek_ahead(offset) == TokenKind::LBracket
            && self.peek_ahead(offset + 1) == TokenKind::Ident
            && self.peek_ahead(offset + 2) == TokenKind::Keyword(Keyword::In)
    }

    fn parse_tuple_type(&mut self) -> Result<TypeExpr, ParseError> {
        let open = self.consume(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        while !self.at(TokenKind::RBracket) && !self.at_eof() {
            self.eat(TokenKind::Ellipsis);
            // labelled element: `[name: string, age?: number]`
            let labelled = matches!(self.peek(), TokenKind::Ident | TokenKind::Keyword(_))
                && (self.peek_ahead(1) == TokenKind::Colon
                    || (self.peek_ahead(1) == TokenKind::Question && self.peek_ahead(2) == TokenKind::Colon));
            if labelled {
                self.advance();
                self.eat(TokenKind::Question);
                self.advance();
            }
            elements.push(self.parse_type()?);
            self.eat(TokenKind::Question);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RBracket)?;
        Ok(TypeExpr {
            kind: TypeExprKind::Tuple(elements),
            span: self.finish(open.span),
        })
    }

    pub(crate) fn parse_type_args(&mut self) -> Result<Vec<TypeExpr>, ParseError> {
        self.consume(TokenKind::Lt)?;
        let mut args = Vec::new();
        while !self.at(TokenKind::Gt) && !self.at_eof() {
            args.push(self.parse_type()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::Gt)?;
        Ok(args)
    }

    /// `<T, U extends X = Y>` if present
    pub(super) fn parse_type_params_opt(&mut self) -> Result<Vec<TypeParam>, ParseError> {
        if !self.eat(TokenKind::Lt) {
            return Ok(Vec::new());
        }
        let mut params = Vec::new();
        while !self.at(TokenKind::Gt) && !self.at_eof() {
            let start = self.span();
            let variance = self.at_keyword(Keyword::Const) || self.at_keyword(Keyword::In) || self.at_word("out");
            if variance && self.peek_ahead(1) == TokenKind::Ident {
                self.advance();
            }
            let (name, _) = self.consume_ident()?;
            let constraint = if self.eat_keyword(Keyword::Extends) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let default = if self.eat(TokenKind::Eq) {
                Some(self.parse_type()?)
            } else {
                None
            };
            params.push(TypeParam {
                name,
                constraint,
                default,
                span: self.finish(start),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::Gt)?;
        Ok(params)
    }

    /// Return type annotation; type predicates read as `boolean`
    pub(super) fn parse_return_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span();
        let subject = matches!(self.peek_ahead(1), TokenKind::Ident | TokenKind::Keyword(Keyword::This));
        if self.at_word("asserts") && subject {
            self.advance();
            self.advance();
            if self.eat_word("is") {
                self.parse_type()?;
            }
            return Ok(TypeExpr {
                kind: TypeExprKind::Opaque,
                span: self.finish(start),
            });
        }
        if matches!(self.peek(), TokenKind::Ident | TokenKind::Keyword(Keyword::This)) && self.word_ahead(1, "is") {
            self.advance();
            self.advance();
            self.parse_type()?;
            return Ok(TypeExpr::named("boolean", self.finish(start)));
        }
        self.parse_type()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::parse;
    use super::*;

    /// Annotation of the first variable declared in `source`
    fn annotation(source: &str) -> TypeExpr {
        let (tree, errors) = parse(source, Profile::TypeScript);
        assert!(errors.is_empty(), "{:?}", errors);
        match &tree.items[0].kind {
            ItemKind::Variable(decl) => decl.declarators[0].ty.clone().expect("no annotation"),
            other => panic!("expected variable, got {:?}", other),
        }
    }

    #[test]
    fn test_named_and_generic_types() {
        let ty = annotation("let x: React.FC<Props>;");
        assert_eq!(ty.name(), Some("FC"));
        assert_eq!(ty.args().len(), 1);

        let ty = annotation("let x: Map<string, Array<number>>;");
        assert_eq!(ty.args()[1].args()[0].name(), Some("number"));
    }

    #[test]
    fn test_union_with_leading_pipe() {
        match annotation("let x:\n  | 'a'\n  | 'b'\n  | null;").kind {
            TypeExprKind::Union(types) => assert_eq!(types.len(), 3),
            other => panic!("expected union, got {:?}", other),
        }
    }

    #[test]
    fn test_function_type_versus_parenthesized() {
        assert!(matches!(
            annotation("let f: (a: number, b?: string) => void;").kind,
            TypeExprKind::Function { .. }
        ));
        assert!(matches!(annotation("let f: (A | B)[];").kind, TypeExprKind::Array(_)));
    }

    #[test]
    fn test_opaque_forms() {
        for source in [
            "let x: keyof T;",
            "let x: T[K];",
            "let x: T extends string ? A : B;",
            "let x: { [K in keyof T]?: T[K] };",
            "let x: `id-${string}`;",
        ] {
            assert!(matches!(annotation(source).kind, TypeExprKind::Opaque), "{}", source);
        }
    }

    #[test]
    fn test_object_and_tuple_types() {
        match annotation("let x: { a: string; b?: number, m(): void };").kind {
            TypeExprKind::Object(members) => assert_eq!(members.len(), 3),
            other => panic!("expected object type, got {:?}", other),
        }
        match annotation("let x: [name: string, age?: number, ...rest: boolean[]];").kind {
            TypeExprKind::Tuple(elements) => assert_eq!(elements.len(), 3),
            other => panic!("expected tuple, got {:?}", other),
        }
    }
}
