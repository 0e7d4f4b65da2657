//! Embedded markup (JSX/TSX elements)
//!
//! Entered from primary-expression position when the lexer produced a
//! `TagOpen`. Attribute values and `{...}` containers hand back to the
//! script expression grammar.

use std::ops::{Deref, DerefMut};

use unisym_ast::*;
use unisym_lexer::TokenKind;

use crate::typescript::TypeScriptParser;
use crate::ParseError;

pub struct MarkupParser<'p, 'a> {
    script: &'p mut TypeScriptParser<'a>,
}

impl<'p, 'a> Deref for MarkupParser<'p, 'a> {
    type Target = TypeScriptParser<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.script
    }
}

impl<'p, 'a> DerefMut for MarkupParser<'p, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.script
    }
}

/// Attribute string value without its quotes
fn attribute_text(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

impl<'p, 'a> MarkupParser<'p, 'a> {
    pub fn new(script: &'p mut TypeScriptParser<'a>) -> Self {
        Self { script }
    }

    /// Element or fragment at the cursor, as an expression
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        if self.peek_ahead(1) == TokenKind::Gt {
            let fragment = self.parse_fragment()?;
            return Ok(Expr {
                span: fragment.span,
                kind: ExprKind::MarkupFragment(Box::new(fragment)),
            });
        }
        let element = self.parse_element()?;
        Ok(Expr {
            span: element.span,
            kind: ExprKind::MarkupElement(Box::new(element)),
        })
    }

    fn parse_fragment(&mut self) -> Result<MarkupFragment, ParseError> {
        let open = self.consume(TokenKind::TagOpen)?;
        self.consume(TokenKind::Gt)?;
        let children = self.parse_children()?;

        let close = self.consume(TokenKind::TagOpen)?;
        self.consume(TokenKind::Slash)?;
        if !self.at(TokenKind::Gt) {
            let (found, _) = self.parse_tag_name()?;
            let span = self.finish(close.span);
            self.report(ParseError::MismatchedTag {
                expected: String::new(),
                found,
                span,
            });
        }
        self.consume(TokenKind::Gt)?;
        Ok(MarkupFragment {
            children,
            span: self.finish(open.span),
        })
    }

    fn parse_element(&mut self) -> Result<MarkupElement, ParseError> {
        let open = self.consume(TokenKind::TagOpen)?;
        let (name, _) = self.parse_tag_name()?;

        let mut attributes = Vec::new();
        while !self.at_any(&[TokenKind::Slash, TokenKind::Gt, TokenKind::Eof]) {
            attributes.push(self.parse_attribute()?);
        }

        if self.eat(TokenKind::Slash) {
            self.consume(TokenKind::Gt)?;
            return Ok(MarkupElement {
                name,
                attributes,
                children: Vec::new(),
                self_closing: true,
                span: self.finish(open.span),
            });
        }
        self.consume(TokenKind::Gt)?;
        let children = self.parse_children()?;

        let close = self.consume(TokenKind::TagOpen)?;
        self.consume(TokenKind::Slash)?;
        let found = if self.at(TokenKind::Gt) {
            String::new()
        } else {
            self.parse_tag_name()?.0
        };
        self.consume(TokenKind::Gt)?;
        if found != name {
            let span = self.finish(close.span);
            self.report(ParseError::MismatchedTag {
                expected: name.clone(),
                found,
                span,
            });
        }
        Ok(MarkupElement {
            name,
            attributes,
            children,
            self_closing: false,
            span: self.finish(open.span),
        })
    }

    /// `div`, `Foo.Bar`, `svg:path`, `data-id`
    fn parse_tag_name(&mut self) -> Result<(String, Span), ParseError> {
        let (mut name, start) = self.consume_ident()?;
        while self.at_any(&[TokenKind::Dot, TokenKind::Colon]) {
            let separator = self.advance();
            name.push_str(self.text(separator));
            name.push_str(&self.consume_ident()?.0);
        }
        Ok((name, self.finish(start)))
    }

    fn parse_attribute(&mut self) -> Result<MarkupAttribute, ParseError> {
        let start = self.span();
        if self.eat(TokenKind::LBrace) {
            self.consume(TokenKind::Ellipsis)?;
            let expr = self.parse_assignment()?;
            self.consume(TokenKind::RBrace)?;
            return Ok(MarkupAttribute {
                kind: MarkupAttributeKind::Spread(expr),
                span: self.finish(start),
            });
        }

        let (name, _) = self.parse_tag_name()?;
        let value = if self.eat(TokenKind::Eq) {
            let token = self.current();
            Some(match token.kind {
                TokenKind::String => {
                    self.advance();
                    MarkupAttrValue::String(attribute_text(self.text(token)))
                }
                TokenKind::LBrace => MarkupAttrValue::Expression(self.parse_container()?),
                TokenKind::TagOpen => MarkupAttrValue::Element(Box::new(self.parse_element()?)),
                found => return Err(ParseError::unexpected("attribute value", found, token.span)),
            })
        } else {
            None
        };
        Ok(MarkupAttribute {
            kind: MarkupAttributeKind::Named { name, value },
            span: self.finish(start),
        })
    }

    /// `{expr}`, `{...spread}`, or an empty/comment-only `{}`
    fn parse_container(&mut self) -> Result<MarkupExpressionContainer, ParseError> {
        let open = self.consume(TokenKind::LBrace)?;
        let expr = if self.at(TokenKind::RBrace) {
            None
        } else if self.at(TokenKind::Ellipsis) {
            let start = self.span();
            self.advance();
            let inner = self.parse_expression()?;
            Some(Expr {
                kind: ExprKind::Spread(Box::new(inner)),
                span: self.finish(start),
            })
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::RBrace)?;
        Ok(MarkupExpressionContainer {
            expr,
            span: self.finish(open.span),
        })
    }

    /// Children up to the closing tag, which is left in place
    fn parse_children(&mut self) -> Result<Vec<MarkupChild>, ParseError> {
        let mut children = Vec::new();
        loop {
            let token = self.current();
            match token.kind {
                TokenKind::MarkupText => {
                    self.advance();
                    let text = self.text(token);
                    if !text.trim().is_empty() {
                        children.push(MarkupChild::Text(MarkupText {
                            text: text.to_string(),
                            span: token.span,
                        }));
                    }
                }
                TokenKind::LBrace => children.push(MarkupChild::Expression(self.parse_container()?)),
                TokenKind::TagOpen if self.peek_ahead(1) == TokenKind::Slash => break,
                TokenKind::TagOpen if self.peek_ahead(1) == TokenKind::Gt => {
                    children.push(MarkupChild::Fragment(self.parse_fragment()?));
                }
                TokenKind::TagOpen => children.push(MarkupChild::Element(self.parse_element()?)),
                found => return Err(ParseError::unexpected("markup child or closing tag", found, token.span)),
            }
        }
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unisym_lexer::tokenize;

    fn parse_markup(source: &str) -> (SyntaxTree, Vec<ParseError>) {
        let output = tokenize(source, Profile::TypeScriptMarkup);
        TypeScriptParser::new(source, &output.tokens, Profile::TypeScriptMarkup).parse_file()
    }

    fn root_element(tree: &SyntaxTree) -> MarkupElement {
        let ItemKind::Variable(decl) = &tree.items[0].kind else {
            panic!("expected variable");
        };
        match decl.declarators[0].init.as_ref().map(|e| &e.kind) {
            Some(ExprKind::MarkupElement(element)) => (**element).clone(),
            other => panic!("expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_element_with_attributes_and_children() {
        let source = r#"const el = <div className="card" style={{ color: "red" }} {...rest} disabled>
  <h1>Hello {name}</h1>
  {/* note */}
  <hr />
  {count > 5 && <p>Many</p>}
</div>;"#;
        let (tree, errors) = parse_markup(source);
        assert!(errors.is_empty(), "{:?}", errors);
        let element = root_element(&tree);
        assert_eq!(element.name, "div");
        assert_eq!(element.attributes.len(), 4);
        assert!(matches!(element.attributes[2].kind, MarkupAttributeKind::Spread(_)));
        let kinds: Vec<_> = element
            .children
            .iter()
            .map(|c| match c {
                MarkupChild::Text(_) => "text",
                MarkupChild::Element(_) => "element",
                MarkupChild::Fragment(_) => "fragment",
                MarkupChild::Expression(c) if c.expr.is_none() => "empty",
                MarkupChild::Expression(_) => "expression",
            })
            .collect();
        assert_eq!(kinds, vec!["element", "empty", "element", "expression"]);
    }

    #[test]
    fn test_fragment_and_member_tag_names() {
        let source = "const el = <Ctx.Provider value={v}><>\n  <span>a</span>\n</></Ctx.Provider>;";
        let (tree, errors) = parse_markup(source);
        assert!(errors.is_empty(), "{:?}", errors);
        let element = root_element(&tree);
        assert_eq!(element.name, "Ctx.Provider");
        assert!(matches!(element.children[0], MarkupChild::Fragment(_)));
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let (tree, errors) = parse_markup("const el = <div><span></div></span>;");
        assert!(errors.iter().any(|e| e.code() == "E-PARSE-009"));
        assert_eq!(tree.items.len(), 1);
    }
}
