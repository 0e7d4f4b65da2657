//! C# declaration parser
//!
//! Declarations, signatures and type expressions are parsed in full. Method,
//! accessor and constructor bodies are kept as opaque statement spans split
//! at top-level `;` and blocks; initializers are opaque spans except simple
//! numeric enum values. Attributes are skipped.

use std::ops::{Deref, DerefMut};

use unisym_ast::*;
use unisym_lexer::{Keyword, Token, TokenKind};

use crate::cursor::TokenCursor;
use crate::{follows_enum, ParseError};

/// Words that act as modifiers only in declaration position
const CONTEXTUAL_MODIFIERS: &[&str] = &["partial", "async", "required", "file", "scoped"];

pub struct CSharpParser<'a> {
    cursor: TokenCursor<'a>,
}

impl<'a> Deref for CSharpParser<'a> {
    type Target = TokenCursor<'a>;

    fn deref(&self) -> &Self::Target {
        &self.cursor
    }
}

impl<'a> DerefMut for CSharpParser<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cursor
    }
}

fn opaque(span: Span) -> Expr {
    Expr {
        kind: ExprKind::Opaque,
        span,
    }
}

/// Tokens where item- and member-level recovery may resume
fn is_declaration_start(cursor: &TokenCursor<'_>) -> bool {
    match cursor.peek() {
        TokenKind::Keyword(kw) => matches!(
            kw,
            Keyword::Class
                | Keyword::Struct
                | Keyword::Interface
                | Keyword::Enum
                | Keyword::Namespace
                | Keyword::Using
                | Keyword::Delegate
                | Keyword::Event
                | Keyword::Public
                | Keyword::Private
                | Keyword::Protected
                | Keyword::Internal
                | Keyword::Static
                | Keyword::Abstract
                | Keyword::Sealed
                | Keyword::Override
                | Keyword::Virtual
                | Keyword::Readonly
                | Keyword::Const
        ),
        TokenKind::Ident => cursor.at_word("record") || cursor.at_word("partial"),
        _ => false,
    }
}

impl<'a> CSharpParser<'a> {
    pub fn new(source: &'a str, tokens: &[Token]) -> Self {
        Self {
            cursor: TokenCursor::new(source, tokens),
        }
    }

    pub fn parse_file(mut self) -> (SyntaxTree, Vec<ParseError>) {
        let items = self.parse_items(false);
        let tree = SyntaxTree {
            profile: Profile::CSharp,
            items,
            span: Span::new(0, self.source().len()),
        };
        (tree, self.cursor.into_errors())
    }

    // === Items ===

    /// Items until end of file, or until the `}` closing a namespace when `nested`
    fn parse_items(&mut self, nested: bool) -> Vec<Item> {
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
            match self.parse_item() {
                Ok(mut parsed) => items.append(&mut parsed),
                Err(error) => {
                    self.report(error);
                    self.recover(is_declaration_start);
                }
            }
        }
        items
    }

    fn parse_item(&mut self) -> Result<Vec<Item>, ParseError> {
        let start = self.span();
        self.skip_attributes()?;

        if self.eat(TokenKind::Semicolon) {
            return Ok(vec![]);
        }
        if self.at_keyword(Keyword::Using)
            || (self.at_word("global") && self.peek_ahead(1) == TokenKind::Keyword(Keyword::Using))
        {
            return Ok(vec![self.parse_using(start)?]);
        }
        if self.at_keyword(Keyword::Namespace) {
            return Ok(vec![self.parse_namespace(start)?]);
        }

        let modifiers = self.parse_modifiers();
        if self.at_type_keyword() {
            return Ok(vec![self.parse_type_decl(start, modifiers)?]);
        }

        // Member-shaped input outside any type body
        let members = self.parse_member_rest(start, modifiers, None)?;
        let mut items = Vec::with_capacity(members.len());
        for member in members {
            self.report(ParseError::StrayMember {
                name: member.name().unwrap_or("<anonymous>").to_string(),
                span: member.span,
            });
            items.push(Item {
                span: member.span,
                kind: ItemKind::StrayMember(member),
            });
        }
        Ok(items)
    }

    fn parse_using(&mut self, start: Span) -> Result<Item, ParseError> {
        let is_global = self.eat_word("global");
        self.consume(TokenKind::Keyword(Keyword::Using))?;
        let is_static = self.eat_keyword(Keyword::Static);

        let alias = if self.at(TokenKind::Ident) && self.peek_ahead(1) == TokenKind::Eq {
            let (alias, _) = self.consume_ident()?;
            self.advance();
            Some(alias)
        } else {
            None
        };

        let target = self.skip_until(&[TokenKind::Semicolon], true);
        if target.is_empty() {
            return Err(ParseError::unexpected("namespace name", self.peek(), self.span()));
        }
        let path: String = target
            .text(self.source())
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        self.consume(TokenKind::Semicolon)?;

        Ok(Item {
            kind: ItemKind::Using(UsingDecl {
                path,
                alias,
                is_static,
                is_global,
            }),
            span: self.finish(start),
        })
    }

    fn parse_namespace(&mut self, start: Span) -> Result<Item, ParseError> {
        self.consume(TokenKind::Keyword(Keyword::Namespace))?;
        let name = self.parse_dotted_name()?;

        let (items, file_scoped) = if self.eat(TokenKind::Semicolon) {
            (self.parse_items(false), true)
        } else {
            self.consume(TokenKind::LBrace)?;
            let items = self.parse_items(true);
            if let Err(error) = self.consume(TokenKind::RBrace) {
                self.report(error);
            }
            self.eat(TokenKind::Semicolon);
            (items, false)
        };

        Ok(Item {
            kind: ItemKind::Namespace(NamespaceDecl {
                modifiers: vec![],
                name,
                items,
                file_scoped,
            }),
            span: self.finish(start),
        })
    }

    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let (mut name, _) = self.consume_ident()?;
        while self.at(TokenKind::Dot) && self.peek_ahead(1) == TokenKind::Ident {
            self.advance();
            let (segment, _) = self.consume_ident()?;
            name.push('.');
            name.push_str(&segment);
        }
        Ok(name)
    }

    fn at_type_keyword(&self) -> bool {
        match self.peek() {
            TokenKind::Keyword(
                Keyword::Class | Keyword::Struct | Keyword::Interface | Keyword::Enum | Keyword::Delegate,
            ) => true,
            TokenKind::Ident => {
                self.at_word("record")
                    && matches!(
                        self.peek_ahead(1),
                        TokenKind::Ident
                            | TokenKind::Keyword(Keyword::Class)
                            | TokenKind::Keyword(Keyword::Struct)
                    )
            }
            _ => false,
        }
    }

    fn parse_type_decl(&mut self, start: Span, modifiers: Vec<Modifier>) -> Result<Item, ParseError> {
        let kind = match self.advance().kind {
            TokenKind::Keyword(Keyword::Class) => ItemKind::Class(self.parse_class_like(modifiers, false)?),
            TokenKind::Keyword(Keyword::Struct) => ItemKind::Struct(self.parse_class_like(modifiers, false)?),
            TokenKind::Keyword(Keyword::Interface) => ItemKind::Interface(self.parse_interface(modifiers)?),
            TokenKind::Keyword(Keyword::Enum) => ItemKind::Enum(self.parse_enum(modifiers)?),
            TokenKind::Keyword(Keyword::Delegate) => ItemKind::Delegate(self.parse_delegate(modifiers)?),
            _ => {
                // `record`, `record class`, `record struct`
                if self.eat_keyword(Keyword::Struct) {
                    ItemKind::Struct(self.parse_class_like(modifiers, true)?)
                } else {
                    self.eat_keyword(Keyword::Class);
                    ItemKind::Class(self.parse_class_like(modifiers, true)?)
                }
            }
        };
        Ok(Item {
            kind,
            span: self.finish(start),
        })
    }

    fn parse_class_like(&mut self, modifiers: Vec<Modifier>, is_record: bool) -> Result<ClassDecl, ParseError> {
        let (name, name_span) = self.consume_ident()?;
        let type_params = self.parse_type_params_opt()?;

        let mut members = Vec::new();
        if self.at(TokenKind::LParen) {
            let params = self.parse_params(TokenKind::LParen, TokenKind::RParen)?;
            if is_record {
                members.extend(params.into_iter().map(positional_property));
            }
        }

        let bases = self.parse_base_list()?;
        self.skip_constraints()?;

        if !self.eat(TokenKind::Semicolon) {
            self.consume(TokenKind::LBrace)?;
            members.extend(self.parse_members(Some(&name)));
            if let Err(error) = self.consume(TokenKind::RBrace) {
                self.report(error);
            }
            self.eat(TokenKind::Semicolon);
        }

        Ok(ClassDecl {
            modifiers,
            name,
            name_span,
            type_params,
            bases,
            members,
            is_record,
        })
    }

    fn parse_interface(&mut self, modifiers: Vec<Modifier>) -> Result<InterfaceDecl, ParseError> {
        let (name, name_span) = self.consume_ident()?;
        let type_params = self.parse_type_params_opt()?;
        let bases = self.parse_base_list()?;
        self.skip_constraints()?;

        self.consume(TokenKind::LBrace)?;
        let members = self.parse_members(Some(&name));
        if let Err(error) = self.consume(TokenKind::RBrace) {
            self.report(error);
        }
        self.eat(TokenKind::Semicolon);

        Ok(InterfaceDecl {
            modifiers,
            name,
            name_span,
            type_params,
            bases,
            members,
        })
    }

    fn parse_base_list(&mut self) -> Result<Vec<BaseClause>, ParseError> {
        let mut bases = Vec::new();
        if self.eat(TokenKind::Colon) {
            loop {
                let ty = self.parse_type()?;
                if self.at(TokenKind::LParen) {
                    // record base arguments
                    self.skip_balanced()?;
                }
                bases.push(BaseClause {
                    ty,
                    relation: BaseRelation::Inherits,
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(bases)
    }

    /// `where T : class, new()` clauses are parsed over and dropped
    fn skip_constraints(&mut self) -> Result<(), ParseError> {
        while self.eat_word("where") {
            while !self.at_any(&[
                TokenKind::LBrace,
                TokenKind::Semicolon,
                TokenKind::FatArrow,
                TokenKind::Eof,
            ]) && !self.at_word("where")
            {
                if self.at(TokenKind::LParen) {
                    self.skip_balanced()?;
                } else {
                    self.advance();
                }
            }
        }
        Ok(())
    }

    fn parse_enum(&mut self, modifiers: Vec<Modifier>) -> Result<EnumDecl, ParseError> {
        let (name, name_span) = self.consume_ident()?;
        let underlying = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.consume(TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            self.skip_attributes()?;
            match self.parse_enum_member() {
                Ok(member) => members.push(member),
                Err(error) => {
                    self.report(error);
                    self.skip_until(&[TokenKind::Comma, TokenKind::RBrace], false);
                    self.eat(TokenKind::Comma);
                    continue;
                }
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if let Err(error) = self.consume(TokenKind::RBrace) {
            self.report(error);
        }
        self.eat(TokenKind::Semicolon);

        Ok(EnumDecl {
            modifiers,
            name,
            name_span,
            underlying,
            members,
        })
    }

    /// Numeric literals (optionally negated) are kept; anything else is opaque
    fn parse_enum_member(&mut self) -> Result<EnumMemberDecl, ParseError> {
        let start = self.span();
        let (name, _) = self.consume_ident()?;
        let initializer = if self.eat(TokenKind::Eq) {
            Some(self.parse_enum_value())
        } else {
            None
        };
        Ok(EnumMemberDecl {
            name,
            initializer,
            span: self.finish(start),
        })
    }

    /// `Name (= value)?` left over after an enum body closed early.
    /// Rewinds and returns `None` unless a `,` or `}` follows.
    fn parse_stray_enum_member(&mut self) -> Option<Item> {
        if !self.at(TokenKind::Ident)
            || !matches!(
                self.peek_ahead(1),
                TokenKind::Comma | TokenKind::Eq | TokenKind::RBrace | TokenKind::Eof
            )
        {
            return None;
        }
        let checkpoint = self.checkpoint();
        let member = match self.parse_enum_member() {
            Ok(member) if matches!(self.peek(), TokenKind::Comma | TokenKind::RBrace | TokenKind::Eof) => member,
            _ => {
                self.rewind(checkpoint);
                return None;
            }
        };
        self.eat(TokenKind::Comma);
        self.report(ParseError::StrayMember {
            name: member.name.clone(),
            span: member.span,
        });
        Some(Item {
            span: member.span,
            kind: ItemKind::StrayEnumMember(member),
        })
    }

    fn parse_enum_value(&mut self) -> Expr {
        let ends_value = |kind: TokenKind| matches!(kind, TokenKind::Comma | TokenKind::RBrace);
        let start = self.span();

        if self.at(TokenKind::Number) && ends_value(self.peek_ahead(1)) {
            let token = self.advance();
            return Expr {
                kind: ExprKind::Literal(Literal::Number(self.text(token).to_string())),
                span: token.span,
            };
        }
        if self.at(TokenKind::Minus) && self.peek_ahead(1) == TokenKind::Number && ends_value(self.peek_ahead(2)) {
            self.advance();
            let token = self.advance();
            let operand = Expr {
                kind: ExprKind::Literal(Literal::Number(self.text(token).to_string())),
                span: token.span,
            };
            return Expr {
                kind: ExprKind::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                },
                span: self.finish(start),
            };
        }
        opaque(self.skip_until(&[TokenKind::Comma, TokenKind::RBrace], true))
    }

    fn parse_delegate(&mut self, modifiers: Vec<Modifier>) -> Result<DelegateDecl, ParseError> {
        let return_type = self.parse_type()?;
        let (name, _) = self.consume_ident()?;
        let type_params = self.parse_type_params_opt()?;
        let params = self.parse_params(TokenKind::LParen, TokenKind::RParen)?;
        self.skip_constraints()?;
        self.consume(TokenKind::Semicolon)?;
        Ok(DelegateDecl {
            modifiers,
            name,
            type_params,
            params,
            return_type,
        })
    }

    // === Members ===

    fn parse_members(&mut self, type_name: Option<&str>) -> Vec<MemberDecl> {
        let mut members = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            match self.parse_member(type_name) {
                Ok(mut parsed) => members.append(&mut parsed),
                Err(error) => {
                    self.report(error);
                    self.recover(is_declaration_start);
                }
            }
        }
        members
    }

    fn parse_member(&mut self, type_name: Option<&str>) -> Result<Vec<MemberDecl>, ParseError> {
        let start = self.span();
        self.skip_attributes()?;
        if self.eat(TokenKind::Semicolon) {
            return Ok(vec![]);
        }
        let modifiers = self.parse_modifiers();
        self.parse_member_rest(start, modifiers, type_name)
    }

    /// Everything after the modifiers. A field declaration with several
    /// declarators yields one member per name.
    fn parse_member_rest(
        &mut self,
        start: Span,
        modifiers: Vec<Modifier>,
        type_name: Option<&str>,
    ) -> Result<Vec<MemberDecl>, ParseError> {
        if self.at_type_keyword() {
            let item = self.parse_type_decl(start, modifiers)?;
            return Ok(vec![MemberDecl {
                span: item.span,
                kind: MemberKind::NestedType(Box::new(item)),
            }]);
        }

        if self.eat_keyword(Keyword::Event) {
            let ty = self.parse_type()?;
            let (name, name_span) = self.parse_member_name()?;
            if self.at(TokenKind::LBrace) {
                self.parse_property_body()?;
                return Ok(vec![MemberDecl {
                    kind: MemberKind::Field(FieldDecl {
                        modifiers,
                        name,
                        name_span,
                        ty: Some(ty),
                        initializer: None,
                        optional: false,
                        is_event: true,
                    }),
                    span: self.finish(start),
                }]);
            }
            return self.parse_fields(start, modifiers, ty, name, name_span, true);
        }

        if self.eat(TokenKind::Tilde) {
            // finalizer
            self.consume_ident()?;
            self.parse_params(TokenKind::LParen, TokenKind::RParen)?;
            self.parse_body()?;
            return Ok(vec![]);
        }

        if self.at(TokenKind::Ident)
            && self.peek_ahead(1) == TokenKind::LParen
            && type_name.map_or(true, |name| name == self.current_text())
        {
            return Ok(vec![self.parse_constructor(start, modifiers)?]);
        }

        if self.at_keyword(Keyword::Implicit) || self.at_keyword(Keyword::Explicit) {
            // conversion operator
            self.advance();
            self.consume(TokenKind::Keyword(Keyword::Operator))?;
            self.parse_type()?;
            self.parse_params(TokenKind::LParen, TokenKind::RParen)?;
            self.parse_body()?;
            return Ok(vec![]);
        }

        let ty = self.parse_type()?;

        if self.eat_keyword(Keyword::Operator) {
            while !self.at(TokenKind::LParen) && !self.at_eof() {
                self.advance();
            }
            self.parse_params(TokenKind::LParen, TokenKind::RParen)?;
            self.parse_body()?;
            return Ok(vec![]);
        }

        if self.at_keyword(Keyword::This) {
            let this = self.advance();
            let params = self.parse_params(TokenKind::LBracket, TokenKind::RBracket)?;
            let (accessors, expression_body) = self.parse_property_body()?;
            return Ok(vec![MemberDecl {
                kind: MemberKind::Property(PropertyDecl {
                    modifiers,
                    name: "this[]".to_string(),
                    name_span: this.span,
                    ty: Some(ty),
                    params,
                    accessors,
                    expression_body,
                    initializer: None,
                }),
                span: self.finish(start),
            }]);
        }

        let (name, name_span) = self.parse_member_name()?;
        let type_params = self.parse_type_params_opt()?;

        match self.peek() {
            TokenKind::LParen => {
                let params = self.parse_params(TokenKind::LParen, TokenKind::RParen)?;
                self.skip_constraints()?;
                let (body, expression_body) = self.parse_body()?;
                Ok(vec![MemberDecl {
                    kind: MemberKind::Method(MethodDecl {
                        modifiers,
                        name,
                        name_span,
                        type_params,
                        params,
                        return_type: Some(ty),
                        body,
                        expression_body,
                        optional: false,
                        is_generator: false,
                    }),
                    span: self.finish(start),
                }])
            }
            TokenKind::LBrace | TokenKind::FatArrow => {
                let (accessors, expression_body) = self.parse_property_body()?;
                let initializer = if self.eat(TokenKind::Eq) {
                    let span = self.skip_until(&[TokenKind::Semicolon], true);
                    self.consume(TokenKind::Semicolon)?;
                    Some(opaque(span))
                } else {
                    None
                };
                Ok(vec![MemberDecl {
                    kind: MemberKind::Property(PropertyDecl {
                        modifiers,
                        name,
                        name_span,
                        ty: Some(ty),
                        params: vec![],
                        accessors,
                        expression_body,
                        initializer,
                    }),
                    span: self.finish(start),
                }])
            }
            _ => self.parse_fields(start, modifiers, ty, name, name_span, false),
        }
    }

    /// Explicit interface implementations (`IFoo.Bar`) keep the last segment
    fn parse_member_name(&mut self) -> Result<(String, Span), ParseError> {
        let mut name = self.consume_ident()?;
        while self.at(TokenKind::Dot) && self.peek_ahead(1) == TokenKind::Ident {
            self.advance();
            name = self.consume_ident()?;
        }
        Ok(name)
    }

    fn parse_fields(
        &mut self,
        start: Span,
        modifiers: Vec<Modifier>,
        ty: TypeExpr,
        name: String,
        name_span: Span,
        is_event: bool,
    ) -> Result<Vec<MemberDecl>, ParseError> {
        let mut fields = Vec::new();
        let mut decl_start = start;
        let (mut name, mut name_span) = (name, name_span);
        loop {
            let initializer = if self.eat(TokenKind::Eq) {
                Some(opaque(
                    self.skip_until(&[TokenKind::Comma, TokenKind::Semicolon], true),
                ))
            } else {
                None
            };
            let more = self.at(TokenKind::Comma);
            if !more {
                self.consume(TokenKind::Semicolon)?;
            }
            fields.push(MemberDecl {
                kind: MemberKind::Field(FieldDecl {
                    modifiers: modifiers.clone(),
                    name,
                    name_span,
                    ty: Some(ty.clone()),
                    initializer,
                    optional: false,
                    is_event,
                }),
                span: self.finish(decl_start),
            });
            if !more {
                break;
            }
            self.advance();
            decl_start = self.span();
            (name, name_span) = self.consume_ident()?;
        }
        Ok(fields)
    }

    fn parse_constructor(&mut self, start: Span, modifiers: Vec<Modifier>) -> Result<MemberDecl, ParseError> {
        self.consume_ident()?;
        let params = self.parse_params(TokenKind::LParen, TokenKind::RParen)?;
        if self.eat(TokenKind::Colon) {
            if !(self.eat_keyword(Keyword::Base) || self.eat_keyword(Keyword::This)) {
                return Err(ParseError::unexpected("'base' or 'this'", self.peek(), self.span()));
            }
            if self.at(TokenKind::LParen) {
                self.skip_balanced()?;
            }
        }
        let (body, _) = self.parse_body()?;
        Ok(MemberDecl {
            kind: MemberKind::Constructor(ConstructorDecl {
                modifiers,
                params,
                body,
            }),
            span: self.finish(start),
        })
    }

    /// `{ get; set; }` style accessor list, or `=> expr;`
    fn parse_property_body(&mut self) -> Result<(Vec<AccessorDecl>, Option<Expr>), ParseError> {
        if self.eat(TokenKind::FatArrow) {
            let span = self.skip_until(&[TokenKind::Semicolon], true);
            self.consume(TokenKind::Semicolon)?;
            return Ok((vec![], Some(opaque(span))));
        }

        self.consume(TokenKind::LBrace)?;
        let mut accessors = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            let start = self.span();
            self.skip_attributes()?;
            let modifiers = self.parse_modifiers();
            let keyword = self.consume(TokenKind::Ident)?;
            let kind = AccessorKind::from_word(self.text(keyword));
            let (body, expression_body) = self.parse_body()?;
            accessors.push(AccessorDecl {
                modifiers,
                kind,
                name: None,
                params: vec![],
                return_type: None,
                body,
                expression_body,
                span: self.finish(start),
            });
        }
        self.consume(TokenKind::RBrace)?;
        Ok((accessors, None))
    }

    /// Block body, `=> expr;`, or `;`
    fn parse_body(&mut self) -> Result<(Option<Block>, Option<Expr>), ParseError> {
        match self.peek() {
            TokenKind::LBrace => Ok((Some(self.parse_opaque_block()?), None)),
            TokenKind::FatArrow => {
                self.advance();
                let span = self.skip_until(&[TokenKind::Semicolon], true);
                self.consume(TokenKind::Semicolon)?;
                Ok((None, Some(opaque(span))))
            }
            TokenKind::Semicolon => {
                self.advance();
                Ok((None, None))
            }
            found => Err(ParseError::unexpected("body or ';'", found, self.span())),
        }
    }

    fn parse_opaque_block(&mut self) -> Result<Block, ParseError> {
        let open = self.consume(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        loop {
            match self.peek() {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(ParseError::UnbalancedDelimiter {
                        delimiter: '{',
                        span: open.span,
                    })
                }
                _ => {
                    let start = self.span();
                    self.skip_statement()?;
                    stmts.push(Stmt {
                        kind: StmtKind::Opaque,
                        span: self.finish(start),
                    });
                }
            }
        }
        Ok(Block {
            stmts,
            span: self.finish(open.span),
        })
    }

    /// One statement: through a `;` or a braced block at depth zero
    fn skip_statement(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                TokenKind::Semicolon => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::LBrace => {
                    self.skip_balanced()?;
                    if self.eat(TokenKind::Semicolon) {
                        return Ok(());
                    }
                    if !self.at_any(&[TokenKind::RParen, TokenKind::Comma, TokenKind::Dot]) {
                        return Ok(());
                    }
                }
                TokenKind::LParen | TokenKind::LBracket => {
                    self.skip_balanced()?;
                }
                TokenKind::RBrace | TokenKind::Eof => return Ok(()),
                _ => {
                    self.advance();
                }
            }
        }
    }

    // === Shared pieces ===

    fn skip_attributes(&mut self) -> Result<(), ParseError> {
        while self.at(TokenKind::LBracket) {
            self.skip_balanced()?;
        }
        Ok(())
    }

    fn parse_modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        loop {
            let token = self.current();
            let is_modifier = match token.kind {
                TokenKind::Keyword(kw) => kw.is_modifier() && kw != Keyword::Default,
                TokenKind::Ident => {
                    CONTEXTUAL_MODIFIERS.contains(&self.text(token))
                        && matches!(self.peek_ahead(1), TokenKind::Ident | TokenKind::Keyword(_))
                }
                _ => false,
            };
            if !is_modifier {
                break;
            }
            self.advance();
            modifiers.push(Modifier {
                kind: ModifierKind::from_word(self.text(token)),
                span: token.span,
            });
        }
        modifiers
    }

    fn parse_type_params_opt(&mut self) -> Result<Vec<TypeParam>, ParseError> {
        if !self.at(TokenKind::Lt) {
            return Ok(vec![]);
        }
        self.advance();
        let mut params = Vec::new();
        loop {
            self.skip_attributes()?;
            let start = self.span();
            if self.at_keyword(Keyword::In) || self.at_keyword(Keyword::Out) {
                self.advance();
            }
            let (name, _) = self.consume_ident()?;
            params.push(TypeParam {
                name,
                constraint: None,
                default: None,
                span: self.finish(start),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::Gt)?;
        Ok(params)
    }

    fn parse_params(&mut self, open: TokenKind, close: TokenKind) -> Result<Vec<Param>, ParseError> {
        self.consume(open)?;
        let mut params = Vec::new();
        while !self.at(close) && !self.at_eof() {
            let start = self.span();
            self.skip_attributes()?;

            let mut modifiers = Vec::new();
            let mut rest = false;
            loop {
                let token = self.current();
                let is_modifier = match token.kind {
                    TokenKind::Keyword(
                        Keyword::Ref | Keyword::Out | Keyword::In | Keyword::Params | Keyword::This | Keyword::Readonly,
                    ) => true,
                    TokenKind::Ident => {
                        self.text(token) == "scoped" && self.peek_ahead(1) != TokenKind::Comma
                            && self.peek_ahead(1) != close
                    }
                    _ => false,
                };
                if !is_modifier {
                    break;
                }
                rest |= token.kind == TokenKind::Keyword(Keyword::Params);
                self.advance();
                modifiers.push(Modifier {
                    kind: ModifierKind::from_word(self.text(token)),
                    span: token.span,
                });
            }

            let ty = self.parse_type()?;
            let (name, name_span) = self.consume_ident()?;
            let default = if self.eat(TokenKind::Eq) {
                Some(opaque(self.skip_until(&[TokenKind::Comma, close], true)))
            } else {
                None
            };
            params.push(Param {
                modifiers,
                pattern: Pattern::ident(name, name_span),
                ty: Some(ty),
                optional: default.is_some(),
                default,
                rest,
                span: self.finish(start),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(close)?;
        Ok(params)
    }

    // === Types ===

    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span();
        let mut ty = match self.peek() {
            TokenKind::LParen => self.parse_tuple_type()?,
            _ => self.parse_named_type()?,
        };
        loop {
            match self.peek() {
                TokenKind::Question => {
                    self.advance();
                    ty = TypeExpr {
                        kind: TypeExprKind::Nullable(Box::new(ty)),
                        span: self.finish(start),
                    };
                }
                TokenKind::LBracket
                    if matches!(self.peek_ahead(1), TokenKind::RBracket | TokenKind::Comma) =>
                {
                    self.advance();
                    while self.eat(TokenKind::Comma) {}
                    self.consume(TokenKind::RBracket)?;
                    ty = TypeExpr {
                        kind: TypeExprKind::Array(Box::new(ty)),
                        span: self.finish(start),
                    };
                }
                TokenKind::Star => {
                    // unsafe pointer; the pointee stands in for it
                    self.advance();
                }
                _ => break,
            }
        }
        Ok(ty)
    }

    fn parse_named_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span();
        let mut path = Vec::new();
        let mut args = Vec::new();
        loop {
            let token = self.current();
            match token.kind {
                TokenKind::Ident => {}
                TokenKind::Keyword(kw) if kw.is_predefined_type() => {}
                found => return Err(ParseError::unexpected("type", found, token.span)),
            }
            self.advance();
            path.push(self.text(token).to_string());
            if self.at(TokenKind::Lt) {
                args = self.parse_type_args()?;
            }
            if self.at_any(&[TokenKind::Dot, TokenKind::ColonColon]) && self.peek_ahead(1) == TokenKind::Ident {
                self.advance();
                continue;
            }
            break;
        }
        Ok(TypeExpr {
            kind: TypeExprKind::Named { path, args },
            span: self.finish(start),
        })
    }

    fn parse_type_args(&mut self) -> Result<Vec<TypeExpr>, ParseError> {
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

    fn parse_tuple_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span();
        self.consume(TokenKind::LParen)?;
        let mut elements = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at_eof() {
            elements.push(self.parse_type()?);
            // optional element name
            self.eat(TokenKind::Ident);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RParen)?;
        Ok(TypeExpr {
            kind: TypeExprKind::Tuple(elements),
            span: self.finish(start),
        })
    }
}

/// Positional record parameter as a public `{ get; init; }` property
fn positional_property(param: Param) -> MemberDecl {
    let accessor = |kind| AccessorDecl {
        modifiers: vec![],
        kind,
        name: None,
        params: vec![],
        return_type: None,
        body: None,
        expression_body: None,
        span: param.span,
    };
    let accessors = vec![accessor(AccessorKind::Get), accessor(AccessorKind::Init)];
    MemberDecl {
        span: param.span,
        kind: MemberKind::Property(PropertyDecl {
            modifiers: vec![Modifier {
                kind: ModifierKind::Public,
                span: param.span,
            }],
            name: param.pattern.as_ident().unwrap_or_default().to_string(),
            name_span: param.pattern.span,
            ty: param.ty,
            params: vec![],
            accessors,
            expression_body: None,
            initializer: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unisym_lexer::tokenize;

    fn parse(source: &str) -> (SyntaxTree, Vec<ParseError>) {
        let output = tokenize(source, Profile::CSharp);
        CSharpParser::new(source, &output.tokens).parse_file()
    }

    fn first_class(tree: &SyntaxTree) -> &ClassDecl {
        tree.declarations()
            .into_iter()
            .find_map(|item| match &item.kind {
                ItemKind::Class(c) => Some(c),
                _ => None,
            })
            .expect("no class")
    }

    #[test]
    fn test_class_with_bases_and_members() {
        let source = r#"
            public class Example : Base, IThing
            {
                private int _count;
                public string Name { get; set; }
                public const double PI = 3.14;
                public Example(int count) : base(count) { _count = count; }
                public override void Run() { Console.WriteLine($"{_count}"); }
            }
        "#;
        let (tree, errors) = parse(source);
        assert!(errors.is_empty(), "{:?}", errors);
        let class = first_class(&tree);
        assert_eq!(class.name, "Example");
        let bases: Vec<_> = class.bases.iter().filter_map(|b| b.ty.name()).collect();
        assert_eq!(bases, vec!["Base", "IThing"]);
        let names: Vec<_> = class.members.iter().filter_map(|m| m.name()).collect();
        assert_eq!(names, vec!["_count", "Name", "PI", "constructor", "Run"]);
        assert!(matches!(class.members[1].kind, MemberKind::Property(_)));
        assert!(matches!(class.members[3].kind, MemberKind::Constructor(_)));
    }

    #[test]
    fn test_file_scoped_namespace_and_usings() {
        let source = "using System;\nusing static System.Math;\nusing IO = System.IO;\nnamespace Demo.App;\npublic struct P { public int X, Y; }";
        let (tree, errors) = parse(source);
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(tree.items.len(), 4);
        match &tree.items[2].kind {
            ItemKind::Using(using) => {
                assert_eq!(using.alias.as_deref(), Some("IO"));
                assert_eq!(using.path, "System.IO");
            }
            other => panic!("expected using, got {:?}", other),
        }
        match &tree.items[3].kind {
            ItemKind::Namespace(ns) => {
                assert!(ns.file_scoped);
                assert_eq!(ns.name, "Demo.App");
                match &ns.items[0].kind {
                    ItemKind::Struct(s) => assert_eq!(s.members.len(), 2),
                    other => panic!("expected struct, got {:?}", other),
                }
            }
            other => panic!("expected namespace, got {:?}", other),
        }
    }

    #[test]
    fn test_enum_values() {
        let (tree, errors) = parse("enum E : byte { A, B = 4, C = -1, D = 1 << 3, }");
        assert!(errors.is_empty(), "{:?}", errors);
        match &tree.items[0].kind {
            ItemKind::Enum(e) => {
                assert_eq!(e.members.len(), 4);
                assert!(e.members[0].initializer.is_none());
                assert!(matches!(
                    e.members[1].initializer.as_ref().map(|i| &i.kind),
                    Some(ExprKind::Literal(Literal::Number(n))) if n == "4"
                ));
                assert!(matches!(
                    e.members[2].initializer.as_ref().map(|i| &i.kind),
                    Some(ExprKind::Unary { op: UnaryOp::Neg, .. })
                ));
                assert!(matches!(
                    e.members[3].initializer.as_ref().map(|i| &i.kind),
                    Some(ExprKind::Opaque)
                ));
            }
            other => panic!("expected enum, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_members_and_attributes() {
        let source = r#"
            [Serializable]
            public class Repo<T> where T : class, new()
            {
                [Obsolete("x")] private Dictionary<string, List<T>> _items = new Dictionary<string, List<T>>(), _spare;
                public Task<T?> FindAsync<TKey>(TKey key, int limit = 10) => Lookup(key);
                public T this[int index] { get { return default; } }
            }
        "#;
        let (tree, errors) = parse(source);
        assert!(errors.is_empty(), "{:?}", errors);
        let class = first_class(&tree);
        assert_eq!(class.type_params.len(), 1);
        let names: Vec<_> = class.members.iter().filter_map(|m| m.name()).collect();
        assert_eq!(names, vec!["_items", "_spare", "FindAsync", "this[]"]);
    }

    #[test]
    fn test_stray_brace_keeps_later_declarations() {
        let source = "class A { int x; } } class B { }";
        let (tree, errors) = parse(source);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), "E-PARSE-003");
        let names: Vec<_> = tree.items.iter().filter_map(|i| i.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_member_outside_type_is_stray() {
        let source = "class A { int x; }\npublic void Orphan() { }\nclass B { }";
        let (tree, errors) = parse(source);
        assert!(errors.iter().any(|e| e.code() == "E-PARSE-008"));
        assert!(matches!(tree.items[1].kind, ItemKind::StrayMember(_)));
        assert_eq!(tree.items[2].name(), Some("B"));
    }

    #[test]
    fn test_enum_members_after_early_close_are_stray() {
        let source = "enum E { A, } B = 2, C }\nclass After { }";
        let (tree, errors) = parse(source);
        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec!["E-PARSE-008", "E-PARSE-008", "E-PARSE-003"]);
        let names: Vec<_> = tree.items.iter().filter_map(|i| i.name()).collect();
        assert_eq!(names, vec!["E", "B", "C", "After"]);
        let ItemKind::StrayEnumMember(b) = &tree.items[1].kind else {
            panic!("expected stray enum member, got {:?}", tree.items[1].kind);
        };
        assert!(b.initializer.is_some());
    }

    #[test]
    fn test_broken_member_recovers() {
        let source = "class A { int = 5; public int Ok; }";
        let (tree, errors) = parse(source);
        assert_eq!(errors.len(), 1);
        let class = first_class(&tree);
        assert_eq!(class.members.len(), 1);
        assert_eq!(class.members[0].name(), Some("Ok"));
    }

    #[test]
    fn test_record_positional_properties() {
        let (tree, errors) = parse("public record Person(string Name, int Age);");
        assert!(errors.is_empty(), "{:?}", errors);
        let class = first_class(&tree);
        assert!(class.is_record);
        assert_eq!(class.members.len(), 2);
    }
}
