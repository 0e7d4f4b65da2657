//! Declarations: classes, interfaces, enums, functions, type aliases,
//! namespaces, imports and exports

use unisym_ast::*;
use unisym_lexer::{Keyword, TokenKind};

use super::{is_member_start, is_property_key_start, unquote, TypeScriptParser};
use crate::ParseError;

/// Tokens after a modifier word that make the word a member name instead
fn ends_modifier_run(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LParen
            | TokenKind::Lt
            | TokenKind::Colon
            | TokenKind::Question
            | TokenKind::Eq
            | TokenKind::Semicolon
            | TokenKind::Comma
            | TokenKind::RBrace
            | TokenKind::RParen
            | TokenKind::Bang
            | TokenKind::FatArrow
            | TokenKind::Eof
    )
}

impl<'a> TypeScriptParser<'a> {
    /// Declaration at the cursor as a statement, after any `modifiers` the
    /// caller consumed. `Ok(None)` leaves the cursor untouched.
    pub(super) fn parse_declaration(
        &mut self,
        start: Span,
        mut modifiers: Vec<Modifier>,
    ) -> Result<Option<Stmt>, ParseError> {
        let mut prefixed = false;
        loop {
            let next = self.peek_ahead(1);
            let word = if self.at_word("abstract") && next == TokenKind::Keyword(Keyword::Class) {
                "abstract"
            } else if self.at_word("async")
                && next == TokenKind::Keyword(Keyword::Function)
                && !self.newline_after_current()
            {
                "async"
            } else if self.at_word("declare")
                && matches!(next, TokenKind::Ident | TokenKind::Keyword(_))
                && !self.newline_after_current()
            {
                "declare"
            } else {
                break;
            };
            let token = self.advance();
            modifiers.push(Modifier {
                kind: ModifierKind::from_word(word),
                span: token.span,
            });
            prefixed = true;
        }

        let anonymous_ok = has_modifier(&modifiers, &ModifierKind::Default);
        let kind = match self.peek() {
            TokenKind::Keyword(Keyword::Function) => {
                ItemKind::Function(self.parse_function(modifiers, !anonymous_ok)?)
            }
            TokenKind::Keyword(Keyword::Class) => ItemKind::Class(self.parse_class(modifiers, !anonymous_ok)?),
            TokenKind::Keyword(Keyword::Interface) => ItemKind::Interface(self.parse_interface(modifiers)?),
            TokenKind::Keyword(Keyword::Enum) => ItemKind::Enum(self.parse_enum(modifiers)?),
            TokenKind::Keyword(Keyword::Const) if self.peek_ahead(1) == TokenKind::Keyword(Keyword::Enum) => {
                let token = self.advance();
                modifiers.push(Modifier {
                    kind: ModifierKind::Const,
                    span: token.span,
                });
                ItemKind::Enum(self.parse_enum(modifiers)?)
            }
            TokenKind::Keyword(Keyword::Var | Keyword::Let | Keyword::Const) => {
                let decl = self.parse_var_decl(modifiers)?;
                self.consume_semicolon()?;
                return Ok(Some(Stmt {
                    kind: StmtKind::Var(decl),
                    span: self.finish(start),
                }));
            }
            TokenKind::Ident if self.at_type_alias() => ItemKind::TypeAlias(self.parse_type_alias(modifiers)?),
            TokenKind::Ident if self.at_namespace() => ItemKind::Namespace(self.parse_namespace(modifiers)?),
            _ if prefixed => return Err(ParseError::ExpectedDeclaration { span: self.span() }),
            _ => return Ok(None),
        };
        let span = self.finish(start);
        Ok(Some(Stmt {
            kind: StmtKind::Item(Box::new(Item { kind, span })),
            span,
        }))
    }

    fn at_type_alias(&self) -> bool {
        self.at_word("type") && self.peek_ahead(1) == TokenKind::Ident && !self.newline_after_current()
    }

    fn at_namespace(&self) -> bool {
        if self.at_word("global") {
            return self.peek_ahead(1) == TokenKind::LBrace;
        }
        (self.at_word("namespace") || self.at_word("module"))
            && matches!(self.peek_ahead(1), TokenKind::Ident | TokenKind::String)
            && !self.newline_after_current()
    }

    // === Variables ===

    pub(super) fn parse_var_decl(&mut self, modifiers: Vec<Modifier>) -> Result<VariableDecl, ParseError> {
        let kind = match self.advance().kind {
            TokenKind::Keyword(Keyword::Var) => VarKind::Var,
            TokenKind::Keyword(Keyword::Let) => VarKind::Let,
            _ => VarKind::Const,
        };
        let mut declarators = Vec::new();
        loop {
            let start = self.span();
            let pattern = self.parse_binding_pattern()?;
            // definite assignment: `let x!: number;`
            self.eat(TokenKind::Bang);
            let ty = if self.eat(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let init = if self.eat(TokenKind::Eq) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            declarators.push(VarDeclarator {
                pattern,
                ty,
                init,
                span: self.finish(start),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(VariableDecl {
            modifiers,
            kind,
            declarators,
        })
    }

    // === Functions ===

    /// `function name<T>(params): R { ... }`, starting at `function`
    pub(super) fn parse_function(
        &mut self,
        modifiers: Vec<Modifier>,
        name_required: bool,
    ) -> Result<FunctionDecl, ParseError> {
        self.consume(TokenKind::Keyword(Keyword::Function))?;
        let is_generator = self.eat(TokenKind::Star);
        let (name, name_span) = if self.at(TokenKind::Ident) {
            self.consume_ident()?
        } else if name_required {
            return Err(ParseError::unexpected("function name", self.peek(), self.span()));
        } else {
            let at = self.span().start;
            (String::new(), Span::new(at, at))
        };
        self.parse_function_rest(modifiers, name, name_span, is_generator)
    }

    /// Everything after the function name
    pub(super) fn parse_function_rest(
        &mut self,
        modifiers: Vec<Modifier>,
        name: String,
        name_span: Span,
        is_generator: bool,
    ) -> Result<FunctionDecl, ParseError> {
        let type_params = self.parse_type_params_opt()?;
        let params = self.parse_params()?;
        let return_type = if self.eat(TokenKind::Colon) {
            Some(self.parse_return_type()?)
        } else {
            None
        };
        let body = if self.at(TokenKind::LBrace) {
            Some(self.parse_block()?)
        } else {
            self.consume_semicolon()?;
            None
        };
        Ok(FunctionDecl {
            modifiers,
            name,
            name_span,
            type_params,
            params,
            return_type,
            body,
            is_generator,
        })
    }

    pub(super) fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.consume(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at_eof() {
            let start = self.span();
            self.skip_decorators()?;

            // parameter properties: `constructor(private readonly x: T)`
            let mut modifiers = Vec::new();
            loop {
                let token = self.current();
                let candidate = match token.kind {
                    TokenKind::Keyword(Keyword::Public | Keyword::Private | Keyword::Protected) => true,
                    TokenKind::Ident => matches!(self.text(token), "readonly" | "override"),
                    _ => false,
                };
                let binding_follows = matches!(
                    self.peek_ahead(1),
                    TokenKind::Ident | TokenKind::LBrace | TokenKind::LBracket
                );
                if !candidate || !binding_follows {
                    break;
                }
                self.advance();
                modifiers.push(Modifier {
                    kind: ModifierKind::from_word(self.text(token)),
                    span: token.span,
                });
            }

            let rest = self.eat(TokenKind::Ellipsis);
            let pattern = self.parse_binding_pattern()?;
            let optional = self.eat(TokenKind::Question);
            let ty = if self.eat(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let default = if self.eat(TokenKind::Eq) {
                Some(self.with_in(|p| p.parse_assignment())?)
            } else {
                None
            };
            params.push(Param {
                modifiers,
                pattern,
                ty,
                optional: optional || default.is_some(),
                default,
                rest,
                span: self.finish(start),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RParen)?;
        Ok(params)
    }

    // === Classes ===

    /// `class Name<T> extends Base implements I { ... }`, starting at `class`
    pub(super) fn parse_class(
        &mut self,
        modifiers: Vec<Modifier>,
        name_required: bool,
    ) -> Result<ClassDecl, ParseError> {
        self.consume(TokenKind::Keyword(Keyword::Class))?;
        let (name, name_span) = if self.at(TokenKind::Ident) {
            self.consume_ident()?
        } else if name_required {
            return Err(ParseError::unexpected("class name", self.peek(), self.span()));
        } else {
            let at = self.span().start;
            (String::new(), Span::new(at, at))
        };
        let type_params = self.parse_type_params_opt()?;

        let mut bases = Vec::new();
        if self.eat_keyword(Keyword::Extends) {
            bases.push(BaseClause {
                ty: self.parse_heritage()?,
                relation: BaseRelation::Extends,
            });
        }
        if self.eat_keyword(Keyword::Implements) {
            loop {
                bases.push(BaseClause {
                    ty: self.parse_heritage()?,
                    relation: BaseRelation::Implements,
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        let open = self.consume(TokenKind::LBrace)?;
        let members = self.parse_class_body();
        if !self.eat(TokenKind::RBrace) {
            self.report(ParseError::UnbalancedDelimiter {
                delimiter: '{',
                span: open.span,
            });
        }
        Ok(ClassDecl {
            modifiers,
            name,
            name_span,
            type_params,
            bases,
            members,
            is_record: false,
        })
    }

    /// Heritage clause entry: `Base<T>`, `ns.Base`, or `Mixin(Base)`
    fn parse_heritage(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span();
        let mut path = vec![self.consume_name()?.0];
        while self.eat(TokenKind::Dot) {
            path.push(self.consume_name()?.0);
        }
        let args = if self.at(TokenKind::Lt) {
            self.parse_type_args()?
        } else {
            vec![]
        };
        let ty = TypeExpr {
            kind: TypeExprKind::Named { path, args },
            span: self.finish(start),
        };
        if self.at(TokenKind::LParen) {
            self.skip_balanced()?;
        }
        Ok(ty)
    }

    fn parse_class_body(&mut self) -> Vec<MemberDecl> {
        let mut members = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            match self.parse_class_member() {
                Ok(Some(member)) => members.push(member),
                Ok(None) => {}
                Err(error) => {
                    self.report(error);
                    self.recover(is_member_start);
                }
            }
        }
        members
    }

    pub(super) fn parse_class_member(&mut self) -> Result<Option<MemberDecl>, ParseError> {
        let start = self.span();
        self.skip_decorators()?;
        if self.eat(TokenKind::Semicolon) {
            return Ok(None);
        }
        let modifiers = self.parse_member_modifiers();

        if self.at(TokenKind::LBrace) && has_modifier(&modifiers, &ModifierKind::Static) {
            let body = self.parse_block()?;
            return Ok(Some(MemberDecl {
                kind: MemberKind::StaticBlock(body),
                span: self.finish(start),
            }));
        }

        if self.at_index_signature() {
            let signature = self.parse_index_signature(modifiers)?;
            self.consume_member_separator()?;
            return Ok(Some(MemberDecl {
                kind: MemberKind::IndexSignature(signature),
                span: self.finish(start),
            }));
        }

        if self.at_accessor() {
            let accessor = self.parse_accessor(start, modifiers)?;
            return Ok(Some(MemberDecl {
                kind: MemberKind::Accessor(accessor),
                span: self.finish(start),
            }));
        }

        let is_generator = self.eat(TokenKind::Star);

        if self.at_word("constructor") && self.peek_ahead(1) == TokenKind::LParen {
            self.advance();
            let params = self.parse_params()?;
            let body = if self.at(TokenKind::LBrace) {
                Some(self.parse_block()?)
            } else {
                self.consume_semicolon()?;
                None
            };
            return Ok(Some(MemberDecl {
                kind: MemberKind::Constructor(ConstructorDecl {
                    modifiers,
                    params,
                    body,
                }),
                span: self.finish(start),
            }));
        }

        let (key, name_span) = self.parse_property_key()?;
        let optional = self.eat(TokenKind::Question);
        self.eat(TokenKind::Bang);

        if self.at_any(&[TokenKind::LParen, TokenKind::Lt]) {
            let type_params = self.parse_type_params_opt()?;
            let params = self.parse_params()?;
            let return_type = if self.eat(TokenKind::Colon) {
                Some(self.parse_return_type()?)
            } else {
                None
            };
            let body = if self.at(TokenKind::LBrace) {
                Some(self.parse_block()?)
            } else {
                self.consume_semicolon()?;
                None
            };
            return Ok(Some(MemberDecl {
                kind: MemberKind::Method(MethodDecl {
                    modifiers,
                    name: key.name(),
                    name_span,
                    type_params,
                    params,
                    return_type,
                    body,
                    expression_body: None,
                    optional,
                    is_generator,
                }),
                span: self.finish(start),
            }));
        }

        let ty = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let initializer = if self.eat(TokenKind::Eq) {
            Some(self.parse_assignment()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(Some(MemberDecl {
            kind: MemberKind::Field(FieldDecl {
                modifiers,
                name: key.name(),
                name_span,
                ty,
                initializer,
                optional,
                is_event: false,
            }),
            span: self.finish(start),
        }))
    }

    /// Modifier words before a class member; a word followed by member
    /// syntax is the member's name instead
    fn parse_member_modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        loop {
            let token = self.current();
            let word = self.text(token);
            let candidate = match token.kind {
                TokenKind::Keyword(
                    Keyword::Public | Keyword::Private | Keyword::Protected | Keyword::Static,
                ) => true,
                TokenKind::Ident => matches!(
                    word,
                    "readonly" | "abstract" | "override" | "declare" | "async" | "accessor"
                ),
                _ => false,
            };
            if !candidate || ends_modifier_run(self.peek_ahead(1)) {
                break;
            }
            if word == "async" && self.newline_after_current() {
                break;
            }
            self.advance();
            modifiers.push(Modifier {
                kind: ModifierKind::from_word(word),
                span: token.span,
            });
        }
        modifiers
    }

    /// `get name(` / `set name(` in a class or type body
    fn at_accessor(&self) -> bool {
        (self.at_word("get") || self.at_word("set")) && is_property_key_start(self.peek_ahead(1))
    }

    fn parse_accessor(&mut self, start: Span, modifiers: Vec<Modifier>) -> Result<AccessorDecl, ParseError> {
        let keyword = self.advance();
        let kind = AccessorKind::from_word(self.text(keyword));
        let (key, _) = self.parse_property_key()?;
        let params = self.parse_params()?;
        let return_type = if self.eat(TokenKind::Colon) {
            Some(self.parse_return_type()?)
        } else {
            None
        };
        let body = if self.at(TokenKind::LBrace) {
            Some(self.parse_block()?)
        } else {
            self.consume_member_separator()?;
            None
        };
        Ok(AccessorDecl {
            modifiers,
            kind,
            name: Some(key.name()),
            params,
            return_type,
            body,
            expression_body: None,
            span: self.finish(start),
        })
    }

    /// `[key: string]: T`
    fn at_index_signature(&self) -> bool {
        self.at(TokenKind::LBracket)
            && self.peek_ahead(1) == TokenKind::Ident
            && self.peek_ahead(2) == TokenKind::Colon
    }

    fn parse_index_signature(&mut self, modifiers: Vec<Modifier>) -> Result<IndexSignatureDecl, ParseError> {
        self.consume(TokenKind::LBracket)?;
        let start = self.span();
        let (name, name_span) = self.consume_ident()?;
        self.consume(TokenKind::Colon)?;
        let key_type = self.parse_type()?;
        let param = Param {
            modifiers: vec![],
            pattern: Pattern::ident(name, name_span),
            ty: Some(key_type),
            default: None,
            optional: false,
            rest: false,
            span: self.finish(start),
        };
        self.consume(TokenKind::RBracket)?;
        self.eat(TokenKind::Question);
        let ty = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(IndexSignatureDecl {
            modifiers,
            params: vec![param],
            ty,
        })
    }

    fn consume_member_separator(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenKind::Semicolon) || self.eat(TokenKind::Comma) {
            return Ok(());
        }
        if self.at_any(&[TokenKind::RBrace, TokenKind::Eof]) || self.newline_before() {
            return Ok(());
        }
        Err(ParseError::unexpected("';'", self.peek(), self.span()))
    }

    // === Interfaces and object types ===

    fn parse_interface(&mut self, modifiers: Vec<Modifier>) -> Result<InterfaceDecl, ParseError> {
        self.consume(TokenKind::Keyword(Keyword::Interface))?;
        let (name, name_span) = self.consume_ident()?;
        let type_params = self.parse_type_params_opt()?;
        let mut bases = Vec::new();
        if self.eat_keyword(Keyword::Extends) {
            loop {
                bases.push(BaseClause {
                    ty: self.parse_heritage()?,
                    relation: BaseRelation::Extends,
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let members = self.parse_type_members(true)?;
        Ok(InterfaceDecl {
            modifiers,
            name,
            name_span,
            type_params,
            bases,
            members,
        })
    }

    /// Braced member list of an interface (`recovering`) or object type
    pub(super) fn parse_type_members(&mut self, recovering: bool) -> Result<Vec<MemberDecl>, ParseError> {
        let open = self.consume(TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            match self.parse_type_member() {
                Ok(Some(member)) => members.push(member),
                Ok(None) => {}
                Err(error) if recovering => {
                    self.report(error);
                    self.recover(is_member_start);
                }
                Err(error) => return Err(error),
            }
        }
        if !self.eat(TokenKind::RBrace) {
            let error = ParseError::UnbalancedDelimiter {
                delimiter: '{',
                span: open.span,
            };
            if !recovering {
                return Err(error);
            }
            self.report(error);
        }
        Ok(members)
    }

    fn parse_type_member(&mut self) -> Result<Option<MemberDecl>, ParseError> {
        let start = self.span();
        let mut modifiers = Vec::new();
        if self.at_word("readonly") && !ends_modifier_run(self.peek_ahead(1)) {
            let token = self.advance();
            modifiers.push(Modifier {
                kind: ModifierKind::Readonly,
                span: token.span,
            });
        }

        // call and construct signatures carry no name
        let construct = self.at_keyword(Keyword::New) && matches!(self.peek_ahead(1), TokenKind::LParen | TokenKind::Lt);
        if construct || self.at_any(&[TokenKind::LParen, TokenKind::Lt]) {
            self.eat_keyword(Keyword::New);
            self.parse_type_params_opt()?;
            self.parse_params()?;
            if self.eat(TokenKind::Colon) {
                self.parse_return_type()?;
            }
            self.consume_member_separator()?;
            return Ok(None);
        }

        if self.at_index_signature() {
            let signature = self.parse_index_signature(modifiers)?;
            self.consume_member_separator()?;
            return Ok(Some(MemberDecl {
                kind: MemberKind::IndexSignature(signature),
                span: self.finish(start),
            }));
        }

        if self.at_accessor() {
            let accessor = self.parse_accessor(start, modifiers)?;
            return Ok(Some(MemberDecl {
                kind: MemberKind::Accessor(accessor),
                span: self.finish(start),
            }));
        }

        let (key, name_span) = self.parse_property_key()?;
        let optional = self.eat(TokenKind::Question);
        let kind = if self.at_any(&[TokenKind::LParen, TokenKind::Lt]) {
            let type_params = self.parse_type_params_opt()?;
            let params = self.parse_params()?;
            let return_type = if self.eat(TokenKind::Colon) {
                Some(self.parse_return_type()?)
            } else {
                None
            };
            MemberKind::Method(MethodDecl {
                modifiers,
                name: key.name(),
                name_span,
                type_params,
                params,
                return_type,
                body: None,
                expression_body: None,
                optional,
                is_generator: false,
            })
        } else {
            let ty = if self.eat(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            MemberKind::Field(FieldDecl {
                modifiers,
                name: key.name(),
                name_span,
                ty,
                initializer: None,
                optional,
                is_event: false,
            })
        };
        let span = self.finish(start);
        self.consume_member_separator()?;
        Ok(Some(MemberDecl { kind, span }))
    }

    // === Enums, aliases and namespaces ===

    fn parse_enum(&mut self, modifiers: Vec<Modifier>) -> Result<EnumDecl, ParseError> {
        self.consume(TokenKind::Keyword(Keyword::Enum))?;
        let (name, name_span) = self.consume_ident()?;
        let open = self.consume(TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            members.push(self.parse_enum_member()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if !self.eat(TokenKind::RBrace) {
            return Err(ParseError::UnbalancedDelimiter {
                delimiter: '{',
                span: open.span,
            });
        }
        Ok(EnumDecl {
            modifiers,
            name,
            name_span,
            underlying: None,
            members,
        })
    }

    fn parse_enum_member(&mut self) -> Result<EnumMemberDecl, ParseError> {
        let start = self.span();
        let (key, _) = self.parse_property_key()?;
        let initializer = if self.eat(TokenKind::Eq) {
            Some(self.with_in(|p| p.parse_assignment())?)
        } else {
            None
        };
        Ok(EnumMemberDecl {
            name: key.name(),
            initializer,
            span: self.finish(start),
        })
    }

    /// `Name (= value)?` left over after an enum body closed early.
    /// Anything not followed by `,` or `}` is rewound and parsed as a
    /// statement instead, so `x = 1;` after an enum stays an assignment.
    pub(super) fn parse_stray_enum_member(&mut self) -> Option<Item> {
        if !self.at(TokenKind::Ident)
            || !matches!(
                self.peek_ahead(1),
                TokenKind::Comma | TokenKind::Eq | TokenKind::RBrace | TokenKind::Eof
            )
        {
            return None;
        }
        let checkpoint = self.checkpoint();
        let accepted = match self.parse_enum_member() {
            Ok(member)
                if self.errors_since(checkpoint) == 0
                    && matches!(self.peek(), TokenKind::Comma | TokenKind::RBrace | TokenKind::Eof) =>
            {
                Some(member)
            }
            _ => None,
        };
        let Some(member) = accepted else {
            self.rewind(checkpoint);
            return None;
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

    fn parse_type_alias(&mut self, modifiers: Vec<Modifier>) -> Result<TypeAliasDecl, ParseError> {
        self.advance();
        let (name, name_span) = self.consume_ident()?;
        let type_params = self.parse_type_params_opt()?;
        self.consume(TokenKind::Eq)?;
        let ty = self.parse_type()?;
        self.consume_semicolon()?;
        Ok(TypeAliasDecl {
            modifiers,
            name,
            name_span,
            type_params,
            ty,
        })
    }

    /// `namespace A.B { }`, `module "name" { }` or `declare global { }`
    fn parse_namespace(&mut self, modifiers: Vec<Modifier>) -> Result<NamespaceDecl, ParseError> {
        let keyword = self.advance();
        let name = if self.text(keyword) == "global" {
            "global".to_string()
        } else if self.at(TokenKind::String) {
            let token = self.advance();
            unquote(self.text(token))
        } else {
            let mut name = self.consume_ident()?.0;
            while self.eat(TokenKind::Dot) {
                name.push('.');
                name.push_str(&self.consume_ident()?.0);
            }
            name
        };

        let items = if self.at(TokenKind::LBrace) {
            let open = self.advance();
            let items = self.parse_module_items(true);
            if !self.eat(TokenKind::RBrace) {
                self.report(ParseError::UnbalancedDelimiter {
                    delimiter: '{',
                    span: open.span,
                });
            }
            items
        } else {
            // ambient shorthand: `declare module "x";`
            self.consume_semicolon()?;
            Vec::new()
        };
        Ok(NamespaceDecl {
            modifiers,
            name,
            items,
            file_scoped: false,
        })
    }

    // === Modules ===

    pub(super) fn parse_import(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::Keyword(Keyword::Import))?;
        let mut decl = ImportDecl {
            source: String::new(),
            default: None,
            namespace: None,
            named: Vec::new(),
            type_only: false,
        };

        if self.at(TokenKind::String) {
            // side-effect import
            let token = self.advance();
            decl.source = unquote(self.text(token));
            self.skip_import_attributes()?;
            self.consume_semicolon()?;
            return Ok(self.import_stmt(start, decl));
        }

        let type_keyword = self.at_word("type")
            && match self.peek_ahead(1) {
                TokenKind::LBrace | TokenKind::Star => true,
                TokenKind::Ident => !(self.word_ahead(1, "from") && self.peek_ahead(2) == TokenKind::String),
                _ => false,
            };
        if type_keyword {
            self.advance();
            decl.type_only = true;
        }

        let mut bindings = true;
        if self.at(TokenKind::Ident) && !(self.at_word("from") && self.peek_ahead(1) == TokenKind::String) {
            let (name, _) = self.consume_ident()?;
            if self.eat(TokenKind::Eq) {
                // `import fs = require("fs");` / `import Alias = A.B;`
                decl.source = if self.eat_word("require") {
                    self.consume(TokenKind::LParen)?;
                    let token = self.consume(TokenKind::String)?;
                    self.consume(TokenKind::RParen)?;
                    unquote(self.text(token))
                } else {
                    let mut path = self.consume_name()?.0;
                    while self.eat(TokenKind::Dot) {
                        path.push('.');
                        path.push_str(&self.consume_name()?.0);
                    }
                    path
                };
                decl.default = Some(name);
                self.consume_semicolon()?;
                return Ok(self.import_stmt(start, decl));
            }
            decl.default = Some(name);
            bindings = self.eat(TokenKind::Comma);
        }

        if bindings {
            if self.eat(TokenKind::Star) {
                if !self.eat_word("as") {
                    return Err(ParseError::unexpected("'as'", self.peek(), self.span()));
                }
                decl.namespace = Some(self.consume_ident()?.0);
            } else if self.at(TokenKind::LBrace) {
                decl.named = self.parse_specifiers()?;
            }
        }

        decl.source = self.parse_from_clause()?;
        self.skip_import_attributes()?;
        self.consume_semicolon()?;
        Ok(self.import_stmt(start, decl))
    }

    fn import_stmt(&self, start: Span, decl: ImportDecl) -> Stmt {
        let span = self.finish(start);
        Stmt {
            kind: StmtKind::Item(Box::new(Item {
                kind: ItemKind::Import(decl),
                span,
            })),
            span,
        }
    }

    fn parse_from_clause(&mut self) -> Result<String, ParseError> {
        if !self.eat_word("from") {
            return Err(ParseError::unexpected("'from'", self.peek(), self.span()));
        }
        let token = self.consume(TokenKind::String)?;
        Ok(unquote(self.text(token)))
    }

    /// `assert { type: "json" }` / `with { type: "json" }`
    fn skip_import_attributes(&mut self) -> Result<(), ParseError> {
        let keyword = self.at_word("assert") || self.at_keyword(Keyword::With);
        if keyword && self.peek_ahead(1) == TokenKind::LBrace && !self.newline_before() {
            self.advance();
            self.skip_balanced()?;
        }
        Ok(())
    }

    /// `{ a, b as c, type T, "quoted" as d }`
    fn parse_specifiers(&mut self) -> Result<Vec<ImportSpecifier>, ParseError> {
        self.consume(TokenKind::LBrace)?;
        let mut specifiers = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            let start = self.span();
            let type_prefix = self.at_word("type")
                && matches!(self.peek_ahead(1), TokenKind::Ident | TokenKind::Keyword(_) | TokenKind::String)
                && !self.word_ahead(1, "as");
            if type_prefix {
                self.advance();
            }
            let name = if self.at(TokenKind::String) {
                let token = self.advance();
                unquote(self.text(token))
            } else {
                self.consume_name()?.0
            };
            let alias = if self.eat_word("as") {
                Some(self.consume_name()?.0)
            } else {
                None
            };
            specifiers.push(ImportSpecifier {
                name,
                alias,
                span: self.finish(start),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RBrace)?;
        Ok(specifiers)
    }

    pub(super) fn parse_export(&mut self, start: Span) -> Result<Stmt, ParseError> {
        let export = self.consume(TokenKind::Keyword(Keyword::Export))?;
        let export_modifier = Modifier {
            kind: ModifierKind::Export,
            span: export.span,
        };

        let decl = match self.peek() {
            TokenKind::Star => {
                self.advance();
                let alias = if self.eat_word("as") {
                    Some(self.consume_name()?.0)
                } else {
                    None
                };
                let source = self.parse_from_clause()?;
                self.skip_import_attributes()?;
                ExportDecl::All { alias, source }
            }
            TokenKind::LBrace => self.parse_named_export()?,
            TokenKind::Ident if self.at_word("type") && self.peek_ahead(1) == TokenKind::LBrace => {
                self.advance();
                self.parse_named_export()?
            }
            TokenKind::Eq => {
                self.advance();
                ExportDecl::Assignment(self.parse_assignment()?)
            }
            TokenKind::Keyword(Keyword::Default) => {
                let default = self.advance();
                let modifiers = vec![
                    export_modifier,
                    Modifier {
                        kind: ModifierKind::Default,
                        span: default.span,
                    },
                ];
                if let Some(stmt) = self.parse_declaration(start, modifiers)? {
                    return Ok(stmt);
                }
                ExportDecl::Default(self.parse_assignment()?)
            }
            TokenKind::Ident if self.at_word("as") && self.word_ahead(1, "namespace") => {
                // UMD global: `export as namespace Lib;`
                self.advance();
                self.advance();
                self.consume_ident()?;
                self.consume_semicolon()?;
                return Ok(Stmt {
                    kind: StmtKind::Empty,
                    span: self.finish(start),
                });
            }
            TokenKind::Keyword(Keyword::Import) => return self.parse_import(start),
            _ => {
                return match self.parse_declaration(start, vec![export_modifier])? {
                    Some(stmt) => Ok(stmt),
                    None => Err(ParseError::ExpectedDeclaration { span: self.span() }),
                };
            }
        };

        self.consume_semicolon()?;
        let span = self.finish(start);
        Ok(Stmt {
            kind: StmtKind::Item(Box::new(Item {
                kind: ItemKind::Export(decl),
                span,
            })),
            span,
        })
    }

    fn parse_named_export(&mut self) -> Result<ExportDecl, ParseError> {
        let specifiers = self.parse_specifiers()?;
        let source = if self.at_word("from") {
            let source = self.parse_from_clause()?;
            self.skip_import_attributes()?;
            Some(source)
        } else {
            None
        };
        Ok(ExportDecl::Named { specifiers, source })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::parse;
    use super::*;

    fn parse_ok(source: &str) -> SyntaxTree {
        let (tree, errors) = parse(source, Profile::TypeScript);
        assert!(errors.is_empty(), "{:?}", errors);
        tree
    }

    #[test]
    fn test_class_with_heritage_and_members() {
        let tree = parse_ok(
            r#"
            export abstract class Repo<T> extends Base<T> implements IRepo, Disposable {
                private static count = 0;
                readonly items: T[] = [];
                #secret?: string;
                constructor(private readonly db: Db, public name: string) { super(); }
                get size(): number { return this.items.length; }
                set size(value: number) {}
                abstract find(id: string): Promise<T>;
                async *stream(): AsyncGenerator<T> {}
                static { Repo.count = 1; }
                [key: string]: unknown;
            }
            "#,
        );
        let ItemKind::Class(class) = &tree.items[0].kind else {
            panic!("expected class");
        };
        assert_eq!(class.name, "Repo");
        assert!(has_modifier(&class.modifiers, &ModifierKind::Export));
        assert!(has_modifier(&class.modifiers, &ModifierKind::Abstract));
        assert_eq!(class.bases.len(), 3);
        assert_eq!(class.bases[0].relation, BaseRelation::Extends);
        let names: Vec<_> = class.members.iter().filter_map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec!["count", "items", "#secret", "constructor", "size", "size", "find", "stream"]
        );
        assert_eq!(class.members.len(), 10);
    }

    #[test]
    fn test_modifier_words_as_member_names() {
        let tree = parse_ok("class A { static: number; get = 1; async() {} readonly; }");
        let ItemKind::Class(class) = &tree.items[0].kind else {
            panic!("expected class");
        };
        let names: Vec<_> = class.members.iter().filter_map(|m| m.name()).collect();
        assert_eq!(names, vec!["static", "get", "async", "readonly"]);
    }

    #[test]
    fn test_interface_members() {
        let tree = parse_ok(
            "interface Person extends Named<string> {\n  readonly id: number\n  greet?(): void;\n  (x: number): string;\n  [k: string]: any;\n}",
        );
        let ItemKind::Interface(iface) = &tree.items[0].kind else {
            panic!("expected interface");
        };
        assert_eq!(iface.bases.len(), 1);
        assert_eq!(iface.members.len(), 3);
        assert!(matches!(&iface.members[1].kind, MemberKind::Method(m) if m.optional));
    }

    #[test]
    fn test_enum_with_trailing_comma() {
        let tree = parse_ok("const enum Color { Red, Green = \"g\", Blue = 5, }");
        let ItemKind::Enum(decl) = &tree.items[0].kind else {
            panic!("expected enum");
        };
        assert!(has_modifier(&decl.modifiers, &ModifierKind::Const));
        assert_eq!(decl.members.len(), 3);
        assert!(decl.members[0].initializer.is_none());
    }

    #[test]
    fn test_import_forms() {
        let tree = parse_ok(
            r#"
            import React, { useState, useEffect as effect } from "react";
            import * as path from "path";
            import type { Props } from "./props";
            import "./styles.css";
            import fs = require("fs");
            import data from "./data.json" with { type: "json" };
            "#,
        );
        let imports: Vec<_> = tree
            .items
            .iter()
            .filter_map(|i| match &i.kind {
                ItemKind::Import(decl) => Some(decl),
                _ => None,
            })
            .collect();
        assert_eq!(imports.len(), 6);
        assert_eq!(imports[0].default.as_deref(), Some("React"));
        assert_eq!(imports[0].named[1].alias.as_deref(), Some("effect"));
        assert_eq!(imports[1].namespace.as_deref(), Some("path"));
        assert!(imports[2].type_only);
        assert_eq!(imports[3].source, "./styles.css");
        assert_eq!(imports[4].source, "fs");
    }

    #[test]
    fn test_export_forms() {
        let tree = parse_ok(
            r#"
            export default function () {}
            export { a, b as c } from "./m";
            export * as ns from "./ns";
            export const x = 1, y = 2;
            export type { T };
            export interface I {}
            "#,
        );
        let ItemKind::Function(f) = &tree.items[0].kind else {
            panic!("expected function");
        };
        assert_eq!(f.name, "");
        assert!(has_modifier(&f.modifiers, &ModifierKind::Default));
        assert!(matches!(&tree.items[1].kind, ItemKind::Export(ExportDecl::Named { source: Some(_), .. })));
        assert!(matches!(&tree.items[2].kind, ItemKind::Export(ExportDecl::All { alias: Some(_), .. })));
        assert!(matches!(&tree.items[3].kind, ItemKind::Variable(v) if has_modifier(&v.modifiers, &ModifierKind::Export)));
        assert_eq!(tree.items[5].name(), Some("I"));
    }

    #[test]
    fn test_namespaces_and_ambient_declarations() {
        let tree = parse_ok(
            "namespace A.B { export function f() {} }\ndeclare module \"lib\" { export const v: number; }\ndeclare global { interface Window { x: number } }\ndeclare function g(): void;",
        );
        let names: Vec<_> = tree.items.iter().filter_map(|i| i.name()).collect();
        assert_eq!(names, vec!["A.B", "lib", "global", "g"]);
        let ItemKind::Function(g) = &tree.items[3].kind else {
            panic!("expected function");
        };
        assert!(g.body.is_none());
        assert!(has_modifier(&g.modifiers, &ModifierKind::Declare));
    }

    #[test]
    fn test_type_alias_and_overloads() {
        let tree = parse_ok(
            "type Pair<T> = [T, T];\nfunction f(a: string): string;\nfunction f(a: any) { return a; }",
        );
        assert!(matches!(&tree.items[0].kind, ItemKind::TypeAlias(a) if a.type_params.len() == 1));
        assert_eq!(tree.items.len(), 3);
    }

    #[test]
    fn test_broken_member_recovers_within_class() {
        let (tree, errors) = parse(
            "class A {\n  ok(): void {}\n  broken(: void {}\n  after(): void {}\n}",
            Profile::TypeScript,
        );
        assert!(!errors.is_empty());
        let ItemKind::Class(class) = &tree.items[0].kind else {
            panic!("expected class");
        };
        let names: Vec<_> = class.members.iter().filter_map(|m| m.name()).collect();
        assert_eq!(names, vec!["ok", "after"]);
    }
}
