//! Declaration parsing (spec §3 "Declarations", §4.2, §4.4 "class
//! processing order").

use crate::{ParseError, Parser};
use nova_ir::ast::{
    ClassKind, Decl, DeclId, DeclKind, DestructuringBinding, EnumEntry, ExprId, Modifiers,
    Parameter, TypeParameter, Variance,
};
use nova_ir::TokenKind;

impl Parser<'_> {
    pub(crate) fn parse_import(&mut self) -> Result<DeclId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::KwImport)?;
        let path = self.parse_qualified_name()?;
        let is_wildcard = if self.check(&TokenKind::Dot) && matches!(self.peek_kind(1), TokenKind::Star) {
            self.advance();
            self.advance();
            true
        } else {
            false
        };
        let alias = if self.check(&TokenKind::KwAs) {
            self.advance();
            Some(self.expect_ident()?.0)
        } else {
            None
        };
        let span = start.to(self.previous_span());
        Ok(self.arena.alloc_decl(Decl {
            kind: DeclKind::Import { path, alias, is_wildcard },
            annotations: Vec::new(),
            modifiers: Modifiers::default(),
            span,
        }))
    }

    pub(crate) fn parse_declaration(&mut self) -> Result<DeclId, ParseError> {
        let start = self.current_span();
        let annotations = self.parse_annotations()?;
        self.skip_newlines();
        let modifiers = self.parse_modifiers()?;

        // `annotation class Foo` — the `annotation` marker has no
        // dedicated AST slot (spec §4.4 treats it as a plain class), so
        // it is consumed and dropped.
        if self.at_soft_keyword("annotation") && matches!(self.peek_kind(1), TokenKind::KwClass) {
            self.advance();
        }

        match self.current_kind() {
            TokenKind::KwClass | TokenKind::KwInterface | TokenKind::KwObject | TokenKind::KwEnum => {
                self.parse_class_decl(start, annotations, modifiers)
            }
            TokenKind::KwFun => self.parse_fun_decl(start, annotations, modifiers),
            TokenKind::KwVal | TokenKind::KwVar => self.parse_property_decl(start, annotations, modifiers),
            TokenKind::KwTypealias => self.parse_typealias_decl(start, annotations, modifiers),
            _ => Err(ParseError::expected("a declaration", *self.current_kind(), self.current_span())),
        }
    }

    fn parse_class_decl(&mut self, start: nova_ir::Span, annotations: Vec<nova_ir::ast::Annotation>, modifiers: Modifiers) -> Result<DeclId, ParseError> {
        let kind = match self.current_kind() {
            TokenKind::KwClass => {
                self.advance();
                ClassKind::Class
            }
            TokenKind::KwInterface => {
                self.advance();
                ClassKind::Interface
            }
            TokenKind::KwObject => {
                self.advance();
                ClassKind::Object
            }
            TokenKind::KwEnum => {
                self.advance();
                self.expect(TokenKind::KwClass)?;
                ClassKind::Enum
            }
            other => return Err(ParseError::expected("`class`/`interface`/`object`/`enum`", *other, self.current_span())),
        };

        let (name, name_span) = self.expect_ident()?;
        let type_params = if self.check(&TokenKind::Lt) { self.parse_type_parameters()? } else { Vec::new() };
        let primary_ctor = if self.check(&TokenKind::LParen) { self.parse_parameter_list(true)? } else { Vec::new() };

        let mut super_class = None;
        let mut super_ctor_args = Vec::new();
        let mut interfaces = Vec::new();
        if self.check(&TokenKind::Colon) {
            self.advance();
            self.skip_newlines();
            loop {
                let ty = self.parse_type()?;
                if self.check(&TokenKind::LParen) {
                    super_ctor_args = self.parse_argument_list()?;
                    super_class = Some(ty);
                } else {
                    interfaces.push(ty);
                }
                self.skip_newlines();
                if self.check(&TokenKind::Comma) {
                    self.advance();
                    self.skip_newlines();
                } else {
                    break;
                }
            }
        }

        self.skip_newlines();
        let mut enum_entries = Vec::new();
        let mut members = Vec::new();
        if self.check(&TokenKind::LBrace) {
            self.advance();
            self.skip_newlines();
            if matches!(kind, ClassKind::Enum) {
                enum_entries = self.parse_enum_entries()?;
            }
            loop {
                self.skip_newlines();
                while self.check(&TokenKind::Semicolon) {
                    self.advance();
                    self.skip_newlines();
                }
                if self.check(&TokenKind::RBrace) || self.is_at_end() {
                    break;
                }
                let member = if self.at_soft_keyword("init") {
                    self.parse_init_block()?
                } else if self.at_soft_keyword("constructor") {
                    self.parse_secondary_constructor()?
                } else {
                    self.parse_declaration()?
                };
                members.push(member);
                self.skip_terminator();
            }
            self.expect(TokenKind::RBrace)?;
        }

        let span = start.to(self.previous_span());
        Ok(self.arena.alloc_decl(Decl {
            kind: DeclKind::Class {
                kind,
                name,
                name_span,
                type_params,
                primary_ctor,
                super_class,
                super_ctor_args,
                interfaces,
                enum_entries,
                members,
            },
            annotations,
            modifiers,
            span,
        }))
    }

    fn parse_type_parameters(&mut self) -> Result<Vec<TypeParameter>, ParseError> {
        self.expect(TokenKind::Lt)?;
        let mut params = Vec::new();
        self.skip_newlines();
        loop {
            self.skip_newlines();
            let variance = if self.at_soft_keyword("out") {
                self.advance();
                Variance::Out
            } else if self.check(&TokenKind::KwIn) {
                self.advance();
                Variance::In
            } else {
                Variance::Invariant
            };
            let is_reified = if self.at_soft_keyword("reified") {
                self.advance();
                true
            } else {
                false
            };
            let (name, span) = self.expect_ident()?;
            let upper_bound = if self.check(&TokenKind::Colon) {
                self.advance();
                Some(self.parse_type()?)
            } else {
                None
            };
            params.push(TypeParameter { name, variance, upper_bound, is_reified, span });
            self.skip_newlines();
            if self.check(&TokenKind::Comma) {
                self.advance();
                self.skip_newlines();
            } else {
                break;
            }
        }
        self.skip_newlines();
        self.expect(TokenKind::Gt)?;
        Ok(params)
    }

    /// A parenthesized parameter list. `allow_property` gates `val`/`var`
    /// prefixes, which only a primary constructor may carry (spec §4.4
    /// step 5).
    fn parse_parameter_list(&mut self, allow_property: bool) -> Result<Vec<Parameter>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        self.skip_newlines();
        if !self.check(&TokenKind::RParen) {
            loop {
                self.skip_newlines();
                let _ = self.parse_annotations()?;
                let mut is_property = false;
                let mut mutable = false;
                let mut is_vararg = false;
                loop {
                    if allow_property && self.check(&TokenKind::KwVal) {
                        self.advance();
                        is_property = true;
                    } else if allow_property && self.check(&TokenKind::KwVar) {
                        self.advance();
                        is_property = true;
                        mutable = true;
                    } else if self.at_soft_keyword("vararg") {
                        self.advance();
                        is_vararg = true;
                    } else {
                        break;
                    }
                }
                let (name, name_span) = self.expect_ident()?;
                self.expect(TokenKind::Colon)?;
                let ty = self.parse_type()?;
                let default = if self.check(&TokenKind::Eq) {
                    self.advance();
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                let span = name_span.to(ty.span);
                params.push(Parameter { name, ty: Some(ty), default, is_vararg, is_property, mutable, span, name_span });
                self.skip_newlines();
                if self.check(&TokenKind::Comma) {
                    self.advance();
                    self.skip_newlines();
                } else {
                    break;
                }
            }
        }
        self.skip_newlines();
        self.expect(TokenKind::RParen)?;
        Ok(params)
    }

    fn parse_argument_list(&mut self) -> Result<Vec<ExprId>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        self.skip_newlines();
        if !self.check(&TokenKind::RParen) {
            loop {
                self.skip_newlines();
                args.push(self.parse_expr()?);
                self.skip_newlines();
                if self.check(&TokenKind::Comma) {
                    self.advance();
                    self.skip_newlines();
                } else {
                    break;
                }
            }
        }
        self.skip_newlines();
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    /// `NAME(args)?, …` entries, terminated by an optional `;` that
    /// separates them from ordinary member declarations.
    fn parse_enum_entries(&mut self) -> Result<Vec<EnumEntry>, ParseError> {
        let mut entries = Vec::new();
        self.skip_newlines();
        if self.check_ident() {
            loop {
                self.skip_newlines();
                if !self.check_ident() {
                    break;
                }
                let (name, name_span) = self.expect_ident()?;
                let args = if self.check(&TokenKind::LParen) { self.parse_argument_list()? } else { Vec::new() };
                let span = name_span.to(self.previous_span());
                entries.push(EnumEntry { name, args, span, name_span });
                self.skip_newlines();
                if self.check(&TokenKind::Comma) {
                    self.advance();
                    self.skip_newlines();
                } else {
                    break;
                }
            }
        }
        self.skip_newlines();
        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        Ok(entries)
    }

    fn parse_init_block(&mut self) -> Result<DeclId, ParseError> {
        let start = self.current_span();
        self.advance();
        self.skip_newlines();
        let body = self.parse_block_stmt()?;
        let span = start.to(self.arena.stmts[body].span);
        Ok(self.arena.alloc_decl(Decl {
            kind: DeclKind::InitBlock(body),
            annotations: Vec::new(),
            modifiers: Modifiers::default(),
            span,
        }))
    }

    fn parse_secondary_constructor(&mut self) -> Result<DeclId, ParseError> {
        let start = self.current_span();
        self.advance();
        let params = self.parse_parameter_list(false)?;
        self.skip_newlines();
        let mut delegates_to_super = false;
        let mut delegate_args = Vec::new();
        if self.check(&TokenKind::Colon) {
            self.advance();
            if self.check(&TokenKind::KwSuper) {
                self.advance();
                delegates_to_super = true;
                delegate_args = self.parse_argument_list()?;
            } else if self.check(&TokenKind::KwThis) {
                self.advance();
                delegate_args = self.parse_argument_list()?;
            }
        }
        self.skip_newlines();
        let body = if self.check(&TokenKind::LBrace) { Some(self.parse_block_stmt()?) } else { None };
        let span = start.to(self.previous_span());
        Ok(self.arena.alloc_decl(Decl {
            kind: DeclKind::Constructor { params, delegates_to_super, delegate_args, body },
            annotations: Vec::new(),
            modifiers: Modifiers::default(),
            span,
        }))
    }

    fn parse_fun_decl(&mut self, start: nova_ir::Span, annotations: Vec<nova_ir::ast::Annotation>, modifiers: Modifiers) -> Result<DeclId, ParseError> {
        self.expect(TokenKind::KwFun)?;
        let type_params = if self.check(&TokenKind::Lt) { self.parse_type_parameters()? } else { Vec::new() };
        let receiver_ty = self.try_parse_extension_receiver();
        if receiver_ty.is_some() {
            self.expect(TokenKind::Dot)?;
        }
        let (name, name_span) = self.expect_ident()?;
        let params = self.parse_parameter_list(false)?;
        let return_ty = if self.check(&TokenKind::Colon) {
            self.advance();
            Some(self.parse_type()?)
        } else {
            None
        };
        self.skip_newlines();
        let (body, expr_body) = if self.check(&TokenKind::Eq) {
            self.advance();
            self.skip_newlines();
            (None, Some(self.parse_expr()?))
        } else if self.check(&TokenKind::LBrace) {
            (Some(self.parse_block_stmt()?), None)
        } else {
            (None, None)
        };
        let span = start.to(self.previous_span());
        Ok(self.arena.alloc_decl(Decl {
            kind: DeclKind::Fun { name, name_span, type_params, receiver_ty, params, return_ty, body, expr_body },
            annotations,
            modifiers,
            span,
        }))
    }

    fn parse_property_decl(&mut self, start: nova_ir::Span, annotations: Vec<nova_ir::ast::Annotation>, modifiers: Modifiers) -> Result<DeclId, ParseError> {
        let mutable = self.check(&TokenKind::KwVar);
        self.advance();

        if self.check(&TokenKind::LParen) {
            return self.parse_destructuring_decl(start, mutable);
        }

        let receiver_ty = self.try_parse_extension_receiver();
        if receiver_ty.is_some() {
            self.expect(TokenKind::Dot)?;
        }
        let (name, name_span) = self.expect_ident()?;
        let ty = if self.check(&TokenKind::Colon) {
            self.advance();
            Some(self.parse_type()?)
        } else {
            None
        };
        let initializer = if self.check(&TokenKind::Eq) {
            self.advance();
            self.skip_newlines();
            Some(self.parse_expr()?)
        } else {
            None
        };

        let mut getter = None;
        let mut setter = None;
        loop {
            let save = self.mark();
            self.skip_newlines();
            if getter.is_none() && self.at_soft_keyword("get") && matches!(self.peek_kind(1), TokenKind::LParen) {
                self.commit_mark();
                getter = Some(self.parse_accessor(false)?);
            } else if setter.is_none() && self.at_soft_keyword("set") && matches!(self.peek_kind(1), TokenKind::LParen) {
                self.commit_mark();
                setter = Some(self.parse_accessor(true)?);
            } else {
                self.reset(save);
                break;
            }
        }

        let span = start.to(self.previous_span());
        Ok(self.arena.alloc_decl(Decl {
            kind: DeclKind::Property { name, name_span, ty, mutable, initializer, getter, setter, receiver_ty },
            annotations,
            modifiers,
            span,
        }))
    }

    fn parse_destructuring_decl(&mut self, start: nova_ir::Span, mutable: bool) -> Result<DeclId, ParseError> {
        self.advance();
        self.skip_newlines();
        let mut bindings = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                self.skip_newlines();
                let (name, span) = self.expect_ident()?;
                let ty = if self.check(&TokenKind::Colon) {
                    self.advance();
                    Some(self.parse_type()?)
                } else {
                    None
                };
                bindings.push(DestructuringBinding { name, ty, span });
                self.skip_newlines();
                if self.check(&TokenKind::Comma) {
                    self.advance();
                    self.skip_newlines();
                } else {
                    break;
                }
            }
        }
        self.skip_newlines();
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Eq)?;
        self.skip_newlines();
        let initializer = self.parse_expr()?;
        let span = start.to(self.arena.exprs[initializer].span);
        Ok(self.arena.alloc_decl(Decl {
            kind: DeclKind::Destructuring { bindings, mutable, initializer },
            annotations: Vec::new(),
            modifiers: Modifiers::default(),
            span,
        }))
    }

    /// `get() = …` / `get() { … }` or `set(value) = …` / `set(value) { … }`,
    /// modeled as an ordinary `DeclKind::Fun` named `get`/`set` (spec §4.4:
    /// a property's accessors are functions in all but syntax).
    fn parse_accessor(&mut self, is_setter: bool) -> Result<DeclId, ParseError> {
        let start = self.current_span();
        self.advance();
        self.expect(TokenKind::LParen)?;
        let params = if is_setter {
            let (param_name, param_span) = self.expect_ident()?;
            let param_ty = if self.check(&TokenKind::Colon) {
                self.advance();
                Some(self.parse_type()?)
            } else {
                None
            };
            let span = param_span;
            vec![Parameter {
                name: param_name,
                ty: param_ty,
                default: None,
                is_vararg: false,
                is_property: false,
                mutable: false,
                span,
                name_span: param_span,
            }]
        } else {
            Vec::new()
        };
        self.expect(TokenKind::RParen)?;
        let return_ty = if !is_setter && self.check(&TokenKind::Colon) {
            self.advance();
            Some(self.parse_type()?)
        } else {
            None
        };
        self.skip_newlines();
        let (body, expr_body) = if self.check(&TokenKind::Eq) {
            self.advance();
            self.skip_newlines();
            (None, Some(self.parse_expr()?))
        } else {
            (Some(self.parse_block_stmt()?), None)
        };
        let span = start.to(self.previous_span());
        let name = self.interner.intern(if is_setter { "set" } else { "get" });
        Ok(self.arena.alloc_decl(Decl {
            kind: DeclKind::Fun { name, name_span: start, type_params: Vec::new(), receiver_ty: None, params, return_ty, body, expr_body },
            annotations: Vec::new(),
            modifiers: Modifiers::default(),
            span,
        }))
    }

    fn parse_typealias_decl(&mut self, start: nova_ir::Span, annotations: Vec<nova_ir::ast::Annotation>, modifiers: Modifiers) -> Result<DeclId, ParseError> {
        self.expect(TokenKind::KwTypealias)?;
        let (name, name_span) = self.expect_ident()?;
        let type_params = if self.check(&TokenKind::Lt) { self.parse_type_parameters()? } else { Vec::new() };
        self.expect(TokenKind::Eq)?;
        self.skip_newlines();
        let target = self.parse_type()?;
        let span = start.to(target.span);
        Ok(self.arena.alloc_decl(Decl {
            kind: DeclKind::TypeAlias { name, name_span, type_params, target },
            annotations,
            modifiers,
            span,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_ir::StringInterner;

    fn parse_decl_str(src: &str, interner: &StringInterner) -> (Parser<'_>, DeclId) {
        let (tokens, _) = nova_lexer::tokenize(src, interner);
        let mut parser = Parser::new(tokens, interner);
        let id = parser.parse_declaration().unwrap();
        (parser, id)
    }

    #[test]
    fn parses_simple_class_with_primary_ctor() {
        let interner = StringInterner::new();
        let (parser, id) = parse_decl_str("class Point(val x: Int, val y: Int)", &interner);
        match &parser.arena.decls[id].kind {
            DeclKind::Class { primary_ctor, .. } => assert_eq!(primary_ctor.len(), 2),
            other => panic!("expected Class, got {other:?}"),
        }
    }

    #[test]
    fn parses_class_with_supertype_and_interfaces() {
        let interner = StringInterner::new();
        let (parser, id) = parse_decl_str("class Dog : Animal(\"x\"), Named { }", &interner);
        match &parser.arena.decls[id].kind {
            DeclKind::Class { super_class, interfaces, .. } => {
                assert!(super_class.is_some());
                assert_eq!(interfaces.len(), 1);
            }
            other => panic!("expected Class, got {other:?}"),
        }
    }

    #[test]
    fn parses_enum_class_with_entries() {
        let interner = StringInterner::new();
        let (parser, id) = parse_decl_str("enum class Color { RED, GREEN, BLUE }", &interner);
        match &parser.arena.decls[id].kind {
            DeclKind::Class { kind: ClassKind::Enum, enum_entries, .. } => assert_eq!(enum_entries.len(), 3),
            other => panic!("expected Enum Class, got {other:?}"),
        }
    }

    #[test]
    fn parses_generic_function() {
        let interner = StringInterner::new();
        let (parser, id) = parse_decl_str("fun <T> id(a: T): T = a", &interner);
        match &parser.arena.decls[id].kind {
            DeclKind::Fun { type_params, expr_body, .. } => {
                assert_eq!(type_params.len(), 1);
                assert!(expr_body.is_some());
            }
            other => panic!("expected Fun, got {other:?}"),
        }
    }

    #[test]
    fn parses_extension_function() {
        let interner = StringInterner::new();
        let (parser, id) = parse_decl_str("fun String.shout(): String = this", &interner);
        match &parser.arena.decls[id].kind {
            DeclKind::Fun { receiver_ty, .. } => assert!(receiver_ty.is_some()),
            other => panic!("expected Fun, got {other:?}"),
        }
    }

    #[test]
    fn parses_property_with_custom_getter() {
        let interner = StringInterner::new();
        let (parser, id) = parse_decl_str("val area: Int\n    get() = width * height", &interner);
        match &parser.arena.decls[id].kind {
            DeclKind::Property { getter, .. } => assert!(getter.is_some()),
            other => panic!("expected Property, got {other:?}"),
        }
    }

    #[test]
    fn parses_destructuring_declaration() {
        let interner = StringInterner::new();
        let (parser, id) = parse_decl_str("val (a, b) = pair", &interner);
        assert!(matches!(parser.arena.decls[id].kind, DeclKind::Destructuring { .. }));
    }

    #[test]
    fn parses_typealias() {
        let interner = StringInterner::new();
        let (parser, id) = parse_decl_str("typealias Ints = List<Int>", &interner);
        assert!(matches!(parser.arena.decls[id].kind, DeclKind::TypeAlias { .. }));
    }
}
