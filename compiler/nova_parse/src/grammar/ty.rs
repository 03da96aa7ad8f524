//! Type-reference parsing (spec §3 "Type references", §4.2).

use crate::{ParseError, Parser};
use nova_ir::ast::{QualifiedName, TypeArgument, TypeRef, TypeRefKind, Variance};
use nova_ir::TokenKind;

impl Parser<'_> {
    pub(crate) fn parse_qualified_name(&mut self) -> Result<QualifiedName, ParseError> {
        let (first, mut span) = self.expect_ident()?;
        let mut segments = vec![first];
        while self.check(&TokenKind::Dot) && matches!(self.peek_kind(1), TokenKind::Identifier) {
            self.advance();
            let (name, name_span) = self.expect_ident()?;
            segments.push(name);
            span = span.to(name_span);
        }
        Ok(QualifiedName { segments, span })
    }

    pub(crate) fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        nova_stack::ensure_sufficient_stack(|| self.parse_type_inner())
    }

    fn parse_type_inner(&mut self) -> Result<TypeRef, ParseError> {
        let is_suspend = self.at_soft_keyword("suspend");
        if is_suspend {
            self.advance();
        }

        if self.check(&TokenKind::LParen) {
            return self.parse_function_type(None, is_suspend);
        }

        let start = self.current_span();
        let base = self.parse_qualified_name()?;
        let mut ty = if self.check(&TokenKind::Lt) {
            let args = self.parse_type_arguments()?;
            let span = start.to(self.previous_span());
            TypeRef { kind: TypeRefKind::Generic(base, args), span }
        } else {
            TypeRef::simple(base, start)
        };

        if self.check(&TokenKind::Dot) && matches!(self.peek_kind(1), TokenKind::LParen) {
            self.advance();
            ty = self.parse_function_type(Some(Box::new(ty)), is_suspend)?;
        }

        if self.check(&TokenKind::Question) {
            let q_span = self.current_span();
            self.advance();
            let span = ty.span.to(q_span);
            ty = TypeRef::nullable(ty, span);
        }

        Ok(ty)
    }

    fn parse_function_type(&mut self, receiver: Option<Box<TypeRef>>, is_suspend: bool) -> Result<TypeRef, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                params.push(self.parse_type()?);
                if self.check(&TokenKind::Comma) {
                    self.advance();
                    self.skip_newlines();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Arrow)?;
        let return_ty = self.parse_type()?;
        let span = start.to(return_ty.span);
        Ok(TypeRef {
            kind: TypeRefKind::Function { receiver, params, return_ty: Some(Box::new(return_ty)), is_suspend },
            span,
        })
    }

    /// `<T1, out T2, in T3, *>` — declaration- or use-site type arguments.
    fn parse_type_arguments(&mut self) -> Result<Vec<TypeArgument>, ParseError> {
        self.expect(TokenKind::Lt)?;
        let mut args = Vec::new();
        self.skip_newlines();
        if !self.check(&TokenKind::Gt) {
            loop {
                self.skip_newlines();
                if self.check(&TokenKind::Star) {
                    self.advance();
                    args.push(TypeArgument::wildcard());
                } else {
                    let variance = self.parse_use_site_variance();
                    let ty = self.parse_type()?;
                    args.push(TypeArgument { variance, ty: Some(ty), is_wildcard: false });
                }
                self.skip_newlines();
                if self.check(&TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.skip_newlines();
        self.expect(TokenKind::Gt)?;
        Ok(args)
    }

    fn parse_use_site_variance(&mut self) -> Variance {
        if self.at_soft_keyword("out") {
            self.advance();
            Variance::Out
        } else if self.check(&TokenKind::KwIn) {
            self.advance();
            Variance::In
        } else {
            Variance::Invariant
        }
    }

    /// Call-site type arguments (`foo<Int, String>(...)`) carry no
    /// variance or wildcards, only bare types.
    pub(crate) fn parse_call_type_arguments(&mut self) -> Result<Vec<TypeRef>, ParseError> {
        self.expect(TokenKind::Lt)?;
        let mut args = Vec::new();
        if !self.check(&TokenKind::Gt) {
            loop {
                args.push(self.parse_type()?);
                if self.check(&TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::Gt)?;
        Ok(args)
    }

    /// Extension-function receiver type: try a full `TypeRef`, falling
    /// back to a bare identifier if the speculative parse doesn't lead
    /// into the expected `.name(` shape (spec §4.2 mark/reset use case).
    pub(crate) fn try_parse_extension_receiver(&mut self) -> Option<TypeRef> {
        self.try_parse(|p| {
            let ty = p.parse_type()?;
            if p.check(&TokenKind::Dot) {
                Ok(ty)
            } else {
                Err(ParseError::expected("`.`", *p.current_kind(), p.current_span()))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_ir::StringInterner;

    fn parse_type_str(src: &str, interner: &StringInterner) -> TypeRef {
        let (tokens, _) = nova_lexer::tokenize(src, interner);
        let mut parser = Parser::new(tokens, interner);
        parser.parse_type().unwrap()
    }

    #[test]
    fn parses_simple_type() {
        let interner = StringInterner::new();
        let ty = parse_type_str("Int", &interner);
        assert!(matches!(ty.kind, TypeRefKind::Simple(_)));
    }

    #[test]
    fn parses_nullable_type() {
        let interner = StringInterner::new();
        let ty = parse_type_str("String?", &interner);
        assert!(matches!(ty.kind, TypeRefKind::Nullable(_)));
    }

    #[test]
    fn parses_generic_type_with_variance() {
        let interner = StringInterner::new();
        let ty = parse_type_str("List<out Int>", &interner);
        match ty.kind {
            TypeRefKind::Generic(_, args) => {
                assert_eq!(args.len(), 1);
                assert_eq!(args[0].variance, Variance::Out);
            }
            other => panic!("expected Generic, got {other:?}"),
        }
    }

    #[test]
    fn parses_function_type() {
        let interner = StringInterner::new();
        let ty = parse_type_str("(Int, String) -> Boolean", &interner);
        match ty.kind {
            TypeRefKind::Function { params, return_ty, .. } => {
                assert_eq!(params.len(), 2);
                assert!(return_ty.is_some());
            }
            other => panic!("expected Function, got {other:?}"),
        }
    }

    #[test]
    fn parses_nested_generic_without_shift_ambiguity() {
        let interner = StringInterner::new();
        let ty = parse_type_str("Map<String, List<Int>>", &interner);
        assert!(matches!(ty.kind, TypeRefKind::Generic(..)));
    }
}
