//! Expression parsing (spec §3 "Expressions", §4.2 operator precedence and
//! postfix/trailing-lambda grammar).
//!
//! The fourteen-level precedence chain is threaded top-down: each
//! `parse_*` level calls straight into the next-tighter level and only
//! loops on its own operator set. `parse_equality`/`parse_comparison`
//! additionally implement the chained tie-break from spec §4.2: `a==b==c`
//! lowers to `(a==b) && (b==c)`, pairing `(prevRight, right)` rather than
//! `(result, right)`.

use crate::{ParseError, Parser};
use nova_ir::ast::{
    BinaryOp, CatchClause, CollectionKind, ExprId, ExprKind, JumpKind, LambdaParam, LiteralKind,
    MapEntryExpr, PostfixOp, StringPart, TypeCastKind, TypeCheckKind, UnaryOp,
};
use nova_ir::token::LiteralValue;
use nova_ir::{Span, TokenKind};

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        nova_stack::ensure_sufficient_stack(|| self.parse_assignment())
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.exprs[id].span
    }

    // ── Precedence chain ────────────────────────────────────────────────

    fn parse_assignment(&mut self) -> Result<ExprId, ParseError> {
        let target = self.parse_ternary()?;
        let op = match self.current_kind() {
            TokenKind::Eq => None,
            TokenKind::PlusEq => Some(BinaryOp::Add),
            TokenKind::MinusEq => Some(BinaryOp::Sub),
            TokenKind::StarEq => Some(BinaryOp::Mul),
            TokenKind::SlashEq => Some(BinaryOp::Div),
            TokenKind::PercentEq => Some(BinaryOp::Mod),
            TokenKind::AmpAmpEq => Some(BinaryOp::And),
            TokenKind::PipePipeEq => Some(BinaryOp::Or),
            _ => return Ok(target),
        };
        self.advance();
        self.skip_newlines();
        let value = self.parse_assignment()?;
        let span = self.span_of(target).to(self.span_of(value));
        Ok(self.arena.alloc_expr(ExprKind::Assign { target, op, value }, span))
    }

    /// `cond ? then : else` — the trailing-`?`/error-propagation-`?`
    /// disambiguation in `parse_postfix` leaves a genuine ternary `?`
    /// unconsumed, so it surfaces here.
    fn parse_ternary(&mut self) -> Result<ExprId, ParseError> {
        let condition = self.parse_pipeline()?;
        if self.check(&TokenKind::Question) {
            self.advance();
            self.skip_newlines();
            let then_value = self.parse_expr()?;
            self.skip_newlines();
            self.expect(TokenKind::Colon)?;
            self.skip_newlines();
            let else_value = self.parse_ternary()?;
            let span = self.span_of(condition).to(self.span_of(else_value));
            return Ok(self.arena.alloc_expr(ExprKind::Conditional { condition, then_value, else_value }, span));
        }
        Ok(condition)
    }

    fn parse_pipeline(&mut self) -> Result<ExprId, ParseError> {
        self.fold_binary(Self::parse_disjunction, |p| {
            p.check(&TokenKind::PipeGt).then_some(BinaryOp::Pipeline)
        })
    }

    fn parse_disjunction(&mut self) -> Result<ExprId, ParseError> {
        self.fold_binary(Self::parse_conjunction, |p| p.check(&TokenKind::PipePipe).then_some(BinaryOp::Or))
    }

    fn parse_conjunction(&mut self) -> Result<ExprId, ParseError> {
        self.fold_binary(Self::parse_equality, |p| p.check(&TokenKind::AmpAmp).then_some(BinaryOp::And))
    }

    fn match_equality_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::BangEq => Some(BinaryOp::NotEq),
            TokenKind::EqEqEq => Some(BinaryOp::RefEq),
            TokenKind::BangEqEq => Some(BinaryOp::RefNotEq),
            _ => None,
        }
    }

    fn match_comparison_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    fn parse_equality(&mut self) -> Result<ExprId, ParseError> {
        self.chained_binary(Self::parse_comparison, Self::match_equality_op)
    }

    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        self.chained_binary(Self::parse_type_check, Self::match_comparison_op)
    }

    fn parse_type_check(&mut self) -> Result<ExprId, ParseError> {
        let mut operand = self.parse_elvis()?;
        loop {
            if self.check(&TokenKind::KwIs) {
                self.advance();
                let ty = self.parse_type()?;
                let span = self.span_of(operand).to(ty.span);
                operand = self.arena.alloc_expr(ExprKind::TypeCheck { kind: TypeCheckKind::Is, operand, ty }, span);
            } else if self.check(&TokenKind::Bang) && matches!(self.peek_kind(1), TokenKind::KwIs) {
                self.advance();
                self.advance();
                let ty = self.parse_type()?;
                let span = self.span_of(operand).to(ty.span);
                operand = self.arena.alloc_expr(ExprKind::TypeCheck { kind: TypeCheckKind::IsNot, operand, ty }, span);
            } else if self.check(&TokenKind::KwAs) {
                self.advance();
                let kind = if self.check(&TokenKind::Question) {
                    self.advance();
                    TypeCastKind::AsSafe
                } else {
                    TypeCastKind::As
                };
                let ty = self.parse_type()?;
                let span = self.span_of(operand).to(ty.span);
                operand = self.arena.alloc_expr(ExprKind::TypeCast { kind, operand, ty }, span);
            } else {
                break;
            }
        }
        Ok(operand)
    }

    /// `?:` is right-associative, unlike every chained level above it.
    fn parse_elvis(&mut self) -> Result<ExprId, ParseError> {
        let left = self.parse_infix_to()?;
        if self.check(&TokenKind::QuestionColon) {
            self.advance();
            self.skip_newlines();
            let right = self.parse_elvis()?;
            let span = self.span_of(left).to(self.span_of(right));
            return Ok(self.arena.alloc_expr(ExprKind::Elvis { left, right }, span));
        }
        Ok(left)
    }

    fn parse_infix_to(&mut self) -> Result<ExprId, ParseError> {
        self.fold_binary(Self::parse_range, |p| p.at_soft_keyword("to").then_some(BinaryOp::To))
    }

    fn parse_range(&mut self) -> Result<ExprId, ParseError> {
        let from = self.parse_additive()?;
        if self.check(&TokenKind::DotDot) || self.check(&TokenKind::DotDotLt) {
            let inclusive = self.check(&TokenKind::DotDot);
            self.advance();
            let to = self.parse_additive()?;
            let step = if self.at_soft_keyword("step") {
                self.advance();
                Some(self.parse_additive()?)
            } else {
                None
            };
            let end = step.map_or(to, |s| s);
            let span = self.span_of(from).to(self.span_of(end));
            return Ok(self.arena.alloc_expr(ExprKind::Range { from, to, inclusive, step }, span));
        }
        Ok(from)
    }

    fn parse_additive(&mut self) -> Result<ExprId, ParseError> {
        self.fold_binary(Self::parse_multiplicative, |p| match p.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn parse_multiplicative(&mut self) -> Result<ExprId, ParseError> {
        self.fold_binary(Self::parse_prefix, |p| match p.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        })
    }

    fn parse_prefix(&mut self) -> Result<ExprId, ParseError> {
        let op = match self.current_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Pos),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::PlusPlus => Some(UnaryOp::PreInc),
            TokenKind::MinusMinus => Some(UnaryOp::PreDec),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_postfix();
        };
        let start = self.current_span();
        self.advance();
        let operand = self.parse_prefix()?;
        let span = start.to(self.span_of(operand));
        Ok(self.arena.alloc_expr(ExprKind::Unary { op, operand }, span))
    }

    fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.current_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let (name, name_span) = self.expect_ident()?;
                    let span = self.span_of(expr).to(name_span);
                    expr = self.arena.alloc_expr(ExprKind::Member { receiver: expr, name, name_span }, span);
                }
                TokenKind::QuestionDot => {
                    self.advance();
                    let (name, name_span) = self.expect_ident()?;
                    let span = self.span_of(expr).to(name_span);
                    expr = self.arena.alloc_expr(ExprKind::SafeCall { receiver: expr, name, name_span }, span);
                }
                TokenKind::DoubleColon => {
                    self.advance();
                    let (method_name, name_span) = self.expect_ident()?;
                    let span = self.span_of(expr).to(name_span);
                    expr = self.arena.alloc_expr(ExprKind::MethodRef { receiver: Some(expr), method_name }, span);
                }
                TokenKind::LParen => {
                    expr = self.parse_call(expr, Vec::new())?;
                }
                TokenKind::Lt => {
                    let Some(type_args) = self.try_parse_generic_call_args() else {
                        break;
                    };
                    expr = self.parse_call(expr, type_args)?;
                }
                TokenKind::LBracket => {
                    self.advance();
                    self.skip_newlines();
                    let index = self.parse_expr()?;
                    self.skip_newlines();
                    let end = self.current_span();
                    self.expect(TokenKind::RBracket)?;
                    let span = self.span_of(expr).to(end);
                    // `a[from..to]`/`a[from..<to]` is a slice (spec.md:58
                    // `SliceExpr`, spec.md:185), not an index by a `Range`
                    // value; every other bracketed expression is a plain index.
                    expr = match &self.arena.exprs[index].kind {
                        ExprKind::Binary { op: BinaryOp::RangeInclusive | BinaryOp::RangeExclusive, left, right } => {
                            let (from, to) = (*left, *right);
                            self.arena.alloc_expr(ExprKind::Slice { receiver: expr, from: Some(from), to: Some(to) }, span)
                        }
                        _ => self.arena.alloc_expr(ExprKind::Index { receiver: expr, index }, span),
                    };
                }
                TokenKind::QuestionBracket => {
                    self.advance();
                    self.skip_newlines();
                    let index = self.parse_expr()?;
                    self.skip_newlines();
                    let end = self.current_span();
                    self.expect(TokenKind::RBracket)?;
                    let span = self.span_of(expr).to(end);
                    expr = self.arena.alloc_expr(ExprKind::SafeIndex { receiver: expr, index }, span);
                }
                TokenKind::DoubleBang => {
                    let end = self.current_span();
                    self.advance();
                    let span = self.span_of(expr).to(end);
                    expr = self.arena.alloc_expr(ExprKind::NotNull { operand: expr }, span);
                }
                TokenKind::PlusPlus => {
                    let end = self.current_span();
                    self.advance();
                    let span = self.span_of(expr).to(end);
                    expr = self.arena.alloc_expr(ExprKind::Postfix { op: PostfixOp::PostInc, operand: expr }, span);
                }
                TokenKind::MinusMinus => {
                    let end = self.current_span();
                    self.advance();
                    let span = self.span_of(expr).to(end);
                    expr = self.arena.alloc_expr(ExprKind::Postfix { op: PostfixOp::PostDec, operand: expr }, span);
                }
                TokenKind::Question => {
                    // Disambiguate a trailing ternary `?` (left to the
                    // `parse_ternary` level) from error-propagation `?`
                    // (spec §4.2, §9 mark/reset use case).
                    let looks_like_ternary = self
                        .try_parse(|p| {
                            p.expect(TokenKind::Question)?;
                            p.skip_newlines();
                            p.parse_expr()?;
                            p.skip_newlines();
                            p.expect(TokenKind::Colon)?;
                            Ok(())
                        })
                        .is_some();
                    if looks_like_ternary {
                        break;
                    }
                    let end = self.current_span();
                    self.advance();
                    let span = self.span_of(expr).to(end);
                    expr = self.arena.alloc_expr(ExprKind::ErrorPropagation { operand: expr }, span);
                }
                TokenKind::LBrace if self.expr_could_take_trailing_lambda(expr) => {
                    let lambda = self.parse_lambda_literal()?;
                    expr = self.attach_trailing_lambda(expr, lambda);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn expr_could_take_trailing_lambda(&self, id: ExprId) -> bool {
        matches!(
            self.arena.exprs[id].kind,
            ExprKind::Identifier(_)
                | ExprKind::Member { .. }
                | ExprKind::SafeCall { .. }
                | ExprKind::Call { trailing_lambda: None, .. }
                | ExprKind::NotNull { .. }
                | ExprKind::Index { .. }
                | ExprKind::Slice { .. }
        )
    }

    fn attach_trailing_lambda(&mut self, expr: ExprId, lambda: ExprId) -> ExprId {
        if let ExprKind::Call { trailing_lambda, .. } = &mut self.arena.exprs[expr].kind {
            if trailing_lambda.is_none() {
                *trailing_lambda = Some(lambda);
                let span = self.span_of(expr).to(self.span_of(lambda));
                self.arena.exprs[expr].span = span;
                return expr;
            }
        }
        let span = self.span_of(expr).to(self.span_of(lambda));
        self.arena.alloc_expr(
            ExprKind::Call {
                callee: expr,
                type_args: Vec::new(),
                args: Vec::new(),
                arg_names: Vec::new(),
                trailing_lambda: Some(lambda),
            },
            span,
        )
    }

    /// Speculatively parse `<TypeArgs>` followed immediately by `(`,
    /// rewinding on any failure so a plain comparison chain (`foo < a`)
    /// is left untouched (spec §4.2, §9: generic-call vs. chained
    /// comparison).
    fn try_parse_generic_call_args(&mut self) -> Option<Vec<nova_ir::ast::TypeRef>> {
        self.try_parse(|p| {
            let args = p.parse_call_type_arguments()?;
            if p.check(&TokenKind::LParen) {
                Ok(args)
            } else {
                Err(ParseError::expected("`(`", *p.current_kind(), p.current_span()))
            }
        })
    }

    fn is_named_arg_start(&self) -> bool {
        self.check_ident() && matches!(self.peek_kind(1), TokenKind::Colon)
    }

    fn parse_call(&mut self, callee: ExprId, type_args: Vec<nova_ir::ast::TypeRef>) -> Result<ExprId, ParseError> {
        self.expect(TokenKind::LParen)?;
        self.skip_newlines();
        let mut args = Vec::new();
        let mut arg_names = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                self.skip_newlines();
                let name = if self.is_named_arg_start() {
                    let (n, _) = self.expect_ident()?;
                    self.expect(TokenKind::Colon)?;
                    Some(n)
                } else {
                    None
                };
                let value = if self.check(&TokenKind::Star) {
                    let start = self.current_span();
                    self.advance();
                    let operand = self.parse_expr()?;
                    let span = start.to(self.span_of(operand));
                    self.arena.alloc_expr(ExprKind::Spread { operand }, span)
                } else {
                    self.parse_expr()?
                };
                args.push(value);
                arg_names.push(name);
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
        let rparen_span = self.current_span();
        self.expect(TokenKind::RParen)?;
        let mut span = self.span_of(callee).to(rparen_span);
        let mut trailing_lambda = None;
        if self.check(&TokenKind::LBrace) {
            let lambda = self.parse_lambda_literal()?;
            span = span.to(self.span_of(lambda));
            trailing_lambda = Some(lambda);
        }
        Ok(self.arena.alloc_expr(ExprKind::Call { callee, type_args, args, arg_names, trailing_lambda }, span))
    }

    // ── Shared fold helpers ─────────────────────────────────────────────

    /// Plain left-associative fold: `a op b op c` ⇒ `(a op b) op c`.
    fn fold_binary(
        &mut self,
        mut next: impl FnMut(&mut Self) -> Result<ExprId, ParseError>,
        mut matcher: impl FnMut(&Self) -> Option<BinaryOp>,
    ) -> Result<ExprId, ParseError> {
        let mut left = next(self)?;
        while let Some(op) = matcher(self) {
            self.advance();
            self.skip_newlines();
            let right = next(self)?;
            let span = self.span_of(left).to(self.span_of(right));
            left = self.arena.alloc_expr(ExprKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    /// Chained fold with the spec §4.2 equality/comparison tie-break:
    /// every additional link ANDs in `(prevRight, right)` rather than
    /// `(result, right)`.
    fn chained_binary(
        &mut self,
        mut next: impl FnMut(&mut Self) -> Result<ExprId, ParseError>,
        mut matcher: impl FnMut(&Self) -> Option<BinaryOp>,
    ) -> Result<ExprId, ParseError> {
        let first_left = next(self)?;
        let Some(op) = matcher(self) else {
            return Ok(first_left);
        };
        self.advance();
        self.skip_newlines();
        let mut prev_right = next(self)?;
        let span = self.span_of(first_left).to(self.span_of(prev_right));
        let mut result = self.arena.alloc_expr(ExprKind::Binary { op, left: first_left, right: prev_right }, span);
        while let Some(op) = matcher(self) {
            self.advance();
            self.skip_newlines();
            let next_right = next(self)?;
            let cmp_span = self.span_of(prev_right).to(self.span_of(next_right));
            let cmp = self.arena.alloc_expr(ExprKind::Binary { op, left: prev_right, right: next_right }, cmp_span);
            let and_span = self.span_of(result).to(self.span_of(cmp));
            result = self.arena.alloc_expr(ExprKind::Binary { op: BinaryOp::And, left: result, right: cmp }, and_span);
            prev_right = next_right;
        }
        Ok(result)
    }

    // ── Primary ──────────────────────────────────────────────────────────

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        match self.current_kind() {
            TokenKind::IntLiteral => self.literal_token(|v| match v {
                LiteralValue::Int(n) => LiteralKind::Int(n),
                _ => unreachable!("lexer tags IntLiteral tokens with LiteralValue::Int"),
            }),
            TokenKind::LongLiteral => self.literal_token(|v| match v {
                LiteralValue::Long(n) => LiteralKind::Long(n),
                _ => unreachable!("lexer tags LongLiteral tokens with LiteralValue::Long"),
            }),
            TokenKind::FloatLiteral => self.literal_token(|v| match v {
                LiteralValue::Float(n) => LiteralKind::Float(n),
                _ => unreachable!("lexer tags FloatLiteral tokens with LiteralValue::Float"),
            }),
            TokenKind::DoubleLiteral => self.literal_token(|v| match v {
                LiteralValue::Double(n) => LiteralKind::Double(n),
                _ => unreachable!("lexer tags DoubleLiteral tokens with LiteralValue::Double"),
            }),
            TokenKind::BoolLiteral => self.literal_token(|v| match v {
                LiteralValue::Bool(b) => LiteralKind::Bool(b),
                _ => unreachable!("lexer tags BoolLiteral tokens with LiteralValue::Bool"),
            }),
            TokenKind::CharLiteral => self.literal_token(|v| match v {
                LiteralValue::Char(c) => LiteralKind::Char(c),
                _ => unreachable!("lexer tags CharLiteral tokens with LiteralValue::Char"),
            }),
            TokenKind::KwNull => {
                self.advance();
                Ok(self.arena.alloc_expr(ExprKind::Literal(LiteralKind::Null), start))
            }
            TokenKind::StringLiteral | TokenKind::RawStringLiteral => {
                let token = self.advance();
                let text = match token.literal {
                    Some(LiteralValue::Str(name)) => name,
                    _ => unreachable!("lexer tags string tokens with LiteralValue::Str"),
                };
                let parts = vec![StringPart { literal: Some(text), expr: None }];
                Ok(self.arena.alloc_expr(ExprKind::StringInterpolation(parts), token.span))
            }
            TokenKind::InterpolatedStringLiteral => {
                let token = self.advance();
                let raw = match token.literal {
                    Some(LiteralValue::Str(name)) => self.interner.resolve(name),
                    _ => unreachable!("lexer tags interpolated-string tokens with LiteralValue::Str"),
                };
                let parts = self.parse_interpolated_parts(raw, token.span)?;
                Ok(self.arena.alloc_expr(ExprKind::StringInterpolation(parts), token.span))
            }
            TokenKind::Identifier if self.current_text() == "_" => {
                self.advance();
                Ok(self.arena.alloc_expr(ExprKind::Placeholder, start))
            }
            TokenKind::Identifier if self.at_soft_keyword("await") => {
                self.advance();
                let operand = self.parse_prefix()?;
                let span = start.to(self.span_of(operand));
                Ok(self.arena.alloc_expr(ExprKind::Await { operand }, span))
            }
            TokenKind::Identifier => {
                let (name, span) = self.expect_ident()?;
                Ok(self.arena.alloc_expr(ExprKind::Identifier(name), span))
            }
            TokenKind::KwThis => {
                self.advance();
                Ok(self.arena.alloc_expr(ExprKind::This, start))
            }
            TokenKind::KwSuper => {
                self.advance();
                Ok(self.arena.alloc_expr(ExprKind::Super, start))
            }
            TokenKind::DoubleColon => {
                self.advance();
                let (method_name, name_span) = self.expect_ident()?;
                let span = start.to(name_span);
                Ok(self.arena.alloc_expr(ExprKind::MethodRef { receiver: None, method_name }, span))
            }
            TokenKind::Dot => {
                // `.member` scope shorthand (spec §3 "ScopeShorthandExpr").
                self.advance();
                let (name, name_span) = self.expect_ident()?;
                let span = start.to(name_span);
                Ok(self.arena.alloc_expr(ExprKind::ScopeShorthand { name }, span))
            }
            TokenKind::LParen => {
                self.advance();
                self.skip_newlines();
                let inner = self.parse_expr()?;
                self.skip_newlines();
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_list_literal(),
            TokenKind::HashBrace => self.parse_set_or_map_literal(),
            TokenKind::LBrace => self.parse_lambda_literal(),
            TokenKind::KwIf => self.parse_if_expr(),
            TokenKind::KwWhen => self.parse_when_expr(),
            TokenKind::KwTry => self.parse_try_expr(),
            TokenKind::KwBreak => self.parse_jump_expr(JumpKind::Break),
            TokenKind::KwContinue => self.parse_jump_expr(JumpKind::Continue),
            _ => Err(ParseError::expected("an expression", *self.current_kind(), start)),
        }
    }

    fn literal_token(&mut self, f: impl FnOnce(LiteralValue) -> LiteralKind) -> Result<ExprId, ParseError> {
        let token = self.advance();
        let value = token.literal.expect("literal tokens always carry a LiteralValue");
        Ok(self.arena.alloc_expr(ExprKind::Literal(f(value)), token.span))
    }

    fn parse_jump_expr(&mut self, kind: JumpKind) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        self.advance();
        let label = if self.check(&TokenKind::At) {
            self.advance();
            Some(self.expect_ident()?.0)
        } else {
            None
        };
        let value = if self.can_start_expr() { Some(self.parse_expr()?) } else { None };
        let end = value.map_or(start, |v| self.span_of(v));
        let span = start.to(end);
        Ok(self.arena.alloc_expr(ExprKind::Jump { kind, label, value }, span))
    }

    /// Conservative check used only to decide whether `break`/`continue`
    /// carry a trailing value expression; errs towards "no value" at
    /// statement boundaries.
    fn can_start_expr(&self) -> bool {
        !matches!(
            self.current_kind(),
            TokenKind::NewLine
                | TokenKind::Semicolon
                | TokenKind::Eof
                | TokenKind::RBrace
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::Comma
                | TokenKind::KwElse
        )
    }

    fn parse_list_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        self.advance();
        self.skip_newlines();
        let mut elements = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                self.skip_newlines();
                elements.push(self.parse_expr()?);
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
        let end = self.current_span();
        self.expect(TokenKind::RBracket)?;
        let span = start.to(end);
        Ok(self.arena.alloc_expr(
            ExprKind::Collection { kind: CollectionKind::List, elements, map_entries: Vec::new() },
            span,
        ))
    }

    /// `#{…}` — set form when entries have no `:`, map form when the
    /// first entry does (spec §4.5 "Collection literal").
    fn parse_set_or_map_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        self.advance();
        self.skip_newlines();
        if self.check(&TokenKind::RBrace) {
            let end = self.current_span();
            self.advance();
            let span = start.to(end);
            return Ok(self.arena.alloc_expr(
                ExprKind::Collection { kind: CollectionKind::Set, elements: Vec::new(), map_entries: Vec::new() },
                span,
            ));
        }

        let first_key = self.parse_expr()?;
        self.skip_newlines();
        if self.check(&TokenKind::Colon) {
            self.advance();
            self.skip_newlines();
            let first_value = self.parse_expr()?;
            let mut map_entries = vec![MapEntryExpr { key: first_key, value: first_value }];
            self.skip_newlines();
            while self.check(&TokenKind::Comma) {
                self.advance();
                self.skip_newlines();
                if self.check(&TokenKind::RBrace) {
                    break;
                }
                let key = self.parse_expr()?;
                self.skip_newlines();
                self.expect(TokenKind::Colon)?;
                self.skip_newlines();
                let value = self.parse_expr()?;
                map_entries.push(MapEntryExpr { key, value });
                self.skip_newlines();
            }
            let end = self.current_span();
            self.expect(TokenKind::RBrace)?;
            let span = start.to(end);
            return Ok(self.arena.alloc_expr(
                ExprKind::Collection { kind: CollectionKind::Map, elements: Vec::new(), map_entries },
                span,
            ));
        }

        let mut elements = vec![first_key];
        self.skip_newlines();
        while self.check(&TokenKind::Comma) {
            self.advance();
            self.skip_newlines();
            if self.check(&TokenKind::RBrace) {
                break;
            }
            elements.push(self.parse_expr()?);
            self.skip_newlines();
        }
        let end = self.current_span();
        self.expect(TokenKind::RBrace)?;
        let span = start.to(end);
        Ok(self.arena.alloc_expr(
            ExprKind::Collection { kind: CollectionKind::Set, elements, map_entries: Vec::new() },
            span,
        ))
    }

    /// `{ params -> body }` or `{ body }` with implicit `it` (spec §4.2:
    /// mark/reset to detect a typed parameter list before committing).
    pub(crate) fn parse_lambda_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::LBrace)?;
        self.skip_newlines();
        let params = self.try_parse(Self::parse_lambda_param_list);
        let (params, implicit_it) = match params {
            Some(p) => (p, false),
            None => (Vec::new(), true),
        };
        self.skip_newlines();
        let stmts = self.parse_stmts_until_rbrace()?;
        let body_span = self.current_span();
        let body = self.arena.alloc_stmt(nova_ir::ast::StmtKind::Block(stmts), start.to(body_span));
        let end = self.current_span();
        self.expect(TokenKind::RBrace)?;
        let span = start.to(end);
        Ok(self.arena.alloc_expr(ExprKind::Lambda { params, implicit_it, body }, span))
    }

    fn parse_lambda_param_list(&mut self) -> Result<Vec<LambdaParam>, ParseError> {
        let mut params = Vec::new();
        loop {
            let (name, span) = self.expect_ident()?;
            let ty = if self.check(&TokenKind::Colon) {
                self.advance();
                Some(self.parse_type()?)
            } else {
                None
            };
            params.push(LambdaParam { name, ty, span });
            if self.check(&TokenKind::Comma) {
                self.advance();
                self.skip_newlines();
            } else {
                break;
            }
        }
        self.expect(TokenKind::Arrow)?;
        self.skip_newlines();
        Ok(params)
    }

    /// `if (cond) thenExpr [else elseExpr]`, with an optional
    /// `val name = expr` smart-cast binding in the condition position.
    /// Branch bodies are parsed as ordinary expressions: a `{ … }` branch
    /// is just a bare lambda literal (spec §4.2 primary grammar), which
    /// this AST reuses as its block-expression shape since there is no
    /// dedicated `Block` expression node.
    fn parse_if_expr(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::KwIf)?;
        self.expect(TokenKind::LParen)?;
        self.skip_newlines();
        let (binding, condition) = if self.check(&TokenKind::KwVal) {
            self.advance();
            let (name, _) = self.expect_ident()?;
            self.expect(TokenKind::Eq)?;
            self.skip_newlines();
            let init = self.parse_expr()?;
            (Some(name), init)
        } else {
            (None, self.parse_expr()?)
        };
        self.skip_newlines();
        self.expect(TokenKind::RParen)?;
        self.skip_newlines();
        let then_branch = self.parse_expr()?;
        self.skip_newlines();
        let else_branch = if self.check(&TokenKind::KwElse) {
            self.advance();
            self.skip_newlines();
            Some(self.parse_expr()?)
        } else {
            None
        };
        let end = else_branch.map_or(then_branch, |e| e);
        let span = start.to(self.span_of(end));
        Ok(self.arena.alloc_expr(ExprKind::If { condition, binding, then_branch, else_branch }, span))
    }

    /// `when [(subject)] { cond1, cond2 -> body; else -> body }`.
    fn parse_when_expr(&mut self) -> Result<ExprId, ParseError> {
        use nova_ir::ast::WhenBranch;
        let start = self.current_span();
        self.expect(TokenKind::KwWhen)?;
        let subject = if self.check(&TokenKind::LParen) {
            self.advance();
            self.skip_newlines();
            let subject = self.parse_expr()?;
            self.skip_newlines();
            self.expect(TokenKind::RParen)?;
            Some(subject)
        } else {
            None
        };
        self.skip_newlines();
        self.expect(TokenKind::LBrace)?;
        self.skip_newlines();
        let mut branches = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let conditions = if self.check(&TokenKind::KwElse) {
                self.advance();
                Vec::new()
            } else {
                let mut conds = vec![self.parse_expr()?];
                self.skip_newlines();
                while self.check(&TokenKind::Comma) {
                    self.advance();
                    self.skip_newlines();
                    conds.push(self.parse_expr()?);
                    self.skip_newlines();
                }
                conds
            };
            self.skip_newlines();
            self.expect(TokenKind::Arrow)?;
            self.skip_newlines();
            let body = self.parse_expr()?;
            branches.push(WhenBranch { conditions, body });
            self.skip_newlines();
        }
        let end = self.current_span();
        self.expect(TokenKind::RBrace)?;
        let span = start.to(end);
        Ok(self.arena.alloc_expr(ExprKind::When { subject, branches }, span))
    }

    fn parse_try_expr(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::KwTry)?;
        self.skip_newlines();
        let body = self.parse_block_stmt()?;
        let mut catches = Vec::new();
        loop {
            self.skip_newlines();
            if !self.check(&TokenKind::KwCatch) {
                break;
            }
            let catch_start = self.current_span();
            self.advance();
            self.expect(TokenKind::LParen)?;
            let (param_name, _) = self.expect_ident()?;
            let param_ty = if self.check(&TokenKind::Colon) {
                self.advance();
                Some(self.parse_type()?)
            } else {
                None
            };
            self.expect(TokenKind::RParen)?;
            self.skip_newlines();
            let cbody = self.parse_block_stmt()?;
            let span = catch_start.to(self.stmt_span(cbody));
            catches.push(CatchClause { param_name, param_ty, body: cbody, span });
        }
        self.skip_newlines();
        let finally = if self.check(&TokenKind::KwFinally) {
            self.advance();
            self.skip_newlines();
            Some(self.parse_block_stmt()?)
        } else {
            None
        };
        let end = finally.or(catches.last().map(|c| c.body)).unwrap_or(body);
        let span = start.to(self.stmt_span(end));
        Ok(self.arena.alloc_expr(ExprKind::Try { body, catches, finally }, span))
    }

    fn stmt_span(&self, id: nova_ir::ast::StmtId) -> Span {
        self.arena.stmts[id].span
    }

    /// Re-scan the lexer's cooked interpolated-string text (escapes
    /// already resolved, `$` markers left literal) into literal runs and
    /// `$identifier`/`${expr}` parts, recursively tokenizing/parsing each
    /// `${expr}` as a full expression (spec §4.1/§4.2).
    fn parse_interpolated_parts(&mut self, text: &str, span: Span) -> Result<Vec<StringPart>, ParseError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '$' {
                literal.push(c);
                continue;
            }
            match chars.peek() {
                Some('{') => {
                    chars.next();
                    let mut depth = 1usize;
                    let mut inner = String::new();
                    for c in chars.by_ref() {
                        if c == '{' {
                            depth += 1;
                        } else if c == '}' {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        inner.push(c);
                    }
                    if !literal.is_empty() {
                        parts.push(StringPart { literal: Some(self.interner.intern(&literal)), expr: None });
                        literal.clear();
                    }
                    let expr = self.parse_sub_expr(&inner, span)?;
                    parts.push(StringPart { literal: None, expr: Some(expr) });
                }
                Some(c0) if is_ident_start_char(*c0) => {
                    let mut name = String::new();
                    while let Some(c) = chars.peek().copied() {
                        if is_ident_continue_char(c) {
                            name.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    if !literal.is_empty() {
                        parts.push(StringPart { literal: Some(self.interner.intern(&literal)), expr: None });
                        literal.clear();
                    }
                    let expr = self.arena.alloc_expr(ExprKind::Identifier(self.interner.intern(&name)), span);
                    parts.push(StringPart { literal: None, expr: Some(expr) });
                }
                _ => literal.push('$'),
            }
        }
        if !literal.is_empty() || parts.is_empty() {
            parts.push(StringPart { literal: Some(self.interner.intern(&literal)), expr: None });
        }
        Ok(parts)
    }

    /// Parse `source` (an interpolation hole's raw text) as a standalone
    /// expression, re-lexing it with the same interner. The sub-parser
    /// temporarily borrows `self.arena` (rather than allocating its own)
    /// so the returned `ExprId` is valid without any cross-arena offset
    /// bookkeeping.
    fn parse_sub_expr(&mut self, source: &str, outer_span: Span) -> Result<ExprId, ParseError> {
        let (tokens, lex_errors) = nova_lexer::tokenize(source, self.interner);
        if let Some(e) = lex_errors.first() {
            return Err(ParseError::new(e.message(), outer_span, TokenKind::Error));
        }
        let mut sub = Parser {
            tokens,
            pos: 0,
            mark: None,
            interner: self.interner,
            arena: std::mem::take(&mut self.arena),
            errors: Vec::new(),
            top_level_statements: Vec::new(),
        };
        let result = sub.parse_expr();
        self.arena = sub.arena;
        result
    }
}

fn is_ident_start_char(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_ir::StringInterner;

    fn parse_expr_str(src: &str, interner: &StringInterner) -> (Parser<'_>, ExprId) {
        let (tokens, _) = nova_lexer::tokenize(src, interner);
        let mut parser = Parser::new(tokens, interner);
        let id = parser.parse_expr().unwrap();
        (parser, id)
    }

    #[test]
    fn parses_arithmetic_precedence() {
        let interner = StringInterner::new();
        let (parser, id) = parse_expr_str("1 + 2 * 3", &interner);
        match &parser.arena.exprs[id].kind {
            ExprKind::Binary { op: BinaryOp::Add, right, .. } => {
                assert!(matches!(parser.arena.exprs[*right].kind, ExprKind::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("expected Add(_, Mul), got {other:?}"),
        }
    }

    #[test]
    fn chains_equality_with_and() {
        let interner = StringInterner::new();
        let (parser, id) = parse_expr_str("a == b == c", &interner);
        assert!(matches!(parser.arena.exprs[id].kind, ExprKind::Binary { op: BinaryOp::And, .. }));
    }

    #[test]
    fn distinguishes_generic_call_from_comparison() {
        let interner = StringInterner::new();
        let (parser, id) = parse_expr_str("foo<Int>(1)", &interner);
        match &parser.arena.exprs[id].kind {
            ExprKind::Call { type_args, .. } => assert_eq!(type_args.len(), 1),
            other => panic!("expected Call, got {other:?}"),
        }

        let (parser, id) = parse_expr_str("a < b", &interner);
        assert!(matches!(parser.arena.exprs[id].kind, ExprKind::Binary { op: BinaryOp::Lt, .. }));
    }

    #[test]
    fn distinguishes_ternary_from_error_propagation() {
        let interner = StringInterner::new();
        let (parser, id) = parse_expr_str("a ? b : c", &interner);
        assert!(matches!(parser.arena.exprs[id].kind, ExprKind::Conditional { .. }));

        let (parser, id) = parse_expr_str("a?", &interner);
        assert!(matches!(parser.arena.exprs[id].kind, ExprKind::ErrorPropagation { .. }));
    }

    #[test]
    fn parses_trailing_lambda_as_call() {
        let interner = StringInterner::new();
        let (parser, id) = parse_expr_str("list.map { it + 1 }", &interner);
        match &parser.arena.exprs[id].kind {
            ExprKind::Call { trailing_lambda: Some(_), .. } => {}
            other => panic!("expected Call with trailing lambda, got {other:?}"),
        }
    }

    #[test]
    fn parses_set_and_map_literals() {
        let interner = StringInterner::new();
        let (parser, id) = parse_expr_str("#{1, 2, 3}", &interner);
        assert!(matches!(
            parser.arena.exprs[id].kind,
            ExprKind::Collection { kind: CollectionKind::Set, .. }
        ));

        let (parser, id) = parse_expr_str("#{\"a\": 1}", &interner);
        assert!(matches!(
            parser.arena.exprs[id].kind,
            ExprKind::Collection { kind: CollectionKind::Map, .. }
        ));
    }

    #[test]
    fn parses_string_interpolation() {
        let interner = StringInterner::new();
        let (parser, id) = parse_expr_str("\"hi ${1 + 2} $name\"", &interner);
        match &parser.arena.exprs[id].kind {
            ExprKind::StringInterpolation(parts) => assert!(parts.len() >= 3),
            other => panic!("expected StringInterpolation, got {other:?}"),
        }
    }

    #[test]
    fn parses_if_expression_with_else() {
        let interner = StringInterner::new();
        let (parser, id) = parse_expr_str("if (x > 0) 1 else 2", &interner);
        assert!(matches!(parser.arena.exprs[id].kind, ExprKind::If { else_branch: Some(_), .. }));
    }
}
