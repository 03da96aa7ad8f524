//! Statement parsing (spec §3 "Statements").

use crate::{ParseError, Parser};
use nova_ir::ast::{ForBinding, StmtId, StmtKind};
use nova_ir::TokenKind;

impl Parser<'_> {
    /// Parse one statement, dispatching to a declaration when the current
    /// token starts one (spec §4.2: declarations and statements share the
    /// same block-level position).
    pub(crate) fn parse_stmt(&mut self) -> Result<StmtId, ParseError> {
        if self.at_declaration_start() {
            let start = self.current_span();
            let decl = self.parse_declaration()?;
            return Ok(self.arena.alloc_stmt(StmtKind::Declaration(decl), start.to(self.previous_span())));
        }
        match self.current_kind() {
            TokenKind::LBrace => self.parse_block_stmt(),
            TokenKind::KwIf => self.parse_if_stmt(),
            TokenKind::KwWhen => self.parse_when_stmt(),
            TokenKind::KwFor => self.parse_for_stmt(),
            TokenKind::KwWhile => self.parse_while_stmt(),
            TokenKind::KwDo => self.parse_do_while_stmt(),
            TokenKind::KwTry => self.parse_try_stmt(),
            TokenKind::KwReturn => self.parse_return_stmt(),
            TokenKind::KwBreak => self.parse_break_stmt(),
            TokenKind::KwContinue => self.parse_continue_stmt(),
            TokenKind::KwThrow => self.parse_throw_stmt(),
            TokenKind::Identifier if self.at_soft_keyword("guard") => self.parse_guard_stmt(),
            TokenKind::Identifier if self.at_soft_keyword("use") => self.parse_use_stmt(),
            _ => {
                let start = self.current_span();
                let expr = self.parse_expr()?;
                let span = start.to(self.previous_span());
                Ok(self.arena.alloc_stmt(StmtKind::Expression(expr), span))
            }
        }
    }

    /// Parse statements up to (not including) the closing `}`.
    pub(crate) fn parse_stmts_until_rbrace(&mut self) -> Result<Vec<StmtId>, ParseError> {
        let mut stmts = Vec::new();
        self.skip_newlines();
        while self.check(&TokenKind::Semicolon) {
            self.advance();
            self.skip_newlines();
        }
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            stmts.push(self.parse_stmt()?);
            self.skip_terminator();
            while self.check(&TokenKind::Semicolon) {
                self.advance();
                self.skip_newlines();
            }
        }
        Ok(stmts)
    }

    pub(crate) fn parse_block_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::LBrace)?;
        let stmts = self.parse_stmts_until_rbrace()?;
        let end = self.current_span();
        self.expect(TokenKind::RBrace)?;
        Ok(self.arena.alloc_stmt(StmtKind::Block(stmts), start.to(end)))
    }

    fn parse_if_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::KwIf)?;
        self.expect(TokenKind::LParen)?;
        self.skip_newlines();
        let condition = self.parse_expr()?;
        self.skip_newlines();
        self.expect(TokenKind::RParen)?;
        self.skip_newlines();
        let then_branch = self.parse_stmt()?;
        self.skip_newlines();
        let else_branch = if self.check(&TokenKind::KwElse) {
            self.advance();
            self.skip_newlines();
            Some(self.parse_stmt()?)
        } else {
            None
        };
        let end = else_branch.unwrap_or(then_branch);
        let span = start.to(self.arena.stmts[end].span);
        Ok(self.arena.alloc_stmt(StmtKind::If { condition, then_branch, else_branch }, span))
    }

    fn parse_when_stmt(&mut self) -> Result<StmtId, ParseError> {
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
            let body = self.parse_stmt()?;
            branches.push((conditions, body));
            self.skip_terminator();
        }
        let end = self.current_span();
        self.expect(TokenKind::RBrace)?;
        let span = start.to(end);
        Ok(self.arena.alloc_stmt(StmtKind::When { subject, branches }, span))
    }

    fn parse_for_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::KwFor)?;
        self.expect(TokenKind::LParen)?;
        let (name, name_span) = self.expect_ident()?;
        let ty = if self.check(&TokenKind::Colon) {
            self.advance();
            Some(self.parse_type()?)
        } else {
            None
        };
        if !self.check(&TokenKind::KwIn) {
            return Err(ParseError::expected("`in`", *self.current_kind(), self.current_span()));
        }
        self.advance();
        self.skip_newlines();
        let iterable = self.parse_expr()?;
        self.skip_newlines();
        self.expect(TokenKind::RParen)?;
        self.skip_newlines();
        let body = self.parse_stmt()?;
        let span = start.to(self.arena.stmts[body].span);
        let binding = ForBinding { name, ty, span: name_span };
        Ok(self.arena.alloc_stmt(StmtKind::For { binding, iterable, body }, span))
    }

    fn parse_while_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::KwWhile)?;
        self.expect(TokenKind::LParen)?;
        self.skip_newlines();
        let condition = self.parse_expr()?;
        self.skip_newlines();
        self.expect(TokenKind::RParen)?;
        self.skip_newlines();
        let body = self.parse_stmt()?;
        let span = start.to(self.arena.stmts[body].span);
        Ok(self.arena.alloc_stmt(StmtKind::While { condition, body }, span))
    }

    fn parse_do_while_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::KwDo)?;
        self.skip_newlines();
        let body = self.parse_stmt()?;
        self.skip_newlines();
        self.expect(TokenKind::KwWhile)?;
        self.expect(TokenKind::LParen)?;
        self.skip_newlines();
        let condition = self.parse_expr()?;
        self.skip_newlines();
        let end = self.current_span();
        self.expect(TokenKind::RParen)?;
        let span = start.to(end);
        Ok(self.arena.alloc_stmt(StmtKind::DoWhile { body, condition }, span))
    }

    fn parse_try_stmt(&mut self) -> Result<StmtId, ParseError> {
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
            let span = catch_start.to(self.arena.stmts[cbody].span);
            catches.push(nova_ir::ast::CatchClause { param_name, param_ty, body: cbody, span });
        }
        self.skip_newlines();
        let finally = if self.check(&TokenKind::KwFinally) {
            self.advance();
            self.skip_newlines();
            Some(self.parse_block_stmt()?)
        } else {
            None
        };
        let end = finally.or_else(|| catches.last().map(|c| c.body)).unwrap_or(body);
        let span = start.to(self.arena.stmts[end].span);
        Ok(self.arena.alloc_stmt(StmtKind::Try { body, catches, finally }, span))
    }

    fn parse_return_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::KwReturn)?;
        let value = if self.can_start_stmt_expr() { Some(self.parse_expr()?) } else { None };
        let end = value.map_or(start, |v| self.arena.exprs[v].span);
        Ok(self.arena.alloc_stmt(StmtKind::Return(value), start.to(end)))
    }

    fn parse_break_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::KwBreak)?;
        let label = self.parse_optional_label()?;
        Ok(self.arena.alloc_stmt(StmtKind::Break(label), start.to(self.previous_span())))
    }

    fn parse_continue_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::KwContinue)?;
        let label = self.parse_optional_label()?;
        Ok(self.arena.alloc_stmt(StmtKind::Continue(label), start.to(self.previous_span())))
    }

    fn parse_optional_label(&mut self) -> Result<Option<nova_ir::Name>, ParseError> {
        if self.check(&TokenKind::At) {
            self.advance();
            Ok(Some(self.expect_ident()?.0))
        } else {
            Ok(None)
        }
    }

    fn parse_throw_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::KwThrow)?;
        let value = self.parse_expr()?;
        let span = start.to(self.arena.exprs[value].span);
        Ok(self.arena.alloc_stmt(StmtKind::Throw(value), span))
    }

    /// `guard <cond> else { <body> }` — an early-exit statement: if
    /// `cond` is false the `else` block runs and must not fall through
    /// (it always diverges: `return`/`break`/`continue`/`throw`).
    fn parse_guard_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.advance();
        let condition = self.parse_expr()?;
        self.skip_newlines();
        if !self.check(&TokenKind::KwElse) {
            return Err(ParseError::expected("`else`", *self.current_kind(), self.current_span()));
        }
        self.advance();
        self.skip_newlines();
        let else_body = self.parse_block_stmt()?;
        let span = start.to(self.arena.stmts[else_body].span);
        Ok(self.arena.alloc_stmt(StmtKind::Guard { condition, else_body }, span))
    }

    /// `use name = expr` — a scoped-resource binding released at the end
    /// of the enclosing block.
    fn parse_use_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.advance();
        let (name, name_span) = self.expect_ident()?;
        self.expect(TokenKind::Eq)?;
        self.skip_newlines();
        let value = self.parse_expr()?;
        let span = start.to(self.arena.exprs[value].span);
        Ok(self.arena.alloc_stmt(StmtKind::Use { name, value, name_span }, span))
    }

    fn can_start_stmt_expr(&self) -> bool {
        !matches!(
            self.current_kind(),
            TokenKind::NewLine | TokenKind::Semicolon | TokenKind::Eof | TokenKind::RBrace
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_ir::StringInterner;

    fn parse_stmt_str(src: &str, interner: &StringInterner) -> (Parser<'_>, StmtId) {
        let (tokens, _) = nova_lexer::tokenize(src, interner);
        let mut parser = Parser::new(tokens, interner);
        let id = parser.parse_stmt().unwrap();
        (parser, id)
    }

    #[test]
    fn parses_if_else_statement() {
        let interner = StringInterner::new();
        let (parser, id) = parse_stmt_str("if (x) { y() } else { z() }", &interner);
        assert!(matches!(parser.arena.stmts[id].kind, StmtKind::If { else_branch: Some(_), .. }));
    }

    #[test]
    fn parses_for_statement() {
        let interner = StringInterner::new();
        let (parser, id) = parse_stmt_str("for (x in xs) { print(x) }", &interner);
        assert!(matches!(parser.arena.stmts[id].kind, StmtKind::For { .. }));
    }

    #[test]
    fn parses_while_statement() {
        let interner = StringInterner::new();
        let (parser, id) = parse_stmt_str("while (true) { break }", &interner);
        assert!(matches!(parser.arena.stmts[id].kind, StmtKind::While { .. }));
    }

    #[test]
    fn parses_guard_statement() {
        let interner = StringInterner::new();
        let (parser, id) = parse_stmt_str("guard x != null else { return }", &interner);
        assert!(matches!(parser.arena.stmts[id].kind, StmtKind::Guard { .. }));
    }

    #[test]
    fn parses_use_statement() {
        let interner = StringInterner::new();
        let (parser, id) = parse_stmt_str("use f = openFile()", &interner);
        assert!(matches!(parser.arena.stmts[id].kind, StmtKind::Use { .. }));
    }

    #[test]
    fn parses_bare_expression_statement() {
        let interner = StringInterner::new();
        let (parser, id) = parse_stmt_str("1 + 2", &interner);
        assert!(matches!(parser.arena.stmts[id].kind, StmtKind::Expression(_)));
    }
}
