//! Tolerant-mode error recovery (spec §4.2, §9: "implement `synchronize()`
//! to never stall").

use crate::Parser;
use nova_ir::TokenKind;

const MODIFIER_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "internal", "open", "abstract", "sealed", "final",
    "override", "operator", "inline", "suspend", "const", "companion", "reified", "vararg",
    "crossinline", "static",
];

impl Parser<'_> {
    /// True when the current token could begin a declaration: an
    /// annotation, a visibility/inheritance modifier, a declaration
    /// keyword, or the soft keyword `annotation` immediately followed by
    /// `class` (spec §4.2).
    pub(crate) fn at_declaration_start(&self) -> bool {
        if self.check(&TokenKind::At) {
            return true;
        }
        if matches!(
            self.current_kind(),
            TokenKind::KwClass
                | TokenKind::KwInterface
                | TokenKind::KwObject
                | TokenKind::KwEnum
                | TokenKind::KwFun
                | TokenKind::KwVal
                | TokenKind::KwVar
                | TokenKind::KwTypealias
        ) {
            return true;
        }
        if MODIFIER_KEYWORDS.iter().any(|kw| self.at_soft_keyword(kw)) {
            return true;
        }
        if self.at_soft_keyword("annotation") && matches!(self.peek_kind(1), TokenKind::KwClass) {
            return true;
        }
        false
    }

    /// Resynchronize after a `ParseError` inside the top-level loop
    /// (spec §4.2): advance one token, then skip until either the
    /// previous token was a statement terminator followed by a
    /// declaration-start, or the current token itself is a declaration
    /// start. Always consumes at least one token, so the error set grows
    /// by at most one per bad construct.
    pub(crate) fn synchronize(&mut self) {
        self.advance();
        loop {
            if self.is_at_end() {
                return;
            }
            let prev_is_terminator =
                matches!(self.tokens[self.pos.saturating_sub(1)].kind, TokenKind::NewLine | TokenKind::Semicolon);
            if prev_is_terminator && self.at_declaration_start() {
                return;
            }
            if self.at_declaration_start() {
                return;
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_ir::StringInterner;

    #[test]
    fn synchronize_always_consumes_at_least_one_token() {
        let interner = StringInterner::new();
        let (tokens, _) = nova_lexer::tokenize(")))", &interner);
        let mut parser = Parser::new(tokens, &interner);
        let before = parser.pos;
        parser.synchronize();
        assert!(parser.pos > before);
    }

    #[test]
    fn synchronize_stops_at_next_declaration() {
        let interner = StringInterner::new();
        let (tokens, _) = nova_lexer::tokenize(") ) )\nclass Foo {}", &interner);
        let mut parser = Parser::new(tokens, &interner);
        parser.synchronize();
        assert!(parser.check(&TokenKind::KwClass));
    }
}
