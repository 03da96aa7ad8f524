//! Single-slot mark/reset backtracking (spec §4.2, §9).
//!
//! Because the parser owns a fully materialized `Vec<Token>`, "mark" and
//! "reset" are a plain index save/restore rather than a replay queue —
//! the buffer already holds everything that would need replaying. The
//! one-active-mark-at-a-time discipline from spec §9 is enforced with a
//! `debug_assert!` rather than a stack, matching "keep this state local".

use crate::Parser;

impl Parser<'_> {
    /// Record the current position so a later `reset()` can rewind to it.
    pub(crate) fn mark(&mut self) -> usize {
        debug_assert!(self.mark.is_none(), "nested marks are not supported (one active mark at a time)");
        self.mark = Some(self.pos);
        self.pos
    }

    /// Rewind to a previously taken mark, discarding whatever was parsed
    /// since.
    pub(crate) fn reset(&mut self, mark: usize) {
        self.pos = mark;
        self.mark = None;
    }

    /// Discard a mark without rewinding: the speculative parse succeeded
    /// and its tokens should stay consumed.
    pub(crate) fn commit_mark(&mut self) {
        self.mark = None;
    }

    /// Run `f` speculatively: if it returns `Ok`, keep the consumed
    /// tokens; if it returns `Err`, rewind as if nothing happened.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, crate::ParseError>) -> Option<T> {
        let start = self.mark();
        match f(self) {
            Ok(value) => {
                self.commit_mark();
                Some(value)
            }
            Err(_) => {
                self.reset(start);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_ir::StringInterner;

    #[test]
    fn reset_rewinds_to_marked_position() {
        let interner = StringInterner::new();
        let (tokens, _) = nova_lexer::tokenize("a b c", &interner);
        let mut parser = Parser::new(tokens, &interner);
        parser.advance();
        let mark = parser.mark();
        parser.advance();
        parser.advance();
        parser.reset(mark);
        assert_eq!(parser.pos, mark);
    }

    #[test]
    fn try_parse_keeps_tokens_on_success() {
        let interner = StringInterner::new();
        let (tokens, _) = nova_lexer::tokenize("a b", &interner);
        let mut parser = Parser::new(tokens, &interner);
        let result = parser.try_parse(|p| {
            p.advance();
            Ok::<_, crate::ParseError>(())
        });
        assert!(result.is_some());
        assert_eq!(parser.pos, 1);
    }

    #[test]
    fn try_parse_rewinds_on_failure() {
        let interner = StringInterner::new();
        let (tokens, _) = nova_lexer::tokenize("a b", &interner);
        let mut parser = Parser::new(tokens, &interner);
        let result = parser.try_parse(|p| {
            p.advance();
            Err(crate::ParseError::new("nope", nova_ir::Span::UNKNOWN, nova_ir::TokenKind::Eof))
        });
        assert!(result.is_none());
        assert_eq!(parser.pos, 0);
    }
}
