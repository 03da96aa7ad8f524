//! Parse errors (spec §3 "Diagnostic" family, §4.2 `ParseResult`).

use nova_ir::{Span, TokenKind};
use std::fmt;

/// One recovered-from or fatal syntax error, carrying the token kind the
/// parser was looking at so `synchronize()` callers and tests can assert
/// on more than the message text.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub token: TokenKind,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span, token: TokenKind) -> Self {
        ParseError { message: message.into(), span, token }
    }

    pub fn expected(what: &str, found: TokenKind, span: Span) -> Self {
        ParseError::new(format!("expected {what}, found {found}"), span, found)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.span)
    }
}

impl std::error::Error for ParseError {}
