//! Lexical error taxonomy (spec §7 layer 1).

use nova_ir::Span;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum LexErrorKind {
    UnterminatedString,
    UnterminatedCharLiteral,
    InvalidEscape(char),
    InvalidNumericLiteral(String),
    UnexpectedCharacter(char),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn message(&self) -> String {
        match &self.kind {
            LexErrorKind::UnterminatedString => "unterminated string literal".to_string(),
            LexErrorKind::UnterminatedCharLiteral => "unterminated character literal".to_string(),
            LexErrorKind::InvalidEscape(c) => format!("invalid escape sequence '\\{c}'"),
            LexErrorKind::InvalidNumericLiteral(s) => format!("invalid numeric literal '{s}'"),
            LexErrorKind::UnexpectedCharacter(c) => format!("unexpected character '{c}'"),
        }
    }
}
