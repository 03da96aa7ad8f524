//! Lexer output: [`TokenKind`] and [`Token`].

use crate::name::Name;
use crate::span::Span;
use std::fmt;

/// A literal value attached to a token, kept in the token rather than
/// re-parsed later by the AST builder.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    /// Cooked string contents (escapes resolved). Interpolation parts are
    /// re-lexed from the raw source by the parser; this holds the literal
    /// text for non-interpolated strings and the raw source slice (as
    /// `Name`) for interpolated ones so the parser can re-scan it.
    Str(Name),
}

/// Every distinguishable lexeme kind.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TokenKind {
    // Literals
    IntLiteral,
    LongLiteral,
    FloatLiteral,
    DoubleLiteral,
    BoolLiteral,
    CharLiteral,
    /// A non-interpolated, non-raw `"…"` or `"""…"""` string.
    StringLiteral,
    /// A raw string (`r"…"`): never interpolated.
    RawStringLiteral,
    /// A `"…"` string containing `$ident`/`${expr}` interpolation markers.
    InterpolatedStringLiteral,

    Identifier,

    // Hard keywords
    KwClass,
    KwInterface,
    KwObject,
    KwEnum,
    KwFun,
    KwVal,
    KwVar,
    KwIf,
    KwElse,
    KwWhen,
    KwFor,
    KwWhile,
    KwDo,
    KwTry,
    KwCatch,
    KwFinally,
    KwReturn,
    KwBreak,
    KwContinue,
    KwThrow,
    KwThis,
    KwSuper,
    KwNull,
    KwTrue,
    KwFalse,
    KwIs,
    KwAs,
    KwIn,
    KwImport,
    KwPackage,
    KwTypealias,

    // Soft keywords (lexed as Identifier; listed for documentation and
    // for `is_soft_keyword`/keyword-text lookups used by the parser)
    // -- no dedicated variants; see `nova_lexer::keywords`.

    // Punctuation / operators
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,
    DoubleColon,
    Semicolon,
    Arrow,      // ->
    FatArrow,   // => (reserved, when branches use `->`)
    At,         // @
    Question,   // ?
    QuestionDot,     // ?.
    QuestionColon,   // ?:
    QuestionColonEq, // ?:=
    DoubleBang, // !!
    QuestionBracket, // ?[
    HashBrace,  // #{ — opens a set/map collection literal

    Eq,
    EqEq,
    BangEq,
    EqEqEq,
    BangEqEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    PlusPlus,
    MinusMinus,

    AmpAmp,
    PipePipe,
    AmpAmpEq,
    PipePipeEq,
    Bang,

    DotDot,    // ..
    DotDotLt,  // ..<
    PipeGt,    // |>

    NewLine,
    Eof,
    Error,
}

impl TokenKind {
    #[inline]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::LongLiteral
                | TokenKind::FloatLiteral
                | TokenKind::DoubleLiteral
                | TokenKind::BoolLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::RawStringLiteral
                | TokenKind::InterpolatedStringLiteral
        )
    }
}

/// A single token with its source location and (for literals) decoded
/// value.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The interned raw lexeme text, as it appeared in source.
    pub lexeme: Name,
    pub literal: Option<LiteralValue>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: Name, span: Span) -> Self {
        Token { kind, lexeme, literal: None, span }
    }

    pub fn with_literal(mut self, literal: LiteralValue) -> Self {
        self.literal = Some(literal);
        self
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
