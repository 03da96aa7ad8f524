//! Hard and soft keyword tables (spec §4.1, §6).
//!
//! Hard keywords are returned by the lexer as their dedicated
//! [`TokenKind`]; soft keywords are returned as plain `Identifier` tokens
//! and reinterpreted by the parser only in the specific positions where
//! they matter (spec §4.1: "soft keywords are returned as identifiers at
//! the token level").

use nova_ir::TokenKind;

pub fn hard_keyword(word: &str) -> Option<TokenKind> {
    Some(match word {
        "class" => TokenKind::KwClass,
        "interface" => TokenKind::KwInterface,
        "object" => TokenKind::KwObject,
        "enum" => TokenKind::KwEnum,
        "fun" => TokenKind::KwFun,
        "val" => TokenKind::KwVal,
        "var" => TokenKind::KwVar,
        "if" => TokenKind::KwIf,
        "else" => TokenKind::KwElse,
        "when" => TokenKind::KwWhen,
        "for" => TokenKind::KwFor,
        "while" => TokenKind::KwWhile,
        "do" => TokenKind::KwDo,
        "try" => TokenKind::KwTry,
        "catch" => TokenKind::KwCatch,
        "finally" => TokenKind::KwFinally,
        "return" => TokenKind::KwReturn,
        "break" => TokenKind::KwBreak,
        "continue" => TokenKind::KwContinue,
        "throw" => TokenKind::KwThrow,
        "this" => TokenKind::KwThis,
        "super" => TokenKind::KwSuper,
        "null" => TokenKind::KwNull,
        "true" => TokenKind::KwTrue,
        "false" => TokenKind::KwFalse,
        "is" => TokenKind::KwIs,
        "as" => TokenKind::KwAs,
        "in" => TokenKind::KwIn,
        "import" => TokenKind::KwImport,
        "package" => TokenKind::KwPackage,
        "typealias" => TokenKind::KwTypealias,
        _ => return None,
    })
}

/// The full soft-keyword set, for the parser's positional reinterpretation.
pub const SOFT_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "internal", "open", "abstract", "sealed", "final",
    "override", "operator", "suspend", "const", "inline", "companion", "reified", "vararg",
    "crossinline", "static", "annotation", "out", "step", "to", "it", "guard", "use",
];

pub fn is_soft_keyword(word: &str) -> bool {
    SOFT_KEYWORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_keywords_recognized() {
        assert_eq!(hard_keyword("class"), Some(TokenKind::KwClass));
        assert_eq!(hard_keyword("notakeyword"), None);
    }

    #[test]
    fn soft_keywords_not_hard() {
        assert!(is_soft_keyword("operator"));
        assert_eq!(hard_keyword("operator"), None);
    }
}
