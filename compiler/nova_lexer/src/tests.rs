use super::*;
use nova_ir::token::LiteralValue;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize(source, &interner);
    assert!(errors.is_empty(), "unexpected lex errors: {errors:?}");
    tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn identifiers_and_hard_keywords() {
    assert_eq!(kinds("fun foo"), vec![TokenKind::KwFun, TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn soft_keywords_lex_as_identifiers() {
    assert_eq!(kinds("public"), vec![TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn integer_and_double_literals() {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize("42 3.14 7L 2.5f", &interner);
    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].literal, Some(LiteralValue::Int(42)));
    assert_eq!(tokens[1].kind, TokenKind::DoubleLiteral);
    assert_eq!(tokens[1].literal, Some(LiteralValue::Double(3.14)));
    assert_eq!(tokens[2].kind, TokenKind::LongLiteral);
    assert_eq!(tokens[2].literal, Some(LiteralValue::Long(7)));
    assert_eq!(tokens[3].kind, TokenKind::FloatLiteral);
}

#[test]
fn hex_and_binary_literals() {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize("0xFF 0b101", &interner);
    assert!(errors.is_empty());
    assert_eq!(tokens[0].literal, Some(LiteralValue::Int(255)));
    assert_eq!(tokens[1].literal, Some(LiteralValue::Int(5)));
}

#[test]
fn string_literal_cooks_escapes() {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize(r#""a\nb""#, &interner);
    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    match &tokens[0].literal {
        Some(LiteralValue::Str(name)) => assert_eq!(interner.resolve(*name), "a\nb"),
        other => panic!("expected Str literal, got {other:?}"),
    }
}

#[test]
fn interpolated_string_is_tagged() {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize(r#""hi $name""#, &interner);
    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::InterpolatedStringLiteral);
}

#[test]
fn raw_string_does_not_cook_escapes() {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize(r#"r"a\nb""#, &interner);
    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::RawStringLiteral);
    match &tokens[0].literal {
        Some(LiteralValue::Str(name)) => assert_eq!(interner.resolve(*name), r"a\nb"),
        other => panic!("expected Str literal, got {other:?}"),
    }
}

#[test]
fn char_literal_with_escape() {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize(r"'\n'", &interner);
    assert!(errors.is_empty());
    assert_eq!(tokens[0].literal, Some(LiteralValue::Char('\n')));
}

#[test]
fn unterminated_string_reports_error() {
    let interner = StringInterner::new();
    let (_, errors) = tokenize("\"abc", &interner);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, LexErrorKind::UnterminatedString));
}

#[test]
fn multi_char_operators_are_longest_match() {
    assert_eq!(
        kinds("a?.b ?: c ?:= d !! e..<f |> g"),
        vec![
            TokenKind::Identifier,
            TokenKind::QuestionDot,
            TokenKind::Identifier,
            TokenKind::QuestionColon,
            TokenKind::Identifier,
            TokenKind::QuestionColonEq,
            TokenKind::Identifier,
            TokenKind::DoubleBang,
            TokenKind::Identifier,
            TokenKind::DotDotLt,
            TokenKind::Identifier,
            TokenKind::PipeGt,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        kinds("val x // trailing comment\n/* block */ val y"),
        vec![
            TokenKind::KwVal,
            TokenKind::Identifier,
            TokenKind::NewLine,
            TokenKind::KwVal,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn blank_lines_collapse_to_one_newline_token() {
    assert_eq!(
        kinds("val x\n\n\nval y"),
        vec![
            TokenKind::KwVal,
            TokenKind::Identifier,
            TokenKind::NewLine,
            TokenKind::KwVal,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unexpected_character_reports_error_and_recovers() {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize("a ` b", &interner);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, LexErrorKind::UnexpectedCharacter('`')));
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::Identifier, TokenKind::Error, TokenKind::Identifier, TokenKind::Eof]
    );
}

#[test]
fn spans_are_within_source_bounds() {
    let interner = StringInterner::new();
    let source = "fun foo(x: Int): Int = x + 1";
    let (tokens, _) = tokenize(source, &interner);
    for token in &tokens {
        assert!(token.span.start as usize <= source.len());
        assert!(token.span.end as usize <= source.len());
        assert!(token.span.start <= token.span.end);
    }
}

proptest! {
    /// The lexer never panics on arbitrary UTF-8 input, always terminates
    /// with `Eof`, and every emitted span stays within the source's byte
    /// range.
    #[test]
    fn never_panics_and_spans_stay_in_bounds(source in any::<String>()) {
        prop_assume!(source.len() <= 200);
        let interner = StringInterner::new();
        let (tokens, _errors) = tokenize(&source, &interner);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        for token in &tokens {
            prop_assert!(token.span.start as usize <= source.len());
            prop_assert!(token.span.end as usize <= source.len());
        }
    }
}
