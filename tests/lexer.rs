//! Token stream tests through the public lexer API

use rstest::rstest;
use yg::yg::diagnostics::LexError;
use yg::{tokenize, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, errors) = tokenize(source);
    assert!(errors.is_empty(), "unexpected lexical errors: {errors:?}");
    tokens.into_iter().map(|t| t.kind).collect()
}

#[rstest]
#[case::keyword("grammar!", vec![TokenKind::GrammarKw])]
#[case::keyword_prefix_is_identifier("grammar1", vec![TokenKind::Ident])]
#[case::underscore_identifier("_x1", vec![TokenKind::Ident])]
#[case::assignment_ops("= _= @=", vec![TokenKind::Eq, TokenKind::UnderscoreEq, TokenKind::AtEq])]
#[case::tag_ops("# !# _#", vec![TokenKind::Hash, TokenKind::BangHash, TokenKind::UnderscoreHash])]
#[case::regex_set("\\p{L}", vec![TokenKind::RegexSet])]
#[case::bare_set_prefix("\\p", vec![TokenKind::SetPrefix])]
#[case::regex_long("//i", vec![TokenKind::Slash, TokenKind::Slash, TokenKind::Ident])]
#[case::zero_then_digits("012", vec![TokenKind::Unsigned, TokenKind::Unsigned])]
#[case::range_switches_token_set(
    "[a-z] ~ a",
    vec![
        TokenKind::LBracket,
        TokenKind::RangeChar,
        TokenKind::RangeDash,
        TokenKind::RangeChar,
        TokenKind::RBracket,
        TokenKind::Tilde,
        TokenKind::Ident,
    ]
)]
#[case::range_keeps_operator_chars(
    "[^~|#]",
    vec![
        TokenKind::LBracketCaret,
        TokenKind::RangeChar,
        TokenKind::RangeChar,
        TokenKind::RangeChar,
        TokenKind::RBracket,
    ]
)]
#[case::set_inside_range(
    "[\\p{Nd}_]",
    vec![
        TokenKind::LBracket,
        TokenKind::RegexSet,
        TokenKind::RangeChar,
        TokenKind::RBracket,
    ]
)]
#[case::space_inside_range(
    "[ a]",
    vec![
        TokenKind::LBracket,
        TokenKind::RangeChar,
        TokenKind::RangeChar,
        TokenKind::RBracket,
    ]
)]
#[case::lone_dash_in_range(
    "[-]~b",
    vec![
        TokenKind::LBracket,
        TokenKind::RangeDash,
        TokenKind::RBracket,
        TokenKind::Tilde,
        TokenKind::Ident,
    ]
)]
fn test_token_kinds(#[case] source: &str, #[case] expected: Vec<TokenKind>) {
    assert_eq!(kinds(source), expected);
}

#[test]
fn test_string_escapes_stay_in_one_token() {
    let (tokens, errors) = tokenize(r#"'it\'s' "a\"b""#);
    assert!(errors.is_empty());
    let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme).collect();
    assert_eq!(lexemes, vec![r"'it\'s'", r#""a\"b""#]);
}

#[test]
fn test_errors_do_not_stop_the_stream() {
    let (tokens, errors) = tokenize("a $ b 'open");
    let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme).collect();
    assert_eq!(lexemes, vec!["a", "b"]);
    assert!(matches!(
        errors.as_slice(),
        [
            LexError::UnrecognizedCharacter { ch: '$', .. },
            LexError::UnterminatedString { .. }
        ]
    ));
}

#[test]
fn test_token_spans_are_byte_offsets() {
    let (tokens, _) = tokenize("é = b");
    let spans: Vec<_> = tokens.iter().map(|t| (t.span.start, t.span.end)).collect();
    assert_eq!(spans, vec![(0, 2), (3, 4), (5, 6)]);
}

#[test]
fn test_dash_outside_range_is_an_error() {
    let (_, errors) = tokenize("a-z");
    assert!(matches!(
        errors.as_slice(),
        [LexError::UnrecognizedCharacter { ch: '-', .. }]
    ));
}

#[test]
fn test_trailing_backslash_stays_in_unterminated_string() {
    let (tokens, errors) = tokenize(r"x 'ab\");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(
        errors.as_slice(),
        [LexError::UnterminatedString { .. }]
    ));
}
