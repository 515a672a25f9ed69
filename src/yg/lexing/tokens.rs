//! Token definitions for the yg language
//!
//! Two logos token sets cooperate. [`MainToken`] covers everything outside a
//! character range; once `[` or `[^` is seen the lexer morphs into
//! [`RangeToken`], where almost every character stands for itself, and morphs
//! back on `]`. Neither set is exposed directly: both map into the public
//! [`TokenKind`].
//!
//! Ambiguity between tokens sharing a prefix (`=` / `_=`, `@` / `@=`, `grammar`
//! / `grammar!`, `\p` / `\p{Name}`) is resolved by logos' longest-match rule.

use logos::Logos;
use serde::Serialize;
use std::fmt;

/// Tokens outside of `[...]`
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum MainToken {
    // Trivia
    #[regex(r"[^\S\r\n]+")]
    Whitespace,
    #[regex(r"\r\n|\r|\n")]
    Newline,

    // Keywords
    #[token("grammar!")]
    Grammar,
    #[token("fragment!")]
    Fragment,
    #[token("ignore!")]
    Ignore,

    // Atoms
    #[regex(r"[_\p{XID_Start}][\p{XID_Continue}]*")]
    Ident,
    #[regex(r"0|[1-9][0-9]*")]
    Unsigned,
    #[regex(r#"'([^'\\]|\\(.|\n))*'"#)]
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    String,
    #[regex(r#"'([^'\\]|\\(.|\n))*\\?"#)]
    #[regex(r#""([^"\\]|\\(.|\n))*\\?"#)]
    UnterminatedString,
    #[regex(r"\\p\{[_0-9a-zA-Z]+\}")]
    RegexSet,
    #[token(r"\p")]
    SetPrefix,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("[^")]
    LBracketCaret,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // Assignment
    #[token("=")]
    Eq,
    #[token("_=")]
    UnderscoreEq,
    #[token("@=")]
    AtEq,

    // Operators
    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,
    #[token("<-")]
    Arrow,
    #[token("^")]
    Caret,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("#")]
    Hash,
    #[token("!#")]
    BangHash,
    #[token("_#")]
    UnderscoreHash,
    #[token("@")]
    At,
    #[token(".")]
    Dot,
    #[token("/")]
    Slash,
}

/// Tokens inside `[...]`. Whitespace is not trivia here: a space is a member
/// of the range like any other character.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum RangeToken {
    #[token("]")]
    RBracket,
    #[token("-")]
    Dash,
    #[regex(r"\\p\{[_0-9a-zA-Z]+\}")]
    RegexSet,
    #[token(r"\p")]
    SetPrefix,
    #[regex(r"[^\]\-]")]
    Char,
}

/// The kind of a token handed to the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    GrammarKw,
    FragmentKw,
    IgnoreKw,
    Ident,
    Unsigned,
    String,
    /// `\p{Name}`, in either mode
    RegexSet,
    /// `\p` without a well-formed `{Name}`
    SetPrefix,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    LBracketCaret,
    RBracket,
    Comma,
    Semi,
    Eq,
    UnderscoreEq,
    AtEq,
    Pipe,
    Tilde,
    Arrow,
    Caret,
    Question,
    Star,
    Plus,
    Hash,
    BangHash,
    UnderscoreHash,
    At,
    Dot,
    Slash,
    /// A single literal character inside a range
    RangeChar,
    /// `-` inside a range
    RangeDash,
}

impl TokenKind {
    /// Human description used in "expected ..." messages
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::GrammarKw => "`grammar!`",
            TokenKind::FragmentKw => "`fragment!`",
            TokenKind::IgnoreKw => "`ignore!`",
            TokenKind::Ident => "identifier",
            TokenKind::Unsigned => "unsigned integer",
            TokenKind::String => "string",
            TokenKind::RegexSet => "`\\p{...}`",
            TokenKind::SetPrefix => "`\\p`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::LBracketCaret => "`[^`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Semi => "`;`",
            TokenKind::Eq => "`=`",
            TokenKind::UnderscoreEq => "`_=`",
            TokenKind::AtEq => "`@=`",
            TokenKind::Pipe => "`|`",
            TokenKind::Tilde => "`~`",
            TokenKind::Arrow => "`<-`",
            TokenKind::Caret => "`^`",
            TokenKind::Question => "`?`",
            TokenKind::Star => "`*`",
            TokenKind::Plus => "`+`",
            TokenKind::Hash => "`#`",
            TokenKind::BangHash => "`!#`",
            TokenKind::UnderscoreHash => "`_#`",
            TokenKind::At => "`@`",
            TokenKind::Dot => "`.`",
            TokenKind::Slash => "`/`",
            TokenKind::RangeChar => "range character",
            TokenKind::RangeDash => "`-`",
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::GrammarKw | TokenKind::FragmentKw | TokenKind::IgnoreKw
        )
    }

    /// `=`, `_=` or `@=`
    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            TokenKind::Eq | TokenKind::UnderscoreEq | TokenKind::AtEq
        )
    }

    /// `#`, `!#` or `_#`
    pub fn is_tag_op(self) -> bool {
        matches!(
            self,
            TokenKind::Hash | TokenKind::BangHash | TokenKind::UnderscoreHash
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// What a raw logos token turns into once trivia and errors are sorted out
pub(crate) enum Classified {
    Trivia,
    Token(TokenKind),
    Unterminated,
}

impl MainToken {
    pub(crate) fn classify(self) -> Classified {
        let kind = match self {
            MainToken::Whitespace | MainToken::Newline => return Classified::Trivia,
            MainToken::UnterminatedString => return Classified::Unterminated,
            MainToken::Grammar => TokenKind::GrammarKw,
            MainToken::Fragment => TokenKind::FragmentKw,
            MainToken::Ignore => TokenKind::IgnoreKw,
            MainToken::Ident => TokenKind::Ident,
            MainToken::Unsigned => TokenKind::Unsigned,
            MainToken::String => TokenKind::String,
            MainToken::RegexSet => TokenKind::RegexSet,
            MainToken::SetPrefix => TokenKind::SetPrefix,
            MainToken::LParen => TokenKind::LParen,
            MainToken::RParen => TokenKind::RParen,
            MainToken::LBrace => TokenKind::LBrace,
            MainToken::RBrace => TokenKind::RBrace,
            MainToken::LBracket => TokenKind::LBracket,
            MainToken::LBracketCaret => TokenKind::LBracketCaret,
            MainToken::Comma => TokenKind::Comma,
            MainToken::Semi => TokenKind::Semi,
            MainToken::Eq => TokenKind::Eq,
            MainToken::UnderscoreEq => TokenKind::UnderscoreEq,
            MainToken::AtEq => TokenKind::AtEq,
            MainToken::Pipe => TokenKind::Pipe,
            MainToken::Tilde => TokenKind::Tilde,
            MainToken::Arrow => TokenKind::Arrow,
            MainToken::Caret => TokenKind::Caret,
            MainToken::Question => TokenKind::Question,
            MainToken::Star => TokenKind::Star,
            MainToken::Plus => TokenKind::Plus,
            MainToken::Hash => TokenKind::Hash,
            MainToken::BangHash => TokenKind::BangHash,
            MainToken::UnderscoreHash => TokenKind::UnderscoreHash,
            MainToken::At => TokenKind::At,
            MainToken::Dot => TokenKind::Dot,
            MainToken::Slash => TokenKind::Slash,
        };
        Classified::Token(kind)
    }

    /// Whether this token opens a character range
    pub(crate) fn opens_range(self) -> bool {
        matches!(self, MainToken::LBracket | MainToken::LBracketCaret)
    }
}

impl RangeToken {
    pub(crate) fn classify(self) -> Classified {
        Classified::Token(match self {
            RangeToken::RBracket => TokenKind::RBracket,
            RangeToken::Dash => TokenKind::RangeDash,
            RangeToken::RegexSet => TokenKind::RegexSet,
            RangeToken::SetPrefix => TokenKind::SetPrefix,
            RangeToken::Char => TokenKind::RangeChar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_tokens(source: &str) -> Vec<MainToken> {
        MainToken::lexer(source)
            .filter_map(|result| result.ok())
            .filter(|t| !matches!(t, MainToken::Whitespace | MainToken::Newline))
            .collect()
    }

    #[test]
    fn test_keywords_need_bang() {
        assert_eq!(main_tokens("grammar!"), vec![MainToken::Grammar]);
        assert_eq!(main_tokens("grammar"), vec![MainToken::Ident]);
        assert_eq!(main_tokens("grammar1"), vec![MainToken::Ident]);
        assert_eq!(main_tokens("fragment! ignore!"), vec![MainToken::Fragment, MainToken::Ignore]);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(main_tokens("_x1"), vec![MainToken::Ident]);
        assert_eq!(main_tokens("_"), vec![MainToken::Ident]);
        assert_eq!(main_tokens("straße"), vec![MainToken::Ident]);
    }

    #[test]
    fn test_longest_match_operators() {
        assert_eq!(main_tokens("_="), vec![MainToken::UnderscoreEq]);
        assert_eq!(main_tokens("@="), vec![MainToken::AtEq]);
        assert_eq!(main_tokens("@ ="), vec![MainToken::At, MainToken::Eq]);
        assert_eq!(main_tokens("_#"), vec![MainToken::UnderscoreHash]);
        assert_eq!(main_tokens("!#"), vec![MainToken::BangHash]);
        assert_eq!(main_tokens("<-"), vec![MainToken::Arrow]);
        assert_eq!(main_tokens("[^"), vec![MainToken::LBracketCaret]);
    }

    #[test]
    fn test_unsigned_has_no_leading_zero() {
        assert_eq!(main_tokens("120"), vec![MainToken::Unsigned]);
        assert_eq!(main_tokens("0"), vec![MainToken::Unsigned]);
        assert_eq!(main_tokens("01"), vec![MainToken::Unsigned, MainToken::Unsigned]);
    }

    #[test]
    fn test_strings() {
        assert_eq!(main_tokens(r#"'a\'b'"#), vec![MainToken::String]);
        assert_eq!(main_tokens(r#""say \"hi\"""#), vec![MainToken::String]);
        assert_eq!(main_tokens(r#"'mixed "quotes"'"#), vec![MainToken::String]);
        assert_eq!(main_tokens("'open"), vec![MainToken::UnterminatedString]);
        assert_eq!(main_tokens(r"'ab\"), vec![MainToken::UnterminatedString]);
        assert_eq!(main_tokens(r#""ab\"#), vec![MainToken::UnterminatedString]);
    }

    #[test]
    fn test_regex_set() {
        assert_eq!(main_tokens(r"\p{XID_Start}"), vec![MainToken::RegexSet]);
        assert_eq!(main_tokens(r"\p{}"), vec![MainToken::SetPrefix, MainToken::LBrace, MainToken::RBrace]);
    }

    #[test]
    fn test_unknown_character_is_error() {
        let results: Vec<_> = MainToken::lexer("a $ b").collect();
        assert!(results.iter().any(|r| r.is_err()));
    }

    #[test]
    fn test_range_tokens() {
        let tokens: Vec<_> = RangeToken::lexer(r"a-z \p{L}]")
            .filter_map(|result| result.ok())
            .collect();
        assert_eq!(
            tokens,
            vec![
                RangeToken::Char,
                RangeToken::Dash,
                RangeToken::Char,
                RangeToken::Char,
                RangeToken::RegexSet,
                RangeToken::RBracket,
            ]
        );
    }

    #[test]
    fn test_range_dash_and_whitespace() {
        let tokens: Vec<_> = RangeToken::lexer(" \t-\n]").collect();
        assert_eq!(
            tokens,
            vec![
                Ok(RangeToken::Char),
                Ok(RangeToken::Char),
                Ok(RangeToken::Dash),
                Ok(RangeToken::Char),
                Ok(RangeToken::RBracket),
            ]
        );
    }
}
