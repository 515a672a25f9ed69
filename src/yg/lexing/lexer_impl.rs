//! Implementation of the yg lexer
//!
//! [`Lexer`] is a pull-based token stream over a source string. It drives one of
//! the two logos token sets at a time, morphing between them at range
//! delimiters, drops trivia, and turns logos errors into [`LexError`]s that are
//! yielded in-stream so the consumer can record them and keep going.

use super::tokens::{Classified, MainToken, RangeToken, TokenKind};
use crate::yg::ast::Span;
use crate::yg::diagnostics::LexError;
use logos::Logos;
use serde::Serialize;

/// A classified token with its source text and byte span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub span: Span,
}

#[derive(Clone)]
enum Mode<'src> {
    Main(logos::Lexer<'src, MainToken>),
    Range(logos::Lexer<'src, RangeToken>),
    Done,
}

/// Restartable token stream. Whitespace and newlines are never yielded.
#[derive(Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    mode: Mode<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            mode: Mode::Main(MainToken::lexer(source)),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Rewind to the start of the source
    pub fn restart(&mut self) {
        self.mode = Mode::Main(MainToken::lexer(self.source));
    }

    /// Byte offset of the next unread character
    pub fn offset(&self) -> usize {
        match &self.mode {
            Mode::Main(lex) => lex.span().end,
            Mode::Range(lex) => lex.span().end,
            Mode::Done => self.source.len(),
        }
    }

    fn unrecognized(&self, range: std::ops::Range<usize>) -> LexError {
        let span = Span::from(range);
        let ch = self.source[span.start..].chars().next().unwrap_or('\0');
        LexError::UnrecognizedCharacter { ch, span }
    }

    fn token(&self, kind: TokenKind, range: std::ops::Range<usize>) -> Token<'src> {
        let span = Span::from(range);
        Token {
            kind,
            lexeme: span.text(self.source),
            span,
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.mode, Mode::Done) {
                Mode::Main(mut lex) => {
                    let raw = lex.next()?;
                    let range = lex.span();
                    let opens_range = matches!(raw, Ok(t) if t.opens_range());
                    self.mode = if opens_range {
                        Mode::Range(lex.morph())
                    } else {
                        Mode::Main(lex)
                    };
                    match raw {
                        Err(()) => return Some(Err(self.unrecognized(range))),
                        Ok(t) => match t.classify() {
                            Classified::Trivia => continue,
                            Classified::Unterminated => {
                                return Some(Err(LexError::UnterminatedString {
                                    span: range.into(),
                                }))
                            }
                            Classified::Token(kind) => return Some(Ok(self.token(kind, range))),
                        },
                    }
                }
                Mode::Range(mut lex) => {
                    let raw = lex.next()?;
                    let range = lex.span();
                    self.mode = if raw == Ok(RangeToken::RBracket) {
                        Mode::Main(lex.morph())
                    } else {
                        Mode::Range(lex)
                    };
                    match raw {
                        Err(()) => return Some(Err(self.unrecognized(range))),
                        Ok(t) => match t.classify() {
                            Classified::Token(kind) => return Some(Ok(self.token(kind, range))),
                            Classified::Trivia | Classified::Unterminated => continue,
                        },
                    }
                }
                Mode::Done => return None,
            }
        }
    }
}

/// Tokenize a whole source, separating tokens from lexical errors
pub fn tokenize(source: &str) -> (Vec<Token<'_>>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for result in Lexer::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(error) => errors.push(error),
        }
    }
    (tokens, errors)
}
