//! Lexer module for the yg language
//!
//! Source text is scanned by logos into classified tokens. Whitespace and
//! newlines are recognized but never reach the parser: they are insignificant
//! between any two tokens, so the [`Lexer`] iterator drops them.
//!
//! Character ranges (`[...]`, `[^...]`) have their own token set, because
//! inside them nearly every character is a literal. The lexer switches sets when
//! it sees the opening and closing brackets; the parser never has to know.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, Lexer, Token};
pub use tokens::TokenKind;
