//! # yg
//!
//! A parser for the yg grammar description language: grammar declarations,
//! reusable fragments and rule assignments whose bodies are PEG-like
//! expressions with sequencing (`~`), tagged alternation (`|` with `#`, `!#`,
//! `_#`), repetition (`?`, `*`, `+`), lookahead-style prefixes (`^`) and rule
//! arrows (`<-`).
//!
//! ```text
//! grammar! Json { "json", };
//! value = | object #Object | array #Array;
//! pair = key ~ ":" ~ value;
//! ```
//!
//! [`parse`] turns source text into a [`Program`] plus the [`Diagnostics`] for
//! anything that could not be parsed. The tree is plain data: every node has a
//! byte [`Span`](yg::ast::Span) and can be walked uniformly, by grammar field
//! name, through [`NodeRef`](yg::ast::NodeRef).
//!
//! ## Testing
//!
//! Shared helpers and the embedded sample programs live in the
//! [testing module](yg::testing).

pub mod yg;

pub use yg::ast::{Expression, Program, Statement};
pub use yg::diagnostics::{Diagnostic, Diagnostics};
pub use yg::lexing::{tokenize, Lexer, Token, TokenKind};
pub use yg::parsing::{parse, parse_expression, parse_with_options, ParseOptions, ParseOutput};
