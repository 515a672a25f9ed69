//! Parser state, token cursor and the program loop
//!
//! The parser pulls tokens lazily from the [`Lexer`] and keeps two of them in
//! view (`current` and `peek`). Lexical errors met while pulling are recorded and
//! skipped, so the grammar code only ever sees real tokens.
//!
//! A syntax error aborts the statement it occurs in. The program loop records it
//! and resynchronizes at the next plausible statement start before carrying on.

use super::builder;
use super::ParseOptions;
use crate::yg::ast::{Program, Span};
use crate::yg::diagnostics::{Diagnostics, ParseError, SyntaxError};
use crate::yg::lexing::{Lexer, Token, TokenKind};
use log::{debug, trace};

pub type ParseResult<T> = Result<T, SyntaxError>;

pub struct Parser<'src> {
    source: &'src str,
    lexer: Lexer<'src>,
    current: Option<Token<'src>>,
    peek: Option<Token<'src>>,
    diagnostics: Diagnostics,
    options: ParseOptions,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, options: ParseOptions) -> Self {
        let mut parser = Self {
            source,
            lexer: Lexer::new(source),
            current: None,
            peek: None,
            diagnostics: Diagnostics::new(),
            options,
        };
        parser.current = parser.pull();
        parser.peek = parser.pull();
        parser
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Consume the parser, returning the diagnostics sorted by position
    pub fn finish(mut self) -> Diagnostics {
        self.diagnostics.sort();
        self.diagnostics
    }

    // =========================================================================
    // Program
    // =========================================================================

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while self.current.is_some() && !self.halted() {
            let start = self.current_span().start;
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    self.report(error);
                    if !self.options.recover {
                        debug!("recovery disabled, stopping at offset {start}");
                        break;
                    }
                    self.synchronize(start);
                }
            }
        }

        trace!(
            "parsed {} statements with {} diagnostics",
            statements.len(),
            self.diagnostics.len()
        );

        Program {
            statements,
            span: builder::program_span(self.source),
        }
    }

    /// Skip to the next statement boundary: past a `;`, or up to a keyword, an
    /// identifier followed by an assignment operator, or end of input.
    fn synchronize(&mut self, failed_at: usize) {
        if self.current_span().start == failed_at {
            self.advance();
        }
        while let Some(token) = self.current {
            match token.kind {
                TokenKind::Semi => {
                    self.advance();
                    break;
                }
                kind if kind.is_keyword() => break,
                TokenKind::Ident if self.peek.is_some_and(|t| t.kind.is_assign_op()) => break,
                _ => {
                    self.advance();
                }
            }
        }
        debug!("resynchronized at offset {}", self.current_span().start);
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn report(&mut self, error: impl Into<ParseError>) {
        if self.halted() {
            return;
        }
        self.diagnostics.error(error);
    }

    /// Whether the error limit has been reached
    fn halted(&self) -> bool {
        self.options
            .max_errors
            .is_some_and(|max| self.diagnostics.len() >= max)
    }

    // =========================================================================
    // Token manipulation
    // =========================================================================

    /// Next real token from the lexer, recording lexical errors on the way
    fn pull(&mut self) -> Option<Token<'src>> {
        loop {
            match self.lexer.next()? {
                Ok(token) => return Some(token),
                Err(error) => {
                    debug!("skipping lexical error at {}: {}", error.span(), error);
                    self.report(error);
                }
            }
        }
    }

    pub(crate) fn advance(&mut self) -> Option<Token<'src>> {
        let next = self.pull();
        std::mem::replace(&mut self.current, std::mem::replace(&mut self.peek, next))
    }

    pub(crate) fn kind(&self) -> Option<TokenKind> {
        self.current.map(|t| t.kind)
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.kind() == Some(kind)
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.current.is_none()
    }

    pub(crate) fn current(&self) -> Option<Token<'src>> {
        self.current
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek.map(|t| t.kind)
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.at(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Consume the current token whatever it is
    pub(crate) fn expect_any(&mut self) -> ParseResult<Token<'src>> {
        match self.advance() {
            Some(token) => Ok(token),
            None => Err(self.unexpected("token")),
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> ParseResult<Token<'src>> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(kind.describe())),
        }
    }

    /// Expect the delimiter closing `open`; end of input means it was never closed
    pub(crate) fn expect_close(
        &mut self,
        open: Token<'src>,
        close: TokenKind,
        close_char: char,
    ) -> ParseResult<Token<'src>> {
        if let Some(token) = self.eat(close) {
            return Ok(token);
        }
        if self.at_eof() {
            return Err(self.unclosed(open, close_char));
        }
        Err(self.unexpected(close.describe()))
    }

    /// `open` was never matched by `close_char`
    pub(crate) fn unclosed(&self, open: Token<'src>, close_char: char) -> SyntaxError {
        SyntaxError::UnbalancedDelimiter {
            open: open_str(open.kind),
            close: close_char,
            found: self.found(),
            span: open.span,
        }
    }

    pub(crate) fn unexpected(&self, expected: &str) -> SyntaxError {
        SyntaxError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.found(),
            span: self.current_span(),
        }
    }

    /// Description of the current token for error messages
    pub(crate) fn found(&self) -> String {
        match self.current {
            None => "end of input".to_string(),
            Some(token) => match token.kind {
                TokenKind::Ident => format!("identifier `{}`", token.lexeme),
                TokenKind::String => format!("string {}", token.lexeme),
                TokenKind::Unsigned => format!("integer `{}`", token.lexeme),
                _ => format!("`{}`", token.lexeme),
            },
        }
    }

    /// Span of the current token, or an empty span at end of input
    pub(crate) fn current_span(&self) -> Span {
        match self.current {
            Some(token) => token.span,
            None => Span::empty(self.source.len()),
        }
    }
}

fn open_str(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::LParen => "(",
        TokenKind::LBrace => "{",
        TokenKind::LBracketCaret => "[^",
        _ => "[",
    }
}
