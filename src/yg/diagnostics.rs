//! Error types and the diagnostics collected during a parse
//!
//! Lexical and syntax errors are plain `thiserror` enums carrying the offending
//! span. The parser wraps each one in a [`Diagnostic`] exactly once and appends
//! it to [`Diagnostics`]; nothing is printed from here. Rendering for humans goes
//! through `codespan-reporting`.

use crate::yg::ast::Span;
use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, Severity as CsSeverity};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::{
    self,
    termcolor::{Buffer, ColorChoice, StandardStream, WriteColor},
    Config,
};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized character {ch:?}")]
    UnrecognizedCharacter { ch: char, span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnrecognizedCharacter { span, .. } | LexError::UnterminatedString { span } => {
                *span
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    /// Extension lists and macro argument lists must end with `,`
    #[error("{list} must end with a trailing `,` before `{close}`")]
    MissingTrailingSeparator {
        list: &'static str,
        close: char,
        span: Span,
    },

    #[error("unclosed `{open}`: expected `{close}` before {found}")]
    UnbalancedDelimiter {
        open: &'static str,
        close: char,
        found: String,
        span: Span,
    },

    #[error("invalid regex flag `{flag}`, expected `i` or `g`")]
    InvalidRegexFlag { flag: String, span: Span },

    #[error("variant tag `{tag}` is not followed by `|`")]
    DanglingVariantTag { tag: String, span: Span },

    #[error("`{keyword}` statements are not supported")]
    UnsupportedStatement { keyword: String, span: Span },
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::UnexpectedToken { span, .. }
            | SyntaxError::MissingTrailingSeparator { span, .. }
            | SyntaxError::UnbalancedDelimiter { span, .. }
            | SyntaxError::InvalidRegexFlag { span, .. }
            | SyntaxError::DanglingVariantTag { span, .. }
            | SyntaxError::UnsupportedStatement { span, .. } => *span,
        }
    }
}

/// Either kind of error a parse can record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(e) => e.span(),
            ParseError::Syntax(e) => e.span(),
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lex(_))
    }
}

/// Only errors exist; there are no warnings in the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

impl From<Severity> for CsSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => CsSeverity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub error: ParseError,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(error: impl Into<ParseError>) -> Self {
        let error = error.into();
        Self {
            severity: Severity::Error,
            span: error.span(),
            error,
        }
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    fn to_codespan(&self) -> CsDiagnostic<()> {
        let label = if self.error.is_lexical() {
            "lexical error"
        } else {
            "syntax error"
        };
        CsDiagnostic::new(self.severity.into())
            .with_message(self.message())
            .with_labels(vec![
                Label::primary((), self.span.to_range()).with_message(label)
            ])
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.severity, self.error, self.span)
    }
}

/// Ordered collection of everything that went wrong during one parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn error(&mut self, error: impl Into<ParseError>) {
        self.push(Diagnostic::error(error));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }

    /// Stable sort by start offset, so errors read top to bottom
    pub fn sort(&mut self) {
        self.items.sort_by_key(|d| d.span.start);
    }

    /// Render every diagnostic against `source` into `writer`
    pub fn emit_to<W: WriteColor>(
        &self,
        writer: &mut W,
        file_name: &str,
        source: &str,
    ) -> Result<(), codespan_reporting::files::Error> {
        let file = SimpleFile::new(file_name, source);
        let config = Config::default();
        for diagnostic in &self.items {
            term::emit(writer, &config, &file, &diagnostic.to_codespan())?;
        }
        Ok(())
    }

    /// Render to stderr
    pub fn emit(
        &self,
        file_name: &str,
        source: &str,
        color: ColorChoice,
    ) -> Result<(), codespan_reporting::files::Error> {
        let writer = StandardStream::stderr(color);
        let mut lock = writer.lock();
        self.emit_to(&mut lock, file_name, source)
    }

    /// Render to a plain string without colors
    pub fn render(&self, file_name: &str, source: &str) -> String {
        let mut buffer = Buffer::no_color();
        if let Err(e) = self.emit_to(&mut buffer, file_name, source) {
            return format!("failed to render diagnostics: {e}");
        }
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.items {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SyntaxError::UnexpectedToken {
            expected: "expression".to_string(),
            found: "`;`".to_string(),
            span: Span::new(4, 5),
        };
        assert_eq!(err.to_string(), "expected expression, found `;`");

        let err = SyntaxError::MissingTrailingSeparator {
            list: "argument list",
            close: ')',
            span: Span::new(6, 7),
        };
        assert_eq!(
            err.to_string(),
            "argument list must end with a trailing `,` before `)`"
        );

        let err = LexError::UnrecognizedCharacter {
            ch: '$',
            span: Span::new(0, 1),
        };
        assert_eq!(err.to_string(), "unrecognized character '$'");
    }

    #[test]
    fn test_diagnostic_takes_error_span() {
        let d = Diagnostic::error(LexError::UnterminatedString {
            span: Span::new(3, 9),
        });
        assert_eq!(d.span, Span::new(3, 9));
        assert_eq!(d.severity, Severity::Error);
        assert!(d.error.is_lexical());
    }

    #[test]
    fn test_sort_by_start() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.error(SyntaxError::DanglingVariantTag {
            tag: "#a".to_string(),
            span: Span::new(10, 12),
        });
        diagnostics.error(LexError::UnrecognizedCharacter {
            ch: '$',
            span: Span::new(2, 3),
        });
        diagnostics.sort();
        let starts: Vec<_> = diagnostics.iter().map(|d| d.span.start).collect();
        assert_eq!(starts, vec![2, 10]);
    }

    #[test]
    fn test_render_points_at_source() {
        let source = "x = $;\n";
        let mut diagnostics = Diagnostics::new();
        diagnostics.error(LexError::UnrecognizedCharacter {
            ch: '$',
            span: Span::new(4, 5),
        });
        let out = diagnostics.render("test.yg", source);
        assert!(out.contains("error: unrecognized character '$'"));
        assert!(out.contains("test.yg:1:5"));
        assert!(out.contains("lexical error"));
    }
}
