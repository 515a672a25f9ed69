//! Parser module for the yg language
//!
//! Entry points are [`parse`] for whole programs and [`parse_expression`] for a
//! single expression. Neither ever fails outright: a parse always yields a
//! [`Program`] (holding every statement that parsed) together with the
//! [`Diagnostics`] describing everything that did not.
//!
//! - `precedence` - the operator table
//! - `builder` - node constructors and span computation
//! - `expressions` - precedence climbing over expressions
//! - `statements` - `grammar!`, `fragment!` and assignment statements
//! - `parser` - token cursor, program loop and error recovery

pub mod builder;
mod expressions;
pub mod parser;
pub mod precedence;
mod statements;

pub use parser::{ParseResult, Parser};

use crate::yg::ast::{Expression, Program};
use crate::yg::diagnostics::Diagnostics;
use serde::{Deserialize, Serialize};

/// How far the parser goes after an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Resynchronize after a failed statement instead of stopping
    pub recover: bool,
    /// Stop once this many diagnostics were recorded
    pub max_errors: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            recover: true,
            max_errors: None,
        }
    }
}

/// The tree plus everything that went wrong while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    pub program: Program,
    pub diagnostics: Diagnostics,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The program if the parse was clean, the diagnostics otherwise
    pub fn into_result(self) -> Result<Program, Diagnostics> {
        if self.diagnostics.is_empty() {
            Ok(self.program)
        } else {
            Err(self.diagnostics)
        }
    }
}

pub fn parse(source: &str) -> ParseOutput {
    parse_with_options(source, &ParseOptions::default())
}

pub fn parse_with_options(source: &str, options: &ParseOptions) -> ParseOutput {
    let mut parser = Parser::new(source, options.clone());
    let program = parser.parse_program();
    ParseOutput {
        program,
        diagnostics: parser.finish(),
    }
}

/// Parse exactly one expression spanning the whole input
pub fn parse_expression(source: &str) -> Result<Expression, Diagnostics> {
    let mut parser = Parser::new(source, ParseOptions::default());
    let expression = parser.parse_expression().and_then(|expr| {
        if parser.at_eof() {
            Ok(expr)
        } else {
            Err(parser.unexpected("end of input"))
        }
    });
    if let Err(error) = expression.as_ref() {
        parser.report(error.clone());
    }
    let diagnostics = parser.finish();
    match expression {
        Ok(expr) if diagnostics.is_empty() => Ok(expr),
        _ => Err(diagnostics),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yg::ast::Statement;

    #[test]
    fn test_empty_source() {
        let output = parse("");
        assert!(output.is_ok());
        assert!(output.program.statements.is_empty());
        assert_eq!(output.program.span.end, 0);
    }

    #[test]
    fn test_whitespace_only() {
        let output = parse("  \n\t\r\n ");
        assert!(output.is_ok());
        assert_eq!(output.program.span.end, 7);
    }

    #[test]
    fn test_no_recover_stops_at_first_error() {
        let options = ParseOptions {
            recover: false,
            max_errors: None,
        };
        let output = parse_with_options("a = ; b = ; c = d;", &options);
        assert_eq!(output.diagnostics.len(), 1);
        assert!(output.program.statements.is_empty());
    }

    #[test]
    fn test_max_errors() {
        let options = ParseOptions {
            recover: true,
            max_errors: Some(2),
        };
        let output = parse_with_options("a = ; b = ; c = ; d = e;", &options);
        assert_eq!(output.diagnostics.len(), 2);
    }

    #[test]
    fn test_lexical_errors_do_not_stop_the_parse() {
        let output = parse("a = b $ ~ c;");
        assert_eq!(output.diagnostics.len(), 1);
        assert!(matches!(&output.program.statements[0], Statement::Assign(_)));
    }

    #[test]
    fn test_parse_expression_rejects_trailing_tokens() {
        assert!(parse_expression("a ~ b").is_ok());
        let diagnostics = parse_expression("a ~ b )").err().unwrap_or_default();
        assert_eq!(diagnostics.len(), 1);
        assert!(parse_expression("").is_err());
    }

    #[test]
    fn test_into_result() {
        assert!(parse("a = b;").into_result().is_ok());
        assert!(parse("a = ;").into_result().is_err());
    }
}
