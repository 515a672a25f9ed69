//! Statement parsing
//!
//! Dispatch is by leading token: `grammar!`, `fragment!`, or an identifier that
//! starts an assignment. Each statement may end with `;`.

use super::builder;
use super::parser::{ParseResult, Parser};
use crate::yg::ast::{AssignOp, Operator, Statement, StringLiteral};
use crate::yg::diagnostics::SyntaxError;
use crate::yg::lexing::{Token, TokenKind};

impl<'src> Parser<'src> {
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current() {
            Some(token) => match token.kind {
                TokenKind::GrammarKw => self.parse_grammar_statement(),
                TokenKind::FragmentKw => self.parse_fragment_statement(),
                TokenKind::Ident => self.parse_assign_statement(),
                TokenKind::IgnoreKw => Err(SyntaxError::UnsupportedStatement {
                    keyword: token.lexeme.to_string(),
                    span: token.span,
                }),
                _ => Err(self.unexpected("statement")),
            },
            None => Err(self.unexpected("statement")),
        }
    }

    /// `grammar! Name`, optionally followed by `{ "ext", ... , }`
    fn parse_grammar_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.expect(TokenKind::GrammarKw)?;
        let id = builder::identifier(self.expect(TokenKind::Ident)?);

        let (extensions, close) = match self.eat(TokenKind::LBrace) {
            Some(open) => {
                let (extensions, close) = self.parse_extensions(open)?;
                (extensions, Some(close))
            }
            None => (Vec::new(), None),
        };

        let last = self.eat(TokenKind::Semi).or(close);
        Ok(builder::grammar_statement(keyword, id, extensions, last))
    }

    /// Strings after `{` up to `}`. A non-empty list must end with `,`.
    fn parse_extensions(
        &mut self,
        open: Token<'src>,
    ) -> ParseResult<(Vec<StringLiteral>, Token<'src>)> {
        let mut extensions = Vec::new();
        if let Some(close) = self.eat(TokenKind::RBrace) {
            return Ok((extensions, close));
        }

        loop {
            if self.at_eof() {
                return Err(self.unclosed(open, '}'));
            }
            let ext = self.expect(TokenKind::String)?;
            extensions.push(builder::string_literal(ext));

            if self.eat(TokenKind::Comma).is_some() {
                if let Some(close) = self.eat(TokenKind::RBrace) {
                    return Ok((extensions, close));
                }
                continue;
            }
            if self.at(TokenKind::RBrace) {
                return Err(SyntaxError::MissingTrailingSeparator {
                    list: "extension list",
                    close: '}',
                    span: self.current_span(),
                });
            }
            if self.at_eof() {
                return Err(self.unclosed(open, '}'));
            }
            return Err(self.unexpected("`,`"));
        }
    }

    /// `fragment! Name`
    fn parse_fragment_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.expect(TokenKind::FragmentKw)?;
        let id = builder::identifier(self.expect(TokenKind::Ident)?);
        let semi = self.eat(TokenKind::Semi);
        Ok(builder::fragment_statement(keyword, id, semi))
    }

    /// `name = body`, `name _= body`, `name @= body`, each allowing a leading `|`
    fn parse_assign_statement(&mut self) -> ParseResult<Statement> {
        let id = builder::identifier(self.expect(TokenKind::Ident)?);

        let op = match self.kind() {
            Some(TokenKind::Eq) => AssignOp::Plain,
            Some(TokenKind::UnderscoreEq) => AssignOp::Silent,
            Some(TokenKind::AtEq) => AssignOp::Attributed,
            _ => return Err(self.unexpected("`=`, `_=` or `@=`")),
        };
        let eq = Operator::new(op, self.expect_any()?.span);

        let leading_alt = self.eat(TokenKind::Pipe).is_some();
        let body = self.parse_expression()?;
        let semi = self.eat(TokenKind::Semi);

        Ok(builder::assign_statement(id, eq, leading_alt, body, semi))
    }
}
