//! Expression parsing using precedence climbing
//!
//! [`Parser::parse_expression_prec`] parses one operand, then keeps absorbing
//! trailing operators whose precedence is at least the caller's minimum. The
//! loop stops silently at anything that is not such an operator, which is how
//! an expression ends without a terminator.
//!
//! Alternation is special: its operands are [`VariantTag`]s, not expressions.
//! Each side is parsed above the alternation level, optionally tagged, and a
//! `<-` directly after the right side is taken into that side, so that
//! `name <- a ~ b | name <- c` nests as `name <- ((a ~ b) | (name <- c))`.
//! A tag closes its variant, so `a | b #t <- c` is `(a | b #t) <- c` while
//! `a | b <- c` is `a | (b <- c)`.

use super::builder;
use super::parser::{ParseResult, Parser};
use super::precedence::{self, Fixity, LOWEST};
use crate::yg::ast::{
    Expression, Operator, RangeItem, RegexFlag, SuffixOp, Tag, TagOp, VariantTag,
};
use crate::yg::diagnostics::SyntaxError;
use crate::yg::lexing::TokenKind;

const EXPECTED_EXPRESSION: &str = "expression";

impl<'src> Parser<'src> {
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expression_prec(LOWEST)
    }

    pub(crate) fn parse_expression_prec(&mut self, min_prec: u8) -> ParseResult<Expression> {
        let mut lhs = self.parse_prefix_expression()?;

        while let Some(kind) = self.kind() {
            let Some(op) = precedence::trailing(kind) else {
                break;
            };
            if !op.binds_at(min_prec) {
                break;
            }
            lhs = match op.fixity {
                Fixity::Postfix => self.parse_suffix(lhs)?,
                Fixity::Tag => self.parse_alternation(lhs)?,
                Fixity::Infix if kind == TokenKind::Pipe => self.parse_alternation(lhs)?,
                Fixity::Infix => {
                    let Some(op_token) = self.advance() else {
                        break;
                    };
                    let rhs = self.parse_expression_prec(op.operand_precedence())?;
                    if kind == TokenKind::Arrow {
                        builder::rule_arrow(lhs, op_token, rhs)
                    } else {
                        builder::sequence(lhs, op_token, rhs)
                    }
                }
                Fixity::Prefix => break,
            };
        }

        Ok(lhs)
    }

    fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        match self.kind().and_then(precedence::prefix) {
            Some(op) => {
                let precedence = op.precedence;
                let Some(caret) = self.advance() else {
                    return Err(self.unexpected(EXPECTED_EXPRESSION));
                };
                let operand = self.parse_expression_prec(precedence)?;
                Ok(builder::unary_prefix(caret, operand))
            }
            None => self.parse_atom(),
        }
    }

    fn parse_suffix(&mut self, expr: Expression) -> ParseResult<Expression> {
        let kind = match self.kind() {
            Some(TokenKind::Question) => SuffixOp::Question,
            Some(TokenKind::Star) => SuffixOp::Star,
            Some(TokenKind::Plus) => SuffixOp::Plus,
            _ => return Err(self.unexpected("`?`, `*` or `+`")),
        };
        let op = self.expect_any()?;
        Ok(builder::unary_suffix(expr, op, kind))
    }

    // =========================================================================
    // Alternation
    // =========================================================================

    /// `lhs` has been parsed and the current token is `|` or a tag operator
    fn parse_alternation(&mut self, lhs: Expression) -> ParseResult<Expression> {
        let left = self.finish_variant(lhs)?;
        let Some(pipe) = self.eat(TokenKind::Pipe) else {
            return Err(match &left.tag {
                Some(tag) => SyntaxError::DanglingVariantTag {
                    tag: format!("{}{}", tag.op.kind, tag.name),
                    span: tag.span(),
                },
                None => self.unexpected("`|`"),
            });
        };
        let right = self.parse_variant()?;
        Ok(builder::alternation(left, pipe, right))
    }

    /// Right operand of `|`, including any `<-` chain that follows it
    fn parse_variant(&mut self) -> ParseResult<VariantTag> {
        let above = precedence::ALTERNATION + 1;
        let mut expr = self.parse_expression_prec(above)?;
        while let Some(arrow) = self.eat(TokenKind::Arrow) {
            let rhs = self.parse_expression_prec(above)?;
            expr = builder::rule_arrow(expr, arrow, rhs);
        }
        self.finish_variant(expr)
    }

    /// Attach an optional `#name`, `!#name` or `_#name`
    fn finish_variant(&mut self, expr: Expression) -> ParseResult<VariantTag> {
        let tag = self.parse_tag()?;
        Ok(builder::variant_tag(expr, tag))
    }

    fn parse_tag(&mut self) -> ParseResult<Option<Tag>> {
        let kind = match self.kind() {
            Some(TokenKind::Hash) => TagOp::Hash,
            Some(TokenKind::BangHash) => TagOp::BangHash,
            Some(TokenKind::UnderscoreHash) => TagOp::UnderscoreHash,
            _ => return Ok(None),
        };
        let op = self.expect_any()?;
        let name = self.expect(TokenKind::Ident)?;
        Ok(Some(builder::tag(op, kind, builder::identifier(name))))
    }

    // =========================================================================
    // Atoms
    // =========================================================================

    fn parse_atom(&mut self) -> ParseResult<Expression> {
        let Some(token) = self.current() else {
            return Err(self.unexpected(EXPECTED_EXPRESSION));
        };
        match token.kind {
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                let close = self.expect_close(token, TokenKind::RParen, ')')?;
                Ok(builder::parenthesized(token, inner, close))
            }
            TokenKind::Ident => {
                self.advance();
                Ok(Expression::Identifier(builder::identifier(token)))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expression::String(builder::string_literal(token)))
            }
            TokenKind::Unsigned => {
                self.advance();
                Ok(builder::unsigned(token))
            }
            TokenKind::RegexSet => {
                self.advance();
                Ok(Expression::RegexSet(builder::regex_set(token)))
            }
            TokenKind::At => self.parse_macro_call(),
            TokenKind::Slash => self.parse_regex_long(),
            TokenKind::LBracket | TokenKind::LBracketCaret => self.parse_regex_range(),
            TokenKind::SetPrefix => Err(self.unexpected("`\\p{Name}`")),
            _ => Err(self.unexpected(EXPECTED_EXPRESSION)),
        }
    }

    /// `@name(arg,)` or `@name.dot(arg, arg,)`
    fn parse_macro_call(&mut self) -> ParseResult<Expression> {
        let at = self.expect(TokenKind::At)?;
        let name = builder::identifier(self.expect(TokenKind::Ident)?);
        let dot = match self.eat(TokenKind::Dot) {
            Some(_) => Some(builder::identifier(self.expect(TokenKind::Ident)?)),
            None => None,
        };
        let open = self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        let close = loop {
            args.push(self.parse_expression()?);
            if self.eat(TokenKind::Comma).is_some() {
                if let Some(close) = self.eat(TokenKind::RParen) {
                    break close;
                }
                continue;
            }
            if self.at(TokenKind::RParen) {
                return Err(SyntaxError::MissingTrailingSeparator {
                    list: "argument list",
                    close: ')',
                    span: self.current_span(),
                });
            }
            if self.at_eof() {
                return Err(self.unclosed(open, ')'));
            }
            return Err(self.unexpected("`,`"));
        };

        Ok(builder::macro_call(at, name, dot, args, close))
    }

    /// `//`, `//i` or `//g`. The flag must touch the second slash.
    fn parse_regex_long(&mut self) -> ParseResult<Expression> {
        let first = self.expect(TokenKind::Slash)?;
        let second = self.expect(TokenKind::Slash)?;

        let flag = match self.current() {
            Some(token) if token.kind == TokenKind::Ident && token.span.start == second.span.end => {
                let Some(flag) = RegexFlag::from_name(token.lexeme) else {
                    return Err(SyntaxError::InvalidRegexFlag {
                        flag: token.lexeme.to_string(),
                        span: token.span,
                    });
                };
                self.advance();
                Some(Operator::new(flag, token.span))
            }
            _ => None,
        };

        Ok(builder::regex_long(first, second, flag))
    }

    /// `[...]` or `[^...]`
    fn parse_regex_range(&mut self) -> ParseResult<Expression> {
        let open = self.expect_any()?;
        let mut items = Vec::new();

        let close = loop {
            if let Some(close) = self.eat(TokenKind::RBracket) {
                break close;
            }
            if self.at_eof() {
                return Err(self.unclosed(open, ']'));
            }
            let mut item = self.parse_range_atom()?;
            while self.at(TokenKind::RangeDash)
                && !matches!(self.peek_kind(), Some(TokenKind::RBracket) | None)
            {
                let dash = self.expect_any()?;
                let hi = self.parse_range_atom()?;
                item = builder::range_group(item, dash, hi);
            }
            items.push(item);
        };

        Ok(builder::regex_range(open, items, close))
    }

    /// A single character, a `\p{Name}` set, or a `-` that does not join two items
    fn parse_range_atom(&mut self) -> ParseResult<RangeItem> {
        let Some(token) = self.current() else {
            return Err(self.unexpected("range item"));
        };
        match token.kind {
            TokenKind::RangeChar | TokenKind::RangeDash => {
                self.advance();
                Ok(builder::range_literal(token))
            }
            TokenKind::RegexSet => {
                self.advance();
                Ok(RangeItem::Set(builder::regex_set(token)))
            }
            TokenKind::SetPrefix => Err(self.unexpected("`\\p{Name}`")),
            _ => Err(self.unexpected("range item")),
        }
    }
}
