//! AST node constructors
//!
//! Every composite node gets the span running from its first child to its last,
//! where operator tokens and delimiters count as children. The parser never
//! computes a span itself; it hands tokens and finished children to these
//! functions.

use crate::yg::ast::{
    Alternation, AssignOp, AssignStatement, Binary, Expression, FragmentStatement,
    GrammarStatement, Identifier, MacroCall, Operator, Parenthesized, PrefixOp, Quote, RangeGroup,
    RangeItem, RangeLiteral, RegexFlag, RegexLong, RegexRange, RegexSet, Span, Statement,
    StringLiteral, SuffixOp, Tag, TagOp, UnaryPrefix, UnarySuffix, UnsignedLiteral, VariantTag,
};
use crate::yg::lexing::Token;

// ----------------------------------------------------------------------------
// Leaves
// ----------------------------------------------------------------------------

pub fn identifier(token: Token<'_>) -> Identifier {
    Identifier {
        name: token.lexeme.to_string(),
        span: token.span,
    }
}

/// Strip the delimiters; escapes stay as written
pub fn string_literal(token: Token<'_>) -> StringLiteral {
    let quote = if token.lexeme.starts_with('"') {
        Quote::Double
    } else {
        Quote::Single
    };
    let inner = token
        .lexeme
        .get(1..token.lexeme.len().saturating_sub(1))
        .unwrap_or_default();
    StringLiteral {
        value: inner.to_string(),
        quote,
        span: token.span,
    }
}

pub fn unsigned(token: Token<'_>) -> Expression {
    Expression::Unsigned(UnsignedLiteral {
        digits: token.lexeme.to_string(),
        span: token.span,
    })
}

/// `\p{Name}` token to its set
pub fn regex_set(token: Token<'_>) -> RegexSet {
    let name = token
        .lexeme
        .strip_prefix("\\p{")
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or_default();
    RegexSet {
        name: name.to_string(),
        span: token.span,
    }
}

pub fn range_literal(token: Token<'_>) -> RangeItem {
    RangeItem::Literal(RangeLiteral {
        ch: token.lexeme.chars().next().unwrap_or_default(),
        span: token.span,
    })
}

// ----------------------------------------------------------------------------
// Expressions
// ----------------------------------------------------------------------------

pub fn parenthesized(open: Token<'_>, inner: Expression, close: Token<'_>) -> Expression {
    Expression::Parenthesized(Parenthesized {
        expr: Box::new(inner),
        span: open.span.merge(close.span),
    })
}

pub fn macro_call(
    at: Token<'_>,
    name: Identifier,
    dot: Option<Identifier>,
    args: Vec<Expression>,
    close: Token<'_>,
) -> Expression {
    Expression::MacroCall(MacroCall {
        name,
        dot,
        args,
        span: at.span.merge(close.span),
    })
}

pub fn regex_long(
    first: Token<'_>,
    second: Token<'_>,
    flag: Option<Operator<RegexFlag>>,
) -> Expression {
    let end = flag.map(|f| f.span).unwrap_or(second.span);
    Expression::RegexLong(RegexLong {
        flag,
        span: first.span.merge(end),
    })
}

pub fn regex_range(open: Token<'_>, items: Vec<RangeItem>, close: Token<'_>) -> Expression {
    Expression::RegexRange(RegexRange {
        negated: open.lexeme == "[^",
        items,
        span: open.span.merge(close.span),
    })
}

pub fn range_group(lo: RangeItem, op: Token<'_>, hi: RangeItem) -> RangeItem {
    let span = lo.span().merge(hi.span());
    RangeItem::Group(RangeGroup {
        lo: Box::new(lo),
        op: op.span,
        hi: Box::new(hi),
        span,
    })
}

pub fn unary_prefix(op: Token<'_>, expr: Expression) -> Expression {
    let span = op.span.merge(expr.span());
    Expression::UnaryPrefix(UnaryPrefix {
        prefix: Operator::new(PrefixOp::Caret, op.span),
        expr: Box::new(expr),
        span,
    })
}

pub fn unary_suffix(expr: Expression, op: Token<'_>, kind: SuffixOp) -> Expression {
    let span = expr.span().merge(op.span);
    Expression::UnarySuffix(UnarySuffix {
        expr: Box::new(expr),
        suffix: Operator::new(kind, op.span),
        span,
    })
}

fn binary(lhs: Expression, op: Token<'_>, rhs: Expression) -> Binary {
    let span = lhs.span().merge(rhs.span());
    Binary {
        lhs: Box::new(lhs),
        op: op.span,
        rhs: Box::new(rhs),
        span,
    }
}

pub fn sequence(lhs: Expression, op: Token<'_>, rhs: Expression) -> Expression {
    Expression::Sequence(binary(lhs, op, rhs))
}

pub fn rule_arrow(lhs: Expression, op: Token<'_>, rhs: Expression) -> Expression {
    Expression::RuleArrow(binary(lhs, op, rhs))
}

pub fn alternation(lhs: VariantTag, op: Token<'_>, rhs: VariantTag) -> Expression {
    let span = lhs.span.merge(rhs.span);
    Expression::Alternation(Alternation {
        lhs: Box::new(lhs),
        op: op.span,
        rhs: Box::new(rhs),
        span,
    })
}

pub fn tag(op: Token<'_>, kind: TagOp, name: Identifier) -> Tag {
    Tag {
        op: Operator::new(kind, op.span),
        name,
    }
}

pub fn variant_tag(expression: Expression, tag: Option<Tag>) -> VariantTag {
    let span = match &tag {
        Some(tag) => expression.span().merge(tag.span()),
        None => expression.span(),
    };
    VariantTag {
        expression: Box::new(expression),
        tag,
        span,
    }
}

// ----------------------------------------------------------------------------
// Statements
// ----------------------------------------------------------------------------

/// `keyword` is `grammar!`; `last` is the closing `}` or `;` if any
pub fn grammar_statement(
    keyword: Token<'_>,
    id: Identifier,
    extensions: Vec<StringLiteral>,
    last: Option<Token<'_>>,
) -> Statement {
    let end = last.map(|t| t.span).unwrap_or(id.span);
    Statement::Grammar(GrammarStatement {
        span: keyword.span.merge(end),
        id,
        extensions,
    })
}

pub fn fragment_statement(keyword: Token<'_>, id: Identifier, semi: Option<Token<'_>>) -> Statement {
    let end = semi.map(|t| t.span).unwrap_or(id.span);
    Statement::Fragment(FragmentStatement {
        span: keyword.span.merge(end),
        id,
    })
}

pub fn assign_statement(
    id: Identifier,
    eq: Operator<AssignOp>,
    leading_alt: bool,
    body: Expression,
    semi: Option<Token<'_>>,
) -> Statement {
    let end = semi.map(|t| t.span).unwrap_or(body.span());
    Statement::Assign(AssignStatement {
        span: id.span.merge(end),
        id,
        eq,
        leading_alt,
        body,
    })
}

pub fn program_span(source: &str) -> Span {
    Span::new(0, source.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yg::lexing::TokenKind;

    fn tok(kind: TokenKind, lexeme: &str, start: usize) -> Token<'_> {
        Token {
            kind,
            lexeme,
            span: Span::new(start, start + lexeme.len()),
        }
    }

    #[test]
    fn test_string_literal_strips_quotes() {
        let lit = string_literal(tok(TokenKind::String, r#""a\"b""#, 0));
        assert_eq!(lit.value, r#"a\"b"#);
        assert_eq!(lit.quote, Quote::Double);
        assert_eq!(lit.span, Span::new(0, 6));
    }

    #[test]
    fn test_regex_set_name() {
        let set = regex_set(tok(TokenKind::RegexSet, r"\p{XID_Start}", 3));
        assert_eq!(set.name, "XID_Start");
        assert_eq!(set.span, Span::new(3, 16));
    }

    #[test]
    fn test_binary_span_covers_operands() {
        let a = Expression::Identifier(identifier(tok(TokenKind::Ident, "a", 0)));
        let b = Expression::Identifier(identifier(tok(TokenKind::Ident, "bc", 4)));
        let seq = sequence(a, tok(TokenKind::Tilde, "~", 2), b);
        assert_eq!(seq.span(), Span::new(0, 6));
    }

    #[test]
    fn test_statement_span_includes_semicolon() {
        let id = identifier(tok(TokenKind::Ident, "F", 10));
        let stmt = fragment_statement(
            tok(TokenKind::FragmentKw, "fragment!", 0),
            id,
            Some(tok(TokenKind::Semi, ";", 11)),
        );
        assert_eq!(stmt.span(), Span::new(0, 12));
    }
}
