//! Uniform, field-labelled view over the AST
//!
//! The concrete node types are convenient to match on, but generic consumers
//! (serializers, lookup, linters) want to walk the tree without knowing every
//! variant. [`NodeRef`] is a borrowed handle to any node; its children come with
//! the grammar's field label (`lhs`, `op`, `rhs`, `id`, `ext`, ...) so a consumer
//! can navigate by role instead of by position.
//!
//! Operator tokens that carry a field label in the grammar (`op`, `eq`, `prefix`,
//! `suffix`) appear as [`NodeRef::Token`] leaves.

use super::node::{
    AssignStatement, Expression, FragmentStatement, GrammarStatement, Identifier, Program,
    RangeItem, Statement, StringLiteral, VariantTag,
};
use super::span::Span;

/// A child edge: the field label (if the grammar names one) and the child
#[derive(Debug, Clone, Copy)]
pub struct Child<'a> {
    pub field: Option<&'static str>,
    pub node: NodeRef<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    GrammarStatement(&'a GrammarStatement),
    FragmentStatement(&'a FragmentStatement),
    AssignStatement(&'a AssignStatement),
    Expression(&'a Expression),
    VariantTag(&'a VariantTag),
    Identifier(&'a Identifier),
    StringLiteral(&'a StringLiteral),
    RangeItem(&'a RangeItem),
    Token { text: &'static str, span: Span },
}

/// Common interface for all AST nodes
pub trait AstNode {
    fn as_node(&self) -> NodeRef<'_>;

    fn node_type(&self) -> &'static str {
        self.as_node().kind()
    }
}

impl AstNode for Program {
    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Program(self)
    }
}

impl AstNode for Statement {
    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::from(self)
    }
}

impl AstNode for Expression {
    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Expression(self)
    }
}

impl AstNode for VariantTag {
    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::VariantTag(self)
    }
}

impl<'a> From<&'a Statement> for NodeRef<'a> {
    fn from(statement: &'a Statement) -> Self {
        match statement {
            Statement::Grammar(s) => NodeRef::GrammarStatement(s),
            Statement::Fragment(s) => NodeRef::FragmentStatement(s),
            Statement::Assign(s) => NodeRef::AssignStatement(s),
        }
    }
}

fn labelled<'a>(field: &'static str, node: NodeRef<'a>) -> Child<'a> {
    Child {
        field: Some(field),
        node,
    }
}

fn unlabelled(node: NodeRef<'_>) -> Child<'_> {
    Child { field: None, node }
}

impl<'a> NodeRef<'a> {
    /// Grammar name of the node, in snake case
    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::Program(_) => "program",
            NodeRef::GrammarStatement(_) => "grammar_statement",
            NodeRef::FragmentStatement(_) => "fragment_statement",
            NodeRef::AssignStatement(_) => "assign_statement",
            NodeRef::Expression(expr) => match expr {
                Expression::Parenthesized(_) => "parenthesized",
                Expression::Identifier(_) => "identifier",
                Expression::String(_) => "string",
                Expression::Unsigned(_) => "unsigned",
                Expression::MacroCall(_) => "macro_call",
                Expression::RegexLong(_) => "regex_long",
                Expression::RegexRange(_) => "regex_range",
                Expression::RegexSet(_) => "regex_set",
                Expression::UnaryPrefix(_) => "unary_prefix",
                Expression::UnarySuffix(_) => "unary_suffix",
                Expression::Sequence(_) => "sequence",
                Expression::RuleArrow(_) => "rule_arrow",
                Expression::Alternation(_) => "alternation",
            },
            NodeRef::VariantTag(_) => "variant_tag",
            NodeRef::Identifier(_) => "identifier",
            NodeRef::StringLiteral(_) => "string",
            NodeRef::RangeItem(item) => match item {
                RangeItem::Literal(_) => "range_literal",
                RangeItem::Set(_) => "regex_set",
                RangeItem::Group(_) => "range_group",
            },
            NodeRef::Token { .. } => "token",
        }
    }

    pub fn span(&self) -> Span {
        match self {
            NodeRef::Program(p) => p.span,
            NodeRef::GrammarStatement(s) => s.span,
            NodeRef::FragmentStatement(s) => s.span,
            NodeRef::AssignStatement(s) => s.span,
            NodeRef::Expression(e) => e.span(),
            NodeRef::VariantTag(v) => v.span,
            NodeRef::Identifier(i) => i.span,
            NodeRef::StringLiteral(s) => s.span,
            NodeRef::RangeItem(r) => r.span(),
            NodeRef::Token { span, .. } => *span,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, NodeRef::Token { .. })
    }

    /// The source text this node was parsed from
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span().text(source)
    }

    /// Short human label: the identifier name, literal text or operator
    pub fn display_label(&self) -> String {
        match self {
            NodeRef::Program(p) => format!("{} statements", p.statements.len()),
            NodeRef::GrammarStatement(s) => s.id.name.clone(),
            NodeRef::FragmentStatement(s) => s.id.name.clone(),
            NodeRef::AssignStatement(s) => format!("{} {}", s.id.name, s.eq.kind),
            NodeRef::Expression(expr) => match expr {
                Expression::Identifier(id) => id.name.clone(),
                Expression::String(s) => s.to_string(),
                Expression::Unsigned(u) => u.digits.clone(),
                Expression::MacroCall(m) => match &m.dot {
                    Some(dot) => format!("@{}.{}", m.name.name, dot.name),
                    None => format!("@{}", m.name.name),
                },
                Expression::RegexLong(r) => match r.flag {
                    Some(flag) => format!("//{}", flag.kind),
                    None => "//".to_string(),
                },
                Expression::RegexRange(r) => {
                    if r.negated {
                        "[^".to_string()
                    } else {
                        "[".to_string()
                    }
                }
                Expression::RegexSet(s) => format!("\\p{{{}}}", s.name),
                Expression::UnaryPrefix(u) => u.prefix.kind.to_string(),
                Expression::UnarySuffix(u) => u.suffix.kind.to_string(),
                Expression::Sequence(_) => "~".to_string(),
                Expression::RuleArrow(_) => "<-".to_string(),
                Expression::Alternation(_) => "|".to_string(),
                Expression::Parenthesized(_) => "()".to_string(),
            },
            NodeRef::VariantTag(v) => match &v.tag {
                Some(tag) => format!("{}{}", tag.op.kind, tag.name.name),
                None => String::new(),
            },
            NodeRef::Identifier(id) => id.name.clone(),
            NodeRef::StringLiteral(s) => s.to_string(),
            NodeRef::RangeItem(item) => match item {
                RangeItem::Literal(l) => l.ch.to_string(),
                RangeItem::Set(s) => format!("\\p{{{}}}", s.name),
                RangeItem::Group(_) => "-".to_string(),
            },
            NodeRef::Token { text, .. } => text.to_string(),
        }
    }

    /// Direct children in source order, with their field labels
    pub fn children(&self) -> Vec<Child<'a>> {
        match *self {
            NodeRef::Program(p) => p
                .statements
                .iter()
                .map(|s| unlabelled(NodeRef::from(s)))
                .collect(),
            NodeRef::GrammarStatement(s) => {
                let mut children = vec![labelled("id", NodeRef::Identifier(&s.id))];
                children.extend(
                    s.extensions
                        .iter()
                        .map(|ext| labelled("ext", NodeRef::StringLiteral(ext))),
                );
                children
            }
            NodeRef::FragmentStatement(s) => vec![labelled("id", NodeRef::Identifier(&s.id))],
            NodeRef::AssignStatement(s) => vec![
                labelled("id", NodeRef::Identifier(&s.id)),
                labelled(
                    "eq",
                    NodeRef::Token {
                        text: s.eq.kind.as_str(),
                        span: s.eq.span,
                    },
                ),
                unlabelled(NodeRef::Expression(&s.body)),
            ],
            NodeRef::Expression(expr) => expression_children(expr),
            NodeRef::VariantTag(v) => {
                let mut children = vec![labelled("expression", NodeRef::Expression(&v.expression))];
                if let Some(tag) = &v.tag {
                    children.push(labelled(
                        "op",
                        NodeRef::Token {
                            text: tag.op.kind.as_str(),
                            span: tag.op.span,
                        },
                    ));
                    children.push(labelled("name", NodeRef::Identifier(&tag.name)));
                }
                children
            }
            NodeRef::RangeItem(RangeItem::Group(g)) => vec![
                labelled("lo", NodeRef::RangeItem(&g.lo)),
                labelled("op", NodeRef::Token { text: "-", span: g.op }),
                labelled("hi", NodeRef::RangeItem(&g.hi)),
            ],
            NodeRef::RangeItem(_)
            | NodeRef::Identifier(_)
            | NodeRef::StringLiteral(_)
            | NodeRef::Token { .. } => Vec::new(),
        }
    }

    /// First child carrying the given field label
    pub fn child_by_field(&self, field: &str) -> Option<NodeRef<'a>> {
        self.children()
            .into_iter()
            .find(|child| child.field == Some(field))
            .map(|child| child.node)
    }

    /// All children carrying the given field label, in source order
    pub fn children_by_field(&self, field: &str) -> Vec<NodeRef<'a>> {
        self.children()
            .into_iter()
            .filter(|child| child.field == Some(field))
            .map(|child| child.node)
            .collect()
    }

    /// This node and all of its descendants, pre-order
    pub fn descendants(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        let mut stack = vec![*self];
        while let Some(node) = stack.pop() {
            out.push(node);
            let children = node.children();
            stack.extend(children.into_iter().rev().map(|c| c.node));
        }
        out
    }
}

fn expression_children(expr: &Expression) -> Vec<Child<'_>> {
    match expr {
        Expression::Parenthesized(p) => vec![unlabelled(NodeRef::Expression(&p.expr))],
        Expression::MacroCall(m) => {
            let mut children = vec![labelled("name", NodeRef::Identifier(&m.name))];
            if let Some(dot) = &m.dot {
                children.push(labelled("dot", NodeRef::Identifier(dot)));
            }
            children.extend(m.args.iter().map(|a| unlabelled(NodeRef::Expression(a))));
            children
        }
        Expression::RegexRange(r) => r
            .items
            .iter()
            .map(|item| unlabelled(NodeRef::RangeItem(item)))
            .collect(),
        Expression::UnaryPrefix(u) => vec![
            labelled(
                "prefix",
                NodeRef::Token {
                    text: u.prefix.kind.as_str(),
                    span: u.prefix.span,
                },
            ),
            labelled("expr", NodeRef::Expression(&u.expr)),
        ],
        Expression::UnarySuffix(u) => vec![
            labelled("expr", NodeRef::Expression(&u.expr)),
            labelled(
                "suffix",
                NodeRef::Token {
                    text: u.suffix.kind.as_str(),
                    span: u.suffix.span,
                },
            ),
        ],
        Expression::Sequence(b) => binary_children(b.lhs.as_ref(), "~", b.op, b.rhs.as_ref()),
        Expression::RuleArrow(b) => binary_children(b.lhs.as_ref(), "<-", b.op, b.rhs.as_ref()),
        Expression::Alternation(a) => vec![
            labelled("lhs", NodeRef::VariantTag(&a.lhs)),
            labelled("op", NodeRef::Token { text: "|", span: a.op }),
            labelled("rhs", NodeRef::VariantTag(&a.rhs)),
        ],
        Expression::Identifier(_)
        | Expression::String(_)
        | Expression::Unsigned(_)
        | Expression::RegexLong(_)
        | Expression::RegexSet(_) => Vec::new(),
    }
}

fn binary_children<'a>(
    lhs: &'a Expression,
    op: &'static str,
    op_span: Span,
    rhs: &'a Expression,
) -> Vec<Child<'a>> {
    vec![
        labelled("lhs", NodeRef::Expression(lhs)),
        labelled(
            "op",
            NodeRef::Token {
                text: op,
                span: op_span,
            },
        ),
        labelled("rhs", NodeRef::Expression(rhs)),
    ]
}
