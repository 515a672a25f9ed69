//! AST node type definitions
//!
//! This module defines all the node types that represent the parsed structure of a
//! yg program. The expression forms are a closed sum type ([`Expression`]); each
//! variant carries only the fields that belong to it, named after the role they
//! play in the grammar (`lhs`, `rhs`, `expr`, `prefix`, `suffix`, ...).
//!
//! Nodes are built once by the parser and never mutated afterwards. Every node
//! owns a [`Span`] into the source it was parsed from.

use super::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;

// ============================================================================
// Program and statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    Grammar(GrammarStatement),
    Fragment(FragmentStatement),
    Assign(AssignStatement),
}

/// `grammar! Name { "ext", "ext", }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarStatement {
    pub id: Identifier,
    pub extensions: Vec<StringLiteral>,
    pub span: Span,
}

/// `fragment! Name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentStatement {
    pub id: Identifier,
    pub span: Span,
}

/// `name = body`, `name _= body` or `name @= body`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignStatement {
    pub id: Identifier,
    pub eq: Operator<AssignOp>,
    /// Whether the body was introduced with an alignment `|`
    pub leading_alt: bool,
    pub body: Expression,
    pub span: Span,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expression {
    Parenthesized(Parenthesized),
    Identifier(Identifier),
    String(StringLiteral),
    Unsigned(UnsignedLiteral),
    MacroCall(MacroCall),
    RegexLong(RegexLong),
    RegexRange(RegexRange),
    RegexSet(RegexSet),
    UnaryPrefix(UnaryPrefix),
    UnarySuffix(UnarySuffix),
    /// `lhs ~ rhs`
    Sequence(Binary),
    /// `lhs <- rhs`
    RuleArrow(Binary),
    /// `lhs | rhs`, over tagged variants
    Alternation(Alternation),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parenthesized {
    pub expr: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// A quoted string. `value` is the text between the quotes with escapes kept
/// verbatim (`\n` stays a backslash followed by `n`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringLiteral {
    pub value: String,
    pub quote: Quote,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quote {
    Single,
    Double,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnsignedLiteral {
    pub digits: String,
    pub span: Span,
}

/// `@name(arg, arg,)` or `@name.dot(arg,)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroCall {
    pub name: Identifier,
    pub dot: Option<Identifier>,
    /// Never empty
    pub args: Vec<Expression>,
    pub span: Span,
}

/// `//` with an optional flag. The pattern body is not captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexLong {
    pub flag: Option<Operator<RegexFlag>>,
    pub span: Span,
}

/// `[...]` or `[^...]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexRange {
    pub negated: bool,
    pub items: Vec<RangeItem>,
    pub span: Span,
}

/// `\p{Name}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegexSet {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RangeItem {
    Literal(RangeLiteral),
    Set(RegexSet),
    /// `lo-hi`
    Group(RangeGroup),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeLiteral {
    pub ch: char,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeGroup {
    pub lo: Box<RangeItem>,
    pub op: Span,
    pub hi: Box<RangeItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnaryPrefix {
    pub prefix: Operator<PrefixOp>,
    pub expr: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnarySuffix {
    pub expr: Box<Expression>,
    pub suffix: Operator<SuffixOp>,
    pub span: Span,
}

/// Shared shape of `~` and `<-`; the operator is implied by the [`Expression`] variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binary {
    pub lhs: Box<Expression>,
    pub op: Span,
    pub rhs: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternation {
    pub lhs: Box<VariantTag>,
    pub op: Span,
    pub rhs: Box<VariantTag>,
    pub span: Span,
}

/// One side of an alternation, optionally tagged with `#name`, `!#name` or `_#name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantTag {
    pub expression: Box<Expression>,
    pub tag: Option<Tag>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub op: Operator<TagOp>,
    pub name: Identifier,
}

// ============================================================================
// Operators
// ============================================================================

/// An operator token together with where it was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operator<K> {
    pub kind: K,
    pub span: Span,
}

impl<K> Operator<K> {
    pub fn new(kind: K, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The three assignment markers. Their meaning is left to downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignOp {
    /// `=`
    Plain,
    /// `_=`
    Silent,
    /// `@=`
    Attributed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixOp {
    /// `^`
    Caret,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixOp {
    /// `?`
    Question,
    /// `*`
    Star,
    /// `+`
    Plus,
}

/// Variant tag markers, recorded as written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagOp {
    /// `#`
    Hash,
    /// `!#`
    BangHash,
    /// `_#`
    UnderscoreHash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegexFlag {
    /// `i`
    Insensitive,
    /// `g`
    Global,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Plain => "=",
            AssignOp::Silent => "_=",
            AssignOp::Attributed => "@=",
        }
    }
}

impl PrefixOp {
    pub fn as_str(self) -> &'static str {
        match self {
            PrefixOp::Caret => "^",
        }
    }
}

impl SuffixOp {
    pub fn as_str(self) -> &'static str {
        match self {
            SuffixOp::Question => "?",
            SuffixOp::Star => "*",
            SuffixOp::Plus => "+",
        }
    }
}

impl TagOp {
    pub fn as_str(self) -> &'static str {
        match self {
            TagOp::Hash => "#",
            TagOp::BangHash => "!#",
            TagOp::UnderscoreHash => "_#",
        }
    }
}

impl RegexFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            RegexFlag::Insensitive => "i",
            RegexFlag::Global => "g",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "i" => Some(RegexFlag::Insensitive),
            "g" => Some(RegexFlag::Global),
            _ => None,
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(AssignOp, PrefixOp, SuffixOp, TagOp, RegexFlag);

// ============================================================================
// Accessors
// ============================================================================

impl Program {
    pub fn iter_assignments(&self) -> impl Iterator<Item = &AssignStatement> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Assign(assign) => Some(assign),
            _ => None,
        })
    }

    /// Find the assignment that binds `name`
    pub fn rule(&self, name: &str) -> Option<&AssignStatement> {
        self.iter_assignments().find(|a| a.id.name == name)
    }

    pub fn grammar(&self) -> Option<&GrammarStatement> {
        self.statements.iter().find_map(|s| match s {
            Statement::Grammar(grammar) => Some(grammar),
            _ => None,
        })
    }
}

impl Statement {
    pub fn id(&self) -> &Identifier {
        match self {
            Statement::Grammar(s) => &s.id,
            Statement::Fragment(s) => &s.id,
            Statement::Assign(s) => &s.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Statement::Grammar(s) => s.span,
            Statement::Fragment(s) => s.span,
            Statement::Assign(s) => s.span,
        }
    }
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Parenthesized(e) => e.span,
            Expression::Identifier(e) => e.span,
            Expression::String(e) => e.span,
            Expression::Unsigned(e) => e.span,
            Expression::MacroCall(e) => e.span,
            Expression::RegexLong(e) => e.span,
            Expression::RegexRange(e) => e.span,
            Expression::RegexSet(e) => e.span,
            Expression::UnaryPrefix(e) => e.span,
            Expression::UnarySuffix(e) => e.span,
            Expression::Sequence(e) | Expression::RuleArrow(e) => e.span,
            Expression::Alternation(e) => e.span,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(id) => Some(id),
            _ => None,
        }
    }
}

impl RangeItem {
    pub fn span(&self) -> Span {
        match self {
            RangeItem::Literal(l) => l.span,
            RangeItem::Set(s) => s.span,
            RangeItem::Group(g) => g.span,
        }
    }
}

impl Tag {
    pub fn span(&self) -> Span {
        self.op.span.merge(self.name.span)
    }
}

impl UnsignedLiteral {
    pub fn value(&self) -> Result<u64, ParseIntError> {
        self.digits.parse()
    }
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = self.quote.as_char();
        write!(f, "{}{}{}", quote, self.value, quote)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program({} statements)", self.statements.len())
    }
}
