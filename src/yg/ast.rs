//! AST definitions and utilities for yg programs
//!
//! ## Modules
//!
//! - `span` - Position and Span types for source code locations
//! - `node` - AST node type definitions
//! - `node_ref` - Uniform, field-labelled navigation over any node
//! - `position` - Source location utilities for converting byte offsets
//! - `lookup` - Position-based AST node lookup functionality

pub mod lookup;
pub mod node;
pub mod node_ref;
pub mod position;
pub mod span;

pub use lookup::{format_at_position, node_at, nodes_at_position};
pub use node::{
    Alternation, AssignOp, AssignStatement, Binary, Expression, FragmentStatement,
    GrammarStatement, Identifier, MacroCall, Operator, Parenthesized, PrefixOp, Program, Quote,
    RangeGroup, RangeItem, RangeLiteral, RegexFlag, RegexLong, RegexRange, RegexSet, Statement,
    StringLiteral, SuffixOp, Tag, TagOp, UnaryPrefix, UnarySuffix, UnsignedLiteral, VariantTag,
};
pub use node_ref::{AstNode, Child, NodeRef};
pub use position::SourceLocation;
pub use span::{Position, Span};
