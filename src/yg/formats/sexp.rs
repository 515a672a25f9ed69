//! S-expression formatter
//!
//! Renders the tree the way tree-sitter prints syntax trees: one parenthesized
//! form per node, children prefixed with their field label when they have one.
//! Operator tokens are printed as quoted strings, leaves carry their text.
//!
//! ```text
//! (program (assign_statement id: (identifier "a") eq: "="
//!   (sequence lhs: (identifier "b") op: "~" rhs: (identifier "c"))))
//! ```
//!
//! (The real output is on a single line.)

use super::registry::{FormatError, Formatter};
use crate::yg::ast::{AstNode, Expression, NodeRef, Program};

pub fn to_sexp(program: &Program) -> String {
    node_to_sexp(program.as_node())
}

pub fn node_to_sexp(node: NodeRef<'_>) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: NodeRef<'_>) {
    if let NodeRef::Token { text, .. } = node {
        out.push_str(&format!("{text:?}"));
        return;
    }

    out.push('(');
    out.push_str(node.kind());

    let children = node.children();
    if let Some(label) = leaf_label(node, children.is_empty()) {
        out.push_str(&format!(" {label:?}"));
    }

    for child in children {
        out.push(' ');
        if let Some(field) = child.field {
            out.push_str(field);
            out.push_str(": ");
        }
        write_node(out, child.node);
    }
    out.push(')');
}

/// Text shown inside a node's parentheses besides its children
fn leaf_label(node: NodeRef<'_>, is_leaf: bool) -> Option<String> {
    match node {
        NodeRef::Expression(Expression::RegexRange(range)) => {
            range.negated.then(|| "^".to_string())
        }
        _ if is_leaf => Some(node.display_label()).filter(|label| !label.is_empty()),
        _ => None,
    }
}

pub struct SexpFormatter;

impl Formatter for SexpFormatter {
    fn name(&self) -> &'static str {
        "sexp"
    }

    fn serialize(&self, program: &Program) -> Result<String, FormatError> {
        Ok(to_sexp(program))
    }

    fn description(&self) -> &'static str {
        "Single-line S-expression with field labels"
    }
}
