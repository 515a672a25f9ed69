//! Treeviz formatter for AST nodes
//!
//! One line per node, indented with box-drawing connectors. Children that fill
//! a named field are prefixed with the field name.

use super::registry::{FormatError, Formatter};
use crate::yg::ast::{AstNode, Child, NodeRef, Program};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(program: &Program) -> String {
    let mut result = String::new();
    append_children(&mut result, &program.as_node().children(), "");
    result
}

fn append_node(result: &mut String, child: &Child<'_>, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let field = child.field.map(|f| format!("{f}=")).unwrap_or_default();
    let label = truncate(&child.node.display_label(), 30);

    result.push_str(&format!(
        "{}{} {}{}: {}\n",
        prefix,
        connector,
        field,
        child.node.kind(),
        label
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, &child.node.children(), &new_prefix);
}

fn append_children(result: &mut String, children: &[Child<'_>], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, prefix, is_last);
    }
}

/// Render any single node (and its subtree) as the root of a tree
pub fn node_to_treeviz_str(node: NodeRef<'_>) -> String {
    let mut result = String::new();
    let root = Child { field: None, node };
    append_node(&mut result, &root, "", true);
    result
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &'static str {
        "treeviz"
    }

    fn serialize(&self, program: &Program) -> Result<String, FormatError> {
        Ok(to_treeviz_str(program))
    }

    fn description(&self) -> &'static str {
        "Box-drawing tree of node kinds and labels"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yg::testing::parse_ok;

    #[test]
    fn test_treeviz_assignment() {
        let program = parse_ok("a = b ~ c;");
        let expected = "\
└─ assign_statement: a =
  ├─ id=identifier: a
  ├─ eq=token: =
  └─ sequence: ~
    ├─ lhs=identifier: b
    ├─ op=token: ~
    └─ rhs=identifier: c
";
        assert_eq!(to_treeviz_str(&program), expected);
    }

    #[test]
    fn test_treeviz_truncates_long_labels() {
        let program = parse_ok("x = 'aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa';");
        let out = to_treeviz_str(&program);
        let expected = format!("string: '{}...", "a".repeat(29));
        assert!(out.contains(&expected));
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(to_treeviz_str(&parse_ok("")), "");
    }
}
