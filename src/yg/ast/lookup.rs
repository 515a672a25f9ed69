//! Position-based AST node lookup

use super::node::Program;
use super::node_ref::{AstNode, NodeRef};
use super::position::SourceLocation;
use super::span::Position;

/// All nodes whose span encloses `offset`, deepest first.
///
/// Empty spans never match. The program itself is last in the chain whenever
/// `offset` is inside the source.
pub fn node_at(program: &Program, offset: usize) -> Vec<NodeRef<'_>> {
    let mut chain = Vec::new();
    let mut current = program.as_node();
    if !current.span().contains(offset) {
        return chain;
    }
    loop {
        chain.push(current);
        let next = current
            .children()
            .into_iter()
            .map(|child| child.node)
            .find(|node| node.span().contains(offset));
        match next {
            Some(node) => current = node,
            None => break,
        }
    }
    chain.reverse();
    chain
}

/// Lookup by line/column instead of byte offset
pub fn nodes_at_position<'a>(
    program: &'a Program,
    source: &str,
    position: Position,
) -> Vec<NodeRef<'a>> {
    match SourceLocation::new(source).position_to_byte(position) {
        Some(offset) => node_at(program, offset),
        None => Vec::new(),
    }
}

pub fn format_at_position(program: &Program, source: &str, position: Position) -> String {
    let nodes = nodes_at_position(program, source, position);
    if nodes.is_empty() {
        "No AST nodes at this position".to_string()
    } else {
        nodes
            .iter()
            .map(|node| format!("- {}: {}", node.kind(), node.display_label()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yg::testing::parse_ok;

    #[test]
    fn test_node_at_finds_deepest_first() {
        let source = "a = b ~ c;";
        let program = parse_ok(source);
        let kinds: Vec<_> = node_at(&program, 8).iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec!["identifier", "sequence", "assign_statement", "program"]
        );
    }

    #[test]
    fn test_node_at_operator_token() {
        let program = parse_ok("a = b ~ c;");
        let chain = node_at(&program, 6);
        assert!(chain[0].is_token());
        assert_eq!(chain[0].display_label(), "~");
    }

    #[test]
    fn test_node_at_outside_source() {
        let program = parse_ok("a = b;");
        assert!(node_at(&program, 100).is_empty());
    }

    #[test]
    fn test_format_at_position() {
        let source = "fragment! F;\nrule = 'x';";
        let program = parse_ok(source);
        let out = format_at_position(&program, source, Position::new(1, 8));
        assert_eq!(
            out,
            "- string: 'x'\n- assign_statement: rule =\n- program: 2 statements"
        );
        assert_eq!(
            format_at_position(&program, source, Position::new(7, 0)),
            "No AST nodes at this position"
        );
    }
}
