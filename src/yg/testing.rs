//! Testing utilities shared by unit and integration tests
//!
//! # Sample sources
//!
//! Realistic yg programs live in `samples/` at the crate root and are embedded
//! here, so tests reach them by name through [`YgSamples`] instead of pasting
//! grammar text into every test:
//!
//! - `000-json.yg` - a full JSON grammar: tags, macros, ranges, sets
//! - `010-fragment.yg` - a fragment with regex forms and prefix/suffix operators
//! - `020-arrows.yg` - nested rule arrows and all three tag operators
//! - `030-recovery.yg` - three independent errors between valid statements
//!
//! # Helpers
//!
//! - [`parse_ok`] parses and panics with rendered diagnostics on any error.
//! - [`sexp`] / [`sexp_expr`] give the S-expression of a program / expression,
//!   the form most assertions compare against.
//! - [`assert_round_trip`] checks that every node's span slices the source back
//!   to text that belongs to that node.

use crate::yg::ast::{AstNode, NodeRef, Program};
use crate::yg::formats::{node_to_sexp, to_sexp};
use crate::yg::parsing::{parse, parse_expression};

/// Verified sample programs, embedded at compile time
pub struct YgSamples;

const SAMPLES: &[(&str, &str)] = &[
    ("000-json.yg", include_str!("../../samples/000-json.yg")),
    ("010-fragment.yg", include_str!("../../samples/010-fragment.yg")),
    ("020-arrows.yg", include_str!("../../samples/020-arrows.yg")),
    ("030-recovery.yg", include_str!("../../samples/030-recovery.yg")),
];

impl YgSamples {
    pub fn get(name: &str) -> Option<&'static str> {
        SAMPLES
            .iter()
            .find(|(sample, _)| *sample == name)
            .map(|(_, source)| *source)
    }

    /// Samples that parse without diagnostics
    pub fn valid() -> impl Iterator<Item = (&'static str, &'static str)> {
        SAMPLES
            .iter()
            .copied()
            .filter(|(name, _)| !name.contains("recovery"))
    }

    pub fn names() -> Vec<&'static str> {
        SAMPLES.iter().map(|(name, _)| *name).collect()
    }
}

/// Parse `source`, panicking with the rendered diagnostics if there are any
pub fn parse_ok(source: &str) -> Program {
    let output = parse(source);
    if !output.diagnostics.is_empty() {
        panic!(
            "expected a clean parse, got:\n{}",
            output.diagnostics.render("<test>", source)
        );
    }
    output.program
}

/// S-expression of a program that must parse cleanly
pub fn sexp(source: &str) -> String {
    to_sexp(&parse_ok(source))
}

/// S-expression of a single expression that must parse cleanly
pub fn sexp_expr(source: &str) -> String {
    match parse_expression(source) {
        Ok(expr) => node_to_sexp(expr.as_node()),
        Err(diagnostics) => panic!(
            "expected a clean expression, got:\n{}",
            diagnostics.render("<test>", source)
        ),
    }
}

/// Every node's span must lie within the source and within its parent's span,
/// children must appear in source order, and leaves must slice back to their own
/// text.
pub fn assert_round_trip(program: &Program, source: &str) {
    assert_eq!(program.span.start, 0, "program must start at 0");
    assert_eq!(program.span.end, source.len(), "program must span the source");
    check_node(program.as_node(), source);
}

fn check_node(node: NodeRef<'_>, source: &str) {
    let span = node.span();
    assert!(
        span.end <= source.len() && source.is_char_boundary(span.start) && source.is_char_boundary(span.end),
        "{} span {} is not a valid slice of the source",
        node.kind(),
        span
    );

    let text = node.text(source);
    match node {
        NodeRef::Token { text: op, .. } => assert_eq!(text, op, "operator token text"),
        NodeRef::Identifier(id) => assert_eq!(text, id.name, "identifier text"),
        NodeRef::StringLiteral(lit) => assert_eq!(text, lit.to_string(), "string text"),
        _ => {}
    }

    let mut last_end = span.start;
    for child in node.children() {
        let child_span = child.node.span();
        assert!(
            child_span.start >= last_end && child_span.end <= span.end,
            "child {} at {} escapes parent {} at {}",
            child.node.kind(),
            child_span,
            node.kind(),
            span
        );
        last_end = child_span.end;
        check_node(child.node, source);
    }
}
