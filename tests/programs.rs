//! Whole-program parsing: statements, samples, recovery and output formats

use insta::assert_snapshot;
use yg::yg::ast::{lookup, AstNode, Expression, Position, Statement};
use yg::yg::diagnostics::{ParseError, SyntaxError};
use yg::yg::formats::{to_treeviz_str, FormatRegistry};
use yg::yg::testing::{assert_round_trip, parse_ok, sexp, YgSamples};
use yg::{parse, parse_with_options, ParseOptions};

fn syntax_errors(source: &str) -> Vec<SyntaxError> {
    parse(source)
        .diagnostics
        .iter()
        .filter_map(|d| match &d.error {
            ParseError::Syntax(e) => Some(e.clone()),
            ParseError::Lex(_) => None,
        })
        .collect()
}

#[test]
fn test_grammar_with_extensions() {
    let program = parse_ok(r#"grammar! Foo { "a", "b", };"#);
    let grammar = program.grammar().expect("grammar statement");
    assert_eq!(grammar.id.name, "Foo");
    let exts: Vec<_> = grammar.extensions.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(exts, vec!["a", "b"]);
    assert_eq!(grammar.span.end, 27);
}

#[test]
fn test_recovery_keeps_following_statement() {
    let output = parse("x = ; y = 'a';");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.program.statements.len(), 1);

    let rule = output.program.rule("y").expect("y survives recovery");
    match &rule.body {
        Expression::String(s) => assert_eq!(s.value, "a"),
        other => panic!("expected a string body, got {other:?}"),
    }
}

#[test]
fn test_keyword_requires_bang() {
    let program = parse_ok("grammar1 = _x1 ~ grammar;");
    let rule = program.rule("grammar1").expect("rule named grammar1");
    assert!(matches!(rule.body, Expression::Sequence(_)));

    assert!(matches!(
        parse_ok("grammar! G;").statements[0],
        Statement::Grammar(_)
    ));
}

#[test]
fn test_statements_without_semicolons() {
    let program = parse_ok("fragment! F\na = b\nc _= d ~ e\n");
    let ids: Vec<_> = program.statements.iter().map(|s| s.id().name.as_str()).collect();
    assert_eq!(ids, vec!["F", "a", "c"]);
}

#[test]
fn test_statement_span_includes_semicolon() {
    let source = "a = b ~ c;  d = e";
    let program = parse_ok(source);
    let spans: Vec<_> = program.statements.iter().map(|s| s.span().text(source)).collect();
    assert_eq!(spans, vec!["a = b ~ c;", "d = e"]);
    assert_eq!(program.span.end, source.len());
}

#[test]
fn test_valid_samples() {
    for (name, source) in YgSamples::valid() {
        let output = parse(source);
        assert!(
            output.is_ok(),
            "{name}:\n{}",
            output.diagnostics.render(name, source)
        );
        assert_round_trip(&output.program, source);
    }
}

#[test]
fn test_json_sample_shape() {
    let source = YgSamples::get("000-json.yg").unwrap_or_default();
    let program = parse_ok(source);
    assert_eq!(program.statements.len(), 10);

    let value = program.rule("value").expect("value rule");
    assert!(value.leading_alt);
    let tags: Vec<_> = value
        .body
        .as_node()
        .descendants()
        .into_iter()
        .filter(|n| n.kind() == "variant_tag")
        .filter_map(|n| n.child_by_field("name"))
        .map(|n| n.display_label())
        .collect();
    assert_eq!(tags, vec!["Object", "Array", "String", "Number", "Keyword"]);
}

#[test]
fn test_recovery_sample() {
    let source = YgSamples::get("030-recovery.yg").unwrap_or_default();
    let output = parse(source);

    let ids: Vec<_> = output
        .program
        .statements
        .iter()
        .map(|s| s.id().name.as_str())
        .collect();
    assert_eq!(ids, vec!["y", "w"]);

    let errors: Vec<_> = output.diagnostics.iter().map(|d| &d.error).collect();
    assert!(matches!(
        errors.as_slice(),
        [
            ParseError::Syntax(SyntaxError::MissingTrailingSeparator { list: "extension list", .. }),
            ParseError::Syntax(SyntaxError::UnexpectedToken { .. }),
            ParseError::Syntax(SyntaxError::MissingTrailingSeparator { list: "argument list", .. }),
        ]
    ));

    let starts: Vec<_> = output.diagnostics.iter().map(|d| d.span.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

#[test]
fn test_recovery_disabled() {
    let source = YgSamples::get("030-recovery.yg").unwrap_or_default();
    let options = ParseOptions {
        recover: false,
        max_errors: None,
    };
    let output = parse_with_options(source, &options);
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.program.statements.is_empty());
}

#[test]
fn test_unbalanced_paren_in_statement() {
    let errors = syntax_errors("d = e;\na = (b ~ c");
    assert!(matches!(
        errors.first(),
        Some(SyntaxError::UnbalancedDelimiter { close: ')', .. })
    ));
}

#[test]
fn test_diagnostic_rendering_names_the_file() {
    let source = "a = @m(b);";
    let output = parse(source);
    let rendered = output.diagnostics.render("rules.yg", source);
    assert!(rendered.contains("rules.yg"));
    assert!(rendered.contains("argument list"));
}

#[test]
fn test_lookup_by_position() {
    let source = YgSamples::get("020-arrows.yg").unwrap_or_default();
    let program = parse_ok(source);
    // line 3 is `term = atom !#Skip | ...`; column 14 sits inside `Skip`
    let chain = lookup::nodes_at_position(&program, source, Position::new(3, 14));
    let kinds: Vec<_> = chain.iter().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            "identifier",
            "variant_tag",
            "alternation",
            "variant_tag",
            "alternation",
            "assign_statement",
            "program"
        ]
    );
    assert_eq!(chain[0].display_label(), "Skip");
}

#[test]
fn test_every_format_renders_every_sample() {
    let registry = FormatRegistry::with_defaults();
    for (name, source) in YgSamples::valid() {
        let program = parse_ok(source);
        for format in registry.names() {
            let out = registry.serialize(&program, format);
            assert!(out.is_ok(), "{format} failed on {name}");
        }
    }
}

#[test]
fn test_sexp_grammar_statement() {
    assert_snapshot!(
        sexp(r#"grammar! Foo { "a", "b", };"#),
        @r#"(program (grammar_statement id: (identifier "Foo") ext: (string "\"a\"") ext: (string "\"b\"")))"#
    );
}

#[test]
fn test_sexp_macro_and_regex_long() {
    assert_snapshot!(
        sexp("x = @m.n(a,) | //g;"),
        @r#"(program (assign_statement id: (identifier "x") eq: "=" (alternation lhs: (variant_tag expression: (macro_call name: (identifier "m") dot: (identifier "n") (identifier "a"))) op: "|" rhs: (variant_tag expression: (regex_long "//g")))))"#
    );
}

#[test]
fn test_sexp_tagged_variant() {
    assert_snapshot!(
        sexp("t = a #A | b;"),
        @r##"(program (assign_statement id: (identifier "t") eq: "=" (alternation lhs: (variant_tag expression: (identifier "a") op: "#" name: (identifier "A")) op: "|" rhs: (variant_tag expression: (identifier "b")))))"##
    );
}

#[test]
fn test_sexp_range_with_set() {
    assert_snapshot!(
        sexp(r"s = [\p{L}0-9];"),
        @r#"(program (assign_statement id: (identifier "s") eq: "=" (regex_range (regex_set "\\p{L}") (range_group lo: (range_literal "0") op: "-" hi: (range_literal "9")))))"#
    );
}

#[test]
fn test_treeviz_program() {
    let program = parse_ok("fragment! F; a = ^b;");
    assert_snapshot!(to_treeviz_str(&program).trim_end(), @r"
    ├─ fragment_statement: F
    │ └─ id=identifier: F
    └─ assign_statement: a =
      ├─ id=identifier: a
      ├─ eq=token: =
      └─ unary_prefix: ^
        ├─ prefix=token: ^
        └─ expr=identifier: b
    ");
}
