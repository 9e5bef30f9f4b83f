// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the Rue parser.
//!
//! These tests use `proptest` to verify parser invariants over generated
//! inputs:
//!
//! 1. **Parser never panics** — any token stream the lexer accepts parses
//!    to a tree or an error, never a crash
//! 2. **Tree spans nest** — every node's span covers its children
//! 3. **Parsing is deterministic** — same input, same tree, same rendering
//! 4. **Valid programs parse** — known-valid statements produce a tree
//! 5. **Errors point into the input** — a parse error's span never escapes
//!    the source

use proptest::prelude::*;

use super::super::{Tree, lex, stringify};
use super::parse;

// ============================================================================
// Generators
// ============================================================================

/// Known-valid statements that should parse without errors.
const VALID_STATEMENTS: &[&str] = &[
    "val x = 5;",
    "var y: int | string = a;",
    "x += 1;",
    "a.b?.c[0](x, y);",
    "def f(a: int, b: int): int { return a + b; }",
    "def log(...);",
    "if (a > 0) { x += 1; } else { x -= 1; }",
    "while (a) x;",
    "do x; while (a)",
    "for (item in items) { }",
    "match (n) { 1 => a; 2 => b; c; }",
    "again: continue again;",
    "return 1..5;",
    "(int)x;",
    "(x);",
    "not a and b or c;",
    "x = a ? b : c;",
    "a ?: b;",
    ";",
    "{ }",
];

fn valid_statement() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_STATEMENTS).prop_map(std::string::ToString::to_string)
}

/// A small program: a few valid statements joined together.
fn valid_program() -> impl Strategy<Value = String> {
    prop::collection::vec(valid_statement(), 0..5).prop_map(|statements| statements.join("\n"))
}

// ============================================================================
// Helpers
// ============================================================================

/// Asserts that every node's span covers its children, recursively.
fn assert_spans_nest(tree: &Tree) {
    let span = tree.span();
    assert!(span.start() <= span.end(), "inverted span {span:?}");
    if let Some(first) = tree.children().first() {
        assert!(
            span.start() <= first.span().start(),
            "node {:?} starts after its first child",
            tree.kind(),
        );
    }
    if let Some(last) = tree.children().last() {
        assert!(
            last.span().end() <= span.end(),
            "node {:?} ends before its last child",
            tree.kind(),
        );
    }
    for window in tree.children().windows(2) {
        assert!(
            window[0].span().end() <= window[1].span().start(),
            "children of {:?} out of source order",
            tree.kind(),
        );
    }
    for child in tree.child_trees() {
        assert_spans_nest(child);
    }
}

// ============================================================================
// Property tests
// ============================================================================

/// Default is 256 cases; override via `PROPTEST_CASES` env var for nightly runs.
fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(256),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: The parser never panics on anything the lexer accepts.
    #[test]
    fn parser_never_panics(input in "\\PC{0,300}") {
        let Ok(tokens) = lex(&input) else { return Ok(()) };
        let _result = parse(&tokens, &input);
    }

    /// Property 2: Tree spans cover their children on every parse.
    #[test]
    fn tree_spans_nest(input in valid_program()) {
        let tokens = lex(&input).expect("valid programs lex");
        let tree = parse(&tokens, &input).expect("valid programs parse");
        assert_spans_nest(&tree);
    }

    /// Property 3: Parsing and rendering are deterministic.
    #[test]
    fn parse_deterministic(input in valid_program()) {
        let tokens = lex(&input).expect("valid programs lex");
        let first = parse(&tokens, &input).expect("valid programs parse");
        let second = parse(&tokens, &input).expect("valid programs parse");
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(stringify(&first), stringify(&second));
    }

    /// Property 4: Known-valid statements parse.
    #[test]
    fn valid_statements_parse(input in valid_statement()) {
        let tokens = lex(&input).expect("valid statements lex");
        let result = parse(&tokens, &input);
        prop_assert!(result.is_ok(), "{:?} failed: {:?}", input, result.err());
    }

    /// Property 5: Parse error spans stay within the source.
    #[test]
    fn error_spans_stay_in_bounds(input in "\\PC{0,300}") {
        let Ok(tokens) = lex(&input) else { return Ok(()) };
        if let Err(error) = parse(&tokens, &input) {
            let len = u32::try_from(input.len()).unwrap_or(u32::MAX);
            prop_assert!(
                error.span.start() <= len && error.span.end() <= len,
                "error span {:?} escapes input of length {}",
                error.span,
                len,
            );
        }
    }
}
