// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Debug pretty-printing for trees and token streams.
//!
//! The output is line-oriented and deterministic, intended for snapshotting
//! parser behavior in tests and for human inspection. Nodes with exactly one
//! child collapse to that child, so the unwrapped expression tiers never
//! produce noise.

use super::{Child, Token, Tree};

/// Formats a tree for debugging.
///
/// Each node prints as `Kind (start-end)` with its children indented two
/// spaces per level; tokens print as `Kind "text" (start-end)`. A node with
/// exactly one child prints as that child at the same depth.
///
/// # Examples
///
/// ```
/// use rue_core::source_analysis::{lex, parse, stringify};
///
/// let source = "val x = 5;";
/// let tokens = lex(source).unwrap();
/// let tree = parse(&tokens, source).unwrap();
/// assert!(stringify(&tree).starts_with("Field (0-10)"));
/// ```
#[must_use]
pub fn stringify(tree: &Tree) -> String {
    let mut lines = Vec::new();
    push_tree(&mut lines, tree, 0);
    lines.join("\n")
}

/// Formats a token stream for debugging, one token per line.
#[must_use]
pub fn stringify_tokens(tokens: &[Token]) -> String {
    let lines: Vec<String> = tokens.iter().map(|token| token_line(token, 0)).collect();
    lines.join("\n")
}

fn push_tree(lines: &mut Vec<String>, tree: &Tree, depth: usize) {
    if let [only] = tree.children() {
        push_child(lines, only, depth);
        return;
    }
    lines.push(format!(
        "{:indent$}{:?} ({}-{})",
        "",
        tree.kind(),
        tree.span().start(),
        tree.span().end(),
        indent = depth * 2
    ));
    for child in tree.children() {
        push_child(lines, child, depth + 1);
    }
}

fn push_child(lines: &mut Vec<String>, child: &Child, depth: usize) {
    match child {
        Child::Token(token) => lines.push(token_line(token, depth)),
        Child::Tree(tree) => push_tree(lines, tree, depth),
    }
}

fn token_line(token: &Token, depth: usize) -> String {
    format!(
        "{:indent$}{:?} {:?} ({}-{})",
        "",
        token.kind(),
        token.text(),
        token.span().start(),
        token.span().end(),
        indent = depth * 2
    )
}
