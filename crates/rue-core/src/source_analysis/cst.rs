// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The concrete syntax tree.
//!
//! Unlike an abstract syntax tree, the CST retains every source token: a
//! [`Tree`] node's children are an ordered mix of tokens and sub-trees
//! ([`Child`]), so the original token sequence can be recovered by an
//! in-order walk. Ownership is strictly hierarchical: parents own their
//! children, there is no sharing and there are no cycles.

use super::{Span, Token};

/// The grammar production a tree node was built by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "variant names mirror the grammar productions")]
pub enum TreeKind {
    // Top level and statements
    Body,
    Statement,
    Labeled,
    Field,
    Block,
    If,
    Match,
    Def,
    While,
    Do,
    For,
    Return,
    Continue,
    Break,
    Expression,
    Empty,
    // Expressions, one kind per precedence tier
    ExpressionSequence,
    Assignment,
    Ternary,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Comparison,
    Shift,
    Term,
    Factor,
    Range,
    Unary,
    Reference,
    // Types
    UnionType,
    IntersectionType,
    ArrayType,
    GenericType,
    UnaryType,
    // Structural
    OptionalPropertyAccess,
    PropertyAccess,
    MatchOption,
    ArrayIndex,
    Parameters,
    Parameter,
    ArrayInitializer,
    ArrayValue,
    TypeCast,
    MethodCall,
    MethodCallArgument,
    LiteralValue,
}

/// A child of a [`Tree`] node: either a source token or a sub-tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// A leaf: a single source token.
    Token(Token),
    /// An interior node.
    Tree(Tree),
}

impl Child {
    /// Returns the source span of this child.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Token(token) => token.span(),
            Self::Tree(tree) => tree.span(),
        }
    }

    /// Returns the sub-tree, if this child is one.
    #[must_use]
    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::Token(_) => None,
        }
    }

    /// Returns the token, if this child is one.
    #[must_use]
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Token(token) => Some(token),
            Self::Tree(_) => None,
        }
    }
}

/// A node of the concrete syntax tree.
///
/// The span covers all children: `start` is the first child's start (or the
/// parse cursor position for an empty node), `end` is the last child's end.
/// Children appear in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    kind: TreeKind,
    span: Span,
    children: Vec<Child>,
}

impl Tree {
    /// Returns the production kind of this node.
    #[must_use]
    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    /// Returns the source span covered by this node.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the children of this node, in source order.
    #[must_use]
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Iterates over the sub-tree children, skipping tokens.
    pub fn child_trees(&self) -> impl Iterator<Item = &Tree> {
        self.children.iter().filter_map(Child::as_tree)
    }

    /// Iterates over the token children, skipping sub-trees.
    pub fn child_tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(Child::as_token)
    }
}

/// Incrementally builds a [`Tree`] while a production consumes its children.
///
/// The builder records the cursor byte position at production entry so that
/// an empty node still gets a well-defined (empty) span there.
#[derive(Debug)]
pub(super) struct TreeBuilder {
    kind: TreeKind,
    at: u32,
    children: Vec<Child>,
}

impl TreeBuilder {
    /// Starts a node of the given kind at the given cursor byte position.
    pub(super) fn new(kind: TreeKind, at: u32) -> Self {
        Self {
            kind,
            at,
            children: Vec::new(),
        }
    }

    /// Appends a token child.
    pub(super) fn token(&mut self, token: Token) {
        self.children.push(Child::Token(token));
    }

    /// Appends a sub-tree child.
    pub(super) fn tree(&mut self, tree: Tree) {
        self.children.push(Child::Tree(tree));
    }

    /// Finishes the node, deriving its span from the children.
    pub(super) fn finish(self) -> Tree {
        let start = self.children.first().map_or(self.at, |c| c.span().start());
        let end = self.children.last().map_or(start, |c| c.span().end());
        Tree {
            kind: self.kind,
            span: Span::new(start, end),
            children: self.children,
        }
    }

    /// Finishes the node, collapsing a single sub-tree child to itself.
    ///
    /// The layered expression productions use this so that a tier without an
    /// operator contributes no node of its own.
    pub(super) fn collapse(mut self) -> Tree {
        if self.children.len() == 1 && matches!(self.children[0], Child::Tree(_)) {
            let Some(Child::Tree(tree)) = self.children.pop() else {
                unreachable!("checked above");
            };
            return tree;
        }
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::TokenKind;
    use super::*;

    fn token(text: &str, start: u32) -> Token {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "test inputs are tiny"
        )]
        let end = start + text.len() as u32;
        Token::new(TokenKind::Identifier, text, Span::new(start, end))
    }

    #[test]
    fn builder_span_covers_children() {
        let mut builder = TreeBuilder::new(TreeKind::Body, 0);
        builder.token(token("a", 2));
        builder.token(token("bc", 4));
        let tree = builder.finish();

        assert_eq!(tree.kind(), TreeKind::Body);
        assert_eq!(tree.span(), Span::new(2, 6));
        assert_eq!(tree.children().len(), 2);
    }

    #[test]
    fn builder_empty_node_uses_entry_position() {
        let tree = TreeBuilder::new(TreeKind::Body, 9).finish();
        assert_eq!(tree.span(), Span::new(9, 9));
        assert!(tree.children().is_empty());
    }

    #[test]
    fn collapse_unwraps_single_subtree() {
        let mut inner = TreeBuilder::new(TreeKind::LiteralValue, 0);
        inner.token(token("x", 0));
        let inner = inner.finish();

        let mut outer = TreeBuilder::new(TreeKind::Term, 0);
        outer.tree(inner.clone());
        assert_eq!(outer.collapse(), inner);
    }

    #[test]
    fn collapse_keeps_single_token_child() {
        let mut builder = TreeBuilder::new(TreeKind::UnaryType, 0);
        builder.token(token("T", 0));
        let tree = builder.collapse();
        assert_eq!(tree.kind(), TreeKind::UnaryType);
        assert_eq!(tree.children().len(), 1);
    }

    #[test]
    fn child_accessors() {
        let leaf = Child::Token(token("x", 1));
        assert!(leaf.as_token().is_some());
        assert!(leaf.as_tree().is_none());
        assert_eq!(leaf.span(), Span::new(1, 2));
    }
}
