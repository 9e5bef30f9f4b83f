// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Statement parsing for Rue.
//!
//! `parse_statement` is an ordered choice over the statement alternatives;
//! the first one that parses wins. Because `Labeled` is tried before the
//! expression statement, a bare identifier followed by `:` is always a
//! label. Keywords lex as keyword tokens, so they can never be labels.

use super::super::cst::TreeBuilder;
use super::super::{TokenKind, Tree, TreeKind};
use super::{Parser, RED_ZONE, STACK_SEGMENT};

impl Parser<'_> {
    /// Parses zero or more statements into a `Body` node.
    ///
    /// A body never fails; it simply stops before the first token run that
    /// does not begin a statement.
    pub(super) fn parse_body(&mut self) -> Tree {
        let mut node = TreeBuilder::new(TreeKind::Body, self.cursor_byte());
        while let Some(statement) = self.parse_statement() {
            node.tree(statement);
        }
        node.finish()
    }

    /// Parses a single statement, trying each alternative in order.
    ///
    /// Statements and blocks recurse into each other, so this entry point
    /// grows the stack onto the heap when space runs low.
    pub(super) fn parse_statement(&mut self) -> Option<Tree> {
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || {
            let inner = self
                .parse_labeled_statement()
                .or_else(|| self.parse_field_statement())
                .or_else(|| self.parse_expression_statement())
                .or_else(|| self.parse_def_statement())
                .or_else(|| self.parse_if_statement())
                .or_else(|| self.parse_while_statement())
                .or_else(|| self.parse_match_statement())
                .or_else(|| self.parse_do_statement())
                .or_else(|| self.parse_for_statement())
                .or_else(|| self.parse_return_statement())
                .or_else(|| self.parse_continue_statement())
                .or_else(|| self.parse_break_statement())
                .or_else(|| self.parse_block_statement())
                .or_else(|| self.parse_empty_statement());

            let Some(inner) = inner else {
                return self.fail("Expected statement");
            };
            let mut node = TreeBuilder::new(TreeKind::Statement, inner.span().start());
            node.tree(inner);
            Some(node.finish())
        })
    }

    /// `Labeled := Identifier ':' Statement`
    fn parse_labeled_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let label = p.take(TokenKind::Identifier)?;
            let mut node = TreeBuilder::new(TreeKind::Labeled, label.span().start());
            node.token(label);
            node.token(p.take(TokenKind::Colon)?);
            node.tree(p.parse_statement()?);
            Some(node.finish())
        })
    }

    /// `Field := ('val'|'var') Identifier (':' UnionType)? ('=' AssignmentExpression)? ';'`
    fn parse_field_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let keyword = p.take_any(&[TokenKind::Val, TokenKind::Var])?;
            let mut node = TreeBuilder::new(TreeKind::Field, keyword.span().start());
            node.token(keyword);
            node.token(p.expect(TokenKind::Identifier, "Expected identifier")?);
            if let Some((colon, annotation)) = p.attempt(|p| {
                let colon = p.take(TokenKind::Colon)?;
                let annotation = p.parse_union_type()?;
                Some((colon, annotation))
            }) {
                node.token(colon);
                node.tree(annotation);
            }
            if let Some((assign, value)) = p.attempt(|p| {
                let assign = p.take(TokenKind::Assign)?;
                let value = p.parse_assignment_expression()?;
                Some((assign, value))
            }) {
                node.token(assign);
                node.tree(value);
            }
            node.token(p.expect(TokenKind::Semicolon, "Expected ';'")?);
            Some(node.finish())
        })
    }

    /// `ExprStmt := ExpressionSequence ';'`
    fn parse_expression_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let sequence = p.parse_expression_sequence()?;
            let mut node = TreeBuilder::new(TreeKind::Expression, sequence.span().start());
            node.tree(sequence);
            node.token(p.expect(TokenKind::Semicolon, "Expected ';'")?);
            Some(node.finish())
        })
    }

    /// `Def := 'def' Identifier Parameters (':' UnaryType)? (Block | Empty)`
    fn parse_def_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let keyword = p.take(TokenKind::Def)?;
            let mut node = TreeBuilder::new(TreeKind::Def, keyword.span().start());
            node.token(keyword);
            node.token(p.expect(TokenKind::Identifier, "Expected identifier")?);
            node.tree(p.parse_parameters()?);
            if let Some((colon, annotation)) = p.attempt(|p| {
                let colon = p.take(TokenKind::Colon)?;
                let annotation = p.parse_unary_type()?;
                Some((colon, annotation))
            }) {
                node.token(colon);
                node.tree(annotation);
            }
            let body = p
                .parse_block_statement()
                .or_else(|| p.parse_empty_statement());
            let Some(body) = body else {
                return p.fail("Expected block or ';'");
            };
            node.tree(body);
            Some(node.finish())
        })
    }

    /// `Parameters := '(' ( Parameter (',' Parameter)* )? ')'`
    fn parse_parameters(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let open = p.expect(TokenKind::OpenParenthesis, "Expected '('")?;
            let mut node = TreeBuilder::new(TreeKind::Parameters, open.span().start());
            node.token(open);
            if let Some(close) = p.take(TokenKind::CloseParenthesis) {
                node.token(close);
                return Some(node.finish());
            }
            node.tree(p.parse_parameter()?);
            while let Some((comma, parameter)) = p.attempt(|p| {
                let comma = p.take(TokenKind::Comma)?;
                let parameter = p.parse_parameter()?;
                Some((comma, parameter))
            }) {
                node.token(comma);
                node.tree(parameter);
            }
            node.token(p.expect(TokenKind::CloseParenthesis, "Expected ')'")?);
            Some(node.finish())
        })
    }

    /// `Parameter := Identifier ':' UnaryType | '...'`
    fn parse_parameter(&mut self) -> Option<Tree> {
        if let Some(parameter) = self.attempt(|p| {
            let name = p.take(TokenKind::Identifier)?;
            let mut node = TreeBuilder::new(TreeKind::Parameter, name.span().start());
            node.token(name);
            node.token(p.expect(TokenKind::Colon, "Expected ':'")?);
            node.tree(p.parse_unary_type()?);
            Some(node.finish())
        }) {
            return Some(parameter);
        }
        if let Some(ellipsis) = self.take(TokenKind::Ellipsis) {
            let mut node = TreeBuilder::new(TreeKind::Parameter, ellipsis.span().start());
            node.token(ellipsis);
            return Some(node.finish());
        }
        self.fail("Expected parameter")
    }

    /// `If := 'if' '(' ExpressionSequence ')' Statement ('else' Statement)?`
    ///
    /// The optional else clause binds to the innermost `if`, because the
    /// inner statement gets first shot at the `else` token.
    fn parse_if_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let keyword = p.take(TokenKind::If)?;
            let mut node = TreeBuilder::new(TreeKind::If, keyword.span().start());
            node.token(keyword);
            node.token(p.expect(TokenKind::OpenParenthesis, "Expected '('")?);
            node.tree(p.parse_expression_sequence()?);
            node.token(p.expect(TokenKind::CloseParenthesis, "Expected ')'")?);
            node.tree(p.parse_statement()?);
            if let Some((else_keyword, alternative)) = p.attempt(|p| {
                let else_keyword = p.take(TokenKind::Else)?;
                let alternative = p.parse_statement()?;
                Some((else_keyword, alternative))
            }) {
                node.token(else_keyword);
                node.tree(alternative);
            }
            Some(node.finish())
        })
    }

    /// `While := 'while' '(' ExpressionSequence ')' Statement`
    fn parse_while_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let keyword = p.take(TokenKind::While)?;
            let mut node = TreeBuilder::new(TreeKind::While, keyword.span().start());
            node.token(keyword);
            node.token(p.expect(TokenKind::OpenParenthesis, "Expected '('")?);
            node.tree(p.parse_expression_sequence()?);
            node.token(p.expect(TokenKind::CloseParenthesis, "Expected ')'")?);
            node.tree(p.parse_statement()?);
            Some(node.finish())
        })
    }

    /// `Do := 'do' Statement 'while' '(' ExpressionSequence ')'`
    fn parse_do_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let keyword = p.take(TokenKind::Do)?;
            let mut node = TreeBuilder::new(TreeKind::Do, keyword.span().start());
            node.token(keyword);
            node.tree(p.parse_statement()?);
            node.token(p.expect(TokenKind::While, "Expected 'while'")?);
            node.token(p.expect(TokenKind::OpenParenthesis, "Expected '('")?);
            node.tree(p.parse_expression_sequence()?);
            node.token(p.expect(TokenKind::CloseParenthesis, "Expected ')'")?);
            Some(node.finish())
        })
    }

    /// `For := 'for' '(' Identifier 'in' AssignmentExpression ')' Statement`
    fn parse_for_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let keyword = p.take(TokenKind::For)?;
            let mut node = TreeBuilder::new(TreeKind::For, keyword.span().start());
            node.token(keyword);
            node.token(p.expect(TokenKind::OpenParenthesis, "Expected '('")?);
            node.token(p.expect(TokenKind::Identifier, "Expected identifier")?);
            node.token(p.expect(TokenKind::In, "Expected 'in'")?);
            node.tree(p.parse_assignment_expression()?);
            node.token(p.expect(TokenKind::CloseParenthesis, "Expected ')'")?);
            node.tree(p.parse_statement()?);
            Some(node.finish())
        })
    }

    /// `Return := 'return' ExpressionSequence? ';'`
    fn parse_return_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let keyword = p.take(TokenKind::Return)?;
            let mut node = TreeBuilder::new(TreeKind::Return, keyword.span().start());
            node.token(keyword);
            if let Some(value) = p.parse_expression_sequence() {
                node.tree(value);
            }
            node.token(p.expect(TokenKind::Semicolon, "Expected ';'")?);
            Some(node.finish())
        })
    }

    /// `Continue := 'continue' Identifier? ';'`
    fn parse_continue_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let keyword = p.take(TokenKind::Continue)?;
            let mut node = TreeBuilder::new(TreeKind::Continue, keyword.span().start());
            node.token(keyword);
            if let Some(label) = p.take(TokenKind::Identifier) {
                node.token(label);
            }
            node.token(p.expect(TokenKind::Semicolon, "Expected ';'")?);
            Some(node.finish())
        })
    }

    /// `Break := 'break' Identifier? ';'`
    fn parse_break_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let keyword = p.take(TokenKind::Break)?;
            let mut node = TreeBuilder::new(TreeKind::Break, keyword.span().start());
            node.token(keyword);
            if let Some(label) = p.take(TokenKind::Identifier) {
                node.token(label);
            }
            node.token(p.expect(TokenKind::Semicolon, "Expected ';'")?);
            Some(node.finish())
        })
    }

    /// `Block := '{' Statement* '}'`
    pub(super) fn parse_block_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let open = p.take(TokenKind::OpenBrace)?;
            let mut node = TreeBuilder::new(TreeKind::Block, open.span().start());
            node.token(open);
            while let Some(statement) = p.parse_statement() {
                node.tree(statement);
            }
            node.token(p.expect(TokenKind::CloseBrace, "Expected '}'")?);
            Some(node.finish())
        })
    }

    /// `Empty := ';'`
    pub(super) fn parse_empty_statement(&mut self) -> Option<Tree> {
        let semicolon = self.take(TokenKind::Semicolon)?;
        let mut node = TreeBuilder::new(TreeKind::Empty, semicolon.span().start());
        node.token(semicolon);
        Some(node.finish())
    }

    /// `Match := 'match' '(' ExpressionSequence ')' '{' MatchOption* Body? '}'`
    ///
    /// The fallback body is relaxed: zero or more options, then whatever
    /// statements remain before the closing brace. An empty fallback is
    /// omitted from the children.
    fn parse_match_statement(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let keyword = p.take(TokenKind::Match)?;
            let mut node = TreeBuilder::new(TreeKind::Match, keyword.span().start());
            node.token(keyword);
            node.token(p.expect(TokenKind::OpenParenthesis, "Expected '('")?);
            node.tree(p.parse_expression_sequence()?);
            node.token(p.expect(TokenKind::CloseParenthesis, "Expected ')'")?);
            node.token(p.expect(TokenKind::OpenBrace, "Expected '{'")?);
            while let Some(option) = p.parse_match_option() {
                node.tree(option);
            }
            let fallback = p.parse_body();
            if !fallback.children().is_empty() {
                node.tree(fallback);
            }
            node.token(p.expect(TokenKind::CloseBrace, "Expected '}'")?);
            Some(node.finish())
        })
    }

    /// `MatchOption := AssignmentExpression '=>' Statement`
    fn parse_match_option(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let pattern = p.parse_assignment_expression()?;
            let mut node = TreeBuilder::new(TreeKind::MatchOption, pattern.span().start());
            node.tree(pattern);
            node.token(p.take(TokenKind::FatArrow)?);
            node.tree(p.parse_statement()?);
            Some(node.finish())
        })
    }
}
