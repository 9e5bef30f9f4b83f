// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for Rue.
//!
//! The expression grammar is thirteen precedence tiers, descending:
//! sequence, assignment, ternary, coalesce, logical or/and, bitwise
//! or/xor/and, equality, comparison, shift, term, factor, range, unary,
//! reference. Most tiers are plain left-associative operator lists and
//! share [`Parser::parse_left_assoc`]; assignment and ternary admit a
//! single operator application, and range allows either side to be absent.
//!
//! A tier that matches no operator returns its operand unwrapped, so the
//! tree for `1` is a single `LiteralValue` rather than a thirteen-deep
//! chain of tier nodes.

use super::super::cst::TreeBuilder;
use super::super::{TokenKind, Tree, TreeKind};
use super::{Parser, RED_ZONE, STACK_SEGMENT};

/// Operators consumed by the comparison tier together with a shift operand.
const COMPARISON_OPERATORS: &[TokenKind] = &[
    TokenKind::LessThanOrEqual,
    TokenKind::GreaterThanOrEqual,
    TokenKind::LessThan,
    TokenKind::GreaterThan,
    TokenKind::In,
];

/// Prefix operators consumed by the unary tier.
const UNARY_OPERATORS: &[TokenKind] = &[
    TokenKind::Not,
    TokenKind::Tilde,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Ampersand,
];

impl Parser<'_> {
    /// `ExpressionSequence := AssignmentExpression (',' AssignmentExpression)*`
    pub(super) fn parse_expression_sequence(&mut self) -> Option<Tree> {
        self.parse_left_assoc(
            TreeKind::ExpressionSequence,
            &[TokenKind::Comma],
            Self::parse_assignment_expression,
        )
    }

    /// `AssignmentExpression := TernaryExpression (AssignOp TernaryExpression)?`
    ///
    /// One assignment step only: the right-hand side is a ternary, so
    /// `a = b = c` fails at the second `=`. The expression grammar recurses
    /// through here, so this entry point grows the stack onto the heap when
    /// space runs low.
    pub(super) fn parse_assignment_expression(&mut self) -> Option<Tree> {
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || {
            self.attempt(|p| {
                let target = p.parse_ternary_expression()?;
                let mut node = TreeBuilder::new(TreeKind::Assignment, target.span().start());
                node.tree(target);
                if let Some((operator, value)) = p.attempt(|p| {
                    let operator = p.take_if(TokenKind::is_assignment_operator)?;
                    let value = p.parse_ternary_expression()?;
                    Some((operator, value))
                }) {
                    node.token(operator);
                    node.tree(value);
                    return Some(node.finish());
                }
                Some(node.collapse())
            })
        })
    }

    /// `TernaryExpression := CoalesceExpression ('?' AssignmentExpression ':' AssignmentExpression)?`
    fn parse_ternary_expression(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let condition = p.parse_coalesce_expression()?;
            let mut node = TreeBuilder::new(TreeKind::Ternary, condition.span().start());
            node.tree(condition);
            if let Some((question, consequent, colon, alternative)) = p.attempt(|p| {
                let question = p.take(TokenKind::Question)?;
                let consequent = p.parse_assignment_expression()?;
                let colon = p.expect(TokenKind::Colon, "Expected ':'")?;
                let alternative = p.parse_assignment_expression()?;
                Some((question, consequent, colon, alternative))
            }) {
                node.token(question);
                node.tree(consequent);
                node.token(colon);
                node.tree(alternative);
                return Some(node.finish());
            }
            Some(node.collapse())
        })
    }

    /// `CoalesceExpression := LogicalOr ('?:' LogicalOr)*`
    fn parse_coalesce_expression(&mut self) -> Option<Tree> {
        self.parse_left_assoc(
            TreeKind::Coalesce,
            &[TokenKind::QuestionColon],
            Self::parse_logical_or,
        )
    }

    /// `LogicalOr := LogicalAnd ('or' LogicalAnd)*`
    fn parse_logical_or(&mut self) -> Option<Tree> {
        self.parse_left_assoc(TreeKind::LogicalOr, &[TokenKind::Or], Self::parse_logical_and)
    }

    /// `LogicalAnd := BitwiseOr ('and' BitwiseOr)*`
    fn parse_logical_and(&mut self) -> Option<Tree> {
        self.parse_left_assoc(TreeKind::LogicalAnd, &[TokenKind::And], Self::parse_bitwise_or)
    }

    /// `BitwiseOr := BitwiseXor ('|' BitwiseXor)*`
    fn parse_bitwise_or(&mut self) -> Option<Tree> {
        self.parse_left_assoc(TreeKind::BitwiseOr, &[TokenKind::Pipe], Self::parse_bitwise_xor)
    }

    /// `BitwiseXor := BitwiseAnd ('^' BitwiseAnd)*`
    fn parse_bitwise_xor(&mut self) -> Option<Tree> {
        self.parse_left_assoc(TreeKind::BitwiseXor, &[TokenKind::Caret], Self::parse_bitwise_and)
    }

    /// `BitwiseAnd := Equality ('&' Equality)*`
    fn parse_bitwise_and(&mut self) -> Option<Tree> {
        self.parse_left_assoc(TreeKind::BitwiseAnd, &[TokenKind::Ampersand], Self::parse_equality)
    }

    /// `Equality := Comparison (('=='|'!=') Comparison)*`
    fn parse_equality(&mut self) -> Option<Tree> {
        self.parse_left_assoc(
            TreeKind::Equality,
            &[TokenKind::Equal, TokenKind::NotEqual],
            Self::parse_comparison,
        )
    }

    /// `Comparison := Shift (CompareOp Shift | ('as'|'is') UnaryType)*`
    ///
    /// The `as`/`is` arms take a *type* operand, so this tier cannot use
    /// the shared left-associative helper.
    fn parse_comparison(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let first = p.parse_shift()?;
            let mut node = TreeBuilder::new(TreeKind::Comparison, first.span().start());
            node.tree(first);
            loop {
                if let Some((operator, operand)) = p.attempt(|p| {
                    let operator = p.take_any(COMPARISON_OPERATORS)?;
                    let operand = p.parse_shift()?;
                    Some((operator, operand))
                }) {
                    node.token(operator);
                    node.tree(operand);
                    continue;
                }
                if let Some((operator, operand)) = p.attempt(|p| {
                    let operator = p.take_any(&[TokenKind::As, TokenKind::Is])?;
                    let operand = p.parse_unary_type()?;
                    Some((operator, operand))
                }) {
                    node.token(operator);
                    node.tree(operand);
                    continue;
                }
                break;
            }
            Some(node.collapse())
        })
    }

    /// `Shift := Term (('<<'|'>>'|'>>>') Term)*`
    fn parse_shift(&mut self) -> Option<Tree> {
        self.parse_left_assoc(
            TreeKind::Shift,
            &[
                TokenKind::LeftShift,
                TokenKind::RightShift,
                TokenKind::UnsignedRightShift,
            ],
            Self::parse_term,
        )
    }

    /// `Term := Factor (('+'|'-') Factor)*`
    fn parse_term(&mut self) -> Option<Tree> {
        self.parse_left_assoc(
            TreeKind::Term,
            &[TokenKind::Plus, TokenKind::Minus],
            Self::parse_factor,
        )
    }

    /// `Factor := Range (('*'|'/'|'%') Range)*`
    fn parse_factor(&mut self) -> Option<Tree> {
        self.parse_left_assoc(
            TreeKind::Factor,
            &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
            Self::parse_range_expression,
        )
    }

    /// `Range := Unary? (('..'|'...') Unary?)?`
    ///
    /// Either side may be absent, but a range that matches nothing at all is
    /// a failure, not an empty node.
    fn parse_range_expression(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let at = p.cursor_byte();
            let lower = p.parse_unary_expression();
            let operator = p.take_any(&[TokenKind::DotDot, TokenKind::Ellipsis]);
            match (lower, operator) {
                (Some(lower), None) => Some(lower),
                (None, None) => p.fail("Expected expression"),
                (lower, Some(operator)) => {
                    let mut node = TreeBuilder::new(TreeKind::Range, at);
                    if let Some(lower) = lower {
                        node.tree(lower);
                    }
                    node.token(operator);
                    if let Some(upper) = p.parse_unary_expression() {
                        node.tree(upper);
                    }
                    Some(node.finish())
                }
            }
        })
    }

    /// `Unary := ('not'|'~'|'+'|'-'|'*'|'&')* Reference`
    fn parse_unary_expression(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let at = p.cursor_byte();
            let mut operators = Vec::new();
            while let Some(operator) = p.take_any(UNARY_OPERATORS) {
                operators.push(operator);
            }
            let reference = p.parse_reference()?;
            if operators.is_empty() {
                return Some(reference);
            }
            let mut node = TreeBuilder::new(TreeKind::Unary, at);
            for operator in operators {
                node.token(operator);
            }
            node.tree(reference);
            Some(node.finish())
        })
    }

    /// `Reference := LiteralValue (PropertyAccess | OptionalAccess | ArrayIndex | Call)*`
    fn parse_reference(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let base = p.parse_literal_value()?;
            let mut node = TreeBuilder::new(TreeKind::Reference, base.span().start());
            node.tree(base);
            loop {
                if let Some(access) = p.parse_property_access() {
                    node.tree(access);
                    continue;
                }
                if let Some(access) = p.parse_optional_access() {
                    node.tree(access);
                    continue;
                }
                if let Some(index) = p.parse_array_index() {
                    node.tree(index);
                    continue;
                }
                if let Some(call) = p.parse_method_call() {
                    node.tree(call);
                    continue;
                }
                break;
            }
            Some(node.collapse())
        })
    }

    /// `PropertyAccess := '.' Identifier`
    fn parse_property_access(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let dot = p.take(TokenKind::Dot)?;
            let mut node = TreeBuilder::new(TreeKind::PropertyAccess, dot.span().start());
            node.token(dot);
            node.token(p.expect(TokenKind::Identifier, "Expected identifier")?);
            Some(node.finish())
        })
    }

    /// `OptionalAccess := '?.' (Identifier | ArrayIndex | Call)`
    fn parse_optional_access(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let question_dot = p.take(TokenKind::QuestionDot)?;
            let mut node =
                TreeBuilder::new(TreeKind::OptionalPropertyAccess, question_dot.span().start());
            node.token(question_dot);
            if let Some(name) = p.take(TokenKind::Identifier) {
                node.token(name);
                return Some(node.finish());
            }
            if let Some(index) = p.parse_array_index() {
                node.tree(index);
                return Some(node.finish());
            }
            if let Some(call) = p.parse_method_call() {
                node.tree(call);
                return Some(node.finish());
            }
            p.fail("Expected identifier, index, or call")
        })
    }

    /// `ArrayIndex := '[' ExpressionSequence ']'`
    fn parse_array_index(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let open = p.take(TokenKind::OpenBracket)?;
            let mut node = TreeBuilder::new(TreeKind::ArrayIndex, open.span().start());
            node.token(open);
            node.tree(p.parse_expression_sequence()?);
            node.token(p.expect(TokenKind::CloseBracket, "Expected ']'")?);
            Some(node.finish())
        })
    }

    /// `Call := '(' ( Arg (',' Arg)* )? ')'`
    fn parse_method_call(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let open = p.take(TokenKind::OpenParenthesis)?;
            let mut node = TreeBuilder::new(TreeKind::MethodCall, open.span().start());
            node.token(open);
            if let Some(close) = p.take(TokenKind::CloseParenthesis) {
                node.token(close);
                return Some(node.finish());
            }
            node.tree(p.parse_method_call_argument()?);
            while let Some((comma, argument)) = p.attempt(|p| {
                let comma = p.take(TokenKind::Comma)?;
                let argument = p.parse_method_call_argument()?;
                Some((comma, argument))
            }) {
                node.token(comma);
                node.tree(argument);
            }
            node.token(p.expect(TokenKind::CloseParenthesis, "Expected ')'")?);
            Some(node.finish())
        })
    }

    /// A single call argument, wrapped in its own node.
    fn parse_method_call_argument(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let value = p.parse_assignment_expression()?;
            let mut node = TreeBuilder::new(TreeKind::MethodCallArgument, value.span().start());
            node.tree(value);
            Some(node.finish())
        })
    }

    /// `ArrayInitializer := '[' ( Value (',' Value)* )? ']'`
    fn parse_array_initializer(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let open = p.take(TokenKind::OpenBracket)?;
            let mut node = TreeBuilder::new(TreeKind::ArrayInitializer, open.span().start());
            node.token(open);
            if let Some(close) = p.take(TokenKind::CloseBracket) {
                node.token(close);
                return Some(node.finish());
            }
            node.tree(p.parse_array_value()?);
            while let Some((comma, value)) = p.attempt(|p| {
                let comma = p.take(TokenKind::Comma)?;
                let value = p.parse_array_value()?;
                Some((comma, value))
            }) {
                node.token(comma);
                node.tree(value);
            }
            node.token(p.expect(TokenKind::CloseBracket, "Expected ']'")?);
            Some(node.finish())
        })
    }

    /// A single array element, wrapped in its own node.
    fn parse_array_value(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let value = p.parse_assignment_expression()?;
            let mut node = TreeBuilder::new(TreeKind::ArrayValue, value.span().start());
            node.tree(value);
            Some(node.finish())
        })
    }

    /// `LiteralValue := ArrayInitializer | atom | Cast | '(' ExpressionSequence ')'`
    ///
    /// The cast is attempted after the atoms but before the parenthesized
    /// fallback: `(int)x` parses as a cast, `(x)` backtracks out of the cast
    /// attempt and lands on the parenthesized sequence.
    fn parse_literal_value(&mut self) -> Option<Tree> {
        if let Some(initializer) = self.parse_array_initializer() {
            return Some(initializer);
        }
        if let Some(atom) = self.take_if(TokenKind::is_literal_atom) {
            let mut node = TreeBuilder::new(TreeKind::LiteralValue, atom.span().start());
            node.token(atom);
            return Some(node.finish());
        }
        if let Some(cast) = self.parse_type_cast() {
            return Some(cast);
        }
        if let Some(parenthesized) = self.parse_parenthesized() {
            return Some(parenthesized);
        }
        self.fail("Expected expression")
    }

    /// `Cast := '(' UnaryType ')' LiteralValue`
    fn parse_type_cast(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let open = p.take(TokenKind::OpenParenthesis)?;
            let mut node = TreeBuilder::new(TreeKind::TypeCast, open.span().start());
            node.token(open);
            node.tree(p.parse_unary_type()?);
            node.token(p.take(TokenKind::CloseParenthesis)?);
            node.tree(p.parse_literal_value()?);
            Some(node.finish())
        })
    }

    /// `'(' ExpressionSequence ')'`
    fn parse_parenthesized(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let open = p.take(TokenKind::OpenParenthesis)?;
            let mut node = TreeBuilder::new(TreeKind::LiteralValue, open.span().start());
            node.token(open);
            node.tree(p.parse_expression_sequence()?);
            node.token(p.expect(TokenKind::CloseParenthesis, "Expected ')'")?);
            Some(node.finish())
        })
    }

    /// Parses `operand (operator operand)*` for a left-associative tier.
    ///
    /// When at least one operator matches, the children form a flat
    /// `[operand, operator, operand, ...]` list under a node of `kind`;
    /// otherwise the single operand is returned unwrapped.
    fn parse_left_assoc(
        &mut self,
        kind: TreeKind,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> Option<Tree>,
    ) -> Option<Tree> {
        self.attempt(|p| {
            let first = operand(p)?;
            let mut node = TreeBuilder::new(kind, first.span().start());
            node.tree(first);
            while let Some((operator, next)) = p.attempt(|p| {
                let operator = p.take_any(operators)?;
                let next = operand(p)?;
                Some((operator, next))
            }) {
                node.token(operator);
                node.tree(next);
            }
            Some(node.collapse())
        })
    }
}
