// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Type grammar parsing for Rue.
//!
//! Types appear in field annotations, def signatures, parameters, casts,
//! and the `as`/`is` comparison arms:
//!
//! ```text
//! UnionType        := IntersectionType ('|' IntersectionType)*
//! IntersectionType := UnaryType ('&' UnaryType)*
//! UnaryType        := TypeBase (GenericType | ArrayType | '*' | '?')*
//! GenericType      := '<' UnionType (',' UnionType)* '>'
//! ArrayType        := '[' ']'
//! ```
//!
//! A union or intersection of one member returns that member unwrapped; a
//! `UnaryType` is always a node, even for a bare base, because its base is
//! a token rather than a tree.

use super::super::cst::TreeBuilder;
use super::super::{TokenKind, Tree, TreeKind};
use super::Parser;

impl Parser<'_> {
    /// `UnionType := IntersectionType ('|' IntersectionType)*`
    pub(super) fn parse_union_type(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let first = p.parse_intersection_type()?;
            let mut node = TreeBuilder::new(TreeKind::UnionType, first.span().start());
            node.tree(first);
            while let Some((pipe, member)) = p.attempt(|p| {
                let pipe = p.take(TokenKind::Pipe)?;
                let member = p.parse_intersection_type()?;
                Some((pipe, member))
            }) {
                node.token(pipe);
                node.tree(member);
            }
            Some(node.collapse())
        })
    }

    /// `IntersectionType := UnaryType ('&' UnaryType)*`
    fn parse_intersection_type(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let first = p.parse_unary_type()?;
            let mut node = TreeBuilder::new(TreeKind::IntersectionType, first.span().start());
            node.tree(first);
            while let Some((ampersand, member)) = p.attempt(|p| {
                let ampersand = p.take(TokenKind::Ampersand)?;
                let member = p.parse_unary_type()?;
                Some((ampersand, member))
            }) {
                node.token(ampersand);
                node.tree(member);
            }
            Some(node.collapse())
        })
    }

    /// `UnaryType := TypeBase (GenericType | ArrayType | '*' | '?')*`
    pub(super) fn parse_unary_type(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let Some(base) = p.take_if(TokenKind::is_type_base) else {
                return p.fail("Expected type");
            };
            let mut node = TreeBuilder::new(TreeKind::UnaryType, base.span().start());
            node.token(base);
            loop {
                if let Some(generic) = p.parse_generic_type() {
                    node.tree(generic);
                    continue;
                }
                if let Some(array) = p.parse_array_type() {
                    node.tree(array);
                    continue;
                }
                if let Some(postfix) = p.take_any(&[TokenKind::Star, TokenKind::Question]) {
                    node.token(postfix);
                    continue;
                }
                break;
            }
            Some(node.finish())
        })
    }

    /// `GenericType := '<' UnionType (',' UnionType)* '>'`
    fn parse_generic_type(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let open = p.take(TokenKind::LessThan)?;
            let mut node = TreeBuilder::new(TreeKind::GenericType, open.span().start());
            node.token(open);
            node.tree(p.parse_union_type()?);
            while let Some((comma, argument)) = p.attempt(|p| {
                let comma = p.take(TokenKind::Comma)?;
                let argument = p.parse_union_type()?;
                Some((comma, argument))
            }) {
                node.token(comma);
                node.tree(argument);
            }
            node.token(p.expect(TokenKind::GreaterThan, "Expected '>'")?);
            Some(node.finish())
        })
    }

    /// `ArrayType := '[' ']'`
    fn parse_array_type(&mut self) -> Option<Tree> {
        self.attempt(|p| {
            let open = p.take(TokenKind::OpenBracket)?;
            let mut node = TreeBuilder::new(TreeKind::ArrayType, open.span().start());
            node.token(open);
            node.token(p.take(TokenKind::CloseBracket)?);
            Some(node.finish())
        })
    }
}
