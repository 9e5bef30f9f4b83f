// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for Rue source code.
//!
//! **DDD Context:** Source Analysis
//!
//! This module contains the lexer, parser, and concrete syntax tree.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts source text into a stream of [`Token`]s using
//! longest-match tokenization. Each token carries its source location via
//! [`Span`]. Whitespace and comments never become tokens.
//!
//! ```
//! use rue_core::source_analysis::{TokenKind, lex};
//!
//! let tokens = lex("x + 1").unwrap();
//! assert_eq!(tokens.len(), 3); // x, +, 1
//! assert_eq!(tokens[1].kind(), TokenKind::Plus);
//! ```
//!
//! See [`TokenKind`] for all supported syntactic elements.
//!
//! # Parsing
//!
//! The [`parse`] function converts tokens into a [`Tree`] rooted at a
//! `Body` node. Every grammar production runs speculatively against a
//! cursor stack and commits only on success, so alternatives backtrack
//! cleanly (see the [`parser`] module for details).
//!
//! # Error Handling
//!
//! Both stages stop at the first unrecoverable failure. The lexer returns a
//! [`LexError`] at the first offending byte; the parser keeps the *furthest*
//! [`ParseError`] recorded while backtracking, which empirically points at
//! the most actionable spot. [`render_error`] formats either kind as a
//! caret-underlined source excerpt, and both integrate with miette.

mod cst;
mod error;
mod lexer;
pub mod parser;
mod pretty;
mod render;
mod span;
mod token;


pub use cst::{Child, Tree, TreeKind};
pub use error::{LexError, LexErrorKind, ParseError, Phase, SyntaxError};
pub use lexer::{Lexer, lex};
pub use parser::parse;
pub use pretty::{stringify, stringify_tokens};
pub use render::render_error;
pub use span::Span;
pub use token::{Token, TokenKind};
