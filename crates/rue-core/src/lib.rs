// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Rue compiler front-end.
//!
//! This crate contains the source-analysis stage of the Rue compiler:
//! - Lexical analysis (tokenization with byte-precise spans)
//! - Parsing (backtracking recursive descent producing a concrete syntax tree)
//! - Diagnostic rendering (caret-underlined source excerpts)
//!
//! The front-end is all-or-nothing by design: the lexer stops at the first
//! offending byte and the parser reports the single failure it got furthest
//! on before giving up. Downstream stages (semantic analysis, type checking,
//! code generation) consume the [`source_analysis::Tree`] produced here.

pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::source_analysis::{
        Child, LexError, Lexer, ParseError, Span, SyntaxError, Token, TokenKind, Tree, TreeKind,
        lex, parse, render_error, stringify, stringify_tokens,
    };
}
