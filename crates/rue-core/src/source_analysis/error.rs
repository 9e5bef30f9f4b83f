// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Rue front-end.
//!
//! Errors carry source locations ([`Span`]) for precise diagnostics.
//! They integrate with [`miette`] for beautiful error reporting.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::{Span, Token};

/// A lexical error encountered during tokenization.
///
/// Lexing is all-or-nothing: the first offending byte aborts the lexer and
/// surfaces as a `LexError`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Creates an "unexpected character" error.
    #[must_use]
    pub fn unexpected_character(c: char, span: Span) -> Self {
        Self::new(LexErrorKind::UnexpectedCharacter(c), span)
    }

    /// Creates an "unterminated string" error.
    #[must_use]
    pub fn unterminated_string(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedString, span)
    }

    /// Creates an "unterminated escape" error.
    #[must_use]
    pub fn unterminated_escape(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedEscape, span)
    }

    /// Returns the offending content, when the error has a single offending
    /// character to show.
    #[must_use]
    pub fn content(&self) -> Option<char> {
        match self.kind {
            LexErrorKind::UnexpectedCharacter(c)
            | LexErrorKind::InvalidHexEscape(c)
            | LexErrorKind::InvalidUnicodeEscape(c) => Some(c),
            LexErrorKind::UnterminatedString
            | LexErrorKind::UnterminatedEscape
            | LexErrorKind::OutOfRangeUnicode(_) => None,
        }
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A byte that starts no token.
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// A string literal was still open at end of input.
    #[error("Unterminated string literal")]
    UnterminatedString,

    /// An escape sequence was still open at end of input.
    #[error("Unterminated escape sequence")]
    UnterminatedEscape,

    /// A `\xHH` escape with a non-hex or lowercase digit.
    #[error("Invalid or lowercase hexadecimal escape sequence")]
    InvalidHexEscape(char),

    /// A `\uHHHH` or `\u{...}` escape with a non-hex or lowercase digit.
    #[error("Invalid or lowercase Unicode escape sequence")]
    InvalidUnicodeEscape(char),

    /// A Unicode escape above the last code point, U+10FFFF.
    #[error("Out of range Unicode escape")]
    OutOfRangeUnicode(u32),
}

impl LexErrorKind {
    /// Returns the error message without the offending content.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter(_) => "Unexpected character",
            Self::UnterminatedString => "Unterminated string literal",
            Self::UnterminatedEscape => "Unterminated escape sequence",
            Self::InvalidHexEscape(_) => "Invalid or lowercase hexadecimal escape sequence",
            Self::InvalidUnicodeEscape(_) => "Invalid or lowercase Unicode escape sequence",
            Self::OutOfRangeUnicode(_) => "Out of range Unicode escape",
        }
    }
}

/// A parse error.
///
/// The parser records one of these every time a production fails, keeping
/// only the *furthest* one (ties broken towards the later failure). The
/// survivor is what callers see when parsing fails.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic()]
pub struct ParseError {
    /// Short human message, e.g. `Expected statement`.
    pub message: EcoString,
    /// The offending token text, when there is one.
    pub content: Option<EcoString>,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            message: message.into(),
            content: None,
            span,
        }
    }

    /// Creates an "unexpected token" error pointing at a leftover token.
    #[must_use]
    pub fn unexpected_token(token: &Token) -> Self {
        Self {
            message: "Unexpected token".into(),
            content: Some(token.text().into()),
            span: token.span(),
        }
    }
}

/// The front-end phase an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Lexical analysis.
    Lex,
    /// Parsing.
    Parse,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex => write!(f, "lex"),
            Self::Parse => write!(f, "parse"),
        }
    }
}

/// Either kind of front-end error, for callers that drive both stages.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SyntaxError {
    /// A lexical error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    /// A parse error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    /// Returns the phase this error came from.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Lex(_) => Phase::Lex,
            Self::Parse(_) => Phase::Parse,
        }
    }

    /// Returns the source span of the offending region.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(error) => error.span,
            Self::Parse(error) => error.span,
        }
    }

    /// Returns the error message, without the offending content.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Lex(error) => error.kind.message(),
            Self::Parse(error) => &error.message,
        }
    }

    /// Returns the offending content, when there is one: the single
    /// offending character for lex errors, the offending token text for
    /// parse errors.
    #[must_use]
    pub fn content(&self) -> Option<EcoString> {
        match self {
            Self::Lex(error) => error.content().map(EcoString::from),
            Self::Parse(error) => error.content.clone(),
        }
    }
}
