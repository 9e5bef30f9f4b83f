// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for front-end crash safety testing.
//!
//! This target feeds arbitrary byte sequences through the lexer and parser
//! and asserts that neither panics. The front-end must handle all input
//! gracefully, producing either a tree or an error value.
//!
//! Invalid UTF-8 bytes are converted via lossy conversion (U+FFFD replacement)
//! so the lexer/parser still get exercised with unusual character sequences.
//!
//! # Success Criteria
//!
//! The front-end passes fuzzing if:
//! - It never panics on any input (including replacement characters from invalid UTF-8)
//! - Lexing returns `Ok(tokens)` or `Err(LexError)`, never aborts
//! - Parsing returns `Ok(tree)` or `Err(ParseError)`, never aborts

#![no_main]

use libfuzzer_sys::fuzz_target;
use rue_core::source_analysis::{lex, parse, render_error, stringify};

fuzz_target!(|data: &[u8]| {
    // Convert to UTF-8 using lossy conversion so invalid bytes become U+FFFD
    // replacement characters rather than being skipped entirely.
    let source = String::from_utf8_lossy(data);

    match lex(&source) {
        Ok(tokens) => match parse(&tokens, &source) {
            Ok(tree) => {
                // Pretty-printing must not panic either.
                let _ = stringify(&tree);
            }
            Err(error) => {
                let _ = render_error(&error.into(), "fuzz.rue", &source);
            }
        },
        Err(error) => {
            let _ = render_error(&error.into(), "fuzz.rue", &source);
        }
    }
});
