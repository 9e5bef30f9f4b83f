// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Human-readable diagnostic rendering.
//!
//! Formats a [`SyntaxError`] as a multi-line diagnostic: a `file:line`
//! header, the offending source line with a caret underline, and the error
//! message with its 1-based position. Long lines are truncated to a fixed
//! window and scrolled horizontally so the caret stays visible.

use std::fmt::Write as _;

use super::SyntaxError;

/// The rendering window, in columns.
const WIDTH: usize = 80;

/// The column past which the excerpt scrolls horizontally.
const SCROLL_MARGIN: usize = 30;

/// Tabs expand to this many spaces in the excerpt.
const TAB_WIDTH: usize = 4;

/// Renders an error as a multi-line human-readable diagnostic.
///
/// ```text
/// demo.rue:2
///     val x = ;
///             ^
/// parse error: Expected expression at 2:13
/// ```
///
/// Line and column are 1-based. Carriage returns never count towards the
/// column, tabs expand to four spaces, and the caret underline is
/// `max(span length, 1)` columns wide, clamped to the window.
#[must_use]
pub fn render_error(error: &SyntaxError, filename: &str, source: &str) -> String {
    let span = error.span();
    let start = (span.start() as usize).min(source.len());

    let line_number = source[..start].matches('\n').count() + 1;
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[start..]
        .find('\n')
        .map_or(source.len(), |i| start + i);
    let raw_line = source[line_start..line_end].trim_end_matches('\r');

    // Column within the raw line, in characters, never counting '\r'.
    let column = source[line_start..start]
        .chars()
        .filter(|&c| c != '\r')
        .count();

    // Expand tabs, tracking where the caret lands in expanded columns.
    let mut excerpt = String::new();
    let mut caret_column = 0;
    for (i, c) in raw_line.chars().enumerate() {
        if i == column {
            caret_column = excerpt.chars().count();
        }
        if c == '\t' {
            excerpt.push_str(&" ".repeat(TAB_WIDTH));
        } else if c != '\r' {
            excerpt.push(c);
        }
    }
    if column >= raw_line.chars().count() {
        caret_column = excerpt.chars().count();
    }

    let underline = (span.len() as usize).max(1);

    // Scroll the window when the caret sits past the margin.
    let margin = SCROLL_MARGIN.max(underline);
    let offset = caret_column.saturating_sub(margin);
    let visible: String = excerpt.chars().skip(offset).take(WIDTH).collect();
    let caret_column = caret_column - offset;
    let underline = underline.min(WIDTH.saturating_sub(caret_column)).max(1);

    let mut out = String::new();
    let _ = writeln!(out, "{filename}:{line_number}");
    let _ = writeln!(out, "{visible}");
    let _ = writeln!(out, "{:caret_column$}{}", "", "^".repeat(underline));
    let _ = write!(out, "{} error: {}", error.phase(), error.message());
    if let Some(content) = error.content() {
        let _ = write!(out, " '{content}'");
    }
    let _ = write!(out, " at {line_number}:{}", column + 1);
    out
}

#[cfg(test)]
mod tests {
    use super::super::{LexError, ParseError, Span};
    use super::*;

    #[test]
    fn renders_line_and_caret() {
        let source = "val x = 5;\nval y = ;\n";
        let error: SyntaxError = ParseError::new("Expected expression", Span::new(19, 20)).into();
        let rendered = render_error(&error, "demo.rue", source);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "demo.rue:2");
        assert_eq!(lines[1], "val y = ;");
        assert_eq!(lines[2], "        ^");
        assert_eq!(lines[3], "parse error: Expected expression at 2:9");
    }

    #[test]
    fn renders_lex_error_content() {
        let source = "val @ = 1;";
        let error: SyntaxError = LexError::unexpected_character('@', Span::new(4, 5)).into();
        let rendered = render_error(&error, "demo.rue", source);

        assert!(rendered.starts_with("demo.rue:1\n"));
        assert!(rendered.contains("\n    ^\n"));
        assert!(rendered.ends_with("lex error: Unexpected character '@' at 1:5"));
    }

    #[test]
    fn underline_covers_span() {
        let source = "return value;";
        let error: SyntaxError = ParseError::new("Unexpected token", Span::new(7, 12)).into();
        let rendered = render_error(&error, "demo.rue", source);
        assert!(rendered.contains("\n       ^^^^^\n"));
    }

    #[test]
    fn tabs_expand_without_moving_the_caret_off_target() {
        let source = "\tval x = ;";
        let error: SyntaxError = ParseError::new("Expected expression", Span::new(9, 10)).into();
        let rendered = render_error(&error, "demo.rue", source);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[1], "    val x = ;");
        // Tab expands to four columns, so the caret shifts right by three
        assert_eq!(lines[2], "            ^");
    }

    #[test]
    fn long_lines_scroll_to_keep_the_caret_visible() {
        let padding = "x".repeat(100);
        let source = format!("{padding}@");
        let error: SyntaxError =
            LexError::unexpected_character('@', Span::new(100, 101)).into();
        let rendered = render_error(&error, "demo.rue", &source);
        let lines: Vec<&str> = rendered.lines().collect();

        // The excerpt is windowed and the caret stays inside it
        assert!(lines[1].len() <= super::WIDTH);
        assert_eq!(lines[2].trim_end(), format!("{}^", " ".repeat(30)));
        assert!(rendered.ends_with("at 1:101"));
    }

    #[test]
    fn end_of_input_errors_point_past_the_last_column() {
        let source = "val x";
        let error: SyntaxError = ParseError::new("Expected statement", Span::point(5)).into();
        let rendered = render_error(&error, "demo.rue", source);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[1], "val x");
        assert_eq!(lines[2], "     ^");
        assert!(rendered.ends_with("at 1:6"));
    }
}
