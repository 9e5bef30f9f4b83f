// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Rue source code.
//!
//! This module converts source text into a stream of [`Token`]s. The lexer
//! is hand-written for maximum control over longest-match behavior and
//! error spans.
//!
//! # Design Principles
//!
//! - **Longest match**: at every position the longest possible lexeme wins;
//!   the operator table is ordered so longer operators are tried before
//!   their prefixes.
//! - **All-or-nothing**: the first offending byte aborts lexing with a
//!   [`LexError`]; there is no error recovery.
//! - **Precise spans**: every token carries its exact byte range; string
//!   literal spans include the quotes even though the token text is the
//!   decoded content.
//!
//! # Example
//!
//! ```
//! use rue_core::source_analysis::{TokenKind, lex};
//!
//! let tokens = lex("val x = 5;").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Val,
//!         TokenKind::Identifier,
//!         TokenKind::Assign,
//!         TokenKind::IntLiteral,
//!         TokenKind::Semicolon,
//!     ]
//! );
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use super::{LexError, LexErrorKind, Span, Token, TokenKind};

/// The operator and punctuator table, in match priority order.
///
/// The ordering is load-bearing, not cosmetic: the lexer takes the *first*
/// entry whose lexeme is a prefix of the remaining input, so every operator
/// must appear before its own prefixes (`<<=` before `<<` before `<=`
/// before `<`, `...` before `..` before `.`, and so on).
const OPERATORS: &[(&str, TokenKind)] = &[
    ("<<=", TokenKind::LeftShiftAssign),
    ("<<", TokenKind::LeftShift),
    ("<=", TokenKind::LessThanOrEqual),
    ("<", TokenKind::LessThan),
    (">>>=", TokenKind::UnsignedRightShiftAssign),
    (">>>", TokenKind::UnsignedRightShift),
    (">>=", TokenKind::RightShiftAssign),
    (">>", TokenKind::RightShift),
    (">=", TokenKind::GreaterThanOrEqual),
    (">", TokenKind::GreaterThan),
    ("==", TokenKind::Equal),
    ("!=", TokenKind::NotEqual),
    ("+=", TokenKind::PlusAssign),
    ("-=", TokenKind::MinusAssign),
    ("*=", TokenKind::StarAssign),
    ("/=", TokenKind::SlashAssign),
    ("%=", TokenKind::PercentAssign),
    ("&=", TokenKind::AmpersandAssign),
    ("|=", TokenKind::PipeAssign),
    ("^=", TokenKind::CaretAssign),
    ("?=", TokenKind::QuestionAssign),
    ("=>", TokenKind::FatArrow),
    ("=", TokenKind::Assign),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("&", TokenKind::Ampersand),
    ("|", TokenKind::Pipe),
    ("^", TokenKind::Caret),
    ("?:", TokenKind::QuestionColon),
    ("?.", TokenKind::QuestionDot),
    ("?", TokenKind::Question),
    ("...", TokenKind::Ellipsis),
    ("..", TokenKind::DotDot),
    (".", TokenKind::Dot),
    ("~", TokenKind::Tilde),
    ("(", TokenKind::OpenParenthesis),
    (")", TokenKind::CloseParenthesis),
    ("[", TokenKind::OpenBracket),
    ("]", TokenKind::CloseBracket),
    ("{", TokenKind::OpenBrace),
    ("}", TokenKind::CloseBrace),
    (";", TokenKind::Semicolon),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    ("_", TokenKind::Underscore),
];

/// Tokenizes an entire source string.
///
/// Whitespace and comments are skipped and never become tokens. The first
/// offending byte aborts lexing.
///
/// # Errors
///
/// Returns the [`LexError`] for the first offending region: an unexpected
/// character, an unterminated string or escape, or a bad escape sequence.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}

/// A lexer that tokenizes Rue source code token-at-a-time.
///
/// Implements [`Iterator`] yielding `Result<Token, LexError>`; after the
/// first error (or end of input) the iterator is fused and yields `None`.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Set once an error has been yielded.
    failed: bool,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            failed: false,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is the same as
    /// `peek_char`, n=1 returns the second character, and so on).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        let mut iter = self.chars.clone();
        for _ in 0..n {
            iter.next();
        }
        iter.next().map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Skips whitespace and comments. Neither becomes a token.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C') => {
                    self.advance();
                }
                Some('/') if self.peek_char_n(1) == Some('/') => {
                    self.advance_while(|c| c != '\n');
                }
                Some('/') if self.peek_char_n(1) == Some('*') => {
                    self.skip_block_comment();
                }
                _ => break,
            }
        }
    }

    /// Skips a block comment: `/* ... */`, first `*/` terminates (no
    /// nesting). An unterminated block comment consumes to end of input.
    fn skip_block_comment(&mut self) {
        self.advance(); // /
        self.advance(); // *
        loop {
            match self.peek_char() {
                None => break,
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance(); // *
                    self.advance(); // /
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Lexes the next token; the caller has already peeked `c`.
    fn lex_token(&mut self, c: char) -> Result<Token, LexError> {
        match c {
            'a'..='z' | 'A'..='Z' => Ok(self.lex_identifier_or_keyword()),
            '0'..='9' => Ok(self.lex_number()),
            '\'' | '"' => self.lex_string(c),
            _ => self.lex_operator(),
        }
    }

    /// Lexes an identifier, then resolves keywords by table lookup.
    ///
    /// The identifier shape is `[A-Za-z](?:_?[A-Za-z0-9]+)*`: it starts with
    /// a letter and underscores must be single and interior, so `a__b` stops
    /// at the first underscore and a trailing `_` is left for the operator
    /// table (`Underscore`).
    fn lex_identifier_or_keyword(&mut self) -> Token {
        let start = self.current_position();
        self.advance(); // first letter
        loop {
            match self.peek_char() {
                Some(c) if c.is_ascii_alphanumeric() => {
                    self.advance_while(|c| c.is_ascii_alphanumeric());
                }
                Some('_')
                    if self
                        .peek_char_n(1)
                        .is_some_and(|c| c.is_ascii_alphanumeric()) =>
                {
                    self.advance(); // underscore
                    self.advance_while(|c| c.is_ascii_alphanumeric());
                }
                _ => break,
            }
        }
        let text = self.text_for(self.span_from(start));
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, self.span_from(start))
    }

    /// Lexes a numeric literal.
    ///
    /// Alternatives are tried in longest-match-preserving order: the radix
    /// forms (`0x`, `0o`, `0b`) first, then float, then integer. An exponent
    /// is consumed only when at least one digit follows it, so `1.` lexes as
    /// the integer `1` followed by `.`, which is what makes `1..5` work.
    fn lex_number(&mut self) -> Token {
        let start = self.current_position();

        if self.peek_char() == Some('0') {
            let radix: Option<(TokenKind, fn(char) -> bool)> = match self.peek_char_n(1) {
                Some('x' | 'X') => Some((TokenKind::HexadecimalLiteral, |c| {
                    c.is_ascii_hexdigit()
                })),
                Some('o' | 'O') => Some((TokenKind::OctalLiteral, |c| matches!(c, '0'..='7'))),
                Some('b' | 'B') => Some((TokenKind::BinaryLiteral, |c| matches!(c, '0' | '1'))),
                _ => None,
            };
            if let Some((kind, is_digit)) = radix {
                if self.peek_char_n(2).is_some_and(is_digit) {
                    self.advance(); // 0
                    self.advance(); // radix marker
                    self.advance_while(is_digit);
                    let span = self.span_from(start);
                    return Token::new(kind, self.text_for(span), span);
                }
            }
        }

        self.advance_while(|c| c.is_ascii_digit());

        let mut kind = TokenKind::IntLiteral;
        if self.peek_char() == Some('.')
            && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // .
            self.advance_while(|c| c.is_ascii_digit());
            kind = TokenKind::FloatLiteral;
        }

        // Exponent suffix; an integer keeps its kind (`1e6` is an IntLiteral)
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let mut digit_offset = 1;
            if matches!(self.peek_char_n(1), Some('+' | '-')) {
                digit_offset = 2;
            }
            if self
                .peek_char_n(digit_offset)
                .is_some_and(|c| c.is_ascii_digit())
            {
                for _ in 0..digit_offset {
                    self.advance();
                }
                self.advance_while(|c| c.is_ascii_digit());
            }
        }

        let span = self.span_from(start);
        Token::new(kind, self.text_for(span), span)
    }

    /// Lexes a string or character literal delimited by `quote`.
    ///
    /// The returned token's text is the *decoded* content without the
    /// quotes; the span still covers the quotes.
    fn lex_string(&mut self, quote: char) -> Result<Token, LexError> {
        let start = self.current_position();
        self.advance(); // opening quote
        let mut decoded = String::new();

        loop {
            match self.peek_char() {
                None => return Err(LexError::unterminated_string(self.span_from(start))),
                Some(c) if c == quote => {
                    self.advance(); // closing quote
                    break;
                }
                Some('\\') => {
                    self.advance();
                    decoded.push(self.lex_escape()?);
                }
                Some(c) => {
                    self.advance();
                    decoded.push(c);
                }
            }
        }

        Ok(Token::new(
            TokenKind::StringLiteral,
            decoded,
            self.span_from(start),
        ))
    }

    /// Decodes one escape sequence; the backslash is already consumed.
    fn lex_escape(&mut self) -> Result<char, LexError> {
        let escape_start = self.current_position() - 1; // the backslash
        let Some(c) = self.advance() else {
            return Err(LexError::unterminated_escape(self.span_from(escape_start)));
        };
        match c {
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            'f' => Ok('\x0C'),
            'v' => Ok('\x0B'),
            't' => Ok('\t'),
            'b' => Ok('\x08'),
            '0' => Ok('\0'),
            'x' => self.lex_hex_escape(escape_start),
            'u' => self.lex_unicode_escape(escape_start),
            other => Ok(other),
        }
    }

    /// Decodes `\xHH`: exactly two uppercase hex digits, Latin-1 semantics.
    fn lex_hex_escape(&mut self, escape_start: u32) -> Result<char, LexError> {
        let mut value: u8 = 0;
        for _ in 0..2 {
            let Some(digit) = self.advance() else {
                return Err(LexError::unterminated_escape(self.span_from(escape_start)));
            };
            let Some(v) = uppercase_hex_value(digit) else {
                return Err(LexError::new(
                    LexErrorKind::InvalidHexEscape(digit),
                    self.span_from(escape_start),
                ));
            };
            value = value * 16 + v;
        }
        Ok(char::from(value))
    }

    /// Decodes `\u{H+}` (braced, 1+ uppercase hex digits) or `\uHHHH`
    /// (exactly four uppercase hex digits).
    fn lex_unicode_escape(&mut self, escape_start: u32) -> Result<char, LexError> {
        let mut value: u32 = 0;
        if self.peek_char() == Some('{') {
            self.advance(); // {
            let mut digits = 0;
            loop {
                let Some(digit) = self.advance() else {
                    return Err(LexError::unterminated_escape(self.span_from(escape_start)));
                };
                if digit == '}' {
                    if digits == 0 {
                        return Err(LexError::new(
                            LexErrorKind::InvalidUnicodeEscape(digit),
                            self.span_from(escape_start),
                        ));
                    }
                    break;
                }
                let Some(v) = uppercase_hex_value(digit) else {
                    return Err(LexError::new(
                        LexErrorKind::InvalidUnicodeEscape(digit),
                        self.span_from(escape_start),
                    ));
                };
                value = value.saturating_mul(16).saturating_add(u32::from(v));
                digits += 1;
            }
        } else {
            for _ in 0..4 {
                let Some(digit) = self.advance() else {
                    return Err(LexError::unterminated_escape(self.span_from(escape_start)));
                };
                let Some(v) = uppercase_hex_value(digit) else {
                    return Err(LexError::new(
                        LexErrorKind::InvalidUnicodeEscape(digit),
                        self.span_from(escape_start),
                    ));
                };
                value = value * 16 + u32::from(v);
            }
        }

        if value > 0x0010_FFFF {
            return Err(LexError::new(
                LexErrorKind::OutOfRangeUnicode(value),
                self.span_from(escape_start),
            ));
        }
        // Surrogate values cannot live in a Rust string; substitute U+FFFD.
        Ok(char::from_u32(value).unwrap_or('\u{FFFD}'))
    }

    /// Lexes an operator or punctuator by first prefix match against the
    /// ordered table, or reports the byte as unexpected.
    fn lex_operator(&mut self) -> Result<Token, LexError> {
        let start = self.current_position();
        let rest = &self.source[self.position..];
        for &(lexeme, kind) in OPERATORS {
            if rest.starts_with(lexeme) {
                for _ in 0..lexeme.len() {
                    self.advance(); // operator lexemes are ASCII, one byte per char
                }
                return Ok(Token::new(kind, lexeme, self.span_from(start)));
            }
        }

        let c = self.advance().unwrap_or('\0');
        Err(LexError::unexpected_character(c, self.span_from(start)))
    }
}

/// Returns the value of an uppercase hexadecimal digit (`0-9`, `A-F`).
///
/// Lowercase digits return `None`; the escape grammar requires uppercase.
fn uppercase_hex_value(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'A'..='F' => Some(c as u8 - b'A' + 10),
        _ => None,
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_trivia();
        let c = self.peek_char()?;
        let result = self.lex_token(c);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(source: &str, expected: &[TokenKind]) {
        let actual: Vec<TokenKind> = lex(source)
            .expect("expected clean lex")
            .iter()
            .map(Token::kind)
            .collect();
        assert_eq!(actual, expected, "for input {source:?}");
    }

    fn check_error(source: &str, kind: &LexErrorKind) {
        let error = lex(source).expect_err("expected a lex error");
        assert_eq!(&error.kind, kind, "for input {source:?}");
    }

    #[test]
    fn whitespace_and_comments_yield_no_tokens() {
        check("", &[]);
        check("  \t\r\n \x0B\x0C", &[]);
        check("// to end of line", &[]);
        check("/* block */", &[]);
        check("/* unterminated", &[]);
        check("a /* mid */ b", &[TokenKind::Identifier, TokenKind::Identifier]);
        check("a // rest\nb", &[TokenKind::Identifier, TokenKind::Identifier]);
    }

    #[test]
    fn identifiers_and_keywords() {
        check("hello", &[TokenKind::Identifier]);
        check("val value", &[TokenKind::Val, TokenKind::Identifier]);
        check("with_underscore_and_numb3r", &[TokenKind::Identifier]);
        // `else` is a keyword token, never an identifier
        check("else", &[TokenKind::Else]);
        // Double underscore ends the identifier; the rest re-lexes
        check(
            "a__b",
            &[
                TokenKind::Identifier,
                TokenKind::Underscore,
                TokenKind::Underscore,
                TokenKind::Identifier,
            ],
        );
        // Trailing underscore is its own token
        check("a_", &[TokenKind::Identifier, TokenKind::Underscore]);
        check("_", &[TokenKind::Underscore]);
    }

    #[test]
    fn type_keywords_collapse() {
        check(
            "int i8 i64 uint u32 float f64 bool string void",
            &[
                TokenKind::IntegerType,
                TokenKind::IntegerType,
                TokenKind::IntegerType,
                TokenKind::UnsignedIntegerType,
                TokenKind::UnsignedIntegerType,
                TokenKind::FloatType,
                TokenKind::FloatType,
                TokenKind::BooleanType,
                TokenKind::StringType,
                TokenKind::VoidType,
            ],
        );
        check("true false", &[TokenKind::BoolLiteral, TokenKind::BoolLiteral]);
    }

    #[test]
    fn numbers() {
        check("42", &[TokenKind::IntLiteral]);
        check("3.14", &[TokenKind::FloatLiteral]);
        check("0xFF 0x1f", &[TokenKind::HexadecimalLiteral, TokenKind::HexadecimalLiteral]);
        check("0o17", &[TokenKind::OctalLiteral]);
        check("0b1010", &[TokenKind::BinaryLiteral]);
        check("1.5e-3", &[TokenKind::FloatLiteral]);
        // An exponent without a dot stays an integer literal
        check("1e6", &[TokenKind::IntLiteral]);
        // `0x` with no digits falls back to integer `0` then identifier `x`
        check("0x", &[TokenKind::IntLiteral, TokenKind::Identifier]);
        // A dangling exponent marker re-lexes as an identifier
        check("1e", &[TokenKind::IntLiteral, TokenKind::Identifier]);
        // `1.` is integer-then-dot, which is what makes ranges work
        check(
            "1..5",
            &[TokenKind::IntLiteral, TokenKind::DotDot, TokenKind::IntLiteral],
        );
    }

    #[test]
    fn number_texts_reproduce_source() {
        let tokens = lex("12 3.4 0xAB 1e9").unwrap();
        let texts: Vec<&str> = tokens.iter().map(Token::text).collect();
        assert_eq!(texts, ["12", "3.4", "0xAB", "1e9"]);
    }

    #[test]
    fn operators_longest_match() {
        check(">>>=", &[TokenKind::UnsignedRightShiftAssign]);
        check(">>>", &[TokenKind::UnsignedRightShift]);
        check("<<", &[TokenKind::LeftShift]);
        check("<<=", &[TokenKind::LeftShiftAssign]);
        check("<= <", &[TokenKind::LessThanOrEqual, TokenKind::LessThan]);
        check("...", &[TokenKind::Ellipsis]);
        check("..", &[TokenKind::DotDot]);
        check("?: ?. ?", &[TokenKind::QuestionColon, TokenKind::QuestionDot, TokenKind::Question]);
        check("=> == =", &[TokenKind::FatArrow, TokenKind::Equal, TokenKind::Assign]);
        check(
            ">>> >>= >> >= >",
            &[
                TokenKind::UnsignedRightShift,
                TokenKind::RightShiftAssign,
                TokenKind::RightShift,
                TokenKind::GreaterThanOrEqual,
                TokenKind::GreaterThan,
            ],
        );
    }

    #[test]
    fn spans_are_half_open_byte_offsets() {
        let tokens = lex("val x").unwrap();
        assert_eq!(tokens[0].span(), Span::new(0, 3));
        assert_eq!(tokens[1].span(), Span::new(4, 5));
    }

    #[test]
    fn string_literals_decode() {
        let tokens = lex("\"hi\\n\\x41\"").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::StringLiteral);
        assert_eq!(tokens[0].text(), "hi\nA");
        // Span covers the quotes
        assert_eq!(tokens[0].span(), Span::new(0, 10));
    }

    #[test]
    fn single_quoted_strings() {
        let tokens = lex("'c'").unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::StringLiteral);
        assert_eq!(tokens[0].text(), "c");
        // A double quote inside single quotes is plain content
        let tokens = lex("'a\"b'").unwrap();
        assert_eq!(tokens[0].text(), "a\"b");
    }

    #[test]
    fn simple_escapes() {
        let tokens = lex(r#""\n\r\f\v\t\b\0""#).unwrap();
        assert_eq!(tokens[0].text(), "\n\r\x0C\x0B\t\x08\0");
        // Unknown escapes decode to the escaped character itself
        let tokens = lex(r#""\q\"\\""#).unwrap();
        assert_eq!(tokens[0].text(), "q\"\\");
    }

    #[test]
    fn hex_escapes_require_uppercase() {
        let tokens = lex(r#""\x1F""#).unwrap();
        assert_eq!(tokens[0].text(), "\x1F");
        check_error(r#""\xff""#, &LexErrorKind::InvalidHexEscape('f'));
        check_error(r#""\xG0""#, &LexErrorKind::InvalidHexEscape('G'));
    }

    #[test]
    fn hex_escape_is_latin1() {
        let tokens = lex(r#""\xFF""#).unwrap();
        assert_eq!(tokens[0].text(), "\u{FF}");
    }

    #[test]
    fn unicode_escapes() {
        let tokens = lex(r#""\u{1F600}""#).unwrap();
        assert_eq!(tokens[0].text(), "\u{1F600}");
        let tokens = lex(r#""\u0041""#).unwrap();
        assert_eq!(tokens[0].text(), "A");
        check_error(r#""\u{110000}""#, &LexErrorKind::OutOfRangeUnicode(0x0011_0000));
        check_error(r#""\u{e4}""#, &LexErrorKind::InvalidUnicodeEscape('e'));
        check_error(r#""\u00 1""#, &LexErrorKind::InvalidUnicodeEscape(' '));
        check_error(r#""\u{}""#, &LexErrorKind::InvalidUnicodeEscape('}'));
    }

    #[test]
    fn unterminated_strings_and_escapes() {
        check_error("\"open", &LexErrorKind::UnterminatedString);
        check_error("'open", &LexErrorKind::UnterminatedString);
        check_error("\"end\\", &LexErrorKind::UnterminatedEscape);
        check_error("\"\\x4", &LexErrorKind::UnterminatedEscape);
        check_error("\"\\u{41", &LexErrorKind::UnterminatedEscape);
    }

    #[test]
    fn unexpected_characters() {
        check_error("@", &LexErrorKind::UnexpectedCharacter('@'));
        check_error("a # b", &LexErrorKind::UnexpectedCharacter('#'));
        // `!` alone is not an operator; only `!=` is
        check_error("!", &LexErrorKind::UnexpectedCharacter('!'));
    }

    #[test]
    fn error_spans_point_at_the_offence() {
        let error = lex("ab @").unwrap_err();
        assert_eq!(error.span, Span::new(3, 4));

        let error = lex(r#""ab\xff""#).unwrap_err();
        // Span starts at the backslash
        assert_eq!(error.span.start(), 3);
    }

    #[test]
    fn lexer_is_fused_after_error() {
        let mut lexer = Lexer::new("@ x");
        assert!(lexer.next().is_some_and(|r| r.is_err()));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn token_slices_reproduce_source() {
        let source = "def f(a: int): int { return a + 0xFF; }";
        for token in lex(source).unwrap() {
            assert_eq!(
                &source[token.span().as_range()],
                token.text(),
                "token {:?}",
                token.kind()
            );
        }
    }
}
