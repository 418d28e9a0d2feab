//! Tokenizer for DRLX expressions
//!
//! Byte-level scanner producing the base-grammar token set plus the dialect
//! extensions: duration-chunk tokens (`5ms`), the null-safe access marker
//! (`!.`) and the inline-cast marker (`#`). Path-segment and backreference
//! markers reuse the plain `/` and `.` tokens; they take on path meaning
//! only at positions where the base grammar has no reading for them, so the
//! scanner needs no mode flag.

use super::error::{ParseError, ParseResult};
use super::span::Spanned;
use crate::ast::TimeUnit;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Token shapes of the extended expression grammar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'input> {
    /// Integer literal (e.g. `42`)
    Integer(i64),
    /// Decimal literal as written (e.g. `3.14`)
    Decimal(&'input str),
    /// String literal content between the double quotes, escapes untouched
    String(&'input str),
    /// Duration chunk: a numeric literal immediately followed by a known
    /// time-unit suffix (e.g. `5ms`)
    DurationChunk {
        /// Chunk value
        value: i64,
        /// Recognized unit
        unit: TimeUnit,
    },
    /// Identifier (names may start with `$` or `_`)
    Identifier(&'input str),

    /// `true` keyword
    True,
    /// `false` keyword
    False,
    /// `null` keyword
    Null,
    /// `this` keyword
    This,
    /// `instanceof` keyword
    InstanceOf,

    /// Addition operator (`+`)
    Plus,
    /// Subtraction operator (`-`)
    Minus,
    /// Multiplication operator (`*`)
    Star,
    /// Division operator (`/`); also the path-segment marker at
    /// expression-start position
    Slash,
    /// Remainder operator (`%`)
    Percent,
    /// Equality operator (`==`)
    Eq,
    /// Inequality operator (`!=`)
    NotEq,
    /// Less-than operator (`<`)
    Lt,
    /// Less-or-equal operator (`<=`)
    Le,
    /// Greater-than operator (`>`)
    Gt,
    /// Greater-or-equal operator (`>=`)
    Ge,
    /// Logical AND (`&&`)
    AndAnd,
    /// Logical OR (`||`)
    OrOr,
    /// Bitwise AND (`&`)
    Amp,
    /// Bitwise OR (`|`)
    Pipe,
    /// Bitwise XOR (`^`)
    Caret,
    /// Logical complement (`!`)
    Bang,
    /// Left shift (`<<`)
    Shl,
    /// Signed right shift (`>>`)
    Shr,
    /// Unsigned right shift (`>>>`)
    UShr,

    /// Inline-cast marker (`#`)
    Hash,
    /// Null-safe access marker (`!.`)
    NullSafeDot,

    /// Member access dot (`.`); doubled before a `/` it forms the
    /// backreference marker `../`
    Dot,
    /// Comma separator (`,`)
    Comma,
    /// Binding colon (`:`)
    Colon,
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
    /// Left square bracket
    LeftBracket,
    /// Right square bracket
    RightBracket,
}

impl<'input> Token<'input> {
    /// Get the identifier text if this token is an identifier.
    #[inline]
    pub fn as_identifier(&self) -> Option<&'input str> {
        match self {
            Token::Identifier(s) => Some(s),
            _ => None,
        }
    }
}

/// Reserved words of the base grammar.
static KEYWORD_TABLE: Lazy<FxHashMap<&'static str, Token<'static>>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    map.insert("true", Token::True);
    map.insert("false", Token::False);
    map.insert("null", Token::Null);
    map.insert("this", Token::This);
    map.insert("instanceof", Token::InstanceOf);
    map
});

/// Recognized time-unit suffix spellings, fixed at build time.
static TIME_UNIT_TABLE: Lazy<FxHashMap<&'static str, TimeUnit>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    map.insert("ms", TimeUnit::Milliseconds);
    map.insert("s", TimeUnit::Seconds);
    map.insert("m", TimeUnit::Minutes);
    map.insert("h", TimeUnit::Hours);
    map.insert("d", TimeUnit::Days);
    map
});

/// Look up a time-unit suffix spelling.
pub fn time_unit_for_suffix(suffix: &str) -> Option<TimeUnit> {
    TIME_UNIT_TABLE.get(suffix).copied()
}

/// Byte-level tokenizer over one input string.
///
/// A tokenizer owns no state beyond its position; every parse call creates
/// a fresh instance.
pub struct Tokenizer<'input> {
    input: &'input str,
    bytes: &'input [u8],
    pos: usize,
}

impl<'input> Tokenizer<'input> {
    /// Create a new tokenizer over `input`.
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    #[inline(always)]
    fn slice(&self, start: usize, end: usize) -> &'input str {
        &self.input[start..end]
    }

    #[inline(always)]
    fn is_id_start(ch: u8) -> bool {
        matches!(ch, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b'$')
    }

    #[inline(always)]
    fn is_id_continue(ch: u8) -> bool {
        matches!(ch, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'$')
    }

    #[inline(always)]
    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                _ => break,
            }
        }
    }

    fn parse_identifier(&mut self) -> &'input str {
        let start = self.pos;
        while self.pos < self.bytes.len() && Self::is_id_continue(self.bytes[self.pos]) {
            self.pos += 1;
        }
        self.slice(start, self.pos)
    }

    /// Scan a numeric literal: integer, decimal, or duration chunk.
    ///
    /// A digit run immediately followed by a known unit suffix becomes one
    /// duration-chunk token. An unknown alphabetic suffix is left in place:
    /// the number stays an ordinary integer and the letters tokenize as a
    /// separate identifier, failing later at grammar level if a duration
    /// was required there.
    fn parse_number(&mut self) -> ParseResult<Token<'input>> {
        let start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }

        let is_decimal = self.pos < self.bytes.len()
            && self.bytes[self.pos] == b'.'
            && self.pos + 1 < self.bytes.len()
            && self.bytes[self.pos + 1].is_ascii_digit();
        if is_decimal {
            self.pos += 1;
            while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
            return Ok(Token::Decimal(self.slice(start, self.pos)));
        }

        let value = self
            .slice(start, self.pos)
            .parse::<i64>()
            .map_err(|_| ParseError::Lexical {
                position: start,
                message: format!("integer literal '{}' out of range", self.slice(start, self.pos)),
            })?;

        // No whitespace allowed between the value and its unit suffix.
        let suffix_start = self.pos;
        let mut suffix_end = suffix_start;
        while suffix_end < self.bytes.len() && self.bytes[suffix_end].is_ascii_alphabetic() {
            suffix_end += 1;
        }
        if suffix_end > suffix_start {
            if let Some(unit) = time_unit_for_suffix(self.slice(suffix_start, suffix_end)) {
                self.pos = suffix_end;
                return Ok(Token::DurationChunk { value, unit });
            }
        }

        Ok(Token::Integer(value))
    }

    fn parse_string_literal(&mut self) -> ParseResult<&'input str> {
        let open = self.pos;
        self.pos += 1;
        let start = self.pos;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'"' => {
                    let content = self.slice(start, self.pos);
                    self.pos += 1;
                    return Ok(content);
                }
                b'\\' => {
                    self.pos += if self.pos + 1 < self.bytes.len() { 2 } else { 1 };
                }
                _ => self.pos += 1,
            }
        }
        Err(ParseError::Lexical {
            position: open,
            message: "unterminated string literal".to_string(),
        })
    }

    /// Scan the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> ParseResult<Option<Spanned<Token<'input>>>> {
        self.skip_whitespace();
        if self.pos >= self.bytes.len() {
            return Ok(None);
        }

        let start = self.pos;
        let token = match self.bytes[self.pos] {
            b'.' => {
                self.pos += 1;
                Token::Dot
            }
            b'(' => {
                self.pos += 1;
                Token::LeftParen
            }
            b')' => {
                self.pos += 1;
                Token::RightParen
            }
            b'[' => {
                self.pos += 1;
                Token::LeftBracket
            }
            b']' => {
                self.pos += 1;
                Token::RightBracket
            }
            b',' => {
                self.pos += 1;
                Token::Comma
            }
            b':' => {
                self.pos += 1;
                Token::Colon
            }
            b'#' => {
                self.pos += 1;
                Token::Hash
            }
            b'=' => {
                if self.bytes.get(self.pos + 1) == Some(&b'=') {
                    self.pos += 2;
                    Token::Eq
                } else {
                    return Err(ParseError::Lexical {
                        position: start,
                        message: "unexpected character '='".to_string(),
                    });
                }
            }
            b'!' => match self.bytes.get(self.pos + 1) {
                Some(b'=') => {
                    self.pos += 2;
                    Token::NotEq
                }
                Some(b'.') => {
                    self.pos += 2;
                    Token::NullSafeDot
                }
                _ => {
                    self.pos += 1;
                    Token::Bang
                }
            },
            b'<' => match self.bytes.get(self.pos + 1) {
                Some(b'=') => {
                    self.pos += 2;
                    Token::Le
                }
                Some(b'<') => {
                    self.pos += 2;
                    Token::Shl
                }
                _ => {
                    self.pos += 1;
                    Token::Lt
                }
            },
            b'>' => match self.bytes.get(self.pos + 1) {
                Some(b'=') => {
                    self.pos += 2;
                    Token::Ge
                }
                Some(b'>') => {
                    if self.bytes.get(self.pos + 2) == Some(&b'>') {
                        self.pos += 3;
                        Token::UShr
                    } else {
                        self.pos += 2;
                        Token::Shr
                    }
                }
                _ => {
                    self.pos += 1;
                    Token::Gt
                }
            },
            b'&' => {
                if self.bytes.get(self.pos + 1) == Some(&b'&') {
                    self.pos += 2;
                    Token::AndAnd
                } else {
                    self.pos += 1;
                    Token::Amp
                }
            }
            b'|' => {
                if self.bytes.get(self.pos + 1) == Some(&b'|') {
                    self.pos += 2;
                    Token::OrOr
                } else {
                    self.pos += 1;
                    Token::Pipe
                }
            }
            b'^' => {
                self.pos += 1;
                Token::Caret
            }
            b'+' => {
                self.pos += 1;
                Token::Plus
            }
            b'-' => {
                self.pos += 1;
                Token::Minus
            }
            b'*' => {
                self.pos += 1;
                Token::Star
            }
            b'/' => {
                self.pos += 1;
                Token::Slash
            }
            b'%' => {
                self.pos += 1;
                Token::Percent
            }
            b'"' => Token::String(self.parse_string_literal()?),
            b'0'..=b'9' => self.parse_number()?,
            ch if Self::is_id_start(ch) => {
                let ident = self.parse_identifier();
                match KEYWORD_TABLE.get(ident) {
                    Some(keyword) => *keyword,
                    None => Token::Identifier(ident),
                }
            }
            _ => {
                let ch = self.input[self.pos..].chars().next().unwrap_or('\u{fffd}');
                return Err(ParseError::Lexical {
                    position: start,
                    message: format!("unexpected character '{ch}'"),
                });
            }
        };

        Ok(Some(Spanned::new(token, start, self.pos)))
    }

    /// Advance past the character that caused a lexical error so scanning
    /// can continue collecting further diagnostics.
    fn recover(&mut self) {
        self.pos += 1;
        while self.pos < self.bytes.len() && !self.input.is_char_boundary(self.pos) {
            self.pos += 1;
        }
    }
}

/// Scan the whole input, collecting every lexical error instead of stopping
/// at the first one. Returns the tokens that did scan plus all errors.
pub fn scan(input: &str) -> (Vec<Spanned<Token<'_>>>, Vec<ParseError>) {
    let mut tokenizer = Tokenizer::new(input);
    let mut tokens = Vec::with_capacity(16);
    let mut errors = Vec::new();
    loop {
        match tokenizer.next_token() {
            Ok(Some(token)) => tokens.push(token),
            Ok(None) => break,
            Err(error) => {
                // An unterminated string swallows the rest of the input, so
                // there is nothing left to resynchronize on.
                let fatal = matches!(
                    &error,
                    ParseError::Lexical { message, .. } if message.starts_with("unterminated")
                );
                errors.push(error);
                if fatal {
                    break;
                }
                tokenizer.recover();
            }
        }
    }
    (tokens, errors)
}

/// Tokenize the whole input, failing with all collected lexical errors.
pub fn tokenize(input: &str) -> Result<Vec<Spanned<Token<'_>>>, Vec<ParseError>> {
    let (tokens, errors) = scan(input);
    if errors.is_empty() { Ok(tokens) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .expect("tokenize failed")
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn basic_expression() {
        assert_eq!(
            kinds("name == \"Mark\""),
            vec![Token::Identifier("name"), Token::Eq, Token::String("Mark")]
        );
    }

    #[test]
    fn duration_chunks() {
        assert_eq!(
            kinds("1m5s"),
            vec![
                Token::DurationChunk {
                    value: 1,
                    unit: TimeUnit::Minutes
                },
                Token::DurationChunk {
                    value: 5,
                    unit: TimeUnit::Seconds
                },
            ]
        );
    }

    #[test]
    fn unknown_unit_falls_through() {
        assert_eq!(
            kinds("8f"),
            vec![Token::Integer(8), Token::Identifier("f")]
        );
        assert_eq!(
            kinds("5msx"),
            vec![Token::Integer(5), Token::Identifier("msx")]
        );
    }

    #[test]
    fn extension_markers() {
        assert_eq!(
            kinds("this#Person"),
            vec![Token::This, Token::Hash, Token::Identifier("Person")]
        );
        assert_eq!(
            kinds("person!.name"),
            vec![
                Token::Identifier("person"),
                Token::NullSafeDot,
                Token::Identifier("name")
            ]
        );
        // `!` still works as complement and as part of `!=`
        assert_eq!(kinds("!a"), vec![Token::Bang, Token::Identifier("a")]);
        assert_eq!(
            kinds("a != b"),
            vec![
                Token::Identifier("a"),
                Token::NotEq,
                Token::Identifier("b")
            ]
        );
    }

    #[test]
    fn path_markers() {
        assert_eq!(
            kinds("../../name"),
            vec![
                Token::Dot,
                Token::Dot,
                Token::Slash,
                Token::Dot,
                Token::Dot,
                Token::Slash,
                Token::Identifier("name")
            ]
        );
    }

    #[test]
    fn dollar_identifiers() {
        assert_eq!(
            kinds("$toy : x"),
            vec![
                Token::Identifier("$toy"),
                Token::Colon,
                Token::Identifier("x")
            ]
        );
    }

    #[test]
    fn shift_and_relational_disambiguation() {
        assert_eq!(
            kinds("a >> b >>> c >= d"),
            vec![
                Token::Identifier("a"),
                Token::Shr,
                Token::Identifier("b"),
                Token::UShr,
                Token::Identifier("c"),
                Token::Ge,
                Token::Identifier("d")
            ]
        );
    }

    #[test]
    fn spans_track_byte_offsets() {
        let tokens = tokenize("this after $a").expect("tokenize failed");
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 4);
        assert_eq!(tokens[1].start, 5);
        assert_eq!(tokens[1].end, 10);
        assert_eq!(tokens[2].start, 11);
    }

    #[test]
    fn collects_all_lexical_errors() {
        let (_, errors) = scan("a @ b ? c");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].position(), 2);
        assert_eq!(errors[1].position(), 6);
    }

    #[test]
    fn unterminated_string() {
        let (_, errors) = scan("name == \"Mark");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("unterminated"));
    }
}
