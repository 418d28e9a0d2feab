//! Token stream with lookahead over a fully scanned input

use super::span::Spanned;
use super::tokenizer::Token;

/// Token stream with lookahead capability.
///
/// The stream is built once per parse call from a full scan of the input;
/// the parser never re-enters the scanner.
#[derive(Debug)]
pub struct TokenStream<'input> {
    tokens: Vec<Spanned<Token<'input>>>,
    position: usize,
    input_len: usize,
}

impl<'input> TokenStream<'input> {
    /// Create a new token stream. `input_len` is the byte length of the
    /// scanned source, used as the position of end-of-input errors.
    pub fn new(tokens: Vec<Spanned<Token<'input>>>, input_len: usize) -> Self {
        Self {
            tokens,
            position: 0,
            input_len,
        }
    }

    /// Peek at the current token without consuming it
    pub fn peek(&self) -> Option<&Spanned<Token<'input>>> {
        self.tokens.get(self.position)
    }

    /// Peek at a token n positions ahead (0 = current)
    pub fn peek_ahead(&self, n: usize) -> Option<&Spanned<Token<'input>>> {
        self.tokens.get(self.position + n)
    }

    /// Consume and return the current token
    pub fn next(&mut self) -> Option<Spanned<Token<'input>>> {
        let token = self.tokens.get(self.position).copied();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Check if the stream is exhausted
    pub fn is_eof(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Byte offset of the current token, or of end-of-input when exhausted
    pub fn offset(&self) -> usize {
        self.peek().map_or(self.input_len, |t| t.start)
    }

    /// Byte offset of end-of-input
    pub fn input_len(&self) -> usize {
        self.input_len
    }
}
