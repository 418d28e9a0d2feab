//! Parser error types

use std::fmt;
use thiserror::Error;

/// Result type for the internal parser stages
pub type ParseResult<T> = Result<T, ParseError>;

/// A single grammar or lexical error with location information.
///
/// Errors are classified by how they were produced: `Lexical` for malformed
/// tokens, `Syntax` for token streams that match no production, and
/// `Incomplete` for input that ends in the middle of a production.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Malformed token (e.g. a numeric literal followed by an unrecognized
    /// unit suffix where a duration was expected)
    #[error("lexical error at position {position}: {message}")]
    Lexical {
        /// Byte offset where the error occurred
        position: usize,
        /// Error message
        message: String,
    },

    /// Token stream does not match any production at the current position
    #[error("syntax error at position {position}: {message}")]
    Syntax {
        /// Byte offset where the error occurred
        position: usize,
        /// Error message
        message: String,
    },

    /// Input ends mid-production
    #[error("incomplete input at position {position}: {message}")]
    Incomplete {
        /// Byte offset of the end of input
        position: usize,
        /// Error message
        message: String,
    },
}

impl ParseError {
    /// Byte offset the error points at.
    pub fn position(&self) -> usize {
        match self {
            Self::Lexical { position, .. }
            | Self::Syntax { position, .. }
            | Self::Incomplete { position, .. } => *position,
        }
    }

    /// Convert to a caller-facing problem.
    pub fn to_problem(&self) -> Problem {
        Problem {
            message: self.to_string(),
            position: self.position(),
        }
    }
}

/// One diagnostic collected during a parse attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Human-readable message
    pub message: String,
    /// Byte offset into the source text
    pub position: usize,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Aggregate failure of a parse attempt.
///
/// Carries every problem found in the attempt. A failed parse yields no
/// usable AST; callers are expected to reject the input text entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// All collected problems, in source order
    pub problems: Vec<Problem>,
}

impl ParseFailure {
    /// Build a failure from collected errors.
    ///
    /// Invariant: at least one error is present.
    pub fn new(errors: Vec<ParseError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self {
            problems: errors.iter().map(ParseError::to_problem).collect(),
        }
    }
}

impl From<ParseError> for ParseFailure {
    fn from(error: ParseError) -> Self {
        Self::new(vec![error])
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse failed with {} problem(s)", self.problems.len())?;
        for problem in &self.problems {
            write!(f, "\n  {problem}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_positions() {
        let err = ParseError::Syntax {
            position: 7,
            message: "unexpected token ']'".to_string(),
        };
        assert_eq!(err.position(), 7);
        assert_eq!(err.to_problem().position, 7);
    }

    #[test]
    fn failure_aggregates_problems() {
        let failure = ParseFailure::new(vec![
            ParseError::Lexical {
                position: 2,
                message: "unexpected character '@'".to_string(),
            },
            ParseError::Lexical {
                position: 9,
                message: "unexpected character '?'".to_string(),
            },
        ]);
        assert_eq!(failure.problems.len(), 2);
        let rendered = failure.to_string();
        assert!(rendered.contains("2 problem(s)"));
        assert!(rendered.contains("position 9"));
    }
}
