//! DRLX expression parser
//!
//! Two stateless entry points: [`parse_expression`] for a full rule
//! expression (with optional leading `$name :` binding) and
//! [`parse_temporal_literal`] for a standalone compound duration. Each call
//! scans and parses with fresh state, so both are safe to invoke from
//! concurrent callers.

pub mod error;
pub mod lexer;
pub mod pratt;
pub mod span;
pub mod tokenizer;

pub use error::{ParseError, ParseFailure, ParseResult, Problem};
pub use pratt::{ExpressionParser, Precedence, is_point_free_operator};
pub use span::Spanned;
pub use tokenizer::{Token, Tokenizer, time_unit_for_suffix, tokenize};

use crate::ast::{DrlxExpression, TemporalLiteralExpr};
use log::{debug, trace};

/// Parse a rule expression into its AST.
///
/// Every problem found in the attempt is collected into the returned
/// [`ParseFailure`]: the lexical scan reports all malformed tokens in the
/// input, a grammar failure after a clean scan contributes its single
/// diagnostic. A failed parse yields no partial AST.
pub fn parse_expression(input: &str) -> Result<DrlxExpression, ParseFailure> {
    trace!("parsing expression: {input}");
    let tokens = tokenize(input).map_err(|errors| {
        debug!("lexical scan of expression failed with {} problem(s)", errors.len());
        ParseFailure::new(errors)
    })?;
    ExpressionParser::new(tokens, input.len())
        .parse_drlx_expression()
        .map_err(|error| {
            debug!("expression parse failed: {error}");
            ParseFailure::from(error)
        })
}

/// Parse a standalone temporal literal such as `1m5s`.
///
/// Fails unless the entire input is consumed by duration chunks; the
/// failure contract matches [`parse_expression`].
pub fn parse_temporal_literal(input: &str) -> Result<TemporalLiteralExpr, ParseFailure> {
    trace!("parsing temporal literal: {input}");
    let tokens = tokenize(input).map_err(|errors| {
        debug!(
            "lexical scan of temporal literal failed with {} problem(s)",
            errors.len()
        );
        ParseFailure::new(errors)
    })?;
    ExpressionParser::new(tokens, input.len())
        .parse_temporal_literal()
        .map_err(|error| {
            debug!("temporal literal parse failed: {error}");
            ParseFailure::from(error)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_failure_collects_every_lexical_problem() {
        let failure = parse_expression("a @ b ~ c").expect_err("expected failure");
        assert_eq!(failure.problems.len(), 2);
        assert_eq!(failure.problems[0].position, 2);
        assert_eq!(failure.problems[1].position, 6);
    }

    #[test]
    fn temporal_literal_rejects_leftover_tokens() {
        let failure = parse_temporal_literal("5s andmore").expect_err("expected failure");
        assert_eq!(failure.problems.len(), 1);
        assert!(failure.problems[0].message.contains("after temporal literal"));
    }

    #[test]
    fn temporal_literal_rejects_empty_input() {
        assert!(parse_temporal_literal("").is_err());
    }
}
