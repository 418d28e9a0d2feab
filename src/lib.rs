//! Parser and canonical printer for the DRLX rule-language expression
//! dialect
//!
//! DRLX extends a Java-like expression grammar with the constructs used by
//! business-rule authoring: OOPath object-graph navigation with inline
//! filters (`/wife/children[age > 10]/toys`), point-free temporal operators
//! (`this after[5ms,8d] $a`), compound duration literals (`1m5s`), inline
//! casts (`this#Person.name`), null-safe field access (`person!.name`) and
//! implicit-left-operand chaining (`name == "Mark" && == "Mario"`).
//!
//! The crate is syntax-only: it parses text into an immutable AST and
//! reconstructs canonical source from it. It does not type-check, simplify
//! or evaluate anything.
//!
//! ```
//! use drlx_parser::{parse_expression, to_source_text};
//!
//! let drlx = parse_expression("$toy : /wife/children[age > 10]/toys").unwrap();
//! assert_eq!(drlx.bind.as_deref(), Some("toy"));
//! assert_eq!(to_source_text(&drlx), "$toy : /wife/children[age > 10]/toys");
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod parser;
pub mod printer;

pub use ast::{
    BinaryOperator, DrlxExpression, Expression, HalfBinaryOperator, OOPathChunk, OOPathExpr,
    TemporalLiteralChunk, TemporalLiteralExpr, TimeUnit, UnaryOperator,
};
pub use parser::{ParseError, ParseFailure, Problem, parse_expression, parse_temporal_literal};
pub use printer::to_source_text;
