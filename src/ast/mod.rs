//! Abstract Syntax Tree (AST) definitions for DRLX expressions
//!
//! These are the types produced by the parser and consumed by the canonical
//! printer. They are lightweight, immutable and free of parsing state.

mod expression;
mod operator;

pub use expression::*;
pub use operator::*;
