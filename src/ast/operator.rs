//! Operator and time-unit definitions for the DRLX expression dialect
//!
//! The operator sets are closed: the binary/unary operators come from the
//! base expression grammar, the half-binary set is the relational subset
//! that may appear with an implicit left operand.

use std::fmt;

/// Binary operators of the base expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperator {
    /// Logical OR (`||`)
    Or,
    /// Logical AND (`&&`)
    And,
    /// Bitwise OR (`|`)
    BinOr,
    /// Bitwise XOR (`^`)
    BinXor,
    /// Bitwise AND (`&`)
    BinAnd,
    /// Equality (`==`)
    Equals,
    /// Inequality (`!=`)
    NotEquals,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEquals,
    /// Greater than or equal (`>=`)
    GreaterEquals,
    /// Left shift (`<<`)
    LeftShift,
    /// Signed right shift (`>>`)
    SignedRightShift,
    /// Unsigned right shift (`>>>`)
    UnsignedRightShift,
    /// Addition (`+`)
    Plus,
    /// Subtraction (`-`)
    Minus,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Remainder (`%`)
    Remainder,
}

impl BinaryOperator {
    /// Surface spelling of the operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::BinOr => "|",
            Self::BinXor => "^",
            Self::BinAnd => "&",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEquals => "<=",
            Self::GreaterEquals => ">=",
            Self::LeftShift => "<<",
            Self::SignedRightShift => ">>",
            Self::UnsignedRightShift => ">>>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators of the base expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOperator {
    /// Logical complement (`!`)
    Not,
    /// Arithmetic negation (`-`)
    Negate,
    /// Unary plus (`+`)
    Positive,
}

impl UnaryOperator {
    /// Surface spelling of the operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Negate => "-",
            Self::Positive => "+",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operators that may appear with an implicit left operand.
///
/// Only the equality/relational subset participates in the implicit-operand
/// chaining sugar (`name == "Mark" && == "Mario"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HalfBinaryOperator {
    /// Equality (`==`)
    Equals,
    /// Inequality (`!=`)
    NotEquals,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEquals,
    /// Greater than or equal (`>=`)
    GreaterEquals,
}

impl HalfBinaryOperator {
    /// Surface spelling of the operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEquals => "<=",
            Self::GreaterEquals => ">=",
        }
    }
}

impl fmt::Display for HalfBinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical time units for temporal literal chunks.
///
/// The recognized suffix spellings are fixed at build time; see the unit
/// registry in the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    /// `ms`
    Milliseconds,
    /// `s`
    Seconds,
    /// `m`
    Minutes,
    /// `h`
    Hours,
    /// `d`
    Days,
}

impl TimeUnit {
    /// Canonical suffix spelling, as printed after a chunk value.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_spellings() {
        assert_eq!(BinaryOperator::Or.as_str(), "||");
        assert_eq!(BinaryOperator::UnsignedRightShift.as_str(), ">>>");
        assert_eq!(HalfBinaryOperator::LessEquals.as_str(), "<=");
        assert_eq!(UnaryOperator::Not.as_str(), "!");
    }

    #[test]
    fn time_unit_suffixes() {
        assert_eq!(TimeUnit::Milliseconds.suffix(), "ms");
        assert_eq!(TimeUnit::Days.to_string(), "d");
    }
}
