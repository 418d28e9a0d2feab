//! Expression AST node definitions
//!
//! Every node is created exactly once by the parser and never mutated; the
//! canonical printer is the only structural consumer. The node set is a
//! closed sum type so the printer and any traversal can match exhaustively.

use crate::ast::operator::{BinaryOperator, HalfBinaryOperator, TimeUnit, UnaryOperator};

/// A parsed top-level rule expression: an optional `$name :` binding plus
/// the bound expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrlxExpression {
    /// Binding identifier, stored without the leading `$`.
    pub bind: Option<String>,
    /// The wrapped expression.
    pub expr: Expression,
}

impl DrlxExpression {
    /// Wrap an expression with no binding.
    pub fn unbound(expr: Expression) -> Self {
        Self { bind: None, expr }
    }

    /// Wrap an expression bound to `$name`.
    pub fn bound(name: impl Into<String>, expr: Expression) -> Self {
        Self {
            bind: Some(name.into()),
            expr,
        }
    }
}

/// AST representation of DRLX expressions.
///
/// The first group of variants is the base expression grammar; the second
/// group holds the dialect extensions (point-free operators, OOPath
/// navigation, temporal literals, half-binary clauses, inline casts and
/// null-safe access).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    /// Integer literal (e.g. `42`)
    IntegerLiteral(i64),

    /// Decimal literal, stored as written to preserve precision
    DecimalLiteral(String),

    /// String literal; the stored text is the raw content between the
    /// quotes, escapes untouched
    StringLiteral(String),

    /// Boolean literal
    BooleanLiteral(bool),

    /// The `null` literal
    NullLiteral,

    /// The `this` reference
    This,

    /// Name reference, with the number of `../` backreference markers
    /// written before it inside an OOPath filter condition
    Name {
        /// Referenced name (a `$`-prefixed binding reference keeps its `$`)
        name: String,
        /// Count of `../` markers preceding the name; 0 outside path filters
        backreferences: u32,
    },

    /// Field access (`scope.field`)
    FieldAccess {
        /// Scope expression
        scope: Box<Expression>,
        /// Accessed field name
        field: String,
    },

    /// Method call, with or without an explicit scope (`f(x)`, `a.f(x)`)
    MethodCall {
        /// Scope expression, absent for unqualified calls
        scope: Option<Box<Expression>>,
        /// Method name
        name: String,
        /// Call arguments in textual order
        args: Vec<Expression>,
    },

    /// Array access (`array[index]`)
    ArrayAccess {
        /// Array expression
        array: Box<Expression>,
        /// Index expression
        index: Box<Expression>,
    },

    /// Explicitly parenthesized expression, preserved for verbatim printing
    Parenthesized(Box<Expression>),

    /// Parenthesized cast of the base grammar (`(Type) expr`)
    Cast {
        /// Target type name
        type_name: String,
        /// Cast operand
        expr: Box<Expression>,
    },

    /// Type test (`expr instanceof Type`)
    InstanceOf {
        /// Tested expression
        expr: Box<Expression>,
        /// Type name on the right of `instanceof`
        type_name: String,
    },

    /// Unary operation
    Unary {
        /// The operator
        op: UnaryOperator,
        /// The operand
        operand: Box<Expression>,
    },

    /// Binary operation
    Binary {
        /// The operator
        op: BinaryOperator,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },

    /// Binary expression missing its left operand (`== "Mario"`).
    ///
    /// Recognized as a chained continuation after `&&`/`||`, and accepted
    /// standalone at top level; no operand resolution happens here.
    HalfBinary {
        /// The operator
        op: HalfBinaryOperator,
        /// Right operand
        right: Box<Expression>,
    },

    /// Infix expression with a named custom operator
    /// (`this after[5ms,8d] $a`)
    PointFree {
        /// Left operand
        left: Box<Expression>,
        /// Operator name (an identifier, not a fixed symbol)
        operator: String,
        /// Bracketed arguments; empty when no bracket was written
        args: Vec<Expression>,
        /// Right operand
        right: Box<Expression>,
    },

    /// Object-graph path navigation (`/wife/children[age > 10]/toys`)
    OOPath(OOPathExpr),

    /// Compound duration literal (`1m5s`)
    TemporalLiteral(TemporalLiteralExpr),

    /// Inline cast (`scope#Type`), distinct from the parenthesized cast
    InlineCast {
        /// Scope expression being cast
        scope: Box<Expression>,
        /// Target type name
        type_name: String,
    },

    /// Null-safe field access (`scope!.field`); absent scope short-circuits
    /// the whole access, represented structurally only
    NullSafeFieldAccess {
        /// Scope expression
        scope: Box<Expression>,
        /// Accessed field name
        field: String,
    },
}

/// Ordered sequence of path chunks, left to right as written.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OOPathExpr {
    /// Path chunks in textual order
    pub chunks: Vec<OOPathChunk>,
}

/// One `/segment[condition]` step of an OOPath expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OOPathChunk {
    /// Segment name
    pub field: String,
    /// Optional bracketed filter condition
    pub condition: Option<Expression>,
}

/// Ordered sequence of `(value, unit)` duration chunks; chunks compose
/// additively and keep their as-written order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemporalLiteralExpr {
    /// Duration chunks in textual order
    pub chunks: Vec<TemporalLiteralChunk>,
}

/// One `(value, unit)` component of a temporal literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemporalLiteralChunk {
    /// Non-negative chunk value
    pub value: i64,
    /// Time unit of the chunk
    pub unit: TimeUnit,
}

impl Expression {
    /// Create a name reference with no backreferences.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name {
            name: name.into(),
            backreferences: 0,
        }
    }

    /// Create a field access expression.
    pub fn field_access(scope: Expression, field: impl Into<String>) -> Self {
        Self::FieldAccess {
            scope: Box::new(scope),
            field: field.into(),
        }
    }

    /// Create a binary operation expression.
    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a half-binary expression.
    pub fn half_binary(op: HalfBinaryOperator, right: Expression) -> Self {
        Self::HalfBinary {
            op,
            right: Box::new(right),
        }
    }

    /// Create a unary operation expression.
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a string literal from its raw quoted content.
    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral(value.into())
    }

    /// Get the referenced name if this is a name expression.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Check whether this node is one of the dialect extensions rather than
    /// a base-grammar construct.
    pub fn is_extension(&self) -> bool {
        matches!(
            self,
            Self::HalfBinary { .. }
                | Self::PointFree { .. }
                | Self::OOPath(_)
                | Self::TemporalLiteral(_)
                | Self::InlineCast { .. }
                | Self::NullSafeFieldAccess { .. }
        )
    }
}

impl TemporalLiteralChunk {
    /// Create a chunk from a value and unit.
    pub const fn new(value: i64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let expr = Expression::binary(
            BinaryOperator::Equals,
            Expression::name("name"),
            Expression::string("Mark"),
        );
        match expr {
            Expression::Binary {
                op: BinaryOperator::Equals,
                left,
                right,
            } => {
                assert_eq!(left.as_name(), Some("name"));
                assert_eq!(*right, Expression::StringLiteral("Mark".to_string()));
            }
            other => panic!("expected binary expression, got {other:?}"),
        }
    }

    #[test]
    fn extension_classification() {
        assert!(Expression::half_binary(HalfBinaryOperator::Equals, Expression::string("x"))
            .is_extension());
        assert!(!Expression::name("plain").is_extension());
        assert!(Expression::TemporalLiteral(TemporalLiteralExpr {
            chunks: vec![TemporalLiteralChunk::new(5, TimeUnit::Seconds)],
        })
        .is_extension());
    }

    #[test]
    fn binding_wrapper() {
        let drlx = DrlxExpression::bound("toy", Expression::name("$x"));
        assert_eq!(drlx.bind.as_deref(), Some("toy"));
        assert!(DrlxExpression::unbound(Expression::This).bind.is_none());
    }
}
