//! Canonical source reconstruction from the AST
//!
//! One exhaustive match arm per node kind, each emitting exactly the marker
//! tokens its parser production consumes. The single normalization applied
//! anywhere is on duration chunks: every chunk prints with its unit suffix
//! spelled out, so a bracketed point-free argument written as a bare number
//! comes back with the default milliseconds suffix. Everything else prints
//! to the minimal canonical surface syntax (single spaces around infix
//! operators and the binding colon, `, ` between call arguments, `,` between
//! bracketed point-free arguments).

use crate::ast::{
    DrlxExpression, Expression, OOPathChunk, OOPathExpr, TemporalLiteralChunk,
    TemporalLiteralExpr,
};
use std::fmt;

/// Reconstruct canonical source text for any printable AST node.
pub fn to_source_text<T: fmt::Display>(node: &T) -> String {
    node.to_string()
}

impl fmt::Display for DrlxExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(bind) = &self.bind {
            write!(f, "${bind} : ")?;
        }
        write!(f, "{}", self.expr)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegerLiteral(value) => write!(f, "{value}"),
            Self::DecimalLiteral(text) => f.write_str(text),
            Self::StringLiteral(text) => write!(f, "\"{text}\""),
            Self::BooleanLiteral(value) => write!(f, "{value}"),
            Self::NullLiteral => f.write_str("null"),
            Self::This => f.write_str("this"),
            Self::Name {
                name,
                backreferences,
            } => {
                for _ in 0..*backreferences {
                    f.write_str("../")?;
                }
                f.write_str(name)
            }
            Self::FieldAccess { scope, field } => write!(f, "{scope}.{field}"),
            Self::NullSafeFieldAccess { scope, field } => write!(f, "{scope}!.{field}"),
            Self::MethodCall { scope, name, args } => {
                if let Some(scope) = scope {
                    write!(f, "{scope}.")?;
                }
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::ArrayAccess { array, index } => write!(f, "{array}[{index}]"),
            Self::Parenthesized(inner) => write!(f, "({inner})"),
            Self::Cast { type_name, expr } => write!(f, "({type_name}) {expr}"),
            Self::InstanceOf { expr, type_name } => write!(f, "{expr} instanceof {type_name}"),
            Self::Unary { op, operand } => write!(f, "{op}{operand}"),
            Self::Binary { op, left, right } => write!(f, "{left} {op} {right}"),
            Self::HalfBinary { op, right } => write!(f, "{op} {right}"),
            Self::PointFree {
                left,
                operator,
                args,
                right,
            } => {
                write!(f, "{left} {operator}")?;
                if !args.is_empty() {
                    f.write_str("[")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str("]")?;
                }
                write!(f, " {right}")
            }
            Self::OOPath(path) => write!(f, "{path}"),
            Self::TemporalLiteral(literal) => write!(f, "{literal}"),
            Self::InlineCast { scope, type_name } => write!(f, "{scope}#{type_name}"),
        }
    }
}

impl fmt::Display for OOPathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.chunks {
            write!(f, "{chunk}")?;
        }
        Ok(())
    }
}

impl fmt::Display for OOPathChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.field)?;
        if let Some(condition) = &self.condition {
            write!(f, "[{condition}]")?;
        }
        Ok(())
    }
}

impl fmt::Display for TemporalLiteralExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.chunks {
            write!(f, "{chunk}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TemporalLiteralChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, HalfBinaryOperator, TimeUnit};

    #[test]
    fn binary_and_half_binary() {
        let expr = Expression::binary(
            BinaryOperator::And,
            Expression::binary(
                BinaryOperator::Equals,
                Expression::name("name"),
                Expression::string("Mark"),
            ),
            Expression::half_binary(HalfBinaryOperator::Equals, Expression::string("Mario")),
        );
        assert_eq!(to_source_text(&expr), "name == \"Mark\" && == \"Mario\"");
    }

    #[test]
    fn temporal_chunks_concatenate() {
        let literal = TemporalLiteralExpr {
            chunks: vec![
                TemporalLiteralChunk::new(1, TimeUnit::Minutes),
                TemporalLiteralChunk::new(5, TimeUnit::Seconds),
            ],
        };
        assert_eq!(to_source_text(&literal), "1m5s");
    }

    #[test]
    fn path_with_filter_and_backreference() {
        let condition = Expression::binary(
            BinaryOperator::Equals,
            Expression::field_access(Expression::name("name"), "length"),
            Expression::field_access(
                Expression::Name {
                    name: "name".to_string(),
                    backreferences: 2,
                },
                "length",
            ),
        );
        let path = OOPathExpr {
            chunks: vec![
                OOPathChunk {
                    field: "wife".to_string(),
                    condition: None,
                },
                OOPathChunk {
                    field: "toys".to_string(),
                    condition: Some(condition),
                },
            ],
        };
        assert_eq!(
            to_source_text(&path),
            "/wife/toys[name.length == ../../name.length]"
        );
    }

    #[test]
    fn point_free_argument_separator_has_no_space() {
        let expr = Expression::PointFree {
            left: Box::new(Expression::This),
            operator: "after".to_string(),
            args: vec![
                Expression::TemporalLiteral(TemporalLiteralExpr {
                    chunks: vec![TemporalLiteralChunk::new(5, TimeUnit::Milliseconds)],
                }),
                Expression::TemporalLiteral(TemporalLiteralExpr {
                    chunks: vec![TemporalLiteralChunk::new(8, TimeUnit::Days)],
                }),
            ],
            right: Box::new(Expression::name("$a")),
        };
        assert_eq!(to_source_text(&expr), "this after[5ms,8d] $a");
    }

    #[test]
    fn binding_prefix() {
        let drlx = DrlxExpression::bound("toy", Expression::name("x"));
        assert_eq!(to_source_text(&drlx), "$toy : x");
    }
}
