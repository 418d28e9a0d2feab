//! Precedence-climbing parser for DRLX expressions
//!
//! The base expression grammar (literals, names, member access, calls,
//! unary and binary operators with Java-style precedence) is parsed with a
//! single climbing loop over a data-driven precedence table. The dialect
//! productions hook in at exactly the positions where the base grammar has
//! no continuation:
//!
//! - `/` at primary position starts an OOPath (never valid base division
//!   there);
//! - `.` at primary position starts a `../` backreference run (never valid
//!   base member access there);
//! - an equality/relational operator at primary position yields a
//!   half-binary expression with an implicit left operand;
//! - a registered operator name after a complete operand, where no binary
//!   operator can continue, starts the point-free production;
//! - `#Type` and `!.field` are postfix continuations on their own marker
//!   tokens.

use super::error::{ParseError, ParseResult};
use super::lexer::TokenStream;
use super::span::Spanned;
use super::tokenizer::Token;
use crate::ast::{
    BinaryOperator, DrlxExpression, Expression, HalfBinaryOperator, OOPathChunk, OOPathExpr,
    TemporalLiteralChunk, TemporalLiteralExpr, TimeUnit, UnaryOperator,
};
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Recognized point-free operator names, fixed at build time: the temporal
/// relations plus the relational operators rules spell as words.
static POINT_FREE_OPERATORS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "after",
        "before",
        "coincides",
        "during",
        "finishes",
        "finishedby",
        "includes",
        "meets",
        "metby",
        "overlaps",
        "overlappedby",
        "starts",
        "startedby",
        "contains",
        "excludes",
        "memberOf",
        "matches",
        "soundslike",
        "str",
    ]
    .into_iter()
    .collect()
});

/// Check whether `name` is a recognized point-free operator.
pub fn is_point_free_operator(name: &str) -> bool {
    POINT_FREE_OPERATORS.contains(name)
}

/// Operator precedence levels (higher = tighter binding).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Logical OR (`||`), the loosest binding
    Or = 1,
    /// Logical AND (`&&`)
    And = 2,
    /// Bitwise OR (`|`)
    BinOr = 3,
    /// Bitwise XOR (`^`)
    BinXor = 4,
    /// Bitwise AND (`&`)
    BinAnd = 5,
    /// Equality operators (`==`, `!=`)
    Equality = 6,
    /// Relational operators (`<`, `>`, `<=`, `>=`, `instanceof`) and
    /// point-free operators
    Relational = 7,
    /// Shift operators (`<<`, `>>`, `>>>`)
    Shift = 8,
    /// Additive operators (`+`, `-`)
    Additive = 9,
    /// Multiplicative operators (`*`, `/`, `%`)
    Multiplicative = 10,
    /// Unary operators (`!`, `-`, `+`) and casts
    Unary = 11,
}

impl Precedence {
    /// Next tighter level, used for the right operand of a left-associative
    /// operator.
    pub const fn next_level(self) -> Self {
        match self {
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::BinOr,
            Precedence::BinOr => Precedence::BinXor,
            Precedence::BinXor => Precedence::BinAnd,
            Precedence::BinAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Shift,
            Precedence::Shift => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary => Precedence::Unary,
        }
    }
}

/// Precedence of a binary-continuation token, `None` for anything that
/// cannot continue a binary chain.
fn get_precedence(token: &Token<'_>) -> Option<Precedence> {
    match token {
        Token::OrOr => Some(Precedence::Or),
        Token::AndAnd => Some(Precedence::And),
        Token::Pipe => Some(Precedence::BinOr),
        Token::Caret => Some(Precedence::BinXor),
        Token::Amp => Some(Precedence::BinAnd),
        Token::Eq | Token::NotEq => Some(Precedence::Equality),
        Token::Lt | Token::Gt | Token::Le | Token::Ge | Token::InstanceOf => {
            Some(Precedence::Relational)
        }
        Token::Shl | Token::Shr | Token::UShr => Some(Precedence::Shift),
        Token::Plus | Token::Minus => Some(Precedence::Additive),
        Token::Star | Token::Slash | Token::Percent => Some(Precedence::Multiplicative),
        _ => None,
    }
}

fn token_to_binary_op(token: &Token<'_>) -> Option<BinaryOperator> {
    match token {
        Token::OrOr => Some(BinaryOperator::Or),
        Token::AndAnd => Some(BinaryOperator::And),
        Token::Pipe => Some(BinaryOperator::BinOr),
        Token::Caret => Some(BinaryOperator::BinXor),
        Token::Amp => Some(BinaryOperator::BinAnd),
        Token::Eq => Some(BinaryOperator::Equals),
        Token::NotEq => Some(BinaryOperator::NotEquals),
        Token::Lt => Some(BinaryOperator::Less),
        Token::Gt => Some(BinaryOperator::Greater),
        Token::Le => Some(BinaryOperator::LessEquals),
        Token::Ge => Some(BinaryOperator::GreaterEquals),
        Token::Shl => Some(BinaryOperator::LeftShift),
        Token::Shr => Some(BinaryOperator::SignedRightShift),
        Token::UShr => Some(BinaryOperator::UnsignedRightShift),
        Token::Plus => Some(BinaryOperator::Plus),
        Token::Minus => Some(BinaryOperator::Minus),
        Token::Star => Some(BinaryOperator::Multiply),
        Token::Slash => Some(BinaryOperator::Divide),
        Token::Percent => Some(BinaryOperator::Remainder),
        _ => None,
    }
}

fn token_to_half_op(token: &Token<'_>) -> Option<HalfBinaryOperator> {
    match token {
        Token::Eq => Some(HalfBinaryOperator::Equals),
        Token::NotEq => Some(HalfBinaryOperator::NotEquals),
        Token::Lt => Some(HalfBinaryOperator::Less),
        Token::Gt => Some(HalfBinaryOperator::Greater),
        Token::Le => Some(HalfBinaryOperator::LessEquals),
        Token::Ge => Some(HalfBinaryOperator::GreaterEquals),
        _ => None,
    }
}

/// Can this token begin a primary expression? Used by the cast lookahead to
/// tell `(Type) operand` from a parenthesized expression.
fn starts_primary(token: &Token<'_>) -> bool {
    matches!(
        token,
        Token::Identifier(_)
            | Token::Integer(_)
            | Token::Decimal(_)
            | Token::String(_)
            | Token::DurationChunk { .. }
            | Token::True
            | Token::False
            | Token::Null
            | Token::This
            | Token::LeftParen
            | Token::Bang
    )
}

/// Recursive-descent parser with precedence climbing.
///
/// A parser instance is constructed fresh for every entry-point call and
/// owns its token stream; no state is shared between calls.
pub struct ExpressionParser<'input> {
    tokens: TokenStream<'input>,
}

impl<'input> ExpressionParser<'input> {
    /// Create a parser over a scanned token stream. `input_len` is the byte
    /// length of the source, used to position end-of-input errors.
    pub fn new(tokens: Vec<Spanned<Token<'input>>>, input_len: usize) -> Self {
        Self {
            tokens: TokenStream::new(tokens, input_len),
        }
    }

    /// Parse a whole rule expression: optional `$name :` binding, one
    /// expression, end of input.
    pub fn parse_drlx_expression(&mut self) -> ParseResult<DrlxExpression> {
        let bind = self.parse_binding_prefix();
        let expr = self.parse_expression()?;
        if let Some(token) = self.tokens.peek() {
            return Err(ParseError::Syntax {
                position: token.start,
                message: format!("unexpected trailing token {:?}", token.value),
            });
        }
        Ok(match bind {
            Some(name) => DrlxExpression::bound(name, expr),
            None => DrlxExpression::unbound(expr),
        })
    }

    /// Parse a standalone temporal literal: one or more duration chunks
    /// consuming the entire input.
    pub fn parse_temporal_literal(&mut self) -> ParseResult<TemporalLiteralExpr> {
        let mut chunks = Vec::new();
        while let Some(Token::DurationChunk { value, unit }) = self.current() {
            self.tokens.next();
            chunks.push(TemporalLiteralChunk::new(value, unit));
        }
        if let Some(error) = self.glued_unit_error() {
            return Err(error);
        }
        if chunks.is_empty() {
            return Err(match self.tokens.peek() {
                Some(token) => ParseError::Syntax {
                    position: token.start,
                    message: format!("expected temporal literal, found {:?}", token.value),
                },
                None => self.incomplete("expected temporal literal"),
            });
        }
        if let Some(token) = self.tokens.peek() {
            return Err(ParseError::Syntax {
                position: token.start,
                message: format!("unexpected token {:?} after temporal literal", token.value),
            });
        }
        Ok(TemporalLiteralExpr { chunks })
    }

    /// Parse one expression at the loosest precedence.
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expression_with_precedence(Precedence::Or)
    }

    /// A leading `$name :` introduces a binding. Plain identifiers followed
    /// by a colon are left alone; the dollar is what marks the prefix.
    fn parse_binding_prefix(&mut self) -> Option<String> {
        let name = self.tokens.peek()?.value.as_identifier()?;
        if !name.starts_with('$') || name.len() < 2 {
            return None;
        }
        if self.tokens.peek_ahead(1).map(|t| t.value) != Some(Token::Colon) {
            return None;
        }
        self.tokens.next();
        self.tokens.next();
        Some(name[1..].to_string())
    }

    #[inline]
    fn current(&self) -> Option<Token<'input>> {
        self.tokens.peek().map(|t| t.value)
    }

    fn syntax_error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            position: self.tokens.offset(),
            message: message.into(),
        }
    }

    fn incomplete(&self, message: impl Into<String>) -> ParseError {
        ParseError::Incomplete {
            position: self.tokens.input_len(),
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: Token<'input>, what: &str) -> ParseResult<()> {
        match self.tokens.peek() {
            Some(token)
                if std::mem::discriminant(&token.value) == std::mem::discriminant(&expected) =>
            {
                self.tokens.next();
                Ok(())
            }
            Some(token) => Err(ParseError::Syntax {
                position: token.start,
                message: format!("expected {what}, found {:?}", token.value),
            }),
            None => Err(self.incomplete(format!("expected {what}"))),
        }
    }

    fn expect_identifier(&mut self, what: &str) -> ParseResult<&'input str> {
        match self.tokens.peek() {
            Some(token) => match token.value.as_identifier() {
                Some(name) => {
                    self.tokens.next();
                    Ok(name)
                }
                None => Err(ParseError::Syntax {
                    position: token.start,
                    message: format!("expected {what}, found {:?}", token.value),
                }),
            },
            None => Err(self.incomplete(format!("expected {what}"))),
        }
    }

    /// Core climbing loop. `min` is the loosest operator this level may
    /// consume; the right operand of a left-associative operator parses one
    /// level tighter.
    fn parse_expression_with_precedence(&mut self, min: Precedence) -> ParseResult<Expression> {
        let mut left = self.parse_primary()?;
        left = self.parse_postfix(left)?;

        loop {
            let Some(token) = self.current() else { break };

            let Some(precedence) = get_precedence(&token) else {
                // An identifier after a complete operand is never a base
                // continuation, so the base grammar is exhausted here: a
                // registered operator name starts the point-free production.
                if let Token::Identifier(name) = token {
                    if is_point_free_operator(name) && Precedence::Relational as u8 >= min as u8 {
                        self.tokens.next();
                        left = self.parse_point_free(left, name)?;
                        continue;
                    }
                }
                break;
            };
            if (precedence as u8) < (min as u8) {
                break;
            }

            if token == Token::InstanceOf {
                self.tokens.next();
                let type_name = self.parse_type_name()?;
                left = Expression::InstanceOf {
                    expr: Box::new(left),
                    type_name,
                };
                continue;
            }

            let op = token_to_binary_op(&token)
                .ok_or_else(|| self.syntax_error(format!("expected binary operator, found {token:?}")))?;
            self.tokens.next();
            let right = self.parse_expression_with_precedence(precedence.next_level())?;
            left = Expression::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let Some(token) = self.current() else {
            return Err(self.incomplete("expected expression"));
        };

        // Implicit-left-operand clause: a relational operator where an
        // operand was expected. The right operand parses at the same level
        // the full binary expression would use, so the clause folds into an
        // enclosing `&&`/`||` chain unchanged.
        if let Some(op) = token_to_half_op(&token) {
            let level = match token {
                Token::Eq | Token::NotEq => Precedence::Equality,
                _ => Precedence::Relational,
            };
            self.tokens.next();
            let right = self.parse_expression_with_precedence(level.next_level())?;
            return Ok(Expression::half_binary(op, right));
        }

        match token {
            Token::Integer(value) => {
                self.tokens.next();
                Ok(Expression::IntegerLiteral(value))
            }
            Token::Decimal(text) => {
                self.tokens.next();
                Ok(Expression::DecimalLiteral(text.to_string()))
            }
            Token::String(text) => {
                self.tokens.next();
                Ok(Expression::StringLiteral(text.to_string()))
            }
            Token::True => {
                self.tokens.next();
                Ok(Expression::BooleanLiteral(true))
            }
            Token::False => {
                self.tokens.next();
                Ok(Expression::BooleanLiteral(false))
            }
            Token::Null => {
                self.tokens.next();
                Ok(Expression::NullLiteral)
            }
            Token::This => {
                self.tokens.next();
                Ok(Expression::This)
            }
            Token::DurationChunk { .. } => self.parse_temporal_run(),
            Token::Identifier(name) => {
                self.tokens.next();
                if self.current() == Some(Token::LeftParen) {
                    let args = self.parse_call_arguments()?;
                    Ok(Expression::MethodCall {
                        scope: None,
                        name: name.to_string(),
                        args,
                    })
                } else {
                    Ok(Expression::name(name))
                }
            }
            // A path segment where an operand is expected: `/` cannot be
            // division here, so it short-circuits into the path production.
            Token::Slash => self.parse_oopath(),
            // Same reasoning for `.`: only a backreference run can start
            // with a dot at operand position.
            Token::Dot => self.parse_backreference_name(),
            Token::LeftParen => self.parse_parenthesized_or_cast(),
            Token::Bang => {
                self.tokens.next();
                let operand = self.parse_expression_with_precedence(Precedence::Unary)?;
                Ok(Expression::unary(UnaryOperator::Not, operand))
            }
            Token::Minus => {
                self.tokens.next();
                let operand = self.parse_expression_with_precedence(Precedence::Unary)?;
                Ok(Expression::unary(UnaryOperator::Negate, operand))
            }
            Token::Plus => {
                self.tokens.next();
                let operand = self.parse_expression_with_precedence(Precedence::Unary)?;
                Ok(Expression::unary(UnaryOperator::Positive, operand))
            }
            other => Err(self.syntax_error(format!("unexpected token {other:?}"))),
        }
    }

    /// Postfix continuations: member access, calls, indexing, and the
    /// dialect markers `#Type` and `!.field`.
    fn parse_postfix(&mut self, mut left: Expression) -> ParseResult<Expression> {
        loop {
            match self.current() {
                Some(Token::Dot) => {
                    self.tokens.next();
                    let name = self.expect_identifier("member name after '.'")?;
                    if self.current() == Some(Token::LeftParen) {
                        let args = self.parse_call_arguments()?;
                        left = Expression::MethodCall {
                            scope: Some(Box::new(left)),
                            name: name.to_string(),
                            args,
                        };
                    } else {
                        left = Expression::field_access(left, name);
                    }
                }
                Some(Token::NullSafeDot) => {
                    self.tokens.next();
                    let field = self.expect_identifier("field name after '!.'")?;
                    left = Expression::NullSafeFieldAccess {
                        scope: Box::new(left),
                        field: field.to_string(),
                    };
                }
                Some(Token::Hash) => {
                    self.tokens.next();
                    let type_name = self.expect_identifier("type name after '#'")?;
                    left = Expression::InlineCast {
                        scope: Box::new(left),
                        type_name: type_name.to_string(),
                    };
                }
                Some(Token::LeftBracket) => {
                    self.tokens.next();
                    let index = self.parse_expression()?;
                    self.expect(Token::RightBracket, "']' after index expression")?;
                    left = Expression::ArrayAccess {
                        array: Box::new(left),
                        index: Box::new(index),
                    };
                }
                _ => break,
            }
        }
        Ok(left)
    }

    /// Point-free production, entered with the operator name consumed:
    /// optional non-empty bracketed argument list, then the right operand at
    /// relational strength.
    fn parse_point_free(&mut self, left: Expression, operator: &str) -> ParseResult<Expression> {
        let args = if self.current() == Some(Token::LeftBracket) {
            self.tokens.next();
            self.parse_point_free_arguments()?
        } else {
            Vec::new()
        };
        let right = self.parse_expression_with_precedence(Precedence::Relational.next_level())?;
        Ok(Expression::PointFree {
            left: Box::new(left),
            operator: operator.to_string(),
            args,
            right: Box::new(right),
        })
    }

    fn parse_point_free_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        if self.current() == Some(Token::RightBracket) {
            return Err(self.syntax_error("empty argument list in point-free operator"));
        }
        let mut args = Vec::new();
        loop {
            args.push(self.parse_point_free_argument()?);
            if let Some(error) = self.glued_unit_error() {
                return Err(error);
            }
            match self.tokens.peek() {
                Some(token) if token.value == Token::Comma => {
                    self.tokens.next();
                }
                Some(token) if token.value == Token::RightBracket => {
                    self.tokens.next();
                    break;
                }
                Some(token) => {
                    return Err(ParseError::Syntax {
                        position: token.start,
                        message: format!(
                            "expected ',' or ']' in argument list, found {:?}",
                            token.value
                        ),
                    });
                }
                None => return Err(self.incomplete("unclosed argument list")),
            }
        }
        Ok(args)
    }

    /// One bracketed point-free argument. A run of duration chunks is one
    /// temporal literal; a bare integer defaults to milliseconds; anything
    /// else is an ordinary sub-expression.
    fn parse_point_free_argument(&mut self) -> ParseResult<Expression> {
        if let Some(error) = self.glued_unit_error() {
            return Err(error);
        }
        match self.current() {
            Some(Token::DurationChunk { .. }) => self.parse_temporal_run(),
            Some(Token::Integer(value)) => {
                self.tokens.next();
                Ok(Expression::TemporalLiteral(TemporalLiteralExpr {
                    chunks: vec![TemporalLiteralChunk::new(value, TimeUnit::Milliseconds)],
                }))
            }
            Some(_) => self.parse_expression(),
            None => Err(self.incomplete("expected argument")),
        }
    }

    /// A unit suffix the scanner did not recognize shows up as an identifier
    /// glued to an integer; report it as the lexical error it is instead of
    /// letting the grammar trip over the leftover identifier.
    fn glued_unit_error(&self) -> Option<ParseError> {
        let first = self.tokens.peek()?;
        let Token::Integer(_) = first.value else {
            return None;
        };
        let next = self.tokens.peek_ahead(1)?;
        let Token::Identifier(suffix) = next.value else {
            return None;
        };
        (next.start == first.end).then(|| ParseError::Lexical {
            position: next.start,
            message: format!("unrecognized time unit '{suffix}'"),
        })
    }

    /// A consecutive run of duration-chunk tokens as one temporal literal.
    fn parse_temporal_run(&mut self) -> ParseResult<Expression> {
        let mut chunks = Vec::new();
        while let Some(Token::DurationChunk { value, unit }) = self.current() {
            self.tokens.next();
            chunks.push(TemporalLiteralChunk::new(value, unit));
        }
        Ok(Expression::TemporalLiteral(TemporalLiteralExpr { chunks }))
    }

    /// OOPath production: `/segment[condition]?` repeated. Conditions are
    /// full expressions, inside which `/` is ordinary division again.
    fn parse_oopath(&mut self) -> ParseResult<Expression> {
        let mut chunks = Vec::new();
        while self.current() == Some(Token::Slash) {
            self.tokens.next();
            let field = self.expect_identifier("path segment name after '/'")?;
            let condition = if self.current() == Some(Token::LeftBracket) {
                self.tokens.next();
                let condition = self.parse_expression()?;
                self.expect(Token::RightBracket, "']' closing path filter")?;
                Some(condition)
            } else {
                None
            };
            chunks.push(OOPathChunk {
                field: field.to_string(),
                condition,
            });
        }
        Ok(Expression::OOPath(OOPathExpr { chunks }))
    }

    /// Backreference run inside a path filter: each `../` adds one level.
    /// The count is attached to the name node; nothing is resolved here.
    fn parse_backreference_name(&mut self) -> ParseResult<Expression> {
        let mut backreferences = 0u32;
        while self.current() == Some(Token::Dot) {
            self.tokens.next();
            self.expect(Token::Dot, "'..' in backreference marker")?;
            self.expect(Token::Slash, "'/' after '..'")?;
            backreferences += 1;
        }
        let name = self.expect_identifier("name after backreference marker")?;
        Ok(Expression::Name {
            name: name.to_string(),
            backreferences,
        })
    }

    /// Number of lookahead tokens forming `Type)` if the parenthesis at the
    /// current position opens a cast, `None` if it opens an ordinary
    /// parenthesized expression.
    fn cast_lookahead(&self) -> Option<usize> {
        let mut i = 1;
        self.tokens.peek_ahead(i)?.value.as_identifier()?;
        i += 1;
        while self.tokens.peek_ahead(i).map(|t| t.value) == Some(Token::Dot)
            && self
                .tokens
                .peek_ahead(i + 1)
                .is_some_and(|t| t.value.as_identifier().is_some())
        {
            i += 2;
        }
        if self.tokens.peek_ahead(i).map(|t| t.value) != Some(Token::RightParen) {
            return None;
        }
        let after = self.tokens.peek_ahead(i + 1)?;
        if starts_primary(&after.value) { Some(i) } else { None }
    }

    fn parse_parenthesized_or_cast(&mut self) -> ParseResult<Expression> {
        if self.cast_lookahead().is_some() {
            self.tokens.next();
            let type_name = self.parse_type_name()?;
            self.expect(Token::RightParen, "')' closing cast")?;
            let expr = self.parse_expression_with_precedence(Precedence::Unary)?;
            return Ok(Expression::Cast {
                type_name,
                expr: Box::new(expr),
            });
        }
        self.tokens.next();
        let inner = self.parse_expression()?;
        self.expect(Token::RightParen, "')' closing parenthesized expression")?;
        Ok(Expression::Parenthesized(Box::new(inner)))
    }

    /// A possibly dot-qualified type name.
    fn parse_type_name(&mut self) -> ParseResult<String> {
        let mut name = self.expect_identifier("type name")?.to_string();
        while self.current() == Some(Token::Dot) {
            self.tokens.next();
            let part = self.expect_identifier("type name segment")?;
            name.push('.');
            name.push_str(part);
        }
        Ok(name)
    }

    fn parse_call_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        self.expect(Token::LeftParen, "'(' opening argument list")?;
        let mut args = Vec::new();
        if self.current() == Some(Token::RightParen) {
            self.tokens.next();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            match self.tokens.peek() {
                Some(token) if token.value == Token::Comma => {
                    self.tokens.next();
                }
                Some(token) if token.value == Token::RightParen => {
                    self.tokens.next();
                    break;
                }
                Some(token) => {
                    return Err(ParseError::Syntax {
                        position: token.start,
                        message: format!("expected ',' or ')' in arguments, found {:?}", token.value),
                    });
                }
                None => return Err(self.incomplete("unclosed argument list")),
            }
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenizer::tokenize;

    fn parse(input: &str) -> DrlxExpression {
        let tokens = tokenize(input).expect("tokenize failed");
        ExpressionParser::new(tokens, input.len())
            .parse_drlx_expression()
            .expect("parse failed")
    }

    fn parse_err(input: &str) -> ParseError {
        let tokens = tokenize(input).expect("tokenize failed");
        ExpressionParser::new(tokens, input.len())
            .parse_drlx_expression()
            .expect_err("parse unexpectedly succeeded")
    }

    #[test]
    fn precedence_ordering() {
        assert!(Precedence::Multiplicative > Precedence::Additive);
        assert!(Precedence::Additive > Precedence::Relational);
        assert!(Precedence::Equality > Precedence::And);
        assert!(Precedence::And > Precedence::Or);
    }

    #[test]
    fn arithmetic_precedence() {
        let drlx = parse("2 + 3 * 4");
        match drlx.expr {
            Expression::Binary {
                op: BinaryOperator::Plus,
                left,
                right,
            } => {
                assert_eq!(*left, Expression::IntegerLiteral(2));
                assert!(matches!(
                    *right,
                    Expression::Binary {
                        op: BinaryOperator::Multiply,
                        ..
                    }
                ));
            }
            other => panic!("expected addition at the top, got {other:?}"),
        }
    }

    #[test]
    fn slash_is_division_after_an_operand() {
        let drlx = parse("a / b");
        assert!(matches!(
            drlx.expr,
            Expression::Binary {
                op: BinaryOperator::Divide,
                ..
            }
        ));
    }

    #[test]
    fn slash_at_operand_position_is_a_path() {
        let drlx = parse("/wife/children");
        match drlx.expr {
            Expression::OOPath(path) => {
                assert_eq!(path.chunks.len(), 2);
                assert_eq!(path.chunks[0].field, "wife");
                assert!(path.chunks[1].condition.is_none());
            }
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn division_inside_path_filter() {
        let drlx = parse("/children[age / 2 > 5]");
        let Expression::OOPath(path) = drlx.expr else {
            panic!("expected path");
        };
        let condition = path.chunks[0].condition.as_ref().expect("missing filter");
        assert!(matches!(
            condition,
            Expression::Binary {
                op: BinaryOperator::Greater,
                ..
            }
        ));
    }

    #[test]
    fn point_free_needs_relational_context() {
        // `after` binds like a relational operator, so it is available as
        // the operand of `&&`.
        let drlx = parse("this after $a && done");
        assert!(matches!(
            drlx.expr,
            Expression::Binary {
                op: BinaryOperator::And,
                ..
            }
        ));
    }

    #[test]
    fn method_calls_win_over_point_free() {
        let drlx = parse("value.length() > getLimit(2)");
        match drlx.expr {
            Expression::Binary {
                op: BinaryOperator::Greater,
                left,
                right,
            } => {
                assert!(matches!(*left, Expression::MethodCall { scope: Some(_), .. }));
                assert!(matches!(*right, Expression::MethodCall { scope: None, .. }));
            }
            other => panic!("expected comparison, got {other:?}"),
        }
    }

    #[test]
    fn cast_lookahead_vs_parenthesized() {
        let drlx = parse("(Person)this");
        assert!(matches!(drlx.expr, Expression::Cast { .. }));

        let drlx = parse("(a) + b");
        assert!(matches!(
            drlx.expr,
            Expression::Binary {
                op: BinaryOperator::Plus,
                ..
            }
        ));
    }

    #[test]
    fn trailing_tokens_rejected() {
        let err = parse_err("a == b c d");
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn incomplete_input_classified() {
        let err = parse_err("this after[5,");
        assert!(matches!(err, ParseError::Incomplete { .. }));
        assert_eq!(err.position(), "this after[5,".len());
    }

    #[test]
    fn empty_point_free_arguments_rejected() {
        let err = parse_err("this after[] $a");
        assert!(matches!(err, ParseError::Syntax { .. }));
    }
}
