//! Expression parsing implementation
//!
//! Four left-associative binary levels, lowest first:
//!
//! ```text
//! expression ::= term  (rel_op term)*        rel_op  ::= | & == != < > <= >=
//! term       ::= elem  (weak_op elem)*       weak_op ::= + -
//! elem       ::= thing (strong_op thing)*    strong_op ::= * /
//! thing      ::= factor (shift_op factor)*   shift_op ::= << >>
//! ```
//!
//! Unary `!` and `-` recurse into `factor`, so they bind tighter than every
//! binary operator.
//!
//! # Range transfer
//!
//! `low..high` is not an ordinary operator. Only a call site parsing with
//! [`RangeMode::Allowed`] may turn a finished relational expression into a
//! range on seeing `..`; the upper bound is parsed with
//! [`RangeMode::Operand`] so ranges cannot nest. Everywhere else `..` is
//! simply left unconsumed and the caller's next `expect` reports it.

use crate::parser::ast::*;
use crate::parser::parse::{ParseResult, Parser, SyntaxError};
use crate::parser::token::{Kind, Precedence, FACTOR_FIRST};

/// Whether an expression call site may become a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    /// Ordinary expression position.
    Forbidden,
    /// The condition of `while*`.
    Allowed,
    /// Already parsing a bound of a range.
    Operand,
}

impl Parser {
    /// Parse an expression in an ordinary position (no range allowed).
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expression_in(RangeMode::Forbidden)
    }

    pub(crate) fn parse_expression_in(&mut self, mode: RangeMode) -> ParseResult<Expression> {
        let left = self.parse_left_assoc(Precedence::Relational, Self::parse_term)?;

        if mode == RangeMode::Allowed && self.check(Kind::Range) {
            return self.parse_range(left);
        }

        Ok(left)
    }

    fn parse_range(&mut self, low: Expression) -> ParseResult<Expression> {
        self.expect(Kind::Range)?;
        let high = self.parse_expression_in(RangeMode::Operand)?;
        let first_token = low.first_token().clone();

        Ok(Expression::Range(RangeExpression {
            low: Box::new(low),
            high: Box::new(high),
            first_token,
        }))
    }

    fn parse_term(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(Precedence::Weak, Self::parse_elem)
    }

    fn parse_elem(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(Precedence::Strong, Self::parse_thing)
    }

    fn parse_thing(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(Precedence::VeryStrong, Self::parse_factor)
    }

    /// One precedence level: operands from `operand`, folded left over any
    /// operator of `level`.
    fn parse_left_assoc(
        &mut self,
        level: Precedence,
        operand: fn(&mut Self) -> ParseResult<Expression>,
    ) -> ParseResult<Expression> {
        let ops = level.operators();
        let mut left = operand(self)?;

        while self.kind().precedence() == Some(level) {
            let op_token = self.expect_any(ops)?;
            let op = BinOp::from_kind(op_token.kind)
                .ok_or_else(|| SyntaxError::expected(op_token.clone(), ops))?;
            let right = operand(self)?;
            let first_token = left.first_token().clone();
            left = Expression::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                first_token,
            };
        }

        Ok(left)
    }

    /// Parse a factor: literals, identifier forms, parenthesized expressions,
    /// unary operators, builtins, closures and collection literals.
    fn parse_factor(&mut self) -> ParseResult<Expression> {
        self.nested(Self::parse_factor_body)
    }

    fn parse_factor_body(&mut self) -> ParseResult<Expression> {
        let first_token = self.current.clone();

        match self.kind() {
            Kind::Ident => {
                let name = self.advance().text().to_string();
                match self.kind() {
                    Kind::LSquare => {
                        self.advance();
                        let index = self.parse_expression()?;
                        self.expect(Kind::RSquare)?;
                        Ok(Expression::IndexedAccess {
                            name,
                            index: Box::new(index),
                            first_token,
                        })
                    }
                    Kind::LParen => {
                        self.advance();
                        let args = self.parse_expression_list()?;
                        self.expect(Kind::RParen)?;
                        Ok(Expression::ClosureEval {
                            name,
                            args,
                            first_token,
                        })
                    }
                    _ => Ok(Expression::Ident { name, first_token }),
                }
            }

            Kind::IntLit => {
                let token = self.advance();
                let value = token
                    .int_value()
                    .ok_or_else(|| SyntaxError::message(token.clone(), "integer literal out of range"))?;
                Ok(Expression::IntLit { value, first_token })
            }

            Kind::BoolTrue | Kind::BoolFalse => {
                let value = self.advance().kind == Kind::BoolTrue;
                Ok(Expression::BooleanLit { value, first_token })
            }

            Kind::StringLit => {
                let value = self.advance().string_value().unwrap_or_default();
                Ok(Expression::StringLit { value, first_token })
            }

            Kind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(Kind::RParen)?;
                Ok(expr)
            }

            Kind::Not | Kind::Minus => {
                let op = if self.advance().kind == Kind::Not {
                    UnOp::Not
                } else {
                    UnOp::Neg
                };
                let operand = self.parse_factor()?;
                Ok(Expression::Unary {
                    op,
                    operand: Box::new(operand),
                    first_token,
                })
            }

            Kind::KwSize | Kind::KwKey | Kind::KwValue => {
                let keyword = self.advance().kind;
                self.expect(Kind::LParen)?;
                let expr = Box::new(self.parse_expression()?);
                self.expect(Kind::RParen)?;
                Ok(match keyword {
                    Kind::KwSize => Expression::Size { expr, first_token },
                    Kind::KwKey => Expression::Key { expr, first_token },
                    _ => Expression::Value { expr, first_token },
                })
            }

            Kind::LCurly => {
                let closure = self.parse_closure()?;
                Ok(Expression::ClosureLiteral {
                    closure,
                    first_token,
                })
            }

            Kind::At => {
                self.advance();
                if self.check(Kind::At) {
                    self.advance();
                    self.expect(Kind::LSquare)?;
                    let entries = self.parse_key_value_list()?;
                    self.expect(Kind::RSquare)?;
                    Ok(Expression::MapList {
                        entries,
                        first_token,
                    })
                } else {
                    self.expect(Kind::LSquare)?;
                    let elements = self.parse_expression_list()?;
                    self.expect(Kind::RSquare)?;
                    Ok(Expression::List {
                        elements,
                        first_token,
                    })
                }
            }

            _ => Err(SyntaxError::message(first_token, "expected an expression")),
        }
    }

    /// Comma-separated expressions, possibly none.
    fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut exprs = Vec::new();

        if !self.check_any(FACTOR_FIRST) {
            return Ok(exprs);
        }

        loop {
            exprs.push(self.parse_expression()?);
            if !self.check(Kind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(exprs)
    }

    fn parse_key_value_list(&mut self) -> ParseResult<Vec<KeyValueExpression>> {
        let mut entries = Vec::new();

        if !self.check_any(FACTOR_FIRST) {
            return Ok(entries);
        }

        loop {
            let key = self.parse_expression()?;
            self.expect(Kind::Colon)?;
            let value = self.parse_expression()?;
            let first_token = key.first_token().clone();
            entries.push(KeyValueExpression {
                key,
                value,
                first_token,
            });

            if !self.check(Kind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(entries)
    }
}
