//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement ::= lvalue '=' expression
//!             | 'print' expression
//!             | 'while' '*'? '(' expression ')' block
//!             | 'if' '(' expression ')' block ('else' block)?
//!             | '%' expression
//!             | 'return' expression
//!             | (empty)
//! lvalue    ::= IDENT ('[' expression ']')?
//! ```
//!
//! The terminating `;` belongs to the enclosing block or closure, not to the
//! statement.

use crate::parser::ast::*;
use crate::parser::expressions::RangeMode;
use crate::parser::parse::{ParseResult, Parser};
use crate::parser::token::{Kind, STATEMENT_FIRST};

impl Parser {
    /// Parse a statement. `Ok(None)` is the empty statement.
    pub fn parse_statement(&mut self) -> ParseResult<Option<Statement>> {
        if !self.check_any(STATEMENT_FIRST) {
            return Ok(None);
        }

        let statement = match self.kind() {
            Kind::Ident => self.parse_assignment()?,
            Kind::KwWhile => self.parse_while_statement()?,
            Kind::KwIf => self.parse_if_statement()?,
            Kind::KwPrint => {
                let first_token = self.advance();
                let expr = self.parse_expression()?;
                Statement::Print { expr, first_token }
            }
            Kind::Mod => {
                let first_token = self.advance();
                let expr = self.parse_expression()?;
                Statement::Expression { expr, first_token }
            }
            Kind::KwReturn => {
                let first_token = self.advance();
                let expr = self.parse_expression()?;
                Statement::Return { expr, first_token }
            }
            _ => return Ok(None),
        };

        Ok(Some(statement))
    }

    fn parse_assignment(&mut self) -> ParseResult<Statement> {
        let first_token = self.current.clone();
        let lvalue = self.parse_lvalue()?;
        self.expect(Kind::Assign)?;
        let expr = self.parse_expression()?;

        Ok(Statement::Assignment {
            lvalue,
            expr,
            first_token,
        })
    }

    fn parse_lvalue(&mut self) -> ParseResult<LValue> {
        let first_token = self.expect(Kind::Ident)?;
        let name = first_token.text().to_string();

        if !self.check(Kind::LSquare) {
            return Ok(LValue::Ident { name, first_token });
        }

        self.advance();
        let index = self.parse_expression()?;
        self.expect(Kind::RSquare)?;

        Ok(LValue::Indexed {
            name,
            index,
            first_token,
        })
    }

    /// Parse `while`, `while*`, or a range-driven `while*`. Only the starred
    /// form may take a range as its condition.
    fn parse_while_statement(&mut self) -> ParseResult<Statement> {
        let first_token = self.expect(Kind::KwWhile)?;

        let starred = self.check(Kind::Times);
        if starred {
            self.advance();
        }

        self.expect(Kind::LParen)?;
        let mode = if starred {
            RangeMode::Allowed
        } else {
            RangeMode::Forbidden
        };
        let condition = self.parse_expression_in(mode)?;
        self.expect(Kind::RParen)?;
        let block = self.parse_block()?;

        Ok(match condition {
            Expression::Range(range) => Statement::WhileRange {
                range,
                block,
                first_token,
            },
            condition if starred => Statement::WhileStar {
                condition,
                block,
                first_token,
            },
            condition => Statement::While {
                condition,
                block,
                first_token,
            },
        })
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let first_token = self.expect(Kind::KwIf)?;

        self.expect(Kind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(Kind::RParen)?;
        let block = self.parse_block()?;

        if !self.check(Kind::KwElse) {
            return Ok(Statement::If {
                condition,
                block,
                first_token,
            });
        }

        self.advance();
        let else_block = self.parse_block()?;

        Ok(Statement::IfElse {
            condition,
            then_block: block,
            else_block,
            first_token,
        })
    }
}
