//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the [`SyntaxError`] type, the token-matching primitives, and the
//! parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses recursive descent with one token of lookahead and no
//! backtracking:
//! - This module: Parser struct, matching helpers, and coordination
//! - `declarations`: program header, blocks, declarations, closures, types
//! - `statements`: statements and lvalues
//! - `expressions`: the four binary operator levels, factors, range transfer
//!
//! # Error policy
//!
//! Every production returns a [`ParseResult`]. The first mismatch becomes the
//! error and is propagated with `?` all the way out; there is no recovery.
//! [`Parser::parse`] records it and returns no program at all.
//!
//! Factors, blocks and types are the recursive productions. Each one runs a
//! level deeper through [`Parser::nested`], and input nested past
//! [`MAX_NESTING_DEPTH`] is rejected with a syntax error instead of
//! exhausting the stack.

use crate::parser::ast::Program;
use crate::parser::lexer::tokenize;
use crate::parser::token::{Kind, Token, TokenStream};
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Deepest combined nesting of factors, blocks and types the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The kinds a production would have accepted at the point of failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedKinds(pub Vec<Kind>);

impl ExpectedKinds {
    pub fn kinds(&self) -> &[Kind] {
        &self.0
    }
}

impl fmt::Display for ExpectedKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{}", single),
            kinds => {
                f.write_str("one of ")?;
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                Ok(())
            }
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Syntax error at line {}, offset {}: expected {expected}, found {found}", .found.line, .found.start)]
    Expected { found: Token, expected: ExpectedKinds },

    #[error("Syntax error at line {}, offset {}: {message}, found {found}", .found.line, .found.start)]
    Message { found: Token, message: String },
}

impl SyntaxError {
    pub fn expected(found: Token, expected: &[Kind]) -> Self {
        Self::Expected {
            found,
            expected: ExpectedKinds(expected.to_vec()),
        }
    }

    pub fn message(found: Token, message: impl Into<String>) -> Self {
        Self::Message {
            found,
            message: message.into(),
        }
    }

    /// The offending token.
    pub fn token(&self) -> &Token {
        match self {
            SyntaxError::Expected { found, .. } | SyntaxError::Message { found, .. } => found,
        }
    }

    /// Expected kinds, empty for free-form errors.
    pub fn expected_kinds(&self) -> &[Kind] {
        match self {
            SyntaxError::Expected { expected, .. } => expected.kinds(),
            SyntaxError::Message { .. } => &[],
        }
    }
}

/// Recursive descent parser for Quill
pub struct Parser {
    pub(crate) stream: TokenStream,
    pub(crate) current: Token,
    errors: Vec<SyntaxError>,
    depth: usize,
}

impl Parser {
    /// Create a parser pulling from an already scanned token store.
    pub fn new(mut stream: TokenStream) -> Self {
        let current = stream.next_token();
        Self {
            stream,
            current,
            errors: Vec::new(),
            depth: 0,
        }
    }

    /// Lex `source` and create a parser over the result.
    pub fn from_source(source: &str) -> Self {
        Self::new(tokenize(source))
    }

    /// Parse a whole compilation unit. Returns `None` if a syntax error was
    /// recorded; see [`Parser::errors`].
    pub fn parse(&mut self) -> Option<Program> {
        debug!("parsing program");
        match self.parse_program() {
            Ok(program) if self.errors.is_empty() => {
                debug!(
                    class = %program.class_name,
                    elems = program.block.elems.len(),
                    "parsed program"
                );
                Some(program)
            }
            Ok(_) => None,
            Err(err) => {
                debug!(%err, "syntax error");
                self.errors.push(err);
                None
            }
        }
    }

    /// Parse a whole compilation unit, which must be followed by end of input.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let program = self.parse_class()?;
        self.expect(Kind::Eof)?;
        Ok(program)
    }

    /// Errors recorded by [`Parser::parse`].
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// The token under the cursor.
    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.stream
    }

    // ===== Helper methods =====

    pub(crate) fn kind(&self) -> Kind {
        self.current.kind
    }

    pub(crate) fn check(&self, kind: Kind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn check_any(&self, kinds: &[Kind]) -> bool {
        self.current.kind.is_in(kinds)
    }

    /// Consume the current token and return it. At `Eof` nothing is consumed.
    pub(crate) fn advance(&mut self) -> Token {
        if self.current.kind == Kind::Eof {
            return self.current.clone();
        }
        let next = self.stream.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Consume a token of `kind` or fail at the current token.
    pub(crate) fn expect(&mut self, kind: Kind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(SyntaxError::expected(self.current.clone(), &[kind]))
        }
    }

    /// Consume a token whose kind is in `kinds` or fail at the current token.
    pub(crate) fn expect_any(&mut self, kinds: &[Kind]) -> ParseResult<Token> {
        if self.check_any(kinds) {
            Ok(self.advance())
        } else {
            Err(SyntaxError::expected(self.current.clone(), kinds))
        }
    }

    /// Run `production` one nesting level deeper. Fails at the current token,
    /// without running it, once [`MAX_NESTING_DEPTH`] would be exceeded.
    pub(crate) fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.enter_nesting()?;
        let result = production(self);
        self.leave_nesting();
        result
    }

    fn enter_nesting(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            self.depth -= 1;
            debug!(line = self.current.line, "nesting limit reached");
            return Err(SyntaxError::message(
                self.current.clone(),
                "nesting too deep",
            ));
        }
        Ok(())
    }

    fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Lex and parse `source` in one go.
pub fn parse_source(source: &str) -> ParseResult<Program> {
    Parser::from_source(source).parse_program()
}
