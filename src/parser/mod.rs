//! Quill source code front end
//!
//! This module transforms Quill source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token kinds, grammar tables, and the token store
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser coordination and [`SyntaxError`]
//! - [`ast`]: AST node definitions
//! - [`outline`]: Indented AST rendering
//!
//! # Language
//!
//! A Quill compilation unit is a list of imports followed by a single class
//! whose body is a block of declarations and statements:
//! - Types: `int`, `boolean`, `string`, lists `@[T]`, key-value maps `@@[K:V]`
//! - Closures: `{ a, b : int -> statements }`, declared with `def f = ...`
//! - Statements: assignment, `print`, `while`, `while*`, `if`/`else`, `%expr`, `return`
//! - Ranges `low..high`, only as the condition of `while*`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one loop per binary operator level.
//! Parsing stops at the first syntax error.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod outline;
pub mod parse;
mod statements;
pub mod token;

pub use expressions::RangeMode;
pub use lexer::{tokenize, Lexer};
pub use outline::outline;
pub use parse::{parse_source, ParseResult, Parser, SyntaxError};
pub use token::{Kind, Token, TokenStream};
