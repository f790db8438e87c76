//! # Introduction
//!
//! Quill is the front end of a small closure language: a character-level
//! lexer and a recursive-descent parser that turns a compilation unit into an
//! AST, stopping at the first syntax error.  A terminal explorer built with
//! [ratatui](https://docs.rs/ratatui) shows the tokens, the AST outline and
//! the error side by side with the source.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → TokenStream → Parser → Program | SyntaxError
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds the AST.
//! 2. [`diagnostics`]: renders a [`parser::SyntaxError`] against the source.
//! 3. [`ui`]: ratatui-based explorer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! let program = quill::parse_source("class Hello { print \"hi\"; }").unwrap();
//! assert_eq!(program.class_name, "Hello");
//! ```

pub mod diagnostics;
pub mod parser;
pub mod ui;

pub use parser::parse_source;
