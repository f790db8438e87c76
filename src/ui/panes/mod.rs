//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code with syntax highlighting, selected-token line and error line
//! - [`tokens`]: The token store, one row per token
//! - [`ast`]: Outline of the parsed program, or the syntax error
//! - [`status`]: Status bar with keybindings and parse state
//!
//! Each pane module exports a stateless `render_*` function; scroll state is
//! owned by [`App`](crate::ui::App) and passed in by reference.

pub mod ast;
pub mod source;
pub mod status;
pub mod tokens;

pub use ast::render_ast_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tokens::render_token_pane;
