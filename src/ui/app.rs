//! Main TUI application state and logic

use crate::parser::ast::Program;
use crate::parser::outline::outline;
use crate::parser::parse::{ParseResult, SyntaxError};
use crate::parser::token::Token;
use crate::ui::panes::{self, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Ast,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> ast)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Ast,
            FocusedPane::Ast => FocusedPane::Source,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Ast,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Ast => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code being explored
    pub source_code: String,

    /// Every token the lexer produced, `Eof` included
    pub tokens: Vec<Token>,

    /// Outline of the parsed program; empty when parsing failed
    pub outline: Vec<String>,

    /// The syntax error that stopped the parse, if any
    pub error: Option<SyntaxError>,

    /// Index into `tokens` of the highlighted token
    pub selected: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub token_scroll: usize,
    pub ast_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new explorer over `tokens` and the outcome of parsing them.
    /// Starts on the offending token when the parse failed.
    pub fn new(source_code: String, tokens: Vec<Token>, parsed: ParseResult<Program>) -> Self {
        let (outline, error) = match parsed {
            Ok(program) => (outline(&program), None),
            Err(err) => (Vec::new(), Some(err)),
        };

        let mut app = App {
            source_code,
            tokens,
            outline,
            error,
            selected: 0,
            focused_pane: FocusedPane::Tokens,
            source_scroll: SourceScrollState::default(),
            token_scroll: 0,
            ast_scroll: 0,
            should_quit: false,
            status_message: String::from("Parsed successfully"),
        };

        if let Some(err) = &app.error {
            app.status_message = err.to_string();
            if let Some(idx) = app.error_index() {
                app.selected = idx;
            }
        }

        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Index of the token the syntax error points at.
    fn error_index(&self) -> Option<usize> {
        let found = self.error.as_ref()?.token();
        self.tokens
            .iter()
            .position(|t| t.start == found.start && t.kind == found.kind)
    }

    fn selected_token(&self) -> Option<&Token> {
        self.tokens.get(self.selected)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Source on the left, tokens above AST on the right
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let current_line = self.selected_token().map_or(0, |t| t.line);
        let error_line = self.error.as_ref().map(|err| err.token().line);

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            current_line,
            error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_token_pane(
            frame,
            right_rows[0],
            &self.tokens,
            self.selected,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        panes::render_ast_pane(
            frame,
            right_rows[1],
            &self.outline,
            self.error.as_ref(),
            self.focused_pane == FocusedPane::Ast,
            &mut self.ast_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            self.tokens.len(),
            self.error.is_some(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => self.select(self.selected.saturating_sub(1)),
            KeyCode::Right => self.select(self.selected.saturating_add(1)),
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tokens => self.select(self.selected.saturating_sub(1)),
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Ast => {
                    self.ast_scroll = self.ast_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tokens => self.select(self.selected.saturating_add(1)),
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Ast => {
                    self.ast_scroll = self.ast_scroll.saturating_add(1);
                }
            },
            KeyCode::Home | KeyCode::Backspace => self.select(0),
            KeyCode::End => self.select(self.tokens.len().saturating_sub(1)),
            KeyCode::Enter => match self.error_index() {
                Some(idx) => self.select(idx),
                None => self.status_message = "No syntax error".to_string(),
            },
            _ => {}
        }
    }

    /// Highlight token `idx`, clamped to the last token.
    fn select(&mut self, idx: usize) {
        self.selected = idx.min(self.tokens.len().saturating_sub(1));
        self.status_message = match self.selected_token() {
            Some(token) => format!(
                "{} at line {}, offset {}",
                token, token.line, token.start
            ),
            None => "No tokens".to_string(),
        };
    }
}
