//! Source code pane rendering with syntax highlighting
//!
//! Displays the Quill program with keyword colouring, the line of the
//! selected token highlighted, and the line of the syntax error (if any)
//! painted in the error colour.
//!
//! Highlighting is line-local except for block comments, whose open state is
//! carried from one line to the next.

use crate::parser::token::{KEYWORDS, SIMPLE_TYPES};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the highlighted line is pinned to. `None` until first render.
    pub target_line_row: Option<usize>,
}

/// Simple syntax highlighting for one line of Quill code
fn highlight_source_code(line: &str, in_comment: &mut bool) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut word = String::new();
    let mut i = 0;

    let comment_style = Style::default().fg(DEFAULT_THEME.dim);

    while i < chars.len() {
        if *in_comment {
            let start = i;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                i += 1;
            }
            if i < chars.len() {
                i += 2;
                *in_comment = false;
            }
            let text: String = chars[start..i].iter().collect();
            spans.push(Span::styled(text, comment_style));
            continue;
        }

        let c = chars[i];

        if c == '/' && chars.get(i + 1) == Some(&'*') {
            flush_word(&mut spans, &mut word, false);
            *in_comment = true;
            spans.push(Span::styled("/*", comment_style));
            i += 2;
            continue;
        }

        if c == '"' {
            flush_word(&mut spans, &mut word, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != '"' {
                end += if chars[end] == '\\' { 2 } else { 1 };
            }
            let end = (end + 1).min(chars.len());
            let text: String = chars[i..end].iter().collect();
            spans.push(Span::styled(text, Style::default().fg(DEFAULT_THEME.literal)));
            i = end;
            continue;
        }

        if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
            word.push(c);
            i += 1;
            continue;
        }

        flush_word(&mut spans, &mut word, c == '(');

        let style = match c {
            '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.accent),
            '@' => Style::default().fg(DEFAULT_THEME.type_name),
            _ => Style::default().fg(DEFAULT_THEME.text),
        };
        spans.push(Span::styled(c.to_string(), style));
        i += 1;
    }

    flush_word(&mut spans, &mut word, false);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String, is_call: bool) {
    if word.is_empty() {
        return;
    }
    let style = get_keyword_style(word, is_call);
    spans.push(Span::styled(std::mem::take(word), style));
}

fn get_keyword_style(word: &str, is_call: bool) -> Style {
    let keyword = KEYWORDS
        .iter()
        .find(|(text, _)| *text == word)
        .map(|(_, kind)| *kind);

    match keyword {
        Some(kind) if kind.is_in(SIMPLE_TYPES) => Style::default().fg(DEFAULT_THEME.type_name),
        Some(_) => Style::default()
            .fg(DEFAULT_THEME.accent)
            .add_modifier(Modifier::BOLD),
        None if matches!(word, "true" | "false" | "null") => {
            Style::default().fg(DEFAULT_THEME.literal)
        }
        None if word.starts_with(|c: char| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.literal)
        }
        None if is_call => Style::default().fg(DEFAULT_THEME.highlight),
        None => Style::default().fg(DEFAULT_THEME.text),
    }
}

/// Render the source code pane. `current_line` and `error_line` are 1-based.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: usize,
    error_line: Option<usize>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = DEFAULT_THEME.border(is_focused);

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);

        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    // Comment state has to be threaded through the lines scrolled past too
    let mut in_comment = false;
    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| (idx, highlight_source_code(line, &mut in_comment)))
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, mut content)| {
            let line_num = idx + 1;
            let is_error = error_line == Some(line_num);
            let is_current = line_num == current_line;

            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.dim)
            };

            if is_error {
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content.spans {
                    span.style = error_style;
                }
            } else if is_current {
                let current_style = Style::default().bg(DEFAULT_THEME.selection_bg);
                for span in &mut content.spans {
                    span.style = span.style.patch(current_style);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
