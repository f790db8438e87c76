//! Token list pane rendering

use crate::parser::token::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// One row of the token list: position, kind, and source text.
fn token_row(token: &Token, is_selected: bool) -> ListItem<'static> {
    let kind_style = if token.is_error() {
        Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.type_name)
    };

    let spans = vec![
        Span::styled(
            format!("{:4}:{:<6}", token.line, token.start),
            Style::default().fg(DEFAULT_THEME.dim),
        ),
        Span::styled(format!("{:<20}", format!("{:?}", token.kind)), kind_style),
        Span::styled(
            format!("{:?}", token.text()),
            Style::default().fg(DEFAULT_THEME.text),
        ),
    ];

    let item = ListItem::new(Line::from(spans));
    if is_selected {
        item.style(
            Style::default()
                .bg(DEFAULT_THEME.selection_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        item
    }
}

/// Render the token list, scrolled so that `selected` stays visible.
pub fn render_token_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = DEFAULT_THEME.border(is_focused);

    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.dim));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    *scroll_offset = follow_selection(*scroll_offset, selected, visible_height, tokens.len());

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| token_row(token, idx == selected))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Smallest scroll change that keeps `selected` inside the window.
fn follow_selection(offset: usize, selected: usize, height: usize, total: usize) -> usize {
    let offset = if selected < offset {
        selected
    } else if selected >= offset + height {
        selected + 1 - height
    } else {
        offset
    };
    offset.min(total.saturating_sub(height))
}
