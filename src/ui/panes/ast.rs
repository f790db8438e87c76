//! AST outline pane rendering

use crate::parser::parse::SyntaxError;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

/// Render the outline of the parsed program, or the syntax error that
/// prevented one.
pub fn render_ast_pane(
    frame: &mut Frame,
    area: Rect,
    outline: &[String],
    error: Option<&SyntaxError>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = DEFAULT_THEME.border(is_focused);

    let block = Block::default()
        .title(" AST ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if let Some(err) = error {
        let text = vec![
            Line::from(Span::styled(
                "No program: parsing stopped at the first error.",
                Style::default().fg(DEFAULT_THEME.dim),
            )),
            Line::default(),
            Line::from(Span::styled(
                err.to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    if outline.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(outline.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = outline
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| outline_row(line))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Node label in the foreground colour, trailing `@line` dimmed.
fn outline_row(line: &str) -> ListItem<'static> {
    let (label, at) = match line.rfind(" @") {
        Some(idx) => line.split_at(idx),
        None => (line, ""),
    };
    ListItem::new(Line::from(vec![
        Span::styled(label.to_string(), Style::default().fg(DEFAULT_THEME.text)),
        Span::styled(at.to_string(), Style::default().fg(DEFAULT_THEME.dim)),
    ]))
}
