use ratatui::style::{Color, Modifier, Style};

/// Colours by role in the explorer rather than by token category.
pub struct Theme {
    pub text: Color,
    pub dim: Color,       // comments, idle borders, line numbers
    pub accent: Color,    // keywords, brackets, status mode badge
    pub highlight: Color, // focused border, call names, current line number
    pub literal: Color,   // strings, numbers, true/false/null
    pub type_name: Color,
    pub ok: Color,
    pub error: Color,
    pub selection_bg: Color,
}

impl Theme {
    /// Border style for a pane, brighter when it has focus.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.dim)
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    text: Color::Rgb(205, 214, 244),
    dim: Color::Rgb(108, 112, 134),
    accent: Color::Rgb(137, 180, 250),
    highlight: Color::Rgb(249, 226, 175),
    literal: Color::Rgb(250, 179, 135),
    type_name: Color::Rgb(148, 226, 213),
    ok: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    selection_bg: Color::Rgb(50, 50, 70),
};
