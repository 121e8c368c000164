// Theme for the TUI
//
// One palette; every widget pulls its colors from here instead of
// hardcoding them in render code.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Colors for all UI elements
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight: Color,
    pub selection: Color,
    pub selection_fg: Color,
    pub accent: Color,
    pub error: Color,
    pub warn: Color,
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            highlight: Color::Cyan,
            selection: Color::Blue,
            selection_fg: Color::White,
            accent: Color::Yellow,
            error: Color::Red,
            warn: Color::Yellow,
            border_type: BorderType::Rounded,
        }
    }
}

impl Theme {
    /// Border style for a panel, brighter when focused
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.highlight)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style for the selected row of a list
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }
}
