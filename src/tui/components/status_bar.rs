// Status bar component
//
// Key hints for whatever currently has input, plus the mapping count.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render key hints; terse on narrow terminals
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let wide = Breakpoint::from_width(area.width).at_least(Breakpoint::Wide);

    let hints = match (app.editor.is_open(), wide) {
        (true, true) => {
            "Tab/S-Tab field │ ↑↓ move │ Enter select │ Ctrl+S save │ Esc cancel"
        }
        (true, false) => "Tab field │ Enter select │ ^S save │ Esc cancel",
        (false, true) => {
            "a add │ Enter edit │ d delete │ ↑↓ move │ y copy JSON │ ? help │ q quit"
        }
        (false, false) => "a add │ ⏎ edit │ d del │ y copy │ ? help │ q quit",
    };

    let status_text = format!(
        " {} │ {} mapping(s)",
        hints,
        app.editor.mappings().len()
    );

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.muted))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
