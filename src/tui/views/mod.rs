// Views module - screen-level rendering
//
// One screen: title, mappings list, logs, status bar. The mapping popover
// and modals are drawn on top, then the toast above everything.

mod modal;
mod popover;

use super::app::App;
use crate::tui::components;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(8),
            Constraint::Length(2),
        ])
        .split(f.area());

    components::title_bar::render(f, chunks[0], app);
    components::mappings_panel::render(f, chunks[1], app);
    components::logs_panel::render(f, chunks[2], app);
    components::status_bar::render(f, chunks[3], app);

    if app.editor.is_open() {
        popover::render(f, app);
    }

    if let Some(ref modal) = app.modal {
        modal::render(f, modal, app);
    }

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

/// Calculate centered rect for an overlay
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
