// Title bar component
//
// App name, the data source being mapped, and a spinner while a lookup runs.

use crate::editor::EditorState;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let ds = app.editor.data_source();

    let indicator = match app.editor.state() {
        EditorState::Loading => format!("  {} loading values", app.spinner_char()),
        _ if !ds.supports_lookup => "  (no value lookup)".to_string(),
        _ => String::new(),
    };

    let title_text = format!(" mapctl ──── {} #{}{}", ds.name, ds.id, indicator);

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.highlight))
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(title, area);
}
