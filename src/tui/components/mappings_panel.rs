//! Committed mappings list
//!
//! Highlights the selected row. While an in-place edit is open, the mapping
//! being edited is marked so it's clear which row Save will replace.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mappings = app.editor.mappings();

    let block = Block::default()
        .title(format!(" Mappings ({}) ", mappings.len()))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(!app.editor.is_open()));

    if mappings.is_empty() {
        let empty = Paragraph::new("  No mappings yet. Press 'a' to add one.")
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let editing = app.editor.draft().editing;
    let items: Vec<ListItem> = mappings
        .iter()
        .enumerate()
        .map(|(i, mapping)| {
            let marker = if editing == Some(i) { "✎ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(format!("{:>3}. ", i + 1), Style::default().fg(theme.muted)),
                Span::styled(mapping.summary(), Style::default().fg(theme.foreground)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected_style());

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}
