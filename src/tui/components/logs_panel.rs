//! Logs panel component
//!
//! Tail of the in-memory log buffer, color-coded by level.

use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .title(format!(" Logs ({}) ", app.log_buffer.len()))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(false));

    if app.log_buffer.is_empty() {
        let empty = Paragraph::new("  No log entries")
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    // Borders take two rows
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(visible);

    let items: Vec<ListItem> = entries.iter().map(|e| format_entry(e, theme)).collect();
    f.render_widget(List::new(items).block(block), area);
}

fn format_entry<'a>(entry: &'a LogEntry, theme: &Theme) -> ListItem<'a> {
    let level_color = match entry.level {
        LogLevel::Error => theme.error,
        LogLevel::Warn => theme.warn,
        LogLevel::Info => theme.highlight,
        LogLevel::Debug | LogLevel::Trace => theme.muted,
    };

    ListItem::new(Line::from(vec![
        Span::styled(
            entry.timestamp.format("%H:%M:%S ").to_string(),
            Style::default().fg(theme.muted),
        ),
        Span::styled(
            format!("{:<5} ", entry.level.as_str()),
            Style::default().fg(level_color),
        ),
        Span::styled(format!("{}: ", entry.target), Style::default().fg(theme.muted)),
        Span::styled(entry.message.as_str(), Style::default().fg(theme.foreground)),
    ]))
}
