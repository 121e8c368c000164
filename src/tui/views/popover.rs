//! Mapping popover overlay
//!
//! ```text
//! ┌ Add mapping ─────────────────────────────────────┐
//! │┌ Column ──────────┐┌ Value ───────────────────┐ │
//! ││ country          ││ India                     │ │
//! ││ city             ││ <NULL>                    │ │
//! │└──────────────────┘└───────────────────────────┘ │
//! │┌ Custom value ─────────────────────────────────┐ │
//! │┌ Note ─────────────────────────────────────────┐ │
//! │ Tab field · Enter select · Ctrl+S save         │ │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Lists stack vertically on compact terminals.

use super::centered_rect;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::tui::popover::Field;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let screen = f.area();
    let compact = !Breakpoint::from_width(screen.width).at_least(Breakpoint::Normal);
    let width = screen.width.saturating_sub(4).min(90);
    let height = screen.height.saturating_sub(2).min(if compact { 30 } else { 22 });
    let area = centered_rect(width, height, screen);

    let draft = app.editor.draft();
    let title = match draft.editing {
        Some(i) => format!(" Edit mapping #{} ", i + 1),
        None => " Add mapping ".to_string(),
    };

    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight))
        .style(Style::default().bg(app.theme.background));
    let inner = outer.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let lists = Layout::default()
        .direction(if compact {
            Direction::Vertical
        } else {
            Direction::Horizontal
        })
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    render_columns(f, lists[0], app);
    render_values(f, lists[1], app);
    render_custom_field(f, rows[1], app);
    render_text_field(f, rows[2], app, Field::Auxiliary, &draft.auxiliary_input);

    let footer = if app.editor.can_commit() {
        " Enter select · Ctrl+S save · Esc cancel"
    } else {
        " Pick a column to enable save · Esc cancel"
    };
    f.render_widget(
        Paragraph::new(footer).style(Style::default().fg(app.theme.muted)),
        rows[3],
    );
}

fn field_block<'a>(app: &App, field: Field, title: String) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.border_style(app.popover.focus == field))
}

fn render_columns(f: &mut Frame, area: Rect, app: &App) {
    let columns = &app.editor.data_source().columns;
    let selected = app.editor.draft().selected_column.as_deref();

    let items: Vec<ListItem> = columns
        .iter()
        .map(|column| {
            let style = if Some(column.as_str()) == selected {
                Style::default()
                    .fg(app.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.foreground)
            };
            ListItem::new(Span::styled(column.as_str(), style))
        })
        .collect();

    let list = List::new(items)
        .block(field_block(app, Field::Column, format!(" {} ", Field::Column.label())))
        .highlight_style(app.theme.selected_style());

    let mut state = ListState::default();
    if app.popover.focus == Field::Column {
        state.select(Some(app.popover.column_cursor));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_values(f: &mut Frame, area: Rect, app: &App) {
    let draft = app.editor.draft();
    let title = match app.unlisted_value() {
        Some(label) => format!(" {} · selected: {} ", Field::Value.label(), label),
        None => format!(" {} ", Field::Value.label()),
    };
    let block = field_block(app, Field::Value, title);

    let placeholder = if draft.selected_column.is_none() {
        Some("Select a column first".to_string())
    } else if draft.is_loading {
        Some(format!("{} Loading values…", app.spinner_char()))
    } else if !app.editor.data_source().supports_lookup {
        Some("Value lookup unavailable; use a custom value".to_string())
    } else if draft.suggestions.is_empty() {
        Some("No values found; use a custom value".to_string())
    } else {
        None
    };

    if let Some(text) = placeholder {
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let chosen = draft.selected_suggestion.as_ref();
    let items: Vec<ListItem> = draft
        .suggestions
        .iter()
        .map(|suggestion| {
            let mark = if chosen == Some(&suggestion.value) { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(app.theme.accent)),
                Span::styled(
                    suggestion.label.as_str(),
                    Style::default().fg(app.theme.foreground),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected_style());

    let mut state = ListState::default();
    if app.popover.focus == Field::Value {
        state.select(Some(
            app.popover
                .suggestion_cursor
                .min(draft.suggestions.len().saturating_sub(1)),
        ));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Custom value field; falls back to showing an unlisted selected value
fn render_custom_field(f: &mut Frame, area: Rect, app: &App) {
    let draft = app.editor.draft();
    match app.unlisted_value() {
        Some(label) if draft.typed_value.is_empty() => {
            let cursor = if app.popover.focus == Field::Custom { "▏" } else { "" };
            let line = Line::from(vec![
                Span::styled(label, Style::default().fg(app.theme.accent)),
                Span::styled(" (selected)", Style::default().fg(app.theme.muted)),
                Span::raw(cursor),
            ]);
            let block = field_block(app, Field::Custom, format!(" {} ", Field::Custom.label()));
            f.render_widget(Paragraph::new(line).block(block), area);
        }
        _ => render_text_field(f, area, app, Field::Custom, &draft.typed_value),
    }
}

fn render_text_field(f: &mut Frame, area: Rect, app: &App, field: Field, text: &str) {
    let focused = app.popover.focus == field;
    let cursor = if focused { "▏" } else { "" };
    let paragraph = Paragraph::new(format!("{}{}", text, cursor))
        .style(Style::default().fg(app.theme.foreground))
        .block(field_block(app, field, format!(" {} ", field.label())));
    f.render_widget(paragraph, area);
}
