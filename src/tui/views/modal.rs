// Modal overlay rendering

use super::centered_rect;
use crate::tui::app::App;
use crate::tui::modal::Modal;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
    }
}

fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.accent);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);

    // "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Mappings", header_style)),
        kb("a, n", "Add a mapping"),
        kb("Enter", "Edit the highlighted mapping"),
        kb("d, Del", "Remove the highlighted mapping"),
        kb("↑↓, j k", "Move selection"),
        kb("y", "Copy mappings as JSON"),
        kb("q", "Quit and print mappings"),
        Line::raw(""),
        Line::from(Span::styled("  Popover", header_style)),
        kb("Tab, S-Tab", "Next / previous field"),
        kb("Enter", "Select column or value, save from text fields"),
        kb("Backspace", "Clear column (on the column list)"),
        kb("Ctrl+S", "Save"),
        kb("Esc", "Cancel"),
        Line::raw(""),
    ]);

    let area = centered_rect(60, content.lines.len() as u16 + 2, f.area());

    let help = Paragraph::new(content).block(
        Block::default()
            .title(" Help (Esc to close) ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.highlight)),
    );

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
