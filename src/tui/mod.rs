// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, settled lookups)
// - Rendering the UI

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod modal;
pub mod popover;
pub mod theme;
pub mod views;

use crate::editor::{LookupSettled, MappingEditor};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI until the user quits
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// even when the loop fails.
pub async fn run_tui(
    editor: MappingEditor,
    mut settled_rx: mpsc::UnboundedReceiver<LookupSettled>,
    log_buffer: LogBuffer,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(editor, log_buffer);

    let result = run_event_loop(&mut terminal, &mut app, &mut settled_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input, the redraw tick, and lookups reporting back.
/// Every editor mutation happens here, on one task.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    settled_rx: &mut mpsc::UnboundedReceiver<LookupSettled>,
) -> Result<()> {
    // Drives the spinner and toast expiry
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(settled) = settled_rx.recv() => {
                app.on_lookup_settled(settled);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Popover → Main screen
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_modal_input(app, &key_event) {
        return;
    }

    if app.editor.is_open() {
        let action = app.popover.handle_input(
            key_event,
            app.editor.draft(),
            &app.editor.data_source().columns,
        );
        app.apply_popover_action(action);
        return;
    }

    handle_main_keys(app, &key_event);
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
    }

    true
}

fn handle_main_keys(app: &mut App, key_event: &KeyEvent) {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('?') => app.modal = Some(Modal::help()),
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_new(),
        KeyCode::Enter => app.edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('y') => app.copy_mappings(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{demo_data_source, DemoValueSource};
    use crate::model::Mapping;
    use crossterm::event::KeyModifiers;
    use std::sync::{Arc, Mutex};

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn keyboard_flow_adds_mapping_and_notifies_parent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let form_value: Arc<Mutex<Vec<Mapping>>> = Arc::default();
        let sink = Arc::clone(&form_value);
        let editor = MappingEditor::new(
            demo_data_source(),
            Arc::new(DemoValueSource::with_base_delay(Duration::ZERO)),
            Vec::new(),
            tx,
            Box::new(move |mappings: &[Mapping]| *sink.lock().unwrap() = mappings.to_vec()),
        );
        let mut app = App::new(editor, LogBuffer::with_capacity(16));

        press(&mut app, KeyCode::Char('a'));
        assert!(app.editor.is_open());

        // Second column: city
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        app.on_lookup_settled(rx.recv().await.unwrap());
        assert_eq!(app.editor.draft().selected_column.as_deref(), Some("city"));

        // Value list has focus after picking a column; skip to the custom field
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Nice");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "fr");
        press(&mut app, KeyCode::Enter);

        assert!(!app.editor.is_open());
        assert_eq!(
            *form_value.lock().unwrap(),
            vec![Mapping::new("city", "Nice", "fr")]
        );
    }

    #[tokio::test]
    async fn main_keys_are_inert_while_popover_open() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let editor = MappingEditor::new(
            demo_data_source(),
            Arc::new(DemoValueSource::with_base_delay(Duration::ZERO)),
            vec![Mapping::new("year", "2021", "")],
            tx,
            Box::new(|_: &[Mapping]| {}),
        );
        let mut app = App::new(editor, LogBuffer::with_capacity(16));

        press(&mut app, KeyCode::Char('a'));
        // Popover owns input: 'q' and 'd' never reach the main screen
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.should_quit);
        assert_eq!(app.editor.mappings().len(), 1);

        press(&mut app, KeyCode::Esc);
        assert!(!app.editor.is_open());

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.modal, Some(Modal::Help));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.modal.is_none());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
