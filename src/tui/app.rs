// TUI application state
//
// The App wraps the mapping editor with presentation state: which committed
// mapping is highlighted, popover focus, overlays, and the toast.

use super::clipboard;
use super::components::Toast;
use super::modal::Modal;
use super::popover::{PopoverAction, PopoverForm};
use super::theme::Theme;
use crate::editor::{LookupSettled, MappingEditor};
use crate::logging::LogBuffer;
use crate::mapping_file;

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Main application state for the TUI
pub struct App {
    pub editor: MappingEditor,

    /// Focus and cursors of the popover (meaningful only while it's open)
    pub popover: PopoverForm,

    /// Highlighted row of the committed mappings list
    pub selected: usize,

    pub modal: Option<Modal>,

    pub toast: Option<Toast>,

    pub log_buffer: LogBuffer,

    pub theme: Theme,

    pub should_quit: bool,

    animation_frame: usize,
}

impl App {
    pub fn new(editor: MappingEditor, log_buffer: LogBuffer) -> Self {
        Self {
            editor,
            popover: PopoverForm::default(),
            selected: 0,
            modal: None,
            toast: None,
            log_buffer,
            theme: Theme::default(),
            should_quit: false,
            animation_frame: 0,
        }
    }

    /// Advance the spinner and drop an expired toast
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.animation_frame % SPINNER_FRAMES.len()]
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mapping list
    // ─────────────────────────────────────────────────────────────────────

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.editor.mappings().len() {
            self.selected += 1;
        }
    }

    /// Open the popover for a new mapping
    pub fn open_new(&mut self) {
        if self.editor.open() {
            self.popover =
                PopoverForm::for_draft(self.editor.draft(), &self.editor.data_source().columns);
        }
    }

    /// Open the popover on the highlighted mapping
    pub fn edit_selected(&mut self) {
        if self.editor.edit(self.selected) {
            self.popover =
                PopoverForm::for_draft(self.editor.draft(), &self.editor.data_source().columns);
        }
    }

    pub fn remove_selected(&mut self) {
        if !self.editor.remove(self.selected) {
            return;
        }
        self.clamp_selection();
        self.show_toast("✓ Mapping removed");
    }

    fn clamp_selection(&mut self) {
        let len = self.editor.mappings().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Copy the committed list as JSON
    pub fn copy_mappings(&mut self) {
        let copied = mapping_file::to_json(self.editor.mappings())
            .and_then(|json| clipboard::copy_to_clipboard(&json));
        match copied {
            Ok(()) => self.show_toast("✓ Copied mappings to clipboard"),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                self.show_toast("✗ Failed to copy");
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Popover
    // ─────────────────────────────────────────────────────────────────────

    /// Label of the draft's value when neither the value list nor the custom
    /// field shows it (e.g. picked for a column that has since changed)
    pub fn unlisted_value(&self) -> Option<String> {
        let draft = self.editor.draft();
        let value = draft.selected_suggestion.as_ref()?;
        if !draft.typed_value.is_empty() || draft.suggestions.iter().any(|s| &s.value == value) {
            return None;
        }
        Some(value.label())
    }

    /// Feed a finished lookup into the editor
    pub fn on_lookup_settled(&mut self, settled: LookupSettled) {
        if self.editor.apply_lookup(settled) {
            self.popover.reset_suggestions();
        }
    }

    /// Execute an action returned by the popover
    pub fn apply_popover_action(&mut self, action: PopoverAction) {
        match action {
            PopoverAction::None => {}
            PopoverAction::Close => self.editor.close(),
            PopoverAction::Save => self.save(),
            PopoverAction::SelectColumn(column) => self.editor.select_column(&column),
            PopoverAction::ClearColumn => self.editor.select_column(""),
            PopoverAction::PickSuggestion(index) => {
                self.editor.select_suggestion(index);
            }
            PopoverAction::SetTypedValue(text) => self.editor.set_typed_value(&text),
            PopoverAction::SetAuxiliary(text) => self.editor.set_auxiliary_input(&text),
        }
    }

    fn save(&mut self) {
        let editing = self.editor.draft().editing;
        if !self.editor.commit() {
            self.show_toast("Pick a column first");
            return;
        }
        self.selected = editing.unwrap_or_else(|| self.editor.mappings().len().saturating_sub(1));
        self.show_toast("✓ Mapping saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{demo_data_source, DemoValueSource};
    use crate::model::Mapping;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn app_with(initial: Vec<Mapping>) -> (App, mpsc::UnboundedReceiver<LookupSettled>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let editor = MappingEditor::new(
            demo_data_source(),
            Arc::new(DemoValueSource::with_base_delay(Duration::ZERO)),
            initial,
            tx,
            Box::new(|_: &[Mapping]| {}),
        );
        (App::new(editor, LogBuffer::with_capacity(16)), rx)
    }

    #[tokio::test]
    async fn add_mapping_through_popover_actions() {
        let (mut app, mut rx) = app_with(vec![Mapping::new("city", "Pune", "")]);

        app.open_new();
        assert!(app.editor.is_open());

        app.apply_popover_action(PopoverAction::SelectColumn("country".into()));
        let settled = rx.recv().await.unwrap();
        app.on_lookup_settled(settled);
        assert!(!app.editor.draft().suggestions.is_empty());

        app.apply_popover_action(PopoverAction::PickSuggestion(1));
        app.apply_popover_action(PopoverAction::SetAuxiliary("eu".into()));
        app.apply_popover_action(PopoverAction::Save);

        assert!(!app.editor.is_open());
        assert_eq!(app.editor.mappings().len(), 2);
        assert_eq!(app.editor.mappings()[1], Mapping::new("country", "France", "eu"));
        assert_eq!(app.selected, 1);
        assert!(app.toast.is_some());
    }

    #[tokio::test]
    async fn value_picked_for_previous_column_stays_visible() {
        let (mut app, mut rx) = app_with(Vec::new());
        app.open_new();

        app.apply_popover_action(PopoverAction::SelectColumn("country".into()));
        app.on_lookup_settled(rx.recv().await.unwrap());
        app.apply_popover_action(PopoverAction::PickSuggestion(0));
        assert_eq!(app.unlisted_value(), None);

        app.apply_popover_action(PopoverAction::SelectColumn("city".into()));
        app.on_lookup_settled(rx.recv().await.unwrap());

        // "India" is not among the city values but is still the draft's value
        assert!(app
            .editor
            .draft()
            .suggestions
            .iter()
            .all(|s| s.label != "India"));
        assert_eq!(app.unlisted_value().as_deref(), Some("India"));

        // Typing a value makes the custom field show it instead
        app.apply_popover_action(PopoverAction::SetTypedValue("Nice".into()));
        assert_eq!(app.unlisted_value(), None);
        app.apply_popover_action(PopoverAction::SetTypedValue(String::new()));
        assert_eq!(app.unlisted_value(), None);
    }

    #[tokio::test]
    async fn unlisted_value_is_what_gets_saved() {
        let (mut app, mut rx) = app_with(Vec::new());
        app.open_new();
        app.apply_popover_action(PopoverAction::SelectColumn("country".into()));
        app.on_lookup_settled(rx.recv().await.unwrap());
        app.apply_popover_action(PopoverAction::PickSuggestion(0));
        app.apply_popover_action(PopoverAction::SelectColumn("city".into()));
        app.on_lookup_settled(rx.recv().await.unwrap());

        let shown = app.unlisted_value();
        app.apply_popover_action(PopoverAction::Save);

        assert_eq!(shown.as_deref(), Some("India"));
        assert_eq!(app.editor.mappings(), &[Mapping::new("city", "India", "")]);
    }

    #[tokio::test]
    async fn save_without_column_keeps_popover_open() {
        let (mut app, _rx) = app_with(Vec::new());

        app.open_new();
        app.apply_popover_action(PopoverAction::Save);

        assert!(app.editor.is_open());
        assert!(app.editor.mappings().is_empty());
        assert_eq!(app.toast.as_ref().map(|t| t.message.as_str()), Some("Pick a column first"));
    }

    #[tokio::test]
    async fn edit_selected_replaces_in_place() {
        let (mut app, _rx) = app_with(vec![
            Mapping::new("city", "Pune", ""),
            Mapping::new("year", "2021", ""),
        ]);
        app.select_next();

        app.edit_selected();
        assert_eq!(app.editor.draft().editing, Some(1));

        app.apply_popover_action(PopoverAction::SetTypedValue("2030".into()));
        app.apply_popover_action(PopoverAction::Save);

        assert_eq!(app.editor.mappings()[1], Mapping::new("year", "2030", ""));
        assert_eq!(app.selected, 1);
    }

    #[tokio::test]
    async fn remove_last_clamps_selection() {
        let (mut app, _rx) = app_with(vec![
            Mapping::new("city", "Pune", ""),
            Mapping::new("year", "2021", ""),
        ]);
        app.select_next();
        app.remove_selected();

        assert_eq!(app.editor.mappings().len(), 1);
        assert_eq!(app.selected, 0);

        app.remove_selected();
        app.remove_selected();
        assert!(app.editor.mappings().is_empty());
        assert_eq!(app.selected, 0);
    }
}
