// Mapping popover input handling
//
// The editor owns the draft; this struct only tracks which field has focus
// and where the list cursors are. Input is translated into a PopoverAction
// that the app applies to the editor, the same way modals return ModalAction.

use crate::editor::Draft;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Fields of the popover, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Column,
    Value,
    Custom,
    Auxiliary,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Column => Field::Value,
            Field::Value => Field::Custom,
            Field::Custom => Field::Auxiliary,
            Field::Auxiliary => Field::Column,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Column => Field::Auxiliary,
            Field::Value => Field::Column,
            Field::Custom => Field::Value,
            Field::Auxiliary => Field::Custom,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Column => "Column",
            Field::Value => "Value",
            Field::Custom => "Custom value",
            Field::Auxiliary => "Note",
        }
    }
}

/// Actions returned by popover input handling
#[derive(Debug, Clone, PartialEq)]
pub enum PopoverAction {
    /// Input consumed, nothing to apply
    None,
    /// Discard the draft
    Close,
    /// Commit the draft
    Save,
    SelectColumn(String),
    /// Clear the column selection
    ClearColumn,
    PickSuggestion(usize),
    SetTypedValue(String),
    SetAuxiliary(String),
}

/// Focus and cursor state of the open popover
#[derive(Debug, Clone, Default)]
pub struct PopoverForm {
    pub focus: Field,
    pub column_cursor: usize,
    pub suggestion_cursor: usize,
}

impl PopoverForm {
    /// Form positioned on the draft's column (if any)
    pub fn for_draft(draft: &Draft, columns: &[String]) -> Self {
        let column_cursor = draft
            .selected_column
            .as_ref()
            .and_then(|selected| columns.iter().position(|c| c == selected))
            .unwrap_or(0);
        let focus = if draft.selected_column.is_some() {
            Field::Value
        } else {
            Field::Column
        };
        Self {
            focus,
            column_cursor,
            suggestion_cursor: 0,
        }
    }

    /// New suggestions arrived; start at the top
    pub fn reset_suggestions(&mut self) {
        self.suggestion_cursor = 0;
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        draft: &Draft,
        columns: &[String],
    ) -> PopoverAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => PopoverAction::Save,
                _ => PopoverAction::None,
            };
        }

        match key.code {
            KeyCode::Esc => return PopoverAction::Close,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return PopoverAction::None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return PopoverAction::None;
            }
            _ => {}
        }

        match self.focus {
            Field::Column => self.handle_column(key.code, columns),
            Field::Value => self.handle_value(key.code, draft),
            Field::Custom => match key.code {
                KeyCode::Enter => PopoverAction::Save,
                code => edit_text(code, &draft.typed_value)
                    .map(PopoverAction::SetTypedValue)
                    .unwrap_or(PopoverAction::None),
            },
            Field::Auxiliary => match key.code {
                KeyCode::Enter => PopoverAction::Save,
                code => edit_text(code, &draft.auxiliary_input)
                    .map(PopoverAction::SetAuxiliary)
                    .unwrap_or(PopoverAction::None),
            },
        }
    }

    fn handle_column(&mut self, code: KeyCode, columns: &[String]) -> PopoverAction {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.column_cursor = self.column_cursor.saturating_sub(1);
                PopoverAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.column_cursor + 1 < columns.len() {
                    self.column_cursor += 1;
                }
                PopoverAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => match columns.get(self.column_cursor) {
                Some(column) => {
                    self.focus = Field::Value;
                    self.suggestion_cursor = 0;
                    PopoverAction::SelectColumn(column.clone())
                }
                None => PopoverAction::None,
            },
            KeyCode::Backspace | KeyCode::Delete => PopoverAction::ClearColumn,
            _ => PopoverAction::None,
        }
    }

    fn handle_value(&mut self, code: KeyCode, draft: &Draft) -> PopoverAction {
        let count = draft.suggestions.len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.suggestion_cursor = self.suggestion_cursor.saturating_sub(1);
                PopoverAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.suggestion_cursor + 1 < count {
                    self.suggestion_cursor += 1;
                }
                PopoverAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if draft.is_loading || self.suggestion_cursor >= count {
                    return PopoverAction::None;
                }
                self.focus = Field::Auxiliary;
                PopoverAction::PickSuggestion(self.suggestion_cursor)
            }
            _ => PopoverAction::None,
        }
    }
}

/// Apply a text-editing key to `current`; None if the key doesn't edit
fn edit_text(code: KeyCode, current: &str) -> Option<String> {
    match code {
        KeyCode::Char(c) => {
            let mut text = current.to_string();
            text.push(c);
            Some(text)
        }
        KeyCode::Backspace => {
            let mut text = current.to_string();
            text.pop()?;
            Some(text)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{Suggestion, SuggestionValue};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn columns() -> Vec<String> {
        vec!["country".into(), "city".into(), "year".into()]
    }

    fn loaded_draft() -> Draft {
        Draft {
            selected_column: Some("country".into()),
            suggestions: vec![
                Suggestion::from(SuggestionValue::Text("FR".into())),
                Suggestion::from(SuggestionValue::Text("US".into())),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn column_list_navigation_and_selection() {
        let mut form = PopoverForm::default();
        let draft = Draft::default();
        let cols = columns();

        assert_eq!(form.handle_input(key(KeyCode::Down), &draft, &cols), PopoverAction::None);
        assert_eq!(form.handle_input(key(KeyCode::Down), &draft, &cols), PopoverAction::None);
        // Clamped at the last column
        form.handle_input(key(KeyCode::Down), &draft, &cols);
        assert_eq!(form.column_cursor, 2);

        let action = form.handle_input(key(KeyCode::Enter), &draft, &cols);
        assert_eq!(action, PopoverAction::SelectColumn("year".into()));
        assert_eq!(form.focus, Field::Value);
    }

    #[test]
    fn backspace_on_column_clears_selection() {
        let mut form = PopoverForm::default();
        let action = form.handle_input(key(KeyCode::Backspace), &loaded_draft(), &columns());
        assert_eq!(action, PopoverAction::ClearColumn);
    }

    #[test]
    fn pick_suggestion_moves_focus_to_note() {
        let draft = loaded_draft();
        let mut form = PopoverForm::for_draft(&draft, &columns());
        assert_eq!(form.focus, Field::Value);

        form.handle_input(key(KeyCode::Down), &draft, &columns());
        let action = form.handle_input(key(KeyCode::Enter), &draft, &columns());

        assert_eq!(action, PopoverAction::PickSuggestion(1));
        assert_eq!(form.focus, Field::Auxiliary);
    }

    #[test]
    fn no_pick_while_loading() {
        let mut draft = loaded_draft();
        draft.is_loading = true;
        let mut form = PopoverForm::for_draft(&draft, &columns());

        let action = form.handle_input(key(KeyCode::Enter), &draft, &columns());
        assert_eq!(action, PopoverAction::None);
        assert_eq!(form.focus, Field::Value);
    }

    #[test]
    fn text_fields_edit_from_current_draft() {
        let mut draft = loaded_draft();
        draft.typed_value = "Fr".into();
        draft.auxiliary_input = "eu".into();
        let mut form = PopoverForm {
            focus: Field::Custom,
            ..Default::default()
        };

        assert_eq!(
            form.handle_input(key(KeyCode::Char('a')), &draft, &columns()),
            PopoverAction::SetTypedValue("Fra".into())
        );

        form.handle_input(key(KeyCode::Tab), &draft, &columns());
        assert_eq!(form.focus, Field::Auxiliary);
        assert_eq!(
            form.handle_input(key(KeyCode::Backspace), &draft, &columns()),
            PopoverAction::SetAuxiliary("e".into())
        );
        assert_eq!(
            form.handle_input(key(KeyCode::Enter), &draft, &columns()),
            PopoverAction::Save
        );
    }

    #[test]
    fn backspace_on_empty_text_is_ignored() {
        let mut form = PopoverForm {
            focus: Field::Auxiliary,
            ..Default::default()
        };
        let action = form.handle_input(key(KeyCode::Backspace), &Draft::default(), &columns());
        assert_eq!(action, PopoverAction::None);
    }

    #[test]
    fn global_popover_keys() {
        let mut form = PopoverForm::default();
        let draft = Draft::default();
        let cols = columns();

        assert_eq!(form.handle_input(key(KeyCode::Esc), &draft, &cols), PopoverAction::Close);
        assert_eq!(
            form.handle_input(
                KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
                &draft,
                &cols
            ),
            PopoverAction::Save
        );

        form.handle_input(key(KeyCode::BackTab), &draft, &cols);
        assert_eq!(form.focus, Field::Auxiliary);
    }
}
