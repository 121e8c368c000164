// Modal system for TUI overlays
//
// App holds Option<Modal>; input routing acts on the returned ModalAction.
// The mapping popover is not a modal: its visibility belongs to the editor.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    Close,
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_closes_on_escape_keys() {
        let mut modal = Modal::help();
        assert_eq!(modal.handle_input(KeyCode::Esc), ModalAction::Close);
        assert_eq!(modal.handle_input(KeyCode::Char('?')), ModalAction::Close);
        assert_eq!(modal.handle_input(KeyCode::Down), ModalAction::None);
    }
}
