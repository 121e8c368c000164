//! Mapping editor: draft state, committed mappings, lookup reconciliation
//!
//! # State machine
//!
//! ```text
//!            open / edit(i)
//!   Idle ───────────────────▶ Editing ◀──────────────┐
//!    ▲                          │                     │ lookup settled
//!    │ commit / close           │ select_column       │ (matching token)
//!    │                          ▼                     │
//!    └──────────────────────  Loading ───────────────┘
//! ```
//!
//! Every column selection records a fresh [`RequestToken`] and cancels the
//! previous lookup. Lookups run in spawned tasks and report back through a
//! channel as [`LookupSettled`]; the owner of the event loop feeds those into
//! [`MappingEditor::apply_lookup`]. A settled lookup whose token is not the
//! current one is dropped, so the visible suggestions always belong to the
//! most recent selection regardless of response order.
//!
//! The committed list mirrors the parent's value: it is seeded from the
//! initial mappings and every mutation is reported through the change
//! callback with the full updated list.

use crate::lookup::{fetch_suggestions, FetchOutcome, Suggestion, SuggestionSource, SuggestionValue};
use crate::model::{DataSource, Mapping};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;


/// Identifies one lookup request; strictly increasing per editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Editor lifecycle state, derived from visibility and the loading flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Popover closed
    Idle,
    /// Popover open, no lookup in flight
    Editing,
    /// Popover open, lookup for the selected column in flight
    Loading,
}

/// Message sent by a lookup task when it finishes
#[derive(Debug, Clone)]
pub struct LookupSettled {
    pub token: RequestToken,
    pub column: String,
    pub outcome: FetchOutcome,
}

/// Transient, uncommitted editing state of the popover
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub selected_column: Option<String>,
    pub selected_suggestion: Option<SuggestionValue>,
    /// Free text the user typed as a value (fallback when no suggestion fits)
    pub typed_value: String,
    pub auxiliary_input: String,
    pub suggestions: Vec<Suggestion>,
    pub is_loading: bool,
    /// Most recently issued lookup, if any
    pub request_token: Option<RequestToken>,
    /// Index of the committed mapping being edited in place
    pub editing: Option<usize>,
}

/// Parent form notification, called with the full committed list
pub type ChangeCallback = Box<dyn FnMut(&[Mapping]) + Send>;

/// Owns the draft and the committed mapping list for one control instance
pub struct MappingEditor {
    data_source: DataSource,
    source: Arc<dyn SuggestionSource>,
    settled_tx: mpsc::UnboundedSender<LookupSettled>,
    open: bool,
    draft: Draft,
    /// Last token handed out; never reset so stale tokens can't collide
    last_token: u64,
    in_flight: Option<CancellationToken>,
    mappings: Vec<Mapping>,
    on_change: ChangeCallback,
}

impl MappingEditor {
    pub fn new(
        data_source: DataSource,
        source: Arc<dyn SuggestionSource>,
        initial: Vec<Mapping>,
        settled_tx: mpsc::UnboundedSender<LookupSettled>,
        on_change: ChangeCallback,
    ) -> Self {
        Self {
            data_source,
            source,
            settled_tx,
            open: false,
            draft: Draft::default(),
            last_token: 0,
            in_flight: None,
            mappings: initial,
            on_change,
        }
    }

    pub fn state(&self) -> EditorState {
        match (self.open, self.draft.is_loading) {
            (false, _) => EditorState::Idle,
            (true, false) => EditorState::Editing,
            (true, true) => EditorState::Loading,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn data_source(&self) -> &DataSource {
        &self.data_source
    }

    /// Whether Save would do anything right now
    pub fn can_commit(&self) -> bool {
        self.open
            && self
                .draft
                .selected_column
                .as_deref()
                .is_some_and(|c| !c.is_empty())
    }

    /// Open the popover with an empty draft. Ignored unless idle.
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.draft = Draft::default();
        self.open = true;
        tracing::debug!("Mapping popover opened");
        true
    }

    /// Open the popover prefilled from the committed mapping at `index`
    ///
    /// Saving replaces that mapping instead of appending.
    pub fn edit(&mut self, index: usize) -> bool {
        if self.open {
            return false;
        }
        let Some(mapping) = self.mappings.get(index).cloned() else {
            return false;
        };

        self.draft = Draft::default();
        self.open = true;
        self.draft.editing = Some(index);
        self.select_column(&mapping.column);
        if !mapping.value.is_empty() {
            self.set_typed_value(&mapping.value);
        }
        self.draft.auxiliary_input = mapping.auxiliary_input;
        tracing::debug!("Editing mapping #{} ({})", index, mapping.column);
        true
    }

    /// Select the column to map and start a lookup for its values
    ///
    /// Cancels any in-flight lookup. An empty column clears the selection.
    pub fn select_column(&mut self, column: &str) {
        if !self.open {
            return;
        }

        self.cancel_in_flight();

        if column.is_empty() {
            self.draft.selected_column = None;
            self.draft.suggestions.clear();
            self.draft.auxiliary_input.clear();
            self.draft.is_loading = false;
            self.draft.request_token = None;
            return;
        }

        let changed = self.draft.selected_column.as_deref() != Some(column);
        if changed {
            self.draft.suggestions.clear();
            self.draft.auxiliary_input.clear();
        }
        self.draft.selected_column = Some(column.to_string());

        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.draft.request_token = Some(token);

        if !self.data_source.supports_lookup {
            self.draft.suggestions.clear();
            self.draft.is_loading = false;
            return;
        }

        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());
        self.draft.is_loading = true;

        tracing::debug!("Looking up values for '{}' (request {})", column, token.0);

        let source = Arc::clone(&self.source);
        let data_source = self.data_source.clone();
        let column = column.to_string();
        let tx = self.settled_tx.clone();
        tokio::spawn(async move {
            let outcome = fetch_suggestions(source.as_ref(), &data_source, &column, &cancel).await;
            // Receiver gone means the editor was torn down
            let _ = tx.send(LookupSettled {
                token,
                column,
                outcome,
            });
        });
    }

    /// Reconcile a settled lookup with the current draft
    ///
    /// Returns true if the suggestions were installed.
    pub fn apply_lookup(&mut self, settled: LookupSettled) -> bool {
        if !self.open || self.draft.request_token != Some(settled.token) {
            tracing::debug!(
                "Dropping superseded lookup for '{}' (request {})",
                settled.column,
                settled.token.0
            );
            return false;
        }

        match settled.outcome {
            FetchOutcome::Loaded(suggestions) => {
                tracing::debug!(
                    "Installed {} suggestion(s) for '{}'",
                    suggestions.len(),
                    settled.column
                );
                self.draft.suggestions = suggestions;
                self.draft.is_loading = false;
                self.in_flight = None;
                true
            }
            // Current request only reports Cancelled if someone else fired its token
            FetchOutcome::Cancelled => false,
        }
    }

    /// Pick one of the loaded suggestions. Ignored while loading.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        if !self.open || self.draft.is_loading {
            return false;
        }
        let Some(suggestion) = self.draft.suggestions.get(index) else {
            return false;
        };
        self.draft.selected_suggestion = Some(suggestion.value.clone());
        self.draft.typed_value.clear();
        true
    }

    /// Use free text as the value instead of a suggestion
    pub fn set_typed_value(&mut self, text: &str) {
        if !self.open {
            return;
        }
        self.draft.typed_value = text.to_string();
        self.draft.selected_suggestion = if text.is_empty() {
            None
        } else {
            Some(SuggestionValue::Text(text.to_string()))
        };
    }

    /// Update the auxiliary free-text input; never triggers a lookup
    pub fn set_auxiliary_input(&mut self, text: &str) {
        if !self.open {
            return;
        }
        self.draft.auxiliary_input = text.to_string();
    }

    /// Commit the draft as a mapping and close
    ///
    /// No-op (returns false) without a selected column.
    pub fn commit(&mut self) -> bool {
        if !self.can_commit() {
            tracing::debug!("Ignoring commit without a selected column");
            return false;
        }

        let draft = std::mem::take(&mut self.draft);
        let mapping = Mapping::new(
            draft.selected_column.unwrap_or_default(),
            draft
                .selected_suggestion
                .as_ref()
                .map(SuggestionValue::to_mapping_value)
                .unwrap_or_default(),
            draft.auxiliary_input,
        );

        match draft.editing {
            Some(index) if index < self.mappings.len() => {
                tracing::info!("Updated mapping #{}: {}", index, mapping.summary());
                self.mappings[index] = mapping;
            }
            _ => {
                tracing::info!("Added mapping: {}", mapping.summary());
                self.mappings.push(mapping);
            }
        }

        self.cancel_in_flight();
        self.open = false;
        self.notify();
        true
    }

    /// Discard the draft and close, cancelling any lookup
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.cancel_in_flight();
        self.draft = Draft::default();
        self.open = false;
        tracing::debug!("Mapping popover closed");
    }

    /// Remove a committed mapping; draft and popover are unaffected
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.mappings.len() {
            return false;
        }
        let removed = self.mappings.remove(index);
        tracing::info!("Removed mapping #{}: {}", index, removed.summary());

        // Keep an in-place edit pointing at the same mapping
        self.draft.editing = match self.draft.editing {
            Some(editing) if editing == index => None,
            Some(editing) if editing > index => Some(editing - 1),
            other => other,
        };
        self.notify();
        true
    }

    fn cancel_in_flight(&mut self) {
        if let Some(cancel) = self.in_flight.take() {
            cancel.cancel();
        }
        self.draft.is_loading = false;
    }

    fn notify(&mut self) {
        (self.on_change)(&self.mappings);
    }
}

impl Drop for MappingEditor {
    fn drop(&mut self) {
        if let Some(cancel) = self.in_flight.take() {
            cancel.cancel();
        }
    }
}
