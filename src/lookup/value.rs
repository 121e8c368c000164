//! Suggestion values and their display labels
//!
//! The backend returns distinct column values as bare JSON primitives.
//! They are decoded once, at the fetch boundary, into [`SuggestionValue`];
//! anything that is not a primitive fails decoding and is treated as a
//! malformed payload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label shown for a SQL NULL value
pub const NULL_LABEL: &str = "<NULL>";

/// Label shown for the empty string (otherwise invisible in a list)
pub const EMPTY_STRING_LABEL: &str = "<empty string>";

/// A distinct column value as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestionValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl SuggestionValue {
    /// Human-readable label for selectors
    pub fn label(&self) -> String {
        match self {
            Self::Null => NULL_LABEL.to_string(),
            Self::Bool(true) => "TRUE".to_string(),
            Self::Bool(false) => "FALSE".to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) if s.is_empty() => EMPTY_STRING_LABEL.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// String stored in a committed mapping
    ///
    /// NULL has no textual form in a mapping and becomes the empty string.
    pub fn to_mapping_value(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for SuggestionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A candidate value plus its display label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub value: SuggestionValue,
    pub label: String,
}

impl From<SuggestionValue> for Suggestion {
    fn from(value: SuggestionValue) -> Self {
        let label = value.label();
        Self { value, label }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(raw: serde_json::Value) -> Result<Vec<SuggestionValue>, serde_json::Error> {
        serde_json::from_value(raw)
    }

    #[test]
    fn labels_follow_display_conventions() {
        let values = decode(json!([null, "", true, false, 42, 3.5, "India"])).unwrap();
        let labels: Vec<String> = values.iter().map(SuggestionValue::label).collect();
        assert_eq!(
            labels,
            vec!["<NULL>", "<empty string>", "TRUE", "FALSE", "42", "3.5", "India"]
        );
    }

    #[test]
    fn non_primitive_values_fail_to_decode() {
        assert!(decode(json!([{"value": 1}])).is_err());
        assert!(decode(json!([[1, 2]])).is_err());
    }

    #[test]
    fn mapping_value_drops_null_and_keeps_raw_text() {
        assert_eq!(SuggestionValue::Null.to_mapping_value(), "");
        assert_eq!(SuggestionValue::Bool(true).to_mapping_value(), "true");
        assert_eq!(
            SuggestionValue::Text(String::new()).to_mapping_value(),
            ""
        );
        assert_eq!(
            SuggestionValue::Number(serde_json::Number::from(7)).to_mapping_value(),
            "7"
        );
    }

    #[test]
    fn suggestion_from_value_carries_label() {
        let suggestion = Suggestion::from(SuggestionValue::Text("Pune".into()));
        assert_eq!(suggestion.label, "Pune");
        assert_eq!(suggestion.value, SuggestionValue::Text("Pune".into()));
    }
}
