// Domain types shared by the editor, the lookup layer and the TUI
//
// - DataSource: the table a control is bound to (id, columns, lookup capability)
// - Mapping: one committed (column, value, auxiliary input) association

use serde::{Deserialize, Serialize};

/// A data source the mapping control is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    /// Backend identifier, used in the value lookup path
    pub id: u64,
    /// Human-readable name for the title bar
    pub name: String,
    /// Columns offered by the column selector (display order)
    pub columns: Vec<String>,
    /// Whether the backend can list distinct values for a column
    pub supports_lookup: bool,
}

impl DataSource {
    pub fn new(id: u64, name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            columns,
            supports_lookup: true,
        }
    }

    /// Builder-style toggle for the lookup capability
    pub fn with_lookup(mut self, supports_lookup: bool) -> Self {
        self.supports_lookup = supports_lookup;
        self
    }
}

/// One committed association between a column and a chosen/typed value
///
/// Serialized with the parent form's wire names (`auxiliaryInput`).
/// Neither column uniqueness nor a non-empty value is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub column: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub auxiliary_input: String,
}

impl Mapping {
    pub fn new(
        column: impl Into<String>,
        value: impl Into<String>,
        auxiliary_input: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            auxiliary_input: auxiliary_input.into(),
        }
    }

    /// One-line rendering for the mappings list: `column = value (aux)`
    pub fn summary(&self) -> String {
        let value = if self.value.is_empty() {
            "∅"
        } else {
            self.value.as_str()
        };
        if self.auxiliary_input.is_empty() {
            format!("{} = {}", self.column, value)
        } else {
            format!("{} = {}  [{}]", self.column, value, self.auxiliary_input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_uses_camel_case_wire_names() {
        let mapping = Mapping::new("country", "India", "42");
        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"column": "country", "value": "India", "auxiliaryInput": "42"})
        );
    }

    #[test]
    fn mapping_tolerates_missing_optional_fields() {
        let parsed: Vec<Mapping> = serde_json::from_str(r#"[{"column": "year"}]"#).unwrap();
        assert_eq!(parsed, vec![Mapping::new("year", "", "")]);
    }

    #[test]
    fn summary_marks_value_less_mappings() {
        assert_eq!(Mapping::new("city", "", "").summary(), "city = ∅");
        assert_eq!(
            Mapping::new("city", "Pune", "x1").summary(),
            "city = Pune  [x1]"
        );
    }
}
