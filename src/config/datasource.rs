//! Data source configuration
//!
//! The control is bound to one table on the backend. Columns are listed in
//! the config because schema discovery belongs to the dashboard, not here.

use crate::model::DataSource;
use serde::Deserialize;

/// Data source settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceConfig {
    /// Backend table id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Columns offered by the selector
    pub columns: Vec<String>,
    /// Whether the backend supports distinct-value lookups for this table
    pub supports_lookup: bool,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            id: 1,
            name: "birth_names".to_string(),
            columns: vec![
                "name".to_string(),
                "gender".to_string(),
                "state".to_string(),
                "ds".to_string(),
            ],
            supports_lookup: true,
        }
    }
}

/// Data source settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDataSource {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub columns: Option<Vec<String>>,
    pub supports_lookup: Option<bool>,
}

impl DataSourceConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileDataSource>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            id: file.id.unwrap_or(defaults.id),
            name: file.name.unwrap_or(defaults.name),
            columns: file.columns.unwrap_or(defaults.columns),
            supports_lookup: file.supports_lookup.unwrap_or(defaults.supports_lookup),
        }
    }

    pub fn to_data_source(&self) -> DataSource {
        DataSource::new(self.id, self.name.clone(), self.columns.clone())
            .with_lookup(self.supports_lookup)
    }
}
