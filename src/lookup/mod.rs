//! Suggestion lookup: distinct values for a column, fetched asynchronously
//!
//! # Architecture
//!
//! ```text
//! SuggestionSource trait
//! ├── HttpValueSource (analytics backend REST API)
//! └── DemoValueSource (canned values with artificial latency, see demo.rs)
//!
//! fetch_suggestions(source, data_source, column, cancel)
//!   └── races the source future against the cancellation token
//! ```
//!
//! Lookups are best effort. A failed request is logged and yields an empty
//! suggestion list; only cancellation is reported as a distinct outcome so
//! the editor never clears suggestions on behalf of an abandoned request.

mod http;
mod value;

pub use http::HttpValueSource;
pub use value::{Suggestion, SuggestionValue};

use crate::model::DataSource;
use futures::future::BoxFuture;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Errors a lookup source can report
///
/// None of these reach the user or the parent form: [`fetch_suggestions`]
/// logs them and degrades to an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Transport failure (connection refused, timeout, reset)
    Network(String),
    /// Backend answered with a non-2xx status
    Status { status: u16, body: String },
    /// Body was not `{ "result": [primitive, ...] }`
    Malformed(String),
    /// Lookup URL could not be built from the configured base
    InvalidUrl(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "Backend returned status {}", status)
                } else {
                    write!(f, "Backend returned status {}: {}", status, body)
                }
            }
            Self::Malformed(msg) => write!(f, "Malformed payload: {}", msg),
            Self::InvalidUrl(msg) => write!(f, "Invalid lookup URL: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}

/// Producer of raw distinct values for a column
///
/// The returned future is `'static` so the editor can spawn it; each call
/// must issue at most one backend request and never retry.
pub trait SuggestionSource: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    /// Fetch the distinct values of `column` in `data_source`
    fn fetch_values(
        &self,
        data_source: &DataSource,
        column: &str,
    ) -> BoxFuture<'static, Result<Vec<SuggestionValue>, LookupError>>;
}

/// How a lookup settled
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Request finished; empty on failure or when lookup is unsupported
    Loaded(Vec<Suggestion>),
    /// Cancellation fired before the request finished
    Cancelled,
}

/// Fetch suggestions for `column`, honouring `cancel`
///
/// Data sources without lookup capability short-circuit to an empty list
/// without touching the source. Cancellation drops the in-flight request
/// future, which aborts the underlying HTTP call.
pub async fn fetch_suggestions(
    source: &dyn SuggestionSource,
    data_source: &DataSource,
    column: &str,
    cancel: &CancellationToken,
) -> FetchOutcome {
    if !data_source.supports_lookup {
        tracing::debug!(
            "Data source {} has no value lookup, skipping fetch for '{}'",
            data_source.id,
            column
        );
        return FetchOutcome::Loaded(Vec::new());
    }

    let request = source.fetch_values(data_source, column);

    tokio::select! {
        biased;

        _ = cancel.cancelled() => {
            tracing::debug!("Lookup for '{}' cancelled", column);
            FetchOutcome::Cancelled
        }

        result = request => match result {
            Ok(values) => {
                tracing::debug!(
                    "Lookup for '{}' returned {} value(s) via {}",
                    column,
                    values.len(),
                    source.name()
                );
                FetchOutcome::Loaded(values.into_iter().map(Suggestion::from).collect())
            }
            Err(e) => {
                tracing::warn!("Value lookup for '{}' failed: {}", column, e);
                FetchOutcome::Loaded(Vec::new())
            }
        },
    }
}
