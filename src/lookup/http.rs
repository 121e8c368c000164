//! Analytics backend value lookup over HTTP
//!
//! `GET {base}/api/v1/datasource/table/{id}/column/{column}/values/`
//! answers `{ "result": [string | number | boolean | null, ...] }`.

use super::{LookupError, SuggestionSource, SuggestionValue};
use crate::model::DataSource;
use anyhow::{Context, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// Response body of the column values endpoint
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    result: Vec<SuggestionValue>,
}

/// Value source backed by the analytics backend REST API
pub struct HttpValueSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpValueSource {
    /// Create a source for the backend at `base_url`
    ///
    /// # Errors
    /// Returns an error if the URL is not an absolute http(s) base or the
    /// HTTP client cannot be built.
    /// Without a timeout, requests wait until the backend answers or the
    /// lookup is cancelled.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid backend URL '{}'", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Backend URL '{}' cannot be used as a base", base_url);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        match timeout {
            Some(timeout) => tracing::debug!(
                "Initialized backend value source: {} (timeout {}s)",
                base_url,
                timeout.as_secs()
            ),
            None => tracing::debug!(
                "Initialized backend value source: {} (no timeout)",
                base_url
            ),
        }

        Ok(Self { client, base_url })
    }

    /// Build the lookup URL; the column becomes one percent-encoded segment
    pub fn values_url(&self, datasource_id: u64, column: &str) -> Result<Url, LookupError> {
        let id = datasource_id.to_string();
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend([
                "api",
                "v1",
                "datasource",
                "table",
                id.as_str(),
                "column",
                column,
                "values",
                "",
            ]);
        Ok(url)
    }
}

impl SuggestionSource for HttpValueSource {
    fn name(&self) -> &'static str {
        "backend"
    }

    fn fetch_values(
        &self,
        data_source: &DataSource,
        column: &str,
    ) -> BoxFuture<'static, Result<Vec<SuggestionValue>, LookupError>> {
        let client = self.client.clone();
        let url = self.values_url(data_source.id, column);

        async move {
            let url = url?;
            tracing::debug!("GET {}", url);

            let response = client
                .get(url)
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(|e| LookupError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LookupError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let body: ValuesResponse = response.json().await.map_err(|e| {
                if e.is_decode() {
                    LookupError::Malformed(e.to_string())
                } else {
                    LookupError::Network(e.to_string())
                }
            })?;

            Ok(body.result)
        }
        .boxed()
    }
}
