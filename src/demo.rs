// Demo mode: canned column values with artificial latency
//
// Lets the control run without an analytics backend. Latency differs per
// column so quickly switching columns produces out-of-order responses,
// which is exactly what the editor's request tokens have to absorb.
//
// Columns:
// - country, city, year, is_active: canned values
// - region: always fails with a 500 (shows the empty-suggestions fallback)
// - anything else: a few synthetic values
//
// Run with: MAPCTL_DEMO=1 cargo run --release

use crate::lookup::{LookupError, SuggestionSource, SuggestionValue};
use crate::model::DataSource;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;

/// Data source shown in demo mode
pub fn demo_data_source() -> DataSource {
    DataSource::new(
        1,
        "demo_sales",
        ["country", "city", "year", "is_active", "region", "product_line"]
            .into_iter()
            .map(String::from)
            .collect(),
    )
}

/// In-process value source with per-column latency
#[derive(Debug, Clone)]
pub struct DemoValueSource {
    base_delay: Duration,
}

impl DemoValueSource {
    pub fn new() -> Self {
        Self::with_base_delay(Duration::from_millis(250))
    }

    /// Scale all latencies (tests use zero)
    pub fn with_base_delay(base_delay: Duration) -> Self {
        Self { base_delay }
    }

    /// Deterministic per-column latency: 1x to 5x the base delay
    fn latency_for(&self, column: &str) -> Duration {
        let spread = column.bytes().map(u32::from).sum::<u32>() % 5 + 1;
        self.base_delay * spread
    }
}

impl Default for DemoValueSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Canned raw values for a demo column
fn canned_values(column: &str) -> Result<Vec<SuggestionValue>, LookupError> {
    let raw = match column {
        "country" => json!(["India", "France", "Brazil", "Japan", null, ""]),
        "city" => json!(["Pune", "Lyon", "Recife", "Osaka"]),
        "year" => json!([2021, 2022, 2023, 2024]),
        "is_active" => json!([true, false]),
        "region" => {
            return Err(LookupError::Status {
                status: 500,
                body: "demo: region lookup is broken on purpose".to_string(),
            })
        }
        other => json!([
            format!("{}_a", other),
            format!("{}_b", other),
            format!("{}_c", other)
        ]),
    };
    serde_json::from_value(raw).map_err(|e| LookupError::Malformed(e.to_string()))
}

impl SuggestionSource for DemoValueSource {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn fetch_values(
        &self,
        _data_source: &DataSource,
        column: &str,
    ) -> BoxFuture<'static, Result<Vec<SuggestionValue>, LookupError>> {
        let delay = self.latency_for(column);
        let column = column.to_string();
        async move {
            sleep(delay).await;
            canned_values(&column)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn canned_columns_decode() {
        let source = DemoValueSource::with_base_delay(Duration::ZERO);
        let ds = demo_data_source();

        let years = source.fetch_values(&ds, "year").await.unwrap();
        assert_eq!(years.len(), 4);

        let synthetic = source.fetch_values(&ds, "product_line").await.unwrap();
        assert_eq!(
            synthetic.first(),
            Some(&SuggestionValue::Text("product_line_a".into()))
        );
    }

    #[tokio::test]
    async fn region_fails() {
        let source = DemoValueSource::with_base_delay(Duration::ZERO);
        let err = source
            .fetch_values(&demo_data_source(), "region")
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Status { status: 500, .. }));
    }

    #[test]
    fn default_source_simulates_latency() {
        let source = DemoValueSource::default();
        assert!(source.latency_for("year") >= Duration::from_millis(250));
    }

    #[test]
    fn latency_varies_by_column() {
        let source = DemoValueSource::new();
        let delays: std::collections::HashSet<_> = demo_data_source()
            .columns
            .iter()
            .map(|c| source.latency_for(c))
            .collect();
        assert!(delays.len() > 1);
    }
}
