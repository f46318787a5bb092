use serde_json::Value;

use crate::error::FetchResult;
use crate::records::CitationDataResponse;

/// Group of named datasets delivered by one endpoint.
///
/// `Default` is the empty state every key falls back to.
pub trait ResourceBundle: Default + Clone + Send + Sync + 'static {
    const ENDPOINT: &'static str;
    /// Dataset keys in display order.
    const KEYS: &'static [&'static str];

    /// Validates and normalizes a decoded body.
    fn from_response(body: Value) -> FetchResult<Self>;

    /// Number of records currently held under `key`; `None` for unknown keys.
    fn record_count(&self, key: &str) -> Option<usize>;
}

impl ResourceBundle for CitationDataResponse {
    const ENDPOINT: &'static str = "/citation-data-unified";
    const KEYS: &'static [&'static str] = &[
        Self::IMPACT,
        Self::TRENDS,
        Self::HEATMAP,
        Self::TOP_PAPERS,
    ];

    fn from_response(body: Value) -> FetchResult<Self> {
        Self::from_json_value(body)
    }

    fn record_count(&self, key: &str) -> Option<usize> {
        match key {
            Self::IMPACT => Some(self.impact_data.len()),
            Self::TRENDS => Some(self.trends_data.len()),
            Self::HEATMAP => Some(self.heatmap_data.len()),
            Self::TOP_PAPERS => Some(self.top_papers_data.len()),
            _ => None,
        }
    }
}
