use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::RetryPolicy;

/// Endpoint, retry and cache settings shared by resource fetchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub base_url: String,
    /// Total attempts per logical request, first one included.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles afterwards.
    pub base_delay_ms: u64,
    /// Freshness window of cached single resources.
    pub cache_ttl_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            max_attempts: 3,
            base_delay_ms: 1_000,
            cache_ttl_ms: 5 * 60 * 1_000,
        }
    }
}

impl FetchConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "fetch base_url must not be empty".to_owned(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(ChartError::InvalidData(
                "fetch max_attempts must be >= 1".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }

    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse fetch config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
