use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::error::FetchResult;

use super::{RetryPolicy, Transport, retry_with_backoff};

/// Decoder from a JSON body to the cached value.
pub type Decoder<V> = fn(Value) -> FetchResult<V>;

/// Observable state of a cached resource.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSnapshot<V> {
    pub value: Option<V>,
    pub loading: bool,
    pub error: Option<String>,
    /// Set only by a successful fetch.
    pub fetched_at: Option<Instant>,
    /// `value` is the hardcoded fallback.
    pub is_fallback: bool,
}

impl<V> Default for CachedSnapshot<V> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
            fetched_at: None,
            is_fallback: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Still fresh; no request issued.
    Hit,
    Fetched,
    /// Every attempt failed; fallback installed.
    Fallback,
}

/// Single resource with a freshness window and a fallback value.
pub struct CachedResource<V: Clone, T: Transport> {
    transport: T,
    path: &'static str,
    decode: Decoder<V>,
    fallback: V,
    ttl: Duration,
    policy: RetryPolicy,
    state: Mutex<CachedSnapshot<V>>,
}

impl<V: Clone + Send + Sync, T: Transport> CachedResource<V, T> {
    pub fn new(
        transport: T,
        path: &'static str,
        decode: Decoder<V>,
        fallback: V,
        ttl: Duration,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            path,
            decode,
            fallback,
            ttl,
            policy,
            state: Mutex::new(CachedSnapshot::default()),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> CachedSnapshot<V> {
        self.state.lock().clone()
    }

    /// Current value, or the fallback when nothing was loaded yet.
    #[must_use]
    pub fn value_or_fallback(&self) -> V {
        self.state
            .lock()
            .value
            .clone()
            .unwrap_or_else(|| self.fallback.clone())
    }

    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.state
            .lock()
            .fetched_at
            .is_some_and(|at| at.elapsed() < self.ttl)
    }

    /// Drops the freshness mark; the next `fetch` goes to the network.
    pub fn invalidate(&self) {
        self.state.lock().fetched_at = None;
    }

    /// Loads the resource unless it is still fresh and `force` is unset.
    pub async fn fetch(&self, force: bool) -> CacheOutcome {
        if !force && self.is_fresh() {
            trace!(path = self.path, "cache hit");
            return CacheOutcome::Hit;
        }
        {
            let mut state = self.state.lock();
            state.loading = true;
            state.error = None;
        }

        let result = retry_with_backoff(self.policy, |_| async move {
            let body = self.transport.get_json(self.path, &[]).await?;
            (self.decode)(body)
        })
        .await;

        let mut state = self.state.lock();
        match result {
            Ok(value) => {
                *state = CachedSnapshot {
                    value: Some(value),
                    loading: false,
                    error: None,
                    fetched_at: Some(Instant::now()),
                    is_fallback: false,
                };
                debug!(path = self.path, "resource cached");
                CacheOutcome::Fetched
            }
            Err(exhausted) => {
                // A previously fetched value beats the fallback.
                let kept = if state.is_fallback {
                    None
                } else {
                    state.value.take()
                };
                *state = CachedSnapshot {
                    is_fallback: kept.is_none(),
                    value: Some(kept.unwrap_or_else(|| self.fallback.clone())),
                    loading: false,
                    error: Some(exhausted.error.to_string()),
                    fetched_at: None,
                };
                warn!(
                    path = self.path,
                    attempts = exhausted.attempts,
                    error = %exhausted.error,
                    "resource unavailable; using fallback"
                );
                CacheOutcome::Fallback
            }
        }
    }

    /// `invalidate` followed by a forced fetch.
    pub async fn refresh(&self) -> CacheOutcome {
        self.invalidate();
        self.fetch(true).await
    }
}
