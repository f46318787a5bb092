use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::FetchError;

use super::{FetchParams, ResourceBundle, RetryPolicy, Transport, retry_with_backoff};

/// Per-key flags of one dataset slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResourceStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

/// What a consumer should show for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetState {
    Idle,
    Loading,
    Error(String),
    /// Valid response without records; not an error.
    Empty,
    Ready { records: usize },
}

/// Whole-set view; every update replaces it as one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSetSnapshot<B> {
    pub data: B,
    pub status: IndexMap<&'static str, ResourceStatus>,
    /// Failed attempts of the last exhausted cycle; zero otherwise.
    pub retry_count: u32,
    pub generation: u64,
}

impl<B: ResourceBundle> ResourceSetSnapshot<B> {
    fn with_status(
        data: B,
        generation: u64,
        retry_count: u32,
        status: impl Fn(&'static str) -> ResourceStatus,
    ) -> Self {
        Self {
            data,
            status: B::KEYS.iter().map(|key| (*key, status(*key))).collect(),
            retry_count,
            generation,
        }
    }

    fn idle(generation: u64) -> Self {
        Self::with_status(B::default(), generation, 0, |_| ResourceStatus::default())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status.values().any(|status| status.loading)
    }

    /// First error message; all keys share it after a failed cycle.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.status
            .values()
            .find_map(|status| status.error.as_deref())
    }

    #[must_use]
    pub fn dataset_state(&self, key: &str) -> Option<DatasetState> {
        let status = self.status.get(key)?;
        let records = self.data.record_count(key)?;
        Some(if status.loading {
            DatasetState::Loading
        } else if let Some(error) = &status.error {
            DatasetState::Error(error.clone())
        } else if status.last_fetched_at.is_none() {
            DatasetState::Idle
        } else if records == 0 {
            DatasetState::Empty
        } else {
            DatasetState::Ready { records }
        })
    }
}

/// Result of one `fetch_all` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded,
    /// `search` found the same filters already loaded; nothing was requested.
    Cached,
    Failed { error: FetchError, attempts: u32 },
    /// A newer `fetch_all` or `clear` was issued; this result was dropped.
    Superseded,
}

/// Named datasets fetched, retried and replaced together.
///
/// Each `fetch_all` takes a new generation number; a completion whose
/// generation is no longer the latest is discarded.
pub struct ResourceSet<B: ResourceBundle, T: Transport> {
    transport: T,
    policy: RetryPolicy,
    state: Mutex<ResourceSetSnapshot<B>>,
    /// Filters of the data currently held; `None` unless the last cycle loaded.
    loaded_params: Mutex<Option<FetchParams>>,
    generation: AtomicU64,
}

impl<B: ResourceBundle, T: Transport> ResourceSet<B, T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            state: Mutex::new(ResourceSetSnapshot::idle(0)),
            loaded_params: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ResourceSetSnapshot<B> {
        self.state.lock().clone()
    }

    #[must_use]
    pub fn data(&self) -> B {
        self.state.lock().data.clone()
    }

    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.state.lock().retry_count
    }

    #[must_use]
    pub fn status(&self, key: &str) -> Option<ResourceStatus> {
        self.state.lock().status.get(key).cloned()
    }

    /// Filters the held data was loaded with.
    #[must_use]
    pub fn loaded_params(&self) -> Option<FetchParams> {
        self.loaded_params.lock().clone()
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Back to the idle state without a request; in-flight fetches are
    /// dropped on completion.
    pub fn clear(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.lock();
        *state = ResourceSetSnapshot::idle(generation);
        *self.loaded_params.lock() = None;
        debug!(endpoint = B::ENDPOINT, generation, "resource set cleared");
    }

    /// Loads `params` unless the held data already came from the same filters.
    ///
    /// `force` always refetches. A failed or cleared cycle forgets the
    /// filters, so the next search requests again.
    pub async fn search(&self, params: &FetchParams, force: bool) -> FetchOutcome {
        if !force && self.loaded_params.lock().as_ref() == Some(params) {
            debug!(endpoint = B::ENDPOINT, "filters unchanged, keeping loaded data");
            return FetchOutcome::Cached;
        }
        self.fetch_all(params).await
    }

    /// Refreshes every key from one request.
    ///
    /// Data is cleared and every key marked loading before the first attempt.
    /// The cycle ends with either all keys holding fresh data or all keys
    /// holding the same error with empty data.
    pub async fn fetch_all(&self, params: &FetchParams) -> FetchOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock();
            *self.loaded_params.lock() = None;
            let previous = state.status.clone();
            *state = ResourceSetSnapshot::with_status(B::default(), generation, 0, |key| {
                ResourceStatus {
                    loading: true,
                    error: None,
                    last_fetched_at: previous.get(key).and_then(|status| status.last_fetched_at),
                }
            });
        }
        debug!(endpoint = B::ENDPOINT, generation, "fetch started");

        let query = params.query_pairs();
        let result = retry_with_backoff(self.policy, |attempt| {
            let query = &query;
            async move {
                debug!(endpoint = B::ENDPOINT, generation, attempt = attempt + 1, "fetch attempt");
                let body = self.transport.get_json(B::ENDPOINT, query).await?;
                B::from_response(body)
            }
        })
        .await;

        let mut state = self.state.lock();
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation {
            debug!(
                endpoint = B::ENDPOINT,
                generation, latest, "dropping superseded fetch result"
            );
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(data) => {
                let fetched_at = Utc::now();
                *state = ResourceSetSnapshot::with_status(data, generation, 0, |_| {
                    ResourceStatus {
                        loading: false,
                        error: None,
                        last_fetched_at: Some(fetched_at),
                    }
                });
                *self.loaded_params.lock() = Some(params.clone());
                info!(endpoint = B::ENDPOINT, generation, "fetch completed");
                FetchOutcome::Loaded
            }
            Err(exhausted) => {
                let message = exhausted.error.to_string();
                let previous = state.status.clone();
                *state = ResourceSetSnapshot::with_status(
                    B::default(),
                    generation,
                    exhausted.attempts,
                    |key| ResourceStatus {
                        loading: false,
                        error: Some(message.clone()),
                        last_fetched_at: previous
                            .get(key)
                            .and_then(|status| status.last_fetched_at),
                    },
                );
                warn!(
                    endpoint = B::ENDPOINT,
                    generation,
                    attempts = exhausted.attempts,
                    error = %message,
                    "fetch failed after retries"
                );
                FetchOutcome::Failed {
                    error: exhausted.error,
                    attempts: exhausted.attempts,
                }
            }
        }
    }
}
