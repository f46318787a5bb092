use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use citation_viz::error::{FetchError, FetchResult};
use citation_viz::fetch::{
    CacheOutcome, FetchConfig, FilterOption, SUBJECTS_PATH, Transport, subject_options_resource,
};
use parking_lot::Mutex;
use serde_json::{Value, json};

/// Answers immediately from a queue and records requested paths.
#[derive(Default)]
struct QueuedTransport {
    responses: Mutex<VecDeque<FetchResult<Value>>>,
    paths: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl QueuedTransport {
    fn with(responses: Vec<FetchResult<Value>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for QueuedTransport {
    async fn get_json(&self, path: &str, _query: &[(&'static str, String)]) -> FetchResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().push(path.to_owned());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("offline".into())))
    }
}

fn subjects(names: &[&str]) -> FetchResult<Value> {
    Ok(json!({ "data": names }))
}

fn labels(options: &[FilterOption]) -> Vec<&str> {
    options.iter().map(|option| option.label.as_str()).collect()
}

#[tokio::test(start_paused = true)]
async fn fresh_value_is_served_without_a_request() {
    let transport = QueuedTransport::with(vec![subjects(&["genomics", "cell biology"])]);
    let resource = subject_options_resource(Arc::clone(&transport), &FetchConfig::default());

    assert_eq!(resource.fetch(false).await, CacheOutcome::Fetched);
    assert_eq!(
        labels(&resource.value_or_fallback()),
        vec!["All Subjects", "Genomics", "Cell Biology"]
    );
    assert!(resource.is_fresh());

    tokio::time::advance(Duration::from_secs(60)).await;
    assert_eq!(resource.fetch(false).await, CacheOutcome::Hit);
    assert_eq!(transport.calls(), 1);
    assert_eq!(transport.paths.lock().as_slice(), &[SUBJECTS_PATH.to_owned()]);
}

#[tokio::test(start_paused = true)]
async fn expired_value_is_refetched() {
    let transport = QueuedTransport::with(vec![
        subjects(&["genomics"]),
        subjects(&["genomics", "zoology"]),
    ]);
    let resource = subject_options_resource(Arc::clone(&transport), &FetchConfig::default());
    resource.fetch(false).await;

    tokio::time::advance(Duration::from_secs(5 * 60)).await;
    assert!(!resource.is_fresh());
    assert_eq!(resource.fetch(false).await, CacheOutcome::Fetched);
    assert_eq!(resource.value_or_fallback().len(), 3);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn force_and_refresh_bypass_freshness() {
    let transport = QueuedTransport::with(vec![
        subjects(&["genomics"]),
        subjects(&["immunology"]),
        subjects(&["zoology"]),
    ]);
    let resource = subject_options_resource(Arc::clone(&transport), &FetchConfig::default());
    resource.fetch(false).await;

    assert_eq!(resource.fetch(true).await, CacheOutcome::Fetched);
    assert_eq!(resource.value_or_fallback()[1].value, "immunology");
    assert_eq!(resource.refresh().await, CacheOutcome::Fetched);
    assert_eq!(resource.value_or_fallback()[1].value, "zoology");
    assert_eq!(transport.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn unreachable_endpoint_installs_fallback_after_retries() {
    let transport = QueuedTransport::with(Vec::new());
    let resource = subject_options_resource(Arc::clone(&transport), &FetchConfig::default());

    assert_eq!(resource.fetch(false).await, CacheOutcome::Fallback);
    assert_eq!(transport.calls(), 3);

    let snapshot = resource.snapshot();
    assert!(snapshot.is_fallback);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error.as_deref(), Some("network error: offline"));
    let options = snapshot.value.expect("fallback value");
    assert_eq!(options.len(), 6);
    assert_eq!(options[0], FilterOption::all_subjects());
    assert!(!resource.is_fresh());
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_previously_fetched_value() {
    let transport = QueuedTransport::with(vec![subjects(&["virology"])]);
    let resource = subject_options_resource(Arc::clone(&transport), &FetchConfig::default());
    resource.fetch(false).await;

    assert_eq!(resource.refresh().await, CacheOutcome::Fallback);
    let snapshot = resource.snapshot();
    assert!(!snapshot.is_fallback);
    assert!(snapshot.error.is_some());
    assert_eq!(labels(&resource.value_or_fallback()), vec!["All Subjects", "Virology"]);
}

#[tokio::test(start_paused = true)]
async fn malformed_subjects_payload_uses_fallback() {
    let transport = QueuedTransport::with(vec![
        Ok(json!({ "data": 7 })),
        Ok(json!([])),
        Ok(json!({ "items": [] })),
    ]);
    let config = FetchConfig {
        max_attempts: 3,
        ..FetchConfig::default()
    };
    let resource = subject_options_resource(Arc::clone(&transport), &config);

    assert_eq!(resource.fetch(false).await, CacheOutcome::Fallback);
    assert!(resource.snapshot().is_fallback);
}
