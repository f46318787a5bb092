//! Resource fetching: one request per logical refresh, retried with
//! exponential backoff, applied to state as a whole-object replacement.

mod bundle;
mod cached;
mod config;
mod filter_options;
mod params;
mod resource_set;
mod retry;
mod transport;

pub use bundle::ResourceBundle;
pub use cached::{CacheOutcome, CachedResource, CachedSnapshot, Decoder};
pub use config::FetchConfig;
pub use filter_options::{
    ALL_SUBJECTS_LABEL, FilterOption, SUBJECTS_PATH, decode_subject_options,
    fallback_subject_options, subject_options, subject_options_resource, title_case,
};
pub use params::{FetchParams, SortOrder, TimeRange};
pub use resource_set::{
    DatasetState, FetchOutcome, ResourceSet, ResourceSetSnapshot, ResourceStatus,
};
pub use retry::{RetryExhausted, RetryPolicy, retry_with_backoff};
#[cfg(feature = "http-client")]
pub use transport::HttpTransport;
pub use transport::Transport;

use crate::records::CitationDataResponse;

/// Resource set for the unified citation endpoint.
pub type CitationResourceSet<T> = ResourceSet<CitationDataResponse, T>;
