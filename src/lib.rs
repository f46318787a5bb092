//! citation-viz: citation charts with zoom, pan and synchronized data fetching.
//!
//! The crate is split the same way data flows through it:
//! - `fetch` retrieves named datasets with retry, backoff and caching,
//! - `records` validates the wire payloads at the boundary,
//! - `api` reconciles each dataset with the user's zoom window and builds
//!   backend-agnostic frames,
//! - `render` executes frames (`NullRenderer`, optional Cairo backend),
//! - `interaction` resolves pointer hits, tooltips and navigation.

pub mod api;
pub mod core;
pub mod error;
pub mod export;
pub mod fetch;
pub mod interaction;
pub mod records;
pub mod render;
pub mod telemetry;

pub use api::{
    ChartConfig, ChartStyle, ChartVariant, CitationChart, CitationHeatmap, DataChangeReconciler,
    ReconcileDecision, ReconcilerConfig,
};
pub use error::{ChartError, ChartResult, FetchError, FetchResult};
pub use records::CitationDataResponse;
