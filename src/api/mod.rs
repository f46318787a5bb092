mod chart;
mod chart_interaction_controller;
mod chart_render_frame_builder;
mod config;
mod heatmap;
mod reconciler;
mod style;

pub use chart::CitationChart;
pub use chart_render_frame_builder::{AxisKind, ChartScene, EMPTY_STATE_TEXT, build_chart_frame};
pub use config::{ChartConfig, ChartVariant};
pub use heatmap::{
    CitationHeatmap, HeatmapCell, HeatmapGrid, HeatmapLayout, MONTH_NAMES, build_heatmap_frame,
    intensity_level,
};
pub use reconciler::{DataChangeReconciler, ReconcileDecision, ReconcilerConfig};
pub use style::ChartStyle;
