pub mod grid;
pub mod padding;
pub mod primitives;
pub mod projection;
pub mod scale;
pub mod signature;
pub mod types;
pub mod zoom_viewport;

pub use grid::{GridBounds, grid_line_count, grid_values};
pub use padding::{PaddingPolicy, fit_window, raw_extent};
pub use projection::{
    PlotArea, PlotMargins, PlotScales, ProjectedPoint, project_visible_points,
};
pub use scale::{LinearScale, PixelRange, to_pixel, to_value};
pub use signature::DataSignature;
pub use types::{DataPoint, Domain, ViewWindow, Viewport};
pub use zoom_viewport::{
    CENTER_PAN_PERCENT, PanState, ViewportPhase, ViewportState, ZoomConfig, ZoomViewport,
};
