// hits2series-core - Platform-agnostic core logic
//
// This crate contains the PURE transformation logic for turning raw
// search hits into render-ready plot series. No I/O, no async, no
// runtime dependencies.
//
// Everything here is a deterministic function of its inputs: the same
// accumulated document set, series configuration and time field always
// produce the same series. Suspension points, retrieval and state all
// live in hits2series-panel.

pub mod document;
pub mod render;
pub mod series;
pub mod timestamp;
pub mod zoom;

// Re-export commonly used types
pub use document::{flatten_json, FieldValue, RawDocument};
pub use render::{hover_label, prepare_render, PrepareError, RenderSeries};
pub use series::{demultiplex, PlotSeries, SeriesSpec, CHART_PALETTE};
pub use timestamp::{parse_timestamp, TimestampError};
pub use zoom::{zoom_range, TimeRange};
