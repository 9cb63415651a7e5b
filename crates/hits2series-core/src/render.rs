//! Render-boundary preparation.
//!
//! The drawing layer is an external collaborator; it receives labelled,
//! colored series and draws pixels. Preparation converts demultiplexed
//! series into that form, reporting configuration problems as values
//! instead of faulting mid-render.

use chrono::{TimeZone, Utc};
use thiserror::Error;

use crate::series::PlotSeries;

/// What the rendering boundary consumes: a labelled series snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSeries {
    pub label: String,
    pub color: String,
    pub points: Vec<(i64, f64)>,
    pub hits: u64,
}

/// Series-preparation failures, surfaced as inline chart text by the
/// host rather than crashing it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrepareError {
    #[error("no series to draw for the moment")]
    NoSeries,
    #[error("series {index} has no value field to label it with")]
    MissingLabel { index: usize },
}

/// Turn demultiplexed series into render-ready form.
///
/// Fails when there is nothing to draw, or when a series has no alias
/// to label it with; either way the caller shows the message in place
/// of the chart and recovers on the next refresh.
pub fn prepare_render(series: &[PlotSeries]) -> Result<Vec<RenderSeries>, PrepareError> {
    if series.is_empty() {
        return Err(PrepareError::NoSeries);
    }

    series
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let label = item
                .alias
                .clone()
                .ok_or(PrepareError::MissingLabel { index })?;
            Ok(RenderSeries {
                label,
                color: item.color.to_string(),
                points: item.points.clone(),
                hits: item.hits,
            })
        })
        .collect()
}

/// Tooltip text for a hovered point: the value rounded to an integer
/// and the instant as `MM/DD HH:MM:SS`.
pub fn hover_label(timestamp_millis: i64, value: f64) -> String {
    match Utc.timestamp_millis_opt(timestamp_millis).single() {
        Some(instant) => format!("{:.0} @ {}", value, instant.format("%m/%d %H:%M:%S")),
        None => format!("{:.0}", value),
    }
}
