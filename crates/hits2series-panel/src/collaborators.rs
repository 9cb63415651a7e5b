//! Boundary traits for the external collaborators.
//!
//! The real search engine and the dashboard's filter store live in the
//! host; the panel only sees these traits. Tests drive the panel with
//! scripted implementations.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

use hits2series_core::TimeRange;
use hits2series_query::{SearchRequest, SearchResponse};

/// Filter type installed for time windows. Zooming out removes existing
/// filters of this kind before installing the new one.
pub const TIME_FILTER_KIND: &str = "time";

/// Executes one built request against one index segment.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Base URL of the engine, used only for the diagnostic inspector
    /// rendering.
    fn endpoint(&self) -> String;

    /// Run the request. `Err` means the call itself failed (transport,
    /// serialization); an engine-side failure arrives as a successful
    /// response carrying an error payload.
    async fn search(&self, index: &str, request: &SearchRequest) -> Result<SearchResponse>;
}

/// Identifier the filter store hands back for an installed filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterId(pub u64);

/// A time-window filter keyed to the panel's time field.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeFilter {
    pub field: String,
    pub range: TimeRange,
}

/// Which resolution of a relative range to report when the active
/// window is not a fixed pair of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    /// The widest reading of the range.
    Earliest,
    /// The narrowest reading of the range.
    Latest,
}

/// The dashboard's filter/time-range store.
///
/// Installing or removing filters is expected to eventually come back
/// to the panel as a refresh; the store owns that loop, not the panel.
pub trait FilterStore: Send + Sync {
    /// The active time window, if one is set.
    fn time_range(&self, bound: RangeBound) -> Option<TimeRange>;

    /// The compound filter every outbound query is intersected with.
    fn compound_filter(&self) -> JsonValue;

    fn set_filter(&self, filter: TimeFilter) -> FilterId;

    /// Remove all filters of the given kind, returning how many went.
    fn remove_filters_by_type(&self, kind: &str) -> usize;

    /// Ask the dashboard to start a new refresh cycle.
    fn refresh(&self);
}
