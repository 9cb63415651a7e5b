// hits2series - Turn raw search hits into render-ready time series
//
// Facade crate: re-exports the member crates so a host dashboard can
// depend on one name. The pipeline is
//
//   build_search_request -> SearchEngine -> GraphPanel (accumulate)
//     -> demultiplex -> PanelEvent::RenderReady -> prepare_render
//
// with the engine, filter store and drawing layer supplied by the host.

pub use hits2series_config::{self as config, PanelConfig, QuerySpec, Timezone};
pub use hits2series_panel::{
    self as panel, FilterId, FilterStore, GraphPanel, PanelEvent, RangeBound, RetrievalError,
    SearchEngine, TimeFilter,
};
pub use hits2series_query::{
    self as query, build_search_request, render_curl, SearchRequest, SearchResponse,
};

pub use hits2series_core::{
    demultiplex, parse_timestamp, prepare_render, zoom_range, FieldValue, PlotSeries,
    PrepareError, RawDocument, RenderSeries, SeriesSpec, TimeRange, TimestampError,
    CHART_PALETTE,
};
