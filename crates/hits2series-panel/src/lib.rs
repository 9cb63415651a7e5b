// hits2series-panel - Request lifecycle and result accumulation
//
// This crate owns everything that is not pure: issuing segment-by-
// segment retrievals against the (external) search engine, tracking
// request identity so stale completions never corrupt displayed data,
// merging hits into the accumulated document set, and pushing derived
// series out to the rendering boundary as explicit events.
//
// Scheduling is single-writer cooperative: suspension happens only at
// the retrieval call, and the token-staleness check acts as the
// admission gate, so at most one logical writer ever mutates the
// accumulated state for good.

mod collaborators;
mod events;
mod panel;

pub use collaborators::{
    FilterId, FilterStore, RangeBound, SearchEngine, TimeFilter, TIME_FILTER_KIND,
};
pub use events::PanelEvent;
pub use panel::{GraphPanel, Phase, RequestToken, RetrievalError};
