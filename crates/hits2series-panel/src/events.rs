//! Events the panel pushes to its host.
//!
//! Explicit message passing instead of an ambient broadcast bus: the
//! host owns the receiving end and decides what "render" means.

use hits2series_core::PlotSeries;

use crate::panel::RetrievalError;

#[derive(Debug, Clone)]
pub enum PanelEvent {
    /// A merge completed. Carries the freshly rebuilt series snapshot;
    /// the receiver owns it until the next one arrives.
    RenderReady(Vec<PlotSeries>),

    /// A refresh halted on a retrieval failure. Data accumulated by
    /// earlier segments of the refresh is retained and still displayed.
    RefreshFailed(RetrievalError),
}
