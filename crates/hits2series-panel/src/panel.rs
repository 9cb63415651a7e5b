//! The panel itself: token-guarded segment retrieval, document
//! accumulation and zoom/selection wiring.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use hits2series_config::PanelConfig;
use hits2series_core::{demultiplex, hover_label, zoom_range, PlotSeries, RawDocument, TimeRange};
use hits2series_query::{build_search_request, render_curl, SearchResponse};

use crate::collaborators::{FilterStore, RangeBound, SearchEngine, TimeFilter, TIME_FILTER_KIND};
use crate::events::PanelEvent;

/// Identity of one top-level refresh. Minted when segment 0 is issued;
/// strictly increasing per panel, so a completion can always tell
/// whether a newer refresh has superseded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Where the accumulator currently is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Requesting {
        token: RequestToken,
        segment: usize,
    },
    Merging {
        token: RequestToken,
    },
}

/// Displayable retrieval failure. Halts merging for the refresh it
/// belongs to; already-accumulated data stays on screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetrievalError {
    /// The engine answered, but with an error payload.
    #[error("the search engine reported: {0}")]
    Engine(String),
    /// The call itself failed before the engine could answer.
    #[error("retrieval failed: {0}")]
    Transport(String),
}

#[derive(Debug, Default)]
struct AccumulatorState {
    active_token: Option<RequestToken>,
    phase: Phase,
    documents: Vec<RawDocument>,
    total_hits: u64,
    series: Vec<PlotSeries>,
    error: Option<RetrievalError>,
    inspector: Option<String>,
}

/// One chart panel: accumulates hits across index segments under a
/// request token and re-derives plot series after every merge.
///
/// All mutation funnels through [`GraphPanel::refresh`]; the rendering
/// boundary only ever receives snapshots via [`PanelEvent`].
pub struct GraphPanel {
    config: Mutex<Arc<PanelConfig>>,
    engine: Arc<dyn SearchEngine>,
    filters: Arc<dyn FilterStore>,
    events: UnboundedSender<PanelEvent>,
    next_token: AtomicU64,
    state: Mutex<AccumulatorState>,
}

impl GraphPanel {
    /// Build a panel around an already-validated configuration.
    pub fn new(
        config: PanelConfig,
        engine: Arc<dyn SearchEngine>,
        filters: Arc<dyn FilterStore>,
        events: UnboundedSender<PanelEvent>,
    ) -> Self {
        Self {
            config: Mutex::new(Arc::new(config)),
            engine,
            filters,
            events,
            next_token: AtomicU64::new(0),
            state: Mutex::new(AccumulatorState::default()),
        }
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<PanelConfig> {
        self.config.lock().clone()
    }

    /// Swap in an edited configuration. Returns whether anything
    /// actually changed, which is the caller's cue to refresh.
    pub fn apply_config(&self, new_config: PanelConfig) -> bool {
        let mut slot = self.config.lock();
        if **slot == new_config {
            return false;
        }
        *slot = Arc::new(new_config);
        true
    }

    /// Run one top-level refresh: mint a token, clear accumulated
    /// state, then retrieve and merge every index segment in order.
    ///
    /// Completions belonging to a superseded token leave all state
    /// untouched. An empty index list is a no-op; the dashboard has
    /// nothing to query yet.
    pub async fn refresh(&self, indices: &[String]) {
        if indices.is_empty() {
            return;
        }

        let config = self.config();
        let token = RequestToken(self.next_token.fetch_add(1, Ordering::Relaxed) + 1);

        {
            let mut state = self.state.lock();
            state.active_token = Some(token);
            state.phase = Phase::Requesting { token, segment: 0 };
            state.documents.clear();
            state.total_hits = 0;
            state.error = None;
        }
        info!(token = token.0, segments = indices.len(), "starting refresh");

        for (segment, index) in indices.iter().enumerate() {
            let request = build_search_request(&config, &self.filters.compound_filter());

            if config.spyable {
                let rendered = render_curl(&self.engine.endpoint(), indices, &request);
                self.state.lock().inspector = Some(rendered);
            }

            {
                let mut state = self.state.lock();
                if state.active_token != Some(token) {
                    debug!(token = token.0, segment, "superseded before issue; stopping");
                    return;
                }
                state.phase = Phase::Requesting { token, segment };
            }

            let outcome = self.engine.search(index, &request).await;

            let event = {
                let mut state = self.state.lock();
                if state.active_token != Some(token) {
                    debug!(token = token.0, segment, "discarding stale completion");
                    return;
                }

                match outcome {
                    Err(err) => {
                        let error = RetrievalError::Transport(format!("{:#}", err));
                        warn!(token = token.0, segment, %error, "refresh halted");
                        state.error = Some(error.clone());
                        state.phase = Phase::Idle;
                        PanelEvent::RefreshFailed(error)
                    }
                    Ok(response) => match response.error {
                        Some(message) => {
                            let error = RetrievalError::Engine(parse_engine_error(&message));
                            warn!(token = token.0, segment, %error, "refresh halted");
                            state.error = Some(error.clone());
                            state.phase = Phase::Idle;
                            PanelEvent::RefreshFailed(error)
                        }
                        None => {
                            state.phase = Phase::Merging { token };
                            merge_segment(&mut state, &config, response);
                            debug!(
                                token = token.0,
                                segment,
                                documents = state.documents.len(),
                                "merged segment"
                            );
                            PanelEvent::RenderReady(state.series.clone())
                        }
                    },
                }
            };

            let halted = matches!(event, PanelEvent::RefreshFailed(_));
            let _ = self.events.send(event);
            if halted {
                return;
            }
        }

        let mut state = self.state.lock();
        if state.active_token == Some(token) {
            state.phase = Phase::Idle;
        }
    }

    /// Scale the active time window around its center and install the
    /// result, which triggers the next refresh cycle through the store.
    ///
    /// `factor < 1` zooms in, `factor > 1` zooms out. Zooming out
    /// replaces any existing time filter rather than composing with it.
    pub fn zoom(&self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            warn!(factor, "ignoring zoom with a non-positive factor");
            return;
        }

        let Some(range) = self.filters.time_range(RangeBound::Earliest) else {
            debug!("no active time range to zoom");
            return;
        };

        let zoomed = zoom_range(&range, factor, Utc::now());

        if factor > 1.0 {
            self.filters.remove_filters_by_type(TIME_FILTER_KIND);
        }
        self.filters.set_filter(TimeFilter {
            field: self.config().time_field.clone(),
            range: zoomed,
        });
        self.filters.refresh();
    }

    /// Convenience factors exposed as the panel's zoom links.
    pub fn zoom_in(&self) {
        self.zoom(0.5);
    }

    pub fn zoom_out(&self) {
        self.zoom(2.0);
    }

    /// Install the window a drag-selection picked on the chart,
    /// verbatim, and trigger a refresh.
    pub fn select_range(&self, range: TimeRange) {
        self.filters.set_filter(TimeFilter {
            field: self.config().time_field.clone(),
            range,
        });
        self.filters.refresh();
    }

    /// Tooltip text for a hovered point.
    pub fn hover_text(&self, timestamp_millis: i64, value: f64) -> String {
        hover_label(timestamp_millis, value)
    }

    /// Snapshot of the current series set.
    pub fn series(&self) -> Vec<PlotSeries> {
        self.state.lock().series.clone()
    }

    /// Running total of matching documents reported by the engine
    /// across merged segments.
    pub fn total_hits(&self) -> u64 {
        self.state.lock().total_hits
    }

    pub fn last_error(&self) -> Option<RetrievalError> {
        self.state.lock().error.clone()
    }

    /// The curl rendering of the most recently issued request, when the
    /// panel is spyable.
    pub fn inspector(&self) -> Option<String> {
        self.state.lock().inspector.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase() != Phase::Idle
    }
}

fn merge_segment(state: &mut AccumulatorState, config: &PanelConfig, response: SearchResponse) {
    state.documents.extend(
        response
            .hits
            .hits
            .iter()
            .map(|hit| RawDocument::from_hit(&hit.source, hit.highlight.as_ref())),
    );
    state.total_hits += response.hits.total;
    state.series = demultiplex(&state.documents, &config.series, &config.time_field);
}

/// Reduce an engine exception string to its leading description. Engine
/// errors tend to look like `SearchPhaseExecutionException[failed ...]`;
/// everything from the first bracket on is noise for a panel message.
fn parse_engine_error(message: &str) -> String {
    match message.split_once('[') {
        Some((head, _)) if !head.trim().is_empty() => head.trim().to_string(),
        _ => message.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_are_trimmed_to_their_description() {
        assert_eq!(
            parse_engine_error("SearchPhaseExecutionException[Failed to execute phase [query]]"),
            "SearchPhaseExecutionException"
        );
        assert_eq!(parse_engine_error("plain failure"), "plain failure");
        assert_eq!(parse_engine_error("[only brackets]"), "[only brackets]");
    }

    #[test]
    fn tokens_order_by_mint_sequence() {
        assert!(RequestToken(2) > RequestToken(1));
    }
}
