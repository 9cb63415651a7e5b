//! Scripted collaborators for driving the panel in tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value as JsonValue};
use tokio::sync::oneshot;

use hits2series_core::TimeRange;
use hits2series_panel::{FilterId, FilterStore, RangeBound, SearchEngine, TimeFilter};
use hits2series_query::{SearchRequest, SearchResponse};

pub enum ReplyBody {
    Ready(Result<SearchResponse>),
    Gated(oneshot::Receiver<Result<SearchResponse>>),
}

/// One scripted engine completion, optionally gated on a channel so a
/// test can hold a request in flight while another one overtakes it.
pub struct Reply {
    pub started: Option<oneshot::Sender<()>>,
    pub body: ReplyBody,
}

impl Reply {
    pub fn ready(response: SearchResponse) -> Self {
        Self {
            started: None,
            body: ReplyBody::Ready(Ok(response)),
        }
    }

    pub fn transport_failure(message: &str) -> Self {
        Self {
            started: None,
            body: ReplyBody::Ready(Err(anyhow!(message.to_string()))),
        }
    }

    /// A reply that blocks until released. Returns the reply, the
    /// release handle, and a signal that fires once the call is in
    /// flight.
    pub fn gated() -> (
        Self,
        oneshot::Sender<Result<SearchResponse>>,
        oneshot::Receiver<()>,
    ) {
        let (release_tx, release_rx) = oneshot::channel();
        let (started_tx, started_rx) = oneshot::channel();
        let reply = Self {
            started: Some(started_tx),
            body: ReplyBody::Gated(release_rx),
        };
        (reply, release_tx, started_rx)
    }
}

/// Engine double that serves replies strictly in script order and
/// panics on any unscripted call.
pub struct ScriptedEngine {
    replies: Mutex<VecDeque<Reply>>,
}

impl ScriptedEngine {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
        })
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().push_back(reply);
    }
}

#[async_trait]
impl SearchEngine for ScriptedEngine {
    fn endpoint(&self) -> String {
        "http://engine.test:9200".to_string()
    }

    async fn search(&self, _index: &str, _request: &SearchRequest) -> Result<SearchResponse> {
        let reply = self
            .replies
            .lock()
            .pop_front()
            .expect("engine received an unscripted search call");
        if let Some(started) = reply.started {
            let _ = started.send(());
        }
        match reply.body {
            ReplyBody::Ready(result) => result,
            ReplyBody::Gated(release) => release.await.expect("gate sender dropped"),
        }
    }
}

/// Build an engine response carrying the given `_source` payloads.
pub fn hit_response(total: u64, sources: Vec<JsonValue>) -> SearchResponse {
    let hits: Vec<JsonValue> = sources
        .into_iter()
        .map(|source| json!({"_source": source}))
        .collect();
    serde_json::from_value(json!({"hits": {"total": total, "hits": hits}}))
        .expect("fixture response deserializes")
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    SetFilter(TimeFilter),
    RemoveByType(String),
    Refresh,
}

/// Filter store double that records every interaction.
#[derive(Default)]
pub struct RecordingFilterStore {
    pub range: Mutex<Option<TimeRange>>,
    pub calls: Mutex<Vec<StoreCall>>,
}

impl RecordingFilterStore {
    pub fn with_range(range: TimeRange) -> Arc<Self> {
        let store = Self::default();
        *store.range.lock() = Some(range);
        Arc::new(store)
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }
}

impl FilterStore for RecordingFilterStore {
    fn time_range(&self, _bound: RangeBound) -> Option<TimeRange> {
        *self.range.lock()
    }

    fn compound_filter(&self) -> JsonValue {
        json!({"match_all": {}})
    }

    fn set_filter(&self, filter: TimeFilter) -> FilterId {
        let mut calls = self.calls.lock();
        calls.push(StoreCall::SetFilter(filter));
        FilterId(calls.len() as u64)
    }

    fn remove_filters_by_type(&self, kind: &str) -> usize {
        self.calls.lock().push(StoreCall::RemoveByType(kind.to_string()));
        1
    }

    fn refresh(&self) {
        self.calls.lock().push(StoreCall::Refresh);
    }
}
