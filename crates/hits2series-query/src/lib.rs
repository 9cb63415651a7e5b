// hits2series-query - Wire types for the search engine boundary
//
// The engine itself is external; this crate owns what crosses the
// boundary in both directions: building the outbound request from the
// panel configuration, deserializing the raw response, and rendering a
// human-readable copy of the request for the inspector.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use hits2series_config::PanelConfig;

mod inspector;

pub use inspector::render_curl;

/// Sentinel tags wrapped around highlighted fragments; downstream
/// display code splits on these.
pub const HIGHLIGHT_PRE_TAG: &str = "@start-highlight@";
pub const HIGHLIGHT_POST_TAG: &str = "@end-highlight@";

/// Effectively "the whole field": the engine treats fragment size as a
/// 32-bit value, so this disables fragmenting.
pub const HIGHLIGHT_FRAGMENT_SIZE: u32 = 2147483647;

/// One outbound search request against a single index segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: JsonValue,
    pub highlight: Highlight,
    pub size: usize,
    pub sort: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub fragment_size: u32,
    pub pre_tags: Vec<String>,
    pub post_tags: Vec<String>,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            fragment_size: HIGHLIGHT_FRAGMENT_SIZE,
            pre_tags: vec![HIGHLIGHT_PRE_TAG.to_string()],
            post_tags: vec![HIGHLIGHT_POST_TAG.to_string()],
        }
    }
}

/// Assemble the outbound request: every configured query string OR-ed
/// together, intersected with the externally supplied compound filter,
/// capped at `max_points` hits and sorted by the time field descending.
///
/// An empty or missing query string falls back to the wildcard query.
pub fn build_search_request(config: &PanelConfig, filter: &JsonValue) -> SearchRequest {
    let mut should: Vec<JsonValue> = config
        .queries
        .iter()
        .map(|spec| {
            let query = if spec.query.is_empty() {
                "*"
            } else {
                spec.query.as_str()
            };
            json!({"query_string": {"query": query}})
        })
        .collect();
    if should.is_empty() {
        should.push(json!({"query_string": {"query": "*"}}));
    }

    SearchRequest {
        query: json!({
            "filtered": {
                "query": {"bool": {"should": should}},
                "filter": filter,
            }
        }),
        highlight: Highlight::default(),
        size: config.max_points,
        sort: json!([{ (config.time_field.as_str()): {"order": "desc"} }]),
    }
}

/// Raw engine response for one segment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Error payload; present means the whole response is unusable.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub hits: HitSet,
}

impl SearchResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            hits: HitSet::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitSet {
    /// Total matching documents in the segment, which can exceed the
    /// number of hits actually returned.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_source")]
    pub source: JsonValue,
    #[serde(default)]
    pub highlight: Option<JsonValue>,
}
