//! Human-readable rendering of the last outbound request.
//!
//! Shown verbatim in the panel's inspector so a user can replay the
//! exact query from a shell. Purely diagnostic: it must never fail, so
//! serialization trouble degrades to a partial rendering instead of
//! propagating.

use crate::SearchRequest;

/// Render the request as a copyable `curl` command against the given
/// engine URL and index segments.
pub fn render_curl(engine_url: &str, indices: &[String], request: &SearchRequest) -> String {
    let body = serde_json::to_string_pretty(request).unwrap_or_else(|_| partial_body(request));
    format!(
        "curl -XGET {}/{}/_search?pretty -d'\n{}'",
        engine_url.trim_end_matches('/'),
        indices.join(","),
        body
    )
}

/// Best-effort fallback when the full body cannot be serialized: the
/// scalar parts are always representable.
fn partial_body(request: &SearchRequest) -> String {
    format!(
        "{{\"size\": {}, \"sort\": {}, \"query\": \"<unserializable>\"}}",
        request.size, request.sort
    )
}
