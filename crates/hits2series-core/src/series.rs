//! Series configuration and the demultiplexer that fans accumulated
//! documents out into per-series point sequences.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::RawDocument;
use crate::timestamp::parse_timestamp;

/// Fixed chart palette. Series take colors by their position in the
/// configured series list, modulo the palette length, so a series keeps
/// its color when a neighbour is hidden.
pub const CHART_PALETTE: [&str; 6] = [
    "#86B22D", "#BF6730", "#1D7373", "#BFB930", "#BF3030", "#77207D",
];

/// Configuration for one plotted series: which document field supplies
/// its values. Insertion order in the config list is significant, it
/// fixes color assignment and draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Source field holding the numeric value; `None` plots nothing.
    #[serde(default)]
    pub value_field: Option<String>,
    /// Hidden series are skipped entirely but still occupy their color
    /// slot.
    #[serde(default)]
    pub hide: bool,
}

/// One fully-derived series, rebuilt from scratch on every merge.
///
/// Points are `(epoch_millis, value)` in document-arrival order. The
/// underlying query already sorts by time descending; no re-sort
/// happens here.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    /// The value field this series was demultiplexed from. `None` when
    /// the spec had no field configured; render preparation turns that
    /// into a user-visible config error.
    pub alias: Option<String>,
    /// Palette color token assigned by original list position.
    pub color: &'static str,
    /// `(epoch_millis, value)` pairs, arrival order.
    pub points: Vec<(i64, f64)>,
    /// Number of documents that contributed a point.
    pub hits: u64,
}

impl PlotSeries {
    fn empty(index: usize, alias: Option<String>) -> Self {
        Self {
            alias,
            color: CHART_PALETTE[index % CHART_PALETTE.len()],
            points: Vec::new(),
            hits: 0,
        }
    }
}

/// Rebuild every visible series from the full accumulated document set.
///
/// A document contributes a point to a series iff its `value_field` is
/// numeric and its time field is present, non-null and parseable. The
/// time field is parsed at most once per document and the result reused
/// for every series check; the parse is deterministic and side-effect
/// free, so the reuse is purely an optimization. A document may
/// contribute to zero, one or several series.
///
/// This is a full rebuild on every call, not an incremental patch: the
/// output is a pure function of the inputs.
pub fn demultiplex(
    documents: &[RawDocument],
    specs: &[SeriesSpec],
    time_field: &str,
) -> Vec<PlotSeries> {
    let mut series: Vec<PlotSeries> = specs
        .iter()
        .enumerate()
        .filter(|(_, spec)| !spec.hide)
        .map(|(index, spec)| PlotSeries::empty(index, spec.value_field.clone()))
        .collect();

    for doc in documents {
        // One shared time axis: parse lazily, once, on the first series
        // that actually wants a point from this document.
        let mut cached_time: Option<Option<i64>> = None;

        for item in series.iter_mut() {
            let Some(alias) = item.alias.as_deref() else {
                continue;
            };
            let Some(value) = doc.number(alias) else {
                continue;
            };

            let time = *cached_time.get_or_insert_with(|| document_time(doc, time_field));
            let Some(time) = time else {
                continue;
            };

            item.points.push((time, value));
            item.hits += 1;
        }
    }

    series
}

fn document_time(doc: &RawDocument, time_field: &str) -> Option<i64> {
    let field = doc.field(time_field)?;
    if field.is_null() {
        return None;
    }
    let raw = field.as_text()?;
    match parse_timestamp(raw) {
        Ok(millis) => Some(millis),
        Err(err) => {
            debug!(%err, "skipping document with unparseable time field");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FieldValue;

    fn doc(fields: Vec<(&str, FieldValue)>) -> RawDocument {
        RawDocument::from_fields(fields)
    }

    fn ts(raw: &str) -> FieldValue {
        FieldValue::Text(raw.to_string())
    }

    fn spec(field: &str) -> SeriesSpec {
        SeriesSpec {
            value_field: Some(field.to_string()),
            hide: false,
        }
    }

    #[test]
    fn splits_documents_into_their_own_series() {
        let docs = vec![
            doc(vec![
                ("@timestamp", ts("2020-01-01T00:00:00Z")),
                ("cpu", FieldValue::Number(10.0)),
            ]),
            doc(vec![
                ("@timestamp", ts("2020-01-01T00:01:00Z")),
                ("mem", FieldValue::Number(512.0)),
            ]),
        ];

        let series = demultiplex(&docs, &[spec("cpu"), spec("mem")], "@timestamp");

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].points, vec![(1577836800000, 10.0)]);
        assert_eq!(series[0].hits, 1);
        assert_eq!(series[1].points, vec![(1577836860000, 512.0)]);
        assert_eq!(series[1].hits, 1);
    }

    #[test]
    fn one_document_may_feed_several_series() {
        let docs = vec![doc(vec![
            ("@timestamp", ts("2020-01-01T00:00:00Z")),
            ("cpu", FieldValue::Number(10.0)),
            ("mem", FieldValue::Number(512.0)),
        ])];

        let series = demultiplex(&docs, &[spec("cpu"), spec("mem")], "@timestamp");

        assert_eq!(series[0].points.len(), 1);
        assert_eq!(series[1].points.len(), 1);
        assert_eq!(series[0].points[0].0, series[1].points[0].0);
    }

    #[test]
    fn missing_time_field_contributes_nothing() {
        let docs = vec![doc(vec![("cpu", FieldValue::Number(10.0))])];
        let series = demultiplex(&docs, &[spec("cpu")], "@timestamp");
        assert!(series[0].points.is_empty());
        assert_eq!(series[0].hits, 0);
    }

    #[test]
    fn null_and_non_string_time_fields_contribute_nothing() {
        let docs = vec![
            doc(vec![
                ("@timestamp", FieldValue::Null),
                ("cpu", FieldValue::Number(1.0)),
            ]),
            doc(vec![
                ("@timestamp", FieldValue::Number(1577836800000.0)),
                ("cpu", FieldValue::Number(2.0)),
            ]),
        ];
        let series = demultiplex(&docs, &[spec("cpu")], "@timestamp");
        assert!(series[0].points.is_empty());
    }

    #[test]
    fn non_numeric_values_contribute_nothing() {
        let docs = vec![doc(vec![
            ("@timestamp", ts("2020-01-01T00:00:00Z")),
            ("cpu", FieldValue::Text("10".to_string())),
        ])];
        let series = demultiplex(&docs, &[spec("cpu")], "@timestamp");
        assert!(series[0].points.is_empty());
    }

    #[test]
    fn unparseable_time_strings_skip_the_document() {
        let docs = vec![
            doc(vec![
                ("@timestamp", ts("not a timestamp")),
                ("cpu", FieldValue::Number(1.0)),
            ]),
            doc(vec![
                ("@timestamp", ts("2020-01-01T00:00:00Z")),
                ("cpu", FieldValue::Number(2.0)),
            ]),
        ];
        let series = demultiplex(&docs, &[spec("cpu")], "@timestamp");
        assert_eq!(series[0].points, vec![(1577836800000, 2.0)]);
    }

    #[test]
    fn hidden_series_keep_their_neighbours_colors() {
        let specs = vec![
            SeriesSpec {
                value_field: Some("cpu".to_string()),
                hide: true,
            },
            spec("mem"),
        ];

        let series = demultiplex(&[], &specs, "@timestamp");

        // Only the visible series is produced, but it stays bound to
        // the second palette slot.
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].alias.as_deref(), Some("mem"));
        assert_eq!(series[0].color, CHART_PALETTE[1]);
    }

    #[test]
    fn palette_wraps_past_its_length() {
        let specs: Vec<SeriesSpec> = (0..CHART_PALETTE.len() + 1)
            .map(|i| spec(&format!("field{}", i)))
            .collect();
        let series = demultiplex(&[], &specs, "@timestamp");
        assert_eq!(series[CHART_PALETTE.len()].color, CHART_PALETTE[0]);
    }

    #[test]
    fn unconfigured_value_field_produces_an_empty_series() {
        let docs = vec![doc(vec![
            ("@timestamp", ts("2020-01-01T00:00:00Z")),
            ("cpu", FieldValue::Number(10.0)),
        ])];
        let series = demultiplex(&docs, &[SeriesSpec::default()], "@timestamp");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].alias, None);
        assert!(series[0].points.is_empty());
    }

    #[test]
    fn rebuild_is_idempotent() {
        let docs = vec![
            doc(vec![
                ("@timestamp", ts("2020-01-01T00:00:00Z")),
                ("cpu", FieldValue::Number(10.0)),
            ]),
            doc(vec![
                ("@timestamp", ts("2020-01-01T00:01:00Z")),
                ("cpu", FieldValue::Number(20.0)),
            ]),
        ];
        let specs = vec![spec("cpu")];

        let first = demultiplex(&docs, &specs, "@timestamp");
        let second = demultiplex(&docs, &specs, "@timestamp");
        assert_eq!(first, second);
    }

    #[test]
    fn points_stay_in_arrival_order() {
        // Arrival order is time-descending from the store; the
        // demultiplexer must not re-sort.
        let docs = vec![
            doc(vec![
                ("@timestamp", ts("2020-01-01T00:01:00Z")),
                ("cpu", FieldValue::Number(20.0)),
            ]),
            doc(vec![
                ("@timestamp", ts("2020-01-01T00:00:00Z")),
                ("cpu", FieldValue::Number(10.0)),
            ]),
        ];
        let series = demultiplex(&docs, &[spec("cpu")], "@timestamp");
        assert_eq!(
            series[0].points,
            vec![(1577836860000, 20.0), (1577836800000, 10.0)]
        );
    }
}
