//! Time-range zoom math.
//!
//! Pure: the clock is always injected, so the same inputs produce the
//! same window. Installing the computed range into the filter store and
//! triggering the refresh is the panel's job.

use chrono::{DateTime, Utc};

/// A UTC time window. Invariant: `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        debug_assert!(from <= to, "time range must not be inverted");
        Self { from, to }
    }

    pub fn span_millis(&self) -> i64 {
        self.to.timestamp_millis() - self.from.timestamp_millis()
    }
}

/// Scale a window around its center by `factor`.
///
/// `factor < 1` narrows, `factor > 1` widens, `factor == 1` reproduces
/// the window. When the widened window would reach past `now` and the
/// original window did not already extend into the future, both bounds
/// shift backward so the new end lands exactly on `now` - the span is
/// kept, only anchored to the present. A window that was deliberately
/// looking ahead is left alone.
pub fn zoom_range(range: &TimeRange, factor: f64, now: DateTime<Utc>) -> TimeRange {
    let from = range.from.timestamp_millis() as f64;
    let to = range.to.timestamp_millis() as f64;
    let now_millis = now.timestamp_millis() as f64;

    let span = to - from;
    let center = to - span / 2.0;

    let mut new_to = center + (span * factor) / 2.0;
    let mut new_from = center - (span * factor) / 2.0;

    if new_to > now_millis && to <= now_millis {
        let offset = new_to - now_millis;
        new_from -= offset;
        new_to = now_millis;
    }

    TimeRange::new(
        from_millis(new_from.round() as i64),
        from_millis(new_to.round() as i64),
    )
}

fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(if millis < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
