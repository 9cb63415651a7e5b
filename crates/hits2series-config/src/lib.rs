// hits2series-config - Panel configuration
//
// Supports configuration from multiple sources:
// 1. Environment variables (HITS2SERIES_* prefix, highest priority)
// 2. Config file path from HITS2SERIES_CONFIG
// 3. Config file contents from HITS2SERIES_CONFIG_CONTENT
// 4. Default config file locations (./panel.toml, ./.hits2series.toml)
// 5. Built-in defaults (lowest priority)
//
// The resolved config is immutable: it is built once by the host,
// validated, and passed by reference into the pipeline. Editing it
// means building a new one and swapping it in at the panel boundary.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use hits2series_core::SeriesSpec;

mod sources;
mod validation;

pub use sources::{load_from_path, load_or_default, EnvSource, ENV_PREFIX};

/// One free-text query; multiple specs are OR-combined into the
/// outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub query: String,
    pub label: String,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            query: "*".to_string(),
            label: "Query".to_string(),
        }
    }
}

/// Display timezone for the x-axis. Purely a rendering concern; the
/// pipeline itself works in UTC throughout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Timezone {
    /// Follow whatever timezone the viewer's environment reports.
    Browser,
    Utc,
    /// A named zone such as `Europe/Paris`.
    Named(String),
}

impl From<String> for Timezone {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "browser" => Timezone::Browser,
            "utc" => Timezone::Utc,
            _ => Timezone::Named(raw),
        }
    }
}

impl From<Timezone> for String {
    fn from(tz: Timezone) -> Self {
        match tz {
            Timezone::Browser => "browser".to_string(),
            Timezone::Utc => "utc".to_string(),
            Timezone::Named(name) => name,
        }
    }
}

/// Full panel configuration with every default overridable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Queries to OR-combine.
    pub queries: Vec<QuerySpec>,
    /// Cap on raw hits requested per segment.
    pub max_points: usize,
    /// Document field carrying the shared time axis.
    pub time_field: String,
    /// Plotted series, in color/draw order.
    pub series: Vec<SeriesSpec>,
    /// Area shading level, 0-10. Line charts only.
    pub fill: u8,
    /// Line thickness in pixels; 0 degrades to a scatter look.
    pub line_width: u32,
    pub timezone: Timezone,
    /// Expose the last outbound request in the inspector.
    pub spyable: bool,
    pub zoom_links: bool,
    pub bars: bool,
    pub stack: bool,
    pub points: bool,
    pub lines: bool,
    pub legend: bool,
    pub x_axis: bool,
    pub y_axis: bool,
    pub percentage: bool,
    /// Allow drag-to-select time ranges on the chart.
    pub interactive: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            queries: vec![QuerySpec::default()],
            max_points: 5000,
            time_field: "@timestamp".to_string(),
            series: vec![SeriesSpec::default()],
            fill: 0,
            line_width: 1,
            timezone: Timezone::Browser,
            spyable: true,
            zoom_links: true,
            bars: false,
            stack: false,
            points: false,
            lines: true,
            legend: true,
            x_axis: true,
            y_axis: true,
            percentage: false,
            interactive: true,
        }
    }
}

impl PanelConfig {
    /// Validate invariants. Called by the loaders; hosts constructing a
    /// config in code should call it themselves before use.
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}
