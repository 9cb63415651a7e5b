// Configuration validation
//
// Validates that required fields are present and values are sensible

use anyhow::{bail, Result};
use tracing::warn;

use crate::PanelConfig;

pub fn validate_config(config: &PanelConfig) -> Result<()> {
    if config.series.is_empty() {
        bail!("at least one series must be configured");
    }

    if config.time_field.is_empty() {
        bail!("time_field must not be empty");
    }

    if config.max_points == 0 {
        bail!("max_points must be greater than 0");
    }

    if config.fill > 10 {
        bail!("fill must be between 0 and 10, got {}", config.fill);
    }

    if config.max_points > 100_000 {
        warn!(
            max_points = config.max_points,
            "max_points is very large; retrieval may be slow"
        );
    }

    if config.queries.is_empty() {
        warn!("no queries configured; requests will fall back to a wildcard query");
    }

    Ok(())
}
