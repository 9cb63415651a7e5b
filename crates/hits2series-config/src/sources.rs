// Configuration source loading.
//
// Priority order:
// 1. Environment variables (HITS2SERIES_* prefix)
// 2. Config file path from HITS2SERIES_CONFIG
// 3. Inline config content from HITS2SERIES_CONFIG_CONTENT
// 4. Default config files (./panel.toml, ./.hits2series.toml)
// 5. Built-in defaults

use std::env;
use std::path::Path;

use anyhow::{Context, Result};

use crate::PanelConfig;

pub const ENV_PREFIX: &str = "HITS2SERIES_";

/// Environment access, abstracted so overrides are testable without
/// touching the process environment.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }
}

/// Load configuration from a specific file path (for an explicit
/// `--config`-style override). Environment overrides still apply on
/// top.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<PanelConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: PanelConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration with graceful fallback to defaults: tries the
/// standard locations, returns built-in defaults when none exist.
pub fn load_or_default() -> Result<PanelConfig> {
    let mut config = load_from_standard_sources()?.unwrap_or_default();
    apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

fn load_from_standard_sources() -> Result<Option<PanelConfig>> {
    if let Ok(path) = env::var("HITS2SERIES_CONFIG") {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: PanelConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        return Ok(Some(config));
    }

    if let Ok(content) = env::var("HITS2SERIES_CONFIG_CONTENT") {
        let config: PanelConfig = toml::from_str(&content)
            .context("Failed to parse inline config from HITS2SERIES_CONFIG_CONTENT")?;
        return Ok(Some(config));
    }

    for path in &["./panel.toml", "./.hits2series.toml"] {
        if Path::new(path).exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            let config: PanelConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path))?;
            return Ok(Some(config));
        }
    }

    Ok(None)
}

fn apply_env_overrides(config: &mut PanelConfig, source: &dyn EnvSource) -> Result<()> {
    if let Some(raw) = source.get("MAX_POINTS") {
        config.max_points = raw
            .parse()
            .with_context(|| format!("{}MAX_POINTS must be an integer, got `{}`", ENV_PREFIX, raw))?;
    }

    if let Some(raw) = source.get("TIME_FIELD") {
        config.time_field = raw;
    }

    if let Some(raw) = source.get("TIMEZONE") {
        config.timezone = raw.into();
    }

    Ok(())
}
