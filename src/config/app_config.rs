use std::env;
use std::io::ErrorKind;

use super::probe_config::{Config, IndicatorConfig, ProbeConfig};
use crate::error::ConfigError;

pub struct AppConfig {
    pub probe: ProbeConfig,
    pub indicators: Vec<IndicatorConfig>,
    pub config_file: String,
}

/// Load the application configuration from a YAML file and environment variables.
/// The file is read from the location in `CONFIG_FILE` (default `config.yml`).
/// A missing file is not an error; the built-in defaults are used instead.
/// `PROBE_URL`, `PROBE_TIMEOUT_MS` and `PROBE_INTERVAL_SECONDS` override the file.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config_file = env::var("CONFIG_FILE").unwrap_or_else(|_| "config.yml".to_string());
    load_config_from(&config_file, |key| env::var(key).ok())
}

pub fn load_config_from(
    config_file: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    let mut config = match std::fs::read_to_string(config_file) {
        Ok(config_str) => serde_yaml::from_str::<Config>(&config_str)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("{config_file} not found, using defaults");
            Config {
                probe: ProbeConfig::default(),
                indicators: Vec::new(),
            }
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: config_file.to_string(),
                source,
            });
        }
    };

    apply_env_overrides(&mut config.probe, lookup)?;
    config.probe.validate()?;

    // Without configured indicators, publish a single one linking to the probe.
    if config.indicators.is_empty() {
        config.indicators.push(IndicatorConfig {
            name: "api-status".to_string(),
            href: config.probe.url.clone(),
        });
    }

    tracing::info!(
        url = %config.probe.url,
        timeout_ms = config.probe.timeout_ms,
        interval_seconds = config.probe.interval_seconds,
        mode = ?config.probe.mode,
        indicators = config.indicators.len(),
        "configuration loaded"
    );

    Ok(AppConfig {
        probe: config.probe,
        indicators: config.indicators,
        config_file: config_file.to_string(),
    })
}

fn apply_env_overrides(
    probe: &mut ProbeConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(url) = lookup("PROBE_URL") {
        probe.url = url;
    }
    if let Some(timeout) = lookup("PROBE_TIMEOUT_MS") {
        probe.timeout_ms = parse_number("PROBE_TIMEOUT_MS", &timeout)?;
    }
    if let Some(interval) = lookup("PROBE_INTERVAL_SECONDS") {
        probe.interval_seconds = parse_number("PROBE_INTERVAL_SECONDS", &interval)?;
    }
    Ok(())
}

fn parse_number(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{key} must be a number, got {value:?}")))
}
