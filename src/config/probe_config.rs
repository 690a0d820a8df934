use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// How the probe is allowed to read the endpoint's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeMode {
    /// The status code is readable; failures are reported as Offline.
    #[default]
    Cors,
    /// Responses are opaque; a completed request counts as Online and any
    /// non-timeout failure is reported as Unknown.
    NoCors,
}

/// The probe configuration for the status checker.
/// Immutable once loaded; handed to the `StatusProbe` at construction.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// The endpoint to probe with a GET request.
    pub url: String,

    /// Hard cap on a single probe, in milliseconds.
    /// Defaults to 5000 if not specified.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Substring an indicator's link target must contain to be updated.
    /// Defaults to the last path segment of `url`.
    #[serde(default)]
    pub marker: Option<String>,

    #[serde(default)]
    pub mode: ProbeMode,

    /// Send `Accept: application/json` with the probe.
    #[serde(default = "default_true")]
    pub accept_json: bool,

    /// The polling interval in seconds.
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,

    /// Delay between the page becoming visible again and the re-probe.
    #[serde(default = "default_visibility_debounce_ms")]
    pub visibility_debounce_ms: u64,
}

/// A status indicator to publish on the board.
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorConfig {
    pub name: String,
    pub href: String,
}

/// The top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub probe: ProbeConfig,

    #[serde(default)]
    pub indicators: Vec<IndicatorConfig>,
}

pub const DEFAULT_URL: &str = "http://localhost:8080/api/v1/ping";

fn default_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_interval_seconds() -> u64 {
    30
}

fn default_visibility_debounce_ms() -> u64 {
    1000
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            url: DEFAULT_URL.to_string(),
            timeout_ms: default_timeout_ms(),
            marker: None,
            mode: ProbeMode::default(),
            accept_json: default_true(),
            interval_seconds: default_interval_seconds(),
            visibility_debounce_ms: default_visibility_debounce_ms(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn visibility_debounce(&self) -> Duration {
        Duration::from_millis(self.visibility_debounce_ms)
    }

    /// The marker used to discover indicators. Falls back to the last
    /// non-empty path segment of the probe URL, then to the whole URL.
    pub fn marker(&self) -> String {
        if let Some(marker) = self.marker.as_deref().filter(|m| !m.is_empty()) {
            return marker.to_string();
        }
        Url::parse(&self.url)
            .ok()
            .and_then(|u| {
                u.path_segments()
                    .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| self.url.clone())
    }

    /// Check the values that cannot be expressed in the type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = Url::parse(&self.url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "probe url must be http or https, got {}",
                parsed.scheme()
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be greater than 0".into()));
        }
        if self.interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "interval_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
