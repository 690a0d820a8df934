pub mod host;

use std::sync::Arc;

use crate::config::probe_config::ProbeConfig;
use crate::error::TransportError;
use crate::http_probe::prelude::*;
use crate::indicator::{Presentation, StatusIndicator};

pub use host::{LiveHost, StatusHost};

/// Runs probe cycles: discover indicators, mark them as checking, probe the
/// endpoint once and fan the outcome out to every indicator found.
///
/// Overlapping cycles are allowed; whichever finishes last decides what the
/// indicators show.
pub struct StatusProbe<H> {
    host: H,
    config: ProbeConfig,
    marker: String,
}

impl<H: StatusHost> StatusProbe<H> {
    pub fn new(host: H, config: ProbeConfig) -> Self {
        let marker = config.marker();
        StatusProbe {
            host,
            config,
            marker,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn discover_indicators(&self) -> Vec<Arc<dyn StatusIndicator>> {
        self.host.query_indicators(&self.marker)
    }

    pub fn apply_presentation(indicator: &dyn StatusIndicator, outcome: &ProbeOutcome) {
        indicator.apply(&Presentation::for_outcome(outcome));
    }

    /// GET the endpoint, giving up after the configured timeout. The pending
    /// request is dropped when the timeout fires. Never fails.
    pub async fn probe(&self) -> ProbeOutcome {
        let timeout = self.config.timeout();
        let request = self.host.http_get(&self.config.url, timeout);
        let result = match tokio::time::timeout(timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout),
        };
        classify(result, self.config.mode, timeout)
    }

    /// One probe cycle. Returns the outcome that was applied.
    pub async fn run(&self) -> ProbeOutcome {
        let indicators = self.discover_indicators();
        let checking = Presentation::checking();
        for indicator in &indicators {
            indicator.apply(&checking);
        }
        tracing::debug!(
            marker = %self.marker,
            indicators = indicators.len(),
            "checking API status"
        );

        let outcome = self.probe().await;
        for indicator in &indicators {
            Self::apply_presentation(indicator.as_ref(), &outcome);
        }

        if outcome.is_online() {
            tracing::info!(url = %self.config.url, indicators = indicators.len(), "API is online");
        } else {
            tracing::warn!(url = %self.config.url, indicators = indicators.len(), %outcome, "API is not online");
        }
        outcome
    }
}
