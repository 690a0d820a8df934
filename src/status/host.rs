use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::probe_config::{ProbeConfig, ProbeMode};
use crate::error::TransportError;
use crate::http_probe::prelude::*;
use crate::indicator::{IndicatorBoard, StatusIndicator};

/// The two things a probe cycle needs from its surroundings: a way to find
/// the indicators and a way to issue the GET.
pub trait StatusHost: Send + Sync + 'static {
    fn query_indicators(&self, marker: &str) -> Vec<Arc<dyn StatusIndicator>>;

    fn http_get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> + Send;
}

/// Host backed by an indicator board and a real HTTP client.
pub struct LiveHost {
    board: IndicatorBoard,
    client: reqwest::Client,
    mode: ProbeMode,
    accept_json: bool,
}

impl LiveHost {
    pub fn new(board: IndicatorBoard, client: reqwest::Client, config: &ProbeConfig) -> Self {
        LiveHost {
            board,
            client,
            mode: config.mode,
            accept_json: config.accept_json,
        }
    }

    pub fn board(&self) -> &IndicatorBoard {
        &self.board
    }
}

impl StatusHost for LiveHost {
    fn query_indicators(&self, marker: &str) -> Vec<Arc<dyn StatusIndicator>> {
        self.board
            .query(marker)
            .into_iter()
            .map(|link| link as Arc<dyn StatusIndicator>)
            .collect()
    }

    async fn http_get(&self, url: &str, timeout: Duration) -> Result<HttpReply, TransportError> {
        fetch_status(&self.client, url, timeout, self.mode, self.accept_json).await
    }
}
