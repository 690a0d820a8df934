use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, HeaderValue};

use super::prelude::*;
use crate::config::probe_config::ProbeMode;
use crate::error::{TransportError, report};

/// Build the client used for every probe.
/// The per-request timeout is applied in `fetch_status`.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("apistatus/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Issue a single GET against `url`.
/// In `NoCors` mode the status is discarded, mirroring an opaque response.
pub async fn fetch_status(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    mode: ProbeMode,
    accept_json: bool,
) -> Result<HttpReply, TransportError> {
    let mut request = client.get(url).timeout(timeout);
    if accept_json {
        request = request.header(ACCEPT, HeaderValue::from_static("application/json"));
    }

    let start = Instant::now();
    let response = request.send().await?;
    tracing::debug!(
        url,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "probe response"
    );

    Ok(match mode {
        ProbeMode::Cors => HttpReply::status(response.status().as_u16()),
        ProbeMode::NoCors => HttpReply::opaque(),
    })
}

/// Map the result of a GET to an outcome. Never fails.
pub fn classify(
    result: Result<HttpReply, TransportError>,
    mode: ProbeMode,
    timeout: Duration,
) -> ProbeOutcome {
    let after_ms = timeout.as_millis() as u64;
    match result {
        Ok(HttpReply { status: Some(code) }) if (200..300).contains(&code) => ProbeOutcome::Online,
        Ok(HttpReply { status: Some(code) }) => ProbeOutcome::Offline {
            reason: format!("HTTP {code}"),
        },
        // An opaque response still means the server answered.
        Ok(HttpReply { status: None }) => ProbeOutcome::Online,
        Err(TransportError::Timeout) => ProbeOutcome::Timeout { after_ms },
        Err(_) if mode == ProbeMode::NoCors => ProbeOutcome::Unknown,
        Err(err) => ProbeOutcome::Offline {
            reason: report(&err),
        },
    }
}
