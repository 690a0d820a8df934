use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use apistatus::config::app_config::load_config;
use apistatus::http_probe::prelude::*;
use apistatus::indicator::{IndicatorBoard, LinkIndicator};
use apistatus::scheduler::{Scheduler, Visibility, VisibilityHandle};
use apistatus::status::{LiveHost, StatusProbe};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_config = load_config()?;
    tracing::info!("Using config file: {}", app_config.config_file);

    let board = IndicatorBoard::new();
    for indicator in &app_config.indicators {
        board.add(LinkIndicator::new(&indicator.name, &indicator.href));
    }

    let client = build_client()?;
    let host = LiveHost::new(board.clone(), client, &app_config.probe);
    let probe = Arc::new(StatusProbe::new(host, app_config.probe));

    let (scheduler, visibility) = Scheduler::new(probe);
    let scheduler = scheduler.with_observer(move |trigger, outcome| {
        tracing::info!(%trigger, %outcome, "probe cycle finished");
        for line in board.render() {
            tracing::info!("{line}");
        }
    });

    forward_visibility_signals(visibility);

    scheduler
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("received Ctrl-C, shutting down");
        })
        .await;

    Ok(())
}

/// SIGUSR1 reports the viewer as back (re-probe after the debounce),
/// SIGUSR2 reports them as away.
#[cfg(unix)]
fn forward_visibility_signals(visibility: VisibilityHandle) {
    use tokio::signal::unix::{SignalKind, signal};

    let signals = signal(SignalKind::user_defined1())
        .and_then(|visible| Ok((visible, signal(SignalKind::user_defined2())?)));
    let (mut visible, mut hidden) = match signals {
        Ok(signals) => signals,
        Err(e) => {
            tracing::warn!("cannot listen for visibility signals: {e}");
            return;
        }
    };

    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                Some(_) = visible.recv() => Visibility::Visible,
                Some(_) = hidden.recv() => Visibility::Hidden,
                else => break,
            };
            if !visibility.report(event) {
                break;
            }
        }
    });
}

#[cfg(not(unix))]
fn forward_visibility_signals(_visibility: VisibilityHandle) {}
