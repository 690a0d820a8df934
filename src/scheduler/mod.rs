use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{MissedTickBehavior, interval, sleep};

use crate::http_probe::result::ProbeOutcome;
use crate::status::{StatusHost, StatusProbe};

/// Why a probe cycle was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Load,
    Interval,
    Visible,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Load => write!(f, "load"),
            Trigger::Interval => write!(f, "interval"),
            Trigger::Visible => write!(f, "visible"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Lets the embedder report visibility changes to a running scheduler.
#[derive(Debug, Clone)]
pub struct VisibilityHandle {
    tx: mpsc::UnboundedSender<Visibility>,
}

impl VisibilityHandle {
    /// Returns false once the scheduler has stopped.
    pub fn report(&self, visibility: Visibility) -> bool {
        self.tx.send(visibility).is_ok()
    }
}

type Observer = Arc<dyn Fn(Trigger, &ProbeOutcome) + Send + Sync>;

/// Starts probe cycles on load, on every interval tick and shortly after the
/// page becomes visible again. Cycles run as separate tasks, so a slow probe
/// never delays the next trigger.
pub struct Scheduler<H> {
    probe: Arc<StatusProbe<H>>,
    interval: Duration,
    debounce: Duration,
    visibility: mpsc::UnboundedReceiver<Visibility>,
    observer: Option<Observer>,
}

impl<H: StatusHost> Scheduler<H> {
    pub fn new(probe: Arc<StatusProbe<H>>) -> (Self, VisibilityHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let interval = probe.config().interval();
        let debounce = probe.config().visibility_debounce();
        let scheduler = Scheduler {
            probe,
            interval,
            debounce,
            visibility: rx,
            observer: None,
        };
        (scheduler, VisibilityHandle { tx })
    }

    /// Called with the outcome of every finished cycle.
    pub fn with_observer(mut self, observer: impl Fn(Trigger, &ProbeOutcome) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    fn spawn_cycle(&self, cycles: &mut JoinSet<()>, trigger: Trigger, delay: Duration) {
        let probe = self.probe.clone();
        let observer = self.observer.clone();
        cycles.spawn(async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }
            tracing::debug!(%trigger, "starting probe cycle");
            let outcome = probe.run().await;
            if let Some(observer) = observer {
                observer(trigger, &outcome);
            }
        });
    }

    /// Run until `shutdown` resolves. Cycles still in flight are aborted.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) {
        let mut cycles = JoinSet::new();
        self.spawn_cycle(&mut cycles, Trigger::Load, Duration::ZERO);

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately and coincides with the load cycle.
        ticker.tick().await;

        tokio::pin!(shutdown);
        let mut visibility_open = true;

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    self.spawn_cycle(&mut cycles, Trigger::Interval, Duration::ZERO);
                }
                event = self.visibility.recv(), if visibility_open => match event {
                    Some(Visibility::Visible) => {
                        self.spawn_cycle(&mut cycles, Trigger::Visible, self.debounce);
                    }
                    Some(Visibility::Hidden) => tracing::debug!("page hidden"),
                    None => visibility_open = false,
                },
                Some(joined) = cycles.join_next(), if !cycles.is_empty() => {
                    if let Err(e) = joined {
                        tracing::error!("probe cycle failed: {e}");
                    }
                }
            }
        }

        tracing::info!(in_flight = cycles.len(), "scheduler stopping");
        cycles.shutdown().await;
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;
    use tokio::sync::oneshot;

    use super::*;
    use crate::config::probe_config::ProbeConfig;
    use crate::http_probe::result::HttpReply;
    use crate::indicator::{IndicatorBoard, LinkIndicator, Presentation};
    use crate::status::test::{Network, StubHost};

    fn probe(network: Network) -> (Arc<StatusProbe<StubHost>>, Arc<LinkIndicator>) {
        let board = IndicatorBoard::new();
        let link = board.add(LinkIndicator::new("navbar", "https://api.example.com/api/v1/ping"));
        let config = ProbeConfig {
            url: "https://api.example.com/api/v1/ping".to_string(),
            interval_seconds: 30,
            visibility_debounce_ms: 1000,
            ..ProbeConfig::default()
        };
        (Arc::new(StatusProbe::new(StubHost::new(board, network), config)), link)
    }

    fn requests(probe: &StatusProbe<StubHost>) -> usize {
        probe.host().requests.load(Ordering::SeqCst)
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_interval_and_visibility_triggers() {
        let (probe, link) = probe(Network::Reply(HttpReply::status(200)));
        let (scheduler, visibility) = Scheduler::new(probe.clone());
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(scheduler.run(async {
            let _ = stopped.await;
        }));

        sleep(Duration::from_millis(100)).await;
        assert_eq!(requests(&probe), 1);
        assert!(link.presentation().label.contains("Online"));

        sleep(Duration::from_secs(30)).await;
        assert_eq!(requests(&probe), 2);

        assert!(visibility.report(Visibility::Visible));
        sleep(Duration::from_millis(500)).await;
        assert_eq!(requests(&probe), 2, "visibility probe waits for the debounce");
        sleep(Duration::from_millis(600)).await;
        assert_eq!(requests(&probe), 3);

        assert!(visibility.report(Visibility::Hidden));
        sleep(Duration::from_secs(2)).await;
        assert_eq!(requests(&probe), 3);

        let _ = stop.send(());
        task.await.expect("scheduler task");
        assert!(!visibility.report(Visibility::Visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_cycles_last_write_wins() {
        let slow = Network::Delayed(Duration::from_millis(4000), HttpReply::status(500));
        let (probe, link) = probe(slow);
        let (scheduler, visibility) = Scheduler::new(probe.clone());
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(scheduler.run(async {
            let _ = stopped.await;
        }));

        // The load probe is still pending when the network recovers and a
        // visibility probe starts.
        sleep(Duration::from_millis(100)).await;
        *probe.host().network.lock() = Network::Reply(HttpReply::status(200));
        visibility.report(Visibility::Visible);
        sleep(Duration::from_millis(1100)).await;
        assert_eq!(requests(&probe), 2);
        assert!(link.presentation().label.contains("Online"));

        // The stale load probe resolves afterwards and overwrites the result.
        sleep(Duration::from_secs(3)).await;
        assert!(link.presentation().label.contains("Offline"));

        let _ = stop.send(());
        task.await.expect("scheduler task");
    }

    #[tokio::test(start_paused = true)]
    async fn test_observer_sees_every_cycle() {
        let (probe, _link) = probe(Network::Reply(HttpReply::status(503)));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let (scheduler, _visibility) = Scheduler::new(probe.clone());
        let scheduler = {
            let seen = seen.clone();
            let calls = calls.clone();
            scheduler.with_observer(move |trigger, outcome| {
                calls.fetch_add(1, Ordering::SeqCst);
                seen.lock().push((trigger, Presentation::for_outcome(outcome).label));
            })
        };

        let task = tokio::spawn(scheduler.run(sleep(Duration::from_secs(61))));
        task.await.expect("scheduler task");

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let seen = seen.lock();
        assert_eq!(seen[0].0, Trigger::Load);
        assert_eq!(seen[1].0, Trigger::Interval);
        assert_eq!(seen[2].0, Trigger::Interval);
        assert!(seen.iter().all(|(_, label)| label.contains("Offline")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_visibility_channel_keeps_interval_running() {
        let (probe, _link) = probe(Network::Reply(HttpReply::status(200)));
        let (scheduler, visibility) = Scheduler::new(probe.clone());
        drop(visibility);

        let task = tokio::spawn(scheduler.run(sleep(Duration::from_secs(31))));
        task.await.expect("scheduler task");
        assert_eq!(requests(&probe), 2);
    }
}
