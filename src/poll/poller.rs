//! Poller Module
//! Drives refresh cycles against the stats endpoint and reports each
//! outcome to the GUI over a channel.

use crate::api::{ApiError, StatsClient, StatsResponse};
use crate::poll::Repeater;
use log::{debug, info, warn};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;
use thiserror::Error;

/// Production refresh cadence.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// A refresh cycle failed. Callers never branch on the cause; the next
/// scheduled tick is the retry. The wrapped cause stays visible in logs.
#[derive(Error, Debug)]
#[error("Refresh failed: {0}")]
pub struct RefreshError(#[from] ApiError);

/// Typed result of one refresh cycle.
pub type RefreshOutcome = Result<StatsResponse, RefreshError>;

/// One refresh cycle: fetch and parse the latest snapshot.
pub fn refresh(client: &StatsClient) -> RefreshOutcome {
    Ok(client.get_stats()?)
}

/// Owns the repeating poll task. Outcomes are drained with `try_recv`;
/// dropping (or cancelling) the poller stops the worker.
pub struct Poller {
    rx: Receiver<RefreshOutcome>,
    task: Option<Repeater>,
}

impl Poller {
    /// Start polling: one refresh immediately, then one per `interval`.
    /// A failed refresh never cancels the task.
    pub fn spawn(client: StatsClient, interval: Duration) -> Self {
        info!("poller started: {} every {:?}", client.stats_url(), interval);

        let (tx, rx) = channel();
        let task = Repeater::spawn(interval, move || {
            let outcome = refresh(&client);
            match &outcome {
                Ok(stats) => debug!(
                    "refresh ok: {} spikes across {} neurons",
                    stats.total_spikes,
                    stats.per_neuron.len()
                ),
                Err(e) => warn!("{}", e),
            }
            // A closed receiver means the GUI is shutting down; the task
            // is cancelled by Drop right after.
            let _ = tx.send(outcome);
        });

        Self {
            rx,
            task: Some(task),
        }
    }

    /// Next pending outcome, if any. Non-blocking.
    pub fn try_recv(&self) -> Option<RefreshOutcome> {
        self.rx.try_recv().ok()
    }

    /// Stop the repeating task and join its worker.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
            info!("poller cancelled");
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_against_dead_endpoint_is_a_contained_failure() {
        // Bind then drop to get a port nothing is listening on.
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let client = StatsClient::with_url(format!("http://{}", addr)).unwrap();
        let outcome = refresh(&client);
        assert!(outcome.is_err());
    }

    #[test]
    fn failed_ticks_keep_the_poller_alive() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let client = StatsClient::with_url(format!("http://{}", addr)).unwrap();
        let mut poller = Poller::spawn(client, Duration::from_millis(10));

        // Collect a few outcomes; every one is a failure, none fatal.
        let mut failures = 0;
        let deadline = std::time::Instant::now() + Duration::from_millis(500);
        while failures < 2 && std::time::Instant::now() < deadline {
            if let Some(outcome) = poller.try_recv() {
                assert!(outcome.is_err());
                failures += 1;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        assert!(failures >= 2, "poller stopped after a failure");
        poller.cancel();
    }
}
