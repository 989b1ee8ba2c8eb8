//! Repeating Task Module
//! Cancellable fixed-interval task running on a dedicated worker thread.

use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A repeating background task: runs once immediately, then on a fixed
/// wall-clock cadence until cancelled. Dropping the handle cancels the
/// task and joins the worker.
///
/// Deadlines are pinned to the spawn instant (tick n is due at
/// `start + n * interval`), so a tick body shorter than the interval
/// never stretches the period. A tick slower than the interval delays
/// only its own cycle; deadlines it slept through are coalesced into
/// one catch-up tick, never queued.
pub struct Repeater {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl Repeater {
    pub fn spawn<F>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = channel::<()>();

        let handle = thread::spawn(move || {
            let start = Instant::now();
            let mut ticked: u64 = 0;

            loop {
                let due = ticks_due(start.elapsed(), interval);
                if ticked < due {
                    tick();
                    // Jumping straight to `due` coalesces missed deadlines
                    ticked = due;
                }

                let next_deadline = start + interval * ticked as u32;
                let wait = next_deadline.saturating_duration_since(Instant::now());

                // recv_timeout doubles as the cancellable sleep
                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Cancel the task and wait for the worker to exit.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Repeater {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Number of ticks due after `elapsed` on a fixed cadence, counting the
/// immediate startup tick. Drives the worker loop above; pure
/// arithmetic so tests can also check the schedule with a mocked clock.
pub fn ticks_due(elapsed: Duration, interval: Duration) -> u64 {
    if interval.is_zero() {
        return 1;
    }
    (elapsed.as_nanos() / interval.as_nanos()) as u64 + 1
}
