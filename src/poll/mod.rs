//! Poll module - Scheduling and refresh cycles

mod poller;
mod repeater;

pub use poller::{refresh, Poller, RefreshError, RefreshOutcome, POLL_INTERVAL};
pub use repeater::{ticks_due, Repeater};
