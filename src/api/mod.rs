//! API module - Stats endpoint client

mod client;

pub use client::{ApiError, NeuronCount, StatsClient, StatsResponse, WINDOW_SECONDS};
