//! SpikeView - Live Neural Spike-Count Dashboard
//!
//! Polls a spike statistics endpoint once per second and renders the
//! per-neuron counts as a live bar chart with a running total.

mod api;
mod charts;
mod format;
mod gui;
mod poll;

use anyhow::anyhow;
use eframe::egui;
use gui::SpikeViewApp;

/// Default backend bind address.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 640.0])
            .with_min_inner_size([800.0, 520.0])
            .with_title("SpikeView"),
        ..Default::default()
    };

    eframe::run_native(
        "SpikeView",
        options,
        Box::new(|_cc| {
            let mut app = SpikeViewApp::new(DEFAULT_BASE_URL.to_string());
            app.start_polling();
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("failed to start UI: {e}"))
}
