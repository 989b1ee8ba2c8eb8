//! SpikeView Main Application
//! Main window wiring the poller to the status panel and chart viewer.

use crate::api::StatsClient;
use crate::gui::{ChartViewer, StatusPanel, StatusPanelAction};
use crate::poll::{Poller, RefreshOutcome, POLL_INTERVAL};
use egui::SidePanel;
use log::error;
use std::time::Duration;

/// Main application window.
pub struct SpikeViewApp {
    status_panel: StatusPanel,
    chart_viewer: ChartViewer,
    poller: Option<Poller>,
}

impl SpikeViewApp {
    /// Build the app with empty chart state. Polling starts with
    /// `start_polling`, which also runs the immediate first refresh.
    pub fn new(base_url: String) -> Self {
        Self {
            status_panel: StatusPanel::new(base_url),
            chart_viewer: ChartViewer::new(),
            poller: None,
        }
    }

    /// Spawn the repeating poll task against the active endpoint.
    pub fn start_polling(&mut self) {
        match StatsClient::with_url(self.status_panel.active_base_url.clone()) {
            Ok(client) => {
                self.poller = Some(Poller::spawn(client, POLL_INTERVAL));
                self.status_panel.paused = false;
            }
            Err(e) => {
                error!("failed to build stats client: {}", e);
                self.status_panel.record_failure(e.to_string());
                self.status_panel.paused = true;
            }
        }
    }

    fn stop_polling(&mut self) {
        // Drop cancels the repeating task and joins the worker.
        self.poller = None;
    }

    /// Apply one refresh outcome. Success replaces the chart state
    /// wholesale; failure leaves chart and total untouched and only
    /// updates the health readout.
    fn handle_outcome(&mut self, outcome: RefreshOutcome) {
        match outcome {
            Ok(stats) => {
                self.chart_viewer.apply_snapshot(&stats);
                self.status_panel.record_success();
            }
            Err(e) => {
                self.status_panel.record_failure(e.to_string());
            }
        }
    }

    /// Drain every pending outcome; with several queued, the latest
    /// snapshot ends up on screen.
    fn drain_outcomes(&mut self) {
        loop {
            let Some(outcome) = self.poller.as_ref().and_then(|p| p.try_recv()) else {
                break;
            };
            self.handle_outcome(outcome);
        }
    }

    fn handle_toggle_pause(&mut self) {
        if self.status_panel.paused {
            self.start_polling();
        } else {
            self.stop_polling();
            self.status_panel.paused = true;
        }
    }

    fn handle_apply_endpoint(&mut self) {
        self.status_panel.active_base_url = self.status_panel.base_url_input.clone();
        self.stop_polling();
        self.start_polling();
    }
}

impl eframe::App for SpikeViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_outcomes();

        // Outcomes arrive off-frame; wake up at least a few times per
        // poll interval so fresh snapshots show without input events.
        if !self.status_panel.paused {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        SidePanel::left("status_panel")
            .min_width(220.0)
            .max_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.status_panel.show(ui);

                    match action {
                        StatusPanelAction::ApplyEndpoint => self.handle_apply_endpoint(),
                        StatusPanelAction::TogglePause => self.handle_toggle_pause(),
                        StatusPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, NeuronCount, StatsResponse};
    use crate::poll::RefreshError;

    fn snapshot(total: u64, per_neuron: Vec<(i64, u64)>) -> StatsResponse {
        StatsResponse {
            window_seconds: 60,
            total_spikes: total,
            per_neuron: per_neuron
                .into_iter()
                .map(|(neuron_id, count)| NeuronCount {
                    neuron_id,
                    count,
                    avg_amp: 1.0,
                })
                .collect(),
        }
    }

    fn failure() -> RefreshOutcome {
        Err(RefreshError::from(ApiError::Network(
            "connection refused".to_string(),
        )))
    }

    #[test]
    fn success_replaces_chart_state() {
        let mut app = SpikeViewApp::new("http://localhost:8000".to_string());
        app.handle_outcome(Ok(snapshot(7, vec![(3, 7)])));

        assert_eq!(app.chart_viewer.chart_state.labels, vec!["Neuron 3"]);
        assert_eq!(app.chart_viewer.chart_state.values, vec![7]);
        assert_eq!(app.chart_viewer.total_text, "7");
    }

    #[test]
    fn failure_leaves_chart_and_total_untouched() {
        let mut app = SpikeViewApp::new("http://localhost:8000".to_string());
        app.handle_outcome(Ok(snapshot(15, vec![(1, 5), (2, 10)])));

        let state_before = app.chart_viewer.chart_state.clone();
        let total_before = app.chart_viewer.total_text.clone();

        app.handle_outcome(failure());

        assert_eq!(app.chart_viewer.chart_state, state_before);
        assert_eq!(app.chart_viewer.total_text, total_before);
        assert!(app.status_panel.is_stale());
    }

    #[test]
    fn recovery_after_failures_shows_fresh_snapshot() {
        let mut app = SpikeViewApp::new("http://localhost:8000".to_string());
        app.handle_outcome(Ok(snapshot(1, vec![(1, 1)])));
        app.handle_outcome(failure());
        app.handle_outcome(failure());
        app.handle_outcome(Ok(snapshot(9, vec![(1, 9)])));

        assert_eq!(app.chart_viewer.chart_state.values, vec![9]);
        assert!(!app.status_panel.is_stale());
    }

    #[test]
    fn later_snapshot_wins_when_several_are_applied() {
        let mut app = SpikeViewApp::new("http://localhost:8000".to_string());
        app.handle_outcome(Ok(snapshot(5, vec![(1, 5)])));
        app.handle_outcome(Ok(snapshot(6, vec![(1, 6)])));
        assert_eq!(app.chart_viewer.chart_state.values, vec![6]);
    }
}
