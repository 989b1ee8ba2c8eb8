//! Chart Viewer Widget
//! Central panel showing the spike bar chart, the running total and a
//! per-neuron detail table.

use crate::api::{StatsResponse, WINDOW_SECONDS};
use crate::charts::{ChartState, SpikePlotter};
use crate::format::format_with_commas;
use egui::{Color32, RichText, ScrollArea};

/// Central chart display area.
pub struct ChartViewer {
    /// Snapshot currently on screen, replaced wholesale per refresh
    pub chart_state: ChartState,
    /// Comma-grouped total for the header display
    pub total_text: String,
    /// Mean amplitude per neuron, same order as `chart_state`
    pub amplitudes: Vec<f64>,
    /// Aggregation window reported by the last snapshot
    pub window_seconds: u32,
    has_data: bool,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            chart_state: ChartState::default(),
            total_text: String::new(),
            amplitudes: Vec::new(),
            window_seconds: WINDOW_SECONDS,
            has_data: false,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed snapshot wholesale. Called only on a
    /// successful refresh; a failed cycle never reaches this point, so
    /// the previous state stays on screen.
    pub fn apply_snapshot(&mut self, stats: &StatsResponse) {
        self.chart_state = ChartState::from_snapshot(stats);
        self.total_text = format_with_commas(stats.total_spikes);
        self.amplitudes = stats.per_neuron.iter().map(|n| n.avg_amp).collect();
        // Older backends omit the field; serde defaults it to zero.
        self.window_seconds = if stats.window_seconds > 0 {
            stats.window_seconds
        } else {
            WINDOW_SECONDS
        };
        self.has_data = true;
    }

    /// Draw the viewer: total header, bar chart, detail table.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        if !self.has_data {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Waiting for data...").size(20.0).color(Color32::GRAY));
            });
            return;
        }

        ui.horizontal(|ui| {
            ui.label(RichText::new("Total spikes:").size(16.0));
            ui.label(
                RichText::new(&self.total_text)
                    .size(22.0)
                    .strong()
                    .color(Color32::from_rgb(52, 152, 219)),
            );
            ui.label(
                RichText::new(format!("(last {}s)", self.window_seconds))
                    .size(12.0)
                    .color(Color32::GRAY),
            );
        });

        ui.add_space(8.0);

        SpikePlotter::draw_bar_chart(ui, &self.chart_state, self.window_seconds);

        ui.add_space(10.0);

        if !self.chart_state.is_empty() {
            self.draw_detail_table(ui);
        }
    }

    /// Per-neuron table: count and mean amplitude for the window.
    fn draw_detail_table(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                    egui::Grid::new("neuron_detail")
                        .striped(true)
                        .min_col_width(80.0)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            ui.label(RichText::new("Neuron").strong().size(11.0));
                            ui.label(RichText::new("Spikes").strong().size(11.0));
                            ui.label(RichText::new("Avg amp").strong().size(11.0));
                            ui.end_row();

                            for i in 0..self.chart_state.len() {
                                ui.label(RichText::new(&self.chart_state.labels[i]).size(11.0));
                                ui.label(
                                    RichText::new(format_with_commas(self.chart_state.values[i]))
                                        .size(11.0),
                                );
                                let amp = self.amplitudes.get(i).copied().unwrap_or(0.0);
                                ui.label(RichText::new(format!("{:.3}", amp)).size(11.0));
                                ui.end_row();
                            }
                        });
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NeuronCount;

    fn snapshot(total: u64, per_neuron: Vec<(i64, u64)>) -> StatsResponse {
        StatsResponse {
            window_seconds: WINDOW_SECONDS,
            total_spikes: total,
            per_neuron: per_neuron
                .into_iter()
                .map(|(neuron_id, count)| NeuronCount {
                    neuron_id,
                    count,
                    avg_amp: 0.9,
                })
                .collect(),
        }
    }

    #[test]
    fn snapshot_replaces_state_wholesale() {
        let mut viewer = ChartViewer::new();
        viewer.apply_snapshot(&snapshot(15, vec![(1, 5), (2, 10)]));
        viewer.apply_snapshot(&snapshot(3, vec![(7, 3)]));

        // No accumulation from the previous snapshot.
        assert_eq!(viewer.chart_state.labels, vec!["Neuron 7"]);
        assert_eq!(viewer.chart_state.values, vec![3]);
        assert_eq!(viewer.total_text, "3");
    }

    #[test]
    fn total_is_comma_grouped() {
        let mut viewer = ChartViewer::new();
        viewer.apply_snapshot(&snapshot(1_234_567, vec![(1, 1_234_567)]));
        assert_eq!(viewer.total_text, "1,234,567");
    }

    #[test]
    fn applying_the_same_snapshot_twice_is_idempotent() {
        let stats = snapshot(12, vec![(1, 5), (2, 7)]);

        let mut viewer = ChartViewer::new();
        viewer.apply_snapshot(&stats);
        let first = viewer.chart_state.clone();
        let first_total = viewer.total_text.clone();

        viewer.apply_snapshot(&stats);
        assert_eq!(viewer.chart_state, first);
        assert_eq!(viewer.total_text, first_total);
    }

    #[test]
    fn empty_snapshot_shows_zero_total_and_no_bars() {
        let mut viewer = ChartViewer::new();
        viewer.apply_snapshot(&snapshot(0, vec![]));
        assert!(viewer.chart_state.is_empty());
        assert_eq!(viewer.total_text, "0");
    }

    #[test]
    fn window_label_follows_the_reported_window() {
        let mut viewer = ChartViewer::new();
        let mut stats = snapshot(5, vec![(1, 5)]);
        stats.window_seconds = 30;
        viewer.apply_snapshot(&stats);
        assert_eq!(viewer.window_seconds, 30);
    }

    #[test]
    fn missing_window_falls_back_to_the_contract_default() {
        let mut viewer = ChartViewer::new();
        let mut stats = snapshot(5, vec![(1, 5)]);
        stats.window_seconds = 0;
        viewer.apply_snapshot(&stats);
        assert_eq!(viewer.window_seconds, WINDOW_SECONDS);
    }

    #[test]
    fn amplitudes_track_chart_state_length() {
        let mut viewer = ChartViewer::new();
        viewer.apply_snapshot(&snapshot(9, vec![(1, 2), (2, 3), (3, 4)]));
        assert_eq!(viewer.amplitudes.len(), viewer.chart_state.len());
    }
}
