//! Chart Plotter Module
//! Draws the live spike-count bar chart using egui_plot.

use crate::api::StatsResponse;
use egui::Color32;
use egui_plot::{Bar, BarChart, Plot};

/// Bar fill color
pub const BAR_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

/// The snapshot currently rendered in the bar chart.
///
/// Owned exclusively by the GUI and overwritten wholesale on each
/// successful refresh; a failed refresh leaves it untouched, so the
/// display is stale but always internally consistent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartState {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartState {
    /// Derive labels and values from a stats snapshot, preserving the
    /// server-provided neuron ordering.
    pub fn from_snapshot(stats: &StatsResponse) -> Self {
        let labels = stats
            .per_neuron
            .iter()
            .map(|n| format!("Neuron {}", n.neuron_id))
            .collect();
        let values = stats.per_neuron.iter().map(|n| n.count).collect();

        Self { labels, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Renders the spike-count bar chart.
pub struct SpikePlotter;

impl SpikePlotter {
    /// Draw one bar per neuron, zero-based y-axis, neuron labels on x.
    /// `window_seconds` is the aggregation window the server reported
    /// for this snapshot. egui_plot redraws immediately with no
    /// animation, so per-second overwrites show up without visual lag.
    pub fn draw_bar_chart(ui: &mut egui::Ui, state: &ChartState, window_seconds: u32) {
        let bars: Vec<Bar> = state
            .values
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                Bar::new(i as f64, count as f64)
                    .width(0.6)
                    .fill(BAR_COLOR.gamma_multiply(0.8))
                    .stroke(egui::Stroke::new(1.0, BAR_COLOR))
                    .name(&state.labels[i])
            })
            .collect();

        let x_labels = state.labels.clone();

        Plot::new("spike_bars")
            .height(320.0)
            .allow_scroll(false)
            .include_y(0.0)
            .y_axis_label(format!("Spikes (last {}s)", window_seconds))
            .x_axis_formatter(move |mark, _range| {
                // Only label whole bar positions
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Spikes"));
            });
    }
}
