//! Status Panel Widget
//! Left side panel with the endpoint setting, poll health and controls.

use egui::{Color32, RichText};
use std::time::Instant;

/// Left side panel: endpoint configuration plus live poll health.
pub struct StatusPanel {
    /// Base URL shown in the edit box; applied on demand
    pub base_url_input: String,
    /// Base URL the current poller was spawned with
    pub active_base_url: String,
    pub paused: bool,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
    last_success: Option<Instant>,
}

impl StatusPanel {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url_input: base_url.clone(),
            active_base_url: base_url,
            paused: false,
            consecutive_failures: 0,
            last_error: None,
            last_success: None,
        }
    }

    /// Record a successful refresh cycle.
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
        self.last_error = None;
        self.last_success = Some(Instant::now());
    }

    /// Record a failed refresh cycle. The previous snapshot stays on
    /// screen; this only updates the health readout.
    pub fn record_failure(&mut self, error: String) {
        self.consecutive_failures += 1;
        self.last_error = Some(error);
    }

    /// True once the display is showing data older than the last cycle.
    pub fn is_stale(&self) -> bool {
        self.consecutive_failures > 0
    }

    /// Draw the panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> StatusPanelAction {
        let mut action = StatusPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("SpikeView")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Live spike dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Endpoint Section =====
        ui.label(RichText::new("Endpoint").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.text_edit_singleline(&mut self.base_url_input);
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    let changed = self.base_url_input != self.active_base_url;
                    ui.add_enabled_ui(changed, |ui| {
                        if ui.button("Apply").clicked() {
                            action = StatusPanelAction::ApplyEndpoint;
                        }
                    });
                    ui.label(
                        RichText::new("window: 60s (fixed)")
                            .size(10.0)
                            .color(Color32::GRAY),
                    );
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Poll Status Section =====
        ui.label(RichText::new("Polling").size(14.0).strong());
        ui.add_space(5.0);

        let (state_text, state_color) = if self.paused {
            ("Paused", Color32::GRAY)
        } else if self.is_stale() {
            ("Stale", Color32::from_rgb(243, 156, 18))
        } else if self.last_success.is_some() {
            ("Live", Color32::from_rgb(40, 167, 69))
        } else {
            ("Connecting...", Color32::GRAY)
        };

        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 6.0, state_color);
            ui.label(RichText::new(state_text).size(13.0).color(state_color));
        });

        ui.add_space(5.0);

        if let Some(at) = self.last_success {
            ui.label(
                RichText::new(format!("Last refresh: {}s ago", at.elapsed().as_secs()))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }

        if self.consecutive_failures > 0 {
            ui.label(
                RichText::new(format!("{} failed cycles", self.consecutive_failures))
                    .size(11.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        }

        if let Some(err) = &self.last_error {
            ui.add_space(4.0);
            ui.label(
                RichText::new(err)
                    .size(10.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Controls =====
        ui.vertical_centered(|ui| {
            let label = if self.paused { "Resume" } else { "Pause" };
            let button =
                egui::Button::new(RichText::new(label).size(14.0)).min_size(egui::vec2(120.0, 28.0));
            if ui.add(button).clicked() {
                action = StatusPanelAction::TogglePause;
            }
        });

        action
    }
}

/// Actions triggered by the status panel
#[derive(Debug, Clone, PartialEq)]
pub enum StatusPanelAction {
    None,
    ApplyEndpoint,
    TogglePause,
}
