//! GUI module - User interface components

mod app;
mod chart_viewer;
mod status_panel;

pub use app::SpikeViewApp;
pub use chart_viewer::ChartViewer;
pub use status_panel::{StatusPanel, StatusPanelAction};
