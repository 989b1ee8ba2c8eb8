//! Charts module - Chart state and rendering

mod plotter;

pub use plotter::{ChartState, SpikePlotter};
