//! TUI widgets

pub mod heatmap;
pub mod help;
pub mod panel;
pub mod spinner;
