//! Contribution calendar heatmaps: palette catalog, debounced fetch lifecycle,
//! grid layout, an interactive TUI and an SVG exporter.

pub mod cli;
pub mod render;
pub mod services;
pub mod tui;
pub mod types;
