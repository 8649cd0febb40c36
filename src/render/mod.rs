//! Renderer-independent heatmap geometry and the SVG exporter

pub mod layout;
pub mod options;
pub mod svg;
pub mod tooltip;

pub use layout::{GridCell, GridLayout, LegendEntry};
pub use options::HeatmapOptions;
pub use svg::render_svg;
pub use tooltip::{default_tooltip, long_date_tooltip, TooltipFormat};
