//! Display configuration shared by the terminal and SVG renderers

use std::ops::RangeInclusive;

use crate::types::palette::{default_palette, ColorPattern};

use super::tooltip::{default_tooltip, TooltipFormat};

pub const DEFAULT_CELL_SIZE: u16 = 14;
pub const CELL_SIZE_RANGE: RangeInclusive<u16> = 10..=20;

pub const DEFAULT_CELL_GAP: u16 = 2;
pub const CELL_GAP_RANGE: RangeInclusive<u16> = 1..=5;

/// How a heatmap should look. Owned by the panel, borrowed by renderers.
#[derive(Debug, Clone)]
pub struct HeatmapOptions {
    pub subject: String,
    pub show_legend: bool,
    pub cell_size_px: u16,
    pub cell_gap_px: u16,
    pub pattern: &'static ColorPattern,
    pub tooltip: TooltipFormat,
}

impl HeatmapOptions {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            show_legend: true,
            cell_size_px: DEFAULT_CELL_SIZE,
            cell_gap_px: DEFAULT_CELL_GAP,
            pattern: default_palette(),
            tooltip: default_tooltip,
        }
    }

    pub fn with_pattern(mut self, pattern: &'static ColorPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Sizes outside the allowed ranges are clamped
    pub fn with_cell_size(mut self, px: u16) -> Self {
        self.cell_size_px = clamp_cell_size(px);
        self
    }

    pub fn with_cell_gap(mut self, px: u16) -> Self {
        self.cell_gap_px = clamp_cell_gap(px);
        self
    }

    pub fn with_tooltip(mut self, tooltip: TooltipFormat) -> Self {
        self.tooltip = tooltip;
        self
    }
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self::new("")
    }
}

pub fn clamp_cell_size(px: u16) -> u16 {
    px.clamp(*CELL_SIZE_RANGE.start(), *CELL_SIZE_RANGE.end())
}

pub fn clamp_cell_gap(px: u16) -> u16 {
    px.clamp(*CELL_GAP_RANGE.start(), *CELL_GAP_RANGE.end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::palette::find_palette;

    #[test]
    fn test_defaults() {
        let opts = HeatmapOptions::new("octocat");
        assert_eq!(opts.subject, "octocat");
        assert!(opts.show_legend);
        assert_eq!(opts.cell_size_px, 14);
        assert_eq!(opts.cell_gap_px, 2);
        assert_eq!(opts.pattern.name, "GitHub");
        assert_eq!((opts.tooltip)("2024-01-05", 2), "1/5/2024: 2 contributions");
    }

    #[test]
    fn test_builder_clamps() {
        let opts = HeatmapOptions::default().with_cell_size(40).with_cell_gap(0);
        assert_eq!(opts.cell_size_px, 20);
        assert_eq!(opts.cell_gap_px, 1);

        let opts = HeatmapOptions::default().with_cell_size(3).with_cell_gap(9);
        assert_eq!(opts.cell_size_px, 10);
        assert_eq!(opts.cell_gap_px, 5);
    }

    #[test]
    fn test_builder_sets_fields() {
        let opts = HeatmapOptions::default()
            .with_legend(false)
            .with_pattern(find_palette("Neon").unwrap())
            .with_cell_size(17);
        assert!(!opts.show_legend);
        assert_eq!(opts.pattern.name, "Neon");
        assert_eq!(opts.cell_size_px, 17);
    }
}
