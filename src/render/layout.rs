//! Pixel geometry of the heatmap grid
//!
//! One column per week, one row per day within that week, both chronological.
//! Cells are `cell_size` square and `cell_gap` apart on both axes.

use chrono::Datelike;

use crate::types::ContributionData;

use super::options::HeatmapOptions;

const MONTH_NAMES: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A single laid-out day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub week: usize,
    pub day: usize,
    pub x: u32,
    pub y: u32,
    pub date: String,
    pub count: u64,
    /// Palette index
    pub level: usize,
    pub color: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct GridLayout {
    /// Columns (weeks), each holding its days top to bottom
    pub columns: Vec<Vec<GridCell>>,
    pub cell_size: u32,
    pub cell_gap: u32,
    pub width: u32,
    pub height: u32,
    /// Empty when the legend is hidden
    pub legend: Vec<LegendEntry>,
}

impl GridLayout {
    pub fn new(data: &ContributionData, options: &HeatmapOptions) -> Self {
        let cell_size = options.cell_size_px as u32;
        let cell_gap = options.cell_gap_px as u32;
        let pitch = cell_size + cell_gap;

        let columns: Vec<Vec<GridCell>> = data
            .weeks
            .iter()
            .enumerate()
            .map(|(week, w)| {
                w.days
                    .iter()
                    .enumerate()
                    .map(|(day, d)| {
                        let level = options.pattern.level_for(d.count);
                        GridCell {
                            week,
                            day,
                            x: week as u32 * pitch,
                            y: day as u32 * pitch,
                            date: d.date.clone(),
                            count: d.count,
                            level,
                            color: options.pattern.color_for(d.count),
                            label: (options.tooltip)(&d.date, d.count),
                        }
                    })
                    .collect()
            })
            .collect();

        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
        let legend = if options.show_legend {
            options
                .pattern
                .legend_entries()
                .into_iter()
                .map(|(color, label)| LegendEntry { color, label })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            width: span(columns.len(), cell_size, cell_gap),
            height: span(rows, cell_size, cell_gap),
            columns,
            cell_size,
            cell_gap,
            legend,
        }
    }

    pub fn weeks(&self) -> usize {
        self.columns.len()
    }

    /// Tallest column (7 for a full calendar)
    pub fn rows(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, week: usize, day: usize) -> Option<&GridCell> {
        self.columns.get(week).and_then(|c| c.get(day))
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.columns.iter().flatten()
    }

    /// `(week, "Mon")` for each week whose first day opens a new month
    pub fn month_labels(&self) -> Vec<(usize, &'static str)> {
        let mut labels = Vec::new();
        let mut last_month = None;
        for (week, column) in self.columns.iter().enumerate() {
            let month = column
                .first()
                .and_then(|c| chrono::NaiveDate::parse_from_str(&c.date, "%Y-%m-%d").ok())
                .map(|d| d.month());
            if let Some(month) = month {
                if last_month != Some(month) {
                    labels.push((week, MONTH_NAMES[month as usize]));
                    last_month = Some(month);
                }
            }
        }
        labels
    }
}

/// Length of `n` cells separated by gaps
fn span(n: usize, size: u32, gap: u32) -> u32 {
    if n == 0 {
        0
    } else {
        n as u32 * size + (n as u32 - 1) * gap
    }
}
