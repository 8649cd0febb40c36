//! Configuration panel: subject input and display options

use std::ops::RangeInclusive;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::render::options::{CELL_GAP_RANGE, CELL_SIZE_RANGE};
use crate::render::{long_date_tooltip, HeatmapOptions};
use crate::services::Settings;
use crate::types::palette::{palette_index, ColorPattern, PALETTES};
use crate::tui::theme::{hex_to_color, Theme};

/// Rows inside the border
const CONTENT_ROWS: u16 = 6;
/// Width of the field label column
const LABEL_WIDTH: usize = 12;

/// Focusable panel fields, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelField {
    #[default]
    Subject,
    Legend,
    CellSize,
    CellGap,
    Palette,
    /// The heatmap below the panel (arrow keys move the day cursor)
    Grid,
}

impl PanelField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Subject => "Subject",
            Self::Legend => "Legend",
            Self::CellSize => "Cell Size",
            Self::CellGap => "Cell Gap",
            Self::Palette => "Palette",
            Self::Grid => "Grid",
        }
    }

    /// Next field (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Subject => Self::Legend,
            Self::Legend => Self::CellSize,
            Self::CellSize => Self::CellGap,
            Self::CellGap => Self::Palette,
            Self::Palette => Self::Grid,
            Self::Grid => Self::Subject,
        }
    }

    /// Previous field (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Subject => Self::Grid,
            Self::Legend => Self::Subject,
            Self::CellSize => Self::Legend,
            Self::CellGap => Self::CellSize,
            Self::Palette => Self::CellGap,
            Self::Grid => Self::Palette,
        }
    }
}

/// Panel state; owns the display options handed to the heatmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPanel {
    pub input: String,
    pub focus: PanelField,
    pub show_legend: bool,
    pub cell_size: u16,
    pub cell_gap: u16,
    /// Index into `PALETTES`
    pub palette: usize,
}

impl ConfigPanel {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            input: settings.subject.clone().unwrap_or_default(),
            focus: PanelField::default(),
            show_legend: settings.show_legend,
            cell_size: settings.cell_size,
            cell_gap: settings.cell_gap,
            palette: palette_index(settings.pattern),
        }
    }

    pub fn pattern(&self) -> &'static ColorPattern {
        &PALETTES[self.palette % PALETTES.len()]
    }

    /// Trimmed subject as typed
    pub fn subject(&self) -> &str {
        self.input.trim()
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Move the focused option one step (`delta` is -1 or +1). Returns whether anything changed.
    pub fn adjust(&mut self, delta: i32) -> bool {
        match self.focus {
            PanelField::Legend => {
                self.show_legend = !self.show_legend;
                true
            }
            PanelField::CellSize => step(&mut self.cell_size, delta, CELL_SIZE_RANGE),
            PanelField::CellGap => step(&mut self.cell_gap, delta, CELL_GAP_RANGE),
            PanelField::Palette => {
                let len = PALETTES.len() as i32;
                self.palette = (self.palette as i32 + delta).rem_euclid(len) as usize;
                true
            }
            PanelField::Subject | PanelField::Grid => false,
        }
    }

    /// Display options for the confirmed subject
    pub fn options(&self, subject: &str) -> HeatmapOptions {
        HeatmapOptions::new(subject)
            .with_pattern(self.pattern())
            .with_legend(self.show_legend)
            .with_cell_size(self.cell_size)
            .with_cell_gap(self.cell_gap)
            .with_tooltip(long_date_tooltip)
    }

    /// Total height including borders
    pub fn height() -> u16 {
        CONTENT_ROWS + 2
    }
}

fn step(value: &mut u16, delta: i32, range: RangeInclusive<u16>) -> bool {
    let next = (*value as i32 + delta).clamp(*range.start() as i32, *range.end() as i32) as u16;
    let changed = next != *value;
    *value = next;
    changed
}

/// `━━━●────` position indicator for a bounded value
fn slider(value: u16, range: &RangeInclusive<u16>) -> String {
    (*range.start()..=*range.end())
        .map(|v| match v.cmp(&value) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}

/// Panel widget
pub struct PanelView<'a> {
    panel: &'a ConfigPanel,
    theme: Theme,
}

impl<'a> PanelView<'a> {
    pub fn new(panel: &'a ConfigPanel, theme: Theme) -> Self {
        Self { panel, theme }
    }

    fn field_line(&self, field: PanelField, value: Vec<Span<'a>>) -> Line<'a> {
        let focused = self.panel.focus == field;
        let (marker, label_style) = if focused {
            (
                "▶ ",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(self.theme.muted()))
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(self.theme.accent())),
            Span::styled(
                format!("{:<width$}", field.label(), width = LABEL_WIDTH),
                label_style,
            ),
        ];
        spans.extend(value);
        Line::from(spans)
    }
}

impl Widget for PanelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Customize Your Heatmap ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted()));
        let inner = block.inner(area);
        block.render(area, buf);

        let text = Style::default().fg(self.theme.text());
        let muted = Style::default().fg(self.theme.muted());
        let panel = self.panel;

        let cursor = if panel.focus == PanelField::Subject {
            "▏"
        } else {
            ""
        };
        let subject_value = if panel.input.is_empty() && panel.focus != PanelField::Subject {
            vec![Span::styled("type a subject, then Enter", muted)]
        } else {
            vec![
                Span::styled(panel.input.clone(), text),
                Span::styled(cursor, Style::default().fg(self.theme.accent())),
            ]
        };

        let legend_value = vec![Span::styled(
            if panel.show_legend {
                "[x] Show legend"
            } else {
                "[ ] Show legend"
            },
            text,
        )];

        let size_value = vec![
            Span::styled(format!("{:>2}px ", panel.cell_size), text),
            Span::styled(slider(panel.cell_size, &CELL_SIZE_RANGE), muted),
        ];

        let gap_value = vec![
            Span::styled(format!("{:>2}px ", panel.cell_gap), text),
            Span::styled(slider(panel.cell_gap, &CELL_GAP_RANGE), muted),
        ];

        let pattern = panel.pattern();
        let mut palette_value = vec![Span::styled(format!("{:<14}", pattern.name), text)];
        palette_value.extend(
            pattern
                .colors
                .iter()
                .map(|hex| Span::styled("██", Style::default().fg(hex_to_color(hex)))),
        );

        let lines = [
            self.field_line(PanelField::Subject, subject_value),
            self.field_line(PanelField::Legend, legend_value),
            self.field_line(PanelField::CellSize, size_value),
            self.field_line(PanelField::CellGap, gap_value),
            self.field_line(PanelField::Palette, palette_value),
            Line::from(Span::styled(
                "  Tab: next field  ←/→: adjust  Enter: show heatmap  ?: help  Esc: quit",
                muted,
            )),
        ];

        for (i, line) in lines.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            buf.set_line(inner.x, y, line, inner.width);
        }
    }
}
