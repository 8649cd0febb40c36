//! Contribution heatmap widget
//!
//! Draws whatever the loader currently holds: an idle prompt, the loading
//! placeholder, the error alert, or the week-column grid with its legend.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::render::{GridLayout, HeatmapOptions, LegendEntry};
use crate::services::FetchState;
use crate::tui::theme::{hex_to_color, Theme};

use super::spinner::Spinner;

/// Columns left of the grid
const MARGIN: u16 = 1;
/// Glyph used for a day cell
const CELL_GLYPH: &str = "█";
/// Glyph used for the focused day cell
const FOCUS_GLYPH: &str = "▓";

const IDLE_HINT: &str = "Enter a subject and press Enter to load its heatmap";
const FOCUS_HINT: &str = "Tab to the grid and use the arrow keys to inspect a day";

/// Pixel sizes translated to terminal cells.
/// A character is roughly 7px wide and 14px tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalScale {
    pub cell_cols: u16,
    pub gap_cols: u16,
    pub gap_rows: u16,
}

impl TerminalScale {
    pub fn from_px(cell_size: u16, cell_gap: u16) -> Self {
        Self {
            cell_cols: ((cell_size + 3) / 7).max(1),
            gap_cols: (cell_gap + 2) / 3,
            gap_rows: cell_gap / 3,
        }
    }

    pub fn col_pitch(self) -> u16 {
        self.cell_cols + self.gap_cols
    }

    pub fn row_pitch(self) -> u16 {
        1 + self.gap_rows
    }

    /// How many week columns fit in `width`
    pub fn weeks_for_width(self, width: u16) -> usize {
        if width < self.cell_cols {
            0
        } else {
            ((width - self.cell_cols) / self.col_pitch()) as usize + 1
        }
    }

    pub fn grid_width(self, weeks: usize) -> u16 {
        if weeks == 0 {
            0
        } else {
            clamp_u16(weeks)
                .saturating_mul(self.col_pitch())
                .saturating_sub(self.gap_cols)
        }
    }

    pub fn grid_height(self, rows: usize) -> u16 {
        if rows == 0 {
            0
        } else {
            clamp_u16(rows)
                .saturating_mul(self.row_pitch())
                .saturating_sub(self.gap_rows)
        }
    }
}

/// First visible week: newest weeks win, but the focused week must stay visible
pub fn window_start(total: usize, visible: usize, focus_week: Option<usize>) -> usize {
    let start = total.saturating_sub(visible);
    match focus_week {
        Some(week) if week < start => week,
        _ => start,
    }
}

/// Heatmap view for one loader state
pub struct HeatmapView<'a> {
    state: &'a FetchState,
    options: &'a HeatmapOptions,
    focus: Option<(usize, usize)>,
    spinner_frame: usize,
    theme: Theme,
    loading: Option<Paragraph<'a>>,
    error: Option<Paragraph<'a>>,
}

impl<'a> HeatmapView<'a> {
    pub fn new(state: &'a FetchState, options: &'a HeatmapOptions, theme: Theme) -> Self {
        Self {
            state,
            options,
            focus: None,
            spinner_frame: 0,
            theme,
            loading: None,
            error: None,
        }
    }

    /// Focused `(week, day)` cell, shown highlighted with its label
    pub fn with_focus(mut self, focus: Option<(usize, usize)>) -> Self {
        self.focus = focus;
        self
    }

    pub fn with_spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    /// Replace the default loading spinner
    pub fn with_loading(mut self, placeholder: Paragraph<'a>) -> Self {
        self.loading = Some(placeholder);
        self
    }

    /// Replace the default error alert
    pub fn with_error(mut self, alert: Paragraph<'a>) -> Self {
        self.error = Some(alert);
        self
    }

    fn render_idle(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(IDLE_HINT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(self.theme.muted()))
            .render(centered_rows(area, 1), buf);
    }

    fn render_error(&self, message: &str, area: Rect, buf: &mut Buffer) {
        let width = (message.chars().count() as u16 + 4)
            .max(20)
            .min(area.width);
        let height = 3.min(area.height);
        let alert_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        Clear.render(alert_area, buf);
        let block = Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error()));
        Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(self.theme.error()))
            .render(alert_area, buf);
    }

    fn render_grid(&self, layout: &GridLayout, total: u64, area: Rect, buf: &mut Buffer) {
        let scale = TerminalScale::from_px(self.options.cell_size_px, self.options.cell_gap_px);
        let usable = area.width.saturating_sub(MARGIN * 2);
        let visible = scale.weeks_for_width(usable).min(layout.weeks());
        let start = window_start(layout.weeks(), visible, self.focus.map(|(w, _)| w));

        let grid_width = scale.grid_width(visible);
        let grid_x = area.x + MARGIN + usable.saturating_sub(grid_width) / 2;
        let bottom = area.y + area.height;

        // Header
        let header = Line::from(vec![
            Span::styled(
                format!("Contributions for {}", self.options.subject),
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   Total Contributions: {}", total),
                Style::default().fg(self.theme.muted()),
            ),
        ]);
        buf.set_line(area.x + MARGIN, area.y, &header, usable);

        // Month labels
        let month_y = area.y + 2;
        if month_y < bottom {
            let mut next_free = grid_x;
            for (week, name) in layout.month_labels() {
                if week < start || week >= start + visible {
                    continue;
                }
                let x = grid_x + (week - start) as u16 * scale.col_pitch();
                if x < next_free || x + 3 > area.x + area.width {
                    continue;
                }
                buf.set_string(x, month_y, name, Style::default().fg(self.theme.muted()));
                next_free = x + 4;
            }
        }

        // Cells
        let grid_y = month_y + 1;
        let cell_text = CELL_GLYPH.repeat(scale.cell_cols as usize);
        let focus_text = FOCUS_GLYPH.repeat(scale.cell_cols as usize);
        for (col, column) in layout.columns[start..start + visible].iter().enumerate() {
            let x = grid_x + col as u16 * scale.col_pitch();
            for cell in column {
                let y = grid_y.saturating_add(clamp_u16(cell.day).saturating_mul(scale.row_pitch()));
                if y >= bottom {
                    break;
                }
                let color = hex_to_color(cell.color);
                if self.focus == Some((cell.week, cell.day)) {
                    let style = Style::default().fg(color).bg(self.theme.cursor());
                    buf.set_string(x, y, &focus_text, style);
                } else {
                    buf.set_string(x, y, &cell_text, Style::default().fg(color));
                }
            }
        }

        // Tooltip for the focused day
        let tooltip_y = grid_y
            .saturating_add(scale.grid_height(layout.rows()))
            .saturating_add(1);
        if tooltip_y < bottom {
            let focused = self.focus.and_then(|(w, d)| layout.cell(w, d));
            let line = match focused {
                Some(cell) => Line::from(Span::styled(
                    cell.label.clone(),
                    Style::default().fg(self.theme.date()),
                )),
                None => Line::from(Span::styled(
                    FOCUS_HINT,
                    Style::default().fg(self.theme.muted()),
                )),
            };
            buf.set_line(area.x + MARGIN, tooltip_y, &line, usable);
        }

        // Legend
        let legend_y = tooltip_y.saturating_add(2);
        if !layout.legend.is_empty() && legend_y < bottom {
            let legend_area = Rect::new(area.x + MARGIN, legend_y, usable, 1);
            Legend::new(&layout.legend, self.theme).render(legend_area, buf);
        }
    }
}

impl Widget for HeatmapView<'_> {
    fn render(mut self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        match self.state {
            FetchState::Idle => self.render_idle(area, buf),
            FetchState::Loading => match self.loading.take() {
                Some(placeholder) => placeholder.render(area, buf),
                None => Spinner::new(self.spinner_frame, &self.options.subject, self.theme)
                    .render(area, buf),
            },
            FetchState::Error(message) => match self.error.take() {
                Some(alert) => alert.render(area, buf),
                None => self.render_error(message, area, buf),
            },
            FetchState::Success(data) => {
                let layout = GridLayout::new(data, self.options);
                self.render_grid(&layout, data.total_count, area, buf);
            }
        }
    }
}

/// One line of `██ label` swatches
pub struct Legend<'a> {
    entries: &'a [LegendEntry],
    theme: Theme,
}

impl<'a> Legend<'a> {
    pub fn new(entries: &'a [LegendEntry], theme: Theme) -> Self {
        Self { entries, theme }
    }
}

impl Widget for Legend<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(self.entries.len() * 2);
        for entry in self.entries {
            spans.push(Span::styled(
                "██",
                Style::default().fg(hex_to_color(entry.color)),
            ));
            spans.push(Span::styled(
                format!(" {}   ", entry.label),
                Style::default().fg(self.theme.text()),
            ));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// `rows`-tall strip in the vertical middle of `area`
fn centered_rows(area: Rect, rows: u16) -> Rect {
    let height = rows.min(area.height);
    Rect {
        x: area.x,
        y: area.y + (area.height - height) / 2,
        width: area.width,
        height,
    }
}
