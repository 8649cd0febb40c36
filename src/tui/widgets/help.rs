//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const POPUP_WIDTH: u16 = 46;

/// (section, [(key, description)])
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Panel",
        &[
            ("Tab / Shift+Tab", "Next / previous field"),
            ("Enter", "Show heatmap for subject"),
            ("Left/Right", "Adjust focused option"),
            ("Space", "Toggle / step option"),
        ],
    ),
    (
        "Heatmap",
        &[
            ("Arrow keys", "Move day cursor (Grid)"),
            ("Enter", "Retry after an error"),
        ],
    ),
    (
        "General",
        &[
            ("?", "Toggle help"),
            ("q", "Quit (outside Subject)"),
            ("Esc / Ctrl+C", "Quit"),
        ],
    ),
];

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Border + padding + per section (header, separator, bindings, blank) + close hint
    fn height() -> u16 {
        let body: usize = SECTIONS.iter().map(|(_, keys)| keys.len() + 3).sum();
        body as u16 + 4
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let height = Self::height();
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: height.min(area.height),
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let header = Style::default()
            .fg(self.theme.date())
            .add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(self.theme.muted());
        let separator = "─".repeat(POPUP_WIDTH.saturating_sub(2) as usize);

        let mut lines = vec![Line::default()];
        for (title, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(*title, header)));
            lines.push(Line::from(Span::styled(separator.clone(), muted)));
            lines.extend(bindings.iter().map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<18}", key),
                        Style::default().fg(self.theme.accent()),
                    ),
                    Span::styled(*desc, Style::default().fg(self.theme.text())),
                ])
            }));
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled("Press ? to close", muted)).alignment(Alignment::Center));
        lines
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Overlay
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" contribheat v{} ", VERSION))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        Paragraph::new(self.lines()).block(block).render(area, buf);
    }
}
