//! Loading spinner widget (default loading placeholder)

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Spinner animation frames
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const LOADING_MESSAGE: &str = "Loading contributions...";

/// Loading spinner widget
pub struct Spinner<'a> {
    frame: usize,
    subject: &'a str,
    theme: Theme,
}

impl<'a> Spinner<'a> {
    pub fn new(frame: usize, subject: &'a str, theme: Theme) -> Self {
        Self {
            frame,
            subject,
            theme,
        }
    }

    /// Get the current spinner character
    pub fn current_char(&self) -> char {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    /// Advance to next frame, returning the new frame index
    pub fn next_frame(frame: usize) -> usize {
        (frame + 1) % SPINNER_FRAMES.len()
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 28 {
            return;
        }

        let center_y = area.y + area.height / 2;

        // Subject (bold)
        let name_y = center_y.saturating_sub(1);
        let name_width = self.subject.chars().count() as u16;
        let name_x = area.x + (area.width.saturating_sub(name_width)) / 2;
        buf.set_stringn(
            name_x,
            name_y,
            self.subject,
            area.width as usize,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );

        // Spinner line, 1 blank line below the subject
        let spinner_text = format!("{} {}", self.current_char(), LOADING_MESSAGE);
        let spinner_y = name_y + 2;
        let spinner_x =
            area.x + (area.width.saturating_sub(spinner_text.chars().count() as u16)) / 2;
        if spinner_y < area.y + area.height {
            buf.set_string(
                spinner_x,
                spinner_y,
                &spinner_text,
                Style::default().fg(self.theme.accent()),
            );
        }
    }
}
