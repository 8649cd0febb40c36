//! Terminal theme detection and color definitions

use ratatui::style::Color;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (focused field, keybinding keys)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, hints, month labels)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Tooltip date text
    pub fn date(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Error alert color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    /// Marker drawn on the focused heatmap cell
    pub fn cursor(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }
}

/// `#rrggbb` to an RGB terminal color; anything else maps to `Reset`
pub fn hex_to_color(hex: &str) -> Color {
    match hex.parse::<Color>() {
        // ratatui also accepts names and indices; palettes only carry hex
        Ok(color @ Color::Rgb(..)) => color,
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_colors() {
        let t = Theme::Dark;
        assert_eq!(t.text(), Color::White);
        assert_eq!(t.accent(), Color::Cyan);
        assert_eq!(t.muted(), Color::DarkGray);
        assert_eq!(t.date(), Color::Yellow);
        assert_eq!(t.error(), Color::Red);
        assert_eq!(t.cursor(), Color::White);
    }

    #[test]
    fn test_light_theme_colors() {
        let t = Theme::Light;
        assert_eq!(t.text(), Color::Black);
        assert_eq!(t.accent(), Color::Indexed(25));
        assert_eq!(t.muted(), Color::Gray);
        assert_eq!(t.date(), Color::Indexed(130));
        assert_eq!(t.error(), Color::Indexed(124));
        assert_eq!(t.cursor(), Color::Black);
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    // ========== hex_to_color tests ==========

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color("#ebedf0"), Color::Rgb(0xeb, 0xed, 0xf0));
        assert_eq!(hex_to_color("#216E39"), Color::Rgb(0x21, 0x6e, 0x39));
    }

    #[test]
    fn test_hex_to_color_malformed() {
        assert_eq!(hex_to_color("216e39"), Color::Reset);
        assert_eq!(hex_to_color("#21"), Color::Reset);
        assert_eq!(hex_to_color("#zzzzzz"), Color::Reset);
        assert_eq!(hex_to_color("#ééé"), Color::Reset);
        assert_eq!(hex_to_color(""), Color::Reset);
    }

    #[test]
    fn test_hex_to_color_rejects_names_and_indices() {
        assert_eq!(hex_to_color("red"), Color::Reset);
        assert_eq!(hex_to_color("42"), Color::Reset);
    }

    #[test]
    fn test_catalog_colors_all_parse() {
        for pattern in crate::types::PALETTES.iter() {
            for hex in pattern.colors {
                assert_ne!(hex_to_color(hex), Color::Reset, "{} {}", pattern.name, hex);
            }
        }
    }
}
