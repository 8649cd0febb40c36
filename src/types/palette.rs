//! Color patterns: count ranges mapped to colors, plus the built-in catalog

use serde::Serialize;

/// Inclusive count range; `max == None` is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountRange {
    pub min: u64,
    pub max: Option<u64>,
}

impl CountRange {
    pub const fn bounded(min: u64, max: u64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn unbounded(min: u64) -> Self {
        Self { min, max: None }
    }

    pub fn contains(self, count: u64) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    /// Legend text: `"0"`, `"1-9"`, `"30+"`
    pub fn label(self) -> String {
        match self.max {
            Some(max) if max == self.min => self.min.to_string(),
            Some(max) => format!("{}-{}", self.min, max),
            None => format!("{}+", self.min),
        }
    }
}

/// A named set of colors and the count range each one stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPattern {
    pub name: &'static str,
    /// Hex colors, `#rrggbb`
    pub colors: &'static [&'static str],
    pub ranges: &'static [CountRange],
}

impl ColorPattern {
    /// Index of the range containing `count`.
    /// A pattern with a gap falls back to level 0 rather than failing the render.
    pub fn level_for(&self, count: u64) -> usize {
        self.ranges
            .iter()
            .position(|r| r.contains(count))
            .unwrap_or(0)
    }

    /// Color for a day's count
    pub fn color_for(&self, count: u64) -> &'static str {
        self.colors.get(self.level_for(count)).copied().unwrap_or("")
    }

    /// Check the pattern invariant: one range per color, contiguous from 0,
    /// ending in an unbounded range.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.colors.is_empty() {
            return Err(format!("{}: no colors", self.name));
        }
        if self.colors.len() != self.ranges.len() {
            return Err(format!(
                "{}: {} colors but {} ranges",
                self.name,
                self.colors.len(),
                self.ranges.len()
            ));
        }

        let mut expected_min = 0;
        for (i, range) in self.ranges.iter().enumerate() {
            if range.min != expected_min {
                return Err(format!(
                    "{}: range {} starts at {} (expected {})",
                    self.name, i, range.min, expected_min
                ));
            }
            match range.max {
                Some(max) if max < range.min => {
                    return Err(format!("{}: range {} is empty", self.name, i));
                }
                Some(max) => expected_min = max.saturating_add(1),
                None if i + 1 == self.ranges.len() => return Ok(()),
                None => {
                    return Err(format!(
                        "{}: unbounded range {} is not last",
                        self.name, i
                    ))
                }
            }
        }
        Err(format!("{}: top range is bounded", self.name))
    }

    /// `(color, label)` per range, in legend order
    pub fn legend_entries(&self) -> Vec<(&'static str, String)> {
        self.colors
            .iter()
            .zip(self.ranges.iter())
            .map(|(color, range)| (*color, range.label()))
            .collect()
    }
}

/// 0, 1-9, 10-19, 20-29, 30+
const STANDARD_RANGES: &[CountRange] = &[
    CountRange::bounded(0, 0),
    CountRange::bounded(1, 9),
    CountRange::bounded(10, 19),
    CountRange::bounded(20, 29),
    CountRange::unbounded(30),
];

const fn pattern(name: &'static str, colors: &'static [&'static str]) -> ColorPattern {
    ColorPattern {
        name,
        colors,
        ranges: STANDARD_RANGES,
    }
}

/// Built-in catalog; the first entry is the default
pub static PALETTES: [ColorPattern; 15] = [
    pattern(
        "GitHub",
        &["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"],
    ),
    pattern(
        "Blue Ocean",
        &["#ebedf0", "#b3d4ff", "#4a9ff5", "#2188ff", "#0366d6"],
    ),
    pattern(
        "Sunset",
        &["#ebedf0", "#ffd1a3", "#ffab5e", "#ff7b39", "#e65100"],
    ),
    pattern(
        "Purple Haze",
        &["#ebedf0", "#d8b5ff", "#b57edc", "#8f4bbd", "#6a0dad"],
    ),
    pattern(
        "Fire",
        &["#ebedf0", "#ffcccb", "#ff7f7f", "#ff4c4c", "#ff0000"],
    ),
    pattern(
        "Forest",
        &["#ebedf0", "#bef5cb", "#85e89d", "#34d058", "#28a745"],
    ),
    pattern(
        "Coral Reef",
        &["#ebedf0", "#fca3b9", "#f97192", "#ea4a6b", "#b93a55"],
    ),
    pattern(
        "Neon",
        &["#ebedf0", "#b2fcfb", "#45f7a4", "#0ceb1d", "#00ff00"],
    ),
    pattern(
        "Autumn",
        &["#ebedf0", "#ffeaa7", "#fab1a0", "#ff7675", "#d63031"],
    ),
    pattern(
        "Pastel",
        &["#ebedf0", "#ffd5e5", "#a0ced9", "#fca3b7", "#b5ead7"],
    ),
    pattern(
        "Monochrome",
        &["#ebedf0", "#d0d0d0", "#a0a0a0", "#707070", "#404040"],
    ),
    pattern(
        "Rainbow",
        &["#ebedf0", "#ff9aa2", "#ffb347", "#9ee09e", "#91bdff"],
    ),
    pattern(
        "Cyberpunk",
        &["#ebedf0", "#ff00ff", "#00ffff", "#ff00ff", "#00ffff"],
    ),
    pattern(
        "Earth Tones",
        &["#ebedf0", "#d9c8b0", "#a68a64", "#7c6a4f", "#5e4b3a"],
    ),
    pattern(
        "Cotton Candy",
        &["#ebedf0", "#ffb3ba", "#ffdfba", "#bae1ff", "#baffc9"],
    ),
];

pub fn default_palette() -> &'static ColorPattern {
    &PALETTES[0]
}

/// Case-insensitive lookup by name
pub fn find_palette(name: &str) -> Option<&'static ColorPattern> {
    let name = name.trim();
    PALETTES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Index of a pattern within the catalog
pub fn palette_index(pattern: &ColorPattern) -> usize {
    PALETTES
        .iter()
        .position(|p| p.name == pattern.name)
        .unwrap_or(0)
}
