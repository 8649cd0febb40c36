//! User configuration: `~/.contribheat/config.json`, env, then CLI flags
//!
//! Every field is optional. Later layers win: defaults < file < env < flags.

use directories::BaseDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::render::options::{
    clamp_cell_gap, clamp_cell_size, HeatmapOptions, DEFAULT_CELL_GAP, DEFAULT_CELL_SIZE,
};
use crate::types::palette::{default_palette, find_palette, ColorPattern};
use crate::types::{ContribheatError, Result};

use super::fetcher::DEFAULT_API_URL;

/// Environment override for the endpoint
pub const API_URL_ENV: &str = "CONTRIBHEAT_API_URL";

/// On-disk config; all fields optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub palette: Option<String>,
    pub show_legend: Option<bool>,
    pub cell_size: Option<u16>,
    pub cell_gap: Option<u16>,
    pub subject: Option<String>,
}

impl FileConfig {
    /// Load from `path`; a missing file is an empty config
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|e| {
            ContribheatError::Config(format!("{}: {}", path.display(), e))
        })
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub palette: Option<String>,
    pub cell_size: Option<u16>,
    pub cell_gap: Option<u16>,
    pub no_legend: bool,
    pub subject: Option<String>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub pattern: &'static ColorPattern,
    pub show_legend: bool,
    pub cell_size: u16,
    pub cell_gap: u16,
    pub subject: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            pattern: default_palette(),
            show_legend: true,
            cell_size: DEFAULT_CELL_SIZE,
            cell_gap: DEFAULT_CELL_GAP,
            subject: None,
        }
    }
}

impl Settings {
    /// Load the default config file and layer env + flags over it
    pub fn load(overrides: Overrides) -> Result<Self> {
        let file = FileConfig::load(&default_config_path()?)?;
        let env_api_url = std::env::var(API_URL_ENV).ok().filter(|v| !v.is_empty());
        Ok(Self::resolve(file, env_api_url, overrides))
    }

    pub fn resolve(file: FileConfig, env_api_url: Option<String>, overrides: Overrides) -> Self {
        let defaults = Self::default();

        let api_url = overrides
            .api_url
            .or(env_api_url)
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        let pattern = match overrides.palette.or(file.palette) {
            Some(name) => find_palette(&name).unwrap_or_else(|| {
                log::warn!("unknown palette '{}', using {}", name, defaults.pattern.name);
                defaults.pattern
            }),
            None => defaults.pattern,
        };

        let cell_size = overrides
            .cell_size
            .or(file.cell_size)
            .map(|px| clamped("cell_size", px, clamp_cell_size(px)))
            .unwrap_or(defaults.cell_size);

        let cell_gap = overrides
            .cell_gap
            .or(file.cell_gap)
            .map(|px| clamped("cell_gap", px, clamp_cell_gap(px)))
            .unwrap_or(defaults.cell_gap);

        let show_legend = if overrides.no_legend {
            false
        } else {
            file.show_legend.unwrap_or(defaults.show_legend)
        };

        let subject = overrides
            .subject
            .or(file.subject)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            api_url,
            pattern,
            show_legend,
            cell_size,
            cell_gap,
            subject,
        }
    }

    /// Display options for `subject` under these settings
    pub fn heatmap_options(&self, subject: &str) -> HeatmapOptions {
        HeatmapOptions::new(subject)
            .with_pattern(self.pattern)
            .with_legend(self.show_legend)
            .with_cell_size(self.cell_size)
            .with_cell_gap(self.cell_gap)
    }
}

fn clamped(field: &str, given: u16, result: u16) -> u16 {
    if given != result {
        log::warn!("{} {} out of range, using {}", field, given, result);
    }
    result
}

/// App directory (`~/.contribheat`)
pub fn app_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| ContribheatError::Config("Cannot determine home directory".into()))?;
    Ok(base_dirs.home_dir().join(".contribheat"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ========== FileConfig tests ==========

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = FileConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "palette": "Forest", "cell_size": 18 }"#).unwrap();

        let config = FileConfig::load(&path).unwrap();
        assert_eq!(config.palette.as_deref(), Some("Forest"));
        assert_eq!(config.cell_size, Some(18));
        assert_eq!(config.api_url, None);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileConfig::load(&path).unwrap_err();
        assert!(matches!(err, ContribheatError::Config(_)));
    }

    // ========== Settings::resolve tests ==========

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(FileConfig::default(), None, Overrides::default());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.pattern.name, "GitHub");
    }

    #[test]
    fn test_resolve_precedence() {
        let file = FileConfig {
            api_url: Some("http://file".into()),
            palette: Some("Forest".into()),
            cell_size: Some(12),
            cell_gap: Some(3),
            ..FileConfig::default()
        };

        let settings = Settings::resolve(file.clone(), None, Overrides::default());
        assert_eq!(settings.api_url, "http://file");
        assert_eq!(settings.pattern.name, "Forest");
        assert_eq!((settings.cell_size, settings.cell_gap), (12, 3));

        let settings = Settings::resolve(file.clone(), Some("http://env".into()), Overrides::default());
        assert_eq!(settings.api_url, "http://env");

        let overrides = Overrides {
            api_url: Some("http://flag".into()),
            palette: Some("neon".into()),
            cell_size: Some(20),
            ..Overrides::default()
        };
        let settings = Settings::resolve(file, Some("http://env".into()), overrides);
        assert_eq!(settings.api_url, "http://flag");
        assert_eq!(settings.pattern.name, "Neon");
        assert_eq!((settings.cell_size, settings.cell_gap), (20, 3));
    }

    #[test]
    fn test_resolve_clamps_sizes() {
        let file = FileConfig {
            cell_size: Some(64),
            cell_gap: Some(0),
            ..FileConfig::default()
        };
        let settings = Settings::resolve(file, None, Overrides::default());
        assert_eq!(settings.cell_size, 20);
        assert_eq!(settings.cell_gap, 1);
    }

    #[test]
    fn test_resolve_unknown_palette_falls_back() {
        let file = FileConfig {
            palette: Some("Vaporwave".into()),
            ..FileConfig::default()
        };
        let settings = Settings::resolve(file, None, Overrides::default());
        assert_eq!(settings.pattern.name, "GitHub");
    }

    #[test]
    fn test_resolve_legend_flag() {
        let file = FileConfig {
            show_legend: Some(true),
            ..FileConfig::default()
        };
        let overrides = Overrides {
            no_legend: true,
            ..Overrides::default()
        };
        assert!(!Settings::resolve(file, None, overrides).show_legend);
    }

    #[test]
    fn test_resolve_blank_subject_is_none() {
        let overrides = Overrides {
            subject: Some("   ".into()),
            ..Overrides::default()
        };
        let settings = Settings::resolve(FileConfig::default(), None, overrides);
        assert_eq!(settings.subject, None);
    }

    #[test]
    fn test_heatmap_options() {
        let settings = Settings {
            cell_gap: 4,
            show_legend: false,
            ..Settings::default()
        };
        let opts = settings.heatmap_options("octocat");
        assert_eq!(opts.subject, "octocat");
        assert_eq!(opts.cell_gap_px, 4);
        assert!(!opts.show_legend);
    }
}
