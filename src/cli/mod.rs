use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::render::{render_svg, GridLayout};
use crate::services::{ContributionSource, HttpSource, Overrides, Settings};
use crate::types::{ColorPattern, ContributionData, PALETTES};

/// Contribution calendar heatmaps in the terminal
#[derive(Parser)]
#[command(name = "contribheat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Contribution API base URL
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Color palette name (see `contribheat palettes`)
    #[arg(long, global = true, value_name = "NAME")]
    palette: Option<String>,

    /// Cell size in pixels
    #[arg(long, global = true, value_name = "PX", value_parser = clap::value_parser!(u16).range(10..=20))]
    cell_size: Option<u16>,

    /// Gap between cells in pixels
    #[arg(long, global = true, value_name = "PX", value_parser = clap::value_parser!(u16).range(1..=5))]
    cell_gap: Option<u16>,

    /// Hide the legend
    #[arg(long, global = true)]
    no_legend: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui {
        /// Subject to load on startup
        subject: Option<String>,
    },

    /// Write the heatmap as an SVG document
    Svg {
        subject: String,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print contribution data with resolved colors as JSON
    Json { subject: String },

    /// List the built-in palettes
    Palettes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Whether this invocation takes over the terminal
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui { .. }))
    }

    fn overrides(&self) -> Overrides {
        let subject = match &self.command {
            Some(Commands::Tui { subject }) => subject.clone(),
            _ => None,
        };
        Overrides {
            api_url: self.api_url.clone(),
            palette: self.palette.clone(),
            cell_size: self.cell_size,
            cell_gap: self.cell_gap,
            no_legend: self.no_legend,
            subject,
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let overrides = self.overrides();
        match self.command {
            None | Some(Commands::Tui { .. }) => crate::tui::run(Settings::load(overrides)?),
            Some(Commands::Svg { subject, output }) => {
                let settings = Settings::load(overrides)?;
                let subject = required_subject(&subject)?;
                let data = fetch_once(&settings, subject)?;

                let options = settings.heatmap_options(subject);
                let layout = GridLayout::new(&data, &options);
                let svg = render_svg(&layout, subject, data.total_count);

                match output {
                    Some(path) => {
                        fs::write(&path, svg)
                            .with_context(|| format!("writing {}", path.display()))?;
                        log::info!("wrote {}", path.display());
                    }
                    None => println!("{}", svg),
                }
                Ok(())
            }
            Some(Commands::Json { subject }) => {
                let settings = Settings::load(overrides)?;
                let subject = required_subject(&subject)?;
                let data = fetch_once(&settings, subject)?;
                let report = JsonReport::new(subject, settings.pattern, &data);
                println!("{}", serde_json::to_string_pretty(&report)?);
                Ok(())
            }
            Some(Commands::Palettes { json }) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&PALETTES)?);
                } else {
                    print!("{}", palette_table());
                }
                Ok(())
            }
        }
    }
}

fn required_subject(subject: &str) -> anyhow::Result<&str> {
    let subject = subject.trim();
    if subject.is_empty() {
        anyhow::bail!("subject must not be empty");
    }
    Ok(subject)
}

fn fetch_once(settings: &Settings, subject: &str) -> anyhow::Result<ContributionData> {
    let source = HttpSource::new()?;
    source
        .fetch(&settings.api_url, subject)
        .with_context(|| format!("loading contributions for '{}'", subject))
}

/// JSON output: the calendar with each day's palette level and color
#[derive(Serialize)]
struct JsonReport<'a> {
    subject: &'a str,
    palette: &'static str,
    total_contributions: u64,
    /// Busiest single day
    max_count: u64,
    active_days: usize,
    weeks: Vec<Vec<JsonDay<'a>>>,
}

#[derive(Serialize)]
struct JsonDay<'a> {
    date: &'a str,
    count: u64,
    level: usize,
    color: &'static str,
}

impl<'a> JsonReport<'a> {
    fn new(subject: &'a str, pattern: &ColorPattern, data: &'a ContributionData) -> Self {
        let weeks = data
            .weeks
            .iter()
            .map(|week| {
                week.days
                    .iter()
                    .map(|day| JsonDay {
                        date: &day.date,
                        count: day.count,
                        level: pattern.level_for(day.count),
                        color: pattern.color_for(day.count),
                    })
                    .collect()
            })
            .collect();
        Self {
            subject,
            palette: pattern.name,
            total_contributions: data.total_count,
            max_count: data.max_count(),
            active_days: data.active_days(),
            weeks,
        }
    }
}

/// One line per palette: name, colors, range labels
fn palette_table() -> String {
    PALETTES
        .iter()
        .map(|p| {
            let labels: Vec<String> = p.ranges.iter().map(|r| r.label()).collect();
            format!("{:<14}{}  ({})\n", p.name, p.colors.join(" "), labels.join(", "))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContributionDay, ContributionWeek};

    // ========== Parsing tests ==========

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["contribheat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.is_tui());
    }

    #[test]
    fn test_cli_parse_tui_subject() {
        let cli = Cli::try_parse_from(["contribheat", "tui", "octocat"]).unwrap();
        assert!(cli.is_tui());
        assert_eq!(cli.overrides().subject.as_deref(), Some("octocat"));
    }

    #[test]
    fn test_cli_parse_svg() {
        let cli =
            Cli::try_parse_from(["contribheat", "svg", "octocat", "-o", "out.svg"]).unwrap();
        assert!(!cli.is_tui());
        match cli.command {
            Some(Commands::Svg { subject, output }) => {
                assert_eq!(subject, "octocat");
                assert_eq!(output, Some(PathBuf::from("out.svg")));
            }
            _ => panic!("expected svg"),
        }
    }

    #[test]
    fn test_cli_parse_palettes_json() {
        let cli = Cli::try_parse_from(["contribheat", "palettes", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Palettes { json: true })));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "contribheat",
            "json",
            "octocat",
            "--palette",
            "Forest",
            "--cell-size",
            "18",
            "--cell-gap",
            "4",
            "--no-legend",
            "--api-url",
            "http://localhost:8787",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.palette.as_deref(), Some("Forest"));
        assert_eq!(overrides.cell_size, Some(18));
        assert_eq!(overrides.cell_gap, Some(4));
        assert!(overrides.no_legend);
        assert_eq!(overrides.api_url.as_deref(), Some("http://localhost:8787"));
        // Only the TUI takes its subject through settings
        assert_eq!(overrides.subject, None);
    }

    #[test]
    fn test_cli_rejects_out_of_range_sizes() {
        assert!(Cli::try_parse_from(["contribheat", "--cell-size", "9"]).is_err());
        assert!(Cli::try_parse_from(["contribheat", "--cell-size", "21"]).is_err());
        assert!(Cli::try_parse_from(["contribheat", "--cell-gap", "0"]).is_err());
        assert!(Cli::try_parse_from(["contribheat", "--cell-gap", "6"]).is_err());
        assert!(Cli::try_parse_from(["contribheat", "--cell-size", "10", "--cell-gap", "5"]).is_ok());
    }

    #[test]
    fn test_cli_svg_requires_subject() {
        assert!(Cli::try_parse_from(["contribheat", "svg"]).is_err());
    }

    #[test]
    fn test_required_subject() {
        assert_eq!(required_subject("  octocat ").unwrap(), "octocat");
        assert!(required_subject("   ").is_err());
    }

    // ========== Output tests ==========

    #[test]
    fn test_json_report_colors() {
        let data = ContributionData {
            total_count: 35,
            weeks: vec![ContributionWeek {
                days: vec![
                    ContributionDay::new("2024-01-07", 0),
                    ContributionDay::new("2024-01-08", 5),
                    ContributionDay::new("2024-01-09", 30),
                ],
            }],
        };
        let report = JsonReport::new("octocat", &PALETTES[0], &data);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["palette"], "GitHub");
        assert_eq!(value["total_contributions"], 35);
        assert_eq!(value["max_count"], 30);
        assert_eq!(value["active_days"], 2);
        let days = &value["weeks"][0];
        assert_eq!(days[0]["color"], "#ebedf0");
        assert_eq!(days[1]["level"], 1);
        assert_eq!(days[2]["color"], "#216e39");
    }

    #[test]
    fn test_palette_table() {
        let table = palette_table();
        assert_eq!(table.lines().count(), PALETTES.len());
        let first = table.lines().next().unwrap();
        assert!(first.starts_with("GitHub"));
        assert!(first.contains("#216e39"));
        assert!(first.contains("(0, 1-9, 10-19, 20-29, 30+)"));
    }
}
