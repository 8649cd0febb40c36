use std::fs::{self, OpenOptions};

use clap::Parser;
use contribheat::cli::Cli;
use contribheat::services::config::app_dir;
use env_logger::{Env, Target};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.is_tui());
    cli.run()
}

/// `RUST_LOG` filtering, default `warn`. The TUI owns the screen, so its logs go to a file.
fn init_logging(tui: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if tui {
        match open_log_file() {
            Some(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            // Nowhere safe to write
            None => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }
    builder.init();
}

fn open_log_file() -> Option<fs::File> {
    let dir = app_dir().ok()?;
    fs::create_dir_all(&dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("contribheat.log"))
        .ok()
}
