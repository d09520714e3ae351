pub mod form;
pub mod history;
pub mod notice;
pub mod suggest;
pub mod timeline;
pub mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use history::{HistoryStore, JsonFileStore};

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "pricescope",
    version,
    about = "Terminal price-comparison browser with validated forms and search history"
)]
pub struct Cli {
    /// Data directory override (defaults to the platform data dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive TUI
    Tui,
    /// Show recent searches
    History {
        /// Forget all recorded searches
        #[arg(long)]
        clear: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    match cli.command {
        Commands::Tui => ui::tui::run_tui(data_dir),
        Commands::History { clear } => run_history(data_dir, clear),
    }
}

fn run_history(data_dir: PathBuf, clear: bool) -> Result<()> {
    let mut history = HistoryStore::new(JsonFileStore::new(data_dir));
    if clear {
        history.clear();
        println!("Search history cleared");
        return Ok(());
    }
    let entries = history.all();
    if entries.is_empty() {
        println!("No searches yet");
    }
    for (i, query) in entries.iter().enumerate() {
        println!("{:>2}. {query}", i + 1);
    }
    Ok(())
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "pricescope", "pricescope")
        .context("platform data dir unavailable")?;
    Ok(dirs.data_dir().to_path_buf())
}
