//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::CountsFormat;

/// Track hits on a labelled grid and render them as a heatmap
#[derive(Parser, Debug)]
#[command(name = "hitakort")]
#[command(version, about = "Hit heatmaps on a spreadsheet-style grid", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Owner whose grid to use
    #[arg(long, short = 'u', global = true, default_value = "local")]
    pub owner: String,

    /// Grid data directory (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up the grid with the given size
    Size {
        /// Grid side length (default from config)
        size: Option<usize>,
    },
    /// Record a hit, e.g. `A1`, `1a` or `aaz123`
    Hit {
        point: String,
    },
    /// Print the heatmap as colored text
    Show,
    /// Write the heatmap as a PNG image
    Image {
        /// Output path (default from config)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the raw hit counts
    Counts {
        #[arg(long, short, default_value = "table")]
        format: CountsFormat,
    },
    /// Delete the grid
    Reset,
    /// List all grids
    List,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
