//! Subcommand handlers.

use std::io::Write;
use std::path::Path;

use super::args::{Args, Command, ConfigAction};
use super::enums::CountsFormat;
use crate::config::{self, Config, ConfigError};
use crate::coord::column_to_label;
use crate::error::GridError;
use crate::registry::{GridRegistry, RegistryError};

/// Errors surfaced to the user by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to encode counts: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run a parsed command line, writing user-facing output to `out`.
pub fn run(args: Args, out: &mut impl Write) -> Result<(), CommandError> {
    let config_path = args.config.clone().unwrap_or_else(config::default_path);
    let cfg = Config::load(Some(config_path.as_path()))?;

    let data_dir = args.data_dir.clone().unwrap_or_else(|| cfg.store.data_dir.clone());
    let open_registry = || GridRegistry::load(&data_dir, cfg.store.override_size);
    let owner = args.owner.as_str();

    match args.command {
        Command::Config { action } => {
            handle_config_action(&action, &cfg, &config_path, out)?;
        }
        Command::Size { size } => {
            let size = size.unwrap_or(cfg.store.grid_size);
            open_registry()?.create(owner, size)?;
            writeln!(out, "Grid size set to {}x{}.", size, size)?;
        }
        Command::Hit { point } => {
            let count = open_registry()?.record_hit(owner, &point)?;
            writeln!(out, "Hit {} added (count {}).", point.to_uppercase(), count)?;
        }
        Command::Show => {
            writeln!(out, "{}", open_registry()?.get(owner)?.render_text())?;
        }
        Command::Image { output } => {
            let output = output.unwrap_or_else(|| cfg.output.image_path.clone());
            let png = open_registry()?.get(owner)?.render_raster()?;
            write_image(&output, &png)?;
            log::info!("Wrote heatmap for '{}' to {:?}", owner, output);
            writeln!(out, "Heatmap written to {}", output.display())?;
        }
        Command::Counts { format } => {
            let counts = open_registry()?.get(owner)?.raw_counts();
            match format {
                CountsFormat::Table => write!(out, "{}", format_counts_table(&counts))?,
                CountsFormat::Json => writeln!(out, "{}", serde_json::to_string(&counts)?)?,
            }
        }
        Command::Reset => {
            open_registry()?.reset(owner)?;
            writeln!(out, "Grid reset.")?;
        }
        Command::List => {
            let registry = open_registry()?;
            let mut any = false;
            for name in registry.owners() {
                let store = registry.get(name)?;
                writeln!(
                    out,
                    "{}: {}x{}, {} hits",
                    name,
                    store.size(),
                    store.size(),
                    store.total_hits()
                )?;
                any = true;
            }
            if !any {
                writeln!(out, "No grids in {}", registry.root().display())?;
            }
        }
    }

    Ok(())
}

fn write_image(path: &Path, png: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, png)
}

/// Right-aligned count table with column letters and row numbers.
pub fn format_counts_table(counts: &[Vec<u64>]) -> String {
    let n = counts.len();
    let labels: Vec<String> = (0..n).map(column_to_label).collect();
    let width = counts
        .iter()
        .flatten()
        .map(|c| c.to_string().len())
        .chain(labels.iter().map(String::len))
        .max()
        .unwrap_or(1);
    let row_width = n.to_string().len();

    let mut table = format!("{:>row_width$}", "");
    for label in &labels {
        table.push_str(&format!(" {:>width$}", label));
    }
    table.push('\n');

    for (i, row) in counts.iter().enumerate() {
        table.push_str(&format!("{:>row_width$}", i + 1));
        for value in row {
            table.push_str(&format!(" {:>width$}", value));
        }
        table.push('\n');
    }
    table
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: &ConfigAction,
    cfg: &Config,
    config_path: &Path,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    match action {
        ConfigAction::Show => {
            writeln!(out, "Current configuration:")?;
            writeln!(out, "  Data dir: {}", cfg.store.data_dir.display())?;
            writeln!(out, "  Grid size: {}", cfg.store.grid_size)?;
            writeln!(
                out,
                "  Override size: {}",
                if cfg.store.override_size { "yes" } else { "no" }
            )?;
            writeln!(out, "  Image path: {}", cfg.output.image_path.display())?;
            writeln!(out)?;

            if config_path.exists() {
                writeln!(out, "Config file: {} (exists)", config_path.display())?;
            } else {
                writeln!(out, "Config file: {} (not found)", config_path.display())?;
            }
        }
        ConfigAction::Init => {
            Config::default().write_new(config_path)?;
            writeln!(out, "Created config file: {}", config_path.display())?;
        }
    }
    Ok(())
}
