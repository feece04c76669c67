//! CLI enum types.

use clap::ValueEnum;

/// Output format for raw counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CountsFormat {
    /// Aligned columns with row and column labels
    #[default]
    Table,
    /// JSON array of rows
    Json,
}
