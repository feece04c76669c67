//! hitakort library crate.
//!
//! Tracks hits on an N x N spreadsheet-labelled grid, persists the counts as
//! JSON, and renders them as a white-to-red heatmap, either as a PNG or as
//! 256-color terminal text.

pub mod cli;
pub mod config;
pub mod coord;
pub mod error;
pub mod registry;
pub mod render;
pub mod store;

pub use coord::{column_to_label, label_to_column, normalize, GridPoint};
pub use error::GridError;
pub use registry::{GridRegistry, RegistryError};
pub use store::GridStore;
