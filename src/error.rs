//! Error types for grid operations.

use std::path::PathBuf;

/// Errors that can occur while parsing points, loading or updating a grid,
/// or rendering it.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Invalid point format: {0}")]
    InvalidFormat(String),

    #[error("Point out of range: {0}")]
    OutOfRange(String),

    #[error("Persisted grid data size does not match the expected size: found {found} entries, expected {expected}")]
    SizeMismatch {
        /// Entry count implied by the requested size
        expected: usize,
        /// Entry count found in the backing file
        found: usize,
    },

    #[error("Persisted grid has {entries} entries, which is not a square grid")]
    NotSquare {
        /// Entry count found in the backing file
        entries: usize,
    },

    #[error("Grid size {0} is too large")]
    SizeTooLarge(usize),

    #[error("Grid of size {size} is too large to render")]
    TooLargeToRender {
        /// Grid side length
        size: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed grid file '{}': {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize grid: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to encode image: {0}")]
    EncodeError(#[from] image::ImageError),
}

pub type Result<T, E = GridError> = std::result::Result<T, E>;
