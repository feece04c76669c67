//! GridStore - a square grid of hit counts persisted as a flat JSON object.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::coord::{self, GridPoint};
use crate::error::{GridError, Result};
use crate::render;

/// File name used when a store is opened on a directory.
pub const DEFAULT_FILE_NAME: &str = "heatmap_data.json";

/// Square grid of hit counts backed by a JSON file.
///
/// The file maps canonical labels to counts, e.g.
/// `{"A1": 0, "A2": 0, "B1": 3, "B2": 1}`. There is no header: the grid size
/// is the square root of the entry count.
#[derive(Debug)]
pub struct GridStore {
    counts: BTreeMap<String, u64>,
    size: usize,
    path: PathBuf,
}

impl GridStore {
    /// Open (or create) the store at `path`.
    ///
    /// A directory, or a path without an extension, gets
    /// [`DEFAULT_FILE_NAME`] appended. Missing parent directories and a
    /// missing file are created. If the file holds data it replaces the
    /// all-zero grid when `override_size` is set or its entry count matches
    /// `size * size`; otherwise this fails with [`GridError::SizeMismatch`].
    ///
    /// A file created here holds `{}` until the first [`save`](Self::save).
    pub fn open(path: impl Into<PathBuf>, size: usize, override_size: bool) -> Result<Self> {
        let expected = size
            .checked_mul(size)
            .ok_or(GridError::SizeTooLarge(size))?;
        let path = resolve_path(path.into());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        if !path.exists() {
            std::fs::write(&path, "{}")?;
        }

        let mut store = Self {
            counts: zero_grid(size),
            size,
            path,
        };

        let persisted = store.read_file()?;
        if !persisted.is_empty() {
            if !override_size && persisted.len() != expected {
                return Err(GridError::SizeMismatch {
                    expected,
                    found: persisted.len(),
                });
            }
            store.size = exact_sqrt(persisted.len()).ok_or(GridError::NotSquare {
                entries: persisted.len(),
            })?;
            store.counts = persisted;
        }

        Ok(store)
    }

    /// Record one hit on a raw point such as `"b3"` or `"3B"`.
    ///
    /// Fails with [`GridError::InvalidFormat`] if the point can't be parsed
    /// and [`GridError::OutOfRange`] if it is not on this grid. On success
    /// the whole grid is written back to disk.
    pub fn record_hit(&mut self, raw_point: &str) -> Result<()> {
        let label = coord::normalize(raw_point)?.label();
        let count = self
            .counts
            .get_mut(&label)
            .ok_or_else(|| GridError::OutOfRange(raw_point.to_string()))?;
        *count += 1;
        self.save()
    }

    /// Row-major count matrix. Row 0 is row `1`, column 0 is column `A`.
    pub fn raw_counts(&self) -> Vec<Vec<u64>> {
        (1..=self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| self.count_at(GridPoint::new(col, row)))
                    .collect()
            })
            .collect()
    }

    /// Current count for a raw point.
    pub fn count(&self, raw_point: &str) -> Result<u64> {
        let label = coord::normalize(raw_point)?.label();
        self.counts
            .get(&label)
            .copied()
            .ok_or_else(|| GridError::OutOfRange(raw_point.to_string()))
    }

    /// Sum of all counts.
    pub fn total_hits(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Canonical labels in row-major order.
    pub fn labels(&self) -> Vec<String> {
        (1..=self.size)
            .flat_map(|row| (0..self.size).map(move |col| GridPoint::new(col, row).label()))
            .collect()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the heatmap as PNG bytes.
    pub fn render_raster(&self) -> Result<Vec<u8>> {
        render::render_png(&self.raw_counts())
    }

    /// Render the heatmap as ANSI-colored text.
    pub fn render_text(&self) -> String {
        render::render_text(&self.raw_counts())
    }

    /// Delete the backing file. A file that is already gone is not an error.
    pub fn reset(self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn count_at(&self, point: GridPoint) -> u64 {
        self.counts.get(&point.label()).copied().unwrap_or(0)
    }

    fn read_file(&self) -> Result<BTreeMap<String, u64>> {
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|source| GridError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the full grid to a temp file next to the target, then rename it
    /// over the target.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, &self.counts)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn resolve_path(path: PathBuf) -> PathBuf {
    if path.is_dir() || path.extension().is_none() {
        path.join(DEFAULT_FILE_NAME)
    } else {
        path
    }
}

fn zero_grid(size: usize) -> BTreeMap<String, u64> {
    (1..=size)
        .flat_map(|row| (0..size).map(move |col| (GridPoint::new(col, row).label(), 0)))
        .collect()
}

fn exact_sqrt(n: usize) -> Option<usize> {
    let mut root = (n as f64).sqrt() as usize;
    // Correct float error near large perfect squares.
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    (root * root == n).then_some(root)
}
