//! GridRegistry - one grid per owner, kept as `<owner>.json` in a directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::GridError;
use crate::store::GridStore;

/// Grid size assumed for grids discovered on disk; their real size is
/// recovered from the file.
pub const DEFAULT_GRID_SIZE: usize = 6;

/// Smallest grid an owner may set up.
pub const MIN_GRID_SIZE: usize = 2;

const GRID_EXTENSION: &str = "json";

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Grid size must be an integer greater than 1, got {0}")]
    InvalidSize(usize),

    #[error("Grid size is already set for '{0}'; reset it first")]
    AlreadySet(String),

    #[error("Grid size is not set for '{0}'; set it up first")]
    NotSet(String),

    #[error("Invalid owner name: {0:?}")]
    InvalidOwner(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// All owners' grids under one root directory.
#[derive(Debug)]
pub struct GridRegistry {
    root: PathBuf,
    grids: BTreeMap<String, GridStore>,
}

impl GridRegistry {
    /// Open the registry at `root`, creating the directory if needed and
    /// loading every `<owner>.json` grid in it.
    ///
    /// With `override_size` each grid takes its size from its file; without
    /// it, files that are not [`DEFAULT_GRID_SIZE`] squared fail to load.
    /// Files that fail to load are skipped with a warning so one bad grid
    /// does not take the others down.
    pub fn load(root: impl Into<PathBuf>, override_size: bool) -> Result<Self, RegistryError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;

        let mut grids = BTreeMap::new();
        for entry in std::fs::read_dir(&root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(GRID_EXTENSION) {
                continue;
            }
            let Some(owner) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match GridStore::open(&path, DEFAULT_GRID_SIZE, override_size) {
                Ok(store) => {
                    log::debug!("Loaded {}x{} grid for '{}'", store.size(), store.size(), owner);
                    grids.insert(owner.to_string(), store);
                }
                Err(e) => log::warn!("Skipping grid file {:?}: {}", path, e),
            }
        }

        Ok(Self { root, grids })
    }

    /// Set up a new `size` x `size` grid for `owner`. The all-zero grid is
    /// written out at once so the size survives a reload before any hit.
    pub fn create(&mut self, owner: &str, size: usize) -> Result<&GridStore, RegistryError> {
        validate_owner(owner)?;
        if size < MIN_GRID_SIZE {
            return Err(RegistryError::InvalidSize(size));
        }
        if self.grids.contains_key(owner) {
            return Err(RegistryError::AlreadySet(owner.to_string()));
        }

        let store = GridStore::open(self.grid_path(owner), size, false)?;
        store.save()?;
        log::info!("Set up {}x{} grid for '{}'", size, size, owner);
        Ok(self.grids.entry(owner.to_string()).or_insert(store))
    }

    pub fn get(&self, owner: &str) -> Result<&GridStore, RegistryError> {
        self.grids
            .get(owner)
            .ok_or_else(|| RegistryError::NotSet(owner.to_string()))
    }

    pub fn get_mut(&mut self, owner: &str) -> Result<&mut GridStore, RegistryError> {
        self.grids
            .get_mut(owner)
            .ok_or_else(|| RegistryError::NotSet(owner.to_string()))
    }

    /// Record a hit on `owner`'s grid and return the cell's new count.
    pub fn record_hit(&mut self, owner: &str, raw_point: &str) -> Result<u64, RegistryError> {
        let store = self.get_mut(owner)?;
        store.record_hit(raw_point)?;
        let count = store.count(raw_point)?;
        log::info!("Hit {} recorded for '{}' (count {})", raw_point, owner, count);
        Ok(count)
    }

    /// Delete `owner`'s grid file and forget the grid.
    pub fn reset(&mut self, owner: &str) -> Result<(), RegistryError> {
        let store = self
            .grids
            .remove(owner)
            .ok_or_else(|| RegistryError::NotSet(owner.to_string()))?;
        store.reset()?;
        log::info!("Reset grid for '{}'", owner);
        Ok(())
    }

    /// Owners with a grid, sorted.
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.grids.keys().map(String::as_str)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn grid_path(&self, owner: &str) -> PathBuf {
        self.root.join(format!("{}.{}", owner, GRID_EXTENSION))
    }
}

fn validate_owner(owner: &str) -> Result<(), RegistryError> {
    let valid = !owner.is_empty()
        && !owner.starts_with('.')
        && owner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidOwner(owner.to_string()))
    }
}
