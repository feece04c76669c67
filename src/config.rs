//! Configuration file handling for hitakort.
//!
//! Loads configuration from `~/.config/hitakort/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::registry::DEFAULT_GRID_SIZE;

/// Configuration file structure for hitakort.
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct StoreConfig {
    /// Directory holding one `<owner>.json` grid per owner
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Size used by `size` when none is given
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Adopt the persisted grid size when it differs from the requested one
    #[serde(default = "default_true")]
    pub override_size: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            grid_size: default_grid_size(),
            override_size: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_image_path")]
    pub image_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image_path: default_image_path(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

fn default_image_path() -> PathBuf {
    PathBuf::from("heatmap.png")
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Write this configuration to `path`, creating parent directories.
    /// Refuses to overwrite an existing file.
    pub fn write_new(&self, path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        let io_err = |e: std::io::Error| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let body = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        std::fs::write(path, format!("# hitakort configuration\n\n{}", body)).map_err(io_err)
    }
}

/// Errors that can occur when loading or writing configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    SerializeError(toml::ser::Error),
    AlreadyExists(PathBuf),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::SerializeError(source) => {
                write!(f, "Failed to serialize config: {}", source)
            }
            ConfigError::AlreadyExists(path) => {
                write!(f, "Config file already exists: {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::SerializeError(source) => Some(source),
            ConfigError::AlreadyExists(_) => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("hitakort")
        .join("config.toml")
}

/// Get the default grid data directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from(".local/share"))
        .join("hitakort")
        .join("users")
}
