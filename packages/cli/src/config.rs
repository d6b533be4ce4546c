//! Optional TOML configuration file.
//!
//! Every key mirrors a command-line flag and every key is optional:
//!
//! ```toml
//! source = "gainesville"
//! limit = 25
//! date_prefix = "2025-01"
//! exclude = ["Drug Violation", "Noise Complaint"]
//! order = "desc"
//! ```

use std::path::{Path, PathBuf};

use crime_export_incident_models::SortOrder;
use serde::Deserialize;

/// Errors raised while assembling the export configuration. All of them are
/// fatal: the process exits before any records are retrieved.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// None of `--file`, `--url`, or `--source` was supplied.
    #[error("Either --url, --source, or --file must be provided.")]
    MissingSource,

    /// `--source` named a preset that does not exist.
    #[error("Unknown source '{id}' (see --list-sources)")]
    UnknownPreset {
        /// The id that was requested.
        id: String,
    },

    /// The config file could not be read.
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unexpected keys.
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying parse failure.
        source: toml::de::Error,
    },
}

/// Contents of a config file. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Remote endpoint URL.
    pub url: Option<String>,
    /// Preset id from the source registry.
    pub source: Option<String>,
    /// Local JSON file.
    pub file: Option<PathBuf>,
    /// Page start.
    pub offset: Option<u64>,
    /// Page size.
    pub limit: Option<u64>,
    /// Report-date prefix filter.
    pub date_prefix: Option<String>,
    /// Narratives to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Sort direction.
    pub order: Option<SortOrder>,
}

impl ConfigFile {
    /// Parses config file contents.
    ///
    /// # Errors
    ///
    /// Returns [`toml::de::Error`] if the TOML is malformed or contains
    /// unknown keys.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config file {}", path.display());
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
