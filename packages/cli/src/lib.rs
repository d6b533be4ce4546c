#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line crime incident exporter.
//!
//! Resolves command-line flags and an optional TOML config file into an
//! [`ExportConfig`]: which [`RecordSource`] to read and which
//! [`QueryParams`] to apply. The binary then loads the records and prints
//! the thorn-delimited export to stdout.

pub mod config;

use std::path::{Path, PathBuf};

use clap::Parser;
use crime_export_incident_models::{DEFAULT_LIMIT, QueryParams, SortOrder};
use crime_export_source::RecordSource;
use crime_export_source::registry::find_preset;
use crime_export_source::socrata::RemoteEndpoint;

pub use crate::config::{ConfigError, ConfigFile};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "crime_export",
    about = "Fetch and format crime data from a given URL or local file"
)]
pub struct Cli {
    /// URL to fetch crime data from
    #[arg(long)]
    pub url: Option<String>,
    /// Named data source to fetch from (see --list-sources)
    #[arg(long)]
    pub source: Option<String>,
    /// Path to a local JSON file with crime data (takes precedence over --url)
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Offset for pagination (start) [default: 0]
    #[arg(long)]
    pub offset: Option<u64>,
    /// Number of records to output [default: 10]
    #[arg(long)]
    pub limit: Option<u64>,
    /// Only keep records whose report date starts with this prefix
    #[arg(long)]
    pub date_prefix: Option<String>,
    /// Drop records whose narrative exactly matches (repeatable)
    #[arg(long = "exclude", value_name = "NARRATIVE")]
    pub exclude: Vec<String>,
    /// Sort order by report date: `asc` or `desc` [default: desc]
    #[arg(long)]
    pub order: Option<SortOrder>,
    /// TOML file providing defaults for any of the above
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// List the named data sources and exit
    #[arg(long)]
    pub list_sources: bool,
}

/// Where the export reads its records from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelection {
    /// A local JSON file.
    File(PathBuf),
    /// A remote Socrata endpoint (explicit URL or resolved preset).
    Url(String),
}

/// Fully resolved settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Record location.
    pub source: SourceSelection,
    /// Filter, sort, and page settings.
    pub query: QueryParams,
}

impl ExportConfig {
    /// Merges command-line flags over config-file values.
    ///
    /// Scalar flags override the file. Exclusions from both are combined.
    /// The record location comes from the command line if any of
    /// `--file`/`--url`/`--source` was given, otherwise from the file; in
    /// either case a file path wins over a URL, and a URL over a preset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSource`] if no location was given
    /// anywhere, or [`ConfigError::UnknownPreset`] for an unknown preset id.
    pub fn from_parts(cli: &Cli, file: ConfigFile) -> Result<Self, ConfigError> {
        let source = select_source(cli.file.as_deref(), cli.url.as_deref(), cli.source.as_deref())
            .or_else(|| {
                select_source(
                    file.file.as_deref(),
                    file.url.as_deref(),
                    file.source.as_deref(),
                )
            })
            .ok_or(ConfigError::MissingSource)??;

        let query = QueryParams::new(
            cli.offset.or(file.offset).unwrap_or(0),
            cli.limit.or(file.limit).unwrap_or(DEFAULT_LIMIT),
        )
        .with_date_prefix(
            cli.date_prefix
                .as_deref()
                .or(file.date_prefix.as_deref())
                .unwrap_or_default(),
        )
        .with_excluded_narratives(file.exclude)
        .with_excluded_narratives(cli.exclude.iter().cloned())
        .with_order(cli.order.or(file.order).unwrap_or_default());

        Ok(Self { source, query })
    }

    /// The record source to load, sized for over-fetching.
    ///
    /// Remote requests start at `$offset=0` and ask for
    /// [`QueryParams::over_fetch_size`] records; the page window is applied
    /// locally after filtering and sorting.
    #[must_use]
    pub fn record_source(&self) -> RecordSource {
        match &self.source {
            SourceSelection::File(path) => RecordSource::Local { path: path.clone() },
            SourceSelection::Url(url) => RecordSource::Remote(RemoteEndpoint::new(
                url,
                0,
                self.query.over_fetch_size(),
            )),
        }
    }
}

fn select_source(
    file: Option<&Path>,
    url: Option<&str>,
    preset: Option<&str>,
) -> Option<Result<SourceSelection, ConfigError>> {
    if let Some(path) = file {
        return Some(Ok(SourceSelection::File(path.to_path_buf())));
    }
    if let Some(url) = url {
        return Some(Ok(SourceSelection::Url(url.to_owned())));
    }
    preset.map(|id| {
        find_preset(id)
            .map(|p| SourceSelection::Url(p.api_url))
            .ok_or_else(|| ConfigError::UnknownPreset { id: id.to_owned() })
    })
}

/// Resolves the export configuration, reading `--config` if given.
///
/// # Errors
///
/// Returns [`ConfigError`] if the config file cannot be read or parsed, or
/// no valid record location was given.
pub fn resolve(cli: &Cli) -> Result<ExportConfig, ConfigError> {
    let file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    ExportConfig::from_parts(cli, file)
}
