#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crime incident record sources.
//!
//! A [`RecordSource`] is either a remote Socrata endpoint ([`socrata`]) or a
//! local JSON file ([`local`]). Both produce raw [`Incident`] records.
//!
//! Retrieval failures never escape [`RecordSource::load`]: they are logged
//! at error level and the caller receives an empty sequence. Use
//! [`RecordSource::try_load`] when the error itself is needed.

pub mod local;
pub mod registry;
pub mod socrata;

use std::path::PathBuf;

use crime_export_incident_models::Incident;

use crate::socrata::RemoteEndpoint;

/// Errors that can occur while retrieving records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed, returned a non-success status, or the body could
    /// not be decoded.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The local file does not exist.
    #[error("File '{}' not found", .path.display())]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The local file is not a JSON array.
    #[error("File '{}' is not a valid JSON file: {source}", .path.display())]
    InvalidJson {
        /// Path that was read.
        path: PathBuf,
        /// Underlying parse failure.
        source: serde_json::Error,
    },

    /// I/O error other than a missing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The response body was valid JSON but not an array of records.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Where raw incident records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// A single page from a Socrata-style paginated endpoint.
    Remote(RemoteEndpoint),
    /// A local JSON file whose top-level value is an array of records.
    Local {
        /// Path to the file.
        path: PathBuf,
    },
}

impl RecordSource {
    /// Short description used in log messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Remote(endpoint) => endpoint.api_url.clone(),
            Self::Local { path } => path.display().to_string(),
        }
    }

    /// Retrieves records, returning the error on failure.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request or file read fails, or the
    /// payload is not a JSON array.
    pub async fn try_load(&self) -> Result<Vec<Incident>, SourceError> {
        match self {
            Self::Remote(endpoint) => {
                let client = reqwest::Client::new();
                socrata::fetch_page(&client, endpoint).await
            }
            Self::Local { path } => local::read_records(path),
        }
    }

    /// Retrieves records, logging any failure and returning an empty
    /// sequence instead.
    pub async fn load(&self) -> Vec<Incident> {
        match self.try_load().await {
            Ok(records) => {
                log::info!("Loaded {} records from {}", records.len(), self.describe());
                records
            }
            Err(e) => {
                match self {
                    Self::Remote(_) => log::error!("Error occurred while fetching data: {e}"),
                    Self::Local { .. } => log::error!("Error: {e}"),
                }
                Vec::new()
            }
        }
    }
}

/// Converts a decoded JSON payload into incidents.
///
/// The payload must be an array; elements that are not objects become
/// incidents with no fields.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] if the payload is not an array.
pub fn records_from_json(payload: serde_json::Value) -> Result<Vec<Incident>, SourceError> {
    match payload {
        serde_json::Value::Array(values) => Ok(values.into_iter().map(Incident::from).collect()),
        other => Err(SourceError::Parse(format!(
            "expected JSON array of records, got {}",
            json_kind(&other)
        ))),
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn array_payload_becomes_incidents() {
        let records = records_from_json(json!([
            { "narrative": "Theft", "report_date": "2025-01-20" },
            { "narrative": "Burglary" },
        ]))
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].narrative(), "Theft");
        assert_eq!(records[1].report_date(), "");
    }

    #[test]
    fn object_payload_is_rejected() {
        let err = records_from_json(json!({ "data": [] })).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
        assert!(err.to_string().contains("object"));
    }

    #[tokio::test]
    async fn missing_local_file_loads_empty() {
        let source = RecordSource::Local {
            path: std::env::temp_dir().join("crime_export_source_test_does_not_exist.json"),
        };
        let err = source.try_load().await.unwrap_err();
        assert!(matches!(err, SourceError::FileNotFound { .. }));
        assert!(!err.to_string().is_empty());
        assert!(source.load().await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_remote_loads_empty() {
        // Port 1 on loopback refuses connections.
        let source = RecordSource::Remote(RemoteEndpoint::new(
            "http://127.0.0.1:1/resource/incidents.json",
            0,
            10,
        ));
        let err = source.try_load().await.unwrap_err();
        assert!(!err.to_string().is_empty());
        assert!(source.load().await.is_empty());
    }

    #[test]
    fn describe_names_the_location() {
        let remote = RecordSource::Remote(RemoteEndpoint::new("https://example.org/x.json", 0, 5));
        assert_eq!(remote.describe(), "https://example.org/x.json");

        let local = RecordSource::Local {
            path: PathBuf::from("data/incidents.json"),
        };
        assert_eq!(local.describe(), "data/incidents.json");
    }
}
