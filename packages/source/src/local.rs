//! Local JSON file reader.
//!
//! Reads a UTF-8 file whose top-level value is an array of incident objects.

use std::io::ErrorKind;
use std::path::Path;

use crime_export_incident_models::Incident;

use crate::{SourceError, records_from_json};

/// Reads all records from a local JSON file.
///
/// # Errors
///
/// Returns [`SourceError::FileNotFound`] if the file does not exist,
/// [`SourceError::InvalidJson`] if it is not valid JSON, and
/// [`SourceError::Parse`] if the top-level value is not an array.
pub fn read_records(path: &Path) -> Result<Vec<Incident>, SourceError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SourceError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(SourceError::Io(e)),
    };

    let payload: serde_json::Value =
        serde_json::from_str(&contents).map_err(|source| SourceError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!("Parsed {} bytes from {}", contents.len(), path.display());
    records_from_json(payload)
}
