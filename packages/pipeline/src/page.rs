//! Offset/limit page window.

use crime_export_incident_models::Incident;

/// Returns the half-open window `[offset, offset + limit)`.
///
/// An offset past the end yields an empty page; a window running past the
/// end yields the available tail. The result length is
/// `min(limit, max(0, len - offset))`.
#[must_use]
pub fn slice_page(records: Vec<Incident>, offset: u64, limit: u64) -> Vec<Incident> {
    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    records.into_iter().skip(offset).take(limit).collect()
}
