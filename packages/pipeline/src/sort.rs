//! Stable ordering by report date.

use std::cmp::Reverse;

use crime_export_incident_models::{Incident, SortOrder};

/// Sorts records by `report_date` using plain string comparison.
///
/// The sort is stable: records with equal report dates keep their input
/// order in either direction. Missing dates compare as `""`, so they come
/// last when descending and first when ascending.
#[must_use]
pub fn sort_by_report_date(mut records: Vec<Incident>, order: SortOrder) -> Vec<Incident> {
    match order {
        SortOrder::Asc => records.sort_by_cached_key(|r| r.report_date().into_owned()),
        SortOrder::Desc => records.sort_by_cached_key(|r| Reverse(r.report_date().into_owned())),
    }
    records
}
