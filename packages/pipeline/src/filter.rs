//! Record filters.
//!
//! Both filters are per-record predicates, so their order does not change
//! the result. [`filter_incidents`] applies the date filter first and the
//! narrative filter second.

use std::collections::BTreeSet;

use crime_export_incident_models::{Incident, QueryParams};

/// Keeps records whose `report_date` starts with `prefix`.
///
/// Matching is exact and case-sensitive. An empty prefix keeps everything.
#[must_use]
pub fn filter_by_date_prefix(records: Vec<Incident>, prefix: &str) -> Vec<Incident> {
    if prefix.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| r.report_date().starts_with(prefix))
        .collect()
}

/// Drops records whose `narrative` exactly equals one of `excluded`.
///
/// This is set membership, not a substring test. An empty set keeps
/// everything.
#[must_use]
pub fn exclude_narratives(records: Vec<Incident>, excluded: &BTreeSet<String>) -> Vec<Incident> {
    if excluded.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| !excluded.contains(r.narrative().as_ref()))
        .collect()
}

/// Applies the date filter, then the narrative exclusion filter.
#[must_use]
pub fn filter_incidents(records: Vec<Incident>, query: &QueryParams) -> Vec<Incident> {
    let records = filter_by_date_prefix(records, &query.date_prefix);
    exclude_narratives(records, &query.excluded_narratives)
}
