#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crime incident export pipeline.
//!
//! Turns a materialized sequence of raw [`Incident`] records into the
//! thorn-delimited text export:
//!
//! 1. [`filter`]: date prefix, then narrative exclusion
//! 2. [`sort`]: stable by `report_date`
//! 3. [`page`]: `[offset, offset + limit)` window
//! 4. [`format`]: one `þ`-delimited line per record
//!
//! Every stage consumes its input and returns a new sequence. Records
//! themselves are never modified.

pub mod filter;
pub mod format;
pub mod page;
pub mod sort;

use crime_export_incident_models::{Incident, QueryParams};

/// Runs filter → sort → page over `records`.
#[must_use]
pub fn select(records: Vec<Incident>, query: &QueryParams) -> Vec<Incident> {
    let fetched = records.len();

    let filtered = filter::filter_incidents(records, query);
    log::debug!(
        "Filtered {fetched} records to {} (date_prefix={:?}, excluded={})",
        filtered.len(),
        query.date_prefix,
        query.excluded_narratives.len()
    );

    let sorted = sort::sort_by_report_date(filtered, query.order);
    let available = sorted.len();

    let selected = page::slice_page(sorted, query.offset, query.limit);
    if (selected.len() as u64) < query.limit && available as u64 > query.offset {
        log::debug!(
            "Short page: {} of {} requested rows ({fetched} fetched)",
            selected.len(),
            query.limit
        );
    }

    selected
}

/// Runs the full pipeline and renders the export text.
///
/// The result has no trailing newline; an empty selection renders as the
/// empty string.
#[must_use]
pub fn export(records: Vec<Incident>, query: &QueryParams) -> String {
    format::format_incidents(&select(records, query))
}
