#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crime incident record and export query types.
//!
//! An [`Incident`] is a loosely-typed JSON object as returned by a city
//! open-data portal. Only five fields matter to the export, and every one of
//! them has a defined default so that sparse or oddly-typed records never
//! cause a failure. [`QueryParams`] carries the filter, sort and page
//! settings for a single export run.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Free-text description of the incident.
pub const NARRATIVE: &str = "narrative";
/// Date the incident was reported, in lexically sortable form.
pub const REPORT_DATE: &str = "report_date";
/// Date the incident is believed to have occurred.
pub const OFFENSE_DATE: &str = "offense_date";
/// Latitude (WGS84), numeric or string.
pub const LATITUDE: &str = "latitude";
/// Longitude (WGS84), numeric or string.
pub const LONGITUDE: &str = "longitude";

/// A single raw crime incident record.
///
/// Wraps the JSON object exactly as the source delivered it. Records are
/// never mutated once loaded; pipeline stages clone or borrow them into new
/// sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Incident {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl Incident {
    /// Creates an incident from a JSON object.
    #[must_use]
    pub const fn new(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { fields }
    }

    /// Returns the named field coerced to its natural string form.
    ///
    /// Absent and `null` fields are the empty string. Strings are returned
    /// as-is, numbers and booleans in their JSON text form, and nested
    /// arrays/objects as compact JSON.
    #[must_use]
    pub fn field(&self, name: &str) -> Cow<'_, str> {
        match self.fields.get(name) {
            None | Some(serde_json::Value::Null) => Cow::Borrowed(""),
            Some(serde_json::Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    /// The incident narrative, or `""` if absent.
    #[must_use]
    pub fn narrative(&self) -> Cow<'_, str> {
        self.field(NARRATIVE)
    }

    /// The report date, or `""` if absent.
    #[must_use]
    pub fn report_date(&self) -> Cow<'_, str> {
        self.field(REPORT_DATE)
    }

    /// The offense date, or `""` if absent.
    #[must_use]
    pub fn offense_date(&self) -> Cow<'_, str> {
        self.field(OFFENSE_DATE)
    }

    /// The latitude, or `""` if absent.
    #[must_use]
    pub fn latitude(&self) -> Cow<'_, str> {
        self.field(LATITUDE)
    }

    /// The longitude, or `""` if absent.
    #[must_use]
    pub fn longitude(&self) -> Cow<'_, str> {
        self.field(LONGITUDE)
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub const fn fields(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.fields
    }
}

impl From<serde_json::Value> for Incident {
    /// Non-object values become an incident with no fields.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(fields) => Self::new(fields),
            _ => Self::default(),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Incident {
    fn from(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::new(fields)
    }
}

/// Direction in which incidents are ordered by report date.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Most recent first.
    #[default]
    Desc,
}

/// Default number of output rows when no limit is given.
pub const DEFAULT_LIMIT: u64 = 10;

/// Filter, sort, and page settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Index of the first row to emit (after filtering and sorting).
    pub offset: u64,
    /// Maximum number of rows to emit.
    pub limit: u64,
    /// Required `report_date` prefix. Empty disables the date filter.
    pub date_prefix: String,
    /// Narratives to drop (exact match). Empty disables the filter.
    pub excluded_narratives: BTreeSet<String>,
    /// Ordering by `report_date`.
    pub order: SortOrder,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}

impl QueryParams {
    /// Creates query parameters for the given page window with no filters
    /// and descending order.
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit,
            date_prefix: String::new(),
            excluded_narratives: BTreeSet::new(),
            order: SortOrder::Desc,
        }
    }

    /// Sets the `report_date` prefix filter.
    #[must_use]
    pub fn with_date_prefix(mut self, prefix: &str) -> Self {
        self.date_prefix = prefix.to_owned();
        self
    }

    /// Adds narratives to the exclusion set.
    #[must_use]
    pub fn with_excluded_narratives<I, S>(mut self, narratives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_narratives
            .extend(narratives.into_iter().map(Into::into));
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Number of raw records to request from the source.
    ///
    /// Filtering can discard records, so twice the page size plus the
    /// offset is fetched. This makes a short final page unlikely but does
    /// not rule it out.
    #[must_use]
    pub const fn over_fetch_size(&self) -> u64 {
        self.limit.saturating_mul(2).saturating_add(self.offset)
    }
}
