//! Thorn-delimited line format.
//!
//! Each incident renders as exactly one line:
//!
//! ```text
//! narrative þ report_date þ offense_date þ latitude þ longitude
//! ```
//!
//! with no spaces around the separator, which is the single code point
//! U+00FE (`þ`). Field order is fixed. Absent fields render as the empty
//! string, so a record with none of the five fields is four bare
//! separators. Lines are joined with `\n` and carry no trailing newline.
//!
//! Downstream consumers depend on this output byte-for-byte. Do not route
//! it through a general-purpose serializer.

use crime_export_incident_models::Incident;

/// Field separator (`þ`, LATIN SMALL LETTER THORN).
pub const THORN: char = '\u{00FE}';

/// Renders one incident as a thorn-delimited line.
#[must_use]
pub fn format_incident(incident: &Incident) -> String {
    let fields = [
        incident.narrative(),
        incident.report_date(),
        incident.offense_date(),
        incident.latitude(),
        incident.longitude(),
    ];

    let mut line = String::with_capacity(fields.iter().map(|f| f.len() + 2).sum());
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(THORN);
        }
        line.push_str(field);
    }
    line
}

/// Renders incidents one per line, joined by `\n`.
#[must_use]
pub fn format_incidents(incidents: &[Incident]) -> String {
    incidents
        .iter()
        .map(format_incident)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn thorn_is_u00fe() {
        assert_eq!(THORN, 'þ');
        assert_eq!(THORN.len_utf8(), 2);
    }

    #[test]
    fn formats_all_fields_in_order() {
        let inc = Incident::from(json!({
            "longitude": -82.3248,
            "latitude": 29.6516,
            "offense_date": "2023-02-08",
            "report_date": "2023-02-09",
            "narrative": "Test incident",
            "case_number": "ignored",
        }));
        assert_eq!(
            format_incident(&inc),
            "Test incidentþ2023-02-09þ2023-02-08þ29.6516þ-82.3248"
        );
    }

    #[test]
    fn empty_record_is_four_separators() {
        assert_eq!(format_incident(&Incident::default()), "þþþþ");
    }

    #[test]
    fn null_fields_never_render_a_marker() {
        let inc = Incident::from(json!({
            "narrative": null,
            "report_date": null,
            "offense_date": null,
            "latitude": null,
            "longitude": null,
        }));
        let line = format_incident(&inc);
        assert_eq!(line, "þþþþ");
        assert!(!line.contains("null"));
        assert!(!line.contains("None"));
    }

    #[test]
    fn non_object_record_is_four_separators() {
        assert_eq!(format_incident(&Incident::from(json!(42))), "þþþþ");
    }

    #[test]
    fn joins_lines_without_trailing_newline() {
        let incidents = vec![
            Incident::from(json!({ "narrative": "A" })),
            Incident::from(json!({ "narrative": "B" })),
        ];
        assert_eq!(format_incidents(&incidents), "Aþþþþ\nBþþþþ");
    }

    #[test]
    fn no_incidents_is_empty_string() {
        assert_eq!(format_incidents(&[]), "");
    }
}
