use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::extractor::{
    candidate::Candidate,
    fields::{FieldKey, FieldSpec, FieldTable},
};

const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d %B %Y %H:%M",
];

const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// A field ready for display: primary value plus ordered alternates.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReconciledField {
    pub key: FieldKey,
    pub selector: String,
    pub primary: Option<String>,
    pub alternates: Vec<String>,
}

impl ReconciledField {
    pub fn is_missing(&self) -> bool {
        self.primary.is_none()
    }
}

pub fn reconcile(table: &FieldTable) -> Vec<ReconciledField> {
    table.iter().map(reconcile_field).collect()
}

pub fn reconcile_field(field: &FieldSpec) -> ReconciledField {
    let primary = field
        .primary()
        .filter(|candidate| !candidate.is_empty())
        .map(|candidate| display_value(field.key, candidate))
        .filter(|value| !value.is_empty());

    let alternates = field
        .alternates()
        .iter()
        .filter(|candidate| !candidate.is_empty())
        .map(|candidate| display_value(field.key, candidate))
        .filter(|value| !value.is_empty())
        .collect();

    ReconciledField {
        key: field.key,
        selector: field.selector.to_string(),
        primary,
        alternates,
    }
}

/// Turn one candidate into the string placed in the form.
pub fn display_value(key: FieldKey, candidate: &Candidate) -> String {
    match key {
        FieldKey::Date => normalize_date(&candidate_text(candidate)),
        FieldKey::Time => normalize_time(&candidate_text(candidate)),
        FieldKey::Site => match candidate {
            Candidate::Structured(value) => value
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string()),
            Candidate::Text(text) => text.trim().to_string(),
        },
        _ => candidate_text(candidate),
    }
}

fn candidate_text(candidate: &Candidate) -> String {
    match candidate {
        Candidate::Text(text) => text.trim().to_string(),
        // A JSON string inside a structure still reads as plain text
        Candidate::Structured(Value::String(text)) => text.trim().to_string(),
        Candidate::Structured(value) => value.to_string(),
    }
}

/// `YYYY-MM-DD` in the offset the source stated.
pub fn normalize_date(raw: &str) -> String {
    parse_datetime(raw).format("%Y-%m-%d").to_string()
}

/// `HH:MM:SS` in the offset the source stated.
pub fn normalize_time(raw: &str) -> String {
    parse_datetime(raw).format("%H:%M:%S").to_string()
}

/// Parse a date-like string. Input without an offset is read as UTC.
/// Anything unreadable becomes the Unix epoch.
pub fn parse_datetime(raw: &str) -> DateTime<FixedOffset> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return parsed;
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return parsed;
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return parsed.and_utc().fixed_offset();
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, format)
            && let Some(midnight) = parsed.and_hms_opt(0, 0, 0)
        {
            return midnight.and_utc().fixed_offset();
        }
    }
    if let Ok(seconds) = raw.parse::<i64>()
        && let Some(parsed) = DateTime::from_timestamp(seconds, 0)
    {
        return parsed.fixed_offset();
    }

    debug!(raw, "unparseable date, falling back to epoch");
    DateTime::<Utc>::default().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use serde_json::json;

    #[test]
    fn test_iso_round_trip_through_date_and_time() {
        let raw = "2024-03-05T14:30:15-08:00";
        assert_eq!(normalize_date(raw), "2024-03-05");
        assert_eq!(normalize_time(raw), "14:30:15");

        let rebuilt = format!("{}T{}-08:00", normalize_date(raw), normalize_time(raw));
        assert_eq!(
            DateTime::parse_from_rfc3339(&rebuilt).unwrap(),
            DateTime::parse_from_rfc3339(raw).unwrap()
        );
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(normalize_date("2024-03-05T14:30:00Z"), "2024-03-05");
        assert_eq!(normalize_date("2024-03-05T14:30:00.123+0100"), "2024-03-05");
        assert_eq!(normalize_date("Tue, 5 Mar 2024 14:30:00 GMT"), "2024-03-05");
        assert_eq!(normalize_date("2024-03-05 09:00:00"), "2024-03-05");
        assert_eq!(normalize_date("2024-03-05"), "2024-03-05");
        assert_eq!(normalize_date("March 5, 2024"), "2024-03-05");
        assert_eq!(normalize_date("1709649000"), "2024-03-05");
        assert_eq!(normalize_time("2024-03-05"), "00:00:00");
    }

    #[test]
    fn test_offset_is_preserved() {
        // 23:30 in Vancouver is already the next day in UTC
        assert_eq!(normalize_date("2024-03-05T23:30:00-08:00"), "2024-03-05");
        assert_eq!(normalize_time("2024-03-05T23:30:00-08:00"), "23:30:00");
    }

    #[test]
    fn test_unparseable_date_degrades_to_epoch() {
        assert_eq!(normalize_date("sometime last week"), "1970-01-01");
        assert_eq!(normalize_time("sometime last week"), "00:00:00");
        assert_eq!(normalize_date(""), "1970-01-01");
    }

    #[test]
    fn test_site_display_uses_name() {
        let structured = Candidate::Structured(json!({"@type": "Organization", "name": "The Daily"}));
        assert_eq!(display_value(FieldKey::Site, &structured), "The Daily");
        assert_eq!(display_value(FieldKey::Site, &"Plain".into()), "Plain");
    }

    #[test]
    fn test_structured_values_are_serialized() {
        let structured = Candidate::Structured(json!({"@value": "Nested"}));
        assert_eq!(
            display_value(FieldKey::Description, &structured),
            r#"{"@value":"Nested"}"#
        );
    }

    #[test]
    fn test_reconcile_date_field_reformats_every_candidate() {
        let mut table = Profile::MediaCoverage.field_table();
        let date = table.get_mut(FieldKey::Date).unwrap();
        date.push("2024-03-05T14:30:00Z".into());
        date.push("2024-03-04".into());

        let fields = reconcile(&table);
        let date = fields.iter().find(|f| f.key == FieldKey::Date).unwrap();
        assert_eq!(date.primary.as_deref(), Some("2024-03-05"));
        assert_eq!(date.alternates, vec!["2024-03-04"]);
        assert_eq!(date.selector, "#edit-field-media-article-date-0-value-date");
    }

    #[test]
    fn test_reconcile_drops_empty_alternates_and_marks_missing() {
        let mut table = Profile::MediaCoverage.field_table();
        let title = table.get_mut(FieldKey::Title).unwrap();
        title.push("A".into());
        title.push("   ".into());
        title.push("B".into());

        let fields = reconcile(&table);
        let title = fields.iter().find(|f| f.key == FieldKey::Title).unwrap();
        assert_eq!(title.primary.as_deref(), Some("A"));
        assert_eq!(title.alternates, vec!["B"]);

        let url = fields.iter().find(|f| f.key == FieldKey::Url).unwrap();
        assert!(url.is_missing());
    }
}
