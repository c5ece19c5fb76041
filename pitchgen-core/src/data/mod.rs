//! Raw data normalization.
//!
//! Callers paste arbitrary JSON: a list of records, an object wrapping the list under
//! `data`, or something that is not JSON at all. Normalization turns any of those into
//! a bounded, ordered list of [`RecordSummary`] values and never fails; anything it
//! cannot interpret becomes an empty list.

pub mod records;

pub use records::{
    AwardSummary, CaseStudySummary, DESCRIPTION_LIMIT, RecordSummary, ServiceSummary,
    TeamMemberSummary, format_id, numeric_id,
};

use records::{array_or_empty, first_text, id_of, text_or_empty, truncated_description};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Kind of record a raw data document carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    TeamMembers,
    CaseStudies,
    Awards,
    Services,
    IntroCards,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TeamMembers => "team-members",
            Self::CaseStudies => "case-studies",
            Self::Awards => "awards",
            Self::Services => "services",
            Self::IntroCards => "intro-cards",
        }
    }

    /// Cap applied to the record count; `None` keeps every record
    pub fn max_records(self) -> Option<usize> {
        match self {
            Self::TeamMembers | Self::CaseStudies | Self::Awards => Some(50),
            Self::Services => Some(100),
            Self::IntroCards => None,
        }
    }

    /// Literal used when a record has neither `title` nor `name`
    pub fn untitled_label(self) -> &'static str {
        match self {
            Self::TeamMembers => "Unnamed Member",
            Self::CaseStudies | Self::Services => "Untitled",
            Self::Awards => "Untitled Award",
            Self::IntroCards => "Unknown",
        }
    }

    /// Fields tried, in order, for the display label. People are named by `name`,
    /// everything else by `title`.
    fn label_keys(self) -> &'static [&'static str] {
        match self {
            Self::TeamMembers => &["name", "title"],
            Self::CaseStudies | Self::Awards | Self::Services | Self::IntroCards => {
                &["title", "name"]
            }
        }
    }

    fn summarize(self, record: Value) -> RecordSummary {
        let fields = record.as_object();
        let label = first_text(fields, self.label_keys())
            .unwrap_or_else(|| self.untitled_label().to_string());
        match self {
            Self::TeamMembers => RecordSummary::TeamMember(TeamMemberSummary {
                id: id_of(fields),
                name: label,
                role: team_role(fields),
                description: truncated_description(fields),
            }),
            Self::CaseStudies => RecordSummary::CaseStudy(CaseStudySummary {
                id: id_of(fields),
                title: label,
                description: truncated_description(fields),
                categories: array_or_empty(fields, "categories"),
            }),
            Self::Awards => RecordSummary::Award(AwardSummary {
                id: id_of(fields),
                name: label,
                date: text_or_empty(fields, "date"),
                description: truncated_description(fields),
            }),
            Self::Services => RecordSummary::Service(ServiceSummary {
                id: id_of(fields),
                title: label,
                slug: text_or_empty(fields, "slug"),
                description: truncated_description(fields),
                categories: array_or_empty(fields, "categories"),
            }),
            Self::IntroCards => RecordSummary::IntroCard(record),
        }
    }
}

/// Role of a team member: `role` or `position`, else a job `title` when the record is
/// already named by `name`
fn team_role(fields: Option<&Map<String, Value>>) -> String {
    first_text(fields, &["role", "position"])
        .or_else(|| first_text(fields, &["name"]).and_then(|_| first_text(fields, &["title"])))
        .unwrap_or_default()
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the record sequence from raw text.
///
/// Accepts a top-level array or an object whose `data` field is an array. Empty text,
/// invalid JSON and every other shape produce an empty list.
pub fn parse_records(raw: &str) -> Vec<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let parsed: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "raw data is not valid JSON; using an empty record list");
            return Vec::new();
        }
    };

    match parsed {
        Value::Array(records) => records,
        Value::Object(mut fields) => match fields.remove("data") {
            Some(Value::Array(records)) => records,
            _ => {
                debug!("raw data object has no `data` array; using an empty record list");
                Vec::new()
            }
        },
        _ => Vec::new(),
    }
}

/// Normalize raw text into capped, projected summaries of the given kind
pub fn normalize(raw: &str, kind: RecordKind) -> Vec<RecordSummary> {
    let mut records = parse_records(raw);
    if let Some(limit) = kind.max_records() {
        records.truncate(limit);
    }
    records
        .into_iter()
        .map(|record| kind.summarize(record))
        .collect()
}

/// Pretty (2-space) JSON rendering of a summary list
pub fn to_pretty_json(records: &[RecordSummary]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repeated(kind: &str, count: usize) -> String {
        let records: Vec<Value> = (0..count)
            .map(|id| json!({ "id": id, "title": format!("{kind} {id}") }))
            .collect();
        Value::Array(records).to_string()
    }

    #[test]
    fn invalid_text_yields_empty_sequence() {
        assert!(normalize("not json", RecordKind::CaseStudies).is_empty());
        assert!(normalize("", RecordKind::Services).is_empty());
        assert!(normalize("   ", RecordKind::IntroCards).is_empty());
        assert!(normalize("42", RecordKind::Awards).is_empty());
        assert!(normalize(r#"{"items": []}"#, RecordKind::Awards).is_empty());
        assert!(normalize(r#"{"data": {"id": 1}}"#, RecordKind::Awards).is_empty());
    }

    #[test]
    fn wrapped_data_field_is_accepted() {
        let records = normalize(r#"{"data":[{"id":1,"title":"X"}]}"#, RecordKind::CaseStudies);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), &json!(1));
        assert_eq!(records[0].label(), "X");
    }

    #[test]
    fn case_study_description_is_cut_to_limit() {
        let raw = json!([{ "id": 7, "title": "Launch", "description": "a".repeat(500) }]);
        let records = normalize(&raw.to_string(), RecordKind::CaseStudies);
        match &records[0] {
            RecordSummary::CaseStudy(study) => {
                assert_eq!(study.description.chars().count(), DESCRIPTION_LIMIT);
                assert!(study.categories.is_empty());
            }
            other => panic!("unexpected summary: {other:?}"),
        }
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let raw = json!([{ "id": 1, "description": "é".repeat(400) }]);
        let records = normalize(&raw.to_string(), RecordKind::Services);
        match &records[0] {
            RecordSummary::Service(service) => {
                assert_eq!(service.description.chars().count(), DESCRIPTION_LIMIT)
            }
            other => panic!("unexpected summary: {other:?}"),
        }
    }

    #[test]
    fn caps_depend_on_kind() {
        assert_eq!(normalize(&repeated("service", 80), RecordKind::Services).len(), 80);
        assert_eq!(normalize(&repeated("service", 130), RecordKind::Services).len(), 100);
        assert_eq!(normalize(&repeated("member", 80), RecordKind::TeamMembers).len(), 50);
        assert_eq!(normalize(&repeated("award", 51), RecordKind::Awards).len(), 50);
        assert_eq!(normalize(&repeated("card", 250), RecordKind::IntroCards).len(), 250);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let records = normalize(r#"[{"id": 3}]"#, RecordKind::Awards);
        assert_eq!(
            records[0],
            RecordSummary::Award(AwardSummary {
                id: json!(3),
                name: "Untitled Award".to_string(),
                date: String::new(),
                description: String::new(),
            })
        );

        let records = normalize(r#"[{"id": 4, "name": "Ops"}]"#, RecordKind::Services);
        assert_eq!(records[0].label(), "Ops");
    }

    #[test]
    fn team_members_are_named_by_name_with_title_as_role() {
        let raw = json!([
            { "id": 12, "name": "Kim Park", "title": "Creative Director" },
            { "id": 13, "name": "Ana Silva", "title": "Producer", "role": "Head of Film" },
            { "id": 14, "title": "Guest Speaker" }
        ]);
        let records = normalize(&raw.to_string(), RecordKind::TeamMembers);
        assert_eq!(records[0].label(), "Kim Park");
        assert_eq!(records[0].position().as_deref(), Some("Creative Director"));
        assert_eq!(records[1].position().as_deref(), Some("Head of Film"));
        assert_eq!(records[2].label(), "Guest Speaker");
        assert_eq!(records[2].position(), None);
    }

    #[test]
    fn non_object_records_are_tolerated() {
        let records = normalize("[1, \"two\", null]", RecordKind::CaseStudies);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|record| record.id().is_null()));
        assert!(records.iter().all(|record| record.label() == "Untitled"));
    }

    #[test]
    fn intro_cards_pass_through_verbatim() {
        let card = json!({ "id": 9, "name": "Dana", "position": "CEO", "image": "dana.png" });
        let records = normalize(&json!([card.clone()]).to_string(), RecordKind::IntroCards);
        assert_eq!(records, vec![RecordSummary::IntroCard(card)]);
        assert_eq!(records[0].position().as_deref(), Some("CEO"));
    }

    #[test]
    fn service_summary_serializes_in_field_order() {
        let raw = json!([{ "id": 2, "title": "Film", "slug": "film", "extra": true }]);
        let rendered = to_pretty_json(&normalize(&raw.to_string(), RecordKind::Services));
        assert_eq!(
            rendered,
            "[\n  {\n    \"id\": 2,\n    \"title\": \"Film\",\n    \"slug\": \"film\",\n    \"description\": \"\",\n    \"categories\": []\n  }\n]"
        );
    }
}
