//! Reduced record summaries inlined into prompts

use serde::Serialize;
use serde_json::{Map, Value};

/// Maximum characters kept from a record description
pub const DESCRIPTION_LIMIT: usize = 300;

static NULL_ID: Value = Value::Null;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMemberSummary {
    #[serde(skip_serializing_if = "Value::is_null")]
    pub id: Value,
    pub name: String,
    pub role: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudySummary {
    #[serde(skip_serializing_if = "Value::is_null")]
    pub id: Value,
    pub title: String,
    pub description: String,
    pub categories: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardSummary {
    #[serde(skip_serializing_if = "Value::is_null")]
    pub id: Value,
    pub name: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    #[serde(skip_serializing_if = "Value::is_null")]
    pub id: Value,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub categories: Vec<Value>,
}

/// One normalized record. Intro cards are carried verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordSummary {
    TeamMember(TeamMemberSummary),
    CaseStudy(CaseStudySummary),
    Award(AwardSummary),
    Service(ServiceSummary),
    IntroCard(Value),
}

impl RecordSummary {
    /// Record id as supplied; `Value::Null` when absent
    pub fn id(&self) -> &Value {
        match self {
            Self::TeamMember(record) => &record.id,
            Self::CaseStudy(record) => &record.id,
            Self::Award(record) => &record.id,
            Self::Service(record) => &record.id,
            Self::IntroCard(card) => card.get("id").unwrap_or(&NULL_ID),
        }
    }

    pub fn numeric_id(&self) -> Option<f64> {
        numeric_id(self.id())
    }

    /// Display name used in listings and selection reports
    pub fn label(&self) -> String {
        match self {
            Self::TeamMember(record) => record.name.clone(),
            Self::CaseStudy(record) => record.title.clone(),
            Self::Award(record) => record.name.clone(),
            Self::Service(record) => record.title.clone(),
            Self::IntroCard(card) => {
                let fields = card.as_object();
                first_text(fields, &["name", "title"]).unwrap_or_else(|| "Unknown".to_string())
            }
        }
    }

    /// Position or role line, where the record has one
    pub fn position(&self) -> Option<String> {
        match self {
            Self::TeamMember(record) if !record.role.is_empty() => Some(record.role.clone()),
            Self::IntroCard(card) => first_text(card.as_object(), &["position", "role"]),
            _ => None,
        }
    }
}

/// Interpret an id as a number; numeric strings are accepted
pub fn numeric_id(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Render an id for display; absent ids show as `?`
pub fn format_id(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "?".to_string(),
        other => other.to_string(),
    }
}

pub(crate) fn first_text(fields: Option<&Map<String, Value>>, keys: &[&str]) -> Option<String> {
    let fields = fields?;
    keys.iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

pub(crate) fn text_or_empty(fields: Option<&Map<String, Value>>, key: &str) -> String {
    first_text(fields, &[key]).unwrap_or_default()
}

pub(crate) fn truncated_description(fields: Option<&Map<String, Value>>) -> String {
    text_or_empty(fields, "description")
        .chars()
        .take(DESCRIPTION_LIMIT)
        .collect()
}

pub(crate) fn array_or_empty(fields: Option<&Map<String, Value>>, key: &str) -> Vec<Value> {
    fields
        .and_then(|fields| fields.get(key))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

pub(crate) fn id_of(fields: Option<&Map<String, Value>>) -> Value {
    fields
        .and_then(|fields| fields.get("id"))
        .cloned()
        .unwrap_or(Value::Null)
}
