//! Resolution of generated responses against the records they reference.
//!
//! A response names records by id. Ids that do not appear in the normalized raw data
//! are reported as missing entries, never as errors.

use crate::components::ComponentType;
use crate::data::{RecordKind, RecordSummary, format_id, normalize, numeric_id};
use crate::prompts::intro_card_id;
use serde_json::Value;
use std::fmt;

/// One referenced record
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEntry {
    Found { id: Value, label: String },
    Missing { id: Value },
}

impl SelectionEntry {
    fn resolve(id: &Value, records: &[RecordSummary]) -> Self {
        let found = numeric_id(id).and_then(|wanted| {
            records
                .iter()
                .find(|record| record.numeric_id() == Some(wanted))
        });
        match found {
            Some(record) => Self::Found {
                id: id.clone(),
                label: record.label(),
            },
            None => Self::Missing { id: id.clone() },
        }
    }

    pub fn id(&self) -> &Value {
        match self {
            Self::Found { id, .. } | Self::Missing { id } => id,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

impl fmt::Display for SelectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { id, label } => write!(f, "#{} {label}", format_id(id)),
            Self::Missing { id } => write!(f, "#{} (not found)", format_id(id)),
        }
    }
}

/// A generated response, resolved for display
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionReport {
    /// Ranked selection for the list-shaped types
    List {
        component: ComponentType,
        entries: Vec<SelectionEntry>,
    },
    Hero {
        title: String,
        subtitle: String,
        background_image: String,
        /// `None` when the response selected no intro card
        intro_card: Option<SelectionEntry>,
    },
    Background {
        heading: String,
        text: String,
    },
    /// Content that is not a JSON object
    Unparsed { raw: String },
}

impl SelectionReport {
    pub fn missing_count(&self) -> usize {
        match self {
            Self::List { entries, .. } => entries.iter().filter(|entry| entry.is_missing()).count(),
            Self::Hero { intro_card, .. } => {
                usize::from(intro_card.as_ref().is_some_and(SelectionEntry::is_missing))
            }
            Self::Background { .. } | Self::Unparsed { .. } => 0,
        }
    }
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List { component, entries } => {
                writeln!(f, "{} ({} selected)", component.display_name(), entries.len())?;
                for (rank, entry) in entries.iter().enumerate() {
                    writeln!(f, "{:>3}. {entry}", rank + 1)?;
                }
                Ok(())
            }
            Self::Hero {
                title,
                subtitle,
                background_image,
                intro_card,
            } => {
                writeln!(f, "Title: {title}")?;
                writeln!(f, "Subtitle: {subtitle}")?;
                if !background_image.is_empty() {
                    writeln!(f, "Background image: {background_image}")?;
                }
                match intro_card {
                    Some(entry) => writeln!(f, "Intro card: {entry}"),
                    None => writeln!(f, "Intro card: none selected"),
                }
            }
            Self::Background { heading, text } => {
                writeln!(f, "{heading}")?;
                writeln!(f, "{text}")
            }
            Self::Unparsed { raw } => writeln!(f, "{raw}"),
        }
    }
}

/// Field holding the selected ids for a list-shaped type
pub fn selected_ids_field(component: ComponentType) -> Option<&'static str> {
    match component {
        ComponentType::Services => Some("selectedServiceIds"),
        ComponentType::TeamMembers => Some("selectedMemberIds"),
        ComponentType::CaseStudies => Some("selectedStudyIds"),
        ComponentType::Awards => Some("selectedAwardIds"),
        ComponentType::HeroBanner | ComponentType::Background => None,
    }
}

/// Resolve a response for `component` against the raw data it was generated from
pub fn resolve_selection(
    component: ComponentType,
    content: &str,
    raw_data: &str,
) -> SelectionReport {
    let parsed = match serde_json::from_str::<Value>(content) {
        Ok(value) if value.is_object() => value,
        _ => {
            return SelectionReport::Unparsed {
                raw: content.to_string(),
            };
        }
    };
    let data = component_data(&parsed);

    match component {
        ComponentType::HeroBanner => {
            let cards = normalize(raw_data, RecordKind::IntroCards);
            SelectionReport::Hero {
                title: text_field(data, "title"),
                subtitle: text_field(data, "subtitle"),
                background_image: text_field(data, "backgroundImage"),
                intro_card: intro_card_id(content).map(|id| SelectionEntry::resolve(&id, &cards)),
            }
        }
        ComponentType::Background => SelectionReport::Background {
            heading: text_field(data, "heading"),
            text: text_field(data, "text"),
        },
        ComponentType::Services
        | ComponentType::TeamMembers
        | ComponentType::CaseStudies
        | ComponentType::Awards => {
            let records = component
                .record_kind()
                .map(|kind| normalize(raw_data, kind))
                .unwrap_or_default();
            let entries = ranked_ids(data, selected_ids_field(component))
                .iter()
                .map(|id| SelectionEntry::resolve(id, &records))
                .collect();
            SelectionReport::List { component, entries }
        }
    }
}

fn component_data(parsed: &Value) -> &Value {
    match parsed.get("componentData") {
        Some(data) if data.is_object() => data,
        _ => parsed,
    }
}

/// `priorityOrder` when present and non-empty, else the plain selection
fn ranked_ids(data: &Value, selected_field: Option<&str>) -> Vec<Value> {
    let list = |field: &str| {
        data.get(field)
            .and_then(Value::as_array)
            .filter(|ids| !ids.is_empty())
            .cloned()
    };
    list("priorityOrder")
        .or_else(|| selected_field.and_then(list))
        .unwrap_or_default()
}

fn text_field(data: &Value, field: &str) -> String {
    data.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
