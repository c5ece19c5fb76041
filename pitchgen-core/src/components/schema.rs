//! Output shape descriptions and strict response schemas per component type

use super::ComponentType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Named, strict JSON Schema a generated response must satisfy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    pub name: String,
    pub strict: bool,
    pub schema: Value,
}

impl OutputSchema {
    fn build(tag: &str, properties: Value, required: &[&str]) -> Self {
        Self {
            name: format!("{tag}_response"),
            strict: true,
            schema: json!({
                "type": "object",
                "properties": {
                    "componentData": {
                        "type": "object",
                        "properties": properties,
                        "required": required,
                        "additionalProperties": false
                    }
                },
                "required": ["componentData"],
                "additionalProperties": false
            }),
        }
    }

    /// Required `componentData` sub-fields, in declaration order
    pub fn required_fields(&self) -> Vec<String> {
        self.schema
            .pointer("/properties/componentData/required")
            .and_then(Value::as_array)
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|field| field.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn id_list(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "number" },
        "description": description
    })
}

fn selection_properties(ids_field: &str, noun: &str) -> Value {
    let mut properties = Map::new();
    properties.insert(
        ids_field.to_string(),
        id_list(&format!("Array of selected {noun} IDs")),
    );
    properties.insert(
        "priorityOrder".to_string(),
        id_list(&format!("Array of {noun} IDs in priority order")),
    );
    Value::Object(properties)
}

/// Strict response schema for a component type
pub fn schema_of(component: ComponentType) -> OutputSchema {
    let tag = component.as_str();
    match component {
        ComponentType::HeroBanner => OutputSchema::build(
            tag,
            json!({
                "title": { "type": "string", "description": "Hero title (max 3 words)" },
                "subtitle": { "type": "string", "description": "Hero description (40-60 chars max)" },
                "introCardId": {
                    "type": ["number", "null"],
                    "description": "ID of the selected intro card, or null if none selected"
                },
                "backgroundImage": { "type": "string", "description": "URL of the background image" }
            }),
            &["title", "subtitle", "introCardId", "backgroundImage"],
        ),
        ComponentType::Services => OutputSchema::build(
            tag,
            selection_properties("selectedServiceIds", "service"),
            &["selectedServiceIds", "priorityOrder"],
        ),
        ComponentType::Awards => OutputSchema::build(
            tag,
            selection_properties("selectedAwardIds", "award"),
            &["selectedAwardIds", "priorityOrder"],
        ),
        ComponentType::TeamMembers => OutputSchema::build(
            tag,
            selection_properties("selectedMemberIds", "team member"),
            &["selectedMemberIds", "priorityOrder"],
        ),
        ComponentType::CaseStudies => OutputSchema::build(
            tag,
            selection_properties("selectedStudyIds", "case study"),
            &["selectedStudyIds", "priorityOrder"],
        ),
        ComponentType::Background => OutputSchema::build(
            tag,
            json!({
                "heading": { "type": "string", "description": "Section heading" },
                "text": { "type": "string", "description": "Descriptive text (80-150 chars)" }
            }),
            &["heading", "text"],
        ),
    }
}

/// Schema lookup by raw tag. Unknown tags get a schema with no required fields
/// instead of an error, since the set of tags may grow.
pub fn schema_for_tag(tag: &str) -> OutputSchema {
    match ComponentType::from_tag(tag) {
        Some(component) => schema_of(component),
        None => OutputSchema::build(tag.trim(), json!({}), &[]),
    }
}

/// Human-readable shape of the expected `componentData`. Documentation only.
pub fn structure_of(component: ComponentType) -> &'static str {
    match component {
        ComponentType::HeroBanner => {
            r#"{
  "title": "string (max 3 words)",
  "subtitle": "string",
  "introCardId": "number (optional)",
  "backgroundImage": "string"
}"#
        }
        ComponentType::Services => {
            r#"{
  "selectedServiceIds": [number],
  "priorityOrder": [number]
}"#
        }
        ComponentType::TeamMembers => {
            r#"{
  "selectedMemberIds": [number],
  "priorityOrder": [number]
}"#
        }
        ComponentType::CaseStudies => {
            r#"{
  "selectedStudyIds": [number],
  "priorityOrder": [number]
}"#
        }
        ComponentType::Awards => {
            r#"{
  "selectedAwardIds": [number],
  "priorityOrder": [number]
}"#
        }
        ComponentType::Background => {
            r#"{
  "heading": "string",
  "text": "string (80-150 chars)"
}"#
        }
    }
}

/// Shape description by raw tag; unknown tags describe an empty object
pub fn structure_for_tag(tag: &str) -> &'static str {
    ComponentType::from_tag(tag).map_or("{}", structure_of)
}
