//! Component types and their registry entries.
//!
//! A component type is the closed-set tag naming the kind of content block being
//! generated. Every per-type decision in the crate (schemas, prompt texts, data kinds,
//! placeholder scopes) is an exhaustive `match` over [`ComponentType`], so adding a
//! variant is a compile-time-enforced change everywhere it matters.

pub mod schema;

pub use schema::{OutputSchema, schema_for_tag, schema_of, structure_for_tag, structure_of};

use crate::data::RecordKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported component types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    HeroBanner,
    Services,
    TeamMembers,
    CaseStudies,
    /// Legacy type kept in the registry but not offered by the primary selector
    Awards,
    /// Legacy type kept in the registry but not offered by the primary selector
    Background,
}

impl ComponentType {
    /// Every registered type, primary ones first
    pub const ALL: [ComponentType; 6] = [
        Self::HeroBanner,
        Self::Services,
        Self::TeamMembers,
        Self::CaseStudies,
        Self::Awards,
        Self::Background,
    ];

    /// Types exposed by the primary selector
    pub const PRIMARY: [ComponentType; 4] = [
        Self::HeroBanner,
        Self::Services,
        Self::TeamMembers,
        Self::CaseStudies,
    ];

    /// Canonical tag used in configuration, archives and prompts
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeroBanner => "hero-banner",
            Self::Services => "services",
            Self::TeamMembers => "team-members",
            Self::CaseStudies => "case-studies",
            Self::Awards => "awards",
            Self::Background => "background",
        }
    }

    /// Parse a tag; surrounding whitespace and ASCII case are ignored
    pub fn from_tag(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|component| normalized.eq_ignore_ascii_case(component.as_str()))
    }

    /// Whether the primary selector offers this type
    pub fn is_primary(self) -> bool {
        match self {
            Self::HeroBanner | Self::Services | Self::TeamMembers | Self::CaseStudies => true,
            Self::Awards | Self::Background => false,
        }
    }

    /// Title-cased label, e.g. "Team Members"
    pub fn display_name(self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Kind of raw data record this component consumes, if any
    pub fn record_kind(self) -> Option<RecordKind> {
        match self {
            Self::HeroBanner => Some(RecordKind::IntroCards),
            Self::Services => Some(RecordKind::Services),
            Self::TeamMembers => Some(RecordKind::TeamMembers),
            Self::CaseStudies => Some(RecordKind::CaseStudies),
            Self::Awards => Some(RecordKind::Awards),
            Self::Background => None,
        }
    }

    /// Raw data a freshly selected component starts from when no catalog is configured
    pub fn empty_raw_data(self) -> &'static str {
        match self.record_kind() {
            Some(_) => "[]",
            None => "{}",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_parser() {
        for component in ComponentType::ALL {
            assert_eq!(ComponentType::from_tag(component.as_str()), Some(component));
        }
        assert_eq!(
            ComponentType::from_tag("  Team-Members "),
            Some(ComponentType::TeamMembers)
        );
        assert_eq!(ComponentType::from_tag("testimonials"), None);
    }

    #[test]
    fn legacy_types_are_not_primary() {
        assert!(!ComponentType::Awards.is_primary());
        assert!(!ComponentType::Background.is_primary());
        assert!(
            ComponentType::PRIMARY
                .iter()
                .all(|component| component.is_primary())
        );
    }

    #[test]
    fn display_name_is_title_cased() {
        assert_eq!(ComponentType::CaseStudies.display_name(), "Case Studies");
        assert_eq!(ComponentType::HeroBanner.display_name(), "Hero Banner");
    }

    #[test]
    fn serde_uses_kebab_case_tags() -> serde_json::Result<()> {
        let encoded = serde_json::to_string(&ComponentType::HeroBanner)?;
        assert_eq!(encoded, "\"hero-banner\"");
        let decoded: ComponentType = serde_json::from_str("\"case-studies\"")?;
        assert_eq!(decoded, ComponentType::CaseStudies);
        Ok(())
    }
}
