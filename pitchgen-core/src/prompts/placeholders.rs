//! Placeholder tokens recognized inside prompt templates

use crate::components::ComponentType;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TOKEN_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").ok());

pub(crate) fn token_pattern() -> Option<&'static Regex> {
    TOKEN_PATTERN.as_ref()
}

/// A named `{{NAME}}` token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    Context,
    TeamMembers,
    SelectedIntroMember,
    CaseStudies,
    Awards,
    Services,
    IntroCards,
}

impl Placeholder {
    pub const ALL: [Placeholder; 7] = [
        Placeholder::Context,
        Placeholder::TeamMembers,
        Placeholder::SelectedIntroMember,
        Placeholder::CaseStudies,
        Placeholder::Awards,
        Placeholder::Services,
        Placeholder::IntroCards,
    ];

    /// Name between the braces; case-sensitive
    pub fn name(self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::TeamMembers => "TEAM_MEMBERS",
            Self::SelectedIntroMember => "SELECTED_INTRO_MEMBER",
            Self::CaseStudies => "CASE_STUDIES",
            Self::Awards => "AWARDS",
            Self::Services => "SERVICES",
            Self::IntroCards => "INTRO_CARDS",
        }
    }

    /// Full token text, braces included
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|placeholder| placeholder.name() == name)
    }

    /// Whether the token is substituted for the given component type.
    /// `context` is available everywhere.
    pub fn is_available_for(self, component: ComponentType) -> bool {
        match self {
            Self::Context => true,
            Self::TeamMembers | Self::SelectedIntroMember => {
                component == ComponentType::TeamMembers
            }
            Self::CaseStudies => component == ComponentType::CaseStudies,
            Self::Awards => component == ComponentType::Awards,
            Self::Services => component == ComponentType::Services,
            Self::IntroCards => component == ComponentType::HeroBanner,
        }
    }

    /// Tokens in scope for a component type, `context` first
    pub fn available_for(component: ComponentType) -> Vec<Placeholder> {
        Self::ALL
            .into_iter()
            .filter(|placeholder| placeholder.is_available_for(component))
            .collect()
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}}}}}", self.name())
    }
}

/// Every distinct `{{NAME}}` appearing in a template, in order of first appearance.
/// Unrecognized names are included.
pub fn template_tokens(template: &str) -> Vec<String> {
    let Some(pattern) = token_pattern() else {
        return Vec::new();
    };
    let names: IndexSet<&str> = pattern
        .captures_iter(template)
        .filter_map(|captures| captures.get(1).map(|name| name.as_str()))
        .collect();
    names.into_iter().map(str::to_string).collect()
}
