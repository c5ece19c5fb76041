//! Canonical (unexpanded) system and user templates per component type

use super::context::ClientContext;
use super::templates::PromptTemplates;
use crate::components::ComponentType;

/// A freshly generated template pair, tokens intact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPrompts {
    pub system: String,
    pub user: String,
}

/// System template for a component type.
///
/// The client context is accepted so callers can pass the full input set, but no
/// system template reads it: the text depends on the type alone.
pub fn system_prompt_for(component: ComponentType, _context: &ClientContext) -> String {
    PromptTemplates::system_prompt(component).to_string()
}

/// User template for a component type.
///
/// Raw data is never baked in here; it reaches the text only through placeholder
/// expansion at dispatch time.
pub fn user_prompt_for(
    component: ComponentType,
    _context: &ClientContext,
    _raw_data: Option<&str>,
) -> String {
    match PromptTemplates::user_template(component) {
        Some(template) => template.to_string(),
        None => PromptTemplates::fallback_user_template(component.as_str()),
    }
}

/// Both templates for a component type
pub fn generate(
    component: ComponentType,
    context: &ClientContext,
    raw_data: Option<&str>,
) -> GeneratedPrompts {
    GeneratedPrompts {
        system: system_prompt_for(component, context),
        user: user_prompt_for(component, context, raw_data),
    }
}

/// System template by raw tag; tags outside the registry get the strategist persona
pub fn system_prompt_for_tag(tag: &str, context: &ClientContext) -> String {
    match ComponentType::from_tag(tag) {
        Some(component) => system_prompt_for(component, context),
        None => PromptTemplates::strategist_system_prompt().to_string(),
    }
}

/// User template by raw tag; tags outside the registry get the generic skeleton
pub fn user_prompt_for_tag(tag: &str, context: &ClientContext, raw_data: Option<&str>) -> String {
    match ComponentType::from_tag(tag) {
        Some(component) => user_prompt_for(component, context, raw_data),
        None => PromptTemplates::fallback_user_template(tag.trim()),
    }
}
