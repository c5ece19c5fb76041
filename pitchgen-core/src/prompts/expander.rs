//! Placeholder substitution.
//!
//! Expansion happens once, right before dispatch, and its output is never stored back
//! into the tracked templates. It cannot fail: malformed data becomes `[]`, a missing
//! context becomes the empty string, and a captain that cannot be resolved becomes
//! [`NONE_SELECTED`].

use super::context::ClientContext;
use super::lookup::ResultLookup;
use super::placeholders::{Placeholder, template_tokens, token_pattern};
use crate::components::ComponentType;
use crate::data::{RecordKind, RecordSummary, format_id, normalize, numeric_id, to_pretty_json};
use regex::Captures;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Rendered for `{{SELECTED_INTRO_MEMBER}}` when no captain can be resolved
pub const NONE_SELECTED: &str = "None selected";

/// Values bound to placeholder tokens, already serialized
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<Placeholder, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, placeholder: Placeholder, value: impl Into<String>) -> Self {
        self.bind(placeholder, value);
        self
    }

    pub fn bind(&mut self, placeholder: Placeholder, value: impl Into<String>) {
        self.values.insert(placeholder, value.into());
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }

    /// Replacement text for a token: the bound value, else `""` for context and `[]`
    /// for data tokens
    fn replacement(&self, placeholder: Placeholder) -> &str {
        match (self.get(placeholder), placeholder) {
            (Some(value), _) => value,
            (None, Placeholder::Context) => "",
            (None, _) => "[]",
        }
    }
}

/// Replace every in-scope token in `template` with its binding.
///
/// With no component only `{{context}}` is in scope. Tokens outside the scope and
/// unrecognized names stay verbatim. Substitution is a single pass, so text inserted
/// for one token is never scanned for further tokens.
pub fn expand_template(
    template: &str,
    component: Option<ComponentType>,
    bindings: &Bindings,
) -> String {
    let Some(pattern) = token_pattern() else {
        return template.to_string();
    };

    pattern
        .replace_all(template, |captures: &Captures<'_>| {
            let whole = captures.get(0).map_or("", |token| token.as_str());
            let placeholder = captures
                .get(1)
                .and_then(|name| Placeholder::from_name(name.as_str()));
            match placeholder {
                Some(placeholder) if in_scope(placeholder, component) => {
                    bindings.replacement(placeholder).to_string()
                }
                _ => whole.to_string(),
            }
        })
        .into_owned()
}

fn in_scope(placeholder: Placeholder, component: Option<ComponentType>) -> bool {
    match component {
        Some(component) => placeholder.is_available_for(component),
        None => placeholder == Placeholder::Context,
    }
}

/// Expands templates for one component type from the current inputs.
///
/// Bindings are derived on each call and only for the tokens the template actually
/// contains; the captain in particular is looked up afresh every time.
pub struct PlaceholderExpander<'a> {
    component: ComponentType,
    context: &'a ClientContext,
    raw_data: &'a str,
    lookup: &'a dyn ResultLookup,
}

impl<'a> PlaceholderExpander<'a> {
    pub fn new(
        component: ComponentType,
        context: &'a ClientContext,
        raw_data: &'a str,
        lookup: &'a dyn ResultLookup,
    ) -> Self {
        Self {
            component,
            context,
            raw_data,
            lookup,
        }
    }

    pub fn expand(&self, template: &str) -> String {
        expand_template(template, Some(self.component), &self.bindings_for(template))
    }

    /// Bindings for the in-scope tokens present in `template`
    pub fn bindings_for(&self, template: &str) -> Bindings {
        let mut bindings = Bindings::new();
        for name in template_tokens(template) {
            let Some(placeholder) = Placeholder::from_name(&name) else {
                continue;
            };
            if placeholder.is_available_for(self.component) {
                bindings.bind(placeholder, self.value_of(placeholder));
            }
        }
        bindings
    }

    fn value_of(&self, placeholder: Placeholder) -> String {
        match placeholder {
            Placeholder::Context => self.context.as_str().to_string(),
            Placeholder::TeamMembers => self.records(RecordKind::TeamMembers),
            Placeholder::SelectedIntroMember => selected_intro_member(self.lookup, self.raw_data),
            Placeholder::CaseStudies => self.records(RecordKind::CaseStudies),
            Placeholder::Awards => self.records(RecordKind::Awards),
            Placeholder::Services => self.records(RecordKind::Services),
            Placeholder::IntroCards => self.records(RecordKind::IntroCards),
        }
    }

    fn records(&self, kind: RecordKind) -> String {
        to_pretty_json(&normalize(self.raw_data, kind))
    }
}

/// The `introCardId` chosen by a hero-banner response, nested under `componentData`
/// or at the top level
pub fn intro_card_id(content: &str) -> Option<Value> {
    let parsed: Value = serde_json::from_str(content).ok()?;
    parsed
        .pointer("/componentData/introCardId")
        .filter(|id| !id.is_null())
        .or_else(|| parsed.get("introCardId").filter(|id| !id.is_null()))
        .cloned()
}

/// One-line description of the captain chosen by the latest hero-banner result.
///
/// The id is resolved by numeric equality against the intro cards stored with that
/// result, then against `team_roster` (raw team-members data).
pub fn selected_intro_member(lookup: &dyn ResultLookup, team_roster: &str) -> String {
    let Some(hero) = lookup.latest_result_for(ComponentType::HeroBanner) else {
        debug!("no hero-banner result available; captain left unselected");
        return NONE_SELECTED.to_string();
    };
    let Some(card_id) = intro_card_id(&hero.content) else {
        debug!("hero-banner result carries no introCardId");
        return NONE_SELECTED.to_string();
    };
    let Some(wanted) = numeric_id(&card_id) else {
        debug!(id = %card_id, "introCardId is not numeric");
        return NONE_SELECTED.to_string();
    };

    let intro_cards = normalize(&hero.raw_data, RecordKind::IntroCards);
    let roster = normalize(team_roster, RecordKind::TeamMembers);
    match find_record(&intro_cards, wanted).or_else(|| find_record(&roster, wanted)) {
        Some(record) => describe_captain(record),
        None => {
            debug!(id = wanted, "introCardId not found among intro cards or team roster");
            NONE_SELECTED.to_string()
        }
    }
}

fn find_record(records: &[RecordSummary], wanted: f64) -> Option<&RecordSummary> {
    records
        .iter()
        .find(|record| record.numeric_id() == Some(wanted))
}

fn describe_captain(record: &RecordSummary) -> String {
    format!(
        "ID: {}, Name: {}, Position: {}",
        format_id(record.id()),
        record.label(),
        record.position().unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::lookup::{GenerationResult, NoResults};
    use serde_json::json;

    fn intro_cards() -> String {
        json!([
            { "id": 4, "name": "Ana Ruiz", "position": "Head of Production" },
            { "id": 7, "name": "Sam Lee", "position": "Chief Executive Officer" }
        ])
        .to_string()
    }

    fn hero_lookup(content: &'static str) -> impl Fn(ComponentType) -> Option<GenerationResult> {
        move |component| {
            (component == ComponentType::HeroBanner)
                .then(|| GenerationResult::new(component, content, intro_cards()))
        }
    }

    #[test]
    fn token_free_text_is_unchanged() {
        let text = "No tokens here, just {braces} and {{ spaced }} text.";
        let bindings = Bindings::new().with(Placeholder::Context, "ctx");
        assert_eq!(
            expand_template(text, Some(ComponentType::Services), &bindings),
            text
        );
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let bindings = Bindings::new()
            .with(Placeholder::Context, "Acme")
            .with(Placeholder::Services, "[1]");
        let expanded = expand_template(
            "{{context}} / {{SERVICES}} / {{context}} / {{SERVICES}}",
            Some(ComponentType::Services),
            &bindings,
        );
        assert_eq!(expanded, "Acme / [1] / Acme / [1]");
    }

    #[test]
    fn out_of_scope_and_unknown_tokens_stay_verbatim() {
        let bindings = Bindings::new().with(Placeholder::CaseStudies, "[2]");
        let expanded = expand_template(
            "{{CASE_STUDIES}} {{AWARDS}} {{MYSTERY}}",
            Some(ComponentType::Services),
            &bindings,
        );
        assert_eq!(expanded, "{{CASE_STUDIES}} {{AWARDS}} {{MYSTERY}}");
    }

    #[test]
    fn unbound_tokens_get_empty_defaults() {
        let expanded = expand_template(
            "[{{context}}] {{TEAM_MEMBERS}}",
            Some(ComponentType::TeamMembers),
            &Bindings::new(),
        );
        assert_eq!(expanded, "[] []");
    }

    #[test]
    fn inserted_text_is_not_rescanned() {
        let bindings = Bindings::new().with(Placeholder::Context, "literal {{SERVICES}}");
        let expanded = expand_template(
            "{{context}}",
            Some(ComponentType::Services),
            &bindings,
        );
        assert_eq!(expanded, "literal {{SERVICES}}");
    }

    #[test]
    fn untyped_expansion_only_knows_context() {
        let bindings = Bindings::new()
            .with(Placeholder::Context, "ctx")
            .with(Placeholder::Services, "[3]");
        assert_eq!(
            expand_template("{{context}} {{SERVICES}}", None, &bindings),
            "ctx {{SERVICES}}"
        );
    }

    #[test]
    fn expander_inlines_normalized_records() {
        let context = ClientContext::from("Bank rebrand");
        let raw = json!({ "data": [{ "id": 1, "title": "Film", "description": "x".repeat(400) }] })
            .to_string();
        let expander =
            PlaceholderExpander::new(ComponentType::CaseStudies, &context, &raw, &NoResults);
        let expanded = expander.expand("{{context}}\n{{CASE_STUDIES}}");

        assert!(expanded.starts_with("Bank rebrand\n["));
        assert!(expanded.contains("\"title\": \"Film\""));
        assert!(expanded.contains(&"x".repeat(300)));
        assert!(!expanded.contains(&"x".repeat(301)));
    }

    #[test]
    fn expander_binds_only_present_tokens() {
        let context = ClientContext::default();
        let expander =
            PlaceholderExpander::new(ComponentType::TeamMembers, &context, "[]", &NoResults);
        let bindings = expander.bindings_for("{{TEAM_MEMBERS}}");
        assert_eq!(bindings.get(Placeholder::TeamMembers), Some("[]"));
        assert_eq!(bindings.get(Placeholder::SelectedIntroMember), None);
        assert_eq!(bindings.get(Placeholder::Context), None);
    }

    #[test]
    fn captain_is_none_selected_without_hero_result() {
        assert_eq!(selected_intro_member(&NoResults, "[]"), NONE_SELECTED);
    }

    #[test]
    fn captain_resolves_nested_intro_card_id() {
        let lookup = hero_lookup(r#"{"componentData":{"title":"Bold","introCardId":7}}"#);
        assert_eq!(
            selected_intro_member(&lookup, "[]"),
            "ID: 7, Name: Sam Lee, Position: Chief Executive Officer"
        );
    }

    #[test]
    fn captain_resolves_top_level_and_string_ids() {
        let lookup = hero_lookup(r#"{"introCardId":"4"}"#);
        let captain = selected_intro_member(&lookup, "[]");
        assert!(captain.contains("ID: 4"));
        assert!(captain.contains("Ana Ruiz"));
        assert!(captain.contains("Head of Production"));
    }

    #[test]
    fn captain_falls_back_to_team_roster() {
        let lookup = hero_lookup(r#"{"componentData":{"introCardId":12}}"#);
        let roster =
            json!([{ "id": 12, "name": "Kim Park", "role": "Creative Director" }]).to_string();
        assert_eq!(
            selected_intro_member(&lookup, &roster),
            "ID: 12, Name: Kim Park, Position: Creative Director"
        );
    }

    #[test]
    fn roster_job_title_does_not_replace_the_name() {
        let lookup = hero_lookup(r#"{"componentData":{"introCardId":12}}"#);
        let roster =
            json!([{ "id": 12, "name": "Kim Park", "title": "Creative Director" }]).to_string();
        assert_eq!(
            selected_intro_member(&lookup, &roster),
            "ID: 12, Name: Kim Park, Position: Creative Director"
        );
    }

    #[test]
    fn unresolvable_captain_is_none_selected() {
        for content in [
            r#"{"componentData":{"introCardId":99}}"#,
            r#"{"componentData":{"introCardId":null}}"#,
            r#"{"componentData":{"title":"No card"}}"#,
            "not json",
        ] {
            assert_eq!(
                selected_intro_member(&hero_lookup(content), "[]"),
                NONE_SELECTED,
                "content: {content}"
            );
        }
    }

    #[test]
    fn captain_is_looked_up_at_expansion_time() {
        use std::cell::RefCell;

        let latest: RefCell<Option<GenerationResult>> = RefCell::new(None);
        let lookup = |component: ComponentType| {
            latest
                .borrow()
                .clone()
                .filter(|result| result.component == component)
        };
        let context = ClientContext::default();
        let expander =
            PlaceholderExpander::new(ComponentType::TeamMembers, &context, "[]", &lookup);

        assert_eq!(expander.expand("{{SELECTED_INTRO_MEMBER}}"), NONE_SELECTED);

        latest.replace(Some(GenerationResult::new(
            ComponentType::HeroBanner,
            r#"{"componentData":{"introCardId":4}}"#,
            intro_cards(),
        )));
        assert!(
            expander
                .expand("{{SELECTED_INTRO_MEMBER}}")
                .starts_with("ID: 4, Name: Ana Ruiz")
        );
    }
}
