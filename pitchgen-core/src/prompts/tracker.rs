//! Auto/Edited ownership tracking for the system and user templates.
//!
//! Each template carries a [`TemplateState`]. The full transition table lives in
//! [`TemplateState::next`]; [`PromptEditor`] feeds it events and applies the result.

use super::context::ClientContext;
use super::generator::{system_prompt_for, user_prompt_for};
use crate::components::ComponentType;
use crate::history::SavedRun;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Ownership of a template's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateState {
    /// Text equals the latest generator output
    #[default]
    Auto,
    /// Text was written by the caller and is left alone on input changes
    Edited,
}

/// Something that happened to a template or its inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateEvent {
    ManualEdit,
    Reset,
    ComponentChanged,
    InputsChanged,
}

/// Outcome of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: TemplateState,
    /// Whether the template text is replaced (by the caller's text for a manual edit,
    /// by generator output otherwise)
    pub rewrite: bool,
}

impl TemplateState {
    pub fn next(self, event: TemplateEvent) -> Transition {
        match (self, event) {
            (_, TemplateEvent::ManualEdit) => Transition {
                state: Self::Edited,
                rewrite: true,
            },
            (_, TemplateEvent::Reset | TemplateEvent::ComponentChanged) => Transition {
                state: Self::Auto,
                rewrite: true,
            },
            (Self::Auto, TemplateEvent::InputsChanged) => Transition {
                state: Self::Auto,
                rewrite: true,
            },
            (Self::Edited, TemplateEvent::InputsChanged) => Transition {
                state: Self::Edited,
                rewrite: false,
            },
        }
    }

    pub fn is_auto(self) -> bool {
        self == Self::Auto
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Edited => "edited",
        }
    }
}

impl fmt::Display for TemplateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A template text together with its ownership state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedTemplate {
    text: String,
    state: TemplateState,
}

impl TrackedTemplate {
    pub fn auto(text: String) -> Self {
        Self {
            text,
            state: TemplateState::Auto,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> TemplateState {
        self.state
    }

    /// Apply an event. `replacement` is only called when the transition rewrites the
    /// text; it supplies the caller's text for [`TemplateEvent::ManualEdit`] and fresh
    /// generator output for every other event. Returns whether the text was rewritten.
    pub fn apply(&mut self, event: TemplateEvent, replacement: impl FnOnce() -> String) -> bool {
        let transition = self.state.next(event);
        if transition.rewrite {
            self.text = replacement();
        }
        self.state = transition.state;
        transition.rewrite
    }
}

/// Snapshot of both templates and their flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPair {
    pub system_text: String,
    pub user_text: String,
    pub system_is_auto: bool,
    pub user_is_auto: bool,
}

/// Which templates an input change regenerated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regenerated {
    pub system: bool,
    pub user: bool,
}

impl Regenerated {
    pub fn any(self) -> bool {
        self.system || self.user
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InputSnapshot {
    context: ClientContext,
    raw_data: String,
}

/// Template pair for the selected component, kept in sync with its inputs until the
/// caller takes a template over.
#[derive(Debug, Clone)]
pub struct PromptEditor {
    component: ComponentType,
    inputs: InputSnapshot,
    system: TrackedTemplate,
    user: TrackedTemplate,
}

impl PromptEditor {
    pub fn new(
        component: ComponentType,
        context: ClientContext,
        raw_data: impl Into<String>,
    ) -> Self {
        let inputs = InputSnapshot {
            context,
            raw_data: raw_data.into(),
        };
        Self {
            component,
            system: TrackedTemplate::auto(generate_system(component, &inputs)),
            user: TrackedTemplate::auto(generate_user(component, &inputs)),
            inputs,
        }
    }

    pub fn component(&self) -> ComponentType {
        self.component
    }

    pub fn context(&self) -> &ClientContext {
        &self.inputs.context
    }

    pub fn raw_data(&self) -> &str {
        &self.inputs.raw_data
    }

    pub fn system_text(&self) -> &str {
        self.system.text()
    }

    pub fn user_text(&self) -> &str {
        self.user.text()
    }

    pub fn system_state(&self) -> TemplateState {
        self.system.state()
    }

    pub fn user_state(&self) -> TemplateState {
        self.user.state()
    }

    pub fn pair(&self) -> PromptPair {
        PromptPair {
            system_text: self.system.text().to_string(),
            user_text: self.user.text().to_string(),
            system_is_auto: self.system.state().is_auto(),
            user_is_auto: self.user.state().is_auto(),
        }
    }

    /// Switch to another component type.
    ///
    /// Both templates are regenerated and return to `Auto` whatever their state, and the
    /// raw data is replaced with `raw_data` (the new type's starting data). Selecting
    /// the current type again changes nothing and returns `false`.
    pub fn select_component(
        &mut self,
        component: ComponentType,
        raw_data: impl Into<String>,
    ) -> bool {
        if component == self.component {
            return false;
        }
        debug!(
            from = %self.component,
            to = %component,
            "component changed; regenerating both templates"
        );
        self.component = component;
        self.inputs.raw_data = raw_data.into();
        let inputs = &self.inputs;
        self.system.apply(TemplateEvent::ComponentChanged, || {
            generate_system(component, inputs)
        });
        self.user.apply(TemplateEvent::ComponentChanged, || {
            generate_user(component, inputs)
        });
        true
    }

    /// Observe new context and raw data.
    ///
    /// The comparison against the previous snapshot happens before the snapshot is
    /// replaced. `Auto` templates are regenerated from the new inputs when anything
    /// changed; `Edited` templates keep their text.
    pub fn update_inputs(
        &mut self,
        context: ClientContext,
        raw_data: impl Into<String>,
    ) -> Regenerated {
        let next = InputSnapshot {
            context,
            raw_data: raw_data.into(),
        };
        if next == self.inputs {
            return Regenerated::default();
        }

        let component = self.component;
        let regenerated = Regenerated {
            system: self.system.apply(TemplateEvent::InputsChanged, || {
                generate_system(component, &next)
            }),
            user: self.user.apply(TemplateEvent::InputsChanged, || {
                generate_user(component, &next)
            }),
        };
        debug!(
            component = %component,
            system = regenerated.system,
            user = regenerated.user,
            "inputs changed"
        );
        self.inputs = next;
        regenerated
    }

    pub fn set_context(&mut self, context: ClientContext) -> Regenerated {
        let raw_data = self.inputs.raw_data.clone();
        self.update_inputs(context, raw_data)
    }

    pub fn set_raw_data(&mut self, raw_data: impl Into<String>) -> Regenerated {
        let context = self.inputs.context.clone();
        self.update_inputs(context, raw_data)
    }

    pub fn edit_system(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.system.apply(TemplateEvent::ManualEdit, || text);
    }

    pub fn edit_user(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.user.apply(TemplateEvent::ManualEdit, || text);
    }

    pub fn reset_system(&mut self) {
        let (component, inputs) = (self.component, &self.inputs);
        self.system
            .apply(TemplateEvent::Reset, || generate_system(component, inputs));
    }

    pub fn reset_user(&mut self) {
        let (component, inputs) = (self.component, &self.inputs);
        self.user
            .apply(TemplateEvent::Reset, || generate_user(component, inputs));
    }

    /// Load a saved run.
    ///
    /// Component, context, raw data and both texts are taken from the run without
    /// regenerating anything. Each template is `Edited` exactly when its stored text
    /// differs from what the generator produces for the stored inputs.
    pub fn restore(&mut self, run: &SavedRun) {
        let inputs = InputSnapshot {
            context: run.context.clone(),
            raw_data: run.raw_data.clone(),
        };
        let component = run.component;
        self.system = restored(&run.system_prompt, generate_system(component, &inputs));
        self.user = restored(&run.user_prompt, generate_user(component, &inputs));
        self.component = component;
        self.inputs = inputs;
        debug!(
            component = %component,
            system = %self.system.state(),
            user = %self.user.state(),
            "restored saved run"
        );
    }
}

fn restored(stored: &str, generated: String) -> TrackedTemplate {
    if stored == generated {
        TrackedTemplate::auto(generated)
    } else {
        TrackedTemplate {
            text: stored.to_string(),
            state: TemplateState::Edited,
        }
    }
}

fn generate_system(component: ComponentType, inputs: &InputSnapshot) -> String {
    system_prompt_for(component, &inputs.context)
}

fn generate_user(component: ComponentType, inputs: &InputSnapshot) -> String {
    let raw_data = component.record_kind().map(|_| inputs.raw_data.as_str());
    user_prompt_for(component, &inputs.context, raw_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::lookup::GenerationResult;
    use chrono::Utc;

    fn editor() -> PromptEditor {
        PromptEditor::new(ComponentType::Services, ClientContext::from("Retail"), "[]")
    }

    #[test]
    fn transition_table() {
        use TemplateEvent::*;
        use TemplateState::*;

        let cases = [
            (Auto, ManualEdit, Edited, true),
            (Edited, ManualEdit, Edited, true),
            (Auto, Reset, Auto, true),
            (Edited, Reset, Auto, true),
            (Auto, ComponentChanged, Auto, true),
            (Edited, ComponentChanged, Auto, true),
            (Auto, InputsChanged, Auto, true),
            (Edited, InputsChanged, Edited, false),
        ];
        for (from, event, state, rewrite) in cases {
            assert_eq!(
                from.next(event),
                Transition { state, rewrite },
                "{from} + {event:?}"
            );
        }
    }

    #[test]
    fn new_editor_starts_auto_with_generated_text() {
        let editor = editor();
        let pair = editor.pair();
        assert!(pair.system_is_auto && pair.user_is_auto);
        assert_eq!(
            pair.system_text,
            system_prompt_for(ComponentType::Services, &ClientContext::default())
        );
        assert!(pair.user_text.contains("{{SERVICES}}"));
    }

    #[test]
    fn edited_template_survives_input_changes() {
        let mut editor = editor();
        editor.edit_user("my own {{context}} prompt");

        let regenerated = editor.update_inputs(ClientContext::from("Airline"), r#"[{"id":1}]"#);
        assert!(regenerated.system);
        assert!(!regenerated.user);
        assert_eq!(editor.user_text(), "my own {{context}} prompt");
        assert_eq!(editor.user_state(), TemplateState::Edited);
        assert_eq!(editor.system_state(), TemplateState::Auto);
        assert_eq!(editor.context().as_str(), "Airline");
    }

    #[test]
    fn identical_inputs_do_not_regenerate() {
        let mut editor = editor();
        let regenerated = editor.update_inputs(ClientContext::from("Retail"), "[]");
        assert!(!regenerated.any());
    }

    #[test]
    fn editing_to_the_generated_text_still_counts_as_edited() {
        let mut editor = editor();
        let generated = editor.system_text().to_string();
        editor.edit_system(generated);
        assert_eq!(editor.system_state(), TemplateState::Edited);
    }

    #[test]
    fn reset_returns_template_to_auto() {
        let mut editor = editor();
        editor.edit_system("custom");
        editor.reset_system();
        assert_eq!(editor.system_state(), TemplateState::Auto);
        assert_eq!(
            editor.system_text(),
            system_prompt_for(ComponentType::Services, &ClientContext::default())
        );
        editor.edit_user("custom");
        editor.reset_user();
        assert!(editor.pair().user_is_auto);
    }

    #[test]
    fn component_switch_overrides_edits() {
        let mut editor = editor();
        editor.edit_system("custom system");
        editor.edit_user("custom user");

        assert!(editor.select_component(ComponentType::CaseStudies, "[]"));
        let pair = editor.pair();
        assert!(pair.system_is_auto && pair.user_is_auto);
        assert!(pair.user_text.contains("{{CASE_STUDIES}}"));
        assert_eq!(editor.component(), ComponentType::CaseStudies);
    }

    #[test]
    fn reselecting_the_same_component_is_a_no_op() {
        let mut editor = editor();
        editor.edit_user("custom user");
        assert!(!editor.select_component(ComponentType::Services, "{}"));
        assert_eq!(editor.user_text(), "custom user");
        assert_eq!(editor.raw_data(), "[]");
    }

    #[test]
    fn restore_marks_only_differing_templates_edited() {
        let context = ClientContext::from("Museum");
        let run = SavedRun {
            id: "run-1".to_string(),
            timestamp: Utc::now(),
            component: ComponentType::HeroBanner,
            system_prompt: system_prompt_for(ComponentType::HeroBanner, &context),
            user_prompt: "hand-written".to_string(),
            context: context.clone(),
            raw_data: "[]".to_string(),
            response: GenerationResult::new(ComponentType::HeroBanner, "{}", "[]"),
        };

        let mut editor = editor();
        editor.restore(&run);
        assert_eq!(editor.component(), ComponentType::HeroBanner);
        assert_eq!(editor.system_state(), TemplateState::Auto);
        assert_eq!(editor.user_state(), TemplateState::Edited);
        assert_eq!(editor.user_text(), "hand-written");
        assert_eq!(editor.context(), &context);
    }
}
