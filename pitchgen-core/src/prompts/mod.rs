//! Prompt resolution, expansion and edit tracking.
//!
//! Generation produces unexpanded templates with `{{TOKEN}}` placeholders intact so the
//! caller can inspect and edit them. Expansion inlines normalized data only at dispatch
//! time. The tracker decides whether input changes regenerate a template or leave a
//! caller's edit alone.

pub mod context;
pub mod expander;
pub mod generator;
pub mod lookup;
pub mod placeholders;
pub mod templates;
pub mod tracker;

pub use context::ClientContext;
pub use expander::{
    Bindings, NONE_SELECTED, PlaceholderExpander, expand_template, intro_card_id,
    selected_intro_member,
};
pub use generator::{
    GeneratedPrompts, generate, system_prompt_for, system_prompt_for_tag, user_prompt_for,
    user_prompt_for_tag,
};
pub use lookup::{GenerationResult, LayeredLookup, NoResults, ResultLookup};
pub use placeholders::{Placeholder, template_tokens};
pub use templates::PromptTemplates;
pub use tracker::{
    PromptEditor, PromptPair, Regenerated, TemplateEvent, TemplateState, TrackedTemplate,
    Transition,
};
