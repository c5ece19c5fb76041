//! A pitch-building session: the tracked templates, the results generated so far, and
//! an optional run archive.

use crate::components::{ComponentType, schema_of};
use crate::config::CompletionConfig;
use crate::history::{RunArchive, SavedRun};
use crate::llm::{CompletionRequest, CompletionService, LLMError, ReasoningEffort};
use crate::prompts::{
    ClientContext, GenerationResult, LayeredLookup, PlaceholderExpander, PromptEditor,
    Regenerated, ResultLookup,
};
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use tracing::{info, warn};

/// Model settings applied to a dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchSettings {
    pub model: String,
    pub temperature: f32,
    pub reasoning_effort: ReasoningEffort,
}

impl From<&CompletionConfig> for DispatchSettings {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            reasoning_effort: config.reasoning_effort,
        }
    }
}

/// Latest result per component type produced during this session
#[derive(Debug, Clone, Default)]
pub struct SessionResults {
    latest: HashMap<ComponentType, GenerationResult>,
}

impl SessionResults {
    pub fn insert(&mut self, result: GenerationResult) {
        self.latest.insert(result.component, result);
    }

    pub fn get(&self, component: ComponentType) -> Option<&GenerationResult> {
        self.latest.get(&component)
    }

    pub fn clear(&mut self, component: ComponentType) {
        self.latest.remove(&component);
    }
}

impl ResultLookup for SessionResults {
    fn latest_result_for(&self, component: ComponentType) -> Option<GenerationResult> {
        self.get(component).cloned()
    }
}

pub struct PitchSession {
    editor: PromptEditor,
    results: SessionResults,
    archive: Option<RunArchive>,
}

impl PitchSession {
    pub fn new(editor: PromptEditor) -> Self {
        Self {
            editor,
            results: SessionResults::default(),
            archive: None,
        }
    }

    pub fn with_archive(mut self, archive: RunArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn editor(&self) -> &PromptEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut PromptEditor {
        &mut self.editor
    }

    pub fn archive(&self) -> Option<&RunArchive> {
        self.archive.as_ref()
    }

    pub fn result_for(&self, component: ComponentType) -> Option<&GenerationResult> {
        self.results.get(component)
    }

    pub fn record_result(&mut self, result: GenerationResult) {
        self.results.insert(result);
    }

    /// Switch component type; see [`PromptEditor::select_component`]
    pub fn select_component(
        &mut self,
        component: ComponentType,
        raw_data: impl Into<String>,
    ) -> bool {
        self.editor.select_component(component, raw_data)
    }

    pub fn update_inputs(
        &mut self,
        context: ClientContext,
        raw_data: impl Into<String>,
    ) -> Regenerated {
        self.editor.update_inputs(context, raw_data)
    }

    /// Lookup used when expanding: this session's results first, then the archive
    pub fn lookup(&self) -> LayeredLookup<'_> {
        let lookup = LayeredLookup::new().with_layer(&self.results);
        match &self.archive {
            Some(archive) => lookup.with_layer(archive),
            None => lookup,
        }
    }

    /// Expand both current templates and attach the component's output schema
    pub fn prepare_request(&self, settings: &DispatchSettings) -> CompletionRequest {
        let lookup = self.lookup();
        let component = self.editor.component();
        let expander = PlaceholderExpander::new(
            component,
            self.editor.context(),
            self.editor.raw_data(),
            &lookup,
        );
        CompletionRequest {
            system_text: expander.expand(self.editor.system_text()),
            user_text: expander.expand(self.editor.user_text()),
            model: settings.model.clone(),
            temperature: settings.temperature,
            reasoning_effort: settings.reasoning_effort,
            output_schema: Some(schema_of(component)),
        }
    }

    /// Dispatch the current component.
    ///
    /// Any earlier result for the component is dropped first. On success the new result
    /// becomes the component's latest; a service error is returned unchanged.
    pub async fn run(
        &mut self,
        service: &dyn CompletionService,
        settings: &DispatchSettings,
    ) -> Result<GenerationResult, LLMError> {
        let component = self.editor.component();
        let request = self.prepare_request(settings);
        self.results.clear(component);

        info!(component = %component, provider = service.name(), "running component");
        match service.complete(request).await {
            Ok(response) => {
                let result =
                    GenerationResult::new(component, response.content, self.editor.raw_data());
                self.results.insert(result.clone());
                Ok(result)
            }
            Err(err) => {
                warn!(component = %component, error = %err, "completion failed");
                Err(err)
            }
        }
    }

    /// Archive the current component's latest result with the templates and inputs
    /// that are current now
    pub fn save_last_run(&self) -> Result<SavedRun> {
        let Some(archive) = &self.archive else {
            bail!("no run archive configured");
        };
        let component = self.editor.component();
        let Some(result) = self.results.get(component) else {
            bail!("no result for {component} to save; run it first");
        };

        let run = SavedRun::new(
            component,
            self.editor.system_text(),
            self.editor.user_text(),
            self.editor.context().clone(),
            self.editor.raw_data(),
            result.clone(),
        );
        archive
            .save(&run)
            .with_context(|| format!("failed to archive run for {component}"))?;
        Ok(run)
    }

    /// Load a saved run into the editor and make its response the component's latest
    pub fn restore(&mut self, run: &SavedRun) {
        self.editor.restore(run);
        self.results.insert(run.response.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::NONE_SELECTED;

    fn settings() -> DispatchSettings {
        DispatchSettings::from(&CompletionConfig::default())
    }

    #[test]
    fn prepared_request_is_expanded_and_carries_schema() {
        let raw = r#"[{"id": 3, "title": "Events"}]"#;
        let editor = PromptEditor::new(
            ComponentType::Services,
            ClientContext::from("Expo 2030"),
            raw,
        );
        let session = PitchSession::new(editor);

        let request = session.prepare_request(&settings());
        assert!(request.user_text.contains("Expo 2030"));
        assert!(request.user_text.contains("\"title\": \"Events\""));
        assert!(!request.user_text.contains("{{"));
        assert_eq!(request.model, "gpt-5.2");
        assert_eq!(
            request.output_schema.map(|schema| schema.name).as_deref(),
            Some("services_response")
        );
    }

    #[test]
    fn session_result_feeds_the_captain() {
        let editor = PromptEditor::new(ComponentType::TeamMembers, ClientContext::default(), "[]");
        let mut session = PitchSession::new(editor);
        let before = session.prepare_request(&settings());
        assert!(before.user_text.contains(NONE_SELECTED));

        session.record_result(GenerationResult::new(
            ComponentType::HeroBanner,
            r#"{"componentData":{"introCardId":2}}"#,
            r#"[{"id":2,"name":"Rae","position":"Head of Social"}]"#,
        ));
        let after = session.prepare_request(&settings());
        assert!(after.user_text.contains("ID: 2, Name: Rae, Position: Head of Social"));
    }

    #[test]
    fn saving_requires_archive_and_result() {
        let editor = PromptEditor::new(ComponentType::Services, ClientContext::default(), "[]");
        let session = PitchSession::new(editor);
        assert!(session.save_last_run().is_err());
    }
}
