use super::api_keys::ApiKeySources;
use super::constants::{defaults, models};
use crate::components::ComponentType;
use crate::data::RecordKind;
use crate::llm::ReasoningEffort;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Completion service settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompletionConfig {
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for non-reasoning models
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Reasoning effort for reasoning models (low, medium, high)
    #[serde(default)]
    pub reasoning_effort: ReasoningEffort,

    /// Chat completions API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// API key stored in the file; the environment variable takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    models::openai::DEFAULT_MODEL.to_string()
}
fn default_temperature() -> f32 {
    defaults::DEFAULT_TEMPERATURE
}
fn default_base_url() -> String {
    defaults::DEFAULT_BASE_URL.to_string()
}
fn default_api_key_env() -> String {
    defaults::DEFAULT_API_KEY_ENV.to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            reasoning_effort: ReasoningEffort::default(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            api_key: None,
        }
    }
}

impl CompletionConfig {
    pub fn api_key_sources(&self) -> ApiKeySources {
        ApiKeySources {
            env_var: self.api_key_env.clone(),
            config_value: self.api_key.clone(),
        }
    }
}

/// Run archive settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Archive directory; the platform data directory is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Number of runs shown by `history list`
    #[serde(default = "default_max_listed")]
    pub max_listed: usize,
}

fn default_max_listed() -> usize {
    defaults::DEFAULT_MAX_LISTED_RUNS
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_listed: default_max_listed(),
        }
    }
}

/// JSON files used as the starting raw data when a component type is selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_members: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_studies: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_cards: Option<PathBuf>,
}

impl CatalogsConfig {
    pub fn path_for(&self, kind: RecordKind) -> Option<&Path> {
        let path = match kind {
            RecordKind::TeamMembers => &self.team_members,
            RecordKind::CaseStudies => &self.case_studies,
            RecordKind::Awards => &self.awards,
            RecordKind::Services => &self.services,
            RecordKind::IntroCards => &self.intro_cards,
        };
        path.as_deref()
    }

    /// Starting raw data for a component: the configured catalog file when there is one,
    /// else the empty document for the type. Relative paths resolve against `base_dir`.
    pub fn starting_raw_data(&self, component: ComponentType, base_dir: &Path) -> Result<String> {
        let Some(path) = component.record_kind().and_then(|kind| self.path_for(kind)) else {
            return Ok(component.empty_raw_data().to_string());
        };
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        };
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_catalog_yields_empty_document() -> Result<()> {
        let catalogs = CatalogsConfig::default();
        let base = Path::new(".");
        assert_eq!(catalogs.starting_raw_data(ComponentType::Services, base)?, "[]");
        assert_eq!(catalogs.starting_raw_data(ComponentType::Background, base)?, "{}");
        Ok(())
    }

    #[test]
    fn relative_catalog_paths_resolve_against_base_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("services.json"), r#"[{"id":1}]"#)?;
        let catalogs = CatalogsConfig {
            services: Some(PathBuf::from("services.json")),
            ..Default::default()
        };
        assert_eq!(
            catalogs.starting_raw_data(ComponentType::Services, dir.path())?,
            r#"[{"id":1}]"#
        );
        assert!(
            catalogs
                .starting_raw_data(ComponentType::CaseStudies, dir.path())
                .is_ok()
        );
        Ok(())
    }

    #[test]
    fn unreadable_catalog_is_an_error() {
        let catalogs = CatalogsConfig {
            intro_cards: Some(PathBuf::from("/definitely/not/here.json")),
            ..Default::default()
        };
        assert!(
            catalogs
                .starting_raw_data(ComponentType::HeroBanner, Path::new("."))
                .is_err()
        );
    }
}
