//! Completion service contract
//!
//! A completion service takes two fully expanded texts, a model, sampling settings and
//! an optional strict output schema, and returns either the response text or an
//! [`LLMError`]. Errors are opaque to callers: nothing in this crate inspects them to
//! decide on a retry.

use crate::components::OutputSchema;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reasoning effort hint for models that support it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReasoningEffort {
    Low,
    #[default]
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn allowed_values() -> &'static [&'static str] {
        &["low", "medium", "high"]
    }
}

impl fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReasoningEffort {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReasoningEffort {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Some(parsed) = Self::parse(&raw) {
            Ok(parsed)
        } else {
            tracing::warn!(
                input = raw,
                allowed = ?Self::allowed_values(),
                "invalid reasoning effort provided; falling back to default"
            );
            Ok(Self::default())
        }
    }
}

/// One dispatch to a completion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Expanded system text
    pub system_text: String,
    /// Expanded user text
    pub user_text: String,
    pub model: String,
    pub temperature: f32,
    pub reasoning_effort: ReasoningEffort,
    pub output_schema: Option<OutputSchema>,
}

impl CompletionRequest {
    /// Checks every service applies before sending anything
    pub fn validate(&self) -> Result<(), LLMError> {
        if self.model.trim().is_empty() {
            return Err(LLMError::InvalidRequest(
                "Model cannot be empty".to_string(),
            ));
        }
        if self.user_text.trim().is_empty() {
            return Err(LLMError::InvalidRequest(
                "User prompt cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

/// A backend that turns a [`CompletionRequest`] into response text
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Provider name (e.g., "openai")
    fn name(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LLMError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LLMError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider error: {0}")]
    Provider(String),
}
