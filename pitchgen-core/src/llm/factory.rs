use super::provider::CompletionService;
use super::providers::OpenAIProvider;
use crate::config::{CompletionConfig, ConfigError, resolve_api_key};

/// Build the completion service described by the configuration.
///
/// Fails when no API key is available or the key does not look like an OpenAI key.
pub fn create_service(
    config: &CompletionConfig,
) -> Result<Box<dyn CompletionService>, ConfigError> {
    let api_key = resolve_api_key(&config.api_key_sources())?;
    Ok(Box::new(OpenAIProvider::with_base_url(
        api_key,
        config.base_url.clone(),
    )))
}
