//! API key retrieval from environment variables, `.env` files and configuration.
//!
//! Keys are checked for format only: an OpenAI key must start with `sk-` and be longer
//! than 20 characters. Nothing here contacts the provider to confirm a key works.

use super::constants::api_keys::{OPENAI_KEY_MIN_LEN, OPENAI_KEY_PREFIX};
use std::env;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("No API key found: set {env_var} or `completion.api_key` in pitchgen.toml")]
    MissingApiKey { env_var: String },
    #[error("API key from {source_name} is not a valid OpenAI key (expected `sk-` prefix and more than 20 characters)")]
    InvalidApiKey { source_name: String },
}

/// Where to look for an API key
#[derive(Debug, Clone)]
pub struct ApiKeySources {
    /// Environment variable checked first
    pub env_var: String,
    /// Value from the configuration file
    pub config_value: Option<String>,
}

/// Load environment variables from a `.env` file in the current directory, if any
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded environment variables"),
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!(error = %err, "failed to load .env file"),
    }
}

/// Format check for OpenAI keys
pub fn is_valid_api_key_format(key: &str) -> bool {
    key.starts_with(OPENAI_KEY_PREFIX) && key.chars().count() > OPENAI_KEY_MIN_LEN
}

/// Resolve the API key: environment variable first, then the configuration value.
/// Empty values are skipped; a non-empty key with the wrong format is an error.
pub fn resolve_api_key(sources: &ApiKeySources) -> Result<String, ConfigError> {
    let from_env = env::var(&sources.env_var)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .map(|key| (key, sources.env_var.clone()));
    let from_config = || {
        sources
            .config_value
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| (key.to_string(), "pitchgen.toml".to_string()))
    };

    let Some((key, source_name)) = from_env.or_else(from_config) else {
        return Err(ConfigError::MissingApiKey {
            env_var: sources.env_var.clone(),
        });
    };
    if !is_valid_api_key_format(&key) {
        return Err(ConfigError::InvalidApiKey { source_name });
    }
    Ok(key)
}
