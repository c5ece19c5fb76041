//! Pitchgen configuration module
//!
//! Loads `pitchgen.toml` (completion settings, run archive location, default catalogs)
//! and resolves API keys.

pub mod api_keys;
pub mod constants;
pub mod loader;
pub mod types;

pub use api_keys::{
    ApiKeySources, ConfigError, is_valid_api_key_format, load_dotenv, resolve_api_key,
};
pub use loader::{ConfigManager, PitchgenConfig};
pub use types::{CatalogsConfig, CompletionConfig, HistoryConfig};
