/// Model ID constants
pub mod models {
    pub mod openai {
        pub const DEFAULT_MODEL: &str = "gpt-5.2";
        pub const SUPPORTED_MODELS: &[&str] = &[
            "gpt-5.2",
            "gpt-5.1",
            "gpt-5",
            "gpt-5-mini",
            "gpt-4.1",
            "gpt-4o",
        ];

        /// Model family prefix that takes the reasoning API extensions
        pub const REASONING_FAMILY: &str = "gpt-5";
    }
}

/// Model helpers
pub mod model_helpers {
    use super::models::openai;

    /// Reasoning models take a `developer` message and `reasoning_effort` instead of a
    /// `system` message and `temperature`
    pub fn is_reasoning_model(model: &str) -> bool {
        model.contains(openai::REASONING_FAMILY)
    }

    pub fn is_known(model: &str) -> bool {
        openai::SUPPORTED_MODELS.contains(&model)
    }
}

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
    pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
    pub const DEFAULT_MAX_LISTED_RUNS: usize = 20;
}

/// Message role constants for the chat completions API
pub mod message_roles {
    pub const SYSTEM: &str = "system";
    pub const DEVELOPER: &str = "developer";
    pub const USER: &str = "user";
}

/// Environment variable names
pub mod env_vars {
    pub const HISTORY_DIR: &str = "PITCHGEN_HISTORY_DIR";
    pub const CONFIG_PATH: &str = "PITCHGEN_CONFIG";
}

/// File and directory names
pub mod paths {
    pub const CONFIG_FILE_NAME: &str = "pitchgen.toml";
    pub const CONFIG_DIR_NAME: &str = ".pitchgen";
    pub const DATA_DIR_NAME: &str = "pitchgen";
    pub const RUNS_DIR_NAME: &str = "runs";
    pub const RUN_FILE_PREFIX: &str = "run-";
}

/// API key format rules
pub mod api_keys {
    pub const OPENAI_KEY_PREFIX: &str = "sk-";
    /// A key must be strictly longer than this
    pub const OPENAI_KEY_MIN_LEN: usize = 20;
}
