use crate::config::constants::paths;
use crate::config::types::{CatalogsConfig, CompletionConfig, HistoryConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure for pitchgen
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PitchgenConfig {
    /// Completion service settings
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Run archive settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Default raw data per record kind
    #[serde(default)]
    pub catalogs: CatalogsConfig,
}

impl PitchgenConfig {
    /// Write the default configuration as pretty TOML. Existing files are only
    /// replaced when `force` is set; returns whether a file was written.
    pub fn create_sample_config<P: AsRef<Path>>(output: P, force: bool) -> Result<bool> {
        let output = output.as_ref();
        if output.exists() && !force {
            return Ok(false);
        }
        if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let config_content = toml::to_string_pretty(&PitchgenConfig::default())
            .context("Failed to serialize default configuration")?;
        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;
        Ok(true)
    }
}

/// Configuration manager for loading configurations
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PitchgenConfig,
    config_path: Option<PathBuf>,
    workspace: PathBuf,
}

impl ConfigManager {
    /// Load configuration from the default locations around the current directory
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Load configuration for a workspace.
    ///
    /// Looks for `pitchgen.toml` in the workspace root, then `.pitchgen/pitchgen.toml`,
    /// then `~/.pitchgen/pitchgen.toml`, and falls back to the defaults.
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let workspace = workspace.as_ref();

        let mut candidates = vec![
            workspace.join(paths::CONFIG_FILE_NAME),
            workspace
                .join(paths::CONFIG_DIR_NAME)
                .join(paths::CONFIG_FILE_NAME),
        ];
        if let Some(home_dir) = dirs::home_dir() {
            candidates.push(
                home_dir
                    .join(paths::CONFIG_DIR_NAME)
                    .join(paths::CONFIG_FILE_NAME),
            );
        }

        for candidate in candidates {
            if candidate.exists() {
                let mut manager = Self::load_from_file(&candidate)?;
                manager.workspace = workspace.to_path_buf();
                return Ok(manager);
            }
        }

        debug!(workspace = %workspace.display(), "no configuration file found; using defaults");
        Ok(Self {
            config: PitchgenConfig::default(),
            config_path: None,
            workspace: workspace.to_path_buf(),
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: PitchgenConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");

        let workspace = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
            workspace,
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &PitchgenConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PitchgenConfig {
        &mut self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Directory relative catalog paths resolve against: the config file's directory
    /// when one was loaded, else the workspace
    pub fn catalog_base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.workspace)
    }
}
