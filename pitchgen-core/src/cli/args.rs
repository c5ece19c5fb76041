//! CLI argument parsing

use crate::config::ConfigManager;
use crate::config::constants::env_vars;
use anyhow::{Context, Result};
use clap::{Args, ColorChoice, Parser, Subcommand, ValueHint};
use std::fs;
use std::path::PathBuf;

/// Main CLI structure for pitchgen
#[derive(Parser, Debug)]
#[command(
    name = "pitchgen",
    version,
    about = "Component-scoped prompt resolution for pitch content\n\nResolves a system prompt, a user prompt and a strict output schema for a pitch component (hero banner, services, team, case studies), inlines client context and catalog data, and dispatches to a completion service.\n\nQuick Start:\n  export OPENAI_API_KEY=\"sk-...\"\n  pitchgen run services --context \"Retail bank rebrand\" --data services.json",
    color = ColorChoice::Auto
)]
pub struct Cli {
    /// Workspace root used to locate `pitchgen.toml`
    ///
    /// Default: current directory
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub workspace: Option<PathBuf>,

    /// Explicit configuration file (skips the workspace search). Also read from
    /// `PITCHGEN_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Model ID override (e.g. gpt-5.2, gpt-4o)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature override (ignored by reasoning models)
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Run archive directory override
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub history_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Client context and raw data supplied to a component
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Free-text client context
    #[arg(long, conflicts_with = "context_file")]
    pub context: Option<String>,

    /// Read the client context from a file
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub context_file: Option<PathBuf>,

    /// Raw data JSON file (a list of records, or an object with a `data` list).
    /// Falls back to the catalog configured for the component.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub data: Option<PathBuf>,
}

impl InputArgs {
    /// Context text from `--context` or `--context-file`; empty when neither is given
    pub fn read_context(&self) -> Result<String> {
        match (&self.context, &self.context_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read context file: {}", path.display())),
            (None, None) => Ok(String::new()),
        }
    }

    /// Raw data from `--data`, if given
    pub fn read_data(&self) -> Result<Option<String>> {
        self.data
            .as_ref()
            .map(|path| {
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read data file: {}", path.display()))
            })
            .transpose()
    }
}

/// Edited templates that replace the generated ones
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateOverrideArgs {
    /// Use this file as the system template instead of the generated one
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub system_file: Option<PathBuf>,

    /// Use this file as the user template instead of the generated one
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub user_file: Option<PathBuf>,
}

impl TemplateOverrideArgs {
    pub fn read_system(&self) -> Result<Option<String>> {
        read_optional(self.system_file.as_ref(), "system template")
    }

    pub fn read_user(&self) -> Result<Option<String>> {
        read_optional(self.user_file.as_ref(), "user template")
    }
}

fn read_optional(path: Option<&PathBuf>, what: &str) -> Result<Option<String>> {
    path.map(|path| {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {what} file: {}", path.display()))
    })
    .transpose()
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List component types
    ///
    /// Legacy types (awards, background) are shown only with --all
    Types {
        #[arg(long)]
        all: bool,
    },

    /// Show the expected output shape of a component type
    Structure { component: String },

    /// Print the strict JSON schema for a component type
    Schema { component: String },

    /// Print the unexpanded system and user templates
    ///
    /// Unknown component names get the generic fallback templates
    Prompts {
        component: String,
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the templates with placeholders expanded
    Expand {
        component: String,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        templates: TemplateOverrideArgs,
    },

    /// Generate content for a component and show the resolved selection
    Run {
        component: String,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        templates: TemplateOverrideArgs,
        /// Archive the run after a successful generation
        #[arg(long)]
        save: bool,
        /// Print the raw response instead of the resolved selection
        #[arg(long)]
        raw: bool,
    },

    /// Browse and manage saved runs
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Write a sample pitchgen.toml into the workspace
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List saved runs, newest first
    List {
        /// Number of runs to show (default from configuration)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one saved run
    Show { id: String },
    /// Delete one saved run
    Delete { id: String },
    /// Restore a saved run's inputs and templates, print them expanded, and
    /// optionally dispatch them again
    Load {
        id: String,
        /// Dispatch the restored prompts
        #[arg(long)]
        rerun: bool,
        /// Archive the new result (requires --rerun)
        #[arg(long, requires = "rerun")]
        save: bool,
    },
}

impl Cli {
    /// Workspace directory (current directory when not given)
    pub fn get_workspace(&self) -> PathBuf {
        self.workspace
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Explicit configuration file from `--config` or `PITCHGEN_CONFIG`
    pub fn config_file(&self) -> Option<PathBuf> {
        self.config.clone().or_else(|| {
            std::env::var_os(env_vars::CONFIG_PATH)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
    }

    /// Load configuration and apply command-line overrides
    pub fn load_config(&self) -> Result<ConfigManager> {
        let mut manager = match self.config_file() {
            Some(path) => ConfigManager::load_from_file(&path)?,
            None => ConfigManager::load_from_workspace(self.get_workspace())?,
        };

        let config = manager.config_mut();
        if let Some(model) = &self.model {
            config.completion.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            config.completion.temperature = temperature;
        }
        if let Some(dir) = &self.history_dir {
            config.history.dir = Some(dir.clone());
        }
        Ok(manager)
    }
}
