//! On-disk archive of saved runs.
//!
//! Each run is one pretty-printed JSON file named `run-<id>.json`. The archive directory
//! comes from `PITCHGEN_HISTORY_DIR`, then `history.dir` in the configuration, then the
//! platform data directory.

use crate::components::ComponentType;
use crate::config::constants::{env_vars, paths};
use crate::prompts::{ClientContext, GenerationResult, ResultLookup};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

const RUN_FILE_EXTENSION: &str = "json";

/// Disambiguates runs created within the same millisecond
static RUN_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A dispatched generation together with the inputs and templates that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRun {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub component: ComponentType,
    /// System template as dispatched, before expansion
    pub system_prompt: String,
    /// User template as dispatched, before expansion
    pub user_prompt: String,
    pub context: ClientContext,
    pub raw_data: String,
    pub response: GenerationResult,
}

impl SavedRun {
    pub fn new(
        component: ComponentType,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        context: ClientContext,
        raw_data: impl Into<String>,
        response: GenerationResult,
    ) -> Self {
        let timestamp = Utc::now();
        let sequence = RUN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!(
                "{}-{component}-{sequence:04}",
                timestamp.format("%Y%m%dT%H%M%S%3fZ")
            ),
            timestamp,
            component,
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            context,
            raw_data: raw_data.into(),
            response,
        }
    }
}

/// Directory holding saved runs
#[derive(Debug, Clone)]
pub struct RunArchive {
    dir: PathBuf,
}

impl RunArchive {
    /// Open (creating if needed) an archive rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create history directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open the archive at the resolved history directory
    pub fn open_default(configured: Option<&Path>) -> Result<Self> {
        Self::open(resolve_history_dir(configured)?)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a run to its own file. Saving an id that is already archived is an error;
    /// existing runs are never overwritten.
    pub fn save(&self, run: &SavedRun) -> Result<PathBuf> {
        let path = self.path_for(&run.id)?;
        let payload = serde_json::to_string_pretty(run).context("failed to serialize saved run")?;
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                bail!("a saved run with id '{}' already exists", run.id)
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to create saved run: {}", path.display()));
            }
        };
        file.write_all(payload.as_bytes())
            .with_context(|| format!("failed to write saved run: {}", path.display()))?;
        info!(id = %run.id, component = %run.component, path = %path.display(), "saved run");
        Ok(path)
    }

    /// Saved runs, newest first. Files that cannot be read or parsed are skipped.
    /// A `limit` of zero lists everything.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<SavedRun>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.dir).with_context(|| {
            format!("failed to read history directory: {}", self.dir.display())
        })? {
            let entry = entry.with_context(|| {
                format!("failed to read history entry in {}", self.dir.display())
            })?;
            let path = entry.path();
            if !is_run_file(&path) {
                continue;
            }
            match read_run(&path) {
                Ok(run) => runs.push(run),
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "skipping unreadable run file")
                }
            }
        }

        runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
        if limit > 0 && runs.len() > limit {
            runs.truncate(limit);
        }
        Ok(runs)
    }

    pub fn load(&self, id: &str) -> Result<SavedRun> {
        let path = self.path_for(id)?;
        if !path.exists() {
            bail!("no saved run with id '{id}'");
        }
        read_run(&path)
    }

    /// Remove a saved run; returns whether one existed
    pub fn delete(&self, id: &str) -> Result<bool> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)
            .with_context(|| format!("failed to delete saved run: {}", path.display()))?;
        info!(id, "deleted saved run");
        Ok(true)
    }

    /// Most recent saved run for a component type
    pub fn latest_for(&self, component: ComponentType) -> Result<Option<SavedRun>> {
        Ok(self
            .list_recent(0)?
            .into_iter()
            .find(|run| run.component == component))
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'));
        if !valid {
            bail!("invalid run id '{id}'");
        }
        Ok(self.dir.join(format!(
            "{}{id}.{RUN_FILE_EXTENSION}",
            paths::RUN_FILE_PREFIX
        )))
    }
}

impl ResultLookup for RunArchive {
    fn latest_result_for(&self, component: ComponentType) -> Option<GenerationResult> {
        match self.latest_for(component) {
            Ok(run) => run.map(|run| run.response),
            Err(err) => {
                warn!(error = %err, "failed to read history; treating as empty");
                None
            }
        }
    }
}

/// History directory: `PITCHGEN_HISTORY_DIR`, then the configured directory, then
/// `<data dir>/pitchgen/runs`
pub fn resolve_history_dir(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(custom) = env::var_os(env_vars::HISTORY_DIR).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(custom));
    }
    if let Some(configured) = configured {
        return Ok(configured.to_path_buf());
    }
    dirs::data_dir()
        .map(|data| data.join(paths::DATA_DIR_NAME).join(paths::RUNS_DIR_NAME))
        .context("could not determine a data directory for run history; set PITCHGEN_HISTORY_DIR")
}

fn read_run(path: &Path) -> Result<SavedRun> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read saved run: {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse saved run: {}", path.display()))
}

fn is_run_file(path: &Path) -> bool {
    let named_like_run = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(paths::RUN_FILE_PREFIX));
    named_like_run
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(RUN_FILE_EXTENSION))
}
