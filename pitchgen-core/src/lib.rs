//! # pitchgen-core - Prompt resolution for pitch content
//!
//! `pitchgen-core` turns a component type, a free-text client context and a body of
//! catalog data into a matched system/user prompt pair plus a strict output schema, and
//! keeps those prompts in step with their inputs until someone edits them by hand.
//!
//! ## Highlights
//!
//! - **Type registry**: a closed set of component types, each with a shape description
//!   and a strict JSON schema for the generated response.
//! - **Data normalization**: arbitrary JSON catalogs become capped, truncated record
//!   summaries; malformed input becomes an empty list, never an error.
//! - **Placeholder expansion**: `{{TOKEN}}` substitution performed only at dispatch, with
//!   the hero banner's selected intro card threaded into the team template.
//! - **Edit tracking**: an explicit `Auto`/`Edited` state machine per template.
//! - **Collaborators**: an OpenAI-compatible completion service and an on-disk run
//!   archive, both behind small seams so the engine stays testable.
//!
//! ## Architecture Overview
//!
//! - `components/`: component types, output schemas, shape descriptions.
//! - `data/`: record normalization.
//! - `prompts/`: templates, generation, expansion, edit tracking, result lookup.
//! - `selection`: resolves a generated response against the catalog for display.
//! - `llm/`: completion request/response types and the OpenAI provider.
//! - `history/`: saved runs on disk.
//! - `session`: ties the editor, results and archive together.
//! - `config/`: `pitchgen.toml`, constants and API key handling.
//! - `cli/`: clap argument definitions for the `pitchgen` binary.
//!
//! ## Quickstart
//!
//! ```rust,ignore
//! use pitchgen_core::{ClientContext, ComponentType, PitchSession, PromptEditor};
//! use pitchgen_core::{ConfigManager, DispatchSettings, create_service};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let manager = ConfigManager::load()?;
//!     let service = create_service(&manager.config().completion)?;
//!
//!     let editor = PromptEditor::new(
//!         ComponentType::Services,
//!         ClientContext::from("Regional bank launching a youth account"),
//!         std::fs::read_to_string("services.json")?,
//!     );
//!     let mut session = PitchSession::new(editor);
//!     let settings = DispatchSettings::from(&manager.config().completion);
//!     let result = session.run(service.as_ref(), &settings).await?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod components;
pub mod config;
pub mod data;
pub mod history;
pub mod llm;
pub mod prompts;
pub mod selection;
pub mod session;

pub use cli::{Cli, Commands};
pub use components::{ComponentType, OutputSchema, schema_of, structure_of};
pub use config::{ConfigManager, PitchgenConfig};
pub use data::{RecordKind, RecordSummary, normalize};
pub use history::{RunArchive, SavedRun};
pub use llm::{CompletionRequest, CompletionService, LLMError, create_service};
pub use prompts::{
    ClientContext, GenerationResult, PlaceholderExpander, PromptEditor, PromptPair,
    TemplateState,
};
pub use selection::{SelectionReport, resolve_selection};
pub use session::{DispatchSettings, PitchSession};
