//! # Completion service layer
//!
//! A completion service receives fully expanded prompt texts plus the component's strict
//! output schema and returns the response text. [`CompletionService`] is the seam;
//! [`OpenAIProvider`] talks to the chat completions API and tests substitute their own
//! implementations.
//!
//! Errors come back as [`LLMError`] and are surfaced as-is. There is no retry policy at
//! this layer.

pub mod factory;
pub mod provider;
pub mod providers;

pub use factory::create_service;
pub use provider::{
    CompletionRequest, CompletionResponse, CompletionService, LLMError, ReasoningEffort,
};
pub use providers::OpenAIProvider;
