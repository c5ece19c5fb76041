//! Read-only access to earlier generation results

use crate::components::ComponentType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed generation for a component type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub component: ComponentType,
    /// Response text exactly as the completion service returned it
    pub content: String,
    /// Raw data the prompts were expanded from
    #[serde(default)]
    pub raw_data: String,
    pub created_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn new(
        component: ComponentType,
        content: impl Into<String>,
        raw_data: impl Into<String>,
    ) -> Self {
        Self {
            component,
            content: content.into(),
            raw_data: raw_data.into(),
            created_at: Utc::now(),
        }
    }
}

/// Capability to fetch the most recent result for a component type.
///
/// Implementations only read; nothing in the expansion path writes through this trait.
pub trait ResultLookup {
    fn latest_result_for(&self, component: ComponentType) -> Option<GenerationResult>;
}

impl<F> ResultLookup for F
where
    F: Fn(ComponentType) -> Option<GenerationResult>,
{
    fn latest_result_for(&self, component: ComponentType) -> Option<GenerationResult> {
        self(component)
    }
}

/// Lookup that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResults;

impl ResultLookup for NoResults {
    fn latest_result_for(&self, _component: ComponentType) -> Option<GenerationResult> {
        None
    }
}

/// Queries several lookups in priority order and returns the first hit
#[derive(Default)]
pub struct LayeredLookup<'a> {
    layers: Vec<&'a dyn ResultLookup>,
}

impl<'a> LayeredLookup<'a> {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn with_layer(mut self, layer: &'a dyn ResultLookup) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl ResultLookup for LayeredLookup<'_> {
    fn latest_result_for(&self, component: ComponentType) -> Option<GenerationResult> {
        self.layers
            .iter()
            .find_map(|layer| layer.latest_result_for(component))
    }
}
