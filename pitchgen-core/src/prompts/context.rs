use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-text client context supplied by the caller.
///
/// No structure is required; the text is inlined wherever a template carries the
/// `{{context}}` token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientContext(String);

impl ClientContext {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for ClientContext {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for ClientContext {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
