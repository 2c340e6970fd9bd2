//! Transient footer notification model.

use serde::{Deserialize, Serialize};

/// Severity of a footer message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterKind {
    Info,
    Warning,
    Error,
    #[default]
    None,
}

/// One-line transient status message shown at the bottom of the window.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Footer {
    pub text: String,
    pub kind: FooterKind,
}

impl Footer {
    /// Create a footer message.
    pub fn new(text: impl Into<String>, kind: FooterKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// The cleared state: empty text, no severity.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if the footer is currently cleared.
    pub fn is_none(&self) -> bool {
        self.text.is_empty() && self.kind == FooterKind::None
    }
}
