//! Wire frames exchanged with the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One message on the backend channel.
///
/// Calls carry a fresh correlation id; the backend echoes the id on the
/// matching return frame. `error` is set instead of `r` when the backend
/// rejects the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frame {
    Call {
        id: String,
        name: String,
        args: Vec<Value>,
    },
    Return {
        id: String,
        #[serde(default)]
        r: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl Frame {
    /// Correlation id of the frame.
    pub fn id(&self) -> &str {
        match self {
            Frame::Call { id, .. } | Frame::Return { id, .. } => id,
        }
    }

    /// Build a successful return frame for a call id.
    pub fn ok(id: impl Into<String>, r: Value) -> Self {
        Frame::Return {
            id: id.into(),
            r,
            error: None,
        }
    }

    /// Build an error return frame for a call id.
    pub fn err(id: impl Into<String>, message: impl Into<String>) -> Self {
        Frame::Return {
            id: id.into(),
            r: Value::Null,
            error: Some(message.into()),
        }
    }
}
