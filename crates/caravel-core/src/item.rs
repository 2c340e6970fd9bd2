//! Explorer item types.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Kind of filesystem entry as displayed in the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Regular file.
    File,
    /// Directory.
    Folder,
}

impl ItemKind {
    /// Check if this is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, ItemKind::Folder)
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, ItemKind::File)
    }
}

/// Edit intent attached to a locally synthesized placeholder item.
///
/// The placeholder is appended to the listing before any backend call so the
/// UI can show an inline-editable name; the pending action tells the UI which
/// backend operation to fire once the name is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingAction {
    CreateFile,
    CreateFolder,
    Rename,
}

/// One file-or-folder record as displayed in the UI.
///
/// Produced by backend listing/find calls, or synthesized transiently for
/// in-place create/rename editing. Discarded wholesale on every reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerItem {
    /// File or directory name (not full path).
    pub name: CompactString,

    /// Absolute path; unique key within a listing.
    pub path: String,

    /// File or folder.
    pub kind: ItemKind,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time.
    pub modified: DateTime<Utc>,

    /// Last access time (if the backend reports it).
    #[serde(default)]
    pub accessed: Option<DateTime<Utc>>,

    /// Creation time (if the backend reports it).
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    /// Display label for the entry type (drives icon selection in the UI).
    #[serde(rename = "type")]
    pub type_label: String,

    /// Absolute path of the containing directory.
    pub parent: String,

    /// True only for a locally synthesized placeholder awaiting a name.
    /// Never set on items coming from the backend.
    #[serde(default, rename = "isEditMode")]
    pub is_edit_mode: bool,

    /// Backend operation to fire once the placeholder name is confirmed.
    #[serde(default, rename = "action", skip_serializing_if = "Option::is_none")]
    pub pending_action: Option<PendingAction>,
}

impl ExplorerItem {
    /// Synthesize an in-place edit placeholder for the given directory.
    ///
    /// The caller supplies `now` so the constructor stays deterministic.
    pub fn placeholder(
        kind: ItemKind,
        parent: impl Into<String>,
        action: PendingAction,
        now: DateTime<Utc>,
    ) -> Self {
        let parent = parent.into();
        let (name, type_label) = match kind {
            ItemKind::File => ("file", "Text"),
            ItemKind::Folder => ("folder", "Folder"),
        };

        Self {
            name: CompactString::from(name),
            path: format!("{}/{}", parent.trim_end_matches('/'), name),
            kind,
            size: 0,
            modified: now,
            accessed: Some(now),
            created: Some(now),
            type_label: type_label.to_string(),
            parent,
            is_edit_mode: true,
            pending_action: Some(action),
        }
    }
}
