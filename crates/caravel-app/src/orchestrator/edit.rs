//! Create, rename and clipboard operations.

use chrono::Utc;

use caravel_core::{ExplorerItem, ItemKind, PendingAction};
use caravel_rpc::RpcError;

use crate::state::Notice;

use super::Orchestrator;

impl Orchestrator {
    /// Create an empty file, then reload.
    pub async fn create_file(&self, path: &str) -> Result<(), RpcError> {
        if let Err(err) = self.client.create_file(path).await {
            self.report("create_file", &err);
            return Err(err);
        }
        self.reload().await
    }

    /// Create an empty folder, then reload.
    pub async fn create_folder(&self, path: &str) -> Result<(), RpcError> {
        if let Err(err) = self.client.create_folder(path).await {
            self.report("create_folder", &err);
            return Err(err);
        }
        self.reload().await
    }

    /// Rename an entry, then reload.
    pub async fn rename(&self, from: &str, to: &str) -> Result<(), RpcError> {
        if let Err(err) = self.client.rename(from, to).await {
            self.report("rename", &err);
            return Err(err);
        }
        self.reload().await
    }

    /// Append an inline-editable file placeholder to the listing. The UI
    /// fires [`create_file`](Self::create_file) once the name is
    /// confirmed; the reload that follows discards the placeholder.
    pub fn begin_create_file(&self) {
        self.push_placeholder(ItemKind::File, PendingAction::CreateFile);
    }

    /// Append an inline-editable folder placeholder to the listing.
    pub fn begin_create_folder(&self) {
        self.push_placeholder(ItemKind::Folder, PendingAction::CreateFolder);
    }

    fn push_placeholder(&self, kind: ItemKind, action: PendingAction) {
        self.state.update(|s| {
            let item =
                ExplorerItem::placeholder(kind, s.current_directory.clone(), action, Utc::now());
            // Appended unsorted so the edit row shows up at the end.
            s.items.push(item);
        });
        self.state.publish(Notice::ItemsChanged);
    }

    /// Put paths on the backend clipboard.
    pub async fn copy(&self, paths: Vec<String>) -> Result<(), RpcError> {
        if let Err(err) = self.client.copy(&paths).await {
            self.report("copy", &err);
            return Err(err);
        }
        Ok(())
    }

    /// Paste the backend clipboard into a folder.
    pub async fn paste(&self, folder: &str) -> Result<(), RpcError> {
        if let Err(err) = self.client.paste(folder).await {
            self.report("paste", &err);
            return Err(err);
        }
        Ok(())
    }
}
