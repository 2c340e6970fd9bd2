//! Streamed delete with footer progress.

use caravel_core::FooterKind;
use caravel_rpc::{correlation_id, RpcError};

use super::Orchestrator;

impl Orchestrator {
    /// Delete paths, reporting progress in the footer after every page,
    /// then clear the selection and reload.
    ///
    /// The backend only reports counts; a page with fewer `deleted` than
    /// attempted is indistinguishable from success. There is no
    /// cancellation for a running delete stream.
    pub async fn delete(&self, paths: Vec<String>, move_to_trash: bool) -> Result<(), RpcError> {
        if paths.is_empty() {
            return Ok(());
        }

        let result = self.run_delete(&paths, move_to_trash).await;
        if let Err(ref err) = result {
            self.report("delete", err);
        }
        result
    }

    async fn run_delete(&self, paths: &[String], move_to_trash: bool) -> Result<(), RpcError> {
        let id = correlation_id();
        tracing::debug!(%id, count = paths.len(), move_to_trash, "starting delete stream");

        self.client.start_delete(&id, paths, move_to_trash).await?;

        loop {
            let page = self.client.stream_delete(&id).await?;

            let text = match page.last_deleted.as_deref() {
                Some(name) if !name.is_empty() => {
                    format!("Deleted {}/{} - {}", page.deleted, page.total, name)
                }
                _ => format!("Deleted {}/{}", page.deleted, page.total),
            };
            self.footer_text(text, FooterKind::Info);

            if page.end {
                break;
            }
        }

        self.clear_selection();
        self.reload().await
    }
}
