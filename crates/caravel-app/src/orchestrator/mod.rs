//! The command orchestrator: the only writer to the view state.

mod deletion;
mod edit;
mod listing;
mod navigation;

use std::sync::Arc;

use caravel_core::{sort_items, Footer, FooterKind, SortMode};
use caravel_rpc::{RpcClient, RpcError};

use crate::constants::FOOTER_CLEAR_DELAY;
use crate::footer::FooterTimer;
use crate::gate::ListingGate;
use crate::state::{Notice, StateHandle};

/// Sequences backend calls against the shared view state.
///
/// Every UI action lands here, either as a direct method call or through
/// [`Command`](crate::Command) dispatch. Entry points report backend
/// failures to the footer before returning the error, so a caller that
/// ignores the `Result` still leaves the process in a consistent,
/// user-visible state.
pub struct Orchestrator {
    state: Arc<StateHandle>,
    client: RpcClient,
    gate: ListingGate,
    footer_timer: FooterTimer,
}

impl Orchestrator {
    /// Create an orchestrator over a state handle and a backend client.
    pub fn new(state: Arc<StateHandle>, client: RpcClient) -> Self {
        Self {
            state,
            client,
            gate: ListingGate::new(),
            footer_timer: FooterTimer::new(FOOTER_CLEAR_DELAY),
        }
    }

    /// The shared state this orchestrator writes to.
    pub fn state(&self) -> &Arc<StateHandle> {
        &self.state
    }

    /// Show a footer message and re-arm the auto-clear countdown.
    pub fn footer_text(&self, text: impl Into<String>, kind: FooterKind) {
        let footer = Footer::new(text, kind);
        self.state.update(|s| s.footer = footer.clone());
        self.state.publish(Notice::FooterChanged(footer));
        self.footer_timer.rearm(Arc::clone(&self.state));
    }

    /// Change the sort key and re-sort the displayed listing in place.
    pub fn set_sort(&self, mode: SortMode, reversed: bool) {
        self.state.update(|s| {
            s.sort_mode = mode;
            s.sort_reversed = reversed;
            sort_items(&mut s.items, mode, reversed);
        });
        self.state.publish(Notice::ItemsChanged);
    }

    /// Add a path to the selection.
    pub fn select(&self, path: impl Into<String>) {
        self.state.update(|s| {
            s.selected.insert(path.into());
        });
    }

    /// Remove a path from the selection.
    pub fn deselect(&self, path: &str) {
        self.state.update(|s| {
            s.selected.remove(path);
        });
    }

    /// Drop the whole selection.
    pub fn clear_selection(&self) {
        self.state.update(|s| s.selected.clear());
        self.state.publish(Notice::SelectionCleared);
    }

    /// Rebuild the quick-access shortcuts from the user's home directory
    /// and the mounted disks.
    pub async fn load_quick_access(&self) -> Result<(), RpcError> {
        let result = self.fetch_quick_access().await;
        if let Err(ref err) = result {
            self.report("quick_access", err);
        }
        result
    }

    async fn fetch_quick_access(&self) -> Result<(), RpcError> {
        let home = self.client.home().await?;
        let mut entries = vec![self.client.get_path_info(&home).await?];

        for disk in self.client.disks_info().await? {
            entries.push(self.client.get_path_info(&disk.path).await?);
        }

        self.state.update(|s| s.quick_access = entries);
        self.state.publish(Notice::QuickAccessChanged);
        Ok(())
    }

    /// Surface a failed backend call in the footer.
    fn report(&self, operation: &str, err: &RpcError) {
        tracing::warn!(operation, error = %err, "backend call failed");
        self.footer_text(format!("{operation}: {err}"), FooterKind::Error);
    }
}
