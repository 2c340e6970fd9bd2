//! Single-flight listing and find streams.
//!
//! Reload can be triggered faster than a listing stream finishes: a
//! navigation click, a double-click into a folder and a quick-access click
//! can all land while pages are still arriving. Every trigger bumps the
//! gate generation inside the same critical section that clears the
//! listing, and every merge re-checks the generation inside its own
//! critical section, so a superseded worker can never push stale pages
//! into a newer worker's view. The slot mutex keeps at most one stream
//! active against the backend.

use caravel_core::{sort_items, split_segments, ExplorerItem};
use caravel_rpc::RpcError;

use crate::state::Notice;

use super::Orchestrator;

/// What became of one merged page.
enum MergeOutcome {
    /// More pages expected.
    Continue,
    /// Stream ended; this worker's listing is authoritative.
    Finished,
    /// A newer trigger took over; results discarded.
    Superseded,
}

impl Orchestrator {
    /// Reload the listing of the current directory.
    ///
    /// Safe to call while a previous reload is still streaming: the older
    /// stream is cancelled at the backend and its partial results are
    /// discarded. If the backend never ends the stream this future never
    /// resolves; callers needing bounded latency must time out above this
    /// layer.
    pub async fn reload(&self) -> Result<(), RpcError> {
        let (token, folder) = self.begin_listing();
        let result = self.run_listing(token, &folder).await;
        if let Err(ref err) = result {
            self.abort_listing(token);
            self.report("reload", err);
        }
        result
    }

    /// Stream find results for a query under the current directory into
    /// the listing. Supersedes any in-flight listing stream.
    pub async fn search(&self, query: &str) -> Result<(), RpcError> {
        let (token, folder) = self.begin_listing();
        let result = self.run_find(token, &folder, query).await;
        if let Err(ref err) = result {
            self.abort_listing(token);
            self.report("search", err);
        }
        result
    }

    /// Stop an in-flight search and show the plain listing again.
    pub async fn stop_search(&self) -> Result<(), RpcError> {
        if let Err(err) = self.client.stop_all_streams_find().await {
            self.report("search", &err);
            return Err(err);
        }
        self.reload().await
    }

    /// Register a trigger: bump the generation, clear the listing and mark
    /// the view busy, all inside one critical section and before the first
    /// suspension point.
    fn begin_listing(&self) -> (u64, String) {
        let (token, folder) = self.state.update(|s| {
            let token = self.gate.bump();
            s.items.clear();
            s.is_searching = true;
            s.directory_segments = split_segments(&s.current_directory);
            (token, s.current_directory.clone())
        });

        self.state.publish(Notice::ItemsChanged);
        self.state.publish(Notice::SearchingChanged(true));
        (token, folder)
    }

    async fn run_listing(&self, token: u64, folder: &str) -> Result<(), RpcError> {
        self.client.stop_all_streams_ls().await?;
        self.client.delete_all_streams_ls().await?;

        let _slot = self.gate.acquire().await;
        if self.gate.is_stale(token) {
            tracing::debug!(token, "listing superseded before start");
            return Ok(());
        }

        self.client.start_ls(folder).await?;
        loop {
            let page = self.client.ls(folder).await?;
            match self.merge_page(token, page.items, page.end) {
                MergeOutcome::Continue => {}
                MergeOutcome::Finished => return Ok(()),
                MergeOutcome::Superseded => {
                    tracing::debug!(token, "listing superseded mid-stream");
                    return Ok(());
                }
            }
        }
    }

    async fn run_find(&self, token: u64, folder: &str, query: &str) -> Result<(), RpcError> {
        self.client.stop_all_streams_ls().await?;
        self.client.delete_all_streams_ls().await?;

        let _slot = self.gate.acquire().await;
        if self.gate.is_stale(token) {
            tracing::debug!(token, "find superseded before start");
            return Ok(());
        }

        loop {
            let page = self.client.stream_find(folder, query).await?;
            match self.merge_page(token, page.files, page.end) {
                MergeOutcome::Continue => {}
                MergeOutcome::Finished => return Ok(()),
                MergeOutcome::Superseded => {
                    tracing::debug!(token, "find superseded mid-stream");
                    return Ok(());
                }
            }
        }
    }

    /// Merge one stream page, or discard everything if a newer trigger
    /// arrived. The staleness check and the merge share one critical
    /// section so a competing trigger is either fully before or fully
    /// after this page.
    fn merge_page(&self, token: u64, items: Vec<ExplorerItem>, end: bool) -> MergeOutcome {
        let outcome = self.state.update(|s| {
            if self.gate.is_stale(token) {
                s.items.clear();
                return MergeOutcome::Superseded;
            }

            s.items.extend(items);
            sort_items(&mut s.items, s.sort_mode, s.sort_reversed);

            if end {
                s.is_searching = false;
                MergeOutcome::Finished
            } else {
                MergeOutcome::Continue
            }
        });

        self.state.publish(Notice::ItemsChanged);
        if matches!(outcome, MergeOutcome::Finished) {
            self.state.publish(Notice::SearchingChanged(false));
        }
        outcome
    }

    /// A stream died on an RPC error. Unless a newer trigger already owns
    /// the view, stop showing the busy indicator.
    fn abort_listing(&self, token: u64) {
        let changed = self.state.update(|s| {
            if self.gate.is_stale(token) {
                return false;
            }
            s.is_searching = false;
            true
        });

        if changed {
            self.state.publish(Notice::SearchingChanged(false));
        }
    }
}
