//! Single-flight gate for listing streams.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, MutexGuard};

/// Serialization point for everything that writes the displayed listing.
///
/// Every trigger bumps the generation and carries the new value as its
/// token; a worker whose token no longer matches has been superseded and
/// must discard its results. The slot mutex guarantees at most one worker
/// streams pages at a time. Together they replace the original
/// active/waiting worker counters without changing the discard semantics.
#[derive(Debug, Default)]
pub struct ListingGate {
    generation: AtomicU64,
    slot: Mutex<()>,
}

impl ListingGate {
    /// Create a gate with no triggers recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new trigger; returns the token its worker must carry.
    pub fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The newest token handed out.
    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a newer trigger has superseded this token.
    pub fn is_stale(&self, token: u64) -> bool {
        self.current() != token
    }

    /// Wait for the streaming slot. Held for the whole page loop.
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.slot.lock().await
    }
}
