//! The shared view state and its observation surface.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use caravel_bus::{Bus, Subscriber};
use caravel_core::{ExplorerItem, Footer, SortMode};

use crate::history::History;

/// What rendering code reads: the one mutable view of the world.
///
/// Created once at startup, lives for the process duration. Mutated only
/// through the [`Orchestrator`](crate::Orchestrator); rendering observes it
/// via [`StateHandle::subscribe`] and reads snapshots.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Absolute path of the directory currently shown.
    pub current_directory: String,
    /// `current_directory` split into breadcrumb segments; derived.
    pub directory_segments: Vec<String>,
    /// Visited paths with cursor.
    pub history: History,
    /// The displayed listing. Replaced wholesale at reload start, appended
    /// to as stream pages arrive, re-sorted after every mutation.
    pub items: Vec<ExplorerItem>,
    /// Active sort key.
    pub sort_mode: SortMode,
    /// Whether the sorted order is reversed.
    pub sort_reversed: bool,
    /// Paths of the selected items.
    pub selected: BTreeSet<String>,
    /// True while a listing or find stream is in flight.
    pub is_searching: bool,
    /// Transient status line.
    pub footer: Footer,
    /// Sidebar shortcuts (home directory and mounted disks).
    pub quick_access: Vec<ExplorerItem>,
}

/// Change notification published after every state mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    DirectoryChanged(String),
    ItemsChanged,
    SearchingChanged(bool),
    FooterChanged(Footer),
    HistoryChanged,
    SelectionCleared,
    QuickAccessChanged,
}

/// Shared handle to the view state plus its notification bus.
///
/// Critical sections are short and never cross an await point; the
/// orchestrator's check-then-act sequences (supersession checks against
/// merges) run entirely inside one [`update`](Self::update) call, which is
/// what makes them atomic with respect to competing triggers.
#[derive(Debug, Default)]
pub struct StateHandle {
    inner: Mutex<ViewState>,
    bus: Bus<Notice>,
}

impl StateHandle {
    /// Create a handle around an empty default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle around a prepared state.
    pub fn with_state(state: ViewState) -> Self {
        Self {
            inner: Mutex::new(state),
            bus: Bus::new(),
        }
    }

    /// Clone the current state.
    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    /// Read a value out of the state.
    pub fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        f(&self.lock())
    }

    /// Mutate the state. Crate-private: all writes go through the
    /// orchestrator.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Publish a change notification to every subscriber.
    pub(crate) fn publish(&self, notice: Notice) {
        self.bus.publish(notice);
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> Subscriber<Notice> {
        self.bus.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
