//! View state and command orchestration for caravel.
//!
//! This crate owns the one mutable view of the world the UI renders from
//! ([`ViewState`] behind a [`StateHandle`]) and the [`Orchestrator`] that is
//! the only writer to it. UI actions arrive as method calls or [`Command`]
//! messages; the orchestrator sequences the backend streams they trigger so
//! that overlapping listing requests coalesce onto a single in-flight
//! stream and stale pages never reach the displayed listing.

mod command;
mod constants;
mod footer;
mod gate;
mod history;
mod orchestrator;
mod state;

pub use command::{spawn_command_loop, Command};
pub use gate::ListingGate;
pub use history::History;
pub use orchestrator::Orchestrator;
pub use state::{Notice, StateHandle, ViewState};
