//! Core types and helpers for caravel.
//!
//! This crate provides the data model shared across the caravel workspace:
//! explorer items, sort modes, footer notifications, and the pure formatting
//! and path helpers the UI layer relies on.

mod footer;
mod format;
mod item;
mod remote;
mod sort;

pub use footer::{Footer, FooterKind};
pub use format::{format_bytes, format_date, is_path_child, path_prefixes, split_segments};
pub use item::{ExplorerItem, ItemKind, PendingAction};
pub use remote::{DiskInfo, HashAlgo};
pub use sort::{sort_items, SortMode};
