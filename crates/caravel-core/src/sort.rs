//! Listing sort modes and the stable sort applied after every mutation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::item::ExplorerItem;

/// Key used to order a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortMode {
    #[default]
    Name,
    Modified,
    Type,
    Size,
}

/// Stable multi-key sort of a listing.
///
/// Items are ordered by the selected key with name as tie-break, then the
/// whole sequence is reversed when `reversed` is set. Reversing twice
/// restores the original order; re-sorting an already-sorted listing with
/// the same key is a no-op.
pub fn sort_items(items: &mut [ExplorerItem], mode: SortMode, reversed: bool) {
    match mode {
        SortMode::Name => items.sort_by(cmp_name),
        SortMode::Modified => {
            items.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| cmp_name(a, b)))
        }
        SortMode::Type => {
            items.sort_by(|a, b| a.type_label.cmp(&b.type_label).then_with(|| cmp_name(a, b)))
        }
        SortMode::Size => items.sort_by(|a, b| a.size.cmp(&b.size).then_with(|| cmp_name(a, b))),
    }

    if reversed {
        items.reverse();
    }
}

fn cmp_name(a: &ExplorerItem, b: &ExplorerItem) -> std::cmp::Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.path.cmp(&b.path))
}
