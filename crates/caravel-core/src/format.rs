//! Formatting and path helpers.

use chrono::{DateTime, Utc};
use humansize::FormatSizeOptions;

/// Format a byte count in human-readable form (1024-based, `KB`/`MB` labels).
pub fn format_bytes(bytes: u64) -> String {
    let options = FormatSizeOptions::from(humansize::WINDOWS).decimal_places(2);
    humansize::format_size(bytes, options)
}

/// Format a timestamp the way the explorer displays it.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// Split an absolute posix-style path into its non-empty segments.
pub fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Every prefix of a path, shortest first: `/a/b/c` yields
/// `["/a", "/a/b", "/a/b/c"]`.
pub fn path_prefixes(path: &str) -> Vec<String> {
    let absolute = path.starts_with('/');
    let mut prefixes = Vec::new();
    let mut acc = String::new();

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if absolute || !acc.is_empty() {
            acc.push('/');
        }
        acc.push_str(segment);
        prefixes.push(acc.clone());
    }

    prefixes
}

/// Check whether `child` lies strictly below `parent`.
pub fn is_path_child(parent: &str, child: &str) -> bool {
    child.starts_with(parent) && child != parent
}
