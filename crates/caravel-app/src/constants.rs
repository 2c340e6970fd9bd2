//! Application-wide constants.

use std::time::Duration;

/// How long a footer message stays visible after the latest update.
pub(crate) const FOOTER_CLEAR_DELAY: Duration = Duration::from_secs(5);
