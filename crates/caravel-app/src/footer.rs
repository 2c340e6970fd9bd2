//! Debounced auto-clear for the footer.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use caravel_core::Footer;

use crate::state::{Notice, StateHandle};

/// Clears the footer a fixed delay after the latest message.
///
/// Re-arming aborts the previous timer, so a burst of messages produces
/// exactly one clear, scheduled from the last of them.
#[derive(Debug)]
pub(crate) struct FooterTimer {
    pending: Mutex<Option<JoinHandle<()>>>,
    delay: Duration,
}

impl FooterTimer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            pending: Mutex::new(None),
            delay,
        }
    }

    /// Restart the countdown to a footer clear.
    pub(crate) fn rearm(&self, state: Arc<StateHandle>) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.update(|s| s.footer = Footer::none());
            state.publish(Notice::FooterChanged(Footer::none()));
        }));
    }
}

impl Drop for FooterTimer {
    fn drop(&mut self) {
        if let Some(pending) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
    }
}
