//! Typed publish/subscribe notification bus.
//!
//! A thin fan-out layer over `tokio::sync::broadcast`: any number of
//! subscribers observe every published event, and a one-shot subscription
//! resolves on the first event matching a predicate. Publishing never
//! blocks and never fails; events published while no subscriber is
//! listening are dropped. Dropping a [`Subscriber`] unsubscribes it.

use std::future::Future;

use tokio::sync::broadcast;

/// Default buffer depth for a bus. Slow subscribers that fall further
/// behind than this skip ahead and miss the overwritten events.
pub const DEFAULT_CAPACITY: usize = 64;

/// A typed event bus with broadcast fan-out.
#[derive(Debug)]
pub struct Bus<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone + Send + 'static> Bus<T> {
    /// Create a bus with the default buffer capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a bus with an explicit buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to every current subscriber.
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, event: T) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Register a new subscriber observing all events from this point on.
    pub fn subscribe(&self) -> Subscriber<T> {
        Subscriber {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// One-shot subscription: resolve with the first event matching the
    /// predicate, then drop the subscription.
    ///
    /// The subscription is registered before this returns its future, so
    /// events published after the call but before the await are not missed.
    pub fn once<F>(&self, predicate: F) -> impl Future<Output = Option<T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut subscriber = self.subscribe();
        async move { subscriber.recv_matching(predicate).await }
    }
}

impl<T: Clone + Send + 'static> Default for Bus<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of a [`Bus`] subscription.
#[derive(Debug)]
pub struct Subscriber<T> {
    rx: broadcast::Receiver<T>,
}

impl<T: Clone + Send + 'static> Subscriber<T> {
    /// Receive the next event, or `None` once the bus is dropped.
    ///
    /// A subscriber that lagged behind the bus buffer skips the missed
    /// events and keeps receiving from the oldest retained one.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "bus subscriber lagged, skipping events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Receive events until one matches the predicate.
    pub async fn recv_matching<F>(&mut self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        while let Some(event) = self.recv().await {
            if predicate(&event) {
                return Some(event);
            }
        }
        None
    }
}
