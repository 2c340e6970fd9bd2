//! Transport abstraction and the correlated frame transport.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;

use crate::id::correlation_id;
use crate::wire::Frame;

/// Errors surfaced by backend calls.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The channel to the backend is gone (process exited, socket dropped).
    #[error("transport channel closed")]
    ChannelClosed,

    /// The backend rejected the call.
    #[error("{operation} failed: {message}")]
    Backend { operation: String, message: String },

    /// The backend answered with a payload the client could not decode.
    #[error("malformed response for {operation}: {message}")]
    Decode { operation: String, message: String },
}

/// One round-trip to the backend: send an operation name with positional
/// arguments, await the matched response payload.
///
/// Implementations decide how frames travel (webview bridge, socket,
/// in-process double); callers never retry implicitly.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, RpcError>;
}

type PendingMap = Arc<Mutex<HashMap<String, oneshot::Sender<Result<Value, String>>>>>;

/// Correlated request/response transport over a raw frame duplex.
///
/// Outgoing calls are tagged with a fresh id; a reader task routes each
/// incoming return frame to the call waiting on that id. Frames with an
/// unknown id are dropped. The duplex endpoints are plain channels so the
/// actual socket plumbing stays outside this crate.
pub struct FrameTransport {
    outbound: mpsc::Sender<Frame>,
    pending: PendingMap,
    reader: JoinHandle<()>,
}

impl FrameTransport {
    /// Build a transport over an outbound/inbound frame channel pair.
    pub fn new(outbound: mpsc::Sender<Frame>, mut inbound: mpsc::Receiver<Frame>) -> Self {
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        let routing = Arc::clone(&pending);
        let reader = tokio::spawn(async move {
            while let Some(frame) = inbound.recv().await {
                let Frame::Return { id, r, error } = frame else {
                    tracing::warn!("dropping unexpected call frame from backend");
                    continue;
                };

                let Some(waiter) = routing.lock().await.remove(&id) else {
                    tracing::warn!(%id, "dropping return frame with no pending call");
                    continue;
                };

                let result = match error {
                    Some(message) => Err(message),
                    None => Ok(r),
                };
                // The caller may have given up; nothing to do then.
                let _ = waiter.send(result);
            }
            // Channel closed: wake every pending call with a transport error
            // by dropping their senders.
            routing.lock().await.clear();
        });

        Self {
            outbound,
            pending,
            reader,
        }
    }
}

#[async_trait]
impl Transport for FrameTransport {
    async fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, RpcError> {
        let id = correlation_id();
        let (tx, rx) = oneshot::channel();

        self.pending.lock().await.insert(id.clone(), tx);
        tracing::trace!(%id, name, "sending call frame");

        let frame = Frame::Call {
            id: id.clone(),
            name: name.to_string(),
            args,
        };
        if self.outbound.send(frame).await.is_err() {
            self.pending.lock().await.remove(&id);
            return Err(RpcError::ChannelClosed);
        }

        match rx.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(RpcError::Backend {
                operation: name.to_string(),
                message,
            }),
            Err(_) => Err(RpcError::ChannelClosed),
        }
    }
}

impl Drop for FrameTransport {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
