//! Backend RPC client for caravel.
//!
//! The backend is an opaque remote service: every filesystem operation is a
//! named call with positional arguments and a typed response. This crate
//! provides the wire frame types, the correlation layer that matches
//! responses to requests by id, and a typed client with one method per
//! backend operation. The transport underneath (embedded-webview bridge,
//! WebSocket, in-process test double) is behind the [`Transport`] trait.

mod client;
mod id;
mod transport;
mod wire;

pub use client::{DeletePage, FindPage, LsPage, RpcClient};
pub use id::correlation_id;
pub use transport::{FrameTransport, RpcError, Transport};
pub use wire::Frame;
