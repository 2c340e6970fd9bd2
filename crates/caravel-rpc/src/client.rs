//! Typed client: one method per backend operation.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use caravel_core::{DiskInfo, ExplorerItem, HashAlgo};

use crate::transport::{RpcError, Transport};

/// One page of a streamed directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct LsPage {
    pub items: Vec<ExplorerItem>,
    pub end: bool,
}

/// One page of a streamed delete operation.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletePage {
    pub end: bool,
    pub total: u64,
    pub deleted: u64,
    #[serde(default)]
    pub last_deleted: Option<String>,
}

/// One page of a streamed find operation.
#[derive(Debug, Clone, Deserialize)]
pub struct FindPage {
    pub files: Vec<ExplorerItem>,
    pub total: u64,
    pub end: bool,
}

/// Thin promise-per-operation wrapper around a [`Transport`].
///
/// Methods map one-to-one onto backend operations; no retries, no local
/// state. Cheap to clone.
#[derive(Clone)]
pub struct RpcClient {
    transport: Arc<dyn Transport>,
}

impl RpcClient {
    /// Wrap a transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn call<T: DeserializeOwned>(&self, name: &str, args: Vec<Value>) -> Result<T, RpcError> {
        let value = self.transport.call(name, args).await?;
        serde_json::from_value(value).map_err(|err| RpcError::Decode {
            operation: name.to_string(),
            message: err.to_string(),
        })
    }

    // --- listing stream ---

    /// Start a listing stream for a folder.
    pub async fn start_ls(&self, folder: &str) -> Result<(), RpcError> {
        self.call("start_ls", vec![json!(folder)]).await
    }

    /// Fetch the next page of a folder's listing stream.
    pub async fn ls(&self, folder: &str) -> Result<LsPage, RpcError> {
        self.call("ls", vec![json!(folder)]).await
    }

    /// Ask the backend to stop emitting pages on every listing stream.
    pub async fn stop_all_streams_ls(&self) -> Result<(), RpcError> {
        self.call("stop_all_streams_ls", vec![]).await
    }

    /// Drop every listing stream's buffered state on the backend.
    pub async fn delete_all_streams_ls(&self) -> Result<(), RpcError> {
        self.call("delete_all_streams_ls", vec![]).await
    }

    // --- delete stream ---

    /// Start a delete stream for the given paths.
    pub async fn start_delete(
        &self,
        id: &str,
        paths: &[String],
        move_to_trash: bool,
    ) -> Result<(), RpcError> {
        self.call("start_delete", vec![json!(id), json!(paths), json!(move_to_trash)])
            .await
    }

    /// Fetch the next progress page of a delete stream.
    pub async fn stream_delete(&self, id: &str) -> Result<DeletePage, RpcError> {
        self.call("stream_delete", vec![json!(id)]).await
    }

    /// Stop every delete stream on the backend.
    pub async fn stop_all_streams_delete(&self) -> Result<(), RpcError> {
        self.call("stop_all_streams_delete", vec![]).await
    }

    // --- find stream ---

    /// Fetch the next page of matches for a query under a folder. The
    /// backend starts the stream on the first call for a folder.
    pub async fn stream_find(&self, folder: &str, query: &str) -> Result<FindPage, RpcError> {
        self.call("stream_find", vec![json!(folder), json!(query)]).await
    }

    /// Stop every find stream on the backend.
    pub async fn stop_all_streams_find(&self) -> Result<(), RpcError> {
        self.call("stop_all_streams_find", vec![]).await
    }

    // --- one-shot operations ---

    /// Create an empty file.
    pub async fn create_file(&self, path: &str) -> Result<(), RpcError> {
        self.call("create_file", vec![json!(path)]).await
    }

    /// Create an empty folder.
    pub async fn create_folder(&self, path: &str) -> Result<(), RpcError> {
        self.call("create_folder", vec![json!(path)]).await
    }

    /// Rename an entry.
    pub async fn rename(&self, from: &str, to: &str) -> Result<(), RpcError> {
        self.call("rename", vec![json!(from), json!(to)]).await
    }

    /// Put paths on the backend clipboard. The wire format is one
    /// space-joined string.
    pub async fn copy(&self, paths: &[String]) -> Result<(), RpcError> {
        self.call("copy", vec![json!(paths.join(" "))]).await
    }

    /// Paste the backend clipboard into a folder.
    pub async fn paste(&self, folder: &str) -> Result<(), RpcError> {
        self.call("paste", vec![json!(folder)]).await
    }

    /// Check whether a path exists.
    pub async fn exists(&self, path: &str) -> Result<bool, RpcError> {
        self.call("exists", vec![json!(path)]).await
    }

    /// Fetch a single entry's record.
    pub async fn get_path_info(&self, path: &str) -> Result<ExplorerItem, RpcError> {
        self.call("get_path_info", vec![json!(path)]).await
    }

    /// The user's home directory.
    pub async fn home(&self) -> Result<String, RpcError> {
        self.call("home", vec![]).await
    }

    /// The backend's working directory.
    pub async fn pwd(&self) -> Result<String, RpcError> {
        self.call("pwd", vec![]).await
    }

    /// The backend's user name.
    pub async fn user(&self) -> Result<String, RpcError> {
        self.call("user", vec![]).await
    }

    // --- config passthrough ---

    /// Fetch the backend configuration. Opaque to the front-end.
    pub async fn get_config(&self) -> Result<Value, RpcError> {
        self.call("get_config", vec![]).await
    }

    /// Replace the backend configuration.
    pub async fn set_config(&self, config: Value) -> Result<(), RpcError> {
        self.call("set_config", vec![config]).await
    }

    // --- system info ---

    /// Usage records for every mounted disk.
    pub async fn disks_info(&self) -> Result<Vec<DiskInfo>, RpcError> {
        self.call("disks_info", vec![]).await
    }

    /// Hash a file's content; returns the hex digest.
    pub async fn hash(&self, algo: HashAlgo, path: &str) -> Result<String, RpcError> {
        self.call(&format!("hash_{algo}"), vec![json!(path)]).await
    }
}
