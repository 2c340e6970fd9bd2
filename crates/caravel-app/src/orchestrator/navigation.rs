//! History cursor movement and directory changes.

use caravel_rpc::RpcError;

use crate::state::Notice;

use super::Orchestrator;

impl Orchestrator {
    /// Visit a directory from the current position, recording it in the
    /// history, then reload.
    pub async fn navigate_to(&self, path: impl Into<String>) -> Result<(), RpcError> {
        let path = path.into();
        self.state.update(|s| {
            s.history.append(path.clone());
            s.current_directory = path.clone();
        });
        self.state.publish(Notice::DirectoryChanged(path));
        self.state.publish(Notice::HistoryChanged);

        self.reload().await
    }

    /// Cold navigation (address-bar entry): replace the history with every
    /// prefix of the path, then reload.
    pub async fn set_path(&self, path: &str) -> Result<(), RpcError> {
        self.state.update(|s| {
            s.history.set_path(path);
            s.current_directory = path.to_string();
        });
        self.state.publish(Notice::DirectoryChanged(path.to_string()));
        self.state.publish(Notice::HistoryChanged);

        self.reload().await
    }

    /// Step back in the history. Silently ignored at the start.
    pub async fn back(&self) -> Result<(), RpcError> {
        let target = self.state.update(|s| {
            let target = s.history.back().map(str::to_string);
            if let Some(path) = &target {
                s.current_directory = path.clone();
            }
            target
        });

        match target {
            Some(path) => {
                self.state.publish(Notice::DirectoryChanged(path));
                self.state.publish(Notice::HistoryChanged);
                self.reload().await
            }
            None => Ok(()),
        }
    }

    /// Step forward in the history. Silently ignored at the end.
    pub async fn forward(&self) -> Result<(), RpcError> {
        let target = self.state.update(|s| {
            let target = s.history.forward().map(str::to_string);
            if let Some(path) = &target {
                s.current_directory = path.clone();
            }
            target
        });

        match target {
            Some(path) => {
                self.state.publish(Notice::DirectoryChanged(path));
                self.state.publish(Notice::HistoryChanged);
                self.reload().await
            }
            None => Ok(()),
        }
    }
}
