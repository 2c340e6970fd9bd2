//! Closed command set and channel-based dispatch.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use caravel_core::{FooterKind, SortMode};

use crate::orchestrator::Orchestrator;

/// Every UI action the orchestrator accepts, as a message.
///
/// The tagged union replaces string-named events: a sender can only ask
/// for operations that exist. Callers that need the completion of an
/// operation await the corresponding [`Orchestrator`] method directly
/// instead of going through the channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Reload,
    NavigateTo(String),
    SetPath(String),
    Back,
    Forward,
    Delete {
        paths: Vec<String>,
        move_to_trash: bool,
    },
    CreateFile(String),
    CreateFolder(String),
    Rename {
        from: String,
        to: String,
    },
    BeginCreateFile,
    BeginCreateFolder,
    Copy(Vec<String>),
    Paste(String),
    Search(String),
    StopSearch,
    SetSort {
        mode: SortMode,
        reversed: bool,
    },
    Select(String),
    Deselect(String),
    ClearSelection,
    FooterText {
        text: String,
        kind: FooterKind,
    },
    LoadQuickAccess,
}

impl Orchestrator {
    /// Run one command. Backend failures are already surfaced in the
    /// footer by the entry points, so they are not re-raised here.
    pub async fn dispatch(&self, command: Command) {
        match command {
            Command::Reload => {
                let _ = self.reload().await;
            }
            Command::NavigateTo(path) => {
                let _ = self.navigate_to(path).await;
            }
            Command::SetPath(path) => {
                let _ = self.set_path(&path).await;
            }
            Command::Back => {
                let _ = self.back().await;
            }
            Command::Forward => {
                let _ = self.forward().await;
            }
            Command::Delete {
                paths,
                move_to_trash,
            } => {
                let _ = self.delete(paths, move_to_trash).await;
            }
            Command::CreateFile(path) => {
                let _ = self.create_file(&path).await;
            }
            Command::CreateFolder(path) => {
                let _ = self.create_folder(&path).await;
            }
            Command::Rename { from, to } => {
                let _ = self.rename(&from, &to).await;
            }
            Command::BeginCreateFile => self.begin_create_file(),
            Command::BeginCreateFolder => self.begin_create_folder(),
            Command::Copy(paths) => {
                let _ = self.copy(paths).await;
            }
            Command::Paste(folder) => {
                let _ = self.paste(&folder).await;
            }
            Command::Search(query) => {
                let _ = self.search(&query).await;
            }
            Command::StopSearch => {
                let _ = self.stop_search().await;
            }
            Command::SetSort { mode, reversed } => self.set_sort(mode, reversed),
            Command::Select(path) => self.select(path),
            Command::Deselect(path) => self.deselect(&path),
            Command::ClearSelection => self.clear_selection(),
            Command::FooterText { text, kind } => self.footer_text(text, kind),
            Command::LoadQuickAccess => {
                let _ = self.load_quick_access().await;
            }
        }
    }
}

/// Drain a command channel, running each command as its own task.
///
/// Commands are picked up in channel order but are not serialized against
/// each other: a reload can still be streaming when the next command
/// lands, which is exactly the situation the listing gate exists for.
pub fn spawn_command_loop(
    orchestrator: Arc<Orchestrator>,
    mut commands: mpsc::Receiver<Command>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move {
                orchestrator.dispatch(command).await;
            });
        }
    })
}
