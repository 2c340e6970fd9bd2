use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use caravel_app::{Notice, Orchestrator, StateHandle};
use caravel_core::{FooterKind, SortMode};
use caravel_rpc::{RpcClient, RpcError, Transport};

/// In-process backend double driven by canned responses.
///
/// Listings are one page per folder unless `slow_folder` is set, in which
/// case the `ls` call for that folder parks until the test releases it.
#[derive(Default)]
struct ScriptedBackend {
    listings: Mutex<HashMap<String, Vec<Value>>>,
    delete_pages: Mutex<VecDeque<Value>>,
    find_pages: Mutex<VecDeque<Value>>,
    fail_ops: Mutex<Vec<String>>,
    calls: Mutex<Vec<String>>,
    slow_folder: Option<String>,
    entered_slow: Notify,
    release_slow: Notify,
}

fn listing_item(parent: &str, name: &str, size: u64) -> Value {
    json!({
        "name": name,
        "path": format!("{parent}/{name}"),
        "kind": "file",
        "size": size,
        "modified": "2024-03-07T09:05:00Z",
        "type": "Text",
        "parent": parent
    })
}

impl ScriptedBackend {
    fn with_listing(self, folder: &str, items: Vec<Value>) -> Self {
        self.listings.lock().unwrap().insert(folder.to_string(), items);
        self
    }

    fn with_delete_pages(self, pages: Vec<Value>) -> Self {
        *self.delete_pages.lock().unwrap() = pages.into();
        self
    }

    fn with_find_pages(self, pages: Vec<Value>) -> Self {
        *self.find_pages.lock().unwrap() = pages.into();
        self
    }

    fn failing(self, op: &str) -> Self {
        self.fail_ops.lock().unwrap().push(op.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn call_count(&self, op: &str) -> usize {
        self.calls().iter().filter(|c| *c == op).count()
    }
}

#[async_trait]
impl Transport for ScriptedBackend {
    async fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, RpcError> {
        self.calls.lock().unwrap().push(name.to_string());

        if self.fail_ops.lock().unwrap().iter().any(|op| op == name) {
            return Err(RpcError::Backend {
                operation: name.to_string(),
                message: "scripted failure".to_string(),
            });
        }

        match name {
            "start_ls" | "stop_all_streams_ls" | "delete_all_streams_ls" | "start_delete"
            | "stop_all_streams_find" | "create_file" | "create_folder" | "rename" | "copy"
            | "paste" => Ok(Value::Null),
            "ls" => {
                let folder = args[0].as_str().unwrap_or_default().to_string();
                if self.slow_folder.as_deref() == Some(folder.as_str()) {
                    self.entered_slow.notify_one();
                    self.release_slow.notified().await;
                }
                let items = self
                    .listings
                    .lock()
                    .unwrap()
                    .get(&folder)
                    .cloned()
                    .unwrap_or_default();
                Ok(json!({ "items": items, "end": true }))
            }
            "stream_delete" => Ok(self
                .delete_pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| json!({ "end": true, "total": 0, "deleted": 0 }))),
            "stream_find" => Ok(self
                .find_pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| json!({ "files": [], "total": 0, "end": true }))),
            "home" => Ok(json!("/home/user")),
            "disks_info" => Ok(json!([{
                "device": "/dev/sda1",
                "path": "/",
                "total": 1000u64,
                "used": 400u64,
                "free": 600u64,
                "percent": 40.0
            }])),
            "get_path_info" => {
                let path = args[0].as_str().unwrap_or_default();
                let name = path.rsplit('/').find(|s| !s.is_empty()).unwrap_or("/");
                Ok(json!({
                    "name": name,
                    "path": path,
                    "kind": "folder",
                    "size": 0,
                    "modified": "2024-03-07T09:05:00Z",
                    "type": "Folder",
                    "parent": "/"
                }))
            }
            other => Err(RpcError::Backend {
                operation: other.to_string(),
                message: "unscripted operation".to_string(),
            }),
        }
    }
}

fn orchestrator_with(backend: Arc<ScriptedBackend>) -> Arc<Orchestrator> {
    let state = Arc::new(StateHandle::new());
    Arc::new(Orchestrator::new(state, RpcClient::new(backend)))
}

#[tokio::test]
async fn test_set_path_expands_history_and_loads_listing() {
    let backend = Arc::new(ScriptedBackend::default().with_listing(
        "/a/b/c",
        vec![listing_item("/a/b/c", "z.txt", 10), listing_item("/a/b/c", "a.txt", 20)],
    ));
    let orch = orchestrator_with(Arc::clone(&backend));

    orch.set_path("/a/b/c").await.unwrap();

    let state = orch.state().snapshot();
    assert_eq!(state.current_directory, "/a/b/c");
    assert_eq!(state.directory_segments, ["a", "b", "c"]);
    assert_eq!(state.history.entries(), ["/a", "/a/b", "/a/b/c"]);
    assert_eq!(state.history.index(), 2);
    assert!(!state.is_searching);

    // Listing arrived sorted by name.
    let names: Vec<_> = state.items.iter().map(|i| i.name.to_string()).collect();
    assert_eq!(names, ["a.txt", "z.txt"]);
}

#[tokio::test]
async fn test_navigate_back_then_navigate_discards_forward_branch() {
    let backend = Arc::new(
        ScriptedBackend::default()
            .with_listing("/a", vec![])
            .with_listing("/a/b", vec![])
            .with_listing("/a/c", vec![]),
    );
    let orch = orchestrator_with(backend);

    orch.set_path("/a").await.unwrap();
    orch.navigate_to("/a/b").await.unwrap();

    let state = orch.state().snapshot();
    assert_eq!(state.history.entries(), ["/a", "/a/b"]);
    assert_eq!(state.history.index(), 1);

    orch.back().await.unwrap();
    let state = orch.state().snapshot();
    assert_eq!(state.history.index(), 0);
    assert_eq!(state.current_directory, "/a");

    orch.navigate_to("/a/c").await.unwrap();
    let state = orch.state().snapshot();
    assert_eq!(state.history.entries(), ["/a", "/a/c"]);
    assert_eq!(state.history.index(), 1);
    assert_eq!(state.current_directory, "/a/c");
}

#[tokio::test]
async fn test_back_at_history_start_is_silent_noop() {
    let backend = Arc::new(ScriptedBackend::default().with_listing("/a", vec![]));
    let orch = orchestrator_with(Arc::clone(&backend));

    orch.set_path("/a").await.unwrap();
    let reloads_before = backend.call_count("start_ls");

    orch.back().await.unwrap();

    let state = orch.state().snapshot();
    assert_eq!(state.current_directory, "/a");
    assert_eq!(state.history.index(), 0);
    // No reload was triggered by the no-op.
    assert_eq!(backend.call_count("start_ls"), reloads_before);
}

#[tokio::test]
async fn test_superseded_listing_is_discarded() {
    let backend = Arc::new(
        ScriptedBackend {
            slow_folder: Some("/slow".to_string()),
            ..Default::default()
        }
        .with_listing("/slow", vec![listing_item("/slow", "stale.txt", 1)])
        .with_listing("/fast", vec![listing_item("/fast", "fresh.txt", 2)]),
    );
    let orch = orchestrator_with(Arc::clone(&backend));

    // First navigation parks inside its first `ls` page.
    let slow = {
        let orch = Arc::clone(&orch);
        tokio::spawn(async move { orch.navigate_to("/slow").await })
    };
    backend.entered_slow.notified().await;

    // Second navigation supersedes it and queues on the stream slot.
    let mut notices = orch.state().subscribe();
    let fast = {
        let orch = Arc::clone(&orch);
        tokio::spawn(async move { orch.navigate_to("/fast").await })
    };
    // Wait until the second trigger has registered (cleared + busy).
    notices
        .recv_matching(|n| *n == Notice::SearchingChanged(true))
        .await
        .unwrap();

    // Let the parked page through; the slow worker must now discard it.
    backend.release_slow.notify_one();
    slow.await.unwrap().unwrap();
    fast.await.unwrap().unwrap();

    let state = orch.state().snapshot();
    assert_eq!(state.current_directory, "/fast");
    assert!(!state.is_searching, "exactly one worker ends authoritative");
    let names: Vec<_> = state.items.iter().map(|i| i.name.to_string()).collect();
    assert_eq!(names, ["fresh.txt"], "stale page must not survive");
}

#[tokio::test]
async fn test_delete_reports_progress_then_clears_selection_and_reloads() {
    let backend = Arc::new(
        ScriptedBackend::default()
            .with_listing("/srv", vec![listing_item("/srv", "kept.txt", 1)])
            .with_delete_pages(vec![
                json!({ "end": false, "total": 3, "deleted": 1, "last_deleted": "a.txt" }),
                json!({ "end": false, "total": 3, "deleted": 2, "last_deleted": "b.txt" }),
                json!({ "end": true, "total": 3, "deleted": 3, "last_deleted": "c.txt" }),
            ]),
    );
    let orch = orchestrator_with(Arc::clone(&backend));
    orch.set_path("/srv").await.unwrap();

    orch.select("/srv/a.txt");
    orch.select("/srv/b.txt");

    let mut notices = orch.state().subscribe();
    orch.delete(vec!["/srv/a.txt".to_string(), "/srv/b.txt".to_string()], true)
        .await
        .unwrap();

    // Collect the three footer updates, in order.
    let mut footers = Vec::new();
    while footers.len() < 3 {
        match notices.recv().await.unwrap() {
            Notice::FooterChanged(footer) if !footer.text.is_empty() => footers.push(footer),
            _ => {}
        }
    }
    assert_eq!(footers[0].text, "Deleted 1/3 - a.txt");
    assert_eq!(footers[1].text, "Deleted 2/3 - b.txt");
    assert_eq!(footers[2].text, "Deleted 3/3 - c.txt");
    assert!(footers.iter().all(|f| f.kind == FooterKind::Info));

    let state = orch.state().snapshot();
    assert!(state.selected.is_empty());
    let names: Vec<_> = state.items.iter().map(|i| i.name.to_string()).collect();
    assert_eq!(names, ["kept.txt"], "delete triggers a reload");
}

#[tokio::test(start_paused = true)]
async fn test_footer_clears_once_five_seconds_after_latest_message() {
    let backend = Arc::new(ScriptedBackend::default());
    let orch = orchestrator_with(backend);
    let mut notices = orch.state().subscribe();

    orch.footer_text("one", FooterKind::Info);
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    orch.footer_text("two", FooterKind::Info);

    // 4.9 s after the second message: still visible.
    tokio::time::sleep(std::time::Duration::from_millis(4900)).await;
    assert_eq!(orch.state().read(|s| s.footer.text.clone()), "two");

    // Past the 5 s mark: cleared.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert!(orch.state().read(|s| s.footer.is_none()));

    // Exactly one clear event: "one", "two", then a single empty footer.
    let mut seen = Vec::new();
    for _ in 0..3 {
        if let Some(Notice::FooterChanged(footer)) = notices
            .recv_matching(|n| matches!(n, Notice::FooterChanged(_)))
            .await
        {
            seen.push(footer);
        }
    }
    assert_eq!(seen[0].text, "one");
    assert_eq!(seen[1].text, "two");
    assert!(seen[2].is_none());
}

#[tokio::test]
async fn test_backend_failure_surfaces_as_footer_error() {
    let backend = Arc::new(ScriptedBackend::default().failing("create_file"));
    let orch = orchestrator_with(backend);

    let err = orch.create_file("/srv/new.txt").await.unwrap_err();
    assert!(matches!(err, RpcError::Backend { .. }));

    let footer = orch.state().read(|s| s.footer.clone());
    assert_eq!(footer.kind, FooterKind::Error);
    assert!(footer.text.contains("create_file"));
}

#[tokio::test]
async fn test_placeholder_is_appended_then_replaced_by_reload() {
    let backend = Arc::new(
        ScriptedBackend::default().with_listing("/srv", vec![listing_item("/srv", "a.txt", 1)]),
    );
    let orch = orchestrator_with(backend);
    orch.set_path("/srv").await.unwrap();

    orch.begin_create_file();
    let state = orch.state().snapshot();
    let last = state.items.last().unwrap();
    assert!(last.is_edit_mode);
    assert_eq!(last.path, "/srv/file");
    assert_eq!(state.items.len(), 2);

    // Confirming the name fires the create and the reload wipes the
    // placeholder.
    orch.create_file("/srv/notes.txt").await.unwrap();
    let state = orch.state().snapshot();
    assert!(state.items.iter().all(|i| !i.is_edit_mode));
    assert_eq!(state.items.len(), 1);
}

#[tokio::test]
async fn test_search_streams_find_pages_into_listing() {
    let backend = Arc::new(
        ScriptedBackend::default()
            .with_listing("/srv", vec![])
            .with_find_pages(vec![
                json!({ "files": [listing_item("/srv", "match-b.txt", 1)], "total": 10, "end": false }),
                json!({ "files": [listing_item("/srv", "match-a.txt", 2)], "total": 20, "end": true }),
            ]),
    );
    let orch = orchestrator_with(Arc::clone(&backend));
    orch.set_path("/srv").await.unwrap();

    orch.search("match").await.unwrap();

    let state = orch.state().snapshot();
    assert!(!state.is_searching);
    let names: Vec<_> = state.items.iter().map(|i| i.name.to_string()).collect();
    assert_eq!(names, ["match-a.txt", "match-b.txt"], "pages merged and sorted");

    // Stopping the search cancels find streams and reloads the directory.
    orch.stop_search().await.unwrap();
    assert!(backend.call_count("stop_all_streams_find") == 1);
    let state = orch.state().snapshot();
    assert!(state.items.is_empty(), "plain /srv listing is empty");
}

#[tokio::test]
async fn test_sort_change_reorders_in_place() {
    let backend = Arc::new(ScriptedBackend::default().with_listing(
        "/srv",
        vec![
            listing_item("/srv", "big.txt", 300),
            listing_item("/srv", "small.txt", 1),
            listing_item("/srv", "mid.txt", 20),
        ],
    ));
    let orch = orchestrator_with(backend);
    orch.set_path("/srv").await.unwrap();

    orch.set_sort(SortMode::Size, false);
    let names: Vec<_> = orch
        .state()
        .read(|s| s.items.iter().map(|i| i.name.to_string()).collect::<Vec<_>>());
    assert_eq!(names, ["small.txt", "mid.txt", "big.txt"]);

    orch.set_sort(SortMode::Size, true);
    let names: Vec<_> = orch
        .state()
        .read(|s| s.items.iter().map(|i| i.name.to_string()).collect::<Vec<_>>());
    assert_eq!(names, ["big.txt", "mid.txt", "small.txt"]);
}

#[tokio::test]
async fn test_quick_access_lists_home_and_disks() {
    let backend = Arc::new(ScriptedBackend::default());
    let orch = orchestrator_with(backend);

    orch.load_quick_access().await.unwrap();

    let quick = orch.state().read(|s| s.quick_access.clone());
    assert_eq!(quick.len(), 2);
    assert_eq!(quick[0].path, "/home/user");
    assert_eq!(quick[1].path, "/");
}
