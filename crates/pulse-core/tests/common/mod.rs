use std::path::Path;

use jiff::Timestamp;
use pulse_core::{Dispatcher, Monitor, MonitorBuilder};
use tempfile::TempDir;

/// 2024-06-01T12:00:00Z
pub const NOW: i64 = 1_717_243_200;

/// One epic, one story ten days overdue, one unstarted task and one done
/// story in the Jira shape. OPS has no issues.
pub const SNAPSHOT: &str = r#"{
    "projects": [
        {"id": "1", "key": "PRJ", "name": "Payments", "projectTypeKey": "software"},
        {"id": "2", "key": "OPS", "name": "Operations"}
    ],
    "issues": {
        "PRJ": [
            {
                "id": "1", "key": "PRJ-1", "summary": "Checkout",
                "status": {"name": "In Progress", "category": "indeterminate"},
                "issueType": "Epic"
            },
            {
                "id": "2", "key": "PRJ-2", "summary": "Card form",
                "status": {"name": "In Progress", "category": "indeterminate"},
                "issueType": "Story", "priority": "High", "dueDate": "2024-05-22",
                "storyPoints": 5,
                "assignee": {"displayName": "Ada", "email": "ada@example.com"}
            },
            {
                "id": "3", "key": "PRJ-3", "summary": "Receipts",
                "status": {"name": "To Do", "category": "new"},
                "issueType": "Task"
            },
            {
                "id": "10004",
                "key": "PRJ-4",
                "fields": {
                    "summary": "Cart",
                    "status": {"name": "Done", "statusCategory": {"key": "done"}},
                    "issuetype": {"name": "Story"},
                    "customfield_10016": 3
                }
            }
        ],
        "OPS": []
    }
}"#;

pub fn now() -> Timestamp {
    Timestamp::from_second(NOW).expect("valid timestamp")
}

pub fn write_snapshot(dir: &Path, json: &str) -> std::path::PathBuf {
    let path = dir.join("snapshot.json");
    std::fs::write(&path, json).expect("Failed to write snapshot");
    path
}

/// Helper function to create a test monitor over [`SNAPSHOT`]
pub async fn create_test_monitor(dispatcher: Option<Dispatcher>) -> (TempDir, Monitor) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let snapshot = write_snapshot(temp_dir.path(), SNAPSHOT);

    let mut builder = MonitorBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_snapshot_path(Some(&snapshot));
    if let Some(dispatcher) = dispatcher {
        builder = builder.with_dispatcher(dispatcher);
    }

    let monitor = builder.build().await.expect("Failed to create monitor");
    (temp_dir, monitor)
}
