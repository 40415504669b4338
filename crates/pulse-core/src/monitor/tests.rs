//! Tests for the Monitor facade.

use jiff::Timestamp;
use tempfile::TempDir;

use super::{Monitor, MonitorBuilder};
use crate::{
    error::PulseError,
    notify::{Channel, NotificationKind},
    params::{AssistantContext, ProjectKey, SendNotification, SetSetting, UnsetSetting},
};

// 2024-06-01T12:00:00Z
const NOW: i64 = 1_717_243_200;

const SNAPSHOT: &str = r#"{
    "projects": [{"id": "1", "key": "PRJ", "name": "Payments"}],
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
                "id": "4", "key": "PRJ-4", "summary": "Cart",
                "status": {"name": "Done", "category": "done"},
                "issueType": "Story", "storyPoints": 3
            }
        ]
    }
}"#;

fn now() -> Timestamp {
    Timestamp::from_second(NOW).unwrap()
}

fn prj() -> ProjectKey {
    ProjectKey {
        project: "PRJ".to_string(),
    }
}

async fn monitor() -> (TempDir, Monitor) {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("snapshot.json");
    std::fs::write(&snapshot, SNAPSHOT).unwrap();

    let monitor = MonitorBuilder::new()
        .with_database_path(Some(dir.path().join("pulse.db")))
        .with_snapshot_path(Some(&snapshot))
        .build()
        .await
        .unwrap();
    (dir, monitor)
}

fn set(key: &str, value: &str) -> SetSetting {
    SetSetting {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[tokio::test]
async fn test_projects_from_snapshot() {
    let (_dir, monitor) = monitor().await;
    let projects = monitor.projects().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects.0[0].name, "Payments");
}

#[tokio::test]
async fn test_health_uses_stored_rates() {
    let (_dir, monitor) = monitor().await;

    let before = monitor.health(&prj(), now()).await.unwrap();
    assert_eq!(before.cost.estimated_cost, 8.0 * 8.0 * 40.0);

    monitor.set_setting(&set("hourly_rate", "100")).await.unwrap();
    let after = monitor.health(&prj(), now()).await.unwrap();
    assert_eq!(after.cost.hourly_rate, 100.0);
    assert_eq!(after.cost.estimated_cost, 8.0 * 8.0 * 100.0);
    assert_eq!(after.schedule, before.schedule);
}

#[tokio::test]
async fn test_follow_ups_and_escalations() {
    let (_dir, monitor) = monitor().await;

    let follow_ups = monitor.follow_ups(&prj(), now()).await.unwrap();
    let keys: Vec<&str> = follow_ups.iter().map(|i| i.issue.key.as_str()).collect();
    assert_eq!(keys, vec!["PRJ-2", "PRJ-3"]);

    let escalations = monitor.escalations(&prj(), now()).await.unwrap();
    assert_eq!(escalations.0.level, 2);
    assert_eq!(escalations.0.escalated_items[0].issue.key, "PRJ-2");
    assert_eq!(escalations.0.escalated_items[0].days_overdue, 10);
}

#[tokio::test]
async fn test_unknown_project() {
    let (_dir, monitor) = monitor().await;
    let err = monitor
        .health(
            &ProjectKey {
                project: "NOPE".to_string(),
            },
            now(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PulseError::ProjectNotFound { .. }));
}

#[tokio::test]
async fn test_settings_round_trip() {
    let (_dir, monitor) = monitor().await;

    monitor
        .set_setting(&set("manager-email", "boss@example.com"))
        .await
        .unwrap();
    monitor.set_setting(&set("manager_name", "Grace")).await.unwrap();
    let settings = monitor.settings().await.unwrap();
    let manager = settings.notifications.manager.unwrap();
    assert_eq!(manager.name, "Grace");
    assert_eq!(manager.email, "boss@example.com");

    let removed = monitor
        .unset_setting(&UnsetSetting {
            key: "manager_email".to_string(),
        })
        .await
        .unwrap();
    assert!(removed);
    assert!(monitor.settings().await.unwrap().notifications.manager.is_none());
}

#[tokio::test]
async fn test_set_setting_rejects_invalid_values() {
    let (_dir, monitor) = monitor().await;

    let err = monitor.set_setting(&set("theme", "dark")).await.unwrap_err();
    assert!(matches!(err, PulseError::InvalidInput { .. }));

    let err = monitor
        .set_setting(&set("hours_per_story_point", "-2"))
        .await
        .unwrap_err();
    assert!(matches!(err, PulseError::InvalidInput { .. }));
    assert!(monitor.setting_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_assistant_context_with_question() {
    let (_dir, monitor) = monitor().await;
    let request = monitor
        .assistant_context(
            &AssistantContext {
                project: "PRJ".to_string(),
                question: Some("What is late?".to_string()),
            },
            now(),
        )
        .await
        .unwrap();

    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].content, "What is late?");
    assert_eq!(request.context, monitor.health(&prj(), now()).await.unwrap());
}

#[tokio::test]
async fn test_notify_chat_not_configured() {
    let (_dir, monitor) = monitor().await;
    let outcome = monitor
        .notify(
            &SendNotification {
                project: "PRJ".to_string(),
                issue_key: "PRJ-2".to_string(),
                kind: NotificationKind::Escalation,
                channel: Channel::Chat,
                message: None,
            },
            now(),
        )
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(
        outcome.error.as_deref(),
        Some("Chat channel is not configured: set 'chat_webhook_url' first")
    );
}

#[tokio::test]
async fn test_notify_requires_flagged_issue() {
    let (_dir, monitor) = monitor().await;
    let err = monitor
        .notify(
            &SendNotification {
                project: "PRJ".to_string(),
                issue_key: "PRJ-3".to_string(),
                kind: NotificationKind::Escalation,
                channel: Channel::Email,
                message: None,
            },
            now(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PulseError::IssueNotFlagged { .. }));
}
