mod common;

use common::{create_test_monitor, now};
use pulse_core::{
    notify::{SendGridMailer, TeamsWebhook},
    params::{SendNotification, SetSetting},
    Channel, Dispatcher, Monitor, NotificationKind,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

async fn monitor_against(server: &MockServer) -> (TempDir, Monitor) {
    let dispatcher = Dispatcher::new(SendGridMailer::new(server.uri()), TeamsWebhook::default());
    create_test_monitor(Some(dispatcher)).await
}

async fn set(monitor: &Monitor, key: &str, value: &str) {
    monitor
        .set_setting(&SetSetting {
            key: key.to_string(),
            value: value.to_string(),
        })
        .await
        .unwrap();
}

async fn configure_email(monitor: &Monitor) {
    set(monitor, "email_api_key", "SG.test-key").await;
    set(monitor, "from_email", "bot@example.com").await;
}

fn send(issue_key: &str, kind: NotificationKind, channel: Channel) -> SendNotification {
    SendNotification {
        project: "PRJ".to_string(),
        issue_key: issue_key.to_string(),
        kind,
        channel,
        message: None,
    }
}

async fn single_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    serde_json::from_slice(&requests[0].body).unwrap()
}

#[tokio::test]
async fn test_email_escalation_reaches_owner_and_manager() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .and(header("authorization", "Bearer SG.test-key"))
        .and(body_partial_json(json!({
            "subject": "[ESCALATION] PRJ-2: Card form",
            "from": {"email": "bot@example.com", "name": "Project Health Bot"}
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let (_temp_dir, monitor) = monitor_against(&server).await;
    configure_email(&monitor).await;
    set(&monitor, "manager_name", "Grace").await;
    set(&monitor, "manager_email", "grace@example.com").await;

    let outcome = monitor
        .notify(
            &send("PRJ-2", NotificationKind::Escalation, Channel::Email),
            now(),
        )
        .await
        .unwrap();
    assert!(outcome.success, "{outcome:?}");
    assert_eq!(outcome.error, None);

    let body = single_body(&server).await;
    let to: Vec<&str> = body["personalizations"][0]["to"]
        .as_array()
        .unwrap()
        .iter()
        .map(|address| address["email"].as_str().unwrap())
        .collect();
    assert_eq!(to, vec!["ada@example.com", "grace@example.com"]);

    let text = body["content"][0]["value"].as_str().unwrap();
    assert!(text.contains("Escalation Alert: PRJ-2: Card form"));
    assert!(text.contains("Escalation Level: 2"));
    assert_eq!(body["content"][1]["type"], "text/html");
}

#[tokio::test]
async fn test_chat_follow_up_posts_message_card() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_partial_json(json!({
            "@type": "MessageCard",
            "themeColor": "0076D7",
            "summary": "[Follow-up] PRJ-3: Receipts"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (_temp_dir, monitor) = monitor_against(&server).await;
    set(&monitor, "chat_webhook_url", &format!("{}/hook", server.uri())).await;

    let mut params = send("PRJ-3", NotificationKind::FollowUp, Channel::Chat);
    params.message = Some("Receipts need an owner".to_string());
    let outcome = monitor.notify(&params, now()).await.unwrap();
    assert!(outcome.success, "{outcome:?}");

    let card = single_body(&server).await;
    let section = &card["sections"][0];
    assert_eq!(section["text"], "Receipts need an owner");
    assert_eq!(section["facts"][0], json!({"name": "Issue", "value": "PRJ-3"}));
    assert_eq!(
        section["facts"][4],
        json!({"name": "Assignee", "value": "Unassigned"})
    );
}

#[tokio::test]
async fn test_rejected_email_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .expect(1)
        .mount(&server)
        .await;

    let (_temp_dir, monitor) = monitor_against(&server).await;
    configure_email(&monitor).await;

    let outcome = monitor
        .notify(
            &send("PRJ-2", NotificationKind::FollowUp, Channel::Email),
            now(),
        )
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("SendGrid error: 401"));
}

#[tokio::test]
async fn test_chat_failure_does_not_fall_back_to_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let (_temp_dir, monitor) = monitor_against(&server).await;
    configure_email(&monitor).await;
    set(&monitor, "manager_email", "grace@example.com").await;
    set(&monitor, "chat_webhook_url", &format!("{}/hook", server.uri())).await;

    let outcome = monitor
        .notify(
            &send("PRJ-2", NotificationKind::Escalation, Channel::Chat),
            now(),
        )
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Chat webhook error: 500"));
}

#[tokio::test]
async fn test_follow_up_without_address_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let (_temp_dir, monitor) = monitor_against(&server).await;
    configure_email(&monitor).await;

    let outcome = monitor
        .notify(
            &send("PRJ-3", NotificationKind::FollowUp, Channel::Email),
            now(),
        )
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(
        outcome.error.as_deref(),
        Some("No recipient has an email address")
    );
}

#[tokio::test]
async fn test_escalation_without_manager_reaches_no_channel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let (_temp_dir, monitor) = monitor_against(&server).await;
    configure_email(&monitor).await;
    set(&monitor, "manager_name", "Grace").await;
    set(&monitor, "chat_webhook_url", &format!("{}/hook", server.uri())).await;

    for channel in [Channel::Email, Channel::Chat] {
        let outcome = monitor
            .notify(&send("PRJ-2", NotificationKind::Escalation, channel), now())
            .await
            .unwrap();
        assert!(!outcome.success);
        assert!(outcome
            .error
            .as_deref()
            .unwrap()
            .ends_with("set 'manager_email' first"));
    }
}
