//! Webhook notifier against a mock server

use mockito::{Matcher, Server};
use serde_json::json;
use vigil::adapters::notify::{Notifier, WebhookNotifier};
use vigil::config::secret_string;
use vigil::domain::VigilError;

#[tokio::test]
async fn test_posts_subject_and_message_with_bearer_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/hooks/vigil")
        .match_header("authorization", "Bearer s3cr3t")
        .match_body(Matcher::Json(json!({
            "subject": "Missing Drug Names Notification",
            "message": "zyrtec"
        })))
        .with_status(204)
        .create_async()
        .await;

    let notifier = WebhookNotifier::new(
        &format!("{}/hooks/vigil", server.url()),
        Some(secret_string("s3cr3t".to_string())),
        5,
    )
    .unwrap();

    notifier
        .notify("Missing Drug Names Notification", "zyrtec")
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/hook")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .create_async()
        .await;

    let notifier = WebhookNotifier::new(&format!("{}/hook", server.url()), None, 5).unwrap();
    notifier.notify("subject", "message").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_a_notification_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/hook")
        .with_status(500)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let notifier = WebhookNotifier::new(&format!("{}/hook", server.url()), None, 5).unwrap();
    let err = notifier.notify("subject", "message").await.unwrap_err();

    match err {
        VigilError::Notification(message) => {
            assert!(message.contains("500"), "{message}");
            assert!(message.contains("upstream unavailable"), "{message}");
        }
        other => panic!("expected notification error, got {other:?}"),
    }
}
