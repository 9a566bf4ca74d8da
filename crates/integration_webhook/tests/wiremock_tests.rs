//! Integration tests for the webhook client using wiremock
//!
//! These tests verify the client's behavior against a mock HTTP server:
//! success paths, backend error details, and malformed replies.

use integration_webhook::{BroadcastRequest, MessageRequest, WebhookClient, WebhookConfig, WebhookError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

fn create_test_client(mock_server: &MockServer) -> WebhookClient {
    WebhookClient::new(WebhookConfig {
        base_url: mock_server.uri(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn message_request() -> MessageRequest {
    MessageRequest {
        message_body: "hello".to_string(),
        wa_id: "widget-user-123".to_string(),
        name: "Website Visitor".to_string(),
    }
}

#[tokio::test]
async fn send_message_returns_reply_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/message"))
        .and(body_json(serde_json::json!({
            "message_body": "hello",
            "wa_id": "widget-user-123",
            "name": "Website Visitor"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "response": "Hi! How can I help?"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client.send_message(&message_request()).await.unwrap();

    assert_eq!(response.response, "Hi! How can I help?");
}

#[tokio::test]
async fn send_message_surfaces_backend_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/message"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "detail": "Conversation is in handover mode"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.send_message(&message_request()).await.unwrap_err();

    match err {
        WebhookError::Backend { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "Conversation is in handover mode");
        },
        other => panic!("Expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn send_message_falls_back_to_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/message"))
        .respond_with(ResponseTemplate::new(503).set_body_string("gateway timeout"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.send_message(&message_request()).await.unwrap_err();

    match err {
        WebhookError::Backend { status, detail } => {
            assert_eq!(status, 503);
            assert!(detail.contains("503"), "detail was: {detail}");
        },
        other => panic!("Expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_detail_falls_back_to_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/message"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "detail": ""
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.send_message(&message_request()).await.unwrap_err();

    match err {
        WebhookError::Backend { status, detail } => {
            assert_eq!(status, 400);
            assert!(detail.contains("400"), "detail was: {detail}");
        },
        other => panic!("Expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn send_message_rejects_malformed_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.send_message(&message_request()).await.unwrap_err();

    assert!(matches!(err, WebhookError::ParseError(_)));
}

#[tokio::test]
async fn conversation_history_maps_the_full_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/conversation_history"))
        .and(body_json(serde_json::json!({ "wa_id": "demo-user" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "wa_id": "demo-user",
            "last_messages": [
                { "role": "user", "content": "hi", "timestamp": "2025-03-01T10:00:00" },
                { "role": "assistant", "content": "hello!" }
            ],
            "handover_triggered": true,
            "fallback_count": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let history = client.conversation_history("demo-user").await.unwrap();

    assert_eq!(history.wa_id, "demo-user");
    assert_eq!(history.last_messages.len(), 2);
    assert_eq!(history.last_messages[0].role, "user");
    assert_eq!(
        history.last_messages[0].timestamp.as_deref(),
        Some("2025-03-01T10:00:00")
    );
    assert!(history.last_messages[1].timestamp.is_none());
    assert!(history.handover_triggered);
    assert_eq!(history.fallback_count, 2);
}

#[tokio::test]
async fn conversation_history_tolerates_minimal_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/conversation_history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "wa_id": "demo-user"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let history = client.conversation_history("demo-user").await.unwrap();

    assert!(history.last_messages.is_empty());
    assert!(!history.handover_triggered);
    assert_eq!(history.fallback_count, 0);
}

#[tokio::test]
async fn reset_handover_posts_the_conversation_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/reset_handover"))
        .and(body_json(serde_json::json!({ "wa_id": "demo-user" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "message": "Handover reset for demo-user"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let ack = client.reset_handover("demo-user").await.unwrap();

    assert_eq!(ack.status, "success");
    assert_eq!(ack.message, "Handover reset for demo-user");
}

#[tokio::test]
async fn delete_conversation_acknowledges() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/delete_conversation"))
        .and(body_json(serde_json::json!({ "wa_id": "demo-user" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "message": "Conversation deleted"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let ack = client.delete_conversation("demo-user").await.unwrap();

    assert_eq!(ack.message, "Conversation deleted");
}

#[tokio::test]
async fn broadcast_reports_partial_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/broadcast"))
        .and(body_json(serde_json::json!({
            "wa_ids": ["visitor-a", "visitor-b", "visitor-c"],
            "message": "We will be offline tonight"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "partial",
            "message": "Broadcast sent to 2 of 3 recipients",
            "successes": ["visitor-a", "visitor-c"],
            "failures": ["visitor-b"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let request = BroadcastRequest {
        wa_ids: vec![
            "visitor-a".to_string(),
            "visitor-b".to_string(),
            "visitor-c".to_string(),
        ],
        message: "We will be offline tonight".to_string(),
    };
    let outcome = client.broadcast(&request).await.unwrap();

    assert_eq!(outcome.successes.len(), 2);
    assert_eq!(outcome.failures, vec!["visitor-b".to_string()]);
    assert_eq!(outcome.message, "Broadcast sent to 2 of 3 recipients");
}

#[tokio::test]
async fn analytics_returns_counters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhook/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "analytics": {
                "active_users": 42,
                "handovers": 7,
                "total_messages": 1234
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let analytics = client.analytics().await.unwrap();

    assert_eq!(analytics.analytics.active_users, 42);
    assert_eq!(analytics.analytics.handovers, 7);
    assert_eq!(analytics.analytics.total_messages, 1234);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhook/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "analytics": { "active_users": 1, "handovers": 0, "total_messages": 3 }
        })))
        .mount(&mock_server)
        .await;

    let client = WebhookClient::new(WebhookConfig {
        base_url: format!("{}/", mock_server.uri()),
        timeout_secs: 5,
    })
    .unwrap();

    assert!(client.analytics().await.is_ok());
}

mod gateway {
    //! The same client seen through the application port

    use application::{ApplicationError, AssistantGateway, OutboundMessage};
    use domain::{DisplayName, WaId};

    use super::*;

    #[tokio::test]
    async fn send_maps_port_types_onto_the_wire() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook/message"))
            .and(body_json(serde_json::json!({
                "message_body": "hello",
                "wa_id": "491701234567",
                "name": "Ada"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "response": "Hello Ada!"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let message = OutboundMessage::new(
            WaId::new("491701234567").unwrap(),
            DisplayName::new("Ada").unwrap(),
            "hello",
        );

        let reply = AssistantGateway::send_message(&client, message).await.unwrap();
        assert_eq!(reply.text, "Hello Ada!");
    }

    #[tokio::test]
    async fn backend_errors_become_gateway_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook/message"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "detail": "model unavailable"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let message = OutboundMessage::new(
            WaId::new("demo-user").unwrap(),
            DisplayName::default(),
            "hello",
        );

        let err = AssistantGateway::send_message(&client, message).await.unwrap_err();
        match err {
            ApplicationError::Gateway(detail) => {
                assert!(detail.contains("model unavailable"), "got: {detail}");
            },
            other => panic!("Expected gateway error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn broadcast_stringifies_recipient_ids() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook/broadcast"))
            .and(body_json(serde_json::json!({
                "wa_ids": ["visitor-a", "visitor-b"],
                "message": "maintenance at noon"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "message": "Broadcast sent to 2 recipients",
                "successes": ["visitor-a", "visitor-b"],
                "failures": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let recipients = vec![
            WaId::new("visitor-a").unwrap(),
            WaId::new("visitor-b").unwrap(),
        ];

        let outcome = AssistantGateway::broadcast(&client, &recipients, "maintenance at noon")
            .await
            .unwrap();

        assert_eq!(outcome.successes.len(), 2);
        assert!(outcome.failures.is_empty());
    }
}
