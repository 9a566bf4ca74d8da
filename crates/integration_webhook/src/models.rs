//! Wire types for the chatbot webhook API

use serde::{Deserialize, Serialize};

/// Body for `POST /webhook/message`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    /// Message text as typed by the visitor
    pub message_body: String,
    /// Conversation identity the backend keys on
    pub wa_id: String,
    /// Visitor display name
    pub name: String,
}

/// Reply from `POST /webhook/message`
///
/// The backend sends more fields; only the reply text is consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Assistant reply text, possibly markdown
    pub response: String,
}

/// Body for the conversation-scoped endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRequest {
    /// Conversation identity
    pub wa_id: String,
}

/// Acknowledgement from `reset_handover` and `delete_conversation`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    /// Outcome label, usually "success"
    pub status: String,
    /// Human-readable summary
    pub message: String,
}

/// One stored message in a conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Reply from `POST /webhook/conversation_history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHistoryResponse {
    pub status: String,
    pub wa_id: String,
    /// Recent messages, oldest first
    #[serde(default)]
    pub last_messages: Vec<HistoryEntry>,
    #[serde(default)]
    pub handover_triggered: bool,
    #[serde(default)]
    pub fallback_count: u32,
}

/// Body for `POST /webhook/broadcast`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastRequest {
    /// Conversation identities to deliver to
    pub wa_ids: Vec<String>,
    /// Message text
    pub message: String,
}

/// Reply from `POST /webhook/broadcast`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub successes: Vec<String>,
    #[serde(default)]
    pub failures: Vec<String>,
}

/// Counters nested in the analytics reply
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalyticsData {
    pub active_users: u64,
    pub handovers: u64,
    pub total_messages: u64,
}

/// Reply from `GET /webhook/analytics`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub status: String,
    pub analytics: AnalyticsData,
}

/// Error body the backend attaches to non-2xx replies
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_request_uses_wire_field_names() {
        let request = MessageRequest {
            message_body: "hello".to_string(),
            wa_id: "widget-user-1".to_string(),
            name: "Website Visitor".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message_body"], "hello");
        assert_eq!(json["wa_id"], "widget-user-1");
        assert_eq!(json["name"], "Website Visitor");
    }

    #[test]
    fn message_response_ignores_extra_fields() {
        let response: MessageResponse = serde_json::from_str(
            r#"{"status":"success","response":"Hi!","handover":false}"#,
        )
        .unwrap();
        assert_eq!(response.response, "Hi!");
    }

    #[test]
    fn history_response_defaults_missing_collections() {
        let response: ConversationHistoryResponse =
            serde_json::from_str(r#"{"status":"success","wa_id":"demo-user"}"#).unwrap();

        assert!(response.last_messages.is_empty());
        assert!(!response.handover_triggered);
        assert_eq!(response.fallback_count, 0);
    }

    #[test]
    fn history_entry_timestamp_is_optional() {
        let entry: HistoryEntry =
            serde_json::from_str(r#"{"role":"assistant","content":"hello"}"#).unwrap();
        assert!(entry.timestamp.is_none());
    }

    #[test]
    fn error_response_tolerates_missing_detail() {
        let error: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert!(error.detail.is_empty());
    }
}
