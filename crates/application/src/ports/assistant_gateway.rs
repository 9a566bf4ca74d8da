//! Assistant gateway port - Interface to the chatbot webhook backend
//!
//! Abstracts the remote API the widget and the operator console talk
//! to: message exchange, conversation management, broadcast fan-out and
//! usage analytics.

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use domain::{DisplayName, WaId};
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A visitor message on its way to the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Conversation identity the backend keys on
    pub wa_id: WaId,
    /// Visitor name shown to operators
    pub name: DisplayName,
    /// Message text, already trimmed
    pub body: String,
}

impl OutboundMessage {
    /// Create a new outbound message
    #[must_use]
    pub fn new(wa_id: WaId, name: DisplayName, body: impl Into<String>) -> Self {
        Self {
            wa_id,
            name,
            body: body.into(),
        }
    }
}

/// The assistant's reply to one outbound message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Reply text, possibly markdown
    pub text: String,
}

/// One message of a stored conversation, as the backend remembers it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMessage {
    /// Backend role label, usually "user" or "assistant"
    pub role: String,
    /// Message text
    pub content: String,
    /// Backend-formatted timestamp, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Stored conversation state for one visitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    /// Identity as echoed by the backend
    pub wa_id: String,
    /// Recent messages, oldest first
    pub last_messages: Vec<HistoryMessage>,
    /// Whether a human operator has taken the conversation over
    pub handover_triggered: bool,
    /// How often the bot fell back to a canned reply
    pub fallback_count: u32,
}

/// Acknowledgement for state-changing conversation operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionAck {
    /// Human-readable backend summary
    pub message: String,
}

/// Result of a broadcast fan-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastOutcome {
    /// Human-readable backend summary
    pub message: String,
    /// Identities the backend delivered to
    pub successes: Vec<String>,
    /// Identities the backend could not deliver to
    pub failures: Vec<String>,
}

/// Aggregate usage counters reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Conversations with recent activity
    pub active_users: u64,
    /// Conversations handed over to a human operator
    pub handovers: u64,
    /// Messages exchanged in total
    pub total_messages: u64,
}

/// Gateway to the chatbot webhook backend
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Send one visitor message and wait for the assistant's reply
    async fn send_message(
        &self,
        message: OutboundMessage,
    ) -> Result<AssistantReply, ApplicationError>;

    /// Fetch the stored conversation for one visitor
    async fn conversation_history(
        &self,
        wa_id: &WaId,
    ) -> Result<ConversationSnapshot, ApplicationError>;

    /// Hand a conversation back to the bot after a human takeover
    async fn reset_handover(&self, wa_id: &WaId) -> Result<ActionAck, ApplicationError>;

    /// Delete the stored conversation for one visitor
    async fn delete_conversation(&self, wa_id: &WaId) -> Result<ActionAck, ApplicationError>;

    /// Send one message to many visitors
    async fn broadcast(
        &self,
        recipients: &[WaId],
        message: &str,
    ) -> Result<BroadcastOutcome, ApplicationError>;

    /// Fetch aggregate usage counters
    async fn analytics(&self) -> Result<AnalyticsSnapshot, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbound_message_serializes_with_wire_field_names() {
        let message = OutboundMessage::new(
            WaId::new("demo-user").unwrap(),
            DisplayName::new("Ada").unwrap(),
            "hello",
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["wa_id"], "demo-user");
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["body"], "hello");
    }

    #[test]
    fn history_message_timestamp_is_optional() {
        let message: HistoryMessage =
            serde_json::from_str(r#"{"role":"user","content":"hi"}"#).unwrap();
        assert_eq!(message.role, "user");
        assert!(message.timestamp.is_none());
    }
}
