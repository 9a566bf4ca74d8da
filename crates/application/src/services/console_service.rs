//! Console service - Operator commands against the webhook backend

use std::{fmt, sync::Arc};

use domain::{DisplayName, DomainError, WaId};
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{
        ActionAck, AnalyticsSnapshot, AssistantGateway, AssistantReply, BroadcastOutcome,
        ConversationSnapshot, OutboundMessage,
    },
};

/// Service backing the operator console: direct sends, conversation
/// management, broadcast and analytics
pub struct ConsoleService {
    gateway: Arc<dyn AssistantGateway>,
}

impl fmt::Debug for ConsoleService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleService").finish_non_exhaustive()
    }
}

impl ConsoleService {
    /// Create a new console service
    pub fn new(gateway: Arc<dyn AssistantGateway>) -> Self {
        Self { gateway }
    }

    /// Send a message into one conversation on the visitor's behalf
    #[instrument(skip(self, body), fields(wa_id = %wa_id, body_len = body.len()))]
    pub async fn send_direct(
        &self,
        wa_id: &WaId,
        name: &DisplayName,
        body: &str,
    ) -> Result<AssistantReply, ApplicationError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(DomainError::ValidationError("message is required".to_string()).into());
        }

        let message = OutboundMessage::new(wa_id.clone(), name.clone(), body);
        self.gateway.send_message(message).await
    }

    /// Fetch the stored conversation for one visitor
    #[instrument(skip(self), fields(wa_id = %wa_id))]
    pub async fn history(&self, wa_id: &WaId) -> Result<ConversationSnapshot, ApplicationError> {
        self.gateway.conversation_history(wa_id).await
    }

    /// Hand a conversation back to the bot after a human takeover
    #[instrument(skip(self), fields(wa_id = %wa_id))]
    pub async fn reset_handover(&self, wa_id: &WaId) -> Result<ActionAck, ApplicationError> {
        self.gateway.reset_handover(wa_id).await
    }

    /// Delete the stored conversation for one visitor
    #[instrument(skip(self), fields(wa_id = %wa_id))]
    pub async fn delete_conversation(&self, wa_id: &WaId) -> Result<ActionAck, ApplicationError> {
        self.gateway.delete_conversation(wa_id).await
    }

    /// Send one message to many conversations
    ///
    /// Blank recipient lines are dropped before the fan-out; an empty
    /// message or recipient list is refused without touching the
    /// backend.
    #[instrument(skip(self, recipients, message), fields(recipient_count = recipients.len()))]
    pub async fn broadcast(
        &self,
        recipients: &[String],
        message: &str,
    ) -> Result<BroadcastOutcome, ApplicationError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::ValidationError(
                "broadcast message is required".to_string(),
            )
            .into());
        }

        let recipients: Vec<WaId> = recipients
            .iter()
            .filter(|id| !id.trim().is_empty())
            .map(|id| WaId::new(id.as_str()))
            .collect::<Result<_, _>>()?;

        if recipients.is_empty() {
            return Err(DomainError::ValidationError(
                "at least one recipient is required".to_string(),
            )
            .into());
        }

        debug!(recipients = recipients.len(), "Broadcasting message");
        self.gateway.broadcast(&recipients, message).await
    }

    /// Fetch aggregate usage counters
    #[instrument(skip(self))]
    pub async fn analytics(&self) -> Result<AnalyticsSnapshot, ApplicationError> {
        self.gateway.analytics().await
    }
}
