//! Gateway adapter exposing the webhook client as an application port

use application::{
    ActionAck, AnalyticsSnapshot, ApplicationError, AssistantGateway, AssistantReply,
    BroadcastOutcome, ConversationSnapshot, HistoryMessage, OutboundMessage,
};
use async_trait::async_trait;
use domain::WaId;

use crate::{
    client::{WebhookClient, WebhookError},
    models::{BroadcastRequest, MessageRequest},
};

impl From<WebhookError> for ApplicationError {
    fn from(error: WebhookError) -> Self {
        Self::Gateway(error.to_string())
    }
}

#[async_trait]
impl AssistantGateway for WebhookClient {
    async fn send_message(
        &self,
        message: OutboundMessage,
    ) -> Result<AssistantReply, ApplicationError> {
        let request = MessageRequest {
            message_body: message.body,
            wa_id: message.wa_id.into_inner(),
            name: message.name.into_inner(),
        };

        let response = Self::send_message(self, &request).await?;
        Ok(AssistantReply {
            text: response.response,
        })
    }

    async fn conversation_history(
        &self,
        wa_id: &WaId,
    ) -> Result<ConversationSnapshot, ApplicationError> {
        let response = Self::conversation_history(self, wa_id.as_str()).await?;

        Ok(ConversationSnapshot {
            wa_id: response.wa_id,
            last_messages: response
                .last_messages
                .into_iter()
                .map(|entry| HistoryMessage {
                    role: entry.role,
                    content: entry.content,
                    timestamp: entry.timestamp,
                })
                .collect(),
            handover_triggered: response.handover_triggered,
            fallback_count: response.fallback_count,
        })
    }

    async fn reset_handover(&self, wa_id: &WaId) -> Result<ActionAck, ApplicationError> {
        let response = Self::reset_handover(self, wa_id.as_str()).await?;
        Ok(ActionAck {
            message: response.message,
        })
    }

    async fn delete_conversation(&self, wa_id: &WaId) -> Result<ActionAck, ApplicationError> {
        let response = Self::delete_conversation(self, wa_id.as_str()).await?;
        Ok(ActionAck {
            message: response.message,
        })
    }

    async fn broadcast(
        &self,
        recipients: &[WaId],
        message: &str,
    ) -> Result<BroadcastOutcome, ApplicationError> {
        let request = BroadcastRequest {
            wa_ids: recipients.iter().map(ToString::to_string).collect(),
            message: message.to_string(),
        };

        let response = Self::broadcast(self, &request).await?;
        Ok(BroadcastOutcome {
            message: response.message,
            successes: response.successes,
            failures: response.failures,
        })
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot, ApplicationError> {
        let response = Self::analytics(self).await?;
        Ok(AnalyticsSnapshot {
            active_users: response.analytics.active_users,
            handovers: response.analytics.handovers,
            total_messages: response.analytics.total_messages,
        })
    }
}
