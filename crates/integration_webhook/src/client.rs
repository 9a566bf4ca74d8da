//! Chatbot webhook client
//!
//! HTTP client for the WhatsApp chatbot webhook API: message exchange,
//! conversation management, broadcast fan-out and usage analytics.

use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    ActionResponse, AnalyticsResponse, BroadcastRequest, BroadcastResponse,
    ConversationHistoryResponse, ConversationRequest, ErrorResponse, MessageRequest,
    MessageResponse,
};

/// Webhook client errors
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Connection to the webhook backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the webhook backend failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Backend rejected the request
    #[error("Backend error (HTTP {status}): {detail}")]
    Backend { status: u16, detail: String },

    /// Failed to parse a response from the webhook backend
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Webhook backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Webhook API base URL (default: <http://localhost:8000>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// HTTP client for the chatbot webhook API
#[derive(Debug)]
pub struct WebhookClient {
    client: Client,
    config: WebhookConfig,
}

impl WebhookClient {
    /// Create a new webhook client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WebhookConfig) -> Result<Self, WebhookError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WebhookError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WebhookError> {
        Self::new(WebhookConfig::default())
    }

    /// Base URL the client talks to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Send one visitor message and wait for the assistant's reply
    #[instrument(skip(self, request), fields(wa_id = %request.wa_id))]
    pub async fn send_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, WebhookError> {
        self.post_json("message", request).await
    }

    /// Fetch the stored conversation for one visitor
    #[instrument(skip(self), fields(wa_id = %wa_id))]
    pub async fn conversation_history(
        &self,
        wa_id: &str,
    ) -> Result<ConversationHistoryResponse, WebhookError> {
        let request = ConversationRequest {
            wa_id: wa_id.to_string(),
        };
        self.post_json("conversation_history", &request).await
    }

    /// Hand a conversation back to the bot after a human takeover
    #[instrument(skip(self), fields(wa_id = %wa_id))]
    pub async fn reset_handover(&self, wa_id: &str) -> Result<ActionResponse, WebhookError> {
        let request = ConversationRequest {
            wa_id: wa_id.to_string(),
        };
        self.post_json("reset_handover", &request).await
    }

    /// Delete the stored conversation for one visitor
    #[instrument(skip(self), fields(wa_id = %wa_id))]
    pub async fn delete_conversation(&self, wa_id: &str) -> Result<ActionResponse, WebhookError> {
        let request = ConversationRequest {
            wa_id: wa_id.to_string(),
        };
        self.post_json("delete_conversation", &request).await
    }

    /// Send one message to many visitors
    #[instrument(skip(self, request), fields(recipient_count = request.wa_ids.len()))]
    pub async fn broadcast(
        &self,
        request: &BroadcastRequest,
    ) -> Result<BroadcastResponse, WebhookError> {
        self.post_json("broadcast", request).await
    }

    /// Fetch aggregate usage counters
    #[instrument(skip(self))]
    pub async fn analytics(&self) -> Result<AnalyticsResponse, WebhookError> {
        let url = self.endpoint("analytics");
        debug!(url = %url, "Fetching analytics");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WebhookError::RequestFailed(e.to_string()))?;

        Self::decode(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/webhook/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// POST a JSON body and decode the JSON reply
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, WebhookError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(url = %url, "Calling webhook backend");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| WebhookError::RequestFailed(e.to_string()))?;

        Self::decode(response).await
    }

    /// Triage the HTTP status, surfacing the backend `detail` when present
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, WebhookError> {
        let status = response.status();

        if !status.is_success() {
            let detail = match response.json::<ErrorResponse>().await {
                Ok(body) if !body.detail.is_empty() => body.detail,
                _ => format!("HTTP {status}"),
            };
            return Err(WebhookError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WebhookError::ParseError(e.to_string()))
    }
}
