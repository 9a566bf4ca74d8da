//! Chatbot webhook integration
//!
//! HTTP client for the WhatsApp chatbot webhook API plus the gateway
//! adapter that exposes it to the application layer.

pub mod client;
mod gateway;
mod models;

pub use client::{WebhookClient, WebhookConfig, WebhookError};
pub use models::{
    ActionResponse, AnalyticsData, AnalyticsResponse, BroadcastRequest, BroadcastResponse,
    ConversationHistoryResponse, ConversationRequest, HistoryEntry, MessageRequest,
    MessageResponse,
};
