//! Ports - Interfaces implemented by integration adapters

mod assistant_gateway;

pub use assistant_gateway::{
    ActionAck, AnalyticsSnapshot, AssistantGateway, AssistantReply, BroadcastOutcome,
    ConversationSnapshot, HistoryMessage, OutboundMessage,
};
