//! Widget session - Send/render lifecycle of one embedded widget
//!
//! Owns the transcript, the chrome state machine, and the send pipeline
//! of one widget instance. Hosts with their own event loop drive sends
//! through [`WidgetSession::begin_send`] / [`WidgetSession::complete_send`];
//! everyone else can use [`WidgetSession::send_message`].

use std::{fmt, sync::Arc};

use domain::{Transcript, WidgetConfig, WidgetId, WidgetState};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{AssistantGateway, AssistantReply, OutboundMessage},
};

/// One embedded chat widget: transcript, chrome state and send pipeline
///
/// Sends are serialized per instance: while a reply is pending the
/// input is considered busy and further sends are refused.
pub struct WidgetSession {
    id: WidgetId,
    config: WidgetConfig,
    state: WidgetState,
    transcript: Transcript,
    gateway: Arc<dyn AssistantGateway>,
}

impl fmt::Debug for WidgetSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("entries", &self.transcript.len())
            .finish_non_exhaustive()
    }
}

impl WidgetSession {
    /// Greeting the transcript opens with
    pub const GREETING: &'static str = "Hi! I'm your AI assistant. How can I help you today?";

    /// Reply shown when a send fails for any reason
    pub const FALLBACK_REPLY: &'static str = "Sorry, I encountered an error. Please try again.";

    /// Create a session for one widget instance
    #[must_use]
    pub fn new(config: WidgetConfig, gateway: Arc<dyn AssistantGateway>) -> Self {
        let mut transcript = Transcript::new();
        transcript.push_bot(Self::GREETING);

        Self {
            id: WidgetId::new(),
            config,
            state: WidgetState::default(),
            transcript,
            gateway,
        }
    }

    /// Instance identity, distinct per embedded widget
    pub const fn id(&self) -> WidgetId {
        self.id
    }

    /// Configuration captured at construction
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Current chrome state
    pub const fn state(&self) -> WidgetState {
        self.state
    }

    /// Everything the widget renders, in order
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Launcher affordance activated
    pub fn toggle_launcher(&mut self) {
        self.state = self.state.toggle_launcher();
    }

    /// Minimize control activated
    pub fn toggle_minimize(&mut self) {
        self.state = self.state.toggle_minimize();
    }

    /// Close control activated
    pub fn close(&mut self) {
        self.state = self.state.close();
    }

    /// A send is in flight and the input is disabled
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.transcript.is_awaiting_reply()
    }

    /// Start the send pipeline for the typed input
    ///
    /// The input is trimmed; blank input and sends while busy are
    /// refused and leave the transcript untouched. On acceptance the
    /// user entry and the pending-reply marker are already in the
    /// transcript when this returns, and the returned [`PendingSend`]
    /// must be dispatched and fed back via [`Self::complete_send`].
    #[instrument(skip(self, input), fields(widget_id = %self.id))]
    pub fn begin_send(&mut self, input: &str) -> Option<PendingSend> {
        let body = input.trim();

        if body.is_empty() {
            debug!("Ignoring blank input");
            return None;
        }

        if self.is_busy() {
            debug!("Refusing send while a reply is pending");
            return None;
        }

        self.transcript.push_user(body);
        self.transcript.begin_awaiting_reply();

        Some(PendingSend {
            message: OutboundMessage::new(
                self.config.wa_id().clone(),
                self.config.name().clone(),
                body,
            ),
            gateway: Arc::clone(&self.gateway),
        })
    }

    /// Finish the send pipeline with the gateway outcome
    ///
    /// Removes the pending-reply marker and appends either the reply
    /// text or the fixed fallback line. A completion without a matching
    /// [`Self::begin_send`] is ignored.
    #[instrument(skip(self, outcome), fields(widget_id = %self.id))]
    pub fn complete_send(&mut self, outcome: Result<AssistantReply, ApplicationError>) {
        if !self.transcript.end_awaiting_reply() {
            warn!("Completion without a pending send, ignoring");
            return;
        }

        match outcome {
            Ok(reply) => self.transcript.push_bot(reply.text),
            Err(error) => {
                warn!(%error, "Send failed, showing fallback reply");
                self.transcript.push_bot(Self::FALLBACK_REPLY);
            },
        }
    }

    /// Run the whole send pipeline in place
    ///
    /// Returns whether the input was accepted.
    pub async fn send_message(&mut self, input: &str) -> bool {
        match self.begin_send(input) {
            Some(pending) => {
                let outcome = pending.dispatch().await;
                self.complete_send(outcome);
                true
            },
            None => false,
        }
    }
}

/// An accepted send, ready to be dispatched to the gateway
///
/// Owns everything it needs so hosts can move it into a spawned task
/// while the session stays behind to render.
pub struct PendingSend {
    message: OutboundMessage,
    gateway: Arc<dyn AssistantGateway>,
}

impl fmt::Debug for PendingSend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSend")
            .field("wa_id", &self.message.wa_id)
            .field("body_len", &self.message.body.len())
            .finish_non_exhaustive()
    }
}

impl PendingSend {
    /// Message text as it was accepted
    pub fn body(&self) -> &str {
        &self.message.body
    }

    /// Call the gateway with the accepted message
    pub async fn dispatch(self) -> Result<AssistantReply, ApplicationError> {
        self.gateway.send_message(self.message).await
    }
}
