//! Chat transcript entity
//!
//! Append-only log of what one widget instance renders: visitor and
//! assistant messages plus an at-most-one pending-reply marker that
//! always trails the newest entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The visitor typing into the widget
    User,
    /// The assistant behind the webhook backend
    Bot,
}

/// A single message as rendered in the widget transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Who authored the message
    pub sender: Sender,
    /// Raw message text; any markdown interpretation happens at render time
    pub text: String,
    /// When the entry was appended
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Create an entry authored by the visitor
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an entry authored by the assistant
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Whether the visitor authored this entry
    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self.sender, Sender::User)
    }
}

/// Append-only message log for one widget instance
///
/// The transcript outlives chrome transitions: closing, minimizing and
/// reopening the widget never touch it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    awaiting_reply: bool,
}

impl Transcript {
    /// Create an empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visitor message
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::user(text));
    }

    /// Append an assistant message
    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::bot(text));
    }

    /// Show the pending-reply marker after the newest entry
    pub fn begin_awaiting_reply(&mut self) {
        self.awaiting_reply = true;
    }

    /// Hide the pending-reply marker, reporting whether it was visible
    pub fn end_awaiting_reply(&mut self) -> bool {
        std::mem::take(&mut self.awaiting_reply)
    }

    /// Whether the pending-reply marker is visible
    #[must_use]
    pub const fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// All entries in append order
    #[must_use]
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// The newest entry, if any
    #[must_use]
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
