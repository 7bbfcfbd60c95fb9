//! Pending selected-text action.
//!
//! A single-slot handoff between the thread view (producer) and the copilot
//! panel (consumer). There is no queue: setting the slot while it is pending
//! overwrites the earlier action.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A prompt built from a text selection, anchored to the message it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedTextAction {
    /// The instruction sent to the copilot (already templated).
    pub text: String,
    pub message_id: String,
}

impl SelectedTextAction {
    pub fn new(text: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            message_id: message_id.into(),
        }
    }
}

/// Idle when empty, Pending when holding an action.
#[derive(Debug, Clone, Default)]
pub struct SelectionSlot {
    pending: Option<SelectedTextAction>,
}

impl SelectionSlot {
    /// Idle -> Pending. Last write wins.
    pub fn set(&mut self, action: SelectedTextAction) {
        if let Some(previous) = self.pending.replace(action) {
            debug!(
                message_id = %previous.message_id,
                "Pending selection overwritten before it was consumed"
            );
        }
    }

    /// Pending -> Idle, handing the action to the consumer.
    pub fn take(&mut self) -> Option<SelectedTextAction> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<&SelectedTextAction> {
        self.pending.as_ref()
    }
}
