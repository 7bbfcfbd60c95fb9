//! AI side-conversation models.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AiMessageKind {
    Question,
    Response,
}

/// One entry of an AI side-conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMessage {
    pub id: String,
    /// The base conversation this entry belongs to.
    pub conversation_id: String,
    /// The customer message the exchange was anchored to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_message_id: Option<String>,
    pub content: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: AiMessageKind,
}

impl AiMessage {
    pub(crate) fn new(
        conversation_id: &str,
        kind: AiMessageKind,
        content: impl Into<String>,
        original_message_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation_id: conversation_id.to_string(),
            original_message_id,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            kind,
        }
    }

    pub fn is_question(&self) -> bool {
        self.kind == AiMessageKind::Question
    }
}

/// The copilot transcript for one base conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiConversation {
    pub id: String,
    pub conversation_id: String,
    pub messages: Vec<AiMessage>,
}
