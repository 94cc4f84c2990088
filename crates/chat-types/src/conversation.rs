use serde::{Deserialize, Serialize};
use crate::message::Message;

/// The persisted form of a conversation.
///
/// Field names match the record the widget has always written to
/// local storage, so existing histories keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredConversation {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(rename = "conversationId", default)]
    pub conversation_id: Option<String>,
    /// ISO-8601 time of the save
    #[serde(default)]
    pub timestamp: String,
}

impl StoredConversation {
    /// Snapshot of the given messages, stamped with the current UTC time.
    pub fn snapshot(messages: &[Message], conversation_id: Option<String>) -> Self {
        Self {
            messages: messages.to_vec(),
            conversation_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
