//! Request and response bodies exchanged with the chat endpoint.

use serde::{Deserialize, Serialize};
use crate::message::{Message, Role};

/// A message as sent to the endpoint. Timestamps stay local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for WireMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

/// Body of `POST <chat_url>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
}

impl ChatRequest {
    pub fn from_history(history: &[Message], temperature: f32) -> Self {
        Self {
            messages: history.iter().map(WireMessage::from).collect(),
            temperature,
        }
    }
}

/// Body returned by the chat endpoint. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub message: ReplyMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyMessage {
    pub content: String,
    #[serde(default)]
    pub role: Option<String>,
}
