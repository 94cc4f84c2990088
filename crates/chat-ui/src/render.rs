//! Display model for message rows.
//!
//! A row is derived from exactly one message, in order, every frame.
//! The only content transformation is splitting on `\n` so each line is
//! laid out on its own; nothing is escaped or interpreted as markup.

use chat_types::config::{Avatar, AvatarConfig};
use chat_types::message::{Message, Role};

#[derive(Debug, Clone, PartialEq)]
pub struct MessageRow<'a> {
    pub role: Role,
    /// Role tag used for styling and alignment
    pub tag: &'static str,
    pub avatar: &'a Avatar,
    pub lines: Vec<&'a str>,
    pub timestamp: &'a str,
}

impl<'a> MessageRow<'a> {
    pub fn new(message: &'a Message, avatars: &'a AvatarConfig) -> Self {
        Self {
            role: message.role,
            tag: message.role.as_str(),
            avatar: avatars.for_role(message.role),
            lines: content_lines(&message.content),
            timestamp: &message.timestamp,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// One row per message, same order.
pub fn rows<'a>(messages: &'a [Message], avatars: &'a AvatarConfig) -> Vec<MessageRow<'a>> {
    messages
        .iter()
        .map(|m| MessageRow::new(m, avatars))
        .collect()
}

/// Split content at literal newlines into display lines.
pub fn content_lines(content: &str) -> Vec<&str> {
    content.split('\n').collect()
}
