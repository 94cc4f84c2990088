use serde::{Deserialize, Serialize};

/// Format used for the display timestamp of a message.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single turn in the conversation.
///
/// Messages are never mutated after creation; their position in the
/// conversation is their only identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Local wall-clock time of creation, for display only
    #[serde(default)]
    pub timestamp: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    /// User message stamped with the current local time
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, local_time())
    }

    /// Assistant message stamped with the current local time
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, local_time())
    }
}

/// Current local time as a display string.
pub fn local_time() -> String {
    chrono::Local::now().format(TIME_FORMAT).to_string()
}
