use serde::{Deserialize, Serialize};

/// Completions posted by async tasks back to the conversation owner.
/// The owner drains these once per frame and applies them in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// The chat endpoint answered with assistant content
    ReplyReceived { content: String },

    /// The exchange failed (transport, status, or body)
    ReplyFailed { error: String },

    /// Result of the startup health probe
    HealthChecked { online: bool },

    /// Raw stored conversation, `None` when nothing was stored
    ConversationLoaded { record: Option<String> },

    /// Raw stored config, `None` when nothing was stored
    ConfigLoaded { record: Option<String> },

    /// A storage write finished
    Persisted { key: String, success: bool },
}
