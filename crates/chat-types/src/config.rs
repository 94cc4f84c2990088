use serde::{Deserialize, Serialize};
use crate::message::Role;

/// Top-level widget configuration.
///
/// One parameter set covers every deployment: endpoint hosts, avatars
/// and persona strings are data, not separate copies of the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChatConfig {
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub avatars: AvatarConfig,
}

impl ChatConfig {
    /// Parse a config record as written by the settings panel.
    pub fn from_record(raw: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub chat_url: String,
    pub health_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            chat_url: "/api/chat".to_string(),
            health_url: "/api/health".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Local storage key of the persisted conversation
    pub storage_key: String,
    pub default_temperature: f32,
    /// Shown in place of a reply when an exchange fails
    pub fallback_reply: String,
    /// Appended after the conversation is cleared
    pub welcome_message: String,
    /// Text of the confirmation prompt before clearing
    pub clear_prompt: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            storage_key: CONVERSATION_STORAGE_KEY.to_string(),
            default_temperature: 0.7,
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            clear_prompt: DEFAULT_CLEAR_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarConfig {
    pub user: Avatar,
    pub assistant: Avatar,
}

impl AvatarConfig {
    pub fn for_role(&self, role: Role) -> &Avatar {
        match role {
            Role::User => &self.user,
            Role::Assistant => &self.assistant,
        }
    }
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            user: Avatar {
                glyph: "宝".to_string(),
                label: "用户".to_string(),
            },
            assistant: Avatar {
                glyph: "康".to_string(),
                label: "康康1号机".to_string(),
            },
        }
    }
}

/// A round badge drawn next to a message row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub glyph: String,
    pub label: String,
}

pub const CONVERSATION_STORAGE_KEY: &str = "kangkang_conversation";
pub const CONFIG_STORAGE_KEY: &str = "kangkang:config";

pub const TEMPERATURE_MIN: f32 = 0.0;
pub const TEMPERATURE_MAX: f32 = 2.0;

const DEFAULT_FALLBACK_REPLY: &str = "哎呀，康康刚才走神了一下下(＞﹏＜)，能再问一次吗？";

const DEFAULT_WELCOME_MESSAGE: &str =
    "乖宝，我是康康1号机 (｡･ω･｡)ﾉ♡\n今天有什么想聊的吗？康康会一直陪着你哦~";

const DEFAULT_CLEAR_PROMPT: &str = "确定要清空对话历史吗？(；′⌒`)";
