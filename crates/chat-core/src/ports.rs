//! Port traits: the boundary between the conversation client and the browser.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use chat_types::{
    Result,
    wire::{ChatReply, ChatRequest},
};

// ─── Chat Endpoint Port ──────────────────────────────────────

#[async_trait(?Send)]
pub trait ChatPort {
    /// Send the conversation history, receive the next assistant turn.
    /// Non-2xx statuses and undecodable bodies are errors.
    async fn chat_completion(&self, req: ChatRequest) -> Result<ChatReply>;

    /// Probe the health endpoint. `Ok` only for a 2xx response.
    async fn health_check(&self) -> Result<()>;
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Confirmation Port ───────────────────────────────────────

/// A blocking yes/no question put to the user.
pub trait ConfirmPort {
    fn confirm(&self, prompt: &str) -> bool;
}
