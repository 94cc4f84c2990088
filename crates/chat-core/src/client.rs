//! Conversation client: the single owner of conversation state.
//!
//! A submit is split around one async exchange:
//! 1. `begin_submit` appends the user turn and builds the request
//! 2. the request runs as a spawned task (see `tasks::run_exchange`)
//! 3. the task posts its result to the inbox
//! 4. `apply` hands it to `finish_submit`, which appends the reply
//!    (or the fallback) and returns the storage write to perform
//!
//! Nothing here blocks or awaits; the owner stays responsive while a
//! request is outstanding.

use chat_types::{
    config::{ClientConfig, TEMPERATURE_MAX, TEMPERATURE_MIN},
    conversation::StoredConversation,
    event::ClientEvent,
    message::Message,
    status::HealthStatus,
    wire::ChatRequest,
};
use crate::ports::ConfirmPort;

/// A storage change the owner must carry out on the client's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEffect {
    Save { key: String, value: String },
    Remove { key: String },
}

impl StorageEffect {
    pub fn key(&self) -> &str {
        match self {
            StorageEffect::Save { key, .. } | StorageEffect::Remove { key } => key,
        }
    }
}

pub struct ConversationClient {
    config: ClientConfig,
    messages: Vec<Message>,
    conversation_id: Option<String>,
    saved_at: Option<String>,
    temperature: f32,
    loading: bool,
    history_loaded: bool,
    status: HealthStatus,
}

impl ConversationClient {
    pub fn new(config: ClientConfig) -> Self {
        let temperature = clamp_temperature(config.default_temperature);
        Self {
            config,
            messages: Vec::new(),
            conversation_id: None,
            saved_at: None,
            temperature,
            loading: false,
            history_loaded: false,
            status: HealthStatus::Unknown,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// ISO-8601 time of the last save or restore
    pub fn saved_at(&self) -> Option<&str> {
        self.saved_at.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// False until the stored conversation has been read. Submits and
    /// clears wait for it so a late restore cannot overwrite them.
    pub fn is_ready(&self) -> bool {
        self.history_loaded
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn set_status(&mut self, status: HealthStatus) {
        self.status = status;
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = clamp_temperature(temperature);
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Swap in a restored config. The temperature resets to its default.
    pub fn reconfigure(&mut self, config: ClientConfig) {
        self.temperature = clamp_temperature(config.default_temperature);
        self.config = config;
    }

    /// Start a submit. Returns the request to send, or `None` when there
    /// is nothing to do: blank input, history not loaded yet, or an
    /// exchange already in flight.
    ///
    /// On success the input buffer is cleared and the loading flag is set.
    pub fn begin_submit(&mut self, input: &mut String) -> Option<ChatRequest> {
        let content = input.trim();
        if content.is_empty() {
            return None;
        }
        if !self.history_loaded {
            log::warn!("Submit ignored: conversation history not loaded yet");
            return None;
        }
        if self.loading {
            log::warn!("Submit ignored: a reply is still pending");
            return None;
        }

        self.append(Message::user(content));
        input.clear();
        self.loading = true;

        let request = ChatRequest::from_history(&self.messages, self.temperature);
        log::debug!(
            "Submitting {} messages at temperature {}",
            request.messages.len(),
            request.temperature
        );
        Some(request)
    }

    /// Settle the in-flight exchange. Always appends exactly one assistant
    /// message and always clears the loading flag, whatever the outcome.
    pub fn finish_submit(&mut self, outcome: Result<String, String>) -> Option<StorageEffect> {
        let _reset = LoadingReset(&mut self.loading);

        match outcome {
            Ok(content) => {
                self.messages.push(Message::assistant(content));
                let record = StoredConversation::snapshot(
                    &self.messages,
                    self.conversation_id.clone(),
                );
                match record.to_json() {
                    Ok(value) => {
                        self.saved_at = Some(record.timestamp);
                        Some(StorageEffect::Save {
                            key: self.config.storage_key.clone(),
                            value,
                        })
                    }
                    Err(e) => {
                        log::error!("Failed to serialize conversation: {}", e);
                        None
                    }
                }
            }
            Err(error) => {
                log::error!("Chat exchange failed: {}", error);
                self.messages
                    .push(Message::assistant(self.config.fallback_reply.clone()));
                None
            }
        }
    }

    /// Replace in-memory state with a stored record and mark the history
    /// as loaded. Returns whether anything was restored; a malformed record
    /// is logged and leaves the conversation as it was.
    pub fn restore(&mut self, record: Option<&str>) -> bool {
        self.history_loaded = true;
        let Some(raw) = record else {
            return false;
        };
        match StoredConversation::from_json(raw) {
            Ok(stored) => {
                log::info!("Restored {} messages from storage", stored.messages.len());
                self.messages = stored.messages;
                self.conversation_id = stored.conversation_id;
                self.saved_at = Some(stored.timestamp);
                true
            }
            Err(e) => {
                log::error!("Failed to load conversation history: {}", e);
                false
            }
        }
    }

    /// Clear the conversation after the user confirms.
    /// Returns the removal of the stored record, or `None` if declined.
    pub fn clear_conversation(&mut self, confirm: &dyn ConfirmPort) -> Option<StorageEffect> {
        if !self.history_loaded {
            log::warn!("Clear ignored: conversation history not loaded yet");
            return None;
        }
        if !confirm.confirm(&self.config.clear_prompt) {
            return None;
        }

        self.messages.clear();
        self.conversation_id = None;
        self.saved_at = None;
        self.append(Message::assistant(self.config.welcome_message.clone()));

        Some(StorageEffect::Remove {
            key: self.config.storage_key.clone(),
        })
    }

    /// Apply a task completion drained from the inbox.
    pub fn apply(&mut self, event: ClientEvent) -> Option<StorageEffect> {
        match event {
            ClientEvent::ReplyReceived { content } => self.finish_submit(Ok(content)),
            ClientEvent::ReplyFailed { error } => self.finish_submit(Err(error)),
            ClientEvent::HealthChecked { online } => {
                self.status = HealthStatus::from_probe(online);
                None
            }
            ClientEvent::ConversationLoaded { record } => {
                self.restore(record.as_deref());
                None
            }
            ClientEvent::ConfigLoaded { .. } | ClientEvent::Persisted { .. } => None,
        }
    }

    fn append(&mut self, message: Message) {
        self.messages.push(message);
    }
}

fn clamp_temperature(t: f32) -> f32 {
    if t.is_nan() {
        return TEMPERATURE_MIN;
    }
    t.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX)
}

/// Clears the loading flag when dropped, on every exit path.
struct LoadingReset<'a>(&'a mut bool);

impl Drop for LoadingReset<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
