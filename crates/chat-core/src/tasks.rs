//! Async tasks spawned by the owner.
//!
//! Each task talks to exactly one port and reports back through the
//! inbox. None of them touch `ConversationClient`; the owner applies
//! their events on its next frame.

use chat_types::{event::ClientEvent, wire::ChatRequest};
use crate::client::StorageEffect;
use crate::event_bus::EventBus;
use crate::ports::{ChatPort, StoragePort};

/// Posts `ReplyFailed` if dropped before the exchange settles, so the
/// owner always hears back and can re-enable input.
struct InFlight<'a> {
    inbox: &'a EventBus,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn new(inbox: &'a EventBus) -> Self {
        Self { inbox, settled: false }
    }

    fn settle(mut self, event: ClientEvent) {
        self.settled = true;
        self.inbox.post(event);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.inbox.post(ClientEvent::ReplyFailed {
                error: "exchange dropped before it settled".to_string(),
            });
        }
    }
}

/// Run one chat exchange. Posts exactly one reply event.
pub async fn run_exchange(chat: &dyn ChatPort, request: ChatRequest, inbox: &EventBus) {
    let guard = InFlight::new(inbox);

    let event = match chat.chat_completion(request).await {
        Ok(reply) => ClientEvent::ReplyReceived {
            content: reply.message.content,
        },
        Err(e) => ClientEvent::ReplyFailed {
            error: e.to_string(),
        },
    };
    guard.settle(event);
}

/// Probe the health endpoint once.
pub async fn run_health_check(chat: &dyn ChatPort, inbox: &EventBus) {
    let online = match chat.health_check().await {
        Ok(()) => true,
        Err(e) => {
            log::error!("Service unavailable: {}", e);
            false
        }
    };
    inbox.post(ClientEvent::HealthChecked { online });
}

/// Read the stored config record.
pub async fn run_load_config(storage: &dyn StoragePort, key: &str, inbox: &EventBus) {
    let record = load_record(storage, key).await;
    inbox.post(ClientEvent::ConfigLoaded { record });
}

/// Read the stored conversation record.
pub async fn run_load_conversation(storage: &dyn StoragePort, key: &str, inbox: &EventBus) {
    let record = load_record(storage, key).await;
    inbox.post(ClientEvent::ConversationLoaded { record });
}

/// Carry out a storage write or removal requested by the client.
pub async fn run_storage_effect(storage: &dyn StoragePort, effect: StorageEffect, inbox: &EventBus) {
    let key = effect.key().to_string();
    let result = match effect {
        StorageEffect::Save { key, value } => storage.set(&key, &value).await,
        StorageEffect::Remove { key } => storage.delete(&key).await,
    };

    let success = match result {
        Ok(()) => {
            log::debug!("Storage updated: {} ({})", key, storage.backend_name());
            true
        }
        Err(e) => {
            log::error!("Storage write failed for {}: {}", key, e);
            false
        }
    };
    inbox.post(ClientEvent::Persisted { key, success });
}

/// A read failure is treated the same as an absent record.
async fn load_record(storage: &dyn StoragePort, key: &str) -> Option<String> {
    match storage.get(key).await {
        Ok(record) => record,
        Err(e) => {
            log::error!("Failed to read {} from {}: {}", key, storage.backend_name(), e);
            None
        }
    }
}
