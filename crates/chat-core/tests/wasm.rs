//! WASM-target tests for chat-core.
//!
//! Runs the submit/settle/persist cycle under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chat_core::client::{ConversationClient, StorageEffect};
use chat_core::event_bus::EventBus;
use chat_core::ports::*;
use chat_core::tasks::*;
use chat_types::config::ClientConfig;
use chat_types::event::ClientEvent;
use chat_types::message::Role;
use chat_types::status::HealthStatus;
use chat_types::wire::*;
use chat_types::ChatError;

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;

struct ScriptedChat {
    reply: Option<String>,
}

#[async_trait(?Send)]
impl ChatPort for ScriptedChat {
    async fn chat_completion(&self, _req: ChatRequest) -> chat_types::Result<ChatReply> {
        match &self.reply {
            Some(content) => Ok(ChatReply {
                message: ReplyMessage {
                    content: content.clone(),
                    role: None,
                },
            }),
            None => Err(ChatError::Status { status: 503, body: String::new() }),
        }
    }

    async fn health_check(&self) -> chat_types::Result<()> {
        match self.reply {
            Some(_) => Ok(()),
            None => Err(ChatError::Network("unreachable".to_string())),
        }
    }
}

#[derive(Default)]
struct MapStorage {
    data: RefCell<HashMap<String, String>>,
}

#[async_trait(?Send)]
impl StoragePort for MapStorage {
    async fn get(&self, key: &str) -> chat_types::Result<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> chat_types::Result<()> {
        self.data.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> chat_types::Result<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "map"
    }
}

struct Yes;

impl ConfirmPort for Yes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// A client whose stored history has already been read (none found)
fn loaded_client() -> ConversationClient {
    let mut client = ConversationClient::new(ClientConfig::default());
    client.apply(ClientEvent::ConversationLoaded { record: None });
    client
}

async fn submit(
    client: &mut ConversationClient,
    chat: &dyn ChatPort,
    bus: &EventBus,
    text: &str,
) -> Option<StorageEffect> {
    let mut input = text.to_string();
    let req = client.begin_submit(&mut input)?;
    run_exchange(chat, req, bus).await;
    let mut effect = None;
    for event in bus.take_all() {
        effect = client.apply(event);
    }
    effect
}

#[wasm_bindgen_test]
async fn submit_success_persists() {
    let bus = EventBus::new();
    let storage = MapStorage::default();
    let chat = ScriptedChat { reply: Some("hello".to_string()) };
    let mut client = loaded_client();

    let effect = submit(&mut client, &chat, &bus, "hi").await.unwrap();
    run_storage_effect(&storage, effect, &bus).await;

    assert_eq!(client.messages().len(), 2);
    assert!(!client.is_loading());
    assert!(storage.exists("kangkang_conversation").await.unwrap());
}

#[wasm_bindgen_test]
async fn submit_failure_falls_back() {
    let bus = EventBus::new();
    let chat = ScriptedChat { reply: None };
    let mut client = loaded_client();

    assert!(submit(&mut client, &chat, &bus, "hi").await.is_none());
    assert_eq!(client.messages().len(), 2);
    assert_eq!(client.messages()[1].role, Role::Assistant);
    assert_eq!(client.messages()[1].content, ClientConfig::default().fallback_reply);
    assert!(!client.is_loading());
}

#[wasm_bindgen_test]
async fn blank_submit_is_noop() {
    let bus = EventBus::new();
    let chat = ScriptedChat { reply: Some("x".to_string()) };
    let mut client = loaded_client();
    assert!(submit(&mut client, &chat, &bus, "   ").await.is_none());
    assert!(client.messages().is_empty());
    assert!(!bus.has_pending());
}

#[wasm_bindgen_test]
async fn reload_restores_order() {
    let bus = EventBus::new();
    let storage = MapStorage::default();
    let chat = ScriptedChat { reply: Some("ok".to_string()) };
    let mut client = loaded_client();

    for text in ["a", "b"] {
        if let Some(effect) = submit(&mut client, &chat, &bus, text).await {
            run_storage_effect(&storage, effect, &bus).await;
        }
    }
    let _ = bus.take_all();

    let mut reloaded = ConversationClient::new(ClientConfig::default());
    run_load_conversation(&storage, "kangkang_conversation", &bus).await;
    for event in bus.take_all() {
        reloaded.apply(event);
    }
    let contents: Vec<&str> = reloaded.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["a", "ok", "b", "ok"]);
}

#[wasm_bindgen_test]
async fn clear_removes_record_and_welcomes() {
    let bus = EventBus::new();
    let storage = MapStorage::default();
    storage.set("kangkang_conversation", "{}").await.unwrap();
    let mut client = loaded_client();

    let effect = client.clear_conversation(&Yes).unwrap();
    run_storage_effect(&storage, effect, &bus).await;

    assert!(!storage.exists("kangkang_conversation").await.unwrap());
    assert_eq!(client.messages().len(), 1);
    assert_eq!(client.messages()[0].role, Role::Assistant);
}

#[wasm_bindgen_test]
async fn health_maps_to_status() {
    let bus = EventBus::new();
    let mut client = ConversationClient::new(ClientConfig::default());
    run_health_check(&ScriptedChat { reply: None }, &bus).await;
    for event in bus.take_all() {
        client.apply(event);
    }
    assert_eq!(client.status(), HealthStatus::Offline);
}

#[wasm_bindgen_test]
fn malformed_record_is_ignored() {
    let mut client = ConversationClient::new(ClientConfig::default());
    client.apply(ClientEvent::ConversationLoaded { record: Some("<<<".to_string()) });
    assert!(client.messages().is_empty());
}
