//! HTTP adapter for the chat and health endpoints.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility.
//! One request per call: no retries, no timeout.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};

use chat_core::ports::ChatPort;
use chat_types::{
    ChatError, Result,
    config::EndpointConfig,
    wire::{ChatReply, ChatRequest},
};

pub struct HttpChatEndpoint {
    config: EndpointConfig,
}

impl HttpChatEndpoint {
    pub fn new(config: EndpointConfig) -> Self {
        Self { config }
    }

    pub fn chat_url(&self) -> &str {
        &self.config.chat_url
    }

    pub fn health_url(&self) -> &str {
        &self.config.health_url
    }
}

#[async_trait(?Send)]
impl ChatPort for HttpChatEndpoint {
    async fn chat_completion(&self, req: ChatRequest) -> Result<ChatReply> {
        log::debug!("POST {} ({} messages)", self.config.chat_url, req.messages.len());

        let response = Request::post(&self.config.chat_url)
            .header("Content-Type", "application/json")
            .json(&req)
            .map_err(|e| ChatError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let response = ensure_success(response).await?;

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))
    }

    async fn health_check(&self) -> Result<()> {
        let response = Request::get(&self.config.health_url)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        ensure_success(response).await.map(|_| ())
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(ChatError::Status { status, body })
}
