//! Browser adapters for the chat widget ports.

pub mod http;
pub mod storage;
pub mod confirm;

use chat_types::ChatError;
use wasm_bindgen::JsValue;

/// Turn a thrown JS value into a readable error.
pub(crate) fn js_error(value: JsValue) -> ChatError {
    let message = match gloo_utils::errors::JsError::try_from(value) {
        Ok(err) => err.to_string(),
        Err(not_error) => not_error.to_string(),
    };
    ChatError::JsInterop(message)
}
