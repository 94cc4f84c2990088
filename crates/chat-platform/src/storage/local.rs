//! `window.localStorage` backend.
//! Persistent across page reloads, scoped to the page origin.

use async_trait::async_trait;
use web_sys::Storage;

use chat_core::ports::StoragePort;
use chat_types::{ChatError, Result};
use crate::js_error;

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the origin's localStorage. Fails outside a window context
    /// or when the browser blocks storage access.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| ChatError::Storage("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
