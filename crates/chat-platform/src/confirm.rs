//! Blocking confirmation through `window.confirm`.

use chat_core::ports::ConfirmPort;

pub struct BrowserConfirm;

impl ConfirmPort for BrowserConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let Some(window) = web_sys::window() else {
            log::warn!("No window object; treating confirmation as declined");
            return false;
        };
        window.confirm_with_message(prompt).unwrap_or_else(|e| {
            log::error!("confirm() failed: {}", crate::js_error(e));
            false
        })
    }
}
