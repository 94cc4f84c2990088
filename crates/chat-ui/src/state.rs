//! UI-only state: the input buffer, panel visibility and scroll requests.
//! Conversation state lives in `ConversationClient`; nothing here mirrors it.

use std::cell::Cell;
use std::rc::Rc;

use chat_types::config::ChatConfig;

pub struct UiState {
    /// Input field content
    pub input_text: String,
    /// Whether settings panel is open
    pub show_settings: bool,
    /// Config being edited in the settings panel
    pub settings_draft: ChatConfig,
    pub save_feedback: Option<SaveFeedback>,
    rendered_rows: usize,
    scroll_request: Rc<Cell<bool>>,
}

/// Save feedback shown next to the settings Save button
#[derive(Clone)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

impl UiState {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            input_text: String::new(),
            show_settings: false,
            settings_draft: config,
            save_feedback: None,
            rendered_rows: 0,
            scroll_request: Rc::new(Cell::new(false)),
        }
    }

    /// Record how many rows are on screen. A change in count means a
    /// message was appended (or the list replaced), so scroll to the end.
    pub fn sync_rows(&mut self, count: usize) {
        if count != self.rendered_rows {
            self.rendered_rows = count;
            self.scroll_request.set(true);
        }
    }

    /// Consume a pending scroll-to-bottom request.
    pub fn take_scroll(&self) -> bool {
        self.scroll_request.replace(false)
    }

    /// Handle for deferred callers (timers) to request a scroll.
    pub fn scroll_handle(&self) -> Rc<Cell<bool>> {
        self.scroll_request.clone()
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(ChatConfig::default())
    }
}
