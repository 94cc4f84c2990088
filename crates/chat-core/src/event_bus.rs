//! Inbox through which spawned tasks hand results back to the owner.
//!
//! Tasks hold a clone and only ever `post`. The owner calls `take_all` once
//! per frame and is the only code that mutates conversation state. WASM is
//! single-threaded, so a `RefCell` is enough.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use chat_types::event::ClientEvent;

#[derive(Clone, Default)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<ClientEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, event: ClientEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Take every queued event, oldest first, leaving the inbox empty.
    pub fn take_all(&self) -> VecDeque<ClientEvent> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    /// True while events are waiting; the owner keeps repainting until
    /// they have been applied.
    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}
