//! The messages service
//!
//! Exposes `find/get/create/update/patch/remove` over a shared [`MessageStore`].
//! Clones share the same store, so every transport sees one set of records.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::storage::MessageStore;
use crate::types::{CreateMessage, Message, MessageId, PatchMessage, UpdateMessage};

/// CRUD service over the in-memory message store
#[derive(Debug, Clone, Default)]
pub struct MessageService {
    store: Arc<Mutex<MessageStore>>,
}

impl MessageService {
    /// Create a service with an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in insertion order
    pub fn find(&self) -> Vec<Message> {
        self.store.lock().all().to_vec()
    }

    /// A single message by id
    pub fn get(&self, id: MessageId) -> Result<Message> {
        self.store.lock().get(id).cloned()
    }

    /// Append a new message with the next id
    pub fn create(&self, data: CreateMessage) -> Message {
        let message = self.store.lock().insert(data.text);
        tracing::debug!(id = message.id, "message created");
        message
    }

    /// Replace a whole message, keeping its id
    pub fn update(&self, id: MessageId, data: UpdateMessage) -> Result<Message> {
        let message = self.store.lock().replace(id, data)?;
        tracing::debug!(id, "message updated");
        Ok(message)
    }

    /// Overwrite only the supplied fields
    pub fn patch(&self, id: MessageId, data: PatchMessage) -> Result<Message> {
        let message = self.store.lock().merge(id, data)?;
        tracing::debug!(id, "message patched");
        Ok(message)
    }

    /// Delete a message and return what was removed
    pub fn remove(&self, id: MessageId) -> Result<Message> {
        let message = self.store.lock().delete(id)?;
        tracing::debug!(id, "message removed");
        Ok(message)
    }

    /// Number of stored messages
    pub fn count(&self) -> usize {
        self.store.lock().len()
    }
}
