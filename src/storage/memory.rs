//! In-process message store

use crate::error::{BoardError, Result};
use crate::types::{Message, MessageId, PatchMessage, UpdateMessage};

/// Ordered message records plus the id counter.
///
/// Ids start at 1 and are never handed out twice, even after removal.
#[derive(Debug)]
pub struct MessageStore {
    messages: Vec<Message>,
    next_id: MessageId,
}

impl MessageStore {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn position(&self, id: MessageId) -> Result<usize> {
        self.messages
            .iter()
            .position(|m| m.id == id)
            .ok_or(BoardError::NotFound(id))
    }

    pub fn get(&self, id: MessageId) -> Result<&Message> {
        let index = self.position(id)?;
        Ok(&self.messages[index])
    }

    pub fn insert(&mut self, text: String) -> Message {
        let message = Message {
            id: self.next_id,
            text,
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }

    pub fn replace(&mut self, id: MessageId, data: UpdateMessage) -> Result<Message> {
        let index = self.position(id)?;
        let message = Message {
            id,
            text: data.text,
        };
        self.messages[index] = message.clone();
        Ok(message)
    }

    pub fn merge(&mut self, id: MessageId, data: PatchMessage) -> Result<Message> {
        let index = self.position(id)?;
        let slot = &mut self.messages[index];
        if let Some(text) = data.text {
            slot.text = text;
        }
        Ok(slot.clone())
    }

    pub fn delete(&mut self, id: MessageId) -> Result<Message> {
        let index = self.position(id)?;
        Ok(self.messages.remove(index))
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}
