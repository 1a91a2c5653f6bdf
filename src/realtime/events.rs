//! Real-time event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Service mutations that are broadcast to connected clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Created,
    Updated,
    Patched,
    Removed,
}

/// A mutation result pushed to every member of a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeEvent {
    /// Service path the event came from (e.g. `messages`)
    pub path: String,
    pub event: EventType,
    /// The record as returned by the mutating call
    pub data: Message,
    pub timestamp: DateTime<Utc>,
}

impl RealtimeEvent {
    pub fn new(path: impl Into<String>, event: EventType, data: Message) -> Self {
        Self {
            path: path.into(),
            event,
            data,
            timestamp: Utc::now(),
        }
    }
}
