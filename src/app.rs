//! Application wiring
//!
//! [`App`] binds the messages service to the real-time channels. REST handlers
//! call its typed methods. The socket protocol goes through [`App::call`], which
//! maps `(path, method)` pairs onto those same methods. Every successful
//! mutation is published to the publish channel.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{BoardError, Result};
use crate::realtime::{Channels, EventType, RealtimeEvent, ServerFrame, EVERYBODY};
use crate::service::MessageService;
use crate::types::{CreateMessage, Message, MessageId, PatchMessage, UpdateMessage};

/// Path the messages service is mounted on
pub const MESSAGES_PATH: &str = "messages";

/// Operations a service exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMethod {
    Find,
    Get,
    Create,
    Update,
    Patch,
    Remove,
}

impl ServiceMethod {
    pub const ALL: [ServiceMethod; 6] = [
        ServiceMethod::Find,
        ServiceMethod::Get,
        ServiceMethod::Create,
        ServiceMethod::Update,
        ServiceMethod::Patch,
        ServiceMethod::Remove,
    ];

    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "find" => Ok(ServiceMethod::Find),
            "get" => Ok(ServiceMethod::Get),
            "create" => Ok(ServiceMethod::Create),
            "update" => Ok(ServiceMethod::Update),
            "patch" => Ok(ServiceMethod::Patch),
            "remove" => Ok(ServiceMethod::Remove),
            other => Err(BoardError::MethodNotAllowed(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMethod::Find => "find",
            ServiceMethod::Get => "get",
            ServiceMethod::Create => "create",
            ServiceMethod::Update => "update",
            ServiceMethod::Patch => "patch",
            ServiceMethod::Remove => "remove",
        }
    }
}

impl fmt::Display for ServiceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a record id taken from a URL segment
pub fn parse_id(raw: &str) -> Result<MessageId> {
    raw.trim()
        .parse()
        .map_err(|_| BoardError::UnknownId(raw.to_string()))
}

/// Parse a record id taken from a socket frame (number or numeric string)
pub fn parse_id_value(value: &Value) -> Result<MessageId> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| BoardError::UnknownId(n.to_string())),
        Value::String(s) => parse_id(s),
        other => Err(BoardError::UnknownId(other.to_string())),
    }
}

fn require_id(id: Option<MessageId>, method: ServiceMethod) -> Result<MessageId> {
    id.ok_or_else(|| BoardError::BadRequest(format!("'{}' requires an id", method)))
}

fn parse_data<T: DeserializeOwned + Default>(data: Value) -> Result<T> {
    if data.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(data).map_err(|e| BoardError::BadRequest(e.to_string()))
}

/// Shared application state handed to every transport
#[derive(Debug, Clone)]
pub struct App {
    messages: MessageService,
    channels: Channels,
    publish_channel: Arc<str>,
    /// Held across a mutation and its publish so events leave in store order
    sequencer: Arc<Mutex<()>>,
}

impl App {
    pub fn new(messages: MessageService, channels: Channels) -> Self {
        Self {
            messages,
            channels,
            publish_channel: Arc::from(EVERYBODY),
            sequencer: Arc::new(Mutex::new(())),
        }
    }

    /// Route mutation events to a different channel
    pub fn with_publish_channel(mut self, channel: &str) -> Self {
        self.publish_channel = Arc::from(channel);
        self
    }

    pub fn messages(&self) -> &MessageService {
        &self.messages
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    pub fn publish_channel(&self) -> &str {
        &self.publish_channel
    }

    fn publish(&self, event: EventType, message: &Message) {
        let frame = ServerFrame::Event(RealtimeEvent::new(MESSAGES_PATH, event, message.clone()));
        let delivered = self.channels.publish(&self.publish_channel, &frame);
        tracing::debug!(
            ?event,
            id = message.id,
            channel = %self.publish_channel,
            delivered,
            "published event"
        );
    }

    pub fn find(&self) -> Vec<Message> {
        self.messages.find()
    }

    pub fn get(&self, id: MessageId) -> Result<Message> {
        self.messages.get(id)
    }

    pub fn create(&self, data: CreateMessage) -> Message {
        let _order = self.sequencer.lock();
        let message = self.messages.create(data);
        self.publish(EventType::Created, &message);
        message
    }

    pub fn update(&self, id: MessageId, data: UpdateMessage) -> Result<Message> {
        let _order = self.sequencer.lock();
        let message = self.messages.update(id, data)?;
        self.publish(EventType::Updated, &message);
        Ok(message)
    }

    pub fn patch(&self, id: MessageId, data: PatchMessage) -> Result<Message> {
        let _order = self.sequencer.lock();
        let message = self.messages.patch(id, data)?;
        self.publish(EventType::Patched, &message);
        Ok(message)
    }

    pub fn remove(&self, id: MessageId) -> Result<Message> {
        let _order = self.sequencer.lock();
        let message = self.messages.remove(id)?;
        self.publish(EventType::Removed, &message);
        Ok(message)
    }

    /// Dispatch a call by service path and method
    pub fn call(
        &self,
        path: &str,
        method: ServiceMethod,
        id: Option<MessageId>,
        data: Value,
    ) -> Result<Value> {
        if path != MESSAGES_PATH {
            return Err(BoardError::UnknownService(path.to_string()));
        }

        let value = match method {
            ServiceMethod::Find => serde_json::to_value(self.find())?,
            ServiceMethod::Get => serde_json::to_value(self.get(require_id(id, method)?)?)?,
            ServiceMethod::Create => serde_json::to_value(self.create(parse_data(data)?))?,
            ServiceMethod::Update => {
                let id = require_id(id, method)?;
                serde_json::to_value(self.update(id, parse_data(data)?)?)?
            }
            ServiceMethod::Patch => {
                let id = require_id(id, method)?;
                serde_json::to_value(self.patch(id, parse_data(data)?)?)?
            }
            ServiceMethod::Remove => serde_json::to_value(self.remove(require_id(id, method)?)?)?,
        };
        Ok(value)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(MessageService::new(), Channels::new())
    }
}
