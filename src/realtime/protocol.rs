//! Socket wire protocol
//!
//! Clients send `{"id": .., "method": "messages::create", "params": {"data": {..}}}`
//! and get back a `result` or `error` frame echoing the same `id`. Broadcasts
//! arrive as `event` frames.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::events::RealtimeEvent;
use crate::error::{BoardError, ErrorBody};

/// Separator between service path and method name
pub const METHOD_SEPARATOR: &str = "::";

/// Client → server call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientFrame {
    /// Opaque request id, echoed on the reply
    #[serde(default)]
    pub id: Option<Value>,
    /// `<path>::<method>`
    pub method: String,
    #[serde(default)]
    pub params: CallParams,
}

/// Arguments for a service call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallParams {
    /// Record id for get/update/patch/remove
    #[serde(default)]
    pub id: Option<Value>,
    /// Body for create/update/patch
    #[serde(default)]
    pub data: Value,
}

impl ClientFrame {
    /// Split `method` into service path and method name
    pub fn target(&self) -> Option<(&str, &str)> {
        self.method.split_once(METHOD_SEPARATOR)
    }
}

/// Server → client frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Result {
        id: Option<Value>,
        result: Value,
    },
    Error {
        id: Option<Value>,
        error: ErrorBody,
    },
    Event(RealtimeEvent),
}

impl ServerFrame {
    pub fn error(id: Option<Value>, err: &BoardError) -> Self {
        ServerFrame::Error {
            id,
            error: err.body(),
        }
    }
}
