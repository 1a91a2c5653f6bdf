//! Named groups of live connections
//!
//! Every connection gets an unbounded queue on [`Channels::register`]. Its
//! writer task drains that queue into the socket. Publishing is fan-out over
//! the queues of one group with no acknowledgment and no backpressure.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;

use super::protocol::ServerFrame;

/// Connection ID
pub type ConnectionId = String;

/// Channel every new real-time connection joins
pub const EVERYBODY: &str = "everybody";

#[derive(Debug, Default)]
struct Registry {
    connections: HashMap<ConnectionId, mpsc::UnboundedSender<ServerFrame>>,
    groups: HashMap<String, HashSet<ConnectionId>>,
}

impl Registry {
    fn drop_connection(&mut self, id: &str) {
        self.connections.remove(id);
        self.groups.retain(|_, members| {
            members.remove(id);
            !members.is_empty()
        });
    }
}

/// Connection handles grouped by channel name
#[derive(Debug, Clone, Default)]
pub struct Channels {
    registry: Arc<RwLock<Registry>>,
}

impl Channels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and return the receiving end of its queue.
    ///
    /// Re-registering an id replaces the previous handle.
    pub fn register(&self, id: &str) -> mpsc::UnboundedReceiver<ServerFrame> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.registry.write().connections.insert(id.to_string(), tx);
        rx
    }

    /// Remove a connection from every channel
    pub fn unregister(&self, id: &str) {
        self.registry.write().drop_connection(id);
    }

    /// Add a registered connection to a channel. Unknown ids are ignored.
    pub fn join(&self, channel: &str, id: &str) {
        let mut registry = self.registry.write();
        if registry.connections.contains_key(id) {
            registry
                .groups
                .entry(channel.to_string())
                .or_default()
                .insert(id.to_string());
        }
    }

    /// Remove a connection from a single channel
    pub fn leave(&self, channel: &str, id: &str) {
        let mut registry = self.registry.write();
        if let Some(members) = registry.groups.get_mut(channel) {
            members.remove(id);
            if members.is_empty() {
                registry.groups.remove(channel);
            }
        }
    }

    /// Queue a frame for one connection
    pub fn send(&self, id: &str, frame: ServerFrame) -> bool {
        let delivered = self
            .registry
            .read()
            .connections
            .get(id)
            .is_some_and(|tx| tx.send(frame).is_ok());
        if !delivered {
            tracing::debug!(connection_id = %id, "dropping frame for closed connection");
        }
        delivered
    }

    /// Fan a frame out to every member of `channel`.
    ///
    /// Returns how many connections accepted it. Handles whose receiver is
    /// gone are removed.
    pub fn publish(&self, channel: &str, frame: &ServerFrame) -> usize {
        let mut dead = Vec::new();
        let mut delivered = 0;
        {
            let registry = self.registry.read();
            let Some(members) = registry.groups.get(channel) else {
                return 0;
            };
            for id in members {
                match registry.connections.get(id) {
                    Some(tx) if tx.send(frame.clone()).is_ok() => delivered += 1,
                    _ => dead.push(id.clone()),
                }
            }
        }

        if !dead.is_empty() {
            let mut registry = self.registry.write();
            for id in &dead {
                registry.drop_connection(id);
                tracing::debug!(connection_id = %id, channel, "removed closed connection");
            }
        }

        delivered
    }

    /// Number of registered connections
    pub fn connection_count(&self) -> usize {
        self.registry.read().connections.len()
    }

    /// Number of members in a channel
    pub fn channel_len(&self, channel: &str) -> usize {
        self.registry
            .read()
            .groups
            .get(channel)
            .map_or(0, HashSet::len)
    }
}
