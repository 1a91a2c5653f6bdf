//! Real-time updates via WebSocket
//!
//! Clients call the messages service over a socket and receive every mutation
//! published to the channel they belong to.

mod channels;
mod events;
mod protocol;
mod server;

pub use channels::{Channels, ConnectionId, EVERYBODY};
pub use events::{EventType, RealtimeEvent};
pub use protocol::{CallParams, ClientFrame, ServerFrame, METHOD_SEPARATOR};
pub use server::{handle_frame, router};
