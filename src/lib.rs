//! Message board
//!
//! In-memory CRUD over messages, exposed as a REST API and a WebSocket
//! protocol. Every mutation is broadcast to connected clients.

pub mod app;
pub mod config;
pub mod error;
pub mod realtime;
pub mod rest;
pub mod server;
pub mod service;
pub mod storage;
pub mod types;

pub use app::App;
pub use error::{BoardError, Result};
pub use server::BoardServer;
pub use service::MessageService;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
