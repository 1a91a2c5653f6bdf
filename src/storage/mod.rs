//! Storage for the message board
//!
//! Messages live in process memory only and are discarded on exit.

mod memory;

pub use memory::MessageStore;
