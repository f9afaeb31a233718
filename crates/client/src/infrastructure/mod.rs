//! Concrete adapters for the client's ports.

pub mod clock;
pub mod config;
pub mod http_transport;
pub mod in_memory_transport;
pub mod message_log;
