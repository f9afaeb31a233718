//! Port traits for the client's collaborators.
//!
//! These are the only abstractions in the client. `HeroService` depends on
//! them, the binary wires concrete adapters in. Ports exist for:
//! - The HTTP transport (could swap reqwest -> in-memory store)
//! - The message log (could swap in-memory -> UI-backed)
//! - Clock (for testing)

mod error;
mod message_log;
mod testing;
mod transport;

pub use error::TransportError;
pub use message_log::MessageLogPort;
pub use testing::ClockPort;
pub use transport::TransportPort;

#[cfg(test)]
pub use message_log::MockMessageLogPort;
#[cfg(test)]
pub use testing::MockClockPort;
#[cfg(test)]
pub use transport::MockTransportPort;
