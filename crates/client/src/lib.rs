//! Heroes client crate.
//!
//! `HeroService` is the data-access client; it depends only on the port
//! traits in [`ports`]. Concrete adapters (reqwest transport, in-memory hero
//! store, in-memory message log, system clock) live in [`infrastructure`].
//! The `heroes` binary is the composition root that wires them together.

pub mod application;
pub mod infrastructure;
pub mod ports;

pub use application::HeroService;
pub use heroes_domain::{Hero, HeroId, HeroRef, NewHero};
pub use infrastructure::config::{Backend, ClientConfig};
pub use ports::{ClockPort, MessageLogPort, TransportError, TransportPort};
