//! Domain types for the hero resource.
//!
//! Kept free of transport and logging concerns so that the client crate and
//! any future server-side code share one vocabulary.

pub mod hero;
pub mod ids;

pub use hero::{Hero, HeroRef, NewHero};
pub use ids::HeroId;
