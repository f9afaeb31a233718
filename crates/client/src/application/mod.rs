//! Application services
//!
//! Services depend on port traits, not concrete infrastructure
//! implementations.

pub mod hero_service;

pub use hero_service::HeroService;
