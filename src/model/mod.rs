//! Simulation domain model: configuration, world state, creatures, and the
//! per-species behavior policies.

pub mod config;
pub mod creature;
pub mod food;
pub mod observer;
pub mod snapshot;
pub mod species;
pub mod stats;
pub mod water;
pub mod world;
