//! An agent-based ecosystem simulation.
//!
//! Four species share a bounded plane dotted with water: grazers forage,
//! flockers forage in boid-style flocks, ground predators hunt both, and
//! aerial predators dive on anything edible from cruise altitude. Creatures
//! burn energy each tick, reproduce past a threshold with per-trait
//! mutation, and die when their energy runs out.
//!
//! [`model::world::World`] owns the state and the tick loop;
//! [`app::Simulation`] wraps it in a fixed-timestep scheduler driven by
//! wall-clock frame deltas.

pub mod app;
pub mod model;
