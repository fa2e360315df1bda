use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A ground-level food item. Consumed (removed) in the tick a herbivore
/// reaches it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: Uuid,
    pub x: f64,
    pub z: f64,
}

impl Food {
    /// Ids come from the world RNG so seeded runs stay reproducible.
    pub fn spawn<R: Rng>(x: f64, z: f64, rng: &mut R) -> Self {
        Self {
            id: Uuid::from_u128(rng.gen()),
            x,
            z,
        }
    }
}
