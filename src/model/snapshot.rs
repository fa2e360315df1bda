use crate::model::creature::{Creature, Species};
use crate::model::food::Food;
use uuid::Uuid;

/// Read-only view of a creature captured at the start of a tick. Every policy
/// decision reads these instead of the live collection, so no agent observes
/// another agent's same-tick mutations.
#[derive(Clone, Copy, Debug)]
pub struct CreatureSnapshot {
    pub id: Uuid,
    pub species: Species,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vz: f64,
    pub energy: f64,
}

impl From<&Creature> for CreatureSnapshot {
    fn from(c: &Creature) -> Self {
        Self {
            id: c.id,
            species: c.species,
            x: c.x,
            y: c.y,
            z: c.z,
            vx: c.vx,
            vz: c.vz,
            energy: c.energy,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FoodSnapshot {
    pub id: Uuid,
    pub x: f64,
    pub z: f64,
}

impl From<&Food> for FoodSnapshot {
    fn from(f: &Food) -> Self {
        Self {
            id: f.id,
            x: f.x,
            z: f.z,
        }
    }
}
