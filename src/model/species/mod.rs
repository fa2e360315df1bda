//! Per-species decision policies.
//!
//! Each policy mutates only the acting creature (velocity, position via
//! `advance`, energy, behavioral state) and reports everything else as a
//! [`TickOutcome`] descriptor; the world applies consumption, hunts, and
//! births atomically at the end of the tick.

use crate::model::config::AppConfig;
use crate::model::creature::{Creature, Species};
use crate::model::snapshot::{CreatureSnapshot, FoodSnapshot};
use crate::model::water::WaterBody;
use rand::Rng;
use uuid::Uuid;

mod aerial;
mod flocker;
mod grazer;
mod predator;

/// Uniform jitter added to each velocity component on a random-walk tick.
pub(crate) const JITTER: f64 = 0.2;

/// Deferred effects of one creature's tick.
#[derive(Debug, Default)]
pub struct TickOutcome {
    pub consumed_food_id: Option<Uuid>,
    pub hunted_creature_id: Option<Uuid>,
    pub offspring: Option<Creature>,
}

/// Immutable view of the world handed to every policy: the prior tick's
/// committed creature/food snapshots plus configuration and geometry.
pub struct PolicyContext<'a> {
    pub config: &'a AppConfig,
    pub creatures: &'a [CreatureSnapshot],
    pub food: &'a [FoodSnapshot],
    pub water: &'a [WaterBody],
}

pub fn update_creature<R: Rng>(
    creature: &mut Creature,
    ctx: &PolicyContext<'_>,
    rng: &mut R,
) -> TickOutcome {
    match creature.species {
        Species::Grazer => grazer::update(creature, ctx, rng),
        Species::Flocker => flocker::update(creature, ctx, rng),
        Species::Predator => predator::update(creature, ctx, rng),
        Species::AerialPredator => aerial::update(creature, ctx, rng),
    }
}

pub(crate) fn distance_2d(ax: f64, az: f64, bx: f64, bz: f64) -> f64 {
    ((ax - bx).powi(2) + (az - bz).powi(2)).sqrt()
}

pub(crate) fn random_walk<R: Rng>(creature: &mut Creature, rng: &mut R) {
    creature.vx += rng.gen_range(-JITTER..JITTER);
    creature.vz += rng.gen_range(-JITTER..JITTER);
}

/// Nearest food item in sight, as `(index, distance)`. Strictly-nearest wins;
/// equal distances resolve to the first one encountered.
pub(crate) fn nearest_visible_food(
    creature: &Creature,
    food: &[FoodSnapshot],
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, f) in food.iter().enumerate() {
        if !creature.is_in_sight(f.x, 0.0, f.z) {
            continue;
        }
        let d = distance_2d(creature.x, creature.z, f.x, f.z);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((idx, d));
        }
    }
    best
}
