use super::{distance_2d, random_walk, PolicyContext, TickOutcome};
use crate::model::creature::{AerialState, Creature, Target};
use crate::model::snapshot::{CreatureSnapshot, FoodSnapshot};
use rand::Rng;

/// Proportional gains for altitude keeping and the dive.
const CRUISE_GAIN: f64 = 0.05;
const DIVE_GAIN: f64 = 0.1;
/// Below this altitude the dive ends in a landing.
const LANDING_ALTITUDE: f64 = 1.0;

/// Aerial predator policy: a cruising → diving → eating state machine.
///
/// While cruising the bird holds altitude and scans for the nearest visible
/// target, creature or food, whichever is physically closer. A dive locks
/// the target and aborts if it disappears from the live collections; landing
/// within reach consumes it.
pub fn update<R: Rng>(
    creature: &mut Creature,
    ctx: &PolicyContext<'_>,
    rng: &mut R,
) -> TickOutcome {
    let config = &ctx.config.aerial;

    let mut consumed_food_id = None;
    let mut hunted_creature_id = None;

    match creature.state {
        AerialState::Cruising => {
            if let Some(target) = scan_for_target(creature, ctx) {
                creature.state = AerialState::Diving;
                creature.target = Some(target);
            }
            creature.vy = (config.cruise_altitude - creature.y) * CRUISE_GAIN;
        }
        AerialState::Diving => {
            if lookup_target(creature.target, ctx).is_none() {
                drop_target(creature);
            } else {
                creature.vy = -creature.y * DIVE_GAIN;
                if creature.y < LANDING_ALTITUDE {
                    creature.y = 0.0;
                    creature.state = AerialState::Eating;
                }
            }
        }
        AerialState::Eating => {
            match lookup_target(creature.target, ctx) {
                Some((tx, tz))
                    if distance_2d(creature.x, creature.z, tx, tz) < creature.size * 2.0 =>
                {
                    match creature.target {
                        Some(Target::Creature(id)) => {
                            let prey_energy = ctx
                                .creatures
                                .iter()
                                .find(|c| c.id == id)
                                .map(|c| c.energy)
                                .unwrap_or(0.0);
                            creature.energy += config.prey_energy_bonus + prey_energy * 0.5;
                            hunted_creature_id = Some(id);
                        }
                        Some(Target::Food(id)) => {
                            creature.energy += ctx.config.food.energy;
                            consumed_food_id = Some(id);
                        }
                        None => {}
                    }
                    drop_target(creature);
                }
                // Gone, or out of reach: give up without consuming.
                _ => drop_target(creature),
            }
        }
    }

    creature.y += creature.vy;
    creature.y = creature.y.max(0.0);

    let steer = match (creature.state, creature.target) {
        (AerialState::Diving, Some(target)) => lookup_target(Some(target), ctx),
        _ => None,
    };
    if let Some((tx, tz)) = steer {
        creature.vx = tx - creature.x;
        creature.vz = tz - creature.z;
    } else {
        random_walk(creature, rng);
    }

    creature.advance(config.base.energy_decay, &ctx.config.world, ctx.water);

    let offspring = creature.try_reproduce(&config.base, &ctx.config.mutation, ctx.water, rng);
    TickOutcome {
        consumed_food_id,
        hunted_creature_id,
        offspring,
    }
}

/// Nearest visible target across every other living creature and every food
/// item, compared by horizontal distance: a single nearest-wins rule spanning
/// both kinds.
fn scan_for_target(creature: &Creature, ctx: &PolicyContext<'_>) -> Option<Target> {
    let mut best: Option<(Target, f64)> = None;
    for other in ctx.creatures {
        if other.id == creature.id || !creature.is_in_sight(other.x, other.y, other.z) {
            continue;
        }
        let d = distance_2d(creature.x, creature.z, other.x, other.z);
        if best.as_ref().map_or(true, |(_, bd)| d < *bd) {
            best = Some((Target::Creature(other.id), d));
        }
    }
    for f in ctx.food {
        if !creature.is_in_sight(f.x, 0.0, f.z) {
            continue;
        }
        let d = distance_2d(creature.x, creature.z, f.x, f.z);
        if best.as_ref().map_or(true, |(_, bd)| d < *bd) {
            best = Some((Target::Food(f.id), d));
        }
    }
    best.map(|(t, _)| t)
}

/// Position of the locked target if it is still present in the live
/// collections (and, for creatures, still has energy).
fn lookup_target(target: Option<Target>, ctx: &PolicyContext<'_>) -> Option<(f64, f64)> {
    match target? {
        Target::Creature(id) => ctx
            .creatures
            .iter()
            .find(|c: &&CreatureSnapshot| c.id == id && c.energy > 0.0)
            .map(|c| (c.x, c.z)),
        Target::Food(id) => ctx
            .food
            .iter()
            .find(|f: &&FoodSnapshot| f.id == id)
            .map(|f| (f.x, f.z)),
    }
}

fn drop_target(creature: &mut Creature) {
    creature.state = AerialState::Cruising;
    creature.target = None;
}
