use super::{distance_2d, random_walk, PolicyContext, TickOutcome};
use crate::model::creature::{Creature, Species};
use crate::model::snapshot::CreatureSnapshot;
use rand::Rng;

/// An aerial predator flying below this altitude can be taken on the ground.
const LOW_ALTITUDE: f64 = 5.0;

fn is_prey(hunter: &Creature, candidate: &CreatureSnapshot) -> bool {
    if candidate.id == hunter.id {
        return false;
    }
    match candidate.species {
        Species::Grazer | Species::Flocker => true,
        Species::AerialPredator => candidate.y < LOW_ALTITUDE,
        Species::Predator => false,
    }
}

/// Predator policy: chase the nearest visible prey, wander otherwise; a kill
/// yields the flat bonus plus half the prey's energy at the start of the tick.
pub fn update<R: Rng>(
    creature: &mut Creature,
    ctx: &PolicyContext<'_>,
    rng: &mut R,
) -> TickOutcome {
    let config = &ctx.config.predator;

    let mut target: Option<(usize, f64)> = None;
    for (idx, other) in ctx.creatures.iter().enumerate() {
        if !is_prey(creature, other) || !creature.is_in_sight(other.x, other.y, other.z) {
            continue;
        }
        let d = distance_2d(creature.x, creature.z, other.x, other.z);
        if target.map_or(true, |(_, bd)| d < bd) {
            target = Some((idx, d));
        }
    }

    if let Some((idx, _)) = target {
        let prey = &ctx.creatures[idx];
        creature.vx = prey.x - creature.x;
        creature.vz = prey.z - creature.z;
    } else {
        random_walk(creature, rng);
    }

    creature.advance(config.base.energy_decay, &ctx.config.world, ctx.water);

    let mut hunted_creature_id = None;
    if let Some((idx, _)) = target {
        let prey = &ctx.creatures[idx];
        if distance_2d(creature.x, creature.z, prey.x, prey.z) < creature.size * 2.0 {
            creature.energy += config.prey_energy_bonus + prey.energy * 0.5;
            hunted_creature_id = Some(prey.id);
        }
    }

    let offspring = creature.try_reproduce(&config.base, &ctx.config.mutation, ctx.water, rng);
    TickOutcome {
        consumed_food_id: None,
        hunted_creature_id,
        offspring,
    }
}
