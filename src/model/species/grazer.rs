use super::{distance_2d, nearest_visible_food, random_walk, PolicyContext, TickOutcome};
use crate::model::creature::Creature;
use rand::Rng;

/// Grazer policy: steer straight at the nearest visible food, wander
/// otherwise, and consume on contact.
pub fn update<R: Rng>(
    creature: &mut Creature,
    ctx: &PolicyContext<'_>,
    rng: &mut R,
) -> TickOutcome {
    let config = &ctx.config.grazer;

    let target = nearest_visible_food(creature, ctx.food);
    if let Some((idx, _)) = target {
        let food = &ctx.food[idx];
        creature.vx = food.x - creature.x;
        creature.vz = food.z - creature.z;
    } else {
        random_walk(creature, rng);
    }

    creature.advance(config.energy_decay, &ctx.config.world, ctx.water);

    let mut consumed_food_id = None;
    if let Some((idx, _)) = target {
        let food = &ctx.food[idx];
        if distance_2d(creature.x, creature.z, food.x, food.z) < creature.size * 2.0 {
            creature.energy += ctx.config.food.energy;
            consumed_food_id = Some(food.id);
        }
    }

    let offspring = creature.try_reproduce(config, &ctx.config.mutation, ctx.water, rng);
    TickOutcome {
        consumed_food_id,
        hunted_creature_id: None,
        offspring,
    }
}
