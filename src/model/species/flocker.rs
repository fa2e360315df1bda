use super::{distance_2d, nearest_visible_food, random_walk, PolicyContext, TickOutcome};
use crate::model::creature::{Creature, Species};
use rand::Rng;

/// Proportional gain of the food-seeking steering term.
const FOOD_STEER: f64 = 0.05;

/// Flocker policy: classic boid forces over same-species neighbors, a gentle
/// pull toward visible food, and the grazer's consumption rule.
pub fn update<R: Rng>(
    creature: &mut Creature,
    ctx: &PolicyContext<'_>,
    rng: &mut R,
) -> TickOutcome {
    let config = &ctx.config.flocker;

    let (separation, alignment, cohesion) = flock_forces(creature, ctx);
    creature.vx += separation.0 * config.separation_weight
        + alignment.0 * config.alignment_weight
        + cohesion.0 * config.cohesion_weight;
    creature.vz += separation.1 * config.separation_weight
        + alignment.1 * config.alignment_weight
        + cohesion.1 * config.cohesion_weight;

    let target = nearest_visible_food(creature, ctx.food);
    if let Some((idx, _)) = target {
        let food = &ctx.food[idx];
        creature.vx += (food.x - creature.x) * FOOD_STEER;
        creature.vz += (food.z - creature.z) * FOOD_STEER;
    } else {
        random_walk(creature, rng);
    }

    creature.advance(config.base.energy_decay, &ctx.config.world, ctx.water);

    let mut consumed_food_id = None;
    if let Some((idx, _)) = target {
        let food = &ctx.food[idx];
        if distance_2d(creature.x, creature.z, food.x, food.z) < creature.size * 2.0 {
            creature.energy += ctx.config.food.energy;
            consumed_food_id = Some(food.id);
        }
    }

    let offspring = creature.try_reproduce(&config.base, &ctx.config.mutation, ctx.water, rng);
    TickOutcome {
        consumed_food_id,
        hunted_creature_id: None,
        offspring,
    }
}

/// Raw separation, alignment, and cohesion vectors over flockmates within
/// `flock_radius`, before weighting.
fn flock_forces(creature: &Creature, ctx: &PolicyContext<'_>) -> ((f64, f64), (f64, f64), (f64, f64)) {
    let radius = ctx.config.flocker.flock_radius;
    let mut separation = (0.0, 0.0);
    let mut alignment = (0.0, 0.0);
    let mut cohesion = (0.0, 0.0);
    let mut neighbors = 0usize;

    for other in ctx.creatures {
        if other.id == creature.id || other.species != Species::Flocker {
            continue;
        }
        let d = distance_2d(creature.x, creature.z, other.x, other.z);
        if d <= 0.0 || d >= radius {
            continue;
        }
        // Away from the neighbor, weighted inversely by distance.
        let away = ((creature.x - other.x) / d, (creature.z - other.z) / d);
        separation.0 += away.0 / d;
        separation.1 += away.1 / d;
        alignment.0 += other.vx;
        alignment.1 += other.vz;
        cohesion.0 += other.x;
        cohesion.1 += other.z;
        neighbors += 1;
    }

    if neighbors > 0 {
        let n = neighbors as f64;
        alignment.0 /= n;
        alignment.1 /= n;
        cohesion.0 = cohesion.0 / n - creature.x;
        cohesion.1 = cohesion.1 / n - creature.z;
    }
    (separation, alignment, cohesion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::AppConfig;
    use crate::model::snapshot::CreatureSnapshot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uuid::Uuid;

    fn flocker_at(x: f64, z: f64, config: &AppConfig, rng: &mut ChaCha8Rng) -> Creature {
        let mut c = Creature::spawn(
            Species::Flocker,
            x,
            0.0,
            z,
            120.0,
            &config.flocker.base,
            rng,
        );
        c.vx = 1.0;
        c.vz = 0.0;
        c
    }

    fn snapshot(id: u128, species: Species, x: f64, z: f64, vx: f64, vz: f64) -> CreatureSnapshot {
        CreatureSnapshot {
            id: Uuid::from_u128(id),
            species,
            x,
            y: 0.0,
            z,
            vx,
            vz,
            energy: 120.0,
        }
    }

    #[test]
    fn cohesion_pulls_toward_the_flock_centroid() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let creature = flocker_at(0.0, 0.0, &config, &mut rng);
        let neighbors = vec![
            snapshot(1, Species::Flocker, 20.0, 10.0, 0.0, 0.0),
            snapshot(2, Species::Flocker, 20.0, -10.0, 0.0, 0.0),
        ];
        let ctx = PolicyContext {
            config: &config,
            creatures: &neighbors,
            food: &[],
            water: &[],
        };
        let (_, _, cohesion) = flock_forces(&creature, &ctx);
        assert_eq!(cohesion, (20.0, 0.0));
    }

    #[test]
    fn separation_pushes_away_from_a_close_neighbor() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let creature = flocker_at(0.0, 0.0, &config, &mut rng);
        let neighbors = vec![snapshot(1, Species::Flocker, 2.0, 0.0, 0.0, 0.0)];
        let ctx = PolicyContext {
            config: &config,
            creatures: &neighbors,
            food: &[],
            water: &[],
        };
        let (separation, _, _) = flock_forces(&creature, &ctx);
        assert!(separation.0 < 0.0, "pushed along -x, away from the neighbor");
        assert_eq!(separation.1, 0.0);
    }

    #[test]
    fn alignment_averages_neighbor_velocities() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let creature = flocker_at(0.0, 0.0, &config, &mut rng);
        let neighbors = vec![
            snapshot(1, Species::Flocker, 10.0, 0.0, 1.0, 1.0),
            snapshot(2, Species::Flocker, -10.0, 0.0, 0.0, 1.0),
        ];
        let ctx = PolicyContext {
            config: &config,
            creatures: &neighbors,
            food: &[],
            water: &[],
        };
        let (_, alignment, _) = flock_forces(&creature, &ctx);
        assert_eq!(alignment, (0.5, 1.0));
    }

    #[test]
    fn other_species_and_distant_flockers_are_not_neighbors() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let creature = flocker_at(0.0, 0.0, &config, &mut rng);
        let neighbors = vec![
            snapshot(1, Species::Grazer, 5.0, 0.0, 1.0, 0.0),
            snapshot(2, Species::Flocker, 100.0, 0.0, 1.0, 0.0), // beyond flock_radius
        ];
        let ctx = PolicyContext {
            config: &config,
            creatures: &neighbors,
            food: &[],
            water: &[],
        };
        let (separation, alignment, cohesion) = flock_forces(&creature, &ctx);
        assert_eq!(separation, (0.0, 0.0));
        assert_eq!(alignment, (0.0, 0.0));
        assert_eq!(cohesion, (0.0, 0.0));
    }
}
