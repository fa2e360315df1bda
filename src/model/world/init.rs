//! World construction and population seeding.

use super::World;
use crate::model::config::AppConfig;
use crate::model::creature::{Creature, Species};
use crate::model::food::Food;
use crate::model::observer::{NoopHooks, WorldHooks};
use crate::model::stats::PopulationStats;
use crate::model::water;
use anyhow::{ensure, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// How many placement attempts to make before giving up on finding a dry
/// spot. Only reachable with pathological water coverage.
const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

impl World {
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_hooks(config, Box::new(NoopHooks))
    }

    pub fn with_hooks(config: AppConfig, hooks: Box<dyn WorldHooks>) -> Result<Self> {
        ensure!(
            config.world.width > 0.0 && config.world.depth > 0.0,
            "world dimensions must be positive, got {}x{}",
            config.world.width,
            config.world.depth
        );
        ensure!(
            config.simulation.tick_duration_ms > 0.0,
            "tick duration must be positive, got {} ms",
            config.simulation.tick_duration_ms
        );
        ensure!(
            config.food.regen_rate >= 1,
            "food regen rate must be at least 1, got {}",
            config.food.regen_rate
        );

        let rng = seeded_rng(&config);
        let mut world = Self {
            tick: 0,
            config,
            creatures: Vec::new(),
            food: Vec::new(),
            water: Vec::new(),
            stats: PopulationStats::default(),
            rng,
            hooks,
        };
        world.populate();
        Ok(world)
    }

    /// Returns the world to a freshly seeded tick-zero state, keeping the
    /// config and hooks. A seeded config replays the identical run.
    pub fn reset(&mut self) {
        for creature in &self.creatures {
            self.hooks.creature_removed(creature.id);
        }
        for item in &self.food {
            self.hooks.food_removed(item.id);
        }
        self.creatures.clear();
        self.food.clear();
        self.water.clear();
        self.tick = 0;
        self.rng = seeded_rng(&self.config);
        self.populate();
    }

    fn populate(&mut self) {
        self.water = water::generate(&self.config.world, &self.config.water, &mut self.rng);

        for _ in 0..self.config.food.initial_count {
            self.spawn_food();
        }

        for species in [Species::Grazer, Species::Flocker, Species::Predator] {
            let cfg = self.config.species(species).clone();
            for _ in 0..cfg.initial_count {
                if let Some((x, z)) = self.sample_ground_position() {
                    let creature =
                        Creature::spawn(species, x, 0.0, z, cfg.initial_energy, &cfg, &mut self.rng);
                    self.hooks.creature_added(&creature);
                    self.creatures.push(creature);
                }
            }
        }

        // Aerial predators start airborne at cruise altitude, so water below
        // them does not constrain placement.
        let aerial = self.config.aerial.clone();
        for _ in 0..aerial.base.initial_count {
            let x = self
                .rng
                .gen_range(-self.config.world.half_width()..self.config.world.half_width());
            let z = self
                .rng
                .gen_range(-self.config.world.half_depth()..self.config.world.half_depth());
            let creature = Creature::spawn(
                Species::AerialPredator,
                x,
                aerial.cruise_altitude,
                z,
                aerial.base.initial_energy,
                &aerial.base,
                &mut self.rng,
            );
            self.hooks.creature_added(&creature);
            self.creatures.push(creature);
        }

        self.stats = PopulationStats::compute(self.tick, &self.creatures, self.food.len());
    }

    /// Spawns one food item on dry land, if a spot can be found.
    pub(crate) fn spawn_food(&mut self) {
        if let Some((x, z)) = self.sample_ground_position() {
            let item = Food::spawn(x, z, &mut self.rng);
            self.hooks.food_added(&item);
            self.food.push(item);
        }
    }

    /// Uniformly samples a position outside every water body. Resampling is
    /// capped so that a config with near-total water coverage degrades into
    /// a warning instead of an infinite loop.
    fn sample_ground_position(&mut self) -> Option<(f64, f64)> {
        let half_w = self.config.world.half_width();
        let half_d = self.config.world.half_depth();
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = self.rng.gen_range(-half_w..half_w);
            let z = self.rng.gen_range(-half_d..half_d);
            if !water::is_position_in_water(x, z, &self.water) {
                return Some((x, z));
            }
        }
        tracing::warn!(
            attempts = MAX_PLACEMENT_ATTEMPTS,
            "no dry spawn position found, skipping placement"
        );
        None
    }
}

fn seeded_rng(config: &AppConfig) -> ChaCha8Rng {
    match config.world.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::water::is_position_in_water;

    fn seeded_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.world.seed = Some(7);
        config
    }

    #[test]
    fn new_world_seeds_the_configured_populations() {
        let config = seeded_config();
        let world = World::new(config.clone()).unwrap();

        let count = |species: Species| {
            world
                .creatures
                .iter()
                .filter(|c| c.species == species)
                .count()
        };
        assert_eq!(count(Species::Grazer), config.grazer.initial_count);
        assert_eq!(count(Species::Flocker), config.flocker.base.initial_count);
        assert_eq!(count(Species::Predator), config.predator.base.initial_count);
        assert_eq!(
            count(Species::AerialPredator),
            config.aerial.base.initial_count
        );
        assert_eq!(world.food.len(), config.food.initial_count);
        assert_eq!(world.tick, 0);
    }

    #[test]
    fn ground_creatures_and_food_spawn_on_dry_land() {
        let world = World::new(seeded_config()).unwrap();
        for creature in world.creatures.iter().filter(|c| c.species.is_ground()) {
            assert!(
                !is_position_in_water(creature.x, creature.z, &world.water),
                "ground creature spawned inside water at ({}, {})",
                creature.x,
                creature.z
            );
        }
        for item in &world.food {
            assert!(
                !is_position_in_water(item.x, item.z, &world.water),
                "food spawned inside water at ({}, {})",
                item.x,
                item.z
            );
        }
    }

    #[test]
    fn aerial_predators_start_at_cruise_altitude() {
        let world = World::new(seeded_config()).unwrap();
        for creature in world
            .creatures
            .iter()
            .filter(|c| c.species == Species::AerialPredator)
        {
            assert_eq!(creature.y, world.config.aerial.cruise_altitude);
        }
    }

    #[test]
    fn reset_replays_the_same_seeded_layout() {
        let mut world = World::new(seeded_config()).unwrap();
        let initial = world.creatures.clone();
        for _ in 0..10 {
            world.update();
        }
        world.reset();
        assert_eq!(world.tick, 0);
        assert_eq!(world.creatures, initial);
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        let mut config = AppConfig::default();
        config.world.width = 0.0;
        assert!(World::new(config).is_err());
    }
}
