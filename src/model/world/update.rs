//! The per-tick update pass.

use super::{DeathCause, LiveEvent, World};
use crate::model::creature::Creature;
use crate::model::snapshot::{CreatureSnapshot, FoodSnapshot};
use crate::model::species::{self, PolicyContext};
use crate::model::stats::PopulationStats;
use std::collections::HashSet;
use uuid::Uuid;

impl World {
    /// Advances the simulation by one tick and reports what happened.
    ///
    /// Every creature decides against the snapshot taken at the start of
    /// the tick, so within a tick no creature observes another's movement.
    /// Consumption, deaths, and births are applied after the full pass.
    pub fn update(&mut self) -> Vec<LiveEvent> {
        self.tick += 1;
        let mut events = Vec::new();

        // Food regeneration cadence derives from the rate: higher rates mean
        // shorter intervals. A rate of 0 (reachable through runtime config
        // tuning) or above 100 means never.
        if let Some(cadence) = 100u64.checked_div(self.config.food.regen_rate) {
            if cadence > 0 && self.tick % cadence == 0 {
                self.spawn_food();
            }
        }

        let creature_snapshots: Vec<CreatureSnapshot> =
            self.creatures.iter().map(CreatureSnapshot::from).collect();
        let food_snapshots: Vec<FoodSnapshot> =
            self.food.iter().map(FoodSnapshot::from).collect();

        let mut consumed: HashSet<Uuid> = HashSet::new();
        let mut hunted: HashSet<Uuid> = HashSet::new();
        let mut births: Vec<Creature> = Vec::new();

        let ctx = PolicyContext {
            config: &self.config,
            creatures: &creature_snapshots,
            food: &food_snapshots,
            water: &self.water,
        };
        let rng = &mut self.rng;
        for creature in self.creatures.iter_mut() {
            // Drained creatures are culled at the end of this pass; until
            // then they must not act.
            if creature.energy <= 0.0 {
                continue;
            }
            let outcome = species::update_creature(creature, &ctx, rng);
            if let Some(food_id) = outcome.consumed_food_id {
                consumed.insert(food_id);
                events.push(LiveEvent::FoodConsumed {
                    id: food_id,
                    by: creature.id,
                });
            }
            if let Some(prey_id) = outcome.hunted_creature_id {
                hunted.insert(prey_id);
            }
            if let Some(child) = outcome.offspring {
                births.push(child);
            }
        }

        if !consumed.is_empty() {
            let hooks = &mut self.hooks;
            self.food.retain(|item| {
                if consumed.contains(&item.id) {
                    hooks.food_removed(item.id);
                    false
                } else {
                    true
                }
            });
        }

        let mut deaths = Vec::new();
        let hooks = &mut self.hooks;
        self.creatures.retain(|creature| {
            let cause = if hunted.contains(&creature.id) {
                Some(DeathCause::Hunted)
            } else if creature.energy <= 0.0 {
                Some(DeathCause::Starved)
            } else {
                None
            };
            match cause {
                Some(cause) => {
                    hooks.creature_removed(creature.id);
                    deaths.push(LiveEvent::Death {
                        id: creature.id,
                        species: creature.species,
                        cause,
                    });
                    false
                }
                None => true,
            }
        });
        events.extend(deaths);

        for child in births {
            self.hooks.creature_added(&child);
            events.push(LiveEvent::Birth {
                id: child.id,
                species: child.species,
            });
            self.creatures.push(child);
        }

        self.stats = PopulationStats::compute(self.tick, &self.creatures, self.food.len());
        events
    }
}
