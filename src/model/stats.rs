use crate::model::creature::{Creature, Species};
use serde::Serialize;

/// Per-species aggregate published each tick. Means are `None` when the
/// species is extinct.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpeciesStats {
    pub count: usize,
    pub mean_speed: Option<f64>,
    pub mean_sense: Option<f64>,
}

/// Read-only observability snapshot recomputed at the end of every tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PopulationStats {
    pub tick: u64,
    pub total_creatures: usize,
    pub food_count: usize,
    pub grazer: SpeciesStats,
    pub flocker: SpeciesStats,
    pub predator: SpeciesStats,
    pub aerial: SpeciesStats,
}

impl PopulationStats {
    pub fn compute(tick: u64, creatures: &[Creature], food_count: usize) -> Self {
        let mut stats = Self {
            tick,
            total_creatures: creatures.len(),
            food_count,
            ..Self::default()
        };
        let mut speed_sums = [0.0f64; 4];
        let mut sense_sums = [0.0f64; 4];
        for c in creatures {
            let idx = species_index(c.species);
            let entry = stats.species_mut(c.species);
            entry.count += 1;
            speed_sums[idx] += c.speed;
            sense_sums[idx] += c.sense;
        }
        for species in Species::ALL {
            let idx = species_index(species);
            let entry = stats.species_mut(species);
            if entry.count > 0 {
                entry.mean_speed = Some(speed_sums[idx] / entry.count as f64);
                entry.mean_sense = Some(sense_sums[idx] / entry.count as f64);
            }
        }
        stats
    }

    pub fn species(&self, species: Species) -> &SpeciesStats {
        match species {
            Species::Grazer => &self.grazer,
            Species::Flocker => &self.flocker,
            Species::Predator => &self.predator,
            Species::AerialPredator => &self.aerial,
        }
    }

    fn species_mut(&mut self, species: Species) -> &mut SpeciesStats {
        match species {
            Species::Grazer => &mut self.grazer,
            Species::Flocker => &mut self.flocker,
            Species::Predator => &mut self.predator,
            Species::AerialPredator => &mut self.aerial,
        }
    }
}

fn species_index(species: Species) -> usize {
    match species {
        Species::Grazer => 0,
        Species::Flocker => 1,
        Species::Predator => 2,
        Species::AerialPredator => 3,
    }
}
