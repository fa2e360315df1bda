mod init;
mod update;

use crate::model::config::AppConfig;
use crate::model::creature::{Creature, Species};
use crate::model::food::Food;
use crate::model::observer::WorldHooks;
use crate::model::stats::PopulationStats;
use crate::model::water::WaterBody;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// The authoritative simulation state. The world exclusively owns the live
/// creature and food collections; policies only read snapshots of them and
/// all removals/additions happen here, at defined points after the full
/// per-creature pass.
pub struct World {
    pub tick: u64,
    pub config: AppConfig,
    pub creatures: Vec<Creature>,
    pub food: Vec<Food>,
    pub water: Vec<WaterBody>,
    pub stats: PopulationStats,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) hooks: Box<dyn WorldHooks>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Starved,
    Hunted,
}

/// Things that happened during a tick, for logging and UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveEvent {
    Birth {
        id: Uuid,
        species: Species,
    },
    Death {
        id: Uuid,
        species: Species,
        cause: DeathCause,
    },
    FoodConsumed {
        id: Uuid,
        by: Uuid,
    },
}

impl World {
    /// Forwards the debug-overlay toggle to the render hooks; this has no
    /// effect on simulation outcomes.
    pub fn set_overlay_visibility(&mut self, visible: bool) {
        self.hooks.overlay_visibility(visible);
    }
}
