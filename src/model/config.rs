use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SimulationConfig {
    /// Target wall-clock duration of one simulation tick, in milliseconds.
    pub tick_duration_ms: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WorldConfig {
    pub width: f64,
    pub depth: f64,
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl WorldConfig {
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_depth(&self) -> f64 {
        self.depth / 2.0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FoodConfig {
    pub initial_count: usize,
    pub energy: f64,
    /// One food item spawns every `floor(100 / regen_rate)` ticks.
    pub regen_rate: u64,
}

/// Parameters shared by every species.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SpeciesConfig {
    pub initial_count: usize,
    pub color: String,
    pub initial_energy: f64,
    pub reproduce_energy: f64,
    pub energy_decay: f64,
    pub size: f64,
    pub initial_speed: f64,
    pub initial_sense: f64,
    pub field_of_view: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FlockerConfig {
    #[serde(flatten)]
    pub base: SpeciesConfig,
    /// How far a flocker can see its flockmates.
    pub flock_radius: f64,
    pub separation_weight: f64,
    pub alignment_weight: f64,
    pub cohesion_weight: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PredatorConfig {
    #[serde(flatten)]
    pub base: SpeciesConfig,
    pub prey_energy_bonus: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AerialConfig {
    #[serde(flatten)]
    pub base: SpeciesConfig,
    pub prey_energy_bonus: f64,
    pub cruise_altitude: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WaterShapeKind {
    Rectangle,
    Circle,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WaterConfig {
    pub enabled: bool,
    pub body_count: usize,
    pub shape_types: Vec<WaterShapeKind>,
    pub min_width: f64,
    pub max_width: f64,
    pub min_depth: f64,
    pub max_depth: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub color: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MutationConfig {
    /// Chance of a mutation roll on each heritable trait at reproduction.
    pub rate: f64,
    /// Traits scale by `1 + U(-max_factor, max_factor)` when a roll hits.
    pub max_factor: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub world: WorldConfig,
    pub food: FoodConfig,
    pub grazer: SpeciesConfig,
    pub flocker: FlockerConfig,
    pub predator: PredatorConfig,
    pub aerial: AerialConfig,
    pub mutation: MutationConfig,
    pub water: WaterConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                tick_duration_ms: 33.0,
            },
            world: WorldConfig {
                width: 800.0,
                depth: 800.0,
                seed: None,
            },
            food: FoodConfig {
                initial_count: 150,
                energy: 25.0,
                regen_rate: 20,
            },
            grazer: SpeciesConfig {
                initial_count: 25,
                color: "#a0a0a0".to_string(),
                initial_energy: 100.0,
                reproduce_energy: 200.0,
                energy_decay: 0.15,
                size: 2.5,
                initial_speed: 1.5,
                initial_sense: 70.0,
                field_of_view: PI / 2.0,
            },
            flocker: FlockerConfig {
                base: SpeciesConfig {
                    initial_count: 15,
                    color: "#e0e0e0".to_string(),
                    initial_energy: 120.0,
                    reproduce_energy: 250.0,
                    energy_decay: 0.2,
                    size: 3.5,
                    initial_speed: 1.2,
                    initial_sense: 60.0,
                    field_of_view: PI / 2.0,
                },
                flock_radius: 50.0,
                separation_weight: 0.05,
                alignment_weight: 0.03,
                cohesion_weight: 0.01,
            },
            predator: PredatorConfig {
                base: SpeciesConfig {
                    initial_count: 4,
                    color: "#d46a34".to_string(),
                    initial_energy: 120.0,
                    reproduce_energy: 250.0,
                    energy_decay: 0.25,
                    size: 4.0,
                    initial_speed: 1.8,
                    initial_sense: 100.0,
                    field_of_view: PI / 1.5,
                },
                prey_energy_bonus: 80.0,
            },
            aerial: AerialConfig {
                base: SpeciesConfig {
                    initial_count: 6,
                    color: "#57c4e5".to_string(),
                    initial_energy: 100.0,
                    reproduce_energy: 180.0,
                    energy_decay: 0.2,
                    size: 3.0,
                    initial_speed: 2.0,
                    initial_sense: 120.0,
                    field_of_view: PI,
                },
                prey_energy_bonus: 60.0,
                cruise_altitude: 50.0,
            },
            mutation: MutationConfig {
                rate: 0.1,
                max_factor: 0.2,
            },
            water: WaterConfig {
                enabled: true,
                body_count: 3,
                shape_types: vec![WaterShapeKind::Rectangle, WaterShapeKind::Circle],
                min_width: 60.0,
                max_width: 160.0,
                min_depth: 60.0,
                max_depth: 160.0,
                min_radius: 30.0,
                max_radius: 80.0,
                color: "#3b82c4".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Loads the config from `path`, falling back to defaults when the file
    /// is missing (and writing a default file in that case, so users have a
    /// template to edit). A present but malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            let default = Self::default();
            if let Ok(rendered) = toml::to_string(&default) {
                let _ = fs::write(path, rendered);
            }
            return Ok(default);
        }
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Shared parameters for a species tag.
    pub fn species(&self, species: crate::model::creature::Species) -> &SpeciesConfig {
        use crate::model::creature::Species;
        match species {
            Species::Grazer => &self.grazer,
            Species::Flocker => &self.flocker.base,
            Species::Predator => &self.predator.base,
            Species::AerialPredator => &self.aerial.base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_stock_parameters() {
        let config = AppConfig::default();
        assert_eq!(config.simulation.tick_duration_ms, 33.0);
        assert_eq!(config.world.width, 800.0);
        assert_eq!(config.food.initial_count, 150);
        assert_eq!(config.grazer.initial_sense, 70.0);
        assert_eq!(config.flocker.flock_radius, 50.0);
        assert_eq!(config.predator.prey_energy_bonus, 80.0);
        assert_eq!(config.aerial.cruise_altitude, 50.0);
        assert_eq!(config.mutation.rate, 0.1);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = AppConfig::default();
        let rendered = toml::to_string(&config).expect("serialize");
        let parsed = AppConfig::from_toml_str(&rendered).expect("parse");
        assert_eq!(parsed.world.width, config.world.width);
        assert_eq!(parsed.flocker.separation_weight, config.flocker.separation_weight);
        assert_eq!(parsed.aerial.prey_energy_bonus, config.aerial.prey_energy_bonus);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let err = AppConfig::from_toml_str("this is not toml at all = [");
        assert!(err.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("glade-missing-config-test.toml");
        let _ = std::fs::remove_file(&path);
        let config = AppConfig::load(&path).expect("load");
        assert_eq!(config.world.width, 800.0);
        let _ = std::fs::remove_file(&path);
    }
}
