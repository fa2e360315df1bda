use crate::model::config::{MutationConfig, SpeciesConfig, WorldConfig};
use crate::model::water::{is_position_in_water, WaterBody, WaterShape};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait floors enforced after a mutation roll.
pub const MIN_SPEED: f64 = 0.5;
pub const MIN_SENSE: f64 = 10.0;

/// Offsets tried, scaled by body size, when an offspring's spawn position
/// falls inside water.
const SPAWN_OFFSETS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (1.0, -1.0),
    (-1.0, 1.0),
    (-1.0, -1.0),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Grazer,
    Flocker,
    Predator,
    AerialPredator,
}

impl Species {
    pub const ALL: [Species; 4] = [
        Species::Grazer,
        Species::Flocker,
        Species::Predator,
        Species::AerialPredator,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Species::Grazer => "grazer",
            Species::Flocker => "flocker",
            Species::Predator => "predator",
            Species::AerialPredator => "aerial predator",
        }
    }

    /// Terrestrial species spawn and feed at ground level; the aerial
    /// predator's y coordinate is its altitude.
    pub fn is_ground(&self) -> bool {
        !matches!(self, Species::AerialPredator)
    }
}

/// What an aerial predator is currently locked onto.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Target {
    Food(Uuid),
    Creature(Uuid),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AerialState {
    #[default]
    Cruising,
    Diving,
    Eating,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: Uuid,
    pub species: Species,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub energy: f64,
    pub size: f64,
    pub speed: f64,
    pub sense: f64,
    pub field_of_view: f64,
    /// Behavioral state; only meaningful for the aerial predator.
    pub state: AerialState,
    pub target: Option<Target>,
}

impl Creature {
    pub fn spawn<R: Rng>(
        species: Species,
        x: f64,
        y: f64,
        z: f64,
        energy: f64,
        config: &SpeciesConfig,
        rng: &mut R,
    ) -> Self {
        Self {
            id: Uuid::from_u128(rng.gen()),
            species,
            x,
            y,
            z,
            vx: rng.gen_range(-1.0..1.0),
            vy: 0.0,
            vz: rng.gen_range(-1.0..1.0),
            energy,
            size: config.size,
            speed: config.initial_speed,
            sense: config.initial_sense,
            field_of_view: config.field_of_view,
            state: AerialState::Cruising,
            target: None,
        }
    }

    /// Facing direction, derived from the current velocity heading. `None`
    /// when the velocity is degenerate (zero length).
    pub fn facing(&self) -> Option<(f64, f64, f64)> {
        let mag = (self.vx * self.vx + self.vy * self.vy + self.vz * self.vz).sqrt();
        if mag > 0.0 {
            Some((self.vx / mag, self.vy / mag, self.vz / mag))
        } else {
            None
        }
    }

    /// Perception test: within sense range, not on top of us, and inside the
    /// field-of-view cone around the facing direction. A creature with no
    /// heading sees nothing this tick.
    pub fn is_in_sight(&self, tx: f64, ty: f64, tz: f64) -> bool {
        let dx = tx - self.x;
        let dy = ty - self.y;
        let dz = tz - self.z;
        let d = (dx * dx + dy * dy + dz * dz).sqrt();
        if d > self.sense || d == 0.0 {
            return false;
        }
        let Some((fx, fy, fz)) = self.facing() else {
            return false;
        };
        let cos = ((fx * dx + fy * dy + fz * dz) / d).clamp(-1.0, 1.0);
        cos.acos() < self.field_of_view / 2.0
    }

    /// Applies energy decay and integrates one tick of horizontal motion:
    /// unit-normalized velocity scaled by speed, boundary bounce, then water
    /// bounce with a nearest-boundary push-out.
    pub fn advance(&mut self, energy_decay: f64, world: &WorldConfig, water: &[WaterBody]) {
        self.energy -= energy_decay;

        let mag = (self.vx * self.vx + self.vz * self.vz).sqrt();
        if mag > 0.0 {
            self.vx /= mag;
            self.vz /= mag;
        }
        self.x += self.vx * self.speed;
        self.z += self.vz * self.speed;

        let half_w = world.half_width();
        let half_d = world.half_depth();
        if self.x < -half_w || self.x > half_w {
            self.vx = -self.vx;
            self.x = self.x.clamp(-half_w, half_w);
        }
        if self.z < -half_d || self.z > half_d {
            self.vz = -self.vz;
            self.z = self.z.clamp(-half_d, half_d);
        }

        for body in water {
            if body.contains(self.x, self.z) {
                self.vx = -self.vx;
                self.vz = -self.vz;
                self.push_out_of(body);
            }
        }
    }

    /// Moves the position to the nearest boundary of a violated water body.
    /// `contains` is strict, so landing exactly on the boundary is outside.
    fn push_out_of(&mut self, body: &WaterBody) {
        match body.shape {
            WaterShape::Rectangle { .. } => {
                let (min_x, max_x, min_z, max_z) = body.bounds();
                let to_left = self.x - min_x;
                let to_right = max_x - self.x;
                let to_near = self.z - min_z;
                let to_far = max_z - self.z;
                let min_pen = to_left.min(to_right).min(to_near).min(to_far);
                if min_pen == to_left {
                    self.x = min_x;
                } else if min_pen == to_right {
                    self.x = max_x;
                } else if min_pen == to_near {
                    self.z = min_z;
                } else {
                    self.z = max_z;
                }
            }
            WaterShape::Circle { radius } => {
                let dx = self.x - body.x;
                let dz = self.z - body.z;
                let d = (dx * dx + dz * dz).sqrt();
                if d > 0.0 {
                    self.x = body.x + dx / d * radius;
                    self.z = body.z + dz / d * radius;
                } else {
                    self.x = body.x + radius;
                }
            }
        }
    }

    /// Splits off an offspring when energy has reached the species threshold.
    ///
    /// The parent's energy halves and the offspring starts with the other
    /// half. Ground species retry up to eight one-body-size offsets when the
    /// parent is standing somewhere an offspring cannot spawn (inside water);
    /// on exhaustion the reproduction aborts and the energy is refunded.
    /// Speed and sense each get an independent mutation roll.
    pub fn try_reproduce<R: Rng>(
        &mut self,
        config: &SpeciesConfig,
        mutation: &MutationConfig,
        water: &[WaterBody],
        rng: &mut R,
    ) -> Option<Creature> {
        if self.energy < config.reproduce_energy {
            return None;
        }
        self.energy /= 2.0;

        let spawn_at = if self.species.is_ground() && is_position_in_water(self.x, self.z, water) {
            SPAWN_OFFSETS
                .iter()
                .map(|(ox, oz)| (self.x + ox * self.size, self.z + oz * self.size))
                .find(|(x, z)| !is_position_in_water(*x, *z, water))
        } else {
            Some((self.x, self.z))
        };
        let Some((x, z)) = spawn_at else {
            // No valid spot around the parent; abort and refund.
            self.energy *= 2.0;
            return None;
        };

        let mut offspring = Creature::spawn(self.species, x, self.y, z, self.energy, config, rng);
        // A zero max_factor makes the scaling range empty; treat it as
        // mutation disabled rather than sampling from it.
        if mutation.max_factor > 0.0 {
            if rng.gen::<f64>() < mutation.rate {
                offspring.speed *= 1.0 + rng.gen_range(-mutation.max_factor..mutation.max_factor);
                offspring.speed = offspring.speed.max(MIN_SPEED);
            }
            if rng.gen::<f64>() < mutation.rate {
                offspring.sense *= 1.0 + rng.gen_range(-mutation.max_factor..mutation.max_factor);
                offspring.sense = offspring.sense.max(MIN_SENSE);
            }
        }
        Some(offspring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::AppConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_world() -> WorldConfig {
        WorldConfig {
            width: 800.0,
            depth: 800.0,
            seed: None,
        }
    }

    fn grazer_at(x: f64, z: f64, rng: &mut ChaCha8Rng) -> Creature {
        let config = AppConfig::default();
        let mut c = Creature::spawn(Species::Grazer, x, 0.0, z, 100.0, &config.grazer, rng);
        c.vx = 1.0;
        c.vz = 0.0;
        c
    }

    #[test]
    fn boundary_exit_flips_velocity_and_clamps() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut c = grazer_at(400.0, 0.0, &mut rng);
        c.vx = 1.0;
        c.advance(0.15, &test_world(), &[]);
        assert_eq!(c.x, 400.0);
        assert!(c.vx < 0.0, "outward velocity must flip sign");
    }

    #[test]
    fn advance_applies_energy_decay() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut c = grazer_at(0.0, 0.0, &mut rng);
        c.advance(0.15, &test_world(), &[]);
        assert_eq!(c.energy, 100.0 - 0.15);
    }

    #[test]
    fn zero_velocity_skips_normalization_and_blinds_perception() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut c = grazer_at(10.0, 10.0, &mut rng);
        c.vx = 0.0;
        c.vz = 0.0;
        assert!(!c.is_in_sight(20.0, 0.0, 10.0));
        c.advance(0.15, &test_world(), &[]);
        assert_eq!((c.x, c.z), (10.0, 10.0));
    }

    #[test]
    fn sense_range_edge_is_inclusive() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let c = grazer_at(0.0, 0.0, &mut rng);
        assert!(c.is_in_sight(69.99, 0.0, 0.0));
        assert!(c.is_in_sight(70.0, 0.0, 0.0));
        assert!(!c.is_in_sight(70.01, 0.0, 0.0));
    }

    #[test]
    fn field_of_view_excludes_targets_behind() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let c = grazer_at(0.0, 0.0, &mut rng);
        // fov is pi/2, so anything more than 45 degrees off-axis is unseen.
        assert!(!c.is_in_sight(-50.0, 0.0, 0.0));
        assert!(!c.is_in_sight(0.0, 0.0, 50.0));
        assert!(c.is_in_sight(50.0, 0.0, 10.0));
    }

    #[test]
    fn water_entry_bounces_and_pushes_out() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let water = [WaterBody::rectangle(10.0, 0.0, 10.0, 10.0)];
        let mut c = grazer_at(4.0, 0.0, &mut rng);
        c.vx = 1.0; // heading into the left face at x = 5
        c.advance(0.15, &test_world(), &water);
        assert!(!water[0].contains(c.x, c.z), "must end outside the water");
        assert!(c.vx < 0.0 && c.x <= 5.0);
    }

    #[test]
    fn circle_push_out_lands_on_rim() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let water = [WaterBody::circle(10.0, 0.0, 6.0)];
        let mut c = grazer_at(3.0, 0.0, &mut rng);
        c.vx = 1.0;
        c.advance(0.15, &test_world(), &water);
        let d = ((c.x - 10.0).powi(2) + c.z.powi(2)).sqrt();
        assert!(d >= 6.0, "pushed to the rim, got distance {d}");
    }

    #[test]
    fn reproduction_conserves_energy() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let config = AppConfig::default();
        let mut parent = grazer_at(0.0, 0.0, &mut rng);
        parent.energy = 260.0;
        let offspring = parent
            .try_reproduce(&config.grazer, &config.mutation, &[], &mut rng)
            .expect("threshold met");
        assert_eq!(parent.energy + offspring.energy, 260.0);
        assert_eq!(parent.energy, 130.0);
        assert_eq!((offspring.x, offspring.z), (parent.x, parent.z));
    }

    #[test]
    fn reproduction_below_threshold_is_a_no_op() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let config = AppConfig::default();
        let mut parent = grazer_at(0.0, 0.0, &mut rng);
        parent.energy = 199.9;
        assert!(parent
            .try_reproduce(&config.grazer, &config.mutation, &[], &mut rng)
            .is_none());
        assert_eq!(parent.energy, 199.9);
    }

    #[test]
    fn mutation_respects_trait_floors() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let config = AppConfig::default();
        let mutation = MutationConfig {
            rate: 1.0,
            max_factor: 0.99,
        };
        for _ in 0..200 {
            let mut parent = grazer_at(0.0, 0.0, &mut rng);
            parent.energy = 400.0;
            let offspring = parent
                .try_reproduce(&config.grazer, &mutation, &[], &mut rng)
                .expect("threshold met");
            assert!(offspring.speed >= MIN_SPEED);
            assert!(offspring.sense >= MIN_SENSE);
        }
    }

    #[test]
    fn zero_max_factor_disables_mutation_without_blocking_reproduction() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let config = AppConfig::default();
        let mutation = MutationConfig {
            rate: 1.0,
            max_factor: 0.0,
        };
        let mut parent = grazer_at(0.0, 0.0, &mut rng);
        parent.energy = 300.0;
        let offspring = parent
            .try_reproduce(&config.grazer, &mutation, &[], &mut rng)
            .expect("threshold met");
        assert_eq!(offspring.speed, config.grazer.initial_speed);
        assert_eq!(offspring.sense, config.grazer.initial_sense);
    }

    #[test]
    fn reproduction_inside_water_uses_an_offset() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = AppConfig::default();
        // Narrow channel: the east/west offsets escape it.
        let water = [WaterBody::rectangle(0.0, 0.0, 4.0, 400.0)];
        let mut parent = grazer_at(0.0, 0.0, &mut rng);
        parent.energy = 300.0;
        let offspring = parent
            .try_reproduce(&config.grazer, &config.mutation, &water, &mut rng)
            .expect("an offset must escape");
        assert!(!water[0].contains(offspring.x, offspring.z));
    }

    #[test]
    fn reproduction_with_no_escape_refunds_energy() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let config = AppConfig::default();
        // Lake much wider than one body size in every direction.
        let water = [WaterBody::rectangle(0.0, 0.0, 200.0, 200.0)];
        let mut parent = grazer_at(0.0, 0.0, &mut rng);
        parent.energy = 300.0;
        assert!(parent
            .try_reproduce(&config.grazer, &config.mutation, &water, &mut rng)
            .is_none());
        assert_eq!(parent.energy, 300.0, "aborted reproduction must refund");
    }

    #[test]
    fn aerial_offspring_spawns_in_place_over_water() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let config = AppConfig::default();
        let water = [WaterBody::rectangle(0.0, 0.0, 200.0, 200.0)];
        let mut parent = Creature::spawn(
            Species::AerialPredator,
            0.0,
            50.0,
            0.0,
            300.0,
            &config.aerial.base,
            &mut rng,
        );
        let offspring = parent
            .try_reproduce(&config.aerial.base, &config.mutation, &water, &mut rng)
            .expect("aerial species ignore water when reproducing");
        assert_eq!((offspring.x, offspring.z), (0.0, 0.0));
        assert_eq!(offspring.y, 50.0);
    }
}
