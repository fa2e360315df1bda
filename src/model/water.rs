use crate::model::config::{WaterConfig, WaterShapeKind, WorldConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An impassable water region. Creatures bounce off its boundary and nothing
/// spawns inside it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaterBody {
    pub x: f64,
    pub z: f64,
    pub shape: WaterShape,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum WaterShape {
    Rectangle { width: f64, depth: f64 },
    Circle { radius: f64 },
}

impl WaterBody {
    pub fn rectangle(x: f64, z: f64, width: f64, depth: f64) -> Self {
        Self {
            x,
            z,
            shape: WaterShape::Rectangle { width, depth },
        }
    }

    pub fn circle(x: f64, z: f64, radius: f64) -> Self {
        Self {
            x,
            z,
            shape: WaterShape::Circle { radius },
        }
    }

    /// Axis-aligned bounding box as `(min_x, max_x, min_z, max_z)`. A circle's
    /// box is the square of side `2 * radius`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (hw, hd) = match self.shape {
            WaterShape::Rectangle { width, depth } => (width / 2.0, depth / 2.0),
            WaterShape::Circle { radius } => (radius, radius),
        };
        (self.x - hw, self.x + hw, self.z - hd, self.z + hd)
    }

    /// True iff the point lies strictly inside the body.
    pub fn contains(&self, x: f64, z: f64) -> bool {
        match self.shape {
            WaterShape::Rectangle { .. } => {
                let (min_x, max_x, min_z, max_z) = self.bounds();
                x > min_x && x < max_x && z > min_z && z < max_z
            }
            WaterShape::Circle { radius } => {
                let dx = x - self.x;
                let dz = z - self.z;
                dx * dx + dz * dz < radius * radius
            }
        }
    }
}

/// Strict AABB overlap test: touching edges do not count.
pub fn is_overlapping(a: &WaterBody, b: &WaterBody) -> bool {
    let (a_min_x, a_max_x, a_min_z, a_max_z) = a.bounds();
    let (b_min_x, b_max_x, b_min_z, b_max_z) = b.bounds();
    a_min_x < b_max_x && a_max_x > b_min_x && a_min_z < b_max_z && a_max_z > b_min_z
}

/// Smallest axis-aligned rectangle covering both bounding boxes. The result is
/// always a rectangle, whatever the input shapes were.
pub fn merge(a: &WaterBody, b: &WaterBody) -> WaterBody {
    let (a_min_x, a_max_x, a_min_z, a_max_z) = a.bounds();
    let (b_min_x, b_max_x, b_min_z, b_max_z) = b.bounds();
    let min_x = a_min_x.min(b_min_x);
    let max_x = a_max_x.max(b_max_x);
    let min_z = a_min_z.min(b_min_z);
    let max_z = a_max_z.max(b_max_z);
    WaterBody::rectangle(
        (min_x + max_x) / 2.0,
        (min_z + max_z) / 2.0,
        max_x - min_x,
        max_z - min_z,
    )
}

pub fn is_position_in_water(x: f64, z: f64, bodies: &[WaterBody]) -> bool {
    bodies.iter().any(|b| b.contains(x, z))
}

fn sample_range<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Generates the water bodies for one simulation run: random shape and size
/// within the configured ranges, centered so the bounding box fits inside the
/// world, then merged until no pair of bounding boxes overlaps.
///
/// The merge scan always takes the lowest-index overlapping pair and restarts
/// after each merge, so generation is reproducible under a seeded RNG.
pub fn generate<R: Rng>(world: &WorldConfig, config: &WaterConfig, rng: &mut R) -> Vec<WaterBody> {
    if !config.enabled || config.body_count == 0 || config.shape_types.is_empty() {
        return Vec::new();
    }

    let half_w = world.half_width();
    let half_d = world.half_depth();
    let mut bodies = Vec::with_capacity(config.body_count);

    for _ in 0..config.body_count {
        let kind = config.shape_types[rng.gen_range(0..config.shape_types.len())];
        let body = match kind {
            WaterShapeKind::Rectangle => {
                let width = sample_range(rng, config.min_width, config.max_width);
                let depth = sample_range(rng, config.min_depth, config.max_depth);
                let x = sample_range(rng, -half_w + width / 2.0, half_w - width / 2.0);
                let z = sample_range(rng, -half_d + depth / 2.0, half_d - depth / 2.0);
                WaterBody::rectangle(x, z, width, depth)
            }
            WaterShapeKind::Circle => {
                let radius = sample_range(rng, config.min_radius, config.max_radius);
                let x = sample_range(rng, -half_w + radius, half_w - radius);
                let z = sample_range(rng, -half_d + radius, half_d - radius);
                WaterBody::circle(x, z, radius)
            }
        };
        bodies.push(body);
    }

    'merging: loop {
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                if is_overlapping(&bodies[i], &bodies[j]) {
                    bodies[i] = merge(&bodies[i], &bodies[j]);
                    bodies.remove(j);
                    continue 'merging;
                }
            }
        }
        break;
    }

    bodies
}
