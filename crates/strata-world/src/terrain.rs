//! Deterministic ground height field and column generation.

use glam::vec2;
use noise::{NoiseFn, Perlin};
use strata_common::{snap_down, snap_down_f32};

use crate::chunk::{Block, Rgb};
use crate::generation::GeneratorConfig;

const BASE_GROUND_COLOR: Rgb = Rgb::new(212, 123, 74);
const GROUND_COLOR_NOISE: i16 = 10;
/// Mixes the chunk range origin into the ground-tint seed.
const GROUND_TINT_SEED_MUL: u64 = 31;

/// Seeded ground height field.
///
/// `ground_height_at` is a pure function of `(x, seed)`: the baseline is a
/// fixed fraction of the world's vertical extent (y grows downward) and the
/// perturbation is a coherent-noise sample with no internal cursor, so
/// query order never matters and independently generated ranges join
/// without seams, including at chunk boundaries that do not exist yet.
pub struct Terrain {
    config: GeneratorConfig,
    base_height: f32,
    surface_noise: Perlin,
}

impl Terrain {
    /// Creates a height field for the given generation parameters.
    #[must_use]
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            config: config.clone(),
            base_height: config.world_height * config.surface_ratio,
            surface_noise: Perlin::new(config.seed),
        }
    }

    /// Ground elevation at `x`, unsnapped.
    #[must_use]
    pub fn ground_height_at(&self, x: f32) -> f32 {
        let sample = self
            .surface_noise
            .get([f64::from(x) / self.config.noise_scale, 0.0]);
        self.base_height + sample as f32 * self.config.height_amplitude
    }

    /// Ground elevation at `x`, snapped down to the grid. This is the y of
    /// the collidable surface cell and the anchor line for vegetation.
    #[must_use]
    pub fn surface_height_at(&self, x: f32) -> f32 {
        snap_down_f32(self.ground_height_at(x), self.config.cell_size)
    }

    /// Generates the ground columns for every grid column in
    /// `[min_x, max_x)`: `terrain_depth` cells stacked downward from the
    /// snapped surface, topmost cell collidable.
    #[must_use]
    pub fn fill_range(&self, min_x: i64, max_x: i64) -> Vec<Block> {
        let cell = self.config.cell_size;
        let tint_seed = u64::from(self.config.seed)
            .wrapping_add((min_x as u64).wrapping_mul(GROUND_TINT_SEED_MUL));
        let mut rng = fastrand::Rng::with_seed(tint_seed);
        let tint = BASE_GROUND_COLOR.jitter(&mut rng, GROUND_COLOR_NOISE);

        let mut blocks = Vec::new();
        let mut x = snap_down(min_x, cell);
        while x < max_x {
            let top = self.surface_height_at(x as f32);
            for depth in 0..self.config.terrain_depth {
                let y = top + (depth * cell) as f32;
                blocks.push(Block::new(vec2(x as f32, y), depth == 0, tint));
            }
            x += i64::from(cell);
        }
        blocks
    }
}
