//! Chunk generation: ground columns plus vegetation, no world mutation.

use glam::vec2;
use strata_common::{WorldError, WorldResult};

use crate::chunk::Chunk;
use crate::flora::{ClearZone, Flora};
use crate::terrain::Terrain;
use crate::trees::Tree;

/// Generation parameters, fixed at construction time.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// World seed
    pub seed: u32,
    /// Grid cell edge length in pixels; everything snaps to this
    pub cell_size: u32,
    /// Vertical extent of the world in pixels (y grows downward)
    pub world_height: f32,
    /// Baseline ground elevation as a fraction of the vertical extent
    pub surface_ratio: f32,
    /// Noise input scale (larger = smoother terrain)
    pub noise_scale: f64,
    /// Peak-to-baseline height perturbation in pixels
    pub height_amplitude: f32,
    /// Ground cells stacked below the surface of each column
    pub terrain_depth: u32,
    /// Chance that an eligible column anchors a tree
    pub tree_probability: f32,
    /// Minimum spacing between anchors, in grid cells
    pub tree_gap_cells: u32,
    /// Optional interval kept free of vegetation
    pub clear_zone: Option<ClearZone>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            cell_size: 30,
            world_height: 720.0,
            surface_ratio: 2.0 / 3.0,
            noise_scale: 100.0,
            height_amplitude: 210.0,
            terrain_depth: 20,
            tree_probability: 0.1,
            tree_gap_cells: 10,
            clear_zone: None,
        }
    }
}

impl GeneratorConfig {
    /// Rejects genuinely malformed parameters. Ranges handed to the
    /// generators later are normalized rather than validated; only
    /// construction-time input can fail.
    pub fn validate(&self) -> WorldResult<()> {
        if self.cell_size == 0 {
            return Err(WorldError::InvalidConfig("cell_size must be non-zero".into()));
        }
        if self.terrain_depth == 0 {
            return Err(WorldError::InvalidConfig(
                "terrain_depth must be non-zero".into(),
            ));
        }
        if self.world_height <= 0.0 {
            return Err(WorldError::InvalidConfig(
                "world_height must be positive".into(),
            ));
        }
        if !(self.surface_ratio > 0.0 && self.surface_ratio <= 1.0) {
            return Err(WorldError::InvalidConfig(
                "surface_ratio must be in (0, 1]".into(),
            ));
        }
        if self.noise_scale <= 0.0 {
            return Err(WorldError::InvalidConfig(
                "noise_scale must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tree_probability) {
            return Err(WorldError::InvalidConfig(
                "tree_probability must be in [0, 1]".into(),
            ));
        }
        if let Some(zone) = &self.clear_zone {
            if zone.max_x < zone.min_x {
                return Err(WorldError::InvalidConfig(format!(
                    "clear zone '{}' is inverted",
                    zone.name
                )));
            }
        }
        Ok(())
    }
}

/// Builds chunks from the height field and vegetation planner.
///
/// `build` has no side effects outside the returned [`Chunk`]; registering
/// content with the live world is the streaming controller's job, which
/// keeps generation and world mutation independently testable.
pub struct ChunkGenerator {
    config: GeneratorConfig,
    terrain: Terrain,
    flora: Flora,
}

impl ChunkGenerator {
    /// Creates a generator, failing fast on malformed configuration.
    pub fn new(config: GeneratorConfig) -> WorldResult<Self> {
        config.validate()?;
        let terrain = Terrain::new(&config);
        let flora = Flora::new(&config);
        Ok(Self {
            config,
            terrain,
            flora,
        })
    }

    /// Creates a generator with default parameters and the given seed.
    pub fn with_seed(seed: u32) -> WorldResult<Self> {
        Self::new(GeneratorConfig {
            seed,
            ..GeneratorConfig::default()
        })
    }

    /// Materializes the chunk for `[min_x, max_x)`: every grid column's
    /// ground stack, plus one grown tree per planned anchor.
    #[must_use]
    pub fn build(&self, min_x: i64, max_x: i64) -> Chunk {
        let blocks = self.terrain.fill_range(min_x, max_x);
        let trees = self
            .flora
            .plan_in(min_x, max_x)
            .into_iter()
            .map(|x| {
                let ground = self.terrain.surface_height_at(x as f32);
                Tree::grow(vec2(x as f32, ground))
            })
            .collect();
        Chunk::new(min_x, max_x, blocks, trees)
    }

    /// The height field, for spawn-placement queries.
    #[must_use]
    pub const fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Returns the generator configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_deterministic_across_instances() {
        let gen1 = ChunkGenerator::with_seed(42).expect("valid config");
        let gen2 = ChunkGenerator::with_seed(42).expect("valid config");

        let chunk1 = gen1.build(0, 800);
        let chunk2 = gen2.build(0, 800);

        assert_eq!(chunk1.blocks().len(), chunk2.blocks().len());
        for (a, b) in chunk1.blocks().iter().zip(chunk2.blocks()) {
            assert_eq!(a.pos(), b.pos());
            assert_eq!(a.layer(), b.layer());
            assert_eq!(a.tint(), b.tint());
        }
        assert_eq!(chunk1.trees().len(), chunk2.trees().len());
        for (a, b) in chunk1.trees().iter().zip(chunk2.trees()) {
            assert_eq!(a.trunk().pos(), b.trunk().pos());
            assert_eq!(a.trunk().size(), b.trunk().size());
        }
    }

    #[test]
    fn test_build_order_does_not_matter() {
        let forward = ChunkGenerator::with_seed(42).expect("valid config");
        let _ = forward.build(-800, 0);
        let after_neighbor = forward.build(0, 800);

        let fresh = ChunkGenerator::with_seed(42).expect("valid config");
        let alone = fresh.build(0, 800);

        assert_eq!(after_neighbor.blocks().len(), alone.blocks().len());
        for (a, b) in after_neighbor.blocks().iter().zip(alone.blocks()) {
            assert_eq!(a.pos(), b.pos());
        }
        assert_eq!(after_neighbor.trees().len(), alone.trees().len());
    }

    #[test]
    fn test_trees_anchor_on_the_snapped_surface() {
        let generator = ChunkGenerator::with_seed(7).expect("valid config");
        let chunk = generator.build(-4000, 4000);

        for tree in chunk.trees() {
            let trunk = tree.trunk();
            let base_x = trunk.pos().x + trunk.size().x * 0.5;
            let base_y = trunk.pos().y + trunk.size().y;
            assert_eq!(base_y, generator.terrain().surface_height_at(base_x));
        }
    }

    #[test]
    fn test_different_seeds_different_terrain() {
        let gen1 = ChunkGenerator::with_seed(42).expect("valid config");
        let gen2 = ChunkGenerator::with_seed(999).expect("valid config");

        let chunk1 = gen1.build(0, 800);
        let chunk2 = gen2.build(0, 800);

        let differs = chunk1
            .blocks()
            .iter()
            .zip(chunk2.blocks())
            .any(|(a, b)| a.pos() != b.pos());
        assert!(differs);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = GeneratorConfig {
            cell_size: 0,
            ..GeneratorConfig::default()
        };
        assert!(ChunkGenerator::new(config).is_err());

        let config = GeneratorConfig {
            tree_probability: 1.5,
            ..GeneratorConfig::default()
        };
        assert!(ChunkGenerator::new(config).is_err());
    }
}
