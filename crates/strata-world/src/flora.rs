//! Vegetation planning: deterministic anchor placement along a range.

use serde::{Deserialize, Serialize};
use strata_common::snap_up;

use crate::generation::GeneratorConfig;

/// Mixes the column position into the placement-trial seed.
const COLUMN_SEED_MUL: u64 = 61;

/// A named absolute-x interval where no vegetation is placed.
///
/// Used to keep the observer's spawn area clear of trunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearZone {
    /// Label for diagnostics
    pub name: String,
    /// Left edge (inclusive)
    pub min_x: i64,
    /// Right edge (exclusive)
    pub max_x: i64,
}

impl ClearZone {
    /// Creates a named clear zone over `[min_x, max_x)`.
    #[must_use]
    pub fn new(name: impl Into<String>, min_x: i64, max_x: i64) -> Self {
        Self {
            name: name.into(),
            min_x,
            max_x,
        }
    }

    fn covers(&self, x: i64) -> bool {
        x >= self.min_x && x < self.max_x
    }
}

/// Stochastic vegetation planner.
///
/// Each grid column in the planned range runs an independent Bernoulli
/// trial seeded purely from `(seed, x)`, gated by a minimum spacing since
/// the previous anchor. The spacing cursor resets on every call, so the
/// gap is only enforced within one planned range: two abutting ranges may
/// place anchors closer than the gap across their shared boundary. That
/// limitation is inherited deliberately; tightening it would reshape
/// every generated world.
pub struct Flora {
    config: GeneratorConfig,
}

impl Flora {
    /// Creates a planner for the given generation parameters.
    #[must_use]
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Plans anchor columns in `[min_x, max_x)`.
    ///
    /// Returns grid-snapped x positions, all strictly inside the range,
    /// pairwise at least `tree_gap_cells` sampling steps apart, and outside
    /// the configured clear zone. Empty, inverted, or sub-step ranges yield
    /// an empty list.
    #[must_use]
    pub fn plan_in(&self, min_x: i64, max_x: i64) -> Vec<i64> {
        let cell = i64::from(self.config.cell_size);
        let gap = i64::from(self.config.tree_gap_cells) * cell;

        let start = snap_up(min_x, self.config.cell_size);
        let mut last_anchor = start - gap;
        let mut anchors = Vec::new();

        let mut x = start;
        while x < max_x {
            if self
                .config
                .clear_zone
                .as_ref()
                .is_some_and(|zone| zone.covers(x))
            {
                x += cell;
                continue;
            }

            if x - last_anchor >= gap && self.column_trial(x) {
                anchors.push(x);
                last_anchor = x;
            }
            x += cell;
        }
        anchors
    }

    /// Bernoulli trial for one column, keyed by `(seed, x)` only.
    fn column_trial(&self, x: i64) -> bool {
        let seed =
            u64::from(self.config.seed).wrapping_add((x as u64).wrapping_mul(COLUMN_SEED_MUL));
        fastrand::Rng::with_seed(seed).f32() < self.config.tree_probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flora(config: GeneratorConfig) -> Flora {
        Flora::new(&config)
    }

    #[test]
    fn test_planning_is_deterministic() {
        let f = flora(GeneratorConfig::default());
        assert_eq!(f.plan_in(-1600, 1600), f.plan_in(-1600, 1600));
    }

    #[test]
    fn test_anchors_in_range_and_snapped() {
        let f = flora(GeneratorConfig::default());
        let cell = i64::from(f.config.cell_size);
        for anchor in f.plan_in(-4000, 4000) {
            assert!((-4000..4000).contains(&anchor));
            assert_eq!(anchor.rem_euclid(cell), 0);
        }
    }

    #[test]
    fn test_minimum_spacing_within_a_range() {
        let config = GeneratorConfig {
            tree_probability: 1.0,
            ..GeneratorConfig::default()
        };
        let gap = i64::from(config.tree_gap_cells) * i64::from(config.cell_size);
        let f = flora(config);

        let anchors = f.plan_in(0, 8000);
        assert!(!anchors.is_empty());
        for pair in anchors.windows(2) {
            assert!(pair[1] - pair[0] >= gap);
        }
    }

    #[test]
    fn test_clear_zone_suppresses_placement() {
        let config = GeneratorConfig {
            tree_probability: 1.0,
            clear_zone: Some(ClearZone::new("spawn", 300, 600)),
            ..GeneratorConfig::default()
        };
        let f = flora(config);

        let anchors = f.plan_in(0, 1600);
        assert!(!anchors.is_empty());
        assert!(anchors.iter().all(|&x| !(300..600).contains(&x)));
    }

    #[test]
    fn test_degenerate_ranges_are_empty() {
        let f = flora(GeneratorConfig::default());
        assert!(f.plan_in(0, 0).is_empty());
        assert!(f.plan_in(800, 0).is_empty());
        // narrower than one sampling step, not grid-aligned
        assert!(f.plan_in(35, 40).is_empty());
    }

    #[test]
    fn test_zero_probability_places_nothing() {
        let config = GeneratorConfig {
            tree_probability: 0.0,
            ..GeneratorConfig::default()
        };
        assert!(flora(config).plan_in(0, 80_000).is_empty());
    }
}
