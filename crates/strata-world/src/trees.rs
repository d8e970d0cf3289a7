//! Tree content: trunks, canopy leaves, and consumable fruit.
//!
//! A tree is grown deterministically from its anchor position alone, so a
//! chunk rebuilt for the same range always carries identical trees. The
//! trunk dimensions come from one anchor-seeded generator; each leaf and
//! fruit additionally tints itself from a generator seeded by its own cell
//! position, the way the rest of the engine keys randomness by position.

use glam::{vec2, Vec2};
use serde::{Deserialize, Serialize};
use strata_common::ContentId;

use crate::chunk::{Layer, Rgb};

/// Trunk height range in pixels (inclusive).
const TRUNK_MIN_HEIGHT: i32 = 150;
const TRUNK_MAX_HEIGHT: i32 = 350;
/// Trunk width range in pixels (inclusive).
const TRUNK_MIN_WIDTH: i32 = 50;
const TRUNK_MAX_WIDTH: i32 = 80;
/// Half-size range of the square canopy, in pixels (inclusive).
const CANOPY_MIN_HALF: i32 = 100;
const CANOPY_MAX_HALF: i32 = 150;
/// Canopy cell edge length; one leaf or fruit slot per cell.
const LEAF_CELL: i32 = 20;
/// Chance a canopy cell holds a leaf.
const LEAF_DENSITY: f32 = 0.70;
/// Chance a canopy cell holds a fruit.
const FRUIT_DENSITY: f32 = 0.10;
/// Fruit diameter as a fraction of the canopy cell.
const FRUIT_CELL_FACTOR: f32 = 0.8;

const TRUNK_COLOR: Rgb = Rgb::new(100, 50, 20);
const LEAF_BASE_COLOR: Rgb = Rgb::new(50, 200, 30);
const LEAF_COLOR_NOISE: i16 = 25;

/// Fruit palette: red, yellow, orange, purple.
const FRUIT_COLORS: [Rgb; 4] = [
    Rgb::new(200, 50, 50),
    Rgb::new(230, 200, 50),
    Rgb::new(230, 140, 50),
    Rgb::new(160, 70, 200),
];

// Position-seed multipliers; distinct pairs keep the trunk, leaf, and fruit
// streams independent.
const TRUNK_SEED_X: i64 = 31;
const TRUNK_SEED_Y: i64 = 1;
const LEAF_SEED_X: i64 = 73;
const LEAF_SEED_Y: i64 = 37;
const FRUIT_SEED_X: i64 = 53;
const FRUIT_SEED_Y: i64 = 97;

fn position_seed(pos: Vec2, mul_x: i64, mul_y: i64) -> u64 {
    (pos.x as i64)
        .wrapping_mul(mul_x)
        .wrapping_add((pos.y as i64).wrapping_mul(mul_y)) as u64
}

/// A tree trunk. Collidable, like the ground surface it stands on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trunk {
    id: ContentId,
    pos: Vec2,
    size: Vec2,
    tint: Rgb,
}

impl Trunk {
    fn new(anchor: Vec2, width: f32, height: f32) -> Self {
        Self {
            id: ContentId::new(),
            pos: anchor - vec2(width * 0.5, height),
            size: vec2(width, height),
            tint: TRUNK_COLOR,
        }
    }

    /// Stable content id.
    #[must_use]
    pub const fn id(&self) -> ContentId {
        self.id
    }

    /// Top-left position in world pixels.
    #[must_use]
    pub const fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Width and height in pixels.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Trunk tint.
    #[must_use]
    pub const fn tint(&self) -> Rgb {
        self.tint
    }

    /// Placement category.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        Layer::CollidableSurface
    }
}

/// One canopy leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    id: ContentId,
    pos: Vec2,
    tint: Rgb,
}

impl Leaf {
    /// Leaf edge length in pixels.
    pub const SIZE: f32 = LEAF_CELL as f32;

    fn new(pos: Vec2) -> Self {
        let mut rng = fastrand::Rng::with_seed(position_seed(pos, LEAF_SEED_X, LEAF_SEED_Y));
        Self {
            id: ContentId::new(),
            pos,
            tint: LEAF_BASE_COLOR.jitter(&mut rng, LEAF_COLOR_NOISE),
        }
    }

    /// Stable content id.
    #[must_use]
    pub const fn id(&self) -> ContentId {
        self.id
    }

    /// Top-left position in world pixels.
    #[must_use]
    pub const fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Leaf tint; green with per-leaf channel noise.
    #[must_use]
    pub const fn tint(&self) -> Rgb {
        self.tint
    }

    /// Placement category.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        Layer::ForegroundCanopy
    }
}

/// A consumable fruit hanging in the canopy.
///
/// Consumption flips the fruit to eaten and stamps an absolute respawn
/// deadline; a periodic sweep restores it once the deadline passes. The
/// eaten flag survives chunk deactivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fruit {
    id: ContentId,
    pos: Vec2,
    color: Rgb,
    eaten: bool,
    respawn_at: Option<f64>,
}

impl Fruit {
    /// Fruit diameter in pixels.
    pub const SIZE: f32 = LEAF_CELL as f32 * FRUIT_CELL_FACTOR;

    fn new(pos: Vec2) -> Self {
        let mut rng = fastrand::Rng::with_seed(position_seed(pos, FRUIT_SEED_X, FRUIT_SEED_Y));
        Self {
            id: ContentId::new(),
            pos,
            color: FRUIT_COLORS[rng.usize(..FRUIT_COLORS.len())],
            eaten: false,
            respawn_at: None,
        }
    }

    /// Stable content id.
    #[must_use]
    pub const fn id(&self) -> ContentId {
        self.id
    }

    /// Top-left position in world pixels.
    #[must_use]
    pub const fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Palette color, chosen from the fruit's own position.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Placement category.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        Layer::CollidableSurface
    }

    /// Whether the fruit is currently consumed.
    #[must_use]
    pub const fn is_eaten(&self) -> bool {
        self.eaten
    }

    /// Pending respawn deadline, if consumed.
    #[must_use]
    pub const fn respawn_at(&self) -> Option<f64> {
        self.respawn_at
    }

    /// Consumes the fruit and schedules its respawn `cycle` seconds from
    /// `now`. Returns false if it was already eaten.
    pub fn consume(&mut self, now: f64, cycle: f32) -> bool {
        if self.eaten {
            return false;
        }
        self.eaten = true;
        self.respawn_at = Some(now + f64::from(cycle));
        true
    }

    /// Restores an eaten fruit whose deadline has passed. Returns whether a
    /// respawn happened.
    pub fn try_respawn(&mut self, now: f64) -> bool {
        match self.respawn_at {
            Some(deadline) if now >= deadline => {
                self.eaten = false;
                self.respawn_at = None;
                true
            }
            _ => false,
        }
    }
}

/// A tree: trunk, canopy leaves, and fruit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    trunk: Trunk,
    leaves: Vec<Leaf>,
    fruits: Vec<Fruit>,
}

impl Tree {
    /// Grows a tree rooted at `anchor` (top-left of the trunk base on the
    /// ground surface). Deterministic: the same anchor always yields the
    /// same trunk dimensions, canopy occupancy, and tints.
    #[must_use]
    pub fn grow(anchor: Vec2) -> Self {
        let mut rng = fastrand::Rng::with_seed(position_seed(anchor, TRUNK_SEED_X, TRUNK_SEED_Y));

        let trunk_height = rng.i32(TRUNK_MIN_HEIGHT..=TRUNK_MAX_HEIGHT);
        let trunk_width = rng.i32(TRUNK_MIN_WIDTH..=TRUNK_MAX_WIDTH);
        let canopy_half = rng.i32(CANOPY_MIN_HALF..=CANOPY_MAX_HALF);

        let trunk = Trunk::new(anchor, trunk_width as f32, trunk_height as f32);

        let top_center = trunk.pos() + vec2(trunk.size().x * 0.5, 0.0);
        let canopy_size = 2 * canopy_half;
        let canopy_top_left = top_center - vec2(canopy_size as f32 * 0.5, canopy_size as f32 * 0.5);
        let cells = canopy_size / LEAF_CELL;

        let mut leaves = Vec::new();
        let mut fruits = Vec::new();
        for i in 0..cells {
            for j in 0..cells {
                let cell_top_left =
                    canopy_top_left + vec2((i * LEAF_CELL) as f32, (j * LEAF_CELL) as f32);

                if rng.f32() <= LEAF_DENSITY {
                    leaves.push(Leaf::new(cell_top_left));
                }
                if rng.f32() <= FRUIT_DENSITY {
                    // center the fruit within its canopy cell
                    let inset = (Leaf::SIZE - Fruit::SIZE) * 0.5;
                    fruits.push(Fruit::new(cell_top_left + vec2(inset, inset)));
                }
            }
        }

        Self {
            trunk,
            leaves,
            fruits,
        }
    }

    /// The trunk.
    #[must_use]
    pub const fn trunk(&self) -> &Trunk {
        &self.trunk
    }

    /// Canopy leaves.
    #[must_use]
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// Fruits.
    #[must_use]
    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    /// Mutable fruit access for consumption and respawn sweeps.
    pub fn fruits_mut(&mut self) -> &mut [Fruit] {
        &mut self.fruits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_is_deterministic_per_anchor() {
        let anchor = vec2(600.0, 480.0);
        let a = Tree::grow(anchor);
        let b = Tree::grow(anchor);

        assert_eq!(a.trunk().pos(), b.trunk().pos());
        assert_eq!(a.trunk().size(), b.trunk().size());
        assert_eq!(a.leaves().len(), b.leaves().len());
        assert_eq!(a.fruits().len(), b.fruits().len());
        for (la, lb) in a.leaves().iter().zip(b.leaves()) {
            assert_eq!(la.pos(), lb.pos());
            assert_eq!(la.tint(), lb.tint());
        }
        for (fa, fb) in a.fruits().iter().zip(b.fruits()) {
            assert_eq!(fa.pos(), fb.pos());
            assert_eq!(fa.color(), fb.color());
        }
    }

    #[test]
    fn test_different_anchors_differ() {
        let a = Tree::grow(vec2(600.0, 480.0));
        let b = Tree::grow(vec2(3000.0, 480.0));
        // Trunk dimensions are drawn from the anchor seed; two distant
        // anchors agreeing on all three draws would be a (2e-4) fluke.
        let same = a.trunk().size() == b.trunk().size()
            && a.leaves().len() == b.leaves().len()
            && a.fruits().len() == b.fruits().len();
        assert!(!same);
    }

    #[test]
    fn test_trunk_stands_on_anchor() {
        let anchor = vec2(600.0, 480.0);
        let tree = Tree::grow(anchor);
        let trunk = tree.trunk();
        assert!((trunk.pos().y + trunk.size().y - anchor.y).abs() < f32::EPSILON);
        assert!((trunk.pos().x + trunk.size().x * 0.5 - anchor.x).abs() < f32::EPSILON);
        assert!(trunk.size().y >= TRUNK_MIN_HEIGHT as f32);
        assert!(trunk.size().y <= TRUNK_MAX_HEIGHT as f32);
    }

    #[test]
    fn test_fruit_colors_come_from_palette() {
        let tree = Tree::grow(vec2(0.0, 480.0));
        for fruit in tree.fruits() {
            assert!(FRUIT_COLORS.contains(&fruit.color()));
        }
    }

    #[test]
    fn test_consume_and_respawn() {
        let mut fruit = Fruit::new(vec2(10.0, 10.0));
        assert!(!fruit.is_eaten());

        assert!(fruit.consume(100.0, 30.0));
        assert!(fruit.is_eaten());
        assert_eq!(fruit.respawn_at(), Some(130.0));

        // consuming an eaten fruit is a no-op
        assert!(!fruit.consume(101.0, 30.0));

        assert!(!fruit.try_respawn(129.9));
        assert!(fruit.is_eaten());
        assert!(fruit.try_respawn(130.0));
        assert!(!fruit.is_eaten());
        assert_eq!(fruit.respawn_at(), None);
    }
}
