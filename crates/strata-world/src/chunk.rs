//! Chunk data structures.
//!
//! A chunk is one fixed-width horizontal slice of the world: the ground
//! columns and trees generated for its pixel range, plus an active flag.
//! Content is immutable after generation except for fruit consumable state;
//! deactivating a chunk keeps everything in memory so reactivation is cheap
//! and already-consumed fruit stays consumed.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use strata_common::ContentId;

use crate::trees::{Fruit, Leaf, Tree, Trunk};

/// Placement category of a content item, fixed at creation.
///
/// The registration sink uses this to route an item into the right
/// collision/render set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Solid content the avatar stands on or collides with
    CollidableSurface,
    /// Non-colliding ground fill behind the action
    DecorativeBackground,
    /// Canopy drawn in front of the avatar
    ForegroundCanopy,
}

/// An sRGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Creates a color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns this color with each channel offset by a draw from
    /// `[-noise, +noise]`, clamped to the valid channel range.
    #[must_use]
    pub fn jitter(self, rng: &mut fastrand::Rng, noise: i16) -> Self {
        let channel = |base: u8, rng: &mut fastrand::Rng| {
            (i16::from(base) + rng.i16(-noise..=noise)).clamp(0, 255) as u8
        };
        Self {
            r: channel(self.r, rng),
            g: channel(self.g, rng),
            b: channel(self.b, rng),
        }
    }
}

/// One grid-square ground cell.
///
/// Columns are stacked downward from the surface; only the topmost cell of
/// a stack is collidable, the rest are backdrop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    id: ContentId,
    pos: Vec2,
    layer: Layer,
    tint: Rgb,
}

impl Block {
    /// Creates a ground cell at a grid-snapped top-left position.
    #[must_use]
    pub fn new(pos: Vec2, surface: bool, tint: Rgb) -> Self {
        Self {
            id: ContentId::new(),
            pos,
            layer: if surface {
                Layer::CollidableSurface
            } else {
                Layer::DecorativeBackground
            },
            tint,
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

    /// Placement category.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        self.layer
    }

    /// Whether this is the collidable top cell of its column.
    #[must_use]
    pub fn is_surface(&self) -> bool {
        self.layer == Layer::CollidableSurface
    }

    /// Ground tint.
    #[must_use]
    pub const fn tint(&self) -> Rgb {
        self.tint
    }
}

/// Borrowed view of one registrable content item.
///
/// Passed to the registration sink on activation and deactivation; the sink
/// reads geometry from the item and routes by [`Layer`].
#[derive(Debug, Clone, Copy)]
pub enum ChunkContent<'a> {
    /// A ground cell
    Ground(&'a Block),
    /// A tree trunk
    Trunk(&'a Trunk),
    /// A canopy leaf
    Leaf(&'a Leaf),
    /// A fruit
    Fruit(&'a Fruit),
}

impl ChunkContent<'_> {
    /// Stable content id of the viewed item.
    #[must_use]
    pub fn id(&self) -> ContentId {
        match self {
            Self::Ground(b) => b.id(),
            Self::Trunk(t) => t.id(),
            Self::Leaf(l) => l.id(),
            Self::Fruit(f) => f.id(),
        }
    }

    /// Placement category of the viewed item.
    #[must_use]
    pub fn layer(&self) -> Layer {
        match self {
            Self::Ground(b) => b.layer(),
            Self::Trunk(t) => t.layer(),
            Self::Leaf(l) => l.layer(),
            Self::Fruit(f) => f.layer(),
        }
    }
}

/// A generated world slice.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Pixel range `[min_x, max_x)` this chunk was generated for
    min_x: i64,
    max_x: i64,
    blocks: Vec<Block>,
    trees: Vec<Tree>,
    /// Whether the content is currently registered with the live world
    active: bool,
}

impl Chunk {
    /// Creates a chunk from generated content. Starts inactive; activation
    /// is the streaming controller's responsibility.
    #[must_use]
    pub fn new(min_x: i64, max_x: i64, blocks: Vec<Block>, trees: Vec<Tree>) -> Self {
        Self {
            min_x,
            max_x,
            blocks,
            trees,
            active: false,
        }
    }

    /// Left edge of the generated range (inclusive).
    #[must_use]
    pub const fn min_x(&self) -> i64 {
        self.min_x
    }

    /// Right edge of the generated range (exclusive).
    #[must_use]
    pub const fn max_x(&self) -> i64 {
        self.max_x
    }

    /// Ground cells in this chunk.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Trees in this chunk.
    #[must_use]
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Whether the chunk content is registered with the live world.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Sets the active flag. Registration bookkeeping is the caller's.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Visits every registrable item: ground cells first, then per tree the
    /// trunk, leaves, and fruits.
    pub fn for_each_content<F>(&self, mut f: F)
    where
        F: FnMut(ChunkContent<'_>),
    {
        for block in &self.blocks {
            f(ChunkContent::Ground(block));
        }
        for tree in &self.trees {
            f(ChunkContent::Trunk(tree.trunk()));
            for leaf in tree.leaves() {
                f(ChunkContent::Leaf(leaf));
            }
            for fruit in tree.fruits() {
                f(ChunkContent::Fruit(fruit));
            }
        }
    }

    /// Looks up a fruit by content id.
    pub fn fruit_mut(&mut self, id: ContentId) -> Option<&mut Fruit> {
        self.trees
            .iter_mut()
            .flat_map(Tree::fruits_mut)
            .find(|fruit| fruit.id() == id)
    }

    /// Respawns every eaten fruit whose deadline has passed. Returns the
    /// number of fruits respawned.
    pub fn sweep_respawns(&mut self, now: f64) -> usize {
        self.trees
            .iter_mut()
            .flat_map(Tree::fruits_mut)
            .map(|fruit| usize::from(fruit.try_respawn(now)))
            .sum()
    }
}
