//! Coordinate types and grid arithmetic for the streamed horizontal axis.
//!
//! The world scrolls along a single axis: pixel `x` positions are real
//! numbers, chunks are fixed-width half-open pixel intervals, and all
//! generated content snaps to a square grid cell.

use serde::{Deserialize, Serialize};

/// Signed index of a fixed-width chunk along the horizontal axis.
///
/// Chunk `k` covers the half-open pixel range `[k * width, (k + 1) * width)`,
/// so chunk 0 starts at pixel 0 and negative indices extend the world to the
/// left without bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkX {
    /// Index in chunk space
    pub index: i64,
}

impl ChunkX {
    /// Creates a chunk index.
    #[must_use]
    pub const fn new(index: i64) -> Self {
        Self { index }
    }

    /// Returns the chunk containing the given world x position.
    #[must_use]
    pub fn from_world(x: f32, chunk_width: u32) -> Self {
        Self {
            index: (x / chunk_width as f32).floor() as i64,
        }
    }

    /// Left edge of this chunk's pixel range (inclusive).
    #[must_use]
    pub const fn min_x(self, chunk_width: u32) -> i64 {
        self.index * chunk_width as i64
    }

    /// Right edge of this chunk's pixel range (exclusive).
    #[must_use]
    pub const fn max_x(self, chunk_width: u32) -> i64 {
        (self.index + 1) * chunk_width as i64
    }

    /// Returns the chunk `delta` slots away.
    #[must_use]
    pub const fn offset(self, delta: i64) -> Self {
        Self {
            index: self.index + delta,
        }
    }
}

/// Snaps an integer pixel position down to the grid.
#[must_use]
pub const fn snap_down(v: i64, cell: u32) -> i64 {
    v.div_euclid(cell as i64) * cell as i64
}

/// Snaps an integer pixel position up to the grid.
#[must_use]
pub const fn snap_up(v: i64, cell: u32) -> i64 {
    -((-v).div_euclid(cell as i64)) * cell as i64
}

/// Snaps a real pixel position down to the grid.
#[must_use]
pub fn snap_down_f32(v: f32, cell: u32) -> f32 {
    (v / cell as f32).floor() * cell as f32
}
