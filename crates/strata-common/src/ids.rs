//! ID types for world content.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for content IDs.
static CONTENT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a piece of generated world content.
///
/// Content keeps its id for the lifetime of the process; deactivating and
/// reactivating a chunk re-registers the same ids, which is how consumers
/// can tell a revisited chunk was retained rather than regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(u64);

impl ContentId {
    /// Creates a new unique content ID.
    #[must_use]
    pub fn new() -> Self {
        Self(CONTENT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a content ID from a raw value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Null/invalid content ID.
    pub const NULL: Self = Self(0);

    /// Checks if this is a valid (non-null) content ID.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl Default for ContentId {
    fn default() -> Self {
        Self::new()
    }
}
