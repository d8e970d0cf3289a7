//! Signed-index storage for bidirectionally growing chunk rows.
//!
//! The world grows in both directions from the spawn chunk, so chunk indices
//! are signed and unbounded on both sides. Once a chunk is stored at index
//! `k`, `get(k)` must keep returning that chunk forever; other parts of the
//! engine hold on to indices ("the chunk two behind the new neighbor") and
//! rely on them never shifting.

/// A double-ended sequence addressed by signed indices.
///
/// Backed by two growable vectors: `fwd` holds indices `0..` in natural
/// order, `bwd` holds `-1, -2, ..` in the order they were appended, so the
/// k-th physical slot of `bwd` is logical index `-(k + 1)`. Appends at
/// either end are amortized O(1) and never move existing elements, which is
/// what keeps stored indices stable under unbounded growth.
#[derive(Debug, Clone)]
pub struct BiDeque<T> {
    /// Non-negative indices in natural order
    fwd: Vec<T>,
    /// Negative indices, reversed: `bwd[0]` is -1, `bwd[1]` is -2, ..
    bwd: Vec<T>,
}

impl<T> BiDeque<T> {
    /// Creates an empty deque.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fwd: Vec::new(),
            bwd: Vec::new(),
        }
    }

    /// Appends at the forward end and returns the assigned index.
    ///
    /// The first call yields index 0, the next 1, and so on.
    pub fn push_back(&mut self, value: T) -> i64 {
        self.fwd.push(value);
        self.fwd.len() as i64 - 1
    }

    /// Appends at the backward end and returns the assigned index.
    ///
    /// The first call yields index -1, the next -2, and so on.
    pub fn push_front(&mut self, value: T) -> i64 {
        self.bwd.push(value);
        -(self.bwd.len() as i64)
    }

    /// Returns the element at a signed index, or `None` if the slot is
    /// outside the occupied interval `[-backward_len, forward_len)`.
    #[must_use]
    pub fn get(&self, index: i64) -> Option<&T> {
        if index >= 0 {
            self.fwd.get(index as usize)
        } else {
            self.bwd.get((-index - 1) as usize)
        }
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, index: i64) -> Option<&mut T> {
        if index >= 0 {
            self.fwd.get_mut(index as usize)
        } else {
            self.bwd.get_mut((-index - 1) as usize)
        }
    }

    /// Checks whether a signed index is occupied. Never panics.
    #[must_use]
    pub fn contains(&self, index: i64) -> bool {
        index >= -(self.bwd.len() as i64) && index < self.fwd.len() as i64
    }

    /// Total number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fwd.len() + self.bwd.len()
    }

    /// Checks whether the deque is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fwd.is_empty() && self.bwd.is_empty()
    }

    /// Number of occupied non-negative slots.
    #[must_use]
    pub fn forward_len(&self) -> usize {
        self.fwd.len()
    }

    /// Number of occupied negative slots.
    #[must_use]
    pub fn backward_len(&self) -> usize {
        self.bwd.len()
    }

    /// Smallest occupied index (0 when nothing was appended backward).
    #[must_use]
    pub fn min_index(&self) -> i64 {
        -(self.bwd.len() as i64)
    }

    /// Iterates `(index, element)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &T)> {
        self.bwd
            .iter()
            .enumerate()
            .rev()
            .map(|(k, v)| (-(k as i64) - 1, v))
            .chain(self.fwd.iter().enumerate().map(|(k, v)| (k as i64, v)))
    }

    /// Mutable variant of [`iter`](Self::iter).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (i64, &mut T)> {
        self.bwd
            .iter_mut()
            .enumerate()
            .rev()
            .map(|(k, v)| (-(k as i64) - 1, v))
            .chain(self.fwd.iter_mut().enumerate().map(|(k, v)| (k as i64, v)))
    }
}

impl<T> Default for BiDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}
