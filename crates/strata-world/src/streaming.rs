//! World streaming: the sliding chunk activation window.
//!
//! The streamer owns every chunk ever generated, keyed by signed chunk
//! index in a [`BiDeque`], and keeps exactly one contiguous window of
//! chunks active around the observer. Crossing a chunk boundary activates
//! the next chunk ahead (generating it on first visit) and deactivates the
//! chunk falling out of the window behind; everything else is left resident
//! in memory so revisits are cheap and fruit state survives.

use strata_common::{ChunkX, ContentId, WorldError, WorldResult};
use tracing::{debug, info};

use crate::chunk::{Chunk, ChunkContent, Layer};
use crate::deque::BiDeque;
use crate::generation::ChunkGenerator;
use crate::time::DEFAULT_DAY_LENGTH;

/// Streaming configuration.
#[derive(Debug, Clone)]
pub struct StreamingConfig {
    /// Chunk width in pixels
    pub chunk_width: u32,
    /// Chunks materialized around spawn before the first tick
    pub initial_chunks: u32,
    /// Seconds until a consumed fruit respawns; one day-night cycle
    pub fruit_respawn_secs: f32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_width: 800,
            initial_chunks: 3,
            fruit_respawn_secs: DEFAULT_DAY_LENGTH,
        }
    }
}

impl StreamingConfig {
    /// Rejects malformed configuration at construction time.
    pub fn validate(&self) -> WorldResult<()> {
        if self.chunk_width == 0 {
            return Err(WorldError::InvalidConfig(
                "chunk_width must be non-zero".into(),
            ));
        }
        if self.initial_chunks == 0 {
            return Err(WorldError::InvalidConfig(
                "initial_chunks must be non-zero".into(),
            ));
        }
        if self.fruit_respawn_secs < 0.0 {
            return Err(WorldError::InvalidConfig(
                "fruit_respawn_secs must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Receives chunk content as it enters and leaves the live world.
///
/// The streamer calls this once per content item per activation or
/// deactivation, in no particular order; the layer hint routes the item
/// into the right collision/render set.
pub trait RegistrySink {
    /// Registers an item with the live world.
    fn activate(&mut self, item: ChunkContent<'_>, layer: Layer);
    /// Unregisters an item from the live world.
    fn deactivate(&mut self, item: ChunkContent<'_>, layer: Layer);
}

/// Sink that ignores every registration; for headless use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RegistrySink for NullSink {
    fn activate(&mut self, _item: ChunkContent<'_>, _layer: Layer) {}
    fn deactivate(&mut self, _item: ChunkContent<'_>, _layer: Layer) {}
}

/// Streams chunks around a single observer.
///
/// Single-threaded by design: one update loop drives `update`,
/// `consume_fruit`, and `sweep_respawns`; there is no internal locking.
pub struct ChunkStreamer {
    config: StreamingConfig,
    generator: ChunkGenerator,
    chunks: BiDeque<Chunk>,
    current: ChunkX,
}

impl ChunkStreamer {
    /// Creates the streamer and materializes the spawn window: the
    /// observer's chunk 0 plus its neighbors (`initial_chunks` total,
    /// left-biased for even counts), all activated through `sink`.
    pub fn new(
        config: StreamingConfig,
        generator: ChunkGenerator,
        sink: &mut dyn RegistrySink,
    ) -> WorldResult<Self> {
        config.validate()?;

        let mut streamer = Self {
            config,
            generator,
            chunks: BiDeque::new(),
            current: ChunkX::new(0),
        };

        let count = i64::from(streamer.config.initial_chunks);
        let start = -(count / 2);
        let end = start + count - 1;
        // forward slots first, then backward from -1 outward, so each
        // append lands on the next unused slot at its end
        for index in 0..=end {
            streamer.materialize(ChunkX::new(index), sink);
        }
        for index in (start..0).rev() {
            streamer.materialize(ChunkX::new(index), sink);
        }

        info!(
            chunks = streamer.chunks.len(),
            start, end, "initial window active"
        );
        Ok(streamer)
    }

    /// Per-tick transition. Computes the observer's chunk and, if it
    /// changed, slides the activation window after it.
    ///
    /// An observer normally crosses at most one boundary per tick; if it
    /// crossed several (a teleport), the window is stepped one chunk at a
    /// time until it catches up, performing the usual single-neighbor
    /// transition at each step so the active interval stays contiguous.
    pub fn update(&mut self, observer_x: f32, sink: &mut dyn RegistrySink) {
        let target = ChunkX::from_world(observer_x, self.config.chunk_width);
        while self.current != target {
            let dir = (target.index - self.current.index).signum();
            let entered = self.current.offset(dir);
            self.shift_window(entered, dir, sink);
            self.current = entered;
            debug!(chunk = self.current.index, "observer chunk changed");
        }
    }

    /// One window step: the observer entered `entered` moving toward
    /// `dir`. Activates the neighbor ahead and deactivates the chunk two
    /// behind, exactly one of each.
    fn shift_window(&mut self, entered: ChunkX, dir: i64, sink: &mut dyn RegistrySink) {
        let ahead = entered.offset(dir);
        match self.chunks.get_mut(ahead.index) {
            Some(chunk) => {
                if !chunk.is_active() {
                    Self::activate(chunk, sink);
                    debug!(chunk = ahead.index, "reactivated chunk");
                }
            }
            None => self.materialize(ahead, sink),
        }

        let behind = entered.offset(-2 * dir);
        if let Some(chunk) = self.chunks.get_mut(behind.index) {
            if chunk.is_active() {
                Self::deactivate(chunk, sink);
                debug!(chunk = behind.index, "deactivated chunk");
            }
        }
    }

    /// Generates the chunk for `target`, activates it, and appends it at
    /// the matching deque end. The window only ever grows by the next
    /// unused slot at either end, which keeps appends O(1) and indices
    /// stable.
    fn materialize(&mut self, target: ChunkX, sink: &mut dyn RegistrySink) {
        let width = self.config.chunk_width;
        let mut chunk = self.generator.build(target.min_x(width), target.max_x(width));
        Self::activate(&mut chunk, sink);

        let assigned = if target.index >= 0 {
            self.chunks.push_back(chunk)
        } else {
            self.chunks.push_front(chunk)
        };
        debug_assert_eq!(assigned, target.index, "chunk materialized out of order");
        debug!(
            chunk = target.index,
            min_x = target.min_x(width),
            max_x = target.max_x(width),
            "generated chunk"
        );
    }

    fn activate(chunk: &mut Chunk, sink: &mut dyn RegistrySink) {
        chunk.set_active(true);
        chunk.for_each_content(|item| sink.activate(item, item.layer()));
    }

    fn deactivate(chunk: &mut Chunk, sink: &mut dyn RegistrySink) {
        chunk.set_active(false);
        chunk.for_each_content(|item| sink.deactivate(item, item.layer()));
    }

    /// Consumption event entry point: marks the fruit eaten and stamps its
    /// respawn deadline `fruit_respawn_secs` after `now`. Returns false if
    /// the fruit is unknown, not in an active chunk, or already eaten.
    pub fn consume_fruit(&mut self, id: ContentId, now: f64) -> bool {
        let cycle = self.config.fruit_respawn_secs;
        for (_, chunk) in self.chunks.iter_mut() {
            if !chunk.is_active() {
                continue;
            }
            if let Some(fruit) = chunk.fruit_mut(id) {
                return fruit.consume(now, cycle);
            }
        }
        false
    }

    /// Periodic respawn sweep over every resident chunk, active or not.
    /// Returns the number of fruits respawned.
    pub fn sweep_respawns(&mut self, now: f64) -> usize {
        self.chunks
            .iter_mut()
            .map(|(_, chunk)| chunk.sweep_respawns(now))
            .sum()
    }

    /// The chunk the observer currently occupies.
    #[must_use]
    pub const fn current_chunk(&self) -> i64 {
        self.current.index
    }

    /// Number of chunks ever generated and kept resident.
    #[must_use]
    pub fn resident_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Whether a chunk index has been generated.
    #[must_use]
    pub fn is_resident(&self, index: i64) -> bool {
        self.chunks.contains(index)
    }

    /// Looks up a resident chunk.
    pub fn chunk(&self, index: i64) -> WorldResult<&Chunk> {
        self.chunks
            .get(index)
            .ok_or(WorldError::ChunkNotResident { index })
    }

    /// Indices of the currently active chunks, ascending.
    #[must_use]
    pub fn active_ids(&self) -> Vec<i64> {
        self.chunks
            .iter()
            .filter(|(_, chunk)| chunk.is_active())
            .map(|(index, _)| index)
            .collect()
    }

    /// Ground elevation pass-through, unsnapped.
    #[must_use]
    pub fn ground_height_at(&self, x: f32) -> f32 {
        self.generator.terrain().ground_height_at(x)
    }

    /// Ground elevation pass-through, snapped to the grid; spawn placement
    /// sits the avatar on this line.
    #[must_use]
    pub fn surface_height_at(&self, x: f32) -> f32 {
        self.generator.terrain().surface_height_at(x)
    }

    /// Returns the streaming configuration.
    #[must_use]
    pub const fn config(&self) -> &StreamingConfig {
        &self.config
    }
}
