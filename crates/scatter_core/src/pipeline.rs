//! # Frame Pipeline
//!
//! The orchestrator owns every store and runs the frame:
//!
//! ```text
//! Frame N:
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ 1. MOVE                                                          │
//! │    positions.current (G) ──▶ positions.next (G+1), swap          │
//! │                                                                  │
//! │ 2. RESOLVE                                                       │
//! │    positions.current (G+1) ──▶ positions.next (G+2), swap        │
//! │    colors.current    (G)   ──▶ colors.next,         swap         │
//! │    (reads Avoid / AvoidThis from the static store)               │
//! │                                                                  │
//! │ 3. EXPORT                                                        │
//! │    positions.current + colors.current + sprites ──▶ host buffer  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Positions swap twice per frame, colors once. Between passes only the
//! buffer labels move; no pass ever reads the physical array it writes.

use std::time::Instant;

use crate::config::SimulationConfig;
use crate::ecs::{Color, ComponentArena, MutableStore, Position, StaticStore, WorldBounds};
use crate::error::{SimError, SimResult};
use crate::passes::{export_pass, move_pass, resolve_pass, AvoidHit, RenderRecord, ResolveInput};
use crate::spawn::populate;
use crate::sync::DoubleBuffer;

/// Statistics for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number, starting at 1 for the first `update`.
    pub frame: u64,
    /// Render records written.
    pub records: usize,
    /// Avoid entities that bounced off a target.
    pub avoid_hits: usize,
    /// Move pass time in microseconds.
    pub move_us: u64,
    /// Resolve pass time in microseconds.
    pub resolve_us: u64,
    /// Export pass time in microseconds.
    pub export_us: u64,
}

impl FrameStats {
    /// Sum of all pass times in microseconds.
    #[inline]
    #[must_use]
    pub fn total_us(&self) -> u64 {
        self.move_us + self.resolve_us + self.export_us
    }
}

/// The simulation context.
///
/// Explicitly created with [`initialize`](Self::initialize) and released
/// with [`destroy`](Self::destroy) (or by dropping it). Both generations of
/// mutable state are private: hosts only ever see the records written by
/// [`update`](Self::update) and read-only views of the current generation.
///
/// ## Usage
///
/// ```rust,ignore
/// let mut sim = Simulation::initialize(WorldBounds::default(), SimulationConfig::default())?;
/// let mut records = vec![RenderRecord::default(); sim.record_count()];
///
/// loop {
///     let count = sim.update(&mut records, 1.0 / 60.0);
///     renderer.draw(&records[..count]);
/// }
///
/// sim.destroy();
/// ```
pub struct Simulation {
    bounds: WorldBounds,
    config: SimulationConfig,
    statics: StaticStore,
    positions: DoubleBuffer<ComponentArena<Position>>,
    colors: DoubleBuffer<ComponentArena<Color>>,
    /// One slot per Avoid component, reused every frame.
    hits: Vec<Option<AvoidHit>>,
    frame: u64,
    last_stats: FrameStats,
}

impl Simulation {
    /// Allocates and seeds a new simulation.
    ///
    /// All arenas are reserved for N + K entities before population, then
    /// the mutable arenas are duplicated into their second generation.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid bounds or config, or if any allocation
    /// fails.
    pub fn initialize(bounds: WorldBounds, config: SimulationConfig) -> SimResult<Self> {
        let (statics, mutable) = populate(&bounds, &config)?;
        Self::from_stores(bounds, config, statics, mutable)
    }

    /// Builds a simulation around stores assembled by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid bounds or config,
    /// [`SimError::DanglingHandle`] if any static component references a
    /// missing slot, or an allocation failure.
    pub fn from_stores(
        bounds: WorldBounds,
        config: SimulationConfig,
        statics: StaticStore,
        mutable: MutableStore,
    ) -> SimResult<Self> {
        bounds.validate()?;
        config.validate()?;
        statics.validate_handles(&mutable)?;

        let avoid_count = statics.avoid.len();
        let mut hits: Vec<Option<AvoidHit>> = Vec::new();
        hits.try_reserve_exact(avoid_count)
            .map_err(|_| SimError::Allocation {
                component: "AvoidHit",
                requested: avoid_count,
            })?;
        hits.resize(avoid_count, None);

        let MutableStore { positions, colors } = mutable;
        let positions = DoubleBuffer::new(positions);
        let colors = DoubleBuffer::new(colors);

        tracing::info!(
            sprites = statics.sprites.len(),
            avoid = statics.avoid.len(),
            targets = statics.avoid_this.len(),
            positions = positions.current().len(),
            "simulation initialized"
        );

        Ok(Self {
            bounds,
            config,
            statics,
            positions,
            colors,
            hits,
            frame: 0,
            last_stats: FrameStats::default(),
        })
    }

    /// Advances one frame and writes the render records into `out`.
    ///
    /// Returns the number of records written, always
    /// [`record_count`](Self::record_count). The contents of `out` are a
    /// snapshot: the next call overwrites them.
    ///
    /// # Panics
    ///
    /// `out` must hold at least `record_count()` records; a shorter buffer
    /// panics.
    pub fn update(&mut self, out: &mut [RenderRecord], delta_time: f32) -> usize {
        let span = tracing::trace_span!("frame", frame = self.frame + 1);
        let _enter = span.enter();
        let min_len = self.config.min_parallel_len;

        // 1. Move: G -> G+1
        let start = Instant::now();
        {
            let (current, next) = self.positions.split_mut();
            move_pass(
                current.as_slice(),
                next.as_mut_slice(),
                &self.bounds,
                delta_time,
                min_len,
            );
        }
        self.positions.swap();
        let move_us = elapsed_us(start);

        // 2. Resolve: positions G+1 -> G+2, colors G -> G+1
        let start = Instant::now();
        let avoid_hits = {
            let (moved, resolved) = self.positions.split_mut();
            let (colors, recolored) = self.colors.split_mut();
            resolve_pass(
                ResolveInput {
                    moved: moved.as_slice(),
                    colors: colors.as_slice(),
                    avoid: self.statics.avoid.as_slice(),
                    targets: self.statics.avoid_this.as_slice(),
                },
                resolved.as_mut_slice(),
                recolored.as_mut_slice(),
                &mut self.hits,
                delta_time,
                min_len,
            )
        };
        self.positions.swap();
        self.colors.swap();
        let resolve_us = elapsed_us(start);

        // 3. Export
        let start = Instant::now();
        let records = export_pass(
            self.statics.sprites.as_slice(),
            self.positions.current().as_slice(),
            self.colors.current().as_slice(),
            out,
            min_len,
        );
        let export_us = elapsed_us(start);

        self.frame += 1;
        self.last_stats = FrameStats {
            frame: self.frame,
            records,
            avoid_hits,
            move_us,
            resolve_us,
            export_us,
        };
        tracing::debug!(
            frame = self.frame,
            records,
            avoid_hits,
            total_us = self.last_stats.total_us(),
            "frame complete"
        );

        records
    }

    /// Releases all storage.
    ///
    /// Equivalent to dropping the context; spelled out so the host's
    /// lifecycle is explicit at the call site.
    pub fn destroy(self) {
        tracing::info!(frames = self.frame, "simulation destroyed");
    }

    /// Number of records every `update` writes (N + K).
    #[inline]
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.statics.sprites.len()
    }

    /// Frames simulated so far.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Statistics of the most recent frame.
    #[inline]
    #[must_use]
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// The immutable world rectangle.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    /// The configuration this simulation was built with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Read-only static components.
    #[inline]
    #[must_use]
    pub fn statics(&self) -> &StaticStore {
        &self.statics
    }

    /// Current generation of positions.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &ComponentArena<Position> {
        self.positions.current()
    }

    /// Current generation of colors.
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &ComponentArena<Color> {
        self.colors.current()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_us(start: Instant) -> u64 {
    start.elapsed().as_micros() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Avoid, AvoidThis, Handle, Sprite};

    fn tiny_config() -> SimulationConfig {
        SimulationConfig {
            regular_count: 200,
            target_count: 4,
            min_parallel_len: 16,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_initialize_sizes() {
        let sim = Simulation::initialize(WorldBounds::default(), tiny_config()).unwrap();
        assert_eq!(sim.record_count(), 204);
        assert_eq!(sim.frame(), 0);
        assert_eq!(sim.positions().len(), 204);
        assert_eq!(sim.colors().len(), 204);
    }

    #[test]
    fn test_update_returns_record_count() {
        let mut sim = Simulation::initialize(WorldBounds::default(), tiny_config()).unwrap();
        let mut out = vec![RenderRecord::default(); sim.record_count()];
        for frame in 1..=5 {
            assert_eq!(sim.update(&mut out, 1.0 / 60.0), 204);
            assert_eq!(sim.frame(), frame);
            assert_eq!(sim.last_stats().frame, frame);
            assert_eq!(sim.last_stats().records, 204);
        }
    }

    #[test]
    fn test_generation_rotation() {
        let mut sim = Simulation::initialize(WorldBounds::default(), tiny_config()).unwrap();
        let mut out = vec![RenderRecord::default(); sim.record_count()];
        let _ = sim.update(&mut out, 0.1);
        assert_eq!(sim.positions.swap_count(), 2);
        assert_eq!(sim.colors.swap_count(), 1);
        // Two position swaps per frame land back on the same physical buffer
        assert_eq!(sim.positions.current_index(), 0);
        assert_eq!(sim.colors.current_index(), 1);
    }

    #[test]
    fn test_from_stores_rejects_dangling_handles() {
        let mut statics = StaticStore::with_capacity(1, 1, 0).unwrap();
        let mutable = MutableStore::with_capacity(0, 0).unwrap();
        let _ = statics.sprites.insert(Sprite {
            sprite_index: 0,
            scale: 1.0,
            color: Handle::from_raw(0),
            pos: Handle::from_raw(0),
        });
        let result = Simulation::from_stores(
            WorldBounds::default(),
            SimulationConfig::default(),
            statics,
            mutable,
        );
        assert!(matches!(result, Err(SimError::DanglingHandle { .. })));
    }

    #[test]
    fn test_hits_are_counted() {
        let mut statics = StaticStore::with_capacity(2, 1, 1).unwrap();
        let mut mutable = MutableStore::with_capacity(2, 2).unwrap();

        let me = mutable.positions.insert(Position::new(0.0, 0.0, 0.4, 0.0));
        let my_color = mutable.colors.insert(Color::WHITE);
        let it = mutable.positions.insert(Position::new(0.5, 0.0, 0.0, 0.0));
        let its_color = mutable.colors.insert(Color::new(0.6, 0.7, 0.8));

        let _ = statics.avoid.insert(Avoid {
            pos: me,
            color: my_color,
        });
        let _ = statics
            .avoid_this
            .insert(AvoidThis::with_distance(1.3, its_color, it));

        let mut sim =
            Simulation::from_stores(WorldBounds::default(), SimulationConfig::default(), statics, mutable)
                .unwrap();
        // No sprites: nothing exported, but the frame still runs
        let written = sim.update(&mut [], 1.0);
        assert_eq!(written, 0);
        assert_eq!(sim.last_stats().avoid_hits, 1);
        assert_eq!(sim.colors()[my_color], Color::new(0.6, 0.7, 0.8));
    }

    #[test]
    fn test_destroy_consumes() {
        let sim = Simulation::initialize(WorldBounds::default(), tiny_config()).unwrap();
        sim.destroy();
    }
}
