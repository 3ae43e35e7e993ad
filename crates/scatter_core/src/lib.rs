//! # SCATTER Core
//!
//! Double-buffered structure-of-arrays simulation of ~1,000,000 moving
//! sprites, a handful of which push the rest away and recolor them.
//!
//! ## Architecture Rules
//!
//! 1. **Handles, not references** - Components point at each other through
//!    typed indices into append-only arenas
//! 2. **Split by write frequency** - Static components live apart from the
//!    per-frame Position/Color arrays
//! 3. **No pass reads what it writes** - Mutable arrays are double buffered,
//!    so every pass is a pure, parallel whole-array transform
//! 4. **No allocations per frame** - Everything is reserved at initialization
//!
//! ## Example
//!
//! ```rust,ignore
//! use scatter_core::{RenderRecord, Simulation, SimulationConfig, WorldBounds};
//!
//! let mut sim = Simulation::initialize(WorldBounds::default(), SimulationConfig::default())?;
//! let mut records = vec![RenderRecord::default(); sim.record_count()];
//! let written = sim.update(&mut records, 1.0 / 60.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod passes;
pub mod pipeline;
pub mod spawn;
pub mod sync;

pub use config::{FloatRange, SimulationConfig};
pub use ecs::{
    Avoid, AvoidThis, Color, Component, ComponentArena, Handle, MutableStore, Position, Sprite,
    StaticStore, WorldBounds,
};
pub use error::{SimError, SimResult};
pub use passes::{RenderRecord, GLOBAL_SCALE, OVERSHOOT};
pub use pipeline::{FrameStats, Simulation};
pub use spawn::populate;
pub use sync::DoubleBuffer;
