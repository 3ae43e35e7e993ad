//! # SCATTER
//!
//! Host-facing crate. Re-exports the simulation core so hosts depend on a
//! single crate, and ships the `scatter` headless driver binary.
//!
//! ```text
//! host ──▶ Simulation::initialize ──▶ update(records, dt) ... ──▶ destroy
//! ```

pub use scatter_core as core;

pub use scatter_core::{RenderRecord, SimError, SimResult, Simulation, SimulationConfig, WorldBounds};
