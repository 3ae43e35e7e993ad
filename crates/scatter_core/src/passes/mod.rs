//! # Frame Passes
//!
//! Each pass is a pure, whole-array transform: it reads one set of
//! generations and writes another, never the same physical array.
//!
//! ```text
//! Move:     positions(G)                          -> positions(G+1)
//! Resolve:  positions(G+1), colors(G), statics    -> positions(G+2), colors(G+1)
//! Export:   positions(G+2), colors(G+1), sprites  -> render records
//! ```
//!
//! Per-entity work inside a pass is independent and fanned out with rayon.

mod avoidance;
mod export;
mod movement;

pub use avoidance::{
    bounce, first_target_in_range, resolve_avoid, resolve_pass, AvoidHit, ResolveInput, OVERSHOOT,
};
pub use export::{export_pass, RenderRecord, GLOBAL_SCALE};
pub use movement::{move_pass, move_position};
