//! # Resolve-Avoidance Pass
//!
//! Every [`Avoid`] entity that ends the Move pass inside the trigger radius
//! of an [`AvoidThis`] target bounces back and takes that target's color.
//!
//! ## Rules
//!
//! 1. Targets are scanned in creation order; the **first** one in range
//!    wins and the scan stops. It is not necessarily the nearest.
//! 2. A hit negates the velocity and advances the position by
//!    `velocity * dt * OVERSHOOT`, so the entity leaves the zone in one
//!    frame instead of jittering on its edge.
//! 3. Without a hit, position and color pass through unchanged.
//!
//! ## Data Flow
//!
//! ```text
//! moved positions (G+1) ──┐
//! current colors  (G)   ──┼──▶ resolve_pass ──▶ positions (G+2), colors (G+1)
//! Avoid / AvoidThis     ──┘
//! ```
//!
//! Inputs are never written, so all entities are independent. Brute force,
//! O(|avoid| x |targets|): there are millions of avoiders but only tens of
//! targets.

use rayon::prelude::*;

use crate::ecs::{Avoid, AvoidThis, Color, Position};

/// Multiplier applied to the bounce step.
pub const OVERSHOOT: f32 = 1.1;

/// Outcome of one [`Avoid`] entity that hit a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvoidHit {
    /// Bounced position and velocity.
    pub pos: Position,
    /// Color copied from the target.
    pub color: Color,
}

/// Returns the first target, in slice order, whose trigger radius contains
/// `pos`.
///
/// The comparison is strict: an entity exactly on the trigger radius is
/// outside it.
#[inline]
#[must_use]
pub fn first_target_in_range<'a>(
    pos: &Position,
    targets: &'a [AvoidThis],
    positions: &[Position],
) -> Option<&'a AvoidThis> {
    targets
        .iter()
        .find(|target| pos.distance_squared(&positions[target.pos.index()]) < target.distance_sq)
}

/// Flips the velocity and steps out of the zone.
#[inline]
#[must_use]
pub fn bounce(pos: &Position, dt: f32) -> Position {
    let vel_x = -pos.vel_x;
    let vel_y = -pos.vel_y;
    Position {
        x: pos.x + vel_x * dt * OVERSHOOT,
        y: pos.y + vel_y * dt * OVERSHOOT,
        vel_x,
        vel_y,
    }
}

/// Resolves a single [`Avoid`] entity against all targets.
///
/// `moved` holds post-Move positions and `colors` the previous frame's
/// colors. Returns `None` when nothing is in range.
#[inline]
#[must_use]
pub fn resolve_avoid(
    avoid: &Avoid,
    targets: &[AvoidThis],
    moved: &[Position],
    colors: &[Color],
    dt: f32,
) -> Option<AvoidHit> {
    let pos = &moved[avoid.pos.index()];
    first_target_in_range(pos, targets, moved).map(|target| AvoidHit {
        pos: bounce(pos, dt),
        color: colors[target.color.index()],
    })
}

/// Input generations of the resolve pass.
#[derive(Clone, Copy, Debug)]
pub struct ResolveInput<'a> {
    /// Post-Move positions, generation *G+1*.
    pub moved: &'a [Position],
    /// Colors of the previous frame, generation *G*.
    pub colors: &'a [Color],
    /// Entities that react to targets.
    pub avoid: &'a [Avoid],
    /// Targets in creation order.
    pub targets: &'a [AvoidThis],
}

/// Runs the resolve pass over whole generations.
///
/// 1. Copies `moved` / `colors` through to the outputs
/// 2. Evaluates every [`Avoid`] in parallel into `scratch`
/// 3. Writes the hits into the outputs
///
/// `scratch` must hold one slot per [`Avoid`]; it is pre-sized by the
/// caller so the pass does not allocate. If two avoiders share a slot the
/// later one in `avoid` order wins.
///
/// Returns the number of entities that hit a target.
///
/// # Panics
///
/// Panics if output lengths differ from input lengths, if `scratch` is not
/// `avoid.len()` long, or if any handle is out of range.
pub fn resolve_pass(
    input: ResolveInput<'_>,
    out_positions: &mut [Position],
    out_colors: &mut [Color],
    scratch: &mut [Option<AvoidHit>],
    dt: f32,
    min_parallel_len: usize,
) -> usize {
    let ResolveInput {
        moved,
        colors,
        avoid,
        targets,
    } = input;
    assert_eq!(scratch.len(), avoid.len(), "resolve scratch must match avoid count");

    out_positions.copy_from_slice(moved);
    out_colors.copy_from_slice(colors);

    scratch
        .par_iter_mut()
        .zip(avoid.par_iter())
        .with_min_len(min_parallel_len)
        .for_each(|(slot, avoid)| *slot = resolve_avoid(avoid, targets, moved, colors, dt));

    let mut hits = 0;
    for (avoid, hit) in avoid.iter().zip(scratch.iter()) {
        if let Some(hit) = hit {
            out_positions[avoid.pos.index()] = hit.pos;
            out_colors[avoid.color.index()] = hit.color;
            hits += 1;
        }
    }
    hits
}
