//! # Export Pass
//!
//! Flattens the final generation into render records for the host.
//! Read-only: touches only sprites, positions and colors.

use bytemuck::{Pod, Zeroable};
use rayon::prelude::*;

use crate::ecs::{Color, Position, Sprite};

/// Global scale applied to positions and sprite scales ("zooms out" the
/// simulation space into the renderer's view).
pub const GLOBAL_SCALE: f32 = 0.05;

/// One sprite as consumed by the renderer.
///
/// Seven tightly packed floats, castable to bytes with
/// [`bytemuck::cast_slice`] for direct upload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct RenderRecord {
    /// Scaled X position.
    pub pos_x: f32,
    /// Scaled Y position.
    pub pos_y: f32,
    /// Scaled sprite size.
    pub scale: f32,
    /// Red channel.
    pub color_r: f32,
    /// Green channel.
    pub color_g: f32,
    /// Blue channel.
    pub color_b: f32,
    /// Atlas sprite index, as a float for the vertex stream.
    pub sprite: f32,
}

impl RenderRecord {
    /// Builds the record for one sprite.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_parts(sprite: &Sprite, pos: &Position, color: &Color) -> Self {
        Self {
            pos_x: pos.x * GLOBAL_SCALE,
            pos_y: pos.y * GLOBAL_SCALE,
            scale: sprite.scale * GLOBAL_SCALE,
            color_r: color.r,
            color_g: color.g,
            color_b: color.b,
            sprite: sprite.sprite_index as f32,
        }
    }
}

/// Writes one record per sprite, in sprite order, and returns the count.
///
/// # Panics
///
/// The caller must size `out` for at least `sprites.len()` records; a
/// shorter buffer panics. Out-of-range handles panic as well.
pub fn export_pass(
    sprites: &[Sprite],
    positions: &[Position],
    colors: &[Color],
    out: &mut [RenderRecord],
    min_parallel_len: usize,
) -> usize {
    let count = sprites.len();
    out[..count]
        .par_iter_mut()
        .zip(sprites.par_iter())
        .with_min_len(min_parallel_len)
        .for_each(|(record, sprite)| {
            *record = RenderRecord::from_parts(
                sprite,
                &positions[sprite.pos.index()],
                &colors[sprite.color.index()],
            );
        });
    count
}
