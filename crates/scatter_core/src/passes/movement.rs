//! # Move Pass
//!
//! Integrates every position by its velocity and bounces it off the world
//! bounds. Each output depends only on the same entity's previous state.

use rayon::prelude::*;

use crate::ecs::{Position, WorldBounds};

/// Advances one position by `dt` and reflects it off the bounds.
///
/// Each axis is handled on its own: a coordinate that leaves `[min, max]`
/// is clamped to the crossed edge and that axis' velocity is negated. A
/// corner hit flips both components in the same step.
#[inline]
#[must_use]
pub fn move_position(pos: &Position, bounds: &WorldBounds, dt: f32) -> Position {
    let (x, vel_x) = reflect(pos.x + pos.vel_x * dt, pos.vel_x, bounds.x_min, bounds.x_max);
    let (y, vel_y) = reflect(pos.y + pos.vel_y * dt, pos.vel_y, bounds.y_min, bounds.y_max);
    Position { x, y, vel_x, vel_y }
}

#[inline]
fn reflect(coord: f32, vel: f32, min: f32, max: f32) -> (f32, f32) {
    if coord < min {
        (min, -vel)
    } else if coord > max {
        (max, -vel)
    } else {
        (coord, vel)
    }
}

/// Runs [`move_position`] over a whole generation.
///
/// `old` is generation *G*, `out` receives *G+1* in the same order.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn move_pass(
    old: &[Position],
    out: &mut [Position],
    bounds: &WorldBounds,
    dt: f32,
    min_parallel_len: usize,
) {
    assert_eq!(old.len(), out.len(), "move pass generation length mismatch");

    out.par_iter_mut()
        .zip(old.par_iter())
        .with_min_len(min_parallel_len)
        .for_each(|(dst, src)| *dst = move_position(src, bounds, dt));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> WorldBounds {
        WorldBounds::default()
    }

    #[test]
    fn test_inside_bounds_keeps_velocity() {
        let moved = move_position(&Position::new(0.0, 0.0, 10.0, 0.0), &bounds(), 1.0);
        assert_eq!(moved, Position::new(10.0, 0.0, 10.0, 0.0));
    }

    #[test]
    fn test_reflect_off_x_max() {
        let moved = move_position(&Position::new(79.0, 0.0, 2.0, 1.0), &bounds(), 1.0);
        assert_eq!(moved.x, 80.0);
        assert_eq!(moved.vel_x, -2.0);
        // The y axis did not cross anything
        assert_eq!(moved.y, 1.0);
        assert_eq!(moved.vel_y, 1.0);
    }

    #[test]
    fn test_reflect_off_x_min() {
        let moved = move_position(&Position::new(-79.5, 3.0, -1.0, 0.0), &bounds(), 1.0);
        assert_eq!(moved.x, -80.0);
        assert_eq!(moved.vel_x, 1.0);
        assert_eq!(moved.y, 3.0);
    }

    #[test]
    fn test_reflect_off_y_max() {
        let moved = move_position(&Position::new(0.0, 49.9, 0.5, 0.5), &bounds(), 1.0);
        assert_eq!(moved.y, 50.0);
        assert_eq!(moved.vel_y, -0.5);
        assert_eq!(moved.vel_x, 0.5);
    }

    #[test]
    fn test_reflect_off_y_min() {
        let moved = move_position(&Position::new(0.0, -49.9, 0.0, -0.5), &bounds(), 1.0);
        assert_eq!(moved.y, -50.0);
        assert_eq!(moved.vel_y, 0.5);
    }

    #[test]
    fn test_corner_flips_both_axes() {
        let moved = move_position(&Position::new(79.9, 49.9, 1.0, 1.0), &bounds(), 1.0);
        assert_eq!(moved, Position::new(80.0, 50.0, -1.0, -1.0));
    }

    #[test]
    fn test_landing_on_edge_is_not_a_bounce() {
        let moved = move_position(&Position::new(79.0, 0.0, 1.0, 0.0), &bounds(), 1.0);
        assert_eq!(moved.x, 80.0);
        assert_eq!(moved.vel_x, 1.0);
    }

    #[test]
    fn test_pass_preserves_order_and_length() {
        let old: Vec<Position> = (0..10_000)
            .map(|i| {
                let f = (i % 160) as f32 - 80.0;
                Position::new(f, 0.0, 3.0, -7.0)
            })
            .collect();
        let mut out = vec![Position::default(); old.len()];

        move_pass(&old, &mut out, &bounds(), 0.5, 64);

        for (src, dst) in old.iter().zip(&out) {
            assert_eq!(*dst, move_position(src, &bounds(), 0.5));
            assert!(bounds().contains(dst.x, dst.y));
        }
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_pass_rejects_mismatched_generations() {
        let old = vec![Position::default(); 3];
        let mut out = vec![Position::default(); 2];
        move_pass(&old, &mut out, &bounds(), 1.0, 1);
    }
}
