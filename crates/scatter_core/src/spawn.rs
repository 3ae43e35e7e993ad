//! # Population Seeding
//!
//! Builds the initial stores: N regular objects followed by K avoid
//! targets. Creation order is render order.
//!
//! All randomness comes from one `ChaCha8Rng` seeded from the config, so a
//! fixed seed reproduces the same population on every platform.

use std::f32::consts::TAU;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{FloatRange, SimulationConfig};
use crate::ecs::{Avoid, AvoidThis, Color, MutableStore, Position, Sprite, StaticStore, WorldBounds};
use crate::error::SimResult;

/// Creates every entity of the simulation.
///
/// - Regular objects: uniform position in `bounds`, white, one of the first
///   `regular_sprite_count` sprites, plus an [`Avoid`] behavior
/// - Avoid targets: position in the bounds scaled by `target_region_scale`,
///   random pastel color, fixed sprite, plus an [`AvoidThis`] marker
///
/// Every arena is reserved for the final population before the first insert.
///
/// # Errors
///
/// Returns an error if the config or bounds are invalid, or if reserving
/// storage fails.
pub fn populate(
    bounds: &WorldBounds,
    config: &SimulationConfig,
) -> SimResult<(StaticStore, MutableStore)> {
    bounds.validate()?;
    config.validate()?;
    let total = config.population()?;

    let mut statics = StaticStore::with_capacity(total, config.regular_count, config.target_count)?;
    let mut mutable = MutableStore::with_capacity(total, total)?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    for _ in 0..config.regular_count {
        spawn_regular(&mut statics, &mut mutable, bounds, config, &mut rng);
    }
    for _ in 0..config.target_count {
        spawn_target(&mut statics, &mut mutable, bounds, config, &mut rng);
    }

    tracing::info!(
        regular = config.regular_count,
        targets = config.target_count,
        seed = config.seed,
        "population seeded"
    );

    Ok((statics, mutable))
}

/// Random heading, speed drawn from `speed`.
fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed: &FloatRange) -> (f32, f32) {
    let angle = rng.gen::<f32>() * TAU;
    let speed = speed.sample(rng);
    (angle.cos() * speed, angle.sin() * speed)
}

fn spawn_regular<R: Rng + ?Sized>(
    statics: &mut StaticStore,
    mutable: &mut MutableStore,
    bounds: &WorldBounds,
    config: &SimulationConfig,
    rng: &mut R,
) {
    let x = rng.gen_range(bounds.x_min..=bounds.x_max);
    let y = rng.gen_range(bounds.y_min..=bounds.y_max);
    let (vel_x, vel_y) = random_velocity(rng, &config.regular_speed);
    let pos = mutable.positions.insert(Position::new(x, y, vel_x, vel_y));
    let color = mutable.colors.insert(Color::WHITE);

    let _ = statics.sprites.insert(Sprite {
        sprite_index: rng.gen_range(0..config.regular_sprite_count),
        scale: config.regular_scale,
        color,
        pos,
    });
    let _ = statics.avoid.insert(Avoid { pos, color });
}

fn spawn_target<R: Rng + ?Sized>(
    statics: &mut StaticStore,
    mutable: &mut MutableStore,
    bounds: &WorldBounds,
    config: &SimulationConfig,
    rng: &mut R,
) {
    let x = rng.gen_range(bounds.x_min..=bounds.x_max) * config.target_region_scale;
    let y = rng.gen_range(bounds.y_min..=bounds.y_max) * config.target_region_scale;
    let (vel_x, vel_y) = random_velocity(rng, &config.target_speed);
    let pos = mutable.positions.insert(Position::new(x, y, vel_x, vel_y));

    let pastel = &config.target_color;
    let color = mutable
        .colors
        .insert(Color::new(pastel.sample(rng), pastel.sample(rng), pastel.sample(rng)));

    let _ = statics.sprites.insert(Sprite {
        sprite_index: config.target_sprite_index,
        scale: config.target_scale,
        color,
        pos,
    });
    let _ = statics
        .avoid_this
        .insert(AvoidThis::with_distance(config.trigger_distance, color, pos));
}
