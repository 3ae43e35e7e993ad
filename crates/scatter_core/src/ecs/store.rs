//! # Component Stores
//!
//! Components are partitioned by how often they are written:
//!
//! ```text
//! StaticStore   (written once)      MutableStore   (rewritten every frame)
//! ┌───────────┐                     ┌───────────┐
//! │ sprites   │──pos/color──────────▶ positions │
//! │ avoid     │──pos/color──────────▶ colors    │
//! │ avoid_this│──pos/color──────────▶           │
//! └───────────┘                     └───────────┘
//! ```
//!
//! The split is a cache/throughput layout choice: hot, per-frame arrays are
//! packed together and can be double buffered without dragging the static
//! data along.

use super::arena::ComponentArena;
use super::component::{Avoid, AvoidThis, Color, Component, Position, Sprite};
use super::handle::Handle;
use crate::error::{SimError, SimResult};

/// Arenas for components that never change after initialization.
#[derive(Clone, Debug)]
pub struct StaticStore {
    /// One sprite per rendered entity, in render order.
    pub sprites: ComponentArena<Sprite>,
    /// Entities that react to avoid targets.
    pub avoid: ComponentArena<Avoid>,
    /// Avoid targets, checked in creation order.
    pub avoid_this: ComponentArena<AvoidThis>,
}

impl StaticStore {
    /// Creates empty arenas sized for the final population.
    ///
    /// # Arguments
    ///
    /// * `sprites` - Number of sprites (N + K)
    /// * `avoid` - Number of avoiding entities (N)
    /// * `avoid_this` - Number of avoid targets (K)
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Allocation`] if any reservation fails.
    pub fn with_capacity(sprites: usize, avoid: usize, avoid_this: usize) -> SimResult<Self> {
        Ok(Self {
            sprites: ComponentArena::with_capacity(sprites)?,
            avoid: ComponentArena::with_capacity(avoid)?,
            avoid_this: ComponentArena::with_capacity(avoid_this)?,
        })
    }

    /// Checks that every stored handle resolves in `mutable`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DanglingHandle`] for the first handle that points
    /// past the end of its arena.
    pub fn validate_handles(&self, mutable: &MutableStore) -> SimResult<()> {
        for sprite in &self.sprites {
            check(&mutable.positions, sprite.pos)?;
            check(&mutable.colors, sprite.color)?;
        }
        for avoid in &self.avoid {
            check(&mutable.positions, avoid.pos)?;
            check(&mutable.colors, avoid.color)?;
        }
        for target in &self.avoid_this {
            check(&mutable.positions, target.pos)?;
            check(&mutable.colors, target.color)?;
        }
        Ok(())
    }
}

/// Arenas for components rewritten every frame.
///
/// During spawning this is the single initial generation; the pipeline then
/// turns each arena into a [`DoubleBuffer`](crate::sync::DoubleBuffer).
#[derive(Clone, Debug)]
pub struct MutableStore {
    /// Positions and velocities.
    pub positions: ComponentArena<Position>,
    /// Colors.
    pub colors: ComponentArena<Color>,
}

impl MutableStore {
    /// Creates empty arenas sized for the final population.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Allocation`] if any reservation fails.
    pub fn with_capacity(positions: usize, colors: usize) -> SimResult<Self> {
        Ok(Self {
            positions: ComponentArena::with_capacity(positions)?,
            colors: ComponentArena::with_capacity(colors)?,
        })
    }
}

fn check<T: Component>(arena: &ComponentArena<T>, handle: Handle<T>) -> SimResult<()> {
    if arena.contains(handle) {
        Ok(())
    } else {
        Err(SimError::DanglingHandle {
            component: T::NAME,
            index: handle.index(),
            len: arena.len(),
        })
    }
}
