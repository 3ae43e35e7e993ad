//! # Component Types
//!
//! Components are pure data containers with no behavior.
//!
//! They fall into two groups by write frequency:
//! - **Mutable** (`Position`, `Color`): rewritten every frame, double buffered
//! - **Static** (`Sprite`, `Avoid`, `AvoidThis`): fixed after initialization
//!
//! Static components reference mutable ones through [`Handle`]s, never by
//! value, so a logical entity is composed from slots in shared arenas.

use bytemuck::{Pod, Zeroable};

use super::handle::Handle;
use crate::error::{SimError, SimResult};

/// Marker trait for components stored in a [`ComponentArena`](super::ComponentArena).
///
/// Components must be:
/// - `Copy`: bitwise copyable, no heap allocations
/// - `Send + Sync`: passes fan out across threads
pub trait Component: Copy + Send + Sync + 'static {
    /// Human-readable component name used in error messages.
    const NAME: &'static str;
}

/// 2D position and velocity.
///
/// Velocity lives next to position because the Move pass reads and rewrites
/// both in one go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Position {
    /// X coordinate in world space.
    pub x: f32,
    /// Y coordinate in world space.
    pub y: f32,
    /// X velocity in world units per second.
    pub vel_x: f32,
    /// Y velocity in world units per second.
    pub vel_y: f32,
}

impl Component for Position {
    const NAME: &'static str = "Position";
}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, vel_x: f32, vel_y: f32) -> Self {
        Self { x, y, vel_x, vel_y }
    }

    /// Returns the squared distance to another position.
    ///
    /// This avoids the sqrt call for distance comparisons.
    #[inline]
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// RGB color, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Component for Color {
    const NAME: &'static str = "Color";
}

impl Color {
    /// Initial color of every regular object.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a new color.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Rendering data: which atlas sprite to draw, how big, and where its
/// position and color live.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// Index into the host's sprite atlas.
    pub sprite_index: u32,
    /// Sprite scale before the global export scale is applied.
    pub scale: f32,
    /// Color slot rendered for this sprite.
    pub color: Handle<Color>,
    /// Position slot rendered for this sprite.
    pub pos: Handle<Position>,
}

impl Component for Sprite {
    const NAME: &'static str = "Sprite";
}

/// Behavior: the entity bounces off and takes the color of any
/// [`AvoidThis`] emitter it gets too close to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Avoid {
    /// Position slot that gets bounced.
    pub pos: Handle<Position>,
    /// Color slot that gets recolored.
    pub color: Handle<Color>,
}

impl Component for Avoid {
    const NAME: &'static str = "Avoid";
}

/// Marker: emits a "danger zone" that [`Avoid`] entities bounce off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvoidThis {
    /// Squared trigger distance, precomputed at creation.
    pub distance_sq: f32,
    /// Color copied into entities that trigger this zone.
    pub color: Handle<Color>,
    /// Center of the zone.
    pub pos: Handle<Position>,
}

impl Component for AvoidThis {
    const NAME: &'static str = "AvoidThis";
}

impl AvoidThis {
    /// Creates a marker from an unsquared trigger distance.
    #[inline]
    #[must_use]
    pub fn with_distance(distance: f32, color: Handle<Color>, pos: Handle<Position>) -> Self {
        Self {
            distance_sq: distance * distance,
            color,
            pos,
        }
    }
}

/// Axis-aligned simulation rectangle. One instance, never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    /// Left edge.
    pub x_min: f32,
    /// Right edge.
    pub x_max: f32,
    /// Bottom edge.
    pub y_min: f32,
    /// Top edge.
    pub y_max: f32,
}

impl WorldBounds {
    /// Creates validated bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidBounds`] if any edge is not finite, a
    /// minimum exceeds its maximum, or an axis span overflows `f32`.
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> SimResult<Self> {
        let bounds = Self {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Checks that every edge is finite, `min <= max` on both axes and both
    /// spans are finite.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidBounds`] describing the first problem.
    pub fn validate(&self) -> SimResult<()> {
        let edges = [self.x_min, self.x_max, self.y_min, self.y_max];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(SimError::InvalidBounds(format!("non-finite edge in {self:?}")));
        }
        if self.x_min > self.x_max {
            return Err(SimError::InvalidBounds(format!(
                "x_min {} > x_max {}",
                self.x_min, self.x_max
            )));
        }
        if self.y_min > self.y_max {
            return Err(SimError::InvalidBounds(format!(
                "y_min {} > y_max {}",
                self.y_min, self.y_max
            )));
        }
        // Uniform sampling needs a representable span
        if !self.width().is_finite() || !self.height().is_finite() {
            return Err(SimError::InvalidBounds(format!(
                "span of {self:?} overflows f32"
            )));
        }
        Ok(())
    }

    /// Width of the rectangle.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// Checks whether a point lies inside or on the edge.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

impl Default for WorldBounds {
    /// The 160 x 100 field the host renderer is laid out for.
    fn default() -> Self {
        Self {
            x_min: -80.0,
            x_max: 80.0,
            y_min: -50.0,
            y_max: 50.0,
        }
    }
}
