//! # Component Storage
//!
//! Structure-of-arrays storage addressed by typed handles.
//!
//! ## Design Philosophy
//!
//! - Every arena is reserved for the final population at initialization
//! - Arenas are append-only: handles are never invalidated or reused
//! - Cross-component references are handles, never borrowed references
//! - Components are split into static and mutable stores by write frequency

mod arena;
mod component;
mod handle;
mod store;

pub use arena::ComponentArena;
pub use component::{Avoid, AvoidThis, Color, Component, Position, Sprite, WorldBounds};
pub use handle::Handle;
pub use store::{MutableStore, StaticStore};
