//! # Handles
//!
//! A handle is a plain index into one component arena, tagged with the
//! component type so a `Handle<Position>` can never be used to index the
//! color arena.
//!
//! Arenas are append-only, so a handle never goes stale: there is no
//! generation counter and no null value.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Typed index into a [`ComponentArena`](super::ComponentArena).
///
/// Handles do not own anything. They are `Copy` regardless of `T`.
#[repr(transparent)]
pub struct Handle<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Creates a handle from a raw slot index.
    ///
    /// Only arenas mint handles during normal operation; this exists for
    /// hosts and tests that assemble stores by hand.
    #[inline]
    #[must_use]
    pub const fn from_raw(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the slot index as `usize`, ready for slice indexing.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the raw `u32` slot index.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.index
    }
}

// Manual impls: derives would add a `T: Clone` / `T: PartialEq` bound.
impl<T> Clone for Handle<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = std::any::type_name::<T>();
        let short = name.rsplit("::").next().unwrap_or(name);
        write!(f, "Handle<{short}>({})", self.index)
    }
}
