//! # Component Arena
//!
//! Append-only, pre-sized, dense storage for a single component type.
//!
//! - All slots are reserved at creation (fallibly, so an allocation failure
//!   surfaces as an error instead of an abort)
//! - `insert` appends and returns a [`Handle`]
//! - Access is O(1) via handle
//! - Iteration is cache-friendly (contiguous memory)

use std::ops::Index;

use super::component::Component;
use super::handle::Handle;
use crate::error::{SimError, SimResult};

/// Append-only storage for one component type.
///
/// There is no removal: a handle returned by [`insert`](Self::insert) stays
/// valid, and keeps pointing at the same slot, for the arena's lifetime.
///
/// # Example
///
/// ```rust,ignore
/// let mut colors: ComponentArena<Color> = ComponentArena::with_capacity(1_000)?;
/// let white = colors.insert(Color::WHITE);
/// assert_eq!(colors[white], Color::WHITE);
/// ```
#[derive(Clone, Debug)]
pub struct ComponentArena<T> {
    data: Vec<T>,
}

impl<T: Component> ComponentArena<T> {
    /// Creates an empty arena with exactly `capacity` slots reserved.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Allocation`] if the reservation fails.
    pub fn with_capacity(capacity: usize) -> SimResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| SimError::Allocation {
                component: T::NAME,
                requested: capacity,
            })?;
        Ok(Self { data })
    }

    /// Appends a component and returns its handle.
    ///
    /// O(1). Callers are expected to have reserved enough capacity up front;
    /// growing past it reallocates, which is the cost the reservation avoids.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` components.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn insert(&mut self, value: T) -> Handle<T> {
        let len = self.data.len();
        assert!(
            len < u32::MAX as usize,
            "component arena exceeded u32 handle space"
        );
        self.data.push(value);
        Handle::from_raw(len as u32)
    }

    /// Returns the component behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is out of range. That can only happen if it was
    /// minted by a different arena, which is a data-model bug.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: Handle<T>) -> &T {
        &self.data[handle.index()]
    }

    /// Returns the component behind `handle`, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn try_get(&self, handle: Handle<T>) -> Option<&T> {
        self.data.get(handle.index())
    }

    /// Checks whether `handle` addresses an occupied slot.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: Handle<T>) -> bool {
        handle.index() < self.data.len()
    }

    /// Number of components stored.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been inserted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reserved slot count.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns a slice of all components, in insertion order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable slice of all components.
    ///
    /// The length is fixed; only values can be overwritten.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterates over all components in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T: Component> Index<Handle<T>> for ComponentArena<T> {
    type Output = T;

    #[inline]
    fn index(&self, handle: Handle<T>) -> &T {
        self.get(handle)
    }
}

impl<'a, T> IntoIterator for &'a ComponentArena<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::Color;

    #[test]
    fn test_arena_reserves_capacity() {
        let arena: ComponentArena<Color> = ComponentArena::with_capacity(1000).unwrap();
        assert!(arena.capacity() >= 1000);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_insert_returns_sequential_handles() {
        let mut arena = ComponentArena::with_capacity(3).unwrap();
        let a = arena.insert(Color::WHITE);
        let b = arena.insert(Color::new(0.5, 0.6, 0.7));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena[b], Color::new(0.5, 0.6, 0.7));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_insert_within_capacity_does_not_reallocate() {
        let mut arena = ComponentArena::with_capacity(64).unwrap();
        let before = arena.as_slice().as_ptr();
        for _ in 0..64 {
            let _ = arena.insert(Color::WHITE);
        }
        assert_eq!(arena.as_slice().as_ptr(), before);
    }

    #[test]
    fn test_handles_stay_valid_after_more_inserts() {
        let mut arena = ComponentArena::with_capacity(4).unwrap();
        let first = arena.insert(Color::new(0.1, 0.2, 0.3));
        for _ in 0..100 {
            let _ = arena.insert(Color::WHITE);
        }
        assert_eq!(arena[first], Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_contains_and_try_get() {
        let mut arena = ComponentArena::with_capacity(1).unwrap();
        let h = arena.insert(Color::WHITE);
        assert!(arena.contains(h));
        assert!(!arena.contains(Handle::from_raw(1)));
        assert!(arena.try_get(Handle::from_raw(1)).is_none());
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_out_of_range_handle_panics() {
        let arena: ComponentArena<Color> = ComponentArena::with_capacity(1).unwrap();
        let _color: Color = arena[Handle::from_raw(5)];
    }

    #[test]
    fn test_absurd_reservation_is_an_error() {
        let result: SimResult<ComponentArena<Color>> = ComponentArena::with_capacity(usize::MAX);
        assert!(matches!(
            result,
            Err(SimError::Allocation { component: "Color", .. })
        ));
    }
}
