//! # Double-Buffered Component Arrays
//!
//! Two physical copies of one mutable array and an index saying which one
//! is "current".
//!
//! ## Architecture
//!
//! ```text
//!              ┌───────────────────────────┐
//!              │       DoubleBuffer<T>     │
//!              │                           │
//!              │  ┌─────────┐ ┌─────────┐  │
//!              │  │Buffer 0 │ │Buffer 1 │  │
//!              │  └────┬────┘ └────┬────┘  │
//!              │       │           │       │
//!              │  ┌────┴───────────┴────┐  │
//!              │  │  current index 0/1  │  │
//!              │  └─────────────────────┘  │
//!              └─────────────┬─────────────┘
//!                            │ split_mut()
//!              ┌─────────────┴─────────────┐
//!              ▼                           ▼
//!       ┌─────────────┐             ┌─────────────┐
//!       │ &T current  │             │ &mut T next │
//!       │ (pass input)│             │(pass output)│
//!       └─────────────┘             └─────────────┘
//! ```
//!
//! ## Aliasing
//!
//! `split_mut` hands out a shared borrow of one buffer and an exclusive
//! borrow of the other, produced by `split_at_mut`, so the borrow checker
//! proves a pass never reads the array it is writing. `swap` only flips the
//! index; no element is copied.

/// Two generations of a value with a movable "current" label.
///
/// ## Usage
///
/// ```rust,ignore
/// let mut positions = DoubleBuffer::new(initial_positions);
///
/// // Frame loop
/// let (current, next) = positions.split_mut();
/// move_pass(current.as_slice(), next.as_mut_slice(), bounds, dt, 4096);
/// positions.swap(); // next becomes current
/// ```
#[derive(Clone, Debug)]
pub struct DoubleBuffer<T> {
    /// The two physical buffers.
    buffers: [T; 2],
    /// Index of the current (readable) buffer. The other one is "next".
    current: usize,
    /// Number of swaps so far.
    swap_count: u64,
}

impl<T: Clone> DoubleBuffer<T> {
    /// Creates a double buffer whose both generations start as `initial`.
    ///
    /// Both copies are identical up front so the "next" buffer already has
    /// the right length; its contents are overwritten by the first pass.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::from_pair(initial.clone(), initial)
    }
}

impl<T> DoubleBuffer<T> {
    /// Creates a double buffer from two explicit generations.
    ///
    /// `current` becomes the readable buffer.
    #[must_use]
    pub fn from_pair(current: T, next: T) -> Self {
        Self {
            buffers: [current, next],
            current: 0,
            swap_count: 0,
        }
    }

    /// The current (most recently produced) generation.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &T {
        &self.buffers[self.current]
    }

    /// Borrows the current generation for reading and the other buffer for
    /// writing.
    #[inline]
    pub fn split_mut(&mut self) -> (&T, &mut T) {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.current == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }

    /// Relabels the "next" buffer as current.
    ///
    /// This is a **zero-copy** operation.
    #[inline]
    pub fn swap(&mut self) {
        self.current ^= 1;
        self.swap_count += 1;
    }

    /// Physical index (0 or 1) of the current buffer (for debugging).
    #[inline]
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of swaps performed since creation.
    #[inline]
    #[must_use]
    pub fn swap_count(&self) -> u64 {
        self.swap_count
    }

    /// Consumes the buffer and returns the current generation.
    #[must_use]
    pub fn into_current(self) -> T {
        let [first, second] = self.buffers;
        if self.current == 0 {
            first
        } else {
            second
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_buffer_creation() {
        let db = DoubleBuffer::new(vec![1, 2, 3]);
        assert_eq!(db.current(), &vec![1, 2, 3]);
        assert_eq!(db.current_index(), 0);
        assert_eq!(db.swap_count(), 0);
    }

    #[test]
    fn test_buffer_swap() {
        let mut db = DoubleBuffer::new(vec![0; 4]);

        {
            let (current, next) = db.split_mut();
            for (dst, src) in next.iter_mut().zip(current.iter()) {
                *dst = src + 1;
            }
        }
        // Not visible until swapped
        assert_eq!(db.current(), &vec![0; 4]);

        db.swap();
        assert_eq!(db.current(), &vec![1; 4]);
        assert_eq!(db.current_index(), 1);
        assert_eq!(db.swap_count(), 1);
    }

    #[test]
    fn test_split_never_aliases() {
        let mut db = DoubleBuffer::new(vec![0u8; 16]);
        for _ in 0..4 {
            let (current, next) = db.split_mut();
            assert_ne!(current.as_ptr(), next.as_ptr());
            db.swap();
        }
    }

    #[test]
    fn test_swap_is_zero_copy() {
        let mut db = DoubleBuffer::new(vec![0u32; 8]);
        let ptr_a = db.current().as_ptr();
        db.swap();
        let ptr_b = db.current().as_ptr();
        db.swap();
        assert_ne!(ptr_a, ptr_b);
        assert_eq!(db.current().as_ptr(), ptr_a);
    }

    #[test]
    fn test_into_current() {
        let mut db = DoubleBuffer::from_pair("a", "b");
        assert_eq!(db.clone().into_current(), "a");
        db.swap();
        assert_eq!(db.into_current(), "b");
    }
}
