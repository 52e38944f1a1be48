//! Binary max-heap algorithms over mutable slices.
//!
//! A slice is a heap when no element is greater than its parent: for every index `i > 0`,
//! `v[(i - 1) / 2]` is not less than `v[i]`. The greatest element therefore sits at index 0.
//! Each function has a `_by` twin taking a `less` predicate, which must be a strict weak ordering.
//!
//! Elements are moved through a single hole rather than swapped pairwise, so sifting an element
//! `k` levels costs `k + 1` moves instead of `3k`.

use std::mem::ManuallyDrop;
use std::ptr;

/// A slot in a slice whose element has been moved out into `elt`. Dropping the hole writes the
/// element back into the current position, which keeps the slice fully initialised even if a
/// comparison panics.
struct Hole<'a, T> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T> Hole<'a, T> {
    /// # Safety
    /// `pos` must be in bounds for `data`.
    unsafe fn new(data: &'a mut [T], pos: usize) -> Hole<'a, T> {
        debug_assert!(pos < data.len());
        // SAFETY: pos is in bounds, and the duplicate is never dropped while the hole exists.
        let elt = unsafe { ptr::read(data.get_unchecked(pos)) };
        Hole {
            data,
            elt: ManuallyDrop::new(elt),
            pos,
        }
    }

    fn element(&self) -> &T {
        &self.elt
    }

    /// # Safety
    /// `index` must be in bounds and not equal to the hole's position.
    unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index != self.pos && index < self.data.len());
        // SAFETY: index is in bounds and isn't the hole.
        unsafe { self.data.get_unchecked(index) }
    }

    /// Moves the element at `index` into the hole, leaving the hole at `index`.
    ///
    /// # Safety
    /// `index` must be in bounds and not equal to the hole's position.
    unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index != self.pos && index < self.data.len());
        // SAFETY: both positions are in bounds and distinct.
        unsafe {
            let base = self.data.as_mut_ptr();
            ptr::copy_nonoverlapping(base.add(index), base.add(self.pos), 1);
        }
        self.pos = index;
    }

    /// Moves the hole towards `top` while its parent is less than the held element.
    fn sift_up<F: FnMut(&T, &T) -> bool>(&mut self, top: usize, less: &mut F) {
        while self.pos > top {
            let parent = (self.pos - 1) / 2;
            // SAFETY: parent < pos < len.
            if !less(unsafe { self.get(parent) }, self.element()) {
                break;
            }
            // SAFETY: as above.
            unsafe { self.move_to(parent) };
        }
    }
}

impl<T> Drop for Hole<'_, T> {
    fn drop(&mut self) {
        // SAFETY: pos is in bounds, and its previous contents have been moved elsewhere.
        unsafe {
            let pos = self.pos;
            ptr::copy_nonoverlapping(&*self.elt, self.data.get_unchecked_mut(pos), 1);
        }
    }
}

/// Moves the element at `start` down to a leaf, always following the greater child, then back up
/// to where it belongs.
fn adjust_heap<T, F: FnMut(&T, &T) -> bool>(v: &mut [T], start: usize, less: &mut F) {
    let len = v.len();
    // SAFETY: callers only pass start < len.
    let mut hole = unsafe { Hole::new(v, start) };
    let mut child = 2 * start + 2;

    while child < len {
        // SAFETY: child - 1 and child are both children of the hole, and child < len.
        if less(unsafe { hole.get(child) }, unsafe { hole.get(child - 1) }) {
            child -= 1;
        }
        // SAFETY: as above.
        unsafe { hole.move_to(child) };
        child = 2 * (child + 1);
    }

    if child == len {
        // Only a left child remains.
        // SAFETY: child - 1 < len and is a child of the hole.
        unsafe { hole.move_to(child - 1) };
    }

    hole.sift_up(start, less);
}

/// Pushes the last element of `v` into the heap formed by the rest of it, using `less`.
pub fn push_heap_by<T, F: FnMut(&T, &T) -> bool>(v: &mut [T], mut less: F) {
    let Some(last) = v.len().checked_sub(1) else {
        return;
    };

    // SAFETY: last < len.
    let mut hole = unsafe { Hole::new(v, last) };
    hole.sift_up(0, &mut less);
}

/// Pushes the last element of `v` into the heap formed by the rest of it.
///
/// # Time Complexity
/// `O(log n)`
pub fn push_heap<T: Ord>(v: &mut [T]) {
    push_heap_by(v, |a, b| a < b);
}

/// Moves the greatest element of the heap `v` to the end, and restores the heap property over
/// the rest, using `less`.
pub fn pop_heap_by<T, F: FnMut(&T, &T) -> bool>(v: &mut [T], mut less: F) {
    let len = v.len();
    if len < 2 {
        return;
    }

    v.swap(0, len - 1);
    adjust_heap(&mut v[..len - 1], 0, &mut less);
}

/// Moves the greatest element of the heap `v` to the end, and restores the heap property over
/// the rest.
///
/// # Time Complexity
/// `O(log n)`
pub fn pop_heap<T: Ord>(v: &mut [T]) {
    pop_heap_by(v, |a, b| a < b);
}

/// Rearranges `v` into a heap, using `less`.
pub fn make_heap_by<T, F: FnMut(&T, &T) -> bool>(v: &mut [T], mut less: F) {
    let len = v.len();
    if len < 2 {
        return;
    }

    for parent in (0..=(len - 2) / 2).rev() {
        adjust_heap(v, parent, &mut less);
    }
}

/// Rearranges `v` into a heap.
///
/// # Time Complexity
/// `O(n)`
pub fn make_heap<T: Ord>(v: &mut [T]) {
    make_heap_by(v, |a, b| a < b);
}

/// Sorts the heap `v` into ascending order under `less`, by popping every element in turn.
pub fn sort_heap_by<T, F: FnMut(&T, &T) -> bool>(v: &mut [T], mut less: F) {
    for end in (2..=v.len()).rev() {
        pop_heap_by(&mut v[..end], &mut less);
    }
}

/// Sorts the heap `v` into ascending order. The result is not stable.
///
/// # Time Complexity
/// `O(n log n)`
pub fn sort_heap<T: Ord>(v: &mut [T]) {
    sort_heap_by(v, |a, b| a < b);
}

/// Returns true if `v` is a heap under `less`.
pub fn is_heap_by<T, F: FnMut(&T, &T) -> bool>(v: &[T], mut less: F) -> bool {
    (1..v.len()).all(|i| !less(&v[(i - 1) / 2], &v[i]))
}

/// Returns true if `v` is a heap.
pub fn is_heap<T: Ord>(v: &[T]) -> bool {
    is_heap_by(v, |a, b| a < b)
}
