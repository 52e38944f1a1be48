use std::fmt::{self, Debug, Formatter};

use crate::algo::{make_heap_by, pop_heap_by, push_heap_by, sort_heap_by};
use crate::collections::contiguous::Vector;
use crate::collections::traits::{Compare, Natural};
use crate::util::error::TryReserveError;
use crate::util::fmt::DebugIter;
use crate::util::result::ResultExtension;

/// A priority queue, keeping its elements as a binary heap in a [`Vector`].
///
/// The element that orders last under `C` is always at the top, so with the default [`Natural`]
/// ordering this is a max-queue. Use [`Reverse`](crate::collections::traits::Reverse) for a
/// min-queue.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `push` | `O(log n)`* |
/// | `pop` | `O(log n)` |
/// | `top` | `O(1)` |
/// | `from_vector` | `O(n)` |
///
/// \* Amortized, as the underlying Vector may need to grow.
#[derive(Clone)]
pub struct PriorityQueue<T, C = Natural> {
    data: Vector<T>,
    compare: C,
}

impl<T: Ord> PriorityQueue<T> {
    /// Creates an empty PriorityQueue using the natural ordering of `T`.
    pub const fn new() -> PriorityQueue<T> {
        PriorityQueue {
            data: Vector::new(),
            compare: Natural,
        }
    }

    /// Builds a PriorityQueue from the contents of `data`, by rearranging them into a heap.
    pub fn from_vector(data: Vector<T>) -> PriorityQueue<T> {
        PriorityQueue::from_vector_with_compare(data, Natural)
    }
}

impl<T, C: Compare<T>> PriorityQueue<T, C> {
    /// Creates an empty PriorityQueue ordered by `compare`.
    pub const fn with_compare(compare: C) -> PriorityQueue<T, C> {
        PriorityQueue {
            data: Vector::new(),
            compare,
        }
    }

    pub fn from_vector_with_compare(mut data: Vector<T>, compare: C) -> PriorityQueue<T, C> {
        make_heap_by(&mut data, |a, b| compare.less(a, b));
        PriorityQueue {
            data,
            compare,
        }
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the greatest element, if there is one.
    pub fn top(&self) -> Option<&T> {
        self.data.front()
    }

    /// Adds `value` to the PriorityQueue.
    ///
    /// # Panics
    /// Panics if the underlying Vector can't grow.
    pub fn push(&mut self, value: T) {
        self.try_push(value).throw()
    }

    /// Adds `value` to the PriorityQueue, or returns an error if the underlying Vector can't grow.
    /// The queue is left unchanged on failure.
    pub fn try_push(&mut self, value: T) -> Result<(), TryReserveError> {
        self.data.try_push(value)?;
        let compare = &self.compare;
        push_heap_by(&mut self.data, |a, b| compare.less(a, b));
        Ok(())
    }

    /// Removes and returns the greatest element.
    pub fn pop(&mut self) -> Option<T> {
        let compare = &self.compare;
        pop_heap_by(&mut self.data, |a, b| compare.less(a, b));
        self.data.pop()
    }

    /// Returns a reference to the ordering in use.
    pub const fn compare(&self) -> &C {
        &self.compare
    }

    /// Consumes the PriorityQueue, returning its elements in ascending order.
    pub fn into_sorted_vector(mut self) -> Vector<T> {
        let compare = &self.compare;
        sort_heap_by(&mut self.data, |a, b| compare.less(a, b));
        self.data
    }

    /// Consumes the PriorityQueue, returning its elements in heap order.
    pub fn into_vector(self) -> Vector<T> {
        self.data
    }

    /// Returns the elements in heap order, with the top first.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T, C: Compare<T>> Extend<T> for PriorityQueue<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        PriorityQueue::from_vector(Vector::from_iter(iter))
    }
}

impl<T, C: Default> Default for PriorityQueue<T, C> {
    fn default() -> Self {
        PriorityQueue {
            data: Vector::new(),
            compare: C::default(),
        }
    }
}

impl<T: Debug, C> Debug for PriorityQueue<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("contents", &DebugIter(self.data.iter()))
            .field("len", &self.data.len())
            .finish()
    }
}
