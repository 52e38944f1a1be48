use crate::collections::deque::Deque;
use crate::util::error::TryReserveError;
use crate::util::result::ResultExtension;

/// A first-in first-out queue, adapting a [`Deque`].
///
/// Elements are pushed at the back and popped from the front. Equality and ordering compare the
/// underlying sequences from front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Queue<T> {
    inner: Deque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Queue<T> {
        Queue {
            inner: Deque::new(),
        }
    }

    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the element that will be popped next.
    pub fn front(&self) -> Option<&T> {
        self.inner.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.inner.front_mut()
    }

    /// Returns the most recently pushed element.
    pub fn back(&self) -> Option<&T> {
        self.inner.back()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.inner.back_mut()
    }

    /// Pushes `value` onto the back of the Queue.
    ///
    /// # Panics
    /// Panics if a new buffer is needed and can't be allocated.
    pub fn push(&mut self, value: T) {
        self.try_push(value).throw()
    }

    pub fn try_push(&mut self, value: T) -> Result<(), TryReserveError> {
        self.inner.try_push_back(value)
    }

    /// Removes and returns the front element.
    pub fn pop(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    pub fn into_inner(self) -> Deque<T> {
        self.inner
    }
}

impl<T> From<Deque<T>> for Queue<T> {
    fn from(deque: Deque<T>) -> Self {
        Queue {
            inner: deque,
        }
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Queue::from(Deque::from_iter(iter))
    }
}
