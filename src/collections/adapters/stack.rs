use std::fmt::{self, Debug, Formatter};

use crate::collections::deque::Deque;
use crate::util::error::TryReserveError;
use crate::util::fmt::DebugIter;
use crate::util::result::ResultExtension;

/// A last-in first-out stack, adapting a [`Deque`].
///
/// Only the top of the stack is accessible. Equality and ordering compare the underlying
/// sequences from bottom to top.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `push` | `O(1)`* |
/// | `pop` | `O(1)` |
/// | `top` | `O(1)` |
///
/// \* A new buffer is allocated every [`Deque::block_len`] pushes.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stack<T> {
    inner: Deque<T>,
}

impl<T> Stack<T> {
    /// Creates an empty Stack without allocating.
    pub fn new() -> Stack<T> {
        Stack {
            inner: Deque::new(),
        }
    }

    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the most recently pushed element.
    pub fn top(&self) -> Option<&T> {
        self.inner.back()
    }

    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.inner.back_mut()
    }

    /// Pushes `value` onto the top of the Stack.
    ///
    /// # Panics
    /// Panics if a new buffer is needed and can't be allocated.
    pub fn push(&mut self, value: T) {
        self.try_push(value).throw()
    }

    pub fn try_push(&mut self, value: T) -> Result<(), TryReserveError> {
        self.inner.try_push_back(value)
    }

    /// Removes and returns the top element.
    pub fn pop(&mut self) -> Option<T> {
        self.inner.pop_back()
    }

    /// Consumes the Stack, returning the underlying Deque with the top at the back.
    pub fn into_inner(self) -> Deque<T> {
        self.inner
    }
}

impl<T> From<Deque<T>> for Stack<T> {
    /// Adapts `deque`, treating its back as the top of the stack.
    fn from(deque: Deque<T>) -> Self {
        Stack {
            inner: deque,
        }
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Stack::from(Deque::from_iter(iter))
    }
}

impl<T: Debug> Debug for Stack<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("contents", &DebugIter(self.inner.iter()))
            .field("len", &self.len())
            .finish()
    }
}
