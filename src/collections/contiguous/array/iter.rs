use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

use super::Array;
use crate::alloc;
#[allow(unused)]
use crate::collections::contiguous::Vector;

impl<T> IntoIterator for Array<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (ptr, size) = self.into_parts();
        // SAFETY: Every value of an Array is initialized.
        unsafe { IntoIter::from_raw_parts(ptr, size, size) }
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Array<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A type for owned iteration over an [`Array`] or [`Vector`]. See [`Array::into_iter`] and
/// [`Vector::into_iter`].
///
/// Values in `front..back` are still owned by the iterator. The allocation itself is released
/// when the iterator is dropped.
pub struct IntoIter<T> {
    ptr: NonNull<T>,
    size: usize,
    front: usize,
    back: usize,
    _phantom: PhantomData<T>,
}

impl<T> IntoIter<T> {
    /// Takes ownership of an allocation of `size` slots, of which only the first `len` are
    /// initialized.
    ///
    /// # Safety
    /// `ptr` must be an allocation of exactly `size` values of `T` from the global allocator and
    /// the first `len` values must be initialized.
    pub(crate) const unsafe fn from_raw_parts(ptr: NonNull<T>, size: usize, len: usize) -> IntoIter<T> {
        IntoIter {
            ptr,
            size,
            front: 0,
            back: len,
            _phantom: PhantomData,
        }
    }

    fn remaining(&self) -> &[T] {
        // SAFETY: Values in front..back are initialized and within the allocation.
        unsafe { slice::from_raw_parts(self.ptr.add(self.front).as_ptr(), self.back - self.front) }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for i in self.front..self.back {
            // SAFETY: Values in front..back haven't been yielded, so they are initialized and
            // still owned by the iterator.
            unsafe { self.ptr.add(i).drop_in_place() }
        }

        // SAFETY: The allocation was taken from an Array of the same size.
        unsafe { alloc::release(self.ptr, self.size) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            // SAFETY: front < back so the value is initialized. Incrementing front afterwards
            // moves ownership of it out of the iterator.
            let value = unsafe { self.ptr.add(self.front).read() };
            self.front += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            // SAFETY: back has just been decremented and is still >= front, so the value is
            // initialized and no longer considered owned by the iterator.
            let value = unsafe { self.ptr.add(self.back).read() };
            Some(value)
        } else {
            None
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {}

// SAFETY: IntoIter uniquely owns its remaining values.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: IntoIter provides no shared access to its values through &self.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.remaining()).finish()
    }
}
