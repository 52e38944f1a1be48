use std::mem::ManuallyDrop;
use std::slice;

use super::Vector;
#[doc(inline)]
pub use crate::collections::contiguous::array::IntoIter;

impl<T> IntoIterator for Vector<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let vec = ManuallyDrop::new(self);
        // SAFETY: The Vector's allocation holds cap slots, the first len of which are initialized.
        // The Vector is never dropped, so ownership passes to the iterator.
        unsafe { IntoIter::from_raw_parts(vec.arr.ptr.cast(), vec.cap(), vec.len) }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
