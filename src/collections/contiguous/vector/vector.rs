use std::borrow::{Borrow, BorrowMut};
use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::ops::{Deref, DerefMut, RangeBounds};
use std::ptr::{self, NonNull};
use std::slice;

use crate::collections::contiguous::Array;
use crate::util::error::{CapacityOverflow, IndexOutOfBounds, TryInsertError, TryReserveError};
use crate::util::range;
use crate::util::result::ResultExtension;

/// The smallest non-zero capacity a Vector grows to.
pub const MIN_CAP: usize = 2;

/// The factor a full Vector's capacity is multiplied by when it grows.
pub const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection, based on [`Array<T>`].
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
/// - `m`: The number of items in the second Vector.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `push_unchecked` | `O(1)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `erase` | `O(n-i)` |
/// | `replace` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `append` | `O(n+m)` |
/// | `contains` | `O(n)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push` will take `O(n)`.
///
/// \** If the Vector has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct Vector<T> {
    pub(crate) arr: Array<MaybeUninit<T>>,
    pub(crate) len: usize,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated when the capacity
    /// changes.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 0);
    /// ```
    pub const fn new() -> Vector<T> {
        Vector {
            arr: Array::new(),
            len: 0,
        }
    }

    /// Creates a new Vector with capacity exactly equal to the provided value, allowing values to
    /// be added without reallocation.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// vec.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> Vector<T> {
        Vector {
            arr: Array::new_uninit(cap),
            len: 0,
        }
    }

    /// Returns the length of the Vector.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Vector. Unlike [`Vec`], the capacity is guaranteed to be
    /// exactly the value provided to any of the various capacity manipulation functions.
    pub const fn cap(&self) -> usize {
        self.arr.size()
    }

    /// Returns a reference to the first element, if there is one.
    pub fn front(&self) -> Option<&T> {
        self.first()
    }

    /// Returns a mutable reference to the first element, if there is one.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.first_mut()
    }

    /// Returns a reference to the last element, if there is one.
    pub fn back(&self) -> Option<&T> {
        self.last()
    }

    /// Returns a mutable reference to the last element, if there is one.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.last_mut()
    }

    /// Push the provided value onto the end of the Vector, increasing the capacity if required.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::contiguous::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn push(&mut self, value: T) {
        self.try_push(value).throw()
    }

    /// Push the provided value onto the end of the Vector, growing if required. If the Vector
    /// can't grow, it is left unchanged and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), TryReserveError> {
        if self.len == self.cap() {
            self.try_grow()?;
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
        Ok(())
    }

    /// Push the provided value onto the end of the Vector, assuming that there is enough capacity
    /// to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the Vector has enough capacity to add the provided
    /// value, using methods like [`reserve`](Vector::reserve) or [`with_cap`](Vector::with_cap).
    /// Using this method on a Vector without enough capacity is undefined behavior.
    pub const unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: It is up to the caller to ensure that the Vector has enough capacity for this
        // push, leading to the pointer write being in bounds of the object.
        unsafe { self.arr.ptr.add(self.len).write(MaybeUninit::new(value)); }
        self.len += 1;
    }

    /// Pops the last value off the end of the Vector, returning an owned value if the Vector has
    /// length greater than 0.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // SAFETY: len has just been decremented, so the value at len is initialized and no longer
        // considered part of the Vector.
        Some(unsafe { self.arr.ptr.add(self.len).read().assume_init() })
    }

    /// Inserts the provided value at the given index, growing and moving items as necessary. An
    /// index equal to the length appends.
    ///
    /// # Panics
    /// Panics if the provided index is greater than the length, or if growing fails.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..3).collect();
    /// vec.insert(1, 100);
    /// vec.insert(1, 200);
    /// vec.insert(5, 300);
    /// assert_eq!(&*vec, &[0, 200, 100, 1, 2, 300]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Inserts the provided value at the given index, returning an error if the index is greater
    /// than the length or the Vector can't grow. On error, the Vector is unchanged.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), TryInsertError> {
        if index > self.len {
            return Err(IndexOutOfBounds { index, len: self.len }.into());
        }

        if self.len == self.cap() {
            self.try_grow()?;
        }

        // SAFETY: There is capacity for one more value, so shifting index..len up by one stays in
        // bounds. The gap at index is then filled.
        unsafe {
            let hole = self.arr.ptr.add(index).as_ptr();
            ptr::copy(hole, hole.add(1), self.len - index);
            hole.write(MaybeUninit::new(value));
        }
        self.len += 1;

        Ok(())
    }

    /// Removes the element at the provided index, moving all following values to fill in the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = "Hello world!".chars().collect();
    /// assert_eq!(vec.remove(1), 'e');
    /// assert_eq!(vec.remove(4), ' ');
    /// assert_eq!(vec, "Hlloworld!".chars().collect());
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes the element at the provided index, or returns an error if it is out of bounds.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;

        // SAFETY: index < len, so the value is initialized. The values after it are shifted down
        // over the moved out slot.
        let value = unsafe {
            let slot = self.arr.ptr.add(index).as_ptr();
            let value = slot.read().assume_init();
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            value
        };
        self.len -= 1;

        Ok(value)
    }

    /// Removes every element in `range`, shifting the following values down to fill the gap.
    ///
    /// # Panics
    /// Panics if the range is out of bounds or decreasing.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..10).collect();
    /// vec.erase(2..8);
    /// assert_eq!(&*vec, &[0, 1, 8, 9]);
    /// ```
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) {
        let range = range::try_bounds(range, self.len).throw();
        let tail = self.len - range.end;

        // Leak rather than double drop if a destructor panics.
        self.len = range.start;

        // SAFETY: Values in range are initialized and are dropped exactly once. The tail is then
        // moved down over them.
        unsafe {
            let start = self.arr.ptr.add(range.start).as_ptr();
            ptr::drop_in_place(slice::from_raw_parts_mut(start.cast::<T>(), range.len()));
            ptr::copy(start.add(range.len()), start, tail);
        }

        self.len = range.start + tail;
    }

    /// Shortens the Vector to `len` elements, dropping the rest. Does nothing if the Vector is
    /// already no longer than `len`.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.erase(len..);
        }
    }

    /// Drops every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes the Vector to `new_len`, filling new slots with values produced by `fill`.
    ///
    /// # Panics
    /// Panics if growing fails.
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut fill: F) {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        self.reserve(new_len - self.len);
        while self.len < new_len {
            // SAFETY: Capacity for new_len values has just been reserved.
            unsafe { self.push_unchecked(fill()) }
        }
    }

    /// Replaces the element at the provided index with `new_value`, returning the old value.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.check_index(index).throw();
        mem::replace(&mut self[index], new_value)
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements. After invoking
    /// this method, the capacity will be >= len + extra.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).throw()
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements, returning an
    /// error and leaving the Vector unchanged if it can't.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), TryReserveError> {
        let new_cap = self.len.checked_add(extra).ok_or(CapacityOverflow)?;

        if new_cap <= self.cap() {
            return Ok(());
        }

        self.arr.try_realloc(new_cap)
    }

    /// Shrinks the Vector so that its capacity is equal to its length.
    pub fn shrink_to_fit(&mut self) {
        self.arr.realloc(self.len);
    }

    /// Appends all elements from `other` to self.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn append(&mut self, other: Vector<T>) {
        self.reserve(other.len);

        let mut other = ManuallyDrop::new(other);
        // SAFETY: self is valid for writes from len to len + other.len and other is valid for
        // reads from 0 to other.len. They are distinct allocations.
        unsafe {
            ptr::copy_nonoverlapping(
                other.arr.ptr.as_ptr().cast_const(),
                self.arr.ptr.add(self.len).as_ptr(),
                other.len,
            );
        }
        self.len += other.len;

        // Only the allocation is left to release, the values have moved.
        other.len = 0;
        // SAFETY: other is never used again.
        unsafe { ManuallyDrop::drop(&mut other) }
    }

    /// Swaps the contents of two Vectors without moving any elements.
    pub fn swap_with(&mut self, other: &mut Vector<T>) {
        mem::swap(self, other);
    }

    /// Creates a Vector from an iterator that reports its exact length, allocating once.
    pub fn from_iter_sized<I>(iter: I) -> Vector<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        Array::from_iter_sized(iter).into()
    }

    /// Grows the internal Array to allow for the insertion of additional elements. After calling
    /// this, the Vector can take at least one more element.
    pub(crate) fn try_grow(&mut self) -> Result<(), TryReserveError> {
        let new_cap = cmp::max(
            self.cap().checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?,
            MIN_CAP,
        );

        log::trace!("growing vector from {} to {} slots", self.cap(), new_cap);
        self.arr.try_realloc(new_cap)
    }

    /// Checks that the provided index is within the bounds of self.
    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }
}

impl<T: Clone> Vector<T> {
    /// Resizes the Vector to `new_len`, filling new slots with clones of `value`.
    ///
    /// # Panics
    /// Panics if growing fails.
    pub fn resize(&mut self, new_len: usize, value: T) {
        self.resize_with(new_len, || value.clone());
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Vector<T> {
    fn extend<A: IntoIterator<Item = &'a T>>(&mut self, iter: A) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let mut vec = Vector::new();
        vec.extend(value);
        vec
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        // SAFETY: All values below len are initialized, and are never used again.
        unsafe { ptr::drop_in_place(self.deref_mut() as *mut [T]) }

        // Dropping self.arr releases the allocation, its MaybeUninit values have no-op drops.
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull, properly aligned and the range entirely contained within this Vector.
        unsafe { slice::from_raw_parts(self.arr.ptr.as_ptr().cast(), self.len) }
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As with deref, and the &mut self receiver guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.arr.ptr.as_ptr().cast(), self.len) }
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        Vector::from_iter_sized(self.iter().cloned())
    }
}

impl<T> From<Vector<T>> for Array<T> {
    fn from(mut value: Vector<T>) -> Self {
        value.shrink_to_fit();
        value.len = 0;
        let arr = mem::take(&mut value.arr);
        // SAFETY: The Array was shrunk to exactly the initialized values.
        unsafe { arr.assume_init() }
    }
}

impl<T> From<Array<T>> for Vector<T> {
    fn from(value: Array<T>) -> Self {
        let len = value.size();
        Vector {
            arr: value.forget_init(),
            len,
        }
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(value: Vector<T>) -> Self {
        let value = ManuallyDrop::new(value);
        let ptr: NonNull<T> = value.arr.ptr.cast();
        let (len, cap) = (value.len, value.cap());
        // SAFETY: The allocation was made by the global allocator with the layout of [T; cap],
        // and the first len values are initialized.
        unsafe { Vec::from_raw_parts(ptr.as_ptr(), len, cap) }
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(value: Vec<T>) -> Self {
        let mut value = ManuallyDrop::new(value);
        let (len, cap) = (value.len(), value.capacity());
        // A Vec's pointer is never null.
        let ptr = NonNull::new(value.as_mut_ptr()).unwrap_or(NonNull::dangling());
        Vector {
            // SAFETY: Vec allocates [T; cap] with the global allocator, or dangles for zero size.
            arr: unsafe { Array::from_parts(ptr.cast(), cap) },
            len,
        }
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: Ord> Ord for Vector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
