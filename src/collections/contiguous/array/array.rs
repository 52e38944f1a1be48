use std::borrow::{Borrow, BorrowMut};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::slice;

use crate::alloc;
use crate::util::error::TryReserveError;
use crate::util::fmt::DebugRaw;
use crate::util::result::ResultExtension;

/// An implementation of an array that is sized at runtime. Similar to a [`Box<[T]>`](Box<T>).
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Array.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `size` | `O(1)` |
/// | `realloc` | `O(n)`*, `O(1)` |
/// | `contains` | `O(n)` |
///
/// \* The global allocator may be able to grow the allocation in place.
pub struct Array<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) size: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Array<T> {
    /// Returns the size of the Array.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::contiguous::Array;
    /// let arr = Array::from([1, 2, 3].into_iter());
    /// assert_eq!(arr.size(), 3);
    /// ```
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Creates a new Array with size 0, without allocating.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::contiguous::Array;
    /// let arr: Array<u8> = Array::new();
    /// assert_eq!(arr.size(), 0);
    /// assert_eq!(&*arr, &[]);
    /// ```
    pub const fn new() -> Array<T> {
        Array {
            ptr: NonNull::dangling(),
            size: 0,
            _phantom: PhantomData,
        }
    }

    /// Creates a new Array of [`MaybeUninit<T>`] with the provided `size`. All values are
    /// uninitialized.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`] or the allocator fails.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::contiguous::Array;
    /// # use std::mem::MaybeUninit;
    /// let arr: Array<MaybeUninit<u8>> = Array::new_uninit(5);
    /// assert_eq!(arr.size(), 5);
    /// ```
    pub fn new_uninit(size: usize) -> Array<MaybeUninit<T>> {
        Self::try_new_uninit(size).throw()
    }

    /// Creates a new Array of [`MaybeUninit<T>`] with the provided `size`, returning an error
    /// instead of panicking if the storage can't be acquired.
    pub fn try_new_uninit(size: usize) -> Result<Array<MaybeUninit<T>>, TryReserveError> {
        Ok(Array {
            ptr: alloc::acquire::<MaybeUninit<T>>(size)?,
            size,
            _phantom: PhantomData,
        })
    }

    /// Decomposes an `Array<T>` into its raw components, a [`NonNull<T>`] pointer to the contained
    /// data and a [`usize`] representing the size. The caller becomes responsible for the
    /// allocation, which can be handed back with [`Array::from_parts`].
    pub const fn into_parts(self) -> (NonNull<T>, usize) {
        let ret = (self.ptr, self.size);
        mem::forget(self);
        ret
    }

    /// Creates an `Array<T>` from its raw components.
    ///
    /// # Safety
    /// Nothing is checked during construction. For the produced value to be valid:
    /// - `ptr` needs to be a currently and correctly allocated pointer within the global allocator,
    ///   with the layout of `[T; size]`, or dangling if that layout has a size of zero.
    /// - `ptr` needs to refer to `size` properly initialized values of `T`.
    pub const unsafe fn from_parts(ptr: NonNull<T>, size: usize) -> Array<T> {
        Array {
            ptr,
            size,
            _phantom: PhantomData,
        }
    }

    /// Interprets self as an `Array<MaybeUninit<T>>`. This acts as a counterpart to
    /// [`Array::assume_init`] and allows [`Array::realloc`] to be called on a previously
    /// initialized Array.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::contiguous::Array;
    /// # use std::mem::MaybeUninit;
    /// let mut arr = Array::from([1_u8, 2, 3].into_iter());
    /// let mut new_arr = arr.forget_init();
    ///
    /// new_arr.realloc(4);
    /// new_arr[3] = MaybeUninit::new(4);
    ///
    /// // SAFETY: All values in new_arr are now initialized.
    /// arr = unsafe { new_arr.assume_init() };
    ///
    /// assert_eq!(&*arr, &[1, 2, 3, 4]);
    /// ```
    pub fn forget_init(self) -> Array<MaybeUninit<T>> {
        let (ptr, size) = self.into_parts();
        // SAFETY: MaybeUninit<T> has the same layout as T, so the allocation is unchanged.
        unsafe { Array::from_parts(ptr.cast(), size) }
    }

    /// Creates an Array from an iterator that reports its exact length. If the iterator yields
    /// fewer items than it claims, the Array is shrunk to the number actually produced, and any
    /// surplus items are never pulled.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn from_iter_sized<I>(iter: I) -> Array<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let size = iter.len();
        let mut arr = Self::new_uninit(size);
        let mut written = 0;

        for item in iter.take(size) {
            arr[written] = MaybeUninit::new(item);
            written += 1;
        }

        if written < size {
            arr.realloc(written);
        }

        // SAFETY: The first `written` values are initialized and the Array has exactly that size.
        unsafe { arr.assume_init() }
    }
}

impl<T: Clone> Array<T> {
    /// Creates a new `Array<T>` with `count` clones of `item`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::contiguous::Array;
    /// let arr = Array::repeat_item(5, 3);
    /// assert_eq!(arr.size(), 3);
    /// assert_eq!(&*arr, &[5, 5, 5]);
    /// ```
    pub fn repeat_item(item: T, count: usize) -> Array<T> {
        Self::from_iter_sized(std::iter::repeat_n(item, count))
    }
}

impl<T: Default> Array<T> {
    /// Creates a new `Array<T>` by repeating the default value of `T` `count` times.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn repeat_default(count: usize) -> Array<T> {
        Self::from_iter_sized((0..count).map(|_| T::default()))
    }

    /// Reallocate self with `new_size`, filling any extra elements with the default value of `T`
    /// and dropping any elements past the new size.
    ///
    /// # Panics
    /// Panics if the memory layout of the new allocation would have a size that exceeds
    /// [`isize::MAX`].
    pub fn realloc_with_default(&mut self, new_size: usize) {
        self.realloc_with(T::default, new_size);
    }
}

impl<T> Array<T> {
    /// Reallocate self with `new_size`, filling any extra elements by calling `fill` and dropping
    /// any elements past the new size.
    ///
    /// # Panics
    /// Panics if the memory layout of the new allocation would have a size that exceeds
    /// [`isize::MAX`].
    pub fn realloc_with<F: FnMut() -> T>(&mut self, mut fill: F, new_size: usize) {
        let old_size = self.size;

        for i in new_size..old_size {
            // SAFETY: i < size, so the value is initialized and will not be used again.
            unsafe { self.ptr.add(i).drop_in_place() }
        }
        // Elements past new_size are gone, so don't let a failed realloc drop them twice.
        self.size = old_size.min(new_size);

        let mut wip_arr = mem::take(self).forget_init();
        wip_arr.realloc(new_size);

        for i in old_size..new_size {
            wip_arr[i] = MaybeUninit::new(fill());
        }

        // SAFETY: Values below old_size were kept and the rest were just initialized.
        *self = unsafe { wip_arr.assume_init() };
    }
}

impl<T> Array<MaybeUninit<T>> {
    /// Assume that all values of an `Array<MaybeUninit<T>>` are initialized.
    ///
    /// # Safety
    /// It is up to the caller to guarantee that the Array is properly initialized. Failing to do so
    /// is undefined behavior.
    pub unsafe fn assume_init(self) -> Array<T> {
        let (ptr, size) = self.into_parts();
        // SAFETY: The caller guarantees that every value is initialized, and MaybeUninit<T> has
        // the same layout as T.
        unsafe { Array::from_parts(ptr.cast(), size) }
    }

    /// Reallocate the Array to have size equal to `new_size`, with new locations uninitialized.
    /// On failure, the Array is left unchanged.
    pub fn try_realloc(&mut self, new_size: usize) -> Result<(), TryReserveError> {
        if size_of::<T>() == 0 {
            // Zero-sized types are never allocated, only the size needs to change.
            self.size = new_size;
            return Ok(());
        }

        // SAFETY: ptr was acquired for exactly size values.
        self.ptr = unsafe { alloc::resize(self.ptr, self.size, new_size)? };
        self.size = new_size;
        Ok(())
    }

    /// Reallocate the Array to have size equal to `new_size`, with new locations uninitialized.
    ///
    /// # Panics
    /// Panics if the memory layout of the new allocation would have a size that exceeds
    /// [`isize::MAX`], or if the allocator fails.
    pub fn realloc(&mut self, new_size: usize) {
        self.try_realloc(new_size).throw()
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Array<T> {
    fn drop(&mut self) {
        // SAFETY: All values are initialized, so the slice is valid to drop in place.
        unsafe { std::ptr::drop_in_place(self.deref_mut() as *mut [T]) }

        // SAFETY: ptr was acquired for exactly size values and is never used again.
        unsafe { alloc::release(self.ptr, self.size) }
    }
}

impl<T> Deref for Array<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The held data uses Layout::array(size) and is therefore valid and properly
        // aligned for size values, all of which are initialized.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }
}

impl<T> DerefMut for Array<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As with deref, and the &mut self receiver guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }
}

impl<T> AsRef<[T]> for Array<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Array<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for Array<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for Array<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

// SAFETY: Arrays rely on unique pointers and are therefore safe for Send when T: Send.
unsafe impl<T: Send> Send for Array<T> {}
// SAFETY: Array's safe API obeys all rules of the borrow checker, so no interior mutability occurs.
unsafe impl<T: Sync> Sync for Array<T> {}

impl<T: Clone> Clone for Array<T> {
    fn clone(&self) -> Self {
        Array::from_iter_sized(self.iter().cloned())
    }
}

impl<T, I> From<I> for Array<T>
where
    I: Iterator<Item = T> + ExactSizeIterator,
{
    /// Creates an Array from an [`ExactSizeIterator`]. See [`Array::from_iter_sized`].
    fn from(iter: I) -> Self {
        Array::from_iter_sized(iter)
    }
}

impl<T: PartialEq> PartialEq for Array<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Array<T> {}

impl<T: PartialOrd> PartialOrd for Array<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: Ord> Ord for Array<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: Hash> Hash for Array<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Array<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("contents", &DebugRaw(format!("{:?}", &**self)))
            .field("size", &self.size)
            .finish()
    }
}

impl<T: Debug> Display for Array<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
