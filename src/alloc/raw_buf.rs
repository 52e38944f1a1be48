use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use super::{acquire, release};
use crate::util::error::TryReserveError;
use crate::util::result::ResultExtension;

/// Owned, fixed size, uninitialized storage for `cap` values of `T`.
///
/// A RawBuf never tracks which of its slots are initialized. Dropping it releases the storage
/// without running any destructors, so the owner is responsible for calling
/// [`drop_in_place`](RawBuf::drop_in_place) on every slot it has written to and not read from.
pub struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _phantom: PhantomData<T>,
}

impl<T> RawBuf<T> {
    /// Acquires storage for `cap` values. Nothing is allocated when `cap` is zero or `T` is
    /// zero-sized.
    pub fn try_new(cap: usize) -> Result<RawBuf<T>, TryReserveError> {
        Ok(RawBuf {
            ptr: acquire::<T>(cap)?,
            cap,
            _phantom: PhantomData,
        })
    }

    /// Acquires storage for `cap` values.
    ///
    /// # Panics
    /// Panics if the layout size exceeds [`isize::MAX`] or the allocator fails.
    pub fn new(cap: usize) -> RawBuf<T> {
        Self::try_new(cap).throw()
    }

    /// Returns the number of slots in the buffer.
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Returns a raw pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must be no greater than `cap`.
    pub const unsafe fn ptr(&self, index: usize) -> *mut T {
        // SAFETY: The caller guarantees that the offset stays within (or one past) the
        // allocation.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Constructs `value` into the slot at `index`, without dropping what was there.
    ///
    /// # Safety
    /// `index` must be less than `cap`. Any value previously in the slot is leaked.
    pub const unsafe fn write(&mut self, index: usize, value: T) {
        // SAFETY: index is in bounds, so the pointer is valid for writes and properly aligned.
        unsafe { self.ptr(index).write(value) }
    }

    /// Moves the value out of the slot at `index`, leaving it logically uninitialized.
    ///
    /// # Safety
    /// `index` must be less than `cap` and the slot must be initialized.
    pub const unsafe fn read(&self, index: usize) -> T {
        // SAFETY: The caller guarantees that the slot is in bounds and initialized.
        unsafe { self.ptr(index).read() }
    }

    /// Returns a reference to the value at `index`.
    ///
    /// # Safety
    /// `index` must be less than `cap` and the slot must be initialized.
    pub const unsafe fn get(&self, index: usize) -> &T {
        // SAFETY: The caller guarantees that the slot is in bounds and initialized.
        unsafe { &*self.ptr(index) }
    }

    /// Returns a mutable reference to the value at `index`.
    ///
    /// # Safety
    /// `index` must be less than `cap` and the slot must be initialized.
    pub const unsafe fn get_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: The caller guarantees that the slot is in bounds and initialized.
        unsafe { &mut *self.ptr(index) }
    }

    /// Runs the destructor of the value at `index`.
    ///
    /// # Safety
    /// `index` must be less than `cap` and the slot must be initialized. The slot is
    /// uninitialized afterwards.
    pub unsafe fn drop_in_place(&mut self, index: usize) {
        // SAFETY: The caller guarantees that the slot is in bounds and initialized.
        unsafe { self.ptr(index).drop_in_place() }
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        // SAFETY: ptr was acquired for exactly cap values of T.
        unsafe { release(self.ptr, self.cap) }
    }
}

// SAFETY: RawBuf uniquely owns its storage, like a Box<[MaybeUninit<T>]>.
unsafe impl<T: Send> Send for RawBuf<T> {}
// SAFETY: RawBuf only exposes values through &self as shared references.
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> Debug for RawBuf<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuf")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .finish()
    }
}
