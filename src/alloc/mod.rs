//! Raw storage acquisition and the node arena shared by the tree and hash containers.
//!
//! Acquiring storage is kept separate from initializing it. [`RawBuf`] hands out uninitialized
//! slots that the owning container constructs into and destroys out of explicitly, while
//! [`Arena`] pairs both steps for node based structures and recycles released slots.
//!
//! All storage comes from the global allocator. Failure to allocate is reported as an
//! [`AllocError`] rather than aborting, so that containers can roll back before propagating.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::util::error::{AllocError, CapacityOverflow, TryReserveError};

#[cfg(feature = "contiguous")]
mod arena;
mod raw_buf;

#[cfg(feature = "contiguous")]
pub use arena::*;
pub use raw_buf::*;

/// Computes the layout of `count` contiguous `T`s, failing if the total size would exceed
/// [`isize::MAX`].
pub(crate) fn layout_for<T>(count: usize) -> Result<Layout, CapacityOverflow> {
    Layout::array::<T>(count).map_err(|_| CapacityOverflow)
}

/// Acquires raw storage for `count` elements of type `T`. No allocation is made when the layout
/// has a size of zero, in which case a dangling pointer is returned.
pub(crate) fn acquire<T>(count: usize) -> Result<NonNull<T>, TryReserveError> {
    let layout = layout_for::<T>(count)?;

    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }

    #[cfg(test)]
    if crate::util::alloc::injected_failure() {
        log::debug!("injected allocation failure for {} bytes", layout.size());
        return Err(AllocError::for_layout(layout).into());
    }

    // SAFETY: The layout has a non-zero size.
    let raw_ptr: *mut T = unsafe { alloc::alloc(layout).cast() };

    NonNull::new(raw_ptr).ok_or_else(|| {
        log::debug!("allocation of {} bytes (align {}) failed", layout.size(), layout.align());
        AllocError::for_layout(layout).into()
    })
}

/// Changes the size of storage previously obtained from [`acquire`] from `old_count` to
/// `new_count` elements. On failure the original storage is untouched and still owned by the
/// caller.
///
/// # Safety
/// `ptr` must have been returned by [`acquire`] or [`resize`] for `T` with exactly `old_count`
/// elements.
pub(crate) unsafe fn resize<T>(
    ptr: NonNull<T>,
    old_count: usize,
    new_count: usize,
) -> Result<NonNull<T>, TryReserveError> {
    let new_layout = layout_for::<T>(new_count)?;
    // The old layout was valid when it was acquired.
    let old_layout = layout_for::<T>(old_count)?;

    match (old_layout.size(), new_layout.size()) {
        (_, _) if old_count == new_count => Ok(ptr),
        (0, _) => acquire::<T>(new_count),
        (_, 0) => {
            // SAFETY: The caller guarantees that ptr came from acquire with this count.
            unsafe { release(ptr, old_count) };
            Ok(NonNull::dangling())
        },
        (_, new_size) => {
            #[cfg(test)]
            if crate::util::alloc::injected_failure() {
                log::debug!("injected reallocation failure for {} bytes", new_size);
                return Err(AllocError::for_layout(new_layout).into());
            }

            // SAFETY: The same layout and allocator were used for the allocation, and the new
            // size is non-zero and no greater than isize::MAX.
            let raw_ptr: *mut T = unsafe {
                alloc::realloc(ptr.as_ptr().cast(), old_layout, new_size).cast()
            };

            NonNull::new(raw_ptr).ok_or_else(|| {
                log::debug!("reallocation to {} bytes failed", new_size);
                AllocError::for_layout(new_layout).into()
            })
        },
    }
}

/// Releases storage previously obtained from [`acquire`]. Elements are not dropped.
///
/// # Safety
/// `ptr` must have been returned by [`acquire`] or [`resize`] for `T` with exactly `count`
/// elements, and must not be used afterwards.
pub(crate) unsafe fn release<T>(ptr: NonNull<T>, count: usize) {
    let Ok(layout) = layout_for::<T>(count) else {
        return;
    };

    if layout.size() != 0 {
        // SAFETY: ptr is always allocated in the global allocator with this layout. Zero-sized
        // layouts are never allocated.
        unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) }
    }
}
