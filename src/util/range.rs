use std::ops::{Bound, Range, RangeBounds};

use super::error::IndexOutOfBounds;

/// Resolves any range over indices into a concrete `start..end` that lies within `0..=len`.
pub fn try_bounds<R: RangeBounds<usize>>(range: R, len: usize) -> Result<Range<usize>, IndexOutOfBounds> {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.checked_add(1).ok_or(IndexOutOfBounds {
            index: start,
            len,
        })?,
        Bound::Unbounded => 0,
    };

    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1).ok_or(IndexOutOfBounds {
            index: end,
            len,
        })?,
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };

    if end > len {
        return Err(IndexOutOfBounds { index: end, len });
    }
    if start > end {
        return Err(IndexOutOfBounds { index: start, len: end });
    }

    Ok(start..end)
}
