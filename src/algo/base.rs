//! Basic sequence algorithms: comparison, filling and copying.

use std::cmp::Ordering;
use std::ops::RangeBounds;

use crate::util::error::IndexOutOfBounds;
use crate::util::range::try_bounds;
use crate::util::result::ResultExtension;

/// Returns true if every item of `a` equals the item at the same position in `b`. `b` may be
/// longer than `a`, but not shorter.
pub fn equal<A, B>(a: A, b: B) -> bool
where
    A: IntoIterator,
    B: IntoIterator,
    A::Item: PartialEq<B::Item>,
{
    equal_by(a, b, |x, y| x == y)
}

/// Returns true if `pred` holds for every item of `a` and the item at the same position in `b`.
/// `b` may be longer than `a`, but not shorter.
pub fn equal_by<A, B, F>(a: A, b: B, mut pred: F) -> bool
where
    A: IntoIterator,
    B: IntoIterator,
    F: FnMut(&A::Item, &B::Item) -> bool,
{
    let mut b = b.into_iter();
    a.into_iter().all(|x| match b.next() {
        Some(y) => pred(&x, &y),
        None => false,
    })
}

/// Returns the position of the first pair of items that differ between `a` and `b`, or the length
/// of the shorter slice if one is a prefix of the other.
pub fn mismatch<T: PartialEq<U>, U>(a: &[T], b: &[U]) -> usize {
    mismatch_by(a, b, |x, y| x == y)
}

/// Returns the position of the first pair of items for which `pred` fails, or the length of the
/// shorter slice if it never does.
pub fn mismatch_by<T, U, F>(a: &[T], b: &[U], mut pred: F) -> usize
where
    F: FnMut(&T, &U) -> bool,
{
    a.iter()
        .zip(b)
        .position(|(x, y)| !pred(x, y))
        .unwrap_or(a.len().min(b.len()))
}

/// Returns true if `a` orders before `b` lexicographically: at the first position where they
/// differ, the item from `a` is less, or `a` is a proper prefix of `b`.
pub fn lexicographical_compare<A, B, T>(a: A, b: B) -> bool
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
    T: PartialOrd,
{
    lexicographical_compare_by(a, b, |x, y| x < y)
}

/// Returns true if `a` orders before `b` lexicographically under `less`.
pub fn lexicographical_compare_by<A, B, T, F>(a: A, b: B, mut less: F) -> bool
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
    F: FnMut(&T, &T) -> bool,
{
    let mut a = a.into_iter();
    let mut b = b.into_iter();

    loop {
        let (x, y) = match (a.next(), b.next()) {
            (Some(x), Some(y)) => (x, y),
            (None, Some(_)) => return true,
            (_, None) => return false,
        };

        if less(&x, &y) {
            return true;
        }
        if less(&y, &x) {
            return false;
        }
    }
}

/// Compares two sequences lexicographically, as a three way [`Ordering`].
pub fn lexicographical_ordering<A, B, T>(a: A, b: B) -> Ordering
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
    T: Ord,
{
    a.into_iter().cmp(b)
}

/// Sets every item of `v` to a clone of `value`.
pub fn fill<T: Clone>(v: &mut [T], value: &T) {
    for slot in v {
        slot.clone_from(value);
    }
}

/// Sets the first `n` items of `v` to a clone of `value`, returning the position after the last
/// one filled.
///
/// # Panics
/// Panics if `n` exceeds the length of `v`.
pub fn fill_n<T: Clone>(v: &mut [T], n: usize, value: &T) -> usize {
    try_fill_n(v, n, value).throw()
}

/// Sets the first `n` items of `v` to a clone of `value`, returning the position after the last
/// one filled, or an error if `n` exceeds the length of `v`.
pub fn try_fill_n<T: Clone>(v: &mut [T], n: usize, value: &T) -> Result<usize, IndexOutOfBounds> {
    let range = try_bounds(..n, v.len())?;
    fill(&mut v[range], value);
    Ok(n)
}

/// Clones every item of `src` into the start of `dst`, front to back, returning the position in
/// `dst` after the last one copied.
///
/// # Panics
/// Panics if `dst` is shorter than `src`.
pub fn copy<T: Clone>(src: &[T], dst: &mut [T]) -> usize {
    let range = try_bounds(..src.len(), dst.len()).throw();
    dst[range].clone_from_slice(src);
    src.len()
}

/// Clones the items in `src` so that they end just before `dest_end`, within the same slice,
/// working from back to front. The ranges may overlap as long as the destination doesn't start
/// before the source. Returns the position of the first item written.
///
/// # Panics
/// Panics if `src` is out of bounds, or the destination would start before index 0 or end past
/// the end of `v`.
pub fn copy_backward<T: Clone, R: RangeBounds<usize>>(v: &mut [T], src: R, dest_end: usize) -> usize {
    let src = try_bounds(src, v.len()).throw();
    let dest = try_bounds(..dest_end, v.len()).throw();

    let Some(dest_start) = dest.end.checked_sub(src.len()) else {
        panic!("{}", IndexOutOfBounds {
            index: dest_end,
            len: src.len(),
        });
    };

    for offset in (0..src.len()).rev() {
        let value = v[src.start + offset].clone();
        v[dest_start + offset] = value;
    }

    dest_start
}
