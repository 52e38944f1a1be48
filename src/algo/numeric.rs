//! Generalised numeric algorithms: folds, running sums and differences, and exponentiation.
//!
//! The operator forms use [`Add`], [`Sub`] and [`Mul`], and each has a `_by` twin taking the
//! binary operation explicitly.

use std::iter::FusedIterator;
use std::ops::{Add, Mul, Sub};

/// Adds every item of `iter` onto `init`, from front to back.
pub fn accumulate<I, T>(iter: I, init: T) -> T
where
    I: IntoIterator,
    T: Add<I::Item, Output = T>,
{
    accumulate_by(iter, init, |acc, item| acc + item)
}

/// Folds every item of `iter` into `init` with `op`, from front to back.
pub fn accumulate_by<I, T, F>(iter: I, init: T, op: F) -> T
where
    I: IntoIterator,
    F: FnMut(T, I::Item) -> T,
{
    iter.into_iter().fold(init, op)
}

/// Adds the product of each pair of items from `a` and `b` onto `init`. Stops at the end of the
/// shorter sequence.
pub fn inner_product<A, B, T>(a: A, b: B, init: T) -> T
where
    A: IntoIterator,
    B: IntoIterator,
    A::Item: Mul<B::Item>,
    T: Add<<A::Item as Mul<B::Item>>::Output, Output = T>,
{
    inner_product_by(a, b, init, |acc, product| acc + product, |x, y| x * y)
}

/// Combines each pair of items from `a` and `b` with `combine`, and folds the results into `init`
/// with `fold`. Stops at the end of the shorter sequence.
pub fn inner_product_by<A, B, T, P, F, C>(a: A, b: B, init: T, mut fold: F, mut combine: C) -> T
where
    A: IntoIterator,
    B: IntoIterator,
    F: FnMut(T, P) -> T,
    C: FnMut(A::Item, B::Item) -> P,
{
    a.into_iter()
        .zip(b)
        .fold(init, |acc, (x, y)| fold(acc, combine(x, y)))
}

/// Returns an iterator over the running totals of `iter`: the first item, then the first two
/// added together, and so on.
pub fn partial_sum<I>(iter: I) -> PartialSum<I::IntoIter, fn(I::Item, I::Item) -> I::Item>
where
    I: IntoIterator,
    I::Item: Add<Output = I::Item> + Clone,
{
    partial_sum_by::<I, fn(I::Item, I::Item) -> I::Item>(iter, |acc, item| acc + item)
}

/// Returns an iterator over the running folds of `iter` under `op`.
pub fn partial_sum_by<I, F>(iter: I, op: F) -> PartialSum<I::IntoIter, F>
where
    I: IntoIterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
    PartialSum {
        inner: iter.into_iter(),
        acc: None,
        op,
    }
}

/// An iterator over running folds, created by [`partial_sum`] and [`partial_sum_by`].
#[derive(Debug, Clone)]
pub struct PartialSum<I: Iterator, F> {
    inner: I,
    acc: Option<I::Item>,
    op: F,
}

impl<I, F> Iterator for PartialSum<I, F>
where
    I: Iterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        let next = match self.acc.take() {
            Some(acc) => (self.op)(acc, item),
            None => item,
        };
        self.acc = Some(next.clone());
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, F> FusedIterator for PartialSum<I, F>
where
    I: FusedIterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{}

/// Returns an iterator over the first item of `iter`, followed by the difference between each
/// item and the one before it.
pub fn adjacent_difference<I>(
    iter: I,
) -> AdjacentDifference<I::IntoIter, fn(I::Item, I::Item) -> I::Item>
where
    I: IntoIterator,
    I::Item: Sub<Output = I::Item> + Clone,
{
    adjacent_difference_by::<I, fn(I::Item, I::Item) -> I::Item>(iter, |current, previous| {
        current - previous
    })
}

/// Returns an iterator over the first item of `iter`, followed by `op(current, previous)` for
/// each later item.
pub fn adjacent_difference_by<I, F>(iter: I, op: F) -> AdjacentDifference<I::IntoIter, F>
where
    I: IntoIterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
    AdjacentDifference {
        inner: iter.into_iter(),
        previous: None,
        op,
    }
}

/// An iterator over adjacent differences, created by [`adjacent_difference`] and
/// [`adjacent_difference_by`].
#[derive(Debug, Clone)]
pub struct AdjacentDifference<I: Iterator, F> {
    inner: I,
    previous: Option<I::Item>,
    op: F,
}

impl<I, F> Iterator for AdjacentDifference<I, F>
where
    I: Iterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        let result = match self.previous.replace(item.clone()) {
            Some(previous) => (self.op)(item, previous),
            None => item,
        };
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, F> FusedIterator for AdjacentDifference<I, F>
where
    I: FusedIterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{}

/// Raises `x` to the power `n` by repeated squaring. `power(x, 0)` is one.
///
/// # Time Complexity
/// `O(log n)` multiplications.
pub fn power<T>(x: T, n: u64) -> T
where
    T: Mul<Output = T> + Clone + From<u8>,
{
    power_by(x, n, |a, b| a * b).unwrap_or_else(|| T::from(1))
}

/// Combines `n` copies of `x` with the associative operation `op`, by repeated squaring. Returns
/// `None` when `n` is zero, as an arbitrary operation has no known identity.
pub fn power_by<T, F>(mut x: T, mut n: u64, mut op: F) -> Option<T>
where
    T: Clone,
    F: FnMut(T, T) -> T,
{
    if n == 0 {
        return None;
    }

    while n & 1 == 0 {
        n >>= 1;
        x = op(x.clone(), x);
    }

    let mut result = x.clone();
    n >>= 1;
    while n != 0 {
        x = op(x.clone(), x);
        if n & 1 != 0 {
            result = op(result, x.clone());
        }
        n >>= 1;
    }

    Some(result)
}

/// Fills `v` with `value`, `value + 1`, `value + 2` and so on.
pub fn iota<T>(v: &mut [T], value: T)
where
    T: Add<Output = T> + Clone + From<u8>,
{
    let Some((first, rest)) = v.split_first_mut() else {
        return;
    };

    *first = value;
    let mut previous = &*first;
    for slot in rest {
        *slot = previous.clone() + T::from(1);
        previous = slot;
    }
}
