use std::cmp::Ordering;

/// A strict weak ordering over keys of type `K`, used by the ordered containers and the priority
/// queue.
///
/// Any `Fn(&K, &K) -> Ordering` closure can be used directly. [`Natural`] defers to [`Ord`].
pub trait Compare<K: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Returns true if `a` is strictly ordered before `b`.
    fn less(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// The natural ordering of a key, as given by its [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> Compare<K> for F {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Reverses another ordering, so that the greatest key comes first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<K: ?Sized, C: Compare<K>> Compare<K> for Reverse<C> {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}
