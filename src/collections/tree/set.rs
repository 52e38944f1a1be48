use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitXor, Sub};

use super::{Compare, IntoIter, Iter, Natural, RbTree};
use crate::collections::traits::{Identity, Set};
use crate::util::error::TryReserveError;
use crate::util::result::ResultExtension;

/// An ordered set of unique items, backed by a red-black tree.
///
/// Items are kept sorted under the ordering `C`, which defaults to [`Natural`]. The set algebra
/// of the [`Set`] trait is available, with the borrowed iterators yielding items in order for
/// [`difference`](Set::difference) and [`intersection`](Set::intersection).
pub struct TreeSet<T, C = Natural> {
    pub(crate) tree: RbTree<T, Identity, C>,
}

impl<T> TreeSet<T, Natural> {
    /// Creates an empty TreeSet ordered by the natural ordering of its items.
    pub fn new() -> TreeSet<T, Natural> {
        TreeSet::with_compare(Natural)
    }
}

impl<T, C> TreeSet<T, C> {
    /// Creates an empty TreeSet ordered by `compare`.
    pub fn with_compare(compare: C) -> TreeSet<T, C> {
        TreeSet {
            tree: RbTree::with_compare(compare),
        }
    }

    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the smallest item.
    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|id| self.tree.value(id))
    }

    /// Returns the largest item.
    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|id| self.tree.value(id))
    }

    pub fn pop_first(&mut self) -> Option<T> {
        let id = self.tree.first()?;
        Some(self.tree.erase_at(id))
    }

    pub fn pop_last(&mut self) -> Option<T> {
        let id = self.tree.last()?;
        Some(self.tree.erase_at(id))
    }

    /// Returns an iterator over all items in order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<T, C: Compare<T>> TreeSet<T, C> {
    /// Inserts `item`, returning false (and dropping `item`) if an equal item is already present.
    ///
    /// # Panics
    /// Panics if the node storage can't grow.
    pub fn insert(&mut self, item: T) -> bool {
        self.try_insert(item).throw()
    }

    /// Inserts `item`, returning false (and dropping `item`) if an equal item is already present.
    pub fn try_insert(&mut self, item: T) -> Result<bool, TryReserveError> {
        self.tree.try_insert_unique(item).map(|(_, inserted)| inserted)
    }

    /// Returns true if the set contains an item equal to `item`.
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.find(item).is_some()
    }

    /// Returns the stored item equal to `item`.
    pub fn get<Q>(&self, item: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.find(item).map(|id| self.tree.value(id))
    }

    /// Removes the item equal to `item`, returning true if there was one.
    pub fn remove<Q>(&mut self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.take(item).is_some()
    }

    /// Removes and returns the item equal to `item`.
    pub fn take<Q>(&mut self, item: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let id = self.tree.find(item)?;
        Some(self.tree.erase_at(id))
    }

    /// Returns an iterator over every item not less than `item`.
    pub fn lower_bound<Q>(&self, item: &Q) -> Iter<'_, T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.range(self.tree.lower_bound(item), None)
    }

    /// Returns an iterator over every item greater than `item`.
    pub fn upper_bound<Q>(&self, item: &Q) -> Iter<'_, T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.range(self.tree.upper_bound(item), None)
    }
}

impl<T, C: Compare<T>> Set<T> for TreeSet<T, C> {
    type Iter<'a> = Iter<'a, T> where Self: 'a, T: 'a;

    fn contains(&self, item: &T) -> bool {
        self.tree.find(item).is_some()
    }

    fn iter<'a>(&'a self) -> Self::Iter<'a> {
        self.tree.iter()
    }
}

impl<T, C> IntoIterator for TreeSet<T, C> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a TreeSet<T, C> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C: Compare<T>> Extend<T> for TreeSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for TreeSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreeSet::with_compare(C::default());
        set.extend(iter);
        set
    }
}

impl<T: Clone, C: Compare<T> + Clone> BitOr for &TreeSet<T, C> {
    type Output = TreeSet<T, C>;

    fn bitor(self, rhs: Self) -> Self::Output {
        let mut set = TreeSet::with_compare(self.tree.compare().clone());
        set.extend(self.union(rhs).cloned());
        set
    }
}

impl<T: Clone, C: Compare<T> + Clone> BitAnd for &TreeSet<T, C> {
    type Output = TreeSet<T, C>;

    fn bitand(self, rhs: Self) -> Self::Output {
        let mut set = TreeSet::with_compare(self.tree.compare().clone());
        set.extend(self.intersection(rhs).cloned());
        set
    }
}

impl<T: Clone, C: Compare<T> + Clone> BitXor for &TreeSet<T, C> {
    type Output = TreeSet<T, C>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        let mut set = TreeSet::with_compare(self.tree.compare().clone());
        set.extend(self.symmetric_difference(rhs).cloned());
        set
    }
}

impl<T: Clone, C: Compare<T> + Clone> Sub for &TreeSet<T, C> {
    type Output = TreeSet<T, C>;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut set = TreeSet::with_compare(self.tree.compare().clone());
        set.extend(self.difference(rhs).cloned());
        set
    }
}

impl<T, C: Default> Default for TreeSet<T, C> {
    fn default() -> Self {
        TreeSet::with_compare(C::default())
    }
}

impl<T: Clone, C: Clone> Clone for TreeSet<T, C> {
    fn clone(&self) -> Self {
        TreeSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T: PartialEq, C> PartialEq for TreeSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for TreeSet<T, C> {}

impl<T: Hash, C> Hash for TreeSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T: Debug, C> Debug for TreeSet<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// An ordered collection of items that allows duplicates, backed by a red-black tree.
///
/// Equal items are kept in the order they were inserted.
pub struct TreeMultiSet<T, C = Natural> {
    pub(crate) tree: RbTree<T, Identity, C>,
}

impl<T> TreeMultiSet<T, Natural> {
    /// Creates an empty TreeMultiSet ordered by the natural ordering of its items.
    pub fn new() -> TreeMultiSet<T, Natural> {
        TreeMultiSet::with_compare(Natural)
    }
}

impl<T, C> TreeMultiSet<T, C> {
    /// Creates an empty TreeMultiSet ordered by `compare`.
    pub fn with_compare(compare: C) -> TreeMultiSet<T, C> {
        TreeMultiSet {
            tree: RbTree::with_compare(compare),
        }
    }

    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|id| self.tree.value(id))
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|id| self.tree.value(id))
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<T, C: Compare<T>> TreeMultiSet<T, C> {
    /// Inserts `item` after any equal items.
    ///
    /// # Panics
    /// Panics if the node storage can't grow.
    pub fn insert(&mut self, item: T) {
        self.try_insert(item).throw()
    }

    /// Inserts `item` after any equal items.
    pub fn try_insert(&mut self, item: T) -> Result<(), TryReserveError> {
        self.tree.try_insert_equal(item).map(|_| ())
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.find(item).is_some()
    }

    /// Returns the number of items equal to `item`.
    pub fn count<Q>(&self, item: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.count(item)
    }

    /// Removes every item equal to `item`, returning the number removed.
    pub fn remove<Q>(&mut self, item: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.erase_key(item)
    }

    /// Removes the first item equal to `item`, returning true if there was one.
    pub fn remove_one<Q>(&mut self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        match self.tree.find(item) {
            Some(id) => {
                self.tree.erase_at(id);
                true
            },
            None => false,
        }
    }

    /// Returns an iterator over every item equal to `item`, in insertion order.
    pub fn equal_range<Q>(&self, item: &Q) -> Iter<'_, T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let (first, last) = self.tree.equal_range(item);
        self.tree.range(first, last)
    }
}

impl<T, C> IntoIterator for TreeMultiSet<T, C> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a TreeMultiSet<T, C> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C: Compare<T>> Extend<T> for TreeMultiSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for TreeMultiSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreeMultiSet::with_compare(C::default());
        set.extend(iter);
        set
    }
}

impl<T, C: Default> Default for TreeMultiSet<T, C> {
    fn default() -> Self {
        TreeMultiSet::with_compare(C::default())
    }
}

impl<T: Clone, C: Clone> Clone for TreeMultiSet<T, C> {
    fn clone(&self) -> Self {
        TreeMultiSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T: PartialEq, C> PartialEq for TreeMultiSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for TreeMultiSet<T, C> {}

impl<T: Debug, C> Debug for TreeMultiSet<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
