use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::ops::{BitAnd, BitOr, BitXor, Sub};

use super::{DEFAULT_BUCKET_HINT, EqualRange, HashTable, IntoIter, Iter};
use crate::collections::traits::{Identity, Set};
use crate::util::error::TryReserveError;
use crate::util::fmt::DebugIter;
use crate::util::result::ResultExtension;

/// A set of unique items, backed by a chained [`HashTable`].
///
/// Items must implement [`Hash`] and [`Eq`], and equal items must produce equal hashes. The set
/// algebra comes from the [`Set`] trait, and the operators `|`, `&`, `^` and `-` build new sets
/// from two borrowed ones.
pub struct HashSet<T, B = RandomState> {
    pub(crate) table: HashTable<T, Identity, B>,
}

impl<T> HashSet<T, RandomState> {
    /// Creates an empty HashSet with the default number of buckets.
    pub fn new() -> HashSet<T, RandomState> {
        HashSet::with_buckets(DEFAULT_BUCKET_HINT)
    }

    /// Creates an empty HashSet with at least `hint` buckets.
    pub fn with_buckets(hint: usize) -> HashSet<T, RandomState> {
        HashSet::with_buckets_and_hasher(hint, RandomState::new())
    }
}

impl<T, B> HashSet<T, B> {
    /// Creates an empty HashSet with at least `hint` buckets, hashing items with `hasher`.
    pub fn with_buckets_and_hasher(hint: usize, hasher: B) -> HashSet<T, B> {
        HashSet {
            table: HashTable::with_buckets_and_hasher(hint, hasher),
        }
    }

    pub const fn len(&self) -> usize {
        self.table.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    pub const fn hasher(&self) -> &B {
        self.table.hasher()
    }

    /// Returns an iterator over all items in the set, as references.
    pub fn iter(&self) -> Iter<'_, T> {
        self.table.iter()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Keeps only the items for which `keep` returns true.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.table.retain(keep);
    }
}

impl<T: Hash + Eq, B: BuildHasher> HashSet<T, B> {
    /// Inserts `item` if it isn't already present, returning true if it was inserted.
    ///
    /// # Panics
    /// Panics if the node storage or bucket array can't grow.
    pub fn insert(&mut self, item: T) -> bool {
        self.try_insert(item).throw()
    }

    /// Inserts `item` if it isn't already present, returning true if it was inserted.
    pub fn try_insert(&mut self, item: T) -> Result<bool, TryReserveError> {
        self.table.try_insert_unique(item).map(|(_, inserted)| inserted)
    }

    /// Returns true if the set contains an item equal to `item`.
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.find(item).is_some()
    }

    /// Returns the stored item equal to `item`.
    pub fn get<Q>(&self, item: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.find(item).map(|id| self.table.value(id))
    }

    /// Removes the item equal to `item`, returning true if there was one.
    pub fn remove<Q>(&mut self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.erase_key(item) != 0
    }

    /// Removes and returns the item equal to `item`.
    pub fn take<Q>(&mut self, item: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.table.find(item)?;
        Some(self.table.erase_at(id))
    }

    /// Grows the table so that it has at least `hint` buckets.
    pub fn reserve(&mut self, hint: usize) {
        self.table.resize(hint);
    }
}

impl<T: Hash + Eq, B: BuildHasher> Set<T> for HashSet<T, B> {
    type Iter<'a> = Iter<'a, T> where Self: 'a, T: 'a;

    fn contains(&self, item: &T) -> bool {
        self.table.find(item).is_some()
    }

    fn iter<'a>(&'a self) -> Self::Iter<'a> {
        self.table.iter()
    }
}

impl<T, B> IntoIterator for HashSet<T, B> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, T, B> IntoIterator for &'a HashSet<T, B> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Hash + Eq, B: BuildHasher> Extend<T> for HashSet<T, B> {
    /// Inserts every item from `iter`. Items that are already present are dropped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(self.len().saturating_add(iter.size_hint().0));
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher + Default> FromIterator<T> for HashSet<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::default();
        set.extend(iter);
        set
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher + Clone> HashSet<T, B> {
    fn collect_with_hasher<'a, I>(&self, items: I) -> HashSet<T, B>
    where
        I: Iterator<Item = &'a T>,
        T: 'a,
    {
        let mut set = HashSet::with_buckets_and_hasher(DEFAULT_BUCKET_HINT, self.hasher().clone());
        set.extend(items.cloned());
        set
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher + Clone> BitOr for &HashSet<T, B> {
    type Output = HashSet<T, B>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.collect_with_hasher(self.union(rhs))
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher + Clone> BitAnd for &HashSet<T, B> {
    type Output = HashSet<T, B>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.collect_with_hasher(self.intersection(rhs))
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher + Clone> BitXor for &HashSet<T, B> {
    type Output = HashSet<T, B>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.collect_with_hasher(self.symmetric_difference(rhs))
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher + Clone> Sub for &HashSet<T, B> {
    type Output = HashSet<T, B>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.collect_with_hasher(self.difference(rhs))
    }
}

impl<T, B: Default> Default for HashSet<T, B> {
    fn default() -> Self {
        HashSet::with_buckets_and_hasher(DEFAULT_BUCKET_HINT, B::default())
    }
}

impl<T: Clone, B: Clone> Clone for HashSet<T, B> {
    fn clone(&self) -> Self {
        HashSet {
            table: self.table.clone(),
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher> PartialEq for HashSet<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T: Hash + Eq, B: BuildHasher> Eq for HashSet<T, B> {}

impl<T: Debug, B> Debug for HashSet<T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSet")
            .field("contents", &DebugIter(self.iter()))
            .field("len", &self.len())
            .field("buckets", &self.bucket_count())
            .finish()
    }
}

impl<T: Debug, B> Display for HashSet<T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A set that allows several equal items, backed by a chained [`HashTable`].
///
/// Equal items are always adjacent when iterating.
pub struct HashMultiSet<T, B = RandomState> {
    pub(crate) table: HashTable<T, Identity, B>,
}

impl<T> HashMultiSet<T, RandomState> {
    /// Creates an empty HashMultiSet with the default number of buckets.
    pub fn new() -> HashMultiSet<T, RandomState> {
        HashMultiSet::with_buckets(DEFAULT_BUCKET_HINT)
    }

    /// Creates an empty HashMultiSet with at least `hint` buckets.
    pub fn with_buckets(hint: usize) -> HashMultiSet<T, RandomState> {
        HashMultiSet::with_buckets_and_hasher(hint, RandomState::new())
    }
}

impl<T, B> HashMultiSet<T, B> {
    pub fn with_buckets_and_hasher(hint: usize, hasher: B) -> HashMultiSet<T, B> {
        HashMultiSet {
            table: HashTable::with_buckets_and_hasher(hint, hasher),
        }
    }

    pub const fn len(&self) -> usize {
        self.table.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.table.iter()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}

impl<T: Hash + Eq, B: BuildHasher> HashMultiSet<T, B> {
    /// Inserts `item`, next to any equal items.
    ///
    /// # Panics
    /// Panics if the node storage or bucket array can't grow.
    pub fn insert(&mut self, item: T) {
        self.try_insert(item).throw()
    }

    pub fn try_insert(&mut self, item: T) -> Result<(), TryReserveError> {
        self.table.try_insert_equal(item).map(|_| ())
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.find(item).is_some()
    }

    /// Returns the number of items equal to `item`.
    pub fn count<Q>(&self, item: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.count(item)
    }

    /// Returns an iterator over every item equal to `item`.
    pub fn equal_range<Q>(&self, item: &Q) -> EqualRange<'_, T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.equal_range(item)
    }

    /// Removes every item equal to `item`, returning the number removed.
    pub fn remove<Q>(&mut self, item: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.erase_key(item)
    }

    /// Removes a single item equal to `item`, returning true if there was one.
    pub fn remove_one<Q>(&mut self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.table.find(item) {
            Some(id) => {
                self.table.erase_at(id);
                true
            },
            None => false,
        }
    }
}

impl<T, B> IntoIterator for HashMultiSet<T, B> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, T, B> IntoIterator for &'a HashMultiSet<T, B> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Hash + Eq, B: BuildHasher> Extend<T> for HashMultiSet<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.table.extend(iter);
    }
}

impl<T: Hash + Eq, B: BuildHasher + Default> FromIterator<T> for HashMultiSet<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashMultiSet::default();
        set.extend(iter);
        set
    }
}

impl<T, B: Default> Default for HashMultiSet<T, B> {
    fn default() -> Self {
        HashMultiSet::with_buckets_and_hasher(DEFAULT_BUCKET_HINT, B::default())
    }
}

impl<T: Clone, B: Clone> Clone for HashMultiSet<T, B> {
    fn clone(&self) -> Self {
        HashMultiSet {
            table: self.table.clone(),
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher> PartialEq for HashMultiSet<T, B> {
    /// Two multisets are equal if every item occurs the same number of times in both.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| self.count(item) == other.count(item))
    }
}

impl<T: Hash + Eq, B: BuildHasher> Eq for HashMultiSet<T, B> {}

impl<T: Debug, B> Debug for HashMultiSet<T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashMultiSet")
            .field("contents", &DebugIter(self.iter()))
            .field("len", &self.len())
            .field("buckets", &self.bucket_count())
            .finish()
    }
}
