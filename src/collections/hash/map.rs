use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::mem;
use std::ops::Index;

use super::{
    DEFAULT_BUCKET_HINT, EqualRange, HashTable, IntoIter, IntoKeys, IntoValues, Iter, Keys, Values,
    ValuesMut,
};
use crate::collections::traits::First;
use crate::util::error::TryReserveError;
use crate::util::fmt::DebugIter;
use crate::util::result::ResultExtension;

/// A map with unique keys, backed by a chained [`HashTable`].
///
/// Keys must implement [`Hash`] and [`Eq`], and equal keys must produce equal hashes. Entries are
/// visited in bucket order, which changes whenever the table grows. Inserting a key that is already
/// present keeps the existing entry, use [`insert_or_replace`](HashMap::insert_or_replace) to
/// overwrite it instead.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `insert` | `O(1)`* |
/// | `get` | `O(1)` |
/// | `remove` | `O(1)` |
/// | `iter` | `O(n + b)` |
///
/// \* Amortized over the table growing.
pub struct HashMap<K, V, B = RandomState> {
    pub(crate) table: HashTable<(K, V), First, B>,
}

impl<K, V> HashMap<K, V, RandomState> {
    /// Creates an empty HashMap with the default number of buckets.
    pub fn new() -> HashMap<K, V, RandomState> {
        HashMap::with_buckets(DEFAULT_BUCKET_HINT)
    }

    /// Creates an empty HashMap with at least `hint` buckets.
    pub fn with_buckets(hint: usize) -> HashMap<K, V, RandomState> {
        HashMap::with_buckets_and_hasher(hint, RandomState::new())
    }
}

impl<K, V, B> HashMap<K, V, B> {
    /// Creates an empty HashMap with at least `hint` buckets, hashing keys with `hasher`.
    pub fn with_buckets_and_hasher(hint: usize, hasher: B) -> HashMap<K, V, B> {
        HashMap {
            table: HashTable::with_buckets_and_hasher(hint, hasher),
        }
    }

    pub const fn len(&self) -> usize {
        self.table.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets in the underlying table.
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    pub const fn hasher(&self) -> &B {
        self.table.hasher()
    }

    /// Returns an iterator over all entries.
    pub fn iter(&self) -> Iter<'_, (K, V)> {
        self.table.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Returns an iterator over all values as mutable references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.table.iter_mut())
    }

    /// Consumes self and returns an iterator over all contained keys.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys(self.into_iter())
    }

    /// Consumes self and returns an iterator over all contained values.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues(self.into_iter())
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain<F: FnMut(&K, &V) -> bool>(&mut self, mut keep: F) {
        self.table.retain(|(key, value)| keep(key, value));
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashMap<K, V, B> {
    /// Inserts `value` under `key` if the key isn't already present, returning true if it was
    /// inserted. An existing entry is left untouched.
    ///
    /// # Panics
    /// Panics if the node storage or bucket array can't grow.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.try_insert(key, value).throw()
    }

    /// Inserts `value` under `key` if the key isn't already present, returning true if it was
    /// inserted.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<bool, TryReserveError> {
        self.table.try_insert_unique((key, value)).map(|(_, inserted)| inserted)
    }

    /// Inserts `value` under `key`, returning the value previously associated with an equal key.
    /// As with the standard library, the stored key isn't replaced.
    ///
    /// # Panics
    /// Panics if the node storage or bucket array can't grow.
    pub fn insert_or_replace(&mut self, key: K, value: V) -> Option<V> {
        if let Some(id) = self.table.find(&key) {
            return Some(mem::replace(&mut self.table.value_mut(id).1, value));
        }

        self.table.insert_unique((key, value));
        None
    }

    /// Returns the value stored under `key`, inserting the result of `default` first if the key
    /// is missing.
    ///
    /// # Panics
    /// Panics if the node storage or bucket array can't grow.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, default: F) -> &mut V {
        let id = self.table.find_or_insert_with(key, |key| (key, default()));
        &mut self.table.value_mut(id).1
    }

    /// Returns the entry for `key` as a key-value pair.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (key, value) = self.table.value(self.table.find(key)?);
        Some((key, value))
    }

    /// Returns a reference to the value associated with `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.table.find(key)?;
        Some(&mut self.table.value_mut(id).1)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.find(key).is_some()
    }

    /// Returns the number of entries for `key`, which is either zero or one.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        usize::from(self.contains_key(key))
    }

    /// Removes the entry associated with `key`, returning it if it exists.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.table.find(key)?;
        Some(self.table.erase_at(id))
    }

    /// Removes the entry associated with `key`, returning the value if it exists.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Grows the table so that it has at least `hint` buckets.
    pub fn reserve(&mut self, hint: usize) {
        self.table.resize(hint);
    }

    pub fn try_reserve(&mut self, hint: usize) -> Result<(), TryReserveError> {
        self.table.try_resize(hint)
    }
}

impl<K, V, B> IntoIterator for HashMap<K, V, B> {
    type Item = (K, V);

    type IntoIter = IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, K, V, B> IntoIterator for &'a HashMap<K, V, B> {
    type Item = &'a (K, V);

    type IntoIter = Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> Extend<(K, V)> for HashMap<K, V, B> {
    /// Inserts every entry from `iter`. Entries with a key that is already present are dropped.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(self.len().saturating_add(iter.size_hint().0));
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq, V, B: BuildHasher + Default> FromIterator<(K, V)> for HashMap<K, V, B> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, B, Q> Index<&Q> for HashMap<K, V, B>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    B: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Some(value) => value,
            None => panic!("No entry found for key!"),
        }
    }
}

impl<K, V, B: Default> Default for HashMap<K, V, B> {
    fn default() -> Self {
        HashMap::with_buckets_and_hasher(DEFAULT_BUCKET_HINT, B::default())
    }
}

impl<K: Clone, V: Clone, B: Clone> Clone for HashMap<K, V, B> {
    fn clone(&self) -> Self {
        HashMap {
            table: self.table.clone(),
        }
    }
}

impl<K: Hash + Eq, V: PartialEq, B: BuildHasher> PartialEq for HashMap<K, V, B> {
    /// Two maps are equal if they hold the same entries, regardless of order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Hash + Eq, V: Eq, B: BuildHasher> Eq for HashMap<K, V, B> {}

impl<K: Debug, V: Debug, B> Debug for HashMap<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashMap")
            .field("contents", &DebugIter(self.iter()))
            .field("len", &self.len())
            .field("buckets", &self.bucket_count())
            .finish()
    }
}

impl<K: Debug, V: Debug, B> Display for HashMap<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        f.debug_map().entries(self.iter().map(|(k, v)| (k, v))).finish()
    }
}

/// A map that allows several entries with equal keys, backed by a chained [`HashTable`].
///
/// Entries with equal keys are always adjacent when iterating.
pub struct HashMultiMap<K, V, B = RandomState> {
    pub(crate) table: HashTable<(K, V), First, B>,
}

impl<K, V> HashMultiMap<K, V, RandomState> {
    /// Creates an empty HashMultiMap with the default number of buckets.
    pub fn new() -> HashMultiMap<K, V, RandomState> {
        HashMultiMap::with_buckets(DEFAULT_BUCKET_HINT)
    }

    /// Creates an empty HashMultiMap with at least `hint` buckets.
    pub fn with_buckets(hint: usize) -> HashMultiMap<K, V, RandomState> {
        HashMultiMap::with_buckets_and_hasher(hint, RandomState::new())
    }
}

impl<K, V, B> HashMultiMap<K, V, B> {
    /// Creates an empty HashMultiMap with at least `hint` buckets, hashing keys with `hasher`.
    pub fn with_buckets_and_hasher(hint: usize, hasher: B) -> HashMultiMap<K, V, B> {
        HashMultiMap {
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

    pub fn iter(&self) -> Iter<'_, (K, V)> {
        self.table.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.table.iter_mut())
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashMultiMap<K, V, B> {
    /// Inserts `value` under `key`, next to any entries with an equal key.
    ///
    /// # Panics
    /// Panics if the node storage or bucket array can't grow.
    pub fn insert(&mut self, key: K, value: V) {
        self.try_insert(key, value).throw()
    }

    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), TryReserveError> {
        self.table.try_insert_equal((key, value)).map(|_| ())
    }

    /// Returns one of the values stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.find(key).map(|id| &self.table.value(id).1)
    }

    /// Returns an iterator over every entry for `key`.
    pub fn get_all<Q>(&self, key: &Q) -> EqualRange<'_, (K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.equal_range(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.find(key).is_some()
    }

    /// Returns the number of entries for `key`.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.count(key)
    }

    /// Removes every entry for `key`, returning the number removed.
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.erase_key(key)
    }
}

impl<K, V, B> IntoIterator for HashMultiMap<K, V, B> {
    type Item = (K, V);

    type IntoIter = IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, K, V, B> IntoIterator for &'a HashMultiMap<K, V, B> {
    type Item = &'a (K, V);

    type IntoIter = Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> Extend<(K, V)> for HashMultiMap<K, V, B> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.table.extend(iter);
    }
}

impl<K: Hash + Eq, V, B: BuildHasher + Default> FromIterator<(K, V)> for HashMultiMap<K, V, B> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMultiMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, B: Default> Default for HashMultiMap<K, V, B> {
    fn default() -> Self {
        HashMultiMap::with_buckets_and_hasher(DEFAULT_BUCKET_HINT, B::default())
    }
}

impl<K: Clone, V: Clone, B: Clone> Clone for HashMultiMap<K, V, B> {
    fn clone(&self) -> Self {
        HashMultiMap {
            table: self.table.clone(),
        }
    }
}

impl<K: Debug, V: Debug, B> Debug for HashMultiMap<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashMultiMap")
            .field("contents", &DebugIter(self.iter()))
            .field("len", &self.len())
            .field("buckets", &self.bucket_count())
            .finish()
    }
}
