use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::Index;

use super::{
    Compare, IntoIter, IntoKeys, IntoValues, Iter, Keys, Natural, RbTree, Values, ValuesMut,
};
use crate::alloc::NodeId;
use crate::collections::traits::First;
use crate::util::error::TryReserveError;
use crate::util::result::ResultExtension;

/// An ordered map with unique keys, backed by a red-black tree.
///
/// Entries are kept sorted by key under the ordering `C`, which defaults to [`Natural`]. Inserting
/// a key that is already present keeps the existing entry, use
/// [`insert_or_replace`](TreeMap::insert_or_replace) to overwrite it instead.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `insert` | `O(log n)` |
/// | `get` | `O(log n)` |
/// | `remove` | `O(log n)` |
/// | `first`, `last` | `O(1)` |
/// | `pop_first`, `pop_last` | `O(log n)` |
pub struct TreeMap<K, V, C = Natural> {
    pub(crate) tree: RbTree<(K, V), First, C>,
}

impl<K, V> TreeMap<K, V, Natural> {
    /// Creates an empty TreeMap ordered by the natural ordering of its keys.
    pub fn new() -> TreeMap<K, V, Natural> {
        TreeMap::with_compare(Natural)
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Creates an empty TreeMap ordered by `compare`.
    pub fn with_compare(compare: C) -> TreeMap<K, V, C> {
        TreeMap {
            tree: RbTree::with_compare(compare),
        }
    }

    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|id| self.entry(id))
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|id| self.entry(id))
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let id = self.tree.first()?;
        Some(self.tree.erase_at(id))
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let id = self.tree.last()?;
        Some(self.tree.erase_at(id))
    }

    /// Returns an iterator over all entries in key order.
    pub fn iter(&self) -> Iter<'_, (K, V)> {
        self.tree.iter()
    }

    /// Returns an iterator over all keys in order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Returns an iterator over all values in key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Returns an iterator over all values in key order, as mutable references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.tree.iter_mut())
    }

    /// Consumes the TreeMap and returns an iterator over its keys in order.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys(self.into_iter())
    }

    /// Consumes the TreeMap and returns an iterator over its values in key order.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues(self.into_iter())
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    fn entry(&self, id: NodeId) -> (&K, &V) {
        let (key, value) = self.tree.value(id);
        (key, value)
    }
}

impl<K, V, C: Compare<K>> TreeMap<K, V, C> {
    /// Inserts `value` under `key` if the key isn't already present, returning true if it was
    /// inserted. An existing entry is left untouched.
    ///
    /// # Panics
    /// Panics if the node storage can't grow.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.try_insert(key, value).throw()
    }

    /// Inserts `value` under `key` if the key isn't already present, returning true if it was
    /// inserted.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<bool, TryReserveError> {
        self.tree.try_insert_unique((key, value)).map(|(_, inserted)| inserted)
    }

    /// Inserts `value` under `key`, returning the value previously stored under an equal key.
    ///
    /// # Panics
    /// Panics if the node storage can't grow.
    pub fn insert_or_replace(&mut self, key: K, value: V) -> Option<V> {
        if let Some(id) = self.tree.find(&key) {
            return Some(mem::replace(&mut self.tree.value_mut(id).1, value));
        }

        self.tree.insert_unique((key, value));
        None
    }

    /// Returns the value stored under `key`, inserting the result of `default` first if the key
    /// is missing.
    ///
    /// # Panics
    /// Panics if the node storage can't grow.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, default: F) -> &mut V {
        let hint = self.tree.lower_bound(&key);

        let id = match hint {
            Some(id) if !self.tree.compare().less(&key, &self.tree.value(id).0) => id,
            _ => self.tree.insert_unique_hint(hint, (key, default())),
        };

        &mut self.tree.value_mut(id).1
    }

    /// Returns the value associated with `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value associated with `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.find(key).map(|id| self.entry(id))
    }

    /// Returns the value associated with `key`, as a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let id = self.tree.find(key)?;
        Some(&mut self.tree.value_mut(id).1)
    }

    /// Returns true if there is an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.find(key).is_some()
    }

    /// Returns the number of entries for `key`, which is either zero or one.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        usize::from(self.contains_key(key))
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry for `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let id = self.tree.find(key)?;
        Some(self.tree.erase_at(id))
    }

    /// Returns an iterator over every entry with a key not less than `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Iter<'_, (K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.range(self.tree.lower_bound(key), None)
    }

    /// Returns an iterator over every entry with a key greater than `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Iter<'_, (K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.range(self.tree.upper_bound(key), None)
    }

    /// Returns an iterator over the entry for `key`, if there is one.
    pub fn equal_range<Q>(&self, key: &Q) -> Iter<'_, (K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let (first, last) = self.tree.equal_range(key);
        self.tree.range(first, last)
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C> {
    type Item = (K, V);

    type IntoIter = IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> {
    type Item = &'a (K, V);

    type IntoIter = Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    /// Inserts every entry from `iter`. Entries with a key that is already present are dropped.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for TreeMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::with_compare(C::default());
        map.extend(iter);
        map
    }
}

impl<K, V, C, Q> Index<&Q> for TreeMap<K, V, C>
where
    K: Borrow<Q>,
    C: Compare<K> + Compare<Q>,
    Q: ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Some(value) => value,
            None => panic!("No entry found for key!"),
        }
    }
}

impl<K, V, C: Default> Default for TreeMap<K, V, C> {
    fn default() -> Self {
        TreeMap::with_compare(C::default())
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for TreeMap<K, V, C> {
    fn clone(&self) -> Self {
        TreeMap {
            tree: self.tree.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for TreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for TreeMap<K, V, C> {}

impl<K: Hash, V: Hash, C> Hash for TreeMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

impl<K: Debug, V: Debug, C> Debug for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter().map(|(k, v)| (k, v))).finish()
    }
}

/// An ordered map that allows several entries with equal keys, backed by a red-black tree.
///
/// Entries with equal keys are kept in the order they were inserted.
pub struct TreeMultiMap<K, V, C = Natural> {
    pub(crate) tree: RbTree<(K, V), First, C>,
}

impl<K, V> TreeMultiMap<K, V, Natural> {
    /// Creates an empty TreeMultiMap ordered by the natural ordering of its keys.
    pub fn new() -> TreeMultiMap<K, V, Natural> {
        TreeMultiMap::with_compare(Natural)
    }
}

impl<K, V, C> TreeMultiMap<K, V, C> {
    /// Creates an empty TreeMultiMap ordered by `compare`.
    pub fn with_compare(compare: C) -> TreeMultiMap<K, V, C> {
        TreeMultiMap {
            tree: RbTree::with_compare(compare),
        }
    }

    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn first(&self) -> Option<&(K, V)> {
        self.tree.first().map(|id| self.tree.value(id))
    }

    pub fn last(&self) -> Option<&(K, V)> {
        self.tree.last().map(|id| self.tree.value(id))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let id = self.tree.first()?;
        Some(self.tree.erase_at(id))
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let id = self.tree.last()?;
        Some(self.tree.erase_at(id))
    }

    pub fn iter(&self) -> Iter<'_, (K, V)> {
        self.tree.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.tree.iter_mut())
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<K, V, C: Compare<K>> TreeMultiMap<K, V, C> {
    /// Inserts `value` under `key`, after any entries with an equal key.
    ///
    /// # Panics
    /// Panics if the node storage can't grow.
    pub fn insert(&mut self, key: K, value: V) {
        self.try_insert(key, value).throw()
    }

    /// Inserts `value` under `key`, after any entries with an equal key.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), TryReserveError> {
        self.tree.try_insert_equal((key, value)).map(|_| ())
    }

    /// Returns the first value inserted under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.find(key).map(|id| &self.tree.value(id).1)
    }

    /// Returns an iterator over every entry for `key`, in insertion order.
    pub fn get_all<Q>(&self, key: &Q) -> Iter<'_, (K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let (first, last) = self.tree.equal_range(key);
        self.tree.range(first, last)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.find(key).is_some()
    }

    /// Returns the number of entries for `key`.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.count(key)
    }

    /// Removes every entry for `key`, returning the number removed.
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.erase_key(key)
    }

    pub fn lower_bound<Q>(&self, key: &Q) -> Iter<'_, (K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.range(self.tree.lower_bound(key), None)
    }

    pub fn upper_bound<Q>(&self, key: &Q) -> Iter<'_, (K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.range(self.tree.upper_bound(key), None)
    }
}

impl<K, V, C> IntoIterator for TreeMultiMap<K, V, C> {
    type Item = (K, V);

    type IntoIter = IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMultiMap<K, V, C> {
    type Item = &'a (K, V);

    type IntoIter = Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for TreeMultiMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for TreeMultiMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMultiMap::with_compare(C::default());
        map.extend(iter);
        map
    }
}

impl<K, V, C: Default> Default for TreeMultiMap<K, V, C> {
    fn default() -> Self {
        TreeMultiMap::with_compare(C::default())
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for TreeMultiMap<K, V, C> {
    fn clone(&self) -> Self {
        TreeMultiMap {
            tree: self.tree.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for TreeMultiMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for TreeMultiMap<K, V, C> {}

impl<K: Debug, V: Debug, C> Debug for TreeMultiMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter().map(|(k, v)| (k, v))).finish()
    }
}
