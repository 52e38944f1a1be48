use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::marker::PhantomData;
use std::mem;

use super::{EqualRange, IntoIter, Iter, IterMut};
use crate::alloc::{Arena, NodeId};
use crate::collections::contiguous::Vector;
use crate::collections::traits::KeyOf;
use crate::util::error::TryReserveError;
use crate::util::fmt::DebugIter;
use crate::util::result::ResultExtension;

/// The bucket counts a [`HashTable`] can have. Each is a prime roughly double the last.
pub const PRIMES: [usize; 28] = [
    53, 97, 193, 389, 769, 1543, 3079, 6151, 12289, 24593, 49157, 98317, 196613, 393241, 786433,
    1572869, 3145739, 6291469, 12582917, 25165843, 50331653, 100663319, 201326611, 402653189,
    805306457, 1610612741, 3221225473, 4294967291,
];

/// The number of buckets used when no hint is given.
pub const DEFAULT_BUCKET_HINT: usize = 100;

/// Returns the smallest bucket count in [`PRIMES`] that is at least `hint`, or the largest one if
/// `hint` exceeds them all.
pub const fn next_prime(hint: usize) -> usize {
    let mut i = 0;
    while i < PRIMES.len() {
        if PRIMES[i] >= hint {
            return PRIMES[i];
        }
        i += 1;
    }
    PRIMES[PRIMES.len() - 1]
}

#[derive(Clone)]
pub(crate) struct HashNode<V> {
    pub(crate) value: V,
    pub(crate) next: Option<NodeId>,
}

/// A hash table that chains values within buckets, storing values of type `V` under the key that
/// `X` extracts from each one.
///
/// This is the engine behind [`HashMap`](super::HashMap), [`HashMultiMap`](super::HashMultiMap),
/// [`HashSet`](super::HashSet) and [`HashMultiSet`](super::HashMultiSet). Each bucket holds the
/// head of a singly linked chain of nodes, which live in an [`Arena`] and are addressed by
/// [`NodeId`]. The bucket count is always one of [`PRIMES`], and grows to the next one whenever an
/// insertion would leave more values than buckets. Values with equal keys are always adjacent
/// within their chain.
///
/// Growing the table (rehashing) relinks every node into a new bucket array without moving any
/// values, so handles stay valid across it.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `insert_*` | `O(1)`* |
/// | `find` | `O(1)`** |
/// | `erase_key`, `erase_at` | `O(1)`** |
/// | `resize` | `O(n + b)` |
/// | `iter` | `O(n + b)` |
///
/// \* Amortized over rehashing, and assuming a good hash function.
///
/// \*\* Assuming a good hash function.
pub struct HashTable<V, X, B = RandomState> {
    pub(crate) buckets: Vector<Option<NodeId>>,
    pub(crate) nodes: Arena<HashNode<V>>,
    pub(crate) hasher: B,
    pub(crate) _key: PhantomData<fn() -> X>,
}

impl<V, X> HashTable<V, X, RandomState> {
    /// Creates an empty table with the default number of buckets and a random hasher.
    ///
    /// # Panics
    /// Panics if the bucket array can't be allocated.
    pub fn new() -> HashTable<V, X, RandomState> {
        HashTable::with_buckets_and_hasher(DEFAULT_BUCKET_HINT, RandomState::new())
    }

    /// Creates an empty table with at least `hint` buckets and a random hasher.
    ///
    /// # Panics
    /// Panics if the bucket array can't be allocated.
    pub fn with_buckets(hint: usize) -> HashTable<V, X, RandomState> {
        HashTable::with_buckets_and_hasher(hint, RandomState::new())
    }
}

impl<V, X, B> HashTable<V, X, B> {
    /// Creates an empty table with at least `hint` buckets, hashing keys with `hasher`.
    ///
    /// # Panics
    /// Panics if the bucket array can't be allocated.
    pub fn with_buckets_and_hasher(hint: usize, hasher: B) -> HashTable<V, X, B> {
        HashTable::try_with_buckets_and_hasher(hint, hasher).throw()
    }

    /// Creates an empty table with at least `hint` buckets, hashing keys with `hasher`.
    pub fn try_with_buckets_and_hasher(hint: usize, hasher: B) -> Result<HashTable<V, X, B>, TryReserveError> {
        Ok(HashTable {
            buckets: empty_buckets(next_prime(hint))?,
            nodes: Arena::new(),
            hasher,
            _key: PhantomData,
        })
    }

    /// Returns the number of values in the table.
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the table holds no values.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the largest number of buckets the table will ever have.
    pub const fn max_bucket_count(&self) -> usize {
        PRIMES[PRIMES.len() - 1]
    }

    /// Returns the number of values chained in `bucket`.
    ///
    /// # Panics
    /// Panics if `bucket` is not less than [`bucket_count`](HashTable::bucket_count).
    pub fn elems_in_bucket(&self, bucket: usize) -> usize {
        Chain::new(&self.nodes, self.buckets[bucket]).count()
    }

    /// Returns the hasher used to place keys in buckets.
    pub const fn hasher(&self) -> &B {
        &self.hasher
    }

    /// Returns the value stored at `id`.
    ///
    /// # Panics
    /// Panics if `id` doesn't refer to a node in this table.
    pub fn value(&self, id: NodeId) -> &V {
        &self.nodes[id].value
    }

    /// Returns the value stored at `id`, mutably. Changing the key of the value is a logic error.
    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.nodes[id].value
    }

    /// Returns an iterator over every value, bucket by bucket.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.nodes, &self.buckets, self.len())
    }

    /// Returns an iterator over every value as a mutable reference, in the same order as
    /// [`iter`](HashTable::iter). Changing the key of a value is a logic error.
    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, V> {
        let order = self.chained_ids();
        let values = self.nodes.ordered_mut(&order).into_iter().map(|node| &mut node.value);
        IterMut::new(values.collect())
    }

    /// Removes every value, keeping the bucket array.
    pub fn clear(&mut self) {
        self.nodes.clear();
        for bucket in self.buckets.iter_mut() {
            *bucket = None;
        }
    }

    /// Removes every value for which `keep` returns false.
    pub fn retain<F: FnMut(&V) -> bool>(&mut self, mut keep: F) {
        for bucket in 0..self.buckets.len() {
            let mut prev = None;
            let mut cur = self.buckets[bucket];

            while let Some(id) = cur {
                let next = self.nodes[id].next;
                if keep(&self.nodes[id].value) {
                    prev = Some(id);
                } else {
                    self.unlink(bucket, prev, next);
                    self.nodes.remove(id);
                }
                cur = next;
            }
        }
    }

    /// Swaps the contents of two tables, including their hashers.
    pub fn swap_with(&mut self, other: &mut HashTable<V, X, B>) {
        mem::swap(self, other);
    }

    /// Collects the handle of every node, bucket by bucket.
    fn chained_ids(&self) -> Vector<NodeId> {
        let mut ids = Vector::with_cap(self.len());
        for head in self.buckets.iter() {
            let mut cur = *head;
            while let Some(id) = cur {
                ids.push(id);
                cur = self.nodes[id].next;
            }
        }
        ids
    }

    /// Points whatever preceded a node in `bucket` (the bucket head, or `prev`) at `next`.
    fn unlink(&mut self, bucket: usize, prev: Option<NodeId>, next: Option<NodeId>) {
        match prev {
            None => self.buckets[bucket] = next,
            Some(prev) => self.nodes[prev].next = next,
        }
    }
}

impl<V, X: KeyOf<V>, B: BuildHasher> HashTable<V, X, B>
where
    X::Key: Hash + Eq,
{
    fn key(&self, id: NodeId) -> &X::Key {
        X::key_of(&self.nodes[id].value)
    }

    fn bucket_in<Q: Hash + ?Sized>(&self, key: &Q, count: usize) -> usize {
        (self.hasher.hash_one(key) % count as u64) as usize
    }

    fn bucket_for<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        self.bucket_in(key, self.buckets.len())
    }

    /// Returns the first node in `bucket` with a key equal to `key`, and the node before it.
    fn search<Q>(&self, bucket: usize, key: &Q) -> Option<(Option<NodeId>, NodeId)>
    where
        X::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut prev = None;
        let mut cur = self.buckets[bucket];

        while let Some(id) = cur {
            if self.key(id).borrow() == key {
                return Some((prev, id));
            }
            prev = Some(id);
            cur = self.nodes[id].next;
        }

        None
    }

    /// Grows the bucket array to the next prime that is at least `hint`, if `hint` exceeds the
    /// current bucket count. Every node is relinked into the new array, no values are moved.
    ///
    /// The new array is allocated before anything is relinked, so on failure the table is left as
    /// it was.
    pub fn try_resize(&mut self, hint: usize) -> Result<(), TryReserveError> {
        let old_count = self.buckets.len();
        if hint <= old_count {
            return Ok(());
        }

        let new_count = next_prime(hint);
        if new_count <= old_count {
            return Ok(());
        }

        let mut fresh = empty_buckets(new_count)?;
        log::trace!(
            "rehashing {} values from {} to {} buckets",
            self.len(),
            old_count,
            new_count
        );

        for bucket in 0..old_count {
            let mut cur = self.buckets[bucket].take();
            while let Some(id) = cur {
                cur = self.nodes[id].next;
                let target = self.bucket_in(self.key(id), new_count);
                self.nodes[id].next = fresh[target];
                fresh[target] = Some(id);
            }
        }

        self.buckets = fresh;
        Ok(())
    }

    /// Grows the bucket array to hold at least `hint` values without rehashing.
    ///
    /// # Panics
    /// Panics if the new bucket array can't be allocated.
    pub fn resize(&mut self, hint: usize) {
        self.try_resize(hint).throw()
    }

    /// Inserts `value` unless an equal key is already present, without growing the bucket array.
    /// Returns the position of the new value and true, or the position of the existing equal
    /// value and false, in which case `value` is dropped.
    pub fn try_insert_unique_noresize(&mut self, value: V) -> Result<(NodeId, bool), TryReserveError> {
        let bucket = self.bucket_for(X::key_of(&value));

        if let Some((_, existing)) = self.search(bucket, X::key_of(&value)) {
            return Ok((existing, false));
        }

        let id = self.nodes.try_insert(HashNode {
            value,
            next: self.buckets[bucket],
        })?;
        self.buckets[bucket] = Some(id);
        Ok((id, true))
    }

    /// Inserts `value` unless an equal key is already present, growing the bucket array first if
    /// needed. See [`try_insert_unique_noresize`](HashTable::try_insert_unique_noresize).
    pub fn try_insert_unique(&mut self, value: V) -> Result<(NodeId, bool), TryReserveError> {
        self.try_resize(self.len() + 1)?;
        self.try_insert_unique_noresize(value)
    }

    /// Inserts `value` unless an equal key is already present, growing the bucket array first if
    /// needed.
    ///
    /// # Panics
    /// Panics if storage for the node or the bucket array can't be allocated.
    pub fn insert_unique(&mut self, value: V) -> (NodeId, bool) {
        self.try_insert_unique(value).throw()
    }

    /// Inserts `value` without growing the bucket array. If values with an equal key are present,
    /// the new one is linked straight after the first of them, otherwise it heads its bucket.
    pub fn try_insert_equal_noresize(&mut self, value: V) -> Result<NodeId, TryReserveError> {
        let bucket = self.bucket_for(X::key_of(&value));
        let existing = self.search(bucket, X::key_of(&value));

        let next = match existing {
            Some((_, existing)) => self.nodes[existing].next,
            None => self.buckets[bucket],
        };
        let id = self.nodes.try_insert(HashNode {
            value,
            next,
        })?;

        match existing {
            Some((_, existing)) => self.nodes[existing].next = Some(id),
            None => self.buckets[bucket] = Some(id),
        }
        Ok(id)
    }

    /// Inserts `value`, growing the bucket array first if needed.
    pub fn try_insert_equal(&mut self, value: V) -> Result<NodeId, TryReserveError> {
        self.try_resize(self.len() + 1)?;
        self.try_insert_equal_noresize(value)
    }

    /// Inserts `value`, growing the bucket array first if needed.
    ///
    /// # Panics
    /// Panics if storage for the node or the bucket array can't be allocated.
    pub fn insert_equal(&mut self, value: V) -> NodeId {
        self.try_insert_equal(value).throw()
    }

    /// Returns the position of the value with a key equal to `key`, inserting `make(key)` first
    /// if there is none. The key of the made value must equal `key`.
    pub fn try_find_or_insert_with<F>(&mut self, key: X::Key, make: F) -> Result<NodeId, TryReserveError>
    where
        F: FnOnce(X::Key) -> V,
    {
        if let Some(id) = self.find(&key) {
            return Ok(id);
        }

        self.try_resize(self.len() + 1)?;
        self.try_insert_unique_noresize(make(key)).map(|(id, _)| id)
    }

    /// Returns the position of the value with a key equal to `key`, inserting `make(key)` first
    /// if there is none.
    ///
    /// # Panics
    /// Panics if storage for the node or the bucket array can't be allocated.
    pub fn find_or_insert_with<F>(&mut self, key: X::Key, make: F) -> NodeId
    where
        F: FnOnce(X::Key) -> V,
    {
        self.try_find_or_insert_with(key, make).throw()
    }

    /// Returns the position of the first value with a key equal to `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        X::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.search(self.bucket_for(key), key).map(|(_, id)| id)
    }

    /// Returns the number of values with a key equal to `key`.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        X::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Chain::new(&self.nodes, self.buckets[self.bucket_for(key)])
            .filter(|&id| self.key(id).borrow() == key)
            .count()
    }

    /// Returns an iterator over every value with a key equal to `key`.
    pub fn equal_range<Q>(&self, key: &Q) -> EqualRange<'_, V>
    where
        X::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(first) = self.find(key) else {
            return EqualRange::new(&self.nodes, None, 0);
        };

        // Equal keys are adjacent, so the run ends at the first different key.
        let len = Chain::new(&self.nodes, Some(first))
            .take_while(|&id| self.key(id).borrow() == key)
            .count();
        EqualRange::new(&self.nodes, Some(first), len)
    }

    /// Erases every value with a key equal to `key`, returning the number erased.
    pub fn erase_key<Q>(&mut self, key: &Q) -> usize
    where
        X::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.bucket_for(key);
        let mut erased = 0;
        let mut prev = None;
        let mut cur = self.buckets[bucket];

        while let Some(id) = cur {
            let next = self.nodes[id].next;
            if self.key(id).borrow() == key {
                self.unlink(bucket, prev, next);
                self.nodes.remove(id);
                erased += 1;
            } else {
                prev = Some(id);
            }
            cur = next;
        }

        erased
    }

    /// Removes and returns the value at `id`. Handles to every other node remain valid.
    ///
    /// # Panics
    /// Panics if `id` doesn't refer to a node in this table.
    pub fn erase_at(&mut self, id: NodeId) -> V {
        let bucket = self.bucket_for(self.key(id));

        let mut prev = None;
        let mut cur = self.buckets[bucket];
        while let Some(node) = cur {
            if node == id {
                break;
            }
            prev = Some(node);
            cur = self.nodes[node].next;
        }

        self.unlink(bucket, prev, self.nodes[id].next);
        self.nodes.remove(id).value
    }

    /// Checks that every node sits in the bucket its key hashes to, that equal keys are adjacent
    /// and that the chains hold exactly [`len`](HashTable::len) nodes.
    #[cfg(test)]
    pub(crate) fn verify(&self) -> bool {
        let mut total = 0;

        for (bucket, head) in self.buckets.iter().enumerate() {
            let chain: Vec<NodeId> = Chain::new(&self.nodes, *head).collect();
            total += chain.len();

            for (i, &id) in chain.iter().enumerate() {
                if self.bucket_for(self.key(id)) != bucket {
                    return false;
                }
                // Once a run of equal keys ends, the key can't reappear later in the chain.
                let ended = chain[..i].windows(2).any(|pair| {
                    self.key(pair[0]) == self.key(id) && self.key(pair[1]) != self.key(id)
                });
                if ended {
                    return false;
                }
            }
        }

        total == self.len()
    }
}

/// Walks the node handles of one bucket chain.
struct Chain<'a, V> {
    nodes: &'a Arena<HashNode<V>>,
    cur: Option<NodeId>,
}

impl<'a, V> Chain<'a, V> {
    fn new(nodes: &'a Arena<HashNode<V>>, head: Option<NodeId>) -> Chain<'a, V> {
        Chain {
            nodes,
            cur: head,
        }
    }
}

impl<V> Iterator for Chain<'_, V> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cur?;
        self.cur = self.nodes[id].next;
        Some(id)
    }
}

fn empty_buckets(count: usize) -> Result<Vector<Option<NodeId>>, TryReserveError> {
    let mut buckets = Vector::new();
    buckets.try_reserve(count)?;
    buckets.resize(count, None);
    Ok(buckets)
}

impl<V, X, B> IntoIterator for HashTable<V, X, B> {
    type Item = V;

    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.chained_ids();
        let mut nodes = self.nodes;
        IntoIter::new(order.into_iter().map(|id| nodes.remove(id).value).collect())
    }
}

impl<'a, V, X, B> IntoIterator for &'a HashTable<V, X, B> {
    type Item = &'a V;

    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, X: KeyOf<V>, B: BuildHasher> Extend<V> for HashTable<V, X, B>
where
    X::Key: Hash + Eq,
{
    /// Extends the table with every value from `iter`, keeping duplicates.
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.resize(self.len().saturating_add(iter.size_hint().0));
        for value in iter {
            self.insert_equal(value);
        }
    }
}

impl<V, X, B: Default> Default for HashTable<V, X, B> {
    fn default() -> Self {
        HashTable::with_buckets_and_hasher(DEFAULT_BUCKET_HINT, B::default())
    }
}

impl<V: Clone, X, B: Clone> Clone for HashTable<V, X, B> {
    fn clone(&self) -> Self {
        HashTable {
            buckets: self.buckets.clone(),
            nodes: self.nodes.clone(),
            hasher: self.hasher.clone(),
            _key: PhantomData,
        }
    }
}

impl<V: Debug, X, B> Debug for HashTable<V, X, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("contents", &DebugIter(self.iter()))
            .field("len", &self.len())
            .field("buckets", &self.bucket_count())
            .finish()
    }
}
