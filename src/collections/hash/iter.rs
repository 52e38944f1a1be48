use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;

use super::hash_table::HashNode;
use crate::alloc::{Arena, NodeId};
use crate::collections::contiguous::vector::IntoIter as VecIntoIter;
use crate::collections::contiguous::Vector;
use crate::util::fmt::DebugIter;

/// An iterator over references to the values of a [`HashTable`](super::HashTable), bucket by
/// bucket and then along each chain.
pub struct Iter<'a, V> {
    nodes: &'a Arena<HashNode<V>>,
    buckets: &'a [Option<NodeId>],
    cur: Option<NodeId>,
    len: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(
        nodes: &'a Arena<HashNode<V>>,
        buckets: &'a [Option<NodeId>],
        len: usize,
    ) -> Iter<'a, V> {
        Iter {
            nodes,
            buckets,
            cur: None,
            len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cur.is_none() {
            let (head, rest) = self.buckets.split_first()?;
            self.cur = *head;
            self.buckets = rest;
        }

        let node = &self.nodes[self.cur?];
        self.cur = node.next;
        self.len -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            buckets: self.buckets,
            cur: self.cur,
            len: self.len,
        }
    }
}

impl<V: Debug> Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&DebugIter(self.clone())).finish()
    }
}

/// An iterator over a run of values with equal keys, as returned by
/// [`HashTable::equal_range`](super::HashTable::equal_range).
pub struct EqualRange<'a, V> {
    nodes: &'a Arena<HashNode<V>>,
    cur: Option<NodeId>,
    len: usize,
}

impl<'a, V> EqualRange<'a, V> {
    pub(crate) fn new(nodes: &'a Arena<HashNode<V>>, first: Option<NodeId>, len: usize) -> EqualRange<'a, V> {
        EqualRange {
            nodes,
            cur: first,
            len,
        }
    }
}

impl<'a, V> Iterator for EqualRange<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let node = &self.nodes[self.cur?];
        self.cur = node.next;
        self.len -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<V> FusedIterator for EqualRange<'_, V> {}

impl<V> ExactSizeIterator for EqualRange<'_, V> {}

impl<V> Clone for EqualRange<'_, V> {
    fn clone(&self) -> Self {
        EqualRange {
            nodes: self.nodes,
            cur: self.cur,
            len: self.len,
        }
    }
}

impl<V: Debug> Debug for EqualRange<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EqualRange").field(&DebugIter(self.clone())).finish()
    }
}

/// An iterator over mutable references to the values of a [`HashTable`](super::HashTable), in the
/// same order as [`Iter`].
pub struct IterMut<'a, V> {
    inner: VecIntoIter<&'a mut V>,
}

impl<'a, V> IterMut<'a, V> {
    pub(crate) fn new(ordered: Vector<&'a mut V>) -> IterMut<'a, V> {
        IterMut {
            inner: ordered.into_iter(),
        }
    }
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> FusedIterator for IterMut<'_, V> {}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

/// An owning iterator over the values of a [`HashTable`](super::HashTable).
pub struct IntoIter<V> {
    inner: VecIntoIter<V>,
}

impl<V> IntoIter<V> {
    pub(crate) fn new(ordered: Vector<V>) -> IntoIter<V> {
        IntoIter {
            inner: ordered.into_iter(),
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> FusedIterator for IntoIter<V> {}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V: Debug> Debug for IntoIter<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

/// An iterator over the keys of a hash backed map.
pub struct Keys<'a, K, V>(pub(crate) Iter<'a, (K, V)>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| &e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of a hash backed map.
pub struct Values<'a, K, V>(pub(crate) Iter<'a, (K, V)>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| &e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// An iterator over mutable references to the values of a hash backed map.
pub struct ValuesMut<'a, K, V>(pub(crate) IterMut<'a, (K, V)>);

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| &mut e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

/// An owning iterator over the keys of a hash backed map.
pub struct IntoKeys<K, V>(pub(crate) IntoIter<(K, V)>);

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}

/// An owning iterator over the values of a hash backed map.
pub struct IntoValues<K, V>(pub(crate) IntoIter<(K, V)>);

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}
