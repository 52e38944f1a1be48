use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;

use super::rb_tree::{RbNode, predecessor, successor};
use crate::alloc::{Arena, NodeId};
use crate::collections::contiguous::vector::IntoIter as VecIntoIter;
use crate::collections::contiguous::Vector;
use crate::util::fmt::DebugIter;

/// An in-order iterator over references to the values of an [`RbTree`](super::RbTree), or a range
/// of them.
pub struct Iter<'a, V> {
    nodes: &'a Arena<RbNode<V>>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    len: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(
        nodes: &'a Arena<RbNode<V>>,
        front: Option<NodeId>,
        back: Option<NodeId>,
        len: usize,
    ) -> Iter<'a, V> {
        Iter {
            nodes,
            front,
            back,
            len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let id = self.front?;
        self.front = successor(self.nodes, id);
        self.len -= 1;
        Some(&self.nodes[id].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let id = self.back?;
        self.back = predecessor(self.nodes, id);
        self.len -= 1;
        Some(&self.nodes[id].value)
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<V: Debug> Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&DebugIter(self.clone())).finish()
    }
}

/// An in-order iterator over mutable references to the values of an [`RbTree`](super::RbTree).
///
/// The references are gathered and sorted when the iterator is created, which takes `O(n)`.
pub struct IterMut<'a, V> {
    inner: VecIntoIter<&'a mut V>,
}

impl<'a, V> IterMut<'a, V> {
    pub(crate) fn new(sorted: Vector<&'a mut V>) -> IterMut<'a, V> {
        IterMut {
            inner: sorted.into_iter(),
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

impl<V> DoubleEndedIterator for IterMut<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> FusedIterator for IterMut<'_, V> {}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

/// An owning in-order iterator over the values of an [`RbTree`](super::RbTree).
pub struct IntoIter<V> {
    inner: VecIntoIter<V>,
}

impl<V> IntoIter<V> {
    pub(crate) fn new(sorted: Vector<V>) -> IntoIter<V> {
        IntoIter {
            inner: sorted.into_iter(),
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

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> FusedIterator for IntoIter<V> {}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V: Debug> Debug for IntoIter<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

/// An iterator over the keys of a tree backed map, in order.
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

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|e| &e.0)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of a tree backed map, in key order.
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

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|e| &e.1)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// An iterator over mutable references to the values of a tree backed map, in key order.
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

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|e| &mut e.1)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

/// An owning iterator over the keys of a tree backed map, in order.
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

/// An owning iterator over the values of a tree backed map, in key order.
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
