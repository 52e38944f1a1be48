use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;

use super::{Compare, IntoIter, Iter, IterMut, Natural};
use crate::alloc::{Arena, NodeId};
use crate::collections::contiguous::Vector;
use crate::collections::traits::KeyOf;
use crate::util::error::TryReserveError;
use crate::util::fmt::DebugIter;
use crate::util::result::ResultExtension;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    const fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone)]
pub(crate) struct RbNode<V> {
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<V> RbNode<V> {
    const fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    const fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

pub(crate) fn minimum<V>(nodes: &Arena<RbNode<V>>, mut id: NodeId) -> NodeId {
    while let Some(left) = nodes[id].left {
        id = left;
    }
    id
}

pub(crate) fn maximum<V>(nodes: &Arena<RbNode<V>>, mut id: NodeId) -> NodeId {
    while let Some(right) = nodes[id].right {
        id = right;
    }
    id
}

/// The in-order successor of `id`, or `None` if `id` is the last node.
pub(crate) fn successor<V>(nodes: &Arena<RbNode<V>>, id: NodeId) -> Option<NodeId> {
    if let Some(right) = nodes[id].right {
        return Some(minimum(nodes, right));
    }

    let mut child = id;
    let mut parent = nodes[id].parent;
    while let Some(node) = parent {
        if nodes[node].right != Some(child) {
            break;
        }
        child = node;
        parent = nodes[node].parent;
    }
    parent
}

/// The in-order predecessor of `id`, or `None` if `id` is the first node.
pub(crate) fn predecessor<V>(nodes: &Arena<RbNode<V>>, id: NodeId) -> Option<NodeId> {
    if let Some(left) = nodes[id].left {
        return Some(maximum(nodes, left));
    }

    let mut child = id;
    let mut parent = nodes[id].parent;
    while let Some(node) = parent {
        if nodes[node].left != Some(child) {
            break;
        }
        child = node;
        parent = nodes[node].parent;
    }
    parent
}

/// A red-black tree storing values of type `V`, ordered by the key that `X` extracts from each
/// value under the ordering `C`.
///
/// This is the engine behind [`TreeMap`](super::TreeMap), [`TreeMultiMap`](super::TreeMultiMap),
/// [`TreeSet`](super::TreeSet) and [`TreeMultiSet`](super::TreeMultiSet). Nodes live in an
/// [`Arena`] and are addressed by [`NodeId`]. A position is an `Option<NodeId>`, where `None`
/// stands for the end of the tree (one past the last node). Handles stay valid until the node they
/// refer to is erased, no matter what happens to the rest of the tree.
///
/// The tree caches its first and last nodes, so [`first`](RbTree::first), [`last`](RbTree::last)
/// and inserting at either end with a hint are constant time.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `insert_unique`, `insert_equal` | `O(log n)` |
/// | `insert_*_hint` | `O(1)`* |
/// | `find`, `lower_bound`, `upper_bound` | `O(log n)` |
/// | `erase_at` | `O(log n)` |
/// | `count`, `erase_key` | `O(log n + k)` |
/// | `first`, `last` | `O(1)` |
/// | `next`, `prev` | `O(1)`** |
///
/// \* Amortized, when the hint is correct. Otherwise `O(log n)`.
///
/// \*\* Amortized over a full traversal, `O(log n)` for a single step.
pub struct RbTree<V, X, C = Natural> {
    pub(crate) nodes: Arena<RbNode<V>>,
    pub(crate) root: Option<NodeId>,
    pub(crate) leftmost: Option<NodeId>,
    pub(crate) rightmost: Option<NodeId>,
    pub(crate) compare: C,
    pub(crate) _key: PhantomData<fn() -> X>,
}

impl<V, X> RbTree<V, X, Natural> {
    /// Creates an empty tree ordered by the natural ordering of its keys.
    pub fn new() -> RbTree<V, X, Natural> {
        RbTree::with_compare(Natural)
    }
}

impl<V, X, C> RbTree<V, X, C> {
    /// Creates an empty tree ordered by `compare`.
    pub fn with_compare(compare: C) -> RbTree<V, X, C> {
        RbTree {
            nodes: Arena::new(),
            root: None,
            leftmost: None,
            rightmost: None,
            compare,
            _key: PhantomData,
        }
    }

    /// Returns the number of values in the tree.
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no values.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the ordering used by the tree.
    pub const fn compare(&self) -> &C {
        &self.compare
    }

    /// Returns the position of the smallest value, or `None` if the tree is empty.
    pub const fn first(&self) -> Option<NodeId> {
        self.leftmost
    }

    /// Returns the position of the largest value, or `None` if the tree is empty.
    pub const fn last(&self) -> Option<NodeId> {
        self.rightmost
    }

    /// Returns the value stored at `id`.
    ///
    /// # Panics
    /// Panics if `id` doesn't refer to a node in this tree.
    pub fn value(&self, id: NodeId) -> &V {
        &self.nodes[id].value
    }

    /// Returns the value stored at `id`, mutably. Changing the key of the value is a logic error.
    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.nodes[id].value
    }

    /// Returns the position after `id`, which is `None` if `id` is the last node.
    ///
    /// # Panics
    /// Panics if `id` doesn't refer to a node in this tree.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        successor(&self.nodes, id)
    }

    /// Returns the position before `pos`. Stepping back from the end gives the last node, while
    /// stepping back from the first node gives `None`.
    ///
    /// # Panics
    /// Panics if `pos` refers to a node that isn't in this tree.
    pub fn prev(&self, pos: Option<NodeId>) -> Option<NodeId> {
        match pos {
            None => self.rightmost,
            Some(id) => predecessor(&self.nodes, id),
        }
    }

    /// Returns an iterator over every value in order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.nodes, self.leftmost, self.rightmost, self.len())
    }

    /// Returns an iterator over the values from `first` (inclusive) up to `last` (exclusive). The
    /// length of the range is counted when the iterator is created.
    ///
    /// # Panics
    /// Panics if `last` isn't reachable from `first`.
    pub fn range(&self, first: Option<NodeId>, last: Option<NodeId>) -> Iter<'_, V> {
        let mut len = 0;
        let mut cur = first;
        while cur != last {
            let Some(id) = cur else {
                panic!("Range end {:?} is not after its start!", last);
            };
            cur = self.next(id);
            len += 1;
        }

        let back = if len == 0 { None } else { self.prev(last) };
        Iter::new(&self.nodes, first, back, len)
    }

    /// Returns an iterator over every value in order, as mutable references. Changing the key of a
    /// value is a logic error.
    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, V> {
        let order = self.in_order();
        let values = self.nodes.ordered_mut(&order).into_iter().map(|node| &mut node.value);
        IterMut::new(values.collect())
    }

    /// Removes and returns the value at `id`. Handles to every other node remain valid.
    ///
    /// # Panics
    /// Panics if `id` doesn't refer to a node in this tree.
    pub fn erase_at(&mut self, id: NodeId) -> V {
        let RbNode { left, right, parent, color, .. } = self.nodes[id];
        let (child, child_parent, removed_color);

        match (left, right) {
            (Some(left), Some(right)) => {
                // Splice the successor into the erased node's place, rather than moving values.
                let next = minimum(&self.nodes, right);
                child = self.nodes[next].right;

                self.nodes[left].parent = Some(next);
                self.nodes[next].left = Some(left);

                if next == right {
                    child_parent = Some(next);
                } else {
                    child_parent = self.nodes[next].parent;
                    if let Some(child) = child {
                        self.nodes[child].parent = child_parent;
                    }
                    if let Some(next_parent) = child_parent {
                        self.nodes[next_parent].left = child;
                    }
                    self.nodes[next].right = Some(right);
                    self.nodes[right].parent = Some(next);
                }

                self.replace_child(parent, id, Some(next));
                self.nodes[next].parent = parent;
                removed_color = mem::replace(&mut self.nodes[next].color, color);
            },
            _ => {
                child = left.or(right);
                child_parent = parent;
                if let Some(child) = child {
                    self.nodes[child].parent = parent;
                }
                self.replace_child(parent, id, child);

                if self.leftmost == Some(id) {
                    self.leftmost = match (right, child) {
                        (Some(_), Some(child)) => Some(minimum(&self.nodes, child)),
                        _ => parent,
                    };
                }
                if self.rightmost == Some(id) {
                    self.rightmost = match (left, child) {
                        (Some(_), Some(child)) => Some(maximum(&self.nodes, child)),
                        _ => parent,
                    };
                }
                removed_color = color;
            },
        }

        if removed_color == Color::Black {
            self.erase_fixup(child, child_parent);
        }

        self.nodes.remove(id).value
    }

    /// Erases every value from `first` (inclusive) up to `last` (exclusive), returning the number
    /// of values erased.
    ///
    /// # Panics
    /// Panics if `last` isn't reachable from `first`.
    pub fn erase_range(&mut self, first: Option<NodeId>, last: Option<NodeId>) -> usize {
        if first == self.leftmost && last.is_none() {
            let count = self.len();
            self.clear();
            return count;
        }

        let mut count = 0;
        let mut cur = first;
        while cur != last {
            let Some(id) = cur else {
                panic!("Range end {:?} is not after its start!", last);
            };
            cur = self.next(id);
            self.erase_at(id);
            count += 1;
        }
        count
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.leftmost = None;
        self.rightmost = None;
    }

    /// Swaps the contents of two trees, including their orderings.
    pub fn swap_with(&mut self, other: &mut RbTree<V, X, C>) {
        mem::swap(self, other);
    }

    /// Collects the handle of every node in order.
    pub(crate) fn in_order(&self) -> Vector<NodeId> {
        let mut order = Vector::with_cap(self.len());
        let mut cur = self.leftmost;
        while let Some(id) = cur {
            order.push(id);
            cur = self.next(id);
        }
        order
    }

    /// Stores `value` in a new red node and links it as the `side` child of `parent`, then
    /// rebalances. Nothing is linked if the node can't be stored.
    fn link(&mut self, value: V, parent: Option<NodeId>, side: Side) -> Result<NodeId, TryReserveError> {
        let id = self.nodes.try_insert(RbNode {
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        })?;

        match parent {
            None => {
                self.root = Some(id);
                self.leftmost = Some(id);
                self.rightmost = Some(id);
            },
            Some(parent) => {
                *self.nodes[parent].child_mut(side) = Some(id);

                if side == Side::Left && self.leftmost == Some(parent) {
                    self.leftmost = Some(id);
                } else if side == Side::Right && self.rightmost == Some(parent) {
                    self.rightmost = Some(id);
                }
            },
        }

        self.insert_fixup(id);
        Ok(id)
    }

    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.nodes[id].color == Color::Red)
    }

    fn paint_black(&mut self, id: Option<NodeId>) {
        if let Some(id) = id {
            self.nodes[id].color = Color::Black;
        }
    }

    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) if self.nodes[parent].left == Some(old) => self.nodes[parent].left = new,
            Some(parent) => self.nodes[parent].right = new,
        }
    }

    /// Rotates the subtree rooted at `id` towards `side`, lifting its child on the other side into
    /// its place.
    fn rotate(&mut self, id: NodeId, side: Side) {
        let Some(lifted) = self.nodes[id].child(side.flip()) else {
            unreachable!("rotation without a child to lift");
        };

        let inner = self.nodes[lifted].child(side);
        *self.nodes[id].child_mut(side.flip()) = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(id);
        }

        let parent = self.nodes[id].parent;
        self.nodes[lifted].parent = parent;
        self.replace_child(parent, id, Some(lifted));

        *self.nodes[lifted].child_mut(side) = Some(id);
        self.nodes[id].parent = Some(lifted);
    }

    fn insert_fixup(&mut self, mut id: NodeId) {
        loop {
            let Some(parent) = self.nodes[id].parent else {
                break;
            };
            if self.nodes[parent].color == Color::Black {
                break;
            }
            // A red node is never the root, so it has a parent.
            let Some(grand) = self.nodes[parent].parent else {
                break;
            };

            let side = if self.nodes[grand].left == Some(parent) { Side::Left } else { Side::Right };
            let uncle = self.nodes[grand].child(side.flip());

            if self.is_red(uncle) {
                self.nodes[parent].color = Color::Black;
                self.paint_black(uncle);
                self.nodes[grand].color = Color::Red;
                id = grand;
                continue;
            }

            let mut parent = parent;
            if self.nodes[parent].child(side.flip()) == Some(id) {
                self.rotate(parent, side);
                parent = id;
            }
            self.nodes[parent].color = Color::Black;
            self.nodes[grand].color = Color::Red;
            self.rotate(grand, side.flip());
            break;
        }

        self.paint_black(self.root);
    }

    /// Restores the black height after a black node was unlinked, leaving `child` (possibly
    /// empty) one black node short under `parent`.
    fn erase_fixup(&mut self, mut child: Option<NodeId>, mut parent: Option<NodeId>) {
        while child != self.root && !self.is_red(child) {
            let Some(above) = parent else {
                break;
            };

            let side = if self.nodes[above].left == child { Side::Left } else { Side::Right };
            // The short side is missing a black node, so its sibling can't be empty.
            let Some(mut sibling) = self.nodes[above].child(side.flip()) else {
                break;
            };

            if self.nodes[sibling].color == Color::Red {
                self.nodes[sibling].color = Color::Black;
                self.nodes[above].color = Color::Red;
                self.rotate(above, side);
                let Some(next) = self.nodes[above].child(side.flip()) else {
                    break;
                };
                sibling = next;
            }

            let near = self.nodes[sibling].child(side);
            let far = self.nodes[sibling].child(side.flip());

            if !self.is_red(near) && !self.is_red(far) {
                self.nodes[sibling].color = Color::Red;
                child = Some(above);
                parent = self.nodes[above].parent;
                continue;
            }

            if !self.is_red(far) {
                self.paint_black(near);
                self.nodes[sibling].color = Color::Red;
                self.rotate(sibling, side.flip());
                let Some(next) = self.nodes[above].child(side.flip()) else {
                    break;
                };
                sibling = next;
            }

            self.nodes[sibling].color = self.nodes[above].color;
            self.nodes[above].color = Color::Black;
            let far = self.nodes[sibling].child(side.flip());
            self.paint_black(far);
            self.rotate(above, side);
            break;
        }

        self.paint_black(child);
        self.paint_black(self.root);
    }

    /// Counts the black nodes on every path below `id`, including the empty leaf. Returns `None`
    /// if the paths disagree, a red node has a red child or a child doesn't point back at `id`.
    fn black_height(&self, id: Option<NodeId>) -> Option<usize> {
        let Some(id) = id else {
            return Some(1);
        };
        let node = &self.nodes[id];

        for child in [node.left, node.right].into_iter().flatten() {
            if self.nodes[child].parent != Some(id) {
                return None;
            }
            if node.color == Color::Red && self.nodes[child].color == Color::Red {
                return None;
            }
        }

        let left = self.black_height(node.left)?;
        let right = self.black_height(node.right)?;
        if left != right {
            return None;
        }

        Some(left + usize::from(node.color == Color::Black))
    }
}

impl<V, X: KeyOf<V>, C: Compare<X::Key>> RbTree<V, X, C> {
    fn key(&self, id: NodeId) -> &X::Key {
        X::key_of(&self.nodes[id].value)
    }

    fn less(&self, a: &X::Key, b: &X::Key) -> bool {
        <C as Compare<X::Key>>::less(&self.compare, a, b)
    }

    fn less_borrowed<Q: ?Sized>(&self, a: &Q, b: &Q) -> bool
    where
        C: Compare<Q>,
    {
        <C as Compare<Q>>::less(&self.compare, a, b)
    }

    /// Walks down to where `key` would be linked, returning the parent and the side to link on.
    /// Keys equal to a node's key go to its right.
    fn descend(&self, key: &X::Key) -> (Option<NodeId>, Side) {
        let mut parent = None;
        let mut side = Side::Left;
        let mut cur = self.root;

        while let Some(id) = cur {
            parent = Some(id);
            side = if self.less(key, self.key(id)) { Side::Left } else { Side::Right };
            cur = self.nodes[id].child(side);
        }

        (parent, side)
    }

    /// Inserts `value` unless an equal key is already present. Returns the position of the new
    /// value and true, or the position of the existing equal value and false, in which case
    /// `value` is dropped.
    pub fn try_insert_unique(&mut self, value: V) -> Result<(NodeId, bool), TryReserveError> {
        let (parent, side) = self.descend(X::key_of(&value));

        // Only the in-order predecessor of the insertion point can hold an equal key.
        let before = match (parent, side) {
            (None, _) => None,
            (Some(parent), Side::Right) => Some(parent),
            (Some(parent), Side::Left) => predecessor(&self.nodes, parent),
        };

        if let Some(before) = before {
            if !self.less(self.key(before), X::key_of(&value)) {
                return Ok((before, false));
            }
        }

        self.link(value, parent, side).map(|id| (id, true))
    }

    /// Inserts `value` unless an equal key is already present. See
    /// [`try_insert_unique`](RbTree::try_insert_unique).
    ///
    /// # Panics
    /// Panics if the node storage can't grow.
    pub fn insert_unique(&mut self, value: V) -> (NodeId, bool) {
        self.try_insert_unique(value).throw()
    }

    /// Inserts `value`, placing it after any values with an equal key.
    pub fn try_insert_equal(&mut self, value: V) -> Result<NodeId, TryReserveError> {
        let (parent, side) = self.descend(X::key_of(&value));
        self.link(value, parent, side)
    }

    /// Inserts `value`, placing it after any values with an equal key.
    ///
    /// # Panics
    /// Panics if the node storage can't grow.
    pub fn insert_equal(&mut self, value: V) -> NodeId {
        self.try_insert_equal(value).throw()
    }

    /// Inserts `value` unless an equal key is present, using `hint` as a guess for the position
    /// that the value should be placed before. A correct hint skips the search entirely, while an
    /// incorrect one falls back to [`try_insert_unique`](RbTree::try_insert_unique). Returns the
    /// position of the new or existing value.
    pub fn try_insert_unique_hint(
        &mut self,
        hint: Option<NodeId>,
        value: V,
    ) -> Result<NodeId, TryReserveError> {
        let key = X::key_of(&value);

        let place = match hint {
            None => match self.rightmost {
                Some(last) if self.less(self.key(last), key) => Some((last, Side::Right)),
                _ => None,
            },
            Some(pos) if Some(pos) == self.leftmost => {
                self.less(key, self.key(pos)).then_some((pos, Side::Left))
            },
            Some(pos) => match predecessor(&self.nodes, pos) {
                Some(before) if self.less(self.key(before), key) && self.less(key, self.key(pos)) => {
                    Some(self.between(before, pos))
                },
                _ => None,
            },
        };

        match place {
            Some((parent, side)) => self.link(value, Some(parent), side),
            None => self.try_insert_unique(value).map(|(id, _)| id),
        }
    }

    /// Inserts `value` unless an equal key is present, using `hint` as a guess for its position.
    ///
    /// # Panics
    /// Panics if the node storage can't grow.
    pub fn insert_unique_hint(&mut self, hint: Option<NodeId>, value: V) -> NodeId {
        self.try_insert_unique_hint(hint, value).throw()
    }

    /// Inserts `value`, using `hint` as a guess for the position that the value should be placed
    /// before. Equal keys are accepted on either side of the hint, so a correct hint may place the
    /// value before existing equal values.
    pub fn try_insert_equal_hint(
        &mut self,
        hint: Option<NodeId>,
        value: V,
    ) -> Result<NodeId, TryReserveError> {
        let key = X::key_of(&value);

        let place = match hint {
            None => match self.rightmost {
                Some(last) if !self.less(key, self.key(last)) => Some((last, Side::Right)),
                _ => None,
            },
            Some(pos) if Some(pos) == self.leftmost => {
                (!self.less(self.key(pos), key)).then_some((pos, Side::Left))
            },
            Some(pos) => match predecessor(&self.nodes, pos) {
                Some(before)
                    if !self.less(key, self.key(before)) && !self.less(self.key(pos), key) =>
                {
                    Some(self.between(before, pos))
                },
                _ => None,
            },
        };

        match place {
            Some((parent, side)) => self.link(value, Some(parent), side),
            None => self.try_insert_equal(value),
        }
    }

    /// Inserts `value`, using `hint` as a guess for its position.
    ///
    /// # Panics
    /// Panics if the node storage can't grow.
    pub fn insert_equal_hint(&mut self, hint: Option<NodeId>, value: V) -> NodeId {
        self.try_insert_equal_hint(hint, value).throw()
    }

    /// The free link between two adjacent nodes. Either `before` has no right child, or `after` is
    /// the leftmost node of that subtree and has no left child.
    fn between(&self, before: NodeId, after: NodeId) -> (NodeId, Side) {
        if self.nodes[before].right.is_none() {
            (before, Side::Right)
        } else {
            (after, Side::Left)
        }
    }

    /// Returns the position of the first value whose key is not less than `key`.
    pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> Option<NodeId>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
    {
        let mut result = None;
        let mut cur = self.root;

        while let Some(id) = cur {
            let node_key: &Q = self.key(id).borrow();
            if self.less_borrowed(node_key, key) {
                cur = self.nodes[id].right;
            } else {
                result = Some(id);
                cur = self.nodes[id].left;
            }
        }

        result
    }

    /// Returns the position of the first value whose key is greater than `key`.
    pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> Option<NodeId>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
    {
        let mut result = None;
        let mut cur = self.root;

        while let Some(id) = cur {
            let node_key: &Q = self.key(id).borrow();
            if self.less_borrowed(key, node_key) {
                result = Some(id);
                cur = self.nodes[id].left;
            } else {
                cur = self.nodes[id].right;
            }
        }

        result
    }

    /// Returns the bounds of the run of values with keys equal to `key`, as a pair of
    /// [`lower_bound`](RbTree::lower_bound) and [`upper_bound`](RbTree::upper_bound).
    pub fn equal_range<Q: ?Sized>(&self, key: &Q) -> (Option<NodeId>, Option<NodeId>)
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns the position of a value with a key equal to `key`. With duplicates, this is the
    /// first of them.
    pub fn find<Q: ?Sized>(&self, key: &Q) -> Option<NodeId>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
    {
        let pos = self.lower_bound(key)?;
        let node_key: &Q = self.key(pos).borrow();
        (!self.less_borrowed(key, node_key)).then_some(pos)
    }

    /// Returns the number of values with a key equal to `key`.
    pub fn count<Q: ?Sized>(&self, key: &Q) -> usize
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
    {
        let (first, last) = self.equal_range(key);
        self.range(first, last).len()
    }

    /// Erases every value with a key equal to `key`, returning the number erased.
    pub fn erase_key<Q: ?Sized>(&mut self, key: &Q) -> usize
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
    {
        let (first, last) = self.equal_range(key);
        self.erase_range(first, last)
    }

    /// Checks every red-black invariant, returning the black height of the tree (counting the
    /// empty leaves) or `None` if any invariant is broken.
    ///
    /// The root must be black, no red node may have a red child, every path must pass through the
    /// same number of black nodes, the cached first and last positions must be correct, and an
    /// in-order walk must visit [`len`](RbTree::len) values in non-decreasing order.
    pub fn verify(&self) -> Option<usize> {
        if self.is_red(self.root) {
            return None;
        }
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return None;
            }
        }

        let height = self.black_height(self.root)?;

        if self.leftmost != self.root.map(|root| minimum(&self.nodes, root))
            || self.rightmost != self.root.map(|root| maximum(&self.nodes, root))
        {
            return None;
        }

        let mut count = 0;
        let mut previous = None;
        let mut cur = self.leftmost;
        while let Some(id) = cur {
            if let Some(previous) = previous {
                if self.less(self.key(id), self.key(previous)) {
                    return None;
                }
            }
            count += 1;
            if count > self.len() {
                return None;
            }
            previous = Some(id);
            cur = self.next(id);
        }

        (count == self.len()).then_some(height)
    }
}

impl<V, X, C> IntoIterator for RbTree<V, X, C> {
    type Item = V;

    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.in_order();
        let mut nodes = self.nodes;
        IntoIter::new(order.into_iter().map(|id| nodes.remove(id).value).collect())
    }
}

impl<'a, V, X, C> IntoIterator for &'a RbTree<V, X, C> {
    type Item = &'a V;

    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, X: KeyOf<V>, C: Compare<X::Key>> Extend<V> for RbTree<V, X, C> {
    /// Extends the tree with every value from `iter`, keeping duplicates.
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.insert_equal_hint(None, value);
        }
    }
}

impl<V, X, C: Default> Default for RbTree<V, X, C> {
    fn default() -> Self {
        RbTree::with_compare(C::default())
    }
}

impl<V: Clone, X, C: Clone> Clone for RbTree<V, X, C> {
    fn clone(&self) -> Self {
        RbTree {
            nodes: self.nodes.clone(),
            root: self.root,
            leftmost: self.leftmost,
            rightmost: self.rightmost,
            compare: self.compare.clone(),
            _key: PhantomData,
        }
    }
}

impl<V: Debug, X, C> Debug for RbTree<V, X, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RbTree")
            .field("contents", &DebugIter(self.iter()))
            .field("len", &self.len())
            .finish()
    }
}
