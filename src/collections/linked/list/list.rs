use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut, RangeBounds};

use super::{Iter, IterMut, Length, Link, NodeRef, ONE};
use crate::collections::linked::LIST_SORT_LEVELS;
#[doc(inline)]
pub use crate::util::error::{CapacityOverflow, IndexOutOfBounds};
use crate::util::fmt::DebugIter;
use crate::util::range;
use crate::util::result::ResultExtension;

/// A list with links in both directions.
///
/// Every element lives in its own node, so whole runs of elements can be moved between lists (or
/// within one) by relinking the nodes at either end of the run. [`splice`](List::splice),
/// [`merge`](List::merge) and [`sort`](List::sort) are all built out of that one primitive and
/// never move a value.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the List.
/// - `i`: The index of the item in question.
/// - `m`: The number of items being moved in from another list.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front/back` | `O(1)` |
/// | `push_front/back` | `O(1)` |
/// | `pop_front/back` | `O(1)` |
/// | `get` | `O(min(i, n-i))` |
/// | `insert` | `O(min(i, n-i))` |
/// | `remove` | `O(min(i, n-i))` |
/// | `append` | `O(1)` |
/// | `splice` | `O(min(i, n-i))` |
/// | `splice_range` | `O(min(i, n-i) + m)` |
/// | `merge` | `O(n + m)` |
/// | `sort` | `O(n log n)` |
/// | `contains` | `O(n)` |
///
/// The cost of positional operations is entirely in finding the position. Once found, the
/// relinking itself is `O(1)` no matter how many nodes are moved.
pub struct List<T> {
    pub(crate) state: ListState<T>,
    pub(crate) _phantom: PhantomData<T>,
}

pub(crate) enum ListState<T> {
    Empty,
    Full(Run<T>),
}

use ListState::*;

/// A non-empty chain of nodes, identified by its ends. A Run is either the entire contents of a
/// list, or a chain that has just been unlinked and is about to be linked somewhere else.
pub(crate) struct Run<T> {
    pub len: Length,
    pub head: NodeRef<T>,
    pub tail: NodeRef<T>,
}

impl<T> Run<T> {
    pub fn single(value: T) -> Run<T> {
        let node = NodeRef::alloc(value);
        Run {
            len: ONE,
            head: node,
            tail: node,
        }
    }
}

impl<T> Clone for Run<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Run<T> {}

impl<T> List<T> {
    /// Creates a new List with no elements.
    pub const fn new() -> List<T> {
        List {
            state: Empty,
            _phantom: PhantomData,
        }
    }

    /// Returns the length of the List.
    pub const fn len(&self) -> usize {
        match self.state {
            Empty => 0,
            Full(run) => run.len.get(),
        }
    }

    /// Returns true if the List contains no elements.
    pub const fn is_empty(&self) -> bool {
        matches!(self.state, Empty)
    }

    /// Returns a reference to the first element in the list, if it exists.
    pub fn front(&self) -> Option<&T> {
        self.head().map(NodeRef::value)
    }

    /// Returns a mutable reference to the first element in the list, if it exists.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head().map(NodeRef::value_mut)
    }

    /// Returns a reference to the last element in the list, if it exists.
    pub fn back(&self) -> Option<&T> {
        self.tail().map(NodeRef::value)
    }

    /// Returns a mutable reference to the last element in the list, if it exists.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.tail().map(NodeRef::value_mut)
    }

    /// Add the provided element to the front of the List.
    pub fn push_front(&mut self, value: T) {
        self.link_run(self.head(), Run::single(value));
    }

    /// Add the provided element to the back of the List.
    pub fn push_back(&mut self, value: T) {
        self.link_run(None, Run::single(value));
    }

    /// Removes the first element from the list and returns it, if the list isn't empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head()?;
        // SAFETY: The head is a single node in this list, and is destroyed straight after being
        // unlinked.
        Some(unsafe { self.unlink_run(head, head, 1).head.into_value() })
    }

    /// Removes the last element from the list and returns it, if the list isn't empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail()?;
        // SAFETY: As in pop_front.
        Some(unsafe { self.unlink_run(tail, tail, 1).head.into_value() })
    }

    /// Returns a reference to the element at the provided `index`, panicking on a failure.
    ///
    /// The same functionality can be achieved using the [`Index`] operator.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the List.
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    /// Returns a reference to the element at the provided `index`, returning an [`Err`] on a
    /// failure rather than panicking.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        Ok(self.checked_seek(index)?.value())
    }

    /// Returns a mutable reference to the element at the provided `index`, panicking on a failure.
    ///
    /// The same functionality can be achieved using the [`IndexMut`] operator.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the List.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    /// Returns a mutable reference to the element at the provided `index`, returning an [`Err`] on
    /// a failure rather than panicking.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        Ok(self.checked_seek(index)?.value_mut())
    }

    /// Inserts `value` so that it ends up at `index`. An index equal to the length appends.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Inserts `value` so that it ends up at `index`, returning an [`Err`] if `index > len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        let next = self.checked_link_at(index)?;
        self.link_run(next, Run::single(value));
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the List.
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes and returns the element at `index`, returning an [`Err`] if it is out of bounds.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        let node = self.checked_seek(index)?;
        // SAFETY: The node belongs to this list and is destroyed straight after being unlinked.
        Ok(unsafe { self.unlink_run(node, node, 1).head.into_value() })
    }

    /// Replaces the element at `index` with `new_value`, returning the old value.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the List.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.try_replace(index, new_value).throw()
    }

    /// Replaces the element at `index` with `new_value`, returning the old value or an [`Err`] if
    /// the index is out of bounds.
    pub fn try_replace(&mut self, index: usize, new_value: T) -> Result<T, IndexOutOfBounds> {
        Ok(mem::replace(self.checked_seek(index)?.value_mut(), new_value))
    }

    /// Moves every element of `other` onto the back of this list.
    pub fn append(&mut self, mut other: List<T>) {
        if let Full(run) = mem::replace(&mut other.state, Empty) {
            self.link_run(None, run);
        }
    }

    /// Drops every element in the List.
    pub fn clear(&mut self) {
        while let Some(value) = self.pop_front() {
            drop(value);
        }
    }

    /// Swaps the contents of two Lists without touching any nodes.
    pub fn swap_with(&mut self, other: &mut List<T>) {
        mem::swap(&mut self.state, &mut other.state);
    }

    /// Moves every element of `other` into this list, so that the first of them ends up at `at`.
    /// `other` is left empty.
    ///
    /// # Panics
    /// Panics if `at > len`.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::linked::List;
    /// let mut list: List<_> = [1, 4].into_iter().collect();
    /// let mut other: List<_> = [2, 3].into_iter().collect();
    /// list.splice(1, &mut other);
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
    /// assert!(other.is_empty());
    /// ```
    pub fn splice(&mut self, at: usize, other: &mut List<T>) {
        let next = self.checked_link_at(at).throw();
        if let Full(run) = mem::replace(&mut other.state, Empty) {
            self.link_run(next, run);
        }
    }

    /// Moves the element at `index` in `other` into this list at `at`.
    ///
    /// # Panics
    /// Panics if `at > len` or if `index` is out of bounds of `other`.
    pub fn splice_one(&mut self, at: usize, other: &mut List<T>, index: usize) {
        let next = self.checked_link_at(at).throw();
        let node = other.checked_seek(index).throw();
        // SAFETY: The node belongs to other, and is linked into self straight away.
        let run = unsafe { other.unlink_run(node, node, 1) };
        self.link_run(next, run);
    }

    /// Moves the elements of `other` in `range` into this list, so that the first of them ends
    /// up at `at`. Their relative order is kept.
    ///
    /// # Panics
    /// Panics if `at > len` or if `range` is out of bounds of `other`.
    pub fn splice_range<R: RangeBounds<usize>>(&mut self, at: usize, other: &mut List<T>, range: R) {
        let next = self.checked_link_at(at).throw();
        if let Some(run) = other.detach(range) {
            self.link_run(next, run);
        }
    }

    /// Moves the elements in `range` so that they sit before the element currently at `at`, or at
    /// the back if `at` is the length. Positions at either edge of the range leave the list as it
    /// is.
    ///
    /// # Panics
    /// Panics if `at > len`, if `range` is out of bounds, or if `at` lies strictly inside
    /// `range`.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::linked::List;
    /// let mut list: List<_> = (0..6).collect();
    /// list.transfer(4..6, 1);
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 4, 5, 1, 2, 3]);
    /// ```
    pub fn transfer<R: RangeBounds<usize>>(&mut self, range: R, at: usize) {
        let range = range::try_bounds(range, self.len()).throw();
        let next = self.checked_link_at(at).throw();

        if range.is_empty() || at == range.start || at == range.end {
            return;
        }
        assert!(
            !range.contains(&at),
            "Can't transfer {:?} to position {} inside itself!", range, at
        );

        if let Some(run) = self.detach(range) {
            self.link_run(next, run);
        }
    }

    /// Merges `other` into this list, comparing elements with `compare`. Both lists must already
    /// be sorted by `compare`. The merge is stable: of two equal elements, the one from this list
    /// comes first. `other` is left empty.
    pub fn merge_by<F>(&mut self, other: &mut List<T>, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut curr = self.head();

        while let Some(first) = other.head() {
            match curr {
                None => {
                    self.append(mem::take(other));
                    break;
                },
                Some(node) => {
                    if compare(first.value(), node.value()) == Ordering::Less {
                        // SAFETY: first is the head node of other, and is linked into self
                        // straight away.
                        let run = unsafe { other.unlink_run(first, first, 1) };
                        self.link_run(Some(node), run);
                    } else {
                        curr = node.next();
                    }
                },
            }
        }
    }

    /// Sorts the list with `compare`, keeping equal elements in their original order.
    ///
    /// This is a bottom-up merge sort: elements are moved one at a time into a carry list, which
    /// is merged into successively larger runs held at each of [`LIST_SORT_LEVELS`] levels. Only
    /// nodes are relinked, so no values are moved or cloned.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len() < 2 {
            return;
        }

        let mut carry = List::new();
        let mut levels: [List<T>; LIST_SORT_LEVELS] = std::array::from_fn(|_| List::new());
        let mut filled = 0;

        while let Some(head) = self.head() {
            // SAFETY: head is a node of self, and is linked into carry straight away.
            let run = unsafe { self.unlink_run(head, head, 1) };
            carry.link_run(None, run);

            let mut level = 0;
            while level < filled && !levels[level].is_empty() {
                // The run already at this level holds earlier elements, so it goes first.
                levels[level].merge_by(&mut carry, &mut compare);
                carry.swap_with(&mut levels[level]);
                level += 1;
            }

            carry.swap_with(&mut levels[level]);
            if level == filled {
                filled += 1;
            }
        }

        for level in 1..filled {
            let (lower, upper) = levels.split_at_mut(level);
            upper[0].merge_by(&mut lower[level - 1], &mut compare);
        }
        self.swap_with(&mut levels[filled - 1]);
    }

    /// Reverses the order of the list in place.
    pub fn reverse(&mut self) {
        if let Full(run) = &mut self.state {
            let mut curr = Some(run.head);
            while let Some(node) = curr {
                curr = node.next();
                node.flip();
            }
            mem::swap(&mut run.head, &mut run.tail);
        }
    }

    /// Keeps only the elements for which `keep` returns true.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        let mut curr = self.head();
        while let Some(node) = curr {
            curr = node.next();
            if !keep(node.value()) {
                // SAFETY: node belongs to this list and is destroyed straight after being
                // unlinked. curr was read beforehand.
                drop(unsafe { self.unlink_run(node, node, 1).head.into_value() });
            }
        }
    }

    /// Removes every element that `same_bucket` considers equal to the element before it, so
    /// that only the first of each consecutive group remains.
    pub fn dedup_by<F: FnMut(&T, &T) -> bool>(&mut self, mut same_bucket: F) {
        let Some(mut kept) = self.head() else {
            return;
        };

        let mut curr = kept.next();
        while let Some(node) = curr {
            curr = node.next();
            if same_bucket(node.value(), kept.value()) {
                // SAFETY: As in retain.
                drop(unsafe { self.unlink_run(node, node, 1).head.into_value() });
            } else {
                kept = node;
            }
        }
    }

    /// Returns an iterator over mutable references to each element, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }

    /// Returns an iterator over references to each element, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }
}

impl<T: Ord> List<T> {
    /// Merges the sorted `other` into this sorted list. See [`List::merge_by`].
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::linked::List;
    /// let mut a: List<_> = [1, 3, 5].into_iter().collect();
    /// let mut b: List<_> = [2, 4, 6].into_iter().collect();
    /// a.merge(&mut b);
    /// assert_eq!(a.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
    /// assert!(b.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut List<T>) {
        self.merge_by(other, Ord::cmp);
    }

    /// Sorts the list in ascending order. See [`List::sort_by`].
    pub fn sort(&mut self) {
        self.sort_by(Ord::cmp);
    }
}

impl<T: PartialEq> List<T> {
    /// Returns the index of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|element| element == item)
    }

    /// Returns true if any element is equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|element| element == item)
    }

    /// Removes every element equal to `item`, returning how many were removed.
    pub fn remove_value(&mut self, item: &T) -> usize {
        let len = self.len();
        self.retain(|element| element != item);
        len - self.len()
    }

    /// Removes consecutive repeated elements.
    pub fn dedup(&mut self) {
        self.dedup_by(|a, b| a == b);
    }
}

impl<T> List<T> {
    pub(crate) const fn head(&self) -> Link<T> {
        match self.state {
            Empty => None,
            Full(run) => Some(run.head),
        }
    }

    pub(crate) const fn tail(&self) -> Link<T> {
        match self.state {
            Empty => None,
            Full(run) => Some(run.tail),
        }
    }

    /// Finds the node at `index`, walking from whichever end is closer.
    pub(crate) fn checked_seek(&self, index: usize) -> Result<NodeRef<T>, IndexOutOfBounds> {
        let Full(run) = self.state else {
            return Err(IndexOutOfBounds { index, len: 0 });
        };

        let len = run.len.get();
        if index >= len {
            return Err(IndexOutOfBounds { index, len });
        }

        Ok(if index < len / 2 {
            seek_fwd(run.head, index)
        } else {
            seek_bwd(run.tail, len - 1 - index)
        })
    }

    /// Finds the node that an element inserted at `index` should be linked before, which is
    /// `None` for the back of the list.
    pub(crate) fn checked_link_at(&self, index: usize) -> Result<Link<T>, IndexOutOfBounds> {
        match index == self.len() {
            true => Ok(None),
            false => self.checked_seek(index).map(Some),
        }
    }

    /// Unlinks the elements in `range`, returning them as a run unless the range is empty.
    fn detach<R: RangeBounds<usize>>(&mut self, range: R) -> Option<Run<T>> {
        let range = range::try_bounds(range, self.len()).throw();
        let count = range.len();
        if count == 0 {
            return None;
        }

        let first = self.checked_seek(range.start).throw();
        let last = seek_fwd(first, count - 1);
        // SAFETY: first..=last is a chain of count nodes in this list.
        Some(unsafe { self.unlink_run(first, last, count) })
    }

    /// Unlinks the chain of nodes `first..=last` and returns it as a standalone run.
    ///
    /// # Safety
    /// `first..=last` must be a chain of exactly `count` nodes belonging to this list, with
    /// `count > 0`. The returned run must be linked into a list or destroyed.
    pub(crate) unsafe fn unlink_run(
        &mut self,
        first: NodeRef<T>,
        last: NodeRef<T>,
        count: usize,
    ) -> Run<T> {
        let Full(run) = &mut self.state else {
            unreachable!("unlinking nodes from an empty List");
        };

        let before = first.prev();
        let after = last.next();

        match run.len.checked_sub(count) {
            None => self.state = Empty,
            Some(new_len) => {
                run.len = new_len;
                match before {
                    Some(node) => node.set_next(after),
                    // SAFETY: Some nodes remain, so if none come before the chain, some follow it.
                    None => run.head = unsafe { after.unwrap_unchecked() },
                }
                match after {
                    Some(node) => node.set_prev(before),
                    // SAFETY: As above, mirrored.
                    None => run.tail = unsafe { before.unwrap_unchecked() },
                }
            },
        }

        first.set_prev(None);
        last.set_next(None);

        Run {
            // SAFETY: The caller guarantees that count is non-zero.
            len: unsafe { Length::new(count).unwrap_unchecked() },
            head: first,
            tail: last,
        }
    }

    /// Links a standalone run in before `next`, or at the back if `next` is `None`.
    ///
    /// # Panics
    /// Panics if the combined length would overflow.
    pub(crate) fn link_run(&mut self, next: Link<T>, new: Run<T>) {
        match &mut self.state {
            Empty => self.state = Full(new),
            Full(run) => {
                run.len = run.len.checked_add(new.len.get()).ok_or(CapacityOverflow).throw();

                let prev = match next {
                    Some(node) => node.prev(),
                    None => Some(run.tail),
                };

                new.head.set_prev(prev);
                new.tail.set_next(next);

                match prev {
                    Some(node) => node.set_next(Some(new.head)),
                    None => run.head = new.head,
                }
                match next {
                    Some(node) => node.set_prev(Some(new.tail)),
                    None => run.tail = new.tail,
                }
            },
        }
    }

    #[cfg(test)]
    #[allow(clippy::unwrap_used)]
    pub(crate) fn verify_links(&self) {
        let (Full(Run { head, tail, len }), count) = (self.state, self.iter().count()) else {
            return;
        };

        assert!(head.prev().is_none());
        assert!(tail.next().is_none());
        assert_eq!(len.get(), count);

        let mut curr = head;
        while let Some(next) = curr.next() {
            // UNWRAP: This needs to panic if prev is None.
            assert!(next.prev().unwrap() == curr);
            curr = next;
        }
        assert!(tail == curr);
    }
}

fn seek_fwd<T>(mut node: NodeRef<T>, count: usize) -> NodeRef<T> {
    for _ in 0..count {
        node = match node.next() {
            Some(next) => next,
            None => unreachable!("seeking past the end of a List"),
        };
    }
    node
}

fn seek_bwd<T>(mut node: NodeRef<T>, count: usize) -> NodeRef<T> {
    for _ in 0..count {
        node = match node.prev() {
            Some(prev) => prev,
            None => unreachable!("seeking past the start of a List"),
        };
    }
    node
}

impl<T> Clone for ListState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListState<T> {}

impl<T> Index<usize> for List<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl<T> IndexMut<usize> for List<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index)
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for List<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

// SAFETY: The List owns its nodes exclusively, so sending it sends every T with it.
unsafe impl<T: Send> Send for List<T> {}

// SAFETY: Shared access to a List only ever hands out shared references to its elements.
unsafe impl<T: Sync> Sync for List<T> {}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("contents", &DebugIter(self.iter()))
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Debug> Display for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, item) in self.iter().enumerate() {
            if index != 0 {
                write!(f, " <-> ")?;
            }
            write!(f, "({item:?})")?;
        }
        Ok(())
    }
}
