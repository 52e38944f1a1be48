use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;

use super::{Iter, IterMut};
use crate::collections::linked::LIST_SORT_LEVELS;
use crate::util::error::IndexOutOfBounds;
use crate::util::fmt::DebugIter;
use crate::util::result::ResultExtension;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

pub(crate) struct Node<T> {
    pub value: T,
    pub next: Link<T>,
}

/// A singly linked list.
///
/// Without backward links, every operation is expressed in terms of the link that points at a
/// position, which is found by walking forward from the head. Operations named `_after` take the
/// index of the element before the position they affect, mirroring the way the links are actually
/// followed.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Slist.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front` | `O(1)` |
/// | `push_front` | `O(1)` |
/// | `pop_front` | `O(1)` |
/// | `insert` | `O(i)` |
/// | `remove` | `O(i)` |
/// | `splice` | `O(i + m)`* |
/// | `merge` | `O(n + m)` |
/// | `sort` | `O(n log n)` |
///
/// \* Where `m` is the length of the spliced list, whose last link has to be found.
pub struct Slist<T> {
    pub(crate) head: Link<T>,
    pub(crate) len: usize,
}

impl<T> Slist<T> {
    /// Creates a new Slist with no elements.
    pub const fn new() -> Slist<T> {
        Slist {
            head: None,
            len: 0,
        }
    }

    /// Returns the length of the Slist.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Slist contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the first element, if it exists.
    pub fn front(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.value)
    }

    /// Returns a mutable reference to the first element, if it exists.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.as_mut().map(|node| &mut node.value)
    }

    /// Adds `value` to the front of the Slist.
    pub fn push_front(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    /// Removes the first element and returns it, if the Slist isn't empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let node = self.head.take()?;
        self.head = node.next;
        self.len -= 1;
        Some(node.value)
    }

    /// Returns a reference to the element at `index`, or an [`Err`] if it is out of bounds.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.iter().nth(index).ok_or(IndexOutOfBounds { index, len: self.len })
    }

    /// Returns a reference to the element before `index`, found by walking from the head. The
    /// first element has no predecessor.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn previous(&self, index: usize) -> Option<&T> {
        self.check_index(index).throw();
        index.checked_sub(1).and_then(|prev| self.iter().nth(prev))
    }

    /// Inserts `value` so that it ends up at `index`, after scanning for the link that points
    /// there.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Inserts `value` so that it ends up at `index`, returning an [`Err`] if `index > len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        let link = self.checked_link_mut(index)?;
        let next = link.take();
        *link = Some(Box::new(Node { value, next }));
        self.len += 1;
        Ok(())
    }

    /// Inserts `value` directly after the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn insert_after(&mut self, index: usize, value: T) {
        self.check_index(index).throw();
        self.insert(index + 1, value);
    }

    /// Removes and returns the element at `index`, after scanning for its predecessor.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes and returns the element at `index`, returning an [`Err`] if it is out of bounds.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;
        let link = self.checked_link_mut(index)?;

        match link.take() {
            Some(node) => {
                *link = node.next;
                self.len -= 1;
                Ok(node.value)
            },
            None => unreachable!("in bounds index {} has no node", index),
        }
    }

    /// Removes and returns the element directly after the one at `index`.
    ///
    /// # Panics
    /// Panics if there is no element after `index`.
    pub fn erase_after(&mut self, index: usize) -> T {
        self.remove(index + 1)
    }

    /// Drops every element strictly between the elements at `after` and `end`. An `end` equal to
    /// the length drops everything after `after`.
    ///
    /// # Panics
    /// Panics if `after` is out of bounds, if `end > len` or if `end <= after`.
    pub fn erase_after_range(&mut self, after: usize, end: usize) {
        self.check_index(after).throw();
        if end > self.len {
            Err(IndexOutOfBounds { index: end, len: self.len }).throw()
        }
        assert!(end > after, "Range end {} doesn't follow element {}!", end, after);

        let count = end - after - 1;
        let link = self.checked_link_mut(after + 1).throw();
        for _ in 0..count {
            match link.take() {
                Some(node) => *link = node.next,
                None => unreachable!("erased range ran past the end of the Slist"),
            }
        }
        self.len -= count;
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        // Unlinking iteratively stops a long chain of boxes from being dropped recursively.
        while let Some(value) = self.pop_front() {
            drop(value);
        }
    }

    /// Truncates or extends the Slist to `new_len`, filling with values from `fill`.
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut fill: F) {
        let mut link = &mut self.head;
        let mut index = 0;
        while index < new_len {
            match link {
                Some(node) => link = &mut node.next,
                None => {
                    *link = Some(Box::new(Node { value: fill(), next: None }));
                    self.len += 1;
                    continue;
                },
            }
            index += 1;
        }

        let mut rest = link.take();
        while let Some(node) = rest {
            rest = node.next;
            self.len -= 1;
        }
    }

    /// Moves every element of `other` into this list, so that the first of them ends up at `at`.
    /// `other` is left empty.
    ///
    /// # Panics
    /// Panics if `at > len`.
    pub fn splice(&mut self, at: usize, other: &mut Slist<T>) {
        let link = self.checked_link_mut(at).throw();
        let Some(head) = other.head.take() else {
            return;
        };

        let rest = mem::replace(link, Some(head));
        let mut tail = link;
        while let Some(node) = tail {
            tail = &mut node.next;
        }
        *tail = rest;

        self.len += mem::take(&mut other.len);
    }

    /// Moves every element of `other` in directly after the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn splice_after(&mut self, index: usize, other: &mut Slist<T>) {
        self.check_index(index).throw();
        self.splice(index + 1, other);
    }

    /// Merges `other` into this list, comparing elements with `compare`. Both lists must already
    /// be sorted by `compare`. Equal elements from this list stay in front, and `other` is left
    /// empty.
    pub fn merge_by<F>(&mut self, other: &mut Slist<T>, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut link = &mut self.head;

        while let Some(mut first) = other.head.take() {
            if link.is_none() {
                // Everything left in other orders after this list.
                *link = Some(first);
                self.len += other.len;
                other.len = 0;
                break;
            }

            let keep = matches!(
                link.as_deref(),
                Some(node) if compare(&first.value, &node.value) != Ordering::Less
            );

            if keep {
                other.head = Some(first);
            } else {
                other.head = first.next.take();
                first.next = link.take();
                *link = Some(first);
                other.len -= 1;
                self.len += 1;
            }

            // Step past the node now at link, whether it was kept or just linked in.
            match link {
                Some(node) => link = &mut node.next,
                None => unreachable!("link holds a node on both branches"),
            }
        }
    }

    /// Sorts the Slist with `compare`, keeping equal elements in their original order. Uses the
    /// same bottom-up merge sort as [`List::sort_by`](crate::collections::linked::List::sort_by).
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len < 2 {
            return;
        }

        let mut carry = Slist::new();
        let mut levels: [Slist<T>; LIST_SORT_LEVELS] = std::array::from_fn(|_| Slist::new());
        let mut filled = 0;

        while let Some(mut node) = self.head.take() {
            self.head = node.next.take();
            self.len -= 1;
            carry.head = Some(node);
            carry.len = 1;

            let mut level = 0;
            while level < filled && !levels[level].is_empty() {
                levels[level].merge_by(&mut carry, &mut compare);
                mem::swap(&mut carry, &mut levels[level]);
                level += 1;
            }

            mem::swap(&mut carry, &mut levels[level]);
            if level == filled {
                filled += 1;
            }
        }

        for level in 1..filled {
            let (lower, upper) = levels.split_at_mut(level);
            upper[0].merge_by(&mut lower[level - 1], &mut compare);
        }
        mem::swap(self, &mut levels[filled - 1]);
    }

    /// Reverses the order of the Slist in place.
    pub fn reverse(&mut self) {
        let mut reversed = None;
        let mut rest = self.head.take();
        while let Some(mut node) = rest {
            rest = node.next.take();
            node.next = reversed;
            reversed = Some(node);
        }
        self.head = reversed;
    }

    /// Returns an iterator over references to each element, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Returns an iterator over mutable references to each element, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }

    /// Returns the link that points at the element at `index`, or the final empty link if `index`
    /// is the length.
    fn checked_link_mut(&mut self, index: usize) -> Result<&mut Link<T>, IndexOutOfBounds> {
        if index > self.len {
            return Err(IndexOutOfBounds { index, len: self.len });
        }

        let mut link = &mut self.head;
        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.next,
                None => unreachable!("Slist is shorter than its length"),
            }
        }
        Ok(link)
    }

    const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            Err(IndexOutOfBounds { index, len: self.len })
        } else {
            Ok(())
        }
    }
}

impl<T: Clone> Slist<T> {
    /// Truncates or extends the Slist to `new_len`, filling with clones of `value`.
    pub fn resize(&mut self, new_len: usize, value: T) {
        self.resize_with(new_len, || value.clone());
    }
}

impl<T: Ord> Slist<T> {
    /// Merges the sorted `other` into this sorted list. See [`Slist::merge_by`].
    pub fn merge(&mut self, other: &mut Slist<T>) {
        self.merge_by(other, Ord::cmp);
    }

    /// Sorts the list in ascending order. See [`Slist::sort_by`].
    pub fn sort(&mut self) {
        self.sort_by(Ord::cmp);
    }
}

impl<T: PartialEq> Slist<T> {
    /// Returns true if any element is equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|element| element == item)
    }
}

impl<T> Extend<T> for Slist<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }

        for value in iter {
            let node = link.insert(Box::new(Node { value, next: None }));
            link = &mut node.next;
            self.len += 1;
        }
    }
}

impl<T> FromIterator<T> for Slist<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Slist::new();
        list.extend(iter);
        list
    }
}

impl<T> Default for Slist<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Slist<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for Slist<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for Slist<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Slist<T> {}

impl<T: Hash> Hash for Slist<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T: Debug> Debug for Slist<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slist")
            .field("contents", &DebugIter(self.iter()))
            .field("len", &self.len)
            .finish()
    }
}
