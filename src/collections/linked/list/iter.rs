use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{Link, List, ListState, NodeRef};
use crate::util::fmt::DebugIter;

impl<T> IntoIterator for List<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            list: self,
        }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            walk: Walk::over(&self.state),
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            walk: Walk::over(&self.state),
            _phantom: PhantomData,
        }
    }
}

/// The nodes left to visit, shared by the borrowing iterators. The walk never modifies a node, and
/// uses `len` alone to know when the two ends have met.
struct Walk<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
}

impl<T> Walk<T> {
    fn over(state: &ListState<T>) -> Walk<T> {
        match *state {
            ListState::Empty => Walk {
                head: None,
                tail: None,
                len: 0,
            },
            ListState::Full(run) => Walk {
                head: Some(run.head),
                tail: Some(run.tail),
                len: run.len.get(),
            },
        }
    }

    fn next(&mut self) -> Option<NodeRef<T>> {
        if self.len == 0 {
            return None;
        }

        let node = self.head?;
        self.head = node.next();
        self.len -= 1;
        Some(node)
    }

    fn next_back(&mut self) -> Option<NodeRef<T>> {
        if self.len == 0 {
            return None;
        }

        let node = self.tail?;
        self.tail = node.prev();
        self.len -= 1;
        Some(node)
    }
}

impl<T> Clone for Walk<T> {
    fn clone(&self) -> Self {
        Walk {
            head: self.head,
            tail: self.tail,
            len: self.len,
        }
    }
}

/// An iterator over references to the elements of a [`List`], front to back.
pub struct Iter<'a, T> {
    walk: Walk<T>,
    _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next().map(NodeRef::value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.len, Some(self.walk.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.walk.next_back().map(NodeRef::value)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            walk: self.walk.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&DebugIter(self.clone())).finish()
    }
}

/// An iterator over mutable references to the elements of a [`List`], front to back.
pub struct IterMut<'a, T> {
    walk: Walk<T>,
    _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        // Each node is yielded once, so no two references alias.
        self.walk.next().map(NodeRef::value_mut)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.len, Some(self.walk.len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.walk.next_back().map(NodeRef::value_mut)
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// An owning iterator over the elements of a [`List`].
pub struct IntoIter<T> {
    // Holding the list and popping from either end is all this needs.
    list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&DebugIter(self.list.iter())).finish()
    }
}
