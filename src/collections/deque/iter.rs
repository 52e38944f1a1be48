use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::Deque;
use super::deque::{Pos, slot_in};
use crate::alloc::RawBuf;
use crate::util::fmt::DebugIter;

impl<T> IntoIterator for Deque<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            deque: self,
        }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A cursor over a run of a Deque's slots: `front` is the next slot to yield from the front and
/// `back` is one past the next slot to yield from the back. Both step across buffer boundaries
/// without recomputing positions from scratch.
#[derive(Clone)]
struct Cursor {
    front: Pos,
    back: Pos,
    len: usize,
    block_len: usize,
}

impl Cursor {
    fn over<T>(deque: &Deque<T>) -> Cursor {
        Cursor {
            front: deque.start,
            back: deque.pos(deque.len),
            len: deque.len,
            block_len: deque.block_len,
        }
    }

    fn next(&mut self) -> Option<Pos> {
        if self.len == 0 {
            return None;
        }

        let pos = self.front;
        self.front = pos.next(self.block_len);
        self.len -= 1;
        Some(pos)
    }

    fn next_back(&mut self) -> Option<Pos> {
        if self.len == 0 {
            return None;
        }

        self.back = self.back.prev(self.block_len);
        self.len -= 1;
        Some(self.back)
    }
}

/// An iterator over references to the elements of a [`Deque`], front to back.
pub struct Iter<'a, T> {
    map: &'a [Option<RawBuf<T>>],
    cursor: Cursor,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(deque: &'a Deque<T>) -> Iter<'a, T> {
        Iter {
            map: &deque.map,
            cursor: Cursor::over(deque),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.cursor.next()?;
        // SAFETY: Every position in the cursor's run is initialized, and the Deque is borrowed
        // for 'a.
        Some(unsafe { &*slot_in(self.map, pos) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.len, Some(self.cursor.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let pos = self.cursor.next_back()?;
        // SAFETY: Every position in the cursor's run is initialized, and the Deque is borrowed
        // for 'a.
        Some(unsafe { &*slot_in(self.map, pos) })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            map: self.map,
            cursor: self.cursor.clone(),
        }
    }
}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&DebugIter(self.clone())).finish()
    }
}

/// An iterator over mutable references to the elements of a [`Deque`], front to back.
pub struct IterMut<'a, T> {
    map: &'a [Option<RawBuf<T>>],
    cursor: Cursor,
    _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(deque: &'a mut Deque<T>) -> IterMut<'a, T> {
        let deque: &'a Deque<T> = deque;
        IterMut {
            map: &deque.map,
            cursor: Cursor::over(deque),
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.cursor.next()?;
        // SAFETY: Every position is yielded at most once, so no two references alias. The
        // elements live in buffers the map only points to, and the Deque is exclusively borrowed
        // for 'a.
        Some(unsafe { &mut *slot_in(self.map, pos) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.len, Some(self.cursor.len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let pos = self.cursor.next_back()?;
        // SAFETY: As in next, each position is yielded at most once.
        Some(unsafe { &mut *slot_in(self.map, pos) })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// An owning iterator over the elements of a [`Deque`], which releases buffers as it drains them.
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&DebugIter(self.deque.iter())).finish()
    }
}
