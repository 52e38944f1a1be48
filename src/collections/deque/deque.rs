use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::{self, MaybeUninit};
use std::ops::{Index, IndexMut, RangeBounds};
use std::ptr;

use crate::alloc::RawBuf;
use crate::collections::contiguous::Array;
use crate::util::error::{CapacityOverflow, IndexOutOfBounds, TryInsertError, TryReserveError};
use crate::util::fmt::DebugIter;
use crate::util::range;
use crate::util::result::ResultExtension;

use super::{Iter, IterMut};

/// The number of map slots allocated for the first buffer of a Deque.
pub const INITIAL_MAP_LEN: usize = 8;

/// The target size of each buffer in bytes, when no block length is given.
pub const DEFAULT_BLOCK_BYTES: usize = 512;

pub(crate) type Map<T> = Array<Option<RawBuf<T>>>;

/// A location inside a Deque's storage: a map slot and an offset into that slot's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Pos {
    pub node: usize,
    pub offset: usize,
}

impl Pos {
    /// Moves the position by `delta` elements, which may cross any number of buffers in either
    /// direction. Offsets are normalized with floor division, so stepping back from offset zero
    /// lands at the end of the previous buffer.
    pub const fn offset(self, delta: isize, block_len: usize) -> Pos {
        let linear = self.offset as isize + delta;
        let block_len = block_len as isize;
        Pos {
            node: (self.node as isize + linear.div_euclid(block_len)) as usize,
            offset: linear.rem_euclid(block_len) as usize,
        }
    }

    pub const fn add(self, count: usize, block_len: usize) -> Pos {
        let linear = self.offset + count;
        Pos {
            node: self.node + linear / block_len,
            offset: linear % block_len,
        }
    }

    pub const fn next(self, block_len: usize) -> Pos {
        if self.offset + 1 == block_len {
            Pos { node: self.node + 1, offset: 0 }
        } else {
            Pos { node: self.node, offset: self.offset + 1 }
        }
    }

    pub const fn prev(self, block_len: usize) -> Pos {
        if self.offset == 0 {
            Pos { node: self.node - 1, offset: block_len - 1 }
        } else {
            Pos { node: self.node, offset: self.offset - 1 }
        }
    }
}

/// Returns a raw pointer to the slot at `pos` within `map`.
///
/// # Panics
/// Panics if the buffer for `pos` isn't allocated.
pub(crate) fn slot_in<T>(map: &[Option<RawBuf<T>>], pos: Pos) -> *mut T {
    match &map[pos.node] {
        // SAFETY: Positions are normalized, so offset < block_len, which is the buffer's capacity.
        Some(buf) => unsafe { buf.ptr(pos.offset) },
        None => unreachable!("Deque position {:?} has no buffer", pos),
    }
}

/// A double-ended queue made of fixed size buffers, which are addressed through a map of buffer
/// slots.
///
/// Pushing to either end only ever allocates a single new buffer (and occasionally grows the map),
/// so existing elements are never moved by growth. Random access is `O(1)`: an index is split into
/// a map slot and an offset into that slot's buffer.
///
/// Only buffers that hold at least one element are allocated. Popping the last element out of a
/// buffer releases it immediately, so an empty Deque owns no buffers at all.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Deque.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push_back` | `O(1)`* |
/// | `push_front` | `O(1)`* |
/// | `pop_back` | `O(1)` |
/// | `pop_front` | `O(1)` |
/// | `insert` | `O(min(i, n-i))` |
/// | `remove` | `O(min(i, n-i))` |
/// | `clear` | `O(n)` |
///
/// \* Amortized: the map is occasionally recentered or grown, which is linear in the number of
/// buffers rather than the number of elements.
pub struct Deque<T> {
    pub(crate) map: Map<T>,
    pub(crate) start: Pos,
    pub(crate) len: usize,
    pub(crate) block_len: usize,
}

impl<T> Deque<T> {
    /// Creates an empty Deque with the default block length, without allocating.
    pub fn new() -> Deque<T> {
        Self::with_block_len(0)
    }

    /// Creates an empty Deque whose buffers each hold `block_len` elements. A `block_len` of zero
    /// selects the default, which fits as many elements as possible into
    /// [`DEFAULT_BLOCK_BYTES`], with a minimum of one.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::deque::Deque;
    /// let deque: Deque<u64> = Deque::with_block_len(0);
    /// assert_eq!(deque.block_len(), 64);
    /// let deque: Deque<u64> = Deque::with_block_len(3);
    /// assert_eq!(deque.block_len(), 3);
    /// ```
    pub fn with_block_len(block_len: usize) -> Deque<T> {
        Deque {
            map: Array::new(),
            start: Pos { node: 0, offset: 0 },
            len: 0,
            block_len: match block_len {
                0 => Self::default_block_len(),
                len => len,
            },
        }
    }

    const fn default_block_len() -> usize {
        match size_of::<T>() {
            0 => DEFAULT_BLOCK_BYTES,
            size if size < DEFAULT_BLOCK_BYTES => DEFAULT_BLOCK_BYTES / size,
            _ => 1,
        }
    }

    /// Returns the number of elements in the Deque.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Deque contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements each buffer holds.
    pub const fn block_len(&self) -> usize {
        self.block_len
    }

    /// Returns the number of buffers currently allocated.
    pub const fn buffer_count(&self) -> usize {
        if self.len == 0 {
            0
        } else {
            self.last_pos().node - self.start.node + 1
        }
    }

    /// Returns the number of slots in the map, used or not.
    pub const fn map_len(&self) -> usize {
        self.map.size()
    }

    /// Returns a reference to the element at `index`, or an error if it is out of bounds.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the slot is initialized.
        Ok(unsafe { &*self.slot(self.pos(index)) })
    }

    /// Returns a reference to the element at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.try_get(index).ok()
    }

    /// Returns a mutable reference to the element at `index`, if it exists.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.check_index(index).ok()?;
        // SAFETY: index < len, so the slot is initialized. The &mut self receiver guarantees
        // exclusive access.
        Some(unsafe { &mut *self.slot(self.pos(index)) })
    }

    /// Returns a reference to the first element.
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a mutable reference to the first element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Returns a reference to the last element.
    pub fn back(&self) -> Option<&T> {
        self.get(self.len.wrapping_sub(1))
    }

    /// Returns a mutable reference to the last element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.len.wrapping_sub(1))
    }

    /// Appends `value` to the back of the Deque.
    ///
    /// # Panics
    /// Panics if a new buffer or a larger map can't be allocated.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::deque::Deque;
    /// let mut deque = Deque::with_block_len(2);
    /// for i in 0..5 {
    ///     deque.push_back(i);
    /// }
    /// assert_eq!(deque.buffer_count(), 3);
    /// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4]);
    /// ```
    pub fn push_back(&mut self, value: T) {
        self.try_push_back(value).throw()
    }

    /// Appends `value` to the back of the Deque. If storage can't be acquired, the Deque is left
    /// unchanged and `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<(), TryReserveError> {
        let pos = self.try_reserve_back_slot()?;
        // SAFETY: The slot was just reserved past the last element, so it is allocated and free.
        unsafe { self.slot(pos).write(value) };
        if self.len == 0 {
            self.start = pos;
        }
        self.len += 1;
        Ok(())
    }

    /// Prepends `value` to the front of the Deque.
    ///
    /// # Panics
    /// Panics if a new buffer or a larger map can't be allocated.
    pub fn push_front(&mut self, value: T) {
        self.try_push_front(value).throw()
    }

    /// Prepends `value` to the front of the Deque. If storage can't be acquired, the Deque is
    /// left unchanged and `value` is dropped.
    pub fn try_push_front(&mut self, value: T) -> Result<(), TryReserveError> {
        let pos = self.try_reserve_front_slot()?;
        // SAFETY: The slot was just reserved before the first element, so it is allocated and free.
        unsafe { self.slot(pos).write(value) };
        self.start = pos;
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element, releasing its buffer if it becomes empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        // SAFETY: The last slot is initialized, and is forgotten straight after being read.
        let value = unsafe { self.slot(self.last_pos()).read() };
        self.forget_back();
        Some(value)
    }

    /// Removes and returns the first element, releasing its buffer if it becomes empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        // SAFETY: The first slot is initialized, and is forgotten straight after being read.
        let value = unsafe { self.slot(self.start).read() };
        self.forget_front();
        Some(value)
    }

    /// Inserts `value` at `index`, moving whichever side of the Deque is shorter to make room.
    /// An index of zero or the length pushes to the respective end.
    ///
    /// # Panics
    /// Panics if `index > len`, or if storage can't be acquired.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::deque::Deque;
    /// let mut deque: Deque<_> = (0..6).collect();
    /// deque.insert(1, 10);
    /// deque.insert(5, 20);
    /// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [0, 10, 1, 2, 3, 20, 4, 5]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Inserts `value` at `index`, returning an error if the index is greater than the length or
    /// storage can't be acquired. On error, the Deque is unchanged.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), TryInsertError> {
        if index > self.len {
            return Err(IndexOutOfBounds { index, len: self.len }.into());
        }

        if index == 0 {
            return Ok(self.try_push_front(value)?);
        } else if index == self.len {
            return Ok(self.try_push_back(value)?);
        }

        if index < self.len / 2 {
            let new_start = self.try_reserve_front_slot()?;
            self.start = new_start;
            self.len += 1;
            // Everything before index moves one slot towards the front.
            for i in 0..index {
                // SAFETY: Slot i + 1 holds an initialized value and slot i is free, having just
                // been vacated (or reserved for i == 0).
                unsafe { self.move_slot(i + 1, i) };
            }
        } else {
            let finish = self.try_reserve_back_slot()?;
            // The reserved slot must be where len points once len grows.
            debug_assert_eq!(finish, self.pos(self.len));
            self.len += 1;
            // Everything from index onwards moves one slot towards the back.
            for i in (index..self.len - 1).rev() {
                // SAFETY: Slot i holds an initialized value and slot i + 1 has just been vacated
                // (or reserved for the last element).
                unsafe { self.move_slot(i, i + 1) };
            }
        }

        // SAFETY: The value that was at index has been moved out of its slot.
        unsafe { self.slot(self.pos(index)).write(value) };
        Ok(())
    }

    /// Removes and returns the element at `index`, closing the gap from whichever side is
    /// shorter.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes and returns the element at `index`, or returns an error if it is out of bounds.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;

        // SAFETY: index < len so the slot is initialized. The gap it leaves is filled below.
        let value = unsafe { self.slot(self.pos(index)).read() };

        if index < self.len / 2 {
            for i in (0..index).rev() {
                // SAFETY: Slot i is initialized and slot i + 1 has just been vacated.
                unsafe { self.move_slot(i, i + 1) };
            }
            self.forget_front();
        } else {
            for i in index + 1..self.len {
                // SAFETY: Slot i is initialized and slot i - 1 has just been vacated.
                unsafe { self.move_slot(i, i - 1) };
            }
            self.forget_back();
        }

        Ok(value)
    }

    /// Drops every element in `range`, then closes the gap by moving whichever side of the range
    /// holds fewer elements.
    ///
    /// # Panics
    /// Panics if the range is out of bounds or decreasing.
    ///
    /// # Examples
    /// ```
    /// # use stl_collections::collections::deque::Deque;
    /// let mut deque: Deque<_> = (0..10).collect();
    /// deque.erase(1..4);
    /// deque.erase(4..);
    /// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [0, 4, 5, 6]);
    /// ```
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) {
        let range = range::try_bounds(range, self.len).throw();
        let count = range.len();

        if count == 0 {
            return;
        } else if count == self.len {
            self.clear();
            return;
        }

        for i in range.clone() {
            // SAFETY: Every slot in range is initialized and is dropped exactly once.
            unsafe { ptr::drop_in_place(self.slot(self.pos(i))) };
        }

        let elems_before = range.start;
        let elems_after = self.len - range.end;

        if elems_before < elems_after {
            for i in (0..range.start).rev() {
                // SAFETY: Slot i is initialized and slot i + count is free.
                unsafe { self.move_slot(i, i + count) };
            }
            for _ in 0..count {
                self.forget_front();
            }
        } else {
            for i in range.end..self.len {
                // SAFETY: Slot i is initialized and slot i - count is free.
                unsafe { self.move_slot(i, i - count) };
            }
            for _ in 0..count {
                self.forget_back();
            }
        }
    }

    /// Drops every element and releases every buffer. The map is kept for reuse.
    pub fn clear(&mut self) {
        while self.len > 0 {
            // Pop one at a time so a panicking destructor can't cause a double drop.
            drop(self.pop_back());
        }
    }

    /// Swaps the contents of two Deques without moving any elements.
    pub fn swap_with(&mut self, other: &mut Deque<T>) {
        mem::swap(self, other);
    }

    /// Returns an iterator over references to each element, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns an iterator over mutable references to each element, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Returns the position of the element at `index`, which may be one past the end.
    pub(crate) const fn pos(&self, index: usize) -> Pos {
        self.start.add(index, self.block_len)
    }

    const fn last_pos(&self) -> Pos {
        self.start.offset(self.len as isize - 1, self.block_len)
    }

    /// Returns a raw pointer to the slot at `pos`.
    ///
    /// # Panics
    /// Panics if the buffer for `pos` isn't allocated, which would mean that a position outside
    /// the Deque was computed.
    pub(crate) fn slot(&self, pos: Pos) -> *mut T {
        slot_in(&self.map, pos)
    }

    /// Moves the value at index `from` into the free slot at index `to`.
    ///
    /// # Safety
    /// The slot at `from` must be initialized and the slot at `to` must be free. Both must lie in
    /// allocated buffers. Afterwards `from` is free.
    unsafe fn move_slot(&mut self, from: usize, to: usize) {
        let src = self.slot(self.pos(from));
        let dst = self.slot(self.pos(to));
        // SAFETY: The caller guarantees that src is initialized and dst is free. Distinct indices
        // never share a slot.
        unsafe { ptr::copy_nonoverlapping(src, dst, 1) }
    }

    /// Drops the first element's slot from the Deque after its value has been moved out,
    /// releasing the buffer if nothing else is in it.
    fn forget_front(&mut self) {
        let old = self.start;
        self.start = old.next(self.block_len);
        self.len -= 1;

        if self.len == 0 || self.start.node != old.node {
            self.map[old.node] = None;
        }
    }

    /// Drops the last element's slot from the Deque after its value has been moved out,
    /// releasing the buffer if nothing else is in it.
    fn forget_back(&mut self) {
        let last = self.last_pos();
        self.len -= 1;

        if self.len == 0 || last.offset == 0 {
            self.map[last.node] = None;
        }
    }

    /// Makes sure the slot after the last element lies in an allocated buffer and returns its
    /// position. Nothing observable changes on failure.
    fn try_reserve_back_slot(&mut self) -> Result<Pos, TryReserveError> {
        if self.len == 0 {
            return self.try_reserve_first_slot(false);
        }

        let target = self.pos(self.len);
        if target.offset != 0 {
            // Still inside the last element's buffer.
            return Ok(target);
        }

        let buf = RawBuf::try_new(self.block_len)?;
        if target.node + 1 > self.map.size() {
            self.try_reallocate_map(1, false)?;
        }

        let target = self.pos(self.len);
        self.map[target.node] = Some(buf);
        Ok(target)
    }

    /// Makes sure the slot before the first element lies in an allocated buffer and returns its
    /// position. Nothing observable changes on failure.
    fn try_reserve_front_slot(&mut self) -> Result<Pos, TryReserveError> {
        if self.len == 0 {
            return self.try_reserve_first_slot(true);
        }

        if self.start.offset != 0 {
            return Ok(self.start.prev(self.block_len));
        }

        let buf = RawBuf::try_new(self.block_len)?;
        if self.start.node == 0 {
            self.try_reallocate_map(1, true)?;
        }

        let target = self.start.prev(self.block_len);
        self.map[target.node] = Some(buf);
        Ok(target)
    }

    /// Allocates the single buffer of a Deque that is about to receive its first element, in the
    /// middle of the map. Pushes to the front start at the end of the buffer, leaving room for
    /// more pushes in the same direction.
    fn try_reserve_first_slot(&mut self, at_front: bool) -> Result<Pos, TryReserveError> {
        let buf = RawBuf::try_new(self.block_len)?;
        if self.map.size() == 0 {
            self.map = Self::try_new_map(INITIAL_MAP_LEN)?;
        }

        let pos = Pos {
            node: (self.map.size() - 1) / 2,
            offset: if at_front { self.block_len - 1 } else { 0 },
        };
        self.map[pos.node] = Some(buf);
        Ok(pos)
    }

    /// Makes room in the map for `nodes_to_add` more buffers at one end. If the map is more than
    /// twice as large as needed, the used slots are recentered in place. Otherwise a larger map
    /// is allocated and the used slots are moved to its middle.
    fn try_reallocate_map(&mut self, nodes_to_add: usize, add_at_front: bool) -> Result<(), TryReserveError> {
        let old_start = self.start.node;
        let old_num_nodes = self.buffer_count();
        let new_num_nodes = old_num_nodes + nodes_to_add;
        let map_len = self.map.size();
        let front_gap = if add_at_front { nodes_to_add } else { 0 };

        let new_start = if map_len > 2 * new_num_nodes {
            let new_start = (map_len - new_num_nodes) / 2 + front_gap;

            if new_start < old_start {
                self.map[new_start..old_start + old_num_nodes].rotate_left(old_start - new_start);
            } else {
                self.map[old_start..new_start + old_num_nodes].rotate_right(new_start - old_start);
            }

            log::trace!(
                "recentered deque map of {} slots: {} buffers moved from slot {} to {}",
                map_len, old_num_nodes, old_start, new_start
            );
            new_start
        } else {
            let new_map_len = map_len
                .checked_add(cmp::max(map_len, nodes_to_add))
                .and_then(|len| len.checked_add(2))
                .ok_or(CapacityOverflow)?;
            let mut new_map = Self::try_new_map(new_map_len)?;
            let new_start = (new_map_len - new_num_nodes) / 2 + front_gap;

            for i in 0..old_num_nodes {
                new_map[new_start + i] = self.map[old_start + i].take();
            }
            self.map = new_map;

            log::trace!(
                "reallocated deque map from {} to {} slots: {} buffers now start at slot {}",
                map_len, new_map_len, old_num_nodes, new_start
            );
            new_start
        };

        self.start.node = new_start;
        Ok(())
    }

    fn try_new_map(len: usize) -> Result<Map<T>, TryReserveError> {
        let mut map = Array::<Option<RawBuf<T>>>::try_new_uninit(len)?;
        for slot in map.iter_mut() {
            *slot = MaybeUninit::new(None);
        }
        // SAFETY: Every slot has just been initialized to None.
        Ok(unsafe { map.assume_init() })
    }

    const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            Err(IndexOutOfBounds { index, len: self.len })
        } else {
            Ok(())
        }
    }
}

impl<T: Clone> Deque<T> {
    /// Creates a Deque holding `count` clones of `value`.
    ///
    /// # Panics
    /// Panics if storage can't be acquired.
    pub fn from_elem(count: usize, value: T) -> Deque<T> {
        let mut deque = Deque::new();
        deque.extend(std::iter::repeat_n(value, count));
        deque
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.try_get(index).throw()
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => Err(IndexOutOfBounds { index, len }).throw(),
        }
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Deque<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Deque::new();
        deque.extend(iter);
        deque
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        let mut deque = Deque::with_block_len(self.block_len);
        deque.extend(self.iter().cloned());
        deque
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: PartialOrd> PartialOrd for Deque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for Deque<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for Deque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T: Debug> Debug for Deque<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deque")
            .field("contents", &DebugIter(self.iter()))
            .field("len", &self.len)
            .field("block_len", &self.block_len)
            .field("buffers", &self.buffer_count())
            .field("map_len", &self.map_len())
            .finish()
    }
}
