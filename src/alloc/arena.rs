use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::num::NonZero;
use std::ops::{Index, IndexMut};

use crate::collections::contiguous::Vector;
use crate::util::error::TryReserveError;
use crate::util::result::ResultExtension;

/// A stable handle to a node stored in an [`Arena`].
///
/// Handles are stored as their index plus one, so that `Option<NodeId>` is the same size as a
/// `usize`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(NonZero<usize>);

impl NodeId {
    const fn from_index(index: usize) -> NodeId {
        match NonZero::new(index.wrapping_add(1)) {
            Some(value) => NodeId(value),
            // An index of usize::MAX would need an arena larger than the address space.
            None => panic!("Node index overflow!"),
        }
    }

    /// Returns the index of the slot this handle refers to.
    pub const fn index(self) -> usize {
        self.0.get() - 1
    }
}

impl Debug for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.index())
    }
}

enum Slot<N> {
    Occupied(N),
    Vacant(Option<NodeId>),
}

/// A pool of nodes addressed by [`NodeId`]s rather than pointers.
///
/// Inserting a node acquires a slot (reusing the most recently released one if possible) and
/// constructs the node into it. Removing a node destroys it and pushes the slot onto an internal
/// free list. Handles to other nodes stay valid across both operations.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `insert` | `O(1)`* |
/// | `remove` | `O(1)` |
/// | `get` | `O(1)` |
/// | `clear` | `O(n)` |
///
/// \* Amortized, the slot storage doubles when it runs out of free slots.
pub struct Arena<N> {
    slots: Vector<Slot<N>>,
    free: Option<NodeId>,
    len: usize,
}

impl<N> Arena<N> {
    /// Creates an empty Arena without allocating.
    pub fn new() -> Arena<N> {
        Arena {
            slots: Vector::new(),
            free: None,
            len: 0,
        }
    }

    /// Creates an empty Arena with room for `cap` nodes.
    ///
    /// # Panics
    /// Panics if the memory layout size exceeds [`isize::MAX`].
    pub fn with_cap(cap: usize) -> Arena<N> {
        Arena {
            slots: Vector::with_cap(cap),
            free: None,
            len: 0,
        }
    }

    /// Returns the number of live nodes.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Arena holds no live nodes.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes the Arena can hold without growing its slot storage.
    pub const fn capacity(&self) -> usize {
        self.slots.cap()
    }

    /// Stores `node` and returns its handle. If no slot is available and the slot storage can't
    /// grow, the Arena is left unchanged and `node` is dropped.
    pub fn try_insert(&mut self, node: N) -> Result<NodeId, TryReserveError> {
        match self.free {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                let Slot::Vacant(next) = *slot else {
                    unreachable!("free list points at an occupied slot");
                };
                *slot = Slot::Occupied(node);
                self.free = next;
                self.len += 1;
                Ok(id)
            },
            None => {
                let id = NodeId::from_index(self.slots.len());
                self.slots.try_push(Slot::Occupied(node))?;
                self.len += 1;
                Ok(id)
            },
        }
    }

    /// Stores `node` and returns its handle.
    ///
    /// # Panics
    /// Panics if the slot storage needs to grow and can't.
    pub fn insert(&mut self, node: N) -> NodeId {
        self.try_insert(node).throw()
    }

    /// Removes and returns the node referred to by `id`, or `None` if the handle is stale.
    pub fn try_remove(&mut self, id: NodeId) -> Option<N> {
        let slot = self.slots.get_mut(id.index())?;

        if let Slot::Vacant(_) = slot {
            return None;
        }

        let old = mem::replace(slot, Slot::Vacant(self.free));
        self.free = Some(id);
        self.len -= 1;

        match old {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant(_) => None,
        }
    }

    /// Removes and returns the node referred to by `id`.
    ///
    /// # Panics
    /// Panics if the handle doesn't refer to a live node.
    pub fn remove(&mut self, id: NodeId) -> N {
        match self.try_remove(id) {
            Some(node) => node,
            None => panic!("Stale node handle {:?}!", id),
        }
    }

    /// Returns a reference to the node referred to by `id`, if it is live.
    pub fn get(&self, id: NodeId) -> Option<&N> {
        match self.slots.get(id.index())? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to the node referred to by `id`, if it is live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut N> {
        match self.slots.get_mut(id.index())? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant(_) => None,
        }
    }

    /// Returns true if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Drops every node and forgets the free list. The slot storage is kept for reuse.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }

    /// Returns an iterator over every live node and its handle, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &N)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| match slot {
            Slot::Occupied(node) => Some((NodeId::from_index(index), node)),
            Slot::Vacant(_) => None,
        })
    }

    /// Returns mutable references to the nodes referred to by `order`, in that order.
    ///
    /// # Panics
    /// Panics if a handle is stale or appears more than once.
    pub fn ordered_mut(&mut self, order: &[NodeId]) -> Vector<&mut N> {
        let mut rank: Vector<Option<usize>> = Vector::new();
        rank.resize(self.slots.len(), None);
        for (position, id) in order.iter().enumerate() {
            match rank.get_mut(id.index()) {
                Some(Some(_)) => panic!("Duplicate node handle {:?}!", id),
                Some(entry) => *entry = Some(position),
                None => panic!("Stale node handle {:?}!", id),
            }
        }

        let mut sorted: Vector<Option<&mut N>> = order.iter().map(|_| None).collect();
        for (slot, position) in self.slots.iter_mut().zip(rank.iter()) {
            if let (Slot::Occupied(node), Some(position)) = (slot, position) {
                sorted[*position] = Some(node);
            }
        }

        sorted.into_iter().zip(order).map(|(node, id)| match node {
            Some(node) => node,
            None => panic!("Stale node handle {:?}!", id),
        }).collect()
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            Some(node) => node,
            None => panic!("Stale node handle {:?}!", id),
        }
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("Stale node handle {:?}!", id),
        }
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone> Clone for Arena<N> {
    fn clone(&self) -> Self {
        Arena {
            slots: self.slots.iter().map(|slot| match slot {
                Slot::Occupied(node) => Slot::Occupied(node.clone()),
                Slot::Vacant(next) => Slot::Vacant(*next),
            }).collect(),
            free: self.free,
            len: self.len,
        }
    }
}

impl<N: Debug> Debug for Arena<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("len", &self.len)
            .field("cap", &self.capacity())
            .field("free", &self.free)
            .finish()
    }
}
