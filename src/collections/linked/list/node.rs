use std::ptr::NonNull;

pub(crate) type Link<T> = Option<NodeRef<T>>;

pub(crate) struct Node<T> {
    pub value: T,
    pub prev: Link<T>,
    pub next: Link<T>,
}

/// A copyable pointer to a live node owned by some [`List`](super::List).
///
/// Nodes are allocated with [`Box`] so that a value can be moved back out of the heap when its
/// node is destroyed. A NodeRef is only ever created for a node that is owned by a list, and the
/// accessors rely on that: the returned references are valid for as long as the node stays in a
/// list that the caller has borrowed.
pub(crate) struct NodeRef<T>(NonNull<Node<T>>);

impl<T> NodeRef<T> {
    /// Allocates an unlinked node holding `value`.
    pub fn alloc(value: T) -> NodeRef<T> {
        NodeRef(NonNull::from(Box::leak(Box::new(Node {
            value,
            prev: None,
            next: None,
        }))))
    }

    /// Destroys the node and moves its value out.
    ///
    /// # Safety
    /// The node must no longer be reachable from any list, and no other NodeRef to it may be used
    /// afterwards.
    pub unsafe fn into_value(self) -> T {
        // SAFETY: The node was allocated by Box in alloc, and the caller guarantees that this is
        // the last use of it.
        unsafe { Box::from_raw(self.0.as_ptr()) }.value
    }

    pub fn value<'a>(self) -> &'a T {
        // SAFETY: The node is live, see the type level docs.
        unsafe { &(*self.0.as_ptr()).value }
    }

    pub fn value_mut<'a>(self) -> &'a mut T {
        // SAFETY: The node is live, and callers hand out at most one reference to each value.
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    pub fn prev(self) -> Link<T> {
        // SAFETY: The node is live.
        unsafe { (*self.0.as_ptr()).prev }
    }

    pub fn next(self) -> Link<T> {
        // SAFETY: The node is live.
        unsafe { (*self.0.as_ptr()).next }
    }

    pub fn set_prev(self, link: Link<T>) {
        // SAFETY: The node is live and links are never borrowed across calls.
        unsafe { (*self.0.as_ptr()).prev = link }
    }

    pub fn set_next(self, link: Link<T>) {
        // SAFETY: The node is live and links are never borrowed across calls.
        unsafe { (*self.0.as_ptr()).next = link }
    }

    /// Swaps the node's links, reversing its direction.
    pub fn flip(self) {
        let prev = self.prev();
        self.set_prev(self.next());
        self.set_next(prev);
    }
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<T> {}

impl<T> PartialEq for NodeRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for NodeRef<T> {}
