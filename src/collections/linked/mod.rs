//! Linked sequence types: the doubly linked [`List`] and the singly linked [`Slist`].
//!
//! Both own individually allocated nodes, so moving elements between lists (splicing, merging,
//! sorting) only relinks nodes and never moves or clones a value.

pub mod list;
pub mod slist;

#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use slist::Slist;

/// The number of run levels used by the bottom-up merge sorts of [`List`] and [`Slist`]. Level `i`
/// holds a sorted run of up to `2^i` elements, so no list that fits in memory can exhaust them.
pub const LIST_SORT_LEVELS: usize = 64;
