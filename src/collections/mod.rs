//! Various general-purpose collection types.
//!
//! Sequence containers own their elements either contiguously ([`contiguous`]), in a map of fixed
//! size buffers ([`deque`]) or in individually allocated nodes ([`linked`]). Associative
//! containers store their nodes in an [`Arena`](crate::alloc::Arena) and link them by handle
//! ([`tree`], [`hash`]).
//!
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves repeating the slice API.

#[cfg(feature = "adapters")]
pub mod adapters;
#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "deque")]
pub mod deque;
#[cfg(feature = "hash")]
pub mod hash;
#[cfg(feature = "linked")]
pub mod linked;
#[cfg(feature = "traits")]
pub mod traits;
#[cfg(feature = "tree")]
pub mod tree;
