//! A generic container and algorithm library, modelled on the classic template library layout:
//! sequence containers, ordered and hashed associative containers, container adapters and the
//! algorithms that glue them together.
//!
//! # Structure
//! - [`collections::contiguous`]: [`Array`](collections::contiguous::Array) and the growable
//!   [`Vector`](collections::contiguous::Vector).
//! - [`collections::deque`]: a segmented double-ended queue, built from fixed size buffers that
//!   are addressed through a map.
//! - [`collections::linked`]: a doubly linked [`List`](collections::linked::List) and a singly
//!   linked [`Slist`](collections::linked::Slist), both supporting O(1) splicing.
//! - [`collections::tree`]: a red-black tree and the ordered maps and sets built on it.
//! - [`collections::hash`]: a bucket-chained hash table with prime bucket counts and the hashed
//!   maps and sets built on it.
//! - [`collections::adapters`]: stacks, queues and priority queues.
//! - [`algo`]: heap, numeric and basic sequence algorithms.
//! - [`alloc`]: raw storage and the node arena used by the tree and hash table.
//!
//! # Error Handling
//! Most operations that can fail come in two forms. The plain form panics with a descriptive
//! message, because forcing callers to handle a capacity overflow on every push isn't ergonomic.
//! The `try_` form returns a [`Result`] instead, using strongly typed error structs which are
//! combined into enums for static dispatch.
//!
//! Whenever an operation fails to acquire storage part way through, the container is rolled back
//! to the state it was in before the call. Nothing is ever left half linked.
//!
//! # Logging
//! Structural events such as deque map reallocation and hash table rehashing are reported through
//! the [`log`] facade at `trace` level, and allocation failures at `debug` level. No logger is
//! installed by this crate.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "algo")]
pub mod algo;
pub mod alloc;
#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;
