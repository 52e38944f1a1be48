//! A segmented double-ended queue, [`Deque`], and its iterators.
//!
//! Elements live in fixed size buffers which are never moved once allocated. A map of buffer
//! slots records where each buffer is, leaving spare slots on either side of the used range so
//! that both ends can grow without touching the other.

mod deque;
mod iter;
mod tests;

pub use deque::{DEFAULT_BLOCK_BYTES, Deque, INITIAL_MAP_LEN};
pub use iter::*;
