//! Free-standing algorithms over slices and iterators.
//!
//! - [`heap`]: binary max-heap maintenance, which backs
//!   [`PriorityQueue`](crate::collections::adapters::PriorityQueue).
//! - [`numeric`]: folds, running sums and differences, and exponentiation by squaring.
//! - [`base`]: sequence comparison, filling and copying.
//!
//! Pairs of values are plain tuples throughout.

pub mod base;
pub mod heap;
pub mod numeric;
mod tests;

#[doc(inline)]
pub use base::*;
#[doc(inline)]
pub use heap::*;
#[doc(inline)]
pub use numeric::*;
