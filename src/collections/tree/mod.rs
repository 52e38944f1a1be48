//! Ordered associative containers built on a red-black tree.
//!
//! [`RbTree`] is the shared engine. It stores whole values and orders them by the key that a
//! [`KeyOf`](crate::collections::traits::KeyOf) extractor pulls out of each one, under a
//! [`Compare`] ordering. The wrappers pick the extractor and the duplicate policy:
//!
//! | Type | Stored value | Duplicate keys |
//! |-|-|-|
//! | [`TreeMap`] | `(K, V)` | rejected |
//! | [`TreeMultiMap`] | `(K, V)` | kept, in insertion order |
//! | [`TreeSet`] | `T` | rejected |
//! | [`TreeMultiSet`] | `T` | kept, in insertion order |

mod iter;
mod map;
mod rb_tree;
mod set;
mod tests;

pub use iter::*;
pub use map::*;
pub use rb_tree::RbTree;
pub use set::*;

pub use crate::collections::traits::{Compare, Natural, Reverse};
