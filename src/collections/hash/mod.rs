//! Unordered associative containers built on a chained hash table.
//!
//! [`HashTable`] is the shared engine: a prime sized array of buckets, each heading a chain of
//! nodes. Like the ordered containers, the wrappers pick a key extractor and a duplicate policy:
//!
//! | Type | Stored value | Duplicate keys |
//! |-|-|-|
//! | [`HashMap`] | `(K, V)` | rejected |
//! | [`HashMultiMap`] | `(K, V)` | kept, adjacent |
//! | [`HashSet`] | `T` | rejected |
//! | [`HashMultiSet`] | `T` | kept, adjacent |
//!
//! Every container hashes with [`RandomState`](std::hash::RandomState) unless given another
//! [`BuildHasher`](std::hash::BuildHasher), such as the deterministic [`SimpleState`].

mod hash_table;
mod iter;
mod map;
mod set;
mod state;
mod tests;

pub use hash_table::{DEFAULT_BUCKET_HINT, HashTable, PRIMES, next_prime};
pub use iter::*;
pub use map::*;
pub use set::*;
pub use state::*;
