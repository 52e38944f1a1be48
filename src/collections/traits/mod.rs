//! Traits shared between the associative containers and adapters.
#![warn(missing_docs)]

pub mod compare;
pub mod key;
pub mod set;

#[doc(inline)]
pub use compare::{Compare, Natural, Reverse};
#[doc(inline)]
pub use key::{First, Identity, KeyOf};
#[doc(inline)]
pub use set::Set;
