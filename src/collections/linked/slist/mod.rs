mod iter;
mod slist;
mod tests;

pub use iter::*;
pub use slist::*;
