mod iter;
mod length;
mod list;
mod node;
mod tests;

pub use iter::*;
pub(crate) use length::*;
pub use list::*;
pub(crate) use node::*;
