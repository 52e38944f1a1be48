//! Container adapters, restricting an underlying sequence to a narrower interface.
//!
//! | Adapter | Underlying | Push | Pop |
//! |-|-|-|-|
//! | [`Stack`] | [`Deque`](crate::collections::deque::Deque) | back | back |
//! | [`Queue`] | [`Deque`](crate::collections::deque::Deque) | back | front |
//! | [`PriorityQueue`] | [`Vector`](crate::collections::contiguous::Vector) | heap | heap |

mod priority_queue;
mod queue;
mod stack;
mod tests;

pub use priority_queue::PriorityQueue;
pub use queue::Queue;
pub use stack::Stack;
