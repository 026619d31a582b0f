//! Collections backed by a single contiguous allocation.

pub mod stack;
pub mod vector;

#[doc(inline)]
pub use stack::Stack;
#[doc(inline)]
pub use vector::Vector;
