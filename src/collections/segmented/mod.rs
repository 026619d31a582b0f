//! Collections that store their elements in fixed-size segments, so that growing never moves
//! existing elements.

pub mod deque;

#[doc(inline)]
pub use deque::Deque;
