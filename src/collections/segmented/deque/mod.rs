//! A module containing [`Deque`] and its iterators.
//!
//! The Deque keeps a map of segment pointers, with a pair of cursors marking the first element
//! and the slot one past the last element. Both cursors hold the map slot of their segment, so
//! indexing is a division away from the front cursor.
//!
//! [`Deque`] is also re-exported under the parent module.

mod cursor;
mod deque;
mod iter;

pub use deque::*;
pub use iter::*;
