//! A module containing [`Stack`], a last-in-first-out adapter over a
//! [`Vector`](super::Vector).
//!
//! Owned iteration reuses the Vector's [`IntoIter`](super::vector::IntoIter), yielding from the
//! bottom of the Stack to the top.

mod stack;
mod tests;

pub use stack::*;
