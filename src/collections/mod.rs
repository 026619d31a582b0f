//! General-purpose container types, each generic over an [`Allocator`](crate::alloc::Allocator).
//!
//! # Layout
//! Containers are grouped by how they store their elements:
//! - [`contiguous`]: [`Vector`](contiguous::Vector) and the [`Stack`](contiguous::Stack) adapter
//!   built on it, backed by a single growable allocation.
//! - [`segmented`]: [`Deque`](segmented::Deque), a directory of fixed-size segments.
//! - [`linked`]: [`LinkedList`](linked::LinkedList), a circular chain of nodes around a sentinel.
//! - [`hash`]: [`HashSet`](hash::HashSet), an array of buckets holding collision chains.
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves writing some of the more repetitive functionality.

#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "hash")]
pub mod hash;
#[cfg(feature = "linked")]
pub mod linked;
#[cfg(feature = "segmented")]
pub mod segmented;
