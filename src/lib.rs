//! A small family of containers written on top of raw allocations: a growable [`Vector`], a LIFO
//! [`Stack`] over it, a segmented [`Deque`], a circular [`LinkedList`] and a chained [`HashSet`].
//!
//! # Purpose
//! Each container manages its own memory, so the interesting parts are the ones the standard
//! library hides, such as what happens to half-built state when a clone panics. The growth policy
//! of each type and the references that survive each mutation are documented on the type itself.
//!
//! # Memory
//! Every container is generic over an [`Allocator`](alloc::Allocator), defaulting to
//! [`Global`](alloc::Global). Allocators report a [`Propagation`](alloc::Propagation) policy that
//! decides whether they travel with the contents when a container is cloned, assigned or swapped.
//! [`Instrumented`](alloc::Instrumented) counts every allocation, which is useful for checking that
//! nothing leaks.
//!
//! # Error Handling
//! For a standard library, it is more ergonomic for functions to panic in some cases, because
//! users don't want to be forced to handle an error every time they invoke a method. For example,
//! imagine having to handle the possibility of a capacity overflow every time you push into a
//! Vector. Where failure is plausible, a `try_` variant returns a [`Result`] instead.
//!
//! When this crate employs errors via [`Result`]s, it does so in a method that is strongly typed,
//! using enums for static dispatch rather than dynamic, with structs (often ZSTs) that implement
//! [`Error`](std::error::Error). They all live in [`error`].
//!
//! # Logging
//! Reallocations of the contiguous buffers, the deque's directory and the hash set's buckets each
//! emit a `trace` level event through [`tracing`]. No subscriber is installed by this crate.
//!
//! # Dependencies
//! This crate doesn't use [`Vec`] at all, every container is written on top of
//! [`RawBuf`](alloc::RawBuf) or single-value allocations. It depends on some derive macros because
//! they're helpful and remove the need for some very repetitive programming.
//!
//! [`Vector`]: collections::contiguous::Vector
//! [`Stack`]: collections::contiguous::Stack
//! [`Deque`]: collections::segmented::Deque
//! [`LinkedList`]: collections::linked::LinkedList
//! [`HashSet`]: collections::hash::HashSet

// #![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod alloc;
#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;

pub use util::error;
