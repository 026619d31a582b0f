//! Allocation strategies and the raw building blocks that the collections are written on top of.
//!
//! Every collection in this crate is generic over an [`Allocator`], defaulting to [`Global`]. The
//! allocator also decides how it travels between collections when they are cloned, assigned or
//! swapped, by way of the [`Propagation`] policy that it reports.
//!
//! [`RawBuf`] is the single-owner handle for one contiguous allocation. It knows nothing about
//! which of its slots are initialized, that is left to the collection that owns it.

mod allocator;
mod instrumented;
mod raw_buf;
mod region;

pub use allocator::*;
pub use instrumented::*;
pub use raw_buf::*;
pub(crate) use region::*;
