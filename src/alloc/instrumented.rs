use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use super::{Allocator, Global, Propagation};
use crate::util::error::AllocFailure;

/// An [`Allocator`] wrapping [`Global`] that keeps count of every allocation and deallocation, and
/// can be told to fail after a given number of successful allocations.
///
/// Clones share their counters, so a collection and all the allocators it hands out can be
/// observed through any one of them. The reported [`Propagation`] is configurable to exercise
/// the different assignment and swap strategies of the collections.
#[derive(Debug, Clone)]
pub struct Instrumented {
    stats: Rc<AllocStats>,
    propagation: Propagation,
}

#[derive(Debug, Default)]
struct AllocStats {
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    live_bytes: Cell<usize>,
    remaining: Cell<Option<usize>>,
}

impl Instrumented {
    /// Creates a new Instrumented allocator with fresh counters, that never fails and propagates
    /// in every situation.
    pub fn new() -> Instrumented {
        Instrumented::with_propagation(Propagation::ALL)
    }

    /// Creates a new Instrumented allocator with fresh counters and the provided `propagation`.
    pub fn with_propagation(propagation: Propagation) -> Instrumented {
        Instrumented {
            stats: Rc::new(AllocStats::default()),
            propagation,
        }
    }

    /// Allows `count` more allocations to succeed, failing every one after that.
    pub fn fail_after(&self, count: usize) {
        self.stats.remaining.set(Some(count));
    }

    /// Removes any failure limit set by [`Instrumented::fail_after`].
    pub fn never_fail(&self) {
        self.stats.remaining.set(None);
    }

    /// The number of successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.stats.allocations.get()
    }

    /// The number of deallocations so far.
    pub fn deallocations(&self) -> usize {
        self.stats.deallocations.get()
    }

    /// The number of allocations that haven't been released yet.
    pub fn live(&self) -> usize {
        self.allocations() - self.deallocations()
    }

    /// The total size of all allocations that haven't been released yet.
    pub fn live_bytes(&self) -> usize {
        self.stats.live_bytes.get()
    }

    /// Returns true if `other` shares its counters with `self`.
    pub fn same_source(&self, other: &Instrumented) -> bool {
        Rc::ptr_eq(&self.stats, &other.stats)
    }
}

impl Default for Instrumented {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator for Instrumented {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocFailure> {
        if let Some(remaining) = self.stats.remaining.get() {
            match remaining.checked_sub(1) {
                Some(left) => self.stats.remaining.set(Some(left)),
                None => return Err(AllocFailure { layout }),
            }
        }

        let ptr = Global.allocate(layout)?;
        self.stats.allocations.set(self.stats.allocations.get() + 1);
        self.stats.live_bytes.set(self.stats.live_bytes.get() + layout.size());
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.stats.deallocations.set(self.stats.deallocations.get() + 1);
        self.stats.live_bytes.set(self.stats.live_bytes.get() - layout.size());
        // SAFETY: Every allocation was made by Global, with the same layout.
        unsafe { Global.deallocate(ptr, layout) }
    }

    fn propagation(&self) -> Propagation {
        self.propagation
    }
}
