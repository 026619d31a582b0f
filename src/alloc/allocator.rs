use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::util::error::{AllocFailure, CapacityOverflow, ReserveError};

/// A strategy object providing memory to collections.
///
/// Allocators are never asked for zero-sized layouts. Collections handle those themselves with
/// dangling pointers, so implementations don't need to special case them.
pub trait Allocator: Clone {
    /// Allocates a block of memory that fits `layout`, or reports an [`AllocFailure`].
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocFailure>;

    /// Deallocates a block of memory previously returned by [`Allocator::allocate`].
    ///
    /// # Safety
    /// `ptr` must have been allocated by this allocator (or one that compares as equivalent through
    /// [`Propagation::always_equal`] / a clone of it) using exactly `layout`, and must not be used
    /// after this call.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// The policy describing how this allocator moves between collections.
    fn propagation(&self) -> Propagation {
        Propagation::STANDARD
    }

    /// The allocator used by a freshly cloned collection.
    fn select_on_clone(&self) -> Self {
        self.clone()
    }
}

/// Describes how an allocator is carried along when its collection is cloned into, assigned or
/// swapped with another collection.
///
/// When an allocator isn't carried along, the collection keeps its own allocator and the elements
/// are moved into storage obtained from it instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Propagation {
    /// [`Clone::clone_from`] adopts the source's allocator.
    pub on_copy: bool,
    /// Assignment from an owned collection adopts the source's allocator and storage.
    pub on_move: bool,
    /// Swapping exchanges allocators along with storage.
    pub on_swap: bool,
    /// Every instance can free memory obtained from every other instance, so storage can always
    /// be exchanged directly.
    pub always_equal: bool,
}

impl Propagation {
    /// Mirrors the behavior of a stateless global allocator.
    pub const STANDARD: Propagation = Propagation {
        on_copy: false,
        on_move: true,
        on_swap: false,
        always_equal: true,
    };

    /// Never carries the allocator anywhere.
    pub const NONE: Propagation = Propagation {
        on_copy: false,
        on_move: false,
        on_swap: false,
        always_equal: false,
    };

    /// Carries the allocator along for every operation.
    pub const ALL: Propagation = Propagation {
        on_copy: true,
        on_move: true,
        on_swap: true,
        always_equal: false,
    };
}

impl Default for Propagation {
    fn default() -> Self {
        Propagation::STANDARD
    }
}

/// The global allocator, as registered with `#[global_allocator]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Global;

impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocFailure> {
        // SAFETY: Allocators are never asked for zero-sized layouts.
        NonNull::new(unsafe { alloc::alloc(layout) }).ok_or(AllocFailure { layout })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: The caller guarantees that ptr was allocated by the global allocator with layout.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

/// Creates the [`Layout`] for `count` consecutive values of `T`.
pub(crate) fn array_layout<T>(count: usize) -> Result<Layout, CapacityOverflow> {
    Layout::array::<T>(count).map_err(|_| CapacityOverflow)
}

/// Allocates uninitialized space for `count` values of `T`, returning a dangling pointer for
/// zero-sized layouts.
pub(crate) fn allocate_array<T, A: Allocator>(
    alloc: &A,
    count: usize,
) -> Result<NonNull<T>, ReserveError> {
    let layout = array_layout::<T>(count)?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }
    Ok(alloc.allocate(layout)?.cast())
}

/// Releases space obtained from [`allocate_array`] without dropping any values.
///
/// # Safety
/// `ptr` must have been returned by [`allocate_array`] for the same `count` and an equivalent
/// allocator, and must not be used afterwards.
pub(crate) unsafe fn deallocate_array<T, A: Allocator>(alloc: &A, ptr: NonNull<T>, count: usize) {
    if let Ok(layout) = array_layout::<T>(count)
        && layout.size() != 0
    {
        // SAFETY: The caller guarantees that ptr was allocated with this layout.
        unsafe { alloc.deallocate(ptr.cast(), layout) }
    }
}

/// Moves `value` into a fresh single-value allocation.
pub(crate) fn allocate_value<T, A: Allocator>(alloc: &A, value: T) -> Result<NonNull<T>, ReserveError> {
    let ptr = allocate_array::<T, A>(alloc, 1)?;
    // SAFETY: ptr was just allocated with space for one T.
    unsafe { ptr.write(value) }
    Ok(ptr)
}

/// Moves the value out of an allocation made by [`allocate_value`] and releases the memory.
///
/// # Safety
/// `ptr` must have been returned by [`allocate_value`] with an equivalent allocator, still hold an
/// initialized value and must not be used afterwards.
pub(crate) unsafe fn deallocate_value<T, A: Allocator>(alloc: &A, ptr: NonNull<T>) -> T {
    // SAFETY: The caller guarantees that the value is initialized. Reading it moves it out of the
    // allocation, which is released straight afterwards.
    unsafe {
        let value = ptr.read();
        deallocate_array(alloc, ptr, 1);
        value
    }
}
