use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use tracing::trace;

use super::{Allocator, Global, allocate_array, deallocate_array};
use crate::util::error::ReserveError;
use crate::util::result::ReserveExtension;

/// A single-owner handle to one contiguous allocation with room for `cap` values of `T`.
///
/// A RawBuf never reads, writes or drops the values it holds room for. Tracking which slots are
/// initialized is left to the owner, which must drop them before the RawBuf is dropped. Dropping a
/// RawBuf only returns the memory to its allocator.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of initialized values moved by the operation.
///
/// | Method | Complexity |
/// |-|-|
/// | `cap` | `O(1)` |
/// | `try_realloc` | `O(n)`*, `O(1)` |
///
/// \* Unless the capacity is unchanged, in which case nothing happens.
pub struct RawBuf<T, A: Allocator = Global> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> RawBuf<T> {
    /// Creates a new RawBuf with capacity 0, in the [`Global`] allocator.
    pub const fn new() -> RawBuf<T> {
        RawBuf::new_in(Global)
    }
}

impl<T, A: Allocator> RawBuf<T, A> {
    /// Creates a new RawBuf with capacity 0. Nothing is allocated until the capacity changes.
    pub const fn new_in(alloc: A) -> RawBuf<T, A> {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Creates a new RawBuf with exactly `cap` uninitialized slots.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn with_cap_in(cap: usize, alloc: A) -> RawBuf<T, A> {
        RawBuf::try_with_cap_in(cap, alloc).handle()
    }

    /// Creates a new RawBuf with exactly `cap` uninitialized slots, returning an error if the
    /// memory can't be obtained.
    pub fn try_with_cap_in(cap: usize, alloc: A) -> Result<RawBuf<T, A>, ReserveError> {
        let ptr = allocate_array::<T, A>(&alloc, cap)?;
        Ok(RawBuf {
            ptr,
            cap,
            alloc,
            _phantom: PhantomData,
        })
    }

    pub const fn cap(&self) -> usize {
        self.cap
    }

    pub const fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Moves the first `len` values into a new allocation with room for exactly `new_cap` values.
    ///
    /// The new allocation is obtained before anything is moved, so if it fails, the RawBuf is left
    /// exactly as it was. Moving values is a bitwise copy, which can't fail, so once the allocation
    /// succeeds the operation completes. Any pointers into the old allocation are invalidated.
    ///
    /// # Safety
    /// The first `len` slots must be initialized and every other slot must be uninitialized (or
    /// safe to forget). `len` must not exceed either capacity.
    pub unsafe fn try_realloc(&mut self, len: usize, new_cap: usize) -> Result<(), ReserveError> {
        debug_assert!(len <= self.cap && len <= new_cap);

        if new_cap == self.cap { return Ok(()); }

        let new_ptr = allocate_array::<T, A>(&self.alloc, new_cap)?;

        // SAFETY: Both allocations are valid for len values and are distinct, so they can't
        // overlap. The caller guarantees that the first len values are initialized.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len);
        }

        let old_ptr = mem::replace(&mut self.ptr, new_ptr);
        let old_cap = mem::replace(&mut self.cap, new_cap);

        // SAFETY: old_ptr was allocated by allocate_array for old_cap values with this allocator.
        // All of its values have been moved out.
        unsafe { deallocate_array(&self.alloc, old_ptr, old_cap) }

        trace!(old_cap, new_cap, moved = len, "raw_buf.realloc");
        Ok(())
    }

    /// Releases the allocation, leaving the RawBuf with capacity 0.
    ///
    /// # Safety
    /// All values held in the RawBuf must have already been dropped or moved out.
    pub unsafe fn release(&mut self) {
        let old_ptr = mem::replace(&mut self.ptr, NonNull::dangling());
        let old_cap = mem::replace(&mut self.cap, 0);
        // SAFETY: old_ptr was allocated by allocate_array for old_cap values with this allocator.
        unsafe { deallocate_array(&self.alloc, old_ptr, old_cap) }
    }

    /// Exchanges the allocation (but not the allocator) held by self and `other`.
    pub(crate) const fn swap_storage(&mut self, other: &mut RawBuf<T, A>) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.cap, &mut other.cap);
    }
}

impl<T, A: Allocator + Default> Default for RawBuf<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: Allocator> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        // SAFETY: The owner is responsible for dropping all values before the RawBuf.
        unsafe { self.release() }
    }
}

impl<T, A: Allocator> Debug for RawBuf<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuf")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .finish()
    }
}

// SAFETY: RawBufs rely on unique pointers and are therefore safe for Send when T and A are Send.
unsafe impl<T: Send, A: Allocator + Send> Send for RawBuf<T, A> {}
// SAFETY: RawBuf provides no access to its values through a shared reference.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawBuf<T, A> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::Instrumented;
    use crate::util::alloc::ZeroSizedType;

    #[test]
    fn test_realloc() {
        let alloc = Instrumented::new();
        let mut buf = RawBuf::<usize, _>::with_cap_in(4, alloc.clone());
        assert_eq!(alloc.live(), 1);

        for i in 0..4 {
            // SAFETY: i < cap.
            unsafe { buf.ptr.add(i).write(i * 10); }
        }

        let old_ptr = buf.ptr;
        // SAFETY: 4 values are initialized and the capacity is unchanged.
        unsafe { buf.try_realloc(4, 4).unwrap(); }
        assert_eq!(buf.ptr, old_ptr, "Reallocating to the same capacity shouldn't move anything.");

        // SAFETY: 4 values are initialized.
        unsafe { buf.try_realloc(4, 16).unwrap(); }
        assert_eq!(buf.cap(), 16);
        assert_eq!(alloc.live(), 1, "The old allocation should have been released.");
        for i in 0..4 {
            // SAFETY: The first 4 values were moved into the new allocation.
            assert_eq!(unsafe { buf.ptr.add(i).read() }, i * 10);
        }

        drop(buf);
        assert_eq!(alloc.live(), 0);
        assert_eq!(alloc.live_bytes(), 0);
    }

    #[test]
    fn test_failed_realloc_is_untouched() {
        let alloc = Instrumented::new();
        let mut buf = RawBuf::<u32, _>::with_cap_in(2, alloc.clone());
        // SAFETY: 0 and 1 are < cap.
        unsafe {
            buf.ptr.write(7);
            buf.ptr.add(1).write(8);
        }

        let old_ptr = buf.ptr;
        alloc.fail_after(0);
        // SAFETY: 2 values are initialized.
        let result = unsafe { buf.try_realloc(2, 8) };

        assert!(result.unwrap_err().is_alloc_failure());
        assert_eq!(buf.ptr, old_ptr);
        assert_eq!(buf.cap(), 2);
        // SAFETY: The values haven't moved.
        unsafe {
            assert_eq!(buf.ptr.read(), 7);
            assert_eq!(buf.ptr.add(1).read(), 8);
        }
    }

    #[test]
    fn test_zst_never_allocates() {
        let alloc = Instrumented::new();
        let mut buf = RawBuf::<ZeroSizedType, _>::with_cap_in(30, alloc.clone());
        // SAFETY: No values are initialized.
        unsafe { buf.try_realloc(0, 300).unwrap(); }
        assert_eq!(buf.cap(), 300);
        assert_eq!(alloc.allocations(), 0);
    }

    #[test]
    fn test_capacity_overflow() {
        let result = RawBuf::<u64>::try_with_cap_in(usize::MAX / 4, Global);
        assert!(result.unwrap_err().is_capacity_overflow());
    }
}
