use std::mem;
use std::ptr::{self, NonNull};

/// A run of uninitialized slots that values are being constructed into, one at a time.
///
/// If the Region is dropped before [`Region::commit`] is called (usually because constructing a
/// value panicked), every value built so far is dropped in reverse order. The memory itself is
/// owned elsewhere, typically by a [`RawBuf`](super::RawBuf) that releases it afterwards.
pub(crate) struct Region<T> {
    base: NonNull<T>,
    built: usize,
}

impl<T> Region<T> {
    /// Starts constructing values at `base`.
    ///
    /// # Safety
    /// `base` must be valid for writes of every value pushed into the Region, and the slots must
    /// not contain values that need to be dropped.
    pub const unsafe fn new(base: NonNull<T>) -> Region<T> {
        Region {
            base,
            built: 0,
        }
    }

    /// Writes `value` into the next slot.
    ///
    /// # Safety
    /// The next slot must be within the space that the Region was created for.
    pub unsafe fn push(&mut self, value: T) {
        // SAFETY: The caller guarantees that the slot is in bounds and uninitialized.
        unsafe { self.base.add(self.built).write(value) }
        self.built += 1;
    }

    pub const fn built(&self) -> usize {
        self.built
    }

    /// Keeps every value constructed so far, returning how many there are.
    pub fn commit(self) -> usize {
        let built = self.built;
        mem::forget(self);
        built
    }
}

impl<T> Drop for Region<T> {
    fn drop(&mut self) {
        for i in (0..self.built).rev() {
            // SAFETY: All slots below built have been initialized by push and not yet committed.
            unsafe { ptr::drop_in_place(self.base.add(i).as_ptr()) }
        }
    }
}
