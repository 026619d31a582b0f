use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::mem;
use std::ptr;
use std::slice;

use super::Vector;
use crate::alloc::{Allocator, Global, RawBuf};

impl<T, A: Allocator> IntoIterator for Vector<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(mut self) -> Self::IntoIter {
        let empty = RawBuf::new_in(self.buf.allocator().clone());
        let buf = mem::replace(&mut self.buf, empty);
        let end = mem::replace(&mut self.len, 0);
        IntoIter {
            buf,
            start: 0,
            end,
        }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A type for owned iteration over a [`Vector`]. See [`Vector::into_iter`].
///
/// The iterator takes over the Vector's allocation. Values in `start..end` are still owned by the
/// iterator and are dropped along with it.
pub struct IntoIter<T, A: Allocator = Global> {
    pub(crate) buf: RawBuf<T, A>,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    /// Returns the values that haven't been yielded yet as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Values in start..end are initialized and owned by the iterator.
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.start).as_ptr(), self.end - self.start) }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            // SAFETY: start < end, so the value is initialized. Incrementing start moves it out.
            let value = unsafe { self.buf.ptr().add(self.start).read() };
            self.start += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            // SAFETY: The newly decremented end is >= start, so the value is initialized.
            let value = unsafe { self.buf.ptr().add(self.end).read() };
            Some(value)
        } else {
            None
        }
    }
}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        // SAFETY: The remaining values are initialized and haven't been yielded.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.ptr().add(self.start).as_ptr(),
                self.end - self.start,
            ));
        }
    }
}

impl<T: Debug, A: Allocator> Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
