use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use super::Deque;
use super::cursor::Cursor;
use crate::alloc::{Allocator, Global};

impl<T, A: Allocator> Deque<T, A> {
    /// Returns an iterator over references to each element, from front to back.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::segmented::Deque;
    /// let deque = Deque::from([1, 2, 3]);
    /// let mut iter = deque.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.len(), 1);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            map: self.map.ptr(),
            front: self.start,
            back: self.finish,
            len: self.len,
            _phantom: PhantomData,
        }
    }

    /// Returns an iterator over mutable references to each element, from front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            map: self.map.ptr(),
            front: self.start,
            back: self.finish,
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

/// Moves the front cursor of a segmented iterator, yielding the position it started at.
macro_rules! next_front {
    ($self:ident) => {{
        if $self.len == 0 {
            return None;
        }
        let current = $self.front;
        $self.len -= 1;
        if $self.len > 0 {
            // SAFETY: There is at least one more element, so the next position is live.
            unsafe { $self.front.step_forward($self.map) }
        }
        current
    }};
}

/// Moves the back cursor of a segmented iterator, yielding the position it lands on.
macro_rules! next_back {
    ($self:ident) => {{
        if $self.len == 0 {
            return None;
        }
        $self.len -= 1;
        // SAFETY: back is after an element that hasn't been yielded, so the previous position is
        // live.
        unsafe { $self.back.step_back($self.map) }
        $self.back
    }};
}

/// Skips `n` elements from the front in constant time, returning false if there aren't enough.
macro_rules! skip_front {
    ($self:ident, $n:expr) => {{
        let n = $n;
        if n >= $self.len {
            $self.front = $self.back;
            $self.len = 0;
            false
        } else {
            // SAFETY: n < len, so the resulting position holds an element that hasn't been yielded.
            $self.front = unsafe { $self.front.forward($self.map, n) };
            $self.len -= n;
            true
        }
    }};
}

/// An iterator over references to the elements of a [`Deque`], created by [`Deque::iter`].
pub struct Iter<'a, T> {
    pub(crate) map: NonNull<NonNull<T>>,
    pub(crate) front: Cursor<T>,
    pub(crate) back: Cursor<T>,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = next_front!(self);
        // SAFETY: The position holds an initialized value that lives for 'a.
        Some(unsafe { current.ptr().as_ref() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if skip_front!(self, n) {
            self.next()
        } else {
            None
        }
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let current = next_back!(self);
        // SAFETY: The position holds an initialized value that lives for 'a.
        Some(unsafe { current.ptr().as_ref() })
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            _phantom: PhantomData,
            ..*self
        }
    }
}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over mutable references to the elements of a [`Deque`], created by
/// [`Deque::iter_mut`].
pub struct IterMut<'a, T> {
    pub(crate) map: NonNull<NonNull<T>>,
    pub(crate) front: Cursor<T>,
    pub(crate) back: Cursor<T>,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = next_front!(self);
        // SAFETY: Each position is yielded at most once, so the mutable references never alias.
        Some(unsafe { current.ptr().as_mut() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if skip_front!(self, n) {
            self.next()
        } else {
            None
        }
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let current = next_back!(self);
        // SAFETY: Each position is yielded at most once, so the mutable references never alias.
        Some(unsafe { current.ptr().as_mut() })
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// An owned iterator over the elements of a [`Deque`], created by [`Deque::into_iter`]. Segments
/// are released as they are emptied.
pub struct IntoIter<T, A: Allocator = Global> {
    pub(crate) deque: Deque<T, A>,
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len, Some(self.deque.len))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back()
    }
}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T: Debug, A: Allocator> Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque).finish()
    }
}

impl<T, A: Allocator> IntoIterator for Deque<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Deque<T, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Deque<T, A> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// SAFETY: Iter only hands out shared references.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
// SAFETY: Iter only hands out shared references.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}
// SAFETY: IterMut behaves like a unique reference to the elements.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// SAFETY: IterMut behaves like a unique reference to the elements.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
