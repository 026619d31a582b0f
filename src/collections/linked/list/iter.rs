use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::LinkedList;
use super::node::{self, LinkPtr};
use crate::alloc::{Allocator, Global};

impl<T, A: Allocator> LinkedList<T, A> {
    /// Returns an iterator over references to the elements of the list, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.first(),
            back: self.last(),
            len: self.len,
            _phantom: PhantomData,
        }
    }

    /// Returns an iterator over mutable references to the elements of the list, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            front: self.first(),
            back: self.last(),
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

impl<T, A: Allocator> IntoIterator for LinkedList<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            list: self,
        }
    }
}

pub struct IntoIter<T, A: Allocator = Global> {
    // The iterator can just hold the list and pop from either end, which frees each node as it goes.
    pub(crate) list: LinkedList<T, A>,
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {
    fn len(&self) -> usize {
        self.list.len()
    }
}

impl<T: Debug, A: Allocator> Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.list.iter()).finish()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut LinkedList<T, A> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

pub struct IterMut<'a, T> {
    // The nodes themselves are never modified, len tracks how many are left between front and back.
    pub(crate) front: LinkPtr,
    pub(crate) back: LinkPtr,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 { return None; }
        self.len -= 1;

        // SAFETY: There is at least one node left, so front holds a value that is yielded at most
        // once. The list is mutably borrowed for 'a.
        unsafe {
            let value = node::value::<T>(self.front);
            self.front = node::next(self.front);
            Some(value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 { return None; }
        self.len -= 1;

        // SAFETY: As with next, from the other end.
        unsafe {
            let value = node::value::<T>(self.back);
            self.back = node::prev(self.back);
            Some(value)
        }
    }
}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, T: Debug> Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("len", &self.len).finish()
    }
}

// SAFETY: IterMut behaves like a &mut T for each element.
unsafe impl<'a, T: Send> Send for IterMut<'a, T> {}
// SAFETY: As above.
unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> {}

impl<'a, T, A: Allocator> IntoIterator for &'a LinkedList<T, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    pub(crate) front: LinkPtr,
    pub(crate) back: LinkPtr,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 { return None; }
        self.len -= 1;

        // SAFETY: There is at least one node left, so front holds a value. The list is borrowed
        // for 'a.
        unsafe {
            let value = &*node::value::<T>(self.front);
            self.front = node::next(self.front);
            Some(value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 { return None; }
        self.len -= 1;

        // SAFETY: As with next, from the other end.
        unsafe {
            let value = &*node::value::<T>(self.back);
            self.back = node::prev(self.back);
            Some(value)
        }
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T: Debug> Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// SAFETY: Iter behaves like a &T for each element.
unsafe impl<'a, T: Sync> Send for Iter<'a, T> {}
// SAFETY: As above.
unsafe impl<'a, T: Sync> Sync for Iter<'a, T> {}
