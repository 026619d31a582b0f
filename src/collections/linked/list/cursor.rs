use std::fmt::{self, Debug, Formatter};

use super::LinkedList;
use super::node::{self, LinkPtr};
use crate::alloc::{Allocator, Global};
use crate::util::result::ResultExtension;

/// A cursor over a [`LinkedList`] that can move in both directions and edit the list around its
/// position in `O(1)`. See [`LinkedList::cursor_front_mut`], [`LinkedList::cursor_back_mut`] and
/// [`LinkedList::cursor_at_mut`] to create one.
///
/// A cursor always rests on an element, or on the "ghost" position between the back and the front
/// of the list, which is where the sentinel lives. Moving past either end lands on the ghost, and
/// moving again wraps around to the other end.
///
/// # Examples
/// ```
/// # use standard_containers::collections::linked::LinkedList;
/// let mut list = LinkedList::from([1, 2, 4]);
/// let mut cursor = list.cursor_front_mut();
/// cursor.move_next().move_next();
/// cursor.insert_before(3);
/// assert_eq!(cursor.current(), Some(&mut 4));
/// assert_eq!(cursor.index(), Some(3));
/// assert_eq!(list, LinkedList::from([1, 2, 3, 4]));
/// ```
pub struct CursorMut<'a, T, A: Allocator = Global> {
    pub(crate) list: &'a mut LinkedList<T, A>,
    pub(crate) current: LinkPtr,
    // Equal to the list's length while on the ghost.
    pub(crate) index: usize,
}

impl<T, A: Allocator> LinkedList<T, A> {
    /// Returns a cursor resting on the first element, or on the ghost if the list is empty.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, A> {
        CursorMut {
            current: self.first(),
            index: 0,
            list: self,
        }
    }

    /// Returns a cursor resting on the last element, or on the ghost if the list is empty.
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, A> {
        CursorMut {
            current: self.last(),
            index: self.len.saturating_sub(1),
            list: self,
        }
    }

    /// Returns a cursor resting on the element at `index`, or on the ghost if `index` is equal to
    /// the length of the list.
    ///
    /// # Panics
    /// Panics if `index` is greater than the length of the list.
    pub fn cursor_at_mut(&mut self, index: usize) -> CursorMut<'_, T, A> {
        self.check_position(index).throw();
        CursorMut {
            current: self.seek(index),
            index,
            list: self,
        }
    }
}

impl<'a, T, A: Allocator> CursorMut<'a, T, A> {
    /// Returns the index of the current element, or [`None`] on the ghost.
    pub fn index(&self) -> Option<usize> {
        (!self.is_ghost()).then_some(self.index)
    }

    /// Returns true if the cursor is on the ghost position rather than an element.
    pub fn is_ghost(&self) -> bool {
        self.current == self.list.sentinel
    }

    /// Returns a mutable reference to the current element, or [`None`] on the ghost.
    pub fn current(&mut self) -> Option<&mut T> {
        // SAFETY: The cursor isn't on the ghost, so current holds a value of the borrowed list.
        (!self.is_ghost()).then(|| unsafe { node::value::<T>(self.current) })
    }

    /// Returns a reference to the element after the cursor, wrapping from the ghost to the front.
    pub fn peek_next(&self) -> Option<&T> {
        // SAFETY: current is live, so its neighbour is too.
        let next = unsafe { node::next(self.current) };
        // SAFETY: next isn't the sentinel, so it holds a value.
        (next != self.list.sentinel).then(|| unsafe { &*node::value::<T>(next) })
    }

    /// Returns a reference to the element before the cursor, wrapping from the ghost to the back.
    pub fn peek_prev(&self) -> Option<&T> {
        // SAFETY: current is live, so its neighbour is too.
        let prev = unsafe { node::prev(self.current) };
        // SAFETY: prev isn't the sentinel, so it holds a value.
        (prev != self.list.sentinel).then(|| unsafe { &*node::value::<T>(prev) })
    }

    /// Moves the cursor to the next element. From the back this lands on the ghost, and from the
    /// ghost it wraps to the front.
    pub fn move_next(&mut self) -> &mut Self {
        if self.is_ghost() {
            self.index = 0;
        } else {
            self.index += 1;
        }
        // SAFETY: current is part of the list.
        self.current = unsafe { node::next(self.current) };
        self
    }

    /// Moves the cursor to the previous element. From the front this lands on the ghost, and from
    /// the ghost it wraps to the back.
    pub fn move_prev(&mut self) -> &mut Self {
        if self.is_ghost() {
            self.index = self.list.len.saturating_sub(1);
        } else if self.index == 0 {
            self.index = self.list.len;
        } else {
            self.index -= 1;
        }
        // SAFETY: current is part of the list.
        self.current = unsafe { node::prev(self.current) };
        self
    }

    /// Inserts `value` directly before the cursor. On the ghost, this pushes to the back. The
    /// cursor stays on the same element.
    pub fn insert_before(&mut self, value: T) {
        // SAFETY: current is part of the list.
        unsafe { self.list.insert_before(self.current, value); }
        self.index += 1;
    }

    /// Inserts `value` directly after the cursor. On the ghost, this pushes to the front. The
    /// cursor stays on the same element.
    pub fn insert_after(&mut self, value: T) {
        // SAFETY: current is part of the list, and so is the node after it.
        unsafe { self.list.insert_before(node::next(self.current), value); }
        if self.is_ghost() {
            self.index += 1;
        }
    }

    /// Removes the current element and returns it, moving the cursor onto the next element. Does
    /// nothing on the ghost.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.is_ghost() { return None; }

        // SAFETY: The cursor isn't on the ghost, so current is a value node of the list. The next
        // node is read before current is freed.
        unsafe {
            let after = node::next(self.current);
            let value = self.list.erase(self.current);
            self.current = after;
            Some(value)
        }
    }

    /// Moves every element of `other` into the list directly before the cursor, leaving `other`
    /// empty. The cursor stays on the same element.
    ///
    /// Nodes are relinked when the allocator reports
    /// [`always_equal`](crate::alloc::Propagation::always_equal), otherwise each value is moved
    /// into a node from the list's allocator.
    pub fn splice_before(&mut self, other: &mut LinkedList<T, A>) {
        let count = other.len;
        if count == 0 { return; }

        if self.list.relinks_nodes() {
            // SAFETY: current is part of the list, and other's whole chain is a valid range of a
            // different list.
            unsafe { node::transfer(self.current, other.first(), other.sentinel) }
            self.list.len += count;
            other.len = 0;
        } else {
            while let Some(value) = other.pop_front() {
                // SAFETY: As above.
                unsafe { self.list.insert_before(self.current, value); }
            }
        }
        self.index += count;
    }

    /// Returns a shared reference to the list that the cursor is over.
    pub fn as_list(&self) -> &LinkedList<T, A> {
        self.list
    }
}

impl<'a, T: Debug, A: Allocator> Debug for CursorMut<'a, T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("list", &self.list)
            .field("index", &self.index())
            .finish()
    }
}
