use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut, Range};

use super::node::{self, LinkPtr, Links, Node};
use crate::alloc::{Allocator, Global, allocate_value, deallocate_value};
use crate::collections::contiguous::Vector;
use crate::util::error::IndexOutOfBounds;
use crate::util::fmt::DebugIter;
use crate::util::result::{ReserveExtension, ResultExtension};

/// A circular list with links in both directions, anchored by a heap-allocated sentinel that holds
/// no value. See also: [`CursorMut`](super::CursorMut) for traversal with `O(1)` edits.
///
/// Every structural change is made by relinking nodes, so values are never moved once they have
/// been pushed. Splicing, merging, sorting and reversing all keep each value at the same address.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the LinkedList.
/// - `i`: The index of the item in question.
/// - `k`: The number of items spliced from the other list.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front/back` | `O(1)` |
/// | `push_front/back` | `O(1)` |
/// | `pop_front/back` | `O(1)` |
/// | `get` | `O(min(i, n-i))` |
/// | `insert` | `O(min(i, n-i))` |
/// | `remove` | `O(min(i, n-i))` |
/// | `append` | `O(1)`* |
/// | `splice_all` | `O(min(i, n-i))`* |
/// | `splice` | `O(min(i, n-i) + k)`* |
/// | `merge` | `O(n+m)` |
/// | `sort` | `O(n log n)` |
/// | `reverse` | `O(n)` |
/// | `contains` | `O(n)` |
///
/// \* Nodes from the other list are only relinked when the allocator reports
/// [`always_equal`](crate::alloc::Propagation::always_equal), and a whole list is relinked without
/// visiting its nodes. Otherwise every value is moved into a node from this list's allocator, at
/// `O(k)` cost.
///
/// As a general note, modern computer architecture isn't kind to linked lists, (or more
/// importantly, favours contiguous collections) because all `O(i)` or `O(n)` operations will
/// consist primarily of cache misses. For this reason, [`Vector`] should be preferred for most
/// applications unless LinkedList's `O(1)` splicing is being heavily utilized.
pub struct LinkedList<T, A: Allocator = Global> {
    pub(crate) sentinel: LinkPtr,
    pub(crate) len: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<Node<T>>,
}

impl<T> LinkedList<T> {
    /// Creates a new LinkedList with no elements. Only the sentinel is allocated.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::linked::LinkedList;
    /// let list: LinkedList<u8> = LinkedList::new();
    /// assert!(list.is_empty());
    /// assert_eq!(format!("{list}"), "()");
    /// ```
    pub fn new() -> LinkedList<T> {
        LinkedList::new_in(Global)
    }

    /// Creates a new LinkedList containing `count` clones of `value`.
    pub fn from_elem(value: T, count: usize) -> LinkedList<T>
    where
        T: Clone,
    {
        let mut list = LinkedList::new();
        list.resize(count, value);
        list
    }
}

impl<T, A: Allocator> LinkedList<T, A> {
    /// Creates a new LinkedList with no elements, allocating its sentinel from `alloc`.
    pub fn new_in(alloc: A) -> LinkedList<T, A> {
        let sentinel = allocate_value(&alloc, Links {
            prev: LinkPtr::dangling(),
            next: LinkPtr::dangling(),
        }).handle();

        // SAFETY: The sentinel has just been allocated, an empty list links it to itself.
        unsafe {
            (*sentinel.as_ptr()).prev = sentinel;
            (*sentinel.as_ptr()).next = sentinel;
        }

        LinkedList {
            sentinel,
            len: 0,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Returns the length of the LinkedList.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the LinkedList contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a reference to the first element in the list, if it exists.
    pub fn front(&self) -> Option<&T> {
        // SAFETY: The list isn't empty, so the node after the sentinel holds a value.
        (!self.is_empty()).then(|| unsafe { &*node::value(self.first()) })
    }

    /// Returns a mutable reference to the first element in the list, if it exists.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: The list isn't empty, so the node after the sentinel holds a value.
        (!self.is_empty()).then(|| unsafe { node::value(self.first()) })
    }

    /// Returns a reference to the last element in the list, if it exists.
    pub fn back(&self) -> Option<&T> {
        // SAFETY: The list isn't empty, so the node before the sentinel holds a value.
        (!self.is_empty()).then(|| unsafe { &*node::value(self.last()) })
    }

    /// Returns a mutable reference to the last element in the list, if it exists.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: The list isn't empty, so the node before the sentinel holds a value.
        (!self.is_empty()).then(|| unsafe { node::value(self.last()) })
    }

    /// Add the provided element to the front of the LinkedList.
    pub fn push_front(&mut self, value: T) {
        // SAFETY: The first node (or the sentinel) is part of this list.
        unsafe { self.insert_before(self.first(), value); }
    }

    /// Add the provided element to the back of the LinkedList.
    pub fn push_back(&mut self, value: T) {
        // SAFETY: The sentinel is part of this list.
        unsafe { self.insert_before(self.sentinel, value); }
    }

    /// Removes the first element from the list and returns it, if the list isn't empty.
    pub fn pop_front(&mut self) -> Option<T> {
        // SAFETY: The list isn't empty, so the first node holds a value.
        (!self.is_empty()).then(|| unsafe { self.erase(self.first()) })
    }

    /// Removes the last element from the list and returns it, if the list isn't empty.
    pub fn pop_back(&mut self) -> Option<T> {
        // SAFETY: The list isn't empty, so the last node holds a value.
        (!self.is_empty()).then(|| unsafe { self.erase(self.last()) })
    }

    /// Returns a reference to the element at the provided `index`, panicking on a failure.
    ///
    /// The same functionality can be achieved using the [`Index`] operator.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    /// Returns a reference to the element at the provided `index`, returning an [`Err`] on a
    /// failure rather than panicking.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the node holds a value.
        Ok(unsafe { &*node::value(self.seek(index)) })
    }

    /// Returns a mutable reference to the element at the provided `index`, panicking on a failure.
    ///
    /// The same functionality can be achieved using the [`IndexMut`] operator.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    /// Returns a mutable reference to the element at the provided `index`, returning an [`Err`] on
    /// a failure rather than panicking.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the node holds a value.
        Ok(unsafe { node::value(self.seek(index)) })
    }

    /// Inserts the provided value so that it ends up at `index`. Inserting at `len` is equivalent
    /// to [`push_back`](LinkedList::push_back).
    ///
    /// # Panics
    /// Panics if `index` is greater than the length of the LinkedList.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        self.check_position(index)?;
        // SAFETY: index <= len, so seek returns a node of this list or the sentinel.
        unsafe { self.insert_before(self.seek(index), value); }
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the node holds a value.
        Ok(unsafe { self.erase(self.seek(index)) })
    }

    /// Replaces the element at `index` with `new_value`, returning the old value.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.try_replace(index, new_value).throw()
    }

    pub fn try_replace(&mut self, index: usize, new_value: T) -> Result<T, IndexOutOfBounds> {
        Ok(mem::replace(self.try_get_mut(index)?, new_value))
    }

    /// Moves every element of `other` to the end of self, leaving `other` empty.
    pub fn append(&mut self, other: &mut LinkedList<T, A>) {
        self.splice_all(self.len, other);
    }

    /// Moves every element of `other` into self, so that the first of them ends up at `at`.
    ///
    /// # Panics
    /// Panics if `at` is greater than the length of the LinkedList.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::linked::LinkedList;
    /// let mut list = LinkedList::from([1, 4]);
    /// let mut other = LinkedList::from([2, 3]);
    /// list.splice_all(1, &mut other);
    /// assert_eq!(list, LinkedList::from([1, 2, 3, 4]));
    /// assert!(other.is_empty());
    /// ```
    pub fn splice_all(&mut self, at: usize, other: &mut LinkedList<T, A>) {
        self.check_position(at).throw();
        if other.is_empty() { return; }

        let pos = self.seek(at);
        if self.relinks_nodes() {
            // SAFETY: pos is part of self, and other's whole chain is a valid range of a different
            // list.
            unsafe { node::transfer(pos, other.first(), other.sentinel) }
            self.len += other.len;
            other.len = 0;
        } else {
            while let Some(value) = other.pop_front() {
                // SAFETY: pos is part of self and stays live while values are inserted before it.
                unsafe { self.insert_before(pos, value); }
            }
        }
    }

    /// Moves the elements of `other` within `range` into self, so that the first of them ends up at
    /// `at`.
    ///
    /// # Panics
    /// Panics if `at` is greater than the length of self, or if `range` isn't a valid range of
    /// positions within `other`.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::linked::LinkedList;
    /// let mut list = LinkedList::from(['a', 'e']);
    /// let mut other = LinkedList::from(['x', 'b', 'c', 'd', 'y']);
    /// list.splice(1, &mut other, 1..4);
    /// assert_eq!(list.iter().collect::<String>(), "abcde");
    /// assert_eq!(other.iter().collect::<String>(), "xy");
    /// ```
    pub fn splice(&mut self, at: usize, other: &mut LinkedList<T, A>, range: Range<usize>) {
        self.check_position(at).throw();
        other.check_position(range.end).throw();
        if range.start > range.end {
            Err::<(), _>(IndexOutOfBounds { index: range.start, len: range.end }).throw()
        }

        let count = range.end - range.start;
        if count == 0 { return; }

        let pos = self.seek(at);
        let first = other.seek(range.start);
        // Counting the nodes in the range is the cost of a partial splice.
        // SAFETY: The range lies within other, so every node walked is live.
        let last = unsafe { seek_forward(first, count) };

        if self.relinks_nodes() {
            // SAFETY: pos is part of self, [first, last) is a valid range of other, which is a
            // different list.
            unsafe { node::transfer(pos, first, last) }
            self.len += count;
            other.len -= count;
        } else {
            let mut current = first;
            while current != last {
                // SAFETY: current is a node within the range of other, which hasn't been visited.
                unsafe {
                    let after = node::next(current);
                    let value = other.erase(current);
                    self.insert_before(pos, value);
                    current = after;
                }
            }
        }
    }

    /// Removes every element for which `predicate` returns true, returning the number removed.
    pub fn remove_if<F: FnMut(&T) -> bool>(&mut self, mut predicate: F) -> usize {
        let mut removed = 0;
        let mut current = self.first();
        while current != self.sentinel {
            // SAFETY: current is a live node of this list.
            unsafe {
                let after = node::next(current);
                if predicate(node::value::<T>(current)) {
                    drop(self.erase(current));
                    removed += 1;
                }
                current = after;
            }
        }
        removed
    }

    /// Keeps only the elements for which `keep` returns true.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        self.remove_if(|value| !keep(value));
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        while self.pop_back().is_some() {}
    }

    /// Resizes the list to `new_len`, either dropping elements from the back or appending clones of
    /// `value`.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        while self.len > new_len {
            self.pop_back();
        }
        if self.len < new_len {
            for _ in self.len + 1..new_len {
                self.push_back(value.clone());
            }
            self.push_back(value);
        }
    }

    /// Exchanges the contents of self and `other`, following the [`Propagation`] policy of the
    /// allocator.
    ///
    /// [`Propagation`]: crate::alloc::Propagation
    pub fn swap_with(&mut self, other: &mut LinkedList<T, A>) {
        let policy = self.alloc.propagation();
        if policy.on_swap {
            mem::swap(self, other);
        } else if policy.always_equal {
            self.swap_nodes(other);
        } else {
            let empty_mine = LinkedList::new_in(self.alloc.clone());
            let empty_theirs = LinkedList::new_in(other.alloc.clone());
            let mine = mem::replace(self, empty_mine);
            let theirs = mem::replace(other, empty_theirs);
            self.extend(theirs);
            other.extend(mine);
        }
    }

    /// Replaces the contents of self with those of `other`, following the [`Propagation`] policy
    /// of the allocator.
    ///
    /// [`Propagation`]: crate::alloc::Propagation
    pub fn assign(&mut self, mut other: LinkedList<T, A>) {
        let policy = self.alloc.propagation();
        if policy.on_move {
            *self = other;
        } else if policy.always_equal {
            self.clear();
            self.swap_nodes(&mut other);
        } else {
            self.clear();
            self.extend(other);
        }
    }

    /// Walks the whole chain in both directions, checking that every node's neighbours point back
    /// at it and that the number of nodes matches the cached length.
    pub fn verify_links(&self) -> bool {
        let mut count = 0;
        let mut current = self.sentinel;
        loop {
            // SAFETY: Every node reachable from the sentinel is live.
            let (after, before) = unsafe { (node::next(current), node::prev(current)) };
            // SAFETY: As above.
            if unsafe { node::prev(after) != current || node::next(before) != current } {
                return false;
            }
            current = after;
            if current == self.sentinel {
                break;
            }
            count += 1;
            if count > self.len {
                return false;
            }
        }
        count == self.len
    }

    /// Allocates a node for `value` and links it before `pos`, returning the new node.
    ///
    /// # Panics
    /// Panics if the node can't be allocated, without touching the list.
    ///
    /// # Safety
    /// `pos` must be a node of this list or its sentinel.
    pub(crate) unsafe fn insert_before(&mut self, pos: LinkPtr, value: T) -> LinkPtr {
        let node = allocate_value(&self.alloc, Node::new(value)).handle().cast::<Links>();
        // SAFETY: node is fresh and pos is part of this list.
        unsafe { node::link(pos, node) }
        self.len += 1;
        node
    }

    /// Unlinks `node` and frees it, returning its value.
    ///
    /// # Safety
    /// `node` must be a node of this list, other than the sentinel.
    pub(crate) unsafe fn erase(&mut self, node: LinkPtr) -> T {
        // SAFETY: The caller guarantees that node is a live value node of this list, allocated by
        // insert_before with an equivalent allocator.
        unsafe {
            node::unlink(node);
            self.len -= 1;
            deallocate_value(&self.alloc, node.cast::<Node<T>>()).value
        }
    }

    /// Exchanges the chains of self and `other`, leaving the allocators where they are.
    pub(crate) fn swap_nodes(&mut self, other: &mut LinkedList<T, A>) {
        mem::swap(&mut self.sentinel, &mut other.sentinel);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Whether nodes from another list can be relinked into self, to be freed by self's allocator.
    pub(crate) fn relinks_nodes(&self) -> bool {
        self.alloc.propagation().always_equal
    }

    pub(crate) fn first(&self) -> LinkPtr {
        // SAFETY: The sentinel is always live.
        unsafe { node::next(self.sentinel) }
    }

    pub(crate) fn last(&self) -> LinkPtr {
        // SAFETY: The sentinel is always live.
        unsafe { node::prev(self.sentinel) }
    }

    /// Returns the node at `index`, or the sentinel for `index == len`, walking from whichever end
    /// is closer.
    pub(crate) fn seek(&self, index: usize) -> LinkPtr {
        debug_assert!(index <= self.len);
        // SAFETY: Every step stays within the chain, which is circular.
        unsafe {
            if index <= self.len / 2 {
                seek_forward(self.first(), index)
            } else {
                seek_backward(self.sentinel, self.len - index)
            }
        }
    }

    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index < self.len {
            Ok(())
        } else {
            Err(IndexOutOfBounds { index, len: self.len })
        }
    }

    /// Checks that `index` is a position that an element can be inserted at.
    pub(crate) const fn check_position(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index <= self.len {
            Ok(())
        } else {
            Err(IndexOutOfBounds { index, len: self.len })
        }
    }
}

impl<T: PartialEq, A: Allocator> LinkedList<T, A> {
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|element| element == item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|element| element == item)
    }
}

/// Walks `count` nodes forward from `node`.
///
/// # Safety
/// Every node walked must be live.
pub(crate) unsafe fn seek_forward(mut node: LinkPtr, count: usize) -> LinkPtr {
    for _ in 0..count {
        // SAFETY: The caller guarantees that each node is live.
        node = unsafe { node::next(node) };
    }
    node
}

/// Walks `count` nodes backward from `node`.
///
/// # Safety
/// Every node walked must be live.
pub(crate) unsafe fn seek_backward(mut node: LinkPtr, count: usize) -> LinkPtr {
    for _ in 0..count {
        // SAFETY: The caller guarantees that each node is live.
        node = unsafe { node::prev(node) };
    }
    node
}

impl<T, A: Allocator> Index<usize> for LinkedList<T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl<T, A: Allocator> IndexMut<usize> for LinkedList<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index)
    }
}

impl<T, A: Allocator> Extend<T> for LinkedList<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(value: [T; N]) -> Self {
        LinkedList::from_iter(value)
    }
}

impl<T, A: Allocator + Default> Default for LinkedList<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: Allocator> Drop for LinkedList<T, A> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: The sentinel was allocated by new_in with this allocator (or one that frees
        // memory interchangeably with it) and nothing links to it anymore.
        unsafe { drop(deallocate_value(&self.alloc, self.sentinel)) }
    }
}

impl<T: Clone, A: Allocator> Clone for LinkedList<T, A> {
    fn clone(&self) -> Self {
        let mut list = LinkedList::new_in(self.alloc.select_on_clone());
        // A panicking clone drops the partial copy along with its nodes.
        list.extend(self.iter().cloned());
        list
    }

    fn clone_from(&mut self, source: &Self) {
        if source.alloc.propagation().on_copy {
            *self = LinkedList::new_in(source.alloc.clone());
        } else {
            self.clear();
        }
        self.extend(source.iter().cloned());
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for LinkedList<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator> Eq for LinkedList<T, A> {}

impl<T: PartialOrd, A: Allocator> PartialOrd for LinkedList<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, A: Allocator> Ord for LinkedList<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, A: Allocator> Hash for LinkedList<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for item in self {
            item.hash(state);
        }

        // Terminate variable length hashing sequence.
        0xFF.hash(state);
    }
}

impl<T: Debug, A: Allocator> Debug for LinkedList<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedList")
            .field("contents", &DebugIter::new(self.iter()))
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Debug, A: Allocator> Display for LinkedList<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({})",
            self.iter()
                .map(|i| format!("{i:?}"))
                .collect::<Vector<String>>()
                .join(") -> (")
        )
    }
}

// SAFETY: The LinkedList exclusively owns all of its nodes, so it is Send when T and A are.
unsafe impl<T: Send, A: Allocator + Send> Send for LinkedList<T, A> {}
// SAFETY: The LinkedList's safe API obeys the borrow checker, with no interior mutability.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for LinkedList<T, A> {}
