use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};

use tracing::trace;

use super::cursor::Cursor;
use crate::alloc::{Allocator, Global, RawBuf, allocate_array, deallocate_array};
use crate::util::error::{CapacityOverflow, IndexOutOfBounds, ReserveError};
use crate::util::result::{ReserveExtension, ResultExtension};

const MIN_MAP: usize = 8;

/// A double-ended queue, storing its elements in fixed-size segments that are indexed through a
/// map of segment pointers.
///
/// Growing at either end allocates at most one new segment, and occasionally reallocates the map.
/// Segments never move, so elements stay at the same address while the Deque grows or shrinks at
/// its ends.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Deque.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `push_front` | `O(1)`* |
/// | `push_back` | `O(1)`* |
/// | `pop_front` | `O(1)` |
/// | `pop_back` | `O(1)` |
/// | `get` | `O(1)` |
/// | `clear` | `O(n)` |
///
/// \* When the map runs out of free slots at the relevant end, it is either recentered or
/// reallocated to double its size, which takes time proportional to the number of segments.
///
/// # Invalidation
/// Pushing or popping at either end never moves any element, so pointers to the remaining elements
/// stay valid. Map reallocation only moves the segment pointers. Positions held by an iterator are
/// protected by the borrow checker.
pub struct Deque<T, A: Allocator = Global> {
    pub(crate) map: RawBuf<NonNull<T>, A>,
    pub(crate) start: Cursor<T>,
    pub(crate) finish: Cursor<T>,
    pub(crate) len: usize,
}

impl<T> Deque<T> {
    /// Creates a new, empty Deque. Nothing is allocated until the first element is pushed.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::segmented::Deque;
    /// let deque: Deque<u8> = Deque::new();
    /// assert!(deque.is_empty());
    /// ```
    pub const fn new() -> Deque<T> {
        Deque::new_in(Global)
    }

    /// Creates a new Deque containing `count` clones of `value`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn from_elem(value: T, count: usize) -> Deque<T>
    where
        T: Clone,
    {
        Deque::from_elem_in(value, count, Global)
    }
}

impl<T, A: Allocator> Deque<T, A> {
    pub const fn new_in(alloc: A) -> Deque<T, A> {
        Deque {
            map: RawBuf::new_in(alloc),
            start: Cursor::dangling(),
            finish: Cursor::dangling(),
            len: 0,
        }
    }

    /// Creates a new Deque containing `count` clones of `value`, allocated from `alloc`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn from_elem_in(value: T, count: usize, alloc: A) -> Deque<T, A>
    where
        T: Clone,
    {
        let mut deque = Deque::new_in(alloc);
        if count == 0 {
            return deque;
        }
        for _ in 1..count {
            deque.push_back(value.clone());
        }
        deque.push_back(value);
        deque
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn allocator(&self) -> &A {
        self.map.allocator()
    }

    /// Appends `value` to the back of the Deque.
    ///
    /// If the segment at the back is full, a new one is allocated before anything is written, so
    /// if that fails, the Deque is left as it was.
    ///
    /// # Panics
    /// Panics if the memory layout of the map would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::segmented::Deque;
    /// let mut deque = Deque::new();
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque.back(), Some(&2));
    /// ```
    pub fn push_back(&mut self, value: T) {
        self.try_reserve_back().handle();

        // SAFETY: finish always points into a live segment at an uninitialized slot.
        unsafe { self.finish.ptr().write(value) }
        // SAFETY: If finish steps off its segment, try_reserve_back has allocated the next one.
        unsafe { self.finish.step_forward(self.map.ptr()) }
        self.len += 1;
    }

    /// Prepends `value` to the front of the Deque.
    ///
    /// # Panics
    /// Panics if the memory layout of the map would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::segmented::Deque;
    /// let mut deque = Deque::new();
    /// deque.push_back(2);
    /// deque.push_front(1);
    /// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    /// ```
    pub fn push_front(&mut self, value: T) {
        self.try_reserve_front().handle();

        // SAFETY: If start steps off its segment, try_reserve_front has allocated the previous one.
        unsafe { self.start.step_back(self.map.ptr()) }
        // SAFETY: The slot before the old start is live and uninitialized.
        unsafe { self.start.ptr().write(value) }
        self.len += 1;
    }

    /// Removes the last element, returning [`None`] if the Deque is empty. A segment left empty at
    /// the back is released.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        if self.finish.offset == 0 {
            let empty = self.finish.first;
            // SAFETY: The Deque isn't empty, so the previous slot is live.
            unsafe { self.finish.step_back(self.map.ptr()) }
            // SAFETY: The segment after finish holds no values and is no longer reachable.
            unsafe { deallocate_array(self.map.allocator(), empty, Cursor::<T>::BLOCK) }
        } else {
            self.finish.offset -= 1;
        }

        self.len -= 1;
        // SAFETY: finish now points at the last element, which is moved out.
        Some(unsafe { self.finish.ptr().read() })
    }

    /// Removes the first element, returning [`None`] if the Deque is empty. A segment left empty at
    /// the front is released.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        // SAFETY: start points at the first element, which is moved out.
        let value = unsafe { self.start.ptr().read() };
        self.len -= 1;

        if self.start.offset + 1 == Cursor::<T>::BLOCK {
            let empty = self.start.first;
            // SAFETY: finish sits within a live segment after start's, so the next slot is live.
            unsafe { self.start.step_forward(self.map.ptr()) }
            // SAFETY: The segment before start holds no values and is no longer reachable.
            unsafe { deallocate_array(self.map.allocator(), empty, Cursor::<T>::BLOCK) }
        } else {
            self.start.offset += 1;
        }

        Some(value)
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    pub fn back(&self) -> Option<&T> {
        self.get(self.len.checked_sub(1)?)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.len.checked_sub(1)?)
    }

    /// Returns a reference to the element at `index`, counted from the front, or [`None`] if it is
    /// out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::segmented::Deque;
    /// let deque: Deque<_> = (0..10_000).collect();
    /// assert_eq!(deque.get(9_000), Some(&9_000));
    /// assert_eq!(deque.get(10_000), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        // SAFETY: The position is initialized and self is borrowed immutably.
        self.position(index).map(|pos| unsafe { pos.ptr().as_ref() })
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        // SAFETY: The position is initialized and self is borrowed mutably.
        self.position(index).map(|pos| unsafe { pos.ptr().as_mut() })
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn at(&self, index: usize) -> &T {
        self.try_at(index).throw()
    }

    pub fn try_at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.get(index).ok_or(IndexOutOfBounds { index, len: self.len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        self.try_at_mut(index).throw()
    }

    pub fn try_at_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let len = self.len;
        self.get_mut(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Drops every element and releases every segment but one. The map is kept.
    pub fn clear(&mut self) {
        if self.map.cap() == 0 { return; }

        let (start, finish) = (self.start, self.finish);
        self.finish = self.start;
        self.len = 0;

        // SAFETY: Every value from start to finish is initialized and is no longer reachable.
        unsafe { self.drop_range(start, finish) }
        for slot in start.slot + 1..=finish.slot {
            // SAFETY: Every slot after start's is live, but now empty and unreachable.
            unsafe {
                deallocate_array(self.map.allocator(), self.map.ptr().add(slot).read(), Cursor::<T>::BLOCK)
            }
        }
    }

    /// Exchanges the contents of self and `other`, following the [`Propagation`] policy of the
    /// allocator.
    ///
    /// [`Propagation`]: crate::alloc::Propagation
    pub fn swap_with(&mut self, other: &mut Deque<T, A>) {
        let policy = self.allocator().propagation();
        if policy.on_swap {
            mem::swap(self, other);
        } else if policy.always_equal {
            self.swap_storage(other);
        } else {
            let empty_mine = Deque::new_in(self.allocator().clone());
            let empty_theirs = Deque::new_in(other.allocator().clone());
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
    pub fn assign(&mut self, mut other: Deque<T, A>) {
        let policy = self.allocator().propagation();
        if policy.on_move {
            *self = other;
        } else if policy.always_equal {
            self.clear();
            self.swap_storage(&mut other);
        } else {
            self.clear();
            self.extend(other);
        }
    }

    /// Exchanges the map, segments and cursors of self and `other`, leaving the allocators where
    /// they are.
    fn swap_storage(&mut self, other: &mut Deque<T, A>) {
        self.map.swap_storage(&mut other.map);
        mem::swap(&mut self.start, &mut other.start);
        mem::swap(&mut self.finish, &mut other.finish);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Returns the Cursor for `index`, if it is in bounds.
    pub(crate) fn position(&self, index: usize) -> Option<Cursor<T>> {
        if index >= self.len {
            return None;
        }
        // SAFETY: index < len, so the resulting position is before finish.
        Some(unsafe { self.start.forward(self.map.ptr(), index) })
    }

    /// Allocates the map and its first segment, positioning both cursors in the middle.
    fn try_init(&mut self) -> Result<(), ReserveError> {
        let map = RawBuf::<NonNull<T>, A>::try_with_cap_in(MIN_MAP, self.map.allocator().clone())?;
        let segment = allocate_array::<T, A>(map.allocator(), Cursor::<T>::BLOCK)?;
        let slot = MIN_MAP / 2;

        // SAFETY: slot < MIN_MAP.
        unsafe { map.ptr().add(slot).write(segment) }
        self.map = map;
        self.start = Cursor {
            slot,
            first: segment,
            offset: 0,
        };
        self.finish = self.start;
        Ok(())
    }

    /// Makes sure that finish can step forward after a value is written at it.
    fn try_reserve_back(&mut self) -> Result<(), ReserveError> {
        if self.map.cap() == 0 {
            self.try_init()?;
        }
        if self.finish.offset + 1 < Cursor::<T>::BLOCK {
            return Ok(());
        }

        if self.finish.slot + 1 >= self.map.cap() {
            self.try_reserve_map(1, false)?;
        }
        let segment = allocate_array::<T, A>(self.map.allocator(), Cursor::<T>::BLOCK)?;
        // SAFETY: The map has a free slot after finish.
        unsafe { self.map.ptr().add(self.finish.slot + 1).write(segment) }
        Ok(())
    }

    /// Makes sure that start can step back.
    fn try_reserve_front(&mut self) -> Result<(), ReserveError> {
        if self.map.cap() == 0 {
            self.try_init()?;
        }
        if self.start.offset > 0 {
            return Ok(());
        }

        if self.start.slot == 0 {
            self.try_reserve_map(1, true)?;
        }
        let segment = allocate_array::<T, A>(self.map.allocator(), Cursor::<T>::BLOCK)?;
        // SAFETY: The map has a free slot before start.
        unsafe { self.map.ptr().add(self.start.slot - 1).write(segment) }
        Ok(())
    }

    /// Makes room in the map for `extra` more segments at one end. If the map is more than twice as
    /// large as needed, the live slots are recentered in place, otherwise the map is reallocated.
    fn try_reserve_map(&mut self, extra: usize, at_front: bool) -> Result<(), ReserveError> {
        let old_slots = self.finish.slot - self.start.slot + 1;
        let needed = old_slots.checked_add(extra).ok_or(CapacityOverflow)?;
        let map_size = self.map.cap();
        let skip = if at_front { extra } else { 0 };

        let new_start = if needed.checked_mul(2).is_some_and(|double| map_size > double) {
            let new_start = (map_size - needed) / 2 + skip;
            // SAFETY: Both ranges lie within the map. ptr::copy handles the overlap.
            unsafe {
                ptr::copy(
                    self.map.ptr().add(self.start.slot).as_ptr(),
                    self.map.ptr().add(new_start).as_ptr(),
                    old_slots,
                );
            }
            new_start
        } else {
            let new_size = cmp::max(
                cmp::max(map_size.checked_mul(2).ok_or(CapacityOverflow)?, needed + 2),
                MIN_MAP,
            );
            let new_map = RawBuf::try_with_cap_in(new_size, self.map.allocator().clone())?;
            let new_start = (new_size - needed) / 2 + skip;
            // SAFETY: The new map has room for old_slots from new_start, and is a separate
            // allocation.
            unsafe {
                ptr::copy_nonoverlapping(
                    self.map.ptr().add(self.start.slot).as_ptr(),
                    new_map.ptr().add(new_start).as_ptr(),
                    old_slots,
                );
            }
            // The old map only held copies of segment pointers, so dropping it frees nothing else.
            self.map = new_map;
            trace!(old_size = map_size, new_size, segments = old_slots, "deque.map.realloc");
            new_start
        };

        self.start.slot = new_start;
        self.finish.slot = new_start + old_slots - 1;
        Ok(())
    }

    /// Drops every value between `from` and `to`.
    ///
    /// # Safety
    /// Every position in the range must be initialized and must not be used afterwards.
    unsafe fn drop_range(&mut self, from: Cursor<T>, to: Cursor<T>) {
        for slot in from.slot..=to.slot {
            let low = if slot == from.slot { from.offset } else { 0 };
            let high = if slot == to.slot { to.offset } else { Cursor::<T>::BLOCK };
            // SAFETY: The caller guarantees that the range is initialized. Every slot from
            // from.slot to to.slot is live.
            unsafe {
                let first = self.map.ptr().add(slot).read();
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first.add(low).as_ptr(), high - low));
            }
        }
    }
}

impl<T, A: Allocator> Drop for Deque<T, A> {
    fn drop(&mut self) {
        if self.map.cap() == 0 { return; }

        self.clear();
        // SAFETY: clear leaves exactly one live, empty segment at start.
        unsafe { deallocate_array(self.map.allocator(), self.start.first, Cursor::<T>::BLOCK) }

        // Implicitly drop self.map, which releases the map itself.
    }
}

impl<T, A: Allocator> Index<usize> for Deque<T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.at(index)
    }
}

impl<T, A: Allocator> IndexMut<usize> for Deque<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.at_mut(index)
    }
}

impl<T, A: Allocator> Extend<T> for Deque<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Deque::new();
        deque.extend(iter);
        deque
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    fn from(value: [T; N]) -> Self {
        Deque::from_iter(value)
    }
}

impl<T, A: Allocator + Default> Default for Deque<T, A> {
    fn default() -> Self {
        Deque::new_in(A::default())
    }
}

impl<T: Clone, A: Allocator> Clone for Deque<T, A> {
    fn clone(&self) -> Self {
        let mut deque = Deque::new_in(self.allocator().select_on_clone());
        // A panicking clone drops the partial copy, which releases everything it allocated.
        deque.extend(self.iter().cloned());
        deque
    }

    fn clone_from(&mut self, source: &Self) {
        if source.allocator().propagation().on_copy {
            *self = Deque::new_in(source.allocator().clone());
        } else {
            self.clear();
        }
        self.extend(source.iter().cloned());
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for Deque<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator> Eq for Deque<T, A> {}

impl<T: PartialOrd, A: Allocator> PartialOrd for Deque<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, A: Allocator> Ord for Deque<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, A: Allocator> Hash for Deque<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for item in self {
            item.hash(state);
        }
    }
}

impl<T: Debug, A: Allocator> Debug for Deque<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// SAFETY: The Deque exclusively owns its segments and map, so it is Send when T and A are.
unsafe impl<T: Send, A: Allocator + Send> Send for Deque<T, A> {}
// SAFETY: The Deque's safe API obeys the borrow checker, with no interior mutability.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Deque<T, A> {}
