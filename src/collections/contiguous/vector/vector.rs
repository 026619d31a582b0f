use std::borrow::{Borrow, BorrowMut};
use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::alloc::{Allocator, Global, RawBuf, Region};
use crate::util::error::{CapacityOverflow, IndexOutOfBounds, ReserveError};
use crate::util::result::{ReserveExtension, ResultExtension};

const MIN_CAP: usize = 1;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection, backed by a single [`RawBuf`] allocation.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
/// - `m`: The number of items in the second Vector or slice.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `push_unchecked` | `O(1)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `replace` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `append` | `O(n+m)` |
/// | `extend_from_slice` | `O(n+m)` |
/// | `contains` | `O(n)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push` will take `O(n)`.
/// Because the capacity doubles each time, `n` pushes perform `O(n)` moves in total.
///
/// \** If the Vector has enough capacity for the additional items already, `reserve` is `O(1)`.
///
/// # Invalidation
/// Every method that changes the capacity (growth during `push`, `insert` or `extend`, `reserve`,
/// `shrink_to_fit`, assignment) moves all elements into a new allocation. Raw pointers obtained
/// through [`as_ptr`](Vector::as_ptr) or from the slice before that point dangle afterwards.
/// References and slice iterators are protected from this by the borrow checker.
///
/// # Panic Safety
/// Growth either completes or leaves the Vector untouched. Methods that clone several values into
/// the Vector (`from_elem`, `resize`, `extend_from_slice`, `clone`) drop every value they have
/// already cloned, in reverse order, if a clone panics, leaving the original contents as they were.
pub struct Vector<T, A: Allocator = Global> {
    pub(crate) buf: RawBuf<T, A>,
    pub(crate) len: usize,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated when the capacity
    /// changes.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 0);
    /// ```
    pub const fn new() -> Vector<T> {
        Vector::new_in(Global)
    }

    /// Creates a new Vector with capacity exactly equal to the provided value, allowing values to
    /// be added without reallocation.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// vec.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> Vector<T> {
        Vector::with_cap_in(cap, Global)
    }

    /// Creates a new Vector containing `count` clones of `value`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let vec = Vector::from_elem("ab", 3);
    /// assert_eq!(&*vec, &["ab", "ab", "ab"]);
    /// assert_eq!(vec.cap(), 3);
    /// ```
    pub fn from_elem(value: T, count: usize) -> Vector<T>
    where
        T: Clone,
    {
        Vector::from_elem_in(value, count, Global)
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// Creates a new, empty Vector that will allocate from `alloc`.
    pub const fn new_in(alloc: A) -> Vector<T, A> {
        Vector {
            buf: RawBuf::new_in(alloc),
            len: 0,
        }
    }

    /// Creates a new Vector with capacity exactly `cap`, allocated from `alloc`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn with_cap_in(cap: usize, alloc: A) -> Vector<T, A> {
        Vector {
            buf: RawBuf::with_cap_in(cap, alloc),
            len: 0,
        }
    }

    /// Creates a new Vector containing `count` clones of `value`, allocated from `alloc`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`], or if cloning `value` panics, after
    /// dropping all clones made so far and releasing the allocation.
    pub fn from_elem_in(value: T, count: usize, alloc: A) -> Vector<T, A>
    where
        T: Clone,
    {
        let mut vec = Vector::with_cap_in(count, alloc);
        if count == 0 {
            return vec;
        }

        // SAFETY: The Vector has exactly count uninitialized slots.
        let mut region = unsafe { Region::new(vec.buf.ptr()) };
        for _ in 1..count {
            // SAFETY: At most count - 1 values are written here.
            unsafe { region.push(value.clone()); }
        }
        // SAFETY: This is the last of the count slots.
        unsafe { region.push(value); }

        vec.len = region.commit();
        vec
    }

    /// Returns the length of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let vec = Vector::from([1_u8, 2, 3]);
    /// assert_eq!(vec.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector contains no elements.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::new();
    /// assert!(vec.is_empty());
    /// vec.push(1);
    /// assert!(!vec.is_empty())
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Vector. Unlike [`Vec`], the capacity is exactly the value
    /// provided to [`with_cap`](Vector::with_cap), [`reserve`](Vector::reserve) or left by
    /// [`shrink_to_fit`](Vector::shrink_to_fit). Pushes and batch appends grow it geometrically.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub const fn cap(&self) -> usize {
        self.buf.cap()
    }

    /// Returns a reference to the allocator used by this Vector.
    pub const fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Returns a raw pointer to the start of the Vector's allocation. The pointer is only valid
    /// until the next reallocation, see [Invalidation](Vector#invalidation).
    pub const fn as_ptr(&self) -> *const T {
        self.buf.ptr().as_ptr()
    }

    /// Returns a raw mutable pointer to the start of the Vector's allocation. The pointer is only
    /// valid until the next reallocation, see [Invalidation](Vector#invalidation).
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr().as_ptr()
    }

    /// Push the provided value onto the end of the Vector, increasing the capacity if required.
    ///
    /// When full, the capacity grows to `max(1, 2 * cap)`.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 8);
    /// ```
    pub fn push(&mut self, value: T) {
        if self.len == self.cap() {
            self.grow();
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
    }

    /// Push a value produced by `make` onto the end of the Vector, returning a mutable reference
    /// to it in its final position.
    ///
    /// `make` is called before the Vector is touched, so if it panics, the Vector is unchanged.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn push_with<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        let value = make();
        self.push(value);
        // SAFETY: The Vector has just had a value pushed to it, so len - 1 is initialized.
        unsafe { self.buf.ptr().add(self.len - 1).as_mut() }
    }

    /// Push the provided value onto the end of the Vector, assuming that there is enough capacity
    /// to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the Vector has enough capacity to add the provided
    /// value, using methods like [`reserve`](Vector::reserve) or [`with_cap`](Vector::with_cap) to
    /// do so. Using this method on a Vector without enough capacity is undefined behavior.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let mut vec = Vector::with_cap(3);
    /// for i in 1_u8..=3 {
    ///     // SAFETY: We know that vec has enough capacity to store all three values.
    ///     unsafe { vec.push_unchecked(i); }
    /// }
    /// assert_eq!(&*vec, &[1, 2, 3]);
    /// ```
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: It is up to the caller to ensure that the Vector has enough capacity for this
        // push, leading to the pointer write being in bounds of the allocation.
        unsafe { self.buf.ptr().add(self.len).write(value); }
        self.len += 1;
    }

    /// Pops the last value off the end of the Vector, returning an owned value if the Vector has
    /// length greater than 0. Popping an empty Vector does nothing.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let mut vec: Vector<usize> = (0..5).collect();
    /// for i in (0..vec.len()).rev() {
    ///     assert_eq!(vec.pop(), Some(i));
    /// }
    /// assert_eq!(vec.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before getting.
            self.len -= 1;

            // SAFETY: len has just been decremented and is within the capacity of the Vector. All
            // values < the old len are initialized. We are making a bitwise copy of the value and
            // then forgetting that the version in the allocation exists, which moves it out.
            let value = unsafe { self.buf.ptr().add(self.len).read() };
            Some(value)
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the Vector.
    pub fn at(&self, index: usize) -> &T {
        self.try_at(index).throw()
    }

    /// Returns a reference to the element at `index`, or an [`IndexOutOfBounds`] carrying the
    /// offending index.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let vec = Vector::from([10, 20]);
    /// assert_eq!(vec.try_at(1), Ok(&20));
    /// assert_eq!(vec.try_at(2).unwrap_err().index, 2);
    /// ```
    pub fn try_at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the value is initialized.
        Ok(unsafe { self.buf.ptr().add(index).as_ref() })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the Vector.
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        self.try_at_mut(index).throw()
    }

    /// Returns a mutable reference to the element at `index`, or an [`IndexOutOfBounds`].
    pub fn try_at_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the value is initialized, and self is borrowed mutably.
        Ok(unsafe { self.buf.ptr().add(index).as_mut() })
    }

    /// Inserts the provided value at the given index, growing and moving items as necessary.
    /// Inserting at `len` is equivalent to [`push`](Vector::push).
    ///
    /// # Panics
    /// Panics if the provided index is greater than the length.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let mut vec: Vector<usize> = (0..3).collect();
    /// vec.insert(1, 100);
    /// vec.insert(1, 200);
    /// vec.insert(3, 300);
    /// vec.insert(6, 400);
    /// assert_eq!(&*vec, &[0, 200, 100, 300, 1, 2, 400]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Inserts the provided value at the given index, returning an [`IndexOutOfBounds`] rather
    /// than panicking if `index > len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        if index > self.len {
            return Err(IndexOutOfBounds { index, len: self.len });
        }

        if self.len == self.cap() {
            self.grow();
        }

        // SAFETY: index <= len < cap, so both the slot and the shifted range are in bounds.
        unsafe {
            let slot = self.buf.ptr().add(index);
            // Shift [index, len) up by one. ptr::copy moves the range as a whole, so no value is
            // overwritten before it has been relocated.
            ptr::copy(slot.as_ptr(), slot.add(1).as_ptr(), self.len - index);
            slot.write(value);
        }

        self.len += 1;
        Ok(())
    }

    /// Removes the element at the provided index, moving all following values to fill in the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = "Hello world!".chars().collect();
    /// assert_eq!(vec.remove(1), 'e');
    /// assert_eq!(vec.remove(4), ' ');
    /// assert_eq!(vec.iter().collect::<String>(), "Hlloworld!");
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes the element at the provided index, returning an [`IndexOutOfBounds`] rather than
    /// panicking if the index is invalid.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;

        // SAFETY: index < len, so the value is initialized and the shifted range is in bounds.
        let value = unsafe {
            let slot = self.buf.ptr().add(index);
            let value = slot.read();
            // Shift (index, len) down by one, closing the gap left by value.
            ptr::copy(slot.add(1).as_ptr(), slot.as_ptr(), self.len - index - 1);
            value
        };

        self.len -= 1;
        Ok(value)
    }

    /// Replaces the element at the provided index with `new_value`, returning the old value.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        mem::replace(self.at_mut(index), new_value)
    }

    /// Ensures that the Vector has capacity for at least `cap` elements. If the capacity is
    /// already sufficient, nothing happens, otherwise the Vector is reallocated with capacity
    /// exactly `cap`.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let mut vec = Vector::from([1, 2]);
    /// vec.reserve(10);
    /// assert_eq!(vec.cap(), 10);
    /// vec.reserve(4);
    /// assert_eq!(vec.cap(), 10);
    /// ```
    pub fn reserve(&mut self, cap: usize) {
        self.try_reserve(cap).handle()
    }

    /// Ensures that the Vector has capacity for at least `cap` elements, returning an error instead
    /// of panicking. When an error is returned, the Vector is unchanged.
    pub fn try_reserve(&mut self, cap: usize) -> Result<(), ReserveError> {
        if cap <= self.cap() { return Ok(()); }

        // SAFETY: The first len values are initialized and len <= cap.
        unsafe { self.buf.try_realloc(self.len, cap) }
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements. After invoking
    /// this method, the capacity will be >= len + extra.
    ///
    /// Unlike [`reserve`](Vector::reserve), growth here is geometric: the new capacity is at least
    /// double the old one, so repeated small batches (as in [`Extend`] or
    /// [`extend_from_slice`](Vector::extend_from_slice)) stay amortized `O(1)` per element.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Vector;
    /// let mut vec = Vector::from([1, 2, 3]);
    /// vec.reserve_extra(1);
    /// assert_eq!(vec.cap(), 6);
    /// vec.reserve_extra(10);
    /// assert_eq!(vec.cap(), 13);
    /// ```
    pub fn reserve_extra(&mut self, extra: usize) {
        self.try_reserve_extra(extra).handle()
    }

    /// Like [`reserve_extra`](Vector::reserve_extra), returning an error instead of panicking. When
    /// an error is returned, the Vector is unchanged.
    pub fn try_reserve_extra(&mut self, extra: usize) -> Result<(), ReserveError> {
        let required = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        if required <= self.cap() { return Ok(()); }

        let doubled = self.cap().checked_mul(GROWTH_FACTOR).unwrap_or(required);
        self.try_reserve(cmp::max(required, doubled))
    }

    /// Shrinks the Vector so that its capacity is equal to its length. An empty Vector releases its
    /// allocation entirely.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn shrink_to_fit(&mut self) {
        if self.len == self.cap() { return; }

        if self.len == 0 {
            // SAFETY: There are no values left in the allocation.
            unsafe { self.buf.release() }
        } else {
            // SAFETY: The first len values are initialized and len < cap.
            unsafe { self.buf.try_realloc(self.len, self.len) }.handle()
        }
    }

    /// Drops every element, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops every element at or after `len`, keeping the allocated capacity. Does nothing if `len`
    /// is not less than the current length.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len { return; }

        let tail = ptr::slice_from_raw_parts_mut(
            // SAFETY: len < self.len, so the offset is in bounds.
            unsafe { self.buf.ptr().add(len).as_ptr() },
            self.len - len,
        );
        // Shorten first, so that a panicking drop can't cause a double drop.
        self.len = len;
        // SAFETY: The values in tail are initialized and no longer reachable through the Vector.
        unsafe { ptr::drop_in_place(tail) }
    }

    /// Resizes the Vector to `new_len`, either dropping the excess elements or appending clones of
    /// `value`.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`], or
    /// if a clone panics, in which case the Vector keeps its original contents.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        self.reserve(new_len);

        // SAFETY: The Vector has capacity for new_len values and slots from len are uninitialized.
        let mut region = unsafe { Region::new(self.buf.ptr().add(self.len)) };
        for _ in self.len + 1..new_len {
            // SAFETY: At most new_len - len - 1 values are written here.
            unsafe { region.push(value.clone()); }
        }
        // SAFETY: This is the last slot before new_len.
        unsafe { region.push(value); }

        self.len += region.commit();
    }

    /// Appends clones of every element in `other` to the end of the Vector.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`], or
    /// if a clone panics, in which case the Vector keeps its original contents.
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        self.reserve_extra(other.len());

        // SAFETY: The Vector has capacity for other.len() more values, starting at len.
        let mut region = unsafe { Region::new(self.buf.ptr().add(self.len)) };
        for item in other {
            // SAFETY: At most other.len() values are written.
            unsafe { region.push(item.clone()); }
        }

        self.len += region.commit();
    }

    /// Moves all elements from `other` to the end of self, leaving `other` empty.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn append(&mut self, other: &mut Vector<T, A>) {
        self.reserve_extra(other.len);

        // SAFETY: self is valid for writes from len to len + other.len and other is valid for reads
        // from 0 to other.len. Both are properly aligned and belong to different allocations.
        unsafe {
            ptr::copy_nonoverlapping(
                other.buf.ptr().as_ptr().cast_const(),
                self.buf.ptr().add(self.len).as_ptr(),
                other.len,
            );
        }

        self.len += other.len;
        // The values have been moved, so other must forget about them.
        other.len = 0;
    }

    /// Exchanges the contents of self and `other`, following the [`Propagation`] policy of the
    /// allocator.
    ///
    /// [`Propagation`]: crate::alloc::Propagation
    pub fn swap_with(&mut self, other: &mut Vector<T, A>) {
        let policy = self.allocator().propagation();
        if policy.on_swap {
            mem::swap(self, other);
        } else if policy.always_equal {
            self.buf.swap_storage(&mut other.buf);
            mem::swap(&mut self.len, &mut other.len);
        } else {
            let empty_mine = Vector::new_in(self.allocator().clone());
            let empty_theirs = Vector::new_in(other.allocator().clone());
            let mine = mem::replace(self, empty_mine);
            let theirs = mem::replace(other, empty_theirs);
            self.extend(theirs);
            other.extend(mine);
        }
    }

    /// Replaces the contents of self with those of `other`, following the [`Propagation`] policy
    /// of the allocator. When the allocator isn't carried over, elements are moved into storage
    /// from self's own allocator.
    ///
    /// [`Propagation`]: crate::alloc::Propagation
    pub fn assign(&mut self, mut other: Vector<T, A>) {
        let policy = self.allocator().propagation();
        if policy.on_move {
            *self = other;
        } else if policy.always_equal {
            self.clear();
            self.buf.swap_storage(&mut other.buf);
            mem::swap(&mut self.len, &mut other.len);
        } else {
            self.clear();
            self.extend(other);
        }
    }

    /// Grows the Vector to allow for the insertion of additional elements. After calling this, the
    /// Vector can take at least one more element.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub(crate) fn grow(&mut self) {
        self.try_grow().handle()
    }

    pub(crate) fn try_grow(&mut self) -> Result<(), ReserveError> {
        let new_cap = cmp::max(
            self.cap().checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?,
            MIN_CAP,
        );

        // SAFETY: The first len values are initialized and len <= cap < new_cap.
        unsafe { self.buf.try_realloc(self.len, new_cap) }
    }

    /// Checks that the provided index is within the bounds of self.
    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }
}

impl<T, A: Allocator> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve_extra(iter.size_hint().0);

        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let mut vec = Vector::new();
        vec.extend(value);
        vec
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(value: [T; N]) -> Self {
        let mut vec = Vector::with_cap(N);
        for item in value {
            // SAFETY: vec has been created with the right capacity.
            unsafe { vec.push_unchecked(item); }
        }
        vec
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(value: &[T]) -> Self {
        let mut vec = Vector::with_cap(value.len());
        vec.extend_from_slice(value);
        vec
    }
}

impl<T, A: Allocator + Default> Default for Vector<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: Allocator> Drop for Vector<T, A> {
    fn drop(&mut self) {
        // Call drop on all initialized values in place.
        // SAFETY: All values less than len are initialized and safe to drop.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr().as_ptr(), self.len));
        }

        // Implicitly drop self.buf, which deallocates the owned memory without touching values.
    }
}

impl<T, A: Allocator> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull, properly aligned and the range entirely contained within this Vector.
        // The borrow checker enforces that self isn't mutated due to this function taking a &self.
        // The total size is < isize::MAX as the result of being a valid Vector.
        unsafe { slice::from_raw_parts(self.buf.ptr().as_ptr(), self.len) }
    }
}

impl<T, A: Allocator> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull, properly aligned and the range entirely contained within this Vector.
        // The borrow checker enforces that self isn't accessed due to this function taking a
        // &mut self. The total size is < isize::MAX as the result of being a valid Vector.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr().as_ptr(), self.len) }
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vector<T, A> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vector<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T, A: Allocator> Borrow<[T]> for Vector<T, A> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T, A: Allocator> BorrowMut<[T]> for Vector<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

// SAFETY: Vectors, when used safely rely on unique pointers and are therefore safe for Send when T:
// Send.
unsafe impl<T: Send, A: Allocator + Send> Send for Vector<T, A> {}
// SAFETY: Vector's safe API obeys all rules of the borrow checker, so no interior mutability
// occurs. This means that Vector<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Vector<T, A> {}

impl<T: Clone, A: Allocator> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        let mut vec = Self::with_cap_in(self.cap(), self.allocator().select_on_clone());
        // If a clone panics, vec only holds the committed values (none), and its RawBuf releases
        // the allocation.
        vec.extend_from_slice(self);
        vec
    }

    fn clone_from(&mut self, source: &Self) {
        if source.allocator().propagation().on_copy {
            *self = Vector::new_in(source.allocator().clone());
        } else {
            self.clear();
        }
        self.extend_from_slice(source);
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for Vector<T, A> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: PartialEq, A: Allocator> PartialEq<[T]> for Vector<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        **self == *other
    }
}

impl<T: PartialEq, A: Allocator, const N: usize> PartialEq<[T; N]> for Vector<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        **self == *other
    }
}

impl<T: Eq, A: Allocator> Eq for Vector<T, A> {}

impl<T: PartialOrd, A: Allocator> PartialOrd for Vector<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: Ord, A: Allocator> Ord for Vector<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: Hash, A: Allocator> Hash for Vector<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug, A: Allocator> Debug for Vector<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug, A: Allocator> Display for Vector<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "!")?;
        f.debug_list().entries(self.iter()).finish()
    }
}
