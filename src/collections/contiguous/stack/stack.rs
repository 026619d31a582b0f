use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::slice;

use crate::alloc::{Allocator, Global};
use crate::collections::contiguous::vector::{IntoIter, Vector};
use crate::util::error::{EmptyCollection, IndexOutOfBounds};
use crate::util::result::ResultExtension;

/// A last-in-first-out collection, storing its elements in a [`Vector`]. The top of the Stack is
/// the end of the Vector, so index 0 is the bottom.
///
/// The Stack dereferences to a read-only slice, ordered from bottom to top. Elements can only be
/// changed in place through [`top_mut`](Stack::top_mut) or [`iter_mut`](Stack::iter_mut).
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `top` | `O(1)` |
/// | `at` | `O(1)` |
///
/// \* See [`Vector::push`].
pub struct Stack<T, A: Allocator = Global> {
    pub(crate) inner: Vector<T, A>,
}

impl<T> Stack<T> {
    /// Creates a new, empty Stack.
    pub const fn new() -> Stack<T> {
        Stack { inner: Vector::new() }
    }

    /// Creates a new Stack with room for `cap` elements.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn with_cap(cap: usize) -> Stack<T> {
        Stack { inner: Vector::with_cap(cap) }
    }

    /// Creates a new Stack containing `count` clones of `value`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn from_elem(value: T, count: usize) -> Stack<T>
    where
        T: Clone,
    {
        Stack { inner: Vector::from_elem(value, count) }
    }
}

impl<T, A: Allocator> Stack<T, A> {
    pub const fn new_in(alloc: A) -> Stack<T, A> {
        Stack { inner: Vector::new_in(alloc) }
    }

    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub const fn cap(&self) -> usize {
        self.inner.cap()
    }

    pub const fn allocator(&self) -> &A {
        self.inner.allocator()
    }

    /// Pushes `value` onto the top of the Stack.
    ///
    /// # Panics
    /// Panics if the memory layout of the Stack would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Stack;
    /// let mut stack = Stack::new();
    /// stack.push(1);
    /// stack.push(2);
    /// assert_eq!(stack.top(), &2);
    /// ```
    pub fn push(&mut self, value: T) {
        self.inner.push(value)
    }

    /// Pushes the value produced by `make` onto the top of the Stack, returning a mutable reference
    /// to it.
    ///
    /// # Panics
    /// Panics if the memory layout of the Stack would have a size that exceeds [`isize::MAX`].
    pub fn push_with<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        self.inner.push_with(make)
    }

    /// Removes the top element, returning [`None`] if the Stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.inner.pop()
    }

    /// Removes the top element, returning an [`EmptyCollection`] error if there isn't one.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::contiguous::Stack;
    /// let mut stack = Stack::from([1]);
    /// assert_eq!(stack.try_pop(), Ok(1));
    /// assert!(stack.try_pop().is_err());
    /// ```
    pub fn try_pop(&mut self) -> Result<T, EmptyCollection> {
        self.inner.pop().ok_or(EmptyCollection)
    }

    /// Returns a reference to the top element.
    ///
    /// # Panics
    /// Panics if the Stack is empty.
    pub fn top(&self) -> &T {
        self.try_top().throw()
    }

    pub fn try_top(&self) -> Result<&T, EmptyCollection> {
        self.inner.last().ok_or(EmptyCollection)
    }

    /// Returns a mutable reference to the top element.
    ///
    /// # Panics
    /// Panics if the Stack is empty.
    pub fn top_mut(&mut self) -> &mut T {
        self.try_top_mut().throw()
    }

    pub fn try_top_mut(&mut self) -> Result<&mut T, EmptyCollection> {
        self.inner.last_mut().ok_or(EmptyCollection)
    }

    /// Returns a reference to the element at `index`, counting up from the bottom.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn at(&self, index: usize) -> &T {
        self.inner.at(index)
    }

    pub fn try_at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.inner.try_at(index)
    }

    /// Returns an iterator over mutable references to each element, from bottom to top.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.inner.iter_mut()
    }

    /// Ensures that the Stack has room for at least `cap` elements in total.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn reserve(&mut self, cap: usize) {
        self.inner.reserve(cap)
    }

    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn shrink_to_fit(&mut self) {
        self.inner.shrink_to_fit()
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    /// Exchanges the contents of two Stacks. See [`Vector::swap_with`].
    pub fn swap_with(&mut self, other: &mut Stack<T, A>) {
        self.inner.swap_with(&mut other.inner)
    }

    /// Replaces the contents of self with those of `other`. See [`Vector::assign`].
    pub fn assign(&mut self, other: Stack<T, A>) {
        self.inner.assign(other.inner)
    }
}

impl<T, A: Allocator> Deref for Stack<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T, A: Allocator + Default> Default for Stack<T, A> {
    fn default() -> Self {
        Stack::new_in(A::default())
    }
}

impl<T, A: Allocator> From<Vector<T, A>> for Stack<T, A> {
    fn from(value: Vector<T, A>) -> Self {
        Stack { inner: value }
    }
}

impl<T, const N: usize> From<[T; N]> for Stack<T> {
    fn from(value: [T; N]) -> Self {
        Stack { inner: Vector::from(value) }
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Stack { inner: Vector::from_iter(iter) }
    }
}

impl<T, A: Allocator> Extend<T> for Stack<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.extend(iter)
    }
}

impl<T, A: Allocator> IntoIterator for Stack<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Stack<T, A> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone, A: Allocator> Clone for Stack<T, A> {
    fn clone(&self) -> Self {
        Stack { inner: self.inner.clone() }
    }

    fn clone_from(&mut self, source: &Self) {
        self.inner.clone_from(&source.inner)
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for Stack<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Eq, A: Allocator> Eq for Stack<T, A> {}

impl<T: PartialOrd, A: Allocator> PartialOrd for Stack<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.inner.partial_cmp(&other.inner)
    }
}

impl<T: Ord, A: Allocator> Ord for Stack<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl<T: Hash, A: Allocator> Hash for Stack<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<T: Debug, A: Allocator> Debug for Stack<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("contents", &&**self)
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Debug, A: Allocator> Display for Stack<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.inner, f)
    }
}
