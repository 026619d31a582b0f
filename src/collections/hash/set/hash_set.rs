use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;
use std::slice;

use tracing::trace;

use super::Iter;
use crate::alloc::{Allocator, Global, RawBuf, allocate_value, deallocate_value};
use crate::collections::contiguous::Vector;
use crate::util::error::{IndexOutOfBounds, ReserveError};
use crate::util::fmt::DebugRaw;
use crate::util::result::{ReserveExtension, ResultExtension};

/// The number of buckets used when none (or zero) is requested.
pub(crate) const DEFAULT_BUCKETS: usize = 16;

pub(crate) const DEFAULT_MAX_LOAD_FACTOR: f32 = 1.0;

/// The head of a collision chain, or the link from one node to the next.
pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

pub(crate) struct Node<T> {
    pub next: Link<T>,
    // Cached so that rehashing never has to call back into Hash.
    pub hash: u64,
    pub value: T,
}

/// A set of values that relies on them implementing [`Hash`] and [`Eq`], stored in an array of
/// buckets each holding a singly linked chain of nodes.
///
/// Every value lives in its own node, so a reference to a value stays valid until that value is
/// removed, regardless of how many other values are inserted or how often the table is rehashed.
/// Only the array of chain heads is ever reallocated.
///
/// Iteration order is unspecified and may change after any mutating operation.
///
/// It is a logic error for a value in a HashSet to be manipulated in a way that changes its hash.
/// Because of this, HashSet's API prevents mutable access to its values.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the HashSet.
/// - `b`: The number of buckets.
/// - `c`: The length of the chain in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(c)`*, `O(n+b)` |
/// | `get/contains` | `O(c)` |
/// | `remove` | `O(c)` |
/// | `rehash` | `O(n+b)` |
/// | `iter` | `O(n+b)` |
///
/// \* If the load factor would be exceeded by the new element, `insert` rehashes first.
pub struct HashSet<T, B = RandomState, A: Allocator = Global> {
    // Always holds at least one bucket, each slot initialized.
    pub(crate) buckets: RawBuf<Link<T>, A>,
    pub(crate) len: usize,
    pub(crate) max_load_factor: f32,
    pub(crate) hasher: B,
    pub(crate) _phantom: PhantomData<Node<T>>,
}

impl<T, B: BuildHasher + Default> HashSet<T, B> {
    /// Creates a new HashSet with the default number of buckets and the default value for `B`.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::hash::HashSet;
    /// let set: HashSet<u8> = HashSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.bucket_count(), 16);
    /// ```
    pub fn new() -> HashSet<T, B> {
        HashSet::with_buckets(DEFAULT_BUCKETS)
    }

    /// Creates a new HashSet with `bucket_count` buckets, or the default number if zero is
    /// provided. The default hasher will be used.
    pub fn with_buckets(bucket_count: usize) -> HashSet<T, B> {
        HashSet::with_buckets_and_hasher_in(bucket_count, B::default(), Global)
    }
}

impl<T, B: BuildHasher> HashSet<T, B> {
    /// Creates a new HashSet with the default number of buckets and the provided `hasher`.
    pub fn with_hasher(hasher: B) -> HashSet<T, B> {
        HashSet::with_buckets_and_hasher_in(DEFAULT_BUCKETS, hasher, Global)
    }
}

impl<T, B, A: Allocator> HashSet<T, B, A> {
    /// Creates a new HashSet with `bucket_count` buckets (or the default number if zero is
    /// provided) and the provided `hasher`, allocating from `alloc`.
    ///
    /// # Panics
    /// Panics if the bucket array can't be allocated.
    pub fn with_buckets_and_hasher_in(bucket_count: usize, hasher: B, alloc: A) -> HashSet<T, B, A> {
        let count = if bucket_count == 0 { DEFAULT_BUCKETS } else { bucket_count };
        HashSet {
            buckets: allocate_buckets(count, alloc).handle(),
            len: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hasher,
            _phantom: PhantomData,
        }
    }

    /// Creates a new HashSet with the default number of buckets, allocating from `alloc`.
    pub fn new_in(alloc: A) -> HashSet<T, B, A>
    where
        B: Default,
    {
        HashSet::with_buckets_and_hasher_in(DEFAULT_BUCKETS, B::default(), alloc)
    }

    /// Returns the number of values in the HashSet.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the HashSet contains no values.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets in the table. This is never zero.
    pub const fn bucket_count(&self) -> usize {
        self.buckets.cap()
    }

    /// Returns the number of values held in the bucket at `index`.
    ///
    /// # Panics
    /// Panics if `index` is not less than the bucket count.
    pub fn bucket_size(&self, index: usize) -> usize {
        self.try_bucket_size(index).throw()
    }

    pub fn try_bucket_size(&self, index: usize) -> Result<usize, IndexOutOfBounds> {
        let mut link = *self.slots().get(index).ok_or(IndexOutOfBounds {
            index,
            len: self.bucket_count(),
        })?;

        let mut count = 0;
        while let Some(node) = link {
            count += 1;
            // SAFETY: Every node reachable from a bucket is live.
            link = unsafe { (*node.as_ptr()).next };
        }
        Ok(count)
    }

    /// Returns the average number of values per bucket.
    pub fn load_factor(&self) -> f32 {
        self.len as f32 / self.bucket_count() as f32
    }

    pub const fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    /// Sets the load factor that triggers a rehash on insertion. The table isn't rehashed
    /// immediately, only once the next insertion would exceed it.
    ///
    /// # Panics
    /// Panics if `max_load_factor` isn't a positive, finite number.
    pub fn set_max_load_factor(&mut self, max_load_factor: f32) {
        assert!(
            max_load_factor.is_finite() && max_load_factor > 0.0,
            "Maximum load factor must be positive and finite!"
        );
        self.max_load_factor = max_load_factor;
    }

    pub const fn hasher(&self) -> &B {
        &self.hasher
    }

    pub const fn allocator(&self) -> &A {
        self.buckets.allocator()
    }

    /// Drops every value, keeping the current bucket array.
    pub fn clear(&mut self) {
        for index in 0..self.bucket_count() {
            while self.pop_bucket(index).is_some() {}
        }
    }

    /// Rebuilds the table with `bucket_count` buckets, or however many are required to keep the
    /// load factor within its maximum if that is more. Existing nodes are relinked, so no value is
    /// moved.
    ///
    /// # Panics
    /// Panics if the new bucket array can't be allocated, in which case the HashSet is unchanged.
    pub fn rehash(&mut self, bucket_count: usize) {
        self.try_rehash(bucket_count).handle()
    }

    /// Rebuilds the table like [`rehash`](HashSet::rehash), returning an error rather than
    /// panicking if the new bucket array can't be allocated.
    pub fn try_rehash(&mut self, bucket_count: usize) -> Result<(), ReserveError> {
        let new_count = bucket_count.max(self.min_buckets_for(self.len));

        let mut new_buckets = allocate_buckets(new_count, self.allocator().clone())?;
        let slots = slots_of_mut(&mut new_buckets);

        for index in 0..self.bucket_count() {
            let mut link = self.slots()[index];
            while let Some(node) = link {
                // SAFETY: Every node reachable from a bucket is live, and each is moved to exactly
                // one chain of the new table.
                unsafe {
                    link = (*node.as_ptr()).next;
                    let target = &mut slots[bucket_for(new_count, (*node.as_ptr()).hash)];
                    (*node.as_ptr()).next = *target;
                    *target = Some(node);
                }
            }
        }

        let old_count = self.bucket_count();
        // The old array only held links, so it is released without dropping anything.
        drop(mem::replace(&mut self.buckets, new_buckets));

        trace!(old_buckets = old_count, new_buckets = new_count, len = self.len, "hash_set.rehash");
        Ok(())
    }

    /// Rehashes so that `count` values can be held without exceeding the maximum load factor. Does
    /// nothing if the table already has enough buckets, so the table is never shrunk.
    ///
    /// # Panics
    /// Panics if the new bucket array can't be allocated.
    pub fn reserve(&mut self, count: usize) {
        self.try_reserve(count).handle()
    }

    pub fn try_reserve(&mut self, count: usize) -> Result<(), ReserveError> {
        let required = self.min_buckets_for(count);
        if required > self.bucket_count() {
            self.try_rehash(required)?;
        }
        Ok(())
    }

    /// Returns an iterator over the values of the HashSet, in an unspecified order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    pub(crate) fn slots(&self) -> &[Link<T>] {
        // SAFETY: Every slot of the bucket array is initialized.
        unsafe { slice::from_raw_parts(self.buckets.ptr().as_ptr(), self.buckets.cap()) }
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Link<T>] {
        slots_of_mut(&mut self.buckets)
    }

    /// Unlinks the head of the bucket at `index` and returns its value.
    pub(crate) fn pop_bucket(&mut self, index: usize) -> Option<T> {
        let node = self.slots()[index]?;
        // SAFETY: node is the live head of this chain. It is unlinked before being freed, so the
        // set is consistent even if dropping the value panics.
        unsafe {
            self.slots_mut()[index] = (*node.as_ptr()).next;
            self.len -= 1;
            Some(deallocate_value(self.allocator(), node).value)
        }
    }

    /// Links a new node holding `value` at the head of its bucket, without checking for duplicates
    /// or the load factor.
    pub(crate) fn link_new(&mut self, hash: u64, value: T) -> NonNull<Node<T>> {
        let index = bucket_for(self.bucket_count(), hash);
        let next = self.slots()[index];
        let node = allocate_value(self.allocator(), Node { next, hash, value }).handle();
        self.slots_mut()[index] = Some(node);
        self.len += 1;
        node
    }

    /// Whether adding `extra` values would take the load factor past its maximum.
    fn exceeds_load(&self, extra: usize) -> bool {
        let limit = self.bucket_count() as f64 * self.max_load_factor as f64;
        self.len.saturating_add(extra) as f64 > limit
    }

    /// The number of buckets that holds `count` values strictly within the maximum load factor,
    /// `count / max_load_factor + 1`. Saturates rather than overflowing, leaving the allocation to
    /// report the overflow.
    fn min_buckets_for(&self, count: usize) -> usize {
        // Float to integer casts saturate.
        ((count as f64 / self.max_load_factor as f64) as usize).saturating_add(1)
    }

    /// Exchanges the tables, lengths, load factors and hashers of self and `other`, leaving the
    /// allocators where they are.
    fn swap_tables(&mut self, other: &mut HashSet<T, B, A>) {
        self.buckets.swap_storage(&mut other.buckets);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.max_load_factor, &mut other.max_load_factor);
        mem::swap(&mut self.hasher, &mut other.hasher);
    }

    /// Moves every value out into a Vector, leaving the set empty.
    fn drain_values(&mut self) -> Vector<T> {
        let mut values = Vector::with_cap(self.len);
        for index in 0..self.bucket_count() {
            while let Some(value) = self.pop_bucket(index) {
                values.push(value);
            }
        }
        values
    }

    /// Deep copies self, with a table of the same shape allocated from `alloc`.
    fn clone_in(&self, alloc: A) -> HashSet<T, B, A>
    where
        T: Clone,
        B: Clone,
    {
        let mut set = HashSet::with_buckets_and_hasher_in(self.bucket_count(), self.hasher.clone(), alloc);
        set.max_load_factor = self.max_load_factor;

        for mut link in self.slots().iter().copied() {
            while let Some(node) = link {
                // SAFETY: Every node reachable from a bucket is live. The copy shares the hasher
                // and bucket count, so the cached hash places the clone in the same bucket. If
                // clone panics, the partial copy is dropped.
                unsafe {
                    let node = &*node.as_ptr();
                    set.link_new(node.hash, node.value.clone());
                    link = node.next;
                }
            }
        }
        set
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> HashSet<T, B, A> {
    /// Inserts `value` unless an equal value is already present. Returns a reference to the value
    /// now held by the set, along with true if it was inserted, or false if an equal value was
    /// found (in which case `value` is dropped and the set is unchanged).
    ///
    /// If inserting would exceed the maximum load factor, the table is rehashed before the value
    /// is linked in.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::hash::HashSet;
    /// let mut set: HashSet<&str> = HashSet::new();
    /// assert_eq!(set.get_or_insert("a"), (&"a", true));
    /// assert_eq!(set.get_or_insert("a"), (&"a", false));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn get_or_insert(&mut self, value: T) -> (&T, bool) {
        let hash = self.hasher.hash_one(&value);
        if let Some(node) = self.find_node(hash, &value) {
            // SAFETY: The node belongs to this set, which is borrowed for the returned lifetime.
            return (unsafe { &(*node.as_ptr()).value }, false);
        }

        if self.exceeds_load(1) {
            let doubled = self.bucket_count().saturating_mul(2);
            self.rehash(doubled.max(self.min_buckets_for(self.len + 1)));
        }

        let node = self.link_new(hash, value);
        // SAFETY: As above.
        (unsafe { &(*node.as_ptr()).value }, true)
    }

    /// Inserts `value` unless an equal value is already present, returning true if it was
    /// inserted.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::hash::HashSet;
    /// let mut set: HashSet<_> = HashSet::new();
    /// for value in [1, 2, 3, 2, 1] {
    ///     set.insert(value);
    /// }
    /// assert_eq!(set.len(), 3);
    /// assert!(set.contains(&2));
    /// assert!(!set.contains(&4));
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.get_or_insert(value).1
    }

    /// Returns a reference to the value in the set equal to `key`, if there is one.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.find_node(self.hasher.hash_one(key), key)?;
        // SAFETY: The node belongs to this set, which is borrowed for the returned lifetime.
        Some(unsafe { &(*node.as_ptr()).value })
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the number of values equal to `key`, which is either 0 or 1.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        usize::from(self.contains(key))
    }

    /// Removes the value equal to `key`, returning true if there was one. The table is never
    /// shrunk.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes and returns the value equal to `key`, if there is one.
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        let index = bucket_for(self.bucket_count(), hash);
        let mut link = NonNull::from(&mut self.slots_mut()[index]);

        // SAFETY: link always points at either the bucket slot or the next field of a live node in
        // its chain.
        unsafe {
            while let Some(node) = *link.as_ptr() {
                let current = node.as_ptr();
                if (*current).hash == hash && <T as Borrow<Q>>::borrow(&(*current).value) == key {
                    *link.as_ptr() = (*current).next;
                    self.len -= 1;
                    return Some(deallocate_value(self.allocator(), node).value);
                }
                link = NonNull::from(&mut (*current).next);
            }
        }
        None
    }

    /// Returns the index of the bucket that `key` belongs in.
    pub fn bucket<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        bucket_for(self.bucket_count(), self.hasher.hash_one(key))
    }

    /// Exchanges the contents of self and `other`, following the [`Propagation`] policy of the
    /// allocator. Hashers and load factors travel with the contents.
    ///
    /// [`Propagation`]: crate::alloc::Propagation
    pub fn swap_with(&mut self, other: &mut HashSet<T, B, A>) {
        let policy = self.allocator().propagation();
        if policy.on_swap {
            mem::swap(self, other);
        } else if policy.always_equal {
            self.swap_tables(other);
        } else {
            let mine = self.drain_values();
            let theirs = other.drain_values();
            mem::swap(&mut self.hasher, &mut other.hasher);
            mem::swap(&mut self.max_load_factor, &mut other.max_load_factor);
            self.extend(theirs);
            other.extend(mine);
        }
    }

    /// Replaces the contents of self with those of `other`, following the [`Propagation`] policy
    /// of the allocator.
    ///
    /// [`Propagation`]: crate::alloc::Propagation
    pub fn assign(&mut self, mut other: HashSet<T, B, A>) {
        let policy = self.allocator().propagation();
        if policy.on_move {
            *self = other;
        } else if policy.always_equal {
            self.clear();
            self.swap_tables(&mut other);
        } else {
            self.clear();
            mem::swap(&mut self.hasher, &mut other.hasher);
            self.max_load_factor = other.max_load_factor;
            self.extend(other);
        }
    }

    /// Checks every chain: each node must sit in the bucket its hash selects, its cached hash must
    /// match a fresh one, no two values may be equal and the number of nodes must match the cached
    /// length.
    pub fn verify_buckets(&self) -> bool {
        let mut count = 0;
        for (index, head) in self.slots().iter().enumerate() {
            let mut link = *head;
            while let Some(node) = link {
                // SAFETY: Every node reachable from a bucket is live.
                let node = unsafe { &*node.as_ptr() };
                if node.hash != self.hasher.hash_one(&node.value)
                    || bucket_for(self.bucket_count(), node.hash) != index
                {
                    return false;
                }

                // Equal values hash equally, so duplicates can only share a chain.
                let mut later = node.next;
                while let Some(other) = later {
                    // SAFETY: As above.
                    let other = unsafe { &*other.as_ptr() };
                    if other.value == node.value {
                        return false;
                    }
                    later = other.next;
                }

                count += 1;
                link = node.next;
            }
        }
        count == self.len
    }

    fn find_node<Q>(&self, hash: u64, key: &Q) -> Option<NonNull<Node<T>>>
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut link = self.slots()[bucket_for(self.bucket_count(), hash)];
        while let Some(node) = link {
            // SAFETY: Every node reachable from a bucket is live.
            let current = unsafe { &*node.as_ptr() };
            if current.hash == hash && <T as Borrow<Q>>::borrow(&current.value) == key {
                return Some(node);
            }
            link = current.next;
        }
        None
    }
}

/// Allocates a bucket array of `count` empty chains.
pub(crate) fn allocate_buckets<T, A: Allocator>(count: usize, alloc: A) -> Result<RawBuf<Link<T>, A>, ReserveError> {
    let buckets: RawBuf<Link<T>, A> = RawBuf::try_with_cap_in(count, alloc)?;
    for index in 0..count {
        // SAFETY: The buffer has room for count links.
        unsafe { buckets.ptr().as_ptr().add(index).write(None) }
    }
    Ok(buckets)
}

fn slots_of_mut<T, A: Allocator>(buckets: &mut RawBuf<Link<T>, A>) -> &mut [Link<T>] {
    // SAFETY: Every slot of a bucket array is initialized by allocate_buckets.
    unsafe { slice::from_raw_parts_mut(buckets.ptr().as_ptr(), buckets.cap()) }
}

pub(crate) const fn bucket_for(bucket_count: usize, hash: u64) -> usize {
    (hash % bucket_count as u64) as usize
}

impl<T, B: BuildHasher + Default> Default for HashSet<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B, A: Allocator> Drop for HashSet<T, B, A> {
    fn drop(&mut self) {
        // The bucket array itself is released by the RawBuf.
        self.clear();
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> Extend<T> for HashSet<T, B, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T: Hash + Eq + Copy + 'a, B: BuildHasher, A: Allocator> Extend<&'a T> for HashSet<T, B, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T: Hash + Eq, B: BuildHasher + Default> FromIterator<T> for HashSet<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut set = HashSet::new();
        set.reserve(iter.size_hint().0);
        set.extend(iter);
        set
    }
}

impl<T: Hash + Eq, B: BuildHasher + Default, const N: usize> From<[T; N]> for HashSet<T, B> {
    fn from(value: [T; N]) -> Self {
        HashSet::from_iter(value)
    }
}

impl<T: Clone, B: Clone, A: Allocator> Clone for HashSet<T, B, A> {
    fn clone(&self) -> Self {
        self.clone_in(self.allocator().select_on_clone())
    }

    fn clone_from(&mut self, source: &Self) {
        let alloc = if source.allocator().propagation().on_copy {
            source.allocator().clone()
        } else {
            self.allocator().clone()
        };
        *self = source.clone_in(alloc);
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> PartialEq for HashSet<T, B, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> Eq for HashSet<T, B, A> {}

impl<T: Debug, B: Debug, A: Allocator> Debug for HashSet<T, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSet")
            .field("contents", &DebugRaw(format!(
                "#{{{}}}",
                self.iter()
                    .map(|i| format!("{i:?}"))
                    .collect::<Vector<String>>()
                    .join(", ")
            )))
            .field("len", &self.len())
            .field("buckets", &self.bucket_count())
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl<T: Display, B, A: Allocator> Display for HashSet<T, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f, "#{{{}}}",
            self.iter()
                .map(|i| format!("{i}"))
                .collect::<Vector<String>>()
                .join(", ")
        )
    }
}

// SAFETY: The HashSet exclusively owns its bucket array and every node.
unsafe impl<T: Send, B: Send, A: Allocator + Send> Send for HashSet<T, B, A> {}
// SAFETY: The HashSet's safe API obeys the borrow checker, with no interior mutability.
unsafe impl<T: Sync, B: Sync, A: Allocator + Sync> Sync for HashSet<T, B, A> {}
