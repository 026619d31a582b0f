use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;

use super::HashSet;
use super::hash_set::Link;
use crate::alloc::{Allocator, Global};

impl<T, B, A: Allocator> IntoIterator for HashSet<T, B, A> {
    type Item = T;

    type IntoIter = IntoIter<T, B, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            set: self,
            bucket: 0,
        }
    }
}

/// A type for owned iteration over a [`HashSet`]. Produces values of type `T`, in an unspecified
/// order.
///
/// See [`HashSet::into_iter`].
pub struct IntoIter<T, B, A: Allocator = Global> {
    // Buckets before this one are already empty.
    pub(crate) set: HashSet<T, B, A>,
    pub(crate) bucket: usize,
}

impl<T, B, A: Allocator> Iterator for IntoIter<T, B, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket < self.set.bucket_count() {
            if let Some(value) = self.set.pop_bucket(self.bucket) {
                return Some(value);
            }
            self.bucket += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.set.len(), Some(self.set.len()))
    }
}

impl<T, B, A: Allocator> FusedIterator for IntoIter<T, B, A> {}

impl<T, B, A: Allocator> ExactSizeIterator for IntoIter<T, B, A> {}

impl<T: Debug, B, A: Allocator> Debug for IntoIter<T, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.set.iter()).finish()
    }
}

impl<'a, T, B, A: Allocator> IntoIterator for &'a HashSet<T, B, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        let buckets = self.slots();
        Iter {
            buckets,
            bucket: 0,
            node: buckets[0],
            len: self.len(),
        }
    }
}

/// A type for borrowed iteration over a [`HashSet`]. Produces values of type `&T`, in an
/// unspecified order.
///
/// Iteration walks one chain to its end, then skips forward over empty buckets to the head of the
/// next chain. The iterator is finished once it passes the last bucket.
///
/// See [`HashSet::iter`].
pub struct Iter<'a, T> {
    pub(crate) buckets: &'a [Link<T>],
    pub(crate) bucket: usize,
    pub(crate) node: Link<T>,
    pub(crate) len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 { return None; }

        loop {
            if let Some(node) = self.node {
                // SAFETY: Every node reachable from a bucket is live while the set is borrowed.
                let node = unsafe { &*node.as_ptr() };
                self.node = node.next;
                self.len -= 1;
                return Some(&node.value);
            }

            // len is non-zero, so there is always another chain before the end.
            self.bucket += 1;
            self.node = self.buckets[self.bucket];
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
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

// SAFETY: Iter behaves like a &T for each value.
unsafe impl<'a, T: Sync> Send for Iter<'a, T> {}
// SAFETY: As above.
unsafe impl<'a, T: Sync> Sync for Iter<'a, T> {}
