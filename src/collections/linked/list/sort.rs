use std::cmp::Ordering;

use super::LinkedList;
use super::node;
use crate::alloc::Allocator;
use crate::collections::contiguous::Vector;

impl<T: Ord, A: Allocator> LinkedList<T, A> {
    /// Merges the sorted list `other` into this sorted list, keeping the result sorted. Elements of
    /// self come before equal elements of `other`.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::linked::LinkedList;
    /// let mut list = LinkedList::from([1, 3, 5]);
    /// list.merge(LinkedList::from([2, 3, 4]));
    /// assert_eq!(list, LinkedList::from([1, 2, 3, 3, 4, 5]));
    /// ```
    pub fn merge(&mut self, other: LinkedList<T, A>) {
        self.merge_by(other, T::cmp)
    }

    /// Sorts the list in ascending order. The sort is stable and never moves a value.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::linked::LinkedList;
    /// let mut list = LinkedList::from([5, 3, 1, 4, 1, 5, 9, 2, 6]);
    /// list.sort();
    /// assert_eq!(list, LinkedList::from([1, 1, 2, 3, 4, 5, 5, 6, 9]));
    /// ```
    pub fn sort(&mut self) {
        self.sort_by(T::cmp)
    }
}

impl<T: PartialEq, A: Allocator> LinkedList<T, A> {
    /// Removes every element that is equal to the one before it, keeping the first of each run.
    /// Returns the number of elements removed.
    ///
    /// # Examples
    /// ```
    /// # use standard_containers::collections::linked::LinkedList;
    /// let mut list = LinkedList::from([1, 1, 2, 1, 3, 3, 3]);
    /// assert_eq!(list.unique(), 3);
    /// assert_eq!(list, LinkedList::from([1, 2, 1, 3]));
    /// ```
    pub fn unique(&mut self) -> usize {
        self.unique_by(|a, b| a == b)
    }
}

impl<T, A: Allocator> LinkedList<T, A> {
    /// Merges the list `other` into self, where both are sorted according to `compare`. A node
    /// from `other` is only placed before a node of self if it compares strictly less, so the
    /// merge is stable.
    pub fn merge_by<F>(&mut self, mut other: LinkedList<T, A>, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if !self.relinks_nodes() {
            let mut adopted = LinkedList::new_in(self.alloc.clone());
            adopted.extend(other);
            other = adopted;
        }
        // SAFETY: other's nodes can be freed by self's allocator.
        unsafe { self.merge_nodes(&mut other, &mut compare) }
    }

    /// Sorts the list according to `compare`. The sort is stable and never moves a value.
    ///
    /// This is a bottom-up merge sort: nodes are taken from the front one at a time into `carry`,
    /// which is merged up a ladder of lists holding 1, 2, 4, ... nodes until it finds an empty
    /// rung. Finally the ladder is merged down into one list.
    ///
    /// If `compare` panics, every node that isn't in self at the time is dropped along with the
    /// ladder.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len < 2 { return; }

        let mut carry = LinkedList::new_in(self.alloc.clone());
        let mut ladder: Vector<LinkedList<T, A>> = Vector::new();

        while !self.is_empty() {
            // SAFETY: self isn't empty, and carry shares self's allocator.
            unsafe {
                let first = self.first();
                node::transfer(carry.sentinel, first, node::next(first));
            }
            self.len -= 1;
            carry.len += 1;

            let mut rung = 0;
            while rung < ladder.len() && !ladder[rung].is_empty() {
                // The rung holds older nodes than carry, so it goes on the left.
                // SAFETY: Every list in the ladder shares self's allocator.
                unsafe { ladder[rung].merge_nodes(&mut carry, &mut compare) }
                carry.swap_nodes(&mut ladder[rung]);
                rung += 1;
            }

            if rung == ladder.len() {
                ladder.push(LinkedList::new_in(self.alloc.clone()));
            }
            ladder[rung].swap_nodes(&mut carry);
        }

        for rung in ladder.iter_mut() {
            // SAFETY: As above.
            unsafe { rung.merge_nodes(&mut carry, &mut compare) }
            carry.swap_nodes(rung);
        }
        self.swap_nodes(&mut carry);
    }

    /// Sorts the list by the key that `key` extracts from each element. The sort is stable.
    pub fn sort_by_key<K: Ord, F: FnMut(&T) -> K>(&mut self, mut key: F) {
        self.sort_by(|a, b| key(a).cmp(&key(b)))
    }

    /// Removes every element for which `same` returns true when given the element kept before it
    /// and the element itself. Returns the number of elements removed.
    pub fn unique_by<F: FnMut(&T, &T) -> bool>(&mut self, mut same: F) -> usize {
        if self.len < 2 { return 0; }

        let mut removed = 0;
        let mut kept = self.first();
        // SAFETY: The list isn't empty, so kept is a value node, and every node visited belongs to
        // this list.
        unsafe {
            let mut current = node::next(kept);
            while current != self.sentinel {
                let after = node::next(current);
                if same(node::value::<T>(kept), node::value::<T>(current)) {
                    drop(self.erase(current));
                    removed += 1;
                } else {
                    kept = current;
                }
                current = after;
            }
        }
        removed
    }

    /// Reverses the order of the list in place, by flipping the links of every node including the
    /// sentinel.
    pub fn reverse(&mut self) {
        let mut current = self.sentinel;
        loop {
            // SAFETY: Every node reachable from the sentinel is live. The next node is read before
            // the links are flipped.
            unsafe {
                let after = node::next(current);
                node::flip(current);
                current = after;
            }
            if current == self.sentinel {
                break;
            }
        }
    }

    /// Merges the nodes of `other` into self, relinking them.
    ///
    /// # Safety
    /// Nodes of `other` must be safe to free with self's allocator.
    pub(crate) unsafe fn merge_nodes<F>(&mut self, other: &mut LinkedList<T, A>, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut left = self.first();
        let mut right = other.first();

        // SAFETY: left walks self and right walks other, both stop at their sentinels.
        unsafe {
            while left != self.sentinel && right != other.sentinel {
                if compare(node::value::<T>(right), node::value::<T>(left)) == Ordering::Less {
                    let after = node::next(right);
                    node::transfer(left, right, after);
                    // Lengths are kept exact at each step, so a panicking compare leaves both
                    // lists consistent.
                    self.len += 1;
                    other.len -= 1;
                    right = after;
                } else {
                    left = node::next(left);
                }
            }

            if right != other.sentinel {
                node::transfer(self.sentinel, right, other.sentinel);
            }
        }

        self.len += other.len;
        other.len = 0;
    }
}
