use std::collections::{BTreeSet, VecDeque};

use proptest::prelude::*;
use standard_containers::alloc::Instrumented;
use standard_containers::collections::contiguous::{Stack, Vector};
use standard_containers::collections::hash::HashSet;
use standard_containers::collections::linked::LinkedList;
use standard_containers::collections::segmented::Deque;

#[derive(Debug, Clone)]
enum SeqOp {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    Insert(usize, i32),
    Remove(usize),
}

fn arb_seq_op() -> impl Strategy<Value = SeqOp> {
    prop_oneof![
        3 => any::<i32>().prop_map(SeqOp::PushBack),
        3 => any::<i32>().prop_map(SeqOp::PushFront),
        1 => Just(SeqOp::PopBack),
        1 => Just(SeqOp::PopFront),
        1 => (any::<usize>(), any::<i32>()).prop_map(|(at, value)| SeqOp::Insert(at, value)),
        1 => any::<usize>().prop_map(SeqOp::Remove),
    ]
}

#[derive(Debug, Clone)]
enum SetOp {
    Insert(u16),
    Remove(u16),
    Rehash(usize),
}

fn arb_set_op() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        4 => (0_u16..200).prop_map(SetOp::Insert),
        2 => (0_u16..200).prop_map(SetOp::Remove),
        1 => (0_usize..300).prop_map(SetOp::Rehash),
    ]
}

proptest! {
    #[test]
    fn prop_vector_matches_model(ops in prop::collection::vec(arb_seq_op(), 0..300)) {
        let alloc = Instrumented::new();
        let mut vector = Vector::new_in(alloc.clone());
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                SeqOp::PushBack(value) => {
                    vector.push(value);
                    model.push_back(value);
                },
                SeqOp::PushFront(value) => {
                    vector.insert(0, value);
                    model.push_front(value);
                },
                SeqOp::PopBack => {
                    prop_assert_eq!(vector.pop(), model.pop_back());
                },
                SeqOp::PopFront => {
                    let expected = model.pop_front();
                    prop_assert_eq!(vector.try_remove(0).ok(), expected);
                },
                SeqOp::Insert(at, value) => {
                    let at = at % (model.len() + 1);
                    vector.insert(at, value);
                    model.insert(at, value);
                },
                SeqOp::Remove(at) => {
                    if model.is_empty() {
                        prop_assert!(vector.try_remove(at).is_err());
                    } else {
                        let at = at % model.len();
                        prop_assert_eq!(Some(vector.remove(at)), model.remove(at));
                    }
                },
            }
            prop_assert!(vector.len() <= vector.cap());
        }

        prop_assert!(vector.iter().eq(model.iter()));
        drop(vector);
        prop_assert_eq!(alloc.live(), 0);
    }

    #[test]
    fn prop_vector_reallocates_logarithmically(count in 1_usize..5000) {
        let alloc = Instrumented::new();
        let mut vector = Vector::new_in(alloc.clone());
        for i in 0..count {
            vector.push(i);
        }
        let bound = usize::BITS - count.leading_zeros() + 1;
        prop_assert!(alloc.allocations() <= bound as usize);
        prop_assert_eq!(vector.len(), count);
    }

    #[test]
    fn prop_stack_is_lifo(values in prop::collection::vec(any::<i64>(), 0..200)) {
        let mut stack = Stack::new();
        for value in &values {
            stack.push(*value);
        }
        prop_assert_eq!(stack.try_top().ok(), values.last());

        for value in values.iter().rev() {
            prop_assert_eq!(stack.pop(), Some(*value));
        }
        prop_assert!(stack.pop().is_none());
    }

    #[test]
    fn prop_deque_matches_model(ops in prop::collection::vec(arb_seq_op(), 0..2000)) {
        let alloc = Instrumented::new();
        let mut deque = Deque::new_in(alloc.clone());
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                SeqOp::PushBack(value) | SeqOp::Insert(_, value) => {
                    deque.push_back(value);
                    model.push_back(value);
                },
                SeqOp::PushFront(value) => {
                    deque.push_front(value);
                    model.push_front(value);
                },
                SeqOp::PopBack | SeqOp::Remove(_) => {
                    prop_assert_eq!(deque.pop_back(), model.pop_back());
                },
                SeqOp::PopFront => {
                    prop_assert_eq!(deque.pop_front(), model.pop_front());
                },
            }
        }

        prop_assert_eq!(deque.len(), model.len());
        for (index, value) in model.iter().enumerate() {
            prop_assert_eq!(deque.get(index), Some(value));
        }
        prop_assert!(deque.iter().eq(model.iter()));
        prop_assert!(deque.iter().rev().eq(model.iter().rev()));

        drop(deque);
        prop_assert_eq!(alloc.live(), 0, "Every segment should be freed exactly once.");
    }

    #[test]
    fn prop_list_sort_is_stable(values in prop::collection::vec(any::<u8>(), 0..300)) {
        let tagged: Vec<(u8, usize)> = values.iter().map(|value| value % 16).zip(0..).collect();
        let mut list: LinkedList<(u8, usize)> = tagged.iter().copied().collect();
        let mut model = tagged.clone();

        list.sort_by_key(|&(key, _)| key);
        model.sort_by_key(|&(key, _)| key);
        prop_assert!(list.iter().eq(model.iter()));
        prop_assert!(list.verify_links());

        list.sort_by_key(|&(key, _)| key);
        prop_assert!(list.iter().eq(model.iter()), "Sorting a sorted list should change nothing.");
    }

    #[test]
    fn prop_list_merge_and_reverse(
        mut left in prop::collection::vec(any::<i16>(), 0..100),
        mut right in prop::collection::vec(any::<i16>(), 0..100),
    ) {
        left.sort();
        right.sort();
        let mut list: LinkedList<i16> = left.iter().copied().collect();
        list.merge(right.iter().copied().collect());

        let mut model = [left, right].concat();
        model.sort();
        prop_assert!(list.iter().eq(model.iter()));

        list.reverse();
        prop_assert!(list.iter().eq(model.iter().rev()));
        list.reverse();
        prop_assert!(list.iter().eq(model.iter()));
        prop_assert!(list.verify_links());
    }

    #[test]
    fn prop_list_unique_matches_dedup(values in prop::collection::vec(0_u8..4, 0..200)) {
        let mut list: LinkedList<u8> = values.iter().copied().collect();
        let mut model = values.clone();
        model.dedup();

        prop_assert_eq!(list.unique(), values.len() - model.len());
        prop_assert!(list.iter().eq(model.iter()));
    }

    #[test]
    fn prop_hash_set_matches_model(ops in prop::collection::vec(arb_set_op(), 0..500)) {
        let mut set: HashSet<u16> = HashSet::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                SetOp::Insert(value) => {
                    prop_assert_eq!(set.insert(value), model.insert(value));
                },
                SetOp::Remove(value) => {
                    prop_assert_eq!(set.remove(&value), model.remove(&value));
                },
                SetOp::Rehash(count) => set.rehash(count),
            }
            prop_assert!(set.load_factor() <= set.max_load_factor());
        }

        prop_assert_eq!(set.len(), model.len());
        prop_assert_eq!(set.iter().count(), model.len());
        for value in 0..200 {
            prop_assert_eq!(set.contains(&value), model.contains(&value));
        }
        prop_assert!(set.verify_buckets());
    }
}

#[test]
fn test_hash_set_scenario() {
    let mut set: HashSet<_> = HashSet::new();
    for value in [1, 2, 3, 2, 1] {
        set.insert(value);
    }
    assert_eq!(set.len(), 3);
    assert!(set.contains(&2));
    assert!(!set.contains(&4));
}

#[test]
fn test_vector_erase_evens() {
    let mut vector: Vector<i32> = (0..1000).collect();
    let mut index = 0;
    while index < vector.len() {
        vector.remove(index);
        index += 1;
    }
    assert_eq!(vector.len(), 500);
    assert!(vector.iter().copied().eq((0..1000).filter(|value| value % 2 == 1)));
}

#[test]
fn test_list_sort_then_unique() {
    let mut list = LinkedList::from([5, 3, 1, 4, 1, 5, 9, 2, 6]);
    list.sort();
    list.unique();
    assert!(list.iter().copied().eq([1, 2, 3, 4, 5, 6, 9]));
}
