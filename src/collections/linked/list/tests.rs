#![cfg(test)]

use super::*;
use crate::alloc::{Instrumented, Propagation};
use crate::util::alloc::{CountedDrop, PanicOnClone, ZeroSizedType};
use crate::util::panic::assert_panics;

#[test]
fn test_push_and_pop() {
    let mut list = LinkedList::new();
    list.push_back(2);
    list.push_front(1);
    list.push_back(3);
    assert_eq!(list.len(), 3);
    assert_eq!(list.front(), Some(&1));
    assert_eq!(list.back(), Some(&3));

    *list.front_mut().unwrap() = 10;
    assert_eq!(list.pop_front(), Some(10));
    assert_eq!(list.pop_back(), Some(3));
    assert_eq!(list.pop_back(), Some(2));
    assert_eq!(list.pop_back(), None);
    assert_eq!(list.front(), None);
    assert!(list.verify_links());
}

#[test]
fn test_indexed_access() {
    let mut list: LinkedList<_> = (0..10).collect();
    assert_eq!(list[0], 0);
    assert_eq!(list[9], 9);
    assert_eq!(*list.get(7), 7, "Indexing from the back half should walk backwards correctly.");

    list.insert(0, -1);
    list.insert(11, 10);
    list.insert(5, 100);
    assert_eq!(list.remove(5), 100);
    assert_eq!(list.replace(1, 50), 0);
    assert!(list.iter().copied().eq([-1, 50, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));

    assert_eq!(list.try_get(12).unwrap_err().index, 12);
    assert!(list.try_insert(13, 0).is_err());
    assert!(list.try_remove(12).is_err());
    assert_panics!({ list[12]; });
    assert!(list.verify_links());
    assert_eq!(list.index_of(&5), Some(6));
    assert!(!list.contains(&100));
}

#[test]
fn test_splice_relinks() {
    let mut list = LinkedList::from([1, 5]);
    let mut other = LinkedList::from([0, 2, 3, 4, 6]);
    let address = &other[1] as *const i32;

    list.splice(1, &mut other, 1..4);
    assert!(list.iter().copied().eq(1..=5));
    assert!(other.iter().copied().eq([0, 6]));
    assert_eq!(&list[1] as *const i32, address, "Spliced values should not move.");

    list.splice_all(0, &mut other);
    assert!(list.iter().copied().eq([0, 6, 1, 2, 3, 4, 5]));
    assert!(other.is_empty());
    assert!(list.verify_links() && other.verify_links());

    // An empty range does nothing, even at the end.
    list.splice(7, &mut other, 0..0);
    assert_eq!(list.len(), 7);
    assert_panics!({ list.splice(0, &mut other, 0..1) });
}

#[test]
fn test_append_relinks_whole_list() {
    let alloc = Instrumented::new();
    let mut list = LinkedList::new_in(alloc.clone());
    let mut other = LinkedList::new_in(alloc.clone());
    list.extend(0..3);
    other.extend(3..100_000);
    let first = &other[0] as *const i32;
    let last = &other[other.len() - 1] as *const i32;
    let allocations = alloc.allocations();

    list.append(&mut other);
    assert_eq!(alloc.allocations(), allocations, "Whole lists should be relinked, not rebuilt.");
    assert_eq!(list.len(), 100_000);
    assert!(other.is_empty());
    assert_eq!(&list[3] as *const i32, first);
    assert_eq!(list.back().map(|v| v as *const i32), Some(last));
    assert!(list.verify_links() && other.verify_links());

    other.push_back(-1);
    list.splice_all(0, &mut other);
    assert_eq!(list.front(), Some(&-1));
    assert_eq!(list.len(), 100_001);
    assert_panics!({ list.splice_all(100_002, &mut other) });

    drop(list);
    drop(other);
    assert_eq!(alloc.live(), 0);
}

#[test]
fn test_splice_between_allocators() {
    let alloc = Instrumented::with_propagation(Propagation::NONE);
    let mut list = LinkedList::new_in(alloc.clone());
    let mut other = LinkedList::new_in(Instrumented::with_propagation(Propagation::NONE));
    list.extend([1, 4]);
    other.extend([2, 3]);

    list.splice_all(1, &mut other);
    assert!(list.iter().copied().eq(1..=4));
    assert!(other.is_empty());
    // The sentinel and four nodes, all from this list's allocator.
    assert_eq!(alloc.live(), 5);
    assert_eq!(other.allocator().live(), 1);

    let mut third = LinkedList::new_in(other.allocator().clone());
    third.extend([5, 6]);
    list.append(&mut third);
    assert_eq!(list.len(), 6);
    assert_eq!(alloc.live(), 7);
    drop(list);
    assert_eq!(alloc.live(), 0);
}

#[test]
fn test_merge_is_stable() {
    let mut list = LinkedList::from([(1, 'a'), (2, 'a'), (4, 'a')]);
    let other = LinkedList::from([(1, 'b'), (3, 'b'), (4, 'b'), (5, 'b')]);
    list.merge_by(other, |a, b| a.0.cmp(&b.0));
    assert!(list.iter().copied().eq([
        (1, 'a'), (1, 'b'), (2, 'a'), (3, 'b'), (4, 'a'), (4, 'b'), (5, 'b'),
    ]));
    assert!(list.verify_links());

    let mut empty = LinkedList::new();
    empty.merge(LinkedList::from([1, 2]));
    assert!(empty.iter().copied().eq([1, 2]));
}

#[test]
fn test_sort() {
    let mut list = LinkedList::from([5, 3, 1, 4, 1, 5, 9, 2, 6, 3]);
    list.sort();
    assert!(list.iter().copied().eq([1, 1, 2, 3, 3, 4, 5, 5, 6, 9]));
    assert!(list.verify_links());

    assert_eq!(list.unique(), 3);
    assert!(list.iter().copied().eq([1, 2, 3, 4, 5, 6, 9]));

    let mut large: LinkedList<u32> = (0..1000).map(|i| (i * 7919) % 1000).collect();
    large.sort();
    assert!(large.iter().copied().eq(0..1000));
    assert_eq!(large.len(), 1000);
    assert!(large.verify_links());
}

#[test]
fn test_sort_is_stable() {
    let mut list: LinkedList<(u8, usize)> = (0..100).map(|i| ((i % 7) as u8, i)).collect();
    list.sort_by_key(|&(key, _)| key);

    let mut iter = list.iter().peekable();
    while let Some(&(key, tag)) = iter.next() {
        if let Some(&&(next_key, next_tag)) = iter.peek() {
            assert!(key <= next_key);
            if key == next_key {
                assert!(tag < next_tag, "Equal keys should keep their original order.");
            }
        }
    }
}

#[test]
fn test_sort_keeps_addresses() {
    let mut list = LinkedList::from([3_u64, 1, 2]);
    let address = &list[0] as *const u64;
    list.sort();
    assert_eq!(&list[2] as *const u64, address, "Sorting should relink rather than move.");

    list.reverse();
    assert_eq!(&list[0] as *const u64, address);
}

#[test]
fn test_sort_with_panicking_compare() {
    let alloc = Instrumented::new();
    let mut list = LinkedList::new_in(alloc.clone());
    list.extend(0..100);

    let mut calls = 0;
    assert_panics!({
        list.sort_by(|a, b| {
            calls += 1;
            if calls == 50 {
                panic!("comparison failed");
            }
            b.cmp(a)
        })
    });
    assert!(list.verify_links(), "The list should stay consistent after a panic.");
    assert!(list.len() < 100);

    drop(list);
    assert_eq!(alloc.live(), 0, "Nodes outside of the list should be freed by the panic.");
}

#[test]
fn test_unique_by() {
    let mut list = LinkedList::from([1, 3, 5, 2, 4, 7, 8]);
    // Keeps the first of each run of equal parity.
    assert_eq!(list.unique_by(|a, b| a % 2 == b % 2), 3);
    assert!(list.iter().copied().eq([1, 2, 7, 8]));

    let mut single = LinkedList::from([1]);
    assert_eq!(single.unique(), 0);
}

#[test]
fn test_reverse() {
    let mut list: LinkedList<_> = (0..5).collect();
    list.reverse();
    assert!(list.iter().copied().eq((0..5).rev()));
    assert!(list.verify_links());
    list.reverse();
    assert!(list.iter().copied().eq(0..5));

    let mut empty: LinkedList<u8> = LinkedList::new();
    empty.reverse();
    assert!(empty.verify_links());
}

#[test]
fn test_remove_if_and_retain() {
    let mut list: LinkedList<_> = (0..1000).collect();
    assert_eq!(list.remove_if(|v| v % 2 == 0), 500);
    assert_eq!(list.len(), 500);
    assert!(list.iter().all(|v| v % 2 == 1));

    list.retain(|v| *v < 10);
    assert!(list.iter().copied().eq([1, 3, 5, 7, 9]));
    assert!(list.verify_links());
}

#[test]
fn test_cursor() {
    let mut list = LinkedList::from([1, 2, 4]);
    let mut cursor = list.cursor_front_mut();
    assert_eq!(cursor.index(), Some(0));
    assert_eq!(cursor.peek_prev(), None);

    cursor.move_next();
    cursor.insert_after(3);
    assert_eq!(cursor.current(), Some(&mut 2));
    assert_eq!(cursor.peek_next(), Some(&3));

    cursor.move_next().move_next().move_next();
    assert!(cursor.is_ghost());
    assert_eq!(cursor.index(), None);
    cursor.insert_before(5);
    cursor.insert_after(0);
    assert_eq!(cursor.as_list().len(), 6);

    cursor.move_next();
    assert_eq!(cursor.index(), Some(0));
    assert_eq!(cursor.remove_current(), Some(0));
    assert_eq!(cursor.current(), Some(&mut 1));

    cursor.move_prev();
    assert!(cursor.is_ghost());
    cursor.move_prev();
    assert_eq!(cursor.index(), Some(4));
    assert_eq!(cursor.current(), Some(&mut 5));
    assert!(list.iter().copied().eq(1..=5));
    assert!(list.verify_links());
}

#[test]
fn test_cursor_splice() {
    let mut list = LinkedList::from([1, 5]);
    let mut other = LinkedList::from([2, 3, 4]);
    let mut cursor = list.cursor_at_mut(1);
    cursor.splice_before(&mut other);
    assert_eq!(cursor.index(), Some(4));
    assert_eq!(cursor.current(), Some(&mut 5));
    assert!(other.is_empty());
    assert!(list.iter().copied().eq(1..=5));

    let mut back = list.cursor_back_mut();
    assert_eq!(back.remove_current(), Some(5));
    assert!(back.is_ghost());
    assert_eq!(back.remove_current(), None);
    assert_panics!({ list.cursor_at_mut(5); });
}

#[test]
fn test_iterators() {
    let mut list: LinkedList<_> = (0..6).collect();
    let mut iter = list.iter();
    assert_eq!(iter.len(), 6);
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&5));
    assert!(iter.clone().copied().eq(1..5));
    assert_eq!(iter.len(), 4);

    for value in list.iter_mut().rev().take(2) {
        *value *= 10;
    }
    assert!(list.iter().copied().eq([0, 1, 2, 3, 40, 50]));

    let mut owned = list.into_iter();
    assert_eq!(owned.next_back(), Some(50));
    assert_eq!(owned.len(), 5);
    assert!(owned.eq([0, 1, 2, 3, 40]));
}

#[test]
fn test_drops() {
    let counter = CountedDrop::new(0);
    let mut list = LinkedList::from_elem(counter.clone(), 8);
    drop(list.pop_front());
    drop(list.remove(3));
    assert_eq!(*counter.borrow(), 2);

    while list.len() > 4 {
        list.pop_back();
    }
    assert_eq!(*counter.borrow(), 4);

    let mut iter = list.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(*counter.borrow(), 8);
}

#[test]
fn test_allocations_balance() {
    let alloc = Instrumented::new();
    let mut list = LinkedList::new_in(alloc.clone());
    list.extend(0..100);
    assert_eq!(alloc.live(), 101);

    list.sort_by(|a, b| b.cmp(a));
    list.remove_if(|v| v % 3 == 0);
    assert_eq!(alloc.live(), list.len() + 1);

    drop(list);
    assert_eq!(alloc.live(), 0);
    assert_eq!(alloc.live_bytes(), 0);
}

#[test]
fn test_clone() {
    let original = LinkedList::from([String::from("a"), String::from("b")]);
    let mut copy = original.clone();
    copy[0].push('!');
    assert_eq!(original[0], "a");
    assert_ne!(original, copy);

    let budget = PanicOnClone::new(1, 4);
    let drops = budget.drops.clone();
    let source = LinkedList::from([budget.clone(), budget.clone(), budget.clone()]);
    drop(budget);
    assert_panics!({ source.clone() });
    assert_eq!(*drops.borrow(), 2, "The partial copy should be dropped.");
    assert_eq!(source.len(), 3);
}

#[test]
fn test_swap_and_assign() {
    let mut a = LinkedList::new_in(Instrumented::with_propagation(Propagation::NONE));
    let mut b = LinkedList::new_in(Instrumented::with_propagation(Propagation::NONE));
    a.extend(0..3);
    b.extend(10..12);
    a.swap_with(&mut b);
    assert!(a.iter().copied().eq(10..12));
    assert!(b.iter().copied().eq(0..3));
    assert!(!a.allocator().same_source(b.allocator()));

    let mut c = LinkedList::from([1, 2]);
    let mut d = LinkedList::from([3]);
    c.swap_with(&mut d);
    assert_eq!(c, LinkedList::from([3]));
    c.assign(d);
    assert_eq!(c, LinkedList::from([1, 2]));
}

#[test]
fn test_zst() {
    let mut list = LinkedList::new();
    for _ in 0..100 {
        list.push_back(ZeroSizedType);
    }
    assert_eq!(list.len(), 100);
    assert_eq!(list.unique(), 99);
    assert_eq!(list.iter().count(), 1);
}

#[test]
fn test_ordering_and_format() {
    let a = LinkedList::from([1, 2]);
    let b = LinkedList::from([1, 3]);
    assert!(a < b);
    assert!(LinkedList::from([1]) < a);
    assert_eq!(format!("{a}"), "(1) -> (2)");
    assert_eq!(format!("{a:?}"), "LinkedList { contents: [1, 2], len: 2 }");
}
