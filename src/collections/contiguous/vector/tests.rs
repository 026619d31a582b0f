#![cfg(test)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::alloc::{Instrumented, Propagation};
use crate::util::alloc::{CountedDrop, PanicOnClone, ZeroSizedType};
use crate::util::error::IndexOutOfBounds;
use crate::util::panic::assert_panics;

#[test]
fn test_growth_doubles() {
    let mut vec = Vector::new();
    let mut caps = Vector::new();
    for i in 0..9 {
        vec.push(i);
        caps.push(vec.cap());
    }
    assert_eq!(caps, [1, 2, 4, 4, 8, 8, 8, 8, 16], "Capacity should double when full.");
    assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_amortized_moves() {
    let alloc = Instrumented::new();
    let mut vec = Vector::new_in(alloc.clone());
    for i in 0..1024 {
        vec.push(i);
    }
    assert_eq!(alloc.allocations(), 11, "1024 pushes should only allocate log2(1024) + 1 times.");
    assert_eq!(alloc.live(), 1);
}

#[test]
fn test_insert_remove() {
    let mut vec = Vector::from([1, 2, 3]);
    vec.insert(0, 0);
    vec.insert(4, 4);
    vec.insert(2, 100);
    assert_eq!(vec, [0, 1, 100, 2, 3, 4]);

    assert_eq!(vec.remove(2), 100);
    assert_eq!(vec.remove(4), 4);
    assert_eq!(vec.remove(0), 0);
    assert_eq!(vec, [1, 2, 3]);

    assert_eq!(vec.try_insert(4, 5), Err(IndexOutOfBounds { index: 4, len: 3 }));
    assert_eq!(vec.try_remove(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
    assert_panics!({ vec.insert(10, 0) });
    assert_panics!({ vec.remove(3) });
}

#[test]
fn test_batch_appends_grow_geometrically() {
    let alloc = Instrumented::new();
    let mut vec = Vector::new_in(alloc.clone());
    for i in 0..1000 {
        vec.extend_from_slice(&[i]);
    }
    assert_eq!(vec.len(), 1000);
    assert!(alloc.allocations() <= 11, "Small batches shouldn't reallocate every time.");

    let alloc = Instrumented::new();
    let mut vec = Vector::new_in(alloc.clone());
    for i in 0..1000 {
        vec.extend(std::iter::once(i));
    }
    let mut other = Vector::new_in(alloc.clone());
    for i in 0..1000 {
        other.push(i);
        vec.append(&mut other);
    }
    assert_eq!(vec.len(), 2000);
    assert!(vec.iter().copied().eq((0..1000).chain(0..1000)));
    assert!(alloc.allocations() <= 13);
}

#[test]
fn test_indexed_access() {
    let mut vec = Vector::from(["a", "b", "c"]);
    assert_eq!(*vec.at(2), "c");
    *vec.at_mut(0) = "z";
    assert_eq!(vec.replace(1, "y"), "b");
    assert_eq!(vec, ["z", "y", "c"]);

    let err = vec.try_at(3).unwrap_err();
    assert_eq!(err.index, 3, "The error should carry the offending index.");
    assert_eq!(err.len, 3);
    assert!(vec.try_at_mut(7).is_err());
    assert_panics!({ vec.at(3); });
}

#[test]
fn test_reserve_and_shrink() {
    let mut vec: Vector<u32> = Vector::new();
    vec.reserve(10);
    assert_eq!(vec.cap(), 10);
    vec.reserve(5);
    assert_eq!(vec.cap(), 10, "Reserving less than the capacity should do nothing.");

    vec.extend([1, 2, 3]);
    vec.reserve_extra(10);
    assert_eq!(vec.cap(), 20, "Reserving extra should at least double the capacity.");

    vec.shrink_to_fit();
    assert_eq!(vec.cap(), 3);
    assert_eq!(vec, [1, 2, 3]);

    vec.clear();
    vec.shrink_to_fit();
    assert_eq!(vec.cap(), 0, "An empty Vector should release its allocation.");
}

#[test]
fn test_reserve_failure_is_strong() {
    let alloc = Instrumented::new();
    let mut vec = Vector::new_in(alloc.clone());
    vec.extend([1_u64, 2, 3]);
    let old_ptr = vec.as_ptr();
    let old_cap = vec.cap();

    alloc.fail_after(0);
    assert!(vec.try_reserve(100).unwrap_err().is_alloc_failure());
    assert_eq!(vec.as_ptr(), old_ptr, "A failed reservation shouldn't move anything.");
    assert_eq!(vec.cap(), old_cap);
    assert_eq!(vec, [1, 2, 3]);

    assert!(vec.try_reserve(usize::MAX).unwrap_err().is_capacity_overflow());
    alloc.never_fail();
}

#[test]
fn test_reallocation_invalidates_pointer() {
    let mut vec = Vector::with_cap(2);
    vec.push(1_u64);
    let before = vec.as_ptr();
    vec.push(2);
    assert_eq!(vec.as_ptr(), before, "Pushing within capacity shouldn't reallocate.");
    vec.push(3);
    assert_ne!(vec.as_ptr(), before, "Growing should move into a new allocation.");
}

#[test]
fn test_truncate_drops_tail() {
    let counter = CountedDrop::new(0);
    let mut vec: Vector<_> = (0..6).map(|_| counter.clone()).collect();
    vec.truncate(10);
    assert_eq!(*counter.borrow(), 0);
    vec.truncate(2);
    assert_eq!(*counter.borrow(), 4);
    assert_eq!(vec.len(), 2);
    drop(vec);
    assert_eq!(*counter.borrow(), 6);
}

#[test]
fn test_resize() {
    let mut vec = Vector::from([1, 2]);
    vec.resize(5, 9);
    assert_eq!(vec, [1, 2, 9, 9, 9]);
    vec.resize(1, 0);
    assert_eq!(vec, [1]);
}

#[test]
fn test_resize_panicking_clone() {
    let original = PanicOnClone::new(7, 2);
    let drops = original.drops.clone();
    let mut vec = Vector::new();
    vec.push(PanicOnClone::new(1, 0));

    assert_panics!({ vec.resize(6, original) });
    assert_eq!(vec.len(), 1, "The Vector should keep its original contents.");
    assert_eq!(vec[0].value, 1);
    // Two clones and the original value itself.
    assert_eq!(*drops.borrow(), 3, "Every clone made before the panic should be dropped.");
}

#[test]
fn test_clone_panicking_element() {
    let budget = Rc::new(RefCell::new(3));
    let drops = Rc::new(RefCell::new(0));
    let vec: Vector<_> = (0..5)
        .map(|value| PanicOnClone { value, budget: budget.clone(), drops: drops.clone() })
        .collect();

    assert_panics!({ vec.clone() });
    assert_eq!(*drops.borrow(), 3);

    *budget.borrow_mut() = 5;
    let copy = vec.clone();
    assert_eq!(copy, vec);
}

#[test]
fn test_from_elem() {
    let vec = Vector::from_elem(String::from("x"), 3);
    assert_eq!(vec.len(), 3);
    assert!(vec.iter().all(|s| s == "x"));

    let empty = Vector::from_elem(1, 0);
    assert_eq!(empty.cap(), 0);
}

#[test]
fn test_push_with() {
    let mut vec = Vector::from([1]);
    *vec.push_with(|| 2) += 10;
    assert_eq!(vec, [1, 12]);

    assert_panics!({ vec.push_with(|| panic!("boom")); });
    assert_eq!(vec, [1, 12], "A panicking producer shouldn't touch the Vector.");
}

#[test]
fn test_append_and_extend() {
    let mut a = Vector::from([1, 2]);
    let mut b = Vector::from([3, 4]);
    a.append(&mut b);
    assert_eq!(a, [1, 2, 3, 4]);
    assert!(b.is_empty());

    a.extend_from_slice(&[5, 6]);
    a.extend(&[7]);
    assert_eq!(a, [1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_into_iter() {
    let counter = CountedDrop::new(0);
    let vec: Vector<_> = (0..5).map(|_| counter.clone()).collect();
    let mut iter = vec.into_iter();
    assert_eq!(iter.len(), 5);
    drop(iter.next());
    drop(iter.next_back());
    assert_eq!(*counter.borrow(), 2);
    assert_eq!(iter.as_slice().len(), 3);
    drop(iter);
    assert_eq!(*counter.borrow(), 5, "Unyielded values should be dropped with the iterator.");

    let vec = Vector::from([1, 2, 3]);
    assert_eq!(vec.into_iter().rev().collect::<Vector<_>>(), [3, 2, 1]);
}

#[test]
fn test_zst_support() {
    let mut vec = Vector::new();
    for _ in 0..100 {
        vec.push(ZeroSizedType);
    }
    assert_eq!(vec.len(), 100);
    vec.insert(50, ZeroSizedType);
    assert_eq!(vec.remove(0), ZeroSizedType);
    assert_eq!(vec.into_iter().count(), 100);
}

#[test]
fn test_swap_with_policies() {
    let alloc = Instrumented::with_propagation(Propagation::NONE);
    let other_alloc = Instrumented::with_propagation(Propagation::NONE);
    let mut a = Vector::new_in(alloc.clone());
    let mut b = Vector::new_in(other_alloc.clone());
    a.extend([1, 2, 3]);
    b.extend([4]);

    a.swap_with(&mut b);
    assert_eq!(a, [4]);
    assert_eq!(b, [1, 2, 3]);
    assert!(a.allocator().same_source(&alloc), "Allocators shouldn't be swapped.");

    let mut c = Vector::new_in(Instrumented::new());
    let mut d = Vector::new_in(Instrumented::new());
    c.push(1);
    let d_alloc = d.allocator().clone();
    c.swap_with(&mut d);
    assert_eq!(d, [1]);
    assert!(c.allocator().same_source(&d_alloc), "Allocators should follow the swap.");
}

#[test]
fn test_assign_without_propagation() {
    let alloc = Instrumented::with_propagation(Propagation::NONE);
    let mut target = Vector::new_in(alloc.clone());
    target.push(String::from("old"));

    let mut source = Vector::new_in(Instrumented::with_propagation(Propagation::NONE));
    source.push(String::from("new"));
    target.assign(source);

    assert_eq!(target, [String::from("new")]);
    assert!(target.allocator().same_source(&alloc));
}

#[test]
fn test_clone_from_adopts_allocator() {
    let source_alloc = Instrumented::new();
    let mut source = Vector::new_in(source_alloc.clone());
    source.extend([1, 2, 3]);
    let mut target = Vector::new_in(Instrumented::new());
    target.clone_from(&source);
    assert_eq!(target, source);
    assert!(target.allocator().same_source(&source_alloc));
}

#[test]
fn test_ordering_and_format() {
    let a = Vector::from([1, 2, 3]);
    let b = Vector::from([1, 3]);
    assert!(a < b);
    assert_eq!(format!("{a}"), "![1, 2, 3]");
}
