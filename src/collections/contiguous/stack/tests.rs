#![cfg(test)]

use super::*;
use crate::alloc::{Instrumented, Propagation};
use crate::collections::contiguous::Vector;
use crate::util::alloc::CountedDrop;
use crate::util::error::EmptyCollection;
use crate::util::panic::assert_panics;

#[test]
fn test_lifo_order() {
    let mut stack = Stack::new();
    for i in 0..10 {
        stack.push(i);
    }
    assert_eq!(stack.len(), 10);
    assert_eq!(*stack.top(), 9);

    for i in (0..10).rev() {
        assert_eq!(stack.pop(), Some(i), "Values should come off in reverse order.");
    }
    assert_eq!(stack.pop(), None);
}

#[test]
fn test_empty_errors() {
    let mut stack: Stack<u8> = Stack::new();
    assert_eq!(stack.try_top(), Err(EmptyCollection));
    assert_eq!(stack.try_pop(), Err(EmptyCollection));
    assert!(stack.try_top_mut().is_err());
    assert_panics!({ stack.top(); });
    assert_panics!({ stack.top_mut(); });
}

#[test]
fn test_bottom_up_access() {
    let mut stack = Stack::from(['a', 'b', 'c']);
    assert_eq!(*stack.at(0), 'a', "Index 0 should be the bottom of the Stack.");
    assert_eq!(stack.try_at(3).unwrap_err().index, 3);
    assert_eq!(stack.iter().collect::<String>(), "abc");

    *stack.top_mut() = 'z';
    for c in stack.iter_mut() {
        c.make_ascii_uppercase();
    }
    assert_eq!(&*stack, &['A', 'B', 'Z']);
    assert_eq!(stack.into_iter().next(), Some('A'));
}

#[test]
fn test_push_with() {
    let mut stack = Stack::new();
    stack.push_with(Vector::<u8>::new).push(3);
    assert_eq!(stack.top(), &[3]);
}

#[test]
fn test_drops_everything() {
    let counter = CountedDrop::new(0);
    let mut stack = Stack::from_elem(counter.clone(), 4);
    drop(stack.pop());
    assert_eq!(*counter.borrow(), 1);
    stack.clear();
    assert_eq!(*counter.borrow(), 4);
    assert!(stack.is_empty());
}

#[test]
fn test_capacity() {
    let mut stack: Stack<u32> = Stack::with_cap(3);
    stack.push(1);
    stack.reserve(8);
    assert_eq!(stack.cap(), 8);
    stack.shrink_to_fit();
    assert_eq!(stack.cap(), 1);
}

#[test]
fn test_swap_and_compare() {
    let mut a = Stack::new_in(Instrumented::with_propagation(Propagation::NONE));
    let mut b = Stack::new_in(Instrumented::with_propagation(Propagation::NONE));
    a.extend([1, 2]);
    b.extend([3]);
    a.swap_with(&mut b);
    assert_eq!(&*a, &[3]);
    assert_eq!(&*b, &[1, 2]);

    let c = Stack::from([1, 2]);
    let d = c.clone();
    assert_eq!(c, d);
    assert!(Stack::from([1, 1]) < c);
    assert_eq!(format!("{c}"), "![1, 2]");
}
