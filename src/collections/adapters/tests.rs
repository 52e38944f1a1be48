#![cfg(test)]

use std::cmp::Ordering;

use proptest::prelude::*;

use super::*;
use crate::collections::contiguous::Vector;
use crate::collections::deque::Deque;
use crate::collections::traits::{Natural, Reverse};
use crate::util::alloc::fail_after;

#[test]
fn test_stack_is_lifo() {
    let mut stack = Stack::new();
    assert!(stack.is_empty());
    assert_eq!(stack.top(), None);
    assert_eq!(stack.pop(), None);

    for i in 0..100 {
        stack.push(i);
    }
    assert_eq!(stack.len(), 100);
    assert_eq!(stack.top(), Some(&99));

    if let Some(top) = stack.top_mut() {
        *top = -1;
    }
    assert_eq!(stack.pop(), Some(-1));
    assert_eq!(stack.pop(), Some(98));
    assert_eq!(stack.len(), 98);

    let deque = stack.into_inner();
    assert_eq!(deque.front(), Some(&0), "The bottom of the stack should be the front.");
    assert_eq!(deque.back(), Some(&97));
}

#[test]
fn test_stack_from_deque_and_ordering() {
    let stack = Stack::from(Deque::from_iter([1, 2, 3]));
    assert_eq!(stack.top(), Some(&3));

    let other: Stack<i32> = [1, 2, 3].into_iter().collect();
    assert_eq!(stack, other);

    let longer: Stack<i32> = [1, 2, 3, 0].into_iter().collect();
    assert!(stack < longer, "A proper prefix should order first.");
    let greater: Stack<i32> = [1, 3].into_iter().collect();
    assert_eq!(stack.cmp(&greater), Ordering::Less);

    assert_eq!(format!("{stack:?}"), "Stack { contents: [1, 2, 3], len: 3 }");
}

#[test]
fn test_queue_is_fifo() {
    let mut queue = Queue::new();
    assert_eq!(queue.pop(), None);
    assert_eq!(queue.front(), None);

    for i in 0..100 {
        queue.push(i);
    }
    assert_eq!(queue.front(), Some(&0));
    assert_eq!(queue.back(), Some(&99));

    for i in 0..50 {
        assert_eq!(queue.pop(), Some(i));
    }
    queue.extend(100..110);
    assert_eq!(queue.len(), 60);
    assert_eq!(queue.front(), Some(&50));
    assert_eq!(queue.back(), Some(&109));

    if let Some(front) = queue.front_mut() {
        *front *= 2;
    }
    if let Some(back) = queue.back_mut() {
        *back = 0;
    }
    assert_eq!(queue.pop(), Some(100));

    let rest: Vec<_> = queue.into_inner().into_iter().collect();
    assert_eq!(rest.len(), 59);
    assert_eq!(rest.last(), Some(&0));
}

#[test]
fn test_queue_comparisons() {
    let a: Queue<char> = "abc".chars().collect();
    let b: Queue<char> = "abd".chars().collect();
    assert!(a < b);
    assert_ne!(a, b);
    assert_eq!(a.clone(), a);
    assert_eq!(Queue::<u8>::default(), Queue::new());
}

#[test]
fn test_priority_queue_pops_greatest_first() {
    let mut queue = PriorityQueue::new();
    assert_eq!(queue.top(), None);
    assert_eq!(queue.pop(), None);

    for value in [3, 1, 4, 1, 5, 9, 2, 6] {
        queue.push(value);
    }
    assert_eq!(queue.len(), 8);
    assert_eq!(queue.top(), Some(&9));

    let mut popped = Vec::new();
    while let Some(value) = queue.pop() {
        popped.push(value);
    }
    assert_eq!(popped, [9, 6, 5, 4, 3, 2, 1, 1]);
    assert!(queue.is_empty());
}

#[test]
fn test_priority_queue_with_reverse_ordering() {
    let mut queue = PriorityQueue::with_compare(Reverse(Natural));
    queue.extend([7, 3, 9, 1]);
    assert_eq!(queue.top(), Some(&1), "Reversing the ordering should give a min-queue.");
    assert_eq!(queue.pop(), Some(1));
    assert_eq!(queue.pop(), Some(3));

    let sorted = queue.into_sorted_vector();
    assert_eq!(&*sorted, &[9, 7], "Sorting should follow the reversed ordering.");
}

#[test]
fn test_priority_queue_with_closure() {
    let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
    let mut queue = PriorityQueue::with_compare(by_len);
    for word in ["ccc", "a", "dddd", "bb"] {
        queue.push(word);
    }
    assert_eq!(queue.top(), Some(&"dddd"));
    assert_eq!(queue.compare()(&"a", &"bb"), Ordering::Less);
}

#[test]
fn test_priority_queue_from_vector() {
    let data: Vector<u32> = Vector::from(vec![4, 8, 1, 9, 0, 3]);
    let queue = PriorityQueue::from_vector(data);
    assert_eq!(queue.top(), Some(&9));
    assert!(crate::algo::is_heap(queue.as_slice()));

    let collected: PriorityQueue<u32> = (0..10).collect();
    assert_eq!(&*collected.into_sorted_vector(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn test_priority_queue_push_failure_leaves_queue_unchanged() {
    let mut queue = PriorityQueue::new();
    queue.extend([1, 2, 3, 4]);

    // Push until the underlying Vector needs to grow, which then fails.
    let mut next = 5;
    let failed_at = loop {
        let len = queue.len();
        let before: Vec<i32> = queue.as_slice().to_vec();
        let _guard = fail_after(0);
        if queue.try_push(next).is_err() {
            break (len, before);
        }
        next += 1;
    };

    assert_eq!(queue.len(), failed_at.0);
    assert_eq!(queue.as_slice(), &*failed_at.1, "A failed push should leave the heap untouched.");
    assert_eq!(queue.top(), Some(&(next - 1)));
}

proptest! {
    #[test]
    fn prop_priority_queue_matches_sort(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let mut queue = PriorityQueue::new();
        queue.extend(values.iter().copied());

        let mut expected = values;
        expected.sort_by(|a, b| b.cmp(a));

        let mut popped = Vec::new();
        while let Some(value) = queue.pop() {
            popped.push(value);
        }
        prop_assert_eq!(popped, expected);
    }
}
