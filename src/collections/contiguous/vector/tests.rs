#![cfg(test)]

use std::hash::{BuildHasher, RandomState};
use std::iter;

use super::*;
use crate::collections::contiguous::Array;
use crate::util::alloc::{CountedDrop, ZeroSizedType, fail_after};
use crate::util::error::{IndexOutOfBounds, TryInsertError};
use crate::util::panic::assert_panics;

#[test]
fn test_push_and_growth() {
    let mut vec = Vector::new();
    assert_eq!(vec.cap(), 0, "A new Vector shouldn't allocate.");

    vec.push(0);
    assert_eq!(vec.cap(), MIN_CAP, "The first push should grow to the minimum capacity.");

    for i in 1..5 {
        vec.push(i);
    }
    assert_eq!(vec.cap(), 8, "Capacity should double each time the Vector fills.");
    assert_eq!(*vec, [0, 1, 2, 3, 4]);
    assert_eq!(vec.front(), Some(&0));
    assert_eq!(vec.back(), Some(&4));

    assert_eq!(vec.pop(), Some(4));
    assert_eq!(vec.len(), 4);
}

#[test]
fn test_zst_support() {
    let mut vec = Vector::new();
    for _ in 0..100 {
        vec.push(ZeroSizedType);
    }
    assert_eq!(vec.len(), 100);
    vec.erase(10..90);
    assert_eq!(vec.len(), 20);
    assert_eq!(vec.into_iter().count(), 20);
}

#[test]
fn test_insert_and_remove() {
    let mut vec: Vector<_> = (0..5).collect();

    vec.insert(5, 5);
    vec.insert(0, -1);
    vec.insert(3, 100);
    assert_eq!(*vec, [-1, 0, 1, 100, 2, 3, 4, 5]);

    assert_eq!(vec.remove(3), 100);
    assert_eq!(vec.remove(0), -1);
    assert_eq!(vec.remove(5), 5);
    assert_eq!(*vec, [0, 1, 2, 3, 4]);

    assert_eq!(
        vec.try_insert(6, 0),
        Err(TryInsertError::IndexOutOfBounds(IndexOutOfBounds { index: 6, len: 5 })),
        "Inserting past the end should be rejected."
    );
    assert_eq!(vec.try_remove(5), Err(IndexOutOfBounds { index: 5, len: 5 }));
    assert_panics!({ Vector::<u8>::new().remove(0); });
}

#[test]
fn test_erase_and_truncate() {
    let counter = CountedDrop::new(0);
    let mut vec: Vector<_> = iter::repeat_n(counter.clone(), 10).collect();

    vec.erase(2..5);
    assert_eq!(counter.take(), 3, "Erasing a range should drop exactly that range.");
    assert_eq!(vec.len(), 7);

    vec.truncate(10);
    assert_eq!(vec.len(), 7, "Truncating to a longer length should do nothing.");

    vec.truncate(4);
    assert_eq!(counter.take(), 3);

    vec.clear();
    assert_eq!(counter.take(), 4);
    assert!(vec.is_empty());

    let mut vec: Vector<_> = (0..10).collect();
    vec.erase(..=2);
    vec.erase(5..);
    assert_eq!(*vec, [3, 4, 5, 6, 7]);
    assert_panics!({ Vector::from_iter(0..3).erase(2..4) });
}

#[test]
fn test_resize_and_replace() {
    let mut vec: Vector<u8> = Vector::new();
    vec.resize(3, 7);
    assert_eq!(*vec, [7, 7, 7]);

    let mut next = 0;
    vec.resize_with(5, || { next += 1; next });
    assert_eq!(*vec, [7, 7, 7, 1, 2]);

    assert_eq!(vec.replace(0, 9), 7);
    vec.resize(2, 0);
    assert_eq!(*vec, [9, 7]);
}

#[test]
fn test_reserve() {
    let mut vec: Vector<u32> = Vector::with_cap(4);
    vec.extend([1, 2, 3]);

    vec.reserve(1);
    assert_eq!(vec.cap(), 4, "Reserving space that already exists shouldn't reallocate.");

    vec.reserve(5);
    assert_eq!(vec.cap(), 8, "Reserving should grow to exactly len + extra.");

    assert!(vec.try_reserve(usize::MAX).unwrap_err().is_capacity_overflow());
    assert_eq!(*vec, [1, 2, 3], "A failed reservation should leave the Vector unchanged.");

    vec.shrink_to_fit();
    assert_eq!(vec.cap(), 3);
}

#[test]
fn test_push_failure_rolls_back() {
    let mut vec: Vector<u32> = (0..4).collect();
    vec.shrink_to_fit();

    let result = {
        let _guard = fail_after(0);
        vec.try_push(4)
    };

    assert!(result.unwrap_err().is_alloc_error());
    assert_eq!(*vec, [0, 1, 2, 3], "A failed push should leave the Vector unchanged.");
    assert_eq!(vec.cap(), 4);

    vec.push(4);
    assert_eq!(*vec, [0, 1, 2, 3, 4]);
}

#[test]
fn test_append_and_swap() {
    let counter = CountedDrop::new(0);
    let mut a: Vector<_> = iter::repeat_n(counter.clone(), 3).collect();
    let b: Vector<_> = iter::repeat_n(counter.clone(), 4).collect();

    a.append(b);
    assert_eq!(a.len(), 7);
    assert_eq!(counter.take(), 0, "Appending should move values rather than dropping them.");

    let mut c = Vector::new();
    a.swap_with(&mut c);
    assert!(a.is_empty());
    assert_eq!(c.len(), 7);

    drop(c);
    assert_eq!(counter.take(), 7);
}

#[test]
fn test_conversions() {
    let vec: Vector<_> = (0..5).collect();
    let std_vec: Vec<_> = vec.clone().into();
    assert_eq!(std_vec, [0, 1, 2, 3, 4]);

    let back: Vector<_> = std_vec.into();
    assert_eq!(back, vec, "Converting to and from Vec should keep every value.");

    let arr: Array<_> = vec.clone().into();
    assert_eq!(*arr, [0, 1, 2, 3, 4]);
    assert_eq!(Vector::from(arr), vec);
}

#[test]
fn test_ordering_and_hash() {
    let a: Vector<_> = [1, 2, 3].into_iter().collect();
    let b: Vector<_> = [1, 2, 4].into_iter().collect();
    let c: Vector<_> = [1, 2].into_iter().collect();

    assert!(a < b, "Vectors should compare lexicographically.");
    assert!(c < a, "A prefix should compare less than the longer Vector.");
    assert_eq!(a.clone(), a);

    let state = RandomState::new();
    assert_eq!(state.hash_one(&a), state.hash_one([1, 2, 3].as_slice()));
}

#[test]
fn test_into_iter() {
    let counter = CountedDrop::new(0);
    let mut vec = Vector::with_cap(10);
    vec.extend(iter::repeat_n(counter.clone(), 6));

    let mut iter = vec.into_iter();
    assert_eq!(iter.len(), 6, "Spare capacity shouldn't be iterated.");
    drop(iter.next_back());
    drop(iter);
    assert_eq!(counter.take(), 6);

    let vec: Vector<_> = (0..4).collect();
    assert_eq!(vec.into_iter().rev().collect::<Vector<_>>(), Vector::from_iter([3, 2, 1, 0]));
}
