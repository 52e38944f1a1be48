#![cfg(test)]

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use proptest::prelude::*;

use super::*;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

#[test]
fn test_push_and_pop_heap() {
    let mut v = Vec::new();
    for value in [5, 1, 8, 3, 9, 2] {
        v.push(value);
        push_heap(&mut v);
        assert!(is_heap(&v), "{v:?} should be a heap after pushing {value}.");
    }
    assert_eq!(v[0], 9);

    let mut popped = Vec::new();
    while !v.is_empty() {
        pop_heap(&mut v);
        popped.extend(v.pop());
        assert!(is_heap(&v));
    }
    assert_eq!(popped, [9, 8, 5, 3, 2, 1]);
}

#[test]
fn test_make_and_sort_heap() {
    let mut v = [4, 10, 3, 5, 1, 7, 7, 0];
    assert!(!is_heap(&v));
    make_heap(&mut v);
    assert!(is_heap(&v));
    assert_eq!(v[0], 10);

    sort_heap(&mut v);
    assert_eq!(v, [0, 1, 3, 4, 5, 7, 7, 10]);

    let mut empty: [u8; 0] = [];
    make_heap(&mut empty);
    sort_heap(&mut empty);
    let mut single = [1];
    pop_heap(&mut single);
    assert_eq!(single, [1]);
}

#[test]
fn test_heap_with_comparator() {
    // A min-heap, by reversing the predicate.
    let mut v = vec![5, 3, 8, 1];
    make_heap_by(&mut v, |a, b| a > b);
    assert_eq!(v[0], 1);
    assert!(is_heap_by(&v, |a, b| a > b));

    v.push(0);
    push_heap_by(&mut v, |a, b| a > b);
    assert_eq!(v[0], 0);

    sort_heap_by(&mut v, |a, b| a > b);
    assert_eq!(v, [8, 5, 3, 1, 0]);
}

#[test]
fn test_heap_survives_panicking_comparator() {
    let counter = CountedDrop::new(0);
    let mut v: Vec<(u32, CountedDrop)> = (0..8).map(|i| (i, counter.clone())).collect();
    let calls = Cell::new(0);

    let mut cloned = v.clone();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        make_heap_by(&mut cloned, |a, b| {
            calls.set(calls.get() + 1);
            if calls.get() == 5 {
                panic!("comparison failed");
            }
            a.0 < b.0
        });
    }));
    assert!(result.is_err());
    drop(cloned);

    // Every clone was dropped exactly once despite the panic mid-sift.
    assert_eq!(*counter.borrow(), 8);
    make_heap_by(&mut v, |a, b| a.0 < b.0);
    assert_eq!(v[0].0, 7);
}

#[test]
fn test_accumulate_and_inner_product() {
    assert_eq!(accumulate([1, 2, 3, 4], 10), 20);
    assert_eq!(accumulate(Vec::<i32>::new(), 7), 7);
    assert_eq!(accumulate_by(["a", "b", "c"], String::new(), |acc, s| acc + s), "abc");

    assert_eq!(inner_product([1, 2, 3], [4, 5, 6], 0), 32);
    assert_eq!(inner_product([1, 2, 3], [4, 5], 0), 14, "The shorter sequence should win.");
    assert_eq!(inner_product_by([1, 2], [3, 4], 1, |acc, x| acc * x, |a, b| a + b), 24);
}

#[test]
fn test_partial_sum_and_adjacent_difference() {
    assert_eq!(partial_sum([1, 2, 3, 4]).collect::<Vec<_>>(), [1, 3, 6, 10]);
    assert_eq!(partial_sum(Vec::<i32>::new()).count(), 0);
    assert_eq!(partial_sum_by([1, 2, 3, 4], |a, b| a * b).collect::<Vec<_>>(), [1, 2, 6, 24]);

    assert_eq!(adjacent_difference([5, 1, 4, 4]).collect::<Vec<_>>(), [5, -4, 3, 0]);
    assert_eq!(
        adjacent_difference_by([1, 2, 3], |current, previous| current + previous)
            .collect::<Vec<_>>(),
        [1, 3, 5]
    );

    // The two are inverses of each other.
    let values = [3, 1, 4, 1, 5, 9, 2, 6];
    let sums: Vec<i32> = partial_sum(values).collect();
    assert_eq!(adjacent_difference(sums).collect::<Vec<_>>(), values);
}

#[test]
fn test_power_and_iota() {
    assert_eq!(power(2_u64, 10), 1024);
    assert_eq!(power(3_i32, 0), 1);
    assert_eq!(power(5_i32, 1), 5);
    assert_eq!(power(1.5_f64, 2), 2.25);

    assert_eq!(power_by(String::from("ab"), 3, |a, b| a + &b), Some("ababab".to_owned()));
    assert_eq!(power_by(2, 0, |a, b| a * b), None);

    let mut v = [0_u8; 5];
    iota(&mut v, 251);
    assert_eq!(v, [251, 252, 253, 254, 255], "Filling up to the maximum shouldn't overflow.");
}

#[test]
fn test_equal_and_mismatch() {
    assert!(equal([1, 2, 3], [1, 2, 3]));
    assert!(equal([1, 2], [1, 2, 3]), "Only the first sequence needs to be covered.");
    assert!(!equal([1, 2, 3], [1, 2]));
    assert!(!equal([1, 2, 3], [1, 5, 3]));
    assert!(equal_by(["A", "b"], ["a", "B"], |x, y| x.eq_ignore_ascii_case(y)));

    assert_eq!(mismatch(&[1, 2, 3, 4], &[1, 2, 0, 4]), 2);
    assert_eq!(mismatch(&[1, 2], &[1, 2, 3]), 2);
    assert_eq!(mismatch_by(&[1, 2, 3], &[2, 4, 7], |x, y| x * 2 == *y), 2);
}

#[test]
fn test_lexicographical_compare() {
    assert!(lexicographical_compare([1, 2, 3], [1, 2, 4]));
    assert!(!lexicographical_compare([1, 2, 4], [1, 2, 3]));
    assert!(lexicographical_compare([1, 2], [1, 2, 0]), "A proper prefix orders first.");
    assert!(!lexicographical_compare([1, 2], [1, 2]));
    assert!(!lexicographical_compare([1, 2, 0], [1, 2]));
    assert!(lexicographical_compare_by([3, 2], [3, 1], |a, b| a > b));

    assert_eq!(lexicographical_ordering("abc".chars(), "abd".chars()), std::cmp::Ordering::Less);
}

#[test]
fn test_fill_and_copy() {
    let mut v = [0; 6];
    fill(&mut v[1..3], &7);
    assert_eq!(v, [0, 7, 7, 0, 0, 0]);

    assert_eq!(fill_n(&mut v, 4, &2), 4);
    assert_eq!(v, [2, 2, 2, 2, 0, 0]);
    assert!(try_fill_n(&mut v, 7, &1).is_err());
    assert_panics!({
        let mut v = [0; 2];
        fill_n(&mut v, 3, &1);
    });

    let mut dst = [0; 4];
    assert_eq!(copy(&[1, 2, 3], &mut dst), 3);
    assert_eq!(dst, [1, 2, 3, 0]);
    assert_panics!({
        let mut dst = [0; 1];
        copy(&[1, 2], &mut dst);
    });
}

#[test]
fn test_copy_backward_overlapping() {
    let mut v = [1, 2, 3, 4, 5, 0, 0];
    // Shift the first five items right by two.
    assert_eq!(copy_backward(&mut v, 0..5, 7), 2);
    assert_eq!(v, [1, 2, 1, 2, 3, 4, 5]);

    let mut v = [1, 2, 3];
    assert_eq!(copy_backward(&mut v, 1..1, 2), 2, "An empty source should copy nothing.");
    assert_eq!(v, [1, 2, 3]);

    assert_panics!({
        let mut v = [1, 2, 3];
        copy_backward(&mut v, 0..3, 2);
    });
}

proptest! {
    #[test]
    fn prop_heap_sort_matches_sort(mut values in prop::collection::vec(any::<i16>(), 0..200)) {
        let mut expected = values.clone();
        expected.sort();

        make_heap(&mut values);
        prop_assert!(is_heap(&values));
        sort_heap(&mut values);
        prop_assert_eq!(values, expected);
    }

    #[test]
    fn prop_power_matches_repeated_multiplication(base in 0_u64..8, exp in 0_u64..20) {
        let expected = (0..exp).fold(1_u64, |acc, _| acc * base);
        prop_assert_eq!(power(base, exp), expected);
    }
}
