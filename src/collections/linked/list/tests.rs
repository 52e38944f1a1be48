#![cfg(test)]

use std::hash::{BuildHasher, RandomState};

use proptest::prelude::*;

use super::*;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

fn contents<T: Clone>(list: &List<T>) -> Vec<T> {
    list.verify_links();
    list.iter().cloned().collect()
}

#[test]
fn test_push_and_pop() {
    let mut list = List::new();
    assert_eq!(list.pop_front(), None);

    list.push_back(2);
    list.push_front(1);
    list.push_back(3);
    assert_eq!(contents(&list), [1, 2, 3]);
    assert_eq!(list.front(), Some(&1));
    assert_eq!(list.back(), Some(&3));

    *list.front_mut().unwrap() = 10;
    *list.back_mut().unwrap() = 30;
    assert_eq!(list.pop_front(), Some(10));
    assert_eq!(list.pop_back(), Some(30));
    assert_eq!(list.pop_back(), Some(2));
    assert!(list.is_empty());
    assert_eq!(list.back(), None);
}

#[test]
fn test_positional_access() {
    let mut list: List<_> = (0..10).collect();

    assert_eq!(list[3], 3);
    assert_eq!(*list.get(8), 8, "Indices past the middle should be found from the back.");
    list[5] = 50;

    list.insert(0, -1);
    list.insert(11, 100);
    list.insert(4, 25);
    assert_eq!(contents(&list), [-1, 0, 1, 2, 25, 3, 4, 50, 6, 7, 8, 9, 100]);

    assert_eq!(list.remove(4), 25);
    assert_eq!(list.remove(0), -1);
    assert_eq!(list.remove(10), 100);
    assert_eq!(list.replace(5, 5), 50);
    assert_eq!(contents(&list), (0..10).collect::<Vec<_>>());

    assert_eq!(list.try_get(10), Err(IndexOutOfBounds { index: 10, len: 10 }));
    assert_eq!(list.try_insert(11, 0), Err(IndexOutOfBounds { index: 11, len: 10 }));
    assert!(List::<u8>::new().try_remove(0).is_err());
    assert_panics!({ List::<u8>::new().get(0); });
}

#[test]
fn test_scenario_merge() {
    let mut a: List<_> = [1, 3, 5].into_iter().collect();
    let mut b: List<_> = [2, 4, 6].into_iter().collect();

    a.merge(&mut b);

    assert_eq!(contents(&a), [1, 2, 3, 4, 5, 6]);
    assert!(b.is_empty(), "The merged list should be left empty.");
    assert_eq!(b.len(), 0);
}

#[test]
fn test_merge_edges() {
    let mut a: List<i32> = List::new();
    let mut b: List<_> = [1, 2].into_iter().collect();
    a.merge(&mut b);
    assert_eq!(contents(&a), [1, 2], "Merging into an empty list should take everything.");

    let mut c = List::new();
    a.merge(&mut c);
    assert_eq!(contents(&a), [1, 2]);

    let mut d: List<_> = [0, 5, 6].into_iter().collect();
    a.merge(&mut d);
    assert_eq!(contents(&a), [0, 1, 2, 5, 6]);
}

#[test]
fn test_merge_is_stable() {
    let mut a: List<_> = [(1, 'a'), (2, 'a'), (2, 'b')].into_iter().collect();
    let mut b: List<_> = [(1, 'x'), (2, 'x'), (3, 'x')].into_iter().collect();

    a.merge_by(&mut b, |l, r| l.0.cmp(&r.0));

    assert_eq!(
        contents(&a),
        [(1, 'a'), (1, 'x'), (2, 'a'), (2, 'b'), (2, 'x'), (3, 'x')],
        "Equal keys from the receiving list should stay in front."
    );
}

#[test]
fn test_splice() {
    let mut a: List<_> = [1, 5].into_iter().collect();
    let mut b: List<_> = [2, 3, 4].into_iter().collect();

    a.splice(1, &mut b);
    assert_eq!(contents(&a), [1, 2, 3, 4, 5]);
    assert!(b.is_empty());

    let mut c: List<_> = [10, 20, 30].into_iter().collect();
    a.splice_one(0, &mut c, 1);
    assert_eq!(contents(&a), [20, 1, 2, 3, 4, 5]);
    assert_eq!(contents(&c), [10, 30]);

    a.splice_range(6, &mut c, ..);
    assert_eq!(contents(&a), [20, 1, 2, 3, 4, 5, 10, 30]);
    assert!(c.is_empty());

    let mut d = List::new();
    d.splice_range(0, &mut a, 1..4);
    assert_eq!(contents(&d), [1, 2, 3]);
    assert_eq!(contents(&a), [20, 4, 5, 10, 30]);

    d.splice_range(1, &mut a, 2..2);
    assert_eq!(d.len(), 3, "Splicing an empty range should do nothing.");
    assert_panics!({ List::<u8>::new().splice(1, &mut List::new()) });
}

#[test]
fn test_transfer() {
    let mut list: List<_> = (0..6).collect();

    list.transfer(0..2, 6);
    assert_eq!(contents(&list), [2, 3, 4, 5, 0, 1]);

    list.transfer(3..5, 0);
    assert_eq!(contents(&list), [5, 0, 2, 3, 4, 1]);

    list.transfer(1..3, 3);
    assert_eq!(contents(&list), [5, 0, 2, 3, 4, 1], "A range moved to its own end stays put.");

    assert_panics!({ List::from_iter(0..6).transfer(1..4, 2) });
}

#[test]
fn test_sort() {
    let mut list: List<_> = [5, 3, 9, 1, 1, 8, 0, 7].into_iter().collect();
    list.sort();
    assert_eq!(contents(&list), [0, 1, 1, 3, 5, 7, 8, 9]);

    let mut list: List<i32> = List::new();
    list.sort();
    assert!(list.is_empty());

    let mut list: List<_> = (0..100).collect();
    list.sort_by(|a, b| b.cmp(a));
    assert_eq!(contents(&list), (0..100).rev().collect::<Vec<_>>());
}

#[test]
fn test_sort_keeps_nodes() {
    let counter = CountedDrop::new(0);
    let mut list: List<_> = (0..20).rev().map(|i| (i, counter.clone())).collect();

    list.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(*counter.borrow(), 0, "Sorting should only relink nodes.");
    assert_eq!(list.iter().map(|(i, _)| *i).collect::<Vec<_>>(), (0..20).collect::<Vec<_>>());

    drop(list);
    assert_eq!(*counter.borrow(), 20);
}

#[test]
fn test_reverse() {
    let mut list: List<_> = (0..5).collect();
    list.reverse();
    assert_eq!(contents(&list), [4, 3, 2, 1, 0]);
    assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4]);

    let mut single: List<_> = [1].into_iter().collect();
    single.reverse();
    assert_eq!(contents(&single), [1]);
}

#[test]
fn test_removal_by_value() {
    let mut list: List<_> = [1, 2, 2, 3, 2, 2, 4, 4, 1].into_iter().collect();

    list.dedup();
    assert_eq!(contents(&list), [1, 2, 3, 2, 4, 1]);

    assert_eq!(list.remove_value(&2), 2);
    assert_eq!(contents(&list), [1, 3, 4, 1]);

    list.retain(|&i| i != 1);
    assert_eq!(contents(&list), [3, 4]);

    assert!(list.contains(&4));
    assert_eq!(list.index_of(&4), Some(1));
    assert_eq!(list.index_of(&7), None);

    list.retain(|_| false);
    assert!(list.is_empty());
}

#[test]
fn test_drop_and_clear() {
    let counter = CountedDrop::new(0);
    let mut list: List<_> = std::iter::repeat_n(counter.clone(), 5).collect();

    list.clear();
    assert_eq!(counter.take(), 5);

    list.extend(std::iter::repeat_n(counter.clone(), 4));
    let mut iter = list.into_iter();
    drop(iter.next_back());
    drop(iter);
    assert_eq!(counter.take(), 4, "Every element should be dropped exactly once.");
}

#[test]
fn test_iterators() {
    let mut list: List<_> = (1..=4).collect();

    let mut iter = list.iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.len(), 2);
    assert_eq!(iter.collect::<Vec<_>>(), [&2, &3]);

    for item in list.iter_mut() {
        *item *= 10;
    }
    assert_eq!(list.into_iter().rev().collect::<Vec<_>>(), [40, 30, 20, 10]);
}

#[test]
fn test_equality_and_format() {
    let a: List<_> = (0..3).collect();
    let b = a.clone();
    assert_eq!(a, b);
    assert!(a < List::from_iter([0, 2]));

    let state = RandomState::new();
    assert_eq!(state.hash_one(&a), state.hash_one(&b));

    assert_eq!(format!("{a}"), "(0) <-> (1) <-> (2)");
    assert_eq!(format!("{:?}", List::<u8>::new()), "List { contents: [], len: 0 }");
}

proptest! {
    #[test]
    fn prop_sort_is_stable(keys in prop::collection::vec(0_u8..8, 0..200)) {
        let mut list: List<_> = keys.iter().copied().enumerate().map(|(i, k)| (k, i)).collect();
        list.sort_by(|a, b| a.0.cmp(&b.0));
        list.verify_links();

        let mut expected: Vec<_> = keys.iter().copied().enumerate().map(|(i, k)| (k, i)).collect();
        // Vec's sort is stable, so ties stay in their original order.
        expected.sort_by_key(|&(k, _)| k);

        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn prop_splice_range_moves_elements(
        len in 0_usize..30,
        at_seed in any::<usize>(),
        a in any::<usize>(),
        b in any::<usize>(),
    ) {
        let mut source: List<_> = (0..len).collect();
        let mut dest: List<_> = (100..105).collect();
        let (start, end) = if len == 0 { (0, 0) } else {
            let (x, y) = (a % (len + 1), b % (len + 1));
            (x.min(y), x.max(y))
        };
        let at = at_seed % 6;

        dest.splice_range(at, &mut source, start..end);
        source.verify_links();
        dest.verify_links();

        let mut expected: Vec<_> = (100..105).collect();
        expected.splice(at..at, start..end);
        prop_assert_eq!(dest.iter().copied().collect::<Vec<_>>(), expected);
        prop_assert_eq!(source.len(), len - (end - start));
    }
}
