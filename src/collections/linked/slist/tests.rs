#![cfg(test)]

use proptest::prelude::*;

use super::*;
use crate::util::alloc::CountedDrop;
use crate::util::error::IndexOutOfBounds;
use crate::util::panic::assert_panics;

fn contents<T: Clone>(list: &Slist<T>) -> Vec<T> {
    assert_eq!(list.iter().count(), list.len(), "The cached length should match the chain.");
    list.iter().cloned().collect()
}

#[test]
fn test_front_operations() {
    let mut list = Slist::new();
    list.push_front(3);
    list.push_front(2);
    list.push_front(1);

    assert_eq!(contents(&list), [1, 2, 3]);
    assert_eq!(list.front(), Some(&1));
    *list.front_mut().unwrap() = 0;
    assert_eq!(list.pop_front(), Some(0));
    assert_eq!(list.len(), 2);
}

#[test]
fn test_positional_operations() {
    let mut list: Slist<_> = (0..5).collect();

    list.insert(0, -1);
    list.insert(6, 5);
    list.insert_after(2, 10);
    assert_eq!(contents(&list), [-1, 0, 1, 10, 2, 3, 4, 5]);

    assert_eq!(list.remove(3), 10);
    assert_eq!(list.erase_after(0), 0);
    assert_eq!(list.remove(0), -1);
    assert_eq!(contents(&list), [1, 2, 3, 4, 5]);

    assert_eq!(list.previous(0), None);
    assert_eq!(list.previous(3), Some(&3));
    assert_eq!(list.try_get(4), Ok(&5));
    assert_eq!(list.try_get(5), Err(IndexOutOfBounds { index: 5, len: 5 }));
    assert_eq!(list.try_insert(7, 0), Err(IndexOutOfBounds { index: 7, len: 5 }));
    assert!(list.try_remove(5).is_err());
    assert_panics!({ Slist::<u8>::new().insert_after(0, 1) });
}

#[test]
fn test_erase_after_range() {
    let counter = CountedDrop::new(0);
    let mut list: Slist<_> = (0..8).map(|i| (i, counter.clone())).collect();

    list.erase_after_range(1, 5);
    assert_eq!(counter.take(), 3);
    assert_eq!(list.iter().map(|(i, _)| *i).collect::<Vec<_>>(), [0, 1, 5, 6, 7]);

    list.erase_after_range(2, 5);
    assert_eq!(list.iter().map(|(i, _)| *i).collect::<Vec<_>>(), [0, 1, 5]);

    list.erase_after_range(0, 1);
    assert_eq!(list.len(), 3, "An empty range should erase nothing.");
    assert_panics!({ Slist::from_iter(0..3).erase_after_range(2, 1) });
}

#[test]
fn test_resize() {
    let mut list: Slist<_> = (0..3).collect();

    list.resize(5, 9);
    assert_eq!(contents(&list), [0, 1, 2, 9, 9]);

    list.resize(2, 0);
    assert_eq!(contents(&list), [0, 1]);

    let mut count = 0;
    list.resize_with(4, || { count += 1; count * 100 });
    assert_eq!(contents(&list), [0, 1, 100, 200]);
}

#[test]
fn test_splice() {
    let mut a: Slist<_> = [1, 5].into_iter().collect();
    let mut b: Slist<_> = [2, 3, 4].into_iter().collect();

    a.splice_after(0, &mut b);
    assert_eq!(contents(&a), [1, 2, 3, 4, 5]);
    assert!(b.is_empty());

    let mut c: Slist<_> = [6].into_iter().collect();
    a.splice(5, &mut c);
    assert_eq!(contents(&a), [1, 2, 3, 4, 5, 6]);

    a.splice(0, &mut Slist::new());
    assert_eq!(a.len(), 6);
}

#[test]
fn test_scenario_merge() {
    let mut a: Slist<_> = [1, 3, 5].into_iter().collect();
    let mut b: Slist<_> = [2, 4, 6].into_iter().collect();

    a.merge(&mut b);

    assert_eq!(contents(&a), [1, 2, 3, 4, 5, 6]);
    assert!(b.is_empty());

    let mut c: Slist<_> = [(0, 'c'), (3, 'c'), (9, 'c')].into_iter().collect();
    let mut d: Slist<_> = [(3, 'a'), (3, 'b')].into_iter().collect();
    d.merge_by(&mut c, |l, r| l.0.cmp(&r.0));
    assert_eq!(contents(&d), [(0, 'c'), (3, 'a'), (3, 'b'), (3, 'c'), (9, 'c')]);
}

#[test]
fn test_merge_keeps_left_ties_first() {
    let mut left: Slist<_> = [(1, 0), (3, 0), (3, 1), (5, 0)].into_iter().collect();
    let mut right: Slist<_> = [(0, 9), (3, 9), (6, 9)].into_iter().collect();

    left.merge_by(&mut right, |l, r| l.0.cmp(&r.0));

    assert_eq!(
        contents(&left),
        [(0, 9), (1, 0), (3, 0), (3, 1), (3, 9), (5, 0), (6, 9)],
        "Equal keys from the receiving list should stay ahead of merged ones."
    );
    assert_eq!(left.len(), 7);
    assert_eq!(right.len(), 0);
    assert!(right.is_empty());

    // Merging into an empty list, or from one, only moves the chain.
    let mut empty = Slist::new();
    empty.merge(&mut left);
    assert_eq!(empty.len(), 7);
    assert!(left.is_empty());
    empty.merge(&mut left);
    assert_eq!(empty.len(), 7);
}

#[test]
fn test_sort_and_reverse() {
    let mut list: Slist<_> = [4, 1, 3, 1, 0, 2].into_iter().collect();
    list.sort();
    assert_eq!(contents(&list), [0, 1, 1, 2, 3, 4]);

    list.reverse();
    assert_eq!(contents(&list), [4, 3, 2, 1, 1, 0]);

    let mut empty: Slist<u8> = Slist::new();
    empty.reverse();
    empty.sort();
    assert!(empty.is_empty());
}

#[test]
fn test_drop_and_iterators() {
    let counter = CountedDrop::new(0);
    let mut list: Slist<_> = std::iter::repeat_n(counter.clone(), 100_000).collect();
    list.clear();
    assert_eq!(counter.take(), 100_000, "Long lists should be dropped without recursing.");

    let mut list: Slist<_> = (1..=3).collect();
    for item in list.iter_mut() {
        *item *= 2;
    }
    assert!(list.contains(&6));
    assert_eq!(list.clone(), list);
    assert_eq!(list.into_iter().collect::<Vec<_>>(), [2, 4, 6]);
}

proptest! {
    #[test]
    fn prop_sort_is_stable(keys in prop::collection::vec(0_u8..8, 0..200)) {
        let mut list: Slist<_> = keys.iter().copied().enumerate().map(|(i, k)| (k, i)).collect();
        list.sort_by(|a, b| a.0.cmp(&b.0));

        let mut expected: Vec<_> = keys.iter().copied().enumerate().map(|(i, k)| (k, i)).collect();
        expected.sort_by_key(|&(k, _)| k);

        prop_assert_eq!(list.len(), expected.len());
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
    }
}
