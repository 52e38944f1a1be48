#![cfg(test)]

use std::cmp::Ordering;
use std::collections::BTreeMap;

use proptest::prelude::*;

use super::*;
use crate::collections::traits::{Identity, Set};
use crate::util::alloc::{CountedDrop, fail_after};
use crate::util::panic::assert_panics;

fn checked<V, X: crate::collections::traits::KeyOf<V>, C: Compare<X::Key>>(
    tree: &RbTree<V, X, C>,
) -> &RbTree<V, X, C> {
    assert!(tree.verify().is_some(), "The red-black invariants should hold.");
    tree
}

#[test]
fn test_scenario_ordered_iteration() {
    let mut map = TreeMap::new();
    for key in [10, 5, 20, 1, 15] {
        assert!(map.insert(key, key * 100));
    }

    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 5, 10, 15, 20]);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [100, 500, 1000, 1500, 2000]);
    checked(&map.tree);
}

#[test]
fn test_unique_insertion() {
    let mut map = TreeMap::new();
    assert!(map.insert("b", 1));
    assert!(!map.insert("b", 2), "A duplicate key should be rejected.");
    assert_eq!(map.get("b"), Some(&1), "The original value should be kept.");

    assert_eq!(map.insert_or_replace("b", 3), Some(1));
    assert_eq!(map.insert_or_replace("a", 4), None);
    assert_eq!(map["b"], 3);
    assert_eq!(map.len(), 2);

    *map.get_or_insert_with("c", || 0) += 5;
    *map.get_or_insert_with("c", || 0) += 5;
    assert_eq!(map.get("c"), Some(&10));
    assert_eq!(map.count("c"), 1);
    assert_panics!({ TreeMap::<u8, u8>::new()[&0] }, "No entry found");
}

#[test]
fn test_map_removal() {
    let mut map: TreeMap<_, _> = (0..10).map(|i| (i, i.to_string())).collect();

    assert_eq!(map.remove(&4), Some("4".to_string()));
    assert_eq!(map.remove(&4), None);
    assert_eq!(map.remove_entry(&0), Some((0, "0".to_string())));
    assert_eq!(map.pop_first(), Some((1, "1".to_string())));
    assert_eq!(map.pop_last(), Some((9, "9".to_string())));
    assert_eq!(map.first(), Some((&2, &"2".to_string())));
    assert_eq!(map.last(), Some((&8, &"8".to_string())));
    assert!(!map.contains_key(&9));
    checked(&map.tree);

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.pop_first(), None);
}

#[test]
fn test_bounds() {
    let map: TreeMultiMap<_, _> = [(1, 'a'), (3, 'a'), (3, 'b'), (3, 'c'), (5, 'a')]
        .into_iter()
        .collect();

    assert_eq!(map.count(&3), 3);
    assert_eq!(map.count(&4), 0);
    assert_eq!(
        map.get_all(&3).map(|e| e.1).collect::<Vec<_>>(),
        ['a', 'b', 'c'],
        "Equal keys should keep insertion order."
    );
    assert_eq!(map.get(&3), Some(&'a'));
    assert_eq!(map.lower_bound(&3).len(), 4);
    assert_eq!(map.upper_bound(&3).len(), 1);
    assert_eq!(map.lower_bound(&2).next(), Some(&(3, 'a')));
    assert_eq!(map.upper_bound(&5).next(), None);
    assert_eq!(map.lower_bound(&0).len(), 5);
}

#[test]
fn test_handles_survive_erasure() {
    let mut tree: RbTree<i32, Identity> = RbTree::new();
    let ids: Vec<_> = (0..64).map(|i| tree.insert_unique(i).0).collect();

    for i in (0..64).step_by(3) {
        assert_eq!(tree.erase_at(ids[i]), i as i32);
        checked(&tree);
    }

    for (i, id) in ids.iter().enumerate() {
        if i % 3 != 0 {
            assert_eq!(*tree.value(*id), i as i32, "Erasing should never move other values.");
        }
    }
}

#[test]
fn test_navigation() {
    let mut tree: RbTree<i32, Identity> = RbTree::new();
    assert_eq!(tree.prev(None), None);

    tree.extend([2, 4, 6]);
    let first = tree.first().unwrap();
    let last = tree.last().unwrap();

    assert_eq!(tree.prev(None), Some(last), "Stepping back from the end should reach the last value.");
    assert_eq!(tree.prev(Some(first)), None);
    assert_eq!(tree.next(last), None);

    let middle = tree.next(first).unwrap();
    assert_eq!(*tree.value(middle), 4);
    assert_eq!(tree.prev(Some(middle)), Some(first));
    assert_eq!(tree.find(&4), Some(middle));
    assert_eq!(tree.find(&5), None);
    assert_eq!(tree.lower_bound(&5), Some(last));
    assert_eq!(tree.upper_bound(&6), None);
}

#[test]
fn test_unique_hints() {
    let mut tree: RbTree<i32, Identity> = RbTree::new();

    for i in 0..100 {
        tree.insert_unique_hint(None, i);
    }
    checked(&tree);

    let first = tree.first().unwrap();
    tree.insert_unique_hint(Some(first), -1);
    assert_eq!(tree.first().map(|id| *tree.value(id)), Some(-1));

    // A duplicate is rejected whatever the hint.
    let existing = tree.find(&50).unwrap();
    assert_eq!(tree.insert_unique_hint(tree.find(&51), 50), existing);
    assert_eq!(tree.insert_unique_hint(None, 50), existing);
    assert_eq!(tree.insert_unique_hint(tree.first(), 50), existing);

    // Wrong hints fall back to a normal search.
    tree.erase_key(&70);
    tree.insert_unique_hint(tree.find(&10), 70);
    tree.insert_unique_hint(tree.first(), 200);
    tree.insert_unique_hint(None, -5);
    checked(&tree);

    assert_eq!(tree.len(), 103);
    let mut expected: Vec<_> = (-1..100).collect();
    expected.insert(0, -5);
    expected.push(200);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected);
}

#[test]
fn test_equal_hints() {
    let mut tree: RbTree<(i32, char), crate::collections::traits::First> = RbTree::new();
    tree.insert_equal((1, 'a'));
    tree.insert_equal((3, 'a'));

    let at_three = tree.find(&3);
    tree.insert_equal_hint(at_three, (3, 'b'));
    tree.insert_equal_hint(at_three, (2, 'a'));
    tree.insert_equal_hint(None, (3, 'c'));
    tree.insert_equal_hint(tree.first(), (1, 'b'));
    tree.insert_equal_hint(tree.first(), (9, 'z'));
    checked(&tree);

    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        [(1, 'b'), (1, 'a'), (2, 'a'), (3, 'b'), (3, 'a'), (3, 'c'), (9, 'z')],
        "A correct hint may place an equal key before the hint."
    );
}

#[test]
fn test_erase_range_and_drop() {
    let counter = CountedDrop::new(0);
    let mut map: TreeMap<_, _> = (0..20).map(|i| (i, counter.clone())).collect();

    let first = map.tree.find(&5);
    let last = map.tree.find(&15);
    assert_eq!(map.tree.erase_range(first, last), 10);
    assert_eq!(*counter.borrow(), 10);
    checked(&map.tree);

    assert_eq!(map.tree.erase_key(&3), 1);
    assert_eq!(map.tree.erase_key(&3), 0);

    let (first, last) = (map.tree.first(), None);
    assert_eq!(map.tree.erase_range(first, last), 9);
    assert_eq!(*counter.borrow(), 20, "Every erased value should be dropped once.");
    assert!(map.is_empty());

    map.extend((0..5).map(|i| (i, counter.clone())));
    drop(map);
    assert_eq!(*counter.borrow(), 25);
}

#[test]
fn test_iterators() {
    let mut map: TreeMap<_, _> = (0..8).rev().map(|i| (i, i)).collect();

    let mut iter = map.iter();
    assert_eq!(iter.len(), 8);
    assert_eq!(iter.next(), Some(&(0, 0)));
    assert_eq!(iter.next_back(), Some(&(7, 7)));
    assert_eq!(iter.len(), 6);

    for value in map.values_mut() {
        *value *= 10;
    }
    assert_eq!(map.values().rev().copied().collect::<Vec<_>>(), [70, 60, 50, 40, 30, 20, 10, 0]);

    let range = map.tree.range(map.tree.find(&2), map.tree.find(&5));
    assert_eq!(range.len(), 3);
    assert_eq!(range.rev().map(|e| e.0).collect::<Vec<_>>(), [4, 3, 2]);

    let mut owned = map.clone().into_iter();
    assert_eq!(owned.next_back(), Some((7, 70)));
    assert_eq!(owned.next(), Some((0, 0)));
    assert_eq!(map.into_keys().collect::<Vec<_>>(), (0..8).collect::<Vec<_>>());
}

#[test]
fn test_custom_orderings() {
    let mut set = TreeSet::with_compare(Reverse(Natural));
    set.extend([3, 1, 2]);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    assert_eq!(set.first(), Some(&3));

    let by_len = |a: &String, b: &String| a.len().cmp(&b.len());
    let mut set = TreeSet::with_compare(by_len);
    assert!(set.insert("ccc".to_string()));
    assert!(set.insert("a".to_string()));
    assert!(!set.insert("b".to_string()), "Keys equal under the ordering are duplicates.");
    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), ["a", "ccc"]);

    let mut by_abs = TreeMultiSet::with_compare(|a: &i32, b: &i32| -> Ordering { a.abs().cmp(&b.abs()) });
    by_abs.extend([-2, 1, 2, -1]);
    assert_eq!(by_abs.iter().copied().collect::<Vec<_>>(), [1, -1, -2, 2]);
}

#[test]
fn test_set_algebra() {
    let a: TreeSet<_> = [1, 2, 3, 4].into_iter().collect();
    let b: TreeSet<_> = [3, 4, 5].into_iter().collect();

    assert_eq!(a.union(&b).copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    assert_eq!(a.intersection(&b).copied().collect::<Vec<_>>(), [3, 4]);
    assert_eq!(a.difference(&b).copied().collect::<Vec<_>>(), [1, 2]);
    assert_eq!(a.symmetric_difference(&b).copied().collect::<Vec<_>>(), [1, 2, 5]);

    assert_eq!((&a | &b).len(), 5);
    assert_eq!((&a & &b).iter().copied().collect::<Vec<_>>(), [3, 4]);
    assert_eq!((&a ^ &b).iter().copied().collect::<Vec<_>>(), [1, 2, 5]);
    assert_eq!((&a - &b).iter().copied().collect::<Vec<_>>(), [1, 2]);

    let small: TreeSet<_> = [2, 3].into_iter().collect();
    assert!(small.is_subset(&a));
    assert!(a.is_superset(&small));
    assert!(!small.is_disjoint(&b));
    assert!((&a - &b).is_disjoint(&b));

    assert_eq!(a.clone().into_intersection(b.clone()).collect::<Vec<_>>(), [3, 4]);
    assert_eq!(a.into_difference(b).collect::<Vec<_>>(), [1, 2]);
}

#[test]
fn test_sets() {
    let mut set: TreeSet<String> = ["pear", "apple"].into_iter().map(String::from).collect();
    assert!(set.contains("pear"));
    assert_eq!(set.get("apple").map(String::as_str), Some("apple"));
    assert_eq!(set.take("pear"), Some("pear".to_string()));
    assert!(!set.remove("pear"));
    assert_eq!(format!("{set:?}"), "{\"apple\"}");

    let mut multi: TreeMultiSet<_> = [5, 1, 5, 3, 5].into_iter().collect();
    assert_eq!(multi.count(&5), 3);
    assert!(multi.remove_one(&5));
    assert_eq!(multi.equal_range(&5).len(), 2);
    assert_eq!(multi.remove(&5), 2);
    assert!(!multi.contains(&5));
    assert_eq!(multi.iter().copied().collect::<Vec<_>>(), [1, 3]);
}

#[test]
fn test_insert_failure_rollback() {
    let mut set = TreeSet::new();
    set.insert(1);
    set.insert(2);

    let guard = fail_after(0);
    assert!(set.try_insert(3).is_err());
    drop(guard);

    assert_eq!(set.len(), 2, "A failed insert should leave the tree untouched.");
    checked(&set.tree);
    assert!(set.insert(3));
}

#[test]
fn test_balance_under_sorted_input() {
    let mut tree: RbTree<u32, Identity> = RbTree::new();
    tree.extend(0..1024);

    let height = tree.verify();
    assert!(height.is_some_and(|h| h <= 11), "Sorted input should stay balanced, got {height:?}.");

    for i in (0..1024).filter(|i| i % 2 == 0) {
        tree.erase_key(&i);
    }
    assert!(tree.verify().is_some());
    assert_eq!(tree.len(), 512);
}

proptest! {
    #[test]
    fn prop_invariants_hold(ops in prop::collection::vec((any::<bool>(), 0_u8..32), 0..300)) {
        let mut tree: RbTree<u8, Identity> = RbTree::new();
        let mut model: BTreeMap<u8, usize> = BTreeMap::new();

        for (insert, key) in ops {
            if insert {
                tree.insert_equal(key);
                *model.entry(key).or_default() += 1;
            } else {
                let removed = tree.erase_key(&key);
                prop_assert_eq!(removed, model.remove(&key).unwrap_or(0));
            }
            prop_assert!(tree.verify().is_some());
        }

        let expected: Vec<u8> = model
            .iter()
            .flat_map(|(&key, &count)| std::iter::repeat_n(key, count))
            .collect();
        prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn prop_unique_insert_matches_model(keys in prop::collection::vec(0_u16..64, 0..200)) {
        let mut map = TreeMap::new();
        let mut model = BTreeMap::new();

        for (i, key) in keys.into_iter().enumerate() {
            let inserted = map.insert(key, i);
            prop_assert_eq!(inserted, !model.contains_key(&key));
            model.entry(key).or_insert(i);
        }

        prop_assert!(map.tree.verify().is_some());
        prop_assert_eq!(map.into_iter().collect::<Vec<_>>(), model.into_iter().collect::<Vec<_>>());
    }
}
