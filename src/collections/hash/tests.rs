#![cfg(test)]

use std::collections::BTreeMap;
use std::hash::BuildHasher;

use proptest::prelude::*;

use super::*;
use crate::collections::traits::{Identity, Set};
use crate::util::alloc::{CountedDrop, fail_after};
use crate::util::hash::{BadHasherBuilder, ManualHash};
use crate::util::panic::assert_panics;

#[test]
fn test_next_prime() {
    assert_eq!(next_prime(0), 53);
    assert_eq!(next_prime(53), 53);
    assert_eq!(next_prime(54), 97);
    assert_eq!(next_prime(1000), 1543);
    assert_eq!(next_prime(usize::MAX), 4294967291, "Huge hints should clamp to the last prime.");

    assert!(PRIMES.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_scenario_growth_from_small_hint() {
    let mut map = HashMap::with_buckets(10);
    assert_eq!(map.bucket_count(), 53);

    for key in 0..200 {
        assert!(map.insert(key, key * 3));
    }

    assert!(map.bucket_count() > 53, "The table should have grown at least once.");
    assert!(PRIMES.contains(&map.bucket_count()));
    assert!(map.bucket_count() >= map.len());
    for key in 0..200 {
        assert_eq!(map.get(&key), Some(&(key * 3)), "Key {key} should survive every rehash.");
    }
    assert!(map.table.verify());
}

#[test]
fn test_map_insert_and_replace() {
    let mut map = HashMap::new();
    assert!(map.insert("a", 1));
    assert!(!map.insert("a", 2), "A duplicate key should be rejected.");
    assert_eq!(map["a"], 1);

    assert_eq!(map.insert_or_replace("a", 3), Some(1));
    assert_eq!(map.insert_or_replace("b", 4), None);
    assert_eq!(map.len(), 2);

    *map.get_or_insert_with("c", || 0) += 5;
    *map.get_or_insert_with("c", || 100) += 5;
    assert_eq!(map.get("c"), Some(&10));

    assert_eq!(map.remove_entry("a"), Some(("a", 3)));
    assert_eq!(map.remove("a"), None);
    assert_eq!(map.count("b"), 1);
    assert_eq!(map.count("a"), 0);

    assert_panics!({
        let _ = map["missing"];
    }, "No entry found");
}

#[test]
fn test_map_borrowed_lookup() {
    let mut map: HashMap<String, usize> = HashMap::new();
    map.insert("hello".to_owned(), 5);

    assert_eq!(map.get("hello"), Some(&5));
    assert!(map.contains_key("hello"));
    assert_eq!(map.get_key_value("hello"), Some((&"hello".to_owned(), &5)));
    if let Some(value) = map.get_mut("hello") {
        *value += 1;
    }
    assert_eq!(map["hello"], 6);
}

#[test]
fn test_map_iterators() {
    let mut map: HashMap<u32, u32> = (0..50).map(|i| (i, i * i)).collect();
    assert_eq!(map.iter().len(), 50);

    for value in map.values_mut() {
        *value += 1;
    }

    let mut keys: Vec<u32> = map.keys().copied().collect();
    keys.sort();
    assert_eq!(keys, (0..50).collect::<Vec<_>>());

    let total: u32 = map.values().sum();
    assert_eq!(total, (0..50).map(|i| i * i + 1).sum());

    map.retain(|key, _| key % 2 == 0);
    assert_eq!(map.len(), 25);
    assert!(map.table.verify());

    let mut values: Vec<u32> = map.clone().into_values().collect();
    values.sort();
    assert_eq!(values[..3], [1, 5, 17]);

    let mut owned: Vec<(u32, u32)> = map.into_iter().collect();
    owned.sort();
    assert_eq!(owned[1], (2, 5));
}

#[test]
fn test_map_equality_ignores_order() {
    let forward: HashMap<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
    let mut backward = HashMap::with_buckets(500);
    for (key, value) in [(3, 'c'), (2, 'b'), (1, 'a')] {
        backward.insert(key, value);
    }

    assert_eq!(forward, backward);
    backward.insert_or_replace(2, 'z');
    assert_ne!(forward, backward);
}

#[test]
fn test_collisions_share_a_chain() {
    let mut set = HashSet::with_buckets_and_hasher(0, BadHasherBuilder);
    for value in 0..5 {
        assert!(set.insert(ManualHash::new(7, value)));
    }
    assert!(!set.insert(ManualHash::new(7, 3)));

    assert_eq!(set.table.elems_in_bucket(7), 5);
    assert_eq!(set.table.elems_in_bucket(8), 0);
    assert!(set.contains(&ManualHash::new(7, 4)));
    assert!(!set.contains(&ManualHash::new(7, 5)));
    assert!(!set.contains(&ManualHash::new(8, 4)), "A different hash should miss the chain.");

    assert!(set.remove(&ManualHash::new(7, 2)));
    assert_eq!(set.table.elems_in_bucket(7), 4);
    assert_eq!(set.take(&ManualHash::new(7, 0)).map(ManualHash::value), Some(0));
    assert!(set.table.verify());
}

#[test]
fn test_equal_keys_stay_adjacent() {
    // With the identity hash and 53 buckets, 1 and 54 collide.
    let mut map = HashMultiMap::with_buckets_and_hasher(0, SimpleState);
    for (key, value) in [(1, 'a'), (54, 'b'), (1, 'c'), (54, 'd'), (1, 'e')] {
        map.insert(key, value);
    }

    assert_eq!(map.table.elems_in_bucket(1), 5);
    assert_eq!(map.values().copied().collect::<String>(), "bdaec");
    assert_eq!(map.get_all(&1).map(|e| e.1).collect::<String>(), "aec");
    assert_eq!(map.get_all(&54).len(), 2);
    assert_eq!(map.get_all(&2).len(), 0);
    assert_eq!(map.count(&1), 3);
    assert!(map.table.verify());

    map.table.resize(100);
    assert_eq!(map.bucket_count(), 193);
    assert_eq!(map.table.elems_in_bucket(1), 3);
    assert_eq!(map.table.elems_in_bucket(54), 2);
    assert!(map.table.verify());

    assert_eq!(map.remove(&1), 3);
    assert_eq!(map.remove(&1), 0);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_multiset() {
    let mut set: HashMultiSet<&str> = ["x", "y", "x", "z", "x"].into_iter().collect();
    assert_eq!(set.len(), 5);
    assert_eq!(set.count("x"), 3);
    assert_eq!(set.equal_range("x").count(), 3);

    assert!(set.remove_one("x"));
    assert_eq!(set.count("x"), 2);
    assert!(!set.remove_one("w"));

    let other: HashMultiSet<&str> = ["z", "x", "y", "x"].into_iter().collect();
    assert_eq!(set, other);
    assert_eq!(set.remove("x"), 2);
    assert_ne!(set, other);
}

#[test]
fn test_set_algebra() {
    let a: HashSet<i32> = [1, 2, 3, 4].into_iter().collect();
    let b: HashSet<i32> = [3, 4, 5].into_iter().collect();

    let sorted = |set: HashSet<i32>| {
        let mut items: Vec<i32> = set.into_iter().collect();
        items.sort();
        items
    };

    assert_eq!(sorted(&a | &b), [1, 2, 3, 4, 5]);
    assert_eq!(sorted(&a & &b), [3, 4]);
    assert_eq!(sorted(&a ^ &b), [1, 2, 5]);
    assert_eq!(sorted(&a - &b), [1, 2]);

    let small: HashSet<i32> = [2, 3].into_iter().collect();
    assert!(small.is_subset(&a));
    assert!(a.is_superset(&small));
    assert!(!small.is_disjoint(&b));
    assert!(small.is_disjoint(&[9].into_iter().collect()));
    assert_eq!(a.clone(), a);
}

#[test]
fn test_drops_every_value() {
    let counter = CountedDrop::new(0);
    let mut map = HashMap::new();
    for key in 0..10 {
        map.insert(key, counter.clone());
    }

    map.remove(&3);
    map.remove(&4);
    map.remove(&4);
    assert_eq!(*counter.borrow(), 2);

    map.retain(|key, _| *key < 8);
    assert_eq!(*counter.borrow(), 4);

    map.clear();
    assert_eq!(*counter.borrow(), 10);
    assert!(map.is_empty());

    for key in 0..5 {
        map.insert(key, counter.clone());
    }
    drop(map);
    assert_eq!(*counter.borrow(), 15, "Dropping the map should drop every value.");
}

#[test]
fn test_rehash_failure_rollback() {
    let mut set = HashSet::with_buckets_and_hasher(0, SimpleState);
    for value in 0..53 {
        set.insert(value);
    }
    assert_eq!(set.bucket_count(), 53);

    let guard = fail_after(0);
    assert!(set.try_insert(53).is_err(), "Growing the bucket array should fail.");
    drop(guard);

    assert_eq!(set.bucket_count(), 53, "A failed rehash should keep the old buckets.");
    assert_eq!(set.len(), 53);
    assert!((0..53).all(|value| set.contains(&value)));
    assert!(set.table.verify());

    assert!(set.insert(53));
    assert_eq!(set.bucket_count(), 97);
}

#[test]
fn test_erase_at_keeps_other_handles() {
    let mut table: HashTable<u32, Identity, SimpleState> =
        HashTable::with_buckets_and_hasher(0, SimpleState);
    let (low, _) = table.insert_unique(1);
    let (high, _) = table.insert_unique(54);
    let (other, _) = table.insert_unique(2);

    assert_eq!(table.erase_at(high), 54);
    assert_eq!(*table.value(low), 1);
    assert_eq!(*table.value(other), 2);
    assert_eq!(table.find(&54), None);
    assert_eq!(table.max_bucket_count(), 4294967291);

    let mut fresh: HashTable<u32, Identity, SimpleState> =
        HashTable::with_buckets_and_hasher(0, SimpleState);
    fresh.insert_equal(5);
    table.swap_with(&mut fresh);
    assert_eq!(table.iter().copied().collect::<Vec<_>>(), [5]);
    assert_eq!(fresh.len(), 2);
}

#[test]
fn test_simple_state() {
    assert_eq!(SimpleState.hash_one(42_u32), 42);
    assert_eq!(SimpleState.hash_one(-1_i64), u64::MAX);
    // 'a' then 'b' then the 0xff terminator str writes.
    assert_eq!(SimpleState.hash_one("ab"), (97 * 5 + 98) * 5 + 255);
    assert_eq!(SimpleState.hash_one("ab"), SimpleState.hash_one("ab".to_owned()));
}

#[test]
fn test_debug_and_display() {
    let mut map = HashMap::with_buckets_and_hasher(0, SimpleState);
    map.insert(2, 'b');
    map.insert(1, 'a');
    assert_eq!(format!("{map}"), "#{1: 'a', 2: 'b'}");
    assert_eq!(
        format!("{map:?}"),
        "HashMap { contents: [(1, 'a'), (2, 'b')], len: 2, buckets: 53 }"
    );

    let mut set = HashSet::with_buckets_and_hasher(0, SimpleState);
    set.insert(3);
    assert_eq!(format!("{set}"), "#{3}");
}

proptest! {
    #[test]
    fn prop_rehash_preserves_membership(keys in prop::collection::vec(any::<u16>(), 0..400)) {
        let mut map = HashMap::with_buckets(0);
        let mut model = BTreeMap::new();
        for (index, key) in keys.iter().enumerate() {
            map.insert(*key, index);
            model.entry(*key).or_insert(index);
        }

        prop_assert_eq!(map.len(), model.len());
        prop_assert!(PRIMES.contains(&map.bucket_count()));
        prop_assert!(map.bucket_count() >= map.len());
        for (key, index) in &model {
            prop_assert_eq!(map.get(key), Some(index));
        }
        prop_assert!(map.table.verify());
    }

    #[test]
    fn prop_multiset_matches_model(ops in prop::collection::vec((any::<bool>(), 0_u8..32), 0..300)) {
        let mut set = HashMultiSet::with_buckets_and_hasher(0, SimpleState);
        let mut model: BTreeMap<u8, usize> = BTreeMap::new();

        for (insert, value) in ops {
            if insert {
                set.insert(value);
                *model.entry(value).or_default() += 1;
            } else {
                let removed = set.remove(&value);
                prop_assert_eq!(removed, model.remove(&value).unwrap_or(0));
            }
            prop_assert!(set.table.verify());
        }

        prop_assert_eq!(set.len(), model.values().sum::<usize>());
        for (value, count) in &model {
            prop_assert_eq!(set.count(value), *count);
        }
    }
}
