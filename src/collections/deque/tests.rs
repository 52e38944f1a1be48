#![cfg(test)]

use proptest::prelude::*;

use super::*;
use crate::util::alloc::{CountedDrop, ZeroSizedType, fail_after};
use crate::util::panic::assert_panics;

fn contents<T: Clone>(deque: &Deque<T>) -> Vec<T> {
    deque.iter().cloned().collect()
}

#[test]
fn test_block_len() {
    assert_eq!(Deque::<u8>::new().block_len(), 512);
    assert_eq!(Deque::<u32>::new().block_len(), 128);
    assert_eq!(Deque::<[u8; 600]>::new().block_len(), 1, "Large elements get a buffer each.");
    assert_eq!(Deque::<ZeroSizedType>::new().block_len(), DEFAULT_BLOCK_BYTES);
    assert_eq!(Deque::<u32>::with_block_len(5).block_len(), 5);
}

#[test]
fn test_push_and_pop_both_ends() {
    let mut deque = Deque::with_block_len(3);
    assert_eq!(deque.map_len(), 0, "A new Deque shouldn't allocate.");

    for i in 0..10 {
        deque.push_back(i);
        deque.push_front(-i - 1);
    }

    assert_eq!(deque.len(), 20);
    assert_eq!(contents(&deque), (-10..10).collect::<Vec<_>>());
    assert_eq!(deque.front(), Some(&-10));
    assert_eq!(deque.back(), Some(&9));

    for i in 0..20 {
        assert_eq!(deque[i], i as i32 - 10, "Indexing should agree with iteration.");
    }

    assert_eq!(deque.pop_front(), Some(-10));
    assert_eq!(deque.pop_back(), Some(9));
    assert_eq!(deque.iter().rev().copied().collect::<Vec<_>>(), (-9..9).rev().collect::<Vec<_>>());
}

#[test]
fn test_scenario_push_back_then_pop_front() {
    let mut deque = Deque::with_block_len(8);
    for i in 1..=1000 {
        deque.push_back(i);
    }
    assert_eq!(deque.buffer_count(), 125);

    for i in 1..=1000 {
        assert_eq!(deque.pop_front(), Some(i));
    }

    assert!(deque.is_empty());
    assert_eq!(deque.len(), 0);
    assert_eq!(deque.buffer_count(), 0, "An empty Deque should own no buffers.");
    assert!(
        deque.map.iter().all(Option::is_none),
        "Every map slot should be empty once the Deque is."
    );
}

#[test]
fn test_buffers_released_at_boundaries() {
    let mut deque = Deque::with_block_len(4);
    deque.extend(0..8);
    assert_eq!(deque.buffer_count(), 2);

    deque.push_back(8);
    assert_eq!(deque.buffer_count(), 3, "Crossing into a new buffer should allocate it.");

    deque.pop_back();
    assert_eq!(deque.buffer_count(), 2, "Emptying the last buffer should release it.");

    for _ in 0..4 {
        deque.pop_front();
    }
    assert_eq!(deque.buffer_count(), 1, "Emptying the first buffer should release it.");

    deque.push_front(3);
    assert_eq!(deque.buffer_count(), 2);
    assert_eq!(contents(&deque), [3, 4, 5, 6, 7]);
}

#[test]
fn test_map_growth() {
    let mut deque = Deque::with_block_len(1);
    deque.push_back(0);
    assert_eq!(deque.map_len(), INITIAL_MAP_LEN);

    for i in 1..5 {
        deque.push_back(i);
    }
    assert_eq!(deque.map_len(), INITIAL_MAP_LEN, "There was still room at the back.");

    deque.push_back(5);
    assert_eq!(deque.map_len(), 18, "The map should grow by its own length plus two.");
    assert_eq!(deque.start.node, 6, "Used slots should be centered in the new map.");

    for i in 1..=6 {
        deque.push_front(-i);
    }
    assert_eq!(deque.map_len(), 18);
    assert_eq!(deque.start.node, 0);

    // With 12 of 18 slots in use there isn't room to recenter, so the map grows again.
    deque.push_front(-7);
    assert_eq!(deque.map_len(), 38);
    assert_eq!(contents(&deque), (-7..6).collect::<Vec<_>>());
}

#[test]
fn test_map_recentering() {
    let mut deque = Deque::with_block_len(1);
    for i in 0..20 {
        deque.push_back(i);
    }
    for _ in 0..18 {
        deque.pop_front();
    }
    let map_len = deque.map_len();

    // Only two buffers remain, pressed against the back of the map.
    for i in 20..30 {
        deque.push_back(i);
    }
    assert_eq!(deque.map_len(), map_len, "A sparse map should be recentered instead of grown.");
    assert_eq!(contents(&deque), (18..30).collect::<Vec<_>>());
}

#[test]
fn test_insert() {
    let mut deque: Deque<i32> = Deque::with_block_len(3);
    deque.extend(0..10);

    deque.insert(2, 100);
    deque.insert(8, 200);
    deque.insert(0, 300);
    deque.insert(deque.len(), 400);
    assert_eq!(contents(&deque), [300, 0, 1, 100, 2, 3, 4, 5, 6, 200, 7, 8, 9, 400]);

    assert!(
        deque.try_insert(deque.len() + 1, 0).unwrap_err().is_index_out_of_bounds(),
        "Inserting past the end should be rejected."
    );
}

#[test]
fn test_remove() {
    let mut deque: Deque<i32> = Deque::with_block_len(3);
    deque.extend(0..10);

    assert_eq!(deque.remove(1), 1);
    assert_eq!(deque.remove(7), 8);
    assert_eq!(deque.remove(0), 0);
    assert_eq!(contents(&deque), [2, 3, 4, 5, 6, 7, 9]);

    assert_eq!(deque.try_remove(7).unwrap_err().index, 7);
    assert_panics!({ Deque::<u8>::new().remove(0); });
}

#[test]
fn test_erase() {
    let counter = CountedDrop::new(0);
    let mut deque = Deque::with_block_len(4);
    deque.extend(std::iter::repeat_n(counter.clone(), 20));

    deque.erase(2..5);
    assert_eq!(counter.take(), 3, "Erasing should drop exactly the erased elements.");
    assert_eq!(deque.len(), 17);

    deque.erase(10..16);
    assert_eq!(counter.take(), 6);
    assert_eq!(deque.len(), 11);

    deque.erase(..);
    assert_eq!(counter.take(), 11);
    assert_eq!(deque.buffer_count(), 0);

    let mut deque: Deque<_> = (0..20).collect();
    deque.erase(1..3);
    deque.erase(14..17);
    assert_eq!(contents(&deque), [0, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 19]);
}

#[test]
fn test_push_failure_rolls_back() {
    let mut deque = Deque::with_block_len(2);
    deque.extend(0..4);
    let map_len = deque.map_len();

    {
        let _guard = fail_after(0);
        assert!(deque.try_push_back(4).unwrap_err().is_alloc_error());
        assert!(deque.try_push_front(-1).unwrap_err().is_alloc_error());
        assert!(deque.try_insert(1, 9).unwrap_err().is_reserve());
    }

    assert_eq!(contents(&deque), [0, 1, 2, 3], "Failed pushes should leave the Deque unchanged.");
    assert_eq!(deque.map_len(), map_len);
    assert_eq!(deque.buffer_count(), 2);

    let mut deque = Deque::with_block_len(1);
    deque.extend(0..5);
    {
        // The new buffer is acquired, but growing the map fails.
        let _guard = fail_after(1);
        assert!(deque.try_push_back(5).is_err());
    }
    assert_eq!(contents(&deque), [0, 1, 2, 3, 4]);
    assert_eq!(deque.map_len(), INITIAL_MAP_LEN);
    assert_eq!(deque.buffer_count(), 5);
}

#[test]
fn test_drop_and_clear() {
    let counter = CountedDrop::new(0);
    let mut deque = Deque::with_block_len(3);
    for _ in 0..10 {
        deque.push_front(counter.clone());
    }

    deque.clear();
    assert_eq!(counter.take(), 10);
    assert_eq!(deque.buffer_count(), 0);

    deque.extend(std::iter::repeat_n(counter.clone(), 7));
    let mut iter = deque.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    drop(iter);
    assert_eq!(counter.take(), 7, "Dropping an owned iterator should drop every element.");
}

#[test]
fn test_zst_support() {
    let mut deque = Deque::new();
    for _ in 0..2000 {
        deque.push_back(ZeroSizedType);
        deque.push_front(ZeroSizedType);
    }
    assert_eq!(deque.len(), 4000);
    assert_eq!(deque.iter().count(), 4000);
    deque.erase(100..3900);
    assert_eq!(deque.len(), 200);
}

#[test]
fn test_comparisons() {
    let a: Deque<_> = (0..5).collect();
    let mut b = Deque::with_block_len(2);
    b.extend(0..5);

    assert_eq!(a, b, "Block length shouldn't affect equality.");
    assert!(a < Deque::from_iter([0, 1, 3]));
    assert_eq!(Deque::from_elem(3, 'x'), Deque::from_iter("xxx".chars()));

    let mut c = a.clone();
    c.iter_mut().for_each(|i| *i *= 10);
    assert_eq!(contents(&c), [0, 10, 20, 30, 40]);

    let mut d = Deque::new();
    c.swap_with(&mut d);
    assert!(c.is_empty());
    assert_eq!(d.len(), 5);
}

#[derive(Debug, Clone)]
enum Op {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    Insert(usize, i32),
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::PushBack),
        any::<i32>().prop_map(Op::PushFront),
        Just(Op::PopBack),
        Just(Op::PopFront),
        (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        any::<usize>().prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_index_matches_iteration(block_len in 1_usize..6, ops in prop::collection::vec(op(), 0..300)) {
        let mut deque = Deque::with_block_len(block_len);
        let mut model = std::collections::VecDeque::new();

        for op in ops {
            match op {
                Op::PushBack(v) => { deque.push_back(v); model.push_back(v); },
                Op::PushFront(v) => { deque.push_front(v); model.push_front(v); },
                Op::PopBack => prop_assert_eq!(deque.pop_back(), model.pop_back()),
                Op::PopFront => prop_assert_eq!(deque.pop_front(), model.pop_front()),
                Op::Insert(i, v) => {
                    let i = i % (model.len() + 1);
                    deque.insert(i, v);
                    model.insert(i, v);
                },
                Op::Remove(i) => if !model.is_empty() {
                    let i = i % model.len();
                    prop_assert_eq!(deque.remove(i), model.remove(i).unwrap_or_default());
                },
            }

            prop_assert_eq!(deque.len(), model.len());
            let iterated: Vec<_> = deque.iter().copied().collect();
            for (i, value) in iterated.iter().enumerate() {
                prop_assert_eq!(&deque[i], value);
            }
            prop_assert!(iterated.iter().eq(model.iter()));
            prop_assert!(deque.iter().rev().eq(model.iter().rev()));
            prop_assert_eq!(deque.buffer_count() == 0, deque.is_empty());
        }
    }
}
