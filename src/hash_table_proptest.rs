// Property tests for HashTable, checked against an insertion-ordered model
// (a Vec of (key, value) pairs in first-insertion order).

use std::collections::HashMap;

use proptest::prelude::*;

use crate::Config;
use crate::Error;
use crate::HashTable;

#[derive(Clone, Debug)]
enum Op {
    Set(usize, i32),
    Delete(usize),
    Get(usize),
    Contains(String),
    Copy,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
            2 => idx.clone().prop_map(Op::Delete),
            2 => idx.clone().prop_map(Op::Get),
            1 => "[a-z]{0,4}".prop_map(Op::Contains),
            1 => Just(Op::Copy),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn model_get<'a>(model: &'a [(String, i32)], key: &str) -> Option<&'a i32> {
    model.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

// Property: behaves like the ordered model across random operation sequences.
// - `set` updates in place or appends to the key order.
// - `delete` removes from the key order and errors on absent keys.
// - Capacity only ever doubles, and grows exactly when `set` starts at or
//   above the threshold.
// - `copy` holds the same pairs in the same order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_matches_ordered_model(
        (pool, ops) in arb_scenario(),
        capacity in 1usize..=8,
        threshold in prop_oneof![Just(1.0f64), 0.05f64..=1.0f64],
    ) {
        let mut sut: HashTable<String, i32> =
            HashTable::with_config(Config::new(capacity, threshold)).unwrap();
        let mut model: Vec<(String, i32)> = Vec::new();

        for op in ops {
            match op {
                Op::Set(i, v) => {
                    let key = pool[i].clone();
                    let before = sut.capacity();
                    let should_grow = sut.load_factor() >= threshold;
                    sut.set(key.clone(), v);

                    let expected = if should_grow { before * 2 } else { before };
                    prop_assert_eq!(sut.capacity(), expected);

                    match model.iter_mut().find(|(k, _)| *k == key) {
                        Some(slot) => slot.1 = v,
                        None => model.push((key, v)),
                    }
                }
                Op::Delete(i) => {
                    let key = &pool[i];
                    let before = sut.capacity();
                    let got = sut.delete(key);
                    match model.iter().position(|(k, _)| k == key) {
                        Some(pos) => {
                            let (_, v) = model.remove(pos);
                            prop_assert_eq!(got, Ok(v));
                        }
                        None => prop_assert_eq!(got, Err(Error::KeyNotFound)),
                    }
                    prop_assert_eq!(sut.capacity(), before);
                }
                Op::Get(i) => {
                    let key = &pool[i];
                    prop_assert_eq!(sut.get(key).ok(), model_get(&model, key));
                }
                Op::Contains(key) => {
                    prop_assert_eq!(sut.contains(&key), model_get(&model, &key).is_some());
                }
                Op::Copy => {
                    let copy = sut.copy();
                    prop_assert!(copy == sut);
                    prop_assert_eq!(copy.keys(), sut.keys());
                    prop_assert_eq!(copy.capacity(), (sut.count() * 10).max(1));
                }
            }

            prop_assert_eq!(sut.count(), model.len());
            let pairs: Vec<(String, i32)> =
                sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
            prop_assert_eq!(&pairs, &model);
            prop_assert_eq!(sut.capacity() % capacity, 0);
        }
    }
}

// Property: for distinct keys, every key reads back its value after any
// number of resizes, and the key order is the insertion order.
proptest! {
    #[test]
    fn prop_round_trip_distinct_keys(
        entries in proptest::collection::hash_map(any::<u32>(), any::<i64>(), 0..200),
        capacity in 1usize..=16,
    ) {
        let ordered: Vec<(u32, i64)> = entries.into_iter().collect();
        let mut table: HashTable<u32, i64> = HashTable::with_capacity(capacity).unwrap();
        for (k, v) in &ordered {
            table.set(*k, *v);
        }

        prop_assert_eq!(table.count(), ordered.len());
        for (k, v) in &ordered {
            prop_assert_eq!(table.get(k), Ok(v));
        }
        let keys: Vec<u32> = ordered.iter().map(|(k, _)| *k).collect();
        prop_assert_eq!(table.keys(), keys);
    }
}

// Property: equality ignores capacity and insertion order.
proptest! {
    #[test]
    fn prop_equality_ignores_layout(
        entries in proptest::collection::hash_map("[a-z]{1,3}", any::<i16>(), 1..40),
        first in 1usize..=64,
        second in 1usize..=64,
    ) {
        let forward: Vec<(String, i16)> = entries.clone().into_iter().collect();
        let mut backward = forward.clone();
        backward.reverse();

        let a = HashTable::from_pairs(forward, Some(first)).unwrap();
        let b = HashTable::from_pairs(backward, Some(second)).unwrap();
        prop_assert!(a == b);

        let reference: HashMap<String, i16> = a.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(reference, entries);
    }
}
