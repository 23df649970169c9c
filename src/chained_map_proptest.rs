#![cfg(test)]

// Property tests for ChainedMap kept inside the crate so they can check
// chain structure through `assert_invariants`.

use crate::chained_map::ChainedMap;
use crate::config::TableConfig;
use crate::hash::KeyHash;
use core::num::NonZeroUsize;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations: indices shrink toward earlier keys, the pool
// shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, String),
    Get(usize),
    Probe(String),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-zA-Z]{0,6}", 1..=10).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), "[a-z]{0,4}").prop_map(|(i, v)| Op::Insert(i, v)),
            2 => idx.clone().prop_map(Op::Get),
            1 => "[a-zA-Z]{0,6}".prop_map(Op::Probe),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run<H: KeyHash>(
    mut sut: ChainedMap<H>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, String> = HashMap::new();
    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = &pool[i];
                sut.insert(k, &v).expect("no allocation failure under test");
                model.insert(k.clone(), v);
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k).map(String::as_str));
            }
            Op::Probe(k) => {
                prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
                prop_assert_eq!(sut.get(&k), model.get(&k).map(String::as_str));
            }
            Op::Iterate => {
                let seen: BTreeMap<&str, &str> = sut.iter().collect();
                let expected: BTreeMap<&str, &str> = model
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                prop_assert_eq!(seen, expected);
                prop_assert_eq!(sut.iter().len(), model.len());
            }
        }

        // Post-conditions after each op
        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        let chained: usize = (0..sut.bucket_count())
            .map(|b| sut.chain_len(b).unwrap_or(0))
            .sum();
        prop_assert_eq!(chained, model.len());
    }

    let n = model.len();
    let report = sut.destroy();
    prop_assert_eq!(report.entries_released, n);
    prop_assert_eq!(report.strings_released, 2 * n);
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// - get/contains_key agree with the model, absent keys included.
// - Updates never duplicate a key; chain lengths sum to len().
// - Every entry sits in the bucket its hash selects.
// - destroy releases one entry and two strings per live key.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), buckets in 1usize..=16) {
        let sut = ChainedMap::with_bucket_count(buckets).unwrap();
        run(sut, &pool, ops)?;
    }
}

// Every key hashes to the same code, so every entry shares one chain.
#[derive(Clone, Default)]
struct ConstHash;
impl KeyHash for ConstHash {
    fn hash_key(&self, _key: &str) -> u64 {
        0
    }
}

// Property: same invariants under worst-case collisions.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let config = TableConfig::with_bucket_count(NonZeroUsize::new(10).unwrap());
        let sut = ChainedMap::with_config_and_hasher(config, ConstHash);
        run(sut, &pool, ops)?;
    }
}
