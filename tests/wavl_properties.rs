//! Property-based coverage of P1-P6 over randomized insert/erase
//! sequences: scenario 6 of the test plan, scaled down from 10^5 operations
//! to something proptest's shrinker can run many times over, but keeping
//! the 60/40 insert/erase mix and the 1..10_000 key range.

use proptest::prelude::*;
use wavltree::{check, WavlSet};

#[derive(Debug, Clone, Copy)]
enum Op {
    Insert(i32),
    Remove(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (1..10_000i32).prop_map(Op::Insert),
        4 => (1..10_000i32).prop_map(Op::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn random_insert_erase_sequences_stay_consistent(ops in proptest::collection::vec(op_strategy(), 0..500)) {
        let mut set = WavlSet::new();
        let mut model = std::collections::BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(k) => {
                    let changed = set.insert(k);
                    prop_assert_eq!(changed, model.insert(k));
                }
                Op::Remove(k) => {
                    let changed = set.remove(&k);
                    prop_assert_eq!(changed, model.remove(&k));
                }
            }
            prop_assert!(check(&set).is_ok());
        }

        prop_assert_eq!(set.len(), model.len());
        let collected: Vec<_> = set.iter().copied().collect();
        let expected: Vec<_> = model.iter().copied().collect();
        prop_assert_eq!(collected, expected);
    }
}

#[test]
fn sorted_runs_do_not_degenerate() {
    // Ascending and descending insertion are the adversarial case for an
    // unbalanced BST (an O(n) chain). `check` re-derives rank from the
    // tree structure, so a rank-rule failure here would mean the fixup
    // let the tree degenerate instead of rotating it back into balance.
    let mut ascending = WavlSet::new();
    for k in 0..2000 {
        ascending.insert(k);
    }
    assert!(check(&ascending).is_ok());

    let mut descending = WavlSet::new();
    for k in (0..2000).rev() {
        descending.insert(k);
    }
    assert!(check(&descending).is_ok());
}
