//! Literal scenarios from the test plan, each checked against the
//! consistency checker as well as against expected observable behavior.

use wavltree::{check, WavlSet};

#[test]
fn scenario_1_single_insert() {
    let mut s = WavlSet::new();
    assert!(s.insert(42));
    assert_eq!(s.len(), 1);
    assert_eq!(s.first(), Some(&42));
    assert_eq!(s.last(), Some(&42));
    assert!(check(&s).is_ok());
}

#[test]
fn scenario_2_small_non_skewed_insert() {
    // 1, 2, 3 in ascending order forces at least one rotation to avoid an
    // unbounded right-leaning chain. The literal claim that the resulting
    // root is 2 with children 1 and 3 is checked at the node-pointer level
    // by core::tests::ascending_three_insert_balances_to_root_two, since
    // that requires inspecting tree structure WavlSet doesn't expose
    // publicly; this test covers the same scenario's observable behavior.
    let mut s = WavlSet::new();
    for k in [1, 2, 3] {
        s.insert(k);
    }
    assert_eq!(s.len(), 3);
    let v: Vec<_> = s.iter().copied().collect();
    assert_eq!(v, vec![1, 2, 3]);
    assert!(check(&s).is_ok());
}

#[test]
fn scenario_3_ascending_run_height_bound() {
    // The literal height <= 3 bound is checked directly at the
    // node-pointer level by
    // core::tests::ascending_seven_insert_stays_within_height_bound, since
    // that requires walking tree structure WavlSet doesn't expose
    // publicly; this test covers the same scenario's observable behavior.
    let mut s = WavlSet::new();
    for k in 1..=7 {
        s.insert(k);
    }
    assert_eq!(s.len(), 7);
    assert!(check(&s).is_ok());
}

#[test]
fn scenario_4_mixed_insert_erase() {
    let mut s = WavlSet::new();
    for k in [10, 5, 15, 3, 7, 12, 18, 1] {
        s.insert(k);
    }
    assert!(check(&s).is_ok());

    for k in [5, 18, 1] {
        assert!(s.remove(&k));
        assert!(check(&s).is_ok());
    }

    let v: Vec<_> = s.iter().copied().collect();
    assert_eq!(v, vec![3, 7, 10, 12, 15]);
    assert_eq!(s.len(), 5);
}

#[test]
fn scenario_5_insert_then_drain_in_order() {
    let mut s: WavlSet<i32> = (1..=15).collect();
    assert_eq!(s.len(), 15);
    assert!(check(&s).is_ok());

    for k in 1..=15 {
        assert!(s.remove(&k));
        assert!(check(&s).is_ok());
    }
    assert!(s.is_empty());
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut s = WavlSet::new();
    assert!(s.insert(1));
    assert!(!s.insert(1));
    assert_eq!(s.len(), 1);
}

#[test]
fn remove_nonexistent_reports_false() {
    let mut s: WavlSet<i32> = [1, 2, 3].into_iter().collect();
    assert!(!s.remove(&99));
}
