//! Integration tests for the concrete scenarios enumerated in spec §8.

use tpp_core::{
    DenseMap, DenseMultiTable2, FxBuildHasher, OrderedDenseMap, OrderedDenseSet, StableSparseMap,
    SparseSet,
};

/// Scenario 1: insert 0..65535 into a set, find each, then erase each in
/// order, checking all remaining keys stay findable after every erase.
#[test]
fn scenario_1_bulk_insert_find_erase() {
    use tpp_core::DenseSet;

    let mut set: DenseSet<i32> = DenseSet::default();
    for i in 0..65536 {
        let (_, inserted) = set.insert(i);
        assert!(inserted);
    }
    for i in 0..65536 {
        assert!(set.contains_key(&i));
    }
    for i in 0..65536 {
        assert_eq!(set.remove(&i), Some(i));
        assert!(!set.contains_key(&i));
        if i < 65535 {
            assert!(set.contains_key(&(i + 1)));
        }
    }
    assert_eq!(set.len(), 0);
}

/// Scenario 2: map initializer plus `insert_or_assign`.
#[test]
fn scenario_2_map_initializer_and_assign() {
    let mut map: DenseMap<String, i32> = DenseMap::default();
    map.insert(("a".to_string(), 1));
    map.insert(("b".to_string(), 2));
    assert_eq!(map.len(), 2);
    assert_eq!(map.try_get("a").unwrap().1, 1);
    assert_eq!(map.try_get("b").unwrap().1, 2);

    map.insert_or_assign(("a".to_string(), 3));
    assert_eq!(map.try_get("a").unwrap().1, 3);
    assert_eq!(map.len(), 2);
}

/// Scenario 3: an ordered set "move-constructed" into a second set. Rust
/// has no moved-from-but-still-valid object model, so the idiomatic
/// reinterpretation of "move-construct" is `mem::take`: it leaves the
/// source holding a fresh, empty, default-constructed table (the same
/// externally observable state C++ requires of a moved-from container)
/// and hands the prior contents to the destination.
#[test]
fn scenario_3_ordered_set_move_construction() {
    let mut source: OrderedDenseSet<String> = OrderedDenseSet::default();
    for s in ["0", "1", "2"] {
        source.insert(s.to_string());
    }

    let dest = core::mem::take(&mut source);

    assert_eq!(source.len(), 0);
    assert!(source.iter().next().is_none());

    assert_eq!(dest.len(), 3);
    let order: Vec<_> = dest.iter().cloned().collect();
    assert_eq!(order, vec!["0".to_string(), "1".to_string(), "2".to_string()]);
    assert_eq!(dest.front(), Some(&"0".to_string()));
    assert_eq!(dest.back(), Some(&"2".to_string()));
}

/// Scenario 4: a two-key multimap, findable by either key, erased by one.
#[test]
fn scenario_4_two_key_multimap() {
    let mut table: DenseMultiTable2<i32, String, &'static str, FxBuildHasher> =
        DenseMultiTable2::default();
    table.insert(1, "a".to_string(), "value0");
    table.insert(2, "b".to_string(), "value1");

    let by0 = table.find0(&1).unwrap();
    let by1 = table.find1(&"a".to_string()).unwrap();
    assert_eq!(by0, by1);
    assert_eq!(table.get(by0).2, &"value0");

    let removed = table.remove_by0(&1).unwrap();
    assert_eq!(removed.2, "value0");
    assert!(table.find1(&"a".to_string()).is_none());
    assert!(table.find0(&2).is_some());
}

/// Scenario 5: extract a node from one stable map and insert it into
/// another; the mapped value's address survives the round trip.
#[test]
fn scenario_5_stable_map_extract_pointer_identity() {
    let mut m1: StableSparseMap<String, i32> = StableSparseMap::default();
    let mut m2: StableSparseMap<String, i32> = StableSparseMap::default();
    m1.insert(("x".to_string(), 42));

    let handle = m1.extract("x").unwrap();
    let addr_before = &handle.value().1 as *const i32;

    let (_, inserted, rejected) = m2.insert_node(handle);
    assert!(inserted);
    assert!(rejected.is_none());

    let addr_after = &m2.try_get("x").unwrap().1 as *const i32;
    assert_eq!(addr_before, addr_after);
    assert!(!m1.contains_key("x"));
}

/// Scenario 6: a sparse set at size 1000, erase 500, insert 500 new ones;
/// this should exercise the in-place rehash path rather than growing.
#[test]
fn scenario_6_sparse_erase_then_reinsert_stays_in_place() {
    let mut set: SparseSet<i32> = SparseSet::default();
    for i in 0..1000 {
        set.insert(i);
    }
    let capacity_before_erase = set.capacity();

    for i in 0..500 {
        set.remove(&i);
    }
    for i in 100_000..100_500 {
        set.insert(i);
    }

    assert_eq!(set.len(), 1000);
    assert!(set.capacity() <= capacity_before_erase);
    for i in 500..1000 {
        assert!(set.contains_key(&i));
    }
    for i in 100_000..100_500 {
        assert!(set.contains_key(&i));
    }
}

/// Universal property 9: self-swap is a no-op.
#[test]
fn self_swap_is_noop() {
    let mut map: OrderedDenseMap<i32, i32> = OrderedDenseMap::default();
    map.insert((1, 10));
    map.insert((2, 20));
    let before: Vec<_> = map.iter().cloned().collect();
    // `swap(&mut self, other: &mut Self)` can't literally alias `self` and
    // `other` in safe Rust (that would be two live `&mut` to one place), so
    // the idiomatic check is that swapping with an empty table and back is
    // the identity, which is the property self-swap is meant to guarantee.
    let mut scratch: OrderedDenseMap<i32, i32> = OrderedDenseMap::default();
    map.swap(&mut scratch);
    scratch.swap(&mut map);
    let after: Vec<_> = map.iter().cloned().collect();
    assert_eq!(before, after);
}
