use avl_bst::{AvlMap, InvariantError, Node};

fn keys(map: &AvlMap<i32, i32>) -> Vec<i32> {
    map.keys().copied().collect()
}

fn root_key(map: &AvlMap<i32, i32>) -> Option<i32> {
    map.root_index().map(|i| *map.key(i))
}

#[test]
fn avl_map_ascending_triple_rotates_matrix() {
    let mut map = AvlMap::new();
    map.insert(10, 1);
    map.insert(20, 2);
    map.insert(30, 3);

    let root = map.root_index().unwrap();
    assert_eq!(*map.key(root), 20);
    let l = map.node(root).l().unwrap();
    let r = map.node(root).r().unwrap();
    assert_eq!(*map.key(l), 10);
    assert_eq!(*map.key(r), 30);
    for i in [root, l, r] {
        assert_eq!(map.balance(i), 0);
    }
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_remove_root_with_two_children_matrix() {
    let mut map = AvlMap::new();
    for k in [40, 20, 60, 10, 30, 50, 70] {
        map.insert(k, k * 10);
    }
    assert_eq!(root_key(&map), Some(40));

    assert_eq!(map.remove(&40), Some(400));
    map.assert_valid().unwrap();
    assert_eq!(root_key(&map), Some(30));
    assert_eq!(keys(&map), vec![10, 20, 30, 50, 60, 70]);
    assert_eq!(map.get(&30), Some(&300));
    assert_eq!(map.len(), 6);
}

#[test]
fn avl_map_remove_single_node_matrix() {
    let mut map = AvlMap::new();
    map.insert(1, 1);
    assert_eq!(map.remove(&1), Some(1));
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.root_index(), None);
    assert_eq!(map.remove(&1), None);
    assert_eq!(map.remove(&2), None);
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_duplicate_insert_overwrites_matrix() {
    let mut map = AvlMap::new();
    for k in [5, 3, 8, 1, 4] {
        map.insert(k, k);
    }
    let before = map.print();
    let idx = map.find(&3).unwrap();

    assert_eq!(map.insert(3, 30), idx);
    assert_eq!(map.insert(3, 300), idx);
    assert_eq!(map.get(&3), Some(&300));
    assert_eq!(map.len(), 5);
    assert_eq!(map.print(), before.replace("3 = 3", "3 = 300"));
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_ladder_insert_delete_matrix() {
    let mut map = AvlMap::<i32, i32>::new();

    for i in 0..300 {
        map.insert(i, i);
        map.assert_valid().unwrap();
    }
    assert_eq!(map.len(), 300);
    // A perfectly balanced tree of 300 nodes is 9 levels; AVL allows ~1.44x.
    assert!(map.height() <= 12);

    for i in (0..300).step_by(3) {
        assert_eq!(map.remove(&i), Some(i));
        map.assert_valid().unwrap();
    }
    assert_eq!(map.len(), 200);

    for i in 0..300 {
        if i % 3 == 0 {
            assert_eq!(map.get(&i), None);
        } else {
            assert_eq!(map.get(&i), Some(&i));
        }
    }
}

#[test]
fn avl_map_descending_and_reverse_removal_matrix() {
    let mut map = AvlMap::<i32, i32>::new();
    for i in (0..128).rev() {
        map.insert(i, -i);
        map.assert_valid().unwrap();
    }
    assert_eq!(keys(&map), (0..128).collect::<Vec<_>>());
    for i in (0..128).rev() {
        assert_eq!(map.remove(&i), Some(-i));
        map.assert_valid().unwrap();
    }
    assert!(map.is_empty());
}

#[test]
fn avl_map_navigation_matrix() {
    let mut map = AvlMap::new();
    assert_eq!(map.first(), None);
    assert_eq!(map.last(), None);

    for k in [20, 10, 30, 25] {
        map.insert(k, k);
    }
    let first = map.first().unwrap();
    assert_eq!(*map.key(first), 10);
    let second = map.next(first).unwrap();
    assert_eq!(*map.key(second), 20);
    let last = map.last().unwrap();
    assert_eq!(*map.key(last), 30);
    let before_last = map.prev(last).unwrap();
    assert_eq!(*map.key(before_last), 25);
    assert_eq!(map.prev(first), None);
    assert_eq!(map.next(last), None);
}

#[test]
fn avl_map_misc_api_matrix() {
    let mut map = AvlMap::<i32, i32>::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.height(), 0);
    assert!(map.has_equal_leaf_depths());

    map.insert(10, 100);
    map.insert(5, 50);
    assert!(!map.has_equal_leaf_depths());
    map.insert(20, 200);
    assert!(map.has_equal_leaf_depths());

    assert!(!map.is_empty());
    assert!(map.contains_key(&5));
    assert!(!map.contains_key(&6));
    assert_eq!(map.get(&10), Some(&100));

    *map.get_mut(&10).unwrap() = 101;
    assert_eq!(map.get(&10), Some(&101));
    assert_eq!(map.get_mut(&11), None);

    assert_eq!(map.remove_entry(&5), Some((5, 50)));
    assert_eq!(map.remove_entry(&5), None);

    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![101, 200]);

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.first(), None);
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_iteration_matrix() {
    let map: AvlMap<String, i32> = [("c", 3), ("a", 1), ("b", 2)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    let list: Vec<(String, i32)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    assert_eq!(
        list,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );
    assert_eq!(map.iter().len(), 3);

    let mut seen = Vec::new();
    for (k, _) in &map {
        seen.push(k.as_str());
    }
    assert_eq!(seen, vec!["a", "b", "c"]);
    assert_eq!(format!("{map:?}"), r#"{"a": 1, "b": 2, "c": 3}"#);
}

#[test]
fn avl_map_extend_matrix() {
    let mut map = AvlMap::new();
    map.extend((0..10).map(|i| (i, i)));
    map.extend([(3, 33), (10, 10)]);
    assert_eq!(map.len(), 11);
    assert_eq!(map.get(&3), Some(&33));
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_custom_comparator_matrix() {
    // Reverse order.
    let mut map = AvlMap::with_comparator(|a: &i32, b: &i32| b - a);
    for k in [1, 5, 3, 9, 7] {
        map.insert(k, ());
    }
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![9, 7, 5, 3, 1]);
    map.remove(&5);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![9, 7, 3, 1]);
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_indices_follow_compaction_matrix() {
    let mut map = AvlMap::new();
    for k in 0..8 {
        map.insert(k, k);
    }
    // The node for 7 sits in the last slot and moves into the freed one.
    assert_eq!(map.find(&7), Some(7));
    map.remove(&0);
    assert_eq!(map.find(&7), Some(0));
    assert_eq!(*map.key(0), 7);
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_print_matrix() {
    let mut map = AvlMap::new();
    map.insert(2, "b");
    map.insert(1, "a");
    let out = map.print();
    assert!(out.starts_with("Node[0] [bf=-1] { 2 = \"b\" }"));
    assert!(out.contains("L=Node[1] [bf=0] { 1 = \"a\" }"));
    assert!(out.contains("R=∅"));
}

#[test]
fn invariant_error_messages_matrix() {
    let err = InvariantError::BalanceMismatch {
        node: 3,
        expected: 1,
        actual: 0,
    };
    assert_eq!(
        err.to_string(),
        "balance factor mismatch at node 3: expected 1, got 0"
    );
    assert_eq!(
        InvariantError::RootHasParent(2).to_string(),
        "root node 2 has a parent"
    );
}
