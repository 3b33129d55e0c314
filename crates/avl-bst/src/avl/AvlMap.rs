use std::fmt::{self, Debug};

use log::debug;

use crate::bst::{self, get_l, get_p, get_r, replace_child, set_p};
use crate::error::InvariantError;
use crate::types::{default_comparator, KvNode};

use super::types::{AvlNode, AvlNodeLike};
use super::util;

/// AVL tree map.
///
/// Nodes live in a dense arena and are addressed by `u32` indices. Indices
/// stay valid across inserts; a [`remove`](AvlMap::remove) may move the node
/// stored in the last arena slot into the freed one, so indices obtained
/// before a removal must be looked up again.
///
/// Links are `u32` indices, so a map holds at most 2^32 entries.
pub struct AvlMap<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<AvlNode<K, V>>,
    root: Option<u32>,
    comparator: C,
}

impl<K, V> AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the last slot in an arena of `len` nodes.
fn last_slot(len: usize) -> u32 {
    debug_assert!(
        len > 0 && len - 1 <= u32::MAX as usize,
        "arena of {len} nodes exceeds u32 indices"
    );
    (len - 1) as u32
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            comparator,
        }
    }

    fn push_node(&mut self, key: K, value: V) -> u32 {
        self.arena.push(AvlNode::new(key, value));
        last_slot(self.arena.len())
    }

    /// Inserts `key`, or overwrites its value when already present.
    ///
    /// Returns the index of the node holding `key`.
    pub fn insert(&mut self, key: K, value: V) -> u32 {
        let Some(root) = self.root else {
            let idx = self.push_node(key, value);
            self.root = Some(idx);
            return idx;
        };

        let mut curr = root;
        loop {
            let cmp = (self.comparator)(&key, self.arena[curr as usize].key());
            if cmp == 0 {
                self.arena[curr as usize].replace_value(value);
                return curr;
            }
            let child = if cmp < 0 {
                get_l(&self.arena, curr)
            } else {
                get_r(&self.arena, curr)
            };
            match child {
                Some(c) => curr = c,
                None => {
                    let idx = self.push_node(key, value);
                    self.root = Some(if cmp < 0 {
                        util::insert_left(&mut self.arena, root, idx, curr)
                    } else {
                        util::insert_right(&mut self.arena, root, idx, curr)
                    });
                    return idx;
                }
            }
        }
    }

    /// Removes `key` and returns its value; absent keys are a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key` and returns the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let node = self.find(key)?;
        self.root = util::remove(&mut self.arena, self.root, node);
        Some(self.release(node).into_entry())
    }

    /// Drops the detached node at `idx` from the arena, relinking whichever
    /// node `swap_remove` moves into its slot.
    fn release(&mut self, idx: u32) -> AvlNode<K, V> {
        let moved = last_slot(self.arena.len());
        let removed = self.arena.swap_remove(idx as usize);
        if moved == idx {
            return removed;
        }

        debug!("relocating node {moved} to slot {idx}");
        match get_p(&self.arena, idx) {
            Some(p) => replace_child(&mut self.arena, p, moved, Some(idx)),
            None => self.root = Some(idx),
        }
        for child in [get_l(&self.arena, idx), get_r(&self.arena, idx)]
            .into_iter()
            .flatten()
        {
            set_p(&mut self.arena, child, Some(idx));
        }
        removed
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn find(&self, key: &K) -> Option<u32> {
        bst::find(&self.arena, self.root, key, &self.comparator)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| self.arena[i as usize].value())
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(self.arena[idx as usize].value_mut())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Tree height; 0 for an empty map.
    pub fn height(&self) -> usize {
        bst::height(&self.arena, self.root)
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn first(&self) -> Option<u32> {
        bst::first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        bst::last(&self.arena, self.root)
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        bst::next(&self.arena, curr)
    }

    /// In-order predecessor of the node at `curr`.
    pub fn prev(&self, curr: u32) -> Option<u32> {
        bst::prev(&self.arena, curr)
    }

    pub fn node(&self, idx: u32) -> &AvlNode<K, V> {
        &self.arena[idx as usize]
    }

    pub fn key(&self, idx: u32) -> &K {
        self.node(idx).key()
    }

    pub fn value(&self, idx: u32) -> &V {
        self.node(idx).value()
    }

    pub fn balance(&self, idx: u32) -> i8 {
        self.node(idx).bf()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.arena,
            curr: self.first(),
            remaining: self.len(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Whether every path from the root to a missing child has the same
    /// length, i.e. the tree is perfect.
    pub fn has_equal_leaf_depths(&self) -> bool {
        bst::equal_paths(&self.arena, self.root)
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        util::assert_avl_tree(&self.arena, self.root, &self.comparator)
    }

    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        util::print(&self.arena, self.root, "")
    }
}

impl<K: Debug, V: Debug, C> Debug for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Extend<(K, V)> for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V, fn(&K, &K) -> i32> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the entries of an [`AvlMap`].
pub struct Iter<'a, K, V> {
    arena: &'a [AvlNode<K, V>],
    curr: Option<u32>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        self.curr = bst::next(self.arena, i);
        self.remaining = self.remaining.saturating_sub(1);
        let n = &self.arena[i as usize];
        Some((n.key(), n.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
