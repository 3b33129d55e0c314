//! Base binary-search-tree primitives over an arena of [`Node`]s.
//!
//! Nothing in here balances anything. These are the navigation and
//! restructuring helpers the AVL layer builds on:
//!
//! - [`first`] / [`last`]: extreme nodes of a subtree
//! - [`next`] / [`prev`]: in-order successor / predecessor
//! - [`find`]: key lookup with a comparator
//! - [`swap`]: exchange two nodes' positions
//! - [`size`], [`height`], [`equal_paths`]: shape queries

pub mod swap;

use crate::types::{KvNode, Node};

pub use swap::swap;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Whether `child` hangs off the left of `parent`.
#[inline]
pub(crate) fn is_left_child<N: Node>(arena: &[N], parent: u32, child: u32) -> bool {
    get_l(arena, parent) == Some(child)
}

/// Points `parent`'s link that currently holds `old` at `new` instead.
pub(crate) fn replace_child<N: Node>(arena: &mut [N], parent: u32, old: u32, new: Option<u32>) {
    if is_left_child(arena, parent, old) {
        set_l(arena, parent, new);
    } else {
        set_r(arena, parent, new);
    }
}

/// Leftmost node in the subtree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the subtree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor: rightmost node of the left subtree, or the nearest
/// ancestor whose right subtree holds `curr`.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Finds a node by key.
pub fn find<K, V, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, arena[i as usize].key());
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Height of the subtree: 0 when empty, 1 for a single leaf.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)))
    })
}

/// Whether every root-to-empty-slot path has the same length.
///
/// Each missing child ends a path, so any node with exactly one child
/// makes the check fail. Empty trees pass.
pub fn equal_paths<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    fn walk<N: Node>(
        arena: &[N],
        node: Option<u32>,
        depth: usize,
        end: &mut Option<usize>,
    ) -> bool {
        let Some(i) = node else {
            return *end.get_or_insert(depth) == depth;
        };
        walk(arena, get_l(arena, i), depth + 1, end)
            && walk(arena, get_r(arena, i), depth + 1, end)
    }

    let mut end = None;
    walk(arena, root, 0, &mut end)
}
