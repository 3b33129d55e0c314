use std::fmt::Debug;

use log::trace;

use crate::bst::{
    first, get_l, get_p, get_r, is_left_child, next, prev, replace_child, set_l, set_p, set_r,
    size, swap,
};
use crate::error::InvariantError;
use crate::types::{KvNode, Node};

use super::types::AvlNodeLike;

#[inline]
fn bf<K, V, N>(arena: &[N], i: u32) -> i8
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].bf()
}

#[inline]
fn set_bf<K, V, N>(arena: &mut [N], i: u32, v: i8)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_bf(v);
}

/// Rotates the subtree at `n` to the left and returns the tree root.
///
/// `n`'s right child takes `n`'s place, `n` becomes its left child and the
/// right child's former left subtree moves under `n`. Balance factors are
/// left untouched.
pub fn rotate_left<N: Node>(arena: &mut [N], root: u32, n: u32) -> u32 {
    let Some(r) = get_r(arena, n) else {
        return root;
    };
    trace!("rotate_left at node {n}");
    let p = get_p(arena, n);
    let rl = get_l(arena, r);

    set_r(arena, n, rl);
    if let Some(rl) = rl {
        set_p(arena, rl, Some(n));
    }
    set_p(arena, r, p);
    set_l(arena, r, Some(n));
    set_p(arena, n, Some(r));

    match p {
        Some(p) => {
            replace_child(arena, p, n, Some(r));
            root
        }
        None => r,
    }
}

/// Mirror of [`rotate_left`].
pub fn rotate_right<N: Node>(arena: &mut [N], root: u32, n: u32) -> u32 {
    let Some(l) = get_l(arena, n) else {
        return root;
    };
    trace!("rotate_right at node {n}");
    let p = get_p(arena, n);
    let lr = get_r(arena, l);

    set_l(arena, n, lr);
    if let Some(lr) = lr {
        set_p(arena, lr, Some(n));
    }
    set_p(arena, l, p);
    set_r(arena, l, Some(n));
    set_p(arena, n, Some(l));

    match p {
        Some(p) => {
            replace_child(arena, p, n, Some(l));
            root
        }
        None => l,
    }
}

/// Double rotation for a left-heavy `n` whose left child `nl` leans right.
///
/// The pivot (`nl`'s right child) ends on top; the balances of `n` and `nl`
/// follow from the pivot's balance before rotating. Shared by insert and
/// remove repairs.
fn lr_rotate<K, V, N>(arena: &mut [N], root: u32, n: u32, nl: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let Some(pivot) = get_r(arena, nl) else {
        return root;
    };
    let root = rotate_left(arena, root, nl);
    let root = rotate_right(arena, root, n);
    let pbf = bf(arena, pivot);
    set_bf(arena, nl, if pbf > 0 { -1 } else { 0 });
    set_bf(arena, n, if pbf < 0 { 1 } else { 0 });
    set_bf(arena, pivot, 0);
    root
}

/// Mirror of [`lr_rotate`].
fn rl_rotate<K, V, N>(arena: &mut [N], root: u32, n: u32, nr: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let Some(pivot) = get_l(arena, nr) else {
        return root;
    };
    let root = rotate_right(arena, root, nr);
    let root = rotate_left(arena, root, n);
    let pbf = bf(arena, pivot);
    set_bf(arena, nr, if pbf < 0 { 1 } else { 0 });
    set_bf(arena, n, if pbf > 0 { -1 } else { 0 });
    set_bf(arena, pivot, 0);
    root
}

/// Walks up from `p`, whose subtree just grew by one level through its
/// child `n`, until some ancestor absorbs the growth or a rotation
/// restores the original height. Returns the tree root.
pub fn insert_fix<K, V, N>(arena: &mut [N], mut root: u32, mut p: u32, mut n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    loop {
        let Some(g) = get_p(arena, p) else {
            return root;
        };
        let p_left = is_left_child(arena, g, p);
        let gbf = bf(arena, g) + if p_left { -1 } else { 1 };

        match gbf {
            0 => {
                set_bf(arena, g, 0);
                trace!("insert_fix absorbed at node {g}");
                return root;
            }
            -1 | 1 => {
                set_bf(arena, g, gbf);
                n = p;
                p = g;
            }
            _ => {
                let n_left = is_left_child(arena, p, n);
                root = match (p_left, n_left) {
                    (true, true) => {
                        let root = rotate_right(arena, root, g);
                        set_bf(arena, p, 0);
                        set_bf(arena, g, 0);
                        root
                    }
                    (true, false) => lr_rotate(arena, root, g, p),
                    (false, false) => {
                        let root = rotate_left(arena, root, g);
                        set_bf(arena, p, 0);
                        set_bf(arena, g, 0);
                        root
                    }
                    (false, true) => rl_rotate(arena, root, g, p),
                };
                return root;
            }
        }
    }
}

/// Attaches leaf `n` as the left child of `p` and rebalances.
///
/// `p` must not have a left child. Returns the tree root.
pub fn insert_left<K, V, N>(arena: &mut [N], root: u32, n: u32, p: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    set_bf(arena, n, 0);
    let pbf = bf(arena, p) - 1;
    set_bf(arena, p, pbf);
    if pbf == 0 {
        return root;
    }
    insert_fix(arena, root, p, n)
}

/// Attaches leaf `n` as the right child of `p` and rebalances.
///
/// `p` must not have a right child. Returns the tree root.
pub fn insert_right<K, V, N>(arena: &mut [N], root: u32, n: u32, p: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    set_bf(arena, n, 0);
    let pbf = bf(arena, p) + 1;
    set_bf(arena, p, pbf);
    if pbf == 0 {
        return root;
    }
    insert_fix(arena, root, p, n)
}

/// Walks up from `n`, one of whose subtrees just lost a level.
///
/// `diff` is `+1` when the left side shrank and `-1` when the right side
/// shrank. Returns the tree root.
pub fn remove_fix<K, V, N>(arena: &mut [N], mut root: u32, n: u32, diff: i8) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let mut curr = Some(n);
    let mut diff = diff;

    while let Some(n) = curr {
        let p = get_p(arena, n);
        // Rotations keep the subtree in the same slot under `p`.
        let up = match p {
            Some(p) if is_left_child(arena, p, n) => 1,
            Some(_) => -1,
            None => 0,
        };
        let nbf = bf(arena, n) + diff;

        match nbf {
            0 => set_bf(arena, n, 0),
            -1 | 1 => {
                set_bf(arena, n, nbf);
                trace!("remove_fix absorbed at node {n}");
                return root;
            }
            nbf if nbf < 0 => {
                let Some(c) = get_l(arena, n) else {
                    return root;
                };
                match bf(arena, c) {
                    -1 => {
                        root = rotate_right(arena, root, n);
                        set_bf(arena, n, 0);
                        set_bf(arena, c, 0);
                    }
                    0 => {
                        root = rotate_right(arena, root, n);
                        set_bf(arena, n, -1);
                        set_bf(arena, c, 1);
                        return root;
                    }
                    _ => root = lr_rotate(arena, root, n, c),
                }
            }
            _ => {
                let Some(c) = get_r(arena, n) else {
                    return root;
                };
                match bf(arena, c) {
                    1 => {
                        root = rotate_left(arena, root, n);
                        set_bf(arena, n, 0);
                        set_bf(arena, c, 0);
                    }
                    0 => {
                        root = rotate_left(arena, root, n);
                        set_bf(arena, n, 1);
                        set_bf(arena, c, -1);
                        return root;
                    }
                    _ => root = rl_rotate(arena, root, n, c),
                }
            }
        }

        curr = p;
        diff = up;
    }

    root
}

/// Unlinks node `n` from the tree and rebalances.
///
/// A node with two children first trades places with its in-order
/// predecessor, balance factors included, so that the node actually spliced
/// out is `n` itself. On return `n` has no links. Returns the new root.
pub fn remove<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let mut root = root?;

    if get_l(arena, n).is_some() && get_r(arena, n).is_some() {
        if let Some(pred) = prev(arena, n) {
            root = swap(arena, root, n, pred);
            let nbf = bf(arena, n);
            let pbf = bf(arena, pred);
            set_bf(arena, n, pbf);
            set_bf(arena, pred, nbf);
        }
    }

    let p = get_p(arena, n);
    let child = get_l(arena, n).or(get_r(arena, n));
    if let Some(c) = child {
        set_p(arena, c, p);
    }

    let Some(p) = p else {
        set_l(arena, n, None);
        set_r(arena, n, None);
        set_bf(arena, n, 0);
        return child;
    };

    let diff = if is_left_child(arena, p, n) { 1 } else { -1 };
    replace_child(arena, p, n, child);
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_bf(arena, n, 0);

    Some(remove_fix(arena, root, p, diff))
}

/// Checks links, balance factors, key order and arena density.
///
/// Heights are recomputed from the structure rather than trusted from the
/// stored balance factors.
pub fn assert_avl_tree<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), InvariantError>
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        if arena.is_empty() {
            return Ok(());
        }
        return Err(InvariantError::SizeMismatch {
            reachable: 0,
            stored: arena.len(),
        });
    };

    if arena[root as usize].p().is_some() {
        return Err(InvariantError::RootHasParent(root));
    }

    // Returns the subtree height.
    fn validate<K, V, N>(arena: &[N], node: u32) -> Result<i32, InvariantError>
    where
        N: AvlNodeLike<K, V>,
    {
        let mut heights = [0i32; 2];
        for (slot, child) in [arena[node as usize].l(), arena[node as usize].r()]
            .into_iter()
            .enumerate()
        {
            if let Some(c) = child {
                if arena[c as usize].p() != Some(node) {
                    return Err(InvariantError::BrokenParentLink {
                        parent: node,
                        child: c,
                    });
                }
                heights[slot] = validate::<K, V, N>(arena, c)?;
            }
        }

        let expected = heights[1] - heights[0];
        let actual = i32::from(arena[node as usize].bf());
        if actual != expected {
            return Err(InvariantError::BalanceMismatch {
                node,
                expected,
                actual,
            });
        }
        if !(-1..=1).contains(&actual) {
            return Err(InvariantError::BalanceOutOfRange { node, bf: actual });
        }

        Ok(1 + heights[0].max(heights[1]))
    }

    validate::<K, V, N>(arena, root)?;

    let reachable = size(arena, Some(root));
    if reachable != arena.len() {
        return Err(InvariantError::SizeMismatch {
            reachable,
            stored: arena.len(),
        });
    }

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) >= 0 {
                return Err(InvariantError::OrderViolated { prev, next: i });
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: AvlNodeLike<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, V, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<K, V, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [bf={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.bf(),
                n.key(),
                n.value()
            )
        }
    }
}
