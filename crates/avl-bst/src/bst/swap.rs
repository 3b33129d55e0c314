use crate::types::Node;

use super::{get_l, get_p, get_r, is_left_child, set_l, set_p, set_r};

/// Exchanges the tree positions of `x` and `y`.
///
/// Each node keeps its own key and value; only the links move. Handles the
/// case where one node is the other's parent and the case where both hang
/// off the same parent. Returns the new root.
pub fn swap<N: Node>(arena: &mut [N], root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }

    let xp = get_p(arena, x);
    let xl = get_l(arena, x);
    let xr = get_r(arena, x);
    let yp = get_p(arena, y);
    let yl = get_l(arena, y);
    let yr = get_r(arena, y);

    // Sides must be read before any parent link is rewritten: with a shared
    // parent the second lookup would otherwise see the first rewrite.
    let x_left = xp.map(|p| is_left_child(arena, p, x));
    let y_left = yp.map(|p| is_left_child(arena, p, y));

    // A link to self means the two nodes were adjacent.
    let flip = |v: Option<u32>, me: u32, other: u32| if v == Some(me) { Some(other) } else { v };

    set_p(arena, x, flip(yp, x, y));
    set_l(arena, x, flip(yl, x, y));
    set_r(arena, x, flip(yr, x, y));
    set_p(arena, y, flip(xp, y, x));
    set_l(arena, y, flip(xl, y, x));
    set_r(arena, y, flip(xr, y, x));

    for (node, other) in [(x, y), (y, x)] {
        for child in [get_l(arena, node), get_r(arena, node)].into_iter().flatten() {
            if child != other {
                set_p(arena, child, Some(node));
            }
        }
    }

    let mut root = root;
    // x moved into y's old slot and y into x's. A former parent that is the
    // node itself was already handled by `flip`.
    for (node, parent, left) in [(x, yp, y_left), (y, xp, x_left)] {
        match (parent, left) {
            (None, _) => root = node,
            (Some(p), _) if p == node => {}
            (Some(p), Some(true)) => set_l(arena, p, Some(node)),
            (Some(p), _) => set_r(arena, p, Some(node)),
        }
    }

    root
}
