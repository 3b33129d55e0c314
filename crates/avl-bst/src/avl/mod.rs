//! AVL balancing layer.
//!
//! [`util`] holds the arena-level algorithms (rotations, insert/remove
//! repair walks, validation); [`AvlMap`] owns an arena and exposes the map
//! surface on top of them.

#[path = "AvlMap.rs"]
pub mod avl_map;
pub mod types;
pub mod util;

pub use avl_map::{AvlMap, Iter};
pub use types::{AvlNode, AvlNodeLike};
pub use util::{
    assert_avl_tree, insert_fix, insert_left, insert_right, print, remove, remove_fix,
    rotate_left, rotate_right,
};
