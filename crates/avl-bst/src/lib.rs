//! Arena-backed AVL tree map.
//!
//! Nodes live in a caller- or map-owned `Vec<N>` arena; every link is an
//! `Option<u32>` index into it. Parent links are plain indices and never own
//! anything.
//!
//! Each node carries a balance factor, `height(right) - height(left)`, kept
//! in `{-1, 0, 1}` between operations. Inserts and removals do the plain BST
//! step first, then walk toward the root adjusting balance factors and
//! rotating until the subtree height seen by the parent stops changing.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] and [`KvNode`] traits, default comparator |
//! [`bst`] | unbalanced primitives: `first`, `next`, `prev`, `find`, `swap`, ... |
//! [`avl`] | [`AvlNode`], rotations, repair walks, [`AvlMap`] |
//! [`error`] | [`InvariantError`] reported by the validator |
//!
//! # Example
//!
//! ```
//! use avl_bst::AvlMap;
//!
//! let mut map = AvlMap::new();
//! for k in [10, 20, 30] {
//!     map.insert(k, k * 10);
//! }
//! let root = map.root_index().unwrap();
//! assert_eq!(map.key(root), &20);
//! assert_eq!(map.remove(&20), Some(200));
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![10, 30]);
//! map.assert_valid().unwrap();
//! ```

pub mod avl;
pub mod bst;
pub mod error;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod types;

pub use avl::{AvlMap, AvlNode, AvlNodeLike};
pub use error::InvariantError;
pub use types::{KvNode, Node};
