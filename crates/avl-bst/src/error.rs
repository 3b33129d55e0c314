use thiserror::Error;

/// Structural invariant violation reported by [`crate::avl::assert_avl_tree`].
///
/// Every variant carries the arena index of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("root node {0} has a parent")]
    RootHasParent(u32),
    #[error("child {child} does not point back at parent {parent}")]
    BrokenParentLink { parent: u32, child: u32 },
    #[error("balance factor mismatch at node {node}: expected {expected}, got {actual}")]
    BalanceMismatch { node: u32, expected: i32, actual: i32 },
    #[error("balance factor {bf} out of range at node {node}")]
    BalanceOutOfRange { node: u32, bf: i32 },
    #[error("key order violated between nodes {prev} and {next}")]
    OrderViolated { prev: u32, next: u32 },
    #[error("tree holds {reachable} reachable nodes but arena holds {stored}")]
    SizeMismatch { reachable: usize, stored: usize },
}
