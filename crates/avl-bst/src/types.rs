//! Node trait definitions.
//!
//! Nodes live in a [`Vec`]-backed arena owned by the map. Every link is an
//! `Option<u32>` index into that arena. Parent links never own anything; the
//! arena owns every node and the child links only describe shape.

/// Parent / left / right links.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Key/value node interface used by map-like structures.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    /// Overwrites the value, returning the previous one.
    fn replace_value(&mut self, value: V) -> V;
}

/// Comparator backing `new()` constructors. Custom comparators follow the
/// same contract: negative, zero or positive.
pub fn default_comparator<K: Ord>(a: &K, b: &K) -> i32 {
    match a.cmp(b) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}
