use crate::types::{KvNode, Node};

/// AVL tree node.
///
/// Links and the balance factor are read through [`Node`] and
/// [`AvlNodeLike`]; only the tree code in this crate rewrites them.
#[derive(Clone, Debug)]
pub struct AvlNode<K, V> {
    pub(crate) p: Option<u32>,
    pub(crate) l: Option<u32>,
    pub(crate) r: Option<u32>,
    pub(crate) k: K,
    pub(crate) v: V,
    /// `height(right) - height(left)`, always in `-1..=1` between operations.
    pub(crate) bf: i8,
}

impl<K, V> AvlNode<K, V> {
    /// Detached leaf with a zero balance.
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            bf: 0,
        }
    }

    /// Consumes a detached node, returning its entry.
    pub fn into_entry(self) -> (K, V) {
        (self.k, self.v)
    }
}

impl<K, V> Node for AvlNode<K, V> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K, V> KvNode<K, V> for AvlNode<K, V> {
    fn key(&self) -> &K {
        &self.k
    }

    fn value(&self) -> &V {
        &self.v
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.v
    }

    fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.v, value)
    }
}

/// Balance-factor access on top of [`KvNode`].
pub trait AvlNodeLike<K, V>: KvNode<K, V> {
    fn bf(&self) -> i8;
    fn set_bf(&mut self, bf: i8);
}

impl<K, V> AvlNodeLike<K, V> for AvlNode<K, V> {
    fn bf(&self) -> i8 {
        self.bf
    }

    fn set_bf(&mut self, bf: i8) {
        self.bf = bf;
    }
}
