//! Rebalancing strategies for the search tree map.
//!
//! A [`Map`](../map/struct.Map.html) performs its searches, insertions and removals without any
//! regard for the shape of the tree. After each one it calls a hook on its `Balance` type
//! parameter, and the hook alone decides whether and how to rotate.

mod avl;
mod red_black;
mod splay;

pub use self::avl::Avl;
pub use self::red_black::RedBlack;
pub use self::splay::Splay;

use crate::tree::{BalanceableTree, NodeId};

mod private {
    pub trait Sealed {}

    impl Sealed for super::Unbalanced {}
    impl Sealed for super::Avl {}
    impl Sealed for super::RedBlack {}
    impl Sealed for super::Splay {}
}

/// A rebalancing discipline, invoked by the map after every search or structural change.
///
/// This trait is sealed. Every hook walks upward from the node it is given and may only rotate;
/// it never adds or removes nodes.
pub trait Balance: private::Sealed {
    /// Called after `node`, formerly a sentinel leaf, received a new entry.
    #[doc(hidden)]
    fn on_insert<E>(_tree: &mut BalanceableTree<E>, _node: NodeId) {}

    /// Called after a lookup or value overwrite found `node`.
    #[doc(hidden)]
    fn on_access<E>(_tree: &mut BalanceableTree<E>, _node: NodeId) {}

    /// Called after a node was spliced out of the tree. `node` is whatever now occupies the
    /// removed node's slot, possibly a sentinel leaf, and `removed` is the auxiliary integer the
    /// removed node carried.
    #[doc(hidden)]
    fn on_delete<E>(_tree: &mut BalanceableTree<E>, _node: NodeId, _removed: i32) {}
}

/// A plain binary search tree that never rebalances.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbalanced;

impl Balance for Unbalanced {}
