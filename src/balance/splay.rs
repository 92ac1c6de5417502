use log::trace;
use super::Balance;
use crate::tree::{BalanceableTree, NodeId, Shape};

/// Splay rebalancing.
///
/// Every insertion and every successful lookup moves the node it touched to the root; every
/// removal moves the parent of the vacated slot to the root. No auxiliary state is kept. A single
/// operation may take linear time, but any sequence of `m` operations on a tree of `n` entries
/// costs `O(m log n)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Splay;

impl Splay {
    fn splay<E>(tree: &mut BalanceableTree<E>, x: NodeId) {
        while let Some(shape) = tree.shape_of(x) {
            trace!("splay: {:?} at {:?}", shape, x);

            match shape {
                Shape::Zig => tree.rotate_node(x),
                Shape::ZigZig => {
                    if let Some(parent) = tree.parent_id(x) { tree.rotate_node(parent); }
                    tree.rotate_node(x);
                }
                Shape::ZigZag => {
                    tree.rotate_node(x);
                    tree.rotate_node(x);
                }
            }
        }
    }
}

impl Balance for Splay {
    fn on_insert<E>(tree: &mut BalanceableTree<E>, node: NodeId) { Self::splay(tree, node); }

    fn on_access<E>(tree: &mut BalanceableTree<E>, node: NodeId) { Self::splay(tree, node); }

    fn on_delete<E>(tree: &mut BalanceableTree<E>, node: NodeId, _removed: i32) {
        if let Some(parent) = tree.parent_id(node) { Self::splay(tree, parent); }
    }
}
