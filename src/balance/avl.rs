use log::trace;
use std::cmp;
use super::Balance;
use crate::tree::{BalanceableTree, NodeId};

/// Height-balanced (AVL) rebalancing.
///
/// Each node's auxiliary integer is the height of its subtree, with sentinel leaves at height 0.
/// After every insertion and removal the heights of a node's two subtrees differ by at most one.
/// Lookups never rotate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Avl;

impl Avl {
    fn height<E>(tree: &BalanceableTree<E>, node: Option<NodeId>) -> i32 {
        node.map_or(0, |node| tree.aux_of(node))
    }

    fn recompute_height<E>(tree: &mut BalanceableTree<E>, node: NodeId) {
        let height = 1 + cmp::max(Self::height(tree, tree.left_id(node)),
                                  Self::height(tree, tree.right_id(node)));
        tree.set_aux_of(node, height);
    }

    fn is_balanced<E>(tree: &BalanceableTree<E>, node: NodeId) -> bool {
        (Self::height(tree, tree.left_id(node)) - Self::height(tree, tree.right_id(node))).abs() <= 1
    }

    // Ties go to the child on the same side as `node` is under its own parent, so that a
    // restructuring is a single rotation whenever one suffices.
    fn taller_child<E>(tree: &BalanceableTree<E>, node: NodeId) -> Option<NodeId> {
        let (left, right) = (tree.left_id(node), tree.right_id(node));

        match Self::height(tree, left).cmp(&Self::height(tree, right)) {
            cmp::Ordering::Greater => left,
            cmp::Ordering::Less => right,
            cmp::Ordering::Equal =>
                if tree.parent_id(node).is_none() || tree.is_left_child(node) { left } else { right },
        }
    }

    /// Walks from `node` towards the root, fixing heights and restructuring the first
    /// unbalanced node on each pass. Stops once a subtree's height comes out unchanged.
    fn rebalance<E>(tree: &mut BalanceableTree<E>, mut node: NodeId) {
        loop {
            let old_height = tree.aux_of(node);

            if !Self::is_balanced(tree, node) {
                let x = Self::taller_child(tree, node).and_then(|y| Self::taller_child(tree, y));

                if let Some(top) = x.and_then(|x| tree.restructure_node(x)) {
                    trace!("avl: restructured at {:?}, new subtree top {:?}", node, top);
                    node = top;
                    for child in [tree.real_left(node), tree.real_right(node)].into_iter().flatten() {
                        Self::recompute_height(tree, child);
                    }
                }
            }

            Self::recompute_height(tree, node);

            match tree.parent_id(node) {
                Some(parent) if tree.aux_of(node) != old_height => node = parent,
                _ => break,
            }
        }
    }
}

impl Balance for Avl {
    fn on_insert<E>(tree: &mut BalanceableTree<E>, node: NodeId) { Self::rebalance(tree, node); }

    fn on_delete<E>(tree: &mut BalanceableTree<E>, node: NodeId, _removed: i32) {
        if let Some(parent) = tree.parent_id(node) { Self::rebalance(tree, parent); }
    }
}
