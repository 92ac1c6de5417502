use log::trace;
use super::Balance;
use crate::tree::{BalanceableTree, NodeId};

const BLACK: i32 = 0;
const RED: i32 = 1;

/// Red-black rebalancing.
///
/// The auxiliary integer is the node's colour: even for black, odd for red. Sentinel leaves are
/// black. After every insertion and removal the root is black, no red node has a red child, and
/// every path from a node down to a sentinel leaf passes through the same number of black nodes.
/// Lookups never rotate.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedBlack;

impl RedBlack {
    fn is_red<E>(tree: &BalanceableTree<E>, node: Option<NodeId>) -> bool {
        node.map_or(false, |node| tree.aux_of(node) % 2 != 0)
    }

    fn paint<E>(tree: &mut BalanceableTree<E>, node: Option<NodeId>, colour: i32) {
        if let Some(node) = node { tree.set_aux_of(node, colour); }
    }

    /// Repairs a red `node` whose parent may also be red.
    fn resolve_red<E>(tree: &mut BalanceableTree<E>, mut node: NodeId) {
        loop {
            let parent = match tree.parent_id(node) {
                Some(parent) if Self::is_red(tree, Some(parent)) => parent,
                _ => return,
            };
            let uncle = tree.sibling_id(parent);

            if !Self::is_red(tree, uncle) {
                // Black uncle: one trinode restructuring absorbs the double red.
                if let Some(middle) = tree.restructure_node(node) {
                    trace!("red-black: restructured double red at {:?}", node);
                    let children = [tree.left_id(middle), tree.right_id(middle)];
                    Self::paint(tree, Some(middle), BLACK);
                    for child in children { Self::paint(tree, child, RED); }
                }
                return;
            }

            // Red uncle: push the blackness down from the grandparent and retry above it.
            trace!("red-black: recolouring above {:?}", node);
            Self::paint(tree, Some(parent), BLACK);
            Self::paint(tree, uncle, BLACK);

            match tree.parent_id(parent) {
                Some(grandparent) if tree.parent_id(grandparent).is_some() => {
                    Self::paint(tree, Some(grandparent), RED);
                    node = grandparent;
                }
                _ => return,
            }
        }
    }

    /// Removes a black deficiency from the subtree rooted at `node`.
    fn remedy_double_black<E>(tree: &mut BalanceableTree<E>, mut node: NodeId) {
        loop {
            let (parent, sibling) = match (tree.parent_id(node), tree.sibling_id(node)) {
                (Some(parent), Some(sibling)) => (parent, sibling),
                _ => return,
            };

            if Self::is_red(tree, Some(sibling)) {
                // Red sibling: rotate it above the parent so the deficient node gets a black one.
                trace!("red-black: rotating red sibling {:?}", sibling);
                tree.rotate_node(sibling);
                Self::paint(tree, Some(sibling), BLACK);
                Self::paint(tree, Some(parent), RED);
                continue;
            }

            let (near, far) = if tree.is_left_child(sibling) {
                (tree.right_id(sibling), tree.left_id(sibling))
            } else {
                (tree.left_id(sibling), tree.right_id(sibling))
            };
            let nephew = if Self::is_red(tree, far) {
                far
            } else if Self::is_red(tree, near) {
                near
            } else {
                None
            };

            match nephew {
                Some(nephew) => {
                    // A red nephew lends its colour: restructure and stop.
                    trace!("red-black: restructuring at red nephew {:?}", nephew);
                    let colour = tree.aux_of(parent);
                    if let Some(middle) = tree.restructure_node(nephew) {
                        let children = [tree.left_id(middle), tree.right_id(middle)];
                        Self::paint(tree, Some(middle), colour);
                        for child in children { Self::paint(tree, child, BLACK); }
                    }
                    return;
                }
                None => {
                    // Black sibling with black children: move the deficiency up a level.
                    trace!("red-black: recolouring sibling {:?}", sibling);
                    Self::paint(tree, Some(sibling), RED);

                    if Self::is_red(tree, Some(parent)) {
                        Self::paint(tree, Some(parent), BLACK);
                        return;
                    }
                    node = parent;
                }
            }
        }
    }
}

impl Balance for RedBlack {
    fn on_insert<E>(tree: &mut BalanceableTree<E>, node: NodeId) {
        if tree.parent_id(node).is_none() {
            Self::paint(tree, Some(node), BLACK);
        } else {
            Self::paint(tree, Some(node), RED);
            Self::resolve_red(tree, node);
        }
    }

    fn on_delete<E>(tree: &mut BalanceableTree<E>, node: NodeId, removed: i32) {
        if removed % 2 != 0 { return; }

        if Self::is_red(tree, Some(node)) {
            Self::paint(tree, Some(node), BLACK);
        } else {
            Self::remedy_double_black(tree, node);
        }
    }
}
