use crate::error::{Error, Result};
use log::trace;
use std::fmt::{self, Display};
use std::ops::{Deref, DerefMut};
use super::{LinkedBinaryTree, NodeId, Position};

/// How a node sits relative to its parent and grandparent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// The node's parent is the root.
    Zig,
    /// The node and its parent are children on the same side.
    ZigZig,
    /// The node and its parent are children on opposite sides.
    ZigZag,
}

/// A linked binary tree that carries one auxiliary integer per node and knows how to rotate.
///
/// The auxiliary integer has no meaning to the tree itself. Each rebalancing strategy decides
/// what it stores there; sentinel leaves start out at 0 like every other node.
///
/// # Examples
///
/// ```
/// use balanced_tree::tree::BalanceableTree;
///
/// let mut tree = BalanceableTree::new();
/// let a = tree.add_root('a').unwrap();
/// let b = tree.add_right(a, 'b').unwrap();
///
/// tree.rotate(b).unwrap();
/// assert_eq!(tree.root(), Some(b));
/// assert_eq!(tree.left(b).unwrap(), Some(a));
/// ```
pub struct BalanceableTree<E> {
    tree: LinkedBinaryTree<E>,
}

impl<E> BalanceableTree<E> {
    /// Creates an empty tree.
    pub fn new() -> Self { BalanceableTree { tree: LinkedBinaryTree::new() } }

    /// Returns the auxiliary integer stored at the given position.
    pub fn aux(&self, p: Position) -> Result<i32> { Ok(self.aux_of(self.validate(p)?)) }

    /// Replaces the auxiliary integer stored at the given position, returning the old one.
    pub fn set_aux(&mut self, p: Position, aux: i32) -> Result<i32> {
        let id = self.validate(p)?;
        let old = self.aux_of(id);
        self.set_aux_of(id, aux);
        Ok(old)
    }

    /// Classifies the given position against its parent and grandparent.
    ///
    /// Returns `None` for the root.
    pub fn shape(&self, p: Position) -> Result<Option<Shape>> { Ok(self.shape_of(self.validate(p)?)) }

    /// Rotates the given position above its parent.
    ///
    /// The parent becomes a child of `p`, `p` takes the parent's place under the grandparent, and
    /// the subtree between them changes sides. Keys are never consulted.
    pub fn rotate(&mut self, p: Position) -> Result<()> {
        let id = self.validate(p)?;
        if self.parent_id(id).is_none() {
            return Err(Error::InvalidArgument("cannot rotate the root"));
        }
        self.rotate_node(id);
        Ok(())
    }

    /// Performs a trinode restructuring of the given position, its parent and its grandparent,
    /// returning the position that ends up on top.
    ///
    /// A zig-zig shape rotates the parent once; a zig-zag shape rotates `p` twice. A position
    /// whose parent is the root is rotated once.
    pub fn restructure(&mut self, p: Position) -> Result<Position> {
        let id = self.validate(p)?;
        let top = self.restructure_node(id)
            .ok_or(Error::InvalidArgument("cannot restructure the root"))?;
        Ok(self.position(top))
    }

    pub(crate) fn shape_of(&self, x: NodeId) -> Option<Shape> {
        let y = self.parent_id(x)?;

        Some(match self.parent_id(y) {
            None => Shape::Zig,
            Some(_) if self.is_left_child(x) == self.is_left_child(y) => Shape::ZigZig,
            Some(_) => Shape::ZigZag,
        })
    }

    /// Rotates `x` above its parent. Does nothing to the root.
    pub(crate) fn rotate_node(&mut self, x: NodeId) {
        let y = match self.parent_id(x) {
            Some(y) => y,
            None => return,
        };
        let z = self.parent_id(y);

        trace!("rotating {:?} above {:?}", x, y);

        let tree = &mut self.tree;
        if tree.node(y).left == Some(x) {
            let middle = tree.node(x).right;
            tree.node_mut(y).left = middle;
            if let Some(middle) = middle { tree.node_mut(middle).parent = Some(y); }
            tree.node_mut(x).right = Some(y);
        } else {
            let middle = tree.node(x).left;
            tree.node_mut(y).right = middle;
            if let Some(middle) = middle { tree.node_mut(middle).parent = Some(y); }
            tree.node_mut(x).left = Some(y);
        }

        tree.node_mut(y).parent = Some(x);
        tree.node_mut(x).parent = z;

        match z {
            None => tree.root = Some(x),
            Some(z) =>
                if tree.node(z).left == Some(y) {
                    tree.node_mut(z).left = Some(x);
                } else {
                    tree.node_mut(z).right = Some(x);
                },
        }
    }

    /// Restructures `x` with its parent and grandparent, returning the new top node.
    pub(crate) fn restructure_node(&mut self, x: NodeId) -> Option<NodeId> {
        let shape = self.shape_of(x)?;
        trace!("restructuring {:?} ({:?})", x, shape);

        match shape {
            Shape::Zig => {
                self.rotate_node(x);
                Some(x)
            }
            Shape::ZigZig => {
                let y = self.parent_id(x)?;
                self.rotate_node(y);
                Some(y)
            }
            Shape::ZigZag => {
                self.rotate_node(x);
                self.rotate_node(x);
                Some(x)
            }
        }
    }
}

impl<E> Deref for BalanceableTree<E> {
    type Target = LinkedBinaryTree<E>;
    fn deref(&self) -> &LinkedBinaryTree<E> { &self.tree }
}

impl<E> DerefMut for BalanceableTree<E> {
    fn deref_mut(&mut self) -> &mut LinkedBinaryTree<E> { &mut self.tree }
}

impl<E> Clone for BalanceableTree<E> where E: Clone {
    fn clone(&self) -> Self { BalanceableTree { tree: self.tree.clone() } }
}

impl<E> Default for BalanceableTree<E> {
    fn default() -> Self { BalanceableTree::new() }
}

impl<E> Display for BalanceableTree<E> where E: Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { self.tree.fmt_named(f, "BalanceableTree") }
}
