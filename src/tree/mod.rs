//! A linked binary tree whose nodes live in an arena and are handed out as positions.
//!
//! Every node is addressed by its arena index. Parent and child links are indices too, so the
//! tree owns all of its nodes outright and no node ever holds a reference to another.
//!
//! A node without an element is a *sentinel leaf*. Search trees keep one in every empty child
//! slot so that rotations and splices never have to special-case a missing child. Sentinels are
//! never exposed: navigation methods report them as `None`, and they are skipped by every
//! traversal and by `len`.

mod balanceable;
mod iter;


pub use self::balanceable::{BalanceableTree, Shape};
pub use self::iter::{Children, InOrder, LevelOrder, PostOrder, PreOrder};

pub(crate) use self::iter::Walk;

use crate::error::{Error, Result};
use std::fmt::{self, Display};
use std::mem;
use std::sync::atomic::{self, AtomicU64};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

fn next_tree_id() -> u64 { NEXT_TREE_ID.fetch_add(1, atomic::Ordering::Relaxed) }

/// The arena index of a node, sentinel leaves included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize { self.0 as usize }
}

/// A place in a particular tree.
///
/// A position only grants read access to the element stored there; structural changes go
/// through the tree. Positions are checked on every use: one taken from another tree, or one
/// whose node has since been removed, is rejected with `Error::InvalidArgument`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    tree: u64,
    node: NodeId,
    generation: u32,
}

#[derive(Clone)]
struct Node<E> {
    element: Option<E>,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    aux: i32,
}

impl<E> Node<E> {
    fn new(element: Option<E>, parent: Option<NodeId>) -> Self {
        Node { element: element, parent: parent, left: None, right: None, aux: 0 }
    }
}

#[derive(Clone)]
struct Slot<E> {
    generation: u32,
    live: bool,
    node: Node<E>,
}

/// A binary tree of linked nodes.
///
/// # Examples
///
/// ```
/// use balanced_tree::tree::LinkedBinaryTree;
///
/// let mut tree = LinkedBinaryTree::new();
/// let one = tree.add_root("one").unwrap();
/// let two = tree.add_left(one, "two").unwrap();
/// let three = tree.add_right(one, "three").unwrap();
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.sibling(two).unwrap(), Some(three));
/// assert_eq!(tree.in_order().map(|p| *tree.element(p).unwrap()).collect::<Vec<_>>(),
///            ["two", "one", "three"]);
/// ```
pub struct LinkedBinaryTree<E> {
    id: u64,
    slots: Vec<Slot<E>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
}

impl<E> LinkedBinaryTree<E> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        LinkedBinaryTree { id: next_tree_id(), slots: vec![], free: vec![], root: None, len: 0 }
    }

    /// Returns the number of elements in the tree. Sentinel leaves are not counted.
    pub fn len(&self) -> usize { self.len }

    /// Checks if the tree holds no elements.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the root position, or `None` if the tree is empty.
    pub fn root(&self) -> Option<Position> { self.real(self.root).map(|id| self.position(id)) }

    /// Returns the parent of the given position, or `None` if it is the root.
    pub fn parent(&self, p: Position) -> Result<Option<Position>> {
        let id = self.validate(p)?;
        Ok(self.node(id).parent.map(|id| self.position(id)))
    }

    /// Returns the left child of the given position, if any.
    pub fn left(&self, p: Position) -> Result<Option<Position>> {
        let id = self.validate(p)?;
        Ok(self.real(self.node(id).left).map(|id| self.position(id)))
    }

    /// Returns the right child of the given position, if any.
    pub fn right(&self, p: Position) -> Result<Option<Position>> {
        let id = self.validate(p)?;
        Ok(self.real(self.node(id).right).map(|id| self.position(id)))
    }

    /// Returns the other child of the given position's parent, if any.
    pub fn sibling(&self, p: Position) -> Result<Option<Position>> {
        let id = self.validate(p)?;
        Ok(self.real(self.sibling_id(id)).map(|id| self.position(id)))
    }

    /// Returns an iterator over the children of the given position, left first.
    pub fn children(&self, p: Position) -> Result<Children> {
        Ok(Children::new(self.left(p)?, self.right(p)?))
    }

    /// Returns the number of children of the given position: 0, 1 or 2.
    pub fn num_children(&self, p: Position) -> Result<usize> { Ok(self.children(p)?.count()) }

    /// Checks if the given position has at least one child.
    pub fn is_internal(&self, p: Position) -> Result<bool> { Ok(self.num_children(p)? > 0) }

    /// Checks if the given position has no children.
    pub fn is_leaf(&self, p: Position) -> Result<bool> { Ok(self.num_children(p)? == 0) }

    /// Checks if the given position is the root of this tree.
    ///
    /// A position that does not belong to this tree is simply not its root.
    pub fn is_root(&self, p: Position) -> bool {
        self.validate(p).map_or(false, |id| Some(id) == self.root)
    }

    /// Returns a reference to the element at the given position.
    pub fn element(&self, p: Position) -> Result<&E> {
        let id = self.validate(p)?;
        self.element_of(id).ok_or(Error::InvalidArgument("position is a sentinel leaf"))
    }

    /// Returns a mutable reference to the element at the given position.
    pub fn element_mut(&mut self, p: Position) -> Result<&mut E> {
        let id = self.validate(p)?;
        self.element_of_mut(id).ok_or(Error::InvalidArgument("position is a sentinel leaf"))
    }

    /// Replaces the element at the given position, returning the old one.
    pub fn set(&mut self, p: Position, element: E) -> Result<E> {
        Ok(mem::replace(self.element_mut(p)?, element))
    }

    /// Places an element at the root of an empty tree.
    pub fn add_root(&mut self, element: E) -> Result<Position> {
        if self.len > 0 { return Err(Error::InvalidState("tree already has a root")); }
        if let Some(sentinel) = self.root.take() { self.release(sentinel); }
        let id = self.alloc(Some(element), None);
        self.root = Some(id);
        self.len += 1;
        Ok(self.position(id))
    }

    /// Adds an element as the left child of the given position.
    pub fn add_left(&mut self, p: Position, element: E) -> Result<Position> {
        let parent = self.validate(p)?;
        let id = self.attach(parent, self.node(parent).left, element)?;
        self.node_mut(parent).left = Some(id);
        Ok(self.position(id))
    }

    /// Adds an element as the right child of the given position.
    pub fn add_right(&mut self, p: Position, element: E) -> Result<Position> {
        let parent = self.validate(p)?;
        let id = self.attach(parent, self.node(parent).right, element)?;
        self.node_mut(parent).right = Some(id);
        Ok(self.position(id))
    }

    /// Removes the element at the given position and returns it.
    ///
    /// The position's only child, if it has one, takes its place under the former parent. A
    /// position with two children cannot be removed.
    pub fn remove(&mut self, p: Position) -> Result<E> {
        let id = self.validate(p)?;
        if self.real(self.node(id).left).is_some() && self.real(self.node(id).right).is_some() {
            return Err(Error::InvalidArgument("position has two children"));
        }
        self.splice(id)
            .map(|(element, _)| element)
            .ok_or(Error::InvalidArgument("position is a sentinel leaf"))
    }

    /// Returns an iterator over the tree's positions in pre-order.
    pub fn pre_order(&self) -> PreOrder<E> { PreOrder::new(self) }

    /// Returns an iterator over the tree's positions in in-order.
    pub fn in_order(&self) -> InOrder<E> { InOrder::new(self) }

    /// Returns an iterator over the tree's positions in post-order.
    pub fn post_order(&self) -> PostOrder<E> { PostOrder::new(self) }

    /// Returns an iterator over the tree's positions level by level, left to right.
    pub fn level_order(&self) -> LevelOrder<E> { LevelOrder::new(self) }

    /// Removes every node, invalidating all outstanding positions.
    pub fn clear(&mut self) {
        for index in 0..self.slots.len() {
            if self.slots[index].live { self.release(NodeId(index as u32)); }
        }
        self.root = None;
        self.len = 0;
    }

    fn attach(&mut self, parent: NodeId, slot: Option<NodeId>, element: E) -> Result<NodeId> {
        match slot {
            Some(child) if !self.is_sentinel(child) =>
                return Err(Error::InvalidArgument("position already has a child on that side")),
            Some(sentinel) => { self.release(sentinel); }
            None => {}
        }

        self.len += 1;
        Ok(self.alloc(Some(element), Some(parent)))
    }

    fn alloc(&mut self, element: Option<E>, parent: Option<NodeId>) -> NodeId {
        let node = Node::new(element, parent);

        match self.free.pop() {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                slot.node = node;
                slot.live = true;
                id
            }
            None => {
                let id = NodeId(self.slots.len() as u32);
                self.slots.push(Slot { generation: 0, live: true, node: node });
                id
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<E> {
        let slot = &mut self.slots[id.index()];
        slot.live = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id);
        mem::replace(&mut slot.node, Node::new(None, None)).element
    }

    fn node(&self, id: NodeId) -> &Node<E> { &self.slots[id.index()].node }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<E> { &mut self.slots[id.index()].node }

    fn real(&self, id: Option<NodeId>) -> Option<NodeId> {
        id.filter(|&id| !self.is_sentinel(id))
    }

    fn position(&self, id: NodeId) -> Position {
        Position { tree: self.id, node: id, generation: self.slots[id.index()].generation }
    }

    pub(crate) fn validate(&self, p: Position) -> Result<NodeId> {
        if p.tree != self.id {
            return Err(Error::InvalidArgument("position does not belong to this tree"));
        }

        match self.slots.get(p.node.index()) {
            Some(slot) if slot.live && slot.generation == p.generation && slot.node.element.is_some()
                => Ok(p.node),
            _ => Err(Error::InvalidArgument("position is no longer in the tree")),
        }
    }

    pub(crate) fn root_id(&self) -> Option<NodeId> { self.root }

    pub(crate) fn parent_id(&self, id: NodeId) -> Option<NodeId> { self.node(id).parent }

    pub(crate) fn left_id(&self, id: NodeId) -> Option<NodeId> { self.node(id).left }

    pub(crate) fn right_id(&self, id: NodeId) -> Option<NodeId> { self.node(id).right }

    pub(crate) fn real_left(&self, id: NodeId) -> Option<NodeId> { self.real(self.node(id).left) }

    pub(crate) fn real_right(&self, id: NodeId) -> Option<NodeId> { self.real(self.node(id).right) }

    pub(crate) fn sibling_id(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(self.node(id).parent?);
        if parent.left == Some(id) { parent.right } else { parent.left }
    }

    pub(crate) fn is_left_child(&self, id: NodeId) -> bool {
        self.node(id).parent.map_or(false, |parent| self.node(parent).left == Some(id))
    }

    pub(crate) fn is_sentinel(&self, id: NodeId) -> bool { self.node(id).element.is_none() }

    pub(crate) fn element_of(&self, id: NodeId) -> Option<&E> { self.node(id).element.as_ref() }

    pub(crate) fn element_of_mut(&mut self, id: NodeId) -> Option<&mut E> {
        self.node_mut(id).element.as_mut()
    }

    pub(crate) fn aux_of(&self, id: NodeId) -> i32 { self.node(id).aux }

    pub(crate) fn set_aux_of(&mut self, id: NodeId, aux: i32) { self.node_mut(id).aux = aux; }

    /// Installs a sentinel leaf as the root of an empty tree and returns it.
    pub(crate) fn add_sentinel_root(&mut self) -> NodeId {
        match self.root {
            Some(root) => root,
            None => {
                let id = self.alloc(None, None);
                self.root = Some(id);
                id
            }
        }
    }

    /// Turns a sentinel leaf into a node holding `element` with two fresh sentinel children.
    pub(crate) fn expand(&mut self, id: NodeId, element: E) {
        let left = self.alloc(None, Some(id));
        let right = self.alloc(None, Some(id));
        let node = self.node_mut(id);
        node.element = Some(element);
        node.left = Some(left);
        node.right = Some(right);
        node.aux = 0;
        self.len += 1;
    }

    pub(crate) fn swap_elements(&mut self, a: NodeId, b: NodeId) {
        let element = self.node_mut(a).element.take();
        let element = mem::replace(&mut self.node_mut(b).element, element);
        self.node_mut(a).element = element;
    }

    /// Unlinks a node that has at most one non-sentinel child.
    ///
    /// The surviving child (the non-sentinel one, else the right slot) moves up into the node's
    /// place; the other slot, necessarily empty or a sentinel, is discarded. Returns the removed
    /// element together with the node that now occupies the vacated slot.
    pub(crate) fn splice(&mut self, id: NodeId) -> Option<(E, Option<NodeId>)> {
        let (left, right, parent) = {
            let node = self.node(id);
            (node.left, node.right, node.parent)
        };

        let (keep, drop) = match self.real(left) {
            Some(left) => (Some(left), right),
            None => (right, left),
        };

        if let Some(drop) = drop { self.release(drop); }
        if let Some(keep) = keep { self.node_mut(keep).parent = parent; }

        match parent {
            None => self.root = keep,
            Some(parent) =>
                if self.node(parent).left == Some(id) {
                    self.node_mut(parent).left = keep;
                } else {
                    self.node_mut(parent).right = keep;
                },
        }

        let element = self.release(id)?;
        self.len -= 1;
        Some((element, keep))
    }

    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.real_left(id) { id = left; }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.real_right(id) { id = right; }
        id
    }

    /// Moves every element out of the tree in in-order, leaving it empty.
    pub(crate) fn drain_in_order(&mut self) -> Vec<E> {
        let order: Vec<NodeId> = Walk::new(self).collect();
        let elements = order.into_iter()
            .filter_map(|id| self.node_mut(id).element.take())
            .collect();
        self.clear();
        elements
    }

    fn fmt_named(&self, f: &mut fmt::Formatter, name: &str) -> fmt::Result where E: Display {
        writeln!(f, "{}[", name)?;

        let mut stack: Vec<(NodeId, usize)> = self.real(self.root).into_iter().map(|id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            if let Some(element) = self.element_of(id) {
                writeln!(f, "{:width$}{}", "", element, width = depth)?;
            }
            for child in [self.real_right(id), self.real_left(id)].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        write!(f, "]")
    }
}

impl<E> Clone for LinkedBinaryTree<E> where E: Clone {
    /// Copies the tree under a new identity: positions of the original are not valid in the copy.
    fn clone(&self) -> Self {
        LinkedBinaryTree {
            id: next_tree_id(),
            slots: self.slots.clone(),
            free: self.free.clone(),
            root: self.root,
            len: self.len,
        }
    }
}

impl<E> Default for LinkedBinaryTree<E> {
    fn default() -> Self { LinkedBinaryTree::new() }
}

impl<E> Display for LinkedBinaryTree<E> where E: Display {
    /// Renders the tree as its elements in pre-order, each indented by its depth.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { self.fmt_named(f, "LinkedBinaryTree") }
}
