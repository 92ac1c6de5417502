use std::array;
use std::collections::VecDeque;
use std::iter::Flatten;
use self::visit::{Seen, Visit};
use super::{LinkedBinaryTree, NodeId, Position};

/// A double-ended in-order walk over the non-sentinel nodes of a tree.
pub(crate) struct Walk<'a, E: 'a> {
    tree: &'a LinkedBinaryTree<E>,
    visits: VecDeque<Visit>,
    size: usize,
}

impl<'a, E> Clone for Walk<'a, E> {
    fn clone(&self) -> Self { Walk { tree: self.tree, visits: self.visits.clone(), size: self.size } }
}

impl<'a, E> Walk<'a, E> {
    pub fn new(tree: &'a LinkedBinaryTree<E>) -> Self {
        let visits = tree.real(tree.root).into_iter().map(Visit::new).collect();
        Walk { tree: tree, visits: visits, size: tree.len() }
    }

    pub fn tree(&self) -> &'a LinkedBinaryTree<E> { self.tree }
}

impl<'a, E> Iterator for Walk<'a, E> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let tree = self.tree;

        loop {
            let op = match self.visits.back_mut() {
                None => return None,
                Some(visit) => match visit.seen() {
                    Seen::N | Seen::R => Op::Push(visit.left(tree)),
                    Seen::L => Op::PopPush(visit.right(tree)),
                    Seen::B => Op::Pop,
                }
            };

            match op {
                Op::Push(node) =>
                    if let Some(node) = node { self.visits.push_back(Visit::new(node)); },
                Op::PopPush(node) => {
                    self.size -= 1;
                    let visit = self.visits.pop_back();
                    if let Some(node) = node { self.visits.push_back(Visit::new(node)); }
                    return visit.map(Visit::node);
                }
                Op::Pop => {
                    self.size -= 1;
                    return self.visits.pop_back().map(Visit::node);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<'a, E> DoubleEndedIterator for Walk<'a, E> {
    fn next_back(&mut self) -> Option<NodeId> {
        let tree = self.tree;

        loop {
            let op = match self.visits.front_mut() {
                None => return None,
                Some(visit) => match visit.seen() {
                    Seen::N | Seen::L => Op::Push(visit.right(tree)),
                    Seen::R => Op::PopPush(visit.left(tree)),
                    Seen::B => Op::Pop,
                }
            };

            match op {
                Op::Push(node) =>
                    if let Some(node) = node { self.visits.push_front(Visit::new(node)); },
                Op::PopPush(node) => {
                    self.size -= 1;
                    let visit = self.visits.pop_front();
                    if let Some(node) = node { self.visits.push_front(Visit::new(node)); }
                    return visit.map(Visit::node);
                }
                Op::Pop => {
                    self.size -= 1;
                    return self.visits.pop_front().map(Visit::node);
                }
            }
        }
    }
}

impl<'a, E> ExactSizeIterator for Walk<'a, E> {}

mod visit {
    use super::super::{LinkedBinaryTree, NodeId};

    #[derive(Clone)]
    pub struct Visit {
        node: NodeId,
        seen: Seen,
    }

    impl Visit {
        pub fn new(node: NodeId) -> Visit { Visit { node: node, seen: Seen::N } }

        pub fn left<E>(&mut self, tree: &LinkedBinaryTree<E>) -> Option<NodeId> {
            match self.seen {
                Seen::N => { self.seen = Seen::L; tree.real_left(self.node) }
                Seen::R => { self.seen = Seen::B; tree.real_left(self.node) }
                Seen::L | Seen::B => None,
            }
        }

        pub fn right<E>(&mut self, tree: &LinkedBinaryTree<E>) -> Option<NodeId> {
            match self.seen {
                Seen::N => { self.seen = Seen::R; tree.real_right(self.node) }
                Seen::L => { self.seen = Seen::B; tree.real_right(self.node) }
                Seen::R | Seen::B => None,
            }
        }

        pub fn node(self) -> NodeId { self.node }

        pub fn seen(&self) -> Seen { self.seen }
    }

    #[derive(Clone, Copy)]
    pub enum Seen {
        N,
        L,
        R,
        B,
    }
}

enum Op<T> {
    Push(Option<T>),
    PopPush(Option<T>),
    Pop,
}

/// An iterator over a tree's positions in in-order.
///
/// Acquire through [`LinkedBinaryTree::in_order`](struct.LinkedBinaryTree.html#method.in_order).
pub struct InOrder<'a, E: 'a>(Walk<'a, E>);

impl<'a, E> InOrder<'a, E> {
    pub(super) fn new(tree: &'a LinkedBinaryTree<E>) -> Self { InOrder(Walk::new(tree)) }
}

impl<'a, E> Clone for InOrder<'a, E> {
    fn clone(&self) -> Self { InOrder(self.0.clone()) }
}

impl<'a, E> Iterator for InOrder<'a, E> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let tree = self.0.tree();
        self.0.next().map(|id| tree.position(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, E> DoubleEndedIterator for InOrder<'a, E> {
    fn next_back(&mut self) -> Option<Position> {
        let tree = self.0.tree();
        self.0.next_back().map(|id| tree.position(id))
    }
}

impl<'a, E> ExactSizeIterator for InOrder<'a, E> {}

/// An iterator over a tree's positions in pre-order.
///
/// Acquire through [`LinkedBinaryTree::pre_order`](struct.LinkedBinaryTree.html#method.pre_order).
pub struct PreOrder<'a, E: 'a> {
    tree: &'a LinkedBinaryTree<E>,
    stack: Vec<NodeId>,
}

impl<'a, E> PreOrder<'a, E> {
    pub(super) fn new(tree: &'a LinkedBinaryTree<E>) -> Self {
        PreOrder { tree: tree, stack: tree.real(tree.root).into_iter().collect() }
    }
}

impl<'a, E> Iterator for PreOrder<'a, E> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.real_right(id));
        self.stack.extend(self.tree.real_left(id));
        Some(self.tree.position(id))
    }
}

/// An iterator over a tree's positions in post-order.
///
/// Acquire through [`LinkedBinaryTree::post_order`](struct.LinkedBinaryTree.html#method.post_order).
pub struct PostOrder<'a, E: 'a> {
    tree: &'a LinkedBinaryTree<E>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, E> PostOrder<'a, E> {
    pub(super) fn new(tree: &'a LinkedBinaryTree<E>) -> Self {
        let stack = tree.real(tree.root).into_iter().map(|id| (id, false)).collect();
        PostOrder { tree: tree, stack: stack }
    }
}

impl<'a, E> Iterator for PostOrder<'a, E> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        loop {
            let (id, expanded) = self.stack.pop()?;
            if expanded { return Some(self.tree.position(id)); }

            self.stack.push((id, true));
            self.stack.extend(self.tree.real_right(id).map(|id| (id, false)));
            self.stack.extend(self.tree.real_left(id).map(|id| (id, false)));
        }
    }
}

/// An iterator over a tree's positions level by level.
///
/// Acquire through [`LinkedBinaryTree::level_order`](struct.LinkedBinaryTree.html#method.level_order).
pub struct LevelOrder<'a, E: 'a> {
    tree: &'a LinkedBinaryTree<E>,
    queue: VecDeque<NodeId>,
}

impl<'a, E> LevelOrder<'a, E> {
    pub(super) fn new(tree: &'a LinkedBinaryTree<E>) -> Self {
        LevelOrder { tree: tree, queue: tree.real(tree.root).into_iter().collect() }
    }
}

impl<'a, E> Iterator for LevelOrder<'a, E> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let id = self.queue.pop_front()?;
        self.queue.extend(self.tree.real_left(id));
        self.queue.extend(self.tree.real_right(id));
        Some(self.tree.position(id))
    }
}

/// An iterator over the children of a position.
///
/// Acquire through [`LinkedBinaryTree::children`](struct.LinkedBinaryTree.html#method.children).
#[derive(Clone)]
pub struct Children(Flatten<array::IntoIter<Option<Position>, 2>>);

impl Children {
    pub(super) fn new(left: Option<Position>, right: Option<Position>) -> Self {
        Children([left, right].into_iter().flatten())
    }
}

impl Iterator for Children {
    type Item = Position;
    fn next(&mut self) -> Option<Position> { self.0.next() }
}
