//! An ordered map based on a binary search tree.


use compare::{Compare, Natural};
use crate::balance::{Avl, Balance, RedBlack, Splay, Unbalanced};
use crate::error::Result;
use crate::tree::{BalanceableTree, NodeId, Position, Walk};
use std::cmp::Ordering::*;
use std::fmt::{self, Debug, Display};
use std::hash::{self, Hash};
use std::iter;
use std::marker::PhantomData;
use std::mem;
use std::ops;
use std::vec;

/// A map that never rebalances its tree.
pub type SearchTreeMap<K, V, C = Natural<K>> = Map<K, V, C, Unbalanced>;

/// A map kept height-balanced by AVL rotations.
pub type AvlMap<K, V, C = Natural<K>> = Map<K, V, C, Avl>;

/// A map kept balanced by red-black colouring.
pub type RedBlackMap<K, V, C = Natural<K>> = Map<K, V, C, RedBlack>;

/// A map that splays every entry it touches to the root.
pub type SplayMap<K, V, C = Natural<K>> = Map<K, V, C, Splay>;

/// A key and its value, as stored in the tree.
///
/// The key never changes once the entry is in a map; the value may be overwritten in place.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K { &self.key }

    /// Returns a reference to the entry's value.
    pub fn value(&self) -> &V { &self.value }
}

impl<K, V> Display for Entry<K, V> where K: Display, V: Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}={}", self.key, self.value) }
}

/// An ordered map based on a binary search tree.
///
/// The map itself only searches, inserts and removes. After every lookup hit, insertion and
/// removal it hands the affected node to its `B` parameter, which restores whatever shape
/// invariant it maintains:
///
/// - [`Unbalanced`](../balance/struct.Unbalanced.html) does nothing,
/// - [`Avl`](../balance/struct.Avl.html) keeps sibling subtree heights within one,
/// - [`RedBlack`](../balance/struct.RedBlack.html) keeps red-black colour invariants,
/// - [`Splay`](../balance/struct.Splay.html) moves the touched node to the root.
///
/// Because a splay tree restructures on reads, [`get`](#method.get) takes `&mut self`.
/// [`peek`](#method.peek) reads without notifying the balance strategy.
///
/// The behavior of this map is undefined if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct Map<K, V, C = Natural<K>, B = Unbalanced> where C: Compare<K>, B: Balance {
    tree: BalanceableTree<Entry<K, V>>,
    cmp: C,
    balance: PhantomData<B>,
}

impl<K, V, B> Map<K, V, Natural<K>, B> where K: Ord, B: Balance {
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Map::with_cmp(compare::natural()) }
}

impl<K, V, C, B> Map<K, V, C, B> where C: Compare<K>, B: Balance {
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::RedBlackMap;
    /// use compare::{Compare, natural};
    ///
    /// let mut map = RedBlackMap::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Map { tree: BalanceableTree::new(), cmp: cmp, balance: PhantomData }
    }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool { self.tree.is_empty() }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize { self.tree.len() }

    /// Returns a reference to the map's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all entries from the map. Every position handed out so far becomes invalid.
    pub fn clear(&mut self) { self.tree.clear(); }

    /// Inserts an entry into the map, returning the previous value, if any, associated
    /// with the key.
    ///
    /// An existing key keeps its node and only has its value replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let leaf = match self.search(&key) {
            Some(Ok(node)) => {
                let old_value = self.tree.element_of_mut(node)
                    .map(|e| mem::replace(&mut e.value, value));
                B::on_access(&mut self.tree, node);
                return old_value;
            }
            Some(Err(leaf)) => leaf,
            None => self.tree.add_sentinel_root(),
        };

        self.tree.expand(leaf, Entry { key: key, value: value });
        B::on_insert(&mut self.tree, leaf);
        None
    }

    /// Removes the given key from the map, returning its value, or `None` if the map does not
    /// contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.peek(&1), None);
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V> where C: Compare<Q, K> {
        self.remove_entry(key).map(|e| e.1)
    }

    /// Removes and returns the entry whose key is equal to the given key, returning
    /// `None` if the map does not contain the key.
    ///
    /// A node with two children is not unlinked itself: it takes over the entry of its in-order
    /// successor, whose node is unlinked instead.
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)> where C: Compare<Q, K> {
        let mut node = match self.search(key) {
            Some(Ok(node)) => node,
            _ => return None,
        };

        if let (Some(_), Some(right)) = (self.tree.real_left(node), self.tree.real_right(node)) {
            let successor = self.tree.leftmost(right);
            self.tree.swap_elements(node, successor);
            node = successor;
        }

        let removed = self.tree.aux_of(node);
        let (entry, replacement) = self.tree.splice(node)?;
        if let Some(replacement) = replacement { B::on_delete(&mut self.tree, replacement, removed); }
        Some((entry.key, entry.value))
    }

    /// Checks if the map contains the given key. The balance strategy is not consulted.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        matches!(self.search(key), Some(Ok(_)))
    }

    /// Returns a reference to the value associated with the given key, or `None` if the
    /// map does not contain the key.
    ///
    /// A hit counts as an access: a splay map moves the entry to the root. A miss leaves the
    /// tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.key(map.root().unwrap()), Ok(&1));
    /// assert_eq!(map.get(&3), None);
    /// ```
    pub fn get<Q: ?Sized>(&mut self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        let node = self.access(key)?;
        self.tree.element_of(node).map(|e| &e.value)
    }

    /// Returns a mutable reference to the value associated with the given key, or `None`
    /// if the map does not contain the key.
    ///
    /// Like [`get`](#method.get), a hit counts as an access.
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        let node = self.access(key)?;
        self.tree.element_of_mut(node).map(|e| &mut e.value)
    }

    /// Returns a reference to the value associated with the given key without counting as an
    /// access, so the tree never changes shape.
    pub fn peek<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        match self.search(key) {
            Some(Ok(node)) => self.tree.element_of(node).map(|e| &e.value),
            _ => None,
        }
    }

    /// Returns a reference to the map's minimum key and a reference to its associated
    /// value, or `None` if the map is empty.
    pub fn min(&self) -> Option<(&K, &V)> {
        let root = self.root_node()?;
        self.tree.element_of(self.tree.leftmost(root)).map(|e| (&e.key, &e.value))
    }

    /// Returns a reference to the map's maximum key and a reference to its associated
    /// value, or `None` if the map is empty.
    pub fn max(&self) -> Option<(&K, &V)> {
        let root = self.root_node()?;
        self.tree.element_of(self.tree.rightmost(root)).map(|e| (&e.key, &e.value))
    }

    /// Returns an iterator over the map's entries with immutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &"a"), (&2, &"b"), (&3, &"c")]);
    /// assert_eq!(map.iter().rev().next(), Some((&3, &"c")));
    /// ```
    pub fn iter(&self) -> Iter<K, V> { Iter(Walk::new(&self.tree)) }

    /// Returns an iterator over the map's keys in ascending order.
    pub fn keys(&self) -> Keys<K, V> { Keys(self.iter()) }

    /// Returns an iterator over the map's values in ascending order of their keys.
    pub fn values(&self) -> Values<K, V> { Values(self.iter()) }

    /// Returns an iterator that consumes the map, yielding entries in ascending order.
    pub fn into_iter(mut self) -> IntoIter<K, V> {
        let entries = self.tree.drain_in_order().into_iter().map(|e| (e.key, e.value));
        IntoIter(entries.collect::<Vec<_>>().into_iter())
    }

    /// Returns the position of the root entry, or `None` if the map is empty.
    pub fn root(&self) -> Option<Position> { self.tree.root() }

    /// Returns the position of the given position's parent, or `None` at the root.
    pub fn parent(&self, p: Position) -> Result<Option<Position>> { self.tree.parent(p) }

    /// Returns the position of the given position's left child, if any.
    pub fn left(&self, p: Position) -> Result<Option<Position>> { self.tree.left(p) }

    /// Returns the position of the given position's right child, if any.
    pub fn right(&self, p: Position) -> Result<Option<Position>> { self.tree.right(p) }

    /// Returns the entry stored at the given position.
    pub fn entry_at(&self, p: Position) -> Result<&Entry<K, V>> { self.tree.element(p) }

    /// Returns the key stored at the given position.
    pub fn key(&self, p: Position) -> Result<&K> { self.entry_at(p).map(Entry::key) }

    /// Returns the value stored at the given position.
    pub fn value(&self, p: Position) -> Result<&V> { self.entry_at(p).map(Entry::value) }

    /// Returns a read-only view of the underlying tree.
    pub fn tree(&self) -> &BalanceableTree<Entry<K, V>> { &self.tree }

    fn root_node(&self) -> Option<NodeId> {
        self.tree.root_id().filter(|&root| !self.tree.is_sentinel(root))
    }

    /// Binary-searches for `key`, returning `Ok` with the matching node or `Err` with the sentinel
    /// leaf where it would be inserted. `None` means the tree has no root at all.
    fn search<Q: ?Sized>(&self, key: &Q) -> Option<::std::result::Result<NodeId, NodeId>>
        where C: Compare<Q, K> {

        let mut node = self.tree.root_id()?;

        loop {
            let entry = match self.tree.element_of(node) {
                Some(entry) => entry,
                None => return Some(Err(node)),
            };

            node = match self.cmp.compare(key, &entry.key) {
                Equal => return Some(Ok(node)),
                Less => self.tree.left_id(node)?,
                Greater => self.tree.right_id(node)?,
            };
        }
    }

    fn access<Q: ?Sized>(&mut self, key: &Q) -> Option<NodeId> where C: Compare<Q, K> {
        match self.search(key) {
            Some(Ok(node)) => {
                B::on_access(&mut self.tree, node);
                Some(node)
            }
            _ => None,
        }
    }
}

impl<K, V, C, B> Debug for Map<K, V, C, B>
    where K: Debug, V: Debug, C: Compare<K>, B: Balance {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, B> Default for Map<K, V, C, B> where C: Compare<K> + Default, B: Balance {
    fn default() -> Self { Map::with_cmp(Default::default()) }
}

impl<K, V, C, B> Extend<(K, V)> for Map<K, V, C, B> where C: Compare<K>, B: Balance {
    fn extend<I: IntoIterator<Item=(K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V, C, B> iter::FromIterator<(K, V)> for Map<K, V, C, B>
    where C: Compare<K> + Default, B: Balance {

    fn from_iter<I: IntoIterator<Item=(K, V)>>(it: I) -> Self {
        let mut map: Self = Default::default();
        map.extend(it);
        map
    }
}

impl<K, V, C, B> Hash for Map<K, V, C, B> where K: Hash, V: Hash, C: Compare<K>, B: Balance {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        for e in self.iter() { e.hash(h); }
    }
}

impl<'a, K, V, C, B, Q: ?Sized> ops::Index<&'a Q> for Map<K, V, C, B>
    where C: Compare<K> + Compare<Q, K>, B: Balance {

    type Output = V;
    fn index(&self, key: &Q) -> &V { self.peek(key).expect("key not found") }
}

impl<'a, K, V, C, B> IntoIterator for &'a Map<K, V, C, B> where C: Compare<K>, B: Balance {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<K, V, C, B> IntoIterator for Map<K, V, C, B> where C: Compare<K>, B: Balance {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { self.into_iter() }
}

impl<K, V, C, B> PartialEq for Map<K, V, C, B> where V: PartialEq, C: Compare<K>, B: Balance {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(l, r)| {
            self.cmp.compares_eq(l.0, r.0) && l.1 == r.1
        })
    }
}

impl<K, V, C, B> Eq for Map<K, V, C, B> where V: Eq, C: Compare<K>, B: Balance {}

/// An iterator that consumes the map.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// Acquire through [`Map::into_iter`](struct.Map.html#method.into_iter) or the
/// `IntoIterator` trait.
#[derive(Clone)]
pub struct IntoIter<K, V>(vec::IntoIter<(K, V)>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back() }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An iterator over the map's entries with immutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// Acquire through [`Map::iter`](struct.Map.html#method.iter) or the `IntoIterator` trait.
pub struct Iter<'a, K: 'a, V: 'a>(Walk<'a, Entry<K, V>>);

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> { Iter(self.0.clone()) }
}

impl<'a, K, V> Iter<'a, K, V> {
    fn item(&self, node: NodeId) -> Option<(&'a K, &'a V)> {
        self.0.tree().element_of(node).map(|e| (&e.key, &e.value))
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let node = self.0.next()?;
        self.item(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        let node = self.0.next_back()?;
        self.item(node)
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An iterator over the map's keys in ascending order.
///
/// Acquire through [`Map::keys`](struct.Map.html#method.keys).
#[derive(Clone)]
pub struct Keys<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> { self.0.next_back().map(|e| e.0) }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// An iterator over the map's values in ascending order of their keys.
///
/// Acquire through [`Map::values`](struct.Map.html#method.values).
#[derive(Clone)]
pub struct Values<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<&'a V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> { self.0.next_back().map(|e| e.1) }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}
