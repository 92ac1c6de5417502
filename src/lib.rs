//! An ordered map based on a self-balancing binary search tree.
//!
//! The tree is a [`LinkedBinaryTree`](tree/struct.LinkedBinaryTree.html) whose nodes live in an
//! arena and are exposed as [`Position`](tree/struct.Position.html)s. A
//! [`BalanceableTree`](tree/struct.BalanceableTree.html) adds one auxiliary integer per node
//! together with rotations, and a [`Map`](map/struct.Map.html) searches it by key. Which
//! rebalancing discipline the map follows is chosen by its `B` type parameter:
//!
//! ```
//! use balanced_tree::{AvlMap, RedBlackMap, SplayMap};
//!
//! let mut avl = AvlMap::new();
//! let mut red_black = RedBlackMap::new();
//! let mut splay = SplayMap::new();
//!
//! for i in 0..100 {
//!     avl.insert(i, i * 2);
//!     red_black.insert(i, i * 2);
//!     splay.insert(i, i * 2);
//! }
//!
//! assert_eq!(avl.peek(&21), Some(&42));
//! assert_eq!(red_black.remove(&21), Some(42));
//! assert_eq!(splay.get(&21), Some(&42));
//! assert_eq!(splay.key(splay.root().unwrap()), Ok(&21));
//! ```

pub mod balance;
pub mod error;
pub mod map;
pub mod tree;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;
#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use balance::{Avl, Balance, RedBlack, Splay, Unbalanced};
pub use error::{Error, Result};
pub use map::{AvlMap, Map, RedBlackMap, SearchTreeMap, SplayMap};
pub use tree::Position;
