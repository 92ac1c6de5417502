use balanced_tree::{Balance, Map, Position};
use compare::Natural;
use quickcheck::{Arbitrary, Gen};

type TestMap<B> = Map<u32, u16, Natural<u32>, B>;

/// Checks that every key in the subtree at `p` lies strictly between `lo` and `hi`.
pub fn is_ordered<B: Balance>(map: &TestMap<B>, p: Option<Position>, lo: Option<u32>, hi: Option<u32>)
    -> bool {

    let p = match p {
        None => return true,
        Some(p) => p,
    };

    let key = *map.key(p).unwrap();
    lo.map_or(true, |lo| lo < key) && hi.map_or(true, |hi| key < hi) &&
        is_ordered(map, map.left(p).unwrap(), lo, Some(key)) &&
        is_ordered(map, map.right(p).unwrap(), Some(key), hi)
}

/// Checks that the map is a search tree whose node count agrees with its length.
pub fn is_search_tree<B: Balance>(map: &TestMap<B>) -> bool {
    is_ordered(map, map.root(), None, None) &&
        map.tree().pre_order().count() == map.len() &&
        map.iter().count() == map.len()
}

/// Returns the height of the subtree at `p` if it is AVL-balanced and every node records its
/// height.
pub fn avl_height<B: Balance>(map: &TestMap<B>, p: Option<Position>) -> Option<i32> {
    let p = match p {
        None => return Some(0),
        Some(p) => p,
    };

    let left = avl_height(map, map.left(p).unwrap())?;
    let right = avl_height(map, map.right(p).unwrap())?;
    let height = 1 + left.max(right);

    if (left - right).abs() <= 1 && map.tree().aux(p) == Ok(height) { Some(height) } else { None }
}

/// Returns the black height of the subtree at `p` if no red node has a red child and every path
/// to a leaf crosses the same number of black nodes.
pub fn black_height<B: Balance>(map: &TestMap<B>, p: Option<Position>) -> Option<usize> {
    let p = match p {
        None => return Some(1),
        Some(p) => p,
    };

    let red = map.tree().aux(p).unwrap() % 2 != 0;
    let left = map.left(p).unwrap();
    let right = map.right(p).unwrap();

    if red && [left, right].iter().flatten().any(|&c| map.tree().aux(c).unwrap() % 2 != 0) {
        return None;
    }

    let l = black_height(map, left)?;
    let r = black_height(map, right)?;
    if l != r { return None; }
    Some(l + if red { 0 } else { 1 })
}

pub fn is_red_black<B: Balance>(map: &TestMap<B>) -> bool {
    map.root().map_or(true, |root| map.tree().aux(root) == Ok(0)) &&
        black_height(map, map.root()).is_some()
}

/// A sequence of map operations to replay against a fresh map.
#[derive(Clone, Debug)]
pub enum Op {
    Insert(u32, u16),
    Get(u32),
    Remove(u32),
}

impl Arbitrary for Op {
    fn arbitrary(gen: &mut Gen) -> Self {
        // A small key space makes hits and overwrites common.
        let key = u32::arbitrary(gen) % 64;

        match u8::arbitrary(gen) % 3 {
            0 => Op::Get(key),
            1 => Op::Remove(key),
            _ => Op::Insert(key, u16::arbitrary(gen)),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> {
        match *self {
            Op::Insert(k, v) => Box::new((k, v).shrink().map(|(k, v)| Op::Insert(k, v))),
            Op::Get(k) => Box::new(k.shrink().map(Op::Get)),
            Op::Remove(k) => Box::new(k.shrink().map(Op::Remove)),
        }
    }
}

macro_rules! map_tests {
    ($B:ty, $invariant:expr) => {
        use balanced_tree::Map;
        use compare::Natural;
        use quickcheck::{TestResult, quickcheck};
        use std::collections::BTreeMap;
        use super::{Op, is_search_tree};

        type M = Map<u32, u16, Natural<u32>, $B>;

        fn holds(map: &M) -> bool { is_search_tree(map) && $invariant(map) }

        #[test]
        fn collected_map_holds_invariants() {
            fn test(map: M) -> bool { holds(&map) }
            quickcheck(test as fn(M) -> bool);
        }

        #[test]
        fn agrees_with_btree_map() {
            fn test(ops: Vec<Op>) -> bool {
                let mut map = M::default();
                let mut model = BTreeMap::new();

                ops.into_iter().all(|op| {
                    let agrees = match op {
                        Op::Insert(k, v) => map.insert(k, v) == model.insert(k, v),
                        Op::Get(k) => map.get(&k) == model.get(&k),
                        Op::Remove(k) => map.remove(&k) == model.remove(&k),
                    };

                    agrees && holds(&map) && map.len() == model.len() &&
                        map.iter().eq(model.iter())
                })
            }

            quickcheck(test as fn(Vec<Op>) -> bool);
        }

        #[test]
        fn insert_then_get() {
            fn test(mut map: M, key: u32, value: u16) -> bool {
                let old = map.peek(&key).cloned();
                let old_len = map.len();

                map.insert(key, value) == old &&
                    map.len() == old_len + if old.is_some() { 0 } else { 1 } &&
                    map.get(&key) == Some(&value) &&
                    holds(&map)
            }

            quickcheck(test as fn(M, u32, u16) -> bool);
        }

        #[test]
        fn remove_affects_no_others() {
            fn test(mut map: M, index: usize) -> TestResult {
                if map.is_empty() { return TestResult::discard(); }

                let old: Vec<(u32, u16)> = map.iter().map(|(&k, &v)| (k, v)).collect();
                let key = old[index % old.len()].0;

                TestResult::from_bool(
                    map.remove(&key).is_some() &&
                    !map.contains_key(&key) &&
                    map.peek(&key).is_none() &&
                    holds(&map) &&
                    map.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>() ==
                        old.into_iter().filter(|e| e.0 != key).collect::<Vec<_>>()
                )
            }

            quickcheck(test as fn(M, usize) -> TestResult);
        }

        #[test]
        fn remove_everything() {
            fn test(mut map: M) -> bool {
                let keys: Vec<u32> = map.keys().cloned().collect();

                keys.iter().all(|k| map.remove(k).is_some() && holds(&map)) &&
                    map.is_empty() && map.root().is_none()
            }

            quickcheck(test as fn(M) -> bool);
        }

        #[test]
        fn into_iter_agrees_with_iter() {
            fn test(map: M) -> bool {
                let borrowed: Vec<(u32, u16)> = map.iter().map(|(&k, &v)| (k, v)).collect();
                map.into_iter().collect::<Vec<_>>() == borrowed
            }

            quickcheck(test as fn(M) -> bool);
        }

        #[test]
        fn min_max_agree_with_iter() {
            fn test(map: M) -> bool {
                map.min() == map.iter().next() && map.max() == map.iter().next_back()
            }

            quickcheck(test as fn(M) -> bool);
        }
    }
}

mod unbalanced {
    map_tests!{balanced_tree::Unbalanced, |_: &M| true}
}

mod avl {
    map_tests!{balanced_tree::Avl, |map: &M| super::avl_height(map, map.root()).is_some()}

    #[test]
    fn height_is_logarithmic() {
        fn test(map: M) -> bool {
            let height = super::avl_height(&map, map.root()).unwrap_or(i32::MAX) as f64;
            height <= 1.45 * ((map.len() + 2) as f64).log2()
        }

        quickcheck(test as fn(M) -> bool);
    }
}

mod red_black {
    map_tests!{balanced_tree::RedBlack, |map: &M| super::is_red_black(map)}
}

mod splay {
    map_tests!{balanced_tree::Splay, |_: &M| true}

    #[test]
    fn touched_key_becomes_root() {
        fn test(mut map: M, key: u32, value: u16) -> bool {
            map.insert(key, value);
            let after_insert = map.key(map.root().unwrap()) == Ok(&key);

            let other = map.keys().next().cloned().unwrap();
            map.get(&other);
            after_insert && map.key(map.root().unwrap()) == Ok(&other)
        }

        quickcheck(test as fn(M, u32, u16) -> bool);
    }

    #[test]
    fn peek_and_misses_leave_shape_alone() {
        fn test(mut map: M, key: u32) -> bool {
            let before: Vec<_> = map.tree().pre_order().map(|p| *map.key(p).unwrap()).collect();

            map.peek(&key);
            if !map.contains_key(&key) { map.get(&key); }

            before == map.tree().pre_order().map(|p| *map.key(p).unwrap()).collect::<Vec<_>>()
        }

        quickcheck(test as fn(M, u32) -> bool);
    }
}

mod macros {
    use balanced_tree::{AvlMap, RedBlackMap};
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn avl_and_red_black_agree(entries: Vec<(u32, u16)>) -> bool {
        let avl: AvlMap<u32, u16> = entries.iter().cloned().collect();
        let red_black: RedBlackMap<u32, u16> = entries.into_iter().collect();
        avl.iter().eq(red_black.iter())
    }
}
