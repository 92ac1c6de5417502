#![feature(test)]

extern crate test;

use balanced_tree::{AvlMap, RedBlackMap, SearchTreeMap, SplayMap};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use test::{Bencher, black_box};

fn rng() -> StdRng { StdRng::seed_from_u64(0x5eed) }

macro_rules! map_insert_rand_bench {
    ($name: ident, $map: ident, $n: expr) => (
        #[bench]
        pub fn $name(b: &mut Bencher) {
            let n: usize = $n;
            let mut map = $map::new();
            // setup
            let mut rng = rng();

            for _ in 0..n {
                let i = rng.gen_range(0..n);
                map.insert(i, i);
            }

            // measure
            b.iter(|| {
                let k = rng.gen_range(0..n);
                map.insert(k, k);
                map.remove(&k);
            });
            black_box(map);
        }
    )
}

macro_rules! map_insert_seq_bench {
    ($name: ident, $map: ident, $n: expr) => (
        #[bench]
        pub fn $name(b: &mut Bencher) {
            let mut map = $map::new();
            let n: usize = $n;
            // setup
            for i in 0..n {
                map.insert(i * 2, i * 2);
            }

            // measure
            let mut i = 1;
            b.iter(|| {
                map.insert(i, i);
                map.remove(&i);
                i = (i + 2) % n;
            });
            black_box(map);
        }
    )
}

macro_rules! map_find_rand_bench {
    ($name: ident, $map: ident, $n: expr) => (
        #[bench]
        pub fn $name(b: &mut Bencher) {
            let mut map = $map::new();
            let n: usize = $n;

            // setup
            let mut rng = rng();
            let mut keys: Vec<_> = (0..n).map(|_| rng.gen_range(0..n)).collect();

            for &k in &keys {
                map.insert(k, k);
            }

            keys.shuffle(&mut rng);

            // measure
            let mut i = 0;
            b.iter(|| {
                let t = map.get(&keys[i]).cloned();
                i = (i + 1) % n;
                black_box(t);
            })
        }
    )
}

macro_rules! map_find_seq_bench {
    ($name: ident, $map: ident, $n: expr) => (
        #[bench]
        pub fn $name(b: &mut Bencher) {
            let mut map = $map::new();
            let n: usize = $n;

            // setup
            for i in 0..n {
                map.insert(i, i);
            }

            // measure
            let mut i = 0;
            b.iter(|| {
                let x = map.get(&i).cloned();
                i = (i + 1) % n;
                black_box(x);
            })
        }
    )
}

macro_rules! map_iter_bench {
    ($name: ident, $map: ident, $n: expr) => (
        #[bench]
        pub fn $name(b: &mut Bencher) {
            let mut map = $map::<u32, u32>::new();
            let n: usize = $n;
            let mut rng = rng();

            for _ in 0..n {
                map.insert(rng.gen(), rng.gen());
            }

            b.iter(|| {
                for entry in map.iter() {
                    black_box(entry);
                }
            });
        }
    )
}

mod unbalanced {
    use super::*;

    map_insert_rand_bench!{insert_rand_100,    SearchTreeMap, 100}
    map_insert_rand_bench!{insert_rand_10_000, SearchTreeMap, 10_000}

    map_find_rand_bench!{find_rand_100,    SearchTreeMap, 100}
    map_find_rand_bench!{find_rand_10_000, SearchTreeMap, 10_000}

    map_iter_bench!{iter_1000, SearchTreeMap, 1000}
}

mod avl {
    use super::*;

    map_insert_rand_bench!{insert_rand_100,    AvlMap, 100}
    map_insert_rand_bench!{insert_rand_10_000, AvlMap, 10_000}

    map_insert_seq_bench!{insert_seq_100,    AvlMap, 100}
    map_insert_seq_bench!{insert_seq_10_000, AvlMap, 10_000}

    map_find_rand_bench!{find_rand_100,    AvlMap, 100}
    map_find_rand_bench!{find_rand_10_000, AvlMap, 10_000}

    map_find_seq_bench!{find_seq_100,    AvlMap, 100}
    map_find_seq_bench!{find_seq_10_000, AvlMap, 10_000}

    map_iter_bench!{iter_100,     AvlMap, 100}
    map_iter_bench!{iter_1000,    AvlMap, 1000}
    map_iter_bench!{iter_100_000, AvlMap, 100_000}
}

mod red_black {
    use super::*;

    map_insert_rand_bench!{insert_rand_100,    RedBlackMap, 100}
    map_insert_rand_bench!{insert_rand_10_000, RedBlackMap, 10_000}

    map_insert_seq_bench!{insert_seq_100,    RedBlackMap, 100}
    map_insert_seq_bench!{insert_seq_10_000, RedBlackMap, 10_000}

    map_find_rand_bench!{find_rand_100,    RedBlackMap, 100}
    map_find_rand_bench!{find_rand_10_000, RedBlackMap, 10_000}

    map_find_seq_bench!{find_seq_100,    RedBlackMap, 100}
    map_find_seq_bench!{find_seq_10_000, RedBlackMap, 10_000}

    map_iter_bench!{iter_1000, RedBlackMap, 1000}
}

mod splay {
    use super::*;

    map_insert_rand_bench!{insert_rand_100,    SplayMap, 100}
    map_insert_rand_bench!{insert_rand_10_000, SplayMap, 10_000}

    map_insert_seq_bench!{insert_seq_100,    SplayMap, 100}
    map_insert_seq_bench!{insert_seq_10_000, SplayMap, 10_000}

    map_find_rand_bench!{find_rand_100,    SplayMap, 100}
    map_find_rand_bench!{find_rand_10_000, SplayMap, 10_000}

    map_find_seq_bench!{find_seq_100,    SplayMap, 100}
    map_find_seq_bench!{find_seq_10_000, SplayMap, 10_000}

    map_iter_bench!{iter_1000, SplayMap, 1000}
}
