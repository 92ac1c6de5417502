use ::ordered_iter::{OrderedMapIterator, OrderedSetIterator};
use crate::map;

impl<K, V> OrderedMapIterator for map::IntoIter<K, V> where K: Ord {
    type Key = K;
    type Val = V;
}

impl<'a, K, V> OrderedMapIterator for map::Iter<'a, K, V> where K: Ord {
    type Key = &'a K;
    type Val = &'a V;
}

impl<'a, K, V> OrderedSetIterator for map::Keys<'a, K, V> where K: Ord {}
