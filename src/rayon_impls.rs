use crate::{ChainedHashMap, OpenHashMap};
use rayon::iter::{FromParallelIterator, IntoParallelIterator, ParallelExtend, ParallelIterator};
use std::hash::{BuildHasher, Hash};

// The tables are single-threaded, so the parallel side only produces the pairs. They are
// collected first and then inserted in the order rayon hands them back.

impl<K, V, S> ParallelExtend<(K, V)> for OpenHashMap<K, V, S>
where
    K: Hash + Eq + Send,
    V: Send,
    S: BuildHasher,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = par_iter.into_par_iter().collect();
        self.extend(pairs);
    }
}

impl<K, V, S> ParallelExtend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq + Send,
    V: Send,
    S: BuildHasher,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = par_iter.into_par_iter().collect();
        self.extend(pairs);
    }
}

impl<K, V> FromParallelIterator<(K, V)> for OpenHashMap<K, V, crate::DefaultHashBuilder>
where
    K: Hash + Eq + Send,
    V: Send,
{
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: IntoParallelIterator<Item = (K, V)>,
    {
        let mut created_map = OpenHashMap::new();
        created_map.par_extend(par_iter);
        created_map
    }
}

impl<K, V> FromParallelIterator<(K, V)> for ChainedHashMap<K, V, crate::DefaultHashBuilder>
where
    K: Hash + Eq + Send,
    V: Send,
{
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: IntoParallelIterator<Item = (K, V)>,
    {
        let mut created_map = ChainedHashMap::new();
        created_map.par_extend(par_iter);
        created_map
    }
}
