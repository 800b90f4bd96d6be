//! Iterators over the entries of [`OpenHashMap`](crate::OpenHashMap) and
//! [`ChainedHashMap`](crate::ChainedHashMap).

mod traverser;
pub(crate) use traverser::{ChainIter, SlotIter, Traverser};

/// An iterator over a map's entries.
///
/// See [`OpenHashMap::iter`](crate::OpenHashMap::iter) and
/// [`ChainedHashMap::iter`](crate::ChainedHashMap::iter) for details.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    pub(crate) traverser: Traverser<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        self.traverser.next()
    }
}

/// An iterator over a map's keys.
///
/// See [`OpenHashMap::keys`](crate::OpenHashMap::keys) for details.
#[derive(Debug)]
pub struct Keys<'a, K, V> {
    pub(crate) traverser: Traverser<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        let (key, _) = self.traverser.next()?;
        Some(key)
    }
}

/// An iterator over a map's values.
///
/// See [`OpenHashMap::values`](crate::OpenHashMap::values) for details.
#[derive(Debug)]
pub struct Values<'a, K, V> {
    pub(crate) traverser: Traverser<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.traverser.next()?;
        Some(value)
    }
}
