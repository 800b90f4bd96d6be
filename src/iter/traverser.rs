use crate::node::{Bucket, BucketIter, Entry};
use crate::raw::Slots;

/// Walks the slots of an open-addressing table, yielding live entries.
///
/// Empty slots and tombstones are skipped. The walk ends when the bounds-checked slot access
/// reports that it ran past the last slot.
#[derive(Debug)]
pub(crate) struct SlotIter<'a, K, V> {
    slots: &'a Slots<Option<Entry<K, V>>>,

    /// Index of slot to use next
    index: usize,
}

impl<'a, K, V> SlotIter<'a, K, V> {
    pub(crate) fn new(slots: &'a Slots<Option<Entry<K, V>>>) -> Self {
        Self { slots, index: 0 }
    }
}

impl<'a, K, V> Iterator for SlotIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // OutOfRange is the end of the table
            let slot = self.slots.get(self.index).ok()?;
            self.index += 1;
            match slot {
                Some(entry) if entry.is_live() => return Some((&entry.key, &entry.value)),
                _ => continue,
            }
        }
    }
}

/// Walks the buckets of a chaining table in slot order, and each chain front to back.
pub(crate) struct ChainIter<'a, K, V> {
    buckets: std::slice::Iter<'a, Bucket<K, V>>,
    chain: Option<BucketIter<'a, K, V>>,
}

impl<'a, K, V> ChainIter<'a, K, V> {
    pub(crate) fn new(buckets: &'a Slots<Bucket<K, V>>) -> Self {
        Self {
            buckets: buckets.iter(),
            chain: None,
        }
    }
}

impl<'a, K, V> Iterator for ChainIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.as_mut().and_then(Iterator::next) {
                return Some((&node.key, &node.value));
            }
            // current chain is done, move on to the next bucket
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}

impl<K, V> std::fmt::Debug for ChainIter<'_, K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainIter")
            .field("buckets_left", &self.buckets.len())
            .finish()
    }
}

/// Either table's traversal, so that [`Iter`](super::Iter) and friends are shared.
#[derive(Debug)]
pub(crate) enum Traverser<'a, K, V> {
    Slots(SlotIter<'a, K, V>),
    Chains(ChainIter<'a, K, V>),
}

impl<'a, K, V> Iterator for Traverser<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traverser::Slots(it) => it.next(),
            Traverser::Chains(it) => it.next(),
        }
    }
}
