use std::borrow::Borrow;
use std::fmt;

/// An entry stored directly in a slot of the open-addressing table.
///
/// A removed entry is not taken out of its slot: it is marked as a tombstone so that probe
/// sequences running through the slot keep going. The key and value stay in place until the
/// slot is reused by an insert or the table is rebuilt.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) tombstone: bool,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            tombstone: false,
        }
    }

    #[inline]
    pub(crate) fn is_live(&self) -> bool {
        !self.tombstone
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tombstone {
            write!(f, "TS")
        } else {
            write!(f, "{:?}: {:?}", self.key, self.value)
        }
    }
}

/// Key-value node in a bucket chain.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    next: Option<Box<Node<K, V>>>,
}

/// A singly-linked chain of nodes owned by one slot of the chaining table.
///
/// New keys are appended at the tail, so a chain lists its keys in insertion order.
pub(crate) struct Bucket<K, V> {
    head: Option<Box<Node<K, V>>>,
    len: usize,
}

impl<K, V> Default for Bucket<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Bucket<K, V> {
    pub(crate) fn new() -> Self {
        Self { head: None, len: 0 }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a node without checking whether the key is already present.
    pub(crate) fn insert(&mut self, key: K, value: V) {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        *link = Some(Box::new(Node {
            key,
            value,
            next: None,
        }));
        self.len += 1;
    }

    pub(crate) fn iter(&self) -> BucketIter<'_, K, V> {
        BucketIter {
            next: self.head.as_deref(),
        }
    }
}

impl<K, V> Bucket<K, V> {
    pub(crate) fn contains<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.iter().find(|node| node.key.borrow() == key)
    }

    pub(crate) fn contains_mut<Q>(&mut self, key: &Q) -> Option<&mut Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut next = self.head.as_deref_mut();
        while let Some(node) = next {
            if node.key.borrow() == key {
                return Some(node);
            }
            next = node.next.as_deref_mut();
        }
        None
    }

    /// Unlinks the node holding `key`. Returns `false` if there was none.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut link = &mut self.head;
        while link
            .as_ref()
            .is_some_and(|node| node.key.borrow() != key)
        {
            link = &mut link.as_mut().expect("checked by loop condition").next;
        }

        match link.take() {
            Some(node) => {
                *link = node.next;
                self.len -= 1;
                true
            }
            None => false,
        }
    }
}

impl<K, V> Drop for Bucket<K, V> {
    fn drop(&mut self) {
        // unlink iteratively; a long chain (say, under a constant hasher) would otherwise
        // recurse once per node through Box's drop.
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl<K: Clone, V: Clone> Clone for Bucket<K, V> {
    fn clone(&self) -> Self {
        let mut bucket = Bucket::new();
        for node in self.iter() {
            bucket.insert(node.key.clone(), node.value.clone());
        }
        bucket
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Bucket<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|node| (&node.key, &node.value)))
            .finish()
    }
}

pub(crate) struct BucketIter<'a, K, V> {
    next: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for BucketIter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(node)
    }
}

impl<K, V> IntoIterator for Bucket<K, V> {
    type Item = (K, V);
    type IntoIter = BucketIntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        BucketIntoIter {
            next: self.head.take(),
        }
    }
}

pub(crate) struct BucketIntoIter<K, V> {
    next: Option<Box<Node<K, V>>>,
}

impl<K, V> Iterator for BucketIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        let Node { key, value, next } = *node;
        self.next = next;
        Some((key, value))
    }
}

impl<K, V> Drop for BucketIntoIter<K, V> {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}
