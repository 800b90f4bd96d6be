use crate::iter::*;
use crate::node::Bucket;
use crate::raw::Slots;
use crate::resize::{self, Rehash};
use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FromIterator;
use tracing::trace;

/// The load factor the table never reaches. Checked against the post-insert load before
/// every insert.
pub const MAX_CHAINED_LOAD: f64 = 1.0;

/// A hash table that keeps a linked chain of entries in every slot.
///
/// A key lives in the chain of slot `digest % capacity`; lookups walk that one chain. The
/// capacity is always prime, and the table doubles (to the next prime) before any
/// insert that would leave it with as many entries as slots.
///
/// # Examples
///
/// ```
/// use primehash::ChainedHashMap;
///
/// let mut distros = ChainedHashMap::new();
/// distros.put("Arch".to_string(), 2002);
/// distros.put("Mint".to_string(), 2006);
///
/// assert_eq!(distros.get("Mint"), Some(&2006));
/// assert!(distros.remove("Arch"));
/// assert_eq!(distros.len(), 1);
/// ```
pub struct ChainedHashMap<K, V, S = crate::DefaultHashBuilder> {
    /// One chain per slot. Length is always prime.
    buckets: Slots<Bucket<K, V>>,

    len: usize,

    build_hasher: S,
}

impl<K, V> ChainedHashMap<K, V, crate::DefaultHashBuilder> {
    /// Creates an empty `ChainedHashMap` with [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY)
    /// buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::ChainedHashMap;
    /// let map: ChainedHashMap<&str, i32> = ChainedHashMap::new();
    /// assert_eq!(map.capacity(), 11);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `ChainedHashMap` with at least `capacity` buckets, moved up to the
    /// next odd prime.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::ChainedHashMap;
    /// let map: ChainedHashMap<&str, i32> = ChainedHashMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 101);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, crate::DefaultHashBuilder::default())
    }
}

impl<K, V, S> Default for ChainedHashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Creates an empty map which will use `hash_builder` to compute key digests.
    ///
    /// The created map has the default initial capacity.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(crate::DEFAULT_CAPACITY, hash_builder)
    }

    /// Creates an empty map with at least `capacity` buckets, using `hash_builder` to compute
    /// key digests.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::{ChainedHashMap, hash_fn::Positional};
    ///
    /// let mut map = ChainedHashMap::with_capacity_and_hasher(53, Positional);
    /// map.put("key1", 10);
    /// assert_eq!(map.capacity(), 53);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let capacity = crate::prime::next_prime(capacity);
        Self {
            buckets: Slots::with_len(capacity, Bucket::new),
            len: 0,
            build_hasher: hash_builder,
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty. Otherwise returns `false`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of buckets. Always prime.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the load factor: entries divided by buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::with_capacity(101);
    /// map.put("key1", 10);
    /// map.put("key2", 20);
    /// assert_eq!(map.table_load(), 2.0 / 101.0);
    /// ```
    pub fn table_load(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Returns the number of buckets whose chain is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::with_capacity(101);
    /// assert_eq!(map.empty_buckets(), 101);
    /// map.put("key1", 10);
    /// map.put("key1", 30);
    /// assert_eq!(map.empty_buckets(), 100);
    /// ```
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_empty()).count()
    }

    /// Removes every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        self.buckets = Slots::with_len(self.capacity(), Bucket::new);
        self.len = 0;
    }

    /// Returns every key-value pair, bucket by bucket in ascending slot order, and each
    /// chain front to back.
    pub fn get_keys_and_values(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// An iterator visiting all key-value pairs in bucket order.
    ///
    /// The iterator element type is `(&'a K, &'a V)`.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            traverser: self.traverser(),
        }
    }

    /// An iterator visiting all keys in bucket order.
    ///
    /// The iterator element type is `&'a K`.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            traverser: self.traverser(),
        }
    }

    /// An iterator visiting all values in bucket order.
    ///
    /// The iterator element type is `&'a V`.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            traverser: self.traverser(),
        }
    }

    fn traverser(&self) -> Traverser<'_, K, V> {
        Traverser::Chains(ChainIter::new(&self.buckets))
    }

    /// Returns a reference to the map's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        &self.build_hasher
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn hash<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        let mut h = self.build_hasher.build_hasher();
        key.hash(&mut h);
        h.finish()
    }

    fn bucket<Q>(&self, key: &Q) -> &Bucket<K, V>
    where
        Q: ?Sized + Hash,
    {
        &self.buckets[self.buckets.bini(self.hash(key))]
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.bucket(key).contains(key).map(|node| &node.value)
    }

    /// Returns the key-value pair corresponding to `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.bucket(key)
            .contains(key)
            .map(|node| (&node.key, &node.value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.buckets.bini(self.hash(key));
        self.buckets[index]
            .contains_mut(key)
            .map(|node| &mut node.value)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.bucket(key).contains(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, the pair is appended to its bucket's chain
    /// and `None` is returned. Otherwise the value is updated in place and the old value is
    /// returned.
    ///
    /// If the key is new and one more entry would leave the map with as many entries as
    /// buckets, the map is first resized to twice its capacity (moved up to the next prime).
    /// Updating an existing key never resizes.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::with_capacity(3);
    /// for i in 0..4 {
    ///     map.put(i, i * 10);
    /// }
    /// assert_eq!(map.capacity(), 7);
    /// assert_eq!(map.put(2, 0), Some(20));
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash(&key);
        let index = self.buckets.bini(hash);
        if let Some(node) = self.buckets[index].contains_mut(&key) {
            return Some(std::mem::replace(&mut node.value, value));
        }

        if (self.len + 1) as f64 / self.capacity() as f64 >= MAX_CHAINED_LOAD {
            self.resize_table(self.capacity() * 2);
        }
        let index = self.buckets.bini(hash);
        self.buckets[index].insert(key, value);
        self.len += 1;
        None
    }

    /// Removes a key from the map, returning `true` if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// map.put(1, "a");
    /// assert!(map.remove(&1));
    /// assert!(!map.remove(&1));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.buckets.bini(self.hash(key));
        if self.buckets[index].remove(key) {
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Rebuilds the table with `new_capacity` buckets, moved up to the next prime if it is
    /// not prime already.
    ///
    /// A request for zero buckets is ignored. Reinsertion keeps the load below one, so the
    /// resulting capacity can end up larger than requested.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::with_capacity(20);
    /// map.put("key1", 10);
    /// map.resize_table(30);
    /// assert_eq!(map.capacity(), 31);
    ///
    /// map.resize_table(0);
    /// assert_eq!(map.capacity(), 31);
    /// ```
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            trace!(requested = new_capacity, "refusing to resize to zero buckets");
            return;
        }
        resize::rehash(self, new_capacity);
    }
}

impl<K, V, S> Rehash for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;
    type Slot = Bucket<K, V>;

    fn reallocate(&mut self, capacity: usize) -> Slots<Self::Slot> {
        self.len = 0;
        std::mem::replace(&mut self.buckets, Slots::with_len(capacity, Bucket::new))
    }

    fn live_pairs(slots: Slots<Self::Slot>) -> Vec<(K, V)> {
        slots.into_iter().flatten().collect()
    }

    fn put(&mut self, key: K, value: V) {
        let _ = ChainedHashMap::<K, V, S>::put(self, key, value);
    }
}

impl<K, V, S> PartialEq for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(key, value)| other.get(key).map_or(false, |v| *value == *v))
    }
}

impl<K, V, S> Eq for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Debug for ChainedHashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // one line per bucket
            for (i, bucket) in self.buckets.iter().enumerate() {
                writeln!(f, "{}: {:?}", i, bucket)?;
            }
            Ok(())
        } else {
            f.debug_map().entries(self.iter()).finish()
        }
    }
}

impl<K, V, S> Clone for ChainedHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            build_hasher: self.build_hasher.clone(),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for ChainedHashMap<K, V, S>
where
    K: Copy + Hash + Eq,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut map = Self::with_capacity_and_hasher(
            std::cmp::max(crate::DEFAULT_CAPACITY, lower.saturating_add(1)),
            S::default(),
        );
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
