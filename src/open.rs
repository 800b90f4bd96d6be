use crate::iter::*;
use crate::node::Entry;
use crate::raw::Slots;
use crate::resize::{self, Rehash};
use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FromIterator;
use tracing::{trace, warn};

/// The load factor the table never reaches. Every insert first checks the load it would
/// leave behind and grows the table if that would reach this bound.
pub const MAX_OPEN_LOAD: f64 = 0.5;

/// A hash table that stores entries directly in its slots and resolves collisions with
/// quadratic probing.
///
/// A key whose digest lands on slot `i0` is looked for at `i0`, `i0 + 1`, `i0 + 4`,
/// `i0 + 9`, ... (all modulo the capacity) until it is found or an empty slot ends the
/// search. The capacity is always prime, and the table doubles (to the next prime) before
/// any insert that would fill half of the slots, so the probe sequence always reaches a
/// free slot.
///
/// Removing a key leaves a tombstone in its slot. Lookups probe through tombstones, and
/// inserts reuse them. Tombstones are dropped when the table is rebuilt by
/// [`resize_table`](OpenHashMap::resize_table) or [`clear`](OpenHashMap::clear).
///
/// # Examples
///
/// ```
/// use primehash::OpenHashMap;
///
/// let mut books = OpenHashMap::new();
/// books.put("Fight Club".to_string(), 1996);
/// books.put("The Dry".to_string(), 2016);
///
/// assert_eq!(books.get("The Dry"), Some(&2016));
/// assert!(books.remove("Fight Club"));
/// assert!(!books.contains_key("Fight Club"));
/// assert!(books.table_load() < 0.5);
/// ```
pub struct OpenHashMap<K, V, S = crate::DefaultHashBuilder> {
    /// The array of slots. Length is always prime.
    slots: Slots<Option<Entry<K, V>>>,

    /// Number of live (non-tombstone) entries.
    len: usize,

    build_hasher: S,
}

/// Where a probe sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// A live entry with the key sits at this index.
    Occupied(usize),
    /// The key is absent; a new entry for it belongs at this index.
    Vacant(usize),
    /// The key is absent and the probe sequence offered no empty or tombstoned slot.
    Exhausted,
}

impl<K, V> OpenHashMap<K, V, crate::DefaultHashBuilder> {
    /// Creates an empty `OpenHashMap` with [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY)
    /// slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    /// let map: OpenHashMap<String, i32> = OpenHashMap::new();
    /// assert_eq!(map.capacity(), 11);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `OpenHashMap` with at least `capacity` slots.
    ///
    /// The capacity is moved up to the next odd prime, so `with_capacity(20)` has 23 slots.
    /// Note that the map grows once it is half full, so it holds fewer than `capacity / 2`
    /// entries before its first resize.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    /// let map: OpenHashMap<String, i32> = OpenHashMap::with_capacity(20);
    /// assert_eq!(map.capacity(), 23);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, crate::DefaultHashBuilder::default())
    }
}

impl<K, V, S> Default for OpenHashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> OpenHashMap<K, V, S> {
    /// Creates an empty map which will use `hash_builder` to compute key digests.
    ///
    /// The created map has the default initial capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::{OpenHashMap, hash_fn::Additive};
    ///
    /// let mut map = OpenHashMap::with_hasher(Additive);
    /// map.put("key1", 10);
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(crate::DEFAULT_CAPACITY, hash_builder)
    }

    /// Creates an empty map with at least `capacity` slots, using `hash_builder` to compute
    /// key digests.
    ///
    /// The capacity is moved up to the next odd prime; `0` and `1` become `3`.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let mut map = OpenHashMap::with_capacity_and_hasher(101, RandomState::new());
    /// map.put(1, 2);
    /// assert_eq!(map.capacity(), 101);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let capacity = crate::prime::next_prime(capacity);
        Self {
            slots: Slots::with_len(capacity, || None),
            len: 0,
            build_hasher: hash_builder,
        }
    }

    /// Returns the number of live entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    ///
    /// let mut map = OpenHashMap::new();
    /// map.put(1, "a");
    /// map.put(2, "b");
    /// map.remove(&1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots. Always prime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the load factor: live entries divided by capacity.
    ///
    /// Tombstones do not count towards the load.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    ///
    /// let mut map = OpenHashMap::with_capacity(101);
    /// assert_eq!(map.table_load(), 0.0);
    /// map.put("key1", 10);
    /// map.put("key2", 20);
    /// map.put("key1", 30);
    /// assert_eq!(map.table_load(), 2.0 / 101.0);
    /// ```
    pub fn table_load(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Returns the number of slots that have never held an entry since the table was last
    /// rebuilt. Tombstoned slots are not empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    ///
    /// let mut map = OpenHashMap::with_capacity(101);
    /// map.put("key1", 10);
    /// map.put("key2", 20);
    /// assert_eq!(map.empty_buckets(), 99);
    /// map.remove("key1");
    /// assert_eq!(map.empty_buckets(), 99);
    /// ```
    pub fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Removes every entry, tombstones included, keeping the current capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    ///
    /// let mut map = OpenHashMap::with_capacity(53);
    /// map.put(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 53);
    /// ```
    pub fn clear(&mut self) {
        self.slots = Slots::with_len(self.capacity(), || None);
        self.len = 0;
    }

    /// Returns every live key-value pair, in ascending slot order.
    pub fn get_keys_and_values(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// An iterator visiting all live key-value pairs in slot order.
    ///
    /// The iterator element type is `(&'a K, &'a V)`.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            traverser: self.traverser(),
        }
    }

    /// An iterator visiting all live keys in slot order.
    ///
    /// The iterator element type is `&'a K`.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            traverser: self.traverser(),
        }
    }

    /// An iterator visiting all live values in slot order.
    ///
    /// The iterator element type is `&'a V`.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            traverser: self.traverser(),
        }
    }

    fn traverser(&self) -> Traverser<'_, K, V> {
        Traverser::Slots(SlotIter::new(&self.slots))
    }

    /// Returns a reference to the map's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        &self.build_hasher
    }
}

impl<K, V, S> OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn hash<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        let mut h = self.build_hasher.build_hasher();
        key.hash(&mut h);
        h.finish()
    }

    fn load_after_insert(&self) -> f64 {
        (self.len + 1) as f64 / self.capacity() as f64
    }

    /// Follows the quadratic probe sequence for `key`.
    ///
    /// Tombstones never match; the search runs through them and stops at the first empty slot
    /// or a live entry holding `key`. The first tombstone passed is remembered as the place to
    /// insert, so a key that lives further along the sequence is never duplicated.
    ///
    /// Squares modulo a prime repeat after `capacity` steps, so that bounds the sequence.
    fn probe<Q>(&self, hash: u64, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let capacity = self.capacity();
        let initial = self.slots.bini(hash);
        let mut index = initial;
        let mut reusable = None;

        for j in 0..capacity {
            if j > 0 {
                // i_j = i_0 + j² and j² - (j-1)² = 2j - 1
                index = (index + (2 * j - 1) % capacity) % capacity;
            }
            match &self.slots[index] {
                None => return Probe::Vacant(reusable.unwrap_or(index)),
                Some(entry) if entry.tombstone => {
                    reusable.get_or_insert(index);
                }
                Some(entry) if entry.key.borrow() == key => return Probe::Occupied(index),
                Some(_) => {}
            }
        }

        match reusable {
            Some(index) => Probe::Vacant(index),
            None => Probe::Exhausted,
        }
    }

    fn find<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.probe(self.hash(key), key) {
            Probe::Occupied(index) => self.slots[index].as_ref(),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but [`Hash`] and [`Eq`] on the
    /// borrowed form *must* match those for the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    ///
    /// let mut map = OpenHashMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).map(|entry| &entry.value)
    }

    /// Returns the key-value pair corresponding to `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).map(|entry| (&entry.key, &entry.value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.probe(self.hash(key), key) {
            Probe::Occupied(index) => self.slots[index].as_mut().map(|entry| &mut entry.value),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Returns `true` if the map contains a live entry for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    ///
    /// let mut map = OpenHashMap::new();
    /// map.put(1, "a");
    /// assert!(map.contains_key(&1));
    /// map.remove(&1);
    /// assert!(!map.contains_key(&1));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned. Otherwise the value is
    /// updated in place and the old value is returned.
    ///
    /// If the key is new and one more entry would bring the map to half full, the map is first
    /// resized to twice its capacity (moved up to the next prime). Updating a live key never
    /// resizes.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    ///
    /// let mut map = OpenHashMap::new();
    /// assert_eq!(map.put(37, "a"), None);
    /// assert_eq!(map.put(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash(&key);
        loop {
            match self.probe(hash, &key) {
                Probe::Occupied(index) => {
                    if let Some(entry) = self.slots[index].as_mut() {
                        return Some(std::mem::replace(&mut entry.value, value));
                    }
                    unreachable!("probe reported an empty slot as occupied");
                }
                Probe::Vacant(_) if self.load_after_insert() >= MAX_OPEN_LOAD => {
                    // slot indices change with the capacity, so probe again
                    self.resize_table(self.capacity() * 2);
                }
                Probe::Vacant(index) => {
                    self.slots[index] = Some(Entry::new(key, value));
                    self.len += 1;
                    return None;
                }
                Probe::Exhausted => {
                    warn!(
                        capacity = self.capacity(),
                        live = self.len,
                        "probe sequence exhausted, growing table"
                    );
                    self.resize_table(self.capacity() * 2);
                }
            }
        }
    }

    /// Removes a key from the map, returning `true` if a live entry was removed.
    ///
    /// The slot is tombstoned rather than emptied, so keys that were placed further along
    /// the same probe sequence stay reachable.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    ///
    /// let mut map = OpenHashMap::new();
    /// map.put(1, "a");
    /// assert!(map.remove(&1));
    /// assert!(!map.remove(&1));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.probe(self.hash(key), key) {
            Probe::Occupied(index) => match self.slots[index].as_mut() {
                Some(entry) => {
                    entry.tombstone = true;
                    self.len -= 1;
                    true
                }
                None => unreachable!("probe reported an empty slot as occupied"),
            },
            Probe::Vacant(_) | Probe::Exhausted => false,
        }
    }

    /// Rebuilds the table with `new_capacity` slots, moved up to the next prime if it is not
    /// prime already. Tombstones are dropped in the process.
    ///
    /// A request for fewer slots than there are live entries is ignored. Since reinsertion
    /// keeps the load below one half, the resulting capacity can end up larger than
    /// requested.
    ///
    /// # Examples
    ///
    /// ```
    /// use primehash::OpenHashMap;
    ///
    /// let mut map = OpenHashMap::with_capacity(20);
    /// map.put("key1", 10);
    /// map.resize_table(30);
    /// assert_eq!(map.capacity(), 31);
    /// assert_eq!(map.get("key1"), Some(&10));
    ///
    /// map.resize_table(0);
    /// assert_eq!(map.capacity(), 31);
    /// ```
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < self.len {
            trace!(
                requested = new_capacity,
                live = self.len,
                "refusing to shrink below live entries"
            );
            return;
        }
        resize::rehash(self, new_capacity);
    }
}

impl<K, V, S> Rehash for OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;
    type Slot = Option<Entry<K, V>>;

    fn reallocate(&mut self, capacity: usize) -> Slots<Self::Slot> {
        self.len = 0;
        std::mem::replace(&mut self.slots, Slots::with_len(capacity, || None))
    }

    fn live_pairs(slots: Slots<Self::Slot>) -> Vec<(K, V)> {
        slots
            .into_iter()
            .flatten()
            .filter(Entry::is_live)
            .map(|entry| (entry.key, entry.value))
            .collect()
    }

    fn put(&mut self, key: K, value: V) {
        let _ = OpenHashMap::<K, V, S>::put(self, key, value);
    }
}

impl<K, V, S> PartialEq for OpenHashMap<K, V, S>
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

impl<K, V, S> Eq for OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Debug for OpenHashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // one line per slot, tombstones included
            for (i, slot) in self.slots.iter().enumerate() {
                match slot {
                    Some(entry) => writeln!(f, "{}: {:?}", i, entry)?,
                    None => writeln!(f, "{}: None", i)?,
                }
            }
            Ok(())
        } else {
            f.debug_map().entries(self.iter()).finish()
        }
    }
}

impl<K, V, S> Clone for OpenHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            len: self.len,
            build_hasher: self.build_hasher.clone(),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for OpenHashMap<K, V, S>
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

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for OpenHashMap<K, V, S>
where
    K: Copy + Hash + Eq,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, S> FromIterator<(K, V)> for OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        // room for the whole hint without crossing the load bound
        let mut map = Self::with_capacity_and_hasher(
            std::cmp::max(crate::DEFAULT_CAPACITY, lower.saturating_mul(2).saturating_add(1)),
            S::default(),
        );
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a OpenHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
