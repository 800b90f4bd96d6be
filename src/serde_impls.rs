use crate::{ChainedHashMap, OpenHashMap};
use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt::{self, Formatter};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

impl<K, V, S> Serialize for OpenHashMap<K, V, S>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<K, V, S> Serialize for ChainedHashMap<K, V, S>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

/// Upper bound on how many entries a deserializer's size hint may preallocate for.
const MAX_PREALLOCATED: usize = 4096;

fn cautious(hint: Option<usize>) -> Option<usize> {
    hint.map(|n| n.min(MAX_PREALLOCATED))
}

/// The table operations a deserialized map is built through.
trait Target<K, V>: Sized {
    fn with_size_hint(hint: Option<usize>) -> Self;
    fn put_pair(&mut self, key: K, value: V);
}

impl<K, V, S> Target<K, V> for OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    S: Default + BuildHasher,
{
    fn with_size_hint(hint: Option<usize>) -> Self {
        match hint {
            // twice the entries keeps the load under one half
            Some(n) => OpenHashMap::with_capacity_and_hasher(n.saturating_mul(2), S::default()),
            None => OpenHashMap::with_hasher(S::default()),
        }
    }

    fn put_pair(&mut self, key: K, value: V) {
        self.put(key, value);
    }
}

impl<K, V, S> Target<K, V> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: Default + BuildHasher,
{
    fn with_size_hint(hint: Option<usize>) -> Self {
        match hint {
            Some(n) => ChainedHashMap::with_capacity_and_hasher(n, S::default()),
            None => ChainedHashMap::with_hasher(S::default()),
        }
    }

    fn put_pair(&mut self, key: K, value: V) {
        self.put(key, value);
    }
}

struct MapVisitor<K, V, M> {
    key_marker: PhantomData<K>,
    value_marker: PhantomData<V>,
    map_marker: PhantomData<M>,
}

impl<K, V, M> MapVisitor<K, V, M> {
    fn new() -> Self {
        Self {
            key_marker: PhantomData,
            value_marker: PhantomData,
            map_marker: PhantomData,
        }
    }
}

impl<'de, K, V, M> Visitor<'de> for MapVisitor<K, V, M>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    M: Target<K, V>,
{
    type Value = M;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = M::with_size_hint(cautious(access.size_hint()));

        // a repeated key keeps its last value, as std's maps do
        while let Some((key, value)) = access.next_entry()? {
            map.put_pair(key, value);
        }

        Ok(map)
    }
}

impl<'de, K, V, S> Deserialize<'de> for OpenHashMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: Default + BuildHasher,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor::new())
    }
}

impl<'de, K, V, S> Deserialize<'de> for ChainedHashMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: Default + BuildHasher,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor::new())
    }
}

#[cfg(test)]
mod test {
    use crate::{ChainedHashMap, OpenHashMap};

    #[test]
    fn test_open_map() {
        let mut map: OpenHashMap<String, u8> = OpenHashMap::with_capacity(5);
        for (i, key) in ["zero", "one", "two", "three", "four"].iter().enumerate() {
            map.put(key.to_string(), i as u8);
        }
        map.remove("two");

        let serialized = serde_json::to_string(&map).expect("Couldn't serialize map");

        let deserialized: OpenHashMap<String, u8> =
            serde_json::from_str(&serialized).expect("Couldn't deserialize map");

        assert_eq!(map, deserialized);
        assert!(!deserialized.contains_key("two"));
    }

    #[test]
    fn test_chained_map() {
        let mut map: ChainedHashMap<String, u8> = ChainedHashMap::with_capacity(5);
        for (i, key) in ["zero", "one", "two", "three", "four"].iter().enumerate() {
            map.put(key.to_string(), i as u8);
        }

        let serialized = serde_json::to_string(&map).expect("Couldn't serialize map");

        let deserialized: ChainedHashMap<String, u8> =
            serde_json::from_str(&serialized).expect("Couldn't deserialize map");

        assert_eq!(map, deserialized);
    }

    #[test]
    fn test_repeated_key_keeps_last() {
        let open: OpenHashMap<String, u8> =
            serde_json::from_str(r#"{"a":1,"a":2}"#).expect("Couldn't deserialize map");
        assert_eq!(open.len(), 1);
        assert_eq!(open.get("a"), Some(&2));

        let chained: ChainedHashMap<String, u8> =
            serde_json::from_str(r#"{"a":1,"b":3,"a":2}"#).expect("Couldn't deserialize map");
        assert_eq!(chained.len(), 2);
        assert_eq!(chained.get("a"), Some(&2));
    }

    #[test]
    fn test_size_hint_is_capped() {
        assert_eq!(super::cautious(Some(usize::MAX)), Some(super::MAX_PREALLOCATED));
        assert_eq!(super::cautious(Some(3)), Some(3));
        assert_eq!(super::cautious(None), None);

        let map = <OpenHashMap<String, u8> as super::Target<String, u8>>::with_size_hint(
            super::cautious(Some(usize::MAX)),
        );
        assert!(map.capacity() <= 2 * super::MAX_PREALLOCATED + 100);
    }

    #[test]
    fn test_cross_variant() {
        let mut map: ChainedHashMap<String, u8> = ChainedHashMap::new();
        map.put("a".to_string(), 1);
        let serialized = serde_json::to_string(&map).expect("Couldn't serialize map");
        assert_eq!(serialized, r#"{"a":1}"#);

        let open: OpenHashMap<String, u8> =
            serde_json::from_str(&serialized).expect("Couldn't deserialize map");
        assert_eq!(open.get("a"), Some(&1));
    }
}
