use primehash::{ChainedHashMap, DefaultHashBuilder, OpenHashMap};
use std::hash::{BuildHasher, BuildHasherDefault, Hasher};

#[derive(Default)]
struct ZeroHasher;

impl Hasher for ZeroHasher {
    fn finish(&self) -> u64 {
        0
    }
    fn write(&mut self, _: &[u8]) {}
}

macro_rules! check {
    ($name:ident, $map:ident) => {
        fn $name<S: BuildHasher + Default>() {
            let range = if cfg!(miri) { 0..16 } else { 0..1000 };
            let mut map = $map::<i32, i32, S>::default();
            for i in range.clone() {
                map.put(i, i);
            }

            assert!(!map.contains_key(&i32::MIN));
            assert!(!map.contains_key(&(range.start - 1)));
            for i in range.clone() {
                assert!(map.contains_key(&i));
            }
            assert!(!map.contains_key(&range.end));
            assert!(!map.contains_key(&i32::MAX));

            // remove every other key and make sure the rest stay reachable
            for i in range.clone().step_by(2) {
                assert!(map.remove(&i));
            }
            for i in range.clone() {
                assert_eq!(map.get(&i).is_some(), i % 2 == 1, "{}", i);
            }
            assert_eq!(map.len(), range.len() / 2);
        }
    };
}

check!(check_open, OpenHashMap);
check!(check_chained, ChainedHashMap);

#[test]
fn test_default_hasher() {
    check_open::<DefaultHashBuilder>();
    check_chained::<DefaultHashBuilder>();
}

#[test]
fn test_zero_hasher() {
    check_open::<BuildHasherDefault<ZeroHasher>>();
    check_chained::<BuildHasherDefault<ZeroHasher>>();
}

#[test]
fn test_max_hasher() {
    #[derive(Default)]
    struct MaxHasher;

    impl Hasher for MaxHasher {
        fn finish(&self) -> u64 {
            u64::MAX
        }
        fn write(&mut self, _: &[u8]) {}
    }

    check_open::<BuildHasherDefault<MaxHasher>>();
    check_chained::<BuildHasherDefault<MaxHasher>>();
}

#[test]
fn test_string_digests() {
    check_open::<primehash::hash_fn::Additive>();
    check_chained::<primehash::hash_fn::Additive>();
    check_open::<primehash::hash_fn::Positional>();
    check_chained::<primehash::hash_fn::Positional>();
}
