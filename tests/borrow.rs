use primehash::{ChainedHashMap, OpenHashMap};

// These tests all use `K = String` and `Q = str` for `Borrow`-based lookups

#[test]
fn open_get_with_str() {
    let mut map = OpenHashMap::<String, usize>::new();
    map.put("foo".to_string(), 1);
    assert_eq!(map.get("foo"), Some(&1));
    assert_eq!(map.get("bar"), None);
    assert!(map.contains_key("foo"));
    assert_eq!(map.get_key_value("foo"), Some((&"foo".to_string(), &1)));
}

#[test]
fn open_remove_with_str() {
    let mut map = OpenHashMap::<String, usize>::new();
    map.put("foo".to_string(), 1);
    assert!(map.remove("foo"));
    assert!(!map.contains_key("foo"));
}

#[test]
fn chained_get_with_str() {
    let mut map = ChainedHashMap::<String, usize>::new();
    map.put("foo".to_string(), 1);
    if let Some(v) = map.get_mut("foo") {
        *v = 2;
    }
    assert_eq!(map.get("foo"), Some(&2));
    assert!(!map.contains_key("bar"));
}

#[test]
fn chained_remove_with_str() {
    let mut map = ChainedHashMap::<String, usize>::new();
    map.put("foo".to_string(), 1);
    map.put("bar".to_string(), 2);
    assert!(map.remove("foo"));
    assert!(!map.remove("foo"));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("bar"), Some(&2));
}
