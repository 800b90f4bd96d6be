use primehash::{find_mode, Mode};

#[test]
fn single_winner() {
    let mode = find_mode(vec!["apple", "apple", "grape", "melon", "peach"]);
    assert_eq!(
        mode,
        Mode {
            values: vec!["apple"],
            frequency: 2
        }
    );
}

#[test]
fn all_distinct() {
    let input = vec!["one", "two", "three", "four", "five"];
    let mode = find_mode(input.clone());
    assert_eq!(mode.values, input);
    assert_eq!(mode.frequency, 1);
}

#[test]
fn tie_in_order_of_reaching_frequency() {
    let mode = find_mode(vec![
        "Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu",
    ]);
    assert_eq!(mode.values, vec!["Mint", "Ubuntu"]);
    assert_eq!(mode.frequency, 3);
}

#[test]
fn owned_strings() {
    let input: Vec<String> = "2 4 2 6 8 4 1 3 4 5 7 3 3 2"
        .split_whitespace()
        .map(String::from)
        .collect();
    let mode = find_mode(input);
    assert_eq!(mode.values, vec!["4".to_string(), "3".to_string(), "2".to_string()]);
    assert_eq!(mode.frequency, 3);
}

#[test]
fn counter_outgrows_default_capacity() {
    // enough distinct values to force the counting table through several resizes
    let input: Vec<u32> = (0..1000).chain(std::iter::once(999)).collect();
    let mode = find_mode(input);
    assert_eq!(mode.values, vec![999]);
    assert_eq!(mode.frequency, 2);
}

#[test]
fn tie_order_follows_last_increment() {
    // "b" occurs first but reaches two after "a" does
    let mode = find_mode(vec!["b", "a", "a", "b"]);
    assert_eq!(mode.values, vec!["a", "b"]);
    assert_eq!(mode.frequency, 2);
}
