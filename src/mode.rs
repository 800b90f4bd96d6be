//! Finding the most frequent values of a sequence.
//!
//! See [`find_mode`] for details.

use crate::ChainedHashMap;
use std::hash::Hash;

/// The most frequent values of a sequence and how often they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode<T> {
    /// Every value that occurs `frequency` times, in the order they reached `frequency`.
    pub values: Vec<T>,
    /// How often each of `values` occurs. `0` for an empty sequence.
    pub frequency: usize,
}

/// Returns the value(s) that occur most often in `items`, along with their frequency.
///
/// The sequence is read once, counting occurrences in a [`ChainedHashMap`]. All values that
/// share the highest frequency are returned, in the order in which they first reached it.
///
/// # Examples
///
/// ```
/// use primehash::find_mode;
///
/// let mode = find_mode(vec!["apple", "apple", "grape", "melon", "peach"]);
/// assert_eq!(mode.values, vec!["apple"]);
/// assert_eq!(mode.frequency, 2);
///
/// let mode = find_mode(vec!["Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint"]);
/// assert_eq!(mode.values, vec!["Mint"]);
/// assert_eq!(mode.frequency, 3);
/// ```
pub fn find_mode<I>(items: I) -> Mode<I::Item>
where
    I: IntoIterator,
    I::Item: Hash + Eq + Clone,
{
    let mut counts: ChainedHashMap<I::Item, usize> = ChainedHashMap::new();
    let mut values = Vec::new();
    let mut frequency = 0;

    for item in items {
        let count = match counts.get(&item) {
            Some(&count) => count + 1,
            None => 1,
        };
        counts.put(item.clone(), count);

        if count > frequency {
            values.clear();
            values.push(item);
            frequency = count;
        } else if count == frequency {
            values.push(item);
        }
    }

    Mode { values, frequency }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let mode = find_mode(Vec::<String>::new());
        assert!(mode.values.is_empty());
        assert_eq!(mode.frequency, 0);
    }

    #[test]
    fn single() {
        let mode = find_mode(vec![7]);
        assert_eq!(mode.values, vec![7]);
        assert_eq!(mode.frequency, 1);
    }

    #[test]
    fn all_distinct() {
        let mode = find_mode(vec!["one", "two", "three", "four", "five"]);
        assert_eq!(mode.values, vec!["one", "two", "three", "four", "five"]);
        assert_eq!(mode.frequency, 1);
    }

    #[test]
    fn tie_in_order_reached() {
        let mode = find_mode(vec![
            "Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu",
        ]);
        assert_eq!(mode.values, vec!["Mint", "Ubuntu"]);
        assert_eq!(mode.frequency, 3);
    }

    #[test]
    fn later_value_overtakes() {
        let mode = find_mode("abbccc".chars());
        assert_eq!(mode.values, vec!['c']);
        assert_eq!(mode.frequency, 3);
    }

    #[test]
    fn many_values_force_resizes() {
        let items: Vec<u32> = (0..500).chain(0..500).chain(250..260).collect();
        let mode = find_mode(items);
        assert_eq!(mode.values, (250..260).collect::<Vec<_>>());
        assert_eq!(mode.frequency, 3);
    }
}
