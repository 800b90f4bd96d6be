use crate::prime;
use crate::raw::Slots;
use tracing::debug;

/// What a table exposes so that [`rehash`] can rebuild it.
///
/// Rebuilding is the same for every collision strategy: snapshot the live pairs in slot
/// order, swap in an empty slot array of the new capacity, and `put` every pair back. Only
/// the slot type and how live pairs are pulled out of it differ.
pub(crate) trait Rehash {
    type Key;
    type Value;
    type Slot;

    /// Swaps in `capacity` empty slots, resets the live count to zero, and hands back the
    /// slots that were replaced.
    fn reallocate(&mut self, capacity: usize) -> Slots<Self::Slot>;

    /// Extracts the live pairs of `slots` in ascending slot order.
    fn live_pairs(slots: Slots<Self::Slot>) -> Vec<(Self::Key, Self::Value)>;

    /// Inserts a pair through the table's regular insert path, load check included.
    fn put(&mut self, key: Self::Key, value: Self::Value);
}

/// Rebuilds `table` with `capacity` slots, moved up to the next prime if needed.
///
/// Reinsertion goes through [`Rehash::put`], so if the new capacity is too small for the
/// live entries at the table's load bound, reinsertion resizes again on its own.
pub(crate) fn rehash<T: Rehash>(table: &mut T, capacity: usize) {
    let capacity = prime::normalize(capacity);
    let old = table.reallocate(capacity);
    let old_capacity = old.len();
    let pairs = T::live_pairs(old);

    debug!(
        from = old_capacity,
        to = capacity,
        live = pairs.len(),
        "rehashing table"
    );

    for (key, value) in pairs {
        table.put(key, value);
    }
}
