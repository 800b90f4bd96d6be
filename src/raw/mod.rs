use std::ops::{Index, IndexMut};

/// The error returned when a [`Slots`] array is indexed past its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("slot index {index} is out of range for {len} slots")]
pub struct OutOfRange {
    /// The index that was requested.
    pub index: usize,
    /// The number of slots at the time of the request.
    pub len: usize,
}

/// A zero-indexed array of slots with bounds-checked access.
///
/// This is the backing store of both tables. A table allocates it once per capacity with
/// [`Slots::with_len`] and never changes its length afterwards; a resize builds a new one.
/// Out-of-range access through [`get`](Slots::get), [`get_mut`](Slots::get_mut) and
/// [`set`](Slots::set) is reported as [`OutOfRange`] rather than panicking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slots<T> {
    slots: Vec<T>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Slots<T> {
    /// Creates an empty slot array.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Creates `len` slots, each produced by `fill`.
    pub fn with_len<F>(len: usize, fill: F) -> Self
    where
        F: FnMut() -> T,
    {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, fill);
        Self { slots }
    }

    /// Appends a slot at the end.
    pub fn push(&mut self, value: T) {
        self.slots.push(value);
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns a reference to the slot at `index`.
    pub fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.slots.len();
        self.slots.get(index).ok_or(OutOfRange { index, len })
    }

    /// Returns a mutable reference to the slot at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.slots.len();
        self.slots.get_mut(index).ok_or(OutOfRange { index, len })
    }

    /// Replaces the slot at `index`, returning what it held before.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, OutOfRange> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Iterates over the slots in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    /// Maps a digest onto a slot index.
    #[inline]
    pub(crate) fn bini(&self, hash: u64) -> usize {
        debug_assert!(!self.slots.is_empty());
        (hash % self.slots.len() as u64) as usize
    }
}

// indexing is only used with indices produced by `bini` or bounded by `len`, so it
// panics like a slice would instead of returning `OutOfRange`.
impl<T> Index<usize> for Slots<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.slots[index]
    }
}

impl<T> IndexMut<usize> for Slots<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.slots[index]
    }
}

impl<T> IntoIterator for Slots<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Slots<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
