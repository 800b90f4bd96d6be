//! Prime-sized hash tables, in two collision-resolution flavours.
//!
//! [`OpenHashMap`] stores entries directly in its slots and resolves collisions with quadratic
//! probing; removed entries become tombstones. [`ChainedHashMap`] keeps a linked chain of
//! entries in each slot. Both offer the same operations:
//!
//!  - `put`, `get`, `get_mut`, `contains_key` and `remove`, all in amortized O(1) time for
//!    well-distributed digests;
//!  - `resize_table` to rebuild the table at an explicit capacity, and `clear`;
//!  - `table_load` and `empty_buckets` to inspect how full the table is;
//!  - `iter`, `keys`, `values` and `get_keys_and_values` to enumerate live entries in slot
//!    order.
//!
//! # Capacity
//!
//! Capacities are always prime. A requested capacity is moved up to the next odd prime (see
//! [`prime::next_prime`]); a table built without one starts at [`DEFAULT_CAPACITY`].
//!
//! # Resizing behavior
//!
//! Before inserting a new key, a table computes the load factor (live entries divided by
//! capacity) the insert would leave behind. If that would reach the table's bound, it first
//! doubles its capacity (moved up to the next prime) and reinserts every live entry.
//! Updating the value of a key that is already present never resizes. The bound is [`MAX_OPEN_LOAD`] (one half) for open
//! addressing and [`MAX_CHAINED_LOAD`] (one) for chaining. Tables never shrink on removal.
//!
//! An explicit [`OpenHashMap::resize_table`] or [`ChainedHashMap::resize_table`] goes through
//! the same rebuild. If the requested capacity is too small to hold the entries below the
//! load bound, reinsertion grows the table again, so the final capacity may be larger than
//! requested. Requests that can never work (fewer slots than live entries for open
//! addressing, zero buckets for chaining) are ignored; check [`OpenHashMap::capacity`]
//! afterwards if it matters.
//!
//! # Hashing
//!
//! Key digests come from a [`BuildHasher`](std::hash::BuildHasher), [`DefaultHashBuilder`]
//! unless another one is given at construction. The tables are correct for any hasher,
//! including one that maps every key to the same digest; only performance suffers. The
//! [`hash_fn`] module has two small deterministic string digests.
//!
//! # Finding the mode
//!
//! [`find_mode`] uses a [`ChainedHashMap`] as a frequency counter to find the most frequent
//! values of a sequence.
//!
//! # Logging
//!
//! Table rebuilds are reported through [`tracing`] at `debug` level. Nothing is logged on
//! the regular insert/lookup paths.
#![deny(missing_docs, missing_debug_implementations)]
#![warn(rust_2018_idioms, unreachable_pub)]

mod chained;
mod node;
mod open;
mod raw;
mod resize;

pub mod hash_fn;
pub mod iter;
pub mod mode;
pub mod prime;

#[cfg(feature = "rayon")]
mod rayon_impls;

#[cfg(feature = "serde")]
mod serde_impls;

pub use chained::{ChainedHashMap, MAX_CHAINED_LOAD};
pub use mode::{find_mode, Mode};
pub use open::{OpenHashMap, MAX_OPEN_LOAD};
pub use raw::{OutOfRange, Slots};

/// Default hasher for [`OpenHashMap`] and [`ChainedHashMap`].
pub type DefaultHashBuilder = ahash::RandomState;

/// The capacity a table starts with when none is requested.
pub const DEFAULT_CAPACITY: usize = 11;
