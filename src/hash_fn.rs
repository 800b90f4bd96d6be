//! Simple, deterministic digests for string keys.
//!
//! These are the textbook digests used to demonstrate collision handling: they are cheap,
//! reproducible across runs, and collide readily (anagrams collide under [`Additive`]).
//! Use [`DefaultHashBuilder`](crate::DefaultHashBuilder) unless the exact slot layout
//! matters.
//!
//! Both are fed the bytes that the key's [`Hash`](std::hash::Hash) implementation writes.
//! For `str` and `String` that is the UTF-8 bytes followed by a single `0xff` terminator,
//! which the digests absorb like any other byte. A string key's digest is therefore the
//! textbook digest of its bytes plus `255` ([`Additive`]) or plus `(len + 1) * 255`
//! ([`Positional`]), and tables using these digests lay keys out accordingly.

use std::hash::{BuildHasher, Hasher};

/// Builds an [`AdditiveHasher`]: the digest is the sum of all bytes.
///
/// # Examples
///
/// ```
/// use primehash::hash_fn::Additive;
/// use std::hash::BuildHasher;
///
/// assert_eq!(Additive.hash_one("ab"), Additive.hash_one("ba"));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Additive;

/// Builds a [`PositionalHasher`]: the digest is the sum of `(position + 1) * byte`.
///
/// # Examples
///
/// ```
/// use primehash::hash_fn::Positional;
/// use std::hash::BuildHasher;
///
/// assert_ne!(Positional.hash_one("ab"), Positional.hash_one("ba"));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Positional;

/// See [`Additive`].
#[derive(Debug, Default, Clone)]
pub struct AdditiveHasher {
    sum: u64,
}

/// See [`Positional`].
#[derive(Debug, Default, Clone)]
pub struct PositionalHasher {
    sum: u64,
    position: u64,
}

impl Hasher for AdditiveHasher {
    fn finish(&self) -> u64 {
        self.sum
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.sum = self.sum.wrapping_add(u64::from(b));
        }
    }
}

impl Hasher for PositionalHasher {
    fn finish(&self) -> u64 {
        self.sum
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.position += 1;
            self.sum = self
                .sum
                .wrapping_add(self.position.wrapping_mul(u64::from(b)));
        }
    }
}

impl BuildHasher for Additive {
    type Hasher = AdditiveHasher;

    fn build_hasher(&self) -> AdditiveHasher {
        AdditiveHasher::default()
    }
}

impl BuildHasher for Positional {
    type Hasher = PositionalHasher;

    fn build_hasher(&self) -> PositionalHasher {
        PositionalHasher::default()
    }
}
