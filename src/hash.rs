//! Key hashing and bucket selection.

use core::num::NonZeroUsize;

/// Multiplier of the rolling hash.
pub const MULTIPLIER: u32 = 31;

/// Maps a key to a hash code. The table reduces the code modulo its bucket
/// count; implementations must be deterministic for the life of a table.
pub trait KeyHash {
    fn hash_key(&self, key: &str) -> u64;
}

/// Polynomial rolling hash over the key's bytes: seed 0, then
/// `acc = acc * 31 + byte` with 32-bit wrapping arithmetic.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PolynomialHash;

impl KeyHash for PolynomialHash {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        u64::from(polynomial_hash(key))
    }
}

#[inline]
pub fn polynomial_hash(key: &str) -> u32 {
    key.bytes().fold(0u32, |acc, b| {
        acc.wrapping_mul(MULTIPLIER).wrapping_add(u32::from(b))
    })
}

/// Bucket that `key` lands in under the default hash.
#[inline]
pub fn bucket_index(key: &str, bucket_count: NonZeroUsize) -> usize {
    reduce(PolynomialHash.hash_key(key), bucket_count)
}

#[inline]
pub(crate) fn reduce(hash: u64, bucket_count: NonZeroUsize) -> usize {
    // bucket_count fits in u64 on every supported target, and the remainder
    // is below bucket_count, so both casts are lossless.
    (hash % bucket_count.get() as u64) as usize
}
