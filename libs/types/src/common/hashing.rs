//! Deterministic 64-bit name hashing
//!
//! Identifiers on the bus are routed by a 64-bit key derived from a
//! human-readable name. Every process on the bus must derive the same key from
//! the same name, across runs and across releases, so a hasher implementation
//! is never allowed to change its output once deployed.

use sha3::{Digest, Sha3_256};

/// Maps a name to the 64-bit key used for routing
pub trait NameHasher {
    /// Hash `name`; must be deterministic and stable across process runs
    fn hash_name(&self, name: &str) -> i64;
}

impl<F> NameHasher for F
where
    F: Fn(&str) -> i64,
{
    #[inline]
    fn hash_name(&self, name: &str) -> i64 {
        self(name)
    }
}

/// Default hasher: the first 8 bytes of SHA3-256 over the UTF-8 name, little-endian
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha3NameHasher;

impl NameHasher for Sha3NameHasher {
    fn hash_name(&self, name: &str) -> i64 {
        let digest = Sha3_256::digest(name.as_bytes());
        let mut key = [0u8; 8];
        key.copy_from_slice(&digest[..8]);
        i64::from_le_bytes(key)
    }
}

/// Process-wide hasher used by `Identifier::from_string` and the well-known identifiers
pub static DEFAULT_HASHER: Sha3NameHasher = Sha3NameHasher;

/// Hash `name` with [`DEFAULT_HASHER`]
#[inline]
pub fn generate64(name: &str) -> i64 {
    DEFAULT_HASHER.hash_name(name)
}
