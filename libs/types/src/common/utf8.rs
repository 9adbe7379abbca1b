//! Lazily computed null-terminated UTF-8 encoding of an identifier alias
//!
//! The codec writes aliases as null-terminated UTF-8. A long-lived object is
//! serialized many times, so the encoding is built once on first use and kept
//! until the alias changes.

use once_cell::sync::OnceCell;
use tracing::trace;

/// Memoized null-terminated encoding of a string
///
/// The cache is a `sync::OnceCell` so an object frozen for transmission can be
/// read from several threads while the cache is still empty.
#[derive(Debug, Clone, Default)]
pub(crate) struct Utf8Cache {
    encoded: OnceCell<Box<[u8]>>,
}

impl Utf8Cache {
    pub(crate) const fn new() -> Self {
        Self {
            encoded: OnceCell::new(),
        }
    }

    /// Encoding of `alias` followed by a NUL byte, built on first call
    pub(crate) fn with_nul(&self, alias: &str) -> &[u8] {
        self.encoded.get_or_init(|| {
            let mut bytes = Vec::with_capacity(alias.len() + 1);
            bytes.extend_from_slice(alias.as_bytes());
            bytes.push(0);
            trace!(alias, encoded_len = bytes.len(), "populated utf-8 cache");
            bytes.into_boxed_slice()
        })
    }

    /// Encoding of `alias` without the terminator
    pub(crate) fn bytes(&self, alias: &str) -> &[u8] {
        let with_nul = self.with_nul(alias);
        &with_nul[..with_nul.len() - 1]
    }

    #[cfg(test)]
    pub(crate) fn is_populated(&self) -> bool {
        self.encoded.get().is_some()
    }

    /// Drop the cached encoding; the next access recomputes it
    pub(crate) fn invalidate(&mut self) {
        self.encoded = OnceCell::new();
    }
}
