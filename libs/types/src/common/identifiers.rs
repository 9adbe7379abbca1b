//! # Hashed Identifiers
//!
//! Identifiers used for routing on the bus: channels, handlers and similar
//! keys. Each identifier is a 64-bit raw value derived from a human-readable
//! name, optionally carrying that name as an alias for debugging.
//!
//! ## Semantics
//!
//! - **Equality, ordering and hashing use the raw value only.** Two
//!   identifiers with the same raw value and different aliases are equal.
//! - **The alias is optional.** It can be stripped with
//!   [`Identifier::remove_string`] so it is not transmitted with the object.
//! - **Display falls back to well-known names.** A stripped identifier whose raw
//!   value matches its kind's default or "all" sentinel still prints that name.
//!   Kinds without such a pair ([`InstanceId`]) print the raw value.
//! - **Aliases are NUL-free.** Every constructor taking an alias rejects an
//!   interior NUL with `EncodingFailure`, so the null-terminated form the codec
//!   writes is always the form the receive path accepts.
//!
//! ## Identifier Kinds
//!
//! [`Identifier`] is generic over a kind marker so channel and handler ids
//! cannot be mixed up. Kinds are declared with [`define_hashed_id!`](crate::define_hashed_id):
//!
//! ```rust
//! use dob_types::{ChannelId, HandlerId};
//!
//! let lobby = ChannelId::from_string("Lobby")?;
//! assert_eq!(lobby.display_string(), "Lobby");
//! assert_eq!(lobby.utf8_length(), 6);
//!
//! let mut stripped = lobby.clone();
//! stripped.remove_string();
//! assert_eq!(stripped, lobby);
//! assert_eq!(stripped.display_string(), lobby.raw_value().to_string());
//!
//! assert_eq!(HandlerId::default().display_string(), "DEFAULT_HANDLER");
//! # Ok::<(), dob_types::TypesystemError>(())
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use tracing::warn;

use super::errors::TypesystemError;
use super::hashing::{NameHasher, DEFAULT_HASHER};
use super::utf8::Utf8Cache;

/// Marker for a family of identifiers
pub trait IdKind: 'static {
    /// Type name used in debug output and log fields
    const NAME: &'static str;

    /// The kind's default and "all" identifiers, for kinds that define them
    fn well_known() -> Option<&'static WellKnown<Self>>
    where
        Self: Sized,
    {
        None
    }
}

/// Identifier kind with a well-known default and "all" identifier
pub trait WellKnownKind: IdKind {
    /// Both identifiers, initialized once per process
    fn pair() -> &'static WellKnown<Self>
    where
        Self: Sized;
}

/// The well-known default and "all" identifiers of one kind
pub struct WellKnown<K> {
    default: Identifier<K>,
    all: Identifier<K>,
}

impl<K> WellKnown<K> {
    /// Build both constants by hashing their names with the default hasher
    pub fn new(default_alias: &'static str, all_alias: &'static str) -> Self {
        Self {
            default: Identifier::hashed(default_alias.to_owned(), &DEFAULT_HASHER),
            all: Identifier::hashed(all_alias.to_owned(), &DEFAULT_HASHER),
        }
    }

    pub fn default_id(&self) -> &Identifier<K> {
        &self.default
    }

    pub fn all_id(&self) -> &Identifier<K> {
        &self.all
    }
}

#[doc(hidden)]
pub const fn contains_nul(name: &str) -> bool {
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == 0 {
            return true;
        }
        i += 1;
    }
    false
}

/// Macro for declaring an identifier kind and its type alias
///
/// Generates a zero-sized kind marker implementing [`IdKind`], plus
/// `pub type $name = Identifier<$kind>`. With `default = .., all = ..` the
/// kind also implements [`WellKnownKind`]; both identifiers are hashed from
/// the given names on first use, and names containing NUL fail to compile.
///
/// # Examples
///
/// ```rust
/// use dob_types::define_hashed_id;
///
/// define_hashed_id!(
///     /// Identifier of a replication zone
///     ZoneId, ZoneKind, default = "DEFAULT_ZONE", all = "ALL_ZONES"
/// );
///
/// define_hashed_id!(
///     /// Identifier of a tenant, no well-known values
///     TenantId, TenantKind
/// );
///
/// assert_eq!(ZoneId::all().display_string(), "ALL_ZONES");
/// assert_eq!(TenantId::from_raw(3).display_string(), "3");
/// ```
#[macro_export]
macro_rules! define_hashed_id {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:ident, default = $default:expr, all = $all:expr
    ) => {
        #[doc = concat!("Kind marker for [`", stringify!($name), "`]")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $kind;

        const _: () = assert!(
            !$crate::common::identifiers::contains_nul($default)
                && !$crate::common::identifiers::contains_nul($all),
            "well-known identifier names must not contain NUL"
        );

        impl $crate::common::identifiers::IdKind for $kind {
            const NAME: &'static str = stringify!($name);

            fn well_known() -> Option<&'static $crate::common::identifiers::WellKnown<Self>> {
                Some(<Self as $crate::common::identifiers::WellKnownKind>::pair())
            }
        }

        impl $crate::common::identifiers::WellKnownKind for $kind {
            fn pair() -> &'static $crate::common::identifiers::WellKnown<Self> {
                static WELL_KNOWN: $crate::__private::Lazy<
                    $crate::common::identifiers::WellKnown<$kind>,
                > = $crate::__private::Lazy::new(|| {
                    $crate::common::identifiers::WellKnown::new($default, $all)
                });
                &WELL_KNOWN
            }
        }

        $(#[$meta])*
        pub type $name = $crate::common::identifiers::Identifier<$kind>;
    };
    (
        $(#[$meta:meta])*
        $name:ident, $kind:ident
    ) => {
        #[doc = concat!("Kind marker for [`", stringify!($name), "`]")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $kind;

        impl $crate::common::identifiers::IdKind for $kind {
            const NAME: &'static str = stringify!($name);
        }

        $(#[$meta])*
        pub type $name = $crate::common::identifiers::Identifier<$kind>;
    };
}

define_hashed_id!(
    /// Identifier of a channel that entities and messages are published on
    ChannelId, ChannelKind, default = "DEFAULT_CHANNEL", all = "ALL_CHANNELS"
);

define_hashed_id!(
    /// Identifier of a handler that owns entities or serves requests
    HandlerId, HandlerKind, default = "DEFAULT_HANDLER", all = "ALL_HANDLERS"
);

define_hashed_id!(
    /// Identifier of one instance of an entity type
    InstanceId, InstanceKind
);

/// Reject alias bytes that can not be written as null-terminated UTF-8
fn check_no_nul(bytes: &[u8]) -> Result<(), TypesystemError> {
    match bytes.iter().position(|&b| b == 0) {
        Some(pos) => Err(TypesystemError::encoding_failure(format!(
            "alias contains a NUL byte at offset {}",
            pos
        ))),
        None => Ok(()),
    }
}

/// A 64-bit routing key with an optional string alias
pub struct Identifier<K> {
    raw: i64,
    alias: String,
    utf8: Utf8Cache,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Identifier<K> {
    // Callers have already checked `alias` for NUL bytes
    fn with_alias(raw: i64, alias: String) -> Self {
        Self {
            raw,
            alias,
            utf8: Utf8Cache::new(),
            _kind: PhantomData,
        }
    }

    fn hashed(name: String, hasher: &impl NameHasher) -> Self {
        Self::with_alias(hasher.hash_name(&name), name)
    }

    /// Create an identifier by hashing a non-empty name with the default hasher
    pub fn from_string(name: impl Into<String>) -> Result<Self, TypesystemError> {
        Self::from_string_with(name, &DEFAULT_HASHER)
    }

    /// Create an identifier by hashing a non-empty name with `hasher`
    pub fn from_string_with(
        name: impl Into<String>,
        hasher: &impl NameHasher,
    ) -> Result<Self, TypesystemError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypesystemError::invalid_argument(
                "identifier can not be generated from an empty string",
            ));
        }
        check_no_nul(name.as_bytes())?;
        Ok(Self::hashed(name, hasher))
    }

    /// Create an identifier from a raw value, without alias
    pub const fn from_raw(raw: i64) -> Self {
        Self {
            raw,
            alias: String::new(),
            utf8: Utf8Cache::new(),
            _kind: PhantomData,
        }
    }

    /// Create an identifier from a raw value and the alias it was generated from
    ///
    /// The alias is not re-hashed; the caller asserts that the two belong
    /// together. An empty alias is allowed; an interior NUL fails with
    /// `EncodingFailure`.
    pub fn from_raw_and_string(
        raw: i64,
        alias: impl Into<String>,
    ) -> Result<Self, TypesystemError> {
        let alias = alias.into();
        check_no_nul(alias.as_bytes())?;
        Ok(Self::with_alias(raw, alias))
    }

    /// Create an identifier from a raw value and an alias decoded off the wire
    ///
    /// Accepts the alias with or without its NUL terminator. Fails with
    /// `EncodingFailure` for invalid UTF-8 or an interior NUL.
    pub fn from_raw_and_utf8(raw: i64, bytes: &[u8]) -> Result<Self, TypesystemError> {
        let bytes = bytes.strip_suffix(&[0]).unwrap_or(bytes);
        check_no_nul(bytes)?;
        let alias = std::str::from_utf8(bytes)
            .map_err(|e| TypesystemError::encoding_failure(format!("alias is not UTF-8: {}", e)))?;
        Ok(Self::with_alias(raw, alias.to_owned()))
    }

    /// The raw 64-bit routing key
    #[inline(always)]
    pub const fn raw_value(&self) -> i64 {
        self.raw
    }

    /// The alias this identifier was created from, or `""` if none
    #[inline]
    pub fn raw_string(&self) -> &str {
        &self.alias
    }

    #[inline]
    pub fn has_alias(&self) -> bool {
        !self.alias.is_empty()
    }

    /// Strip the alias so it is not transmitted with the owning object
    pub fn remove_string(&mut self) {
        self.alias.clear();
        self.utf8.invalidate();
    }

    /// 32-bit hash derived from the low bits of the raw value
    #[inline(always)]
    pub const fn hash_code(&self) -> i32 {
        self.raw as i32
    }

    /// Length of the alias as null-terminated UTF-8, or 0 without alias
    pub fn utf8_length(&self) -> usize {
        self.utf8_bytes_with_nul().len()
    }

    /// UTF-8 encoding of the alias without terminator; empty without alias
    pub fn utf8_bytes(&self) -> &[u8] {
        if self.alias.is_empty() {
            return &[];
        }
        self.utf8.bytes(&self.alias)
    }

    /// UTF-8 encoding of the alias including its NUL terminator; empty without alias
    pub fn utf8_bytes_with_nul(&self) -> &[u8] {
        if self.alias.is_empty() {
            return &[];
        }
        self.utf8.with_nul(&self.alias)
    }

    /// Whether the alias hashes to the raw value under `hasher`
    ///
    /// An identifier without alias has nothing to contradict and returns true.
    pub fn alias_matches_hash(&self, hasher: &impl NameHasher) -> bool {
        self.alias.is_empty() || hasher.hash_name(&self.alias) == self.raw
    }
}

impl<K: WellKnownKind> Identifier<K> {
    /// The kind's "all" sentinel, e.g. `ALL_CHANNELS`
    pub fn all() -> Self {
        K::pair().all.clone()
    }

    pub fn is_all(&self) -> bool {
        self.raw == K::pair().all.raw
    }

    pub fn is_default(&self) -> bool {
        self.raw == K::pair().default.raw
    }
}

impl<K: IdKind> Identifier<K> {
    /// Human-readable form: the alias, a well-known name, or the decimal raw value
    pub fn display_string(&self) -> Cow<'_, str> {
        if !self.alias.is_empty() {
            return Cow::Borrowed(&self.alias);
        }
        match K::well_known() {
            Some(wk) if self.raw == wk.default.raw => Cow::Borrowed(wk.default.raw_string()),
            Some(wk) if self.raw == wk.all.raw => Cow::Borrowed(wk.all.raw_string()),
            _ => Cow::Owned(self.raw.to_string()),
        }
    }
}

impl<K: WellKnownKind> Default for Identifier<K> {
    /// The kind's well-known default, e.g. `DEFAULT_CHANNEL`
    fn default() -> Self {
        K::pair().default.clone()
    }
}

impl<K> Clone for Identifier<K> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw,
            alias: self.alias.clone(),
            utf8: self.utf8.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K> PartialEq for Identifier<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K> Eq for Identifier<K> {}

impl<K> PartialOrd for Identifier<K> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Identifier<K> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<K> Hash for Identifier<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl<K: IdKind> fmt::Debug for Identifier<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::NAME)
            .field("raw", &self.raw)
            .field("alias", &self.alias)
            .finish()
    }
}

impl<K: IdKind> fmt::Display for Identifier<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

impl<K> From<i64> for Identifier<K> {
    #[inline]
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl<K> From<Identifier<K>> for i64 {
    #[inline]
    fn from(id: Identifier<K>) -> i64 {
        id.raw
    }
}

impl<K> TryFrom<&str> for Identifier<K> {
    type Error = TypesystemError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::from_string(name)
    }
}

impl<K> TryFrom<String> for Identifier<K> {
    type Error = TypesystemError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_string(name)
    }
}

impl<K> FromStr for Identifier<K> {
    type Err = TypesystemError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_string(name)
    }
}

/// Construction policy applied to identifiers decoded from external input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentifierPolicy {
    /// Warn when an alias does not hash to the raw value it arrived with
    pub verify_alias_hashes: bool,
}

impl IdentifierPolicy {
    /// `Identifier::from_raw_and_string`, checking the pair when verification is on
    ///
    /// A mismatch is only logged; an alias with an interior NUL still fails.
    pub fn from_raw_and_string<K: IdKind>(
        &self,
        raw: i64,
        alias: impl Into<String>,
    ) -> Result<Identifier<K>, TypesystemError> {
        let id = Identifier::from_raw_and_string(raw, alias)?;
        if self.verify_alias_hashes && !id.alias_matches_hash(&DEFAULT_HASHER) {
            warn!(
                kind = K::NAME,
                raw,
                alias = id.raw_string(),
                "identifier alias does not hash to its raw value"
            );
        }
        Ok(id)
    }
}

#[cfg(feature = "serialization")]
mod serde_impl {
    use super::Identifier;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct IdentifierRef<'a> {
        value: i64,
        alias: &'a str,
    }

    #[derive(Deserialize)]
    struct IdentifierOwned {
        value: i64,
        #[serde(default)]
        alias: String,
    }

    // Serialized as {"value": raw, "alias": alias}; the alias is never re-hashed
    impl<K> Serialize for Identifier<K> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            IdentifierRef {
                value: self.raw_value(),
                alias: self.raw_string(),
            }
            .serialize(serializer)
        }
    }

    impl<'de, K> Deserialize<'de> for Identifier<K> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let repr = IdentifierOwned::deserialize(deserializer)?;
            Identifier::from_raw_and_string(repr.value, repr.alias).map_err(D::Error::custom)
        }
    }
}
