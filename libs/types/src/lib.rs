//! # Dob Typesystem Containers
//!
//! Field containers and hashed identifiers for objects exchanged on the Dob
//! publish/subscribe bus.
//!
//! ## Design Philosophy
//!
//! - **Every field knows its state**: containers record whether a field is
//!   null and whether it changed since the last transmission
//! - **Delta-aware codecs**: the codec reads the changed bits to send only what
//!   changed, then resets them after a confirmed send
//! - **Integer routing, readable logs**: identifiers route on a 64-bit hash of
//!   a name and keep the name as an optional alias; entity references pair a
//!   type id with such an instance identifier
//! - **No shared ownership**: containers are owned by one object; cloning is
//!   always deep
//!
//! ## Quick Start
//!
//! ### Identifiers
//! ```rust
//! use dob_types::ChannelId;
//!
//! let lobby = ChannelId::from_string("Lobby")?;
//! let same = ChannelId::from_raw(lobby.raw_value());
//! assert_eq!(lobby, same);
//! assert_eq!(lobby.utf8_bytes_with_nul(), b"Lobby\0");
//! assert!(ChannelId::all().is_all());
//! # Ok::<(), dob_types::TypesystemError>(())
//! ```
//!
//! ### Containers
//! ```rust
//! use dob_types::{mark_sent, ChangeTracking, Int32Array, Int32Sequence, StringContainer};
//!
//! let mut name = StringContainer::new();
//! let mut scores = Int32Sequence::new();
//! let mut slots = Int32Array::new(4)?;
//!
//! name.set("Alice".to_string());
//! scores.push(42);
//! slots.get_mut(2)?.set(7);
//!
//! // After the codec has sent the object it resets the changed flags
//! let reset = mark_sent([
//!     &mut name as &mut dyn ChangeTracking,
//!     &mut scores,
//!     &mut slots,
//! ]);
//! assert_eq!(reset, 3);
//! assert_eq!(name.get()?, "Alice");
//! # Ok::<(), dob_types::TypesystemError>(())
//! ```
//!
//! ## Integration Points
//!
//! - **Codec**: walks containers through `is_null`/`get`/`len`/iteration and
//!   calls [`mark_sent`] after a confirmed send
//! - **Name hashing**: [`NameHasher`] is the seam for the 64-bit name hash;
//!   [`Sha3NameHasher`] is the process default
//! - **Configuration**: `dob-config` loads logging and identifier policy settings

pub mod common;
pub mod containers;

// Re-export error types
pub use common::errors::{ErrorKind, TypesystemError};

// Re-export identifier types
pub use common::hashing::{generate64, NameHasher, Sha3NameHasher, DEFAULT_HASHER};
pub use common::entity_id::EntityId;
pub use common::identifiers::{
    ChannelId, ChannelKind, HandlerId, HandlerKind, IdKind, Identifier, IdentifierPolicy,
    InstanceId, InstanceKind, WellKnown, WellKnownKind,
};

// Re-export containers
pub use containers::{
    any_changed, mark_sent, ArrayContainer, BooleanArray, BooleanContainer, BooleanSequence,
    ChangeTracking, ChannelIdArray, ChannelIdContainer, ChannelIdSequence, Container,
    EntityIdArray, EntityIdContainer, EntityIdSequence, Float32Array, Float32Container,
    Float32Sequence, Float64Array, Float64Container, Float64Sequence, HandlerIdArray,
    HandlerIdContainer, HandlerIdSequence, InstanceIdArray, InstanceIdContainer,
    InstanceIdSequence, Int32Array, Int32Container, Int32Sequence, Int64Array, Int64Container,
    Int64Sequence, SequenceContainer, StringArray, StringContainer, StringSequence,
    ValueContainer,
};

// Define Result type alias
pub type Result<T> = std::result::Result<T, TypesystemError>;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
