//! # Field Containers
//!
//! Every field of a Dob object lives in a container that records, next to the
//! value itself, whether the field is null and whether it changed since the
//! object was last transmitted. The codec relies on these two bits to send
//! only what changed.
//!
//! ## Container Kinds
//!
//! - [`ValueContainer<T>`]: one optional value
//! - [`ArrayContainer<T>`]: fixed number of value slots, each with its own
//!   null/changed state
//! - [`SequenceContainer<T>`]: growable list with one aggregate changed flag
//!
//! ## Change Tracking Protocol
//!
//! ```text
//!            set / set_null / push / clear ...
//! Unchanged ─────────────────────────────────▶ Changed
//!     ▲                                           │
//!     └──────────── set_changed(false) ───────────┘
//!                  (codec, after confirmed send)
//! ```
//!
//! Containers never reset the flag themselves. Reads never set it.

mod array;
mod sequence;
mod value;

pub use array::ArrayContainer;
pub use sequence::SequenceContainer;
pub use value::ValueContainer;

use tracing::debug;

use crate::common::entity_id::EntityId;
use crate::common::identifiers::{ChannelId, HandlerId, InstanceId};

/// Changed-flag protocol shared by every container kind
pub trait ChangeTracking {
    /// Whether the container was mutated since the flag was last reset
    fn is_changed(&self) -> bool;

    /// Set or reset the changed flag; the codec resets it after a send
    fn set_changed(&mut self, changed: bool);
}

/// Null protocol for containers that can be cleared as a whole
pub trait Container: ChangeTracking {
    fn is_null(&self) -> bool;

    /// Make the container null and mark it changed
    fn set_null(&mut self);
}

/// Reset the changed flag of every container after a confirmed transmission
///
/// Returns how many of them were changed before the reset.
pub fn mark_sent<'a, I>(containers: I) -> usize
where
    I: IntoIterator<Item = &'a mut dyn ChangeTracking>,
{
    let mut total = 0;
    let mut was_changed = 0;
    for container in containers {
        total += 1;
        if container.is_changed() {
            was_changed += 1;
            container.set_changed(false);
        }
    }
    debug!(total, was_changed, "reset changed flags after send");
    was_changed
}

/// Whether any of the containers has pending changes
pub fn any_changed<'a, I>(containers: I) -> bool
where
    I: IntoIterator<Item = &'a dyn ChangeTracking>,
{
    containers.into_iter().any(|c| c.is_changed())
}

// ================================
// Common Instantiations
// ================================

pub type Int32Container = ValueContainer<i32>;
pub type Int64Container = ValueContainer<i64>;
pub type Float32Container = ValueContainer<f32>;
pub type Float64Container = ValueContainer<f64>;
pub type BooleanContainer = ValueContainer<bool>;
pub type StringContainer = ValueContainer<String>;
pub type ChannelIdContainer = ValueContainer<ChannelId>;
pub type HandlerIdContainer = ValueContainer<HandlerId>;
pub type InstanceIdContainer = ValueContainer<InstanceId>;
pub type EntityIdContainer = ValueContainer<EntityId>;

pub type Int32Array = ArrayContainer<i32>;
pub type Int64Array = ArrayContainer<i64>;
pub type Float32Array = ArrayContainer<f32>;
pub type Float64Array = ArrayContainer<f64>;
pub type BooleanArray = ArrayContainer<bool>;
pub type StringArray = ArrayContainer<String>;
pub type ChannelIdArray = ArrayContainer<ChannelId>;
pub type HandlerIdArray = ArrayContainer<HandlerId>;
pub type InstanceIdArray = ArrayContainer<InstanceId>;
pub type EntityIdArray = ArrayContainer<EntityId>;

pub type Int32Sequence = SequenceContainer<i32>;
pub type Int64Sequence = SequenceContainer<i64>;
pub type Float32Sequence = SequenceContainer<f32>;
pub type Float64Sequence = SequenceContainer<f64>;
pub type BooleanSequence = SequenceContainer<bool>;
pub type StringSequence = SequenceContainer<String>;
pub type ChannelIdSequence = SequenceContainer<ChannelId>;
pub type HandlerIdSequence = SequenceContainer<HandlerId>;
pub type InstanceIdSequence = SequenceContainer<InstanceId>;
pub type EntityIdSequence = SequenceContainer<EntityId>;
