//! Entity references: a type id paired with an instance id
//!
//! Equality, ordering and hashing use the type id and the instance's raw value.
//! The instance alias is carried for display only.

use std::fmt;

use super::errors::TypesystemError;
use super::identifiers::InstanceId;

/// Reference to one entity: its type id and its instance
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId {
    type_id: i64,
    instance: InstanceId,
}

impl EntityId {
    pub fn new(type_id: i64, instance: InstanceId) -> Self {
        Self { type_id, instance }
    }

    /// Entity of `type_id` whose instance is hashed from `name`
    pub fn from_instance_name(
        type_id: i64,
        name: impl Into<String>,
    ) -> Result<Self, TypesystemError> {
        Ok(Self::new(type_id, InstanceId::from_string(name)?))
    }

    #[inline]
    pub fn type_id(&self) -> i64 {
        self.type_id
    }

    #[inline]
    pub fn instance(&self) -> &InstanceId {
        &self.instance
    }

    pub fn set_instance(&mut self, instance: InstanceId) {
        self.instance = instance;
    }

    /// Strip the instance alias so it is not transmitted
    pub fn remove_string(&mut self) {
        self.instance.remove_string();
    }

    /// 32-bit hash mixing the type id with the instance hash code
    pub fn hash_code(&self) -> i32 {
        (self.type_id as i32) ^ self.instance.hash_code()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.type_id, self.instance)
    }
}
