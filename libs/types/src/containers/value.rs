//! Single-value field container

use crate::common::errors::TypesystemError;

use super::{ChangeTracking, Container};

/// One optional value plus a changed flag
///
/// Created null and unchanged. Every mutation, including [`set_null`](Self::set_null),
/// marks the container changed. Cloning copies both the value (through `T::clone`,
/// so nested containers are deep-copied) and the changed flag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueContainer<T> {
    value: Option<T>,
    changed: bool,
}

impl<T> ValueContainer<T> {
    /// Create a null, unchanged container
    pub const fn new() -> Self {
        Self {
            value: None,
            changed: false,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// The value, or `NullValueAccess` if the container is null
    pub fn get(&self) -> Result<&T, TypesystemError> {
        self.value.as_ref().ok_or(TypesystemError::NullValueAccess)
    }

    /// The value, or `None` if the container is null
    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Store `value` and mark the container changed
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
        self.changed = true;
    }

    /// Clear the value and mark the container changed
    pub fn set_null(&mut self) {
        self.value = None;
        self.changed = true;
    }

    /// Move the value out, leaving the container null and changed
    pub fn take(&mut self) -> Option<T> {
        self.changed = true;
        self.value.take()
    }

    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    #[inline]
    pub fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    /// Whether the container holds a value equal to `other`
    pub fn value_eq(&self, other: &T) -> bool
    where
        T: PartialEq,
    {
        self.value.as_ref() == Some(other)
    }

    /// Overwrite value and changed flag with those of `other`
    pub fn copy_from(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.value.clone_from(&other.value);
        self.changed = other.changed;
    }
}

impl<T> Default for ValueContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<T> for ValueContainer<T> {
    /// A container holding `value`, marked changed
    fn from(value: T) -> Self {
        Self {
            value: Some(value),
            changed: true,
        }
    }
}

impl<T> ChangeTracking for ValueContainer<T> {
    fn is_changed(&self) -> bool {
        self.changed
    }

    fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }
}

impl<T> Container for ValueContainer<T> {
    fn is_null(&self) -> bool {
        self.value.is_none()
    }

    fn set_null(&mut self) {
        ValueContainer::set_null(self);
    }
}
