//! Fixed-length array of value containers
//!
//! The length of an array member is part of the type definition of the owning
//! object, so it is decided once at construction and never changes. Each slot
//! is a full [`ValueContainer`] with its own null and changed state.

use crate::common::errors::TypesystemError;

use super::{ChangeTracking, ValueContainer};

/// Fixed number of independently tracked value slots
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayContainer<T> {
    // Boxed slice: no push/truncate reachable, length fixed for the container's lifetime
    elements: Box<[ValueContainer<T>]>,
}

// Never empty, so no `is_empty`
#[allow(clippy::len_without_is_empty)]
impl<T> ArrayContainer<T> {
    /// Create an array of `size` null slots; `size` must be greater than zero
    pub fn new(size: usize) -> Result<Self, TypesystemError> {
        if size == 0 {
            return Err(TypesystemError::invalid_argument(
                "array size must be greater than zero",
            ));
        }
        Ok(Self {
            elements: (0..size).map(|_| ValueContainer::new()).collect(),
        })
    }

    /// Create an array from pre-built slots; the length is fixed to `elements.len()`
    pub fn from_elements(elements: Vec<ValueContainer<T>>) -> Result<Self, TypesystemError> {
        if elements.is_empty() {
            return Err(TypesystemError::invalid_argument(
                "array can not be created from an empty element list",
            ));
        }
        Ok(Self {
            elements: elements.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// The slot at `index`, or `IndexOutOfRange`
    pub fn get(&self, index: usize) -> Result<&ValueContainer<T>, TypesystemError> {
        TypesystemError::check_index(index, self.elements.len())?;
        Ok(&self.elements[index])
    }

    /// Mutable access to the slot at `index`, or `IndexOutOfRange`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut ValueContainer<T>, TypesystemError> {
        TypesystemError::check_index(index, self.elements.len())?;
        Ok(&mut self.elements[index])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValueContainer<T>> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ValueContainer<T>> {
        self.elements.iter_mut()
    }

    /// Whether any slot changed
    pub fn is_changed(&self) -> bool {
        self.elements.iter().any(ValueContainer::is_changed)
    }

    /// Set or reset the changed flag of every slot
    pub fn set_changed(&mut self, changed: bool) {
        for element in self.elements.iter_mut() {
            element.set_changed(changed);
        }
    }

    /// Copy every slot of `other`; fails with `InvalidArgument` if the lengths differ
    pub fn copy_from(&mut self, other: &Self) -> Result<(), TypesystemError>
    where
        T: Clone,
    {
        if self.len() != other.len() {
            return Err(TypesystemError::invalid_argument(format!(
                "can not copy array of length {} into array of length {}",
                other.len(),
                self.len()
            )));
        }
        for (target, source) in self.elements.iter_mut().zip(other.elements.iter()) {
            target.copy_from(source);
        }
        Ok(())
    }
}

impl<T> TryFrom<Vec<ValueContainer<T>>> for ArrayContainer<T> {
    type Error = TypesystemError;

    fn try_from(elements: Vec<ValueContainer<T>>) -> Result<Self, Self::Error> {
        Self::from_elements(elements)
    }
}

impl<'a, T> IntoIterator for &'a ArrayContainer<T> {
    type Item = &'a ValueContainer<T>;
    type IntoIter = std::slice::Iter<'a, ValueContainer<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArrayContainer<T> {
    type Item = &'a mut ValueContainer<T>;
    type IntoIter = std::slice::IterMut<'a, ValueContainer<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter_mut()
    }
}

impl<T> ChangeTracking for ArrayContainer<T> {
    fn is_changed(&self) -> bool {
        ArrayContainer::is_changed(self)
    }

    fn set_changed(&mut self, changed: bool) {
        ArrayContainer::set_changed(self, changed);
    }
}

// Serialized as a plain list of slots; deserializing an empty list fails like `from_elements`
#[cfg(feature = "serialization")]
mod serde_impl {
    use super::{ArrayContainer, ValueContainer};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl<T: Serialize> Serialize for ArrayContainer<T> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.elements.serialize(serializer)
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for ArrayContainer<T> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let elements = Vec::<ValueContainer<T>>::deserialize(deserializer)?;
            ArrayContainer::from_elements(elements).map_err(de::Error::custom)
        }
    }
}
