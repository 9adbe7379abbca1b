//! Variable-length sequence container
//!
//! Sequence members hold plain values (no per-element null state) and track
//! changes for the sequence as a whole: any structural mutation marks it
//! changed. Failed index checks leave the sequence exactly as it was.

use crate::common::errors::TypesystemError;

use super::{ChangeTracking, Container};

/// Ordered, growable list of `T` with an aggregate changed flag
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceContainer<T> {
    values: Vec<T>,
    changed: bool,
}

impl<T> SequenceContainer<T> {
    /// Create an empty, unchanged sequence
    pub const fn new() -> Self {
        Self {
            values: Vec::new(),
            changed: false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `index`, or `IndexOutOfRange`
    pub fn get(&self, index: usize) -> Result<&T, TypesystemError> {
        TypesystemError::check_index(index, self.values.len())?;
        Ok(&self.values[index])
    }

    pub fn first(&self) -> Option<&T> {
        self.values.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.values.last()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Append `value`
    pub fn push(&mut self, value: T) {
        self.values.push(value);
        self.changed = true;
    }

    /// Insert `value` before `index`; `index == len()` appends
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), TypesystemError> {
        if index > self.values.len() {
            return Err(TypesystemError::IndexOutOfRange {
                index,
                len: self.values.len(),
            });
        }
        self.values.insert(index, value);
        self.changed = true;
        Ok(())
    }

    /// Remove and return the value at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<T, TypesystemError> {
        TypesystemError::check_index(index, self.values.len())?;
        self.changed = true;
        Ok(self.values.remove(index))
    }

    /// Replace the value at `index`, returning the previous one
    pub fn replace(&mut self, index: usize, value: T) -> Result<T, TypesystemError> {
        TypesystemError::check_index(index, self.values.len())?;
        self.changed = true;
        Ok(std::mem::replace(&mut self.values[index], value))
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.changed = true;
    }

    /// Replace the whole content with `values`
    pub fn set_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.values.clear();
        self.values.extend(values);
        self.changed = true;
    }

    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    #[inline]
    pub fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    /// Overwrite content and changed flag with those of `other`
    pub fn copy_from(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.values.clone_from(&other.values);
        self.changed = other.changed;
    }
}

impl<T> Default for SequenceContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for SequenceContainer<T> {
    /// A sequence holding `values`, marked changed
    fn from(values: Vec<T>) -> Self {
        Self {
            values,
            changed: true,
        }
    }
}

impl<T> Extend<T> for SequenceContainer<T> {
    /// Append every value; marks the sequence changed if anything was appended
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let before = self.values.len();
        self.values.extend(iter);
        if self.values.len() != before {
            self.changed = true;
        }
    }
}

impl<'a, T> IntoIterator for &'a SequenceContainer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T> ChangeTracking for SequenceContainer<T> {
    fn is_changed(&self) -> bool {
        self.changed
    }

    fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }
}

impl<T> Container for SequenceContainer<T> {
    /// An empty sequence is null
    fn is_null(&self) -> bool {
        self.values.is_empty()
    }

    fn set_null(&mut self) {
        self.clear();
    }
}
