//! Error types for identifier construction and container access
//!
//! Every failure raised by this crate is a [`TypesystemError`]. Variants map
//! one-to-one onto the contract that was violated, so callers can tell bad
//! input (`InvalidArgument`) from logic errors (`NullValueAccess`,
//! `IndexOutOfRange`) and environment errors (`EncodingFailure`).

use thiserror::Error;

/// Errors raised by identifiers and field containers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesystemError {
    /// Malformed construction input (empty name, zero array size, empty initializer)
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A value container was read while null
    #[error("Value is null")]
    NullValueAccess,

    /// Indexed access or mutation outside the current bounds
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An alias could not be represented as a null-terminated UTF-8 string
    #[error("Encoding failure: {reason}")]
    EncodingFailure { reason: String },
}

/// Coarse classification of a [`TypesystemError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NullValueAccess,
    IndexOutOfRange,
    EncodingFailure,
}

impl TypesystemError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn encoding_failure(reason: impl Into<String>) -> Self {
        Self::EncodingFailure {
            reason: reason.into(),
        }
    }

    /// Check `index` against `len`, returning `IndexOutOfRange` when outside `[0, len)`
    #[inline]
    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), Self> {
        if index >= len {
            return Err(Self::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// The kind of contract this error reports
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NullValueAccess => ErrorKind::NullValueAccess,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::EncodingFailure { .. } => ErrorKind::EncodingFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TypesystemError::IndexOutOfRange { index: 5, len: 5 };
        assert_eq!(err.to_string(), "Index 5 out of range for length 5");

        let err = TypesystemError::invalid_argument("array size must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid argument: array size must be greater than zero"
        );

        assert_eq!(TypesystemError::NullValueAccess.to_string(), "Value is null");
    }

    #[test]
    fn test_check_index_bounds() {
        assert!(TypesystemError::check_index(0, 1).is_ok());
        assert!(TypesystemError::check_index(4, 5).is_ok());
        assert_eq!(
            TypesystemError::check_index(5, 5),
            Err(TypesystemError::IndexOutOfRange { index: 5, len: 5 })
        );
        assert!(TypesystemError::check_index(0, 0).is_err());
    }

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            TypesystemError::invalid_argument("x").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            TypesystemError::NullValueAccess.kind(),
            ErrorKind::NullValueAccess
        );
        assert_eq!(
            TypesystemError::IndexOutOfRange { index: 1, len: 0 }.kind(),
            ErrorKind::IndexOutOfRange
        );
        assert_eq!(
            TypesystemError::encoding_failure("x").kind(),
            ErrorKind::EncodingFailure
        );
    }
}
