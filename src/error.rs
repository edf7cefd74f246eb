//! Error types for shape-polymorphic combinators.
//!
//! Every failing operation reports one [`Error`] synchronously, at the call
//! that failed. Lazy sequences never carry errors inside their output: a
//! combinator either rejects its operand up front or produces a sequence
//! that cannot fail.

use crate::shape::{Key, Shape};

/// A specialized `Result` for combinator operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Represents the errors raised by combinators and accessors.
///
/// # Examples
///
/// ```rust
/// use shapefold::{Error, Shape};
///
/// let error = Error::unsupported("len", Shape::Scalar, "int");
/// assert_eq!(
///     format!("{error}"),
///     "len: unsupported shape Scalar (int)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The operation is not defined for the shape of its operand.
    UnsupportedShape {
        /// The name of the operation that rejected the operand.
        operation: &'static str,
        /// The resolved shape of the operand.
        shape: Shape,
        /// The concrete type of the operand (`"int"`, `"lazy sequence"`, ...).
        found: &'static str,
    },
    /// A caller-supplied parameter is invalid, e.g. a zero batch size.
    Configuration {
        /// The name of the operation that was misconfigured.
        operation: &'static str,
        /// A human-readable description of the problem.
        reason: String,
    },
    /// A strict `get` walk met a key that is absent from its container.
    KeyNotFound {
        /// The missing key.
        key: Key,
        /// The position of the key in the walk (0-based).
        depth: usize,
    },
    /// A one-shot lazy sequence was consumed a second time.
    AlreadyConsumed {
        /// The name of the operation that attempted the second consumption.
        operation: &'static str,
    },
}

impl Error {
    /// Creates an [`Error::UnsupportedShape`].
    pub fn unsupported(operation: &'static str, shape: Shape, found: &'static str) -> Self {
        tracing::debug!(operation, ?shape, found, "unsupported shape");
        Self::UnsupportedShape {
            operation,
            shape,
            found,
        }
    }

    /// Creates an [`Error::Configuration`].
    pub fn configuration(operation: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(operation, reason = %reason, "invalid configuration");
        Self::Configuration { operation, reason }
    }

    /// Creates an [`Error::KeyNotFound`].
    pub fn key_not_found(key: Key, depth: usize) -> Self {
        tracing::debug!(%key, depth, "key not found");
        Self::KeyNotFound { key, depth }
    }

    /// Creates an [`Error::AlreadyConsumed`].
    pub fn already_consumed(operation: &'static str) -> Self {
        tracing::debug!(operation, "one-shot sequence already consumed");
        Self::AlreadyConsumed { operation }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedShape {
                operation,
                shape,
                found,
            } => write!(formatter, "{operation}: unsupported shape {shape:?} ({found})"),
            Self::Configuration { operation, reason } => {
                write!(formatter, "{operation}: invalid configuration: {reason}")
            }
            Self::KeyNotFound { key, depth } => {
                write!(formatter, "key {key} not found at depth {depth}")
            }
            Self::AlreadyConsumed { operation } => write!(
                formatter,
                "{operation}: one-shot sequence already consumed. Use a restartable producer to iterate more than once."
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_shape_display() {
        let error = Error::unsupported("len", Shape::Scalar, "bool");
        assert_eq!(format!("{error}"), "len: unsupported shape Scalar (bool)");
    }

    #[test]
    fn test_configuration_display() {
        let error = Error::configuration("batch", "size must be positive");
        assert_eq!(
            format!("{error}"),
            "batch: invalid configuration: size must be positive"
        );
    }

    #[test]
    fn test_key_not_found_display() {
        let error = Error::key_not_found(Key::from("colour"), 1);
        assert_eq!(format!("{error}"), "key \"colour\" not found at depth 1");
    }

    #[test]
    fn test_already_consumed_display() {
        let error = Error::already_consumed("map");
        assert_eq!(
            format!("{error}"),
            "map: one-shot sequence already consumed. Use a restartable producer to iterate more than once."
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            Error::already_consumed("filter"),
            Error::already_consumed("filter")
        );
        assert_ne!(
            Error::already_consumed("filter"),
            Error::already_consumed("map")
        );
    }
}
