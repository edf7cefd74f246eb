//! Membership predicates.
//!
//! Sequences, mappings and lazy sequences are searched by value, records
//! by field name and strings by substring.

use crate::error::{Error, Result};
use crate::shape::{SequenceRef, ShapedRef, Value};

fn contains(container: &Value, needle: &Value, operation: &'static str) -> Result<bool> {
    match container.shaped() {
        ShapedRef::Sequence(SequenceRef::Materialized(items)) => Ok(items.contains(needle)),
        ShapedRef::Sequence(SequenceRef::Lazy(lazy)) => {
            Ok(lazy.open(operation)?.any(|item| item == *needle))
        }
        ShapedRef::Mapping(mapping) => Ok(mapping.values().any(|value| value == needle)),
        ShapedRef::Record(record) => {
            Ok(needle.as_str().is_some_and(|name| record.contains(name)))
        }
        ShapedRef::Scalar(Value::Str(text)) => Ok(text.contains(&needle.to_string())),
        ShapedRef::Scalar(scalar) => {
            Err(Error::unsupported(operation, scalar.shape(), scalar.type_name()))
        }
    }
}

/// Tests whether a value is a member of `container`.
///
/// A lazy container is searched through a fresh cursor on every call, so
/// it should be restartable.
///
/// # Errors
///
/// Returns [`Error::UnsupportedShape`] when `container` is a scalar other
/// than a string, and [`Error::AlreadyConsumed`] when it is an exhausted
/// one-shot sequence.
///
/// # Examples
///
/// ```rust
/// use shapefold::access::inside;
/// use shapefold::{record, sequence, Value};
///
/// assert!(inside(sequence![1, 2, 3])(&Value::Int(2)).unwrap());
/// assert!(inside(record! { size: "m" })(&Value::from("size")).unwrap());
/// assert!(inside(Value::from("teapot"))(&Value::from("pot")).unwrap());
/// assert!(inside(Value::Int(5))(&Value::Int(5)).is_err());
/// ```
pub fn inside(container: Value) -> impl Fn(&Value) -> Result<bool> {
    move |needle| contains(&container, needle, "inside")
}

/// The negation of [`inside`].
///
/// # Errors
///
/// Same as [`inside`].
pub fn outside(container: Value) -> impl Fn(&Value) -> Result<bool> {
    move |needle| contains(&container, needle, "outside").map(|found| !found)
}

/// Tests whether a container holds `needle`; the flipped form of
/// [`inside`].
///
/// # Errors
///
/// Same as [`inside`], for the container it is applied to.
pub fn has(needle: Value) -> impl Fn(&Value) -> Result<bool> {
    move |container| contains(container, &needle, "has")
}

/// The negation of [`has`].
///
/// # Errors
///
/// Same as [`has`].
pub fn hasnt(needle: Value) -> impl Fn(&Value) -> Result<bool> {
    move |container| contains(container, &needle, "hasnt").map(|found| !found)
}
