//! The shape dispatcher and the value model.
//!
//! Every value classifies into exactly one [`Shape`]:
//!
//! - [`Shape::Sequence`]: materialized sequences and lazy sequences
//! - [`Shape::Mapping`]: insertion-ordered key/value mappings
//! - [`Shape::Record`]: named-field records
//! - [`Shape::Scalar`]: strings, numbers, booleans and null
//!
//! Shape-polymorphic operations resolve their operand once, through
//! [`Value::shaped`], [`Value::shaped_mut`] or [`Value::into_shaped`], and
//! branch on the resulting view. The view carries the payload, so no
//! operation needs to probe the value's type a second time.
//!
//! # Examples
//!
//! ```rust
//! use shapefold::{classify, sequence, mapping, record, Shape, Value};
//!
//! assert_eq!(classify(&sequence![1, 2]), Shape::Sequence);
//! assert_eq!(classify(&mapping! { "a" => 1 }), Shape::Mapping);
//! assert_eq!(classify(&record! { a: 1 }), Shape::Record);
//! assert_eq!(classify(&Value::Null), Shape::Scalar);
//! ```

mod key;
mod macros;
mod mapping;
mod record;
#[cfg(feature = "serde")]
mod serde_impl;
mod value;

pub use key::Key;
pub use mapping::Mapping;
pub use record::Record;
pub use value::{Value, entry};

use crate::error::{Error, Result};
use crate::lazy::LazySeq;
use macros::shape_predicates;

/// The semantic shape of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Ordered, integer-indexed elements, materialized or lazy.
    Sequence,
    /// Unique keys to values, in insertion order.
    Mapping,
    /// Named fields, in insertion order.
    Record,
    /// A string, number, boolean or null.
    Scalar,
}

/// Classifies `value`. Pure, total and idempotent.
pub const fn classify(value: &Value) -> Shape {
    match value {
        Value::Sequence(_) | Value::Lazy(_) => Shape::Sequence,
        Value::Mapping(_) => Shape::Mapping,
        Value::Record(_) => Shape::Record,
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => {
            Shape::Scalar
        }
    }
}

shape_predicates!(Sequence, Mapping, Record, Scalar);

/// Returns `true` for strings.
pub const fn is_string(value: &Value) -> bool {
    matches!(value, Value::Str(_))
}

/// Returns `true` for integers.
pub const fn is_int(value: &Value) -> bool {
    matches!(value, Value::Int(_))
}

/// Returns `true` for integers and floats.
pub const fn is_number(value: &Value) -> bool {
    matches!(value, Value::Int(_) | Value::Float(_))
}

/// Returns `true` for null.
pub const fn is_null(value: &Value) -> bool {
    value.is_null()
}

/// A borrowed view of a sequence-shaped value.
#[derive(Clone, Copy, Debug)]
pub enum SequenceRef<'a> {
    /// The elements of a materialized sequence.
    Materialized(&'a [Value]),
    /// A lazy producer.
    Lazy(&'a LazySeq),
}

/// A mutable view of a sequence-shaped value.
#[derive(Debug)]
pub enum SequenceMut<'a> {
    /// The elements of a materialized sequence.
    Materialized(&'a mut Vec<Value>),
    /// A lazy producer.
    Lazy(&'a mut LazySeq),
}

/// An owned sequence-shaped payload.
#[derive(Clone, Debug)]
pub enum SequenceSource {
    /// The elements of a materialized sequence.
    Materialized(Vec<Value>),
    /// A lazy producer.
    Lazy(LazySeq),
}

impl SequenceSource {
    /// Converts the payload into a lazy producer without copying elements
    /// more than once.
    pub fn into_lazy(self) -> LazySeq {
        match self {
            Self::Materialized(items) => LazySeq::from_values(items),
            Self::Lazy(lazy) => lazy,
        }
    }

    /// Materializes the payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyConsumed`] for an exhausted one-shot producer.
    pub fn into_values(self, operation: &'static str) -> Result<Vec<Value>> {
        match self {
            Self::Materialized(items) => Ok(items),
            Self::Lazy(lazy) => lazy.materialize(operation),
        }
    }
}

/// A borrowed, classified view of a value.
#[derive(Clone, Copy, Debug)]
pub enum ShapedRef<'a> {
    /// A sequence-shaped value.
    Sequence(SequenceRef<'a>),
    /// A mapping.
    Mapping(&'a Mapping),
    /// A record.
    Record(&'a Record),
    /// A scalar.
    Scalar(&'a Value),
}

/// A mutable, classified view of a value.
#[derive(Debug)]
pub enum ShapedMut<'a> {
    /// A sequence-shaped value.
    Sequence(SequenceMut<'a>),
    /// A mapping.
    Mapping(&'a mut Mapping),
    /// A record.
    Record(&'a mut Record),
    /// A scalar.
    Scalar(&'a mut Value),
}

/// An owned, classified value.
#[derive(Clone, Debug)]
pub enum Shaped {
    /// A sequence-shaped value.
    Sequence(SequenceSource),
    /// A mapping.
    Mapping(Mapping),
    /// A record.
    Record(Box<Record>),
    /// A scalar.
    Scalar(Value),
}

impl ShapedRef<'_> {
    /// Returns the shape of the view.
    pub const fn shape(&self) -> Shape {
        match self {
            Self::Sequence(_) => Shape::Sequence,
            Self::Mapping(_) => Shape::Mapping,
            Self::Record(_) => Shape::Record,
            Self::Scalar(_) => Shape::Scalar,
        }
    }
}

impl Shaped {
    /// Returns the shape of the view.
    pub const fn shape(&self) -> Shape {
        match self {
            Self::Sequence(_) => Shape::Sequence,
            Self::Mapping(_) => Shape::Mapping,
            Self::Record(_) => Shape::Record,
            Self::Scalar(_) => Shape::Scalar,
        }
    }

    /// Returns the concrete type name of the payload.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Sequence(SequenceSource::Materialized(_)) => "sequence",
            Self::Sequence(SequenceSource::Lazy(_)) => "lazy sequence",
            Self::Mapping(_) => "mapping",
            Self::Record(_) => "record",
            Self::Scalar(scalar) => scalar.type_name(),
        }
    }

    /// Builds the [`Error::UnsupportedShape`] rejecting this operand.
    pub fn unsupported(&self, operation: &'static str) -> Error {
        Error::unsupported(operation, self.shape(), self.type_name())
    }

    /// Reassembles the value.
    pub fn into_value(self) -> Value {
        match self {
            Self::Sequence(SequenceSource::Materialized(items)) => Value::Sequence(items),
            Self::Sequence(SequenceSource::Lazy(lazy)) => Value::Lazy(lazy),
            Self::Mapping(mapping) => Value::Mapping(mapping),
            Self::Record(record) => Value::Record(record),
            Self::Scalar(scalar) => scalar,
        }
    }
}

impl Value {
    /// Returns the shape of this value.
    pub const fn shape(&self) -> Shape {
        classify(self)
    }

    /// Classifies this value into a borrowed view.
    pub fn shaped(&self) -> ShapedRef<'_> {
        match self {
            Self::Sequence(items) => ShapedRef::Sequence(SequenceRef::Materialized(items)),
            Self::Lazy(lazy) => ShapedRef::Sequence(SequenceRef::Lazy(lazy)),
            Self::Mapping(mapping) => ShapedRef::Mapping(mapping),
            Self::Record(record) => ShapedRef::Record(record),
            scalar => ShapedRef::Scalar(scalar),
        }
    }

    /// Classifies this value into a mutable view.
    pub fn shaped_mut(&mut self) -> ShapedMut<'_> {
        match self {
            Self::Sequence(items) => ShapedMut::Sequence(SequenceMut::Materialized(items)),
            Self::Lazy(lazy) => ShapedMut::Sequence(SequenceMut::Lazy(lazy)),
            Self::Mapping(mapping) => ShapedMut::Mapping(mapping),
            Self::Record(record) => ShapedMut::Record(record),
            scalar => ShapedMut::Scalar(scalar),
        }
    }

    /// Classifies this value into an owned view.
    pub fn into_shaped(self) -> Shaped {
        match self {
            Self::Sequence(items) => Shaped::Sequence(SequenceSource::Materialized(items)),
            Self::Lazy(lazy) => Shaped::Sequence(SequenceSource::Lazy(lazy)),
            Self::Mapping(mapping) => Shaped::Mapping(mapping),
            Self::Record(record) => Shaped::Record(record),
            scalar => Shaped::Scalar(scalar),
        }
    }
}
