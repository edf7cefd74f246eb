//! The dynamic value model.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Key, Mapping, Record};
use crate::lazy::LazySeq;

/// A dynamically shaped value.
///
/// Materialized sequences, mappings and records own their elements; a
/// [`LazySeq`] is a shared handle to a producer.
///
/// # Equality
///
/// Equality is by value and strict: `Int(1) != Float(1.0)`, mappings and
/// records compare their entries in order, and two lazy sequences are equal
/// only if they are the same producer. Floats compare numerically except
/// that `NaN` equals itself, which keeps `Eq` and `Hash` coherent.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A string.
    Str(String),
    /// A materialized ordered sequence.
    Sequence(Vec<Value>),
    /// An insertion-ordered key/value mapping.
    Mapping(Mapping),
    /// A record of named fields.
    Record(Box<Record>),
    /// A lazily produced sequence.
    Lazy(LazySeq),
}

impl Value {
    /// Returns a short name of the concrete type, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Record(_) => "record",
            Self::Lazy(_) => "lazy sequence",
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is a [`Value::Bool`].
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the integer, if this is a [`Value::Int`].
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the number as a float, if this is an `Int` or a `Float`.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(number) => Some(*number as f64),
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the elements, if this is a materialized [`Value::Sequence`].
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping, if this is a [`Value::Mapping`].
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Returns the record, if this is a [`Value::Record`].
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the producer handle, if this is a [`Value::Lazy`].
    pub const fn as_lazy(&self) -> Option<&LazySeq> {
        match self {
            Self::Lazy(lazy) => Some(lazy),
            _ => None,
        }
    }

    /// Looks up one key in a materialized container without consuming it.
    ///
    /// Integer keys index sequences, any key indexes a mapping, and keys
    /// name record fields. Scalars and lazy sequences have no entries.
    pub fn lookup(&self, key: &Key) -> Option<&Self> {
        match self {
            Self::Sequence(items) => key.as_index().and_then(|index| items.get(index)),
            Self::Mapping(mapping) => mapping.get(key),
            Self::Record(record) => record.get(&key.field_name()),
            _ => None,
        }
    }

    /// Returns a clone of the field or entry called `name`, or `Null`.
    pub fn field(&self, name: &str) -> Self {
        self.lookup(&Key::from(name)).cloned().unwrap_or_default()
    }

    /// Compares two values, if they are comparable.
    ///
    /// Numbers compare numerically across `Int` and `Float`, strings and
    /// booleans compare naturally, nulls are equal to each other and
    /// materialized sequences compare lexicographically.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => Some(left.cmp(right)),
            (Self::Str(left), Self::Str(right)) => Some(left.cmp(right)),
            (Self::Bool(left), Self::Bool(right)) => Some(left.cmp(right)),
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Sequence(left), Self::Sequence(right)) => {
                for (left_item, right_item) in left.iter().zip(right) {
                    match left_item.compare(right_item)? {
                        Ordering::Equal => {}
                        decided => return Some(decided),
                    }
                }
                Some(left.len().cmp(&right.len()))
            }
            _ => self.as_float()?.partial_cmp(&other.as_float()?),
        }
    }
}

fn float_eq(left: f64, right: f64) -> bool {
    left == right || (left.is_nan() && right.is_nan())
}

fn float_bits(number: f64) -> u64 {
    if number == 0.0 {
        0
    } else if number.is_nan() {
        f64::NAN.to_bits()
    } else {
        number.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => float_eq(*left, *right),
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Sequence(left), Self::Sequence(right)) => left == right,
            (Self::Mapping(left), Self::Mapping(right)) => left == right,
            (Self::Record(left), Self::Record(right)) => left == right,
            (Self::Lazy(left), Self::Lazy(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(flag) => flag.hash(state),
            Self::Int(number) => number.hash(state),
            Self::Float(number) => float_bits(*number).hash(state),
            Self::Str(text) => text.hash(state),
            Self::Sequence(items) => items.hash(state),
            Self::Mapping(mapping) => mapping.hash(state),
            Self::Record(record) => record.hash(state),
            Self::Lazy(lazy) => lazy.address().hash(state),
        }
    }
}

/// Renders scalars plainly and containers in a JSON-like notation.
impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => formatter.write_str(text),
            other => write_nested(other, formatter),
        }
    }
}

fn write_nested(value: &Value, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Null => formatter.write_str("null"),
        Value::Bool(flag) => write!(formatter, "{flag}"),
        Value::Int(number) => write!(formatter, "{number}"),
        Value::Float(number) => write!(formatter, "{number}"),
        Value::Str(text) => write!(formatter, "{text:?}"),
        Value::Sequence(items) => {
            formatter.write_str("[")?;
            for (position, item) in items.iter().enumerate() {
                if position > 0 {
                    formatter.write_str(", ")?;
                }
                write_nested(item, formatter)?;
            }
            formatter.write_str("]")
        }
        Value::Mapping(mapping) => {
            formatter.write_str("{")?;
            for (position, (key, item)) in mapping.iter().enumerate() {
                if position > 0 {
                    formatter.write_str(", ")?;
                }
                write!(formatter, "{key}: ")?;
                write_nested(item, formatter)?;
            }
            formatter.write_str("}")
        }
        Value::Record(record) => {
            formatter.write_str("{")?;
            for (position, (name, item)) in record.iter().enumerate() {
                if position > 0 {
                    formatter.write_str(", ")?;
                }
                write!(formatter, "{name}: ")?;
                write_nested(item, formatter)?;
            }
            formatter.write_str("}")
        }
        Value::Lazy(_) => formatter.write_str("<lazy>"),
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Int(i64::from(number))
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Int(number)
    }
}

impl From<usize> for Value {
    fn from(number: usize) -> Self {
        Self::Int(i64::try_from(number).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Float(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Str(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(Box::new(record))
    }
}

impl From<LazySeq> for Value {
    fn from(lazy: LazySeq) -> Self {
        Self::Lazy(lazy)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iterable: I) -> Self {
        Self::Sequence(iterable.into_iter().collect())
    }
}

/// Builds a two-element `[key, value]` entry.
pub fn entry(key: impl Into<Value>, value: Value) -> Value {
    Value::Sequence(vec![key.into(), value])
}
