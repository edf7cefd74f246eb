//! Mapping keys and `get` walk steps.

use std::borrow::Cow;
use std::fmt;

use super::Value;
use crate::error::{Error, Result};

/// A key of a [`Mapping`](super::Mapping), or one step of a `get` walk.
///
/// Integer keys index sequences; string keys name record fields. Both kinds
/// may key a mapping.
///
/// A string spelling a canonical decimal integer (`"0"`, `"-7"`, but not
/// `"07"`, `"+7"` or `"-0"`) becomes an integer key, so `"1"` and `1` name
/// the same entry.
///
/// # Examples
///
/// ```rust
/// use shapefold::Key;
///
/// assert_eq!(Key::from(3).as_index(), Some(3));
/// assert_eq!(Key::from("size").field_name(), "size");
/// assert_eq!(Key::from(7).field_name(), "7");
/// assert_eq!(Key::from("7"), Key::Int(7));
/// assert_eq!(Key::from("07"), Key::Str("07".into()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// An integer key.
    Int(i64),
    /// A string key.
    Str(String),
}

impl Key {
    /// Converts a scalar value into a key.
    ///
    /// Booleans become `0`/`1`, null becomes the empty string and floats are
    /// truncated toward zero. Structured values cannot key a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedShape`] when `value` is not a scalar.
    pub fn from_value(value: Value, operation: &'static str) -> Result<Self> {
        match value {
            Value::Int(number) => Ok(Self::Int(number)),
            Value::Str(text) => Ok(Self::from(text)),
            Value::Bool(flag) => Ok(Self::Int(i64::from(flag))),
            Value::Null => Ok(Self::Str(String::new())),
            #[allow(clippy::cast_possible_truncation)]
            Value::Float(number) => Ok(Self::Int(number.trunc() as i64)),
            other => Err(Error::unsupported(operation, other.shape(), other.type_name())),
        }
    }

    /// Returns the key as a sequence index, if it is a non-negative integer.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Int(number) => usize::try_from(*number).ok(),
            Self::Str(_) => None,
        }
    }

    /// Returns the key as a record field name.
    pub fn field_name(&self) -> Cow<'_, str> {
        match self {
            Self::Int(number) => Cow::Owned(number.to_string()),
            Self::Str(text) => Cow::Borrowed(text),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(number) => write!(formatter, "{number}"),
            Self::Str(text) => write!(formatter, "{text:?}"),
        }
    }
}

impl From<i64> for Key {
    fn from(number: i64) -> Self {
        Self::Int(number)
    }
}

impl From<i32> for Key {
    fn from(number: i32) -> Self {
        Self::Int(i64::from(number))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Int(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

/// Parses `text` only when it is the exact decimal spelling of an `i64`.
fn canonical_int(text: &str) -> Option<i64> {
    let number = text.parse::<i64>().ok()?;
    (number.to_string() == text).then_some(number)
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        canonical_int(text).map_or_else(|| Self::Str(text.to_owned()), Self::Int)
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        canonical_int(&text).map_or(Self::Str(text), Self::Int)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(number) => Self::Int(number),
            Key::Str(text) => Self::Str(text),
        }
    }
}
