//! Ordered named-field records.
//!
//! A [`Record`] is the explicit replacement for dynamic object properties:
//! fields are looked up by name and iterate in insertion order. Most
//! records are small, so fields live inline until the ninth one.

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use super::Value;

/// Number of fields stored inline before spilling to the heap.
const INLINE_FIELDS: usize = 8;

/// A structure of named fields in insertion order.
///
/// # Examples
///
/// ```rust
/// use shapefold::{Record, Value};
///
/// let mut record = Record::new();
/// record.set("size", Value::from("m"));
/// record.set("colour", Value::from("blue"));
/// record.set("size", Value::from("l"));
///
/// assert_eq!(record.get("size"), Some(&Value::from("l")));
/// assert_eq!(record.names().collect::<Vec<_>>(), vec!["size", "colour"]);
/// ```
#[derive(Clone, Default)]
pub struct Record {
    fields: SmallVec<[(String, Value); INLINE_FIELDS]>,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new() -> Self {
        Self {
            fields: SmallVec::new(),
        }
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(field, _)| field == name)
    }

    /// Returns the value of field `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.position(name).map(|position| &self.fields[position].1)
    }

    /// Returns a mutable reference to the value of field `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let position = self.position(name)?;
        Some(&mut self.fields[position].1)
    }

    /// Returns `true` if the record has a field called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Sets field `name`, adding it at the end if it is new.
    ///
    /// Returns the previous value of the field.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        match self.position(&name) {
            Some(position) => Some(std::mem::replace(&mut self.fields[position].1, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    /// Removes field `name`, preserving the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let position = self.position(name)?;
        Some(self.fields.remove(position).1)
    }

    /// Consumes the record and returns the value of field `name`.
    pub fn take(mut self, name: &str) -> Option<Value> {
        let position = self.position(name)?;
        Some(self.fields.swap_remove(position).1)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterates over the field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over the field values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }

    /// Consumes the record, yielding its values in insertion order.
    pub fn into_values(self) -> impl Iterator<Item = Value> {
        self.fields.into_iter().map(|(_, value)| value)
    }

    /// Reverses the field order.
    pub fn reverse(&mut self) {
        self.fields.reverse();
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fields.len().hash(state);
        for (name, value) in &self.fields {
            name.hash(state);
            value.hash(state);
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = formatter.debug_struct("Record");
        for (name, value) in &self.fields {
            debug.field(name, value);
        }
        debug.finish()
    }
}

impl<N: Into<String>> FromIterator<(N, Value)> for Record {
    /// Builds a record; later duplicate names overwrite earlier ones.
    fn from_iter<I: IntoIterator<Item = (N, Value)>>(iterable: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iterable {
            record.set(name, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = smallvec::IntoIter<[(String, Value); INLINE_FIELDS]>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
