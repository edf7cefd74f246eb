//! Shape-polymorphic accessors.
//!
//! This module reads and writes the entries of any container shape:
//!
//! - [`get`] / [`get_strict`] / [`get_from`]: walk keys through nested
//!   sequences, mappings, records and lazy sequences
//! - [`set`] / [`change`] / [`update`]: write entries in place
//! - [`keys`] / [`entries`]: enumerate a container
//! - [`len`] / [`is_empty`] / [`non_empty`]: measure a container
//! - [`inside`] / [`outside`] / [`has`] / [`hasnt`]: membership tests
//!
//! Writers take their container by value, mutate it and hand it back.
//!
//! # Examples
//!
//! ```rust
//! use shapefold::access::{get, set};
//! use shapefold::{mapping, sequence, Key, Value};
//!
//! let order = mapping! { "items" => sequence!["tea", "cake"] };
//! let lookup = get([Key::from("items"), Key::from(1)]);
//! assert_eq!(lookup(order.clone()).unwrap(), Value::from("cake"));
//!
//! let updated = set("paid", Value::Bool(true))(order).unwrap();
//! assert_eq!(updated.field("paid"), Value::Bool(true));
//! ```

mod membership;

pub use membership::{has, hasnt, inside, outside};

use crate::error::{Error, Result};
use crate::lazy::cursor::{EnumerateCursor, MapCursor};
use crate::lazy::Cursor;
use crate::shape::{
    Key, SequenceMut, SequenceRef, SequenceSource, Shaped, ShapedMut, ShapedRef, Value, entry,
};

/// The largest number of `Null` slots a sequence write may pad in before
/// the written index.
pub const MAX_SET_PADDING: usize = 1 << 16;

/// The outcome of one step of a key walk.
enum Step {
    Found(Value),
    Absent,
    Stopped(Value),
}

fn step(current: Value, key: &Key, operation: &'static str) -> Result<Step> {
    let found = match current {
        Value::Sequence(items) => key.as_index().and_then(|index| items.into_iter().nth(index)),
        Value::Lazy(lazy) => match key.as_index() {
            Some(index) => lazy.open(operation)?.nth(index),
            None => None,
        },
        Value::Mapping(mapping) => mapping.take(key),
        Value::Record(record) => record.take(&key.field_name()),
        scalar => return Ok(Step::Stopped(scalar)),
    };
    Ok(found.map_or(Step::Absent, Step::Found))
}

fn walk(mut current: Value, keys: &[Key], strict: bool) -> Result<Value> {
    let operation = if strict { "get_strict" } else { "get" };
    for (depth, key) in keys.iter().enumerate() {
        match step(current, key, operation)? {
            Step::Found(next) => current = next,
            Step::Stopped(scalar) => return Ok(scalar),
            Step::Absent if strict => return Err(Error::key_not_found(key.clone(), depth)),
            Step::Absent => return Ok(Value::Null),
        }
    }
    Ok(current)
}

/// Walks `keys` through nested containers.
///
/// A scalar reached before the keys run out is returned as-is. An absent
/// key yields `Null`; use [`get_strict`] to tell the two apart.
///
/// # Errors
///
/// Returns [`Error::AlreadyConsumed`] when the walk meets an exhausted
/// one-shot sequence.
///
/// # Examples
///
/// ```rust
/// use shapefold::access::get;
/// use shapefold::{record, Value};
///
/// let shirt = record! { size: "m" };
/// assert_eq!(get(["size"])(shirt.clone()).unwrap(), Value::from("m"));
/// assert_eq!(get(["colour"])(shirt.clone()).unwrap(), Value::Null);
/// assert_eq!(get(["size", "deeper"])(shirt).unwrap(), Value::from("m"));
/// ```
pub fn get<I>(keys: I) -> impl Fn(Value) -> Result<Value>
where
    I: IntoIterator,
    I::Item: Into<Key>,
{
    let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
    move |subject| walk(subject, &keys, false)
}

/// Walks `keys` through nested containers, failing on absent keys.
///
/// # Errors
///
/// Returns [`Error::KeyNotFound`] naming the first absent key and its
/// position in the walk, and [`Error::AlreadyConsumed`] for an exhausted
/// one-shot sequence.
pub fn get_strict<I>(keys: I) -> impl Fn(Value) -> Result<Value>
where
    I: IntoIterator,
    I::Item: Into<Key>,
{
    let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
    move |subject| walk(subject, &keys, true)
}

/// Looks up keys in a fixed container; the flipped form of `get`.
///
/// Each call converts its argument with [`Key::from_value`] and returns
/// the entry, or `Null` when it is absent or the container is a scalar.
///
/// # Errors
///
/// Returns [`Error::UnsupportedShape`] for a key that is not a scalar,
/// and [`Error::AlreadyConsumed`] for an exhausted one-shot container.
pub fn get_from(container: Value) -> impl Fn(Value) -> Result<Value> {
    move |key| {
        let key = Key::from_value(key, "get_from")?;
        match &container {
            Value::Lazy(lazy) => Ok(match key.as_index() {
                Some(index) => lazy.open("get_from")?.nth(index).unwrap_or_default(),
                None => Value::Null,
            }),
            materialized => Ok(materialized.lookup(&key).cloned().unwrap_or_default()),
        }
    }
}

impl Value {
    /// Writes `value` under `key`.
    ///
    /// Sequences accept non-negative integer indexes: writing at the length
    /// appends and writing past it pads with at most [`MAX_SET_PADDING`]
    /// `Null`s. Mappings insert or overwrite in place, and records set or
    /// add a field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for a negative or non-integer
    /// sequence index or one that would need more padding than
    /// [`MAX_SET_PADDING`], and [`Error::UnsupportedShape`] for scalars and
    /// lazy sequences.
    pub fn set_key(&mut self, key: Key, value: Self) -> Result<()> {
        self.set_key_for("set", key, value)
    }

    fn set_key_for(&mut self, operation: &'static str, key: Key, value: Self) -> Result<()> {
        let (shape, found) = (self.shape(), self.type_name());
        match self.shaped_mut() {
            ShapedMut::Sequence(SequenceMut::Materialized(items)) => {
                let index = key.as_index().ok_or_else(|| {
                    Error::configuration(operation, format!("{key} is not a sequence index"))
                })?;
                let padding = index.saturating_sub(items.len());
                if padding > MAX_SET_PADDING {
                    return Err(Error::configuration(
                        operation,
                        format!("index {index} pads more than {MAX_SET_PADDING} slots"),
                    ));
                }
                if index >= items.len() {
                    items.resize(index + 1, Self::Null);
                }
                items[index] = value;
                Ok(())
            }
            ShapedMut::Mapping(mapping) => {
                mapping.insert(key, value);
                Ok(())
            }
            ShapedMut::Record(record) => {
                record.set(key.field_name().into_owned(), value);
                Ok(())
            }
            ShapedMut::Sequence(SequenceMut::Lazy(_)) | ShapedMut::Scalar(_) => {
                Err(Error::unsupported(operation, shape, found))
            }
        }
    }

    fn entry_mut(&mut self, key: &Key) -> Option<&mut Self> {
        match self {
            Self::Sequence(items) => key.as_index().and_then(|index| items.get_mut(index)),
            Self::Mapping(mapping) => mapping.get_mut(key),
            Self::Record(record) => record.get_mut(&key.field_name()),
            _ => None,
        }
    }
}

/// Writes `value` under `key` in the container it is applied to.
///
/// # Errors
///
/// See [`Value::set_key`].
pub fn set(key: impl Into<Key>, value: Value) -> impl Fn(Value) -> Result<Value> {
    let key = key.into();
    move |mut container| {
        container.set_key(key.clone(), value.clone())?;
        Ok(container)
    }
}

/// Rejects operands that have no writable entries.
fn ensure_writable(container: &Value, operation: &'static str) -> Result<()> {
    match container.shaped() {
        ShapedRef::Sequence(SequenceRef::Lazy(_)) | ShapedRef::Scalar(_) => Err(
            Error::unsupported(operation, container.shape(), container.type_name()),
        ),
        _ => Ok(()),
    }
}

/// The keys of a materialized container, in order.
fn key_list(container: &Value) -> Vec<Key> {
    match container.shaped() {
        ShapedRef::Sequence(SequenceRef::Materialized(items)) => (0..items.len()).map(Key::from).collect(),
        ShapedRef::Mapping(mapping) => mapping.keys().cloned().collect(),
        ShapedRef::Record(record) => record.names().map(Key::from).collect(),
        ShapedRef::Sequence(SequenceRef::Lazy(_)) | ShapedRef::Scalar(_) => Vec::new(),
    }
}

/// Replaces the entries under `keys` with `transform(entry)`.
///
/// With no keys, every entry of the container is transformed. An absent
/// key is written with `transform(Null)`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedShape`] for scalars and lazy sequences, and
/// [`Error::Configuration`] for an invalid sequence index.
///
/// # Examples
///
/// ```rust
/// use shapefold::access::change;
/// use shapefold::{mapping, Key, Value};
///
/// let double = |x: Value| Value::Int(x.as_int().unwrap_or(0) * 2);
/// let prices = mapping! { "tea" => 2, "cake" => 3 };
/// let changed = change(double, [Key::from("cake")])(prices).unwrap();
/// assert_eq!(changed, mapping! { "tea" => 2, "cake" => 6 });
/// ```
pub fn change<F, I>(transform: F, keys: I) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(Value) -> Value,
    I: IntoIterator,
    I::Item: Into<Key>,
{
    let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
    move |mut container| {
        ensure_writable(&container, "change")?;
        let targets = if keys.is_empty() { key_list(&container) } else { keys.clone() };
        for key in targets {
            match container.entry_mut(&key) {
                Some(slot) => *slot = transform(std::mem::take(slot)),
                None => container.set_key_for("change", key, transform(Value::Null))?,
            }
        }
        Ok(container)
    }
}

/// Copies the entries under `keys` from `source` into the container it is
/// applied to. With no keys, every entry of `source` is copied; absent
/// source entries are copied as `Null`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedShape`] when either side is a scalar or a
/// lazy sequence, and [`Error::Configuration`] for an invalid sequence
/// index.
pub fn update<I>(source: Value, keys: I) -> impl Fn(Value) -> Result<Value>
where
    I: IntoIterator,
    I::Item: Into<Key>,
{
    let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
    move |mut container| {
        ensure_writable(&source, "update")?;
        ensure_writable(&container, "update")?;
        let targets = if keys.is_empty() { key_list(&source) } else { keys.clone() };
        for key in targets {
            let value = source.lookup(&key).cloned().unwrap_or_default();
            container.set_key_for("update", key, value)?;
        }
        Ok(container)
    }
}

/// The keys of a container, as a sequence.
///
/// Sequences yield their indexes, mappings their keys and records their
/// field names. A lazy sequence yields a lazy sequence of indexes and a
/// scalar yields an empty sequence.
///
/// # Errors
///
/// Returns [`Error::AlreadyConsumed`] for an exhausted one-shot sequence.
pub fn keys(container: Value) -> Result<Value> {
    match container {
        Value::Lazy(lazy) => Ok(Value::Lazy(lazy.derive("keys", |cursor: Cursor| -> Cursor {
            Box::new(MapCursor::new(cursor, |_, index| Value::from(index)))
        })?)),
        materialized => Ok(Value::Sequence(
            key_list(&materialized).into_iter().map(Value::from).collect(),
        )),
    }
}

/// The `[key, value]` entries of a container, as a sequence.
///
/// A lazy sequence yields a lazy sequence of `[index, element]` entries and
/// a scalar yields an empty sequence.
///
/// # Errors
///
/// Returns [`Error::AlreadyConsumed`] for an exhausted one-shot sequence.
///
/// # Examples
///
/// ```rust
/// use shapefold::access::entries;
/// use shapefold::{mapping, sequence};
///
/// assert_eq!(
///     entries(mapping! { "a" => 1, "b" => 2 }).unwrap(),
///     sequence![sequence!["a", 1], sequence!["b", 2]]
/// );
/// ```
pub fn entries(container: Value) -> Result<Value> {
    let pairs = match container.into_shaped() {
        Shaped::Sequence(SequenceSource::Lazy(lazy)) => {
            return Ok(Value::Lazy(lazy.derive("entries", |cursor: Cursor| -> Cursor {
                Box::new(EnumerateCursor::new(cursor))
            })?));
        }
        Shaped::Sequence(SequenceSource::Materialized(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| entry(index, item))
            .collect(),
        Shaped::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, value)| entry(key, value))
            .collect(),
        Shaped::Record(record) => record
            .into_iter()
            .map(|(name, value)| entry(name, value))
            .collect(),
        Shaped::Scalar(_) => Vec::new(),
    };
    Ok(Value::Sequence(pairs))
}

/// Counts the entries of a container or the characters of a string.
///
/// A lazy sequence is counted by pulling it to exhaustion.
///
/// # Errors
///
/// Returns [`Error::UnsupportedShape`] for scalars other than strings and
/// [`Error::AlreadyConsumed`] for an exhausted one-shot sequence.
pub fn len(container: &Value) -> Result<usize> {
    match container.shaped() {
        ShapedRef::Sequence(SequenceRef::Materialized(items)) => Ok(items.len()),
        ShapedRef::Sequence(SequenceRef::Lazy(lazy)) => Ok(lazy.open("len")?.count()),
        ShapedRef::Mapping(mapping) => Ok(mapping.len()),
        ShapedRef::Record(record) => Ok(record.len()),
        ShapedRef::Scalar(Value::Str(text)) => Ok(text.chars().count()),
        ShapedRef::Scalar(scalar) => Err(Error::unsupported("len", scalar.shape(), scalar.type_name())),
    }
}

/// Returns `true` if the container has no entries.
///
/// A lazy sequence is probed for at most one element; a one-shot sequence
/// keeps that element for its next consumer.
///
/// # Errors
///
/// Same as [`len`].
pub fn is_empty(container: &Value) -> Result<bool> {
    match container.shaped() {
        ShapedRef::Sequence(SequenceRef::Lazy(lazy)) => lazy.probe_empty("is_empty"),
        ShapedRef::Scalar(Value::Str(text)) => Ok(text.is_empty()),
        _ => len(container).map(|count| count == 0),
    }
}

/// Returns `true` if the container has at least one entry.
///
/// # Errors
///
/// Same as [`is_empty`].
pub fn non_empty(container: &Value) -> Result<bool> {
    is_empty(container).map(|empty| !empty)
}
