//! Conversions between association lists, mappings and records.

use crate::access::entries;
use crate::error::{Error, Result};
use crate::lazy::cursor::PairCursor;
use crate::lazy::{self, Cursor, LazySeq};
use crate::shape::{Key, Mapping, Record, Shape, Shaped, Value};

use super::sequence::{filter, map};

/// Splits a `[key, value]` entry.
fn split_entry(element: Value, operation: &'static str) -> Result<(Key, Value)> {
    match element {
        Value::Sequence(pair) if pair.len() == 2 => {
            let mut pair = pair.into_iter();
            let key = pair.next().unwrap_or_default();
            let value = pair.next().unwrap_or_default();
            Ok((Key::from_value(key, operation)?, value))
        }
        Value::Sequence(_) => Err(Error::unsupported(operation, Shape::Sequence, "sequence")),
        other => Err(other.into_shaped().unsupported(operation)),
    }
}

/// Builds a mapping from `[key, value]` entries; later keys win.
///
/// # Errors
///
/// Fails with [`Error::UnsupportedShape`] for scalar input and for any
/// element that is not a two-element sequence with a scalar key.
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::alist_to_mapping;
/// use shapefold::{mapping, sequence};
///
/// let alist = sequence![sequence!["a", 1], sequence!["b", 2], sequence!["a", 3]];
/// assert_eq!(alist_to_mapping(alist).unwrap(), mapping! { "a" => 3, "b" => 2 });
/// ```
pub fn alist_to_mapping(alist: Value) -> Result<Value> {
    let mut mapping = Mapping::new();
    for element in lazy::elements(alist, "alist_to_mapping")? {
        let (key, value) = split_entry(element, "alist_to_mapping")?;
        mapping.insert(key, value);
    }
    Ok(Value::Mapping(mapping))
}

/// Builds a record from `[name, value]` entries; later names win.
///
/// # Errors
///
/// Same as [`alist_to_mapping`].
pub fn alist_to_record(alist: Value) -> Result<Value> {
    let mut record = Record::new();
    for element in lazy::elements(alist, "alist_to_record")? {
        let (key, value) = split_entry(element, "alist_to_record")?;
        record.set(key.field_name().into_owned(), value);
    }
    Ok(Value::from(record))
}

/// Transforms the `[key, value]` entries of a container into a mapping.
///
/// # Errors
///
/// Fails when `transform` does not return entries, and otherwise as
/// [`alist_to_mapping`] does.
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::map_mapping;
/// use shapefold::{mapping, sequence, Value};
///
/// let swap = map_mapping(|entry: Value| {
///     let pair = entry.as_sequence().unwrap_or_default().to_vec();
///     Value::Sequence(pair.into_iter().rev().collect())
/// });
/// assert_eq!(swap(mapping! { "a" => "x" }).unwrap(), mapping! { "x" => "a" });
/// ```
pub fn map_mapping<F>(transform: F) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(Value) -> Value + 'static,
{
    let transform = map(transform);
    move |subject| alist_to_mapping(transform(entries(subject)?)?)
}

/// Keeps the `[key, value]` entries `keep` accepts, as a mapping.
///
/// # Errors
///
/// Same as [`alist_to_mapping`].
pub fn filter_mapping<P>(keep: P) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(&Value) -> bool + 'static,
{
    let keep = filter(keep);
    move |subject| alist_to_mapping(keep(entries(subject)?)?)
}

/// Transforms the `[name, value]` entries of a container into a record.
///
/// # Errors
///
/// Same as [`map_mapping`].
pub fn map_record<F>(transform: F) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(Value) -> Value + 'static,
{
    let transform = map(transform);
    move |subject| alist_to_record(transform(entries(subject)?)?)
}

/// Keeps the `[name, value]` entries `keep` accepts, as a record.
///
/// # Errors
///
/// Same as [`alist_to_mapping`].
pub fn filter_record<P>(keep: P) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(&Value) -> bool + 'static,
{
    let keep = filter(keep);
    move |subject| alist_to_record(keep(entries(subject)?)?)
}

/// Pairs consecutive elements of a property list into `[key, value]`
/// entries, lazily. A trailing unpaired element is dropped.
///
/// # Errors
///
/// Fails with [`Error::UnsupportedShape`] for scalars and
/// [`Error::AlreadyConsumed`] for an exhausted one-shot input.
pub fn plist_to_alist(plist: Value) -> Result<Value> {
    let source = LazySeq::from_subject(plist, "plist_to_alist")?;
    Ok(Value::Lazy(source.derive("plist_to_alist", |cursor: Cursor| -> Cursor {
        Box::new(PairCursor::new(cursor))
    })?))
}

fn chain(left: LazySeq, right: LazySeq) -> Result<LazySeq> {
    if left.is_restartable() && right.is_restartable() {
        return left.derive("add", move |cursor: Cursor| -> Cursor {
            match right.open("add") {
                Ok(tail) => Box::new(cursor.chain(tail)),
                Err(error) => {
                    tracing::warn!(%error, "dropping unopenable right operand");
                    cursor
                }
            }
        });
    }
    let head = left.open("add")?;
    let tail = right.open("add")?;
    Ok(LazySeq::once(head.chain(tail)))
}

fn int_sum(left: i64, right: i64) -> Value {
    left.checked_add(right).map_or_else(
        || Value::Float(int_to_float(left) + int_to_float(right)),
        Value::Int,
    )
}

/// Combines two values of the same shape.
fn combine(left: Value, right: Value) -> Result<Value> {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        (Value::Int(left), Value::Int(right)) => Ok(int_sum(left, right)),
        (Value::Int(left), Value::Float(right)) => Ok(Value::Float(int_to_float(left) + right)),
        (Value::Float(left), Value::Int(right)) => Ok(Value::Float(left + int_to_float(right))),
        (Value::Float(left), Value::Float(right)) => Ok(Value::Float(left + right)),
        (
            Value::Str(mut left),
            right @ (Value::Str(_) | Value::Int(_) | Value::Float(_) | Value::Bool(_)),
        ) => {
            left.push_str(&right.to_string());
            Ok(Value::Str(left))
        }
        (Value::Sequence(mut left), Value::Sequence(right)) => {
            left.extend(right);
            Ok(Value::Sequence(left))
        }
        (Value::Mapping(mut left), Value::Mapping(right)) => {
            left.extend(right);
            Ok(Value::Mapping(left))
        }
        (Value::Record(mut left), Value::Record(right)) => {
            for (name, value) in *right {
                left.set(name, value);
            }
            Ok(Value::Record(left))
        }
        (left, right) => match (left.into_shaped(), right.into_shaped()) {
            (Shaped::Sequence(left), Shaped::Sequence(right)) => {
                Ok(Value::Lazy(chain(left.into_lazy(), right.into_lazy())?))
            }
            (_, right) => Err(right.unsupported("add")),
        },
    }
}

#[allow(clippy::cast_precision_loss)]
const fn int_to_float(number: i64) -> f64 {
    number as f64
}

/// `left + right`, for the value it is applied to as `right`.
///
/// Numbers add (integers overflow into floats), strings concatenate with
/// the text of a scalar, sequences concatenate (lazily if either side is
/// lazy), and mappings and records merge with the right side overwriting.
/// `Null` on either side yields `Null`.
///
/// # Errors
///
/// The returned function fails with [`Error::UnsupportedShape`] when the
/// operands cannot be combined, and with [`Error::AlreadyConsumed`] when a
/// one-shot operand was exhausted.
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::add;
/// use shapefold::{mapping, Value};
///
/// assert_eq!(add(Value::Int(2))(Value::Int(3)).unwrap(), Value::Int(5));
/// assert_eq!(add(Value::from("ab"))(Value::from("c")).unwrap(), Value::from("abc"));
/// assert_eq!(
///     add(mapping! { "a" => 1, "b" => 2 })(mapping! { "a" => 3, "c" => 4 }).unwrap(),
///     mapping! { "a" => 3, "b" => 2, "c" => 4 }
/// );
/// ```
pub fn add(left: Value) -> impl Fn(Value) -> Result<Value> {
    move |right| combine(left.clone(), right)
}

/// `left + right` with the operands flipped: the applied value is `left`.
///
/// # Errors
///
/// Same as [`add`].
pub fn add_right(right: Value) -> impl Fn(Value) -> Result<Value> {
    move |left| combine(left, right.clone())
}
