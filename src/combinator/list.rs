//! Positional helpers, string joins and numeric reductions.

use crate::error::{Error, Result};
use crate::lazy::{self, Cursor};
use crate::shape::{Key, SequenceSource, Shaped, Value};

/// Returns the element at `position`, or `Null`.
///
/// Only the first `position + 1` elements of a lazy input are pulled.
fn nth(subject: Value, position: usize, operation: &'static str) -> Result<Value> {
    Ok(lazy::elements(subject, operation)?
        .nth(position)
        .unwrap_or_default())
}

/// The first element, or `Null`.
///
/// # Errors
///
/// Fails with [`Error::UnsupportedShape`] for scalars and
/// [`Error::AlreadyConsumed`] for an exhausted one-shot input.
pub fn first(subject: Value) -> Result<Value> {
    nth(subject, 0, "first")
}

/// The second element, or `Null`.
///
/// # Errors
///
/// Same as [`first`].
pub fn second(subject: Value) -> Result<Value> {
    nth(subject, 1, "second")
}

/// The last element, or `Null`. Exhausts lazy input.
///
/// # Errors
///
/// Same as [`first`].
pub fn last(subject: Value) -> Result<Value> {
    Ok(lazy::elements(subject, "last")?.last().unwrap_or_default())
}

/// Every element but the last, materialized.
///
/// # Errors
///
/// Same as [`first`].
pub fn head(subject: Value) -> Result<Value> {
    let mut items = lazy::materialize(subject, "head")?;
    items.pop();
    Ok(Value::Sequence(items))
}

/// Every element but the first. Lazy input stays lazy.
///
/// # Errors
///
/// Same as [`first`].
pub fn tail(subject: Value) -> Result<Value> {
    match subject.into_shaped() {
        Shaped::Sequence(SequenceSource::Lazy(lazy)) => Ok(Value::Lazy(
            lazy.derive("tail", |cursor: Cursor| -> Cursor { Box::new(cursor.skip(1)) })?,
        )),
        shaped => {
            let items = lazy::materialize(shaped.into_value(), "tail")?;
            Ok(items.into_iter().skip(1).collect())
        }
    }
}

/// Appends `element` to the sequence it is applied to.
///
/// On a mapping, the element is stored under the next integer key: one
/// past the largest integer key, or `0`.
///
/// # Errors
///
/// The returned function fails with [`Error::UnsupportedShape`] for
/// records, lazy sequences and scalars.
pub fn push(element: Value) -> impl Fn(Value) -> Result<Value> {
    move |container| match container {
        Value::Sequence(mut items) => {
            items.push(element.clone());
            Ok(Value::Sequence(items))
        }
        Value::Mapping(mut mapping) => {
            let next = mapping
                .keys()
                .filter_map(|key| match key {
                    Key::Int(number) => number.checked_add(1),
                    Key::Str(_) => None,
                })
                .max()
                .unwrap_or(0);
            mapping.insert(Key::Int(next), element.clone());
            Ok(Value::Mapping(mapping))
        }
        other => Err(other.into_shaped().unsupported("push")),
    }
}

/// Exchanges the elements at positions `a` and `b` of a sequence.
///
/// # Errors
///
/// The returned function fails with [`Error::Configuration`] when a
/// position is out of range and [`Error::UnsupportedShape`] for anything
/// but a materialized sequence.
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::swap;
/// use shapefold::sequence;
///
/// assert_eq!(swap(0, 2)(sequence!["a", "b", "c"]).unwrap(), sequence!["c", "b", "a"]);
/// assert!(swap(0, 3)(sequence!["a"]).is_err());
/// ```
pub fn swap(a: usize, b: usize) -> impl Fn(Value) -> Result<Value> {
    move |container| match container {
        Value::Sequence(mut items) => {
            let len = items.len();
            if a >= len || b >= len {
                return Err(Error::configuration(
                    "swap",
                    format!("positions {a} and {b} must be below {len}"),
                ));
            }
            items.swap(a, b);
            Ok(Value::Sequence(items))
        }
        other => Err(other.into_shaped().unsupported("swap")),
    }
}

/// Builds a sequence of `count` elements, calling
/// `build(index, count, built_so_far)` for each.
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::construct;
/// use shapefold::{sequence, Value};
///
/// let fibonacci = construct(
///     |index, _, built: &[Value]| match index {
///         0 | 1 => Value::Int(1),
///         _ => Value::Int(built[index - 1].as_int().unwrap_or(0) + built[index - 2].as_int().unwrap_or(0)),
///     },
///     6,
/// );
/// assert_eq!(fibonacci, sequence![1, 1, 2, 3, 5, 8]);
/// ```
pub fn construct<F>(build: F, count: usize) -> Value
where
    F: Fn(usize, usize, &[Value]) -> Value,
{
    let mut items = Vec::with_capacity(count);
    for index in 0..count {
        let element = build(index, count, &items);
        items.push(element);
    }
    Value::Sequence(items)
}

/// Joins the text of every element with `separator`.
///
/// # Errors
///
/// Same as [`first`].
pub fn join(separator: impl Into<String>) -> impl Fn(Value) -> Result<Value> {
    let separator = separator.into();
    move |subject| {
        let parts: Vec<String> = lazy::elements(subject, "join")?
            .map(|element| element.to_string())
            .collect();
        Ok(Value::Str(parts.join(&separator)))
    }
}

/// Splits a string on `delimiter`.
///
/// # Errors
///
/// The returned function fails with [`Error::Configuration`] for an empty
/// delimiter and [`Error::UnsupportedShape`] for anything but a string.
pub fn split(delimiter: impl Into<String>) -> impl Fn(Value) -> Result<Value> {
    let delimiter = delimiter.into();
    move |subject| {
        if delimiter.is_empty() {
            return Err(Error::configuration("split", "delimiter must not be empty"));
        }
        match subject {
            Value::Str(text) => Ok(text.split(delimiter.as_str()).map(Value::from).collect()),
            other => Err(other.into_shaped().unsupported("split")),
        }
    }
}

/// A running numeric total that stays integral until it cannot.
enum Total {
    Int(i64),
    Float(f64),
}

impl Total {
    #[allow(clippy::cast_precision_loss)]
    fn plus(self, element: &Value) -> Option<Self> {
        Some(match (self, element) {
            (Self::Int(total), Value::Int(number)) => total
                .checked_add(*number)
                .map_or(Self::Float(total as f64 + *number as f64), Self::Int),
            (Self::Int(total), Value::Float(number)) => Self::Float(total as f64 + number),
            (Self::Float(total), Value::Int(number)) => Self::Float(total + *number as f64),
            (Self::Float(total), Value::Float(number)) => Self::Float(total + number),
            _ => return None,
        })
    }

    #[allow(clippy::cast_precision_loss)]
    const fn as_float(&self) -> f64 {
        match self {
            Self::Int(total) => *total as f64,
            Self::Float(total) => *total,
        }
    }

    const fn into_value(self) -> Value {
        match self {
            Self::Int(total) => Value::Int(total),
            Self::Float(total) => Value::Float(total),
        }
    }
}

fn total(subject: Value, operation: &'static str) -> Result<(Total, usize)> {
    let mut running = Total::Int(0);
    let mut count = 0;
    for element in lazy::elements(subject, operation)? {
        running = running
            .plus(&element)
            .ok_or_else(|| Error::unsupported(operation, element.shape(), element.type_name()))?;
        count += 1;
    }
    Ok((running, count))
}

/// Adds up the elements. Integers stay integral until a float appears or
/// the sum overflows. An empty input sums to `0`.
///
/// # Errors
///
/// Fails with [`Error::UnsupportedShape`] naming the first non-numeric
/// element, and otherwise as [`first`] does.
pub fn sum(subject: Value) -> Result<Value> {
    total(subject, "sum").map(|(running, _)| running.into_value())
}

/// The arithmetic mean of the elements as a float, or `Null` for empty
/// input.
///
/// # Errors
///
/// Same as [`sum`].
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::average;
/// use shapefold::{sequence, Value};
///
/// assert_eq!(average(sequence![1, 2]).unwrap(), Value::Float(1.5));
/// assert_eq!(average(sequence![]).unwrap(), Value::Null);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn average(subject: Value) -> Result<Value> {
    let (running, count) = total(subject, "average")?;
    if count == 0 {
        return Ok(Value::Null);
    }
    Ok(Value::Float(running.as_float() / count as f64))
}
