//! Restartable producers.

use std::rc::Rc;

use super::cursor::{IterateCursor, RangeCursor};
use super::{Cursor, LazySeq};
use crate::shape::Value;

/// An inclusive integer range `start..=end`.
///
/// Empty when `end < start`. Restartable.
///
/// # Examples
///
/// ```rust
/// use shapefold::lazy::seq;
/// use shapefold::prelude::array;
/// use shapefold::sequence;
///
/// assert_eq!(array(seq(1, 4)).unwrap(), sequence![1, 2, 3, 4]);
/// ```
pub fn seq(start: i64, end: i64) -> Value {
    Value::Lazy(LazySeq::restartable(move || -> Cursor {
        Box::new(RangeCursor::new(start, Some(end)))
    }))
}

/// The unbounded range `start, start + 1, ...`. Restartable.
pub fn count_from(start: i64) -> Value {
    Value::Lazy(LazySeq::restartable(move || -> Cursor {
        Box::new(RangeCursor::new(start, None))
    }))
}

/// `value`, forever. Restartable.
pub fn repeat(value: Value) -> Value {
    Value::Lazy(LazySeq::restartable(move || -> Cursor {
        Box::new(std::iter::repeat(value.clone()))
    }))
}

/// `seed, step(seed), step(step(seed)), ...`. Restartable.
///
/// `step` runs only when its result is pulled.
///
/// # Examples
///
/// ```rust
/// use shapefold::lazy::iterate;
/// use shapefold::prelude::{array, limit};
/// use shapefold::{sequence, Value};
///
/// let powers = iterate(Value::Int(1), |x| Value::Int(x.as_int().unwrap_or(0) * 2));
/// assert_eq!(array(limit(4)(powers).unwrap()).unwrap(), sequence![1, 2, 4, 8]);
/// ```
pub fn iterate<F>(seed: Value, step: F) -> Value
where
    F: Fn(Value) -> Value + 'static,
{
    let step = Rc::new(step);
    Value::Lazy(LazySeq::restartable(move || -> Cursor {
        Box::new(IterateCursor::new(seed.clone(), Rc::clone(&step)))
    }))
}
