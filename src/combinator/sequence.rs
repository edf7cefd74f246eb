//! Lazy sequence combinators and folds.
//!
//! Everything here except the folds, [`scan_right`] and [`array`] returns a
//! [`Value::Lazy`] that preserves the restartability of its input.

use std::rc::Rc;

use super::DEFAULT_BATCH_SIZE;
use crate::error::{Error, Result};
use crate::lazy::cursor::{
    BatchCursor, EnumerateCursor, FilterCursor, FlattenCursor, FlattenUntilCursor, LimitCursor,
    MapCursor, ScanLeftCursor,
};
use crate::lazy::{self, Cursor, LazySeq};
use crate::shape::Value;

/// Wraps `subject` as a lazy sequence and adapts it.
fn derive_from<A>(subject: Value, operation: &'static str, adapt: A) -> Result<Value>
where
    A: Fn(Cursor) -> Cursor + 'static,
{
    let source = LazySeq::from_subject(subject, operation)?;
    Ok(Value::Lazy(source.derive(operation, adapt)?))
}

/// Transforms every element.
///
/// # Errors
///
/// The returned function fails with [`Error::UnsupportedShape`] for
/// scalars and [`Error::AlreadyConsumed`] for an exhausted one-shot input.
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::{array, map};
/// use shapefold::{mapping, sequence, Value};
///
/// let negate = map(|x: Value| Value::Int(-x.as_int().unwrap_or(0)));
/// assert_eq!(array(negate(sequence![1, 2]).unwrap()).unwrap(), sequence![-1, -2]);
/// assert_eq!(array(negate(mapping! { "a" => 3 }).unwrap()).unwrap(), sequence![-3]);
/// ```
pub fn map<F>(transform: F) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(Value) -> Value + 'static,
{
    let transform = Rc::new(transform);
    move |subject| {
        let transform = Rc::clone(&transform);
        derive_from(subject, "map", move |cursor: Cursor| -> Cursor {
            let transform = Rc::clone(&transform);
            Box::new(MapCursor::new(cursor, move |element, _| (*transform)(element)))
        })
    }
}

/// Transforms every element with access to its 0-based traversal index
/// and the input the combinator was applied to.
///
/// # Errors
///
/// Same as [`map`].
pub fn map_indexed<F>(transform: F) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(Value, usize, &Value) -> Value + 'static,
{
    let transform = Rc::new(transform);
    move |subject: Value| {
        let source = Rc::new(subject.clone());
        let transform = Rc::clone(&transform);
        derive_from(subject, "map_indexed", move |cursor: Cursor| -> Cursor {
            let transform = Rc::clone(&transform);
            let source = Rc::clone(&source);
            Box::new(MapCursor::new(cursor, move |element, index| {
                (*transform)(element, index, &source)
            }))
        })
    }
}

/// Keeps the elements `keep` accepts.
///
/// # Errors
///
/// Same as [`map`].
pub fn filter<P>(keep: P) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(&Value) -> bool + 'static,
{
    let keep = Rc::new(keep);
    move |subject| {
        let keep = Rc::clone(&keep);
        derive_from(subject, "filter", move |cursor: Cursor| -> Cursor {
            let keep = Rc::clone(&keep);
            Box::new(FilterCursor::new(cursor, move |element, _| (*keep)(element)))
        })
    }
}

/// Keeps the elements `keep` accepts, passing each element's source index
/// and the input the combinator was applied to.
///
/// # Errors
///
/// Same as [`map`].
pub fn filter_indexed<P>(keep: P) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(&Value, usize, &Value) -> bool + 'static,
{
    let keep = Rc::new(keep);
    move |subject: Value| {
        let source = Rc::new(subject.clone());
        let keep = Rc::clone(&keep);
        derive_from(subject, "filter_indexed", move |cursor: Cursor| -> Cursor {
            let keep = Rc::clone(&keep);
            let source = Rc::clone(&source);
            Box::new(FilterCursor::new(cursor, move |element, index| {
                (*keep)(element, index, &source)
            }))
        })
    }
}

/// Splices nested sequence-shaped elements, materialized or lazy, up to
/// `depth` levels. `flatten(0)` passes elements through.
///
/// A nested one-shot sequence that was already consumed is yielded as-is.
///
/// # Errors
///
/// Same as [`map`].
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::{array, flatten};
/// use shapefold::sequence;
///
/// let nested = sequence![sequence![sequence![1, 2, 3]], sequence![sequence![4]]];
/// assert_eq!(array(flatten(2)(nested.clone()).unwrap()).unwrap(), sequence![1, 2, 3, 4]);
/// assert_eq!(
///     array(flatten(1)(nested).unwrap()).unwrap(),
///     sequence![sequence![1, 2, 3], sequence![4]]
/// );
/// ```
pub fn flatten(depth: usize) -> impl Fn(Value) -> Result<Value> {
    move |subject| {
        derive_from(subject, "flatten", move |cursor: Cursor| -> Cursor {
            Box::new(FlattenCursor::new(cursor, depth))
        })
    }
}

/// Splices nested sequence-shaped elements until `stop` accepts them.
///
/// Elements that `stop` accepts, and elements that are not sequences, are
/// yielded as-is.
///
/// # Errors
///
/// Same as [`map`].
pub fn flatten_until<P>(stop: P) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(&Value) -> bool + 'static,
{
    let stop = Rc::new(stop);
    move |subject| {
        let stop = Rc::clone(&stop);
        derive_from(subject, "flatten_until", move |cursor: Cursor| -> Cursor {
            Box::new(FlattenUntilCursor::new(cursor, Rc::clone(&stop)))
        })
    }
}

/// Yields the running left fold of the input, one accumulator per element.
///
/// `step` receives `(accumulator, element)`. The seed itself is not
/// yielded, so the output is as long as the input.
///
/// # Errors
///
/// Same as [`map`].
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::{array, scan_left};
/// use shapefold::{sequence, Value};
///
/// let add = |a: Value, b: Value| Value::Int(a.as_int().unwrap_or(0) + b.as_int().unwrap_or(0));
/// let running = scan_left(add, Value::Int(0));
/// assert_eq!(array(running(sequence![1, 2, 3]).unwrap()).unwrap(), sequence![1, 3, 6]);
/// ```
pub fn scan_left<F>(step: F, seed: Value) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(Value, Value) -> Value + 'static,
{
    let step = Rc::new(step);
    move |subject| {
        let step = Rc::clone(&step);
        let seed = seed.clone();
        derive_from(subject, "scan_left", move |cursor: Cursor| -> Cursor {
            Box::new(ScanLeftCursor::new(cursor, Rc::clone(&step), seed.clone()))
        })
    }
}

/// Yields the running right fold of the input as a materialized sequence.
///
/// `step` receives `(element, accumulator)`; position `i` holds the fold
/// of elements `i..`. Not lazy.
///
/// # Errors
///
/// Same as [`map`].
pub fn scan_right<F>(step: F, seed: Value) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(Value, Value) -> Value,
{
    move |subject| {
        let items = lazy::materialize(subject, "scan_right")?;
        let mut accumulator = seed.clone();
        let mut scanned: Vec<Value> = items
            .into_iter()
            .rev()
            .map(|element| {
                accumulator = step(element, std::mem::take(&mut accumulator));
                accumulator.clone()
            })
            .collect();
        scanned.reverse();
        Ok(Value::Sequence(scanned))
    }
}

/// Yields at most `count` elements, never pulling element `count + 1`.
///
/// # Errors
///
/// Same as [`map`].
pub fn limit(count: usize) -> impl Fn(Value) -> Result<Value> {
    move |subject| {
        derive_from(subject, "limit", move |cursor: Cursor| -> Cursor {
            Box::new(LimitCursor::new(cursor, count))
        })
    }
}

/// Groups elements into sequences of `size`; the final one may be shorter.
///
/// # Errors
///
/// The returned function fails with [`Error::Configuration`] when `size`
/// is zero, and otherwise as [`map`] does.
pub fn batch(size: usize) -> impl Fn(Value) -> Result<Value> {
    move |subject| {
        if size == 0 {
            return Err(Error::configuration("batch", "batch size must be positive"));
        }
        derive_from(subject, "batch", move |cursor: Cursor| -> Cursor {
            Box::new(BatchCursor::new(cursor, size))
        })
    }
}

/// [`batch`] with [`DEFAULT_BATCH_SIZE`].
pub fn batch_default() -> impl Fn(Value) -> Result<Value> {
    batch(DEFAULT_BATCH_SIZE)
}

/// Pairs every element with its 0-based index as `[index, element]`.
///
/// # Errors
///
/// Same as [`map`].
pub fn enumerate(subject: Value) -> Result<Value> {
    derive_from(subject, "enumerate", |cursor: Cursor| -> Cursor {
        Box::new(EnumerateCursor::new(cursor))
    })
}

/// Folds from the left, streaming. `step` receives `(accumulator, element)`.
///
/// # Errors
///
/// Same as [`map`].
pub fn fold_left<F>(step: F, seed: Value) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(Value, Value) -> Value,
{
    move |subject| Ok(lazy::elements(subject, "fold_left")?.fold(seed.clone(), &step))
}

/// Folds from the right. `step` receives `(element, accumulator)`, starting
/// with the last element. Materializes its input.
///
/// # Errors
///
/// Same as [`map`].
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::fold_right;
/// use shapefold::{sequence, Value};
///
/// let cons = |element: Value, list: Value| {
///     let mut items = vec![element];
///     items.extend(list.as_sequence().unwrap_or_default().iter().cloned());
///     Value::Sequence(items)
/// };
/// assert_eq!(fold_right(cons, sequence![])(sequence![1, 2, 3]).unwrap(), sequence![1, 2, 3]);
/// ```
pub fn fold_right<F>(step: F, seed: Value) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(Value, Value) -> Value,
{
    move |subject| {
        let items = lazy::materialize(subject, "fold_right")?;
        Ok(items
            .into_iter()
            .rev()
            .fold(seed.clone(), |accumulator, element| step(element, accumulator)))
    }
}

/// Materializes any container into a [`Value::Sequence`].
///
/// # Errors
///
/// Same as [`map`].
pub fn array(subject: Value) -> Result<Value> {
    lazy::materialize(subject, "array").map(Value::Sequence)
}
