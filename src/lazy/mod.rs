//! The lazy sequence engine.
//!
//! A [`LazySeq`] is a shared handle to a pull-based producer of [`Value`]s.
//! Producers come in two kinds:
//!
//! - **Restartable**: a factory that hands every consumer a fresh
//!   [`Cursor`]. Ranges and anything derived from a materialized container
//!   are restartable, and so is any pipeline whose source is.
//! - **One-shot**: wraps an arbitrary iterator and can be consumed once. A
//!   second consumption fails with [`Error::AlreadyConsumed`].
//!
//! Transformations wrap the upstream cursor in one of the adapters from
//! [`cursor`]; nothing is pulled until a consumer asks for an element.
//!
//! # Examples
//!
//! ```rust
//! use shapefold::lazy::{LazySeq, seq};
//! use shapefold::Value;
//!
//! let numbers = seq(1, 3);
//! let lazy = numbers.as_lazy().unwrap();
//!
//! // Restartable: each consumer gets its own cursor.
//! assert_eq!(lazy.materialize("example").unwrap().len(), 3);
//! assert_eq!(lazy.materialize("example").unwrap().len(), 3);
//!
//! // One-shot: a second consumption is an error.
//! let once = LazySeq::once(vec![Value::Int(1)]);
//! assert!(once.materialize("example").is_ok());
//! assert!(once.materialize("example").is_err());
//! ```

pub mod cursor;
mod producer;

pub use producer::{count_from, iterate, repeat, seq};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::shape::{SequenceSource, Shaped, Value};
use cursor::SliceCursor;

/// A boxed, type-erased element producer.
pub type Cursor = Box<dyn Iterator<Item = Value>>;

type Factory = Rc<dyn Fn() -> Cursor>;

enum Producer {
    Restartable(Factory),
    OneShot(RefCell<OneShot>),
}

/// State of a one-shot producer.
///
/// `pending` holds an element pulled by an emptiness probe; the next
/// consumer receives it before the rest of `cursor`.
struct OneShot {
    cursor: Option<Cursor>,
    pending: Option<Value>,
}

/// A shared handle to a lazy, possibly infinite, producer of values.
///
/// Cloning the handle shares the producer: clones of a one-shot sequence
/// share its single traversal.
#[derive(Clone)]
pub struct LazySeq {
    producer: Rc<Producer>,
}

static_assertions::assert_not_impl_any!(LazySeq: Send, Sync);

impl LazySeq {
    /// Creates a restartable sequence from a cursor factory.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shapefold::lazy::{Cursor, LazySeq};
    /// use shapefold::Value;
    ///
    /// let evens = LazySeq::restartable(|| -> Cursor {
    ///     Box::new((0..).step_by(2).map(Value::Int))
    /// });
    /// assert!(evens.is_restartable());
    /// ```
    pub fn restartable<F>(factory: F) -> Self
    where
        F: Fn() -> Cursor + 'static,
    {
        Self {
            producer: Rc::new(Producer::Restartable(Rc::new(factory))),
        }
    }

    /// Creates a one-shot sequence from an iterator.
    pub fn once<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Self {
            producer: Rc::new(Producer::OneShot(RefCell::new(OneShot {
                cursor: Some(Box::new(iterable.into_iter())),
                pending: None,
            }))),
        }
    }

    /// Creates a restartable sequence over materialized values.
    pub fn from_values(values: Vec<Value>) -> Self {
        let items: Rc<[Value]> = values.into();
        Self::restartable(move || -> Cursor { Box::new(SliceCursor::new(Rc::clone(&items))) })
    }

    /// Wraps the elements of any sequence-shaped, mapping or record value.
    ///
    /// Sequences yield their elements, mappings and records yield their
    /// values in insertion order, and a lazy sequence is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedShape`] for scalars.
    pub fn from_subject(subject: Value, operation: &'static str) -> Result<Self> {
        match subject.into_shaped() {
            Shaped::Sequence(source) => Ok(source.into_lazy()),
            Shaped::Mapping(mapping) => Ok(Self::from_values(mapping.into_values().collect())),
            Shaped::Record(record) => Ok(Self::from_values(record.into_values().collect())),
            scalar @ Shaped::Scalar(_) => Err(scalar.unsupported(operation)),
        }
    }

    /// Returns `true` if every consumer receives a fresh cursor.
    pub fn is_restartable(&self) -> bool {
        matches!(*self.producer, Producer::Restartable(_))
    }

    /// Returns `true` if this is a one-shot sequence whose traversal has
    /// already been handed out.
    pub fn is_consumed(&self) -> bool {
        match &*self.producer {
            Producer::Restartable(_) => false,
            Producer::OneShot(state) => {
                let state = state.borrow();
                state.cursor.is_none() && state.pending.is_none()
            }
        }
    }

    /// Returns `true` if both handles share the same producer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.producer, &other.producer)
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.producer).cast::<()>() as usize
    }

    /// Opens a cursor over the elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyConsumed`] if this one-shot sequence has
    /// already been opened.
    pub fn open(&self, operation: &'static str) -> Result<Cursor> {
        match &*self.producer {
            Producer::Restartable(factory) => Ok((**factory)()),
            Producer::OneShot(state) => {
                let mut state = state.borrow_mut();
                let cursor = state
                    .cursor
                    .take()
                    .ok_or_else(|| Error::already_consumed(operation))?;
                Ok(match state.pending.take() {
                    Some(first) => Box::new(std::iter::once(first).chain(cursor)),
                    None => cursor,
                })
            }
        }
    }

    /// Builds a new sequence whose cursors are `adapt`ed cursors of this one.
    ///
    /// A restartable source yields a restartable result; a one-shot source
    /// is opened now and the result is one-shot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyConsumed`] if this one-shot sequence has
    /// already been opened.
    pub fn derive<A>(&self, operation: &'static str, adapt: A) -> Result<Self>
    where
        A: Fn(Cursor) -> Cursor + 'static,
    {
        match &*self.producer {
            Producer::Restartable(factory) => {
                let factory = Rc::clone(factory);
                Ok(Self::restartable(move || adapt((*factory)())))
            }
            Producer::OneShot(_) => Ok(Self::once(adapt(self.open(operation)?))),
        }
    }

    /// Reports whether the sequence has no elements, pulling at most one.
    ///
    /// A one-shot sequence keeps the probed element for its next consumer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyConsumed`] if this one-shot sequence has
    /// already been opened.
    pub fn probe_empty(&self, operation: &'static str) -> Result<bool> {
        match &*self.producer {
            Producer::Restartable(factory) => Ok((**factory)().next().is_none()),
            Producer::OneShot(state) => {
                let mut cursor = {
                    let mut state = state.borrow_mut();
                    if state.pending.is_some() {
                        return Ok(false);
                    }
                    state
                        .cursor
                        .take()
                        .ok_or_else(|| Error::already_consumed(operation))?
                };
                let first = cursor.next();
                let empty = first.is_none();
                tracing::trace!(operation, empty, "probed one-shot sequence");
                let mut state = state.borrow_mut();
                state.pending = first;
                state.cursor = Some(cursor);
                Ok(empty)
            }
        }
    }

    /// Pulls every element into a `Vec`.
    ///
    /// Never terminates on an infinite producer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyConsumed`] if this one-shot sequence has
    /// already been opened.
    pub fn materialize(&self, operation: &'static str) -> Result<Vec<Value>> {
        let items: Vec<Value> = self.open(operation)?.collect();
        tracing::trace!(operation, count = items.len(), "materialized lazy sequence");
        Ok(items)
    }
}

impl fmt::Debug for LazySeq {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LazySeq")
            .field("restartable", &self.is_restartable())
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

impl TryFrom<Value> for LazySeq {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_subject(value, "lazy")
    }
}

/// Opens a cursor over the elements of any sequence-shaped, mapping or
/// record value, without materializing lazy input.
///
/// # Errors
///
/// Returns [`Error::UnsupportedShape`] for scalars and
/// [`Error::AlreadyConsumed`] for an exhausted one-shot producer.
pub fn elements(subject: Value, operation: &'static str) -> Result<Cursor> {
    match subject.into_shaped() {
        Shaped::Sequence(SequenceSource::Materialized(items)) => Ok(Box::new(items.into_iter())),
        Shaped::Sequence(SequenceSource::Lazy(lazy)) => lazy.open(operation),
        Shaped::Mapping(mapping) => Ok(Box::new(mapping.into_values())),
        Shaped::Record(record) => Ok(Box::new(record.into_values())),
        scalar @ Shaped::Scalar(_) => Err(scalar.unsupported(operation)),
    }
}

/// Materializes the elements of any sequence-shaped, mapping or record value.
///
/// Materialized sequences are returned without copying.
///
/// # Errors
///
/// Returns [`Error::UnsupportedShape`] for scalars and
/// [`Error::AlreadyConsumed`] for an exhausted one-shot producer.
pub fn materialize(subject: Value, operation: &'static str) -> Result<Vec<Value>> {
    match subject.into_shaped() {
        Shaped::Sequence(source) => source.into_values(operation),
        Shaped::Mapping(mapping) => Ok(mapping.into_values().collect()),
        Shaped::Record(record) => Ok(record.into_values().collect()),
        scalar @ Shaped::Scalar(_) => Err(scalar.unsupported(operation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mapping, sequence};
    use std::cell::Cell;

    #[test]
    fn test_restartable_yields_fresh_cursors() {
        let lazy = LazySeq::from_values(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(lazy.materialize("test").unwrap().len(), 2);
        assert_eq!(lazy.materialize("test").unwrap().len(), 2);
        assert!(!lazy.is_consumed());
    }

    #[test]
    fn test_one_shot_rejects_second_open() {
        let lazy = LazySeq::once(vec![Value::Int(1)]);
        assert!(lazy.open("first").is_ok());
        assert!(lazy.is_consumed());
        assert_eq!(
            lazy.open("second").err(),
            Some(Error::already_consumed("second"))
        );
    }

    #[test]
    fn test_probe_keeps_pending_element() {
        let pulled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulled);
        let lazy = LazySeq::once((1..=3).map(move |number| {
            counter.set(counter.get() + 1);
            Value::Int(number)
        }));

        assert!(!lazy.probe_empty("probe").unwrap());
        assert!(!lazy.probe_empty("probe").unwrap());
        assert_eq!(pulled.get(), 1);
        assert_eq!(
            lazy.materialize("test").unwrap(),
            vec![Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn test_probe_empty_one_shot() {
        let lazy = LazySeq::once(Vec::new());
        assert!(lazy.probe_empty("probe").unwrap());
        assert!(lazy.materialize("test").unwrap().is_empty());
    }

    #[test]
    fn test_derive_preserves_restartability() {
        let restartable = LazySeq::from_values(vec![Value::Int(1)]);
        let derived = restartable.derive("test", |cursor| cursor).unwrap();
        assert!(derived.is_restartable());

        let once = LazySeq::once(vec![Value::Int(1)]);
        let derived = once.derive("test", |cursor| cursor).unwrap();
        assert!(!derived.is_restartable());
        assert!(once.is_consumed());
    }

    #[test]
    fn test_from_subject_reads_mapping_values() {
        let lazy = LazySeq::from_subject(mapping! { "a" => 1, "b" => 2 }, "test").unwrap();
        assert_eq!(
            lazy.materialize("test").unwrap(),
            vec![Value::Int(1), Value::Int(2)]
        );
    }

    #[test]
    fn test_from_subject_rejects_scalars() {
        assert!(LazySeq::from_subject(Value::Int(1), "map").is_err());
        assert!(materialize(Value::from("abc"), "map").is_err());
        assert_eq!(materialize(sequence![1], "map").unwrap(), vec![Value::Int(1)]);
        assert!(elements(Value::Null, "map").is_err());
    }
}
