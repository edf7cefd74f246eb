//! Cursor adapters.
//!
//! Each adapter owns its upstream [`Cursor`] and pulls from it only when it
//! is itself asked for an element. Adapters never buffer more than the
//! chunk they are currently assembling.

use std::rc::Rc;

use super::Cursor;
use crate::shape::Value;

// =============================================================================
// Sources
// =============================================================================

/// A cursor over shared, materialized elements.
pub struct SliceCursor {
    items: Rc<[Value]>,
    current_index: usize,
}

impl SliceCursor {
    /// Creates a cursor positioned at the first element.
    pub const fn new(items: Rc<[Value]>) -> Self {
        Self {
            items,
            current_index: 0,
        }
    }
}

impl Iterator for SliceCursor {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.get(self.current_index)?.clone();
        self.current_index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len().saturating_sub(self.current_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SliceCursor {}

/// An inclusive integer range, unbounded when `end` is `None`.
pub struct RangeCursor {
    next: Option<i64>,
    end: Option<i64>,
}

impl RangeCursor {
    /// Creates a range starting at `start`.
    pub const fn new(start: i64, end: Option<i64>) -> Self {
        Self {
            next: Some(start),
            end,
        }
    }
}

impl Iterator for RangeCursor {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        if self.end.is_some_and(|end| current > end) {
            self.next = None;
            return None;
        }
        self.next = current.checked_add(1);
        Some(Value::Int(current))
    }
}

/// Yields a seed, then repeated applications of a step function.
///
/// Each application happens when its result is pulled, not before.
pub struct IterateCursor<F> {
    seed: Option<Value>,
    last: Option<Value>,
    step: Rc<F>,
}

impl<F> IterateCursor<F>
where
    F: Fn(Value) -> Value,
{
    /// Creates a cursor whose first element is `seed`.
    pub const fn new(seed: Value, step: Rc<F>) -> Self {
        Self {
            seed: Some(seed),
            last: None,
            step,
        }
    }
}

impl<F> Iterator for IterateCursor<F>
where
    F: Fn(Value) -> Value,
{
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        let current = match self.seed.take() {
            Some(seed) => seed,
            None => (*self.step)(self.last.take()?),
        };
        self.last = Some(current.clone());
        Some(current)
    }
}

// =============================================================================
// Element-wise adapters
// =============================================================================

/// Applies a transform to each element, passing its traversal index.
pub struct MapCursor<F> {
    upstream: Cursor,
    transform: F,
    current_index: usize,
}

impl<F> MapCursor<F>
where
    F: FnMut(Value, usize) -> Value,
{
    /// Wraps `upstream`.
    pub const fn new(upstream: Cursor, transform: F) -> Self {
        Self {
            upstream,
            transform,
            current_index: 0,
        }
    }
}

impl<F> Iterator for MapCursor<F>
where
    F: FnMut(Value, usize) -> Value,
{
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.upstream.next()?;
        let index = self.current_index;
        self.current_index += 1;
        Some((self.transform)(element, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

/// Keeps the elements a predicate accepts, passing their source index.
pub struct FilterCursor<P> {
    upstream: Cursor,
    predicate: P,
    current_index: usize,
}

impl<P> FilterCursor<P>
where
    P: FnMut(&Value, usize) -> bool,
{
    /// Wraps `upstream`.
    pub const fn new(upstream: Cursor, predicate: P) -> Self {
        Self {
            upstream,
            predicate,
            current_index: 0,
        }
    }
}

impl<P> Iterator for FilterCursor<P>
where
    P: FnMut(&Value, usize) -> bool,
{
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let element = self.upstream.next()?;
            let index = self.current_index;
            self.current_index += 1;
            if (self.predicate)(&element, index) {
                return Some(element);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.upstream.size_hint().1)
    }
}

/// Yields running left-fold accumulators, one per upstream element.
pub struct ScanLeftCursor<F> {
    upstream: Cursor,
    step: Rc<F>,
    accumulator: Value,
}

impl<F> ScanLeftCursor<F>
where
    F: Fn(Value, Value) -> Value,
{
    /// Wraps `upstream`, starting the accumulator at `seed`.
    pub const fn new(upstream: Cursor, step: Rc<F>, seed: Value) -> Self {
        Self {
            upstream,
            step,
            accumulator: seed,
        }
    }
}

impl<F> Iterator for ScanLeftCursor<F>
where
    F: Fn(Value, Value) -> Value,
{
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.upstream.next()?;
        let accumulator = std::mem::take(&mut self.accumulator);
        self.accumulator = (*self.step)(accumulator, element);
        Some(self.accumulator.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

/// Yields `[index, element]` pairs.
pub struct EnumerateCursor {
    upstream: Cursor,
    current_index: usize,
}

impl EnumerateCursor {
    /// Wraps `upstream`.
    pub const fn new(upstream: Cursor) -> Self {
        Self {
            upstream,
            current_index: 0,
        }
    }
}

impl Iterator for EnumerateCursor {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.upstream.next()?;
        let index = self.current_index;
        self.current_index += 1;
        Some(Value::Sequence(vec![Value::from(index), element]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

// =============================================================================
// Structural adapters
// =============================================================================

/// Yields at most `remaining` elements.
///
/// The upstream is never pulled once the quota is spent.
pub struct LimitCursor {
    upstream: Cursor,
    remaining: usize,
}

impl LimitCursor {
    /// Wraps `upstream`.
    pub const fn new(upstream: Cursor, limit: usize) -> Self {
        Self {
            upstream,
            remaining: limit,
        }
    }
}

impl Iterator for LimitCursor {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let element = self.upstream.next()?;
        self.remaining -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.upstream.size_hint();
        let upper = upper.map_or(self.remaining, |upper| upper.min(self.remaining));
        (lower.min(self.remaining), Some(upper))
    }
}

/// Groups elements into fixed-size chunks; the final chunk may be shorter.
pub struct BatchCursor {
    upstream: Cursor,
    size: usize,
}

impl BatchCursor {
    /// Wraps `upstream`. `size` must be positive.
    pub const fn new(upstream: Cursor, size: usize) -> Self {
        Self { upstream, size }
    }
}

impl Iterator for BatchCursor {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = Vec::with_capacity(self.size.min(64));
        while chunk.len() < self.size {
            match self.upstream.next() {
                Some(element) => chunk.push(element),
                None => break,
            }
        }
        (!chunk.is_empty()).then_some(Value::Sequence(chunk))
    }
}

/// Pairs consecutive elements into `[first, second]`; a trailing odd
/// element is dropped.
pub struct PairCursor {
    upstream: Cursor,
}

impl PairCursor {
    /// Wraps `upstream`.
    pub const fn new(upstream: Cursor) -> Self {
        Self { upstream }
    }
}

impl Iterator for PairCursor {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.upstream.next()?;
        let second = self.upstream.next()?;
        Some(Value::Sequence(vec![first, second]))
    }
}

/// Opens a cursor over a sequence-shaped element, or hands the element
/// back when it cannot be descended into.
fn descend(element: Value) -> Result<Cursor, Value> {
    match element {
        Value::Sequence(items) => Ok(Box::new(items.into_iter())),
        Value::Lazy(lazy) => match lazy.open("flatten") {
            Ok(cursor) => Ok(cursor),
            Err(error) => {
                tracing::warn!(%error, "yielding consumed nested sequence unflattened");
                Err(Value::Lazy(lazy))
            }
        },
        other => Err(other),
    }
}

/// Descends into nested sequence-shaped elements up to a fixed depth.
pub struct FlattenCursor {
    stack: Vec<(Cursor, usize)>,
}

impl FlattenCursor {
    /// Wraps `upstream`, descending at most `depth` levels.
    pub fn new(upstream: Cursor, depth: usize) -> Self {
        Self {
            stack: vec![(upstream, depth)],
        }
    }
}

impl Iterator for FlattenCursor {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (cursor, depth) = self.stack.last_mut()?;
            let depth = *depth;
            let Some(element) = cursor.next() else {
                self.stack.pop();
                continue;
            };
            if depth == 0 {
                return Some(element);
            }
            match descend(element) {
                Ok(nested) => self.stack.push((nested, depth - 1)),
                Err(element) => return Some(element),
            }
        }
    }
}

/// Descends into sequence-shaped elements until a predicate accepts them.
pub struct FlattenUntilCursor<P> {
    stack: Vec<Cursor>,
    stop: Rc<P>,
}

impl<P> FlattenUntilCursor<P>
where
    P: Fn(&Value) -> bool,
{
    /// Wraps `upstream`.
    pub fn new(upstream: Cursor, stop: Rc<P>) -> Self {
        Self {
            stack: vec![upstream],
            stop,
        }
    }
}

impl<P> Iterator for FlattenUntilCursor<P>
where
    P: Fn(&Value) -> bool,
{
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cursor = self.stack.last_mut()?;
            let Some(element) = cursor.next() else {
                self.stack.pop();
                continue;
            };
            if (*self.stop)(&element) {
                return Some(element);
            }
            match descend(element) {
                Ok(nested) => self.stack.push(nested),
                Err(element) => return Some(element),
            }
        }
    }
}
