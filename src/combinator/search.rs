//! Short-circuiting searches and element visitors.

use crate::error::Result;
use crate::lazy;
use crate::shape::Value;

/// The first element `matches` accepts, or `Null`.
///
/// Stops pulling at the first match.
///
/// # Errors
///
/// The returned function fails with [`Error::UnsupportedShape`] for
/// scalars and [`Error::AlreadyConsumed`] for an exhausted one-shot input.
///
/// [`Error::UnsupportedShape`]: crate::Error::UnsupportedShape
/// [`Error::AlreadyConsumed`]: crate::Error::AlreadyConsumed
pub fn find<P>(matches: P) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(&Value) -> bool,
{
    move |subject| {
        Ok(lazy::elements(subject, "find")?
            .find(|element| matches(element))
            .unwrap_or_default())
    }
}

/// The 0-based position of the first element `matches` accepts, or `Null`.
///
/// # Errors
///
/// Same as [`find`].
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::find_index;
/// use shapefold::lazy::count_from;
/// use shapefold::Value;
///
/// let past_ten = find_index(|x: &Value| x.as_int().is_some_and(|n| n > 10));
/// assert_eq!(past_ten(count_from(0)).unwrap(), Value::Int(11));
/// ```
pub fn find_index<P>(matches: P) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(&Value) -> bool,
{
    move |subject| {
        Ok(lazy::elements(subject, "find_index")?
            .position(|element| matches(&element))
            .map_or(Value::Null, Value::from))
    }
}

/// `true` if `holds` accepts every element; `true` for empty input.
///
/// # Errors
///
/// Same as [`find`].
pub fn every<P>(holds: P) -> impl Fn(Value) -> Result<bool>
where
    P: Fn(&Value) -> bool,
{
    move |subject| Ok(lazy::elements(subject, "every")?.all(|element| holds(&element)))
}

/// `true` if `holds` accepts at least one element.
///
/// # Errors
///
/// Same as [`find`].
pub fn some<P>(holds: P) -> impl Fn(Value) -> Result<bool>
where
    P: Fn(&Value) -> bool,
{
    move |subject| Ok(lazy::elements(subject, "some")?.any(|element| holds(&element)))
}

/// Calls `visit(element, index)` for every element and returns the input.
///
/// A lazy input is traversed once and returned as a materialized sequence
/// of the visited elements, so one-shot input stays usable.
///
/// # Errors
///
/// Same as [`find`].
pub fn each<F>(visit: F) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(&Value, usize),
{
    move |subject| match subject {
        Value::Lazy(lazy) => {
            let items: Vec<Value> = lazy
                .open("each")?
                .enumerate()
                .map(|(index, element)| {
                    visit(&element, index);
                    element
                })
                .collect();
            Ok(Value::Sequence(items))
        }
        Value::Sequence(ref items) => {
            items.iter().enumerate().for_each(|(index, element)| visit(element, index));
            Ok(subject)
        }
        Value::Mapping(ref mapping) => {
            mapping.values().enumerate().for_each(|(index, element)| visit(element, index));
            Ok(subject)
        }
        Value::Record(ref record) => {
            record.values().enumerate().for_each(|(index, element)| visit(element, index));
            Ok(subject)
        }
        scalar => Err(scalar.into_shaped().unsupported("each")),
    }
}
