//! Pipeline steps and the combinators that sequence them.

use crate::error::Result;
use crate::lazy;
use crate::shape::Value;

/// A boxed, fallible pipeline step.
pub type Step = Box<dyn Fn(Value) -> Result<Value>>;

/// Boxes a fallible function as a [`Step`].
pub fn step<F>(function: F) -> Step
where
    F: Fn(Value) -> Result<Value> + 'static,
{
    Box::new(function)
}

/// Turns an infallible transform into a pipeline step.
///
/// # Examples
///
/// ```
/// use shapefold::compose::lift;
/// use shapefold::{pipe, Value};
///
/// let double = lift(|x: Value| Value::Int(x.as_int().unwrap_or(0) * 2));
/// assert_eq!(pipe!(Value::Int(4), double).unwrap(), Value::Int(8));
/// ```
pub fn lift<F>(transform: F) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(Value) -> Value,
{
    move |value| Ok(transform(value))
}

/// Threads `value` through `steps`, stopping at the first error.
///
/// The runtime counterpart of [`pipe!`](crate::pipe).
///
/// # Errors
///
/// Returns the first error a step produces.
pub fn pipe<I>(value: Value, steps: I) -> Result<Value>
where
    I: IntoIterator<Item = Step>,
{
    steps.into_iter().try_fold(value, |piped, next| next(piped))
}

/// Composes `steps` left to right.
///
/// The runtime counterpart of [`arrow!`](crate::arrow). With no steps the
/// result is the identity.
pub fn arrow<I>(steps: I) -> impl Fn(Value) -> Result<Value>
where
    I: IntoIterator<Item = Step>,
{
    let steps: Vec<Step> = steps.into_iter().collect();
    move |value| steps.iter().try_fold(value, |piped, next| next(piped))
}

/// Calls `observe` on the value and passes the value on.
pub fn tap<F>(observe: F) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(&Value),
{
    move |value| {
        observe(&value);
        Ok(value)
    }
}

/// Calls `function` with the elements of the value as its arguments.
///
/// # Errors
///
/// The returned function fails with
/// [`Error::UnsupportedShape`](crate::Error::UnsupportedShape) for scalars.
///
/// # Examples
///
/// ```
/// use shapefold::compose::spread;
/// use shapefold::{sequence, Value};
///
/// let area = spread(|sides: &[Value]| {
///     Value::Int(sides.iter().filter_map(Value::as_int).product())
/// });
/// assert_eq!(area(sequence![3, 4]).unwrap(), Value::Int(12));
/// ```
pub fn spread<F>(function: F) -> impl Fn(Value) -> Result<Value>
where
    F: Fn(&[Value]) -> Value,
{
    move |value| Ok(function(&lazy::materialize(value, "spread")?))
}

/// Applies every step to the same value, collecting the results in order.
///
/// # Errors
///
/// The returned function returns the first error a step produces.
///
/// # Examples
///
/// ```
/// use shapefold::combinator::{first, last};
/// use shapefold::compose::{fan_out, step};
/// use shapefold::sequence;
///
/// let ends = fan_out([step(first), step(last)]);
/// assert_eq!(ends(sequence![1, 2, 3]).unwrap(), sequence![1, 3]);
/// ```
pub fn fan_out<I>(steps: I) -> impl Fn(Value) -> Result<Value>
where
    I: IntoIterator<Item = Step>,
{
    let steps: Vec<Step> = steps.into_iter().collect();
    move |value| {
        steps
            .iter()
            .map(|next| next(value.clone()))
            .collect::<Result<Vec<Value>>>()
            .map(Value::Sequence)
    }
}
