//! Elementary combinators.
//!
//! - [`identity`]: returns its argument (the I combinator)
//! - [`constant`]: ignores its argument (the K combinator)
//!
//! Both are plain transforms; wrap them with [`lift`](super::lift) to use
//! them as pipeline steps.

/// Returns the value unchanged.
///
/// # Examples
///
/// ```
/// use shapefold::combinator::{array, map};
/// use shapefold::compose::identity;
/// use shapefold::sequence;
///
/// let unchanged = map(identity);
/// assert_eq!(array(unchanged(sequence![1, "a"]).unwrap()).unwrap(), sequence![1, "a"]);
/// ```
#[inline]
pub fn identity<T>(value: T) -> T {
    value
}

/// Creates a function that returns a clone of `value` whatever its input.
///
/// # Examples
///
/// ```
/// use shapefold::combinator::{array, map};
/// use shapefold::compose::constant;
/// use shapefold::{sequence, Value};
///
/// let zeros = map(constant(Value::Int(0)));
/// assert_eq!(array(zeros(sequence!["a", "b"]).unwrap()).unwrap(), sequence![0, 0]);
/// ```
#[inline]
pub fn constant<T: Clone, U>(value: T) -> impl Fn(U) -> T {
    move |_| value.clone()
}
