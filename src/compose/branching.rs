//! Conditional combinators.
//!
//! Branches are fallible steps, so any configured combinator can serve as
//! a branch. Conditions are plain predicates.

use super::chain::Step;
use crate::combinator::Predicate;
use crate::error::Result;
use crate::shape::Value;

/// Runs `then` when `condition` holds and `otherwise` when it does not.
///
/// # Examples
///
/// ```
/// use shapefold::combinator::first;
/// use shapefold::compose::{ifelse, lift};
/// use shapefold::shape::is_sequence;
/// use shapefold::{sequence, Value};
///
/// let unwrap_first = ifelse(is_sequence, first, lift(|x: Value| x));
/// assert_eq!(unwrap_first(sequence![7, 8]).unwrap(), Value::Int(7));
/// assert_eq!(unwrap_first(Value::Int(7)).unwrap(), Value::Int(7));
/// ```
pub fn ifelse<C, T, E>(condition: C, then: T, otherwise: E) -> impl Fn(Value) -> Result<Value>
where
    C: Fn(&Value) -> bool,
    T: Fn(Value) -> Result<Value>,
    E: Fn(Value) -> Result<Value>,
{
    move |value| {
        if condition(&value) {
            then(value)
        } else {
            otherwise(value)
        }
    }
}

/// Runs `then` when `condition` holds and passes the value on otherwise.
pub fn when<C, T>(condition: C, then: T) -> impl Fn(Value) -> Result<Value>
where
    C: Fn(&Value) -> bool,
    T: Fn(Value) -> Result<Value>,
{
    move |value| if condition(&value) { then(value) } else { Ok(value) }
}

/// Runs `present` on non-null values and `absent` on `Null`.
pub fn maybe<P, A>(present: P, absent: A) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(Value) -> Result<Value>,
    A: Fn(Value) -> Result<Value>,
{
    move |value| if value.is_null() { absent(value) } else { present(value) }
}

/// Runs `present` on non-null values and replaces `Null` with `default`.
pub fn maybe_or<P>(default: Value, present: P) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(Value) -> Result<Value>,
{
    move |value| {
        if value.is_null() {
            Ok(default.clone())
        } else {
            present(value)
        }
    }
}

/// Runs `absent` on `Null` and passes other values on.
pub fn nothing<A>(absent: A) -> impl Fn(Value) -> Result<Value>
where
    A: Fn(Value) -> Result<Value>,
{
    maybe(Ok, absent)
}

/// Runs `present` on non-null values and passes `Null` on.
pub fn something<P>(present: P) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(Value) -> Result<Value>,
{
    maybe(present, Ok)
}

/// Replaces values found in a lookup table.
///
/// Each `(from, to)` pair maps a value equal to `from` onto `to`; the
/// first match wins. Unmatched values become `fallback`, or pass through
/// when there is none.
///
/// # Examples
///
/// ```
/// use shapefold::compose::valmap;
/// use shapefold::Value;
///
/// let grade = valmap(
///     [(Value::Int(1), Value::from("gold")), (Value::Int(2), Value::from("silver"))],
///     Some(Value::from("none")),
/// );
/// assert_eq!(grade(&Value::Int(2)), Value::from("silver"));
/// assert_eq!(grade(&Value::Int(9)), Value::from("none"));
/// ```
pub fn valmap<I>(table: I, fallback: Option<Value>) -> impl Fn(&Value) -> Value
where
    I: IntoIterator<Item = (Value, Value)>,
{
    let table: Vec<(Value, Value)> = table.into_iter().collect();
    move |value: &Value| {
        table
            .iter()
            .find(|(from, _)| from == value)
            .map(|(_, to)| to)
            .or(fallback.as_ref())
            .unwrap_or(value)
            .clone()
    }
}

/// Runs the step of the first branch whose predicate holds.
///
/// Unmatched values go to `fallback`, or pass through when there is none.
///
/// # Examples
///
/// ```
/// use shapefold::combinator::predicate;
/// use shapefold::compose::{cond, lift, step};
/// use shapefold::shape::{is_number, is_string};
/// use shapefold::Value;
///
/// let describe = cond(
///     [
///         (predicate(is_number), step(lift(|_| Value::from("number")))),
///         (predicate(is_string), step(lift(|_| Value::from("text")))),
///     ],
///     None,
/// );
/// assert_eq!(describe(Value::Float(0.5)).unwrap(), Value::from("number"));
/// assert_eq!(describe(Value::Null).unwrap(), Value::Null);
/// ```
pub fn cond<I>(branches: I, fallback: Option<Step>) -> impl Fn(Value) -> Result<Value>
where
    I: IntoIterator<Item = (Predicate, Step)>,
{
    let branches: Vec<(Predicate, Step)> = branches.into_iter().collect();
    move |value| {
        match branches.iter().find(|(matches, _)| matches(&value)) {
            Some((_, then)) => then(value),
            None => match &fallback {
                Some(otherwise) => otherwise(value),
                None => Ok(value),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::predicate;
    use crate::compose::{lift, step};
    use crate::{Error, sequence};
    use rstest::rstest;

    fn fail(_: Value) -> Result<Value> {
        Err(Error::configuration("test", "branch should not run"))
    }

    fn is_positive(value: &Value) -> bool {
        value.as_int().is_some_and(|number| number > 0)
    }

    #[test]
    fn test_when_passes_unmatched_values() {
        let negate = when(is_positive, lift(|x: Value| Value::Int(-x.as_int().unwrap_or(0))));
        assert_eq!(negate(Value::Int(2)).unwrap(), Value::Int(-2));
        assert_eq!(negate(Value::Int(-2)).unwrap(), Value::Int(-2));
    }

    #[rstest]
    #[case(Value::Null, Value::from("missing"))]
    #[case(Value::Int(1), Value::Int(1))]
    fn test_nothing(#[case] input: Value, #[case] expected: Value) {
        let fill = nothing(lift(|_| Value::from("missing")));
        assert_eq!(fill(input).unwrap(), expected);
    }

    #[test]
    fn test_something_skips_null() {
        let boom = something(fail);
        assert_eq!(boom(Value::Null).unwrap(), Value::Null);
        assert!(boom(Value::Int(1)).is_err());
    }

    #[test]
    fn test_maybe_or_default() {
        let length = maybe_or(
            Value::Int(0),
            lift(|x: Value| Value::from(crate::access::len(&x).unwrap_or(0))),
        );
        assert_eq!(length(Value::Null).unwrap(), Value::Int(0));
        assert_eq!(length(sequence![1, 2]).unwrap(), Value::from(2_usize));
    }

    #[test]
    fn test_valmap_passes_through_without_fallback() {
        let rename = valmap([(Value::from("a"), Value::from("b"))], None);
        assert_eq!(rename(&Value::from("a")), Value::from("b"));
        assert_eq!(rename(&Value::from("c")), Value::from("c"));
    }

    #[test]
    fn test_cond_first_match_and_fallback() {
        let classify = cond(
            [
                (predicate(is_positive), step(lift(|_| Value::from("positive")))),
                (predicate(|_: &Value| true), step(lift(|_| Value::from("other")))),
            ],
            Some(step(fail)),
        );
        assert_eq!(classify(Value::Int(1)).unwrap(), Value::from("positive"));
        assert_eq!(classify(Value::Int(0)).unwrap(), Value::from("other"));

        let strict = cond(Vec::new(), Some(step(fail)));
        assert!(strict(Value::Int(1)).is_err());
    }
}
