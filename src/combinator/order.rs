//! Ordering combinators.

use std::cmp::Ordering;

use crate::error::Result;
use crate::lazy;
use crate::shape::{Shaped, Value};

/// Sorts a copy of the input's elements, stably, with `comparator`.
///
/// # Errors
///
/// The returned function fails with [`Error::UnsupportedShape`] for
/// scalars and [`Error::AlreadyConsumed`] for an exhausted one-shot input.
///
/// [`Error::UnsupportedShape`]: crate::Error::UnsupportedShape
/// [`Error::AlreadyConsumed`]: crate::Error::AlreadyConsumed
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::{by, sort};
/// use shapefold::{record, sequence, Value};
///
/// let rows = sequence![
///     record! { name: "b", rank: 2 },
///     record! { name: "a", rank: 1 },
///     record! { name: "c", rank: 2 },
/// ];
/// let ranked = sort(by(|row: &Value| row.field("rank")))(rows).unwrap();
/// assert_eq!(
///     ranked,
///     sequence![
///         record! { name: "a", rank: 1 },
///         record! { name: "b", rank: 2 },
///         record! { name: "c", rank: 2 },
///     ]
/// );
/// ```
pub fn sort<C>(comparator: C) -> impl Fn(Value) -> Result<Value>
where
    C: Fn(&Value, &Value) -> Ordering,
{
    move |subject| {
        let mut items = lazy::materialize(subject, "sort")?;
        items.sort_by(&comparator);
        Ok(Value::Sequence(items))
    }
}

/// Builds a comparator that orders elements by `key(element)`.
///
/// Keys compare with [`Value::compare`]; incomparable keys are treated as
/// equal, which keeps their elements in input order under [`sort`].
pub fn by<K>(key: K) -> impl Fn(&Value, &Value) -> Ordering
where
    K: Fn(&Value) -> Value,
{
    move |left, right| natural(&key(left), &key(right))
}

/// Orders values with [`Value::compare`], treating incomparable values as
/// equal.
pub fn natural(left: &Value, right: &Value) -> Ordering {
    left.compare(right).unwrap_or(Ordering::Equal)
}

/// Reverses a sequence, the entry order of a mapping or record, or the
/// characters of a string. Lazy input is materialized.
///
/// # Errors
///
/// Fails with [`Error::UnsupportedShape`] for scalars other than strings
/// and [`Error::AlreadyConsumed`] for an exhausted one-shot input.
///
/// [`Error::UnsupportedShape`]: crate::Error::UnsupportedShape
/// [`Error::AlreadyConsumed`]: crate::Error::AlreadyConsumed
pub fn reverse(subject: Value) -> Result<Value> {
    match subject.into_shaped() {
        Shaped::Sequence(source) => {
            let mut items = source.into_values("reverse")?;
            items.reverse();
            Ok(Value::Sequence(items))
        }
        Shaped::Mapping(mut mapping) => {
            mapping.reverse();
            Ok(Value::Mapping(mapping))
        }
        Shaped::Record(mut record) => {
            record.reverse();
            Ok(Value::Record(record))
        }
        Shaped::Scalar(Value::Str(text)) => Ok(Value::Str(text.chars().rev().collect())),
        scalar @ Shaped::Scalar(_) => Err(scalar.unsupported("reverse")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::{LazySeq, seq};
    use crate::{mapping, sequence};
    use rstest::rstest;

    #[test]
    fn test_sort_does_not_modify_input() {
        let input = sequence![3, 1, 2];
        let sorted = sort(natural)(input.clone()).unwrap();
        assert_eq!(sorted, sequence![1, 2, 3]);
        assert_eq!(input, sequence![3, 1, 2]);
    }

    #[test]
    fn test_sort_descending_lazy() {
        let descending = sort(|left: &Value, right: &Value| natural(right, left));
        assert_eq!(descending(seq(1, 3)).unwrap(), sequence![3, 2, 1]);
    }

    #[rstest]
    #[case(sequence![1, 2], sequence![2, 1])]
    #[case(mapping! { "a" => 1, "b" => 2 }, mapping! { "b" => 2, "a" => 1 })]
    #[case(Value::from("abc"), Value::from("cba"))]
    #[case(Value::Lazy(LazySeq::once(vec![Value::Int(1), Value::Int(2)])), sequence![2, 1])]
    fn test_reverse(#[case] subject: Value, #[case] expected: Value) {
        assert_eq!(reverse(subject).unwrap(), expected);
    }

    #[test]
    fn test_reverse_rejects_numbers() {
        assert!(reverse(Value::Int(12)).is_err());
    }
}
