//! Fallible left-to-right pipeline macro.

/// Threads a value through fallible steps, left to right.
///
/// The first argument is converted with `Value::from`; every following
/// argument is a function from `Value` to `Result<Value>` such as a
/// configured combinator. The first error stops the pipeline and is
/// returned.
///
/// `pipe!(x, f, g)` is `g(f(x)?)`.
///
/// # Examples
///
/// ```
/// use shapefold::combinator::{array, filter, limit, map};
/// use shapefold::lazy::count_from;
/// use shapefold::{pipe, sequence, Value};
///
/// let result = pipe!(
///     count_from(1),
///     filter(|x: &Value| x.as_int().is_some_and(|n| n % 3 == 0)),
///     map(|x: Value| Value::Int(x.as_int().unwrap_or(0) * 10)),
///     limit(2),
///     array,
/// );
/// assert_eq!(result.unwrap(), sequence![30, 60]);
/// ```
///
/// A failing step short-circuits:
///
/// ```
/// use shapefold::combinator::{array, batch};
/// use shapefold::{pipe, sequence};
///
/// assert!(pipe!(sequence![1, 2], batch(0), array).is_err());
/// ```
#[macro_export]
macro_rules! pipe {
    ($value:expr $(,)?) => {
        $crate::Result::<$crate::Value>::Ok($crate::Value::from($value))
    };

    ($value:expr, $function:expr $(,)?) => {
        ($function)($crate::Value::from($value))
    };

    ($value:expr, $function:expr, $($remaining_functions:expr),+ $(,)?) => {
        match ($function)($crate::Value::from($value)) {
            ::core::result::Result::Ok(piped) => $crate::pipe!(piped, $($remaining_functions),+),
            ::core::result::Result::Err(error) => ::core::result::Result::Err(error),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::combinator::{array, batch, map};
    use crate::{Error, Value, sequence};

    #[test]
    fn test_pipe_value_only() {
        assert_eq!(pipe!(42_i64).unwrap(), Value::Int(42));
    }

    #[test]
    fn test_pipe_single() {
        assert_eq!(pipe!(sequence![1, 2], array).unwrap(), sequence![1, 2]);
    }

    #[test]
    fn test_pipe_runs_left_to_right() {
        let increment = map(|x: Value| Value::Int(x.as_int().unwrap_or(0) + 1));
        let result = pipe!(sequence![1, 2, 3], increment, batch(2), array);
        assert_eq!(
            result.unwrap(),
            sequence![sequence![2, 3], sequence![4]]
        );
    }

    #[test]
    fn test_pipe_stops_at_first_error() {
        let result = pipe!(Value::Int(1), array, batch(0));
        assert!(matches!(result, Err(Error::UnsupportedShape { operation: "array", .. })));
    }
}
