//! Fallible left-to-right composition macro.

/// Composes fallible steps left to right into one function.
///
/// `arrow!(f, g)` is a function `x -> g(f(x)?)`. Every step is a function
/// from `Value` to `Result<Value>`; the composed function stops at the
/// first error.
///
/// # Examples
///
/// ```
/// use shapefold::combinator::{array, map, sort, natural};
/// use shapefold::{arrow, sequence, Value};
///
/// let sorted_squares = arrow!(
///     map(|x: Value| Value::Int(x.as_int().unwrap_or(0).pow(2))),
///     sort(natural),
/// );
/// assert_eq!(sorted_squares(sequence![-3, 1, 2]).unwrap(), sequence![1, 4, 9]);
/// ```
#[macro_export]
macro_rules! arrow {
    ($function:expr $(,)?) => {{
        let function = $function;
        move |input: $crate::Value| -> $crate::Result<$crate::Value> { function(input) }
    }};

    ($first_function:expr, $($remaining_functions:expr),+ $(,)?) => {{
        let first = $first_function;
        let rest = $crate::arrow!($($remaining_functions),+);
        move |input: $crate::Value| -> $crate::Result<$crate::Value> { rest(first(input)?) }
    }};
}
