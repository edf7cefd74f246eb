//! Construction macros for [`Value`](crate::Value) literals.

/// Builds a materialized [`Value::Sequence`](crate::Value::Sequence).
///
/// Every element goes through `Value::from`, so literals, strings and nested
/// values mix freely.
///
/// # Examples
///
/// ```
/// use shapefold::{sequence, Value};
///
/// let value = sequence!["yo", 1, sequence![], Value::Null];
/// assert_eq!(value.as_sequence().map(<[Value]>::len), Some(4));
/// ```
#[macro_export]
macro_rules! sequence {
    () => {
        $crate::Value::Sequence(::std::vec::Vec::new())
    };

    ($($element:expr),+ $(,)?) => {
        $crate::Value::Sequence(::std::vec![$($crate::Value::from($element)),+])
    };
}

/// Builds a [`Value::Mapping`](crate::Value::Mapping) from `key => value`
/// pairs. Later duplicate keys overwrite earlier ones.
///
/// # Examples
///
/// ```
/// use shapefold::{mapping, Key, Value};
///
/// let value = mapping! { "a" => 1, 2 => "two" };
/// let mapping = value.as_mapping().unwrap();
/// assert_eq!(mapping.get(&Key::from(2)), Some(&Value::from("two")));
/// ```
#[macro_export]
macro_rules! mapping {
    () => {
        $crate::Value::Mapping($crate::Mapping::new())
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut mapping = $crate::Mapping::new();
        $(
            mapping.insert($crate::Key::from($key), $crate::Value::from($value));
        )+
        $crate::Value::Mapping(mapping)
    }};
}

/// Builds a [`Value::Record`](crate::Value::Record) from `field: value`
/// pairs.
///
/// # Examples
///
/// ```
/// use shapefold::{record, Value};
///
/// let shirt = record! { size: "m", colour: "blue" };
/// assert_eq!(shirt.field("colour"), Value::from("blue"));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Value::from($crate::Record::new())
    };

    ($($field:ident : $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $(
            record.set(stringify!($field), $crate::Value::from($value));
        )+
        $crate::Value::from(record)
    }};
}

/// Generates `is_<shape>` predicates over [`Value`](crate::Value) shapes.
macro_rules! shape_predicates {
    ($($shape:ident),+ $(,)?) => {
        $crate::paste::paste! {
            $(
                #[doc = "Returns `true` if `value` classifies as `Shape::" $shape "`."]
                pub fn [<is_ $shape:snake>](value: &$crate::Value) -> bool {
                    $crate::shape::classify(value) == $crate::shape::Shape::$shape
                }
            )+
        }
    };
}

pub(crate) use shape_predicates;
