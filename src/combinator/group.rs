//! Bucketing and indexing combinators.
//!
//! All of these consume their input eagerly. Buckets and indexes are
//! [`Mapping`]s in first-seen key order, and every bucket keeps the
//! relative order of its members.

use super::{KeyFn, Predicate};
use crate::error::{Error, Result};
use crate::hashing::FastHashSet;
use crate::lazy;
use crate::shape::{Key, Mapping, Record, Value};

fn bucket<P>(members: Vec<Value>, key_fns: &[KeyFn], pluck: &P) -> Result<Value>
where
    P: Fn(Value) -> Value,
{
    let Some((key_fn, rest)) = key_fns.split_first() else {
        return Ok(Value::Sequence(members.into_iter().map(pluck).collect()));
    };
    let mut groups: Mapping<Vec<Value>> = Mapping::new();
    for member in members {
        let key = Key::from_value(key_fn(&member), "group")?;
        groups.get_or_insert_with(key, Vec::new).push(member);
    }
    let mut nested = Mapping::with_capacity(groups.len());
    for (key, members) in groups {
        nested.insert(key, bucket(members, rest, pluck)?);
    }
    Ok(Value::Mapping(nested))
}

/// Buckets elements recursively: by the first key function, then each
/// bucket by the next, and so on.
///
/// With no key functions the input is returned unchanged.
///
/// # Errors
///
/// The returned function fails with [`Error::UnsupportedShape`] for scalar
/// input or a key function returning a container, and with
/// [`Error::AlreadyConsumed`] for an exhausted one-shot input.
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::{group, key_fn};
/// use shapefold::{mapping, record, sequence, Value};
///
/// let shirts = sequence![
///     record! { size: "m", colour: "blue" },
///     record! { size: "l", colour: "red" },
///     record! { size: "m", colour: "red" },
/// ];
/// let by_size = group([key_fn(|shirt: &Value| shirt.field("size"))]);
/// assert_eq!(
///     by_size(shirts).unwrap(),
///     mapping! {
///         "m" => sequence![
///             record! { size: "m", colour: "blue" },
///             record! { size: "m", colour: "red" },
///         ],
///         "l" => sequence![record! { size: "l", colour: "red" }],
///     }
/// );
/// ```
pub fn group<I>(key_fns: I) -> impl Fn(Value) -> Result<Value>
where
    I: IntoIterator<Item = KeyFn>,
{
    group_with(|member| member, key_fns)
}

/// [`group`], storing `pluck(element)` in the leaf buckets.
///
/// # Errors
///
/// Same as [`group`].
pub fn group_with<P, I>(pluck: P, key_fns: I) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(Value) -> Value,
    I: IntoIterator<Item = KeyFn>,
{
    let key_fns: Vec<KeyFn> = key_fns.into_iter().collect();
    move |subject| {
        if key_fns.is_empty() {
            return Ok(subject);
        }
        bucket(lazy::materialize(subject, "group")?, &key_fns, &pluck)
    }
}

/// Splits elements into one bucket per predicate; each element goes to the
/// first predicate that accepts it and is dropped if none does.
///
/// # Errors
///
/// The returned function fails with [`Error::Configuration`] when no
/// predicates were given, and otherwise as [`group`] does.
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::{partition, predicate};
/// use shapefold::shape::{is_int, is_sequence, is_string};
/// use shapefold::{sequence, Value};
///
/// let kinds = partition([predicate(is_string), predicate(is_int), predicate(is_sequence)]);
/// assert_eq!(
///     kinds(sequence!["yo", 1, sequence![], "bro", 2, Value::Null]).unwrap(),
///     sequence![sequence!["yo", "bro"], sequence![1, 2], sequence![sequence![]]]
/// );
/// ```
pub fn partition<I>(predicates: I) -> impl Fn(Value) -> Result<Value>
where
    I: IntoIterator<Item = Predicate>,
{
    let predicates: Vec<Predicate> = predicates.into_iter().collect();
    move |subject| {
        if predicates.is_empty() {
            return Err(Error::configuration("partition", "at least one predicate is required"));
        }
        let mut buckets = vec![Vec::new(); predicates.len()];
        for element in lazy::elements(subject, "partition")? {
            if let Some(position) = predicates.iter().position(|accepts| accepts(&element)) {
                buckets[position].push(element);
            }
        }
        Ok(Value::Sequence(buckets.into_iter().map(Value::Sequence).collect()))
    }
}

/// Splits elements into `[accepted, rejected]`.
///
/// # Errors
///
/// Same as [`group`].
pub fn boolean_partition<P>(accepts: P) -> impl Fn(Value) -> Result<Value>
where
    P: Fn(&Value) -> bool,
{
    move |subject| {
        let (accepted, rejected): (Vec<Value>, Vec<Value>) =
            lazy::elements(subject, "boolean_partition")?.partition(|element| accepts(element));
        Ok(Value::Sequence(vec![
            Value::Sequence(accepted),
            Value::Sequence(rejected),
        ]))
    }
}

/// Drops repeated elements, keeping first occurrences in order.
///
/// Equality is value equality, except that lazy sequences are compared by
/// identity.
///
/// # Errors
///
/// Same as [`group`].
pub fn distinct(subject: Value) -> Result<Value> {
    let mut seen = FastHashSet::default();
    Ok(lazy::elements(subject, "distinct")?
        .filter(|element| seen.insert(element.clone()))
        .collect())
}

/// Counts occurrences of each element, in first-seen order.
///
/// # Errors
///
/// Fails with [`Error::UnsupportedShape`] when an element is a container,
/// and otherwise as [`group`] does.
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::frequencies;
/// use shapefold::{mapping, sequence};
///
/// assert_eq!(
///     frequencies(sequence!["a", "b", "a"]).unwrap(),
///     mapping! { "a" => 2, "b" => 1 }
/// );
/// ```
pub fn frequencies(subject: Value) -> Result<Value> {
    let mut counts: Mapping<i64> = Mapping::new();
    for element in lazy::elements(subject, "frequencies")? {
        *counts.get_or_insert_with(Key::from_value(element, "frequencies")?, || 0) += 1;
    }
    Ok(Value::Mapping(
        counts.into_iter().map(|(key, count)| (key, Value::Int(count))).collect(),
    ))
}

/// Indexes elements into a mapping under `key(element)`, storing
/// `value(element)`. Later elements overwrite earlier ones with the same
/// key.
///
/// # Errors
///
/// Fails with [`Error::UnsupportedShape`] when `key` returns a container,
/// and otherwise as [`group`] does.
pub fn index_by<K, V>(key: K, value: V) -> impl Fn(Value) -> Result<Value>
where
    K: Fn(&Value) -> Value,
    V: Fn(Value) -> Value,
{
    move |subject| {
        let mut index = Mapping::new();
        for element in lazy::elements(subject, "index_by")? {
            let entry_key = Key::from_value(key(&element), "index_by")?;
            index.insert(entry_key, value(element));
        }
        Ok(Value::Mapping(index))
    }
}

/// [`index_by`], building a record whose field names are the keys.
///
/// # Errors
///
/// Same as [`index_by`].
pub fn record_by<K, V>(key: K, value: V) -> impl Fn(Value) -> Result<Value>
where
    K: Fn(&Value) -> Value,
    V: Fn(Value) -> Value,
{
    move |subject| {
        let mut record = Record::new();
        for element in lazy::elements(subject, "record_by")? {
            let name = Key::from_value(key(&element), "record_by")?;
            record.set(name.field_name().into_owned(), value(element));
        }
        Ok(Value::from(record))
    }
}
