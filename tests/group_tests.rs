//! Integration tests for bucketing and indexing combinators.

use rstest::rstest;
use shapefold::combinator::{
    boolean_partition, distinct, frequencies, group, group_with, index_by, key_fn, partition,
    predicate, record_by,
};
use shapefold::lazy::{LazySeq, seq};
use shapefold::shape::{is_int, is_sequence, is_string};
use shapefold::{Error, Key, Value, mapping, record, sequence};

fn shirts() -> Value {
    sequence![
        record! { size: "m", colour: "blue" },
        record! { size: "l", colour: "red" },
        record! { size: "m", colour: "red" },
    ]
}

// =============================================================================
// group
// =============================================================================

#[test]
fn test_group_by_size() {
    let grouped = group([key_fn(|shirt: &Value| shirt.field("size"))])(shirts()).unwrap();
    assert_eq!(
        grouped,
        mapping! {
            "m" => sequence![
                record! { size: "m", colour: "blue" },
                record! { size: "m", colour: "red" },
            ],
            "l" => sequence![record! { size: "l", colour: "red" }],
        }
    );
}

#[test]
fn test_group_keys_in_first_seen_order() {
    let grouped = group([key_fn(|shirt: &Value| shirt.field("colour"))])(shirts()).unwrap();
    let keys: Vec<&Key> = grouped.as_mapping().unwrap().keys().collect();
    assert_eq!(keys, vec![&Key::from("blue"), &Key::from("red")]);
}

#[test]
fn test_group_nested_levels_with_pluck() {
    let grouped = group_with(
        |shirt: Value| shirt.field("colour"),
        [
            key_fn(|shirt: &Value| shirt.field("size")),
            key_fn(|shirt: &Value| shirt.field("colour")),
        ],
    )(shirts())
    .unwrap();
    assert_eq!(
        grouped,
        mapping! {
            "m" => mapping! { "blue" => sequence!["blue"], "red" => sequence!["red"] },
            "l" => mapping! { "red" => sequence!["red"] },
        }
    );
}

#[test]
fn test_group_lazy_input_and_int_keys() {
    let by_parity = group([key_fn(|x: &Value| Value::Int(x.as_int().unwrap_or(0) % 2))]);
    assert_eq!(
        by_parity(seq(1, 5)).unwrap(),
        mapping! { 1 => sequence![1, 3, 5], 0 => sequence![2, 4] }
    );
}

#[test]
fn test_group_rejects_container_keys() {
    let by_self = group([key_fn(Value::clone)]);
    assert!(matches!(
        by_self(sequence![sequence![1]]),
        Err(Error::UnsupportedShape { operation: "group", .. })
    ));
}

// =============================================================================
// partition
// =============================================================================

#[test]
fn test_partition_first_match_drops_unmatched() {
    let split = partition([predicate(is_string), predicate(is_int), predicate(is_sequence)]);
    let input = sequence!["yo", 1, sequence![], "bro", 2, Value::Null];
    assert_eq!(
        split(input).unwrap(),
        sequence![sequence!["yo", "bro"], sequence![1, 2], sequence![sequence![]]]
    );
}

#[test]
fn test_partition_bucket_count_matches_predicates() {
    let split = partition([predicate(is_string), predicate(is_string)]);
    assert_eq!(
        split(sequence!["a", 1]).unwrap(),
        sequence![sequence!["a"], sequence![]]
    );
}

#[test]
fn test_partition_without_predicates_is_configuration_error() {
    assert!(matches!(
        partition(Vec::new())(sequence![1]),
        Err(Error::Configuration { operation: "partition", .. })
    ));
}

#[test]
fn test_boolean_partition() {
    let small = boolean_partition(|x: &Value| x.as_int().is_some_and(|number| number < 3));
    assert_eq!(
        small(seq(1, 5)).unwrap(),
        sequence![sequence![1, 2], sequence![3, 4, 5]]
    );
}

// =============================================================================
// distinct / frequencies
// =============================================================================

#[rstest]
#[case(sequence![0, 0, 0, 1, 1, 0, 0, 1], sequence![0, 1])]
#[case(sequence!["b", "a", "b"], sequence!["b", "a"])]
#[case(sequence![1, 1.0, "1"], sequence![1, 1.0, "1"])]
#[case(sequence![sequence![1], sequence![1]], sequence![sequence![1]])]
#[case(sequence![], sequence![])]
fn test_distinct(#[case] input: Value, #[case] expected: Value) {
    assert_eq!(distinct(input).unwrap(), expected);
}

#[test]
fn test_distinct_on_one_shot() {
    let once = Value::Lazy(LazySeq::once([2, 2, 3].map(Value::Int)));
    assert_eq!(distinct(once).unwrap(), sequence![2, 3]);
}

#[test]
fn test_frequencies() {
    assert_eq!(
        frequencies(sequence!["a", "b", "a", 1]).unwrap(),
        mapping! { "a" => 2, "b" => 1, 1 => 1 }
    );
}

// =============================================================================
// index_by / record_by
// =============================================================================

#[test]
fn test_index_by_last_write_wins() {
    let by_size = index_by(|shirt: &Value| shirt.field("size"), |shirt: Value| shirt.field("colour"));
    assert_eq!(
        by_size(shirts()).unwrap(),
        mapping! { "m" => "red", "l" => "red" }
    );
}

#[test]
fn test_record_by_names_fields() {
    let users = sequence![
        record! { id: 7, name: "ada" },
        record! { id: 9, name: "bob" },
    ];
    let by_id = record_by(|user: &Value| user.field("id"), |user: Value| user.field("name"));
    let indexed = by_id(users).unwrap();
    assert_eq!(indexed.field("7"), Value::from("ada"));
    assert_eq!(indexed.field("9"), Value::from("bob"));
}
