//! Integration tests for the value model and shape classification.

use rstest::rstest;
use shapefold::lazy::{count_from, seq};
use shapefold::shape::{is_mapping, is_record, is_scalar, is_sequence};
use shapefold::{Key, LazySeq, Mapping, Record, Shape, Value, classify, mapping, record, sequence};

// =============================================================================
// classify
// =============================================================================

#[rstest]
#[case(sequence![1, 2], Shape::Sequence)]
#[case(sequence![], Shape::Sequence)]
#[case(seq(1, 3), Shape::Sequence)]
#[case(count_from(0), Shape::Sequence)]
#[case(mapping! { "a" => 1 }, Shape::Mapping)]
#[case(mapping! {}, Shape::Mapping)]
#[case(record! { a: 1 }, Shape::Record)]
#[case(record! {}, Shape::Record)]
#[case(Value::Null, Shape::Scalar)]
#[case(Value::Bool(false), Shape::Scalar)]
#[case(Value::Int(-1), Shape::Scalar)]
#[case(Value::Float(0.5), Shape::Scalar)]
#[case(Value::from(""), Shape::Scalar)]
fn test_classify(#[case] value: Value, #[case] expected: Shape) {
    assert_eq!(classify(&value), expected);
    assert_eq!(classify(&value), value.shape());
}

#[test]
fn test_shape_predicates_are_exclusive() {
    let samples = [
        sequence![1],
        mapping! { 1 => 1 },
        record! { a: 1 },
        Value::from("text"),
    ];
    for sample in &samples {
        let hits = [
            is_sequence(sample),
            is_mapping(sample),
            is_record(sample),
            is_scalar(sample),
        ];
        assert_eq!(hits.iter().filter(|&&hit| hit).count(), 1, "{sample}");
    }
}

#[test]
fn test_classify_does_not_consume_one_shot() {
    let value = Value::Lazy(LazySeq::once(vec![Value::Int(1)]));
    assert_eq!(classify(&value), Shape::Sequence);
    let lazy = value.as_lazy().unwrap();
    assert!(!lazy.is_consumed());
    assert_eq!(lazy.materialize("test").unwrap(), vec![Value::Int(1)]);
}

// =============================================================================
// Value model
// =============================================================================

#[test]
fn test_mapping_keeps_insertion_order() {
    let value = mapping! { "z" => 1, "a" => 2, 5 => 3, "z" => 4 };
    let mapping = value.as_mapping().unwrap();
    let keys: Vec<&Key> = mapping.keys().collect();
    assert_eq!(keys, vec![&Key::from("z"), &Key::from("a"), &Key::from(5)]);
    assert_eq!(mapping.get(&Key::from("z")), Some(&Value::Int(4)));
}

#[test]
fn test_record_fields_in_order() {
    let mut record: Record = [("b", Value::Int(1)), ("a", Value::Int(2))].into_iter().collect();
    record.set("b", Value::Int(3));
    record.set("c", Value::Int(4));
    let names: Vec<&str> = record.names().collect();
    assert_eq!(names, vec!["b", "a", "c"]);
    assert_eq!(record.get("b"), Some(&Value::Int(3)));
}

#[test]
fn test_mapping_remove_preserves_order() {
    let mut mapping: Mapping = (0..4).map(|number| (Key::from(number), Value::Int(number))).collect();
    mapping.remove(&Key::from(1));
    assert_eq!(mapping.get(&Key::from(3)), Some(&Value::Int(3)));
    let keys: Vec<Key> = mapping.keys().cloned().collect();
    assert_eq!(keys, vec![Key::from(0), Key::from(2), Key::from(3)]);
}

#[test]
fn test_int_and_float_are_distinct_values() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
}

#[test]
fn test_lazy_equality_is_identity() {
    let first = seq(1, 3);
    let copy = first.clone();
    assert_eq!(first, copy);
    assert_ne!(first, seq(1, 3));
}

#[rstest]
#[case(Value::Int(1), Value::Float(1.5), Some(std::cmp::Ordering::Less))]
#[case(Value::from("b"), Value::from("a"), Some(std::cmp::Ordering::Greater))]
#[case(sequence![1, 2], sequence![1], Some(std::cmp::Ordering::Greater))]
#[case(Value::from("1"), Value::Int(1), None)]
fn test_compare(#[case] left: Value, #[case] right: Value, #[case] expected: Option<std::cmp::Ordering>) {
    assert_eq!(left.compare(&right), expected);
}

#[rstest]
#[case(Value::Null, "null")]
#[case(Value::from("plain"), "plain")]
#[case(sequence![1, "a"], "[1, \"a\"]")]
#[case(mapping! { "k" => true }, "{\"k\": true}")]
#[case(record! { x: 1.5 }, "{x: 1.5}")]
fn test_display(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(value.to_string(), expected);
}

#[rstest]
#[case(Value::Bool(true), Key::Int(1))]
#[case(Value::Null, Key::from(""))]
#[case(Value::Float(2.9), Key::Int(2))]
#[case(Value::from("x"), Key::from("x"))]
fn test_key_from_scalar(#[case] value: Value, #[case] expected: Key) {
    assert_eq!(Key::from_value(value, "test").unwrap(), expected);
}

#[test]
fn test_key_from_container_fails() {
    assert!(Key::from_value(sequence![], "test").is_err());
}

static_assertions::assert_not_impl_any!(Value: Send, Sync);
static_assertions::assert_impl_all!(shapefold::Error: std::error::Error, Clone, Send, Sync);
