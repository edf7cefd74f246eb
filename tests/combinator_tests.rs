//! Integration tests for the search, list and ordering combinators.

use rstest::rstest;
use shapefold::combinator::{
    array, average, batch_default, by, construct, each, every, filter_indexed, find, find_index,
    first, fold_left, fold_right, head, join, last, map_indexed, natural, push, reverse, second,
    some, sort, split, sum, swap, tail,
};
use shapefold::lazy::{LazySeq, count_from, seq};
use shapefold::{Error, Shape, Value, mapping, pipe, record, sequence};
use std::cell::RefCell;
use std::cmp::Ordering;

fn int(value: &Value) -> i64 {
    value.as_int().unwrap_or(0)
}

fn is_even(value: &Value) -> bool {
    int(value) % 2 == 0
}

// =============================================================================
// Indexed element-wise combinators
// =============================================================================

#[test]
fn test_map_indexed_sees_index_and_source() {
    let relative = map_indexed(|x: Value, index, source: &Value| {
        let width = source.as_sequence().map_or(0, <[Value]>::len);
        Value::from(format!("{x}@{index}/{width}"))
    });
    assert_eq!(
        pipe!(sequence!["a", "b"], relative, array).unwrap(),
        sequence!["a@0/2", "b@1/2"]
    );
}

#[test]
fn test_filter_indexed_uses_source_index() {
    let odd_positions = filter_indexed(|_: &Value, index, _: &Value| index % 2 == 1);
    assert_eq!(
        pipe!(sequence!["a", "b", "c", "d"], odd_positions, array).unwrap(),
        sequence!["b", "d"]
    );
}

#[test]
fn test_batch_default_uses_hundred() {
    let chunks = pipe!(seq(1, 250), batch_default(), array).unwrap();
    let sizes: Vec<usize> = chunks
        .as_sequence()
        .unwrap()
        .iter()
        .map(|chunk| chunk.as_sequence().map_or(0, <[Value]>::len))
        .collect();
    assert_eq!(sizes, vec![100, 100, 50]);
}

// =============================================================================
// Folds
// =============================================================================

#[test]
fn test_fold_directions() {
    let concat = |left: Value, right: Value| Value::from(format!("{left}{right}"));
    let letters = sequence!["a", "b", "c"];
    assert_eq!(
        fold_left(concat, Value::from(">"))(letters.clone()).unwrap(),
        Value::from(">abc")
    );
    assert_eq!(
        fold_right(concat, Value::from("<"))(letters).unwrap(),
        Value::from("abc<")
    );
}

#[test]
fn test_fold_left_on_record_values() {
    let total = fold_left(|acc: Value, x: Value| Value::Int(int(&acc) + int(&x)), Value::Int(0));
    assert_eq!(total(record! { a: 1, b: 2, c: 3 }).unwrap(), Value::Int(6));
}

// =============================================================================
// Searches
// =============================================================================

#[test]
fn test_find_stops_on_infinite_producer() {
    let over_ten = |x: &Value| int(x) > 10;
    assert_eq!(find(over_ten)(count_from(0)).unwrap(), Value::Int(11));
    assert_eq!(find_index(over_ten)(count_from(5)).unwrap(), Value::Int(6));
}

#[test]
fn test_find_without_match_is_null() {
    assert_eq!(find(is_even)(sequence![1, 3]).unwrap(), Value::Null);
    assert_eq!(find_index(is_even)(sequence![]).unwrap(), Value::Null);
}

#[rstest]
#[case(sequence![2, 4], true, true)]
#[case(sequence![1, 4], false, true)]
#[case(sequence![1, 3], false, false)]
#[case(sequence![], true, false)]
fn test_every_and_some(#[case] subject: Value, #[case] all: bool, #[case] any: bool) {
    assert_eq!(every(is_even)(subject.clone()).unwrap(), all);
    assert_eq!(some(is_even)(subject).unwrap(), any);
}

#[test]
fn test_some_short_circuits_infinite_input() {
    assert!(some(|x: &Value| int(x) == 1000)(count_from(0)).unwrap());
}

#[test]
fn test_each_visits_in_order_and_returns_input() {
    let seen = RefCell::new(Vec::new());
    let visit = each(|x: &Value, index| seen.borrow_mut().push(format!("{index}:{x}")));
    let input = mapping! { "a" => 1, "b" => 2 };
    assert_eq!(visit(input.clone()).unwrap(), input);
    assert_eq!(*seen.borrow(), vec!["0:1".to_owned(), "1:2".to_owned()]);
}

// =============================================================================
// List helpers
// =============================================================================

#[rstest]
#[case(sequence![1, 2, 3], Value::Int(1), Value::Int(2), Value::Int(3))]
#[case(mapping! { "a" => "x" }, Value::from("x"), Value::Null, Value::from("x"))]
#[case(sequence![], Value::Null, Value::Null, Value::Null)]
fn test_positions(
    #[case] subject: Value,
    #[case] expected_first: Value,
    #[case] expected_second: Value,
    #[case] expected_last: Value,
) {
    assert_eq!(first(subject.clone()).unwrap(), expected_first);
    assert_eq!(second(subject.clone()).unwrap(), expected_second);
    assert_eq!(last(subject).unwrap(), expected_last);
}

#[test]
fn test_first_on_infinite_producer() {
    assert_eq!(first(count_from(7)).unwrap(), Value::Int(7));
}

#[test]
fn test_head_and_tail() {
    assert_eq!(head(sequence![1, 2, 3]).unwrap(), sequence![1, 2]);
    assert_eq!(tail(sequence![1, 2, 3]).unwrap(), sequence![2, 3]);
    assert_eq!(head(sequence![]).unwrap(), sequence![]);
    assert_eq!(
        pipe!(count_from(1), tail, first).unwrap(),
        Value::Int(2)
    );
}

#[test]
fn test_push() {
    assert_eq!(push(Value::Int(3))(sequence![1, 2]).unwrap(), sequence![1, 2, 3]);
    assert_eq!(
        push(Value::from("z"))(mapping! { "a" => 1, 4 => 2 }).unwrap(),
        mapping! { "a" => 1, 4 => 2, 5 => "z" }
    );
    assert_eq!(
        push(Value::from("z"))(mapping! { "a" => 1 }).unwrap(),
        mapping! { "a" => 1, 0 => "z" }
    );
    assert!(push(Value::Null)(seq(1, 2)).is_err());
}

#[test]
fn test_swap() {
    assert_eq!(swap(0, 2)(sequence!["a", "b", "c"]).unwrap(), sequence!["c", "b", "a"]);
    assert!(matches!(
        swap(0, 3)(sequence!["a"]),
        Err(Error::Configuration { operation: "swap", .. })
    ));
    assert!(matches!(
        swap(0, 1)(mapping! {}),
        Err(Error::UnsupportedShape { operation: "swap", shape: Shape::Mapping, .. })
    ));
}

#[test]
fn test_construct_sees_built_prefix() {
    let fibonacci = construct(
        |index, _, built: &[Value]| match index {
            0 | 1 => Value::Int(1),
            _ => Value::Int(int(&built[index - 1]) + int(&built[index - 2])),
        },
        7,
    );
    assert_eq!(fibonacci, sequence![1, 1, 2, 3, 5, 8, 13]);
}

#[test]
fn test_join_and_split() {
    assert_eq!(join(", ")(sequence!["a", 1, 2.5]).unwrap(), Value::from("a, 1, 2.5"));
    assert_eq!(join("-")(seq(1, 3)).unwrap(), Value::from("1-2-3"));
    assert_eq!(split(",")(Value::from("a,,b")).unwrap(), sequence!["a", "", "b"]);
    assert!(matches!(
        split("")(Value::from("abc")),
        Err(Error::Configuration { operation: "split", .. })
    ));
    assert!(split(",")(sequence![]).is_err());
}

#[rstest]
#[case(sequence![1, 2, 3], Value::Int(6))]
#[case(sequence![1, 0.5], Value::Float(1.5))]
#[case(sequence![], Value::Int(0))]
#[case(sequence![i64::MAX, 1], Value::Float(9_223_372_036_854_775_808.0))]
fn test_sum(#[case] subject: Value, #[case] expected: Value) {
    assert_eq!(sum(subject).unwrap(), expected);
}

#[test]
fn test_sum_rejects_non_numbers() {
    assert!(matches!(
        sum(sequence![1, "2"]),
        Err(Error::UnsupportedShape { operation: "sum", .. })
    ));
}

#[rstest]
#[case(sequence![1, 2], Value::Float(1.5))]
#[case(seq(1, 5), Value::Float(3.0))]
#[case(sequence![], Value::Null)]
fn test_average(#[case] subject: Value, #[case] expected: Value) {
    assert_eq!(average(subject).unwrap(), expected);
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_sort_stable_over_records() {
    let people = sequence![
        record! { name: "b", age: 30 },
        record! { name: "a", age: 20 },
        record! { name: "c", age: 30 },
    ];
    let by_age = sort(by(|person: &Value| person.field("age")));
    assert_eq!(
        by_age(people.clone()).unwrap(),
        sequence![
            record! { name: "a", age: 20 },
            record! { name: "b", age: 30 },
            record! { name: "c", age: 30 },
        ]
    );
    assert_eq!(first(people).unwrap().field("name"), Value::from("b"));
}

#[test]
fn test_sort_custom_comparator_and_lazy_input() {
    let descending = sort(|left: &Value, right: &Value| natural(right, left));
    assert_eq!(descending(seq(1, 4)).unwrap(), sequence![4, 3, 2, 1]);
}

#[test]
fn test_natural_orders_mixed_numbers() {
    assert_eq!(natural(&Value::Int(2), &Value::Float(1.5)), Ordering::Greater);
    assert_eq!(natural(&Value::from("a"), &Value::Int(1)), Ordering::Equal);
}

#[rstest]
#[case(sequence![1, 2, 3], sequence![3, 2, 1])]
#[case(seq(1, 3), sequence![3, 2, 1])]
#[case(mapping! { "a" => 1, "b" => 2 }, mapping! { "b" => 2, "a" => 1 })]
#[case(Value::from("abc"), Value::from("cba"))]
fn test_reverse(#[case] subject: Value, #[case] expected: Value) {
    let reversed = reverse(subject).unwrap();
    assert_eq!(reversed, expected);
    if let Some(mapping) = reversed.as_mapping() {
        let keys: Vec<String> = mapping.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["\"b\"", "\"a\""]);
    }
}

#[test]
fn test_reverse_rejects_numbers() {
    assert!(reverse(Value::Int(1)).is_err());
}

#[test]
fn test_one_shot_input_to_eager_combinator() {
    let once = Value::Lazy(LazySeq::once(vec![Value::Int(2), Value::Int(1)]));
    assert_eq!(sort(natural)(once.clone()).unwrap(), sequence![1, 2]);
    assert!(matches!(
        sum(once),
        Err(Error::AlreadyConsumed { operation: "sum" })
    ));
}
