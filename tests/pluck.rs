use std::collections::HashMap;

use rust_data_coercion::pluck::{
    key_by_int64, key_by_uint64, pluck, pluck_filter, pluck_group_by, pluck_int, pluck_int32,
    pluck_int64, pluck_map, pluck_ptr, pluck_string, pluck_string_slice, pluck_uint32,
    pluck_uint64, pluck_unique, try_pluck_int, try_pluck_string,
};
use rust_data_coercion::types::{Record, Value};
use rust_data_coercion::CoercionError;

#[derive(Debug, Clone, PartialEq)]
struct Order {
    id: u64,
    customer: String,
    total: i32,
}

fn orders() -> Vec<Order> {
    vec![
        Order { id: 10, customer: "acme".to_string(), total: 5 },
        Order { id: 11, customer: "globex".to_string(), total: 7 },
        Order { id: 12, customer: "acme".to_string(), total: 9 },
    ]
}

fn order_record(o: &Order) -> Record {
    Record::new("Order")
        .with_field("ID", o.id)
        .with_field("Customer", o.customer.as_str())
        .with_field("Total", o.total)
        .with_field("Count", o.total as isize)
        .with_field("Ref", o.id as u32)
        .with_field("Cents", i64::from(o.total) * 100)
        .with_field("Tags", Value::slice([o.customer.as_str()]))
}

fn order_values() -> Value {
    Value::slice(orders().iter().map(|o| Value::ptr(order_record(o))))
}

#[test]
fn typed_family_is_total() {
    let list = orders();
    assert_eq!(pluck(&list, |o| o.id), vec![10, 11, 12]);
    assert_eq!(
        pluck_filter(&list, |o| o.total, |o| o.customer == "acme"),
        vec![5, 9]
    );
    assert_eq!(
        pluck_unique(&list, |o| o.customer.clone()),
        vec!["acme".to_string(), "globex".to_string()]
    );

    let totals: HashMap<u64, i32> = pluck_map(&list, |o| o.id, |o| o.total);
    assert_eq!(totals[&11u64], 7);

    let groups = pluck_group_by(&list, |o| o.customer.clone());
    assert_eq!(groups["acme"].len(), 2);
    assert_eq!(groups["acme"][1].id, 12);

    let sparse = vec![Some(list[0].clone()), None];
    assert_eq!(pluck_ptr(&sparse, |o| o.total, -1), vec![5, -1]);

    let empty: Vec<Order> = Vec::new();
    assert!(pluck(&empty, |o| o.id).is_empty());
    assert!(pluck_map(&empty, |o| o.id, |o| o.total).is_empty());
}

#[test]
fn reflective_family_reads_exact_field_types() {
    let list = order_values();
    assert_eq!(pluck_uint64(&list, "ID"), vec![10, 11, 12]);
    assert_eq!(pluck_int32(&list, "Total"), vec![5, 7, 9]);
    assert_eq!(pluck_int(&list, "Count"), vec![5, 7, 9]);
    assert_eq!(pluck_uint32(&list, "Ref"), vec![10, 11, 12]);
    assert_eq!(pluck_int64(&list, "Cents"), vec![500, 700, 900]);
    assert_eq!(pluck_string(&list, "Customer"), vec!["acme", "globex", "acme"]);
    assert_eq!(pluck_string_slice(&list, "Tags")[1], vec!["globex".to_string()]);
}

#[test]
fn reflective_family_matches_typed_family() {
    let typed = pluck(&orders(), |o| o.customer.clone());
    assert_eq!(pluck_string(&order_values(), "Customer"), typed);
}

#[test]
fn nested_order_batches_are_flattened() {
    let batches = Value::slice([
        Value::slice(orders()[..2].iter().map(|o| Value::ptr(order_record(o)))),
        Value::slice(orders()[2..].iter().map(order_record)),
    ]);
    assert_eq!(pluck_int64(&batches, "Cents"), vec![500, 700, 900]);
    assert_eq!(pluck_string(&batches, "Customer"), vec!["acme", "globex", "acme"]);
}

#[test]
fn orders_index_by_numeric_fields() {
    let list = order_values();
    let by_id = key_by_uint64(&list, "ID");
    assert_eq!(by_id.len(), 3);
    assert_eq!(by_id[&11u64], Value::ptr(order_record(&orders()[1])));

    let by_total = key_by_int64(&list, "Total");
    assert_eq!(pluck_int32(&Value::slice(vec![by_total[&9i64].clone()]), "Total"), vec![9]);
}

#[test]
#[should_panic(expected = "field ID has type uint64, expected signed integer")]
fn key_by_int64_panics_on_unsigned_fields() {
    key_by_int64(&order_values(), "ID");
}

#[test]
fn empty_lists_skip_all_checks() {
    assert!(pluck_int(&Value::slice(Vec::<Value>::new()), "Nope").is_empty());
}

#[test]
fn try_forms_report_violations() {
    let list = order_values();
    assert!(matches!(
        try_pluck_int(&list, "Foo"),
        Err(CoercionError::FieldNotFound { .. })
    ));
    assert!(matches!(
        try_pluck_int(&list, "Customer"),
        Err(CoercionError::FieldTypeMismatch { expected: "int", .. })
    ));
    assert!(matches!(
        try_pluck_string(&Value::Int64(1), "Customer"),
        Err(CoercionError::NotASequence { .. })
    ));
}

#[test]
#[should_panic(expected = "field Foo not found on struct 'Order'")]
fn pluck_int_panics_on_missing_field() {
    pluck_int(&order_values(), "Foo");
}

#[test]
#[should_panic(expected = "field Customer has type string, expected int")]
fn pluck_int_panics_on_field_type_mismatch() {
    pluck_int(&order_values(), "Customer");
}

#[test]
#[should_panic(expected = "element 0 is not a struct (got string)")]
fn pluck_panics_on_non_struct_elements() {
    pluck_string(&Value::slice(["a", "b"]), "Len");
}
