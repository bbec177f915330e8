//! End-to-end tests for request translation.

use std::collections::HashMap;

use query_engine_metadata::{FieldKind, FieldRegistry};
use query_engine_sql::sql::ast::{Comparison, Pagination, Value};
use query_engine_translation::translation::error::{Error, Phase};
use query_engine_translation::translation::translate;

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn task_registry() -> FieldRegistry {
    FieldRegistry::new()
        .filter("id", "id", FieldKind::Integer)
        .filter("name", "name", FieldKind::Text)
        .filter("done", "done", FieldKind::Boolean)
        .sortable("id")
        .sortable("name")
}

#[test]
fn defaults_to_first_page_of_fifty() {
    let descriptor = translate(&params(&[]), &task_registry()).unwrap();
    assert_eq!(
        descriptor.pagination,
        Pagination::OffsetLimit {
            offset: 0,
            limit: 50
        }
    );
    assert_eq!(descriptor.where_sql().sql, "");
    assert_eq!(descriptor.order_by_sql(), "");
}

#[test]
fn offset_is_page_minus_one_times_page_size() {
    for page in 1..=5 {
        for page_size in 1..=5 {
            let descriptor = translate(
                &params(&[
                    ("page", &page.to_string()),
                    ("page_size", &page_size.to_string()),
                ]),
                &task_registry(),
            )
            .unwrap();
            assert_eq!(
                descriptor.pagination,
                Pagination::OffsetLimit {
                    offset: (page - 1) * page_size,
                    limit: page_size
                }
            );
        }
    }
}

#[test]
fn renders_offset_and_limit() {
    let descriptor =
        translate(&params(&[("page", "3"), ("page_size", "10")]), &task_registry()).unwrap();
    assert_eq!(descriptor.pagination_sql(), "offset 20 limit 10");
}

#[test]
fn page_size_zero_lists_all_rows() {
    for page in ["", "1", "3", "0"] {
        let values = if page.is_empty() {
            params(&[("page_size", "0")])
        } else {
            params(&[("page", page), ("page_size", "0")])
        };
        let descriptor = translate(&values, &task_registry()).unwrap();
        assert_eq!(descriptor.pagination, Pagination::All);
        assert_eq!(descriptor.pagination_sql(), "");
    }
}

#[test]
fn non_integer_pagination_is_rejected() {
    let err = translate(&params(&[("page", "abc")]), &task_registry()).unwrap_err();
    assert_eq!(err.phase, Phase::Pagination);
    assert_eq!(err.error, Error::InvalidParameter("page".to_string()));

    let err = translate(&params(&[("page_size", "ten")]), &task_registry()).unwrap_err();
    assert_eq!(err.error, Error::InvalidParameter("page_size".to_string()));
}

#[test]
fn out_of_range_pagination_is_rejected() {
    for (page, page_size) in [("0", "10"), ("-1", "10"), ("2", "-5")] {
        let err = translate(
            &params(&[("page", page), ("page_size", page_size)]),
            &task_registry(),
        )
        .unwrap_err();
        assert_eq!(err.phase, Phase::Pagination);
        assert!(matches!(err.error, Error::InvalidPagination { .. }));
    }
}

#[test]
fn filters_follow_registry_order() {
    // "name" comes after "id" in the registry, whatever the request looks like
    let descriptor = translate(
        &params(&[("name", "shopping"), ("id", "7")]),
        &task_registry(),
    )
    .unwrap();
    let sql = descriptor.where_sql();
    assert_eq!(sql.sql, "id = $1 and name = $2");
    assert_eq!(
        sql.params,
        vec![Value::Int(7), Value::Text("shopping".to_string())]
    );
    assert_eq!(sql.params.len(), descriptor.where_.0.len());
}

#[test]
fn filter_values_are_kind_checked() {
    let err = translate(&params(&[("id", "abc")]), &task_registry()).unwrap_err();
    assert_eq!(err.phase, Phase::Filter);
    assert_eq!(
        err.error,
        Error::TypeMismatch {
            field: "id".to_string(),
            value: "abc".to_string(),
            kind: FieldKind::Integer,
        }
    );

    let err = translate(&params(&[("done", "maybe")]), &task_registry()).unwrap_err();
    assert!(matches!(err.error, Error::TypeMismatch { .. }));

    let descriptor = translate(&params(&[("done", "true")]), &task_registry()).unwrap();
    assert_eq!(descriptor.where_.0[0].value, Value::Bool(true));
}

#[test]
fn unchecked_fields_bind_raw_text_without_a_kind_check() {
    let registry = FieldRegistry::new()
        .filter("id", "id", FieldKind::Integer)
        .filter("note", "note", FieldKind::Unchecked);
    let descriptor = translate(&params(&[("note", "123abc")]), &registry).unwrap();
    let sql = descriptor.where_sql();
    assert_eq!(sql.sql, "note = $1");
    assert_eq!(sql.params, vec![Value::Text("123abc".to_string())]);
}

#[test]
fn unregistered_filter_fields_are_ignored() {
    let descriptor = translate(&params(&[("foo", "bar")]), &task_registry()).unwrap();
    assert_eq!(descriptor.where_sql().sql, "");
    assert!(descriptor.where_sql().params.is_empty());
}

#[test]
fn empty_filter_values_are_skipped() {
    let descriptor = translate(&params(&[("id", "")]), &task_registry()).unwrap();
    assert!(descriptor.where_.0.is_empty());
}

#[test]
fn predicates_only_use_equality() {
    let descriptor = translate(
        &params(&[("id", "1"), ("name", "x"), ("done", "false")]),
        &task_registry(),
    )
    .unwrap();
    assert!(descriptor
        .where_
        .0
        .iter()
        .all(|p| p.comparison == Comparison::Equals));
}

#[test]
fn order_keeps_request_order() {
    let registry = FieldRegistry::new().sortable("a").sortable("b");
    let descriptor = translate(&params(&[("order", "b,a")]), &registry).unwrap();
    assert_eq!(descriptor.order_by_sql(), "b,a");
}

#[test]
fn order_with_directions() {
    let registry = FieldRegistry::new()
        .sortable("field1")
        .sortable("field2")
        .sortable("field3");
    let descriptor = translate(
        &params(&[("order", "field1:desc,field3:asc,field2:desc")]),
        &registry,
    )
    .unwrap();
    assert_eq!(descriptor.order_by_sql(), "field1 desc,field3 asc,field2 desc");
}

#[test]
fn order_modifier_must_be_asc_or_desc() {
    let registry = FieldRegistry::new().sortable("a");
    let err = translate(&params(&[("order", "a:sideways")]), &registry).unwrap_err();
    assert_eq!(err.phase, Phase::Order);
    assert_eq!(
        err.error,
        Error::UnknownOrderModifier {
            field: "a".to_string(),
            modifier: "sideways".to_string(),
        }
    );

    // directions are case-sensitive
    let err = translate(&params(&[("order", "a:ASC")]), &registry).unwrap_err();
    assert!(matches!(err.error, Error::UnknownOrderModifier { .. }));
}

#[test]
fn order_items_take_exactly_one_modifier() {
    // everything past the first colon is the modifier; "a:asc:extra" is not
    // leniently read as "a asc"
    let registry = FieldRegistry::new().sortable("a");
    let err = translate(&params(&[("order", "a:asc:extra")]), &registry).unwrap_err();
    assert_eq!(err.phase, Phase::Order);
    assert_eq!(
        err.error,
        Error::UnknownOrderModifier {
            field: "a".to_string(),
            modifier: "asc:extra".to_string(),
        }
    );
}

#[test]
fn order_fields_must_be_allow_listed() {
    let registry = FieldRegistry::new().sortable("a").sortable("b");
    let err = translate(&params(&[("order", "c")]), &registry).unwrap_err();
    assert_eq!(err.phase, Phase::Order);
    assert_eq!(err.error, Error::FieldNotAllowed("c".to_string()));

    let err = translate(&params(&[("order", "a,c,b")]), &registry).unwrap_err();
    assert_eq!(err.error, Error::FieldNotAllowed("c".to_string()));
}

#[test]
fn order_with_empty_field_token_is_rejected() {
    let registry = FieldRegistry::new().sortable("a");
    for order in [",a", ":asc"] {
        let err = translate(&params(&[("order", order)]), &registry).unwrap_err();
        assert_eq!(err.error, Error::FieldNotAllowed(String::new()));
    }
}

#[test]
fn absent_order_is_not_an_error() {
    let descriptor = translate(&params(&[("order", "")]), &task_registry()).unwrap();
    assert!(descriptor.order_by.elements.is_empty());
}

#[test]
fn filter_errors_win_over_later_phases() {
    let err = translate(
        &params(&[("id", "abc"), ("page", "zero"), ("order", "nope")]),
        &task_registry(),
    )
    .unwrap_err();
    assert_eq!(err.phase, Phase::Filter);

    let err = translate(
        &params(&[("page", "zero"), ("order", "nope")]),
        &task_registry(),
    )
    .unwrap_err();
    assert_eq!(err.phase, Phase::Pagination);
}

#[test]
fn translation_is_deterministic() {
    let values = params(&[
        ("id", "7"),
        ("name", "shopping"),
        ("page", "2"),
        ("page_size", "25"),
        ("order", "name:desc,id"),
    ]);
    let registry = task_registry();

    let first = translate(&values, &registry).unwrap();
    let second = translate(&values, &registry).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.where_sql(), second.where_sql());
    assert_eq!(first.pagination_sql(), second.pagination_sql());
    assert_eq!(first.order_by_sql(), second.order_by_sql());
}

#[test]
fn full_translation() {
    let descriptor = translate(
        &params(&[
            ("name", "errands"),
            ("page", "2"),
            ("page_size", "25"),
            ("order", "name:desc,id"),
        ]),
        &task_registry(),
    )
    .unwrap();
    let where_sql = descriptor.where_sql();
    assert_eq!(where_sql.sql, "name = $1");
    assert_eq!(where_sql.params, vec![Value::Text("errands".to_string())]);
    assert_eq!(descriptor.pagination_sql(), "offset 25 limit 25");
    assert_eq!(descriptor.order_by_sql(), "name desc,id");
}
