//! End-to-end SQL output for representative request bodies.

use insta::{assert_debug_snapshot, assert_snapshot};
use query_option::prelude::*;
use serde_json::json;

fn compile(filter: serde_json::Value) -> CompiledFragment {
    FilterCompiler::new().compile_json(&filter).unwrap()
}

#[test]
fn eq_condition() {
    let fragment = compile(json!({"key": {"$eq": "value"}}));
    assert_snapshot!(fragment.sql, @"WHERE key = ?");
    assert_eq!(fragment.args, vec![Value::String("value".into())]);
}

#[test]
fn comparison_conditions() {
    assert_snapshot!(compile(json!({"key": {"$gt": 5}})).sql, @"WHERE key > ?");
    assert_snapshot!(compile(json!({"key": {"$gte": 5}})).sql, @"WHERE key >= ?");
    assert_snapshot!(compile(json!({"key": {"$lt": 5}})).sql, @"WHERE key < ?");
    assert_snapshot!(compile(json!({"key": {"$lte": 5}})).sql, @"WHERE key <= ?");
}

#[test]
fn in_condition() {
    let fragment = compile(json!({"key": {"$in": [1, 2, 3]}}));
    assert_snapshot!(fragment.sql, @"WHERE key IN (?, ?, ?)");
    assert_debug_snapshot!(fragment.args, @r"
    [
        Int(
            1,
        ),
        Int(
            2,
        ),
        Int(
            3,
        ),
    ]
    ");
}

#[test]
fn and_with_multiple_conditions() {
    let fragment = compile(json!({
        "$and": [{"key1": {"$eq": "value1"}}, {"key2": {"$gt": 5}}]
    }));
    assert_snapshot!(fragment.sql, @"WHERE (key1 = ? AND key2 > ?)");
    assert_eq!(
        fragment.args,
        vec![Value::String("value1".into()), Value::Int(5)]
    );
}

#[test]
fn deeply_mixed_request() {
    let fragment = compile(json!({
        "tenant_id": 42,
        "title": {"$q": "rust"},
        "$or": [
            {"status": {"$in": ["draft", "review"]}},
            {"$and": [{"score": {"$gte": 3.5}}, {"score": {"$lt": 9}}]}
        ],
        "archived": false
    }));
    assert_snapshot!(
        fragment.sql,
        @"WHERE tenant_id = ? AND title ILIKE ? AND (status IN (?, ?) OR (score >= ? AND score < ?)) AND archived = ?"
    );
    assert_eq!(
        fragment.args,
        vec![
            Value::Int(42),
            Value::String("%rust%".into()),
            Value::String("draft".into()),
            Value::String("review".into()),
            Value::Float(3.5),
            Value::Int(9),
            Value::Bool(false),
        ]
    );
}

#[test]
fn full_query_spec() {
    let spec = QuerySpec::parse(
        r#"{
            "filter_conditions": {"age": {"$gt": 18}},
            "sort": [{"field": "name", "direction": 1}, {"field": "id", "direction": -1}],
            "per_page": 20,
            "page": 1
        }"#,
    )
    .unwrap();
    let query = spec.compile(&FilterCompiler::new()).unwrap();

    assert_snapshot!(query.where_clause, @"WHERE age > ?");
    assert_snapshot!(query.order_clause, @"ORDER BY name ASC, id DESC");
    assert_eq!(query.pagination_clause, "\nLIMIT 20\nOFFSET 0\n");
}

#[test]
fn legacy_order_keyword() {
    let compiler = FilterCompiler::with_config(CompilerConfig::new().legacy_order_keyword(true));
    assert_snapshot!(
        compiler.render_sort(&[SortField::new("name", SortDir::Desc)]),
        @"ORDER name DESC"
    );
}

#[test]
fn error_messages() {
    let err = FilterCompiler::new()
        .compile_json(&json!({"id": {"$in": "1,2"}}))
        .unwrap_err();
    assert_snapshot!(err, @"Operator '$in' on field 'id' does not accept string operand");

    let strict = FilterCompiler::with_config(CompilerConfig::new().strict(true));
    let err = strict.compile_json(&json!({"$and": {"a": 1}})).unwrap_err();
    assert_snapshot!(err, @"Operator '$and' expects an array of filter objects");
}
