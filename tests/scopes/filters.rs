use crate::common::test_context;
use model_scopes::scopes::normalize_filter_array;
use serde_json::{json, Value};

#[test]
fn test_strict_values_with_null() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let query =
        users.filter_by_strict_values(users.query(), "status", vec![json!(1), Value::Null], None);
    assert_eq!(
        query.build_sql(),
        "SELECT * FROM users WHERE (users.status = 1 OR users.status IS NULL)"
    );
}

#[test]
fn test_strict_scalar_value() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let query = users.filter_by_strict_values(users.query(), "role", "admin", Some("u"));
    assert_eq!(query.build_sql(), "SELECT * FROM users WHERE u.role = 'admin'");
}

#[test]
fn test_empty_filter_list_is_a_no_op() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let query = users.filter_by_strict_values(users.query(), "status", Vec::<Value>::new(), None);
    assert_eq!(query, users.query());

    let query = users.filter_by_like_values(users.query(), "name", json!([]), None);
    assert_eq!(query, users.query());
}

#[test]
fn test_like_values() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let query = users.filter_by_like_values(users.query(), "name", vec!["%ann", "bo%"], None);
    assert_eq!(
        query.build_sql(),
        "SELECT * FROM users WHERE (users.name LIKE '%ann' OR users.name LIKE 'bo%')"
    );
}

#[test]
fn test_like_value_without_wildcards_is_equality() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let query = users.filter_by_like_values(users.query(), "name", "ab", None);
    assert_eq!(query.build_sql(), "SELECT * FROM users WHERE users.name = 'ab'");
}

#[test]
fn test_short_like_values_are_ignored() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let query = users.filter_by_like_values(users.query(), "name", "a", None);
    assert_eq!(query.build_sql(), "SELECT * FROM users");

    let query = users.filter_by_like_values(users.query(), "name", vec!["a", "%bob%"], None);
    assert_eq!(query.build_sql(), "SELECT * FROM users WHERE users.name LIKE '%bob%'");
}

#[test]
fn test_like_counts_characters_not_bytes() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let query = users.filter_by_like_values(users.query(), "name", "é", None);
    assert_eq!(query.build_sql(), "SELECT * FROM users");
}

#[test]
fn test_active_and_inactive() {
    let context = test_context();
    let users = context.scope("users").unwrap();
    let tags = context.scope("tags").unwrap();

    assert_eq!(
        users.active(users.query()).build_sql(),
        "SELECT * FROM users WHERE users.active = 1"
    );
    assert_eq!(
        tags.inactive(tags.query()).build_sql(),
        "SELECT * FROM app_tags WHERE app_tags.active = 0"
    );
}

#[test]
fn test_normalize_filter_array() {
    let values = json!(["Foo", "a", "foo", 5, "BAR", null]);
    assert_eq!(
        normalize_filter_array(values.clone(), 2, true),
        vec!["foo".to_string(), "bar".to_string()]
    );
    assert_eq!(
        normalize_filter_array(values, 0, false),
        vec![
            "Foo".to_string(),
            "a".to_string(),
            "foo".to_string(),
            "BAR".to_string()
        ]
    );
}

#[test]
fn test_filters_are_deterministic() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let strict = || {
        users.filter_by_strict_values(users.query(), "status", vec![json!(1), Value::Null], None)
    };
    assert_eq!(strict(), strict());

    let like = || users.filter_by_like_values(users.query(), "name", vec!["%ann", "bob"], Some("u"));
    assert_eq!(like(), like());
    assert_eq!(like().build_sql(), like().build_sql());
}
