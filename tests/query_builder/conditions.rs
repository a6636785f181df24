use model_scopes::database::DriverName;
use model_scopes::query_builder::conditions::*;
use serde_json::json;

#[test]
fn test_simple_condition() {
    let condition = Condition::Simple {
        field: "name".to_string(),
        operator: "=".to_string(),
        value: serde_json::Value::String("test".to_string()),
    };
    assert_eq!(condition.to_sql(None), "name = 'test'");
}

#[test]
fn test_in_condition() {
    let condition = Condition::In {
        field: "id".to_string(),
        values: vec![json!(1), json!(2), json!(3)],
    };
    assert_eq!(condition.to_sql(None), "id IN (1, 2, 3)");
}

#[test]
fn test_like_escapes_quotes() {
    let condition = Condition::like("users.name", "%O'Neil%");
    assert_eq!(condition.to_sql(None), "users.name LIKE '%O''Neil%'");
    assert_eq!(
        condition.to_sql(Some(DriverName::MariaDb)),
        "users.name LIKE '%O''Neil%'"
    );
}

#[test]
fn test_single_condition_or_group_has_no_parentheses() {
    let clause = WhereClause::or(vec![Condition::eq("users.status", json!(1))]);
    assert_eq!(clause.to_sql(None), "users.status = 1");
}

#[test]
fn test_and_group() {
    let clause = WhereClause::and(vec![
        Condition::eq("users.active", json!(true)),
        Condition::IsNotNull {
            field: "users.email".to_string(),
        },
    ]);
    assert_eq!(
        clause.to_sql(None),
        "(users.active = true AND users.email IS NOT NULL)"
    );
}
