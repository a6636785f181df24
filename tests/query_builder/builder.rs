use chrono::NaiveDate;
use model_scopes::database::DriverName;
use model_scopes::query_builder::{Condition, QueryBuilder};
use serde_json::json;

#[test]
fn test_basic_query_building() {
    let query = QueryBuilder::new("users")
        .select(&["id", "name", "email"])
        .where_eq("users.status", json!("active"))
        .order_desc("created_at")
        .limit(10);

    let sql = query.build_sql();
    assert!(sql.contains("SELECT id, name, email"));
    assert!(sql.contains("FROM users"));
    assert!(sql.contains("ORDER BY created_at DESC"));
    assert!(sql.contains("LIMIT 10"));
}

#[test]
fn test_where_clauses_are_and_combined() {
    let query = QueryBuilder::new("posts")
        .where_op("posts.score", ">=", json!(10))
        .where_any(vec![
            Condition::eq("posts.state", json!("draft")),
            Condition::is_null("posts.state"),
        ])
        .where_in("posts.author_id", vec![json!(1), json!(2)]);

    assert_eq!(
        query.build_sql(),
        "SELECT * FROM posts WHERE posts.score >= 10 AND (posts.state = 'draft' OR posts.state IS NULL) AND posts.author_id IN (1, 2)"
    );
}

#[test]
fn test_between_and_date_conditions() {
    let query = QueryBuilder::new("events")
        .where_between(
            "events.starts_at",
            json!("2024-03-11 00:00:00"),
            json!("2024-03-17 23:59:59"),
        )
        .where_date("events.created_at", NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());

    assert_eq!(
        query.build_sql(),
        "SELECT * FROM events WHERE events.starts_at BETWEEN '2024-03-11 00:00:00' AND '2024-03-17 23:59:59' AND DATE(events.created_at) = '2024-03-13'"
    );
}

#[test]
fn test_sqlsrv_dialect_date_rendering() {
    let query = QueryBuilder::new("events")
        .dialect(DriverName::SqlSrv)
        .where_date("events.created_at", NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());

    assert!(query
        .build_sql()
        .ends_with("WHERE CAST(events.created_at AS date) = '2024-03-13'"));
}

#[test]
fn test_limit_then_offset_share_pagination() {
    let query = QueryBuilder::new("users").limit(5).offset(15);
    assert_eq!(query.build_sql(), "SELECT * FROM users LIMIT 5 OFFSET 15");
}
