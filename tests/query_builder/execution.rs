use model_scopes::database::DriverName;
use model_scopes::query_builder::QueryBuilder;
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn seeded_pool() -> SqlitePool {
    // One connection so every statement sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::query("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, active INTEGER NOT NULL)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO users (id, name, active) VALUES (1, 'ann', 1), (2, 'bob', 0), (3, 'cy', 1), (4, 'dee', 1)",
    )
    .execute(&pool)
    .await
    .unwrap();

    pool
}

fn active_users() -> QueryBuilder {
    QueryBuilder::new("users")
        .dialect(DriverName::Sqlite)
        .select(&["id", "name"])
        .where_eq("users.active", json!(1))
        .order_desc("users.id")
        .limit(2)
}

#[tokio::test]
async fn test_fetch_all_applies_order_and_limit() {
    let pool = seeded_pool().await;

    let rows: Vec<(i64, String)> = active_users().fetch_all(&pool).await.unwrap();
    assert_eq!(rows, vec![(4, "dee".to_string()), (3, "cy".to_string())]);
}

#[tokio::test]
async fn test_count_ignores_ordering_and_pagination() {
    let pool = seeded_pool().await;

    assert_eq!(active_users().count(&pool).await.unwrap(), 3);
    assert_eq!(QueryBuilder::new("users").offset(10).count(&pool).await.unwrap(), 4);
}

#[tokio::test]
async fn test_fetch_optional() {
    let pool = seeded_pool().await;
    let by_id = |id: i64| {
        QueryBuilder::new("users")
            .select(&["id", "name"])
            .where_eq("users.id", json!(id))
    };

    let found: Option<(i64, String)> = by_id(2).fetch_optional(&pool).await.unwrap();
    assert_eq!(found, Some((2, "bob".to_string())));

    let missing: Option<(i64, String)> = by_id(9).fetch_optional(&pool).await.unwrap();
    assert_eq!(missing, None);
}
