//! Shared fixtures for scope integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use model_scopes::context::{EntityDefinition, ScopeContext};
use model_scopes::entity::EntityTable;
use model_scopes::error::ScopeError;
use model_scopes::scopes::SortSettings;
use model_scopes::{FixedClock, ScopeConfig};
use serde_json::Value;
use std::sync::Arc;


/// Wednesday 2024-03-13 15:30:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 13, 15, 30, 0).unwrap()
}

pub fn posts_count_resolver(args: &[Value]) -> Result<String, ScopeError> {
    let table = args.first().and_then(Value::as_str).unwrap_or("posts");
    Ok(format!(
        "(SELECT COUNT(*) FROM {table} WHERE {table}.user_id = users.id)"
    ))
}

/// Context with a `users` entity (explicit sort settings) and a `tags`
/// entity (configured default sort), frozen at [`fixed_now`]
pub fn test_context() -> ScopeContext {
    ScopeContext::builder()
        .config(ScopeConfig::for_test())
        .clock(Arc::new(FixedClock::new(fixed_now())))
        .resolver("count_of", posts_count_resolver)
        .entity(
            "users",
            EntityDefinition::new(EntityTable::new("users")).with_sort(
                SortSettings::new()
                    .column("id")
                    .column("name")
                    .aliased("joined", "users.created_at")
                    .computed("posts", "count_of", vec![Value::from("posts")])
                    .with_default_order("-joined,id"),
            ),
        )
        .entity(
            "tags",
            EntityDefinition::new(EntityTable::new("tags").with_prefix("app_")),
        )
        .build()
        .expect("test context should build")
}
