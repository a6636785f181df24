//! # Query Builder System
//!
//! The query-builder capability that model scopes compose onto.
//!
//! ## Key Components
//!
//! - [`builder`] - Fluent query builder with SQL generation and `sqlx` execution
//! - [`conditions`] - WHERE clause building, including OR groups, `LIKE` and date comparisons
//! - [`pagination`] - LIMIT/OFFSET handling and loose page argument coercion
//!
//! Values are rendered inline with quote escaping. Column names and raw
//! expressions are trusted input: callers must only pass identifiers that came
//! from an allow-list, never client text.
//!
//! ## Example Usage
//!
//! ```rust
//! use model_scopes::query_builder::QueryBuilder;
//!
//! let sql = QueryBuilder::new("users")
//!     .where_eq("users.active", serde_json::json!(1))
//!     .order_desc("users.created_at")
//!     .limit(25)
//!     .build_sql();
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM users WHERE users.active = 1 ORDER BY users.created_at DESC LIMIT 25"
//! );
//! ```

pub mod builder;
pub mod conditions;
pub mod pagination;

pub use builder::QueryBuilder;
pub use conditions::{Condition, LogicalOperator, WhereClause};
pub use pagination::{PageArg, Pagination};
