//! # Model Scopes
//!
//! Declarative sort, filter, time and pagination scopes composed onto a
//! [`QueryBuilder`](crate::query_builder::QueryBuilder).
//!
//! ## Design Philosophy
//!
//! - **Allow-listed sorting**: client sort keys only reach SQL through the
//!   entity's declared [`SortSettings`]; anything else is dropped silently
//! - **Lenient input**: empty filter lists and invalid page numbers are no-ops
//! - **Strict ranges**: inverted time ranges (422) and unknown periods are errors
//! - **Composability**: every scope takes a builder and returns a builder
//!
//! ## Example Usage
//!
//! ```rust
//! use model_scopes::context::{EntityDefinition, ScopeContext};
//! use model_scopes::entity::EntityTable;
//! use model_scopes::scopes::SortSettings;
//!
//! # fn main() -> model_scopes::Result<()> {
//! let context = ScopeContext::builder()
//!     .entity(
//!         "users",
//!         EntityDefinition::new(EntityTable::new("users")).with_sort(
//!             SortSettings::new()
//!                 .column("id")
//!                 .column("email")
//!                 .with_default_order("-id"),
//!         ),
//!     )
//!     .build()?;
//!
//! let users = context.scope("users")?;
//! let query = users.filter_by_strict_values(users.query(), "status", vec!["active"], None);
//! let query = users.sort_and_paginate(query, Some("email,-password"), 2, 20)?;
//!
//! assert_eq!(
//!     query.build_sql(),
//!     "SELECT * FROM users WHERE users.status = 'active' ORDER BY email ASC LIMIT 20 OFFSET 20"
//! );
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod filters;
pub mod model;
pub mod sort;
pub mod time;

pub use attributes::{
    resolve_requested_attributes, resolve_sortable_attributes, ResolverRegistry, SortAttribute,
    SortResolver, SortSettings, SortableAttributes,
};
pub use filters::{normalize_filter_array, FilterValues};
pub use model::{paginate_by_demand, ModelScope};
pub use sort::{apply_sort, parse_sort_sequence, SortDirection, SortSpec};
pub use time::{normalize_instant, PeriodPredicate, TimeInput, TimePeriod};
