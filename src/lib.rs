#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Model Scopes
//!
//! Declarative query scopes for SQL-backed entities: sort by demand, filter by
//! values, filter by time range or named period, and paginate by demand.
//!
//! ## Overview
//!
//! Each entity declares which attributes clients may sort by and its default
//! order. Request parameters (a sort sequence such as `-created_at,name`,
//! filter values, time bounds, page numbers) are turned into WHERE, ORDER BY
//! and LIMIT/OFFSET terms on a [`QueryBuilder`]. Untrusted sort keys never
//! reach SQL unless the entity allow-lists them.
//!
//! ## Module Organization
//!
//! - [`scopes`] - Sort parsing, allow-list resolution, filters, time periods, pagination
//! - [`query_builder`] - The query builder scopes compose onto
//! - [`context`] - Startup-time registry of entities, resolvers, clock and config
//! - [`entity`] - Table and column naming
//! - [`database`] - Driver detection with a TTL cache
//! - [`clock`] - Injectable time source
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//! - [`logging`] - `tracing` subscriber setup
//!
//! ## Quick Start
//!
//! ```rust
//! use model_scopes::context::{EntityDefinition, ScopeContext};
//! use model_scopes::entity::EntityTable;
//!
//! # fn main() -> model_scopes::Result<()> {
//! let context = ScopeContext::builder()
//!     .entity("posts", EntityDefinition::new(EntityTable::new("posts")))
//!     .build()?;
//!
//! let posts = context.scope("posts")?;
//! let query = posts.active(posts.query());
//! let query = posts.sort_and_paginate(query, None, "1", "10")?;
//! assert_eq!(
//!     query.build_sql(),
//!     "SELECT * FROM posts WHERE posts.active = 1 ORDER BY id ASC LIMIT 10 OFFSET 0"
//! );
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod context;
pub mod database;
pub mod entity;
pub mod error;
pub mod logging;
pub mod query_builder;
pub mod scopes;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ScopeConfig;
pub use context::{EntityDefinition, ScopeContext};
pub use database::{DriverName, DriverNameCache, DriverProbe};
pub use entity::EntityTable;
pub use error::{Result, ScopeError};
pub use query_builder::QueryBuilder;
pub use scopes::{ModelScope, SortDirection, SortSettings, SortSpec, TimeInput, TimePeriod};
