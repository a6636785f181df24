//! Query Builder Tests Module
//!
//! SQL rendering and `sqlx` execution of the builder the scopes compose onto.

pub mod builder;
pub mod conditions;
pub mod execution;
pub mod pagination;
