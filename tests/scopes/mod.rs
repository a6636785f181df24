//! Scope Integration Tests Module
//!
//! Scopes composed through a registered [`ScopeContext`](model_scopes::ScopeContext)
//! with a frozen clock.

pub mod filters;
pub mod time;
