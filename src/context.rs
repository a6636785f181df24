//! Startup-time registry of scoped entities.

use crate::clock::{Clock, SystemClock};
use crate::config::ScopeConfig;
use crate::entity::EntityTable;
use crate::error::{Result, ScopeError};
use crate::scopes::{ModelScope, ResolverRegistry, SortAttribute, SortSettings};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Naming and sort declaration for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDefinition {
    pub table: EntityTable,
    /// `None` falls back to the configured default sort
    pub sort: Option<SortSettings>,
}

impl EntityDefinition {
    pub fn new(table: EntityTable) -> Self {
        Self { table, sort: None }
    }

    pub fn with_sort(mut self, sort: SortSettings) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Per-entity settings, resolvers, clock and configuration shared by every
/// query build
#[derive(Debug)]
pub struct ScopeContext {
    config: ScopeConfig,
    clock: Arc<dyn Clock>,
    resolvers: ResolverRegistry,
    entities: HashMap<String, EntityDefinition>,
    default_sort: SortSettings,
}

impl ScopeContext {
    pub fn builder() -> ScopeContextBuilder {
        ScopeContextBuilder::default()
    }

    /// Scope operations for a registered entity
    pub fn scope(&self, entity: &str) -> Result<ModelScope<'_>> {
        let definition = self.entities.get(entity).ok_or_else(|| {
            ScopeError::Configuration(format!("Entity '{entity}' is not registered"))
        })?;
        Ok(ModelScope::new(self, definition))
    }

    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn resolvers(&self) -> &ResolverRegistry {
        &self.resolvers
    }

    /// Sort settings applied to entities that declare none
    pub fn default_sort(&self) -> &SortSettings {
        &self.default_sort
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct ScopeContextBuilder {
    config: Option<ScopeConfig>,
    clock: Option<Arc<dyn Clock>>,
    resolvers: ResolverRegistry,
    entities: HashMap<String, EntityDefinition>,
}

impl ScopeContextBuilder {
    pub fn config(mut self, config: ScopeConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn resolver<F>(mut self, name: &str, resolver: F) -> Self
    where
        F: Fn(&[Value]) -> Result<String> + Send + Sync + 'static,
    {
        self.resolvers.register(name, resolver);
        self
    }

    pub fn entity(mut self, name: &str, definition: EntityDefinition) -> Self {
        self.entities.insert(name.to_string(), definition);
        self
    }

    /// Validate configuration and check every computed attribute has a resolver
    pub fn build(self) -> Result<ScopeContext> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        for (name, definition) in &self.entities {
            let Some(sort) = &definition.sort else {
                continue;
            };
            for attribute in &sort.attributes {
                if let SortAttribute::Computed { alias, resolver, .. } = attribute {
                    if !self.resolvers.contains(resolver) {
                        return Err(ScopeError::Configuration(format!(
                            "Entity '{name}' sorts '{alias}' with unregistered resolver '{resolver}'"
                        )));
                    }
                }
            }
        }

        debug!(
            entities = self.entities.len(),
            resolvers = ?self.resolvers,
            "Built scope context"
        );

        let default_sort = config.default_sort.to_sort_settings();
        Ok(ScopeContext {
            config,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            resolvers: self.resolvers,
            entities: self.entities,
            default_sort,
        })
    }
}
