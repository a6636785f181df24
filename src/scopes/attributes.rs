use crate::error::{Result, ScopeError};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::sort::{parse_sort_sequence, SortSpec};

/// A sortable attribute declared by an entity
#[derive(Debug, Clone, PartialEq)]
pub enum SortAttribute {
    /// Column sorted under its own name
    Column(String),
    /// Column or SQL expression exposed under a different name
    Aliased { alias: String, column: String },
    /// Expression produced by a registered resolver
    Computed {
        alias: String,
        resolver: String,
        args: Vec<Value>,
    },
}

impl SortAttribute {
    pub fn alias(&self) -> &str {
        match self {
            SortAttribute::Column(column) => column,
            SortAttribute::Aliased { alias, .. } | SortAttribute::Computed { alias, .. } => alias,
        }
    }
}

/// Per-entity sort declaration
#[derive(Debug, Clone, PartialEq)]
pub struct SortSettings {
    pub attributes: Vec<SortAttribute>,
    pub default_order: SortSpec,
}

impl SortSettings {
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            default_order: SortSpec::new(),
        }
    }

    pub fn column(mut self, column: &str) -> Self {
        self.attributes
            .push(SortAttribute::Column(column.to_string()));
        self
    }

    pub fn aliased(mut self, alias: &str, column: &str) -> Self {
        self.attributes.push(SortAttribute::Aliased {
            alias: alias.to_string(),
            column: column.to_string(),
        });
        self
    }

    pub fn computed(mut self, alias: &str, resolver: &str, args: Vec<Value>) -> Self {
        self.attributes.push(SortAttribute::Computed {
            alias: alias.to_string(),
            resolver: resolver.to_string(),
            args,
        });
        self
    }

    /// Default order as a sort sequence, e.g. `"-created_at,id"`
    pub fn with_default_order(mut self, sequence: &str) -> Self {
        self.default_order = parse_sort_sequence(Some(sequence));
        self
    }
}

impl Default for SortSettings {
    fn default() -> Self {
        Self::new()
    }
}

pub type SortResolver = Arc<dyn Fn(&[Value]) -> Result<String> + Send + Sync>;

/// Named functions that produce sort expressions for computed attributes
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, SortResolver>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &str, resolver: F)
    where
        F: Fn(&[Value]) -> Result<String> + Send + Sync + 'static,
    {
        self.resolvers.insert(name.to_string(), Arc::new(resolver));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    pub fn resolve(&self, name: &str, args: &[Value]) -> Result<String> {
        let resolver = self.resolvers.get(name).ok_or_else(|| {
            ScopeError::Configuration(format!("Sort resolver '{name}' is not registered"))
        })?;
        resolver(args)
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.resolvers.keys().collect();
        names.sort();
        f.debug_struct("ResolverRegistry")
            .field("resolvers", &names)
            .finish()
    }
}

/// Allow-list of sort aliases and the column expressions they order by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortableAttributes {
    columns: HashMap<String, String>,
}

impl SortableAttributes {
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.columns.get(alias).map(String::as_str)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.columns.contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Build the full allow-list, invoking every computed resolver once
pub fn resolve_sortable_attributes(
    settings: &SortSettings,
    registry: &ResolverRegistry,
) -> Result<SortableAttributes> {
    resolve_matching(settings, registry, |_| true)
}

/// Build the allow-list restricted to the aliases `requested` names, so
/// resolvers of unrequested attributes never run
pub fn resolve_requested_attributes(
    settings: &SortSettings,
    registry: &ResolverRegistry,
    requested: &SortSpec,
) -> Result<SortableAttributes> {
    resolve_matching(settings, registry, |alias| requested.contains_key(alias))
}

fn resolve_matching(
    settings: &SortSettings,
    registry: &ResolverRegistry,
    wanted: impl Fn(&str) -> bool,
) -> Result<SortableAttributes> {
    let mut columns = HashMap::new();

    for attribute in settings.attributes.iter().filter(|a| wanted(a.alias())) {
        let column = match attribute {
            SortAttribute::Column(column) => column.clone(),
            SortAttribute::Aliased { column, .. } => column.clone(),
            SortAttribute::Computed { resolver, args, .. } => registry.resolve(resolver, args)?,
        };
        columns.insert(attribute.alias().to_string(), column);
    }

    Ok(SortableAttributes { columns })
}
