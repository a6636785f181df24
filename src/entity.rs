//! Table and column naming for scoped entities.

use serde::{Deserialize, Serialize};

/// Where an entity's rows live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTable {
    name: String,
    #[serde(default)]
    prefix: String,
    #[serde(default = "default_connection")]
    connection: String,
}

fn default_connection() -> String {
    "default".to_string()
}

impl EntityTable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            prefix: String::new(),
            connection: default_connection(),
        }
    }

    /// Connection-wide table prefix, e.g. `app_`
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn on_connection(mut self, connection: &str) -> Self {
        self.connection = connection.to_string();
        self
    }

    /// Table name without prefix
    pub fn table_name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn connection(&self) -> &str {
        &self.connection
    }

    /// Table name with prefix
    pub fn full_table_name(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }

    pub fn full_column_name(&self, column: &str) -> String {
        format!("{}.{}", self.full_table_name(), column)
    }

    /// Qualify `column` with `alias`, or with the full table name when no alias is given
    pub fn qualify(&self, column: &str, alias: Option<&str>) -> String {
        match alias.filter(|alias| !alias.is_empty()) {
            Some(alias) => format!("{alias}.{column}"),
            None => self.full_column_name(column),
        }
    }
}
