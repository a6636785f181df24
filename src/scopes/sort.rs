use crate::error::{Result, ScopeError};
use crate::query_builder::QueryBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::attributes::SortableAttributes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ScopeError::Format(format!("Invalid sort direction: {other}"))),
        }
    }
}

/// Ordered sort key → direction mapping.
///
/// Re-inserting a key overwrites its direction in place, so precedence
/// follows the first time each key was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    entries: Vec<(String, SortDirection)>,
}

impl SortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, direction: SortDirection) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = direction,
            None => self.entries.push((key, direction)),
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.insert(key, direction);
        self
    }

    pub fn get(&self, key: &str) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, direction)| *direction)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SortDirection)> {
        self.entries
            .iter()
            .map(|(key, direction)| (key.as_str(), *direction))
    }
}

impl FromIterator<(String, SortDirection)> for SortSpec {
    fn from_iter<I: IntoIterator<Item = (String, SortDirection)>>(iter: I) -> Self {
        let mut spec = SortSpec::new();
        for (key, direction) in iter {
            spec.insert(key, direction);
        }
        spec
    }
}

/// Parse an API sort sequence such as `first_name,-last_name`.
///
/// A leading `-` sorts descending. Blank tokens are dropped and column names
/// are not validated here.
pub fn parse_sort_sequence(raw: Option<&str>) -> SortSpec {
    let mut spec = SortSpec::new();
    let Some(raw) = raw else {
        return spec;
    };

    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (key, direction) = match token.strip_prefix('-') {
            Some(key) => (key, SortDirection::Desc),
            None => (token, SortDirection::Asc),
        };
        if key.is_empty() {
            continue;
        }
        spec.insert(key, direction);
    }

    spec
}

/// Append ORDER BY terms for every allow-listed key.
///
/// An empty `spec` falls back to `default_order`; unknown keys are dropped.
pub fn apply_sort(
    mut query: QueryBuilder,
    spec: &SortSpec,
    allow_list: &SortableAttributes,
    default_order: &SortSpec,
) -> QueryBuilder {
    let effective = if spec.is_empty() { default_order } else { spec };

    for (key, direction) in effective.iter() {
        match allow_list.get(key) {
            Some(column) => {
                query = query.order_by(column, direction.as_sql());
            }
            None => {
                debug!(sort_key = %key, "Dropping sort key outside the allow-list");
            }
        }
    }

    query
}
