use crate::query_builder::{Condition, QueryBuilder};
use serde_json::Value;

/// Filter input normalized to a list; `Null` elements match `IS NULL`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterValues(Vec<Value>);

impl FilterValues {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.0.iter()
    }
}

impl From<Value> for FilterValues {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => FilterValues(items),
            other => FilterValues(vec![other]),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for FilterValues {
    fn from(values: Vec<T>) -> Self {
        FilterValues(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for FilterValues {
    fn from(value: Option<T>) -> Self {
        FilterValues(vec![value.map_or(Value::Null, Into::into)])
    }
}

impl From<&str> for FilterValues {
    fn from(value: &str) -> Self {
        FilterValues(vec![Value::from(value)])
    }
}

impl From<String> for FilterValues {
    fn from(value: String) -> Self {
        FilterValues(vec![Value::from(value)])
    }
}

impl From<i64> for FilterValues {
    fn from(value: i64) -> Self {
        FilterValues(vec![Value::from(value)])
    }
}

impl From<f64> for FilterValues {
    fn from(value: f64) -> Self {
        FilterValues(vec![Value::from(value)])
    }
}

/// Equality-or-null predicates for each value
pub fn strict_conditions(column: &str, values: &FilterValues) -> Vec<Condition> {
    values
        .iter()
        .map(|value| match value {
            Value::Null => Condition::is_null(column),
            other => Condition::eq(column, other.clone()),
        })
        .collect()
}

/// Fuzzy predicates for each value.
///
/// Non-string values and strings shorter than `min_length` characters are
/// skipped. A string starting or ending with `%` becomes `LIKE`; any other
/// string is compared for equality.
pub fn like_conditions(column: &str, values: &FilterValues, min_length: usize) -> Vec<Condition> {
    values
        .iter()
        .filter_map(|value| match value {
            Value::Null => Some(Condition::is_null(column)),
            Value::String(text) if text.chars().count() >= min_length => {
                if text.starts_with('%') || text.ends_with('%') {
                    Some(Condition::like(column, text))
                } else {
                    Some(Condition::eq(column, value.clone()))
                }
            }
            _ => None,
        })
        .collect()
}

/// AND an OR-group matching any of `values` exactly
pub fn filter_by_strict_values(query: QueryBuilder, column: &str, values: &FilterValues) -> QueryBuilder {
    if values.is_empty() {
        return query;
    }
    query.where_any(strict_conditions(column, values))
}

/// AND an OR-group matching any of `values` fuzzily
pub fn filter_by_like_values(
    query: QueryBuilder,
    column: &str,
    values: &FilterValues,
    min_length: usize,
) -> QueryBuilder {
    if values.is_empty() {
        return query;
    }
    query.where_any(like_conditions(column, values, min_length))
}

/// Keep string values of at least `min_length` characters (0 disables the
/// check), optionally lowercased, without duplicates
pub fn normalize_filter_array(
    values: impl Into<FilterValues>,
    min_length: usize,
    to_lowercase: bool,
) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();

    for value in values.into().iter() {
        let Value::String(text) = value else {
            continue;
        };
        if min_length > 0 && text.chars().count() < min_length {
            continue;
        }
        let text = if to_lowercase {
            text.to_lowercase()
        } else {
            text.clone()
        };
        if !normalized.contains(&text) {
            normalized.push(text);
        }
    }

    normalized
}
