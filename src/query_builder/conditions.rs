use crate::database::DriverName;
use chrono::NaiveDate;

/// Represents different types of SQL conditions
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Simple {
        field: String,
        operator: String,
        value: serde_json::Value,
    },
    In {
        field: String,
        values: Vec<serde_json::Value>,
    },
    Between {
        field: String,
        start: serde_json::Value,
        end: serde_json::Value,
    },
    IsNull {
        field: String,
    },
    IsNotNull {
        field: String,
    },
    Like {
        field: String,
        pattern: String,
    },
    DateEquals {
        field: String,
        date: NaiveDate,
    },
    Raw {
        sql: String,
    },
}

impl Condition {
    /// Equality shorthand
    pub fn eq(field: &str, value: serde_json::Value) -> Self {
        Condition::Simple {
            field: field.to_string(),
            operator: "=".to_string(),
            value,
        }
    }

    pub fn is_null(field: &str) -> Self {
        Condition::IsNull {
            field: field.to_string(),
        }
    }

    pub fn like(field: &str, pattern: &str) -> Self {
        Condition::Like {
            field: field.to_string(),
            pattern: pattern.to_string(),
        }
    }

    /// Convert condition to SQL for the given driver (generic SQL when `None`)
    pub fn to_sql(&self, dialect: Option<DriverName>) -> String {
        match self {
            Condition::Simple {
                field,
                operator,
                value,
            } => {
                format!("{} {} {}", field, operator, format_value(value))
            }
            Condition::In { field, values } => {
                let value_list = values
                    .iter()
                    .map(format_value)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{field} IN ({value_list})")
            }
            Condition::Between { field, start, end } => {
                format!(
                    "{} BETWEEN {} AND {}",
                    field,
                    format_value(start),
                    format_value(end)
                )
            }
            Condition::IsNull { field } => {
                format!("{field} IS NULL")
            }
            Condition::IsNotNull { field } => {
                format!("{field} IS NOT NULL")
            }
            Condition::Like { field, pattern } => {
                let pattern = format_text(pattern);
                match dialect {
                    // Matches case-insensitively like the other drivers' default collations
                    Some(DriverName::PgSql) => format!("{field}::text ILIKE {pattern}"),
                    _ => format!("{field} LIKE {pattern}"),
                }
            }
            Condition::DateEquals { field, date } => {
                let date = format_text(&date.format("%Y-%m-%d").to_string());
                match dialect {
                    Some(DriverName::PgSql) => format!("{field}::date = {date}"),
                    Some(DriverName::Sqlite) => {
                        format!("strftime('%Y-%m-%d', {field}) = CAST({date} AS TEXT)")
                    }
                    Some(DriverName::SqlSrv) => format!("CAST({field} AS date) = {date}"),
                    Some(DriverName::MySql) | Some(DriverName::MariaDb) | None => {
                        format!("DATE({field}) = {date}")
                    }
                }
            }
            Condition::Raw { sql } => sql.clone(),
        }
    }
}

/// Represents a WHERE clause that can contain multiple conditions
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub conditions: Vec<Condition>,
    pub operator: LogicalOperator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl WhereClause {
    /// Create a simple WHERE clause with a single condition
    pub fn simple(field: &str, operator: &str, value: serde_json::Value) -> Self {
        Self::single(Condition::Simple {
            field: field.to_string(),
            operator: operator.to_string(),
            value,
        })
    }

    /// Wrap one condition
    pub fn single(condition: Condition) -> Self {
        Self {
            conditions: vec![condition],
            operator: LogicalOperator::And,
        }
    }

    /// Create WHERE IN clause
    pub fn in_condition(field: &str, values: Vec<serde_json::Value>) -> Self {
        Self::single(Condition::In {
            field: field.to_string(),
            values,
        })
    }

    /// Create WHERE IS NULL clause
    pub fn is_null(field: &str) -> Self {
        Self::single(Condition::is_null(field))
    }

    /// Create WHERE IS NOT NULL clause
    pub fn is_not_null(field: &str) -> Self {
        Self::single(Condition::IsNotNull {
            field: field.to_string(),
        })
    }

    /// Create raw SQL condition
    pub fn raw(sql: &str) -> Self {
        Self::single(Condition::Raw {
            sql: sql.to_string(),
        })
    }

    /// Combine multiple conditions with AND
    pub fn and(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::And,
        }
    }

    /// Combine multiple conditions with OR
    pub fn or(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::Or,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Convert to SQL string
    pub fn to_sql(&self, dialect: Option<DriverName>) -> String {
        if self.conditions.is_empty() {
            return "1=1".to_string();
        }

        if self.conditions.len() == 1 {
            return self.conditions[0].to_sql(dialect);
        }

        let operator_str = match self.operator {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        };

        let condition_sqls: Vec<String> = self
            .conditions
            .iter()
            .map(|c| c.to_sql(dialect))
            .collect();

        format!("({})", condition_sqls.join(operator_str))
    }
}

/// Format a JSON value for SQL
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "NULL".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => format_text(s),
        _ => format_text(&value.to_string()),
    }
}

fn format_text(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
