use super::{Condition, Pagination, WhereClause};
use crate::database::DriverName;
use chrono::NaiveDate;
use sqlx::{Database, Executor, FromRow, IntoArguments};

/// Fluent SQL query builder the scopes compose onto
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    base_table: String,
    select_fields: Vec<String>,
    joins: Vec<String>,
    where_clauses: Vec<WhereClause>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    pagination: Option<Pagination>,
    dialect: Option<DriverName>,
}

impl QueryBuilder {
    /// Create a new query builder for the given table (optionally `"table alias"`)
    pub fn new(table: &str) -> Self {
        Self {
            base_table: table.to_string(),
            select_fields: vec!["*".to_string()],
            joins: Vec::new(),
            where_clauses: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            pagination: None,
            dialect: None,
        }
    }

    /// Render driver-specific syntax for the given database
    pub fn dialect(mut self, driver: DriverName) -> Self {
        self.dialect = Some(driver);
        self
    }

    /// Set specific fields to select
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Add an INNER JOIN
    pub fn inner_join(mut self, table: &str, on_condition: &str) -> Self {
        self.joins
            .push(format!("INNER JOIN {table} ON {on_condition}"));
        self
    }

    /// Add a LEFT JOIN
    pub fn left_join(mut self, table: &str, on_condition: &str) -> Self {
        self.joins.push(format!("LEFT JOIN {table} ON {on_condition}"));
        self
    }

    /// Add a WHERE clause
    pub fn where_clause(mut self, clause: WhereClause) -> Self {
        self.where_clauses.push(clause);
        self
    }

    /// Add a single-condition WHERE clause
    pub fn where_condition(self, condition: Condition) -> Self {
        self.where_clause(WhereClause::single(condition))
    }

    /// Add a simple WHERE condition
    pub fn where_eq(self, field: &str, value: serde_json::Value) -> Self {
        self.where_clause(WhereClause::simple(field, "=", value))
    }

    /// Add a comparison (`>=`, `<`, ...) condition
    pub fn where_op(self, field: &str, operator: &str, value: serde_json::Value) -> Self {
        self.where_clause(WhereClause::simple(field, operator, value))
    }

    /// Add WHERE IN condition
    pub fn where_in(self, field: &str, values: Vec<serde_json::Value>) -> Self {
        self.where_clause(WhereClause::in_condition(field, values))
    }

    /// Add WHERE IS NULL condition
    pub fn where_null(self, field: &str) -> Self {
        self.where_clause(WhereClause::is_null(field))
    }

    /// Compare only the date part of a timestamp column
    pub fn where_date(self, field: &str, date: NaiveDate) -> Self {
        self.where_condition(Condition::DateEquals {
            field: field.to_string(),
            date,
        })
    }

    /// Add an inclusive BETWEEN condition
    pub fn where_between(
        self,
        field: &str,
        start: serde_json::Value,
        end: serde_json::Value,
    ) -> Self {
        self.where_condition(Condition::Between {
            field: field.to_string(),
            start,
            end,
        })
    }

    /// AND a parenthesized OR group; an empty group leaves the query untouched
    pub fn where_any(self, conditions: Vec<Condition>) -> Self {
        if conditions.is_empty() {
            return self;
        }
        self.where_clause(WhereClause::or(conditions))
    }

    /// Add GROUP BY clause
    pub fn group_by(mut self, fields: &[&str]) -> Self {
        self.group_by.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    /// Add ORDER BY clause
    pub fn order_by(mut self, field: &str, direction: &str) -> Self {
        self.order_by.push(format!("{field} {direction}"));
        self
    }

    /// Add ORDER BY ASC
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, "ASC")
    }

    /// Add ORDER BY DESC
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, "DESC")
    }

    /// Replace LIMIT/OFFSET
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Add LIMIT clause
    pub fn limit(mut self, limit: u64) -> Self {
        if let Some(ref mut pagination) = self.pagination {
            pagination.limit = Some(limit);
        } else {
            self.pagination = Some(Pagination::limit_only(limit));
        }
        self
    }

    /// Add OFFSET clause
    pub fn offset(mut self, offset: u64) -> Self {
        if let Some(ref mut pagination) = self.pagination {
            pagination.offset = Some(offset);
        } else {
            self.pagination = Some(Pagination::offset_only(offset));
        }
        self
    }

    pub fn base_table(&self) -> &str {
        &self.base_table
    }

    pub fn where_clauses(&self) -> &[WhereClause] {
        &self.where_clauses
    }

    pub fn order_by_clauses(&self) -> &[String] {
        &self.order_by
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Build the complete SQL query string
    pub fn build_sql(&self) -> String {
        let mut sql = String::new();

        sql.push_str("SELECT ");
        sql.push_str(&self.select_fields.join(", "));
        sql.push_str(&format!(" FROM {}", self.base_table));

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            let where_parts: Vec<String> = self
                .where_clauses
                .iter()
                .map(|clause| clause.to_sql(self.dialect))
                .collect();
            sql.push_str(&where_parts.join(" AND "));
        }

        if !self.group_by.is_empty() {
            sql.push_str(&format!(" GROUP BY {}", self.group_by.join(", ")));
        }

        if !self.order_by.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", self.order_by.join(", ")));
        }

        if let Some(ref pagination) = self.pagination {
            sql.push_str(&pagination.to_sql());
        }

        sql
    }

    /// Execute the query and return all rows.
    ///
    /// Works with any `sqlx` executor; set [`dialect`](Self::dialect) to match
    /// it when the query uses date or `LIKE` conditions.
    pub async fn fetch_all<'e, DB, T, E>(&self, executor: E) -> Result<Vec<T>, sqlx::Error>
    where
        DB: Database,
        E: Executor<'e, Database = DB>,
        T: for<'r> FromRow<'r, DB::Row> + Send + Unpin,
        for<'q> <DB as Database>::Arguments<'q>: IntoArguments<'q, DB>,
    {
        let sql = self.build_sql();
        sqlx::query_as::<DB, T>(&sql).fetch_all(executor).await
    }

    /// Execute the query and return optional row
    pub async fn fetch_optional<'e, DB, T, E>(&self, executor: E) -> Result<Option<T>, sqlx::Error>
    where
        DB: Database,
        E: Executor<'e, Database = DB>,
        T: for<'r> FromRow<'r, DB::Row> + Send + Unpin,
        for<'q> <DB as Database>::Arguments<'q>: IntoArguments<'q, DB>,
    {
        let sql = self.build_sql();
        sqlx::query_as::<DB, T>(&sql).fetch_optional(executor).await
    }

    /// Count matching rows, ignoring ordering and pagination
    pub async fn count<'e, DB, E>(&self, executor: E) -> Result<i64, sqlx::Error>
    where
        DB: Database,
        E: Executor<'e, Database = DB>,
        (i64,): for<'r> FromRow<'r, DB::Row>,
        for<'q> <DB as Database>::Arguments<'q>: IntoArguments<'q, DB>,
    {
        let mut count_builder = self.clone();
        count_builder.select_fields = vec!["COUNT(*)".to_string()];
        count_builder.order_by.clear();
        count_builder.pagination = None;

        let sql = count_builder.build_sql();
        sqlx::query_scalar::<DB, i64>(&sql).fetch_one(executor).await
    }
}
