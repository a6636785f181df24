use crate::context::{EntityDefinition, ScopeContext};
use crate::entity::EntityTable;
use crate::error::Result;
use crate::query_builder::{PageArg, Pagination, QueryBuilder};
use serde_json::json;
use tracing::{debug, warn};

use super::attributes::{resolve_requested_attributes, SortSettings};
use super::filters::{self, FilterValues};
use super::sort::{apply_sort, parse_sort_sequence};
use super::time::{self, TimeInput, TimePeriod};

/// Scope operations bound to one registered entity
#[derive(Debug, Clone, Copy)]
pub struct ModelScope<'a> {
    context: &'a ScopeContext,
    definition: &'a EntityDefinition,
}

impl<'a> ModelScope<'a> {
    pub(crate) fn new(context: &'a ScopeContext, definition: &'a EntityDefinition) -> Self {
        Self {
            context,
            definition,
        }
    }

    pub fn table(&self) -> &'a EntityTable {
        &self.definition.table
    }

    pub fn sort_settings(&self) -> &'a SortSettings {
        self.definition
            .sort
            .as_ref()
            .unwrap_or_else(|| self.context.default_sort())
    }

    /// A fresh query on the entity's table
    pub fn query(&self) -> QueryBuilder {
        QueryBuilder::new(&self.table().full_table_name())
    }

    /// Order by a client-supplied sort sequence, restricted to the entity's
    /// sortable attributes. An empty sequence applies the default order.
    pub fn sort_by_demand(&self, query: QueryBuilder, sort: Option<&str>) -> Result<QueryBuilder> {
        let settings = self.sort_settings();
        let requested = parse_sort_sequence(sort);
        let effective = if requested.is_empty() {
            &settings.default_order
        } else {
            &requested
        };

        let allow_list =
            resolve_requested_attributes(settings, self.context.resolvers(), effective)?;
        debug!(
            table = %self.table().table_name(),
            requested = requested.len(),
            allowed = allow_list.len(),
            "Applying sort scope"
        );

        Ok(apply_sort(query, &requested, &allow_list, &settings.default_order))
    }

    /// LIMIT/OFFSET for a page when both arguments are at least 1
    pub fn paginate_by_demand(
        &self,
        query: QueryBuilder,
        page: impl Into<PageArg>,
        per_page: impl Into<PageArg>,
    ) -> QueryBuilder {
        paginate_by_demand(query, page, per_page)
    }

    pub fn sort_and_paginate(
        &self,
        query: QueryBuilder,
        sort: Option<&str>,
        page: impl Into<PageArg>,
        per_page: impl Into<PageArg>,
    ) -> Result<QueryBuilder> {
        let query = self.sort_by_demand(query, sort)?;
        Ok(self.paginate_by_demand(query, page, per_page))
    }

    /// Rows whose `active` flag is set
    pub fn active(&self, query: QueryBuilder) -> QueryBuilder {
        query.where_eq(&self.table().full_column_name("active"), json!(1))
    }

    pub fn inactive(&self, query: QueryBuilder) -> QueryBuilder {
        query.where_eq(&self.table().full_column_name("active"), json!(0))
    }

    pub fn filter_by_strict_values(
        &self,
        query: QueryBuilder,
        column: &str,
        values: impl Into<FilterValues>,
        alias: Option<&str>,
    ) -> QueryBuilder {
        let column = self.table().qualify(column, alias);
        filters::filter_by_strict_values(query, &column, &values.into())
    }

    pub fn filter_by_like_values(
        &self,
        query: QueryBuilder,
        column: &str,
        values: impl Into<FilterValues>,
        alias: Option<&str>,
    ) -> QueryBuilder {
        let column = self.table().qualify(column, alias);
        filters::filter_by_like_values(
            query,
            &column,
            &values.into(),
            self.context.config().min_like_length,
        )
    }

    pub fn filter_by_time_range(
        &self,
        query: QueryBuilder,
        column: &str,
        from: Option<TimeInput>,
        to: Option<TimeInput>,
        alias: Option<&str>,
    ) -> Result<QueryBuilder> {
        let column = self.table().qualify(column, alias);
        time::filter_by_time_range(query, &column, from.as_ref(), to.as_ref()).inspect_err(|e| {
            warn!(column = %column, error = %e, "Rejected time range filter");
        })
    }

    /// Filter by a named period relative to the context clock; `None` means today
    pub fn filter_by_time_period(
        &self,
        query: QueryBuilder,
        column: &str,
        period: Option<&str>,
        alias: Option<&str>,
    ) -> Result<QueryBuilder> {
        let period = TimePeriod::parse_optional(period).inspect_err(|e| {
            warn!(column = %column, error = %e, "Rejected time period filter");
        })?;
        let column = self.table().qualify(column, alias);
        Ok(time::filter_by_time_period(
            query,
            &column,
            period,
            self.context.clock().now(),
        ))
    }
}

/// LIMIT/OFFSET for a page when both loosely-coerced arguments are at least 1
pub fn paginate_by_demand(
    query: QueryBuilder,
    page: impl Into<PageArg>,
    per_page: impl Into<PageArg>,
) -> QueryBuilder {
    match Pagination::for_page(page.into().as_int(), per_page.into().as_int()) {
        Some(pagination) => query.paginate(pagination),
        None => query,
    }
}
