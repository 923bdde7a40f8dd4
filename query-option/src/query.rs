//! Request-level query options: filter, sort and pagination together.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::builder::{
    CompiledFragment, FilterConditions, PageSpec, SortField, Value, build_where_impl,
    parse_object, render_pagination,
};
use crate::compiler::FilterCompiler;
use crate::error::CompileError;

/// Query options as they arrive in a list/search request body.
///
/// ```json
/// {
///   "filter_conditions": {"status": {"$in": ["active", "pending"]}},
///   "sort": [{"field": "created_at", "direction": -1}],
///   "per_page": 20,
///   "page": 2
/// }
/// ```
///
/// Every member is optional. Pagination is rendered only when
/// `per_page` is present; a missing `page` means page 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    /// Undecoded filter document (`filter_conditions`).
    #[serde(rename = "filter_conditions", skip_serializing_if = "Map::is_empty")]
    pub filter: Map<String, JsonValue>,
    /// Sort fields in priority order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortField>,
    /// Page size; pagination is rendered only when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
    /// 1-indexed page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

/// The three fragments of a compiled [`QuerySpec`] plus the `WHERE` arguments.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "CompiledQuery must be used to execute the query"]
pub struct CompiledQuery {
    /// `WHERE ...` or empty.
    pub where_clause: String,
    /// `ORDER BY ...` or empty.
    pub order_clause: String,
    /// `LIMIT`/`OFFSET` lines or empty.
    pub pagination_clause: String,
    /// Arguments for the placeholders in `where_clause`.
    pub args: Vec<Value>,
}

impl CompiledQuery {
    /// Everything that follows `SELECT ... FROM ...`, in clause order.
    #[must_use]
    pub fn sql_suffix(&self) -> String {
        let mut sql = self.where_clause.clone();
        if !self.order_clause.is_empty() {
            if !sql.is_empty() {
                sql.push(' ');
            }
            sql.push_str(&self.order_clause);
        }
        sql.push_str(&self.pagination_clause);
        sql
    }
}

impl QuerySpec {
    /// Decode from a JSON request body.
    pub fn parse(json_str: &str) -> Result<Self, CompileError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Interpret `filter_conditions` into a typed filter under the compiler's settings.
    pub fn filter_conditions(
        &self,
        compiler: &FilterCompiler,
    ) -> Result<FilterConditions, CompileError> {
        parse_object(&self.filter, compiler.config()).map(FilterConditions::from)
    }

    /// Compile `filter_conditions` into a `WHERE` fragment.
    pub fn where_clause(&self, compiler: &FilterCompiler) -> Result<CompiledFragment, CompileError> {
        let filters = self.filter_conditions(compiler)?;
        build_where_impl(compiler.config(), &filters)
    }

    /// Render `sort` (empty string when there is none).
    #[must_use]
    pub fn order_clause(&self, compiler: &FilterCompiler) -> String {
        compiler.render_sort(&self.sort)
    }

    /// Page settings, if `per_page` was given.
    #[must_use]
    pub fn page_spec(&self) -> Option<PageSpec> {
        self.per_page
            .map(|per_page| PageSpec::new(self.page.unwrap_or(1), per_page))
    }

    /// Render `LIMIT`/`OFFSET` (empty string without `per_page`).
    #[must_use]
    pub fn pagination_clause(&self) -> String {
        self.page_spec().map(render_pagination).unwrap_or_default()
    }

    /// Compile all three fragments. Fails only if the filter does.
    pub fn compile(&self, compiler: &FilterCompiler) -> Result<CompiledQuery, CompileError> {
        let CompiledFragment { sql, args } = self.where_clause(compiler)?;
        Ok(CompiledQuery {
            where_clause: sql,
            order_clause: self.order_clause(compiler),
            pagination_clause: self.pagination_clause(),
            args,
        })
    }
}
