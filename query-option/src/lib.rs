// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs - extensive doc changes needed
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self by design
#![allow(clippy::must_use_candidate)] // Builder methods - fluent API doesn't need must_use
#![allow(clippy::match_same_arms)] // Intentional for clarity in some match expressions

//! # query-option - Mongo-style filters to parameterized SQL
//!
//! Compiles a JSON-like filter/sort/pagination request into SQL fragments
//! (`WHERE`, `ORDER BY`, `LIMIT`/`OFFSET`) plus the positional arguments
//! for the `WHERE` clause's `?` placeholders.
//!
//! ## Quick Start
//!
//! ```
//! use query_option::prelude::*;
//!
//! let spec = QuerySpec::parse(r#"{
//!     "filter_conditions": {"age": {"$gt": 18}, "name": {"$q": "jo"}},
//!     "sort": [{"field": "name", "direction": 1}],
//!     "per_page": 20,
//!     "page": 2
//! }"#).unwrap();
//!
//! let query = spec.compile(&FilterCompiler::new()).unwrap();
//!
//! assert_eq!(query.where_clause, "WHERE age > ? AND name ILIKE ?");
//! assert_eq!(query.args, vec![Value::Int(18), Value::String("%jo%".into())]);
//! assert_eq!(query.order_clause, "ORDER BY name ASC");
//! assert_eq!(query.pagination_clause, "\nLIMIT 20\nOFFSET 20\n");
//! ```
//!
//! ## Supported Operators
//!
//! | Operator | SQL | Example |
//! |----------|-----|---------|
//! | `$eq` | `=` | `"status": { "$eq": "active" }` or `"status": "active"` |
//! | `$q` | `ILIKE` (arg `%v%`) | `"name": { "$q": "jo" }` |
//! | `$gt` | `>` | `"age": { "$gt": 18 }` |
//! | `$gte` | `>=` | `"age": { "$gte": 21 }` |
//! | `$lt` | `<` | `"price": { "$lt": 100 }` |
//! | `$lte` | `<=` | `"price": { "$lte": 50 }` |
//! | `$in` | `IN (?, ...)` | `"status": { "$in": ["a", "b"] }` |
//! | `$and` / `$or` | `( ... AND/OR ... )` | `"$or": [{...}, {...}]` |
//!
//! ## Field names
//!
//! Field names are copied into the SQL text as given. Never build a filter
//! from untrusted input without [`CompilerConfig::allow_fields`] or
//! [`CompilerConfig::validate_identifiers`].
//!
//! ## Typed filters
//!
//! ```
//! use query_option::prelude::*;
//!
//! let filters = FilterConditions::new()
//!     .with(simple("active", Operator::Eq, true))
//!     .with(or(vec![
//!         simple("role", Operator::Eq, "admin"),
//!         simple("id", Operator::In, vec![1, 2]),
//!     ]));
//!
//! let fragment = FilterCompiler::new().compile(&filters).unwrap();
//! assert_eq!(fragment.sql, "WHERE active = ? AND (role = ? OR id IN (?, ?))");
//! assert_eq!(fragment.args.len(), 4);
//! ```

mod builder;
mod compiler;
mod config;
mod error;
mod query;
mod validate;

pub use builder::{
    CompiledFragment, CompoundFilter, Filter, FilterConditions, FilterExpr, LogicalOp, Operator,
    OrderKeyword, PageSpec, SortDir, SortField, Value, and, or, parse_filter, parse_filter_bytes,
    render_pagination, render_sort, simple,
};
pub use compiler::FilterCompiler;
pub use config::{CompilerConfig, DEFAULT_MAX_DEPTH};
pub use error::CompileError;
pub use query::{CompiledQuery, QuerySpec};
pub use validate::{is_valid_field_name, is_valid_sql_identifier};

/// Prelude module for convenient imports.
///
/// ```
/// use query_option::prelude::*;
/// let fragment = FilterCompiler::new().compile(&FilterConditions::new()).unwrap();
/// assert!(fragment.is_empty());
/// ```
pub mod prelude {
    pub use crate::{
        CompileError, CompiledFragment, CompiledQuery, CompilerConfig, CompoundFilter, Filter,
        FilterCompiler, FilterConditions, FilterExpr, LogicalOp, Operator, OrderKeyword, PageSpec,
        QuerySpec, SortDir, SortField, Value, and, or, parse_filter, parse_filter_bytes,
        render_pagination, render_sort, simple,
    };
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
