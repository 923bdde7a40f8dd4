//! Filter, sort and pagination compilation.

mod filter;
mod page;
mod parse;
mod sort;
mod types;

pub(crate) use filter::build_where_impl;
pub use page::render_pagination;
pub(crate) use parse::{parse_conditions, parse_object};
pub use parse::{parse_filter, parse_filter_bytes};
pub use sort::{OrderKeyword, render_sort};
pub use types::{
    CompiledFragment, CompoundFilter, Filter, FilterConditions, FilterExpr, LogicalOp, Operator,
    PageSpec, SortDir, SortField, Value, and, or, simple,
};
